//! `npc-trace` — trace output for replicated NPC schedulers.
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`row`]      | `TraceRow`, `EventRow`, `TraceEvent`            |
//! | [`writer`]   | `TraceWriter` trait                             |
//! | [`csv`]      | `CsvTraceWriter` → `snapshots.csv`, `events.csv` |
//! | [`observer`] | `TraceObserver`, a `SchedulerObserver` adapter  |
//!
//! # Usage
//!
//! ```rust,ignore
//! use npc_trace::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("./output"))?;
//! let mut trace = TraceObserver::new(writer);
//! population.init_all(&mut trace);
//! population.step(1.0 / 60.0, &mut trace);
//! trace.finish();
//! trace.take_error().map(|e| eprintln!("trace error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvTraceWriter;
pub use error::{TraceError, TraceResult};
pub use observer::TraceObserver;
pub use row::{EventRow, TraceEvent, TraceRow};
pub use writer::TraceWriter;
