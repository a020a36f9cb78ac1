//! `npc-sim` — the authoritative side of replicated NPC motion.
//!
//! # Per-step loop
//!
//! ```text
//! Scheduler::step(delta):
//!   ① Geofence  — outside max_distance of home → forced ReturnHome
//!   ② Advance   — pure npc_behavior::advance; displacement → Controller::move_by
//!   ③ Reselect  — finished action → BehaviorModel::select
//!   ④ Publish   — accumulator > publish_interval → one Snapshot, reset to 0
//! ```
//!
//! `Scheduler::init` runs once before the first step: it places the agent at
//! home and publishes the full [`InitState`][npc_replication::InitState].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `Population::step` advances agents on Rayon's pool.    |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use npc_replication::LoopbackHub;
//! use npc_sim::{AgentProfile, ChannelPublisher, SchedulerBuilder};
//!
//! let mut bartender = SchedulerBuilder::new(AgentProfile::bartender()).seed(42).build()?;
//! let mut publisher = ChannelPublisher::new();
//! publisher.attach(bartender.id(), LoopbackHub::new());
//!
//! bartender.init(&mut publisher);
//! for _ in 0..600 {
//!     bartender.step(1.0 / 60.0, &mut publisher);
//! }
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod observer;
pub mod population;
pub mod profile;
pub mod publisher;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use builder::SchedulerBuilder;
pub use controller::{Controller, ControllerShape, GroundedController};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SchedulerObserver};
pub use population::Population;
pub use profile::{AgentProfile, DEFAULT_PUBLISH_INTERVAL, WIZARD_VARIANTS};
pub use publisher::ChannelPublisher;
pub use scheduler::Scheduler;
