//! The `TraceWriter` trait implemented by trace backends.

use crate::{EventRow, TraceResult, TraceRow};

/// A sink for trace rows.
///
/// Errors are returned to [`TraceObserver`][crate::TraceObserver], which
/// keeps the first one for [`take_error`][crate::TraceObserver::take_error].
pub trait TraceWriter {
    /// Write one replicated snapshot.
    fn write_snapshot(&mut self, row: &TraceRow) -> TraceResult<()>;

    /// Write one scheduler event.
    fn write_event(&mut self, row: &EventRow) -> TraceResult<()>;

    /// Flush all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> TraceResult<()>;
}
