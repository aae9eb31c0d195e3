//! Incremental notifications emitted while a batch runs

/// Outcome of one row, as reported in [`ProgressEvent::RowCompleted`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowStatus {
    Success,
    Failed { message: String },
}

/// Lifecycle notification for one row
///
/// Counts are the running totals at the moment the event is emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    RowStarted {
        row_index: usize,
        success: usize,
        failed: usize,
    },
    RowCompleted {
        row_index: usize,
        status: RowStatus,
        success: usize,
        failed: usize,
    },
}

/// Receives progress notifications
pub trait ProgressObserver: Send + Sync {
    fn notify(&self, event: &ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn notify(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn notify(&self, _event: &ProgressEvent) {}
}
