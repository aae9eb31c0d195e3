//! Execution strategy and cancellation for the batch loop

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// How rows are submitted
///
/// Both modes record outcomes in row order, so the report is the same shape
/// either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// One request at a time; row N is submitted after row N-1 resolves
    #[default]
    Sequential,
    /// Up to `max_in_flight` requests overlap
    Bounded { max_in_flight: usize },
}

impl ExecutionMode {
    /// `0` or `1` means sequential
    pub fn from_max_in_flight(max_in_flight: usize) -> Self {
        if max_in_flight <= 1 {
            ExecutionMode::Sequential
        } else {
            ExecutionMode::Bounded { max_in_flight }
        }
    }

    pub fn max_in_flight(&self) -> usize {
        match self {
            ExecutionMode::Sequential => 1,
            ExecutionMode::Bounded { max_in_flight } => (*max_in_flight).max(1),
        }
    }
}

/// Cooperative cancellation, checked before each row is submitted
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
