//! Aggregated result of a batch run

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::tabular::Row;

/// Number of row errors shown in a summary before the rest are collapsed
pub const DEFAULT_ERROR_PREVIEW: usize = 10;

/// One failed row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowError {
    /// 1-based position in the table's row sequence
    pub row_index: usize,
    /// The row as it was read
    pub row_data: Row,
    /// Most specific message available for the failure
    pub message: String,
}

/// Counters and error detail for one run
///
/// `total` is fixed when the run starts; a cancelled run leaves
/// `success + failed < total`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub run_id: Uuid,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<RowError>,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchReport {
    pub fn new(total: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            total,
            success: 0,
            failed: 0,
            errors: Vec::new(),
            cancelled: false,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record_success(&mut self) {
        self.success += 1;
    }

    /// Record a failed row; a blank message becomes "Unknown error"
    pub fn record_failure(&mut self, row_index: usize, row_data: &Row, message: impl Into<String>) {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "Unknown error".to_string();
        }

        self.failed += 1;
        self.errors.push(RowError {
            row_index,
            row_data: row_data.clone(),
            message,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Rows with a recorded outcome
    pub fn processed(&self) -> usize {
        self.success + self.failed
    }

    /// Every row has an outcome
    pub fn is_complete(&self) -> bool {
        self.processed() == self.total
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// First `limit` errors plus the count of those left out
    pub fn error_preview(&self, limit: usize) -> ErrorPreview<'_> {
        let shown = &self.errors[..self.errors.len().min(limit)];
        ErrorPreview {
            shown,
            suppressed: self.errors.len() - shown.len(),
        }
    }
}

/// Bounded view over a report's errors
#[derive(Debug, Clone, Copy)]
pub struct ErrorPreview<'a> {
    pub shown: &'a [RowError],
    pub suppressed: usize,
}

impl ErrorPreview<'_> {
    /// "... and N more errors" line, when anything was left out
    pub fn suppressed_line(&self) -> Option<String> {
        (self.suppressed > 0).then(|| format!("... and {} more errors", self.suppressed))
    }
}
