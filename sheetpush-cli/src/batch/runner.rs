//! The batch loop: derive variables, submit, classify, accumulate

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::StreamExt;
use log::{debug, info, warn};

use crate::api::MutationTransport;
use crate::tabular::{Row, Table};

use super::{
    BatchReport, CancellationFlag, ConfigurationError, ExecutionMode, IdTagListMapper,
    NoProgress, ProgressEvent, ProgressObserver, RowStatus, RunConfig, VariableMapper,
};

/// Replays each table row as one mutation and aggregates the outcomes
///
/// A failing row never stops the batch. Only configuration errors, checked
/// before the first row, are returned as `Err`.
pub struct BatchRunner<T> {
    transport: T,
    mapper: Arc<dyn VariableMapper>,
    mode: ExecutionMode,
    cancellation: CancellationFlag,
}

impl<T: MutationTransport> BatchRunner<T> {
    /// Sequential runner using the id/tagList mapper
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            mapper: Arc::new(IdTagListMapper),
            mode: ExecutionMode::Sequential,
            cancellation: CancellationFlag::new(),
        }
    }

    pub fn with_mapper(mut self, mapper: impl VariableMapper + 'static) -> Self {
        self.mapper = Arc::new(mapper);
        self
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle that cancels this runner between rows
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    pub async fn run(
        &self,
        table: &Table,
        config: &RunConfig,
    ) -> Result<BatchReport, ConfigurationError> {
        self.run_with_progress(table, config, &NoProgress).await
    }

    pub async fn run_with_progress(
        &self,
        table: &Table,
        config: &RunConfig,
        observer: &dyn ProgressObserver,
    ) -> Result<BatchReport, ConfigurationError> {
        config.validate()?;

        let mut report = BatchReport::new(table.len());
        info!(
            "Run {} - processing {} rows against {} ({:?})",
            report.run_id,
            report.total,
            config.endpoint(),
            self.mode
        );

        match self.mode {
            ExecutionMode::Sequential => {
                self.run_sequential(table, config, observer, &mut report).await
            }
            ExecutionMode::Bounded { .. } => {
                self.run_bounded(table, config, observer, &mut report).await
            }
        }

        report.finish();
        if report.cancelled {
            warn!(
                "Run {} - cancelled after {}/{} rows",
                report.run_id,
                report.processed(),
                report.total
            );
        }
        info!(
            "Run {} - finished: {} succeeded, {} failed, {} total",
            report.run_id, report.success, report.failed, report.total
        );

        Ok(report)
    }

    async fn run_sequential(
        &self,
        table: &Table,
        config: &RunConfig,
        observer: &dyn ProgressObserver,
        report: &mut BatchReport,
    ) {
        for (idx, row) in table.rows().iter().enumerate() {
            if self.cancellation.is_cancelled() {
                report.cancelled = true;
                break;
            }

            let row_index = idx + 1;
            observer.notify(&ProgressEvent::RowStarted {
                row_index,
                success: report.success,
                failed: report.failed,
            });

            let outcome = self.process_row(table.headers(), row, config, row_index).await;
            record(report, observer, row_index, row, outcome);
        }
    }

    async fn run_bounded(
        &self,
        table: &Table,
        config: &RunConfig,
        observer: &dyn ProgressObserver,
        report: &mut BatchReport,
    ) {
        // Running counts visible to rows that start while others are in flight
        let success = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let in_flight = futures::stream::iter(table.rows().iter().enumerate())
            .map(|(idx, row)| {
                let (success, failed) = (&success, &failed);
                async move {
                    let row_index = idx + 1;
                    if self.cancellation.is_cancelled() {
                        return (row_index, row, None);
                    }
                    observer.notify(&ProgressEvent::RowStarted {
                        row_index,
                        success: success.load(Ordering::SeqCst),
                        failed: failed.load(Ordering::SeqCst),
                    });
                    let outcome = self.process_row(table.headers(), row, config, row_index).await;
                    (row_index, row, Some(outcome))
                }
            })
            .buffered(self.mode.max_in_flight());
        let mut in_flight = std::pin::pin!(in_flight);

        while let Some((row_index, row, outcome)) = in_flight.next().await {
            match outcome {
                Some(outcome) => {
                    record(report, observer, row_index, row, outcome);
                    success.store(report.success, Ordering::SeqCst);
                    failed.store(report.failed, Ordering::SeqCst);
                }
                None => report.cancelled = true,
            }
        }
    }

    /// Derive and submit one row; `Err` carries the message to record
    async fn process_row(
        &self,
        headers: &[String],
        row: &Row,
        config: &RunConfig,
        row_index: usize,
    ) -> Result<(), String> {
        let variables = self
            .mapper
            .derive(headers, row)
            .map_err(|e| e.to_string())?;

        debug!("Row {} - submitting with variables {:?}", row_index, variables);
        let request = config.request(variables);
        self.transport
            .submit(&request)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

fn record(
    report: &mut BatchReport,
    observer: &dyn ProgressObserver,
    row_index: usize,
    row: &Row,
    outcome: Result<(), String>,
) {
    let status = match outcome {
        Ok(()) => {
            report.record_success();
            RowStatus::Success
        }
        Err(message) => {
            report.record_failure(row_index, row, message);
            let message = report
                .errors
                .last()
                .map(|e| e.message.clone())
                .unwrap_or_default();
            warn!("Row {} failed: {}", row_index, message);
            RowStatus::Failed { message }
        }
    };

    observer.notify(&ProgressEvent::RowCompleted {
        row_index,
        status,
        success: report.success,
        failed: report.failed,
    });
}
