//! Batch mutation runner
//!
//! Takes a parsed [`Table`](crate::tabular::Table) and a [`RunConfig`], submits
//! one mutation per row and aggregates the outcomes into a [`BatchReport`].

mod config;
mod execution;
mod progress;
mod report;
mod runner;
mod variables;

pub use config::{ConfigurationError, DEFAULT_MUTATION, RunConfig};
pub use execution::{CancellationFlag, ExecutionMode};
pub use progress::{NoProgress, ProgressEvent, ProgressObserver, RowStatus};
pub use report::{BatchReport, DEFAULT_ERROR_PREVIEW, ErrorPreview, RowError};
pub use runner::BatchRunner;
pub use variables::{
    ColumnBinding, ColumnMapper, DerivationError, IdTagListMapper, VariableMapper, Variables,
};
