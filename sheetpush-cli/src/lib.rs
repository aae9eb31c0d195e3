//! Batch GraphQL mutations driven by spreadsheet rows
//!
//! A file (xlsx, xls, xlsb, ods, csv or tsv) is parsed into a [`tabular::Table`]
//! whose first row supplies the column names. [`batch::BatchRunner`] then turns
//! each data row into a variables object, submits the configured mutation
//! through a [`api::MutationTransport`], and folds the outcomes into a
//! [`batch::BatchReport`].
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use sheetpush::api::GraphQlClient;
//! use sheetpush::batch::{BatchRunner, DEFAULT_MUTATION, RunConfig};
//!
//! let table = sheetpush::tabular::read_file("processos.xlsx")?;
//! let config = RunConfig::new("https://api.example.com/graphql", Some("token"), DEFAULT_MUTATION);
//! let runner = BatchRunner::new(GraphQlClient::new(sheetpush::api::DEFAULT_TIMEOUT)?);
//! let report = runner.run(&table, &config).await?;
//! println!("{} ok, {} failed", report.success, report.failed);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod tabular;
