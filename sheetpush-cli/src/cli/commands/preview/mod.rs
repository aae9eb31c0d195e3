//! `preview` command: show what a file parses into without sending anything

mod handler;

use clap::Args;
use std::path::PathBuf;

pub use handler::handle_preview_command;

/// Rows shown when `--rows` is not given
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Args, Debug)]
pub struct PreviewCommands {
    /// Spreadsheet or CSV file (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv, .tsv)
    pub file: PathBuf,

    /// Number of data rows to show
    #[arg(long, short = 'n', default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub rows: usize,

    /// Print the parsed table as JSON instead of a text grid
    #[arg(long)]
    pub json: bool,
}
