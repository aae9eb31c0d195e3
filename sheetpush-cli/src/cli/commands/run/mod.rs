//! `run` command: replay every row of a file as a mutation

mod handler;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

pub use handler::handle_run_command;

#[derive(Args, Debug)]
pub struct RunCommands {
    /// Spreadsheet or CSV file (.xlsx, .xlsm, .xlsb, .xls, .ods, .csv, .tsv)
    pub file: PathBuf,

    /// GraphQL endpoint URL
    #[arg(long, short = 'e')]
    pub endpoint: Option<String>,

    /// Auth token sent in the AUTH_TOKEN header
    #[arg(long, conflicts_with = "prompt_token")]
    pub token: Option<String>,

    /// Prompt for the auth token without echoing it
    #[arg(long)]
    pub prompt_token: bool,

    /// File containing the mutation document (defaults to the tag-list template)
    #[arg(long, short = 'm', value_name = "PATH")]
    pub mutation_file: Option<PathBuf>,

    /// Bind a variable to a column instead of the default id/tagList mapping
    #[arg(long = "map", value_name = "VARIABLE=COLUMN")]
    pub mappings: Vec<String>,

    /// Fail rows whose mapped value for VARIABLE is blank
    #[arg(long = "require", value_name = "VARIABLE", requires = "mappings")]
    pub required: Vec<String>,

    /// Requests allowed in flight at once (1 = strictly sequential)
    #[arg(long, value_name = "N")]
    pub max_in_flight: Option<usize>,

    /// Row errors to show before collapsing the rest
    #[arg(long, value_name = "N")]
    pub error_limit: Option<usize>,

    /// Write the full JSON report to this file
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Summary format printed to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON report
    Json,
}
