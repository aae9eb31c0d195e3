//! Command-line front end

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "sheetpush", version, about = "Replay spreadsheet rows as GraphQL mutations")]
pub struct Cli {
    /// Config file (defaults to <config dir>/sheetpush/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log progress and request detail to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::run::OutputFormat;

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::try_parse_from([
            "sheetpush",
            "run",
            "rows.xlsx",
            "--endpoint",
            "https://api.example.com/graphql",
            "--max-in-flight",
            "4",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.file, PathBuf::from("rows.xlsx"));
                assert_eq!(args.endpoint.as_deref(), Some("https://api.example.com/graphql"));
                assert_eq!(args.max_in_flight, Some(4));
                assert_eq!(args.format, OutputFormat::Json);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn test_preview_defaults_to_five_rows() {
        let cli = Cli::try_parse_from(["sheetpush", "preview", "rows.csv"]).unwrap();
        match cli.command {
            Commands::Preview(args) => assert_eq!(args.rows, 5),
            other => panic!("expected preview, got {:?}", other),
        }
    }

    #[test]
    fn test_token_conflicts_with_prompt() {
        let result = Cli::try_parse_from([
            "sheetpush",
            "run",
            "rows.csv",
            "--token",
            "abc",
            "--prompt-token",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_require_needs_map() {
        let result = Cli::try_parse_from(["sheetpush", "run", "rows.csv", "--require", "id"]);
        assert!(result.is_err());
    }
}
