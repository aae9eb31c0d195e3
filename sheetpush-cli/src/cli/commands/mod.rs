pub mod preview;
pub mod run;

use clap::Subcommand;

pub use preview::PreviewCommands;
pub use run::RunCommands;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a file and show its headers and first rows
    Preview(PreviewCommands),
    /// Send one mutation per row and report the outcome
    Run(RunCommands),
}
