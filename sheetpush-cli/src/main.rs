use clap::Parser;
use log::debug;

use sheetpush::cli::Cli;
use sheetpush::cli::commands::{Commands, preview, run};
use sheetpush::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = try_main().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn try_main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_filter = if cli.verbose { "warn,sheetpush=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_env();
    debug!("Resolved configuration: endpoint={:?}", config.remote.endpoint);

    match cli.command {
        Commands::Preview(args) => preview::handle_preview_command(args).await,
        Commands::Run(args) => run::handle_run_command(args, config, cli.verbose).await,
    }
}
