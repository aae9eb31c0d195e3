//! Run command handler

use anyhow::{Context, Result};
use colored::*;
use std::fs;
use std::time::Instant;

use super::{OutputFormat, RunCommands};
use crate::api::GraphQlClient;
use crate::batch::{
    BatchReport, BatchRunner, ColumnMapper, DEFAULT_MUTATION, ExecutionMode, ProgressEvent,
    RowStatus, RunConfig,
};
use crate::cli::output::error_lines;
use crate::config::Config;
use crate::tabular;

/// Parse the file, resolve configuration and run the batch
pub async fn handle_run_command(args: RunCommands, config: Config, verbose: bool) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let table = tabular::read_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    eprintln!(
        "File: {} ({} rows ready to process)",
        args.file.display().to_string().cyan(),
        table.len()
    );

    let endpoint = args
        .endpoint
        .clone()
        .or_else(|| config.remote.endpoint.clone())
        .unwrap_or_default();

    let token = if args.prompt_token {
        Some(
            rpassword::prompt_password("Auth token (AUTH_TOKEN header): ")
                .context("Failed to read auth token")?,
        )
    } else {
        args.token.clone().or_else(|| config.remote.auth_token.clone())
    };

    let mutation = match args.mutation_file.as_ref().or(config.run.mutation_file.as_ref()) {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read mutation file: {}", path.display()))?,
        None => {
            eprintln!("{}", "No mutation file given, using the default tag-list template".dimmed());
            DEFAULT_MUTATION.to_string()
        }
    };

    let run_config = RunConfig::new(endpoint, token.as_deref(), mutation);

    let client = GraphQlClient::new(config.remote.timeout()).context("Failed to build HTTP client")?;
    let mode = ExecutionMode::from_max_in_flight(
        args.max_in_flight.unwrap_or(config.run.max_in_flight),
    );
    let runner = BatchRunner::new(client).with_mode(mode);
    let runner = if args.mappings.is_empty() {
        runner
    } else {
        runner.with_mapper(ColumnMapper::from_specs(args.mappings.as_slice(), args.required.as_slice())?)
    };

    // Ctrl-C stops submitting further rows; the partial report is still printed
    let cancellation = runner.cancellation();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancellation.cancel();
        }
    });

    let total = table.len();
    let observer = move |event: &ProgressEvent| {
        if !verbose {
            return;
        }
        if let ProgressEvent::RowCompleted { row_index, status, .. } = event {
            match status {
                RowStatus::Success => eprintln!("[{}/{}] {}", row_index, total, "ok".green()),
                RowStatus::Failed { message } => {
                    eprintln!("[{}/{}] {} {}", row_index, total, "failed".red(), message)
                }
            }
        }
    };

    let start = Instant::now();
    let report = runner
        .run_with_progress(&table, &run_config, &observer)
        .await?;

    if verbose {
        eprintln!("Run time: {:.2}s", start.elapsed().as_secs_f64());
    }

    if let Some(output_path) = &args.output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write report to: {}", output_path.display()))?;
        eprintln!(
            "Report saved to: {}",
            output_path.display().to_string().bright_green()
        );
    }

    let limit = args.error_limit.unwrap_or(config.run.error_preview_limit);
    match args.format {
        OutputFormat::Text => print_summary(&report, limit),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to format JSON output")?
        ),
    }

    Ok(())
}

fn print_summary(report: &BatchReport, limit: usize) {
    println!();
    println!(
        "{} {}   {} {}   {} {}",
        "Successful:".bold(),
        report.success.to_string().green(),
        "Failed:".bold(),
        report.failed.to_string().red(),
        "Total:".bold(),
        report.total
    );

    if report.cancelled {
        println!(
            "{}",
            format!(
                "Cancelled: {} of {} rows were not processed",
                report.total - report.processed(),
                report.total
            )
            .yellow()
        );
    }

    for line in error_lines(report, limit) {
        println!("{}", line);
    }
}
