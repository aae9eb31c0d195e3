//! Preview command handler

use anyhow::{Context, Result};
use colored::*;

use super::PreviewCommands;
use crate::cli::output::render_preview;
use crate::tabular::{self, Table};

pub async fn handle_preview_command(args: PreviewCommands) -> Result<()> {
    let table = tabular::read_file(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    if args.json {
        let preview = Table::new(
            table.headers().to_vec(),
            table.rows().iter().take(args.rows).cloned().collect(),
        );
        println!(
            "{}",
            serde_json::to_string_pretty(&preview).context("Failed to format JSON output")?
        );
        return Ok(());
    }

    println!(
        "{} {} ({} rows ready to process)",
        "File:".bold(),
        args.file.display().to_string().cyan(),
        table.len()
    );
    println!("{} {}", "Columns:".bold(), table.headers().join(", "));
    println!();
    print!("{}", render_preview(&table, args.rows));

    if table.len() > args.rows {
        println!("{}", format!("... {} more rows", table.len() - args.rows).dimmed());
    }

    Ok(())
}
