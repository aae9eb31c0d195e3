//! Plain-text rendering for the terminal

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::batch::BatchReport;
use crate::tabular::Table;

/// Widest a preview column may grow before values are cut
const MAX_COLUMN_WIDTH: usize = 30;

/// Summary lines for failed rows: a header, one line per shown error, and a
/// trailing "... and N more errors" when the list was cut at `limit`
pub fn error_lines(report: &BatchReport, limit: usize) -> Vec<String> {
    if !report.has_errors() {
        return Vec::new();
    }

    let preview = report.error_preview(limit);
    let mut lines = Vec::with_capacity(preview.shown.len() + 2);
    lines.push("Errors:".to_string());
    for error in preview.shown {
        lines.push(format!("  Row {}: {}", error.row_index, error.message));
    }
    if let Some(line) = preview.suppressed_line() {
        lines.push(format!("  {}", line));
    }
    lines
}

/// Render the headers and the first `rows` rows as an aligned text table
pub fn render_preview(table: &Table, rows: usize) -> String {
    let headers: Vec<String> = table
        .headers()
        .iter()
        .map(|h| truncate_str(h, MAX_COLUMN_WIDTH))
        .collect();
    let body: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(rows)
        .map(|row| {
            table
                .headers()
                .iter()
                .map(|h| {
                    let value = row.get(h).map(|v| v.to_string()).unwrap_or_default();
                    truncate_str(&value, MAX_COLUMN_WIDTH)
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.width()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad(cell, *width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

/// Cut to at most `max_width` display columns, ending in an ellipsis if cut
fn truncate_str(s: &str, max_width: usize) -> String {
    let single_line = s.replace(['\r', '\n'], " ");
    if single_line.width() <= max_width {
        return single_line;
    }

    let mut out = String::new();
    let mut used = 0;
    for c in single_line.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
