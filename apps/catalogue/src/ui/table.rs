//! Admin table: one row per tool, aligned columns.

use super::truncate;
use catalogue_async::types::Tool;
use colored::Colorize;
use std::fmt::Write;

const HEADERS: [&str; 4] = ["ID", "NAME", "TAGS", "LINK"];
const MAX_CELL: usize = 40;

fn row(tool: &Tool) -> [String; 4] {
    [
        tool.id.clone(),
        truncate(&tool.name, MAX_CELL),
        truncate(&tool.tags.join(","), MAX_CELL),
        truncate(&tool.tool_link, MAX_CELL),
    ]
}

fn pad(cell: &str, width: usize) -> String {
    let fill = width.saturating_sub(cell.chars().count());
    format!("{cell}{}", " ".repeat(fill))
}

/// Render tools as an aligned table.
pub fn render(tools: &[Tool]) -> String {
    let rows: Vec<[String; 4]> = tools.iter().map(row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS.iter().zip(widths).map(|(h, w)| pad(h, w)).collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end().bold());
    for r in &rows {
        let cells: Vec<String> = r.iter().zip(widths).map(|(c, w)| pad(c, w)).collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    let _ = writeln!(out, "{}", format!("{} tool(s)", rows.len()).dimmed());
    out
}
