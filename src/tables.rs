use crate::chart::{CURSORS_PER_EDIT, EDITS_PER_COMMIT};
use crate::cli::CommonArgs;
use crate::model::{PlotTables, TableLine, TableRow, TablesOutput, SCHEMA_VERSION};
use crate::plot::read_stats;
use crate::stats::prepare_tables;
use anyhow::{Context, Result};
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> Result<()> {
    let doc = read_stats(common.input.as_deref()).context("Failed to load stats input")?;
    let tables = prepare_tables(&doc).context("Failed to validate stats input")?;

    if json {
        output_json(&tables)?;
    } else if ndjson {
        output_ndjson(&tables)?;
    } else {
        output_bars(&tables);
    }

    Ok(())
}

pub fn edit_rows(tables: &PlotTables) -> Vec<TableRow> {
    tables
        .edits_per_commit
        .rows
        .iter()
        .map(|r| TableRow {
            label: r.edits.to_string(),
            value: r.commits,
        })
        .collect()
}

pub fn cursor_rows(tables: &PlotTables) -> Vec<TableRow> {
    tables
        .cursors_per_edit
        .rows
        .iter()
        .map(|r| TableRow {
            label: r.bucket.to_string(),
            value: r.edits,
        })
        .collect()
}

fn output_json(tables: &PlotTables) -> Result<()> {
    let output = TablesOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        edits_per_commit: edit_rows(tables),
        cursors_per_edit: cursor_rows(tables),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(tables: &PlotTables) -> Result<()> {
    let charts = [
        (EDITS_PER_COMMIT, edit_rows(tables)),
        (CURSORS_PER_EDIT, cursor_rows(tables)),
    ];
    for (chart, rows) in charts {
        for row in rows {
            let line = TableLine {
                chart: chart.to_string(),
                label: row.label,
                value: row.value,
            };
            println!("{}", serde_json::to_string(&line)?);
        }
    }
    Ok(())
}

fn intensity_char(value: u64, max: u64) -> &'static str {
    if max == 0 {
        return " ";
    }
    match ((value as f64 / max as f64) * 5.0) as u32 {
        0 if value == 0 => " ",
        0 | 1 => "▁",
        2 => "▃",
        3 => "▅",
        4 => "▇",
        _ => "█",
    }
}

fn print_section(title: &str, value_header: &str, rows: &[TableRow]) {
    println!("{}", style(title).bold());
    println!("{}", "─".repeat(50));

    if rows.is_empty() {
        println!("No data to display");
        return;
    }

    let max = rows.iter().map(|r| r.value).max().unwrap_or(0);
    for row in rows {
        println!(
            "{:>5} {} {}: {:>6}",
            row.label,
            style(intensity_char(row.value, max)).blue(),
            value_header,
            row.value
        );
    }
}

fn output_bars(tables: &PlotTables) {
    print_section("Commits by number of edits", "commits", &edit_rows(tables));
    println!();
    print_section("Edits by number of cursors", "edits", &cursor_rows(tables));
}
