use crate::chart::{cursors_per_edit_chart, edits_per_commit_chart};
use crate::cli::CommonArgs;
use crate::error::Result;
use crate::layout::layout;
use crate::model::{BarChart, StatsDocument};
use crate::render::{OutputFormat, TypstRenderer};
use crate::stats::{bucketed_cursor_table, load_stats, prepare_tables, sorted_edit_table};
use anyhow::Context;
use console::style;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub out_dir: PathBuf,
    pub format: OutputFormat,
}

impl RenderConfig {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            format: OutputFormat::default(),
        }
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path_for(&self, file_stem: &str) -> PathBuf {
        self.out_dir
            .join(format!("{file_stem}.{}", self.format.extension()))
    }
}

#[derive(Debug, Clone)]
pub struct WrittenChart {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Reads the stats document from `input`, or from stdin when no path is given.
pub fn read_stats(input: Option<&Path>) -> Result<StatsDocument> {
    match input {
        Some(path) => load_stats(File::open(path)?),
        None => load_stats(io::stdin().lock()),
    }
}

fn save_chart(chart: &BarChart, renderer: &TypstRenderer, config: &RenderConfig) -> Result<WrittenChart> {
    let figure = layout(chart);
    let bytes = renderer.render(&figure, config.format)?;

    fs::create_dir_all(&config.out_dir)?;
    let path = config.path_for(chart.file_stem);
    fs::write(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote chart");

    Ok(WrittenChart {
        path,
        bytes: bytes.len(),
    })
}

pub fn render_edits_per_commit(
    doc: &StatsDocument,
    renderer: &TypstRenderer,
    config: &RenderConfig,
) -> Result<WrittenChart> {
    let table = sorted_edit_table(doc)?;
    save_chart(&edits_per_commit_chart(&table), renderer, config)
}

pub fn render_cursors_per_edit(
    doc: &StatsDocument,
    renderer: &TypstRenderer,
    config: &RenderConfig,
) -> Result<WrittenChart> {
    let table = bucketed_cursor_table(doc);
    save_chart(&cursors_per_edit_chart(&table), renderer, config)
}

pub fn exec(common: CommonArgs) -> anyhow::Result<()> {
    let doc = read_stats(common.input.as_deref()).context("Failed to load stats input")?;
    prepare_tables(&doc).context("Failed to validate stats input")?;

    let config = RenderConfig::new(common.out_dir.clone()).with_format(common.format);
    let renderer = TypstRenderer::new();

    let written = [
        render_edits_per_commit(&doc, &renderer, &config)
            .context("Failed to render edits-per-commit chart")?,
        render_cursors_per_edit(&doc, &renderer, &config)
            .context("Failed to render cursors-per-edit chart")?,
    ];

    output_summary(&written);
    Ok(())
}

fn output_summary(written: &[WrittenChart]) {
    for chart in written {
        println!(
            "{} {} ({} bytes)",
            style("Wrote").green().bold(),
            chart.path.display(),
            style(chart.bytes).dim()
        );
    }
}
