use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Cursor-count buckets in plotting order.
pub const CURSOR_BUCKETS: [&str; 10] = ["2", "3", "4", "5", "6", "7", "8", "9", "10", ">10"];

/// Aggregate statistics about interesting commits, as read from stdin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDocument {
    pub commits_by_number_of_edits: BTreeMap<String, u64>,
    pub edits_by_cursors: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCountRow {
    pub edits: u64,
    pub commits: u64,
}

/// Commit counts keyed by edit count, strictly ascending by `edits`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedEditTable {
    pub rows: Vec<EditCountRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorBucketRow {
    pub bucket: &'static str,
    pub edits: u64,
}

/// One row per entry of [`CURSOR_BUCKETS`], zero where the input had none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketedCursorTable {
    pub rows: Vec<CursorBucketRow>,
}

/// Both plotting tables, derived and validated before anything is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotTables {
    pub edits_per_commit: SortedEditTable,
    pub cursors_per_edit: BucketedCursorTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XAxis {
    /// Bars sit at their numeric value; missing values leave gaps.
    Numeric,
    /// Bars sit at consecutive slots and are labelled by name.
    Categorical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    /// Offset from [`BarChart::origin`] on a numeric axis, slot index otherwise.
    pub position: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub file_stem: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_axis: XAxis,
    /// Axis value at position 0; keeps large keys exact after the f64 cast.
    pub origin: u64,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Text {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        size: f64,
        align: TextAlign,
        rotated: bool,
        content: String,
    },
}

/// A laid-out page, all coordinates in points from the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TablesOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub edits_per_commit: Vec<TableRow>,
    pub cursors_per_edit: Vec<TableRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableLine {
    pub chart: String,
    pub label: String,
    pub value: u64,
}
