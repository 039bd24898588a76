use crate::model::{Bar, BarChart, BucketedCursorTable, SortedEditTable, XAxis};

pub const EDITS_PER_COMMIT: &str = "edits-per-commit";
pub const CURSORS_PER_EDIT: &str = "cursors-per-edit";

pub fn edits_per_commit_chart(table: &SortedEditTable) -> BarChart {
    let origin = table.rows.first().map_or(0, |row| row.edits);
    let bars = table
        .rows
        .iter()
        .map(|row| Bar {
            label: row.edits.to_string(),
            position: (row.edits - origin) as f64,
            height: row.commits as f64,
        })
        .collect();

    BarChart {
        file_stem: EDITS_PER_COMMIT,
        x_label: "Number of edits",
        y_label: "Number of commits",
        x_axis: XAxis::Numeric,
        origin,
        bars,
    }
}

pub fn cursors_per_edit_chart(table: &BucketedCursorTable) -> BarChart {
    let bars = table
        .rows
        .iter()
        .enumerate()
        .map(|(slot, row)| Bar {
            label: row.bucket.to_string(),
            position: slot as f64,
            height: row.edits as f64,
        })
        .collect();

    BarChart {
        file_stem: CURSORS_PER_EDIT,
        x_label: "Number of cursors",
        y_label: "Number of edits",
        x_axis: XAxis::Categorical,
        origin: 0,
        bars,
    }
}
