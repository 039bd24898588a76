use crate::error::{PlotError, Result};
use crate::model::{
    BucketedCursorTable, CursorBucketRow, EditCountRow, PlotTables, SortedEditTable,
    StatsDocument, CURSOR_BUCKETS,
};
use serde::de::Error as _;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

/// Reads the whole stream and parses it into a [`StatsDocument`].
///
/// Fails on anything that is not a JSON object with both statistics fields,
/// and on cursor buckets outside [`CURSOR_BUCKETS`].
pub fn load_stats<R: Read>(mut input: R) -> Result<StatsDocument> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    debug!(bytes = buf.len(), "read stats input");

    let value: serde_json::Value =
        serde_json::from_slice(&buf).map_err(|source| PlotError::Parse {
            path: ".".to_string(),
            source,
        })?;
    if !value.is_object() {
        return Err(PlotError::Parse {
            path: ".".to_string(),
            source: serde_json::Error::custom("expected a JSON object"),
        });
    }

    let doc: StatsDocument = serde_path_to_error::deserialize(value)?;
    validate_buckets(&doc)?;
    Ok(doc)
}

/// Every key of `editsByCursors` must name one of the fixed buckets.
pub fn validate_buckets(doc: &StatsDocument) -> Result<()> {
    match doc
        .edits_by_cursors
        .keys()
        .find(|k| !CURSOR_BUCKETS.contains(&k.as_str()))
    {
        Some(key) => Err(PlotError::Schema { key: key.clone() }),
        None => Ok(()),
    }
}

pub fn sorted_edit_table(doc: &StatsDocument) -> Result<SortedEditTable> {
    let mut by_edits: BTreeMap<u64, u64> = BTreeMap::new();

    for (key, &commits) in &doc.commits_by_number_of_edits {
        let edits = key.parse::<u64>().map_err(|e| PlotError::Conversion {
            key: key.clone(),
            reason: format!("is not a non-negative integer ({e})"),
        })?;
        match by_edits.entry(edits) {
            Entry::Vacant(slot) => {
                slot.insert(commits);
            }
            Entry::Occupied(_) => {
                return Err(PlotError::Conversion {
                    key: key.clone(),
                    reason: format!("duplicates edit count {edits}"),
                });
            }
        }
    }

    let rows = by_edits
        .into_iter()
        .map(|(edits, commits)| EditCountRow { edits, commits })
        .collect();
    Ok(SortedEditTable { rows })
}

pub fn bucketed_cursor_table(doc: &StatsDocument) -> BucketedCursorTable {
    let rows = CURSOR_BUCKETS
        .iter()
        .map(|&bucket| CursorBucketRow {
            bucket,
            edits: doc.edits_by_cursors.get(bucket).copied().unwrap_or(0),
        })
        .collect();
    BucketedCursorTable { rows }
}

/// Derives both tables so every input error surfaces before any output exists.
pub fn prepare_tables(doc: &StatsDocument) -> Result<PlotTables> {
    validate_buckets(doc)?;
    Ok(PlotTables {
        edits_per_commit: sorted_edit_table(doc)?,
        cursors_per_edit: bucketed_cursor_table(doc),
    })
}
