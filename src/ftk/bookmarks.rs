//! Bookmark file tables
//!
//! Each bookmarked file gets its own `fo:table` with an id such as
//! `bf6001_3`, laid out as label/value cell pairs (`Name`, `Logical Size`,
//! `Path`, ...). The part before the separator is shared by every file of one
//! bookmark.

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::document::{fo_children, select, text_content, FtkReport};
use super::types::BookmarkRow;
use crate::config::ExtentConfig;

/// Flatten every bookmark file table into a keyed row
#[instrument(skip_all)]
pub fn transform_bookmark_tables(report: &FtkReport<'_>, config: &ExtentConfig) -> Vec<BookmarkRow> {
    let Some(flow) = report.page_flow(&config.bookmarks_master) else {
        debug!(master = %config.bookmarks_master, "Report has no bookmark tables");
        return Vec::new();
    };

    let rows: Vec<BookmarkRow> = fo_children(flow, "table")
        .into_iter()
        .filter_map(|table| {
            let id = table.attribute("id")?;
            let cells: Vec<String> = select(table, &["table-body", "table-row", "table-cell", "block"])
                .into_iter()
                .map(text_content)
                .collect();
            Some(BookmarkRow::new(id, config.group_separator, pair_cells(id, cells)))
        })
        .collect();

    debug!(rows = rows.len(), "Bookmark tables transformed");
    rows
}

/// Read alternating label/value cells into a map
fn pair_cells(table_id: &str, cells: Vec<String>) -> HashMap<String, String> {
    if cells.len() % 2 != 0 {
        debug!(table_id, cells = cells.len(), "Odd cell count, last label has no value");
    }

    let mut fields = HashMap::new();
    let mut iter = cells.into_iter();
    while let (Some(label), Some(value)) = (iter.next(), iter.next()) {
        fields.insert(label, value);
    }
    fields
}
