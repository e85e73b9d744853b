//! Record extents from bookmark tables
//!
//! A table-of-contents citation (`bk6001`) and the file tables of the same
//! bookmark (`bf6001_*`) are keyed in two id namespaces that differ by one
//! character. The extent of a record is the sum over its file tables.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, instrument};

use super::types::{BookmarkRow, HierarchyEntry};
use crate::config::ExtentConfig;
use crate::extent::ExtentEntry;
use crate::review::{RecordSource, ReviewLog};

/// Pre-compiled regex for a byte count inside free text, e.g. `7 KB (7168 B)`
/// Compiled once on first use via OnceLock
fn byte_size_regex() -> &'static Regex {
    static BYTE_SIZE_REGEX: OnceLock<Regex> = OnceLock::new();
    BYTE_SIZE_REGEX.get_or_init(|| Regex::new(r"(\d+)\sB").expect("Invalid byte size regex"))
}

/// First `<digits> B` value in a size cell
pub fn parse_byte_size(text: &str) -> Option<u64> {
    byte_size_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Bookmark rows grouped by group id, in document order
pub struct BookmarkIndex<'r> {
    groups: HashMap<&'r str, Vec<&'r BookmarkRow>>,
}

impl<'r> BookmarkIndex<'r> {
    pub fn new(rows: &'r [BookmarkRow]) -> Self {
        let mut groups: HashMap<&'r str, Vec<&'r BookmarkRow>> = HashMap::new();
        for row in rows {
            groups.entry(row.group_id.as_str()).or_default().push(row);
        }
        Self { groups }
    }

    pub fn group(&self, group_id: &str) -> &[&'r BookmarkRow] {
        self.groups.get(group_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Total bytes and file count of one bookmark group
///
/// Rows without a readable size (bookmarked folders) are not files. A
/// 0-byte file still counts as a file and is reported for review.
pub fn component_extent(
    rows: &[&BookmarkRow],
    component_name: &str,
    config: &ExtentConfig,
    review: &mut ReviewLog,
) -> (u64, u64) {
    let mut size = 0u64;
    let mut count = 0u64;

    for row in rows {
        let Some(file_size) = row.field(&config.size_column).and_then(parse_byte_size) else {
            continue;
        };

        count += 1;
        if file_size == 0 {
            let file_name = row.field(&config.name_column).unwrap_or(row.row_id.as_str());
            review.notice(RecordSource::Bookmarks.zero_byte_file(component_name, file_name));
        }
        size = size.saturating_add(file_size);
    }

    (size, count)
}

/// Extents for every hierarchy entry that has files with bytes
#[instrument(skip_all, fields(components = components.len(), rows = rows.len()))]
pub fn add_extents_to_components(
    components: &[HierarchyEntry],
    rows: &[BookmarkRow],
    config: &ExtentConfig,
    review: &mut ReviewLog,
) -> Vec<ExtentEntry> {
    let index = BookmarkIndex::new(rows);

    let extents: Vec<ExtentEntry> = components
        .iter()
        .filter_map(|component| {
            let group_id = config.group_id_for(&component.reference_id);
            let (size, count) = component_extent(index.group(&group_id), &component.label, config, review);
            debug!(label = %component.label, %group_id, size, count, "Component extent");
            ExtentEntry::checked(
                component.path.clone(),
                size,
                count,
                &component.label,
                RecordSource::Bookmarks,
                review,
            )
        })
        .collect();

    debug!(kept = extents.len(), "Extents computed");
    extents
}
