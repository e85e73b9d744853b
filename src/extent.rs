//! Record extents and the rule for keeping them in a report

use serde::Serialize;
use tracing::trace;

use crate::review::{RecordSource, ReviewLog};

/// Total size and file count of one record, located by its hierarchy path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtentEntry {
    pub path: Vec<String>,
    pub total_bytes: u64,
    pub file_count: u64,
}

impl ExtentEntry {
    /// Keep an extent only if it has files and bytes
    ///
    /// Empty records are reported to the archivist and left out of the tree.
    pub fn checked(
        path: Vec<String>,
        total_bytes: u64,
        file_count: u64,
        name: &str,
        source: RecordSource,
        review: &mut ReviewLog,
    ) -> Option<Self> {
        if file_count == 0 {
            review.notice(source.no_files(name));
            return None;
        }
        if total_bytes == 0 {
            review.notice(source.no_bytes(name));
            return None;
        }
        if path.is_empty() {
            return None;
        }

        trace!(name, total_bytes, file_count, "Extent kept");
        Some(Self { path, total_bytes, file_count })
    }

    /// The record's own title
    pub fn label(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}
