//! Type definitions for FTK report extraction

use std::collections::HashMap;

use serde::Serialize;

/// A record bookmark located in the table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchyEntry {
    /// Titles from the collection down to the record itself
    pub path: Vec<String>,
    /// `ref-id` of the page-number citation (e.g. `bk6001`)
    pub reference_id: String,
    /// The record's own title, always the last path element
    pub label: String,
}

impl HierarchyEntry {
    /// Build an entry from an ancestry path; `None` for an empty path
    pub fn new(path: Vec<String>, reference_id: impl Into<String>) -> Option<Self> {
        let label = path.last()?.clone();
        Some(Self {
            path,
            reference_id: reference_id.into(),
            label,
        })
    }
}

/// One bookmarked file from the bookmark tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookmarkRow {
    /// Table id, unique per file (e.g. `bf6001_3`)
    pub row_id: String,
    /// Shared id of all files in one bookmark (e.g. `bf6001`)
    pub group_id: String,
    /// Column label to cell text
    pub fields: HashMap<String, String>,
}

impl BookmarkRow {
    pub fn new(row_id: impl Into<String>, separator: char, fields: HashMap<String, String>) -> Self {
        let row_id = row_id.into();
        let group_id = row_id
            .split(separator)
            .next()
            .unwrap_or(row_id.as_str())
            .to_string();
        Self { row_id, group_id, fields }
    }

    pub fn field(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_label_is_last_title() {
        let entry = HierarchyEntry::new(
            vec!["Coll".to_string(), "Series 1".to_string(), "ER 1: A".to_string()],
            "bk1",
        )
        .unwrap();
        assert_eq!(entry.label, "ER 1: A");
        assert_eq!(entry.reference_id, "bk1");
        assert!(HierarchyEntry::new(Vec::new(), "bk1").is_none());
    }

    #[test]
    fn test_group_id_is_row_id_prefix() {
        let row = BookmarkRow::new("bf6001_12", '_', HashMap::new());
        assert_eq!(row.group_id, "bf6001");
        assert!(row.row_id.starts_with(&row.group_id));

        let bare = BookmarkRow::new("bf7001", '_', HashMap::new());
        assert_eq!(bare.group_id, "bf7001");
    }
}
