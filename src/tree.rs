//! Nested report tree for archival import
//!
//! Flat extents are inserted one by one along their hierarchy path. Series and
//! subseries become shared branches, each record becomes a leaf. The JSON
//! shape is what the archival description import expects:
//!
//! ```json
//! {"title": "Coll", "children": [
//!   {"title": "Series 1", "children": [
//!     {"title": "ER 1: A", "er_number": "ER 1", "er_name": "A", "file_size": 110, "file_count": 7}
//!   ]}
//! ]}
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::extent::ExtentEntry;
use crate::review::ReviewLog;

/// How a record title splits into number and name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// FTK bookmarks: `ER 1: Name`
    Colon,
    /// Folder names: `ER 1 Name`, one stray character allowed after the number
    Folder,
}

fn folder_label_regex() -> &'static Regex {
    static FOLDER_LABEL_REGEX: OnceLock<Regex> = OnceLock::new();
    FOLDER_LABEL_REGEX.get_or_init(|| {
        Regex::new(r"^([A-Za-z]+ \d+)[^\d]?\s(.*)$").expect("Invalid folder label regex")
    })
}

/// Split a record title into (number, name)
///
/// A title that does not fit the style keeps the whole title as its number.
pub fn split_record_label(label: &str, style: LabelStyle) -> (String, String) {
    let parts = match style {
        LabelStyle::Colon => label.split_once(':').map(|(number, name)| {
            (number.to_string(), name.trim().to_string())
        }),
        LabelStyle::Folder => folder_label_regex().captures(label).and_then(|caps| {
            Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
        }),
    };
    parts.unwrap_or_else(|| (label.to_string(), String::new()))
}

/// A record with its extent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordLeaf {
    pub title: String,
    #[serde(rename = "er_number")]
    pub record_number: String,
    #[serde(rename = "er_name")]
    pub record_name: String,
    pub file_size: u64,
    pub file_count: u64,
}

impl RecordLeaf {
    pub fn new(label: &str, file_size: u64, file_count: u64, style: LabelStyle) -> Self {
        let (record_number, record_name) = split_record_label(label, style);
        Self {
            title: label.to_string(),
            record_number,
            record_name,
            file_size,
            file_count,
        }
    }
}

/// A child of a branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReportNode {
    Branch(ReportBranch),
    Record(RecordLeaf),
}

impl ReportNode {
    pub fn title(&self) -> &str {
        match self {
            ReportNode::Branch(branch) => &branch.title,
            ReportNode::Record(leaf) => &leaf.title,
        }
    }
}

/// Collection, series or any other intermediate level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBranch {
    pub title: String,
    pub children: Vec<ReportNode>,
}

impl ReportBranch {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Insert a record at `path` below this branch
    ///
    /// The last element is the record. Every earlier element reuses the
    /// existing branch with that title or creates it. Two records with the
    /// same full path are both kept, side by side.
    pub fn insert(&mut self, path: &[String], file_size: u64, file_count: u64, style: LabelStyle) {
        match path {
            [] => {}
            [label] => self
                .children
                .push(ReportNode::Record(RecordLeaf::new(label, file_size, file_count, style))),
            [parent, rest @ ..] => {
                if let Some(branch) = self.branch_mut(parent) {
                    branch.insert(rest, file_size, file_count, style);
                } else {
                    let mut branch = ReportBranch::new(parent.clone());
                    branch.insert(rest, file_size, file_count, style);
                    self.children.push(ReportNode::Branch(branch));
                }
            }
        }
    }

    pub fn insert_entry(&mut self, entry: &ExtentEntry, style: LabelStyle) {
        self.insert(&entry.path, entry.total_bytes, entry.file_count, style);
    }

    /// Child branch with the given title
    pub fn branch(&self, title: &str) -> Option<&ReportBranch> {
        self.children.iter().find_map(|child| match child {
            ReportNode::Branch(branch) if branch.title == title => Some(branch),
            _ => None,
        })
    }

    fn branch_mut(&mut self, title: &str) -> Option<&mut ReportBranch> {
        self.children.iter_mut().find_map(|child| match child {
            ReportNode::Branch(branch) if branch.title == title => Some(branch),
            _ => None,
        })
    }

    /// Records anywhere below this branch, depth first
    pub fn records(&self) -> Vec<&RecordLeaf> {
        let mut records = Vec::new();
        for child in &self.children {
            match child {
                ReportNode::Branch(branch) => records.extend(branch.records()),
                ReportNode::Record(leaf) => records.push(leaf),
            }
        }
        records
    }

    /// Depth of the record with the given title (direct child = 1)
    pub fn record_depth(&self, title: &str) -> Option<usize> {
        self.children.iter().find_map(|child| match child {
            ReportNode::Record(leaf) if leaf.title == title => Some(1),
            ReportNode::Branch(branch) => branch.record_depth(title).map(|d| d + 1),
            _ => None,
        })
    }
}

/// Build a full report tree rooted at the collection title
pub fn build_report(title: impl Into<String>, entries: &[ExtentEntry], style: LabelStyle) -> ReportBranch {
    let mut report = ReportBranch::new(title);
    for entry in entries {
        report.insert_entry(entry, style);
    }
    report
}

/// Outcome of one report run: the tree to write and the notices raised
#[derive(Debug, Clone)]
pub struct ExtentReport {
    pub title: String,
    pub tree: ReportBranch,
    pub review: ReviewLog,
}
