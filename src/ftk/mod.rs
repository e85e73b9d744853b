//! FTK XSL-FO Report Extents
//!
//! This module extracts the archival hierarchy of a collection and the extent
//! of each record from a case report exported by FTK (Forensic Toolkit).
//!
//! ## Report Structure
//!
//! The export is an XSL-FO document with one page sequence per report page:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ page-sequence master-reference="caseInfoPage"                │
//! │  - label/value table: "Case Name" → collection title         │
//! ├──────────────────────────────────────────────────────────────┤
//! │ page-sequence master-reference="TOC"                         │
//! │  - one fo:block per bookmark, nesting encoded in             │
//! │    start-indent (24pt collection, +12pt per level)           │
//! │  - record rows cite their bookmark: ref-id="bk6001"          │
//! ├──────────────────────────────────────────────────────────────┤
//! │ page-sequence master-reference="bookmarksPage"               │
//! │  - one fo:table per bookmarked file: id="bf6001_1"           │
//! │  - label/value cells: Name, Logical Size, Path, ...          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! A record's citation `bk6001` and its file tables `bf6001_*` are joined by
//! swapping the marker character.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = ExtentConfig::default();
//! let report = ftk::run(Path::new("/reports/M12345.xml"), &config)?;
//! output::write_report(&report.tree, Path::new("/out"))?;
//! ```

mod bookmarks;
mod document;
mod extents;
mod hierarchy;
mod operations;
mod types;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export public types
pub use document::{FtkReport, FO_NAMESPACE};
pub use hierarchy::AncestryStack;
pub use types::{BookmarkRow, HierarchyEntry};

// Re-export public functions
pub use bookmarks::transform_bookmark_tables;
pub use document::read_report_text;
pub use extents::{add_extents_to_components, component_extent, parse_byte_size, BookmarkIndex};
pub use hierarchy::{extract_hierarchy, indent_level, parse_indent};
pub use operations::{build_extent_report, run};
