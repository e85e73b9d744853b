//! Archival hierarchy from the report's table of contents
//!
//! FTK lays the table of contents out as a flat run of `fo:block` rows. The
//! only trace of the collection → series → subseries → record nesting is each
//! row's `start-indent`, so the tree is rebuilt by replaying the rows against
//! a stack of ancestor titles.

use tracing::{debug, instrument, trace};

use super::document::{own_text, select, FtkReport};
use super::types::HierarchyEntry;
use crate::config::ExtentConfig;
use crate::error::{ExtentError, ExtentResult};
use crate::logging::is_debug_enabled;
use crate::numbering::audit_record_numbers;
use crate::review::{RecordSource, ReviewLog};

/// Points of a `start-indent` value such as `36pt`
pub fn parse_indent(value: &str) -> Option<i64> {
    value.split("pt").next()?.trim().parse().ok()
}

/// Hierarchy level of an indent; the collection row is level 0
pub fn indent_level(points: i64, config: &ExtentConfig) -> i64 {
    points.div_euclid(config.indent_stride) - config.indent_offset
}

/// Titles of the current row's ancestors, replayed row by row
#[derive(Debug, Default, Clone)]
pub struct AncestryStack {
    titles: Vec<String>,
}

impl AncestryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `label` at `level`
    ///
    /// Same or shallower levels drop the titles at and below `level` first.
    /// A level more than one past the current depth cannot be placed.
    pub fn enter(&mut self, level: usize, label: String) -> ExtentResult<()> {
        let depth = self.titles.len();
        if level < depth {
            self.titles.truncate(level);
        } else if level > depth + 1 {
            return Err(ExtentError::HierarchyJump { label });
        }
        self.titles.push(label);
        Ok(())
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn depth(&self) -> usize {
        self.titles.len()
    }
}

/// `ref-id` of a row's page-number citation, if it has one
fn citation_ref(row: roxmltree::Node<'_, '_>) -> Option<String> {
    select(row, &["basic-link", "page-number-citation"])
        .into_iter()
        .find_map(|citation| citation.attribute("ref-id"))
        .map(str::to_string)
}

/// List every record bookmark with its ancestry and reference id
///
/// Rows without an indent, above the collection level, or without a citation
/// are passed over; a record row needs both a citation and a record prefix.
/// The record numbers found are audited before returning.
#[instrument(skip_all)]
pub fn extract_hierarchy(
    report: &FtkReport<'_>,
    config: &ExtentConfig,
    review: &mut ReviewLog,
) -> ExtentResult<Vec<HierarchyEntry>> {
    let flow = report.page_flow(&config.toc_master).ok_or_else(|| {
        ExtentError::MissingSection(format!("page-sequence \"{}\"", config.toc_master))
    })?;

    let mut stack = AncestryStack::new();
    let mut entries = Vec::new();

    for row in flow.children().filter(|n| n.is_element()) {
        let Some(indent) = row.attribute("start-indent") else {
            continue;
        };
        let Some(points) = parse_indent(indent) else {
            debug!(indent, "Skipping row with unreadable indent");
            continue;
        };

        let level = indent_level(points, config);
        if level < 0 {
            continue;
        }

        let label = own_text(row);
        stack.enter(level as usize, label)?;
        trace!(level, depth = stack.depth(), "Row placed");

        let Some(reference_id) = citation_ref(row) else {
            continue;
        };
        let is_record = stack
            .titles()
            .last()
            .map(|label| config.is_record_label(label))
            .unwrap_or(false);
        if is_record {
            if let Some(entry) = HierarchyEntry::new(stack.titles().to_vec(), reference_id) {
                entries.push(entry);
            }
        }
    }

    if is_debug_enabled() {
        for entry in &entries {
            debug!(reference_id = %entry.reference_id, path = ?entry.path, "Record bookmark");
        }
    }

    audit_record_numbers(
        entries.iter().map(|e| e.label.as_str()),
        &config.record_prefixes,
        RecordSource::Bookmarks,
        review,
    );

    Ok(entries)
}
