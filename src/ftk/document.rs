//! FTK report document handle
//!
//! FTK writes its case reports as XSL-FO: a `fo:root` holding one
//! `fo:page-sequence` per report page type, told apart by `master-reference`.
//! The document is parsed once into a read-only DOM and the extractors query
//! it by structural location.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};
use tracing::{debug, instrument};

use crate::error::{ExtentError, ExtentResult, UNREADABLE_REPORT};

/// Namespace for the FTK output XML
pub const FO_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Format";

/// Parsed FTK report
pub struct FtkReport<'input> {
    doc: Document<'input>,
}

impl<'input> FtkReport<'input> {
    /// Parse report text; malformed XML is fatal
    pub fn parse(text: &'input str) -> ExtentResult<Self> {
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(text, options)?;
        Ok(Self { doc })
    }

    /// The `fo:flow` of the page sequence with the given `master-reference`
    pub fn page_flow(&self, master: &str) -> Option<Node<'_, 'input>> {
        let root = self.doc.root_element();
        if !is_fo(root, "root") {
            debug!(tag = root.tag_name().name(), "Report root is not fo:root");
            return None;
        }

        fo_children(root, "page-sequence")
            .into_iter()
            .find(|seq| seq.attribute("master-reference") == Some(master))
            .and_then(|seq| fo_children(seq, "flow").into_iter().next())
    }

    /// Collection title: the case information cell following `key`
    pub fn collection_title(&self, case_info_master: &str, key: &str) -> ExtentResult<String> {
        let flow = self.page_flow(case_info_master).ok_or_else(|| {
            ExtentError::MissingSection(format!("page-sequence \"{}\"", case_info_master))
        })?;

        let cells: Vec<String> = select(
            flow,
            &["table", "table-body", "table-row", "table-cell", "block"],
        )
        .into_iter()
        .map(text_content)
        .filter(|text| !text.is_empty())
        .collect();

        cells
            .iter()
            .position(|text| text == key)
            .and_then(|i| cells.get(i + 1))
            .cloned()
            .ok_or_else(|| ExtentError::MissingField(key.to_string()))
    }
}

/// Read report text from disk
#[instrument]
pub fn read_report_text(path: &Path) -> ExtentResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => ExtentError::InvalidInput(UNREADABLE_REPORT.to_string()),
        _ => ExtentError::Io(e),
    })
}

/// Whether a node is the FO element `fo:<local>`
pub fn is_fo(node: Node<'_, '_>, local: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(FO_NAMESPACE)
        && node.tag_name().name() == local
}

/// Element children named `fo:<local>`, in document order
pub fn fo_children<'a, 'input>(node: Node<'a, 'input>, local: &str) -> Vec<Node<'a, 'input>> {
    node.children().filter(|child| is_fo(*child, local)).collect()
}

/// Follow a child-axis path of FO element names from `start`
///
/// `select(table, &["table-body", "table-row"])` is the XPath
/// `./fo:table-body/fo:table-row`.
pub fn select<'a, 'input>(start: Node<'a, 'input>, steps: &[&str]) -> Vec<Node<'a, 'input>> {
    let mut current = vec![start];
    for step in steps {
        current = current
            .into_iter()
            .flat_map(|node| fo_children(node, step))
            .collect();
    }
    current
}

/// Leading text of an element, before any child element
pub fn own_text(node: Node<'_, '_>) -> String {
    node.text().map(str::trim).unwrap_or_default().to_string()
}

/// Concatenated text of an element subtree
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string()
}
