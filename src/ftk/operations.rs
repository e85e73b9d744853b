//! FTK report pipeline: document → hierarchy + bookmark rows → extents → tree

use std::path::Path;

use tracing::{info, instrument};

use super::bookmarks::transform_bookmark_tables;
use super::document::{read_report_text, FtkReport};
use super::extents::add_extents_to_components;
use super::hierarchy::extract_hierarchy;
use crate::config::ExtentConfig;
use crate::error::ExtentResult;
use crate::review::ReviewLog;
use crate::tree::{build_report, ExtentReport, LabelStyle};

/// Build the extent tree from the text of an FTK report
///
/// Fails on unparseable XML, a missing table of contents or collection
/// title, and an indentation jump. Everything else ends up in the review log.
pub fn build_extent_report(text: &str, config: &ExtentConfig) -> ExtentResult<ExtentReport> {
    let report = FtkReport::parse(text)?;
    let mut review = ReviewLog::new();

    let components = extract_hierarchy(&report, config, &mut review)?;
    info!(components = components.len(), "Hierarchy extracted");

    let rows = transform_bookmark_tables(&report, config);
    let extents = add_extents_to_components(&components, &rows, config, &mut review);
    let title = report.collection_title(&config.case_info_master, &config.collection_title_key)?;
    let tree = build_report(title.clone(), &extents, LabelStyle::Colon);

    info!(records = extents.len(), notices = review.len(), "Report built for {}", title);
    Ok(ExtentReport { title, tree, review })
}

/// Read an FTK report from disk and build its extent tree
#[instrument(skip_all, fields(path = %path.display()))]
pub fn run(path: &Path, config: &ExtentConfig) -> ExtentResult<ExtentReport> {
    let text = read_report_text(path)?;
    build_extent_report(&text, config)
}
