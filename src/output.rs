//! JSON report writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ExtentResult;
use crate::tree::ReportBranch;

/// File name for a collection's report: separators and spaces become `_`
pub fn report_file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{}.json", stem)
}

/// Write the report tree into `dest`, returning the written path
pub fn write_report(report: &ReportBranch, dest: &Path) -> ExtentResult<PathBuf> {
    let path = dest.join(report_file_name(&report.title));
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut writer, report)?;
    writer.flush()?;

    info!("Report written to {:?}", path);
    Ok(path)
}
