//! Record extents from a FAcomponents directory
//!
//! Records processed from hard drives are laid out on disk rather than in an
//! FTK report: `M1234_FAcomponents/Series 1/ER 1 Letters/objects/...`. Every
//! `ER *` folder is a record, the folders above it are its hierarchy, and the
//! files under its `objects` folder are its extent.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, instrument, warn};

use crate::config::ExtentConfig;
use crate::error::{ExtentError, ExtentResult};
use crate::extent::ExtentEntry;
use crate::numbering::audit_record_numbers;
use crate::review::{RecordSource, ReviewLog};
use crate::tree::{build_report, ExtentReport, LabelStyle};

/// Name of the folder holding a record's files
pub const OBJECTS_DIR: &str = "objects";

pub const MISSING_COMPONENTS_DIR: &str = "Cannot find CollectionID_FAcomponents directory. Please use CollectionID_FAcomponents naming convention for the directory containing all ERs.";

fn components_dir_regex() -> &'static Regex {
    static COMPONENTS_DIR_REGEX: OnceLock<Regex> = OnceLock::new();
    COMPONENTS_DIR_REGEX.get_or_init(|| {
        Regex::new(r"^M\d+_FAcomponents").expect("Invalid FAcomponents regex")
    })
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// The FAcomponents directory to scan and the collection title
///
/// The directory itself or one of its children must follow the
/// `M<digits>_FAcomponents` convention. Otherwise a warning is logged and the
/// directory is scanned under its own name.
pub fn locate_components_dir(dir: &Path) -> (PathBuf, String) {
    let own_name = dir_name(dir);
    if components_dir_regex().is_match(&own_name) {
        return (dir.to_path_buf(), own_name);
    }

    if let Ok(entries) = fs::read_dir(dir) {
        let mut names: Vec<String> = entries
            .flatten()
            .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| components_dir_regex().is_match(name))
            .collect();
        names.sort();
        if let Some(name) = names.into_iter().next() {
            return (dir.join(&name), name);
        }
    }

    warn!("{}", MISSING_COMPONENTS_DIR);
    (dir.to_path_buf(), own_name)
}

pub fn collection_title(dir: &Path) -> String {
    locate_components_dir(dir).1
}

/// Whether a folder name marks a record (`ER 1 Letters`)
fn is_record_dir(name: &str, config: &ExtentConfig) -> bool {
    config
        .record_prefixes
        .iter()
        .any(|prefix| name.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with(' ')))
}

/// Sorted subdirectories of `dir`, symlinks excluded
fn subdirectories(dir: &Path) -> ExtentResult<Vec<PathBuf>> {
    let mut subdirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };
        match entry.file_type() {
            Ok(ft) if ft.is_dir() => subdirs.push(entry.path()),
            Ok(_) => {}
            Err(e) => warn!("Failed to get file type for {:?}: {}", entry.path(), e),
        }
    }
    subdirs.sort();
    Ok(subdirs)
}

/// Every record folder below `dir`, without descending into records
fn find_record_dirs(dir: &Path, config: &ExtentConfig, found: &mut Vec<PathBuf>) -> ExtentResult<()> {
    for subdir in subdirectories(dir)? {
        if is_record_dir(&dir_name(&subdir), config) {
            found.push(subdir);
        } else {
            find_record_dirs(&subdir, config, found)?;
        }
    }
    Ok(())
}

/// Total bytes and file count under `dir`, recursively
///
/// Zero-byte files are reported for review under the record's name.
fn folder_extent(dir: &Path, record_name: &str, review: &mut ReviewLog) -> ExtentResult<(u64, u64)> {
    let mut size = 0u64;
    let mut count = 0u64;
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let mut entries: Vec<_> = fs::read_dir(&current)?.flatten().collect();
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push(entry.path());
                continue;
            }

            let file_size = fs::metadata(entry.path())?.len();
            count += 1;
            if file_size == 0 {
                let file_name = entry.file_name().to_string_lossy().to_string();
                review.notice(RecordSource::Folders.zero_byte_file(record_name, &file_name));
            }
            size = size.saturating_add(file_size);
        }
    }

    Ok((size, count))
}

/// Hierarchy path of a record folder, starting with the scanned directory's name
fn relative_path(root: &Path, record_dir: &Path) -> ExtentResult<Vec<String>> {
    let relative = record_dir.strip_prefix(root).map_err(|_| {
        ExtentError::InvalidInput(format!("{} is outside {}", record_dir.display(), root.display()))
    })?;
    let mut path = vec![dir_name(root)];
    path.extend(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string()),
    );
    Ok(path)
}

/// Extents for every record folder under `dir` that has files with bytes
///
/// Output is sorted by hierarchy path. The record numbers of every record
/// folder found, kept or not, are audited before returning.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn collect_folder_extents(
    dir: &Path,
    config: &ExtentConfig,
    review: &mut ReviewLog,
) -> ExtentResult<Vec<ExtentEntry>> {
    let mut record_dirs = Vec::new();
    find_record_dirs(dir, config, &mut record_dirs)?;
    info!(records = record_dirs.len(), "Record folders found");

    let mut names = Vec::with_capacity(record_dirs.len());
    let mut extents = Vec::new();

    for record_dir in &record_dirs {
        let name = dir_name(record_dir);
        names.push(name.clone());

        let objects = record_dir.join(OBJECTS_DIR);
        if !objects.is_dir() {
            review.notice(RecordSource::Folders.no_objects_folder(&name));
            continue;
        }

        let (size, count) = folder_extent(&objects, &name, review)?;
        debug!(record = %name, size, count, "Folder extent");
        let path = relative_path(dir, record_dir)?;
        if let Some(extent) = ExtentEntry::checked(path, size, count, &name, RecordSource::Folders, review) {
            extents.push(extent);
        }
    }

    extents.sort_by(|a, b| a.path.cmp(&b.path));

    if !names.is_empty() {
        audit_record_numbers(
            names.iter().map(String::as_str),
            &config.record_prefixes,
            RecordSource::Folders,
            review,
        );
    }

    Ok(extents)
}

/// Scan a FAcomponents directory and build its extent tree
pub fn run(dir: &Path, config: &ExtentConfig) -> ExtentResult<ExtentReport> {
    let mut review = ReviewLog::new();
    let (components_dir, title) = locate_components_dir(dir);
    let extents = collect_folder_extents(&components_dir, config, &mut review)?;
    let tree = build_report(title.clone(), &extents, LabelStyle::Folder);

    info!(records = extents.len(), notices = review.len(), "Report built for {}", title);
    Ok(ExtentReport { title, tree, review })
}
