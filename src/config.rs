//! Configuration for report parsing
//!
//! FTK report layouts vary slightly between report-generator setups. The
//! values the extractor depends on (indent stride, section names, column
//! labels, id markers) live here and can be overridden by a JSON file:
//!
//! ```json
//! { "indent_stride": 12, "indent_offset": 2, "record_prefixes": ["ER", "DI"] }
//! ```
//!
//! Lookup order: `--config <file>`, then `<config_dir>/digarch-extents/config.json`,
//! then the built-in defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ExtentError, ExtentResult};

/// Config file name inside the per-user config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Application directory under the per-user config directory
pub const CONFIG_DIR_NAME: &str = "digarch-extents";

/// Parsing settings shared by the FTK and folder reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtentConfig {
    /// Points of `start-indent` per hierarchy level
    pub indent_stride: i64,
    /// Levels subtracted after dividing by the stride so the collection is level 0
    pub indent_offset: i64,
    /// Label prefixes that mark a record (electronic record, disk image)
    pub record_prefixes: Vec<String>,
    /// Character in a TOC `ref-id` that is swapped to find the bookmark group
    pub reference_marker: char,
    /// Replacement character giving the bookmark table group id
    pub group_marker: char,
    /// Separator between group id and file suffix in a bookmark table id
    pub group_separator: char,
    /// Bookmark table column holding the byte size
    pub size_column: String,
    /// Bookmark table column holding the file name
    pub name_column: String,
    /// `master-reference` of the table-of-contents page sequence
    pub toc_master: String,
    /// `master-reference` of the bookmark tables page sequence
    pub bookmarks_master: String,
    /// `master-reference` of the case information page sequence
    pub case_info_master: String,
    /// Case information cell that precedes the collection title
    pub collection_title_key: String,
}

impl Default for ExtentConfig {
    fn default() -> Self {
        Self {
            indent_stride: 12,
            indent_offset: 2,
            record_prefixes: vec!["ER".to_string(), "DI".to_string()],
            reference_marker: 'k',
            group_marker: 'f',
            group_separator: '_',
            size_column: "Logical Size".to_string(),
            name_column: "Name".to_string(),
            toc_master: "TOC".to_string(),
            bookmarks_master: "bookmarksPage".to_string(),
            case_info_master: "caseInfoPage".to_string(),
            collection_title_key: "Case Name".to_string(),
        }
    }
}

impl ExtentConfig {
    /// Check values that would make the extractor misbehave
    pub fn validate(&self) -> ExtentResult<()> {
        if self.indent_stride <= 0 {
            return Err(ExtentError::Config(format!(
                "indent_stride must be positive, got {}",
                self.indent_stride
            )));
        }
        if self.record_prefixes.is_empty() || self.record_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ExtentError::Config(
                "record_prefixes must list at least one non-empty prefix".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a label starts with one of the record prefixes
    pub fn is_record_label(&self, label: &str) -> bool {
        self.record_prefixes.iter().any(|prefix| label.starts_with(prefix.as_str()))
    }

    /// Bookmark group id for a table-of-contents reference id
    pub fn group_id_for(&self, reference_id: &str) -> String {
        reference_id.replace(self.reference_marker, &self.group_marker.to_string())
    }
}

/// Default per-user config path, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load a config from a JSON file
pub fn load_config(path: &Path) -> ExtentResult<ExtentConfig> {
    info!("Loading config from: {:?}", path);
    let json = fs::read_to_string(path)
        .map_err(|e| ExtentError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config: ExtentConfig = serde_json::from_str(&json)
        .map_err(|e| ExtentError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

/// Resolve the config for a run: explicit file, per-user file, or defaults
pub fn resolve_config(explicit: Option<&Path>) -> ExtentResult<ExtentConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => load_config(&path),
        _ => {
            debug!("No config file found, using defaults");
            Ok(ExtentConfig::default())
        }
    }
}

/// Save a config as pretty JSON
pub fn save_config(config: &ExtentConfig, path: &Path) -> ExtentResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    info!("Config saved to: {:?}", path);
    Ok(())
}
