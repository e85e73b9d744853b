//! Review notices for the processing archivist
//!
//! Data-quality problems never abort a run. Each one becomes a notice with
//! fixed wording (downstream log scraping depends on it), is logged under the
//! `archivist_review` target and is kept in a [`ReviewLog`] so the caller can
//! report or inspect them after the run.

use tracing::warn;

/// Where record labels come from; selects the wording of notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    /// FTK bookmarks (table of contents of a report)
    Bookmarks,
    /// `ER *` folders in a FAcomponents directory
    Folders,
}

impl RecordSource {
    fn unit(&self) -> &'static str {
        match self {
            RecordSource::Bookmarks => "component",
            RecordSource::Folders => "ER",
        }
    }

    fn reviewed(&self) -> &'static str {
        match self {
            RecordSource::Bookmarks => "bookmarks",
            RecordSource::Folders => "ERs",
        }
    }

    pub fn no_files(&self, name: &str) -> String {
        format!("{} does not contain any files. It will be omitted from the report.", name)
    }

    pub fn no_bytes(&self, name: &str) -> String {
        let unit = self.unit();
        format!(
            "{} contains no files with bytes. This {} is omitted from report. Review this {} with the processing archivist.",
            name, unit, unit
        )
    }

    pub fn zero_byte_file(&self, name: &str, file_name: &str) -> String {
        format!(
            "{} contains the following 0-byte file: {}. Review this file with the processing archivist.",
            name, file_name
        )
    }

    pub fn number_skipped(&self, record_type: &str, min: u64, max: u64, skipped: u64) -> String {
        match self {
            RecordSource::Bookmarks => format!(
                "Collection {} component range is numbered {} to {}. {} is skipped. Review the bookmarks with the processing archivist",
                record_type, min, max, skipped
            ),
            RecordSource::Folders => format!(
                "Collection uses {t} {} to {t} {}. {t} {} is skipped. Review the ERs with the processing archivist",
                min, max, skipped, t = record_type
            ),
        }
    }

    pub fn numbers_skipped(&self, record_type: &str, min: u64, max: u64, count: u64) -> String {
        match self {
            RecordSource::Bookmarks => format!(
                "Collection {} component range is numbered {} to {}. {} numbers are skipped. Review the bookmarks with the processing archivist",
                record_type, min, max, count
            ),
            RecordSource::Folders => format!(
                "Collection uses {t} {} to {t} {}. {} {t} numbers are skipped. Review the ERs with the processing archivist",
                min, max, count, t = record_type
            ),
        }
    }

    pub fn number_reused(&self, record_type: &str, number: u64, names: &[&str]) -> String {
        format!(
            "{} {} is used multiple times: {}. Review the {} with the processing archivist",
            record_type,
            number,
            names.join(", "),
            self.reviewed()
        )
    }

    pub fn number_missing(&self, name: &str) -> String {
        match self {
            RecordSource::Bookmarks => format!(
                "Component is missing a number: {}. Review the bookmarks with the processing archivist",
                name
            ),
            RecordSource::Folders => format!(
                "ER is missing a number: {}. Review the ERs with the processing archivist",
                name
            ),
        }
    }

    pub fn no_objects_folder(&self, name: &str) -> String {
        format!(
            "{} does not contain an object folder. It will be omitted from the report.",
            name
        )
    }
}

/// Append-only collection of review notices for one run
#[derive(Debug, Default, Clone)]
pub struct ReviewLog {
    notices: Vec<String>,
}

impl ReviewLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notice and emit it as a warning
    pub fn notice(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(target: "archivist_review", "{}", message);
        self.notices.push(message);
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn len(&self) -> usize {
        self.notices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    /// Whether any notice contains the given text
    pub fn contains(&self, text: &str) -> bool {
        self.notices.iter().any(|n| n.contains(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookmark_wording() {
        let source = RecordSource::Bookmarks;
        assert_eq!(
            source.no_files("ER 5: No Files, 2023"),
            "ER 5: No Files, 2023 does not contain any files. It will be omitted from the report."
        );
        assert_eq!(
            source.no_bytes("ER 6: Zero Length, 2023"),
            "ER 6: Zero Length, 2023 contains no files with bytes. This component is omitted from report. Review this component with the processing archivist."
        );
        assert_eq!(
            source.number_skipped("ER", 1, 23, 4),
            "Collection ER component range is numbered 1 to 23. 4 is skipped. Review the bookmarks with the processing archivist"
        );
        assert_eq!(
            source.number_reused("ER", 10, &["ER 10: File 21,2023", "ER 10: Folder 2, 2023"]),
            "ER 10 is used multiple times: ER 10: File 21,2023, ER 10: Folder 2, 2023. Review the bookmarks with the processing archivist"
        );
    }

    #[test]
    fn test_folder_wording() {
        let source = RecordSource::Folders;
        assert_eq!(
            source.no_bytes("ER 6 Zero Length, 2023"),
            "ER 6 Zero Length, 2023 contains no files with bytes. This ER is omitted from report. Review this ER with the processing archivist."
        );
        assert_eq!(
            source.number_skipped("ER", 1, 23, 13),
            "Collection uses ER 1 to ER 23. ER 13 is skipped. Review the ERs with the processing archivist"
        );
        assert_eq!(
            source.numbers_skipped("ER", 1, 500, 497),
            "Collection uses ER 1 to ER 500. 497 ER numbers are skipped. Review the ERs with the processing archivist"
        );
        assert_eq!(
            source.number_missing("ER x"),
            "ER is missing a number: ER x. Review the ERs with the processing archivist"
        );
    }

    #[test]
    fn test_review_log_collects_in_order() {
        let mut log = ReviewLog::new();
        assert!(log.is_empty());
        log.notice("first");
        log.notice(String::from("second"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.notices(), &["first".to_string(), "second".to_string()]);
        assert!(log.contains("sec"));
    }
}
