//! Error types for extent reporting

use std::fmt;
use std::io;

/// Result type alias for extent operations
pub type ExtentResult<T> = Result<T, ExtentError>;

/// Message shown when the FTK report is not well-formed XML
pub const UNREADABLE_REPORT: &str =
    "FTK report cannot be parsed. Edit the unreadable characters in the report with a text editor.";

/// Errors that abort a report run
#[derive(Debug)]
pub enum ExtentError {
    /// I/O error (file read/write, directory walk)
    Io(io::Error),
    /// The FTK report could not be parsed as XML
    UnreadableReport(roxmltree::Error),
    /// JSON serialization error
    Serialization(serde_json::Error),
    /// CSV writing error
    Csv(csv::Error),
    /// A required page-sequence or flow is absent from the report
    MissingSection(String),
    /// A required field is absent from the report metadata
    MissingField(String),
    /// A table-of-contents row jumps more than one level deeper than its parent
    HierarchyJump { label: String },
    /// Invalid input path or argument
    InvalidInput(String),
    /// Configuration file could not be used
    Config(String),
}

impl fmt::Display for ExtentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtentError::Io(e) => write!(f, "I/O error: {}", e),
            ExtentError::UnreadableReport(_) => f.write_str(UNREADABLE_REPORT),
            ExtentError::Serialization(e) => write!(f, "Serialization error: {}", e),
            ExtentError::Csv(e) => write!(f, "CSV error: {}", e),
            ExtentError::MissingSection(e) => write!(f, "Report section not found: {}", e),
            ExtentError::MissingField(e) => write!(f, "Missing required field: {}", e),
            ExtentError::HierarchyJump { label } => {
                write!(f, "Unexpected jump in hierarchy at {}", label)
            }
            ExtentError::InvalidInput(e) => write!(f, "Invalid input: {}", e),
            ExtentError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ExtentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtentError::Io(e) => Some(e),
            ExtentError::UnreadableReport(e) => Some(e),
            ExtentError::Serialization(e) => Some(e),
            ExtentError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExtentError {
    fn from(err: io::Error) -> Self {
        ExtentError::Io(err)
    }
}

impl From<roxmltree::Error> for ExtentError {
    fn from(err: roxmltree::Error) -> Self {
        ExtentError::UnreadableReport(err)
    }
}

impl From<serde_json::Error> for ExtentError {
    fn from(err: serde_json::Error) -> Self {
        ExtentError::Serialization(err)
    }
}

impl From<csv::Error> for ExtentError {
    fn from(err: csv::Error) -> Self {
        ExtentError::Csv(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_jump_names_label() {
        let err = ExtentError::HierarchyJump { label: "Subsubseries(2)".to_string() };
        assert_eq!(err.to_string(), "Unexpected jump in hierarchy at Subsubseries(2)");
    }

    #[test]
    fn test_unreadable_report_message() {
        let xml_err = roxmltree::Document::parse("<a>").unwrap_err();
        let err = ExtentError::from(xml_err);
        assert_eq!(err.to_string(), UNREADABLE_REPORT);
        assert!(std::error::Error::source(&err).is_some());
    }
}
