//! Extent reports for born-digital archival collections
//!
//! Three sources are supported:
//! - [`ftk`]: an FTK XSL-FO case report, hierarchy from its bookmarks
//! - [`hdd`]: a `M<id>_FAcomponents` directory, hierarchy from its folders
//! - [`transfers`]: bagged transfers of one acquisition, tabulated as CSV
//!
//! The first two produce a nested [`tree::ReportBranch`] that
//! [`output::write_report`] writes as JSON for archival description import.

pub mod config;
pub mod error;
pub mod extent;
pub mod ftk;
pub mod hdd;
pub mod logging;
pub mod numbering;
pub mod output;
pub mod review;
pub mod transfers;
pub mod tree;

pub use config::ExtentConfig;
pub use error::{ExtentError, ExtentResult};
pub use extent::ExtentEntry;
pub use review::{RecordSource, ReviewLog};
pub use tree::{ExtentReport, LabelStyle, RecordLeaf, ReportBranch, ReportNode};
