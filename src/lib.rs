//! # folder-sizer
//!
//! Recursively summarizes how much space a folder tree takes, grouped by file
//! type and indented by depth.
//!
//! Only files and folders at or above a size threshold (5 MiB by default) are
//! listed; smaller ones still count towards their parent's total. The result
//! is a text report headed by a global file-type summary, printed to stdout
//! and saved as `folder_analysis.txt` inside the analyzed folder.
//!
//! ```text
//! File Type Summary:
//!
//! - 2 x .bin (12.00MB)
//!
//! - folder -> root: 12.00MB
//!     * 1 x .bin (6.00MB)
//!
//!     * folder -> sub: 6.00MB
//!         ~ 1 x .bin (6.00MB)
//! ```

pub mod analyzer;
pub mod config;
pub mod output;
pub mod report;
pub mod utils;

pub use analyzer::Analyzer;
pub use config::{AnalysisOptions, ErrorPolicy, OutputOptions};
pub use report::{Analysis, FileTypeSummary, FolderEntry, TypeStats};
