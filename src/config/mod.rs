//! Configuration types for the analyzer.
//!
//! Runtime options live in [`analysis`]; the persistent TOML config file is
//! handled by [`file`].

pub mod analysis;
pub mod file;

pub use analysis::{
    AnalysisOptions, DEFAULT_EXPORT_FILE_NAME, DEFAULT_THRESHOLD, ErrorPolicy, OutputOptions,
};
pub use file::FileConfig;
