//! Utility functions and helpers.
//!
//! This module contains the size helpers shared by the analyzer, the report
//! renderer and the command-line layer.

pub mod size;

pub use size::{calculate_dir_size, format_size, parse_size};
