//! Structured JSON output for scripting and piping.
//!
//! When `--json` is passed, the text report is replaced by a single JSON
//! document built from these structures.

use chrono::Local;
use humansize::{BINARY, format_size as format_binary};
use serde::Serialize;

use crate::{
    report::{Analysis, FileTypeSummary, FolderEntry},
    utils::format_size,
};

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// Absolute or user-supplied path of the analyzed folder.
    pub root: String,

    /// Local time the document was produced, RFC 3339.
    pub generated_at: String,

    /// Threshold in bytes.
    pub threshold: u64,

    /// Threshold in binary units (e.g. `"5 MiB"`).
    pub threshold_formatted: String,

    /// Total size of the root subtree in bytes.
    pub total_size: u64,

    /// Total size in report format (e.g. `"12.00MB"`).
    pub total_size_formatted: String,

    /// Global per-extension summary in first-seen order.
    pub file_types: Vec<JsonTypeEntry>,

    /// Reported folder tree, `null` when nothing reached the threshold.
    pub tree: Option<JsonFolder>,

    /// Entries skipped because they could not be read.
    pub warnings: Vec<String>,
}

/// Per-extension count and size.
#[derive(Serialize, Debug)]
pub struct JsonTypeEntry {
    /// Extension including the dot, or `""`.
    pub extension: String,

    /// Number of files.
    pub count: usize,

    /// Combined size in bytes.
    pub size: u64,

    /// Combined size in report format.
    pub size_formatted: String,
}

/// One folder in the JSON tree.
#[derive(Serialize, Debug)]
pub struct JsonFolder {
    /// Sanitized display name.
    pub name: String,

    /// Full path.
    pub path: String,

    /// Depth below the root.
    pub depth: usize,

    /// Subtree size in bytes.
    pub size: u64,

    /// Subtree size in report format.
    pub size_formatted: String,

    /// Immediate large files grouped by extension.
    pub file_types: Vec<JsonTypeEntry>,

    /// Large subfolders.
    pub children: Vec<Self>,
}

impl JsonOutput {
    /// Build the JSON document for a finished analysis.
    #[must_use]
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            root: analysis.root.display().to_string(),
            generated_at: Local::now().to_rfc3339(),
            threshold: analysis.threshold,
            threshold_formatted: format_binary(analysis.threshold, BINARY),
            total_size: analysis.total_size,
            total_size_formatted: format_size(analysis.total_size),
            file_types: type_entries(&analysis.summary),
            tree: analysis.tree.as_ref().map(JsonFolder::from_entry),
            warnings: analysis.warnings.clone(),
        }
    }
}

impl JsonFolder {
    /// Convert a [`FolderEntry`] and its children.
    #[must_use]
    pub fn from_entry(entry: &FolderEntry) -> Self {
        Self {
            name: entry.name.clone(),
            path: entry.path.display().to_string(),
            depth: entry.depth,
            size: entry.size,
            size_formatted: format_size(entry.size),
            file_types: type_entries(&entry.file_types),
            children: entry.children.iter().map(Self::from_entry).collect(),
        }
    }
}

fn type_entries(summary: &FileTypeSummary) -> Vec<JsonTypeEntry> {
    summary
        .iter()
        .map(|(ext, stats)| JsonTypeEntry {
            extension: ext.to_string(),
            count: stats.count,
            size: stats.size,
            size_formatted: format_size(stats.size),
        })
        .collect()
}
