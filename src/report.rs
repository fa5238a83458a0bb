//! Report data structures and text rendering.
//!
//! An analysis produces a tree of [`FolderEntry`] values plus a global
//! [`FileTypeSummary`]. This module turns both into the depth-indented text
//! report and writes it next to the analyzed data.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::{analyzer::symbol_for_depth, utils::format_size};

/// Number of spaces per depth level in the text report.
const INDENT_WIDTH: usize = 4;

/// Heading of the global file-type section.
const SUMMARY_HEADING: &str = "File Type Summary:";

/// Count and combined size of files sharing one extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TypeStats {
    /// Number of files
    pub count: usize,

    /// Combined size in bytes
    pub size: u64,
}

/// Per-extension statistics, kept in the order extensions were first seen.
///
/// Used both for the extension lines under a single folder and for the
/// process-wide summary accumulated over the whole walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileTypeSummary(Vec<(String, TypeStats)>);

impl FileTypeSummary {
    /// Create an empty summary.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record one file of `size` bytes under `extension`.
    pub fn add(&mut self, extension: &str, size: u64) {
        let existing = self.0.iter().position(|(ext, _)| ext == extension);
        let index = existing.unwrap_or_else(|| {
            self.0.push((extension.to_string(), TypeStats::default()));
            self.0.len() - 1
        });

        let stats = &mut self.0[index].1;
        stats.count += 1;
        stats.size += size;
    }

    /// Statistics for one extension, if any file with it was recorded.
    #[must_use]
    pub fn get(&self, extension: &str) -> Option<TypeStats> {
        self.0
            .iter()
            .find(|(ext, _)| ext == extension)
            .map(|(_, stats)| *stats)
    }

    /// Iterate over `(extension, stats)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeStats)> {
        self.0.iter().map(|(ext, stats)| (ext.as_str(), *stats))
    }

    /// Number of distinct extensions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the global summary section.
    ///
    /// The heading is followed by a blank line, one `- <count> x <ext> (<size>)`
    /// line per extension and a trailing blank line, so the folder report can
    /// be appended directly.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![format!("{SUMMARY_HEADING}\n")];

        for (ext, stats) in self.iter() {
            lines.push(format!(
                "- {} x {ext} ({})",
                stats.count,
                format_size(stats.size)
            ));
        }
        lines.push("\n".to_string());

        lines.join("\n")
    }
}

/// One reported folder: its own line, its large files grouped by extension
/// and the subfolders that passed the threshold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderEntry {
    /// Full path of the folder
    pub path: PathBuf,

    /// Sanitized display name
    pub name: String,

    /// Depth below the analyzed root (root = 0)
    pub depth: usize,

    /// Total size of the whole subtree in bytes
    pub size: u64,

    /// Immediate files at or above the threshold, by extension
    pub file_types: FileTypeSummary,

    /// Subfolders at or above the threshold, in name order
    pub children: Vec<Self>,
}

impl FolderEntry {
    /// Render this folder and its descendants.
    ///
    /// `last_depth` is the depth the caller processed before this entry; when
    /// this entry sits higher in the tree a blank line is emitted first to
    /// separate sibling groups. Children are rendered with this entry's depth
    /// as their `last_depth`, each preceded by an empty line.
    #[must_use]
    pub fn render(&self, last_depth: usize) -> String {
        let indent = " ".repeat(INDENT_WIDTH * self.depth);
        let mut lines = Vec::new();

        if self.depth < last_depth {
            lines.push("\n".to_string());
        }

        lines.push(format!(
            "{indent}{} folder -> {}: {}",
            symbol_for_depth(self.depth),
            self.name,
            format_size(self.size)
        ));

        let file_indent = " ".repeat(INDENT_WIDTH * (self.depth + 1));
        let file_symbol = symbol_for_depth(self.depth + 1);
        for (ext, stats) in self.file_types.iter() {
            lines.push(format!(
                "{file_indent}{file_symbol} {} x {ext} ({})",
                stats.count,
                format_size(stats.size)
            ));
        }

        for child in &self.children {
            let child_report = child.render(self.depth);
            if !child_report.is_empty() {
                lines.push(format!("\n{child_report}"));
            }
        }

        lines.join("\n")
    }

    /// Number of folders in this subtree, this one included.
    #[must_use]
    pub fn folder_count(&self) -> usize {
        1 + self.children.iter().map(Self::folder_count).sum::<usize>()
    }
}

/// Outcome of analyzing one root folder.
#[derive(Debug)]
pub struct Analysis {
    /// The folder that was analyzed
    pub root: PathBuf,

    /// Threshold used for this run, in bytes
    pub threshold: u64,

    /// Total size of the root subtree, whether or not it passed the threshold
    pub total_size: u64,

    /// Extension statistics over every reported file
    pub summary: FileTypeSummary,

    /// Reported folder tree, `None` when the root itself was too small
    pub tree: Option<FolderEntry>,

    /// Entries skipped because they could not be read
    pub warnings: Vec<String>,
}

impl Analysis {
    /// The depth-indented folder report without the summary section.
    #[must_use]
    pub fn folder_report(&self) -> String {
        self.tree
            .as_ref()
            .map(|tree| tree.render(0))
            .unwrap_or_default()
    }

    /// Whether nothing reached the threshold.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// The complete text: summary section followed by the folder report.
    #[must_use]
    pub fn to_text(&self) -> String {
        format!("{}{}", self.summary.render(), self.folder_report())
    }

    /// Write the complete text to `<root>/<file_name>`, replacing any
    /// previous report.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn export(&self, file_name: &str) -> Result<PathBuf> {
        let path = self.root.join(file_name);
        write_report(&path, &self.to_text())?;
        Ok(path)
    }
}

/// Write `content` to `path`, overwriting it.
fn write_report(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}
