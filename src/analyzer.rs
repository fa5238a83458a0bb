//! Recursive folder analysis.
//!
//! The [`Analyzer`] walks a directory tree depth-first. Every folder whose
//! subtree reaches the size threshold becomes a [`FolderEntry`]; its own large
//! files are grouped by extension and folded into a process-wide
//! [`FileTypeSummary`], and its large subfolders are analyzed the same way one
//! level deeper. Anything below the threshold still counts towards its
//! parent's total but is never listed.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::LazyLock,
    time::Duration,
};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;

use crate::{
    config::AnalysisOptions,
    report::{Analysis, FileTypeSummary, FolderEntry},
    utils::calculate_dir_size,
};

/// Markers for each depth level. Deeper levels reuse the last entry.
const DEPTH_SYMBOLS: [char; 5] = ['-', '*', '~', '=', '-'];

/// Runs of 32+ lowercase hex characters, as found in hash or UUID suffixes.
static HASH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[a-f0-9]{32,}").expect("hash token pattern is valid"));

/// Marker character for a report line at `depth`.
///
/// ```
/// # use folder_sizer::analyzer::symbol_for_depth;
/// assert_eq!(symbol_for_depth(1), '*');
/// assert_eq!(symbol_for_depth(10), '-');
/// ```
#[must_use]
pub fn symbol_for_depth(depth: usize) -> char {
    DEPTH_SYMBOLS
        .get(depth)
        .copied()
        .unwrap_or(DEPTH_SYMBOLS[DEPTH_SYMBOLS.len() - 1])
}

/// Remove hash-like tokens from a folder name and trim the result.
///
/// A token is a run of at least 32 characters from `[a-f0-9]` that does not
/// touch another ASCII letter or digit on either side, so `cache_<hash>` and
/// `build <hash>` are cleaned while longer alphanumeric words are left alone.
#[must_use]
pub fn sanitize_folder_name(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len());
    let mut copied_up_to = 0;

    for token in HASH_TOKEN.find_iter(name) {
        let before = name[..token.start()].chars().next_back();
        let after = name[token.end()..].chars().next();
        if before.is_some_and(|c| c.is_ascii_alphanumeric())
            || after.is_some_and(|c| c.is_ascii_alphanumeric())
        {
            continue;
        }

        cleaned.push_str(&name[copied_up_to..token.start()]);
        copied_up_to = token.end();
    }
    cleaned.push_str(&name[copied_up_to..]);

    cleaned.trim().to_string()
}

/// Extension of a file name, including the dot.
///
/// Leading dots are part of the name, not an extension: `.bashrc` has none,
/// `archive.tar.gz` has `.gz`, and `notes.` has `.`.
#[must_use]
pub fn file_extension(file_name: &str) -> &str {
    let name_start = file_name.len() - file_name.trim_start_matches('.').len();

    file_name[name_start..]
        .rfind('.')
        .map_or("", |dot| &file_name[name_start + dot..])
}

/// Name shown for a folder in the report.
fn display_name(path: &Path) -> String {
    let base = path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    );

    sanitize_folder_name(&base)
}

/// Immediate contents of one folder, sorted by name.
#[derive(Debug, Default)]
struct Listing {
    /// Regular files as `(file name, size)`
    files: Vec<(String, u64)>,

    /// Subdirectories
    dirs: Vec<PathBuf>,
}

/// Depth-first folder analyzer.
///
/// Holds the analysis options and the warnings collected for entries that
/// were skipped under [`crate::config::ErrorPolicy::Skip`].
pub struct Analyzer {
    /// Threshold and error handling
    options: AnalysisOptions,

    /// Entries that could not be read
    warnings: Vec<String>,

    /// Spinner shown while walking; hidden in quiet mode
    progress: ProgressBar,

    /// When `true`, no spinner is drawn (used by `--json`)
    quiet: bool,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("options", &self.options)
            .field("warnings", &self.warnings)
            .field("quiet", &self.quiet)
            .finish_non_exhaustive()
    }
}

impl Analyzer {
    /// Create an analyzer with the given options.
    #[must_use]
    pub fn new(options: AnalysisOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
            progress: ProgressBar::hidden(),
            quiet: true,
        }
    }

    /// Enable or disable quiet mode.
    ///
    /// Analyzers start quiet; the CLI turns the spinner on for interactive
    /// runs and leaves it off for `--json`.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Warnings collected so far.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Analyze `root` from depth 0 with a fresh file-type summary.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error when the error policy is
    /// [`crate::config::ErrorPolicy::Abort`].
    pub fn run(mut self, root: &Path) -> Result<Analysis> {
        self.start_progress();

        let mut summary = FileTypeSummary::new();
        let result = self.analyze_root(root, &mut summary);
        self.progress.finish_and_clear();
        let (total_size, tree) = result?;

        Ok(Analysis {
            root: root.to_path_buf(),
            threshold: self.options.threshold,
            total_size,
            summary,
            tree,
            warnings: self.warnings,
        })
    }

    /// Analyze one folder and render its report.
    ///
    /// Returns the rendered report and the depth processed. A folder whose
    /// subtree is below the threshold yields an empty report and hands
    /// `last_depth` back unchanged; its children are never visited and
    /// `summary` is left untouched.
    ///
    /// # Errors
    ///
    /// Returns the first filesystem error when the error policy is
    /// [`crate::config::ErrorPolicy::Abort`].
    pub fn analyze_folder(
        &mut self,
        path: &Path,
        depth: usize,
        summary: &mut FileTypeSummary,
        last_depth: usize,
    ) -> Result<(String, usize)> {
        let size = self.tree_size(path)?;

        Ok(match self.collect(path, size, depth, summary)? {
            Some(entry) => (entry.render(last_depth), depth),
            None => (String::new(), last_depth),
        })
    }

    fn analyze_root(
        &mut self,
        root: &Path,
        summary: &mut FileTypeSummary,
    ) -> Result<(u64, Option<FolderEntry>)> {
        let total_size = self.tree_size(root)?;
        let tree = self.collect(root, total_size, 0, summary)?;

        Ok((total_size, tree))
    }

    /// Build the entry for a folder whose subtree size is already known.
    fn collect(
        &mut self,
        path: &Path,
        size: u64,
        depth: usize,
        summary: &mut FileTypeSummary,
    ) -> Result<Option<FolderEntry>> {
        if size < self.options.threshold {
            return Ok(None);
        }

        self.progress
            .set_message(format!("Analyzing {}", path.display()));

        let listing = self.list(path)?;

        let mut file_types = FileTypeSummary::new();
        for (name, len) in &listing.files {
            if *len < self.options.threshold {
                continue;
            }
            let ext = file_extension(name);
            file_types.add(ext, *len);
            summary.add(ext, *len);
        }

        let mut large_dirs = Vec::new();
        for dir in listing.dirs {
            let dir_size = self.tree_size(&dir)?;
            if dir_size >= self.options.threshold {
                large_dirs.push((dir, dir_size));
            }
        }

        let mut children = Vec::with_capacity(large_dirs.len());
        for (dir, dir_size) in large_dirs {
            if let Some(child) = self.collect(&dir, dir_size, depth + 1, summary)? {
                children.push(child);
            }
        }

        Ok(Some(FolderEntry {
            path: path.to_path_buf(),
            name: display_name(path),
            depth,
            size,
            file_types,
            children,
        }))
    }

    /// List the immediate files and subdirectories of `path`.
    ///
    /// Symbolic links are neither files nor directories here.
    fn list(&mut self, path: &Path) -> Result<Listing> {
        let mut listing = Listing::default();

        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(err) => {
                self.skip(format!(
                    "Failed to read directory {}: {err}",
                    path.display()
                ))?;
                return Ok(listing);
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    self.skip(format!("Failed to read entry in {}: {err}", path.display()))?;
                    continue;
                }
            };

            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(err) => {
                    self.skip(format!(
                        "Failed to read file type of {}: {err}",
                        entry.path().display()
                    ))?;
                    continue;
                }
            };

            if file_type.is_dir() {
                listing.dirs.push(entry.path());
            } else if file_type.is_file() {
                match entry.metadata() {
                    Ok(metadata) => listing.files.push((
                        entry.file_name().to_string_lossy().into_owned(),
                        metadata.len(),
                    )),
                    Err(err) => self.skip(format!(
                        "Failed to read size of {}: {err}",
                        entry.path().display()
                    ))?,
                }
            }
        }

        listing.files.sort_by(|a, b| a.0.cmp(&b.0));
        listing.dirs.sort();

        Ok(listing)
    }

    fn tree_size(&mut self, path: &Path) -> Result<u64> {
        calculate_dir_size(path, self.options.error_policy, &mut self.warnings)
    }

    fn skip(&mut self, message: String) -> Result<()> {
        self.options.error_policy.handle(message, &mut self.warnings)
    }

    fn start_progress(&mut self) {
        if self.quiet {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Analyzing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.progress = spinner;
    }
}
