//! Analysis and output configuration.
//!
//! This module defines the options that control which files and folders make
//! it into the report, how filesystem errors are treated while walking the
//! tree, and where the finished report goes.

/// Default minimum size (5 MiB) a file or folder must reach to be reported.
pub const DEFAULT_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Default name of the exported report, written inside the analyzed folder.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "folder_analysis.txt";

/// How filesystem errors encountered during the walk are handled.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ErrorPolicy {
    /// Skip unreadable entries and record a warning for each one
    #[default]
    Skip,

    /// Abort the whole analysis on the first error
    Abort,
}

impl ErrorPolicy {
    /// Build a policy from the `--strict` flag.
    #[must_use]
    pub const fn from_strict(strict: bool) -> Self {
        if strict { Self::Abort } else { Self::Skip }
    }

    /// Apply the policy to a failure described by `message`.
    ///
    /// With [`ErrorPolicy::Skip`] the message is appended to `warnings` and
    /// the walk continues. A message already in `warnings` is not added
    /// again: nested folders are measured once per ancestor, so the same
    /// unreadable entry is reported by every walk that reaches it.
    ///
    /// # Errors
    ///
    /// With [`ErrorPolicy::Abort`] the message is returned as an error.
    pub fn handle(self, message: String, warnings: &mut Vec<String>) -> anyhow::Result<()> {
        match self {
            Self::Skip => {
                if !warnings.contains(&message) {
                    warnings.push(message);
                }
                Ok(())
            }
            Self::Abort => Err(anyhow::anyhow!(message)),
        }
    }
}

/// Options controlling the analysis itself.
#[derive(Clone, Copy, Debug)]
pub struct AnalysisOptions {
    /// Minimum size in bytes for a file or folder to appear in the report
    pub threshold: u64,

    /// What to do when an entry cannot be read
    pub error_policy: ErrorPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            error_policy: ErrorPolicy::default(),
        }
    }
}

/// Options controlling what happens with the finished report.
#[derive(Clone, Debug)]
pub struct OutputOptions {
    /// Whether to write the report into the analyzed folder
    pub export: bool,

    /// File name of the exported report
    pub file_name: String,

    /// Whether to print the warnings collected while walking the tree
    pub verbose: bool,

    /// Emit a single JSON document instead of the text report
    pub json: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            export: true,
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            verbose: false,
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_is_five_mebibytes() {
        assert_eq!(DEFAULT_THRESHOLD, 5_242_880);
        assert_eq!(AnalysisOptions::default().threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_error_policy_from_strict() {
        assert_eq!(ErrorPolicy::from_strict(true), ErrorPolicy::Abort);
        assert_eq!(ErrorPolicy::from_strict(false), ErrorPolicy::Skip);
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Skip);
    }

    #[test]
    fn test_skip_policy_records_warning() {
        let mut warnings = Vec::new();

        ErrorPolicy::Skip
            .handle("cannot read /x".to_string(), &mut warnings)
            .unwrap();

        assert_eq!(warnings, vec!["cannot read /x".to_string()]);
    }

    #[test]
    fn test_skip_policy_records_each_failure_once() {
        let mut warnings = Vec::new();

        for _ in 0..4 {
            ErrorPolicy::Skip
                .handle("cannot read /x/locked".to_string(), &mut warnings)
                .unwrap();
        }
        ErrorPolicy::Skip
            .handle("cannot read /y".to_string(), &mut warnings)
            .unwrap();

        assert_eq!(
            warnings,
            vec!["cannot read /x/locked".to_string(), "cannot read /y".to_string()]
        );
    }

    #[test]
    fn test_abort_policy_returns_error() {
        let mut warnings = Vec::new();

        let err = ErrorPolicy::Abort
            .handle("cannot read /x".to_string(), &mut warnings)
            .unwrap_err();

        assert_eq!(err.to_string(), "cannot read /x");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_output_options_default() {
        let opts = OutputOptions::default();

        assert!(opts.export);
        assert!(!opts.verbose);
        assert!(!opts.json);
        assert_eq!(opts.file_name, "folder_analysis.txt");
    }
}
