//! Configuration file support for persistent settings.
//!
//! Settings are read from `~/.config/folder-sizer/config.toml` (or the
//! platform-specific equivalent). Values found there act as defaults that
//! command-line arguments can override.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! dir = "~/Downloads"
//!
//! [analysis]
//! threshold = "5MiB"
//! strict = false
//!
//! [output]
//! export = true
//! file_name = "folder_analysis.txt"
//! verbose = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Top-level configuration file structure.
///
/// Every field is optional so the CLI layer can tell which values were
/// actually present in the file.
#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    /// Folder to analyze when none is given on the command line
    pub dir: Option<PathBuf>,

    /// Analysis options
    #[serde(default)]
    pub analysis: FileAnalysisConfig,

    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,
}

/// `[analysis]` section.
#[derive(Deserialize, Default, Debug)]
pub struct FileAnalysisConfig {
    /// Minimum reported size (e.g. `"5MiB"`, `"10MB"`)
    pub threshold: Option<String>,

    /// Abort on the first filesystem error instead of skipping the entry
    pub strict: Option<bool>,
}

/// `[output]` section.
#[derive(Deserialize, Default, Debug)]
pub struct FileOutputConfig {
    /// Whether to write the report into the analyzed folder
    pub export: Option<bool>,

    /// Name of the exported report file
    pub file_name: Option<String>,

    /// Whether to print skipped entries
    pub verbose: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest)),
        Err(_) => path.to_path_buf(),
    }
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// `None` if the platform has no notion of a config directory.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("folder-sizer").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not
    /// valid TOML for this structure.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }

    /// Directory from the config file, with `~` expanded.
    #[must_use]
    pub fn directory(&self) -> Option<PathBuf> {
        self.dir.as_deref().map(expand_tilde)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_config() {
        let config = FileConfig::default();

        assert!(config.dir.is_none());
        assert!(config.analysis.threshold.is_none());
        assert!(config.analysis.strict.is_none());
        assert!(config.output.export.is_none());
        assert!(config.output.file_name.is_none());
        assert!(config.output.verbose.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
dir = "~/Downloads"

[analysis]
threshold = "10MB"
strict = true

[output]
export = false
file_name = "sizes.txt"
verbose = true
"#;

        let config: FileConfig = toml::from_str(toml_content).unwrap();

        assert_eq!(config.dir, Some(PathBuf::from("~/Downloads")));
        assert_eq!(config.analysis.threshold.as_deref(), Some("10MB"));
        assert_eq!(config.analysis.strict, Some(true));
        assert_eq!(config.output.export, Some(false));
        assert_eq!(config.output.file_name.as_deref(), Some("sizes.txt"));
        assert_eq!(config.output.verbose, Some(true));
    }

    #[test]
    fn test_parse_partial_config() {
        let config: FileConfig = toml::from_str("[analysis]\nthreshold = \"1GiB\"\n").unwrap();

        assert!(config.dir.is_none());
        assert_eq!(config.analysis.threshold.as_deref(), Some("1GiB"));
        assert!(config.analysis.strict.is_none());
        assert!(config.output.export.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.dir.is_none());
    }

    #[test]
    fn test_malformed_config_errors() {
        let result = toml::from_str::<FileConfig>("[output]\nexport = \"yes please\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "dir = \"/data\"\n[output]\nverbose = true\n").unwrap();

        let config = FileConfig::load_from(&path).unwrap();

        assert_eq!(config.dir, Some(PathBuf::from("/data")));
        assert_eq!(config.output.verbose, Some(true));
    }

    #[test]
    fn test_load_from_malformed_file_mentions_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "dir = [").unwrap();

        let err = FileConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(FileConfig::load_from(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_config_path_returns_expected_suffix() {
        if let Some(p) = FileConfig::config_path() {
            assert!(p.ends_with(Path::new("folder-sizer").join("config.toml")));
        }
    }

    #[test]
    fn test_directory_expands_tilde() {
        let config = FileConfig {
            dir: Some(PathBuf::from("~/Downloads")),
            ..FileConfig::default()
        };

        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.directory(), Some(home.join("Downloads")));
        }
    }

    #[test]
    fn test_expand_tilde_absolute_path_unchanged() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(expand_tilde(&path), path);
    }

    #[test]
    fn test_expand_tilde_relative_path_unchanged() {
        let path = PathBuf::from("relative/path");
        assert_eq!(expand_tilde(&path), path);
    }

    #[test]
    fn test_expand_tilde_bare() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }
}
