//! Command-line interface definition and argument parsing.
//!
//! This module defines the command-line arguments with
//! [clap](https://docs.rs/clap/). Helper methods on [`Cli`] take a
//! [`FileConfig`] so that config-file values act as defaults that arguments
//! can override (layered config).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use folder_sizer::config::{
    AnalysisOptions, DEFAULT_EXPORT_FILE_NAME, DEFAULT_THRESHOLD, ErrorPolicy, FileConfig,
    OutputOptions,
};
use folder_sizer::utils::parse_size;

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser, Debug)]
#[command(name = "folder-sizer")]
#[command(
    about = "Summarize folder sizes by file type and depth, listing only what reaches a size threshold"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Folder to analyze
    ///
    /// Falls back to `dir` from the config file, then to an interactive prompt.
    dir: Option<PathBuf>,

    /// Minimum size for a file or folder to be listed
    ///
    /// Supports decimal (KB, MB, GB, TB) and binary (KiB, MiB, GiB, TiB)
    /// units as well as plain byte counts. Defaults to 5MiB.
    #[arg(short = 't', long)]
    threshold: Option<String>,

    /// Abort on the first unreadable file or folder instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Don't write the report into the analyzed folder
    #[arg(long)]
    no_export: bool,

    /// File name of the exported report
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Print entries that were skipped because they could not be read
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// Suppresses the spinner, colors and the exported text file.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Resolve the folder to analyze.
    ///
    /// Priority: CLI argument > config file `dir`. `None` means the caller
    /// should prompt for one.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> Option<PathBuf> {
        self.dir.clone().or_else(|| config.directory())
    }

    /// Extract analysis options from CLI args and config file.
    ///
    /// - **threshold**: CLI > config > 5 MiB
    /// - **strict**: CLI flag `||` config value `||` `false`
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold cannot be parsed.
    pub fn analysis_options(&self, config: &FileConfig) -> Result<AnalysisOptions> {
        let threshold = match self
            .threshold
            .as_deref()
            .or(config.analysis.threshold.as_deref())
        {
            Some(raw) => parse_size(raw).with_context(|| format!("Invalid threshold '{raw}'"))?,
            None => DEFAULT_THRESHOLD,
        };

        Ok(AnalysisOptions {
            threshold,
            error_policy: ErrorPolicy::from_strict(
                self.strict || config.analysis.strict.unwrap_or(false),
            ),
        })
    }

    /// Extract output options from CLI args and config file.
    ///
    /// `--no-export` and `--json` both disable the export regardless of the
    /// config file.
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        OutputOptions {
            export: !self.no_export && !self.json && config.output.export.unwrap_or(true),
            file_name: self
                .output
                .clone()
                .or_else(|| config.output.file_name.clone())
                .unwrap_or_else(|| DEFAULT_EXPORT_FILE_NAME.to_string()),
            verbose: self.verbose || config.output.verbose.unwrap_or(false),
            json: self.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folder_sizer::config::file::{FileAnalysisConfig, FileOutputConfig};

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["folder-sizer"]);
        let config = FileConfig::default();

        assert!(args.subcommand.is_none());
        assert!(args.directory(&config).is_none());
        assert!(!args.json());

        let analysis = args.analysis_options(&config).unwrap();
        assert_eq!(analysis.threshold, 5 * 1024 * 1024);
        assert_eq!(analysis.error_policy, ErrorPolicy::Skip);

        let output = args.output_options(&config);
        assert!(output.export);
        assert!(!output.verbose);
        assert!(!output.json);
        assert_eq!(output.file_name, "folder_analysis.txt");
    }

    #[test]
    fn test_positional_directory() {
        let args = Cli::parse_from(["folder-sizer", "/tmp/data"]);
        assert_eq!(
            args.directory(&FileConfig::default()),
            Some(PathBuf::from("/tmp/data"))
        );
    }

    #[test]
    fn test_cli_directory_overrides_config() {
        let config = FileConfig {
            dir: Some(PathBuf::from("/from/config")),
            ..FileConfig::default()
        };

        let args = Cli::parse_from(["folder-sizer", "/from/cli"]);
        assert_eq!(args.directory(&config), Some(PathBuf::from("/from/cli")));

        let args = Cli::parse_from(["folder-sizer"]);
        assert_eq!(args.directory(&config), Some(PathBuf::from("/from/config")));
    }

    #[test]
    fn test_threshold_flag() {
        let config = FileConfig::default();

        let args = Cli::parse_from(["folder-sizer", "--threshold", "10MB"]);
        assert_eq!(args.analysis_options(&config).unwrap().threshold, 10_000_000);

        let args = Cli::parse_from(["folder-sizer", "-t", "1GiB"]);
        assert_eq!(
            args.analysis_options(&config).unwrap().threshold,
            1_073_741_824
        );
    }

    #[test]
    fn test_invalid_threshold_errors() {
        let args = Cli::parse_from(["folder-sizer", "--threshold", "lots"]);
        let err = args.analysis_options(&FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_threshold_from_config() {
        let config = FileConfig {
            analysis: FileAnalysisConfig {
                threshold: Some("100KiB".to_string()),
                strict: Some(true),
            },
            ..FileConfig::default()
        };

        let args = Cli::parse_from(["folder-sizer"]);
        let opts = args.analysis_options(&config).unwrap();
        assert_eq!(opts.threshold, 102_400);
        assert_eq!(opts.error_policy, ErrorPolicy::Abort);

        let args = Cli::parse_from(["folder-sizer", "-t", "1KB"]);
        assert_eq!(args.analysis_options(&config).unwrap().threshold, 1_000);
    }

    #[test]
    fn test_strict_flag() {
        let args = Cli::parse_from(["folder-sizer", "--strict"]);
        assert_eq!(
            args.analysis_options(&FileConfig::default())
                .unwrap()
                .error_policy,
            ErrorPolicy::Abort
        );
    }

    #[test]
    fn test_output_flags() {
        let config = FileConfig::default();
        let args = Cli::parse_from([
            "folder-sizer",
            "--no-export",
            "-o",
            "report.txt",
            "--verbose",
        ]);
        let output = args.output_options(&config);

        assert!(!output.export);
        assert!(output.verbose);
        assert_eq!(output.file_name, "report.txt");
    }

    #[test]
    fn test_json_disables_export() {
        let args = Cli::parse_from(["folder-sizer", "--json"]);
        let output = args.output_options(&FileConfig::default());

        assert!(args.json());
        assert!(output.json);
        assert!(!output.export);
    }

    #[test]
    fn test_output_options_from_config() {
        let config = FileConfig {
            output: FileOutputConfig {
                export: Some(false),
                file_name: Some("sizes.txt".to_string()),
                verbose: Some(true),
            },
            ..FileConfig::default()
        };

        let output = Cli::parse_from(["folder-sizer"]).output_options(&config);
        assert!(!output.export);
        assert!(output.verbose);
        assert_eq!(output.file_name, "sizes.txt");

        let output = Cli::parse_from(["folder-sizer", "-o", "cli.txt"]).output_options(&config);
        assert_eq!(output.file_name, "cli.txt");
    }

    #[test]
    fn test_config_subcommands() {
        let args = Cli::parse_from(["folder-sizer", "config", "path"]);
        assert!(matches!(
            args.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Path
            })
        ));

        let args = Cli::parse_from(["folder-sizer", "config", "init"]);
        assert!(matches!(
            args.subcommand,
            Some(Commands::Config {
                command: ConfigCommand::Init
            })
        ));
    }
}
