//! # folder-sizer
//!
//! Summarize which folders and file types take up space in a directory tree.
//!
//! The tool walks a folder recursively, lists every subfolder and file type
//! that reaches a size threshold (5 MiB by default), prints a depth-indented
//! report headed by a global file-type summary and saves it as
//! `folder_analysis.txt` inside the analyzed folder.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze a folder
//! folder-sizer ~/Downloads
//!
//! # Prompt for the folder
//! folder-sizer
//!
//! # Lower the threshold and skip the export
//! folder-sizer ~/Downloads --threshold 1MiB --no-export
//! ```

mod cli;

use std::{
    io::{self, BufRead, IsTerminal},
    path::{Path, PathBuf},
    process::exit,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use folder_sizer::{
    Analysis, Analyzer, OutputOptions,
    config::{FileConfig, file::expand_tilde},
    output::JsonOutput,
};
use humansize::{BINARY, format_size};
use inquire::Text;

/// Entry point for the folder-sizer application.
///
/// Errors from [`inner_main`] are printed to stderr and the process exits
/// with status 1.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err:#}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parse arguments, resolve the folder, analyze it and print or export the
/// report.
///
/// # Errors
///
/// Returns errors from argument resolution, the interactive prompt, the
/// analysis in strict mode, JSON serialization or the export.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config(args.json());

    let analysis_options = args.analysis_options(&file_config)?;
    let output_options = args.output_options(&file_config);
    let json_mode = output_options.json;

    let root = match args.directory(&file_config) {
        Some(dir) => dir,
        None if json_mode => bail!("A folder must be given when using --json"),
        None => prompt_for_directory()?,
    };
    validate_root(&root)?;

    let analysis = Analyzer::new(analysis_options)
        .with_quiet(json_mode)
        .run(&root)?;

    if json_mode {
        let output = JsonOutput::from_analysis(&analysis);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_warnings(&analysis, &output_options);
    print_report(&analysis, &output_options)
}

// ── Helper functions ────────────────────────────────────────────────────

/// Ask for the folder to analyze.
///
/// Uses an interactive prompt on a terminal and reads one line from stdin
/// otherwise, so `echo ~/Downloads | folder-sizer` works.
fn prompt_for_directory() -> Result<PathBuf> {
    let stdin = io::stdin();
    let answer = if stdin.is_terminal() {
        Text::new("Enter the path to the folder:")
            .prompt()
            .context("Failed to read the folder path")?
    } else {
        read_directory_line(stdin.lock())?
    };

    Ok(expand_tilde(Path::new(answer.trim())))
}

/// Read the folder path from the first line of non-interactive input.
fn read_directory_line(mut input: impl BufRead) -> Result<String> {
    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Failed to read the folder path from stdin")?;

    if line.trim().is_empty() {
        bail!("No folder given: pass one as an argument or on stdin");
    }
    Ok(line)
}

/// Make sure the root exists and is a directory.
fn validate_root(root: &Path) -> Result<()> {
    if !root.exists() {
        bail!("Folder '{}' does not exist", root.display());
    }
    if !root.is_dir() {
        bail!("'{}' is not a folder", root.display());
    }
    Ok(())
}

/// Print entries that were skipped, when verbose.
fn print_warnings(analysis: &Analysis, opts: &OutputOptions) {
    if analysis.warnings.is_empty() {
        return;
    }

    if opts.verbose {
        for warning in &analysis.warnings {
            eprintln!("{}", warning.red());
        }
    } else {
        eprintln!(
            "{} {} entries could not be read (use --verbose to list them)",
            "Warning:".yellow(),
            analysis.warnings.len()
        );
    }
}

/// Print the report and export it, or say that nothing was large enough.
fn print_report(analysis: &Analysis, opts: &OutputOptions) -> Result<()> {
    if analysis.is_empty() {
        println!(
            "{}",
            format!(
                "No files or folders larger than {} in '{}'.",
                format_size(analysis.threshold, BINARY),
                analysis.root.display()
            )
            .green()
        );
        return Ok(());
    }

    println!("{}", analysis.to_text());

    if opts.export {
        let path = analysis.export(&opts.file_name)?;
        println!(
            "{} {}",
            "Analysis exported to".green(),
            path.display().to_string().bold()
        );
    }

    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e:#}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

// ── Config subcommand ───────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# folder-sizer configuration
# All values shown are their defaults. Uncomment and change as needed.

# Folder to analyze when none is given (prompts when not set)
# dir = "~/Downloads"

[analysis]
# Minimum size for a file or folder to be listed (e.g. "5MiB", "10MB", "1GiB")
# threshold = "5MiB"

# Abort on the first unreadable entry instead of skipping it
# strict = false

[output]
# Write the report into the analyzed folder
# export = true

# Name of the exported report
# file_name = "folder_analysis.txt"

# List entries that could not be read
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a readable table, marking defaults.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let dir = config.dir.as_ref().map_or_else(
        || "(prompt)  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );

    format!(
        "\
dir        = {dir}

[analysis]
threshold  = {threshold}
strict     = {strict}

[output]
export     = {export}
file_name  = {file_name}
verbose    = {verbose}",
        threshold = show_str(config.analysis.threshold.as_deref(), "5MiB"),
        strict = show_bool(config.analysis.strict, false),
        export = show_bool(config.output.export, true),
        file_name = show_str(
            config.output.file_name.as_deref(),
            folder_sizer::config::DEFAULT_EXPORT_FILE_NAME
        ),
        verbose = show_bool(config.output.verbose, false),
    )
}

/// Write a default config template if no config file exists yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory {}", parent.display())
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}
