//! Size measurement, formatting and parsing utilities.
//!
//! This module measures directory trees on disk, renders byte counts in the
//! compact `12.34MB` style used by the report, and parses human-written size
//! strings such as `"5MiB"` for the threshold option.

use std::path::Path;

use anyhow::{Result, bail};
use walkdir::WalkDir;

use crate::config::ErrorPolicy;

/// Units used by [`format_size`], in increasing powers of 1024.
const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Calculate the total size of a directory and all its contents, in bytes.
///
/// Walks the whole subtree with `walkdir` and sums the length of every
/// regular file. Symbolic links are not followed and contribute nothing,
/// which also rules out link cycles.
///
/// Entries that cannot be read are handed to `policy`: with
/// [`ErrorPolicy::Skip`] they are recorded in `warnings` and ignored.
///
/// # Errors
///
/// With [`ErrorPolicy::Abort`], returns the first walk or metadata error.
pub fn calculate_dir_size(
    path: &Path,
    policy: ErrorPolicy,
    warnings: &mut Vec<String>,
) -> Result<u64> {
    let mut total = 0u64;

    for entry in WalkDir::new(path) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                policy.handle(format!("Failed to walk: {err}"), warnings)?;
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total += metadata.len(),
            Err(err) => policy.handle(
                format!("Failed to read size of {}: {err}", entry.path().display()),
                warnings,
            )?,
        }
    }

    Ok(total)
}

/// Format a byte count as `<value><unit>` with two decimals and no space.
///
/// The value is divided by 1024 until it drops below 1024, picking the unit
/// at that step. Anything that is still too large after `GB` is shown in
/// `TB`, however big.
///
/// # Examples
///
/// ```
/// # use folder_sizer::utils::format_size;
/// assert_eq!(format_size(0), "0.00B");
/// assert_eq!(format_size(1024), "1.00KB");
/// assert_eq!(format_size(5 * 1024 * 1024), "5.00MB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;

    for unit in &UNITS[..UNITS.len() - 1] {
        if size < 1024.0 {
            return format!("{size:.2}{unit}");
        }
        size /= 1024.0;
    }

    format!("{size:.2}{}", UNITS[UNITS.len() - 1])
}

/// Parse a human-readable size string into bytes.
///
/// Accepts plain byte counts and decimal (`KB`, `MB`, `GB`, `TB`) or binary
/// (`KiB`, `MiB`, `GiB`, `TiB`) units, case-insensitively, with an optional
/// fractional part of up to nine digits (`"2.5MiB"`). Whitespace between
/// number and unit is allowed.
///
/// # Errors
///
/// Returns an error for a missing or malformed number, an unknown unit, too
/// many decimal places, or a value that does not fit in a `u64`.
pub fn parse_size(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    if number.is_empty() {
        bail!("Invalid size '{input}': expected a number");
    }

    let multiplier = unit_multiplier(unit.trim())?;
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
        bail!("Invalid size '{input}': malformed number");
    }
    if fraction.len() > 9 {
        bail!("Invalid size '{input}': too many decimal places");
    }

    let whole: u128 = if whole.is_empty() { 0 } else { whole.parse()? };
    let fraction_value: u128 = if fraction.is_empty() {
        0
    } else {
        fraction.parse()?
    };
    let scale = 10u128.pow(u32::try_from(fraction.len())?);

    let bytes = whole
        .checked_mul(multiplier)
        .and_then(|b| b.checked_add(fraction_value * multiplier / scale))
        .ok_or_else(|| anyhow::anyhow!("Size value overflow: {input}"))?;

    u64::try_from(bytes).map_err(|_| anyhow::anyhow!("Size value overflow: {input}"))
}

/// Map a unit suffix to its multiplier.
fn unit_multiplier(unit: &str) -> Result<u128> {
    let multiplier = match unit.to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "KB" => 1_000,
        "MB" => 1_000_000,
        "GB" => 1_000_000_000,
        "TB" => 1_000_000_000_000,
        "KIB" => 1 << 10,
        "MIB" => 1 << 20,
        "GIB" => 1 << 30,
        "TIB" => 1 << 40,
        _ => bail!("Unknown size unit '{unit}'"),
    };

    Ok(multiplier)
}
