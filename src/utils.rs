/*!
 * Size conversion and threshold parsing utilities
 */

use std::io;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::error::Result;
use crate::{bail, ensure};

/// Binary size units, smallest to largest. Values beyond the table are
/// still reported in PiB.
const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Accepted threshold grammar: integer with optional binary unit suffix.
/// Decimal units (`KB`) are rejected, not silently accepted.
static THRESHOLD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)(B|KiB|MiB|GiB|TiB|PiB)?$").unwrap());

/// Format a byte count with binary units.
///
/// Exact at the boundaries: `0 -> "0 B"`, `512 -> "512 B"`,
/// `1024 -> "1 KiB"`, `1536 -> "1.5 KiB"`. Scaled values with a fractional
/// part are rounded to two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes / scale >= 1024 {
        unit += 1;
        scale *= 1024;
    }

    let value = bytes as f64 / scale as f64;
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{} {}", rounded as u64, UNITS[unit])
    } else {
        format!("{} {}", rounded, UNITS[unit])
    }
}

/// Format a byte count with the raw count appended, e.g. `1.5 KiB (1536 Bytes)`.
pub fn format_size_with_bytes(bytes: u64) -> String {
    format!("{} ({} Bytes)", format_size(bytes), bytes)
}

/// Checked size formatting for counts crossing an untrusted boundary.
/// Negative input is an invalid argument, never clamped to zero.
pub fn convert_size(bytes: i64) -> Result<String> {
    ensure!(bytes >= 0, InvalidArgument, "negative size: {}", bytes);
    Ok(format_size(bytes as u64))
}

/// Parse a threshold string such as `42`, `512B` or `10MiB` into bytes.
///
/// Bare integers are bytes. Anything outside the grammar (decimals,
/// whitespace, decimal units) is an invalid argument.
pub fn parse_threshold(input: &str) -> Result<u64> {
    let captures = match THRESHOLD_PATTERN.captures(input) {
        Some(c) => c,
        None => bail!(
            InvalidArgument,
            "invalid threshold '{}': expected an integer with optional B/KiB/MiB/GiB/TiB/PiB suffix",
            input
        ),
    };

    let value: u64 = match captures[1].parse() {
        Ok(v) => v,
        Err(_) => bail!(InvalidArgument, "threshold '{}' out of range", input),
    };

    let multiplier: u64 = match captures.get(2).map(|m| m.as_str()) {
        None | Some("B") => 1,
        Some("KiB") => 1 << 10,
        Some("MiB") => 1 << 20,
        Some("GiB") => 1 << 30,
        Some("TiB") => 1 << 40,
        Some("PiB") => 1 << 50,
        // Unreachable given the pattern, kept for exhaustiveness
        Some(other) => bail!(InvalidArgument, "unknown size unit '{}'", other),
    };

    match value.checked_mul(multiplier) {
        Some(bytes) => Ok(bytes),
        None => bail!(InvalidArgument, "threshold '{}' overflows u64", input),
    }
}

/// Count regular files below `dir` for progress tracking. Symlinks are not
/// followed and unreadable subtrees are simply not counted.
pub fn count_files(dir: &Path) -> io::Result<u64> {
    let mut count = 0;
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            count += 1;
        }
    }
    Ok(count)
}
