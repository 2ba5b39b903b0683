//! Formatting utilities for sizes, durations and bundle summaries.

use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;
use tack_bundler::{EmittedKind, WrittenBundle};

use super::{color_enabled, quiet};

/// Format a byte count with the closest unit.
///
/// ```
/// use tack_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit])
    }
}

/// Format a duration as `ms`, seconds, or minutes and seconds.
///
/// ```
/// use std::time::Duration;
/// use tack_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Print the files of a bundle run with their sizes.
pub fn print_bundle_summary(written: &WrittenBundle, elapsed: Duration) {
    if quiet() {
        return;
    }

    let width = (Term::stderr().size().1 as usize).clamp(20, 80);
    let rule = "─".repeat(width);

    for file in &written.files {
        let name = file
            .path
            .strip_prefix(&written.out_dir)
            .unwrap_or(&file.path)
            .display()
            .to_string();
        let size = format_size(file.size);
        let kind = match file.kind {
            EmittedKind::Chunk => "bundle",
            EmittedKind::SourceMap => "map",
            EmittedKind::Asset => "asset",
        };

        if color_enabled() {
            eprintln!(
                "  {} {} {} {}",
                "▸".blue(),
                name.bright_white().bold(),
                size.dimmed(),
                format!("({kind})").dimmed()
            );
        } else {
            eprintln!("  ▸ {} {} ({})", name, size, kind);
        }
    }

    let total = format!(
        "{} in {}",
        format_size(written.total_size()),
        format_duration(elapsed)
    );
    if color_enabled() {
        eprintln!("{}", rule.dimmed());
        eprintln!("  {} {}", "Total:".bold(), total.green());
    } else {
        eprintln!("{}", rule);
        eprintln!("  Total: {}", total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m 0s");
    }
}
