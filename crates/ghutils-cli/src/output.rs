//! Terminal output formatting utilities.

use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use ghutils_github::checks::Bucket;

static QUIET_MODE: AtomicBool = AtomicBool::new(false);

/// Set quiet mode globally. Call once at startup.
pub fn set_quiet(quiet: bool) {
    QUIET_MODE.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET_MODE.load(Ordering::Relaxed)
}

/// Print a success message (suppressed in quiet mode).
pub fn success(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), msg);
    }
}

/// Print an error message (always prints to stderr).
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a warning message (always prints to stderr).
pub fn warn(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print an info message (suppressed in quiet mode).
pub fn info(msg: &str) {
    if !is_quiet() {
        println!("{} {}", "→".blue(), msg);
    }
}

/// Print a detail line without prefix (suppressed in quiet mode).
///
/// Use for indented detail lines that accompany info or warn messages.
pub fn detail(msg: &str) {
    if !is_quiet() {
        println!("{msg}");
    }
}

/// Print essential machine-readable output (always prints).
///
/// Use for results that should be available for piping, like repository names.
pub fn essential(msg: &str) {
    println!("{msg}");
}

/// Get the status indicator for a check bucket.
#[must_use]
pub fn check_indicator(bucket: Bucket) -> String {
    match bucket {
        Bucket::Successful => "●".green().to_string(),
        Bucket::Failing => "●".red().to_string(),
        Bucket::Running => "●".yellow().to_string(),
        Bucket::Skipped | Bucket::Neutral => "○".dimmed().to_string(),
    }
}

/// Print a horizontal line (suppressed in quiet mode).
pub fn hr() {
    if !is_quiet() {
        println!("{}", "─".repeat(50).dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_indicator_colors_match_bucket() {
        colored::control::set_override(true);

        assert_eq!(check_indicator(Bucket::Successful), "●".green().to_string());
        assert_eq!(check_indicator(Bucket::Failing), "●".red().to_string());
        assert_eq!(check_indicator(Bucket::Running), "●".yellow().to_string());
        assert_eq!(check_indicator(Bucket::Skipped), "○".dimmed().to_string());
        assert_eq!(
            check_indicator(Bucket::Neutral),
            check_indicator(Bucket::Skipped)
        );

        colored::control::set_override(false);
    }

    #[test]
    fn test_quiet_mode_default() {
        // Reset to default state
        set_quiet(false);
        assert!(!is_quiet());
    }

    #[test]
    fn test_quiet_mode_enabled() {
        set_quiet(true);
        assert!(is_quiet());
        // Reset
        set_quiet(false);
    }
}
