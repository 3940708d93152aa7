// src/utils/log.rs

//! Severity tiers layered over the `log` facade.
//!
//! `success` and `critical` have no direct `log::Level`; they map onto info
//! and error with a marker so they stand out in plain-text sinks.

use log::LevelFilter;

/// Set the runtime maximum level.
///
/// The binary installs its logger with every level enabled, and the
/// configured severity is applied here once the config has been read.
pub fn apply_severity(filter: LevelFilter) {
    log::set_max_level(filter);
}

/// Log a success message (info tier)
pub fn success(message: &str) {
    log::info!("✓ {}", message);
}

/// Log a run-aborting failure (error tier)
pub fn critical(message: &str) {
    log::error!("CRITICAL {}", message);
}

/// Log a header
pub fn header(title: &str) {
    let border = "═".repeat(60);
    log::info!("{}", border);
    log::info!("  {}", title);
    log::info!("{}", border);
}

/// Log a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    log::info!("[SUMMARY] {}", title);
    for line in summary_lines(items) {
        log::info!("{}", line);
    }
}

fn summary_lines(items: &[(&str, String)]) -> Vec<String> {
    items
        .iter()
        .map(|(key, value)| format!("    {}: {}", key, value))
        .collect()
}
