//! Output file naming: sanitized stems plus collision-free suffixes.

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicU64, Ordering};

static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9._-]").unwrap());

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Reduce a caller-supplied filename hint to a safe stem.
///
/// Strips any path components and a trailing `.json` extension
/// (case-insensitive), then replaces every remaining character outside
/// `[A-Za-z0-9._-]` with `_`. An empty result falls back to `converted`.
pub fn sanitize_stem(hint: &str) -> String {
    let base = hint.rsplit(['/', '\\']).next().unwrap_or(hint);
    let base = if base.to_ascii_lowercase().ends_with(".json") {
        &base[..base.len() - 5]
    } else {
        base
    };

    let cleaned = UNSAFE_CHARS.replace_all(base, "_");
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        String::from("converted")
    } else {
        cleaned.to_string()
    }
}

/// Derive a collision-free workbook name from the input name hint.
///
/// Combines the sanitized stem with a timestamp, the process id, and a
/// process-wide counter, so concurrent conversions into one destination
/// never overwrite each other.
pub fn output_file_name(hint: &str) -> String {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(
        "{}_{}_{}-{}.xlsx",
        sanitize_stem(hint),
        stamp,
        std::process::id(),
        seq
    )
}

/// Unique dot-prefixed name for staging a workbook before publication.
pub fn staging_file_name() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!(".sheetpress-{}-{}.xlsx", std::process::id(), seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_extension_and_path() {
        assert_eq!(sanitize_stem("report.json"), "report");
        assert_eq!(sanitize_stem("report.JSON"), "report");
        assert_eq!(sanitize_stem("uploads/2024/report.json"), "report");
        assert_eq!(sanitize_stem(r"C:\uploads\report.json"), "report");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_stem("my report (1).json"), "my_report__1_");
        assert_eq!(sanitize_stem("données.json"), "donn_es");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_stem(""), "converted");
        assert_eq!(sanitize_stem(".json"), "converted");
        assert_eq!(sanitize_stem("..."), "converted");
    }

    #[test]
    fn test_output_names_are_unique() {
        let a = output_file_name("report.json");
        let b = output_file_name("report.json");

        assert_ne!(a, b);
        assert!(a.starts_with("report_"));
        assert!(a.ends_with(".xlsx"));
    }

    #[test]
    fn test_staging_names_are_unique_and_hidden() {
        let a = staging_file_name();
        let b = staging_file_name();

        assert_ne!(a, b);
        assert!(a.starts_with('.'));
    }
}
