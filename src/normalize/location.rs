//! Display-path resolution.
//!
//! Scan jobs clone the repository into a freshly randomized temp
//! directory on every run, so raw paths look like
//! `/tmp/tmpf3a9c1/src/app.py` and never compare equal across runs.
//! Stripping the temp root plus its single opaque component makes
//! hot-spot identity stable.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::RawLocation;

/// Placeholder when the scanner gave no path at all.
pub const UNKNOWN_FILE: &str = "unknown";

/// Temp root followed by one opaque directory component.
static TEMP_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/tmp/[^/]+").expect("temp prefix pattern"));

/// Resolve the display path for a location.
pub fn resolve_file(location: Option<&RawLocation>) -> String {
    match location.and_then(|l| l.file.as_deref()).filter(|f| !f.is_empty()) {
        Some(path) => strip_temp_prefix(path),
        None => UNKNOWN_FILE.to_string(),
    }
}

/// Strip an ephemeral clone prefix, leaving the remainder rooted at `/`.
/// Paths without the prefix come back unchanged.
pub fn strip_temp_prefix(path: &str) -> String {
    let stripped = TEMP_PREFIX.replace(path, "");
    if stripped.is_empty() {
        "/".to_string()
    } else {
        stripped.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_clone_prefix_is_stripped() {
        assert_eq!(strip_temp_prefix("/tmp/tmpabc123/src/app.py"), "/src/app.py");
        assert_eq!(strip_temp_prefix("/tmp/x9/lib/db.rs"), "/lib/db.rs");
    }

    #[test]
    fn ordinary_paths_pass_through() {
        assert_eq!(strip_temp_prefix("/src/app.py"), "/src/app.py");
        assert_eq!(strip_temp_prefix("src/app.py"), "src/app.py");
        assert_eq!(strip_temp_prefix("https://app.example/login"), "https://app.example/login");
    }

    #[test]
    fn missing_paths_resolve_to_unknown() {
        assert_eq!(resolve_file(None), UNKNOWN_FILE);
        assert_eq!(resolve_file(Some(&RawLocation::default())), UNKNOWN_FILE);
        let empty = RawLocation {
            file: Some(String::new()),
            ..RawLocation::default()
        };
        assert_eq!(resolve_file(Some(&empty)), UNKNOWN_FILE);
    }

    #[test]
    fn bare_temp_directory_resolves_to_root() {
        assert_eq!(strip_temp_prefix("/tmp/tmpabc123"), "/");
    }
}
