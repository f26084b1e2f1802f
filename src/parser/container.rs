//! Adapter for container-image vulnerability reports.
//!
//! Accepts a JSON array of per-package items, or an object wrapping the
//! array under `vulnerabilities`. Field names vary between scanner
//! versions (`pkg_name` vs `name`, `vulnerability_id` vs `cve`), so
//! both spellings are read. Severity is already a word here and is
//! carried through for the normalizer to case-fold.

use serde_json::Value;

use super::text_field;
use crate::model::{RawIssue, ToolSource};

/// Parse a container-scan report into raw issues, order preserved.
pub fn parse(text: &str) -> Vec<RawIssue> {
    let document: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "container payload is not valid JSON, dropping");
            return Vec::new();
        }
    };

    let items = match &document {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => document
            .get("vulnerabilities")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };
    if items.is_empty() {
        tracing::debug!("container payload carries no vulnerability items");
    }

    items.iter().map(extract_issue).collect()
}

fn extract_issue(item: &Value) -> RawIssue {
    let mut issue = RawIssue::new(ToolSource::ContainerScan);

    let package = text_field(item, "pkg_name").or_else(|| text_field(item, "name"));
    let version =
        text_field(item, "installed_version").or_else(|| text_field(item, "version"));
    let fixed = text_field(item, "fixed_version");

    issue.rule_id =
        text_field(item, "vulnerability_id").or_else(|| text_field(item, "cve"));
    issue.severity = text_field(item, "severity");
    issue.message = describe(package.as_deref(), version.as_deref(), fixed.as_deref());

    issue
}

fn describe(package: Option<&str>, version: Option<&str>, fixed: Option<&str>) -> String {
    let mut message = match (package, version) {
        (Some(package), Some(version)) => format!("{package} {version}"),
        (Some(package), None) => package.to_string(),
        _ => "unidentified package".to_string(),
    };
    if let Some(fixed) = fixed {
        message.push_str(&format!(" (fixed in {fixed})"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_with_either_field_spelling() {
        let report = r#"[
            {"pkg_name": "openssl", "installed_version": "1.1.1",
             "severity": "CRITICAL", "vulnerability_id": "CVE-2023-0001",
             "fixed_version": "1.1.1t"},
            {"name": "zlib", "version": "1.2.11", "severity": "low", "cve": "CVE-2022-0002"}
        ]"#;
        let issues = parse(report);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].rule_id.as_deref(), Some("CVE-2023-0001"));
        assert_eq!(issues[0].severity.as_deref(), Some("CRITICAL"));
        assert_eq!(issues[0].message, "openssl 1.1.1 (fixed in 1.1.1t)");
        assert_eq!(issues[1].rule_id.as_deref(), Some("CVE-2022-0002"));
        assert_eq!(issues[1].message, "zlib 1.2.11");
    }

    #[test]
    fn accepts_wrapped_array() {
        let report = r#"{"vulnerabilities": [{"name": "curl", "severity": "high"}]}"#;
        let issues = parse(report);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity.as_deref(), Some("high"));
    }

    #[test]
    fn malformed_payloads_yield_empty() {
        assert!(parse("not json").is_empty());
        assert!(parse("42").is_empty());
        assert!(parse("{}").is_empty());
        assert!(parse("[]").is_empty());
    }

    #[test]
    fn item_with_nothing_recognizable_still_yields_a_record() {
        let issues = parse(r#"[{"weird": true}]"#);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "unidentified package");
        assert!(issues[0].severity.is_none());
    }
}
