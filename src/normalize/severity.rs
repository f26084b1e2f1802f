//! Severity normalization across tool vocabularies.
//!
//! Each tool speaks its own dialect: interchange levels (`error`,
//! `warning`, `note`), numeric security-severity scores, ranks, plain
//! severity words, tag keywords, and the dynamic family's 0–4 risk
//! codes. All of them land on the same four buckets here. The mapping
//! is total and pure: any input resolves to exactly one bucket, with
//! `Low` as the floor for anything unrecognizable.

use crate::model::{RawIssue, Severity, ToolSource};

/// Keywords that make a tag usable as a severity token.
const TAG_KEYWORDS: [&str; 9] = [
    "critical", "error", "high", "warning", "medium", "moderate", "note", "low", "info",
];

/// Resolve the canonical severity for one raw issue.
pub fn normalize(issue: &RawIssue) -> Severity {
    if issue.source == ToolSource::DynamicScan {
        return match issue.risk_code {
            Some(code) => from_risk_code(code),
            None => Severity::Low,
        };
    }
    match first_token(issue) {
        Some(token) => from_token(&token),
        None => Severity::Low,
    }
}

/// Severity-bearing fields in priority order; the first non-empty one
/// wins. An empty string does not count as present.
fn first_token(issue: &RawIssue) -> Option<String> {
    let present = |field: &Option<String>| {
        field
            .as_deref()
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    };
    present(&issue.level)
        .or_else(|| present(&issue.security_severity))
        .or_else(|| present(&issue.rank))
        .or_else(|| present(&issue.severity))
        .or_else(|| tag_token(&issue.tags))
}

/// First tag carrying a severity keyword, if any.
fn tag_token(tags: &[String]) -> Option<String> {
    tags.iter()
        .find(|tag| {
            let folded = tag.to_lowercase();
            TAG_KEYWORDS.iter().any(|keyword| folded.contains(keyword))
        })
        .cloned()
}

/// Case-folded token mapping onto the four buckets.
pub fn from_token(token: &str) -> Severity {
    let folded = token.to_lowercase();
    if folded == "error" || folded.contains("critical") {
        Severity::Critical
    } else if folded == "warning" || folded.contains("high") {
        Severity::High
    } else if folded == "note" || folded == "moderate" || folded.contains("medium") {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// 0–4 risk code mapping. Code 0 is informational and folds into `Low`
/// for aggregation.
pub fn from_risk_code(code: u8) -> Severity {
    match code {
        4 => Severity::Critical,
        3 => Severity::High,
        2 => Severity::Medium,
        _ => Severity::Low,
    }
}
