//! Reduction of raw scanner records to the canonical finding shape.
//!
//! Each submodule handles one axis of the reduction: `severity` maps
//! tool vocabularies onto the four buckets, `category` classifies
//! findings into human-meaningful groups, `location` resolves display
//! paths. `normalize` ties them together, one finding per raw issue.

pub mod category;
pub mod location;
pub mod severity;

use crate::model::{NormalizedFinding, RawIssue};

/// Category recorded when a finding offers nothing to classify on.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Normalize one raw issue. Total: every issue yields a finding, however
/// little the scanner gave us.
pub fn normalize(issue: &RawIssue) -> NormalizedFinding {
    let categories = category::contributions(issue);
    let category = categories
        .first()
        .cloned()
        .or_else(|| issue.rule_id.clone())
        .unwrap_or_else(|| UNCATEGORIZED.to_string());
    let first_location = issue.locations.first();

    NormalizedFinding {
        severity: severity::normalize(issue),
        category,
        categories,
        file: location::resolve_file(first_location),
        start_line: first_location.and_then(|l| l.start_line),
        end_line: first_location.and_then(|l| l.end_line),
        rule_id: issue.rule_id.clone(),
        source: issue.source,
        message: issue.message.clone(),
    }
}

/// Normalize a whole batch, order preserved.
pub fn normalize_all(issues: &[RawIssue]) -> Vec<NormalizedFinding> {
    issues.iter().map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawLocation, Severity, ToolSource};

    #[test]
    fn bare_issue_gets_all_fallbacks() {
        let issue = RawIssue::new(ToolSource::SastInterchange);
        let finding = normalize(&issue);
        assert_eq!(finding.severity, Severity::Low);
        assert_eq!(finding.category, UNCATEGORIZED);
        assert!(finding.categories.is_empty());
        assert_eq!(finding.file, "unknown");
    }

    #[test]
    fn rule_id_drives_category_and_identity() {
        let mut issue = RawIssue::new(ToolSource::SastInterchange);
        issue.rule_id = Some("sql-injection-1".to_string());
        issue.level = Some("error".to_string());
        issue.locations = vec![RawLocation {
            file: Some("/tmp/tmpX/app.py".to_string()),
            start_line: Some(10),
            end_line: None,
        }];

        let finding = normalize(&issue);
        assert_eq!(finding.severity, Severity::Critical);
        assert_eq!(finding.category, "SQL Injection");
        assert_eq!(finding.file, "/app.py");
        assert_eq!(finding.start_line, Some(10));
    }
}
