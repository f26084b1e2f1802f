//! Best-effort category classification.
//!
//! Maps rule identifiers, tags, and CWE ids onto a small set of
//! human-meaningful vulnerability categories. This is a heuristic, not
//! a taxonomy: candidates are matched by substring, first match wins,
//! and anything unmatched keeps its own name so no information is
//! discarded. One finding may legitimately land in several categories
//! (its rule name and its CWE id count separately) — the aggregate view
//! wants both.

use crate::model::RawIssue;

/// Candidates shorter than this carry no classifiable signal.
const MIN_CANDIDATE_LEN: usize = 2;

/// All distinct categories one issue contributes to, in first-seen
/// order. The same category never appears twice for one issue.
pub fn contributions(issue: &RawIssue) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for candidate in candidates(issue) {
        if let Some(category) = classify_candidate(&candidate, issue.rule_id.as_deref()) {
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
    }
    categories
}

/// Candidate strings in priority order: rule id, tags, kind, nested
/// problem category, CWE id.
fn candidates(issue: &RawIssue) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(rule_id) = &issue.rule_id {
        out.push(rule_id.clone());
    }
    out.extend(issue.tags.iter().cloned());
    if let Some(kind) = &issue.kind {
        out.push(kind.clone());
    }
    if let Some(problem_category) = &issue.problem_category {
        out.push(problem_category.clone());
    }
    if let Some(cwe_id) = &issue.cwe_id {
        out.push(cwe_id.clone());
    }
    out
}

/// Map one candidate onto a category name, or `None` when the candidate
/// is too short to mean anything.
pub fn classify_candidate(candidate: &str, rule_id: Option<&str>) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.len() < MIN_CANDIDATE_LEN {
        return None;
    }
    let folded = candidate.to_lowercase();

    let category = if folded.contains("sql") {
        "SQL Injection".to_string()
    } else if folded.contains("xss") || folded.contains("cross-site") {
        // "cross-site-request" also lands here; the csrf branch below
        // only ever fires on the literal "csrf".
        "XSS".to_string()
    } else if folded.contains("auth") || folded.contains("access") {
        "Authentication/Authorization".to_string()
    } else if folded.contains("secret")
        || folded.contains("credential")
        || folded.contains("token")
        || folded.contains("hardcoded")
    {
        "Hardcoded Secrets".to_string()
    } else if folded.contains("injection") {
        "Injection".to_string()
    } else if folded.contains("csrf") {
        "CSRF".to_string()
    } else if folded.contains("crypto") || folded.contains("encryption") {
        "Cryptography".to_string()
    } else if folded.contains("path") && folded.contains("traversal") {
        "Path Traversal".to_string()
    } else if folded.starts_with("cwe") {
        candidate.to_uppercase()
    } else if folded.contains("security") || folded.contains("vulnerability") {
        // Generic marker with nothing more specific: fall back to the
        // rule id so related findings still group together.
        rule_id.unwrap_or(candidate).to_string()
    } else {
        candidate.to_string()
    };
    Some(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ToolSource;

    fn classify(candidate: &str) -> Option<String> {
        classify_candidate(candidate, None)
    }

    #[test]
    fn named_categories_match_by_substring() {
        assert_eq!(classify("sqli-taint-01").as_deref(), Some("SQL Injection"));
        assert_eq!(classify("reflected-xss").as_deref(), Some("XSS"));
        assert_eq!(classify("cross-site-scripting").as_deref(), Some("XSS"));
        assert_eq!(
            classify("broken-access-control").as_deref(),
            Some("Authentication/Authorization")
        );
        assert_eq!(
            classify("hardcoded-password").as_deref(),
            Some("Hardcoded Secrets")
        );
        assert_eq!(classify("command-injection").as_deref(), Some("Injection"));
        assert_eq!(classify("csrf-missing-check").as_deref(), Some("CSRF"));
        assert_eq!(classify("weak-encryption").as_deref(), Some("Cryptography"));
        assert_eq!(
            classify("path-traversal-read").as_deref(),
            Some("Path Traversal")
        );
    }

    #[test]
    fn sql_wins_over_generic_injection() {
        assert_eq!(classify("sql-injection").as_deref(), Some("SQL Injection"));
    }

    #[test]
    fn cwe_candidates_become_uppercase_identifiers() {
        assert_eq!(classify("cwe-798").as_deref(), Some("CWE-798"));
        assert_eq!(classify("CWE-352").as_deref(), Some("CWE-352"));
    }

    #[test]
    fn generic_security_marker_falls_back_to_rule_id() {
        assert_eq!(
            classify_candidate("security", Some("my-rule")).as_deref(),
            Some("my-rule")
        );
        // Without a rule id the marker itself is the best we have.
        assert_eq!(classify("vulnerability").as_deref(), Some("vulnerability"));
    }

    #[test]
    fn unmatched_candidates_keep_their_own_name() {
        assert_eq!(classify("buffer-overflow").as_deref(), Some("buffer-overflow"));
    }

    #[test]
    fn short_candidates_are_ignored() {
        assert_eq!(classify("x"), None);
        assert_eq!(classify(" "), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn one_issue_can_contribute_to_several_categories() {
        let mut issue = RawIssue::new(ToolSource::SastInterchange);
        issue.rule_id = Some("sql-injection-1".to_string());
        issue.cwe_id = Some("CWE-89".to_string());
        assert_eq!(contributions(&issue), vec!["SQL Injection", "CWE-89"]);
    }

    #[test]
    fn duplicate_categories_count_once_per_issue() {
        let mut issue = RawIssue::new(ToolSource::SastInterchange);
        issue.rule_id = Some("sql-injection-1".to_string());
        issue.tags = vec!["sqli".to_string()];
        assert_eq!(contributions(&issue), vec!["SQL Injection"]);
    }

    #[test]
    fn candidate_order_is_rule_tags_kind_problem_cwe() {
        let mut issue = RawIssue::new(ToolSource::SastInterchange);
        issue.tags = vec!["crypto".to_string()];
        issue.kind = Some("xss".to_string());
        issue.cwe_id = Some("CWE-79".to_string());
        assert_eq!(contributions(&issue), vec!["Cryptography", "XSS", "CWE-79"]);
    }
}
