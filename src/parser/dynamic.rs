//! Adapter for dynamic web-scan alert lists.
//!
//! Accepts a JSON array of alerts, or an object wrapping the array
//! under `alerts`. The 0–4 `riskcode` is the sole severity source for
//! this family; `cweid` is normalized into a `CWE-<n>` classification
//! hint and instance URIs become locations.

use serde_json::Value;

use super::{text_field, value_to_text};
use crate::model::{RawIssue, RawLocation, ToolSource};

/// Parse a dynamic-scan alert list into raw issues, order preserved.
pub fn parse(text: &str) -> Vec<RawIssue> {
    let document: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "dynamic-scan payload is not valid JSON, dropping");
            return Vec::new();
        }
    };

    let alerts = match &document {
        Value::Array(alerts) => alerts.as_slice(),
        Value::Object(_) => document
            .get("alerts")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    };
    if alerts.is_empty() {
        tracing::debug!("dynamic-scan payload carries no alerts");
    }

    alerts.iter().map(extract_issue).collect()
}

fn extract_issue(alert: &Value) -> RawIssue {
    let mut issue = RawIssue::new(ToolSource::DynamicScan);

    issue.rule_id = text_field(alert, "name");
    issue.message = text_field(alert, "description").unwrap_or_default();
    issue.risk_code = alert
        .get("riskcode")
        .and_then(value_to_text)
        .and_then(|code| code.trim().parse::<u8>().ok());
    // "-1" is this scanner family's marker for "no CWE assigned"
    issue.cwe_id = text_field(alert, "cweid")
        .filter(|id| id != "-1")
        .map(|id| {
            if id.to_lowercase().starts_with("cwe") {
                id
            } else {
                format!("CWE-{id}")
            }
        });

    if let Some(instances) = alert.get("instances").and_then(Value::as_array) {
        issue.locations = instances
            .iter()
            .map(|instance| RawLocation {
                file: text_field(instance, "uri"),
                start_line: None,
                end_line: None,
            })
            .collect();
    }

    issue
}
