//! Parser for the static-analysis interchange document (`runs[0].results[]`).
//!
//! Two shape variants are normalized into one: the standard shape, where
//! a result carries `ruleId` and a structured `message`, and a variant
//! from one tool family that nests identification under a `rule` object.
//! Anything else passes through untouched and gets best-effort field
//! extraction, so a half-recognized result still yields a usable record.
//!
//! The parse fails soft: malformed JSON or a non-object top level yields
//! an empty record list, never an error.

use serde_json::Value;

use super::{text_field, value_to_text};
use crate::model::{RawIssue, RawLocation, ToolSource};

/// Parse an interchange document into raw issues, order preserved.
pub fn parse(text: &str) -> Vec<RawIssue> {
    let document: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "interchange payload is not valid JSON, dropping");
            return Vec::new();
        }
    };
    if !document.is_object() {
        tracing::debug!("interchange payload top level is not an object, dropping");
        return Vec::new();
    }

    let results = document
        .get("runs")
        .and_then(Value::as_array)
        .and_then(|runs| runs.first())
        .and_then(|run| run.get("results"))
        .and_then(Value::as_array);

    let Some(results) = results else {
        tracing::debug!("interchange payload has no runs[0].results, dropping");
        return Vec::new();
    };

    results
        .iter()
        .map(|result| extract_issue(&normalize_shape(result)))
        .collect()
}

/// Rewrite the `rule`-nested variant into the standard shape. Fields
/// already present on the result are kept as-is; the standard shape
/// passes through unchanged.
fn normalize_shape(result: &Value) -> Value {
    let Some(rule) = result.get("rule").filter(|r| r.is_object()) else {
        return result.clone();
    };

    let mut rewritten = result.clone();
    let Some(fields) = rewritten.as_object_mut() else {
        return rewritten;
    };

    if !fields.contains_key("ruleId") {
        if let Some(id) = text_field(rule, "id") {
            fields.insert("ruleId".to_string(), Value::String(id));
        }
    }
    if !fields.contains_key("level") {
        if let Some(level) = text_field(rule, "level") {
            fields.insert("level".to_string(), Value::String(level));
        }
    }
    if !fields.contains_key("message") {
        let message = match rule.get("message") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(m) => text_field(m, "text"),
            None => None,
        };
        if let Some(message) = message {
            fields.insert(
                "message".to_string(),
                serde_json::json!({ "text": message }),
            );
        }
    }
    if !fields.contains_key("properties") {
        if let Some(properties) = rule.get("properties").filter(|p| p.is_object()) {
            fields.insert("properties".to_string(), properties.clone());
        }
    }

    tracing::debug!("rewrote rule-nested interchange result into standard shape");
    rewritten
}

/// Best-effort field extraction from one (shape-normalized) result.
fn extract_issue(result: &Value) -> RawIssue {
    let mut issue = RawIssue::new(ToolSource::SastInterchange);

    issue.rule_id = text_field(result, "ruleId");
    issue.level = text_field(result, "level");
    issue.rank = text_field(result, "rank");
    issue.message = message_text(result).unwrap_or_default();

    if let Some(properties) = result.get("properties") {
        issue.security_severity = text_field(properties, "securitySeverity")
            .or_else(|| text_field(properties, "security-severity"));
        issue.severity = text_field(properties, "severity");
        issue.kind = text_field(properties, "kind");
        issue.precision = text_field(properties, "precision");
        issue.tags = extract_tags(properties.get("tags"));
        issue.cwe_id = properties
            .get("cwe")
            .and_then(|cwe| text_field(cwe, "id"));
        issue.problem_category = properties
            .get("problem")
            .and_then(|problem| text_field(problem, "category"));
    }

    if let Some(locations) = result.get("locations").and_then(Value::as_array) {
        issue.locations = locations.iter().map(extract_location).collect();
    }

    issue
}

fn message_text(result: &Value) -> Option<String> {
    match result.get("message") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(message) => text_field(message, "text"),
        None => None,
    }
}

/// Tags arrive either as an array or as one comma-joined string.
fn extract_tags(tags: Option<&Value>) -> Vec<String> {
    match tags {
        Some(Value::Array(items)) => items.iter().filter_map(value_to_text).collect(),
        Some(Value::String(joined)) => joined
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn extract_location(location: &Value) -> RawLocation {
    let physical = location.get("physicalLocation");
    let file = physical
        .and_then(|p| p.get("artifactLocation"))
        .and_then(|a| text_field(a, "uri"));
    let region = physical.and_then(|p| p.get("region"));
    let line = |key: &str| {
        region
            .and_then(|r| r.get(key))
            .and_then(Value::as_u64)
            .map(|n| n as u32)
    };
    RawLocation {
        file,
        start_line: line("startLine"),
        end_line: line("endLine"),
    }
}
