//! Adapters that turn each tool family's native output into flat
//! [`RawIssue`](crate::model::RawIssue) records.
//!
//! Shape sniffing stays inside this module: every family has exactly
//! one adapter, each adapter fails soft (malformed payloads yield an
//! empty record list, never an error), and whatever comes out is the
//! canonical flat shape the rest of the pipeline works on.

pub mod container;
pub mod dynamic;
pub mod interchange;

use crate::engine::EngineConfig;
use crate::model::RawIssue;

/// One raw result blob, tagged by the tool family that produced it.
#[derive(Debug, Clone)]
pub enum ScanPayload {
    SastInterchange(String),
    ContainerScan(String),
    DynamicScan(String),
}

/// Run the adapter for each payload, preserving payload order. Families
/// disabled in the config are skipped.
pub fn parse_payloads(payloads: &[ScanPayload], config: &EngineConfig) -> Vec<RawIssue> {
    let mut issues = Vec::new();
    for payload in payloads {
        match payload {
            ScanPayload::SastInterchange(text) => {
                if config.sast_interchange {
                    issues.extend(interchange::parse(text));
                } else {
                    tracing::debug!("sast-interchange payload skipped (disabled)");
                }
            }
            ScanPayload::ContainerScan(text) => {
                if config.container_scan {
                    issues.extend(container::parse(text));
                } else {
                    tracing::debug!("container-scan payload skipped (disabled)");
                }
            }
            ScanPayload::DynamicScan(text) => {
                if config.dynamic_scan {
                    issues.extend(dynamic::parse(text));
                } else {
                    tracing::debug!("dynamic-scan payload skipped (disabled)");
                }
            }
        }
    }
    issues
}

/// Accept a JSON value as text whether it arrived as a string or a
/// number. Scanner payloads are inconsistent about which one they emit.
pub(crate) fn value_to_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Fetch a string-ish field from a JSON object, empty strings treated
/// as absent.
pub(crate) fn text_field(object: &serde_json::Value, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(value_to_text)
        .filter(|s| !s.is_empty())
}
