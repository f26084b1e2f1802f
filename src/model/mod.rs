//! Canonical data model shared by every pipeline stage.
//!
//! Raw scanner records enter as [`RawIssue`], are reduced to
//! [`NormalizedFinding`], and fold into one [`AggregateSnapshot`].
//! Everything here is a plain value: nothing is mutated after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Severity ───────────────────────────────────────────────────────

/// The four canonical severity buckets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

// ─── Tool sources ───────────────────────────────────────────────────

/// Which scanner family produced a raw record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolSource {
    SastInterchange,
    ContainerScan,
    DynamicScan,
}

impl std::fmt::Display for ToolSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SastInterchange => write!(f, "sast-interchange"),
            Self::ContainerScan => write!(f, "container-scan"),
            Self::DynamicScan => write!(f, "dynamic-scan"),
        }
    }
}

// ─── Raw issue ──────────────────────────────────────────────────────

/// One entry from a scanner's native output, flattened by the adapter
/// for that tool family. Every field is best-effort: adapters fill in
/// whatever the payload actually carried and leave the rest empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
    pub source: ToolSource,
    pub rule_id: Option<String>,
    pub message: String,
    /// Explicit level string (`error`, `warning`, `note`, ...).
    pub level: Option<String>,
    /// Tool-assigned security-severity score, kept as the raw token.
    pub security_severity: Option<String>,
    pub rank: Option<String>,
    /// Generic severity word (`critical`, `high`, ...).
    pub severity: Option<String>,
    /// 0–4 risk code, used by the dynamic-scan family.
    pub risk_code: Option<u8>,
    pub tags: Vec<String>,
    pub kind: Option<String>,
    pub problem_category: Option<String>,
    pub cwe_id: Option<String>,
    pub precision: Option<String>,
    pub locations: Vec<RawLocation>,
}

impl RawIssue {
    pub fn new(source: ToolSource) -> Self {
        Self {
            source,
            rule_id: None,
            message: String::new(),
            level: None,
            security_severity: None,
            rank: None,
            severity: None,
            risk_code: None,
            tags: Vec::new(),
            kind: None,
            problem_category: None,
            cwe_id: None,
            precision: None,
            locations: Vec::new(),
        }
    }
}

/// A file reference attached to a raw issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLocation {
    pub file: Option<String>,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
}

// ─── Normalized finding ─────────────────────────────────────────────

/// A finding reduced to the engine's canonical fields. Derived from
/// exactly one [`RawIssue`] and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedFinding {
    pub severity: Severity,
    /// Primary category (first classification hit, or a fallback).
    pub category: String,
    /// Every distinct category this finding contributes to, in
    /// first-seen order. A finding tagged both by name and by CWE id
    /// shows up under both.
    pub categories: Vec<String>,
    /// Display path, `"unknown"` when the scanner gave none.
    pub file: String,
    pub start_line: Option<u32>,
    pub end_line: Option<u32>,
    pub rule_id: Option<String>,
    pub source: ToolSource,
    pub message: String,
}

// ─── Severity counts ────────────────────────────────────────────────

/// Per-bucket finding counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}

// ─── Hot spots ──────────────────────────────────────────────────────

/// A source file ranked by how many findings it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotSpot {
    pub file: String,
    pub count: u32,
    /// 1 = most findings.
    pub rank: u32,
}

// ─── Grade ──────────────────────────────────────────────────────────

/// Letter grade derived from the security score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::C => write!(f, "C"),
            Self::D => write!(f, "D"),
            Self::E => write!(f, "E"),
        }
    }
}

// ─── Trend ──────────────────────────────────────────────────────────

/// Direction of risk across the two most recent runs.
///
/// The wire labels name what happened to *exposure*, not to the score:
/// a score that rose means risk fell and reports as `decreasing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "decreasing")]
    RiskDecreasing,
    #[serde(rename = "increasing")]
    RiskIncreasing,
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "N/A")]
    Unavailable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RiskDecreasing => write!(f, "decreasing"),
            Self::RiskIncreasing => write!(f, "increasing"),
            Self::Flat => write!(f, "flat"),
            Self::Unavailable => write!(f, "N/A"),
        }
    }
}

// ─── History ────────────────────────────────────────────────────────

/// One historical score snapshot, newest first in the provided list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub security_score: u32,
}

// ─── Backend summary ────────────────────────────────────────────────

/// Summary shape a backend may have precomputed. Every section is
/// optional; the precedence resolver trusts the whole object only when
/// severity counts, categories, and hot spots are all present and
/// non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendSummary {
    pub severity_counts: Option<BTreeMap<String, u32>>,
    pub category_list: Option<Vec<CategoryCount>>,
    pub hot_spot_list: Option<Vec<BackendHotSpot>>,
    pub history_list: Option<Vec<HistoryEntry>>,
}

impl BackendSummary {
    /// All three display sections present and non-empty.
    pub fn is_complete(&self) -> bool {
        self.severity_counts.as_ref().is_some_and(|m| !m.is_empty())
            && self.category_list.as_ref().is_some_and(|c| !c.is_empty())
            && self.hot_spot_list.as_ref().is_some_and(|h| !h.is_empty())
    }
}

/// A category tally as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: u32,
}

/// A hot-spot entry as the backend reports it (rank is assigned on
/// reshape, not trusted from the wire).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendHotSpot {
    pub file: String,
    pub count: u32,
}

// ─── Aggregate snapshot ─────────────────────────────────────────────

/// The engine's sole output: one normalized summary per invocation.
///
/// Invariants upheld by construction: `total` equals the sum of the
/// severity counts, `score_raw` stays in `0..=100`, and `hot_spots`
/// holds at most 5 entries sorted by count descending. Because one
/// finding may contribute to several categories, the sum over
/// `category_counts` can exceed `total`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateSnapshot {
    pub severity_counts: SeverityCounts,
    pub category_counts: BTreeMap<String, u32>,
    pub hot_spots: Vec<HotSpot>,
    pub total: u32,
    pub score_raw: u32,
    pub grade: Grade,
    pub trend: Trend,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering_follows_risk() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_counts_total_is_sum() {
        let mut counts = SeverityCounts::default();
        counts.record(Severity::Critical);
        counts.record(Severity::High);
        counts.record(Severity::High);
        counts.record(Severity::Low);
        assert_eq!(counts.total(), 4);
        assert_eq!(counts.critical + counts.high + counts.medium + counts.low, 4);
    }

    #[test]
    fn trend_serializes_to_wire_labels() {
        assert_eq!(
            serde_json::to_string(&Trend::RiskDecreasing).unwrap(),
            "\"decreasing\""
        );
        assert_eq!(
            serde_json::to_string(&Trend::Unavailable).unwrap(),
            "\"N/A\""
        );
    }

    #[test]
    fn backend_summary_completeness_requires_all_three() {
        let mut summary = BackendSummary::default();
        assert!(!summary.is_complete());

        summary.severity_counts = Some(BTreeMap::from([("critical".to_string(), 1)]));
        summary.category_list = Some(vec![CategoryCount {
            name: "XSS".to_string(),
            count: 1,
        }]);
        assert!(!summary.is_complete());

        summary.hot_spot_list = Some(Vec::new());
        assert!(!summary.is_complete());

        summary.hot_spot_list = Some(vec![BackendHotSpot {
            file: "/src/app.py".to_string(),
            count: 1,
        }]);
        assert!(summary.is_complete());
    }
}
