//! Engine orchestration and the backend/local precedence decision.
//!
//! [`Engine::summarize`] is the single entry point: it either reshapes
//! a complete backend-computed summary or runs the full local pipeline
//! (parse → normalize → aggregate → score → trend) over the raw
//! payloads. The choice is all-or-nothing; a partial backend summary is
//! discarded entirely, never patched field by field.

pub mod aggregate;
pub mod scoring;
pub mod trend;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{AggregateSnapshot, BackendSummary, HotSpot, SeverityCounts, Trend};
use crate::normalize;
use crate::parser::{self, ScanPayload};

// ─── Configuration ─────────────────────────────────────────────────

/// Which tool families an invocation consumes. Disabling a family
/// drops its payloads before parsing; nothing here changes how counts,
/// scores, or grades are computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub sast_interchange: bool,
    pub container_scan: bool,
    pub dynamic_scan: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sast_interchange: true,
            container_scan: true,
            dynamic_scan: true,
        }
    }
}

// ─── Precedence ────────────────────────────────────────────────────

/// Which pipeline variant an invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarySource {
    /// Reshape the backend-computed summary.
    Backend,
    /// Recompute from the raw payloads.
    Local,
}

/// All-or-nothing precedence rule: the backend summary is used only if
/// its severity counts, category list, and hot-spot list are all
/// present and non-empty.
pub fn summary_source(backend: Option<&BackendSummary>) -> SummarySource {
    match backend {
        Some(summary) if summary.is_complete() => SummarySource::Backend,
        _ => SummarySource::Local,
    }
}

// ─── Engine ────────────────────────────────────────────────────────

/// The aggregation engine. Stateless between invocations: every call
/// builds a fresh snapshot from its arguments alone, so identical
/// inputs always produce identical snapshots.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Produce one snapshot per invocation.
    ///
    /// A complete backend summary is reshaped directly (the trend is
    /// still computed locally from the supplied history). Otherwise the
    /// raw payloads are parsed from scratch and the trend reports as
    /// unavailable, since no history accompanies that path.
    pub fn summarize(
        &self,
        backend: Option<&BackendSummary>,
        payloads: &[ScanPayload],
    ) -> AggregateSnapshot {
        match (summary_source(backend), backend) {
            (SummarySource::Backend, Some(summary)) => {
                tracing::info!("using backend-computed summary");
                self.from_backend(summary)
            }
            _ => {
                if backend.is_some() {
                    tracing::warn!("backend summary incomplete, recomputing from raw payloads");
                }
                self.from_payloads(payloads)
            }
        }
    }

    /// Reshape a complete backend summary into a snapshot.
    fn from_backend(&self, summary: &BackendSummary) -> AggregateSnapshot {
        let severity_counts = reshape_severity_counts(
            summary.severity_counts.as_ref().unwrap_or(&BTreeMap::new()),
        );

        let mut category_counts: BTreeMap<String, u32> = BTreeMap::new();
        for category in summary.category_list.iter().flatten() {
            *category_counts.entry(category.name.clone()).or_insert(0) += category.count;
        }

        let hot_spots = reshape_hot_spots(summary.hot_spot_list.as_deref().unwrap_or(&[]));

        let score_raw = scoring::security_score(&severity_counts);
        let history = summary.history_list.as_deref().unwrap_or(&[]);

        AggregateSnapshot {
            severity_counts,
            category_counts,
            hot_spots,
            total: severity_counts.total(),
            score_raw,
            grade: scoring::grade_from_score(score_raw),
            trend: trend::trend_from_history(history),
        }
    }

    /// Run the full local pipeline over the raw payloads.
    fn from_payloads(&self, payloads: &[ScanPayload]) -> AggregateSnapshot {
        let issues = parser::parse_payloads(payloads, &self.config);
        let findings = normalize::normalize_all(&issues);
        let aggregation = aggregate::aggregate(&findings);
        let score_raw = scoring::security_score(&aggregation.severity_counts);

        tracing::info!(
            findings = findings.len(),
            score = score_raw,
            "computed summary from {} payload(s)",
            payloads.len()
        );

        AggregateSnapshot {
            total: aggregation.severity_counts.total(),
            severity_counts: aggregation.severity_counts,
            category_counts: aggregation.category_counts,
            hot_spots: aggregation.hot_spots,
            score_raw,
            grade: scoring::grade_from_score(score_raw),
            trend: Trend::Unavailable,
        }
    }
}

/// Read the canonical buckets out of the backend's severity map.
/// Unrecognized keys are ignored; missing ones count zero.
fn reshape_severity_counts(map: &BTreeMap<String, u32>) -> SeverityCounts {
    let bucket = |key: &str| map.get(key).copied().unwrap_or(0);
    SeverityCounts {
        critical: bucket("critical"),
        high: bucket("high"),
        medium: bucket("medium"),
        low: bucket("low"),
    }
}

/// Re-rank the backend's hot-spot list instead of trusting wire order:
/// stable sort by count descending, capped, ranks reassigned.
fn reshape_hot_spots(entries: &[crate::model::BackendHotSpot]) -> Vec<HotSpot> {
    let mut sorted: Vec<_> = entries.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count));
    sorted
        .into_iter()
        .take(aggregate::HOT_SPOT_LIMIT)
        .enumerate()
        .map(|(position, entry)| HotSpot {
            file: entry.file,
            count: entry.count,
            rank: position as u32 + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BackendHotSpot, CategoryCount, Grade, HistoryEntry};
    use chrono::{TimeZone, Utc};

    fn complete_backend() -> BackendSummary {
        BackendSummary {
            severity_counts: Some(BTreeMap::from([
                ("critical".to_string(), 1),
                ("high".to_string(), 2),
                ("unknown-bucket".to_string(), 9),
            ])),
            category_list: Some(vec![
                CategoryCount {
                    name: "XSS".to_string(),
                    count: 2,
                },
                CategoryCount {
                    name: "XSS".to_string(),
                    count: 1,
                },
            ]),
            hot_spot_list: Some(vec![
                BackendHotSpot {
                    file: "/a.py".to_string(),
                    count: 1,
                },
                BackendHotSpot {
                    file: "/b.py".to_string(),
                    count: 4,
                },
            ]),
            history_list: Some(vec![
                HistoryEntry {
                    timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
                    security_score: 79,
                },
                HistoryEntry {
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                    security_score: 60,
                },
            ]),
        }
    }

    #[test]
    fn complete_backend_summary_is_reshaped() {
        let engine = Engine::default();
        let snapshot = engine.summarize(Some(&complete_backend()), &[]);

        assert_eq!(snapshot.severity_counts.critical, 1);
        assert_eq!(snapshot.severity_counts.high, 2);
        assert_eq!(snapshot.total, 3);
        // duplicate category names are summed
        assert_eq!(snapshot.category_counts["XSS"], 3);
        // hot spots re-ranked by count, not wire order
        assert_eq!(snapshot.hot_spots[0].file, "/b.py");
        assert_eq!(snapshot.hot_spots[0].rank, 1);
        // (1*4 + 2*3) * 3 = 30 → 70
        assert_eq!(snapshot.score_raw, 70);
        assert_eq!(snapshot.grade, Grade::C);
        // trend computed locally from supplied history: 79 > 60
        assert_eq!(snapshot.trend, Trend::RiskDecreasing);
    }

    #[test]
    fn partial_backend_summary_is_discarded_entirely() {
        let mut backend = complete_backend();
        backend.hot_spot_list = Some(Vec::new());

        let payload = ScanPayload::SastInterchange(
            r#"{"runs": [{"results": [{"ruleId": "xss-1", "level": "warning"}]}]}"#.to_string(),
        );
        let engine = Engine::default();
        let snapshot = engine.summarize(Some(&backend), &[payload]);

        // local recompute: one high finding, not the backend's three
        assert_eq!(snapshot.total, 1);
        assert_eq!(snapshot.severity_counts.high, 1);
        assert_eq!(snapshot.trend, Trend::Unavailable);
    }

    #[test]
    fn strategy_selection_is_explicit() {
        assert_eq!(summary_source(None), SummarySource::Local);
        assert_eq!(
            summary_source(Some(&BackendSummary::default())),
            SummarySource::Local
        );
        assert_eq!(
            summary_source(Some(&complete_backend())),
            SummarySource::Backend
        );
    }

    #[test]
    fn no_inputs_yield_a_clean_snapshot() {
        let snapshot = Engine::default().summarize(None, &[]);
        assert_eq!(snapshot.total, 0);
        assert_eq!(snapshot.score_raw, 100);
        assert_eq!(snapshot.grade, Grade::A);
        assert_eq!(snapshot.trend, Trend::Unavailable);
        assert!(snapshot.hot_spots.is_empty());
    }
}
