//! Trend signal across historical runs.
//!
//! The trend label names the direction of *risk*, not of the score: a
//! score that rose between the two most recent runs means exposure
//! fell, which reports as `decreasing`. The enum variants spell the
//! comparison out so nobody has to re-derive that from the wire label.

use serde::{Deserialize, Serialize};

use crate::model::{AggregateSnapshot, HistoryEntry, Trend};

/// Label the trend from a newest-first history list. Only the two most
/// recent entries are read; fewer than two means no signal.
pub fn trend_from_history(history: &[HistoryEntry]) -> Trend {
    match (history.first(), history.get(1)) {
        (Some(latest), Some(previous)) => {
            trend_from_scores(latest.security_score, previous.security_score)
        }
        _ => Trend::Unavailable,
    }
}

/// Compare two scores, latest against previous.
pub fn trend_from_scores(latest: u32, previous: u32) -> Trend {
    if latest > previous {
        Trend::RiskDecreasing
    } else if latest < previous {
        Trend::RiskIncreasing
    } else {
        Trend::Flat
    }
}

/// Field-by-field movement between two snapshots, latest minus
/// previous. Positive severity deltas mean more findings of that
/// bucket than last run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDelta {
    pub critical: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
    pub total: i64,
    pub score: i64,
    pub trend: Trend,
}

/// Compare two snapshots the way the history comparison does, but with
/// per-bucket detail.
pub fn diff_snapshots(latest: &AggregateSnapshot, previous: &AggregateSnapshot) -> SnapshotDelta {
    let delta = |a: u32, b: u32| i64::from(a) - i64::from(b);
    SnapshotDelta {
        critical: delta(latest.severity_counts.critical, previous.severity_counts.critical),
        high: delta(latest.severity_counts.high, previous.severity_counts.high),
        medium: delta(latest.severity_counts.medium, previous.severity_counts.medium),
        low: delta(latest.severity_counts.low, previous.severity_counts.low),
        total: delta(latest.total, previous.total),
        score: delta(latest.score_raw, previous.score_raw),
        trend: trend_from_scores(latest.score_raw, previous.score_raw),
    }
}
