//! Folds normalized findings into the summary counters.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::model::{HotSpot, NormalizedFinding, SeverityCounts};

/// Hot-spot list cap: only the top files matter for remediation focus.
pub const HOT_SPOT_LIMIT: usize = 5;

/// Counters produced by one aggregation pass. Score, grade, and trend
/// are layered on top by the engine.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub severity_counts: SeverityCounts,
    pub category_counts: BTreeMap<String, u32>,
    pub hot_spots: Vec<HotSpot>,
}

/// Fold a finding list into severity counts, category counts, and the
/// ranked hot-spot list. Empty input yields all-zero counters.
///
/// Each finding increments exactly one severity counter and one
/// per-file counter, and one counter per category it contributes to
/// (possibly none, possibly several).
pub fn aggregate(findings: &[NormalizedFinding]) -> Aggregation {
    let mut severity_counts = SeverityCounts::default();
    let mut category_counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut file_counts: HashMap<String, u32> = HashMap::new();
    let mut file_order: Vec<String> = Vec::new();

    for finding in findings {
        severity_counts.record(finding.severity);

        for category in &finding.categories {
            *category_counts.entry(category.clone()).or_insert(0) += 1;
        }

        match file_counts.entry(finding.file.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(1);
                file_order.push(finding.file.clone());
            }
            Entry::Occupied(mut slot) => *slot.get_mut() += 1,
        }
    }

    Aggregation {
        severity_counts,
        category_counts,
        hot_spots: rank_hot_spots(&file_order, &file_counts),
    }
}

/// Sort per-file counts descending and keep the top entries. The sort
/// is stable, so ties keep first-encounter order.
fn rank_hot_spots(file_order: &[String], file_counts: &HashMap<String, u32>) -> Vec<HotSpot> {
    let mut ranked: Vec<(&String, u32)> = file_order
        .iter()
        .map(|file| (file, file_counts[file]))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(HOT_SPOT_LIMIT)
        .enumerate()
        .map(|(position, (file, count))| HotSpot {
            file: file.clone(),
            count,
            rank: position as u32 + 1,
        })
        .collect()
}
