//! JSON report renderer

use crate::model::AggregateSnapshot;
use crate::VulnsumResult;

/// Render a snapshot as pretty-printed JSON
pub fn render(snapshot: &AggregateSnapshot) -> VulnsumResult<String> {
    serde_json::to_string_pretty(snapshot).map_err(crate::VulnsumError::Serde)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Grade, SeverityCounts, Trend};
    use std::collections::BTreeMap;

    #[test]
    fn output_uses_the_wire_field_names() {
        let snapshot = AggregateSnapshot {
            severity_counts: SeverityCounts::default(),
            category_counts: BTreeMap::new(),
            hot_spots: Vec::new(),
            total: 0,
            score_raw: 100,
            grade: Grade::A,
            trend: Trend::Unavailable,
        };
        let rendered = render(&snapshot).unwrap();
        assert!(rendered.contains("\"severityCounts\""));
        assert!(rendered.contains("\"scoreRaw\": 100"));
        assert!(rendered.contains("\"grade\": \"A\""));
        assert!(rendered.contains("\"trend\": \"N/A\""));
    }
}
