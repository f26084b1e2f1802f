//! Markdown report renderer
//!
//! Produces the summary document the console embeds: score and grade up
//! front, then severity, category, and hot-spot tables.

use crate::model::{AggregateSnapshot, Trend};
use crate::VulnsumResult;

/// Render a snapshot as Markdown
pub fn render(snapshot: &AggregateSnapshot) -> VulnsumResult<String> {
    let mut md = String::with_capacity(2048);

    md.push_str("# Security Summary\n\n");

    md.push_str("| Field | Value |\n|---|---|\n");
    md.push_str(&format!(
        "| **Security Score** | **{}** / 100 |\n",
        snapshot.score_raw
    ));
    md.push_str(&format!("| **Grade** | {} |\n", snapshot.grade));
    md.push_str(&format!("| **Trend** | {} |\n", trend_label(snapshot.trend)));
    md.push_str(&format!("| **Total Findings** | {} |\n", snapshot.total));
    md.push_str("\n");

    if snapshot.total == 0 {
        md.push_str("✅ **No findings.**\n");
        return Ok(md);
    }

    md.push_str("## Findings by Severity\n\n");
    md.push_str("| Severity | Count |\n|---|---:|\n");
    let counts = &snapshot.severity_counts;
    if counts.critical > 0 {
        md.push_str(&format!("| 🔴 Critical | **{}** |\n", counts.critical));
    }
    if counts.high > 0 {
        md.push_str(&format!("| 🟠 High | **{}** |\n", counts.high));
    }
    if counts.medium > 0 {
        md.push_str(&format!("| 🟡 Medium | {} |\n", counts.medium));
    }
    if counts.low > 0 {
        md.push_str(&format!("| 🔵 Low | {} |\n", counts.low));
    }
    md.push_str("\n");

    if !snapshot.category_counts.is_empty() {
        md.push_str("## Findings by Category\n\n");
        md.push_str("| Category | Count |\n|---|---:|\n");
        for (category, count) in &snapshot.category_counts {
            md.push_str(&format!("| {} | {} |\n", category, count));
        }
        md.push_str("\n");
    }

    if !snapshot.hot_spots.is_empty() {
        md.push_str("## Hot Spots\n\n");
        md.push_str("| Rank | File | Findings |\n|--:|---|---:|\n");
        for spot in &snapshot.hot_spots {
            md.push_str(&format!(
                "| {} | `{}` | {} |\n",
                spot.rank, spot.file, spot.count
            ));
        }
        md.push_str("\n");
    }

    Ok(md)
}

fn trend_label(trend: Trend) -> &'static str {
    match trend {
        Trend::RiskDecreasing => "📉 decreasing (improving)",
        Trend::RiskIncreasing => "📈 increasing (worsening)",
        Trend::Flat => "flat",
        Trend::Unavailable => "N/A",
    }
}
