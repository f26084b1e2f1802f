//! # vulnsum — security-finding normalization & aggregation engine
//!
//! Ingests raw vulnerability-scanner output from independent tools with
//! incompatible vocabularies and reduces it to one consistent summary:
//! per-severity counts, per-category counts, ranked hot-spot files, a
//! weighted security score, a letter grade, and a trend signal across
//! historical runs.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Engine                              │
//! │  ┌────────────┐ ┌───────────────┐ ┌────────────────────────┐ │
//! │  │ parser     │ │ normalize     │ │ engine                 │ │
//! │  │ interchange│ │ severity      │ │ aggregate → scoring    │ │
//! │  │ container  │→│ category      │→│           → trend      │ │
//! │  │ dynamic    │ │ location      │ │ precedence resolution  │ │
//! │  └────────────┘ └───────────────┘ └───────────┬────────────┘ │
//! │                                               │              │
//! │                                   ┌───────────▼────────────┐ │
//! │                                   │ AggregateSnapshot      │ │
//! │                                   │ report (JSON/Markdown) │ │
//! │                                   └────────────────────────┘ │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows strictly upward; every stage is a pure function of its
//! inputs. The engine performs no network or disk I/O: payloads and
//! history arrive already materialized, and identical inputs always
//! produce identical snapshots. Malformed input never surfaces as an
//! error — each stage degrades to its emptiest valid result.

pub mod engine;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod report;

// Re-exports for convenience
pub use engine::trend::{diff_snapshots, SnapshotDelta};
pub use engine::{summary_source, Engine, EngineConfig, SummarySource};
pub use model::{
    AggregateSnapshot, BackendSummary, Grade, HistoryEntry, HotSpot, NormalizedFinding, RawIssue,
    Severity, ToolSource, Trend,
};
pub use parser::ScanPayload;
pub use report::{render_report, write_report, ReportFormat};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VulnsumError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type VulnsumResult<T> = Result<T, VulnsumError>;
