//! Weighted security scoring.
//!
//! A coarse, explainable convention: each finding costs its severity
//! weight, the summed penalty is tripled, and the result is subtracted
//! from 100. The constants are part of the output contract — scores
//! must stay comparable across versions and against stored history.

use crate::model::{Grade, SeverityCounts};

const WEIGHT_CRITICAL: u32 = 4;
const WEIGHT_HIGH: u32 = 3;
const WEIGHT_MEDIUM: u32 = 2;
const WEIGHT_LOW: u32 = 1;
const PENALTY_MULTIPLIER: u32 = 3;

/// 0–100 security score from severity counts. A clean run scores 100.
pub fn security_score(counts: &SeverityCounts) -> u32 {
    if counts.total() == 0 {
        return 100;
    }
    let penalty = (counts.critical * WEIGHT_CRITICAL
        + counts.high * WEIGHT_HIGH
        + counts.medium * WEIGHT_MEDIUM
        + counts.low * WEIGHT_LOW)
        * PENALTY_MULTIPLIER;
    100u32.saturating_sub(penalty)
}

/// Letter grade from a score (inclusive lower bounds).
pub fn grade_from_score(score: u32) -> Grade {
    match score {
        90..=100 => Grade::A,
        80..=89 => Grade::B,
        70..=79 => Grade::C,
        60..=69 => Grade::D,
        _ => Grade::E,
    }
}
