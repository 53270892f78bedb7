// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Alignment Rate
// ─────────────────────────────────────────────────────────────────────
//! Quality per minute of review, classified into three bands:
//!
//!   rate < 0.03          → SLOW
//!   0.03 ≤ rate ≤ 0.15   → VALID
//!   rate > 0.15          → SUPERFICIAL
//!
//! A missing or non-positive duration is not an error: the result is
//! `{rate: 0, SLOW}` and the rest of the metrics are still produced.

use rubric_types::{AlignmentCategory, AlignmentRate, RubricConfig};

/// Band thresholds for the Alignment Rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateBands {
    pub slow_below: f64,
    pub superficial_above: f64,
}

impl Default for RateBands {
    fn default() -> Self {
        Self {
            slow_below: 0.03,
            superficial_above: 0.15,
        }
    }
}

impl RateBands {
    pub fn from_config(config: &RubricConfig) -> Self {
        Self {
            slow_below: config.slow_rate_threshold,
            superficial_above: config.superficial_rate_threshold,
        }
    }

    pub fn classify(&self, rate: f64) -> AlignmentCategory {
        if rate < self.slow_below {
            AlignmentCategory::Slow
        } else if rate > self.superficial_above {
            AlignmentCategory::Superficial
        } else {
            AlignmentCategory::Valid
        }
    }

    /// Normalise QI to [0, 1] and divide by the duration in minutes.
    pub fn alignment_rate(&self, quality_index: f64, duration_minutes: f64) -> AlignmentRate {
        if !duration_minutes.is_finite() || duration_minutes <= 0.0 {
            log::warn!(
                "alignment rate: unusable duration {duration_minutes}, reporting rate 0 (SLOW)"
            );
            return AlignmentRate::UNAVAILABLE;
        }
        let qi = if quality_index > 1.0 {
            quality_index / 100.0
        } else {
            quality_index
        };
        let rate = qi / duration_minutes;
        AlignmentRate {
            rate,
            category: self.classify(rate),
        }
    }
}

/// Alignment Rate with the canonical 0.03 / 0.15 bands.
pub fn alignment_rate(quality_index: f64, duration_minutes: f64) -> AlignmentRate {
    RateBands::default().alignment_rate(quality_index, duration_minutes)
}
