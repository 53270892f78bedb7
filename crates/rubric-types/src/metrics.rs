// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Rubric Kernel Metric Types
// ─────────────────────────────────────────────────────────────────────

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TARGET_APERTURE;
use crate::evaluation::ConsensusEvaluation;
use crate::pathology::PathologySet;

/// Efficiency band of the Alignment Rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlignmentCategory {
    /// Too little quality per minute (also used when no duration is known).
    Slow,
    Valid,
    /// Too much quality per minute to have been earned by real review.
    Superficial,
}

impl AlignmentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            AlignmentCategory::Slow => "SLOW",
            AlignmentCategory::Valid => "VALID",
            AlignmentCategory::Superficial => "SUPERFICIAL",
        }
    }
}

impl fmt::Display for AlignmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality Index per minute, with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentRate {
    pub rate: f64,
    pub category: AlignmentCategory,
}

impl AlignmentRate {
    /// Result for a missing or unusable duration.
    pub const UNAVAILABLE: AlignmentRate = AlignmentRate {
        rate: 0.0,
        category: AlignmentCategory::Slow,
    };
}

/// Output of the K4 balance computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceResult {
    /// 100 / deviation. 100 only at the target aperture.
    pub superintelligence_index: f64,
    /// Residual (cyclic) energy fraction, in [0, 1).
    pub aperture: f64,
    /// Symmetric ratio between aperture and target, >= 1.
    pub deviation: f64,
    /// True when the safe fallback was returned instead of a measurement.
    pub degraded: bool,
}

impl BalanceResult {
    /// Safe values returned when the behavior vector is incomplete.
    pub fn fallback(target_aperture: f64) -> Self {
        Self {
            superintelligence_index: 0.0,
            aperture: target_aperture,
            deviation: 1.0,
            degraded: true,
        }
    }
}

impl Default for BalanceResult {
    fn default() -> Self {
        Self::fallback(TARGET_APERTURE)
    }
}

/// Final metrics bundle for one consensus evaluation.
///
/// When `si_available` is false the three SI fields hold the fallback
/// values and must be rendered as "unavailable", not as a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub quality_index: f64,
    pub alignment_rate: f64,
    pub alignment_rate_category: AlignmentCategory,
    pub superintelligence_index: f64,
    pub si_deviation: f64,
    pub aperture: f64,
    pub si_available: bool,
    pub structure_average: f64,
    pub behavior_average: f64,
    pub specialization_average: f64,
}

/// How far apart the two analysts were before aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalystDivergence {
    /// Largest absolute per-field structure difference.
    pub structure_max_delta: f64,
    /// Largest absolute difference over behavior fields scored by both.
    pub behavior_max_delta: f64,
    /// Largest absolute difference over specialization keys both used.
    pub specialization_max_delta: f64,
    /// Flagged by both analysts.
    pub shared_pathologies: PathologySet,
    /// Flagged by exactly one analyst.
    pub disputed_pathologies: PathologySet,
}

impl AnalystDivergence {
    pub fn max_delta(&self) -> f64 {
        self.structure_max_delta
            .max(self.behavior_max_delta)
            .max(self.specialization_max_delta)
    }
}

/// Everything derived from one pair of analyst evaluations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub consensus: ConsensusEvaluation,
    pub metrics: QualityMetrics,
    pub divergence: AnalystDivergence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_format() {
        let json = serde_json::to_string(&AlignmentCategory::Superficial).unwrap();
        assert_eq!(json, r#""SUPERFICIAL""#);
        let back: AlignmentCategory = serde_json::from_str(r#""VALID""#).unwrap();
        assert_eq!(back, AlignmentCategory::Valid);
    }

    #[test]
    fn test_balance_fallback_values() {
        let r = BalanceResult::default();
        assert_eq!(r.superintelligence_index, 0.0);
        assert_eq!(r.aperture, 0.02070);
        assert_eq!(r.deviation, 1.0);
        assert!(r.degraded);
    }

    #[test]
    fn test_divergence_max_delta() {
        let d = AnalystDivergence {
            structure_max_delta: 1.0,
            behavior_max_delta: 4.5,
            specialization_max_delta: 2.0,
            ..Default::default()
        };
        assert_eq!(d.max_delta(), 4.5);
    }
}
