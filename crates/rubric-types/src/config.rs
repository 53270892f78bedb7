// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Rubric Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{RubricError, RubricResult};

/// Ideal K4 aperture: the residual energy fraction of a balanced pattern.
pub const TARGET_APERTURE: f64 = 0.02070;

/// Guards the deviation ratio when the aperture is exactly zero.
pub const APERTURE_EPSILON: f64 = 1e-10;

/// Number of K4 edges (one per behavior score).
pub const EDGE_COUNT: usize = 6;

/// Runtime configuration for the Rubric Kernel.
///
/// The defaults are the canonical rubric. Hosts embedding the kernel
/// elsewhere may re-weight the groups or move the alignment bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RubricConfig {
    /// Weight of the structure percentage in the Quality Index.
    /// Default: 0.40.
    pub structure_weight: f64,

    /// Weight of the behavior percentage in the Quality Index.
    /// Default: 0.40.
    pub behavior_weight: f64,

    /// Weight of the specialization percentage in the Quality Index.
    /// Default: 0.20.
    pub specialization_weight: f64,

    /// Aperture at which SI peaks at 100.
    /// Default: 0.02070.
    pub target_aperture: f64,

    /// Added to the aperture before forming the deviation ratio.
    /// Default: 1e-10.
    pub aperture_epsilon: f64,

    /// Alignment Rate strictly below this is SLOW.
    /// Default: 0.03.
    pub slow_rate_threshold: f64,

    /// Alignment Rate strictly above this is SUPERFICIAL.
    /// Default: 0.15.
    pub superficial_rate_threshold: f64,

    /// Per-edge weights for the K4 balance. `None` means all ones.
    pub edge_weights: Option<[f64; EDGE_COUNT]>,

    /// Analyst disagreement (rubric points) above which a warning is logged.
    /// Default: 3.0.
    pub disagreement_warn_threshold: f64,
}

impl Default for RubricConfig {
    fn default() -> Self {
        Self {
            structure_weight: 0.40,
            behavior_weight: 0.40,
            specialization_weight: 0.20,
            target_aperture: TARGET_APERTURE,
            aperture_epsilon: APERTURE_EPSILON,
            slow_rate_threshold: 0.03,
            superficial_rate_threshold: 0.15,
            edge_weights: None,
            disagreement_warn_threshold: 3.0,
        }
    }
}

impl RubricConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> RubricResult<()> {
        let weights = [
            ("structure_weight", self.structure_weight),
            ("behavior_weight", self.behavior_weight),
            ("specialization_weight", self.specialization_weight),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(RubricError::Config(format!(
                    "{name} must be finite and >= 0, got {w}"
                )));
            }
        }
        let total = self.structure_weight + self.behavior_weight + self.specialization_weight;
        if (total - 1.0).abs() > 1e-9 {
            return Err(RubricError::Config(format!(
                "group weights must sum to 1.0, got {} + {} + {} = {total}",
                self.structure_weight, self.behavior_weight, self.specialization_weight
            )));
        }
        if !(self.target_aperture > 0.0 && self.target_aperture < 1.0) {
            return Err(RubricError::Config(format!(
                "target_aperture must be in (0, 1), got {}",
                self.target_aperture
            )));
        }
        if !(self.aperture_epsilon > 0.0 && self.aperture_epsilon < self.target_aperture) {
            return Err(RubricError::Config(format!(
                "aperture_epsilon must be in (0, target_aperture), got {}",
                self.aperture_epsilon
            )));
        }
        if !(self.slow_rate_threshold > 0.0) {
            return Err(RubricError::Config(format!(
                "slow_rate_threshold must be > 0, got {}",
                self.slow_rate_threshold
            )));
        }
        if !(self.superficial_rate_threshold > self.slow_rate_threshold) {
            return Err(RubricError::Config(format!(
                "superficial_rate_threshold must exceed slow_rate_threshold, got {} <= {}",
                self.superficial_rate_threshold, self.slow_rate_threshold
            )));
        }
        if let Some(weights) = &self.edge_weights {
            for (index, &w) in weights.iter().enumerate() {
                if !w.is_finite() || w <= 0.0 {
                    return Err(RubricError::Config(format!(
                        "edge_weights[{index}] must be finite and > 0, got {w}"
                    )));
                }
            }
        }
        if !(self.disagreement_warn_threshold > 0.0) {
            return Err(RubricError::Config(format!(
                "disagreement_warn_threshold must be > 0, got {}",
                self.disagreement_warn_threshold
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> RubricResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| RubricError::Config(format!("JSON parse error: {e}")))
    }
}
