// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Quality Index
// ─────────────────────────────────────────────────────────────────────
//! QI = w_s · structure% + w_b · behavior% + w_sp · specialization%,
//! with each 1–10 average mapped to a percentage by ×10.
//! Canonical weights: 0.40 / 0.40 / 0.20.

use rubric_types::RubricConfig;

/// Group weights for the Quality Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityWeights {
    pub structure: f64,
    pub behavior: f64,
    pub specialization: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            structure: 0.40,
            behavior: 0.40,
            specialization: 0.20,
        }
    }
}

impl QualityWeights {
    pub fn from_config(config: &RubricConfig) -> Self {
        Self {
            structure: config.structure_weight,
            behavior: config.behavior_weight,
            specialization: config.specialization_weight,
        }
    }

    /// Weighted percentage from three 1–10 group averages.
    pub fn quality_index(&self, structure_avg: f64, behavior_avg: f64, specialization_avg: f64) -> f64 {
        self.structure * to_percent(structure_avg)
            + self.behavior * to_percent(behavior_avg)
            + self.specialization * to_percent(specialization_avg)
    }
}

#[inline]
fn to_percent(avg: f64) -> f64 {
    avg * 10.0
}

/// Quality Index with the canonical 40/40/20 weights.
pub fn quality_index(structure_avg: f64, behavior_avg: f64, specialization_avg: f64) -> f64 {
    QualityWeights::default().quality_index(structure_avg, behavior_avg, specialization_avg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ten_is_hundred() {
        assert_eq!(quality_index(10.0, 10.0, 10.0), 100.0);
    }

    #[test]
    fn test_all_one_is_ten() {
        assert_eq!(quality_index(1.0, 1.0, 1.0), 10.0);
    }

    #[test]
    fn test_all_eight_is_eighty() {
        assert_eq!(quality_index(8.0, 8.0, 8.0), 80.0);
    }

    #[test]
    fn test_missing_specialization_costs_twenty_percent() {
        // Empty specialization averages to 0 and drags QI down.
        let qi = quality_index(10.0, 10.0, 0.0);
        assert!((qi - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_weights_from_config() {
        let config = RubricConfig {
            structure_weight: 0.5,
            behavior_weight: 0.5,
            specialization_weight: 0.0,
            ..Default::default()
        };
        let w = QualityWeights::from_config(&config);
        assert!((w.quality_index(6.0, 8.0, 1.0) - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_in_each_group() {
        let base = quality_index(5.0, 5.0, 5.0);
        assert!((quality_index(6.0, 5.0, 5.0) - base - 4.0).abs() < 1e-9);
        assert!((quality_index(5.0, 6.0, 5.0) - base - 4.0).abs() < 1e-9);
        assert!((quality_index(5.0, 5.0, 6.0) - base - 2.0).abs() < 1e-9);
    }
}
