// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Score Averager
// ─────────────────────────────────────────────────────────────────────
//! Bounded group averages for structure, behavior and specialization.
//!
//! - Structure: mean of all four fields, every field mandatory.
//! - Behavior: mean of the numeric fields only; "not applicable" leaves
//!   the denominator rather than counting as zero.
//! - Specialization: mean of all entries; an empty map averages to 0.0.

use rubric_types::score::validate_score;
use rubric_types::{
    BehaviorScores, RubricError, RubricResult, SpecializationScores, StructureScores,
};

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Arithmetic mean of the four structure scores.
pub fn average_structure(scores: &StructureScores) -> RubricResult<f64> {
    scores.validate()?;
    Ok(mean(&scores.values()))
}

/// Arithmetic mean over the numeric behavior fields.
///
/// Fails if all six fields are "not applicable".
pub fn average_behavior(scores: &BehaviorScores) -> RubricResult<f64> {
    let values = scores.applicable_values();
    if values.is_empty() {
        return Err(RubricError::NoApplicableBehavior);
    }
    scores.validate()?;
    Ok(mean(&values))
}

/// Arithmetic mean of the specialization scores, 0.0 when there are none.
///
/// An artifact without domain criteria gets no specialization credit;
/// it is not assumed to sit at mid-scale.
pub fn average_specialization(scores: &SpecializationScores) -> RubricResult<f64> {
    if scores.is_empty() {
        return Ok(0.0);
    }
    let mut values = Vec::with_capacity(scores.len());
    for (key, &value) in scores {
        values.push(validate_score(&format!("specialization.{key}"), value)?);
    }
    Ok(mean(&values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubric_types::Rating;

    /// Minimal xorshift64 for property sweeps.
    struct SimpleRng(u64);

    impl SimpleRng {
        fn next_f64(&mut self) -> f64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            (x >> 11) as f64 / (1u64 << 53) as f64
        }

        fn next_score(&mut self) -> f64 {
            1.0 + 9.0 * self.next_f64()
        }
    }

    #[test]
    fn test_structure_mean() {
        let s = StructureScores::new(8.0, 7.0, 9.0, 8.0);
        assert_eq!(average_structure(&s).unwrap(), 8.0);
    }

    #[test]
    fn test_structure_always_within_bounds() {
        let mut rng = SimpleRng(0xDEAD_BEEF_CAFE_BABE);
        for _ in 0..1000 {
            let s = StructureScores::new(
                rng.next_score(),
                rng.next_score(),
                rng.next_score(),
                rng.next_score(),
            );
            let avg = average_structure(&s).unwrap();
            assert!((1.0..=10.0).contains(&avg), "avg={avg} for {s:?}");
        }
    }

    #[test]
    fn test_structure_extremes() {
        assert_eq!(average_structure(&StructureScores::new(1.0, 1.0, 1.0, 1.0)).unwrap(), 1.0);
        assert_eq!(
            average_structure(&StructureScores::new(10.0, 10.0, 10.0, 10.0)).unwrap(),
            10.0
        );
    }

    #[test]
    fn test_structure_out_of_range_rejected() {
        let s = StructureScores::new(8.0, 7.0, 11.0, 8.0);
        assert!(matches!(
            average_structure(&s),
            Err(RubricError::ScoreOutOfRange { .. })
        ));
    }

    #[test]
    fn test_structure_nan_rejected() {
        let s = StructureScores::new(8.0, f64::NAN, 9.0, 8.0);
        assert!(average_structure(&s).is_err());
    }

    #[test]
    fn test_behavior_excludes_not_applicable_from_denominator() {
        let mut b = BehaviorScores::scored([6.0, 6.0, 6.0, 6.0, 1.0, 1.0]);
        b.comparison = Rating::NotApplicable;
        b.preference = Rating::NotApplicable;
        assert_eq!(average_behavior(&b).unwrap(), 6.0);
    }

    #[test]
    fn test_behavior_all_scored() {
        let b = BehaviorScores::scored([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!((average_behavior(&b).unwrap() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_behavior_all_not_applicable_is_fatal() {
        let b = BehaviorScores::from_ratings([Rating::NotApplicable; 6]);
        assert_eq!(average_behavior(&b), Err(RubricError::NoApplicableBehavior));
    }

    #[test]
    fn test_behavior_core_not_applicable_is_fatal() {
        let mut b = BehaviorScores::scored([7.0; 6]);
        b.robustness = Rating::NotApplicable;
        assert!(matches!(
            average_behavior(&b),
            Err(RubricError::NotApplicableForbidden { .. })
        ));
    }

    #[test]
    fn test_specialization_empty_is_zero() {
        assert_eq!(average_specialization(&SpecializationScores::new()).unwrap(), 0.0);
    }

    #[test]
    fn test_specialization_mean() {
        let mut m = SpecializationScores::new();
        m.insert("legal_citation".into(), 6.0);
        m.insert("statute_coverage".into(), 9.0);
        assert_eq!(average_specialization(&m).unwrap(), 7.5);
    }

    #[test]
    fn test_specialization_out_of_range_rejected() {
        let mut m = SpecializationScores::new();
        m.insert("latency".into(), 0.5);
        let err = average_specialization(&m).unwrap_err();
        assert!(err.to_string().contains("specialization.latency"));
    }
}
