// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Rubric Kernel Score Types
// ─────────────────────────────────────────────────────────────────────
//! Per-group score sets as entered by a single analyst.
//!
//! Every numeric score lives in the closed interval [1, 10]. Values
//! outside that range are rejected, never clamped.
//!
//! "Not applicable" is a domain state ([`Rating::NotApplicable`]) and is
//! only accepted on the behavior fields `comparison` and `preference`.
//! It is resolved during aggregation and never turns into a number.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{RubricError, RubricResult};

pub const SCORE_MIN: f64 = 1.0;
pub const SCORE_MAX: f64 = 10.0;

/// Reject a score that is non-finite or outside [1, 10].
#[inline]
pub fn validate_score(field: &str, value: f64) -> RubricResult<f64> {
    if value.is_finite() && (SCORE_MIN..=SCORE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(RubricError::ScoreOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

/// Domain-specific criteria: label → score. Keys are analyst-defined.
pub type SpecializationScores = BTreeMap<String, f64>;

// ── Rating ──────────────────────────────────────────────────────────

/// A behavior score that may be marked "not applicable".
///
/// Wire format: a JSON number, or `"N/A"` / `"NA"` / `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Scored(f64),
    NotApplicable,
}

impl Rating {
    pub fn value(self) -> Option<f64> {
        match self {
            Rating::Scored(v) => Some(v),
            Rating::NotApplicable => None,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Scored(v) => write!(f, "{v}"),
            Rating::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Scored(v) => serializer.serialize_f64(*v),
            Rating::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

struct RatingVisitor;

impl<'de> Visitor<'de> for RatingVisitor {
    type Value = Rating;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or \"N/A\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Rating, E> {
        Ok(Rating::Scored(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Rating, E> {
        Ok(Rating::Scored(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Rating, E> {
        Ok(Rating::Scored(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Rating, E> {
        let t = v.trim();
        if t.eq_ignore_ascii_case("n/a") || t.eq_ignore_ascii_case("na") {
            Ok(Rating::NotApplicable)
        } else {
            Err(E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    fn visit_none<E: de::Error>(self) -> Result<Rating, E> {
        Ok(Rating::NotApplicable)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Rating, E> {
        Ok(Rating::NotApplicable)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RatingVisitor)
    }
}

// ── Structure ───────────────────────────────────────────────────────

/// Four structural criteria. Always fully scored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureScores {
    pub clarity: f64,
    pub completeness: f64,
    pub accuracy: f64,
    pub organization: f64,
}

impl StructureScores {
    pub const FIELD_NAMES: [&'static str; 4] =
        ["clarity", "completeness", "accuracy", "organization"];

    pub fn new(clarity: f64, completeness: f64, accuracy: f64, organization: f64) -> Self {
        Self {
            clarity,
            completeness,
            accuracy,
            organization,
        }
    }

    pub fn values(&self) -> [f64; 4] {
        [self.clarity, self.completeness, self.accuracy, self.organization]
    }

    pub fn from_values(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    pub fn validate(&self) -> RubricResult<()> {
        for (name, value) in Self::FIELD_NAMES.iter().zip(self.values()) {
            validate_score(&format!("structure.{name}"), value)?;
        }
        Ok(())
    }
}

// ── Behavior ────────────────────────────────────────────────────────

/// The six behavior criteria, in K4 edge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorField {
    Coherence,
    Honesty,
    Humility,
    Robustness,
    Comparison,
    Preference,
}

impl BehaviorField {
    /// Edge order: (0,1) (0,2) (0,3) (1,2) (1,3) (2,3).
    pub const ALL: [BehaviorField; 6] = [
        BehaviorField::Coherence,
        BehaviorField::Honesty,
        BehaviorField::Humility,
        BehaviorField::Robustness,
        BehaviorField::Comparison,
        BehaviorField::Preference,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BehaviorField::Coherence => "coherence",
            BehaviorField::Honesty => "honesty",
            BehaviorField::Humility => "humility",
            BehaviorField::Robustness => "robustness",
            BehaviorField::Comparison => "comparison",
            BehaviorField::Preference => "preference",
        }
    }

    /// Only comparison and preference may be left unscored.
    pub fn allows_not_applicable(self) -> bool {
        matches!(self, BehaviorField::Comparison | BehaviorField::Preference)
    }
}

impl fmt::Display for BehaviorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Six behavior criteria. Each maps onto one edge of K4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorScores {
    pub coherence: Rating,
    pub honesty: Rating,
    pub humility: Rating,
    pub robustness: Rating,
    #[serde(default = "not_applicable")]
    pub comparison: Rating,
    #[serde(default = "not_applicable")]
    pub preference: Rating,
}

fn not_applicable() -> Rating {
    Rating::NotApplicable
}

impl BehaviorScores {
    /// All six fields scored.
    pub fn scored(values: [f64; 6]) -> Self {
        Self::from_ratings(values.map(Rating::Scored))
    }

    pub fn from_ratings(r: [Rating; 6]) -> Self {
        Self {
            coherence: r[0],
            honesty: r[1],
            humility: r[2],
            robustness: r[3],
            comparison: r[4],
            preference: r[5],
        }
    }

    /// Ratings in K4 edge order.
    pub fn ratings(&self) -> [Rating; 6] {
        [
            self.coherence,
            self.honesty,
            self.humility,
            self.robustness,
            self.comparison,
            self.preference,
        ]
    }

    pub fn get(&self, field: BehaviorField) -> Rating {
        match field {
            BehaviorField::Coherence => self.coherence,
            BehaviorField::Honesty => self.honesty,
            BehaviorField::Humility => self.humility,
            BehaviorField::Robustness => self.robustness,
            BehaviorField::Comparison => self.comparison,
            BehaviorField::Preference => self.preference,
        }
    }

    /// Numeric values only, skipping "not applicable".
    pub fn applicable_values(&self) -> Vec<f64> {
        self.ratings().iter().filter_map(|r| r.value()).collect()
    }

    /// Reject "not applicable" on core fields and out-of-range scores.
    pub fn validate(&self) -> RubricResult<()> {
        for field in BehaviorField::ALL {
            match self.get(field) {
                Rating::Scored(v) => {
                    validate_score(&format!("behavior.{field}"), v)?;
                }
                Rating::NotApplicable if !field.allows_not_applicable() => {
                    return Err(RubricError::NotApplicableForbidden {
                        field: format!("behavior.{field}"),
                    });
                }
                Rating::NotApplicable => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_score_bounds() {
        assert!(validate_score("x", 1.0).is_ok());
        assert!(validate_score("x", 10.0).is_ok());
        assert!(validate_score("x", 0.999).is_err());
        assert!(validate_score("x", 10.001).is_err());
        assert!(validate_score("x", f64::NAN).is_err());
        assert!(validate_score("x", f64::INFINITY).is_err());
    }

    #[test]
    fn test_rating_deserialize_number() {
        let r: Rating = serde_json::from_str("7").unwrap();
        assert_eq!(r, Rating::Scored(7.0));
        let r: Rating = serde_json::from_str("7.5").unwrap();
        assert_eq!(r, Rating::Scored(7.5));
    }

    #[test]
    fn test_rating_deserialize_not_applicable() {
        for raw in [r#""N/A""#, r#""n/a""#, r#""NA""#, "null"] {
            let r: Rating = serde_json::from_str(raw).unwrap();
            assert_eq!(r, Rating::NotApplicable, "input {raw}");
        }
    }

    #[test]
    fn test_rating_rejects_other_strings() {
        assert!(serde_json::from_str::<Rating>(r#""seven""#).is_err());
    }

    #[test]
    fn test_rating_serialize() {
        assert_eq!(serde_json::to_string(&Rating::Scored(8.5)).unwrap(), "8.5");
        assert_eq!(serde_json::to_string(&Rating::NotApplicable).unwrap(), r#""N/A""#);
    }

    #[test]
    fn test_structure_validate() {
        assert!(StructureScores::new(8.0, 7.0, 9.0, 8.0).validate().is_ok());
        let err = StructureScores::new(8.0, 0.0, 9.0, 8.0).validate().unwrap_err();
        assert_eq!(
            err,
            RubricError::ScoreOutOfRange {
                field: "structure.completeness".into(),
                value: 0.0
            }
        );
    }

    #[test]
    fn test_behavior_na_only_on_optional_fields() {
        let mut b = BehaviorScores::scored([8.0; 6]);
        b.comparison = Rating::NotApplicable;
        b.preference = Rating::NotApplicable;
        assert!(b.validate().is_ok());

        b.honesty = Rating::NotApplicable;
        assert_eq!(
            b.validate().unwrap_err(),
            RubricError::NotApplicableForbidden {
                field: "behavior.honesty".into()
            }
        );
    }

    #[test]
    fn test_behavior_applicable_values() {
        let mut b = BehaviorScores::scored([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        b.comparison = Rating::NotApplicable;
        assert_eq!(b.applicable_values(), vec![1.0, 2.0, 3.0, 4.0, 6.0]);
    }

    #[test]
    fn test_behavior_optional_fields_default_to_not_applicable() {
        let json = r#"{"coherence": 8, "honesty": 7, "humility": 6, "robustness": 9}"#;
        let b: BehaviorScores = serde_json::from_str(json).unwrap();
        assert_eq!(b.comparison, Rating::NotApplicable);
        assert_eq!(b.preference, Rating::NotApplicable);
        assert!(b.validate().is_ok());
    }

    #[test]
    fn test_behavior_field_order_matches_ratings() {
        let b = BehaviorScores::scored([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        for (i, field) in BehaviorField::ALL.iter().enumerate() {
            assert_eq!(b.get(*field), b.ratings()[i]);
        }
    }
}
