// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Analyst and Consensus Evaluations
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{RubricError, RubricResult};
use crate::pathology::PathologySet;
use crate::score::{validate_score, BehaviorScores, SpecializationScores, StructureScores};

/// One analyst's complete submission for one artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystEvaluation {
    pub structure: StructureScores,
    pub behavior: BehaviorScores,
    #[serde(default)]
    pub specialization: SpecializationScores,
    #[serde(default)]
    pub pathologies: PathologySet,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub weaknesses: String,
    #[serde(default)]
    pub insights: String,
}

impl AnalystEvaluation {
    pub fn new(structure: StructureScores, behavior: BehaviorScores) -> Self {
        Self {
            structure,
            behavior,
            specialization: SpecializationScores::new(),
            pathologies: PathologySet::new(),
            strengths: String::new(),
            weaknesses: String::new(),
            insights: String::new(),
        }
    }

    /// Parse from JSON. Shape only; ranges are checked by [`validate`](Self::validate).
    pub fn from_json(json: &str) -> RubricResult<Self> {
        serde_json::from_str(json).map_err(|e| RubricError::Parse(e.to_string()))
    }

    /// Check every score group against the rubric bounds.
    pub fn validate(&self) -> RubricResult<()> {
        self.structure.validate()?;
        self.behavior.validate()?;
        for (key, &value) in &self.specialization {
            validate_score(&format!("specialization.{key}"), value)?;
        }
        Ok(())
    }
}

/// A consensus free-text field with both original submissions kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedText {
    pub consensus: String,
    pub analyst_a: String,
    pub analyst_b: String,
}

impl MergedText {
    /// Prefer analyst A's non-blank text, else analyst B's.
    pub fn merge(a: &str, b: &str) -> Self {
        let consensus = if a.trim().is_empty() { b } else { a };
        Self {
            consensus: consensus.to_string(),
            analyst_a: a.to_string(),
            analyst_b: b.to_string(),
        }
    }
}

/// Merged view of exactly two analyst evaluations.
///
/// Derived, never edited: rebuild it from the two sources whenever they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusEvaluation {
    pub structure: StructureScores,
    pub behavior: BehaviorScores,
    pub specialization: SpecializationScores,
    pub pathologies: PathologySet,
    pub strengths: MergedText,
    pub weaknesses: MergedText,
    pub insights: MergedText,
}

impl ConsensusEvaluation {
    pub fn to_json(&self) -> RubricResult<String> {
        serde_json::to_string(self).map_err(|e| RubricError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathology::Pathology;
    use crate::score::Rating;

    const SAMPLE: &str = r#"{
        "structure": {"clarity": 8, "completeness": 7, "accuracy": 9, "organization": 8},
        "behavior": {
            "coherence": 8, "honesty": 7.5, "humility": 6, "robustness": 7,
            "comparison": "N/A", "preference": 9
        },
        "specialization": {"legal_citation": 6},
        "pathologies": ["sycophantic_agreement"],
        "strengths": "Well organised."
    }"#;

    #[test]
    fn test_from_json_sample() {
        let eval = AnalystEvaluation::from_json(SAMPLE).unwrap();
        assert_eq!(eval.structure.accuracy, 9.0);
        assert_eq!(eval.behavior.comparison, Rating::NotApplicable);
        assert_eq!(eval.behavior.honesty, Rating::Scored(7.5));
        assert_eq!(eval.specialization["legal_citation"], 6.0);
        assert!(eval.pathologies.contains(&Pathology::SycophanticAgreement));
        assert_eq!(eval.weaknesses, "");
        assert!(eval.validate().is_ok());
    }

    #[test]
    fn test_from_json_missing_structure_field() {
        let json = r#"{
            "structure": {"clarity": 8, "completeness": 7, "accuracy": 9},
            "behavior": {"coherence": 8, "honesty": 7, "humility": 6, "robustness": 7,
                         "comparison": 5, "preference": 9}
        }"#;
        let err = AnalystEvaluation::from_json(json).unwrap_err();
        assert!(matches!(err, RubricError::Parse(_)));
    }

    #[test]
    fn test_validate_specialization_range() {
        let mut eval = AnalystEvaluation::from_json(SAMPLE).unwrap();
        eval.specialization.insert("latency".into(), 12.0);
        let err = eval.validate().unwrap_err();
        assert!(err.to_string().contains("specialization.latency"));
    }

    #[test]
    fn test_merged_text_prefers_first_non_blank() {
        let m = MergedText::merge("   ", "from b");
        assert_eq!(m.consensus, "from b");
        assert_eq!(m.analyst_a, "   ");
        assert_eq!(m.analyst_b, "from b");

        let m = MergedText::merge("from a", "from b");
        assert_eq!(m.consensus, "from a");
    }

    #[test]
    fn test_merged_text_both_empty() {
        let m = MergedText::merge("", "");
        assert_eq!(m, MergedText::default());
    }

    #[test]
    fn test_consensus_to_json() {
        let eval = AnalystEvaluation::from_json(SAMPLE).unwrap();
        let consensus = ConsensusEvaluation {
            structure: eval.structure,
            behavior: eval.behavior,
            specialization: eval.specialization.clone(),
            pathologies: eval.pathologies.clone(),
            strengths: MergedText::merge(&eval.strengths, ""),
            weaknesses: MergedText::default(),
            insights: MergedText::default(),
        };
        let json = consensus.to_json().unwrap();
        assert!(json.contains(r#""comparison":"N/A""#));
        assert!(json.contains(r#""pathologies":["sycophantic_agreement"]"#));
    }
}
