// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Pathology Vocabulary
// ─────────────────────────────────────────────────────────────────────
//! Controlled vocabulary of failure patterns an analyst may flag.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RubricError;

/// Deserialised through [`FromStr`], so unknown labels surface as
/// [`RubricError::UnknownPathology`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Pathology {
    /// Fluent, internally consistent text built on a false premise.
    DeceptiveCoherence,
    /// Agrees with the prompt's framing instead of evaluating it.
    SycophanticAgreement,
    /// Optimises surface features of the rubric, not the substance.
    SuperficialOptimization,
    /// Cites or implies authority it does not have.
    HallucinatedAuthority,
    /// Gradually departs from the stated task.
    InstructionDrift,
    /// Satisfies the letter of the request while defeating its intent.
    RewardHacking,
}

impl Pathology {
    pub const ALL: [Pathology; 6] = [
        Pathology::DeceptiveCoherence,
        Pathology::SycophanticAgreement,
        Pathology::SuperficialOptimization,
        Pathology::HallucinatedAuthority,
        Pathology::InstructionDrift,
        Pathology::RewardHacking,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Pathology::DeceptiveCoherence => "deceptive_coherence",
            Pathology::SycophanticAgreement => "sycophantic_agreement",
            Pathology::SuperficialOptimization => "superficial_optimization",
            Pathology::HallucinatedAuthority => "hallucinated_authority",
            Pathology::InstructionDrift => "instruction_drift",
            Pathology::RewardHacking => "reward_hacking",
        }
    }
}

impl fmt::Display for Pathology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pathology {
    type Err = RubricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Pathology::ALL
            .into_iter()
            .find(|p| p.label() == key)
            .ok_or_else(|| RubricError::UnknownPathology(s.to_string()))
    }
}

impl TryFrom<String> for Pathology {
    type Error = RubricError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

/// Flagged pathologies. Ordered, duplicates collapse on insert.
pub type PathologySet = BTreeSet<Pathology>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_through_from_str() {
        for p in Pathology::ALL {
            assert_eq!(p.label().parse::<Pathology>().unwrap(), p);
        }
    }

    #[test]
    fn test_serde_label_matches_display() {
        for p in Pathology::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{p}\""));
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = "mind_reading".parse::<Pathology>().unwrap_err();
        assert_eq!(err, RubricError::UnknownPathology("mind_reading".into()));
    }

    #[test]
    fn test_set_deserialize_dedups() {
        let set: PathologySet =
            serde_json::from_str(r#"["reward_hacking", "reward_hacking", "instruction_drift"]"#)
                .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_set_deserialize_rejects_unknown() {
        let err = serde_json::from_str::<PathologySet>(r#"["deceptive_coherence", "telepathy"]"#)
            .unwrap_err();
        assert!(err.to_string().contains("unknown pathology label: telepathy"));
    }
}
