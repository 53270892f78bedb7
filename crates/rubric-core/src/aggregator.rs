// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Two-Analyst Evaluation Aggregator
// ─────────────────────────────────────────────────────────────────────
//! Merges two independent analyst evaluations into one consensus.
//!
//! | Group | Policy |
//! |-------|--------|
//! | structure | mean of the pair; both sides mandatory |
//! | behavior (core four) | mean of the pair |
//! | behavior (comparison, preference) | both scored → mean; one scored → that one; neither → N/A |
//! | specialization | union of keys; shared → mean; one-sided → that value |
//! | pathologies | union (flagged by either analyst survives) |
//! | free text | analyst A if non-blank, else analyst B; originals kept |

use rubric_types::score::validate_score;
use rubric_types::{
    AnalystDivergence, AnalystEvaluation, BehaviorField, BehaviorScores, ConsensusEvaluation,
    MergedText, Rating, RubricResult, SpecializationScores, StructureScores,
};

#[inline]
fn pair_mean(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// Consensus of two ratings. A numeric opinion outweighs an abstention;
/// a double abstention stays "not applicable".
pub fn merge_rating(a: Rating, b: Rating) -> Rating {
    match (a, b) {
        (Rating::Scored(x), Rating::Scored(y)) => Rating::Scored(pair_mean(x, y)),
        (Rating::Scored(x), Rating::NotApplicable) | (Rating::NotApplicable, Rating::Scored(x)) => {
            Rating::Scored(x)
        }
        (Rating::NotApplicable, Rating::NotApplicable) => Rating::NotApplicable,
    }
}

fn merge_structure(a: &StructureScores, b: &StructureScores) -> RubricResult<StructureScores> {
    a.validate()?;
    b.validate()?;
    let (va, vb) = (a.values(), b.values());
    Ok(StructureScores::from_values([
        pair_mean(va[0], vb[0]),
        pair_mean(va[1], vb[1]),
        pair_mean(va[2], vb[2]),
        pair_mean(va[3], vb[3]),
    ]))
}

fn merge_behavior(a: &BehaviorScores, b: &BehaviorScores) -> RubricResult<BehaviorScores> {
    a.validate()?;
    b.validate()?;
    let merged = BehaviorField::ALL.map(|field| merge_rating(a.get(field), b.get(field)));
    Ok(BehaviorScores::from_ratings(merged))
}

fn merge_specialization(
    a: &SpecializationScores,
    b: &SpecializationScores,
) -> RubricResult<SpecializationScores> {
    for (key, &value) in a.iter().chain(b.iter()) {
        validate_score(&format!("specialization.{key}"), value)?;
    }
    let mut merged = a.clone();
    for (key, &vb) in b {
        merged
            .entry(key.clone())
            .and_modify(|va| *va = pair_mean(*va, vb))
            .or_insert(vb);
    }
    Ok(merged)
}

/// Build the consensus evaluation from two analyst submissions.
///
/// Fails on any out-of-range score, or "not applicable" on a core
/// behavior field, in either submission.
pub fn aggregate(a: &AnalystEvaluation, b: &AnalystEvaluation) -> RubricResult<ConsensusEvaluation> {
    let structure = merge_structure(&a.structure, &b.structure)?;
    let behavior = merge_behavior(&a.behavior, &b.behavior)?;
    let specialization = merge_specialization(&a.specialization, &b.specialization)?;
    let pathologies = a.pathologies.union(&b.pathologies).copied().collect();

    Ok(ConsensusEvaluation {
        structure,
        behavior,
        specialization,
        pathologies,
        strengths: MergedText::merge(&a.strengths, &b.strengths),
        weaknesses: MergedText::merge(&a.weaknesses, &b.weaknesses),
        insights: MergedText::merge(&a.insights, &b.insights),
    })
}

/// Per-group disagreement between the two analysts.
///
/// Both submissions must pass [`AnalystEvaluation::validate`]. Only fields
/// both analysts scored are compared.
pub fn divergence(
    a: &AnalystEvaluation,
    b: &AnalystEvaluation,
) -> RubricResult<AnalystDivergence> {
    a.validate()?;
    b.validate()?;

    let structure_max_delta = a
        .structure
        .values()
        .iter()
        .zip(b.structure.values())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max);

    let behavior_max_delta = a
        .behavior
        .ratings()
        .iter()
        .zip(b.behavior.ratings())
        .filter_map(|(x, y)| Some((x.value()? - y.value()?).abs()))
        .fold(0.0, f64::max);

    let specialization_max_delta = a
        .specialization
        .iter()
        .filter_map(|(key, va)| b.specialization.get(key).map(|vb| (va - vb).abs()))
        .fold(0.0, f64::max);

    Ok(AnalystDivergence {
        structure_max_delta,
        behavior_max_delta,
        specialization_max_delta,
        shared_pathologies: a.pathologies.intersection(&b.pathologies).copied().collect(),
        disputed_pathologies: a
            .pathologies
            .symmetric_difference(&b.pathologies)
            .copied()
            .collect(),
    })
}
