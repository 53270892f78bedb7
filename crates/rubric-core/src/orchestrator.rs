// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Metrics Orchestrator
// ─────────────────────────────────────────────────────────────────────
//! Single entry point from consensus scores to the metrics bundle.
//!
//! ```text
//!   analyst A ─┐
//!              ├─ aggregate ─ consensus ─┬─ averages ─ QI ─ AR
//!   analyst B ─┘                         └─ six behavior edges ─ K4 balance ─ SI
//! ```
//!
//! Fatal input (bad structure scores, behavior with no numeric field)
//! aborts the call. A behavior field still "not applicable" after
//! aggregation only degrades SI; a missing duration only degrades AR.

use rubric_types::{
    AlignmentRate, AnalystEvaluation, ConsensusEvaluation, EvaluationReport, QualityMetrics,
    RubricConfig, RubricError, RubricResult,
};

use crate::aggregator::{aggregate, divergence};
use crate::alignment::RateBands;
use crate::averager::{average_behavior, average_specialization, average_structure};
use crate::balance::BalanceEngine;
use crate::quality::QualityWeights;

fn abort(stage: &str, err: RubricError) -> RubricError {
    log::error!("quality metrics aborted at {stage}: {err}");
    err
}

/// Stateless pipeline over a validated [`RubricConfig`].
///
/// Holds only immutable parameters; safe to share across threads.
#[derive(Debug, Clone)]
pub struct MetricsOrchestrator {
    config: RubricConfig,
    weights: QualityWeights,
    bands: RateBands,
    balance: BalanceEngine,
}

impl Default for MetricsOrchestrator {
    fn default() -> Self {
        Self::from_valid_config(RubricConfig::default())
    }
}

impl MetricsOrchestrator {
    pub fn new(config: RubricConfig) -> RubricResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: RubricConfig) -> Self {
        Self {
            weights: QualityWeights::from_config(&config),
            bands: RateBands::from_config(&config),
            balance: BalanceEngine::from_config(&config),
            config,
        }
    }

    /// Compute the full metrics bundle for one consensus evaluation.
    pub fn compute_quality_metrics(
        &self,
        consensus: &ConsensusEvaluation,
        duration_minutes: Option<f64>,
    ) -> RubricResult<QualityMetrics> {
        let structure_average =
            average_structure(&consensus.structure).map_err(|e| abort("structure", e))?;
        let behavior_average =
            average_behavior(&consensus.behavior).map_err(|e| abort("behavior", e))?;
        let specialization_average = average_specialization(&consensus.specialization)
            .map_err(|e| abort("specialization", e))?;

        let quality_index =
            self.weights
                .quality_index(structure_average, behavior_average, specialization_average);

        let alignment = match duration_minutes {
            Some(minutes) => self.bands.alignment_rate(quality_index, minutes),
            None => {
                log::warn!("alignment rate: no duration supplied, reporting rate 0 (SLOW)");
                AlignmentRate::UNAVAILABLE
            }
        };

        // Still-"not applicable" fields become NaN here, which the balance
        // engine treats as "SI unavailable" rather than as an error.
        let edges = consensus
            .behavior
            .ratings()
            .map(|r| r.value().unwrap_or(f64::NAN));
        let balance = self
            .balance
            .compute(&edges, self.config.edge_weights.as_ref().map(|w| &w[..]))
            .map_err(|e| abort("balance", e))?;

        log::debug!(
            "quality metrics: qi={quality_index:.3} ar={:.4} ({}) si={:.3}",
            alignment.rate,
            alignment.category,
            balance.superintelligence_index
        );

        Ok(QualityMetrics {
            quality_index,
            alignment_rate: alignment.rate,
            alignment_rate_category: alignment.category,
            superintelligence_index: balance.superintelligence_index,
            si_deviation: balance.deviation,
            aperture: balance.aperture,
            si_available: !balance.degraded,
            structure_average,
            behavior_average,
            specialization_average,
        })
    }

    /// Aggregate two analyst evaluations and compute their metrics.
    pub fn evaluate(
        &self,
        analyst_a: &AnalystEvaluation,
        analyst_b: &AnalystEvaluation,
        duration_minutes: Option<f64>,
    ) -> RubricResult<EvaluationReport> {
        let consensus = aggregate(analyst_a, analyst_b).map_err(|e| abort("aggregation", e))?;

        let divergence = divergence(analyst_a, analyst_b).map_err(|e| abort("divergence", e))?;
        if divergence.max_delta() > self.config.disagreement_warn_threshold {
            log::warn!(
                "analysts disagree by up to {:.2} points (structure {:.2}, behavior {:.2}, specialization {:.2})",
                divergence.max_delta(),
                divergence.structure_max_delta,
                divergence.behavior_max_delta,
                divergence.specialization_max_delta
            );
        }

        let metrics = self.compute_quality_metrics(&consensus, duration_minutes)?;
        Ok(EvaluationReport {
            consensus,
            metrics,
            divergence,
        })
    }
}

/// [`MetricsOrchestrator::compute_quality_metrics`] with the canonical rubric.
pub fn compute_quality_metrics(
    consensus: &ConsensusEvaluation,
    duration_minutes: Option<f64>,
) -> RubricResult<QualityMetrics> {
    MetricsOrchestrator::default().compute_quality_metrics(consensus, duration_minutes)
}
