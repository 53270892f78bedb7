// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Rubric Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Data model, configuration, and error hierarchy for the Rubric
//! Kernel, the two-analyst scoring engine behind the Quality Index,
//! Alignment Rate and Superintelligence Index.

pub mod config;
pub mod error;
pub mod evaluation;
pub mod metrics;
pub mod pathology;
pub mod score;

pub use config::{RubricConfig, APERTURE_EPSILON, EDGE_COUNT, TARGET_APERTURE};
pub use error::{RubricError, RubricResult};
pub use evaluation::{AnalystEvaluation, ConsensusEvaluation, MergedText};
pub use metrics::{
    AlignmentCategory, AlignmentRate, AnalystDivergence, BalanceResult, EvaluationReport,
    QualityMetrics,
};
pub use pathology::{Pathology, PathologySet};
pub use score::{
    validate_score, BehaviorField, BehaviorScores, Rating, SpecializationScores,
    StructureScores, SCORE_MAX, SCORE_MIN,
};
