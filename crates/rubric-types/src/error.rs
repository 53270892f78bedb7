// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Rubric Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Rubric Kernel failures.
///
/// Every variant is fatal: the caller must not trust any partial output.
/// Degraded conditions (non-finite behavior data, missing duration) are
/// carried inside the returned metrics instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RubricError {
    /// A numeric score is non-finite or outside [1, 10].
    #[error("score out of range: {field} = {value} (expected finite value in [1, 10])")]
    ScoreOutOfRange { field: String, value: f64 },

    /// "Not applicable" used on a field that must always be scored.
    #[error("field {field} does not accept \"not applicable\"")]
    NotApplicableForbidden { field: String },

    /// Behavior set has no numeric field left to average.
    #[error("behavior scores contain no numeric value")]
    NoApplicableBehavior,

    /// Wrong number of edge scores or edge weights for K4.
    #[error("K4 balance needs exactly {expected} values, got {got}")]
    EdgeCount { expected: usize, got: usize },

    /// Edge weight is non-finite or not strictly positive.
    #[error("edge weight {index} must be finite and > 0, got {value}")]
    InvalidWeight { index: usize, value: f64 },

    /// Gauge-fixed Laplacian system could not be solved.
    #[error("reduced Laplacian system is singular (pivot {pivot:e})")]
    SingularSystem { pivot: f64 },

    /// Total weighted energy of the behavior vector is not positive.
    #[error("behavior vector has zero weighted energy")]
    ZeroEnergy,

    /// Pathology label outside the controlled vocabulary.
    #[error("unknown pathology label: {0}")]
    UnknownPathology(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Malformed evaluation payload.
    #[error("parse error: {0}")]
    Parse(String),

    /// Result record could not be written out as JSON.
    #[error("serialization error: {0}")]
    Serialize(String),
}

pub type RubricResult<T> = Result<T, RubricError>;
