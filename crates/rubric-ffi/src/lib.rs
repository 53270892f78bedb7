// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Rubric Kernel PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// PyO3 macros expand to unsafe blocks, so unsafe_code is not denied here.
//! Python-callable wrappers around the Rubric Kernel.
//!
//! The capture/editing layer collects two analyst evaluations as JSON,
//! hands them across this boundary, and renders the returned metrics.
//!
//! # FFI Safety
//!
//! - Every fatal kernel error surfaces as a Python `ValueError`; no
//!   partial metrics are returned alongside an error.
//! - Degraded results are ordinary values: check `si_available` before
//!   rendering SI, and treat `alignment_rate == 0` with category
//!   `"SLOW"` as "no duration" when none was supplied.
//! - All config validated before storage (`RubricConfig::validate()`).
//!
//! Install: `cd rubric-kernel && pip install -e crates/rubric-ffi`
//! (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from rubric_kernel import compute_quality_metrics
//!
//! metrics = compute_quality_metrics(analyst_a_json, analyst_b_json, duration_minutes=20.0)
//! print(metrics.quality_index, metrics.alignment_rate_category)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use rubric_core::MetricsOrchestrator;
use rubric_types::{
    AnalystEvaluation, QualityMetrics, RubricConfig, RubricError, EDGE_COUNT,
};

fn value_error(err: RubricError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn parse_pair(
    analyst_a_json: &str,
    analyst_b_json: &str,
) -> PyResult<(AnalystEvaluation, AnalystEvaluation)> {
    let a = AnalystEvaluation::from_json(analyst_a_json).map_err(value_error)?;
    let b = AnalystEvaluation::from_json(analyst_b_json).map_err(value_error)?;
    Ok((a, b))
}

// ─── PyRubricConfig ─────────────────────────────────────────────────

/// Python-visible configuration for the Rubric Kernel.
#[pyclass(name = "RubricConfig")]
#[derive(Clone)]
struct PyRubricConfig {
    inner: RubricConfig,
}

#[pymethods]
impl PyRubricConfig {
    #[new]
    #[pyo3(signature = (
        structure_weight = 0.40,
        behavior_weight = 0.40,
        specialization_weight = 0.20,
        target_aperture = 0.02070,
        aperture_epsilon = 1e-10,
        slow_rate_threshold = 0.03,
        superficial_rate_threshold = 0.15,
        edge_weights = None,
        disagreement_warn_threshold = 3.0,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        structure_weight: f64,
        behavior_weight: f64,
        specialization_weight: f64,
        target_aperture: f64,
        aperture_epsilon: f64,
        slow_rate_threshold: f64,
        superficial_rate_threshold: f64,
        edge_weights: Option<Vec<f64>>,
        disagreement_warn_threshold: f64,
    ) -> PyResult<Self> {
        let edge_weights = match edge_weights {
            Some(ws) => {
                let got = ws.len();
                let arr: [f64; EDGE_COUNT] = ws.try_into().map_err(|_| {
                    value_error(RubricError::EdgeCount {
                        expected: EDGE_COUNT,
                        got,
                    })
                })?;
                Some(arr)
            }
            None => None,
        };
        let config = RubricConfig {
            structure_weight,
            behavior_weight,
            specialization_weight,
            target_aperture,
            aperture_epsilon,
            slow_rate_threshold,
            superficial_rate_threshold,
            edge_weights,
            disagreement_warn_threshold,
        };
        config.validate().map_err(value_error)?;
        Ok(Self { inner: config })
    }

    /// Construct from JSON string.
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let config = RubricConfig::from_json(json).map_err(value_error)?;
        config.validate().map_err(value_error)?;
        Ok(Self { inner: config })
    }

    fn __repr__(&self) -> String {
        format!(
            "RubricConfig(weights={}/{}/{}, target_aperture={}, bands={}..{})",
            self.inner.structure_weight,
            self.inner.behavior_weight,
            self.inner.specialization_weight,
            self.inner.target_aperture,
            self.inner.slow_rate_threshold,
            self.inner.superficial_rate_threshold
        )
    }
}

// ─── PyQualityMetrics ───────────────────────────────────────────────

/// Python-visible metrics bundle.
#[pyclass(name = "QualityMetrics")]
#[derive(Clone)]
struct PyQualityMetrics {
    inner: QualityMetrics,
}

#[pymethods]
impl PyQualityMetrics {
    #[getter]
    fn quality_index(&self) -> f64 {
        self.inner.quality_index
    }

    #[getter]
    fn alignment_rate(&self) -> f64 {
        self.inner.alignment_rate
    }

    #[getter]
    fn alignment_rate_category(&self) -> &'static str {
        self.inner.alignment_rate_category.as_str()
    }

    #[getter]
    fn superintelligence_index(&self) -> f64 {
        self.inner.superintelligence_index
    }

    #[getter]
    fn si_deviation(&self) -> f64 {
        self.inner.si_deviation
    }

    #[getter]
    fn aperture(&self) -> f64 {
        self.inner.aperture
    }

    /// False when SI fields hold the fallback and must render as unavailable.
    #[getter]
    fn si_available(&self) -> bool {
        self.inner.si_available
    }

    #[getter]
    fn structure_average(&self) -> f64 {
        self.inner.structure_average
    }

    #[getter]
    fn behavior_average(&self) -> f64 {
        self.inner.behavior_average
    }

    #[getter]
    fn specialization_average(&self) -> f64 {
        self.inner.specialization_average
    }

    fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let m = &self.inner;
        let dict = PyDict::new(py);
        dict.set_item("quality_index", m.quality_index)?;
        dict.set_item("alignment_rate", m.alignment_rate)?;
        dict.set_item("alignment_rate_category", m.alignment_rate_category.as_str())?;
        dict.set_item("superintelligence_index", m.superintelligence_index)?;
        dict.set_item("si_deviation", m.si_deviation)?;
        dict.set_item("aperture", m.aperture)?;
        dict.set_item("si_available", m.si_available)?;
        dict.set_item("structure_average", m.structure_average)?;
        dict.set_item("behavior_average", m.behavior_average)?;
        dict.set_item("specialization_average", m.specialization_average)?;
        Ok(dict)
    }

    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        let si = if self.inner.si_available {
            format!("{:.2}", self.inner.superintelligence_index)
        } else {
            "unavailable".to_string()
        };
        format!(
            "QualityMetrics(qi={:.2}, ar={:.4} {}, si={si})",
            self.inner.quality_index,
            self.inner.alignment_rate,
            self.inner.alignment_rate_category,
        )
    }
}

// ─── Functions ──────────────────────────────────────────────────────

/// Aggregate two analyst evaluations (JSON) and compute the metrics bundle.
///
/// Args:
///     analyst_a_json: First analyst's evaluation as a JSON object string.
///     analyst_b_json: Second analyst's evaluation.
///     duration_minutes: Optional review time; omitted → rate 0, "SLOW".
///     config: Optional RubricConfig (canonical rubric if None).
#[pyfunction]
#[pyo3(name = "compute_quality_metrics")]
#[pyo3(signature = (analyst_a_json, analyst_b_json, duration_minutes = None, config = None))]
fn py_compute_quality_metrics(
    analyst_a_json: &str,
    analyst_b_json: &str,
    duration_minutes: Option<f64>,
    config: Option<PyRubricConfig>,
) -> PyResult<PyQualityMetrics> {
    let (a, b) = parse_pair(analyst_a_json, analyst_b_json)?;
    let cfg = config.map(|c| c.inner).unwrap_or_default();
    let orchestrator = MetricsOrchestrator::new(cfg).map_err(value_error)?;
    let report = orchestrator
        .evaluate(&a, &b, duration_minutes)
        .map_err(value_error)?;
    Ok(PyQualityMetrics {
        inner: report.metrics,
    })
}

/// Aggregate two analyst evaluations and return the consensus as JSON.
#[pyfunction]
#[pyo3(name = "aggregate_evaluations")]
fn py_aggregate_evaluations(analyst_a_json: &str, analyst_b_json: &str) -> PyResult<String> {
    let (a, b) = parse_pair(analyst_a_json, analyst_b_json)?;
    let consensus = rubric_core::aggregate(&a, &b).map_err(value_error)?;
    consensus.to_json().map_err(value_error)
}

/// K4 balance on six edge scores. Returns a dict with
/// `superintelligence_index`, `aperture`, `deviation`, `degraded`.
#[pyfunction]
#[pyo3(name = "superintelligence_index")]
#[pyo3(signature = (scores, weights = None))]
fn py_superintelligence_index<'py>(
    py: Python<'py>,
    scores: Vec<f64>,
    weights: Option<Vec<f64>>,
) -> PyResult<Bound<'py, PyDict>> {
    let result = rubric_core::superintelligence_index(&scores, weights.as_deref())
        .map_err(value_error)?;
    let dict = PyDict::new(py);
    dict.set_item("superintelligence_index", result.superintelligence_index)?;
    dict.set_item("aperture", result.aperture)?;
    dict.set_item("deviation", result.deviation)?;
    dict.set_item("degraded", result.degraded)?;
    Ok(dict)
}

/// Quality Index from three 1–10 group averages (canonical weights).
#[pyfunction]
#[pyo3(name = "quality_index")]
fn py_quality_index(structure: f64, behavior: f64, specialization: f64) -> f64 {
    rubric_core::quality_index(structure, behavior, specialization)
}

/// Alignment Rate and its band for a Quality Index and duration.
#[pyfunction]
#[pyo3(name = "alignment_rate")]
fn py_alignment_rate(quality_index: f64, duration_minutes: f64) -> (f64, &'static str) {
    let ar = rubric_core::alignment_rate(quality_index, duration_minutes);
    (ar.rate, ar.category.as_str())
}

/// Disagreement between two analyst evaluations (JSON).
///
/// Out-of-range or forbidden "N/A" scores raise `ValueError`.
#[pyfunction]
#[pyo3(name = "analyst_divergence")]
fn py_analyst_divergence<'py>(
    py: Python<'py>,
    analyst_a_json: &str,
    analyst_b_json: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let (a, b) = parse_pair(analyst_a_json, analyst_b_json)?;
    let d = rubric_core::divergence(&a, &b).map_err(value_error)?;
    let labels = |set: &rubric_types::PathologySet| -> Vec<String> {
        set.iter().map(|p| p.label().to_string()).collect()
    };
    let dict = PyDict::new(py);
    dict.set_item("structure_max_delta", d.structure_max_delta)?;
    dict.set_item("behavior_max_delta", d.behavior_max_delta)?;
    dict.set_item("specialization_max_delta", d.specialization_max_delta)?;
    dict.set_item("max_delta", d.max_delta())?;
    dict.set_item("shared_pathologies", labels(&d.shared_pathologies))?;
    dict.set_item("disputed_pathologies", labels(&d.disputed_pathologies))?;
    Ok(dict)
}

// ─── Module Registration ────────────────────────────────────────────

/// Two-analyst scoring engine for Director-Class AI.
///
/// - `RubricConfig`: configuration
/// - `QualityMetrics`: metrics bundle
/// - `compute_quality_metrics`: full pipeline from two JSON evaluations
/// - `aggregate_evaluations`: consensus only
/// - `superintelligence_index`, `quality_index`, `alignment_rate`: single calculators
/// - `analyst_divergence`: inter-analyst disagreement report
#[pymodule]
fn rubric_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRubricConfig>()?;
    m.add_class::<PyQualityMetrics>()?;
    m.add_function(wrap_pyfunction!(py_compute_quality_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(py_aggregate_evaluations, m)?)?;
    m.add_function(wrap_pyfunction!(py_superintelligence_index, m)?)?;
    m.add_function(wrap_pyfunction!(py_quality_index, m)?)?;
    m.add_function(wrap_pyfunction!(py_alignment_rate, m)?)?;
    m.add_function(wrap_pyfunction!(py_analyst_divergence, m)?)?;
    Ok(())
}
