// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — K4 Balance Engine (Superintelligence Index)
// ─────────────────────────────────────────────────────────────────────
//! Hodge-style split of six behavior scores on the complete graph K4.
//!
//! The six scores are edge values y on K4. The engine finds the vertex
//! potentials φ whose differences best explain y (weighted least
//! squares), and measures what is left over:
//!
//!   L = B·W·Bᵀ,  r = B·W·y,  L φ = r  (φ₀ pinned to 0)
//!   grad = Bᵀ φ,  residual = y − grad
//!   aperture = residualᵀ W residual / yᵀ W y
//!   deviation = max((a + ε)/A*, A*/(a + ε)),  SI = 100 / deviation
//!
//! A flat vector and a scattered vector both miss the target aperture
//! A* = 0.02070, from opposite sides, and are penalised symmetrically.
//!
//! The topology never changes, so the incidence matrix is constant data
//! and every operation works on fixed-size arrays (4×4, 4×6, 6-vectors).

use rubric_types::config::{APERTURE_EPSILON, EDGE_COUNT, TARGET_APERTURE};
use rubric_types::score::validate_score;
use rubric_types::{BalanceResult, BehaviorField, RubricConfig, RubricError, RubricResult};

pub const VERTEX_COUNT: usize = 4;

/// Edge (tail, head) pairs in behavior-field order.
pub const K4_EDGES: [(usize, usize); EDGE_COUNT] =
    [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];

/// Signed incidence matrix B: −1 at the tail, +1 at the head of each edge.
pub const INCIDENCE: [[f64; EDGE_COUNT]; VERTEX_COUNT] = [
    [-1.0, -1.0, -1.0, 0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0, -1.0, -1.0, 0.0],
    [0.0, 1.0, 0.0, 1.0, 0.0, -1.0],
    [0.0, 0.0, 1.0, 0.0, 1.0, 1.0],
];

/// Pivots smaller than this make the reduced system singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

const UNIT_WEIGHTS: [f64; EDGE_COUNT] = [1.0; EDGE_COUNT];

pub type EdgeVector = [f64; EDGE_COUNT];
pub type VertexVector = [f64; VERTEX_COUNT];
pub type Laplacian = [[f64; VERTEX_COUNT]; VERTEX_COUNT];

/// Weighted graph Laplacian L = B·W·Bᵀ.
pub fn laplacian(weights: &EdgeVector) -> Laplacian {
    let mut l = [[0.0; VERTEX_COUNT]; VERTEX_COUNT];
    for (i, row) in l.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            *cell = (0..EDGE_COUNT)
                .map(|e| INCIDENCE[i][e] * weights[e] * INCIDENCE[j][e])
                .sum();
        }
    }
    l
}

/// Right-hand side r = B·W·y (weighted net flow into each vertex).
pub fn divergence(weights: &EdgeVector, y: &EdgeVector) -> VertexVector {
    let mut r = [0.0; VERTEX_COUNT];
    for (i, ri) in r.iter_mut().enumerate() {
        *ri = (0..EDGE_COUNT)
            .map(|e| INCIDENCE[i][e] * weights[e] * y[e])
            .sum();
    }
    r
}

/// Edge differences Bᵀ·φ.
pub fn gradient(phi: &VertexVector) -> EdgeVector {
    let mut g = [0.0; EDGE_COUNT];
    for (e, ge) in g.iter_mut().enumerate() {
        *ge = (0..VERTEX_COUNT).map(|i| INCIDENCE[i][e] * phi[i]).sum();
    }
    g
}

/// vᵀ·W·v.
pub fn weighted_energy(v: &EdgeVector, weights: &EdgeVector) -> f64 {
    v.iter().zip(weights).map(|(x, w)| w * x * x).sum()
}

/// Solve L φ = r with φ₀ = 0.
///
/// L has nullity 1 on a connected graph; dropping vertex 0's row and
/// column leaves a 3×3 system, solved by Gaussian elimination with
/// partial pivoting.
pub fn solve_gauge_fixed(l: &Laplacian, r: &VertexVector) -> RubricResult<VertexVector> {
    const N: usize = VERTEX_COUNT - 1;
    let mut a = [[0.0; N + 1]; N];
    for i in 0..N {
        for j in 0..N {
            a[i][j] = l[i + 1][j + 1];
        }
        a[i][N] = r[i + 1];
    }

    for col in 0..N {
        let pivot_row = (col..N)
            .max_by(|&p, &q| a[p][col].abs().total_cmp(&a[q][col].abs()))
            .unwrap_or(col);
        let pivot = a[pivot_row][col];
        if !(pivot.abs() > PIVOT_TOLERANCE) {
            return Err(RubricError::SingularSystem { pivot });
        }
        a.swap(col, pivot_row);
        for row in (col + 1)..N {
            let factor = a[row][col] / a[col][col];
            for k in col..=N {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut x = [0.0; N];
    for row in (0..N).rev() {
        let tail: f64 = ((row + 1)..N).map(|k| a[row][k] * x[k]).sum();
        x[row] = (a[row][N] - tail) / a[row][row];
    }

    Ok([0.0, x[0], x[1], x[2]])
}

/// Full decomposition of an edge vector into explainable and cyclic parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDecomposition {
    /// Vertex potentials, φ₀ = 0.
    pub potentials: VertexVector,
    /// Part of y explained by the potentials.
    pub gradient: EdgeVector,
    /// y − gradient: the cyclic remainder.
    pub residual: EdgeVector,
    /// Weighted residual energy fraction.
    pub aperture: f64,
}

/// Decompose y on K4 under edge weights W.
pub fn decompose(y: &EdgeVector, weights: &EdgeVector) -> RubricResult<EdgeDecomposition> {
    let total = weighted_energy(y, weights);
    if !(total > 0.0) {
        return Err(RubricError::ZeroEnergy);
    }

    let l = laplacian(weights);
    let r = divergence(weights, y);
    let potentials = solve_gauge_fixed(&l, &r)?;
    let grad = gradient(&potentials);

    let mut residual = [0.0; EDGE_COUNT];
    for e in 0..EDGE_COUNT {
        residual[e] = y[e] - grad[e];
    }
    let aperture = weighted_energy(&residual, weights) / total;

    Ok(EdgeDecomposition {
        potentials,
        gradient: grad,
        residual,
        aperture,
    })
}

/// Superintelligence Index calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceEngine {
    target_aperture: f64,
    epsilon: f64,
}

impl Default for BalanceEngine {
    fn default() -> Self {
        Self::new(TARGET_APERTURE, APERTURE_EPSILON)
    }
}

impl BalanceEngine {
    pub fn new(target_aperture: f64, epsilon: f64) -> Self {
        Self {
            target_aperture,
            epsilon,
        }
    }

    pub fn from_config(config: &RubricConfig) -> Self {
        Self::new(config.target_aperture, config.aperture_epsilon)
    }

    /// Symmetric distance of an aperture from the target, always >= 1.
    pub fn deviation(&self, aperture: f64) -> f64 {
        let a = aperture + self.epsilon;
        (a / self.target_aperture).max(self.target_aperture / a)
    }

    /// Compute SI for six edge scores and optional edge weights.
    ///
    /// Fatal: wrong score or weight count, non-positive weight, score
    /// outside [1, 10], singular system, zero energy.
    /// Degraded: any non-finite score returns [`BalanceResult::fallback`].
    pub fn compute(&self, scores: &[f64], weights: Option<&[f64]>) -> RubricResult<BalanceResult> {
        let y: EdgeVector = scores.try_into().map_err(|_| RubricError::EdgeCount {
            expected: EDGE_COUNT,
            got: scores.len(),
        })?;

        let w: EdgeVector = match weights {
            Some(ws) => ws.try_into().map_err(|_| RubricError::EdgeCount {
                expected: EDGE_COUNT,
                got: ws.len(),
            })?,
            None => UNIT_WEIGHTS,
        };
        for (index, &value) in w.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(RubricError::InvalidWeight { index, value });
            }
        }

        if let Some(e) = y.iter().position(|v| !v.is_finite()) {
            log::warn!(
                "K4 balance: non-finite score on edge {e} ({}), SI unavailable",
                BehaviorField::ALL[e]
            );
            return Ok(BalanceResult::fallback(self.target_aperture));
        }
        for (field, &value) in BehaviorField::ALL.iter().zip(&y) {
            validate_score(&format!("behavior.{field}"), value)?;
        }

        let decomposition = decompose(&y, &w)?;
        let deviation = self.deviation(decomposition.aperture);
        let si = 100.0 / deviation;

        log::debug!(
            "K4 balance: aperture={:.6} deviation={deviation:.4} si={si:.4}",
            decomposition.aperture
        );

        Ok(BalanceResult {
            superintelligence_index: si,
            aperture: decomposition.aperture,
            deviation,
            degraded: false,
        })
    }
}

/// SI with the canonical target aperture and epsilon.
pub fn superintelligence_index(
    scores: &[f64],
    weights: Option<&[f64]>,
) -> RubricResult<BalanceResult> {
    BalanceEngine::default().compute(scores, weights)
}
