// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Rubric Kernel Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Scoring and aggregation engine for two-analyst evaluations of
//! AI-generated text.
//!
//! Pipeline: aggregate two analyst submissions into a consensus, average
//! each score group, weight the averages into the Quality Index, divide
//! by review time for the Alignment Rate, and run the six behavior
//! scores through the K4 balance for the Superintelligence Index.
//!
//! # Invariants
//!
//! 1. **Pure functions**: no call mutates shared state or performs I/O.
//!    The same inputs always produce bit-identical metrics, and any
//!    number of threads may call in concurrently.
//!
//! 2. **Reject, never clamp**: a score outside [1, 10] aborts the whole
//!    computation. Nothing is silently dropped or pulled into range.
//!
//! 3. **Two kinds of missing**: "not applicable" is a domain state
//!    resolved by aggregation; a non-finite edge value only reaches the
//!    balance engine and yields the SI fallback `{0, A*, 1}`.

pub mod aggregator;
pub mod alignment;
pub mod averager;
pub mod balance;
pub mod orchestrator;
pub mod quality;

pub use aggregator::{aggregate, divergence, merge_rating};
pub use alignment::{alignment_rate, RateBands};
pub use averager::{average_behavior, average_specialization, average_structure};
pub use balance::{superintelligence_index, BalanceEngine, EdgeDecomposition};
pub use orchestrator::{compute_quality_metrics, MetricsOrchestrator};
pub use quality::{quality_index, QualityWeights};
