//! TAGE conditional branch direction predictor.
//!
//! This crate implements a TAGE (TAgged GEometric history length) predictor
//! with the following:
//! 1. **History:** a global history register and a path history register,
//!    each incrementally folded into narrow compressed registers per table.
//! 2. **Base predictor:** a PC-indexed bimodal table used when no tagged
//!    table recognizes the branch.
//! 3. **Tagged tables:** geometrically-spaced history-length banks that
//!    override the base prediction when their tag matches.
//! 4. **Arbitration:** provider/alt-provider selection, gated by a
//!    confidence counter on newly-allocated, unproven entries.
//! 5. **Allocation:** useful-bit-paced allocation of new tagged entries on
//!    misprediction, with periodic decay to reclaim stale entries.
//!
//! Host simulators drive the predictor through exactly two calls per
//! branch: [`TagePredictor::predict`] at fetch time, then
//! [`TagePredictor::update`] once the branch resolves.

/// PC-indexed bimodal base predictor.
pub mod bimodal;
/// Predictor configuration (defaults, per-table geometric parameters).
pub mod config;
/// Folded (compressed) history registers.
pub mod csr;
/// Error types for configuration validation.
pub mod error;
/// Global and path history registers.
pub mod history;
/// The predictor's lookup and update engine.
pub mod predictor;
/// Injectable PRNG for the allocation stochastic gate.
pub mod rng;
/// Observational statistics.
pub mod stats;
/// A single tagged geometric-history bank.
pub mod tagged_table;

/// Main predictor type; construct with `TagePredictor::new(TageConfig::default())`.
pub use crate::predictor::{BranchKind, TagePredictor};
/// Root configuration type; use `TageConfig::default()` or deserialize from JSON.
pub use crate::config::TageConfig;
/// Configuration validation errors.
pub use crate::error::PredictorError;
/// Injectable allocation-gate RNG trait and implementations.
pub use crate::rng::{AllocationRng, FixedRng, XorShiftRng};
/// Observational prediction statistics.
pub use crate::stats::PredictorStats;
