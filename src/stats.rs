//! Observational statistics for the TAGE predictor.
//!
//! These counters never feed back into prediction — they exist purely so an
//! embedding simulator can report accuracy and table utilization, the way
//! the host's own statistics layer reports cache hit rates and instruction
//! mixes.

/// Per-predictor statistics, updated by [`crate::TagePredictor::update`].
#[derive(Clone, Debug, Default)]
pub struct PredictorStats {
    /// Total number of `predict` calls.
    pub predictions: u64,
    /// Number of resolved branches whose prediction did not match the
    /// actual outcome.
    pub mispredictions: u64,
    /// Number of predictions served by the bimodal table (no tagged hit).
    pub bimodal_provided: u64,
    /// Number of times each tagged table served as the provider, indexed by
    /// table number (0 = longest history).
    pub provider_hits_per_table: Vec<u64>,
    /// Number of new tagged entries allocated on misprediction.
    pub allocations: u64,
    /// Number of periodic useful-bit decay sweeps performed.
    pub useful_decays: u64,
}

impl PredictorStats {
    /// Creates a zeroed stats block sized for `num_tables` tagged tables.
    #[must_use]
    pub fn new(num_tables: usize) -> Self {
        Self {
            provider_hits_per_table: vec![0; num_tables],
            ..Self::default()
        }
    }

    /// Fraction of predictions that were correct, in `[0.0, 1.0]`. Returns
    /// `1.0` when no predictions have been made yet.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.predictions == 0 {
            return 1.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let (correct, total) = (
            (self.predictions - self.mispredictions) as f64,
            self.predictions as f64,
        );
        correct / total
    }
}
