//! Configuration for the TAGE predictor.
//!
//! This module defines the parameters that shape a [`crate::TagePredictor`]:
//! the number of tagged tables, their geometric history lengths, index/tag
//! bit widths, the bimodal table size, the useful-bit decay interval, and the
//! one runtime-configurable option documented by the host calling
//! convention — the allocation RNG seed.
//!
//! Configuration is supplied via `serde_json` from an embedding simulator, or
//! use [`TageConfig::default`] to reproduce the normative 12-table
//! configuration exactly.

use serde::Deserialize;

use crate::error::PredictorError;

/// Default configuration constants for the TAGE predictor.
///
/// These values are the predictor's normative configuration; they are not
/// adjustable storage-budget tuning knobs (out of scope), only the defaults
/// a deserialized [`TageConfig`] falls back to when a field is omitted.
mod defaults {
    /// Number of tagged tables.
    pub const NUM_TABLES: usize = 12;

    /// Geometric history lengths in bits, longest-first (table 0 = longest).
    pub const HISTORY_LENGTHS: [usize; 12] =
        [640, 403, 254, 160, 101, 64, 40, 25, 16, 10, 6, 4];

    /// Per-table index width in bits, same order as `HISTORY_LENGTHS`.
    pub const INDEX_BITS: [u32; 12] = [10, 10, 11, 11, 11, 11, 10, 10, 10, 10, 9, 9];

    /// Per-table tag width in bits, same order as `HISTORY_LENGTHS`.
    pub const TAG_BITS: [u32; 12] = [7, 7, 8, 8, 9, 10, 11, 12, 12, 13, 14, 15];

    /// Log2 of the bimodal table row count (`2^13` entries).
    pub const BIMODAL_INDEX_BITS: u32 = 13;

    /// Width of the path history register, in bits.
    pub const PATH_HIST_LEN: u32 = 16;

    /// Useful-bit decay interval, in updates.
    pub const RESET_INTERVAL: u32 = 1 << 20;

    /// Default seed for the allocation stochastic gate's PRNG.
    pub const RNG_SEED: u64 = 0x9E37_79B9_7F4A_7C15;
}

/// TAGE predictor configuration.
///
/// `TageConfig::default()` reproduces the spec's normative 12-table
/// geometric configuration. Fields are individually overridable via
/// `serde_json` deserialization for experimentation with alternate table
/// counts or history lengths; [`TageConfig::validate`] rejects
/// internally-inconsistent overrides before a [`crate::TagePredictor`] is
/// built from them.
#[derive(Debug, Clone, Deserialize)]
pub struct TageConfig {
    /// Number of tagged tables (`T` in the spec).
    #[serde(default = "TageConfig::default_num_tables")]
    pub num_tables: usize,

    /// Geometric history lengths in bits, longest-first.
    #[serde(default = "TageConfig::default_history_lengths")]
    pub history_lengths: Vec<usize>,

    /// Per-table index width in bits, same order as `history_lengths`.
    #[serde(default = "TageConfig::default_index_bits")]
    pub index_bits: Vec<u32>,

    /// Per-table tag width in bits, same order as `history_lengths`.
    #[serde(default = "TageConfig::default_tag_bits")]
    pub tag_bits: Vec<u32>,

    /// Per-table PHR mixing offset. The spec's observed source defines this
    /// term but leaves it uniformly zero; kept as a configurable knob for
    /// forward compatibility, defaulting to all-zero.
    #[serde(default = "TageConfig::default_phr_offsets")]
    pub phr_offsets: Vec<u32>,

    /// Log2 of the bimodal table row count.
    #[serde(default = "TageConfig::default_bimodal_index_bits")]
    pub bimodal_index_bits: u32,

    /// Width of the path history register, in bits.
    #[serde(default = "TageConfig::default_path_hist_len")]
    pub path_hist_len: u32,

    /// Useful-bit decay interval, in updates.
    #[serde(default = "TageConfig::default_reset_interval")]
    pub reset_interval: u32,

    /// Seed for the allocation stochastic gate's PRNG. The only option the
    /// host calling convention exposes (spec §6).
    #[serde(default = "TageConfig::default_rng_seed")]
    pub rng_seed: u64,
}

impl TageConfig {
    fn default_num_tables() -> usize {
        defaults::NUM_TABLES
    }

    fn default_history_lengths() -> Vec<usize> {
        defaults::HISTORY_LENGTHS.to_vec()
    }

    fn default_index_bits() -> Vec<u32> {
        defaults::INDEX_BITS.to_vec()
    }

    fn default_tag_bits() -> Vec<u32> {
        defaults::TAG_BITS.to_vec()
    }

    fn default_phr_offsets() -> Vec<u32> {
        vec![0; defaults::NUM_TABLES]
    }

    fn default_bimodal_index_bits() -> u32 {
        defaults::BIMODAL_INDEX_BITS
    }

    fn default_path_hist_len() -> u32 {
        defaults::PATH_HIST_LEN
    }

    fn default_reset_interval() -> u32 {
        defaults::RESET_INTERVAL
    }

    fn default_rng_seed() -> u64 {
        defaults::RNG_SEED
    }

    /// Checks that the per-table vectors are internally consistent:
    /// `history_lengths`, `index_bits`, `tag_bits`, and `phr_offsets` must
    /// all have length `num_tables`, table index widths must be at least 1
    /// (tables are addressed, not degenerate), and tag widths must be at
    /// least 2 (the update engine relies on a `tag_bits - 1` CSR).
    ///
    /// # Errors
    ///
    /// Returns [`PredictorError::ConfigMismatch`] or
    /// [`PredictorError::InvalidTagWidth`] describing the first
    /// inconsistency found.
    pub fn validate(&self) -> Result<(), PredictorError> {
        if self.num_tables > crate::predictor::MAX_TABLES {
            return Err(PredictorError::TooManyTables {
                requested: self.num_tables,
                max: crate::predictor::MAX_TABLES,
            });
        }
        let expected = self.num_tables;
        if self.history_lengths.len() != expected {
            return Err(PredictorError::ConfigMismatch {
                field: "history_lengths",
                expected,
                actual: self.history_lengths.len(),
            });
        }
        if self.index_bits.len() != expected {
            return Err(PredictorError::ConfigMismatch {
                field: "index_bits",
                expected,
                actual: self.index_bits.len(),
            });
        }
        if self.tag_bits.len() != expected {
            return Err(PredictorError::ConfigMismatch {
                field: "tag_bits",
                expected,
                actual: self.tag_bits.len(),
            });
        }
        if self.phr_offsets.len() != expected {
            return Err(PredictorError::ConfigMismatch {
                field: "phr_offsets",
                expected,
                actual: self.phr_offsets.len(),
            });
        }
        if let Some(&width) = self.tag_bits.iter().find(|&&w| w < 2) {
            return Err(PredictorError::InvalidTagWidth { width });
        }
        if let Some(&width) = self.index_bits.iter().find(|&&w| w == 0) {
            return Err(PredictorError::InvalidIndexWidth { width });
        }
        Ok(())
    }
}

impl Default for TageConfig {
    fn default() -> Self {
        Self {
            num_tables: Self::default_num_tables(),
            history_lengths: Self::default_history_lengths(),
            index_bits: Self::default_index_bits(),
            tag_bits: Self::default_tag_bits(),
            phr_offsets: Self::default_phr_offsets(),
            bimodal_index_bits: Self::default_bimodal_index_bits(),
            path_hist_len: Self::default_path_hist_len(),
            reset_interval: Self::default_reset_interval(),
            rng_seed: Self::default_rng_seed(),
        }
    }
}
