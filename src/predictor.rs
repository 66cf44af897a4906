//! The TAGE predictor's lookup and update engines.
//!
//! [`TagePredictor`] owns every piece of state described in the data model:
//! the global and path history registers, the folded CSRs, the bimodal
//! table, the tagged banks, and the arbitration/allocation bookkeeping. It
//! exposes exactly the two-phase protocol the host drives: `predict(pc)`
//! computes a direction and stashes a [`PendingPrediction`] scratch record,
//! and the following `update(pc, target, taken, kind)` consumes that
//! scratch to train the tables and advance history.

use crate::bimodal::BimodalTable;
use crate::config::TageConfig;
use crate::csr::CsrFold;
use crate::error::PredictorError;
use crate::history::{GlobalHistory, PathHistory};
use crate::rng::{AllocationRng, XorShiftRng};
use crate::stats::PredictorStats;
use crate::tagged_table::TaggedTable;

/// Upper bound on the number of tagged tables a predictor instance can
/// hold. Sized generously above the spec's normative `T = 12` so that the
/// per-prediction scratch record can live in fixed-size arrays instead of
/// heap-allocating on every `predict` call (spec §5: no allocation after
/// construction).
pub const MAX_TABLES: usize = 16;

/// The kind of control-flow instruction a branch resolution belongs to.
///
/// Part of the host's calling convention (spec §6): this core only predicts
/// conditional branch direction, so `branch_kind` and `target` are accepted
/// for source compatibility with the host simulator's predictor interface
/// and otherwise ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchKind {
    /// A conditional branch (the only kind this predictor reasons about).
    Conditional,
    /// An unconditional jump.
    Jump,
    /// A call instruction (return address pushed to a RAS elsewhere).
    Call,
    /// A return instruction (predicted via a RAS elsewhere).
    Return,
}

/// The lookup-time scratch consumed by the next `update` call for the same
/// branch. Stored inline in fixed-size arrays sized to [`MAX_TABLES`] so
/// that `predict` never allocates.
#[derive(Clone, Debug)]
struct PendingPrediction {
    pc: u64,
    num_tables: usize,
    tags: [u16; MAX_TABLES],
    idxs: [usize; MAX_TABLES],
    bimodal_idx: usize,
    /// Provider table index, `None` if no tagged table hit.
    main_table: Option<usize>,
    /// Alt-provider table index, `None` if no second tagged table hit.
    alt_table: Option<usize>,
    main_pred: bool,
    alt_pred: bool,
    pred_dir: bool,
}

/// A TAGE (TAgged GEometric history length) conditional branch direction
/// predictor.
///
/// Single-threaded and synchronous: every `predict` must be followed by
/// exactly one `update` for the same branch before the next `predict` (spec
/// §5). Calling `update` without a matching prior `predict` is a host
/// contract violation and panics rather than silently producing garbage.
#[derive(Debug)]
pub struct TagePredictor {
    config: TageConfig,

    ghr: GlobalHistory,
    phr: PathHistory,

    bimodal: BimodalTable,
    tables: Vec<TaggedTable>,

    csr_index: Vec<CsrFold>,
    csr_tag0: Vec<CsrFold>,
    csr_tag1: Vec<CsrFold>,

    /// `USE_ALT_ON_NA`: tracks whether alt-provider predictions have
    /// historically beaten weak, newly-allocated providers. `0..=15`.
    alt_conf: u8,

    clock_counter: u32,
    /// 1-bit decay phase, alternating which nibble of `u` survives a sweep.
    phase: bool,

    rng: Box<dyn AllocationRng + Send>,

    pending: Option<PendingPrediction>,

    stats: PredictorStats,
}

impl std::fmt::Debug for dyn AllocationRng + Send {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<allocation rng>")
    }
}

impl TagePredictor {
    /// Builds a predictor from `config`, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`PredictorError`] if `config` is internally inconsistent
    /// (see [`TageConfig::validate`]).
    pub fn new(config: TageConfig) -> Result<Self, PredictorError> {
        config.validate()?;
        let num_tables = config.num_tables;

        let tables = (0..num_tables)
            .map(|t| TaggedTable::new(config.index_bits[t], config.tag_bits[t]))
            .collect();

        let csr_index = (0..num_tables)
            .map(|t| CsrFold::new(config.history_lengths[t], config.index_bits[t]))
            .collect();
        let csr_tag0 = (0..num_tables)
            .map(|t| CsrFold::new(config.history_lengths[t], config.tag_bits[t]))
            .collect();
        let csr_tag1 = (0..num_tables)
            .map(|t| CsrFold::new(config.history_lengths[t], config.tag_bits[t] - 1))
            .collect();

        let bimodal = BimodalTable::new(config.bimodal_index_bits);
        let phr = PathHistory::new(config.path_hist_len);
        let rng = Box::new(XorShiftRng::new(config.rng_seed));
        let stats = PredictorStats::new(num_tables);

        Ok(Self {
            config,
            ghr: GlobalHistory::new(),
            phr,
            bimodal,
            tables,
            csr_index,
            csr_tag0,
            csr_tag1,
            alt_conf: 8,
            clock_counter: 0,
            phase: false,
            rng,
            pending: None,
            stats,
        })
    }

    /// Resets all predictor state to the construction-time defaults,
    /// including re-seeding the allocation RNG from `config.rng_seed`.
    /// Idempotent up to the RNG's internal draw sequence.
    pub fn initialize(&mut self) {
        let config = self.config.clone();
        // `new` has already validated `config` once; re-validating here
        // would only fail if the stored config were mutated out from under
        // us, which nothing in this API allows.
        if let Ok(fresh) = Self::new(config) {
            *self = fresh;
        }
    }

    /// Overrides the allocation gate's RNG. Intended for tests that need a
    /// deterministic draw sequence (spec §9).
    pub fn set_rng(&mut self, rng: impl AllocationRng + Send + 'static) {
        self.rng = Box::new(rng);
    }

    /// Read-only access to the predictor's observational statistics.
    #[must_use]
    pub fn stats(&self) -> &PredictorStats {
        &self.stats
    }

    fn tag_for(&self, pc: u64, t: usize) -> u16 {
        let raw = pc ^ u64::from(self.csr_tag0[t].value()) ^ (u64::from(self.csr_tag1[t].value()) << 1);
        self.tables[t].mask_tag(raw)
    }

    fn index_for(&self, pc: u64, t: usize) -> usize {
        let idx_bits = self.config.index_bits[t];
        let offset = self.config.phr_offsets[t];
        let phr_val = u64::from(self.phr.value());
        let offset_mask: u64 = if offset == 0 { 0 } else { (1u64 << offset) - 1 };
        let mixed_phr = phr_val ^ (phr_val & offset_mask);
        let raw = pc ^ (pc >> idx_bits) ^ u64::from(self.csr_index[t].value()) ^ mixed_phr;
        self.tables[t].mask_index(raw)
    }

    /// Predicts whether the branch at `pc` will be taken.
    ///
    /// Records a [`PendingPrediction`] scratch record internally, consumed
    /// exactly once by the next matching `update` call.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if called again before a matching `update`
    /// for the previous `predict` — the host is expected to pair the two
    /// calls per branch (spec §5).
    pub fn predict(&mut self, pc: u64) -> bool {
        debug_assert!(
            self.pending.is_none(),
            "TagePredictor::predict called without a matching prior update"
        );

        let num_tables = self.config.num_tables;
        let mut tags = [0u16; MAX_TABLES];
        let mut idxs = [0usize; MAX_TABLES];
        for t in 0..num_tables {
            tags[t] = self.tag_for(pc, t);
            idxs[t] = self.index_for(pc, t);
        }

        let mut main_table = None;
        for t in 0..num_tables {
            if self.tables[t].lookup(idxs[t]).tag == tags[t] {
                main_table = Some(t);
                break;
            }
        }

        let mut alt_table = None;
        if let Some(mt) = main_table {
            for t in (mt + 1)..num_tables {
                if self.tables[t].lookup(idxs[t]).tag == tags[t] {
                    alt_table = Some(t);
                    break;
                }
            }
        }

        let bimodal_idx = self.bimodal.index(pc);

        let (main_pred, alt_pred, pred_dir) = match main_table {
            None => {
                let dir = self.bimodal.predict(bimodal_idx);
                self.stats.bimodal_provided += 1;
                (dir, dir, dir)
            }
            Some(mt) => {
                let provider = self.tables[mt].lookup(idxs[mt]);
                let main_pred = provider.predicts_taken();
                let alt_pred = match alt_table {
                    None => self.bimodal.read(bimodal_idx) > 1,
                    Some(at) => self.tables[at].lookup(idxs[at]).predicts_taken(),
                };
                self.stats.provider_hits_per_table[mt] += 1;

                let unreliable = provider.is_weak() && provider.u == 0;
                let pred_dir = if unreliable && self.alt_conf < 8 {
                    alt_pred
                } else {
                    main_pred
                };
                (main_pred, alt_pred, pred_dir)
            }
        };

        self.stats.predictions += 1;
        self.pending = Some(PendingPrediction {
            pc,
            num_tables,
            tags,
            idxs,
            bimodal_idx,
            main_table,
            alt_table,
            main_pred,
            alt_pred,
            pred_dir,
        });

        pred_dir
    }

    /// Resolves the most recent `predict` call for `pc` with the branch's
    /// actual outcome.
    ///
    /// `target` and `branch_kind` are part of the host's calling convention
    /// (spec §6) and are not consulted by this core.
    ///
    /// # Panics
    ///
    /// Panics if there is no pending prediction, i.e. `update` was called
    /// without a matching prior `predict` — a host contract violation the
    /// spec explicitly does not require defending against (§7).
    pub fn update(&mut self, pc: u64, _target: u64, taken: bool, _branch_kind: BranchKind) {
        let pending = self
            .pending
            .take()
            .unwrap_or_else(|| panic!("TagePredictor::update({pc:#x}, ..) with no pending predict"));
        debug_assert_eq!(pending.pc, pc, "update() pc does not match the pending predict()");

        if pending.pred_dir != taken {
            self.stats.mispredictions += 1;
        }

        // (a) Counter updates.
        if let Some(mt) = pending.main_table {
            self.tables[mt].write_pred(pending.idxs[mt], taken);
            let provider_u_was_zero = self.tables[mt].lookup(pending.idxs[mt]).u == 0;
            if provider_u_was_zero {
                if let Some(at) = pending.alt_table {
                    self.tables[at].write_pred(pending.idxs[at], taken);
                }
            }
        } else {
            self.bimodal.update(pending.bimodal_idx, taken);
        }

        // (b) USE_ALT_ON_NA update.
        if let Some(mt) = pending.main_table {
            let provider = self.tables[mt].lookup(pending.idxs[mt]);
            if provider.u == 0 && provider.is_weak() && pending.main_pred != pending.alt_pred {
                if pending.alt_pred == taken {
                    self.alt_conf = (self.alt_conf + 1).min(15);
                } else {
                    self.alt_conf = self.alt_conf.saturating_sub(1);
                }
            }
        }

        // (c) Allocation on misprediction.
        let provider_idx = pending.main_table.unwrap_or(pending.num_tables);
        if pending.pred_dir != taken && provider_idx > 0 {
            let any_free = (0..provider_idx).any(|t| self.tables[t].lookup(pending.idxs[t]).u == 0);
            if any_free {
                for t in (0..provider_idx).rev() {
                    let e = self.tables[t].lookup(pending.idxs[t]);
                    if e.u == 0 && self.rng.gate(10) {
                        self.tables[t].alloc(pending.idxs[t], pending.tags[t], taken);
                        self.stats.allocations += 1;
                        tracing::trace!(table = t, idx = pending.idxs[t], "allocated tagged entry");
                        break;
                    }
                }
            } else {
                for t in 0..provider_idx {
                    self.tables[t].write_useful(pending.idxs[t], -1);
                }
            }
        }

        // (d) Useful-bit maintenance.
        if let Some(mt) = pending.main_table {
            if pending.main_pred != pending.alt_pred {
                let delta = if pending.pred_dir == taken { 1 } else { -1 };
                self.tables[mt].write_useful(pending.idxs[mt], delta);
            }
        }

        // (e) Periodic useful-bit decay.
        self.clock_counter += 1;
        if self.clock_counter >= self.config.reset_interval {
            self.clock_counter = 0;
            let mask = u8::from(self.phase) + 1;
            for table in &mut self.tables {
                table.decay(mask);
            }
            self.phase = !self.phase;
            self.stats.useful_decays += 1;
            tracing::debug!(mask, "useful-bit decay sweep");
        }

        // (f) GHR update, then fold it into every CSR.
        self.ghr.push(taken);
        for t in 0..pending.num_tables {
            self.csr_index[t].update(&self.ghr);
            self.csr_tag0[t].update(&self.ghr);
            self.csr_tag1[t].update(&self.ghr);
        }

        // (g) PHR update.
        self.phr.push(pc);
    }
}
