//! Folded history register recurrence tests.
//!
//! Reference: `CsrFold::update`, ported bit-for-bit from the original
//! `GHRfold::update` recurrence.

use tage_core::csr::CsrFold;
use tage_core::history::GlobalHistory;

// ══════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════

/// Pushes `taken` into both the raw history and the CSR under test, in the
/// order the predictor's `update` step always performs them: history first.
fn step(ghr: &mut GlobalHistory, csr: &mut CsrFold, taken: bool) -> u32 {
    ghr.push(taken);
    csr.update(ghr);
    csr.value()
}

// ══════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════

/// A freshly constructed fold starts at zero.
#[test]
fn fresh_fold_is_zero() {
    let csr = CsrFold::new(3, 2);
    assert_eq!(csr.value(), 0);
}

/// Hand-traced four-step sequence against `orig_len = 3`, `compr_len = 2`.
#[test]
fn matches_hand_traced_sequence() {
    let mut ghr = GlobalHistory::new();
    let mut csr = CsrFold::new(3, 2);

    assert_eq!(step(&mut ghr, &mut csr, true), 1);
    assert_eq!(step(&mut ghr, &mut csr, true), 3);
    assert_eq!(step(&mut ghr, &mut csr, false), 3);
    assert_eq!(step(&mut ghr, &mut csr, true), 0);
}

/// The folded value never exceeds `2^compr_len - 1`, for any history.
#[test]
fn value_stays_within_compressed_width() {
    let mut ghr = GlobalHistory::new();
    let mut csr = CsrFold::new(17, 5);
    for i in 0..200 {
        let taken = i % 3 == 0;
        ghr.push(taken);
        csr.update(&ghr);
        assert!(csr.value() < (1 << 5));
    }
}

/// An all-taken history longer than `orig_len` settles into a fixed point
/// once the window has fully filled with ones.
#[test]
fn all_taken_history_reaches_a_fixed_point() {
    let mut ghr = GlobalHistory::new();
    let mut csr = CsrFold::new(6, 4);
    for _ in 0..6 {
        ghr.push(true);
        csr.update(&ghr);
    }
    let settled = csr.value();
    ghr.push(true);
    csr.update(&ghr);
    assert_eq!(csr.value(), settled, "fixed point once window is saturated");
}
