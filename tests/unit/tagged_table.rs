//! Single tagged-table bank tests.

use tage_core::tagged_table::{TaggedTable, WEAKLY_NOT_TAKEN, WEAKLY_TAKEN};

/// A fresh entry has a zero tag, zero prediction counter, and zero useful
/// bit.
#[test]
fn fresh_entry_is_zeroed() {
    let table = TaggedTable::new(4, 8);
    let e = table.lookup(0);
    assert_eq!(e.tag, 0);
    assert_eq!(e.pred, 0);
    assert_eq!(e.u, 0);
    assert!(!e.predicts_taken());
}

/// Allocating an entry sets its tag, seeds the weak midpoint for the
/// observed direction, and resets the useful bit.
#[test]
fn alloc_seeds_weak_midpoint() {
    let mut table = TaggedTable::new(4, 8);
    table.alloc(2, 0xAB, true);
    let e = table.lookup(2);
    assert_eq!(e.tag, 0xAB);
    assert_eq!(e.pred, WEAKLY_TAKEN);
    assert_eq!(e.u, 0);
    assert!(e.is_weak());

    table.alloc(3, 0xCD, false);
    let e = table.lookup(3);
    assert_eq!(e.pred, WEAKLY_NOT_TAKEN);
    assert!(e.is_weak());
}

/// Repeated taken training saturates the 3-bit counter at 7.
#[test]
fn pred_saturates_at_max() {
    let mut table = TaggedTable::new(4, 8);
    table.alloc(0, 1, true);
    for _ in 0..10 {
        table.write_pred(0, true);
    }
    assert_eq!(table.lookup(0).pred, 7);
}

/// Repeated not-taken training saturates the 3-bit counter at 0.
#[test]
fn pred_saturates_at_min() {
    let mut table = TaggedTable::new(4, 8);
    table.alloc(0, 1, true);
    for _ in 0..10 {
        table.write_pred(0, false);
    }
    assert_eq!(table.lookup(0).pred, 0);
}

/// The useful counter saturates within `0..=3` in both directions.
#[test]
fn useful_counter_saturates() {
    let mut table = TaggedTable::new(4, 8);
    table.alloc(0, 1, true);
    for _ in 0..5 {
        table.write_useful(0, 1);
    }
    assert_eq!(table.lookup(0).u, 3);
    for _ in 0..5 {
        table.write_useful(0, -1);
    }
    assert_eq!(table.lookup(0).u, 0);
}

/// Decay masks the useful counter without touching tag or prediction.
#[test]
fn decay_masks_useful_bit_only() {
    let mut table = TaggedTable::new(4, 8);
    table.alloc(0, 0x55, true);
    table.write_useful(0, 1);
    table.write_useful(0, 1);
    table.write_useful(0, 1);
    assert_eq!(table.lookup(0).u, 3);

    table.decay(0b01);
    let e = table.lookup(0);
    assert_eq!(e.u, 3 & 0b01);
    assert_eq!(e.tag, 0x55);
    assert_eq!(e.pred, WEAKLY_TAKEN);

    table.decay(0b10);
    assert_eq!(table.lookup(0).u, 0);
}

/// `mask_index`/`mask_tag` truncate to the configured bit widths regardless
/// of how wide the raw hash is.
#[test]
fn masks_truncate_to_configured_widths() {
    let table = TaggedTable::new(4, 6);
    assert_eq!(table.mask_index(0xFFFF_FFFF), 0b1111);
    assert_eq!(table.mask_tag(0xFFFF_FFFF), 0b11_1111);
}
