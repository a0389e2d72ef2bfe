#![forbid(unsafe_code)]

//! Property-based invariant tests for the windowing math.
//!
//! These hold for **any** combination of list size, row height, scroll
//! offset, viewport height, and overscan:
//!
//! 1. Range bounds: `0 <= start <= end <= item_count`.
//! 2. Total height is exactly `item_count * item_height`.
//! 3. Increasing the scroll offset never decreases `start`.
//! 4. Every row intersecting the viewport is inside the range.
//! 5. The calculator is deterministic.
//! 6. Materialized windows are contiguous and evenly spaced.

use proptest::prelude::*;
use tally_virtual::{materialize, total_height, visible_range, window_range};

// ── Helpers ─────────────────────────────────────────────────────────────

fn item_height_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        (1u32..=200).prop_map(f64::from),
        0.5f64..=250.0,
    ]
}

fn offset_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        0.0f64..=1.0e6,
        Just(0.0),
        -1.0e4f64..0.0,
        Just(f64::NAN),
        1.0e12f64..=1.0e15,
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Range bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn range_is_within_bounds(
        item_count in 0usize..=100_000,
        item_height in item_height_strategy(),
        scroll_offset in offset_strategy(),
        viewport_height in 0.0f64..=5000.0,
        overscan in 0usize..=64,
    ) {
        let range = window_range(item_count, item_height, scroll_offset, viewport_height, overscan);
        prop_assert!(range.start <= range.end, "start {} > end {}", range.start, range.end);
        prop_assert!(range.end <= item_count, "end {} > count {}", range.end, item_count);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Total height
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn total_height_is_count_times_height(
        item_count in 0usize..=1_000_000,
        item_height in (1u32..=500).prop_map(f64::from),
    ) {
        let total = total_height(item_count, item_height);
        prop_assert_eq!(total, item_count as f64 * item_height);
        if item_count == 0 {
            prop_assert_eq!(total, 0.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Monotonicity of start
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn start_is_monotonic_in_scroll_offset(
        item_count in 0usize..=50_000,
        item_height in item_height_strategy(),
        a in 0.0f64..=1.0e7,
        b in 0.0f64..=1.0e7,
        viewport_height in 1.0f64..=5000.0,
        overscan in 0usize..=32,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let lower = window_range(item_count, item_height, lo, viewport_height, overscan);
        let upper = window_range(item_count, item_height, hi, viewport_height, overscan);
        prop_assert!(lower.start <= upper.start, "{lower:?} then {upper:?}");
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Coverage of the visible rows
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn intersecting_rows_are_covered(
        item_count in 1usize..=20_000,
        item_height in item_height_strategy(),
        viewport_height in 1.0f64..=3000.0,
        position in 0.0f64..=1.0,
        overscan in 0usize..=16,
    ) {
        let total = total_height(item_count, item_height);
        prop_assume!(total >= viewport_height);
        let scroll_offset = position * (total - viewport_height);

        let range = window_range(item_count, item_height, scroll_offset, viewport_height, overscan);
        let first_visible = (scroll_offset / item_height).floor() as usize;
        let last_visible_exclusive =
            (((scroll_offset + viewport_height) / item_height).ceil() as usize).min(item_count);

        prop_assert!(range.start <= first_visible, "{range:?} misses row {first_visible}");
        prop_assert!(
            range.end >= last_visible_exclusive,
            "{range:?} misses rows up to {last_visible_exclusive}"
        );

        let strict = visible_range(item_count, item_height, scroll_offset, viewport_height);
        prop_assert!(range.start <= strict.start && strict.end <= range.end);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn calculator_is_deterministic(
        item_count in 0usize..=100_000,
        item_height in item_height_strategy(),
        scroll_offset in offset_strategy(),
        viewport_height in 0.0f64..=5000.0,
        overscan in 0usize..=64,
    ) {
        let first = window_range(item_count, item_height, scroll_offset, viewport_height, overscan);
        let second = window_range(item_count, item_height, scroll_offset, viewport_height, overscan);
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Materialized window shape
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn materialized_rows_are_contiguous(
        item_count in 0usize..=2_000,
        item_height in (1u32..=120).prop_map(f64::from),
        scroll_offset in 0.0f64..=200_000.0,
        viewport_height in 1.0f64..=2000.0,
        overscan in 0usize..=10,
    ) {
        let items: Vec<u64> = (0..item_count as u64).collect();
        let range = window_range(item_count, item_height, scroll_offset, viewport_height, overscan);
        let window = materialize(&items, range.clone(), item_height);

        prop_assert_eq!(window.len(), range.end - range.start);
        prop_assert_eq!(window.total_height, total_height(item_count, item_height));
        for row in &window {
            prop_assert_eq!(row.offset, row.index as f64 * item_height);
            prop_assert_eq!(*row.item, row.index as u64);
        }
        for pair in window.items.windows(2) {
            prop_assert_eq!(pair[1].index, pair[0].index + 1);
            prop_assert_eq!(pair[1].offset - pair[0].offset, item_height);
        }
    }
}
