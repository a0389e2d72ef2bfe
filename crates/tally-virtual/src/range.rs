#![forbid(unsafe_code)]

//! Windowing math for fixed-height rows.
//!
//! Everything here is a pure function of its inputs. It runs on every scroll
//! signal, so it is O(1) and never allocates.
//!
//! All inputs are clamped rather than rejected: negative or NaN extents count
//! as zero, and an empty list always yields `0..0`. `item_height` is the one
//! value that must be positive; [`WindowConfig::validate`](crate::WindowConfig::validate)
//! enforces that at construction, and these functions treat a non-positive
//! height as an empty range rather than dividing by zero.

use std::ops::Range;

/// Clamp an extent (offset or height) into `[0, +inf)`, mapping NaN to 0.
#[inline]
pub(crate) fn clamp_extent(value: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

#[inline]
pub(crate) fn is_valid_height(item_height: f64) -> bool {
    item_height.is_finite() && item_height > 0.0
}

#[inline]
fn rows_floor(extent: f64, item_height: f64) -> usize {
    // Saturating float-to-int cast; huge offsets clamp to usize::MAX.
    (extent / item_height).floor() as usize
}

#[inline]
fn rows_ceil(extent: f64, item_height: f64) -> usize {
    (extent / item_height).ceil() as usize
}

/// Row range to realize for the current viewport, including overscan.
///
/// `start = max(0, floor(scroll_offset / item_height) - overscan)` and
/// `end = min(item_count, start + ceil(viewport_height / item_height) + 2 * overscan)`.
///
/// `end` is additionally raised to the last row touching the viewport bottom,
/// so a partially visible trailing row is covered even with zero overscan.
/// When `scroll_offset` lies past the content, `start` clamps to `item_count`
/// and the range is empty.
#[must_use]
pub fn window_range(
    item_count: usize,
    item_height: f64,
    scroll_offset: f64,
    viewport_height: f64,
    overscan: usize,
) -> Range<usize> {
    if item_count == 0 || !is_valid_height(item_height) {
        return 0..0;
    }
    let scroll_offset = clamp_extent(scroll_offset);
    let viewport_height = clamp_extent(viewport_height);

    let first = rows_floor(scroll_offset, item_height);
    let start = first.saturating_sub(overscan).min(item_count);

    let visible_rows = rows_ceil(viewport_height, item_height)
        .saturating_add(overscan.saturating_mul(2));
    let bottom_row = rows_ceil(scroll_offset + viewport_height, item_height);
    let end = start
        .saturating_add(visible_rows)
        .max(bottom_row)
        .min(item_count);

    start..end
}

/// Rows intersecting `[scroll_offset, scroll_offset + viewport_height)`,
/// without overscan.
#[must_use]
pub fn visible_range(
    item_count: usize,
    item_height: f64,
    scroll_offset: f64,
    viewport_height: f64,
) -> Range<usize> {
    if item_count == 0 || !is_valid_height(item_height) {
        return 0..0;
    }
    let scroll_offset = clamp_extent(scroll_offset);
    let viewport_height = clamp_extent(viewport_height);

    let start = rows_floor(scroll_offset, item_height).min(item_count);
    let end = rows_ceil(scroll_offset + viewport_height, item_height)
        .min(item_count)
        .max(start);
    start..end
}

/// Total scrollable height: `item_count * item_height`.
#[must_use]
pub fn total_height(item_count: usize, item_height: f64) -> f64 {
    item_count as f64 * item_height
}

/// Absolute offset of the row at `index`: `index * item_height`.
#[must_use]
pub fn row_offset(index: usize, item_height: f64) -> f64 {
    index as f64 * item_height
}

/// Largest legal scroll offset for a container of the given height.
#[must_use]
pub fn max_scroll_offset(item_count: usize, item_height: f64, viewport_height: f64) -> f64 {
    clamp_extent(total_height(item_count, item_height) - clamp_extent(viewport_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_top_of_long_list() {
        assert_eq!(window_range(1000, 60.0, 0.0, 600.0, 5), 0..20);
    }

    #[test]
    fn scenario_scrolled_to_row_fifty() {
        assert_eq!(window_range(1000, 60.0, 3000.0, 600.0, 5), 45..65);
    }

    #[test]
    fn scenario_short_list_clamps_to_count() {
        assert_eq!(window_range(3, 60.0, 0.0, 600.0, 5), 0..3);
    }

    #[test]
    fn scenario_row_two_hundred() {
        assert_eq!(window_range(1000, 60.0, 12_000.0, 600.0, 5), 195..215);
    }

    #[test]
    fn empty_list_is_empty_range() {
        assert_eq!(window_range(0, 60.0, 0.0, 600.0, 5), 0..0);
        assert_eq!(window_range(0, 60.0, 5000.0, 600.0, 0), 0..0);
    }

    #[test]
    fn non_positive_item_height_is_empty_range() {
        assert_eq!(window_range(10, 0.0, 0.0, 600.0, 5), 0..0);
        assert_eq!(window_range(10, -1.0, 0.0, 600.0, 5), 0..0);
        assert_eq!(window_range(10, f64::NAN, 0.0, 600.0, 5), 0..0);
    }

    #[test]
    fn negative_and_nan_offsets_clamp_to_top() {
        assert_eq!(window_range(1000, 60.0, -250.0, 600.0, 5), 0..20);
        assert_eq!(window_range(1000, 60.0, f64::NAN, 600.0, 5), 0..20);
    }

    #[test]
    fn offset_past_content_is_empty_at_end() {
        let range = window_range(100, 60.0, 1.0e9, 600.0, 5);
        assert_eq!(range, 100..100);
    }

    #[test]
    fn partial_trailing_row_covered_without_overscan() {
        // Offset 30 shows half of row 0 through half of row 10.
        assert_eq!(window_range(1000, 60.0, 30.0, 600.0, 0), 0..11);
        assert_eq!(visible_range(1000, 60.0, 30.0, 600.0), 0..11);
    }

    #[test]
    fn aligned_offset_without_overscan() {
        assert_eq!(window_range(1000, 60.0, 600.0, 600.0, 0), 10..20);
        assert_eq!(visible_range(1000, 60.0, 600.0, 600.0), 10..20);
    }

    #[test]
    fn visible_range_ignores_overscan() {
        assert_eq!(visible_range(1000, 60.0, 3000.0, 600.0), 50..60);
    }

    #[test]
    fn huge_overscan_saturates() {
        let range = window_range(50, 60.0, 600.0, 600.0, usize::MAX);
        assert_eq!(range, 0..50);
    }

    #[test]
    fn totals_and_offsets() {
        assert_eq!(total_height(1000, 60.0), 60_000.0);
        assert_eq!(total_height(0, 60.0), 0.0);
        assert_eq!(row_offset(200, 60.0), 12_000.0);
        assert_eq!(max_scroll_offset(1000, 60.0, 600.0), 59_400.0);
        assert_eq!(max_scroll_offset(3, 60.0, 600.0), 0.0);
    }
}
