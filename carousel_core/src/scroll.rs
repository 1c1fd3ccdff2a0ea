// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paging arithmetic and page layout.
//!
//! Everything here is a pure function of page geometry. Pages are laid out
//! left to right, each exactly the size of the viewport, so the offset of
//! page `i` is `i * page_width` and the current page is the one nearest to
//! the content offset.

use kurbo::{Rect, Size};

/// Returns the horizontal content offset that shows `page_index`.
///
/// The result is clamped to `[0, (page_count - 1) * page_width]`, so an
/// out-of-range index scrolls to the nearest edge instead of past it. With no
/// pages the only valid offset is zero.
#[must_use]
pub fn target_offset(page_index: usize, page_width: f64, page_count: usize) -> f64 {
    let max_offset = page_count.saturating_sub(1) as f64 * page_width;
    let offset = page_index as f64 * page_width;
    // `max(0.0)` also guards against a negative page width.
    offset.min(max_offset).max(0.0)
}

/// Returns the index of the page nearest to `offset_x`.
///
/// This is unclamped rounding (`60 / 120` rounds to `1`); negative offsets
/// produced by elastic overscroll yield negative indices. A non-positive
/// viewport width yields `0`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    reason = "rounded page counts are far below i64::MAX"
)]
pub fn current_page_index(offset_x: f64, viewport_width: f64) -> i64 {
    if viewport_width <= 0.0 || !offset_x.is_finite() {
        return 0;
    }
    (offset_x / viewport_width).round() as i64
}

/// Returns the page after `current`, or `None` if paging forward is a no-op.
///
/// With `cycle` the last page wraps around to the first one.
#[must_use]
pub fn next_page_index(current: usize, count: usize, cycle: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match current.checked_add(1).filter(|&next| next < count) {
        Some(next) => Some(next),
        None if cycle => Some(0),
        None => None,
    }
}

/// Returns the page before `current`, or `None` if paging backward is a no-op.
///
/// With `cycle` the first page wraps around to the last one.
#[must_use]
pub fn previous_page_index(current: usize, count: usize, cycle: bool) -> Option<usize> {
    if count == 0 {
        return None;
    }
    match current.checked_sub(1) {
        Some(previous) => Some(previous.min(count - 1)),
        None if cycle => Some(count - 1),
        None => None,
    }
}

/// Returns the frame of the page at `position` for a viewport of `viewport`
/// size.
#[must_use]
pub fn page_frame(position: usize, viewport: Size) -> Rect {
    let x0 = position as f64 * viewport.width;
    Rect::new(x0, 0.0, x0 + viewport.width, viewport.height)
}

/// Returns the content size needed to hold `count` pages side by side.
#[must_use]
pub fn content_size(count: usize, viewport: Size) -> Size {
    if count == 0 {
        return Size::ZERO;
    }
    Size::new(count as f64 * viewport.width, viewport.height)
}
