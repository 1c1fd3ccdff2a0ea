// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page visibility classification.
//!
//! A page is *visible* when its frame overlaps the viewport. It is *far out
//! of sight* only when it does not overlap the viewport widened by
//! [`FAR_OUT_OF_SIGHT_MARGIN`] on each side. Pages in between are *near*.
//!
//! The two tests use different rectangles on purpose. An animated page
//! change often overshoots, briefly showing a sliver of the following page
//! before springing back. That page starts downloading as soon as it is
//! visible; because it is still near when the animation settles, its download
//! is not cancelled straight away. Only pages that move well outside the
//! viewport are cancelled.
//!
//! ```text
//!   |<- 50 ->|<------ viewport ------>|<- 50 ->|
//!   [  near  ][       visible        ][  near  ]   far beyond
//! ```

use kurbo::Rect;

/// Horizontal margin added on each side of the viewport before a page counts
/// as far out of sight.
pub const FAR_OUT_OF_SIGHT_MARGIN: f64 = 50.0;

/// Where a page lies relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// The page overlaps the viewport.
    Visible,
    /// The page is outside the viewport but within the margin.
    Near,
    /// The page is outside the viewport widened by the margin.
    Far,
}

/// Returns whether `frame` overlaps `viewport`.
///
/// Rectangles that only share an edge do not overlap.
#[must_use]
pub fn is_visible(viewport: Rect, frame: Rect) -> bool {
    overlaps(viewport, frame)
}

/// Returns whether `frame` lies outside `viewport` widened horizontally by
/// [`FAR_OUT_OF_SIGHT_MARGIN`].
#[must_use]
pub fn is_far_out_of_sight(viewport: Rect, frame: Rect) -> bool {
    !overlaps(viewport.inflate(FAR_OUT_OF_SIGHT_MARGIN, 0.0), frame)
}

/// Classifies `frame` against `viewport`.
#[must_use]
pub fn classify(viewport: Rect, frame: Rect) -> Visibility {
    if is_visible(viewport, frame) {
        Visibility::Visible
    } else if is_far_out_of_sight(viewport, frame) {
        Visibility::Far
    } else {
        Visibility::Near
    }
}

fn overlaps(a: Rect, b: Rect) -> bool {
    let (a, b) = (a.abs(), b.abs());
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}
