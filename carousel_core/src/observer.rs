// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pass-through of container events to a caller-installed observer.

use kurbo::{Point, Vec2};

use crate::page::PageId;

/// Receives the container's scroll events after the carousel has handled
/// them.
///
/// Install one with
/// [`Carousel::set_scroll_observer`](crate::carousel::Carousel::set_scroll_observer).
/// All methods default to doing nothing, except
/// [`should_scroll_to_top`](Self::should_scroll_to_top) which allows it and
/// [`view_for_zooming`](Self::view_for_zooming) which offers no page.
pub trait ScrollObserver<C: ?Sized> {
    /// The content offset changed.
    fn did_scroll(&mut self, container: &C) {
        _ = container;
    }

    /// The zoom scale changed.
    fn did_zoom(&mut self, container: &C) {
        _ = container;
    }

    /// The user started dragging.
    fn will_begin_dragging(&mut self, container: &C) {
        _ = container;
    }

    /// The user is about to lift their finger. `target_offset` may be
    /// adjusted to change where the deceleration ends.
    fn will_end_dragging(&mut self, container: &C, velocity: Vec2, target_offset: &mut Point) {
        _ = (container, velocity, target_offset);
    }

    /// The user lifted their finger.
    fn did_end_dragging(&mut self, container: &C, will_decelerate: bool) {
        _ = (container, will_decelerate);
    }

    /// Deceleration is about to begin.
    fn will_begin_decelerating(&mut self, container: &C) {
        _ = container;
    }

    /// Deceleration ended.
    fn did_end_decelerating(&mut self, container: &C) {
        _ = container;
    }

    /// A programmatic animated scroll ended.
    fn did_end_scrolling_animation(&mut self, container: &C) {
        _ = container;
    }

    /// Which page, if any, the container should scale when the user
    /// pinches. `None` disables zooming.
    fn view_for_zooming(&mut self, container: &C) -> Option<PageId> {
        _ = container;
        None
    }

    /// Zooming is about to begin.
    fn will_begin_zooming(&mut self, container: &C) {
        _ = container;
    }

    /// Zooming ended at `scale`.
    fn did_end_zooming(&mut self, container: &C, scale: f64) {
        _ = (container, scale);
    }

    /// Whether a scroll-to-top gesture should be honored.
    fn should_scroll_to_top(&mut self, container: &C) -> bool {
        _ = container;
        true
    }

    /// The container finished scrolling to the top.
    fn did_scroll_to_top(&mut self, container: &C) {
        _ = container;
    }
}
