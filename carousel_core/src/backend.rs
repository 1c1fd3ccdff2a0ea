// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The carousel is headless. A platform integration provides the following
//! pieces:
//!
//! - **Scroll container** — Implements [`ScrollContainer`]: reports its
//!   visible bounds, accepts content offset and size, hosts one view per
//!   page and displays images on them.
//!
//! - **Page indicator** — Implements [`PageIndicator`]; created by the
//!   container from a [`PageIndicatorStyle`] so that placement stays a
//!   platform concern.
//!
//! - **Image fetcher** — Implements
//!   [`ImageFetcher`](crate::fetch::ImageFetcher).
//!
//! - **Timer** — Implements [`TimerDriver`] and calls
//!   [`Carousel::on_timer_fired`] from the owning thread whenever a
//!   repeating timer fires.
//!
//! - **Event delivery** — Calls [`Carousel::did_scroll`] and the other
//!   container event methods as the user interacts.
//!
//! # Crate boundaries
//!
//! `carousel_core` owns the data model, the paging and loading decisions and
//! this contract module. Integrations depend on `carousel_core` and provide
//! platform glue; `carousel_harness` provides simulated implementations for
//! tests.
//!
//! [`Carousel::on_timer_fired`]: crate::carousel::Carousel::on_timer_fired
//! [`Carousel::did_scroll`]: crate::carousel::Carousel::did_scroll

use core::time::Duration;

use kurbo::{Point, Rect, Size};

use crate::page::{PageId, Surface};
use crate::settings::{ContentMode, PageIndicatorStyle};

/// How an image change is animated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Replace immediately.
    None,
    /// Fade the new image in over the given duration.
    FadeIn(Duration),
}

/// Display parameters for [`ScrollContainer::present`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Presentation {
    /// How the image is fitted into the page.
    pub content_mode: ContentMode,
    /// How the change is animated.
    pub transition: Transition,
}

/// The horizontally scrolling view hosting the pages.
///
/// # Call order
///
/// ```rust,ignore
/// container.set_paging_enabled(true);          // on every show
/// container.attach_page(id);                   // new page
/// container.layout_page(id, frame);            // every page, on relayout
/// container.set_content_size(size);
/// container.present(id, Surface::Local, &img, presentation);
/// let viewport = container.bounds();           // visibility pass
/// ```
pub trait ScrollContainer {
    /// Image type displayed by the container.
    type Image;
    /// Indicator type created by [`create_page_indicator`](Self::create_page_indicator).
    type Indicator: PageIndicator;

    /// Returns the visible rectangle in content coordinates.
    ///
    /// The origin is the current content offset; the size is the viewport
    /// size.
    fn bounds(&self) -> Rect;

    /// Scrolls so that `offset` is the top-left visible content point.
    fn set_content_offset(&mut self, offset: Point, animated: bool);

    /// Sets the scrollable content size.
    fn set_content_size(&mut self, size: Size);

    /// Enables or disables snapping to whole pages.
    fn set_paging_enabled(&mut self, enabled: bool);

    /// Shows or hides the horizontal scroll indicator.
    fn set_shows_horizontal_scroll_indicator(&mut self, shows: bool);

    /// Creates the view for a new page.
    fn attach_page(&mut self, page: PageId);

    /// Destroys the view of a removed page.
    fn detach_page(&mut self, page: PageId);

    /// Positions a page view in content coordinates.
    fn layout_page(&mut self, page: PageId, frame: Rect);

    /// Displays `image` on one surface of a page.
    fn present(
        &mut self,
        page: PageId,
        surface: Surface,
        image: &Self::Image,
        presentation: Presentation,
    );

    /// Creates and installs the page indicator.
    fn create_page_indicator(&mut self, style: &PageIndicatorStyle) -> Self::Indicator;
}

/// The dots showing how many pages there are and which one is current.
pub trait PageIndicator {
    /// Sets the number of dots.
    fn set_page_count(&mut self, count: usize);

    /// Highlights the dot at `index`.
    fn set_current_page(&mut self, index: usize);

    /// Shows or hides the indicator.
    fn set_hidden(&mut self, hidden: bool);
}

/// Identifies a timer scheduled by a [`TimerDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Schedules repeating timers.
pub trait TimerDriver {
    /// Schedules a timer firing every `interval` and returns its id.
    ///
    /// Each firing must be reported through
    /// [`Carousel::on_timer_fired`](crate::carousel::Carousel::on_timer_fired)
    /// on the owning thread.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId;

    /// Cancels a timer. Cancelling an unknown id is a no-op.
    fn cancel(&mut self, timer: TimerId);
}
