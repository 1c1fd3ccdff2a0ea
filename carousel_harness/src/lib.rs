// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated collaborators for driving a [`Carousel`] without a platform.
//!
//! - [`SimContainer`] records every layout, offset and presentation call and
//!   applies offset changes instantly. Like a real scroll view it owes a
//!   scroll notification for every programmatic offset change; deliver them
//!   with [`deliver_scroll_notifications`].
//! - [`SimIndicator`] records the page count, current page and visibility.
//! - [`FetchSimulator`] records downloads and lets the caller resolve them,
//!   including after they were cancelled or from another thread.
//! - [`ManualTimer`] schedules nothing; [`ManualTimer::fire_all`] delivers a
//!   tick for every active timer, followed by the scroll notifications the
//!   tick caused.

use core::time::Duration;
use std::sync::Arc;

use carousel_core::Carousel;
use carousel_core::backend::{PageIndicator, Presentation, ScrollContainer, TimerDriver, TimerId};
use carousel_core::fetch::{Completer, FetchError, FetchRequest, FetchTicket, ImageFetcher};
use carousel_core::page::{PageId, Surface};
use carousel_core::settings::PageIndicatorStyle;
use kurbo::{Point, Rect, Size};

#[cfg(test)]
mod scenarios;

/// The carousel type driven by the simulators.
pub type SimCarousel = Carousel<SimContainer, FetchSimulator, ManualTimer>;

/// Creates a carousel over a container of the given viewport size.
#[must_use]
pub fn sim_carousel(viewport: Size) -> SimCarousel {
    Carousel::new(
        SimContainer::new(viewport),
        FetchSimulator::default(),
        ManualTimer::default(),
    )
}

/// Moves the viewport to `x` as a user scroll would, then delivers
/// `did_scroll`.
pub fn scroll_to_offset(carousel: &mut SimCarousel, x: f64) {
    carousel.container_mut().scroll_by_user(Point::new(x, 0.0));
    carousel.did_scroll();
}

/// Delivers `did_scroll` once for every programmatic offset change the
/// container has not reported yet. Returns how many were delivered.
pub fn deliver_scroll_notifications(carousel: &mut SimCarousel) -> usize {
    let mut delivered = 0;
    while carousel.container_mut().take_scroll_notification() {
        carousel.did_scroll();
        delivered += 1;
    }
    delivered
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// A stand-in image identified by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SimImage(pub String);

impl SimImage {
    /// Creates an image with the given name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self(name.to_owned())
    }
}

// ---------------------------------------------------------------------------
// SimContainer
// ---------------------------------------------------------------------------

/// An image shown on a page surface, with how it was presented.
#[derive(Clone, Debug, PartialEq)]
pub struct Shown {
    /// The image.
    pub image: SimImage,
    /// Fit and transition used.
    pub presentation: Presentation,
}

/// State of one attached page view.
#[derive(Clone, Debug, PartialEq)]
pub struct SimPageView {
    /// Handle of the page.
    pub id: PageId,
    /// Last frame set by the carousel.
    pub frame: Rect,
    /// Image on the local surface.
    pub local: Option<Shown>,
    /// Image on the remote surface.
    pub remote: Option<Shown>,
}

/// A programmatic content offset change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetChange {
    /// Requested offset.
    pub offset: Point,
    /// Whether it was animated.
    pub animated: bool,
}

/// A scroll container that applies every change immediately.
#[derive(Debug)]
pub struct SimContainer {
    bounds: Rect,
    content_size: Size,
    paging_enabled: bool,
    shows_horizontal_scroll_indicator: bool,
    views: Vec<SimPageView>,
    offset_changes: Vec<OffsetChange>,
    pending_scroll_notifications: usize,
    indicators_created: usize,
}

impl SimContainer {
    /// Creates a container with its viewport at the origin.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            bounds: Rect::from_origin_size(Point::ZERO, viewport),
            content_size: Size::ZERO,
            paging_enabled: false,
            shows_horizontal_scroll_indicator: true,
            views: Vec::new(),
            offset_changes: Vec::new(),
            pending_scroll_notifications: 0,
            indicators_created: 0,
        }
    }

    /// Moves the viewport without recording a programmatic change.
    pub fn scroll_by_user(&mut self, offset: Point) {
        self.bounds = Rect::from_origin_size(offset, self.bounds.size());
    }

    /// Changes the viewport size, keeping the offset.
    pub fn resize(&mut self, viewport: Size) {
        self.bounds = Rect::from_origin_size(self.bounds.origin(), viewport);
    }

    /// Returns the current content offset.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.bounds.origin()
    }

    /// Returns the last content size set by the carousel.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Returns whether paging is enabled.
    #[must_use]
    pub fn paging_enabled(&self) -> bool {
        self.paging_enabled
    }

    /// Returns whether the horizontal scroll indicator is shown.
    #[must_use]
    pub fn shows_horizontal_scroll_indicator(&self) -> bool {
        self.shows_horizontal_scroll_indicator
    }

    /// Returns the attached page views in attachment order.
    #[must_use]
    pub fn views(&self) -> &[SimPageView] {
        &self.views
    }

    /// Returns the view of `page`, if attached.
    #[must_use]
    pub fn view(&self, page: PageId) -> Option<&SimPageView> {
        self.views.iter().find(|view| view.id == page)
    }

    /// Returns every programmatic offset change, oldest first.
    #[must_use]
    pub fn offset_changes(&self) -> &[OffsetChange] {
        &self.offset_changes
    }

    /// Consumes one owed scroll notification, returning whether there was
    /// one.
    pub fn take_scroll_notification(&mut self) -> bool {
        if self.pending_scroll_notifications == 0 {
            return false;
        }
        self.pending_scroll_notifications -= 1;
        true
    }

    /// Returns how many page indicators were created.
    #[must_use]
    pub fn indicators_created(&self) -> usize {
        self.indicators_created
    }

    fn view_mut(&mut self, page: PageId) -> Option<&mut SimPageView> {
        self.views.iter_mut().find(|view| view.id == page)
    }
}

impl ScrollContainer for SimContainer {
    type Image = SimImage;
    type Indicator = SimIndicator;

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn set_content_offset(&mut self, offset: Point, animated: bool) {
        self.offset_changes.push(OffsetChange { offset, animated });
        self.pending_scroll_notifications += 1;
        self.scroll_by_user(offset);
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    fn set_paging_enabled(&mut self, enabled: bool) {
        self.paging_enabled = enabled;
    }

    fn set_shows_horizontal_scroll_indicator(&mut self, shows: bool) {
        self.shows_horizontal_scroll_indicator = shows;
    }

    fn attach_page(&mut self, page: PageId) {
        self.views.push(SimPageView {
            id: page,
            frame: Rect::ZERO,
            local: None,
            remote: None,
        });
    }

    fn detach_page(&mut self, page: PageId) {
        self.views.retain(|view| view.id != page);
    }

    fn layout_page(&mut self, page: PageId, frame: Rect) {
        if let Some(view) = self.view_mut(page) {
            view.frame = frame;
        }
    }

    fn present(
        &mut self,
        page: PageId,
        surface: Surface,
        image: &SimImage,
        presentation: Presentation,
    ) {
        let Some(view) = self.view_mut(page) else {
            return;
        };
        let shown = Some(Shown {
            image: image.clone(),
            presentation,
        });
        match surface {
            Surface::Local => view.local = shown,
            Surface::Remote => view.remote = shown,
        }
    }

    fn create_page_indicator(&mut self, style: &PageIndicatorStyle) -> SimIndicator {
        self.indicators_created += 1;
        SimIndicator {
            style: *style,
            page_count: 0,
            current_page: 0,
            hidden: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SimIndicator
// ---------------------------------------------------------------------------

/// A page indicator that records what it was told.
#[derive(Clone, Debug, PartialEq)]
pub struct SimIndicator {
    /// Style it was created with.
    pub style: PageIndicatorStyle,
    /// Number of dots.
    pub page_count: usize,
    /// Highlighted dot.
    pub current_page: usize,
    /// Whether it is hidden.
    pub hidden: bool,
}

impl PageIndicator for SimIndicator {
    fn set_page_count(&mut self, count: usize) {
        self.page_count = count;
    }

    fn set_current_page(&mut self, index: usize) {
        self.current_page = index;
    }

    fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

// ---------------------------------------------------------------------------
// FetchSimulator
// ---------------------------------------------------------------------------

/// One fetch started by the carousel.
#[derive(Debug)]
pub struct Download {
    /// Requested URL.
    pub url: Arc<str>,
    /// Identity of the fetch.
    pub ticket: FetchTicket,
    /// Whether the carousel cancelled it.
    pub cancelled: bool,
    completer: Option<Completer<SimImage>>,
}

impl Download {
    /// Returns whether the download has been answered or handed out.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.completer.is_none()
    }
}

/// An image fetcher whose downloads are answered by the caller.
///
/// Cancelled downloads keep their completer so that a response racing the
/// cancellation can still be delivered.
#[derive(Debug, Default)]
pub struct FetchSimulator {
    downloads: Vec<Download>,
}

impl FetchSimulator {
    /// Returns every download started, oldest first.
    #[must_use]
    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }

    /// Returns the URLs of all started downloads, oldest first.
    #[must_use]
    pub fn started_urls(&self) -> Vec<&str> {
        self.downloads.iter().map(|d| &*d.url).collect()
    }

    /// Returns how many downloads were cancelled.
    #[must_use]
    pub fn cancelled_count(&self) -> usize {
        self.downloads.iter().filter(|d| d.cancelled).count()
    }

    /// Answers download `index` with an image. Returns `false` if it was
    /// already answered.
    pub fn respond_with_image(&mut self, index: usize, image: SimImage) -> bool {
        match self.take_completer(index) {
            Some(completer) => {
                completer.succeed(image);
                true
            }
            None => false,
        }
    }

    /// Answers download `index` with an error. Returns `false` if it was
    /// already answered.
    pub fn respond_with_error(&mut self, index: usize, error: FetchError) -> bool {
        match self.take_completer(index) {
            Some(completer) => {
                completer.fail(error);
                true
            }
            None => false,
        }
    }

    /// Takes the completer of download `index`, e.g. to resolve it on
    /// another thread.
    pub fn take_completer(&mut self, index: usize) -> Option<Completer<SimImage>> {
        self.downloads.get_mut(index)?.completer.take()
    }
}

impl ImageFetcher for FetchSimulator {
    type Image = SimImage;

    fn start(&mut self, request: FetchRequest<SimImage>) {
        self.downloads.push(Download {
            url: request.url,
            ticket: request.ticket,
            cancelled: false,
            completer: Some(request.completer),
        });
    }

    fn cancel(&mut self, ticket: FetchTicket, _url: &str) {
        if let Some(download) = self.downloads.iter_mut().find(|d| d.ticket == ticket) {
            download.cancelled = true;
        }
    }
}

// ---------------------------------------------------------------------------
// ManualTimer
// ---------------------------------------------------------------------------

/// A timer driver that fires only when told to.
#[derive(Debug, Default)]
pub struct ManualTimer {
    next_id: u64,
    active: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
}

impl ManualTimer {
    /// Returns the scheduled, not yet cancelled timers.
    #[must_use]
    pub fn active(&self) -> &[(TimerId, Duration)] {
        &self.active
    }

    /// Returns every cancelled timer, oldest first.
    #[must_use]
    pub fn cancelled(&self) -> &[TimerId] {
        &self.cancelled
    }

    /// Delivers one firing of every active timer to `carousel`, each
    /// followed by the scroll notifications it caused.
    pub fn fire_all(carousel: &mut SimCarousel) {
        let ids: Vec<TimerId> = carousel.timer().active.iter().map(|(id, _)| *id).collect();
        for id in ids {
            carousel.on_timer_fired(id);
            deliver_scroll_notifications(carousel);
        }
    }
}

impl TimerDriver for ManualTimer {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.active.push((id, interval));
        id
    }

    fn cancel(&mut self, timer: TimerId) {
        let before = self.active.len();
        self.active.retain(|(id, _)| *id != timer);
        if self.active.len() != before {
            self.cancelled.push(timer);
        }
    }
}
