// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel coordinator.
//!
//! [`Carousel`] owns the pages and the collaborators and turns container
//! events into page layout, fetch start/cancel decisions, indicator updates
//! and programmatic scrolling.
//!
//! # Event flow
//!
//! ```text
//! did_scroll ──► visibility pass ──► slot commands ──► ImageFetcher
//!            └─► current page    ──► PageIndicator
//!            └─► ScrollObserver
//!
//! Completer (any thread) ──► queue ──► process_completions ──► present
//! ```

use core::fmt;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use kurbo::{Point, Vec2};
use tracing::{debug, trace};

use crate::autoscroll::{Autoscroll, AutoscrollConfig, Direction};
use crate::backend::{
    PageIndicator, Presentation, ScrollContainer, TimerDriver, TimerId, Transition,
};
use crate::error::Error;
use crate::fetch::{Completer, Completion, FetchRequest, FetchTicket, ImageFetcher};
use crate::observer::ScrollObserver;
use crate::page::{Page, PageId, PageStore, Surface};
use crate::scroll;
use crate::settings::CarouselSettings;
use crate::slot::{CompletionEffect, FetchOutcome, RemoteImageSlot, SlotCommand};
use crate::trace::{
    AutoscrollEvent, AutoscrollKind, PageAddedEvent, PageIndexEvent, PagesRemovedEvent,
    ScrollCommandEvent, SlotTransitionEvent, StaleCompletionEvent, TraceSink, Tracer,
};
use crate::visibility::{self, Visibility};

/// Coordinates pages, downloads, paging and autoscroll for one scroll
/// container.
///
/// All methods must be called on the thread that owns the carousel. The
/// only cross-thread path is the [`Completer`] handed to the fetcher.
///
/// Dropping the carousel cancels the autoscroll timer and every in-flight
/// fetch.
pub struct Carousel<C, F, T>
where
    C: ScrollContainer,
    F: ImageFetcher<Image = C::Image>,
    T: TimerDriver,
{
    container: C,
    fetcher: F,
    timer: T,
    settings: CarouselSettings<C::Image>,
    pages: PageStore<C::Image>,
    indicator: Option<C::Indicator>,
    autoscroll: Autoscroll,
    observer: Option<Box<dyn ScrollObserver<C>>>,
    completions_tx: Sender<Completion<C::Image>>,
    completions_rx: Receiver<Completion<C::Image>>,
    last_page_index: usize,
    tracer: Tracer,
}

impl<C, F, T> fmt::Debug for Carousel<C, F, T>
where
    C: ScrollContainer,
    F: ImageFetcher<Image = C::Image>,
    T: TimerDriver,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("pages", &self.pages.len())
            .field("current_page_index", &self.last_page_index)
            .field("autoscroll", &self.autoscroll.active_timer())
            .finish_non_exhaustive()
    }
}

impl<C, F, T> Carousel<C, F, T>
where
    C: ScrollContainer,
    C::Image: Clone,
    F: ImageFetcher<Image = C::Image>,
    T: TimerDriver,
{
    /// Creates an empty carousel with default settings.
    #[must_use]
    pub fn new(container: C, fetcher: F, timer: T) -> Self {
        let (completions_tx, completions_rx) = mpsc::channel();
        Self {
            container,
            fetcher,
            timer,
            settings: CarouselSettings::default(),
            pages: PageStore::new(),
            indicator: None,
            autoscroll: Autoscroll::default(),
            observer: None,
            completions_tx,
            completions_rx,
            last_page_index: 0,
            tracer: Tracer::none(),
        }
    }

    /// Creates an empty carousel with the given settings.
    pub fn with_settings(
        container: C,
        fetcher: F,
        timer: T,
        settings: CarouselSettings<C::Image>,
    ) -> Result<Self, Error> {
        settings.validate()?;
        let mut carousel = Self::new(container, fetcher, timer);
        carousel.settings = settings;
        Ok(carousel)
    }

    // -- Accessors --

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &CarouselSettings<C::Image> {
        &self.settings
    }

    /// Replaces the settings.
    ///
    /// New settings apply from the next event on; pages already shown keep
    /// their images.
    pub fn set_settings(&mut self, settings: CarouselSettings<C::Image>) -> Result<(), Error> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Returns the scroll container.
    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Returns the scroll container mutably.
    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }

    /// Returns the image fetcher.
    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Returns the image fetcher mutably.
    pub fn fetcher_mut(&mut self) -> &mut F {
        &mut self.fetcher
    }

    /// Returns the timer driver.
    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    /// Returns the timer driver mutably.
    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Returns the page indicator, once created.
    #[must_use]
    pub fn page_indicator(&self) -> Option<&C::Indicator> {
        self.indicator.as_ref()
    }

    /// Returns the pages.
    #[must_use]
    pub fn pages(&self) -> &PageStore<C::Image> {
        &self.pages
    }

    /// Returns the active autoscroll timer, if any.
    #[must_use]
    pub fn autoscroll_timer(&self) -> Option<TimerId> {
        self.autoscroll.active_timer()
    }

    /// Installs a trace sink. Without the `trace` feature the sink is dropped.
    pub fn set_trace_sink(&mut self, sink: Box<dyn TraceSink>) {
        self.tracer = Tracer::new(sink);
    }

    /// Installs the observer that receives container events after the
    /// carousel, returning the one it replaces.
    pub fn set_scroll_observer(
        &mut self,
        observer: Option<Box<dyn ScrollObserver<C>>>,
    ) -> Option<Box<dyn ScrollObserver<C>>> {
        core::mem::replace(&mut self.observer, observer)
    }

    // -- Pages --

    /// Appends a page showing `image`.
    pub fn show_image(&mut self, image: C::Image) -> PageId {
        self.setup();
        let mut page = Page::new();
        page.show_local(image);
        let id = self.add_page(page);
        self.present_local(id);
        id
    }

    /// Appends a page that downloads `url` once it becomes visible.
    ///
    /// The placeholder from the settings, if any, is shown until then.
    pub fn show_remote_image(&mut self, url: impl Into<Arc<str>>) -> PageId {
        self.setup();
        let mut page = Page::new();
        page.show_remote(url.into(), self.settings.placeholder_image.clone());
        let id = self.add_page(page);
        self.present_local(id);
        self.update_visibility();
        id
    }

    /// Removes every page, cancelling their in-flight downloads.
    pub fn remove_all(&mut self) {
        let removed = self.pages.clear();
        let mut cancelled_fetches = 0;
        for (id, page) in &removed {
            if cancel_in_flight(&mut self.fetcher, *id, page) {
                cancelled_fetches += 1;
            }
            self.container.detach_page(*id);
        }
        self.layout_pages();
        self.update_indicator_count();
        self.update_current_page();

        debug!(count = removed.len(), cancelled_fetches, "removed all pages");
        self.tracer.pages_removed(&PagesRemovedEvent {
            count: removed.len(),
            cancelled_fetches,
        });
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn number_of_pages(&self) -> usize {
        self.pages.len()
    }

    /// Returns the index of the page closest to the current content offset.
    ///
    /// Always within `0..number_of_pages()`, or `0` without pages.
    #[must_use]
    pub fn current_page_index(&self) -> usize {
        let bounds = self.container.bounds();
        self.page_index_at(bounds.x0, bounds.width())
    }

    /// Recomputes page frames and the content size from the current bounds.
    ///
    /// Call after the container changes size: the page shown at the current
    /// offset under the previous layout is scrolled back into place at the
    /// new width.
    pub fn relayout(&mut self) {
        let laid_out_width = self
            .pages
            .iter()
            .next()
            .map_or(0.0, |(_, page)| page.frame().width());
        let page_index = self.page_index_at(self.container.bounds().x0, laid_out_width);
        self.layout_pages();
        let width = self.container.bounds().width();
        self.scroll_to_with_page_width(page_index, width, false);
        self.update_visibility();
        self.update_current_page();
    }

    // -- Paging --

    /// Scrolls to the page at `page_index`, clamped to the existing pages.
    pub fn scroll_to(&mut self, page_index: usize, animated: bool) {
        let width = self.container.bounds().width();
        self.scroll_to_with_page_width(page_index, width, animated);
    }

    /// Scrolls to the page at `page_index` assuming pages `page_width` wide.
    ///
    /// Does nothing without pages.
    pub fn scroll_to_with_page_width(
        &mut self,
        page_index: usize,
        page_width: f64,
        animated: bool,
    ) {
        let count = self.pages.len();
        if count == 0 {
            return;
        }
        let offset_x = scroll::target_offset(page_index, page_width, count);
        self.container.set_content_offset(Point::new(offset_x, 0.0), animated);
        self.tracer.scroll_command(&ScrollCommandEvent {
            target_index: page_index,
            offset_x,
            animated,
        });
    }

    /// Scrolls one page forward. With `cycle`, the last page wraps to the
    /// first; without it, nothing happens on the last page.
    pub fn scroll_to_next_page(&mut self, cycle: bool, animated: bool) {
        let next = scroll::next_page_index(self.current_page_index(), self.pages.len(), cycle);
        if let Some(next) = next {
            self.scroll_to(next, animated);
        }
    }

    /// Scrolls one page back. With `cycle`, the first page wraps to the
    /// last; without it, nothing happens on the first page.
    pub fn scroll_to_previous_page(&mut self, cycle: bool, animated: bool) {
        let previous =
            scroll::previous_page_index(self.current_page_index(), self.pages.len(), cycle);
        if let Some(previous) = previous {
            self.scroll_to(previous, animated);
        }
    }

    // -- Autoscroll --

    /// Starts stepping pages on a repeating timer, replacing any previous
    /// autoscroll.
    ///
    /// Autoscroll stops by itself when the user starts dragging.
    pub fn start_auto_scroll(&mut self, config: AutoscrollConfig) -> Result<(), Error> {
        let previous = self.autoscroll.active_timer();
        let timer = self.autoscroll.start(&mut self.timer, config)?;
        if let Some(previous) = previous {
            self.tracer.autoscroll(&AutoscrollEvent {
                timer: previous,
                kind: AutoscrollKind::Stopped,
            });
        }
        debug!(?timer, interval = ?config.interval, "autoscroll started");
        self.tracer.autoscroll(&AutoscrollEvent {
            timer,
            kind: AutoscrollKind::Started,
        });
        Ok(())
    }

    /// Stops autoscroll. Does nothing if it is not running.
    pub fn stop_auto_scroll(&mut self) {
        if let Some(timer) = self.autoscroll.stop(&mut self.timer) {
            debug!(?timer, "autoscroll stopped");
            self.tracer.autoscroll(&AutoscrollEvent {
                timer,
                kind: AutoscrollKind::Stopped,
            });
        }
    }

    /// Handles a firing of `timer`. Firings of cancelled timers are ignored.
    pub fn on_timer_fired(&mut self, timer: TimerId) {
        let Some(config) = self.autoscroll.config_for(timer) else {
            trace!(?timer, "ignoring inactive timer");
            return;
        };
        self.tracer.autoscroll(&AutoscrollEvent {
            timer,
            kind: AutoscrollKind::Tick,
        });
        match config.direction {
            Direction::Forward => self.scroll_to_next_page(config.cycle, config.animated),
            Direction::Backward => self.scroll_to_previous_page(config.cycle, config.animated),
        }
    }

    // -- Container events --

    /// The content offset changed: starts and cancels downloads, updates the
    /// indicator, then notifies the observer.
    pub fn did_scroll(&mut self) {
        self.update_visibility();
        self.update_current_page();
        if let Some(observer) = &mut self.observer {
            observer.did_scroll(&self.container);
        }
    }

    /// The user started dragging: notifies the observer, then stops
    /// autoscroll.
    pub fn will_begin_dragging(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.will_begin_dragging(&self.container);
        }
        self.stop_auto_scroll();
    }

    /// Forwards to [`ScrollObserver::did_zoom`].
    pub fn did_zoom(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.did_zoom(&self.container);
        }
    }

    /// Forwards to [`ScrollObserver::will_end_dragging`].
    pub fn will_end_dragging(&mut self, velocity: Vec2, target_offset: &mut Point) {
        if let Some(observer) = &mut self.observer {
            observer.will_end_dragging(&self.container, velocity, target_offset);
        }
    }

    /// Forwards to [`ScrollObserver::did_end_dragging`].
    pub fn did_end_dragging(&mut self, will_decelerate: bool) {
        if let Some(observer) = &mut self.observer {
            observer.did_end_dragging(&self.container, will_decelerate);
        }
    }

    /// Forwards to [`ScrollObserver::will_begin_decelerating`].
    pub fn will_begin_decelerating(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.will_begin_decelerating(&self.container);
        }
    }

    /// Forwards to [`ScrollObserver::did_end_decelerating`].
    pub fn did_end_decelerating(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.did_end_decelerating(&self.container);
        }
    }

    /// Forwards to [`ScrollObserver::did_end_scrolling_animation`].
    pub fn did_end_scrolling_animation(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.did_end_scrolling_animation(&self.container);
        }
    }

    /// Asks the observer which page to zoom; `None` without an observer or
    /// when the answer is not a live page.
    pub fn view_for_zooming(&mut self) -> Option<PageId> {
        self.observer
            .as_mut()
            .and_then(|observer| observer.view_for_zooming(&self.container))
            .filter(|&id| self.pages.is_alive(id))
    }

    /// Forwards to [`ScrollObserver::will_begin_zooming`].
    pub fn will_begin_zooming(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.will_begin_zooming(&self.container);
        }
    }

    /// Forwards to [`ScrollObserver::did_end_zooming`].
    pub fn did_end_zooming(&mut self, scale: f64) {
        if let Some(observer) = &mut self.observer {
            observer.did_end_zooming(&self.container, scale);
        }
    }

    /// Asks the observer whether to scroll to the top; `true` without one.
    pub fn should_scroll_to_top(&mut self) -> bool {
        match &mut self.observer {
            Some(observer) => observer.should_scroll_to_top(&self.container),
            None => true,
        }
    }

    /// Forwards to [`ScrollObserver::did_scroll_to_top`].
    pub fn did_scroll_to_top(&mut self) {
        if let Some(observer) = &mut self.observer {
            observer.did_scroll_to_top(&self.container);
        }
    }

    // -- Completions --

    /// Applies every completion queued by the fetcher so far.
    ///
    /// Returns how many were applied; stale completions are dropped and not
    /// counted.
    pub fn process_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            if self.apply_completion(completion) {
                applied += 1;
            }
        }
        applied
    }

    fn apply_completion(&mut self, completion: Completion<C::Image>) -> bool {
        let Completion { ticket, result } = completion;
        let outcome = match &result {
            Ok(_) => FetchOutcome::Succeeded,
            Err(_) => FetchOutcome::Failed,
        };
        let has_error_image = self.settings.error_image.is_some();

        let Some(page) = self.pages.get_mut(ticket.page) else {
            report_stale(&mut self.tracer, ticket);
            return false;
        };
        let Some(slot) = page.slot_mut() else {
            report_stale(&mut self.tracer, ticket);
            return false;
        };
        let from = slot.state();
        let effect = slot.complete(ticket.attempt, outcome, has_error_image);
        if effect == CompletionEffect::Ignore {
            report_stale(&mut self.tracer, ticket);
            return false;
        }
        self.tracer.slot_transition(&SlotTransitionEvent {
            page: ticket.page,
            attempt: ticket.attempt,
            from,
            to: slot.state(),
        });

        let image = match (effect, result) {
            (CompletionEffect::ShowDownloaded, Ok(image)) => Some(image),
            (_, Err(error)) => {
                debug!(page = ?ticket.page, attempt = ticket.attempt, %error, "download failed");
                if effect == CompletionEffect::ShowErrorImage {
                    self.settings.error_image.clone()
                } else {
                    None
                }
            }
            _ => None,
        };
        if let Some(image) = image {
            let presentation = Presentation {
                content_mode: self.settings.content_mode,
                transition: if self.settings.fade_in.is_zero() {
                    Transition::None
                } else {
                    Transition::FadeIn(self.settings.fade_in)
                },
            };
            self.container.present(ticket.page, Surface::Remote, &image, presentation);
            page.set_remote_image(image);
        }
        true
    }

    // -- Internals --

    fn page_index_at(&self, offset_x: f64, page_width: f64) -> usize {
        let count = self.pages.len();
        if count == 0 {
            return 0;
        }
        let raw = scroll::current_page_index(offset_x, page_width);
        usize::try_from(raw.max(0)).unwrap_or(usize::MAX).min(count - 1)
    }

    fn setup(&mut self) {
        if self.indicator.is_none() && self.settings.page_indicator.visible {
            self.indicator = Some(
                self.container.create_page_indicator(&self.settings.page_indicator),
            );
        }
        self.container
            .set_shows_horizontal_scroll_indicator(self.settings.shows_horizontal_scroll_indicator);
        self.container.set_paging_enabled(self.settings.paging_enabled);
    }

    fn add_page(&mut self, page: Page<C::Image>) -> PageId {
        let source = page.source();
        let id = self.pages.push(page);
        let position = self.pages.len() - 1;
        self.container.attach_page(id);
        self.layout_pages();
        self.update_indicator_count();
        self.update_current_page();

        debug!(page = ?id, position, ?source, "page added");
        self.tracer.page_added(&PageAddedEvent {
            page: id,
            position,
            source,
        });
        id
    }

    fn present_local(&mut self, id: PageId) {
        let presentation = Presentation {
            content_mode: self.settings.content_mode,
            transition: Transition::None,
        };
        if let Some(image) = self.pages.get(id).and_then(Page::local_image) {
            self.container.present(id, Surface::Local, image, presentation);
        }
    }

    fn layout_pages(&mut self) {
        let viewport = self.container.bounds().size();
        let container = &mut self.container;
        self.pages.for_each_mut(|position, id, page| {
            let frame = scroll::page_frame(position, viewport);
            page.set_frame(frame);
            container.layout_page(id, frame);
        });
        self.container.set_content_size(scroll::content_size(self.pages.len(), viewport));
    }

    fn update_indicator_count(&mut self) {
        if let Some(indicator) = &mut self.indicator {
            let count = self.pages.len();
            indicator.set_page_count(count);
            indicator.set_hidden(count < 2);
        }
    }

    fn update_current_page(&mut self) {
        let current = self.current_page_index();
        if let Some(indicator) = &mut self.indicator {
            indicator.set_current_page(current);
        }
        if current != self.last_page_index {
            self.tracer.page_index(&PageIndexEvent {
                previous: self.last_page_index,
                current,
            });
            self.last_page_index = current;
        }
    }

    fn update_visibility(&mut self) {
        let viewport = self.container.bounds();
        let retry = self.settings.failure_retry;
        let fetcher = &mut self.fetcher;
        let tracer = &mut self.tracer;
        let completions_tx = &self.completions_tx;

        self.pages.for_each_mut(|_, id, page| {
            let from = page.slot().map(RemoteImageSlot::state);
            let command = match visibility::classify(viewport, page.frame()) {
                Visibility::Visible => page.on_visible(),
                Visibility::Far => page.on_hidden(retry),
                Visibility::Near => None,
            };
            let Some(slot) = page.slot() else {
                return;
            };
            if from != Some(slot.state()) {
                tracer.slot_transition(&SlotTransitionEvent {
                    page: id,
                    attempt: slot.attempt(),
                    from: from.unwrap_or(slot.state()),
                    to: slot.state(),
                });
            }
            match command {
                Some(SlotCommand::StartFetch { attempt }) => {
                    let ticket = FetchTicket { page: id, attempt };
                    debug!(page = ?id, attempt, url = %slot.url(), "starting download");
                    fetcher.start(FetchRequest {
                        url: Arc::clone(slot.url()),
                        ticket,
                        completer: Completer::new(ticket, completions_tx.clone()),
                    });
                }
                Some(SlotCommand::CancelFetch { attempt }) => {
                    debug!(page = ?id, attempt, url = %slot.url(), "cancelling download");
                    fetcher.cancel(FetchTicket { page: id, attempt }, slot.url());
                }
                None => {}
            }
        });
    }
}

impl<C, F, T> Drop for Carousel<C, F, T>
where
    C: ScrollContainer,
    F: ImageFetcher<Image = C::Image>,
    T: TimerDriver,
{
    fn drop(&mut self) {
        self.autoscroll.stop(&mut self.timer);
        for (id, page) in self.pages.iter() {
            cancel_in_flight(&mut self.fetcher, id, page);
        }
    }
}

/// Cancels the page's fetch if one is in flight.
fn cancel_in_flight<F: ImageFetcher>(fetcher: &mut F, id: PageId, page: &Page<F::Image>) -> bool {
    match page.slot() {
        Some(slot) if slot.is_downloading() => {
            debug!(page = ?id, attempt = slot.attempt(), "cancelling download of removed page");
            fetcher.cancel(
                FetchTicket {
                    page: id,
                    attempt: slot.attempt(),
                },
                slot.url(),
            );
            true
        }
        _ => false,
    }
}

fn report_stale(tracer: &mut Tracer, ticket: FetchTicket) {
    trace!(page = ?ticket.page, attempt = ticket.attempt, "dropping stale completion");
    tracer.stale_completion(&StaleCompletionEvent {
        page: ticket.page,
        attempt: ticket.attempt,
    });
}
