// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the carousel.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Carousel`](crate::carousel::Carousel) calls as pages are added, slots
//! change state and the current page moves. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] holds an optional boxed `TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing and installing a
//! sink drops it. When **on**, each method performs a single `Option` branch
//! before dispatching.
//!
//! To inspect a sink after installing it, share it as `Rc<RefCell<S>>`: that
//! type implements `TraceSink` by borrowing the inner sink.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use core::cell::RefCell;
use std::rc::Rc;

use crate::backend::TimerId;
use crate::page::{PageId, PageSource};
use crate::slot::SlotState;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What happened to the autoscroll timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AutoscrollKind {
    /// A repeating timer was scheduled.
    Started,
    /// The timer was cancelled.
    Stopped,
    /// The timer fired and a page step was performed.
    Tick,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a page is appended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageAddedEvent {
    /// Handle of the new page.
    pub page: PageId,
    /// Display position of the new page.
    pub position: usize,
    /// Whether the page shows a local or a remote image.
    pub source: PageSource,
}

/// Emitted when all pages are removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagesRemovedEvent {
    /// Number of pages removed.
    pub count: usize,
    /// Number of in-flight fetches cancelled.
    pub cancelled_fetches: usize,
}

/// Emitted when a remote slot changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotTransitionEvent {
    /// Page owning the slot.
    pub page: PageId,
    /// Attempt number current after the transition.
    pub attempt: u32,
    /// State before.
    pub from: SlotState,
    /// State after.
    pub to: SlotState,
}

/// Emitted when a completion is dropped because it no longer matches its
/// slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StaleCompletionEvent {
    /// Page the completion was addressed to.
    pub page: PageId,
    /// Attempt the completion belongs to.
    pub attempt: u32,
}

/// Emitted when the current page index changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageIndexEvent {
    /// Index before the change.
    pub previous: usize,
    /// Index after the change.
    pub current: usize,
}

/// Emitted when the carousel moves the container's content offset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollCommandEvent {
    /// Requested page index, before clamping.
    pub target_index: usize,
    /// Horizontal offset sent to the container.
    pub offset_x: f64,
    /// Whether the change is animated.
    pub animated: bool,
}

/// Emitted on autoscroll timer activity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoscrollEvent {
    /// The timer concerned.
    pub timer: TimerId,
    /// What happened.
    pub kind: AutoscrollKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the carousel.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a page is appended.
    fn on_page_added(&mut self, e: &PageAddedEvent) {
        _ = e;
    }

    /// Called when all pages are removed.
    fn on_pages_removed(&mut self, e: &PagesRemovedEvent) {
        _ = e;
    }

    /// Called when a remote slot changes state.
    fn on_slot_transition(&mut self, e: &SlotTransitionEvent) {
        _ = e;
    }

    /// Called when a completion is dropped as stale.
    fn on_stale_completion(&mut self, e: &StaleCompletionEvent) {
        _ = e;
    }

    /// Called when the current page index changes.
    fn on_page_index(&mut self, e: &PageIndexEvent) {
        _ = e;
    }

    /// Called when the content offset is set programmatically.
    fn on_scroll_command(&mut self, e: &ScrollCommandEvent) {
        _ = e;
    }

    /// Called on autoscroll timer activity.
    fn on_autoscroll(&mut self, e: &AutoscrollEvent) {
        _ = e;
    }
}

impl<S: TraceSink + ?Sized> TraceSink for Rc<RefCell<S>> {
    fn on_page_added(&mut self, e: &PageAddedEvent) {
        self.borrow_mut().on_page_added(e);
    }

    fn on_pages_removed(&mut self, e: &PagesRemovedEvent) {
        self.borrow_mut().on_pages_removed(e);
    }

    fn on_slot_transition(&mut self, e: &SlotTransitionEvent) {
        self.borrow_mut().on_slot_transition(e);
    }

    fn on_stale_completion(&mut self, e: &StaleCompletionEvent) {
        self.borrow_mut().on_stale_completion(e);
    }

    fn on_page_index(&mut self, e: &PageIndexEvent) {
        self.borrow_mut().on_page_index(e);
    }

    fn on_scroll_command(&mut self, e: &ScrollCommandEvent) {
        self.borrow_mut().on_scroll_command(e);
    }

    fn on_autoscroll(&mut self, e: &AutoscrollEvent) {
        self.borrow_mut().on_autoscroll(e);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($(#[$doc:meta] $name:ident => $method:ident($ty:ty);)*) => {
        $(
            #[$doc]
            #[inline]
            pub fn $name(&mut self, e: &$ty) {
                #[cfg(feature = "trace")]
                if let Some(s) = &mut self.sink {
                    s.$method(e);
                }
                #[cfg(not(feature = "trace"))]
                {
                    _ = e;
                }
            }
        )*
    };
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns whether events reach a sink.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    dispatch! {
        /// Emits a [`PageAddedEvent`].
        page_added => on_page_added(PageAddedEvent);
        /// Emits a [`PagesRemovedEvent`].
        pages_removed => on_pages_removed(PagesRemovedEvent);
        /// Emits a [`SlotTransitionEvent`].
        slot_transition => on_slot_transition(SlotTransitionEvent);
        /// Emits a [`StaleCompletionEvent`].
        stale_completion => on_stale_completion(StaleCompletionEvent);
        /// Emits a [`PageIndexEvent`].
        page_index => on_page_index(PageIndexEvent);
        /// Emits a [`ScrollCommandEvent`].
        scroll_command => on_scroll_command(ScrollCommandEvent);
        /// Emits an [`AutoscrollEvent`].
        autoscroll => on_autoscroll(AutoscrollEvent);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
