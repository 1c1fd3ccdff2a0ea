// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use carousel_core::page::PageSource;
use carousel_core::slot::SlotState;
use carousel_core::trace::{
    AutoscrollEvent, AutoscrollKind, PageAddedEvent, PageIndexEvent, PagesRemovedEvent,
    ScrollCommandEvent, SlotTransitionEvent, StaleCompletionEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the destination.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn state_name(state: SlotState) -> &'static str {
    match state {
        SlotState::Idle => "idle",
        SlotState::Downloading => "downloading",
        SlotState::Loaded => "loaded",
        SlotState::Failed => "failed",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_page_added(&mut self, e: &PageAddedEvent) {
        let source = match e.source {
            PageSource::Local => "local",
            PageSource::Remote => "remote",
        };
        let _ = writeln!(
            self.writer,
            "[page:add] {:?} position={} source={source}",
            e.page, e.position,
        );
    }

    fn on_pages_removed(&mut self, e: &PagesRemovedEvent) {
        let _ = writeln!(
            self.writer,
            "[page:clear] count={} cancelled={}",
            e.count, e.cancelled_fetches,
        );
    }

    fn on_slot_transition(&mut self, e: &SlotTransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[slot] {:?} attempt={} {} -> {}",
            e.page,
            e.attempt,
            state_name(e.from),
            state_name(e.to),
        );
    }

    fn on_stale_completion(&mut self, e: &StaleCompletionEvent) {
        let _ = writeln!(
            self.writer,
            "[slot:stale] {:?} attempt={}",
            e.page, e.attempt,
        );
    }

    fn on_page_index(&mut self, e: &PageIndexEvent) {
        let _ = writeln!(
            self.writer,
            "[index] {} -> {}",
            e.previous, e.current,
        );
    }

    fn on_scroll_command(&mut self, e: &ScrollCommandEvent) {
        let _ = writeln!(
            self.writer,
            "[scroll] page={} x={:.1} animated={}",
            e.target_index, e.offset_x, e.animated,
        );
    }

    fn on_autoscroll(&mut self, e: &AutoscrollEvent) {
        let kind = match e.kind {
            AutoscrollKind::Started => "start",
            AutoscrollKind::Stopped => "stop",
            AutoscrollKind::Tick => "tick",
        };
        let _ = writeln!(self.writer, "[autoscroll:{kind}] timer={}", e.timer.0);
    }
}
