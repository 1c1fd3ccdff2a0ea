// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Page handles are stored as their raw slot index and generation, and
//! counts saturate at `u32::MAX`.

use carousel_core::backend::TimerId;
use carousel_core::page::{PageId, PageSource};
use carousel_core::slot::SlotState;
use carousel_core::trace::{
    AutoscrollEvent, AutoscrollKind, PageAddedEvent, PageIndexEvent, PagesRemovedEvent,
    ScrollCommandEvent, SlotTransitionEvent, StaleCompletionEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PAGE_ADDED: u8 = 1;
const TAG_PAGES_REMOVED: u8 = 2;
const TAG_SLOT_TRANSITION: u8 = 3;
const TAG_STALE_COMPLETION: u8 = 4;
const TAG_PAGE_INDEX: u8 = 5;
const TAG_SCROLL_COMMAND: u8 = 6;
const TAG_AUTOSCROLL: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_count(&mut self, v: usize) {
        self.write_u32(u32::try_from(v).unwrap_or(u32::MAX));
    }

    fn write_page(&mut self, page: PageId) {
        self.write_u32(page.index());
        self.write_u32(page.generation());
    }

    fn write_state(&mut self, state: SlotState) {
        self.write_u8(match state {
            SlotState::Idle => 0,
            SlotState::Downloading => 1,
            SlotState::Loaded => 2,
            SlotState::Failed => 3,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_page_added(&mut self, e: &PageAddedEvent) {
        self.write_u8(TAG_PAGE_ADDED);
        self.write_page(e.page);
        self.write_count(e.position);
        self.write_u8(match e.source {
            PageSource::Local => 0,
            PageSource::Remote => 1,
        });
    }

    fn on_pages_removed(&mut self, e: &PagesRemovedEvent) {
        self.write_u8(TAG_PAGES_REMOVED);
        self.write_count(e.count);
        self.write_count(e.cancelled_fetches);
    }

    fn on_slot_transition(&mut self, e: &SlotTransitionEvent) {
        self.write_u8(TAG_SLOT_TRANSITION);
        self.write_page(e.page);
        self.write_u32(e.attempt);
        self.write_state(e.from);
        self.write_state(e.to);
    }

    fn on_stale_completion(&mut self, e: &StaleCompletionEvent) {
        self.write_u8(TAG_STALE_COMPLETION);
        self.write_page(e.page);
        self.write_u32(e.attempt);
    }

    fn on_page_index(&mut self, e: &PageIndexEvent) {
        self.write_u8(TAG_PAGE_INDEX);
        self.write_count(e.previous);
        self.write_count(e.current);
    }

    fn on_scroll_command(&mut self, e: &ScrollCommandEvent) {
        self.write_u8(TAG_SCROLL_COMMAND);
        self.write_count(e.target_index);
        self.write_u64(e.offset_x.to_bits());
        self.write_u8(u8::from(e.animated));
    }

    fn on_autoscroll(&mut self, e: &AutoscrollEvent) {
        self.write_u8(TAG_AUTOSCROLL);
        self.write_u64(e.timer.0);
        self.write_u8(match e.kind {
            AutoscrollKind::Started => 0,
            AutoscrollKind::Stopped => 1,
            AutoscrollKind::Tick => 2,
        });
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A page handle as stored in a recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordedPage {
    /// Raw slot index.
    pub index: u32,
    /// Generation counter.
    pub generation: u32,
}

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`PageAddedEvent`].
    PageAdded {
        /// Handle of the new page.
        page: RecordedPage,
        /// Display position.
        position: u32,
        /// How the page was created.
        source: PageSource,
    },
    /// A [`PagesRemovedEvent`].
    PagesRemoved {
        /// Number of pages removed.
        count: u32,
        /// Number of fetches cancelled.
        cancelled_fetches: u32,
    },
    /// A [`SlotTransitionEvent`].
    SlotTransition {
        /// Page owning the slot.
        page: RecordedPage,
        /// Attempt number after the transition.
        attempt: u32,
        /// State before.
        from: SlotState,
        /// State after.
        to: SlotState,
    },
    /// A [`StaleCompletionEvent`].
    StaleCompletion {
        /// Page the completion was addressed to.
        page: RecordedPage,
        /// Attempt the completion belonged to.
        attempt: u32,
    },
    /// A [`PageIndexEvent`].
    PageIndex {
        /// Index before.
        previous: u32,
        /// Index after.
        current: u32,
    },
    /// A [`ScrollCommandEvent`].
    ScrollCommand {
        /// Requested page index.
        target_index: u32,
        /// Horizontal offset sent to the container.
        offset_x: f64,
        /// Whether the change was animated.
        animated: bool,
    },
    /// An [`AutoscrollEvent`].
    Autoscroll {
        /// The timer concerned.
        timer: TimerId,
        /// What happened.
        kind: AutoscrollKind,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_page(&mut self) -> Option<RecordedPage> {
        Some(RecordedPage {
            index: self.read_u32()?,
            generation: self.read_u32()?,
        })
    }

    fn read_state(&mut self) -> Option<SlotState> {
        match self.read_u8()? {
            0 => Some(SlotState::Idle),
            1 => Some(SlotState::Downloading),
            2 => Some(SlotState::Loaded),
            3 => Some(SlotState::Failed),
            _ => None,
        }
    }

    fn read_source(&mut self) -> Option<PageSource> {
        match self.read_u8()? {
            0 => Some(PageSource::Local),
            1 => Some(PageSource::Remote),
            _ => None,
        }
    }

    fn read_autoscroll_kind(&mut self) -> Option<AutoscrollKind> {
        match self.read_u8()? {
            0 => Some(AutoscrollKind::Started),
            1 => Some(AutoscrollKind::Stopped),
            2 => Some(AutoscrollKind::Tick),
            _ => None,
        }
    }

    fn decode_page_added(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PageAdded {
            page: self.read_page()?,
            position: self.read_u32()?,
            source: self.read_source()?,
        })
    }

    fn decode_pages_removed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PagesRemoved {
            count: self.read_u32()?,
            cancelled_fetches: self.read_u32()?,
        })
    }

    fn decode_slot_transition(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SlotTransition {
            page: self.read_page()?,
            attempt: self.read_u32()?,
            from: self.read_state()?,
            to: self.read_state()?,
        })
    }

    fn decode_stale_completion(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::StaleCompletion {
            page: self.read_page()?,
            attempt: self.read_u32()?,
        })
    }

    fn decode_page_index(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PageIndex {
            previous: self.read_u32()?,
            current: self.read_u32()?,
        })
    }

    fn decode_scroll_command(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ScrollCommand {
            target_index: self.read_u32()?,
            offset_x: f64::from_bits(self.read_u64()?),
            animated: self.read_u8()? != 0,
        })
    }

    fn decode_autoscroll(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Autoscroll {
            timer: TimerId(self.read_u64()?),
            kind: self.read_autoscroll_kind()?,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PAGE_ADDED => self.decode_page_added(),
            TAG_PAGES_REMOVED => self.decode_pages_removed(),
            TAG_SLOT_TRANSITION => self.decode_slot_transition(),
            TAG_STALE_COMPLETION => self.decode_stale_completion(),
            TAG_PAGE_INDEX => self.decode_page_index(),
            TAG_SCROLL_COMMAND => self.decode_scroll_command(),
            TAG_AUTOSCROLL => self.decode_autoscroll(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
