// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pages and their storage.
//!
//! A [`Page`] is one slide: a local surface holding a caller-supplied image
//! or a placeholder, and optionally a [`RemoteImageSlot`] that downloads the
//! real image once the page is seen. Pages live in a [`PageStore`] and are
//! addressed by generational [`PageId`] handles.

mod id;
mod store;

use std::sync::Arc;

use kurbo::Rect;

pub use id::{PageId, PageSource, Surface};
pub use store::PageStore;

use crate::settings::FailureRetry;
use crate::slot::{RemoteImageSlot, SlotCommand};

/// One slide of the carousel.
#[derive(Clone, Debug)]
pub struct Page<I> {
    frame: Rect,
    local_image: Option<I>,
    remote_image: Option<I>,
    slot: Option<RemoteImageSlot>,
}

impl<I> Default for Page<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Page<I> {
    /// Creates an empty page with a zero frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            frame: Rect::ZERO,
            local_image: None,
            remote_image: None,
            slot: None,
        }
    }

    /// Returns the last laid-out frame, in content coordinates.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Returns the image on the local surface, if any.
    #[must_use]
    pub fn local_image(&self) -> Option<&I> {
        self.local_image.as_ref()
    }

    /// Returns the downloaded (or error) image, if one has been shown.
    #[must_use]
    pub fn remote_image(&self) -> Option<&I> {
        self.remote_image.as_ref()
    }

    /// Returns the remote slot, if the page was created from a URL.
    #[must_use]
    pub fn slot(&self) -> Option<&RemoteImageSlot> {
        self.slot.as_ref()
    }

    /// Returns how the page was created.
    #[must_use]
    pub fn source(&self) -> PageSource {
        if self.slot.is_some() {
            PageSource::Remote
        } else {
            PageSource::Local
        }
    }

    pub(crate) fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    /// Replaces the local image.
    pub fn show_local(&mut self, image: I) {
        self.local_image = Some(image);
    }

    /// Sets up remote loading of `url`, showing `placeholder` until then.
    ///
    /// Returns `false` without touching the page if it already has a slot.
    pub fn show_remote(&mut self, url: Arc<str>, placeholder: Option<I>) -> bool {
        if self.slot.is_some() {
            return false;
        }
        if placeholder.is_some() {
            self.local_image = placeholder;
        }
        self.slot = Some(RemoteImageSlot::new(url));
        true
    }

    /// Forwards "became visible" to the slot.
    pub fn on_visible(&mut self) -> Option<SlotCommand> {
        self.slot.as_mut()?.became_visible()
    }

    /// Forwards "far out of sight" to the slot.
    pub fn on_hidden(&mut self, retry: FailureRetry) -> Option<SlotCommand> {
        self.slot.as_mut()?.became_hidden(retry)
    }

    pub(crate) fn slot_mut(&mut self) -> Option<&mut RemoteImageSlot> {
        self.slot.as_mut()
    }

    pub(crate) fn set_remote_image(&mut self, image: I) {
        self.remote_image = Some(image);
    }
}
