// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page identity types.

use core::fmt;

/// A handle to a page in a [`PageStore`](super::PageStore).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after the page is removed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId {
    /// Slot index into the store's arrays.
    pub(crate) idx: u32,
    /// Generation counter; must match the store's generation for this slot.
    pub(crate) generation: u32,
}

impl PageId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PageId({}@gen{})", self.idx, self.generation)
    }
}

/// Which image surface of a page is addressed.
///
/// Every page has a local surface, showing either a directly provided image
/// or the placeholder. Pages created from a URL also have a remote surface
/// that receives the downloaded (or error) image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The local or placeholder image.
    Local,
    /// The downloaded image.
    Remote,
}

/// How a page was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageSource {
    /// The page shows an image supplied by the caller.
    Local,
    /// The page downloads its image from a URL.
    Remote,
}
