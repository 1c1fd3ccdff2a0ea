// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational page storage with allocation and display order.

use super::Page;
use super::id::PageId;

/// Arena of pages in display order.
///
/// Pages are addressed by [`PageId`] handles. Internally each page occupies
/// a slot; removed pages free their slot for reuse, and generation counters
/// make every handle to a removed page fail lookups from then on. That is
/// what lets late download completions find out that their page is gone.
#[derive(Debug)]
pub struct PageStore<I> {
    // -- Storage --
    pages: Vec<Option<Page<I>>>,

    // -- Allocation --
    generation: Vec<u32>,
    free_list: Vec<u32>,

    // -- Display order --
    order: Vec<PageId>,
}

impl<I> Default for PageStore<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> PageStore<I> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Appends `page` after the last page and returns its handle.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "page counts never approach u32::MAX"
    )]
    pub fn push(&mut self, page: Page<I>) -> PageId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            self.generation[idx as usize] += 1;
            self.pages[idx as usize] = Some(page);
            idx
        } else {
            // Allocate a new slot.
            let idx = self.pages.len() as u32;
            self.pages.push(Some(page));
            self.generation.push(0);
            idx
        };

        let id = PageId {
            idx,
            generation: self.generation[idx as usize],
        };
        self.order.push(id);
        id
    }

    /// Removes every page, returning them in display order.
    ///
    /// All outstanding handles become stale.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot indices were allocated as u32"
    )]
    pub fn clear(&mut self) -> Vec<(PageId, Page<I>)> {
        let mut removed = Vec::with_capacity(self.order.len());
        for id in self.order.drain(..) {
            if let Some(page) = self.pages[id.idx as usize].take() {
                removed.push((id, page));
            }
            self.generation[id.idx as usize] += 1;
        }
        // Hand slots back in ascending order.
        self.free_list.clear();
        self.free_list.extend((0..self.pages.len()).rev().map(|idx| idx as u32));
        removed
    }

    /// Returns whether the given handle refers to a live page.
    #[must_use]
    pub fn is_alive(&self, id: PageId) -> bool {
        self.generation.get(id.idx as usize) == Some(&id.generation)
            && self.pages[id.idx as usize].is_some()
    }

    /// Returns the page for `id`, or `None` if the handle is stale.
    #[must_use]
    pub fn get(&self, id: PageId) -> Option<&Page<I>> {
        if self.is_alive(id) {
            self.pages[id.idx as usize].as_ref()
        } else {
            None
        }
    }

    /// Returns the page for `id` mutably, or `None` if the handle is stale.
    pub fn get_mut(&mut self, id: PageId) -> Option<&mut Page<I>> {
        if self.is_alive(id) {
            self.pages[id.idx as usize].as_mut()
        } else {
            None
        }
    }

    /// Returns the number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns whether the store holds no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the handles of all pages in display order.
    #[must_use]
    pub fn ids(&self) -> &[PageId] {
        &self.order
    }

    /// Returns the handle of the page at display `position`.
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<PageId> {
        self.order.get(position).copied()
    }

    /// Returns the display position of `id`, or `None` if the handle is stale.
    #[must_use]
    pub fn position(&self, id: PageId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Iterates over pages in display order.
    pub fn iter(&self) -> impl Iterator<Item = (PageId, &Page<I>)> + '_ {
        self.order.iter().filter_map(|&id| {
            self.pages[id.idx as usize].as_ref().map(|page| (id, page))
        })
    }

    /// Calls `f` with every page in display order.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(usize, PageId, &mut Page<I>)) {
        for (position, &id) in self.order.iter().enumerate() {
            if let Some(page) = self.pages[id.idx as usize].as_mut() {
                f(position, id, page);
            }
        }
    }
}
