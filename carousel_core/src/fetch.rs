// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The image fetcher contract and the completion queue.
//!
//! The carousel never blocks on the network. It hands the fetcher a
//! [`FetchRequest`] carrying a [`Completer`]; the fetcher resolves the
//! completer on whatever thread it likes, which enqueues a [`Completion`].
//! Nothing observable changes until the owning thread drains the queue with
//! [`Carousel::process_completions`](crate::carousel::Carousel::process_completions).

use std::sync::Arc;
use std::sync::mpsc::Sender;

use crate::page::PageId;

/// Identifies one fetch: the page that issued it and the slot's attempt
/// number at the time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    /// Page whose slot issued the fetch.
    pub page: PageId,
    /// Attempt number of the fetch within that slot.
    pub attempt: u32,
}

/// Failure reported by an [`ImageFetcher`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The transfer failed.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// The payload could not be decoded into an image.
    #[error("could not decode image: {0}")]
    Decode(String),
}

/// Result of a fetch, delivered to the owning thread.
#[derive(Debug)]
pub struct Completion<I> {
    /// The fetch this completion belongs to.
    pub ticket: FetchTicket,
    /// The image, or why there is none.
    pub result: Result<I, FetchError>,
}

/// One-shot handle a fetcher uses to report the outcome of a fetch.
///
/// `Send` whenever the image type is, so it can be moved to a worker
/// thread. Consuming methods guarantee it resolves at most once; dropping it
/// unresolved is how a cancelled fetch ends. Resolving after the carousel is
/// gone is silently ignored.
#[derive(Debug)]
pub struct Completer<I> {
    ticket: FetchTicket,
    tx: Sender<Completion<I>>,
}

impl<I> Completer<I> {
    pub(crate) fn new(ticket: FetchTicket, tx: Sender<Completion<I>>) -> Self {
        Self { ticket, tx }
    }

    /// Returns the ticket this completer resolves.
    #[must_use]
    pub fn ticket(&self) -> FetchTicket {
        self.ticket
    }

    /// Reports a downloaded image.
    pub fn succeed(self, image: I) {
        self.complete(Ok(image));
    }

    /// Reports a failure.
    pub fn fail(self, error: FetchError) {
        self.complete(Err(error));
    }

    /// Reports the outcome.
    pub fn complete(self, result: Result<I, FetchError>) {
        // The receiver is gone only when the carousel was dropped.
        _ = self.tx.send(Completion {
            ticket: self.ticket,
            result,
        });
    }
}

/// A request to download one image.
#[derive(Debug)]
pub struct FetchRequest<I> {
    /// What to download.
    pub url: Arc<str>,
    /// Identity of the fetch, also used to cancel it.
    pub ticket: FetchTicket,
    /// Where to report the result.
    pub completer: Completer<I>,
}

/// Downloads images for remote pages.
///
/// Any number of fetches may be outstanding, including several for the same
/// URL. Cancellation is addressed by ticket; the URL is passed along for
/// fetchers that share transfers per URL.
pub trait ImageFetcher {
    /// Image type produced by this fetcher.
    type Image;

    /// Begins a fetch. Must not block.
    fn start(&mut self, request: FetchRequest<Self::Image>);

    /// Abandons the fetch identified by `ticket`.
    ///
    /// Best effort: a completion that still arrives is discarded by the
    /// carousel.
    fn cancel(&mut self, ticket: FetchTicket, url: &str);
}
