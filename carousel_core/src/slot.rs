// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Download lifecycle of a single remote image.
//!
//! [`RemoteImageSlot`] is a sans-IO state machine. Visibility signals and
//! fetch completions go in; [`SlotCommand`]s and [`CompletionEffect`]s come
//! out, and the [`Carousel`](crate::carousel::Carousel) carries them out
//! against the fetcher and the container.
//!
//! ```text
//!            became_visible            success / error image
//!   Idle ───────────────────► Downloading ─────────────────► Loaded
//!    ▲                          │     │
//!    │       became_hidden      │     │ error, no error image
//!    └──────────────────────────┘     ▼
//!    └────────── became_hidden ──── Failed
//!               (RetryAfterLeavingView)
//! ```
//!
//! Every fetch the slot issues gets a fresh attempt number. A completion is
//! accepted only while the slot is downloading *that* attempt, so a response
//! for a cancelled fetch can never overwrite anything.

use std::sync::Arc;

use crate::settings::FailureRetry;

/// Download state of a [`RemoteImageSlot`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Placeholder shown, no network activity.
    Idle,
    /// A fetch is in flight.
    Downloading,
    /// The image (or the error image) is shown. Terminal.
    Loaded,
    /// The fetch failed and no error image is configured.
    Failed,
}

/// Work the slot asks its owner to perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotCommand {
    /// Start fetching the slot's URL.
    StartFetch {
        /// Attempt number identifying the fetch.
        attempt: u32,
    },
    /// Abandon the in-flight fetch.
    CancelFetch {
        /// Attempt number of the fetch being abandoned.
        attempt: u32,
    },
}

/// How a fetch ended, as far as the state machine is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchOutcome {
    /// An image was received.
    Succeeded,
    /// The fetcher reported an error.
    Failed,
}

/// What the owner should display after a completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompletionEffect {
    /// The completion does not belong to the current fetch; change nothing.
    Ignore,
    /// Show the received image.
    ShowDownloaded,
    /// Show the configured error image.
    ShowErrorImage,
    /// Accepted, but there is nothing to show.
    Nothing,
}

/// Per-page remote image state machine.
#[derive(Clone, Debug)]
pub struct RemoteImageSlot {
    url: Arc<str>,
    state: SlotState,
    attempt: u32,
}

impl RemoteImageSlot {
    /// Creates an idle slot for `url`.
    #[must_use]
    pub fn new(url: Arc<str>) -> Self {
        Self {
            url,
            state: SlotState::Idle,
            attempt: 0,
        }
    }

    /// Returns the URL this slot downloads.
    #[must_use]
    pub fn url(&self) -> &Arc<str> {
        &self.url
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> SlotState {
        self.state
    }

    /// Returns the attempt number of the most recent fetch (0 before any).
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns whether a fetch is in flight.
    #[must_use]
    pub fn is_downloading(&self) -> bool {
        self.state == SlotState::Downloading
    }

    /// Signals that the page overlaps the viewport.
    ///
    /// Starts a fetch from [`Idle`](SlotState::Idle); does nothing in any
    /// other state.
    pub fn became_visible(&mut self) -> Option<SlotCommand> {
        match self.state {
            SlotState::Idle => {
                self.attempt = self.attempt.wrapping_add(1);
                self.state = SlotState::Downloading;
                Some(SlotCommand::StartFetch {
                    attempt: self.attempt,
                })
            }
            SlotState::Downloading | SlotState::Loaded | SlotState::Failed => None,
        }
    }

    /// Signals that the page is far out of sight.
    ///
    /// Cancels an in-flight fetch. A failed slot is reset to idle when
    /// `retry` allows it, so its next visibility downloads again.
    pub fn became_hidden(&mut self, retry: FailureRetry) -> Option<SlotCommand> {
        match self.state {
            SlotState::Downloading => {
                self.state = SlotState::Idle;
                Some(SlotCommand::CancelFetch {
                    attempt: self.attempt,
                })
            }
            SlotState::Failed if retry == FailureRetry::RetryAfterLeavingView => {
                self.state = SlotState::Idle;
                None
            }
            SlotState::Idle | SlotState::Loaded | SlotState::Failed => None,
        }
    }

    /// Applies the completion of fetch `attempt`.
    pub fn complete(
        &mut self,
        attempt: u32,
        outcome: FetchOutcome,
        has_error_image: bool,
    ) -> CompletionEffect {
        if self.state != SlotState::Downloading || attempt != self.attempt {
            return CompletionEffect::Ignore;
        }
        match outcome {
            FetchOutcome::Succeeded => {
                self.state = SlotState::Loaded;
                CompletionEffect::ShowDownloaded
            }
            FetchOutcome::Failed if has_error_image => {
                self.state = SlotState::Loaded;
                CompletionEffect::ShowErrorImage
            }
            FetchOutcome::Failed => {
                self.state = SlotState::Failed;
                CompletionEffect::Nothing
            }
        }
    }
}
