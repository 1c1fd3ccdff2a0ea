// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless paging and lazy-loading coordinator for image carousels.
//!
//! `carousel_core` decides, purely from the scroll offset and page geometry
//! of a horizontally paged container, which remote images to download,
//! which downloads to cancel and which page is current. The container, the
//! image fetcher, the page indicator and the timer are traits implemented by
//! a platform integration.
//!
//! # Architecture
//!
//! ```text
//!   ScrollContainer ──► Carousel::did_scroll()
//!                            │
//!           ┌────────────────┼──────────────────┐
//!           ▼                ▼                  ▼
//!   visibility::classify   current page    ScrollObserver
//!           │                │
//!           ▼                ▼
//!   RemoteImageSlot     PageIndicator
//!           │
//!           ▼
//!   ImageFetcher::start / cancel
//!           │
//!           ▼  (any thread)
//!   Completer ──► Carousel::process_completions() ──► ScrollContainer::present
//! ```
//!
//! **[`carousel`]** — The [`Carousel`](carousel::Carousel) coordinator: page
//! management, paging commands, autoscroll and event handling.
//!
//! **[`page`]** — Pages and the generational [`PageStore`](page::PageStore).
//!
//! **[`slot`]** — The sans-IO download state machine of a remote page.
//!
//! **[`visibility`]** — Visible / near / far classification with a
//! horizontal hysteresis band.
//!
//! **[`scroll`]** — Pure page index and offset arithmetic.
//!
//! **[`backend`]**, **[`fetch`]**, **[`observer`]** — Collaborator contracts.
//!
//! **[`autoscroll`]** — Configuration of timer-driven paging.
//!
//! **[`settings`]** and **[`error`]** — Configuration and its validation.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types,
//! with a [`Tracer`](trace::Tracer) wrapper that compiles away without the
//! `trace` feature.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod autoscroll;
pub mod backend;
pub mod carousel;
pub mod error;
pub mod fetch;
pub mod observer;
pub mod page;
pub mod scroll;
pub mod settings;
pub mod slot;
pub mod trace;
pub mod visibility;

pub use carousel::Carousel;
pub use error::Error;
