// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and JSON export for carousel diagnostics.
//!
//! This crate provides [`TraceSink`](carousel_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`json::export`] — writes a JSON array of events from recorded bytes.
//!
//! Install a sink with
//! [`Carousel::set_trace_sink`](carousel_core::Carousel::set_trace_sink),
//! wrapped in `Rc<RefCell<_>>` if you need to read it back afterwards.

pub mod json;
pub mod pretty;
pub mod recorder;
