// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned to callers of the carousel API.
//!
//! Download failures are not here: they are reported by the fetcher as
//! [`FetchError`](crate::fetch::FetchError) and absorbed by the slot that
//! issued the fetch.

/// Invalid configuration passed to the carousel.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The indicator corner radius is negative or not finite.
    #[error("page indicator corner radius must be finite and non-negative, got {0}")]
    CornerRadius(f64),
    /// The indicator margin to the container bottom is not finite.
    #[error("page indicator bottom margin must be finite, got {0}")]
    IndicatorMargin(f64),
    /// The indicator inner padding has a non-finite component.
    #[error("page indicator padding must be finite, got {width}x{height}")]
    IndicatorPadding {
        /// Horizontal padding.
        width: f64,
        /// Vertical padding.
        height: f64,
    },
    /// A color component is outside `0.0..=1.0`.
    #[error("color component {name} must be within 0.0..=1.0, got {value}")]
    ColorComponent {
        /// Which color setting was rejected.
        name: &'static str,
        /// The offending component value.
        value: f32,
    },
    /// Autoscroll was started with a zero interval.
    #[error("autoscroll interval must be greater than zero")]
    ZeroAutoscrollInterval,
}
