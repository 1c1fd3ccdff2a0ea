// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Appearance and behavior settings.
//!
//! [`CarouselSettings`] is a plain in-memory struct. The carousel reads it at
//! the moment each event is handled, so changing it affects later pages and
//! later completions, not work already done.

use core::time::Duration;

use kurbo::Size;

use crate::error::Error;

/// Default duration of the fade used to reveal downloaded images.
pub const DEFAULT_FADE_IN: Duration = Duration::from_millis(300);

/// How an image is fitted into its page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContentMode {
    /// Stretch to fill the page, ignoring aspect ratio.
    ScaleToFill,
    /// Scale to fit inside the page, preserving aspect ratio.
    #[default]
    AspectFit,
    /// Scale to cover the page, preserving aspect ratio and cropping.
    AspectFill,
    /// Keep the original size, centered.
    Center,
}

/// What a remote slot does after a failed download when no error image is
/// configured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FailureRetry {
    /// Download again the next time the page becomes visible after having
    /// been far out of sight. Never retries while the page stays in view.
    #[default]
    RetryAfterLeavingView,
    /// Never download again; the placeholder stays.
    Never,
}

/// A straight-alpha RGBA color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Rgba {
    /// Creates a color from its components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    fn validate(self, name: &'static str) -> Result<(), Error> {
        for value in [self.r, self.g, self.b, self.a] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::ColorComponent { name, value });
            }
        }
        Ok(())
    }
}

/// Styling of the page indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageIndicatorStyle {
    /// Background of the indicator container.
    pub background_color: Rgba,
    /// Corner radius of the indicator container.
    pub corner_radius: f64,
    /// Tint of the dot for the current page; `None` uses the platform default.
    pub current_page_tint: Option<Rgba>,
    /// Tint of the other dots; `None` uses the platform default.
    pub page_tint: Option<Rgba>,
    /// Padding between the dots and the container edge.
    pub inner_padding: Size,
    /// Distance from the bottom of the indicator to the bottom of the
    /// scroll container.
    pub margin_to_bottom: f64,
    /// Whether an indicator is created at all.
    pub visible: bool,
}

impl Default for PageIndicatorStyle {
    fn default() -> Self {
        Self {
            background_color: Rgba::new(0.5, 0.5, 0.5, 0.4),
            corner_radius: 13.0,
            current_page_tint: None,
            page_tint: None,
            inner_padding: Size::new(10.0, -5.0),
            margin_to_bottom: 8.0,
            visible: true,
        }
    }
}

impl PageIndicatorStyle {
    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(Error::CornerRadius(self.corner_radius));
        }
        if !self.margin_to_bottom.is_finite() {
            return Err(Error::IndicatorMargin(self.margin_to_bottom));
        }
        if !self.inner_padding.is_finite() {
            return Err(Error::IndicatorPadding {
                width: self.inner_padding.width,
                height: self.inner_padding.height,
            });
        }
        self.background_color.validate("background_color")?;
        if let Some(tint) = self.current_page_tint {
            tint.validate("current_page_tint")?;
        }
        if let Some(tint) = self.page_tint {
            tint.validate("page_tint")?;
        }
        Ok(())
    }
}

/// Settings that control the appearance of the pages and the indicator.
///
/// `I` is the container's image type.
#[derive(Clone, Debug)]
pub struct CarouselSettings<I> {
    /// How images are fitted into their page.
    pub content_mode: ContentMode,
    /// Shown on the local surface of remote pages until the image arrives.
    pub placeholder_image: Option<I>,
    /// Shown instead of the downloaded image when the download fails.
    pub error_image: Option<I>,
    /// Duration of the fade that reveals downloaded and error images.
    pub fade_in: Duration,
    /// Whether the container snaps to whole pages.
    pub paging_enabled: bool,
    /// Whether the container shows its horizontal scroll indicator.
    pub shows_horizontal_scroll_indicator: bool,
    /// Retry behavior after a failure without an error image.
    pub failure_retry: FailureRetry,
    /// Styling of the page indicator.
    pub page_indicator: PageIndicatorStyle,
}

impl<I> Default for CarouselSettings<I> {
    fn default() -> Self {
        Self {
            content_mode: ContentMode::default(),
            placeholder_image: None,
            error_image: None,
            fade_in: DEFAULT_FADE_IN,
            paging_enabled: true,
            shows_horizontal_scroll_indicator: false,
            failure_retry: FailureRetry::default(),
            page_indicator: PageIndicatorStyle::default(),
        }
    }
}

impl<I> CarouselSettings<I> {
    /// Checks that every field holds a usable value.
    pub fn validate(&self) -> Result<(), Error> {
        self.page_indicator.validate()
    }
}
