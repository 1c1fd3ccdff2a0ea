// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Automatic page advancement on a repeating timer.

use core::time::Duration;

use crate::backend::{TimerDriver, TimerId};
use crate::error::Error;

/// Which way autoscroll moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards higher page indices.
    #[default]
    Forward,
    /// Towards lower page indices.
    Backward,
}

/// Parameters of an autoscroll run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AutoscrollConfig {
    /// Time between page steps. Must be non-zero.
    pub interval: Duration,
    /// Which way to step.
    pub direction: Direction,
    /// Whether to wrap around at the ends. Without it autoscroll stays on
    /// the last (or first) page.
    pub cycle: bool,
    /// Whether each step is animated.
    pub animated: bool,
}

impl AutoscrollConfig {
    /// Creates a forward, cycling, animated configuration.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            direction: Direction::Forward,
            cycle: true,
            animated: true,
        }
    }

    /// Sets the direction.
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets whether to wrap around.
    #[must_use]
    pub const fn with_cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }

    /// Sets whether steps are animated.
    #[must_use]
    pub const fn with_animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }
}

/// Bookkeeping for the single active autoscroll timer.
#[derive(Debug, Default)]
pub(crate) struct Autoscroll {
    active: Option<(TimerId, AutoscrollConfig)>,
}

impl Autoscroll {
    /// Cancels any active timer, then schedules a new one.
    pub(crate) fn start(
        &mut self,
        timer: &mut impl TimerDriver,
        config: AutoscrollConfig,
    ) -> Result<TimerId, Error> {
        if config.interval.is_zero() {
            return Err(Error::ZeroAutoscrollInterval);
        }
        self.stop(timer);
        let id = timer.schedule_repeating(config.interval);
        self.active = Some((id, config));
        Ok(id)
    }

    /// Cancels the active timer, returning its id.
    pub(crate) fn stop(&mut self, timer: &mut impl TimerDriver) -> Option<TimerId> {
        let (id, _) = self.active.take()?;
        timer.cancel(id);
        Some(id)
    }

    /// Returns the configuration for a firing of `timer`, or `None` when it
    /// is not the active one.
    pub(crate) fn config_for(&self, timer: TimerId) -> Option<AutoscrollConfig> {
        self.active
            .filter(|(id, _)| *id == timer)
            .map(|(_, config)| config)
    }

    pub(crate) fn active_timer(&self) -> Option<TimerId> {
        self.active.map(|(id, _)| id)
    }
}
