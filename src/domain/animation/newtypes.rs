// SPDX-License-Identifier: MPL-2.0
//! Animation playback newtypes.
//!
//! These wrappers reject invalid values at construction, so a
//! [`PlaybackConfiguration`](crate::config::PlaybackConfiguration) built from
//! them is always playable.

use crate::error::ConfigError;
use std::num::NonZeroU32;
use std::time::Duration;

// =============================================================================
// PlaybackSpeed
// =============================================================================

/// Playback speed bounds.
pub mod speed_bounds {
    /// Default playback speed (1.0 = authored speed).
    pub const DEFAULT: f64 = 1.0;
}

/// Playback-time multiplier, guaranteed finite and strictly positive.
///
/// Unlike a render cadence, speed scales how much animation time each tick
/// consumes. There is no upper bound: a speed of 10.0 plays a three second
/// animation in three tenths of a second.
///
/// # Example
///
/// ```
/// use lottie_lens::domain::animation::PlaybackSpeed;
///
/// let speed = PlaybackSpeed::new(2.0).unwrap();
/// assert_eq!(speed.value(), 2.0);
///
/// // Zero and negative speeds are rejected
/// assert!(PlaybackSpeed::new(0.0).is_err());
/// assert!(PlaybackSpeed::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Creates a playback speed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSpeed`] for zero, negative, NaN or
    /// infinite values.
    pub fn new(speed: f64) -> Result<Self, ConfigError> {
        if speed.is_finite() && speed > 0.0 {
            Ok(Self(speed))
        } else {
            Err(ConfigError::InvalidSpeed(speed))
        }
    }

    /// Returns the speed value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(speed_bounds::DEFAULT)
    }
}

// =============================================================================
// FrameRate
// =============================================================================

/// Render cadence bounds.
pub mod frame_rate_bounds {
    /// Minimum tick rate in Hz (one tick per second).
    pub const MIN: f64 = 1.0;
    /// Maximum tick rate in Hz (one tick per millisecond).
    pub const MAX: f64 = 1000.0;
    /// Default tick rate in Hz.
    pub const DEFAULT: f64 = 30.0;
}

/// Tick cadence in Hz.
///
/// The frame rate decides how often the clock advances and a frame is
/// rendered. It never changes how fast animation time passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRate(f64);

impl FrameRate {
    /// Creates a frame rate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFrameRate`] unless `hz` lies within
    /// [`frame_rate_bounds::MIN`]..=[`frame_rate_bounds::MAX`]. NaN is
    /// rejected as well.
    pub fn new(hz: f64) -> Result<Self, ConfigError> {
        if (frame_rate_bounds::MIN..=frame_rate_bounds::MAX).contains(&hz) {
            Ok(Self(hz))
        } else {
            Err(ConfigError::InvalidFrameRate(hz))
        }
    }

    /// Returns the rate in Hz.
    #[must_use]
    pub fn hz(self) -> f64 {
        self.0
    }

    /// Returns the tick period in seconds.
    #[must_use]
    pub fn period_secs(self) -> f64 {
        1.0 / self.0
    }

    /// Returns the tick period as a `Duration`.
    #[must_use]
    pub fn interval(self) -> Duration {
        Duration::from_secs_f64(self.period_secs())
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self(frame_rate_bounds::DEFAULT)
    }
}

// =============================================================================
// RepeatCount
// =============================================================================

/// Number of full traversals for [`LoopMode::Repeat`](super::LoopMode::Repeat),
/// always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatCount(NonZeroU32);

impl RepeatCount {
    /// Creates a repeat count.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRepeatCount`] for zero.
    pub fn new(count: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(count)
            .map(Self)
            .ok_or(ConfigError::InvalidRepeatCount(count))
    }

    /// Returns the count.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

// =============================================================================
// Tests
// =============================================================================
