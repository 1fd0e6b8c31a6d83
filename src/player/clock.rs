// SPDX-License-Identifier: MPL-2.0
//! Playback clock: elapsed animation time and loop-mode policy.
//!
//! The clock knows nothing about wall-clock time. Each call to
//! [`PlaybackClock::advance`] moves animation time forward by one render
//! interval scaled by the playback speed:
//!
//! ```text
//! increment = (1 / frame_rate) * speed
//! ```
//!
//! so the frame rate only decides how often the animation is redrawn, while
//! the speed alone decides how fast animation time passes per wall-clock
//! second.
//!
//! # End-of-animation rules
//!
//! | Mode            | At `elapsed >= duration`                          | Finishes |
//! |-----------------|---------------------------------------------------|----------|
//! | `PlayOnce`      | keeps growing until the next tick reports it      | yes      |
//! | `Loop`          | resets to exactly `0`                             | never    |
//! | `Repeat(n)`     | counts a pass; resets to `0` until `n` passes     | yes      |
//! | `AutoReverse`   | clamps to `duration` and runs backwards to `0`    | never    |

use crate::animation::AnimationSource;
use crate::config::PlaybackConfiguration;
use crate::domain::animation::LoopMode;
use crate::error::PlaybackError;

/// Absorbs rounding in `elapsed / frame_duration` so that seeking to frame
/// `n` never lands on frame `n - 1`.
const FRAME_EPSILON: f64 = 1e-9;

/// Outcome of one [`PlaybackClock::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Time moved; `frame_index` is the frame to render next.
    Advanced { frame_index: f64 },

    /// The loop mode has run its course. Time did not move.
    Finished,
}

/// Elapsed-time state machine for one animation.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    duration: f64,
    total_frames: f64,
    frame_duration: f64,
    loop_mode: LoopMode,
    time_increment: f64,

    elapsed: f64,
    repeat_count: u32,
    is_reversing: bool,
}

impl PlaybackClock {
    #[must_use]
    pub fn new(source: &AnimationSource, config: &PlaybackConfiguration) -> Self {
        Self {
            duration: source.duration_secs(),
            total_frames: source.total_frames(),
            frame_duration: source.frame_duration_secs(),
            loop_mode: config.loop_mode,
            time_increment: config.frame_rate.period_secs() * config.speed.value(),
            elapsed: 0.0,
            repeat_count: 0,
            is_reversing: false,
        }
    }

    /// Advances by one render interval.
    ///
    /// The stop condition is checked against the time *before* advancing, so
    /// the tick that reaches the end still renders the last frame and the
    /// following tick reports [`Tick::Finished`].
    pub fn advance(&mut self) -> Tick {
        if self.should_stop() {
            return Tick::Finished;
        }

        let increment = self.time_increment;
        match self.loop_mode {
            LoopMode::PlayOnce => self.elapsed += increment,
            LoopMode::Loop => {
                self.elapsed += increment;
                if self.elapsed >= self.duration {
                    self.elapsed = 0.0;
                }
            }
            LoopMode::Repeat(count) => {
                self.elapsed += increment;
                if self.elapsed >= self.duration {
                    self.repeat_count = self.repeat_count.saturating_add(1);
                    if self.repeat_count < count.get() {
                        self.elapsed = 0.0;
                    }
                }
            }
            LoopMode::AutoReverse => {
                if self.is_reversing {
                    self.elapsed -= increment;
                    if self.elapsed <= 0.0 {
                        self.elapsed = 0.0;
                        self.is_reversing = false;
                    }
                } else {
                    self.elapsed += increment;
                    if self.elapsed >= self.duration {
                        self.elapsed = self.duration;
                        self.is_reversing = true;
                    }
                }
            }
        }

        Tick::Advanced {
            frame_index: self.current_frame_index(),
        }
    }

    /// Returns true once the loop mode allows no further advancing.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        match self.loop_mode {
            LoopMode::PlayOnce => self.elapsed >= self.duration,
            LoopMode::Repeat(count) => {
                self.repeat_count >= count.get() && self.elapsed >= self.duration
            }
            LoopMode::Loop | LoopMode::AutoReverse => false,
        }
    }

    /// Jumps to a normalized position, clamped to `[0, 1]`.
    ///
    /// Repeat and direction bookkeeping are left untouched. NaN seeks to 0.
    pub fn seek_progress(&mut self, progress: f64) {
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.elapsed = progress * self.duration;
    }

    /// Jumps to the start of `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`PlaybackError::InvalidFrameIndex`] for a frame outside
    /// `[0, total_frames]`; elapsed time is then unchanged.
    pub fn seek_frame(&mut self, frame: f64) -> Result<(), PlaybackError> {
        if !(0.0..=self.total_frames).contains(&frame) {
            return Err(PlaybackError::InvalidFrameIndex(frame));
        }
        self.elapsed = frame * self.frame_duration;
        Ok(())
    }

    /// Rewinds to the start and forgets loop bookkeeping.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.repeat_count = 0;
        self.is_reversing = false;
    }

    /// Elapsed animation time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// `elapsed / duration`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    /// Frame at the current elapsed time, within `[0, total_frames]`.
    #[must_use]
    pub fn current_frame_index(&self) -> f64 {
        (self.elapsed / self.frame_duration + FRAME_EPSILON)
            .floor()
            .clamp(0.0, self.total_frames)
    }

    /// Completed passes under [`LoopMode::Repeat`].
    #[must_use]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Direction under [`LoopMode::AutoReverse`].
    #[must_use]
    pub fn is_reversing(&self) -> bool {
        self.is_reversing
    }

    /// Animation seconds added per tick.
    #[must_use]
    pub fn time_increment(&self) -> f64 {
        self.time_increment
    }
}
