// SPDX-License-Identifier: MPL-2.0
//! Validated playback configuration.

use super::{ContentMode, PixelFormat};
use crate::domain::animation::{FrameRate, LoopMode, PlaybackSpeed};

/// Settings fixed for the lifetime of one
/// [`PlaybackController`](crate::player::PlaybackController).
///
/// Every field is already validated, so a configuration value is always
/// playable. Use [`PlaybackConfig::resolve`](super::PlaybackConfig::resolve)
/// to build one from a config file section.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackConfiguration {
    /// What happens at the end of the animation.
    pub loop_mode: LoopMode,

    /// Animation-time multiplier.
    pub speed: PlaybackSpeed,

    /// How the animation is fitted into the target buffer.
    pub content_mode: ContentMode,

    /// Tick and render cadence.
    pub frame_rate: FrameRate,

    /// Memory layout of the target buffer.
    pub pixel_format: PixelFormat,

    /// Rotation about the animation center, in degrees.
    pub rotation_degrees: f32,
}

impl PlaybackConfiguration {
    #[must_use]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[must_use]
    pub fn with_speed(mut self, speed: PlaybackSpeed) -> Self {
        self.speed = speed;
        self
    }

    #[must_use]
    pub fn with_content_mode(mut self, content_mode: ContentMode) -> Self {
        self.content_mode = content_mode;
        self
    }

    #[must_use]
    pub fn with_frame_rate(mut self, frame_rate: FrameRate) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    #[must_use]
    pub fn with_pixel_format(mut self, pixel_format: PixelFormat) -> Self {
        self.pixel_format = pixel_format;
        self
    }

    #[must_use]
    pub fn with_rotation_degrees(mut self, rotation_degrees: f32) -> Self {
        self.rotation_degrees = rotation_degrees;
        self
    }
}
