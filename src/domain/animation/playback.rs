// SPDX-License-Identifier: MPL-2.0
//! Playback state machine and loop policy.

use super::RepeatCount;

/// Represents the current playback state of an animation.
///
/// Transitions:
/// - `Stopped` → `Playing` (via `play`)
/// - `Playing` → `Paused` (via `pause`) or `Completed` (finite loop modes)
/// - `Paused` / `Completed` → `Playing` (via `play`)
/// - any state → `Stopped` (via `stop`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Animation is at frame zero and not ticking.
    #[default]
    Stopped,
    /// Animation is ticking.
    Playing,
    /// Animation is holding its current frame.
    Paused,
    /// A finite loop mode ran out; the last frame stays displayed.
    Completed,
}

impl PlaybackState {
    /// Returns true if the animation is currently playing.
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns true if the animation is paused.
    #[must_use]
    pub fn is_paused(self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Returns true if the animation is stopped.
    #[must_use]
    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Returns true if playback ran to completion.
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// How playback behaves when it reaches the end of the animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopMode {
    /// Play once, then complete.
    PlayOnce,
    /// Restart from the first frame forever.
    #[default]
    Loop,
    /// Play the given number of full traversals, then complete.
    Repeat(RepeatCount),
    /// Bounce between the first and last frame forever.
    AutoReverse,
}

impl LoopMode {
    /// Returns true if this mode can end on its own.
    #[must_use]
    pub fn is_finite(self) -> bool {
        matches!(self, Self::PlayOnce | Self::Repeat(_))
    }
}
