// SPDX-License-Identifier: MPL-2.0
//! Animation playback domain types.
//!
//! This module contains playback value objects and enums that are
//! independent of any presentation or rendering concerns.

pub mod newtypes;
pub mod playback;

// Re-export commonly used types
pub use newtypes::{FrameRate, PlaybackSpeed, RepeatCount};
pub use playback::{LoopMode, PlaybackState};
