// SPDX-License-Identifier: MPL-2.0
//! Domain layer - playback value objects with no rendering or I/O concerns.
//!
//! # Modules
//!
//! - [`animation`]: Playback types ([`PlaybackState`](animation::PlaybackState),
//!   [`LoopMode`](animation::LoopMode), [`PlaybackSpeed`](animation::PlaybackSpeed),
//!   [`FrameRate`](animation::FrameRate))
//! - [`geometry`]: Sizes and rectangles in animation space

pub mod animation;
pub mod geometry;
