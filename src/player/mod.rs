// SPDX-License-Identifier: MPL-2.0
//! Animation playback: timing, rendering and the observable controller.
//!
//! # Architecture
//!
//! ```text
//! Scheduler tick ──▶ PlaybackClock::advance ──▶ frame index
//!                                                   │
//!              content_rect::source_rect ──▶ FrameRenderer ──▶ PixelBuffer
//!                                                                  │
//!                         PlaybackStreams ◀── image / state / progress / error
//! ```
//!
//! [`PlaybackController`] owns one of each piece and is the only type most
//! hosts need.

pub mod clock;
pub mod content_rect;
pub mod controller;
pub mod published;
pub mod renderer;
pub mod scheduler;

pub use clock::{PlaybackClock, Tick};
pub use content_rect::source_rect;
pub use controller::{PlaybackController, PlaybackStreams};
pub use published::Published;
pub use renderer::{frame_transform, FrameRenderer};
pub use scheduler::{LocalScheduler, ManualScheduler, Scheduler, TickCallback, TickHandle};
