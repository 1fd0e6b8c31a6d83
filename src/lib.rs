// SPDX-License-Identifier: MPL-2.0
//! `lottie_lens` plays Lottie animations through an external vector
//! rasterizer.
//!
//! The crate owns the timing side of playback: turning periodic ticks into
//! animation frames, loop modes, speed, aspect-fit/fill cropping, and an
//! observable play/pause/stop/seek state machine. Rasterization is delegated
//! to a [`engine::Backend`] supplied by the host.
//!
//! ```ignore
//! use lottie_lens::animation::AnimationSource;
//! use lottie_lens::config::PlaybackConfiguration;
//! use lottie_lens::engine::Engine;
//! use lottie_lens::player::{LocalScheduler, PlaybackController};
//!
//! let engine = Engine::new(MyBackend::default(), 4)?;
//! let source = AnimationSource::from_path("spinner.json")?;
//! let mut player = PlaybackController::new(
//!     &engine,
//!     source,
//!     (300, 150),
//!     PlaybackConfiguration::default(),
//!     LocalScheduler,
//! )?;
//! let mut frames = player.subscribe().image;
//! player.play();
//! ```

#![doc(html_root_url = "https://docs.rs/lottie_lens/0.1.0")]

pub mod animation;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod player;

#[cfg(test)]
pub(crate) mod test_utils;
