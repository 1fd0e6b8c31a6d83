// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Playback**: Speed, tick rate and rotation
//! - **Engine**: Rasterizer worker threads

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Default playback speed multiplier.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Default tick rate in Hz.
pub const DEFAULT_FRAME_RATE_HZ: f64 = 30.0;

/// Default rotation applied to rendered frames, in degrees.
pub const DEFAULT_ROTATION_DEGREES: f32 = 0.0;

/// Repeat count used when a config selects `repeat` without a count.
pub const DEFAULT_REPEAT_COUNT: u32 = 1;

// ==========================================================================
// Engine Defaults
// ==========================================================================

/// Default rasterizer worker threads (0 = render on the calling thread).
pub const DEFAULT_ENGINE_THREADS: u32 = 0;

/// Maximum rasterizer worker threads accepted from a config file.
pub const MAX_ENGINE_THREADS: u32 = 64;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_SPEED > 0.0);
    assert!(DEFAULT_FRAME_RATE_HZ > 0.0);
    assert!(DEFAULT_REPEAT_COUNT > 0);
    assert!(DEFAULT_ENGINE_THREADS <= MAX_ENGINE_THREADS);
};
