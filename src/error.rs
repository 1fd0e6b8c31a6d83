// SPDX-License-Identifier: MPL-2.0
//! Error types for loading, rendering and playback.
//!
//! Construction failures are returned as [`Error`]. Failures that happen while
//! an animation is playing are never returned from playback operations; they
//! are published as a [`PlaybackError`] on the controller's error stream.

use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Load(LoadError),
    Render(RenderError),
}

/// Reasons an animation document could not be turned into an
/// [`AnimationSource`](crate::animation::AnimationSource).
///
/// Every variant means the load failed; sources are never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The file could not be read.
    Io(String),

    /// The document is not valid JSON.
    Json(String),

    /// A required header field is absent.
    MissingField(&'static str),

    /// Header fields are present but describe an unplayable animation
    /// (zero frames, non-positive frame rate or size, ...).
    InvalidHeader(String),
}

/// Failures reported by a single render call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The requested frame is outside `[0, total_frames]`.
    FrameIndexOutOfRange { index: f64, total_frames: f64 },

    /// The rasterizer refused to draw.
    Rendering(String),

    /// The rasterizer could not bind to the target buffer.
    ContextCreation(String),
}

/// Errors published on a controller's error stream.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// A frame seek asked for a frame outside `[0, total_frames]`.
    InvalidFrameIndex(f64),

    /// The rasterizer failed to draw the current frame.
    RenderingFailed(String),

    /// The pixel buffer could not be converted into an image.
    ImageConstructionFailed,

    /// The rasterizer could not bind to the pixel buffer.
    ContextCreationFailed(String),
}

/// Rejected [`PlaybackConfiguration`](crate::config::PlaybackConfiguration) values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Speed must be finite and strictly positive.
    InvalidSpeed(f64),

    /// Frame rate must be finite and strictly positive.
    InvalidFrameRate(f64),

    /// Repeat count must be at least one.
    InvalidRepeatCount(u32),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "Failed to read animation: {}", msg),
            LoadError::Json(msg) => write!(f, "Malformed animation document: {}", msg),
            LoadError::MissingField(field) => {
                write!(f, "Animation header is missing `{}`", field)
            }
            LoadError::InvalidHeader(msg) => write!(f, "Invalid animation header: {}", msg),
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::FrameIndexOutOfRange {
                index,
                total_frames,
            } => write!(
                f,
                "Frame index {} is outside 0..={}",
                index, total_frames
            ),
            RenderError::Rendering(msg) => write!(f, "Rendering failed: {}", msg),
            RenderError::ContextCreation(msg) => {
                write!(f, "Render context creation failed: {}", msg)
            }
        }
    }
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::InvalidFrameIndex(index) => write!(f, "Invalid frame index: {}", index),
            PlaybackError::RenderingFailed(msg) => write!(f, "Rendering failed: {}", msg),
            PlaybackError::ImageConstructionFailed => {
                write!(f, "Could not build an image from the pixel buffer")
            }
            PlaybackError::ContextCreationFailed(msg) => {
                write!(f, "Render context creation failed: {}", msg)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSpeed(speed) => {
                write!(f, "Playback speed must be positive, got {}", speed)
            }
            ConfigError::InvalidFrameRate(hz) => {
                write!(f, "Frame rate must be positive, got {} Hz", hz)
            }
            ConfigError::InvalidRepeatCount(count) => {
                write!(f, "Repeat count must be at least 1, got {}", count)
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Load(e) => write!(f, "Load Error: {}", e),
            Error::Render(e) => write!(f, "Render Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<RenderError> for PlaybackError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::FrameIndexOutOfRange { index, .. } => {
                PlaybackError::InvalidFrameIndex(index)
            }
            RenderError::Rendering(msg) => PlaybackError::RenderingFailed(msg),
            RenderError::ContextCreation(msg) => PlaybackError::ContextCreationFailed(msg),
        }
    }
}

impl From<LoadError> for Error {
    fn from(err: LoadError) -> Self {
        Error::Load(err)
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        Error::Render(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
