// SPDX-License-Identifier: MPL-2.0
//! Port to the external vector rasterizer.
//!
//! The rasterizer itself lives outside this crate. It is reached through two
//! traits that adapters implement:
//!
//! - [`Backend`]: one per process; initialized once, opens animations
//! - [`Rasterizer`]: one per opened animation; selects a frame, applies a
//!   transform and draws into a [`PixelBuffer`]
//!
//! [`Engine`] is the explicit handle to an initialized backend. It replaces
//! process-wide engine state: create it once and pass it to every
//! controller.
//!
//! # Example
//!
//! ```ignore
//! use lottie_lens::engine::Engine;
//!
//! let engine = Engine::new(MyNativeBackend::default(), 4)?;
//! let rasterizer = engine.open(&source)?;
//! ```

mod buffer;

pub use buffer::PixelBuffer;

use crate::animation::AnimationSource;
use crate::config::EngineConfig;
use crate::error::{RenderError, Result};
use std::fmt;
use std::sync::Arc;
use tiny_skia::Transform;

// =============================================================================
// Rasterizer Trait
// =============================================================================

/// Port for drawing frames of one opened animation.
///
/// Coordinates passed to [`set_transform`](Self::set_transform) are in
/// animation space (the intrinsic size). The implementation maps that space
/// onto the whole target buffer when drawing.
///
/// Implementations are used from a single thread and need not be `Send`.
pub trait Rasterizer {
    /// Selects the frame to draw next.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Rendering`] if the engine rejects the frame.
    fn set_frame(&mut self, frame: f64) -> std::result::Result<(), RenderError>;

    /// Replaces the transform applied to the animation.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Rendering`] if the engine rejects the matrix.
    fn set_transform(&mut self, transform: Transform) -> std::result::Result<(), RenderError>;

    /// Rasterizes the selected frame into `target`, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ContextCreation`] if the engine cannot bind to
    /// the buffer and [`RenderError::Rendering`] if drawing fails.
    fn draw_into(&mut self, target: &mut PixelBuffer) -> std::result::Result<(), RenderError>;
}

// =============================================================================
// Backend Trait
// =============================================================================

/// Port for the process-wide rasterizer engine.
pub trait Backend: Send + Sync {
    /// Initializes the engine with the given number of worker threads.
    ///
    /// Called exactly once per [`Engine`].
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ContextCreation`] if the engine cannot start.
    fn init(&self, threads: u32) -> std::result::Result<(), RenderError>;

    /// Opens an animation for rendering.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the engine cannot load the document.
    fn open(
        &self,
        source: &AnimationSource,
    ) -> std::result::Result<Box<dyn Rasterizer>, RenderError>;
}

// =============================================================================
// Engine Handle
// =============================================================================

/// Handle to an initialized [`Backend`].
///
/// Cloning is cheap; every clone shares the same backend.
#[derive(Clone)]
pub struct Engine {
    backend: Arc<dyn Backend>,
    threads: u32,
}

impl Engine {
    /// Initializes `backend` with `threads` worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`](crate::error::Error::Render) if the backend
    /// fails to initialize.
    pub fn new<B: Backend + 'static>(backend: B, threads: u32) -> Result<Self> {
        backend.init(threads)?;
        log::info!("rasterizer engine initialized with {threads} worker thread(s)");
        Ok(Self {
            backend: Arc::new(backend),
            threads,
        })
    }

    /// Initializes `backend` from the `[engine]` config section.
    ///
    /// # Errors
    ///
    /// Same as [`Engine::new`].
    pub fn from_config<B: Backend + 'static>(backend: B, config: &EngineConfig) -> Result<Self> {
        Self::new(backend, config.thread_count())
    }

    /// Opens `source` for rendering.
    ///
    /// # Errors
    ///
    /// Returns the backend's [`RenderError`].
    pub fn open(
        &self,
        source: &AnimationSource,
    ) -> std::result::Result<Box<dyn Rasterizer>, RenderError> {
        self.backend.open(source)
    }

    /// Worker threads the backend was initialized with.
    #[must_use]
    pub fn threads(&self) -> u32 {
        self.threads
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("threads", &self.threads)
            .finish_non_exhaustive()
    }
}
