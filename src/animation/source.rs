// SPDX-License-Identifier: MPL-2.0
//! Immutable metadata handle for a loaded animation.

use super::LottieHeader;
use crate::domain::geometry::Size;
use crate::error::LoadError;
use std::path::Path;
use std::sync::Arc;

/// A loaded animation: frame count, duration and intrinsic size, plus the
/// document a [`Backend`](crate::engine::Backend) opens for rendering.
///
/// All values are fixed at load time. Cloning is cheap; the document is
/// shared.
#[derive(Debug, Clone)]
pub struct AnimationSource {
    total_frames: f64,
    duration_secs: f64,
    intrinsic_size: Size,
    name: Option<String>,
    document: Option<Arc<str>>,
}

impl AnimationSource {
    /// Reads and parses a Lottie JSON file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the file cannot be read or its header is
    /// missing, malformed or unplayable.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&data)
    }

    /// Parses a Lottie JSON document held in memory.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the header is missing, malformed or
    /// unplayable.
    #[allow(clippy::cast_possible_truncation)] // Composition sizes are small
    pub fn from_json_str(data: &str) -> Result<Self, LoadError> {
        let header = LottieHeader::parse(data)?;
        let (width, height) = header.dimensions()?;
        let mut source = Self::from_parts(
            header.total_frames()?,
            header.duration_secs()?,
            Size::new(width as f32, height as f32),
        )?;
        source.name = header.name;
        source.document = Some(Arc::from(data));
        Ok(source)
    }

    /// Builds a source from metadata a backend already knows.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidHeader`] unless frame count, duration and
    /// both size dimensions are finite and strictly positive.
    pub fn from_parts(
        total_frames: f64,
        duration_secs: f64,
        intrinsic_size: Size,
    ) -> Result<Self, LoadError> {
        if !(total_frames.is_finite() && total_frames > 0.0) {
            return Err(LoadError::InvalidHeader(format!(
                "animation must have frames, got {total_frames}"
            )));
        }
        if !(duration_secs.is_finite() && duration_secs > 0.0) {
            return Err(LoadError::InvalidHeader(format!(
                "duration must be positive, got {duration_secs}s"
            )));
        }
        if !intrinsic_size.is_positive() {
            return Err(LoadError::InvalidHeader(format!(
                "size must be positive, got {}x{}",
                intrinsic_size.width, intrinsic_size.height
            )));
        }
        Ok(Self {
            total_frames,
            duration_secs,
            intrinsic_size,
            name: None,
            document: None,
        })
    }

    /// Total frame count.
    #[must_use]
    pub fn total_frames(&self) -> f64 {
        self.total_frames
    }

    /// Duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// Seconds covered by a single frame.
    #[must_use]
    pub fn frame_duration_secs(&self) -> f64 {
        self.duration_secs / self.total_frames
    }

    /// Authored composition size.
    #[must_use]
    pub fn intrinsic_size(&self) -> Size {
        self.intrinsic_size
    }

    /// Composition name, when the document has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw document, absent for sources built with [`from_parts`](Self::from_parts).
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }
}
