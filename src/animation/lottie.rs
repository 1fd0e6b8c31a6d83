// SPDX-License-Identifier: MPL-2.0
//! Lottie document header.
//!
//! Only the top-level timing and size keys are read here; layers, assets and
//! everything else are left to the rasterizer.

use crate::error::LoadError;
use serde::Deserialize;

/// Top-level keys of a Lottie (Bodymovin) JSON document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LottieHeader {
    /// Bodymovin format version.
    #[serde(rename = "v", default)]
    pub version: Option<String>,

    /// Composition name.
    #[serde(rename = "nm", default)]
    pub name: Option<String>,

    /// Authored frame rate.
    #[serde(rename = "fr", default)]
    pub frame_rate: Option<f64>,

    /// In point (first frame).
    #[serde(rename = "ip", default)]
    pub in_point: Option<f64>,

    /// Out point (frame after the last one).
    #[serde(rename = "op", default)]
    pub out_point: Option<f64>,

    #[serde(rename = "w", default)]
    pub width: Option<f64>,

    #[serde(rename = "h", default)]
    pub height: Option<f64>,
}

impl LottieHeader {
    /// Parses the header from a full Lottie document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if the text is not a JSON object.
    pub fn parse(data: &str) -> Result<Self, LoadError> {
        serde_json::from_str(data).map_err(|e| LoadError::Json(e.to_string()))
    }

    /// Number of frames between the in and out points.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingField`] when `ip` or `op` is absent.
    pub fn total_frames(&self) -> Result<f64, LoadError> {
        let in_point = self.in_point.ok_or(LoadError::MissingField("ip"))?;
        let out_point = self.out_point.ok_or(LoadError::MissingField("op"))?;
        Ok(out_point - in_point)
    }

    /// Duration in seconds at the authored frame rate.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingField`] when `fr`, `ip` or `op` is absent,
    /// and [`LoadError::InvalidHeader`] for a non-positive frame rate.
    pub fn duration_secs(&self) -> Result<f64, LoadError> {
        let frame_rate = self.frame_rate.ok_or(LoadError::MissingField("fr"))?;
        if !(frame_rate.is_finite() && frame_rate > 0.0) {
            return Err(LoadError::InvalidHeader(format!(
                "frame rate must be positive, got {frame_rate}"
            )));
        }
        Ok(self.total_frames()? / frame_rate)
    }

    /// Composition width and height.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingField`] when `w` or `h` is absent.
    pub fn dimensions(&self) -> Result<(f64, f64), LoadError> {
        let width = self.width.ok_or(LoadError::MissingField("w"))?;
        let height = self.height.ok_or(LoadError::MissingField("h"))?;
        Ok((width, height))
    }
}
