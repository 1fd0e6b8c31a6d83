// SPDX-License-Identifier: MPL-2.0
//! Fixed-size 32-bit pixel buffer shared between rasterizer and controller.

use crate::config::PixelFormat;
use crate::error::RenderError;
use image_rs::RgbaImage;

/// Premultiplied 32-bit pixels in a [`PixelFormat`] layout.
///
/// The buffer is sized once and never reallocated; every frame is drawn
/// over the previous one.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Allocates a transparent buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ContextCreation`] for a zero dimension or a
    /// pixel count that does not fit in memory.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::ContextCreation(format!(
                "target size must be non-zero, got {width}x{height}"
            )));
        }
        let len = usize::try_from(u64::from(width) * u64::from(height)).map_err(|_| {
            RenderError::ContextCreation(format!("target size {width}x{height} is too large"))
        })?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|err| {
            RenderError::ContextCreation(format!("cannot allocate {width}x{height} buffer: {err}"))
        })?;
        pixels.resize(len, 0);
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixels per row; rows are tightly packed.
    #[must_use]
    pub fn stride(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Raw bytes for handing the buffer to a native rasterizer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Fills the buffer with one premultiplied RGBA color.
    pub fn fill(&mut self, rgba: [u8; 4]) {
        let word = pack(self.format, rgba);
        self.pixels.fill(word);
    }

    /// Converts the buffer into a straight-alpha RGBA image.
    ///
    /// Returns `None` if the pixel data does not match the dimensions.
    #[must_use]
    pub fn to_rgba_image(&self) -> Option<RgbaImage> {
        let mut data = Vec::with_capacity(self.pixels.len() * 4);
        for &word in &self.pixels {
            data.extend_from_slice(&demultiply(unpack(self.format, word)));
        }
        RgbaImage::from_raw(self.width, self.height, data)
    }
}

/// Packs premultiplied RGBA channels into a pixel word.
#[must_use]
pub(crate) fn pack(format: PixelFormat, [r, g, b, a]: [u8; 4]) -> u32 {
    let (r, g, b, a) = (u32::from(r), u32::from(g), u32::from(b), u32::from(a));
    match format {
        PixelFormat::ArgbPremultipliedLe => (a << 24) | (r << 16) | (g << 8) | b,
        PixelFormat::AbgrPremultipliedBe => (a << 24) | (b << 16) | (g << 8) | r,
    }
}

/// Splits a pixel word into premultiplied RGBA channels.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Each channel is masked to 8 bits
pub(crate) fn unpack(format: PixelFormat, word: u32) -> [u8; 4] {
    let a = (word >> 24) as u8;
    let hi = (word >> 16) as u8;
    let g = (word >> 8) as u8;
    let lo = word as u8;
    match format {
        PixelFormat::ArgbPremultipliedLe => [hi, g, lo, a],
        PixelFormat::AbgrPremultipliedBe => [lo, g, hi, a],
    }
}

#[allow(clippy::cast_possible_truncation)] // Result is clamped to 255
fn demultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    match a {
        0 => [0, 0, 0, 0],
        255 => [r, g, b, a],
        _ => {
            let alpha = u32::from(a);
            let channel = |c: u8| ((u32::from(c) * 255 + alpha / 2) / alpha).min(255) as u8;
            [channel(r), channel(g), channel(b), a]
        }
    }
}
