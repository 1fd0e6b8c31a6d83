// SPDX-License-Identifier: MPL-2.0
//! Source sub-rectangle selection for aspect-fit and aspect-fill.

use crate::config::ContentMode;
use crate::domain::geometry::{Rect, Size};

/// Returns the part of the animation to render into a `target`-sized buffer.
///
/// - [`ContentMode::AspectFit`] keeps the whole intrinsic rectangle; the
///   rasterizer scales it down to fit.
/// - [`ContentMode::AspectFill`] crops the intrinsic rectangle, centered, to
///   the target's aspect ratio so that a uniform scale covers the target.
///
/// A target with a zero or non-finite dimension has no aspect ratio and
/// yields the full intrinsic rectangle.
#[must_use]
pub fn source_rect(intrinsic: Size, target: Size, mode: ContentMode) -> Rect {
    let full = Rect::from_size(intrinsic);
    match mode {
        ContentMode::AspectFit => full,
        ContentMode::AspectFill => {
            if !target.is_positive() || !intrinsic.is_positive() {
                return full;
            }
            let target_aspect = target.aspect_ratio();
            if intrinsic.aspect_ratio() > target_aspect {
                let width = intrinsic.height * target_aspect;
                Rect::new(
                    (intrinsic.width - width) / 2.0,
                    0.0,
                    width,
                    intrinsic.height,
                )
            } else {
                let height = intrinsic.width / target_aspect;
                Rect::new(
                    0.0,
                    (intrinsic.height - height) / 2.0,
                    intrinsic.width,
                    height,
                )
            }
        }
    }
}
