// SPDX-License-Identifier: MPL-2.0
//! Frame rendering through the rasterizer port.

use crate::animation::AnimationSource;
use crate::domain::geometry::{Rect, Size};
use crate::engine::{PixelBuffer, Rasterizer};
use crate::error::RenderError;
use tiny_skia::Transform;

/// Draws single frames of one animation into a caller-owned buffer.
pub struct FrameRenderer {
    rasterizer: Box<dyn Rasterizer>,
    total_frames: f64,
    intrinsic_size: Size,
}

impl FrameRenderer {
    #[must_use]
    pub fn new(rasterizer: Box<dyn Rasterizer>, source: &AnimationSource) -> Self {
        Self {
            rasterizer,
            total_frames: source.total_frames(),
            intrinsic_size: source.intrinsic_size(),
        }
    }

    /// Renders `frame_index`, cropped to `source_rect` and rotated about the
    /// animation center, into `target`.
    ///
    /// `frame_index == total_frames` is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::FrameIndexOutOfRange`] for an index outside
    /// `[0, total_frames]` (the rasterizer is not touched), or the
    /// rasterizer's own error.
    pub fn render(
        &mut self,
        frame_index: f64,
        source_rect: Rect,
        rotation_degrees: f32,
        target: &mut PixelBuffer,
    ) -> Result<(), RenderError> {
        if !(0.0..=self.total_frames).contains(&frame_index) {
            return Err(RenderError::FrameIndexOutOfRange {
                index: frame_index,
                total_frames: self.total_frames,
            });
        }

        self.rasterizer.set_frame(frame_index)?;
        self.rasterizer.set_transform(frame_transform(
            self.intrinsic_size,
            source_rect,
            rotation_degrees,
        ))?;
        self.rasterizer.draw_into(target)
    }

    #[must_use]
    pub fn total_frames(&self) -> f64 {
        self.total_frames
    }
}

impl std::fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("total_frames", &self.total_frames)
            .field("intrinsic_size", &self.intrinsic_size)
            .finish_non_exhaustive()
    }
}

/// Maps `source_rect` onto the full intrinsic area, then rotates about the
/// intrinsic center.
///
/// An empty `source_rect` leaves the scale at 1.
#[must_use]
pub fn frame_transform(intrinsic: Size, source_rect: Rect, rotation_degrees: f32) -> Transform {
    let scale = |full: f32, part: f32| if part > 0.0 { full / part } else { 1.0 };
    let sx = scale(intrinsic.width, source_rect.width);
    let sy = scale(intrinsic.height, source_rect.height);

    let transform = Transform::from_translate(-source_rect.x, -source_rect.y).post_scale(sx, sy);
    if rotation_degrees == 0.0 {
        transform
    } else {
        transform.post_concat(Transform::from_rotate_at(
            rotation_degrees,
            intrinsic.width / 2.0,
            intrinsic.height / 2.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PixelFormat;
    use crate::test_utils::assert_abs_diff_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tiny_skia::Point;

    #[derive(Default)]
    struct Calls {
        frames: Vec<f64>,
        transforms: Vec<Transform>,
        draws: usize,
    }

    struct RecordingRasterizer {
        calls: Rc<RefCell<Calls>>,
        fail_draw: bool,
    }

    impl Rasterizer for RecordingRasterizer {
        fn set_frame(&mut self, frame: f64) -> Result<(), RenderError> {
            self.calls.borrow_mut().frames.push(frame);
            Ok(())
        }

        fn set_transform(&mut self, transform: Transform) -> Result<(), RenderError> {
            self.calls.borrow_mut().transforms.push(transform);
            Ok(())
        }

        fn draw_into(&mut self, target: &mut PixelBuffer) -> Result<(), RenderError> {
            if self.fail_draw {
                return Err(RenderError::Rendering("surface lost".into()));
            }
            self.calls.borrow_mut().draws += 1;
            target.fill([255, 0, 0, 255]);
            Ok(())
        }
    }

    fn renderer(fail_draw: bool) -> (FrameRenderer, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        let source = AnimationSource::from_parts(180.0, 3.0, Size::new(100.0, 100.0)).unwrap();
        let rasterizer = RecordingRasterizer {
            calls: Rc::clone(&calls),
            fail_draw,
        };
        (FrameRenderer::new(Box::new(rasterizer), &source), calls)
    }

    fn map(transform: Transform, x: f32, y: f32) -> (f32, f32) {
        let mut point = Point::from_xy(x, y);
        transform.map_point(&mut point);
        (point.x, point.y)
    }

    #[test]
    fn render_sets_frame_transform_and_draws() {
        let (mut renderer, calls) = renderer(false);
        let mut buffer = PixelBuffer::new(4, 4, PixelFormat::default()).unwrap();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);

        renderer.render(42.0, rect, 0.0, &mut buffer).unwrap();

        let calls = calls.borrow();
        assert_eq!(calls.frames, vec![42.0]);
        assert_eq!(calls.transforms, vec![Transform::identity()]);
        assert_eq!(calls.draws, 1);
        assert!(buffer.pixels().iter().all(|&p| p == 0xFFFF_0000));
    }

    #[test]
    fn last_frame_is_accepted() {
        let (mut renderer, _) = renderer(false);
        let mut buffer = PixelBuffer::new(1, 1, PixelFormat::default()).unwrap();
        assert!(renderer
            .render(180.0, Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, &mut buffer)
            .is_ok());
    }

    #[test]
    fn out_of_range_frames_are_rejected_before_the_rasterizer() {
        let (mut renderer, calls) = renderer(false);
        let mut buffer = PixelBuffer::new(1, 1, PixelFormat::default()).unwrap();
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);

        for index in [-1.0, 180.5, f64::NAN] {
            let err = renderer.render(index, rect, 0.0, &mut buffer).unwrap_err();
            assert!(matches!(err, RenderError::FrameIndexOutOfRange { .. }));
        }
        assert!(calls.borrow().frames.is_empty());
    }

    #[test]
    fn rasterizer_failure_is_returned() {
        let (mut renderer, _) = renderer(true);
        let mut buffer = PixelBuffer::new(1, 1, PixelFormat::default()).unwrap();
        let err = renderer
            .render(0.0, Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, &mut buffer)
            .unwrap_err();
        assert_eq!(err, RenderError::Rendering("surface lost".into()));
    }

    #[test]
    fn crop_transform_maps_source_rect_onto_intrinsic_area() {
        let intrinsic = Size::new(1024.0, 1024.0);
        let rect = Rect::new(0.0, 256.0, 1024.0, 512.0);
        let transform = frame_transform(intrinsic, rect, 0.0);

        let (x0, y0) = map(transform, 0.0, 256.0);
        assert_abs_diff_eq!(x0, 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(y0, 0.0, epsilon = 1e-3);

        let (x1, y1) = map(transform, 1024.0, 768.0);
        assert_abs_diff_eq!(x1, 1024.0, epsilon = 1e-3);
        assert_abs_diff_eq!(y1, 1024.0, epsilon = 1e-3);
    }

    #[test]
    fn rotation_pivots_on_intrinsic_center() {
        let intrinsic = Size::new(100.0, 100.0);
        let transform = frame_transform(intrinsic, Rect::from_size(intrinsic), 90.0);

        let (cx, cy) = map(transform, 50.0, 50.0);
        assert_abs_diff_eq!(cx, 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(cy, 50.0, epsilon = 1e-3);

        let (x, y) = map(transform, 100.0, 50.0);
        assert_abs_diff_eq!(x, 50.0, epsilon = 1e-3);
        assert_abs_diff_eq!(y, 100.0, epsilon = 1e-3);
    }
}
