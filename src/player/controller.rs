// SPDX-License-Identifier: MPL-2.0
//! Playback controller: the observable state machine UI layers drive.
//!
//! State transitions:
//! - Stopped/Paused/Completed → Playing via [`PlaybackController::play`]
//! - Playing → Paused via [`PlaybackController::pause`]
//! - any → Stopped via [`PlaybackController::stop`]
//! - Playing → Completed when the loop mode finishes
//!
//! The controller is single-threaded. Operations and ticks run on the thread
//! that owns it and never overlap. Failures while playing are published on
//! the error stream, never returned.

use super::clock::{PlaybackClock, Tick};
use super::content_rect::source_rect;
use super::published::Published;
use super::renderer::FrameRenderer;
use super::scheduler::{Scheduler, TickHandle};
use crate::animation::AnimationSource;
use crate::config::PlaybackConfiguration;
use crate::domain::animation::PlaybackState;
use crate::domain::geometry::{Rect, Size};
use crate::engine::{Engine, PixelBuffer};
use crate::error::{PlaybackError, Result};
use image_rs::RgbaImage;
use log::{debug, warn};
use std::cell::RefCell;
use std::fmt;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tokio::sync::watch;

/// Receivers for everything a controller publishes.
///
/// Each receiver starts at the current value.
#[derive(Debug, Clone)]
pub struct PlaybackStreams {
    /// Last successfully rendered frame.
    pub image: watch::Receiver<Option<Arc<RgbaImage>>>,
    pub state: watch::Receiver<PlaybackState>,
    /// Position in `[0, 1]`.
    pub progress: watch::Receiver<f64>,
    /// Last failure; cleared by [`PlaybackController::play`].
    pub error: watch::Receiver<Option<PlaybackError>>,
}

/// Plays one animation into one fixed-size pixel buffer.
///
/// Dropping the controller cancels its tick; no callback runs afterwards.
pub struct PlaybackController {
    core: Rc<RefCell<ControllerCore>>,
    scheduler: Box<dyn Scheduler>,
}

struct ControllerCore {
    source: AnimationSource,
    config: PlaybackConfiguration,
    clock: PlaybackClock,
    renderer: FrameRenderer,
    buffer: PixelBuffer,
    crop: Rect,

    state: Published<PlaybackState>,
    progress: Published<f64>,
    image: Published<Option<Arc<RgbaImage>>>,
    error: Published<Option<PlaybackError>>,

    tick: Option<TickHandle>,
    /// Bumped whenever a tick registration ends; stale ticks compare unequal.
    generation: u64,
    /// Set while consecutive renders fail, to log a failure streak once.
    failing: bool,
}

impl PlaybackController {
    /// Opens `source` on `engine`, allocates a `width x height` buffer and
    /// renders frame 0.
    ///
    /// A failure to render that first frame is published on the error
    /// stream; the controller is still returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`](crate::error::Error::Render) if the engine
    /// cannot open the animation or the buffer cannot be created.
    pub fn new<S: Scheduler + 'static>(
        engine: &Engine,
        source: AnimationSource,
        (width, height): (u32, u32),
        config: PlaybackConfiguration,
        scheduler: S,
    ) -> Result<Self> {
        let rasterizer = engine.open(&source)?;
        let buffer = PixelBuffer::new(width, height, config.pixel_format)?;
        let crop = source_rect(
            source.intrinsic_size(),
            Size::from((width, height)),
            config.content_mode,
        );

        let mut core = ControllerCore {
            clock: PlaybackClock::new(&source, &config),
            renderer: FrameRenderer::new(rasterizer, &source),
            source,
            config,
            buffer,
            crop,
            state: Published::new(PlaybackState::Stopped),
            progress: Published::new(0.0),
            image: Published::new(None),
            error: Published::new(None),
            tick: None,
            generation: 0,
            failing: false,
        };
        core.refresh();
        debug!(
            "controller ready: {} frames, {:.3}s, {width}x{height} target",
            core.source.total_frames(),
            core.source.duration_secs()
        );

        Ok(Self {
            core: Rc::new(RefCell::new(core)),
            scheduler: Box::new(scheduler),
        })
    }

    /// Starts or resumes playback.
    ///
    /// No-op while playing. Clears the published error. Playback after
    /// completion restarts from the beginning.
    pub fn play(&mut self) {
        let (generation, interval) = {
            let mut core = self.core.borrow_mut();
            let state = core.state.get();
            if state.is_playing() {
                return;
            }
            if state.is_completed() {
                core.clock.reset();
                core.progress.set(core.clock.progress());
            }
            core.error.set(None);
            core.failing = false;
            core.generation += 1;
            core.transition(PlaybackState::Playing);
            (core.generation, core.config.frame_rate.interval())
        };

        let core = Rc::downgrade(&self.core);
        let handle = self.scheduler.schedule_repeating(
            interval,
            Box::new(move || on_tick(&core, generation)),
        );
        debug!("tick registered every {interval:?}");
        self.core.borrow_mut().tick = Some(handle);
    }

    /// Pauses playback on the current frame. No-op unless playing.
    pub fn pause(&mut self) {
        let mut core = self.core.borrow_mut();
        if !core.state.get().is_playing() {
            return;
        }
        core.cancel_tick();
        core.transition(PlaybackState::Paused);
    }

    /// Stops playback, rewinds and renders frame 0. Allowed in any state.
    pub fn stop(&mut self) {
        let mut core = self.core.borrow_mut();
        core.cancel_tick();
        core.clock.reset();
        core.refresh();
        core.transition(PlaybackState::Stopped);
    }

    /// Jumps to a normalized position, clamped to `[0, 1]`, and renders it.
    ///
    /// Playback state is unchanged; a running tick continues from the new
    /// position.
    pub fn seek(&mut self, progress: f64) {
        let mut core = self.core.borrow_mut();
        core.clock.seek_progress(progress);
        core.refresh();
    }

    /// Jumps to `frame` and renders it.
    ///
    /// A frame outside `[0, total_frames]` publishes
    /// [`PlaybackError::InvalidFrameIndex`] and changes nothing else.
    pub fn seek_to_frame(&mut self, frame: f64) {
        let mut core = self.core.borrow_mut();
        match core.clock.seek_frame(frame) {
            Ok(()) => core.refresh(),
            Err(err) => {
                warn!("{err}");
                core.error.set(Some(err));
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.core.borrow().state.get()
    }

    #[must_use]
    pub fn progress(&self) -> f64 {
        self.core.borrow().progress.get()
    }

    #[must_use]
    pub fn current_frame_index(&self) -> f64 {
        self.core.borrow().clock.current_frame_index()
    }

    #[must_use]
    pub fn error(&self) -> Option<PlaybackError> {
        self.core.borrow().error.get()
    }

    /// Last successfully rendered frame.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<RgbaImage>> {
        self.core.borrow().image.get()
    }

    #[must_use]
    pub fn subscribe(&self) -> PlaybackStreams {
        let core = self.core.borrow();
        PlaybackStreams {
            image: core.image.subscribe(),
            state: core.state.subscribe(),
            progress: core.progress.subscribe(),
            error: core.error.subscribe(),
        }
    }

    #[must_use]
    pub fn configuration(&self) -> PlaybackConfiguration {
        self.core.borrow().config
    }

    #[must_use]
    pub fn source(&self) -> AnimationSource {
        self.core.borrow().source.clone()
    }

    /// Returns true while a repeating tick is registered.
    #[must_use]
    pub fn is_tick_registered(&self) -> bool {
        self.core.borrow().tick.is_some()
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if let Ok(mut core) = self.core.try_borrow_mut() {
            core.cancel_tick();
        }
    }
}

impl fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("PlaybackController");
        if let Ok(core) = self.core.try_borrow() {
            debug
                .field("state", &core.state.get())
                .field("elapsed", &core.clock.elapsed())
                .field("config", &core.config);
        }
        debug.finish_non_exhaustive()
    }
}

/// Tick entry point. Holds only a weak reference, so a controller that is
/// gone ends the registration.
fn on_tick(core: &Weak<RefCell<ControllerCore>>, generation: u64) -> ControlFlow<()> {
    let Some(shared) = core.upgrade() else {
        return ControlFlow::Break(());
    };
    let Ok(mut core) = shared.try_borrow_mut() else {
        // An operation is running on this thread; skip this tick.
        return ControlFlow::Continue(());
    };
    if core.generation != generation {
        return ControlFlow::Break(());
    }
    core.tick()
}

impl ControllerCore {
    fn tick(&mut self) -> ControlFlow<()> {
        match self.clock.advance() {
            Tick::Finished => {
                self.cancel_tick();
                self.transition(PlaybackState::Completed);
                ControlFlow::Break(())
            }
            Tick::Advanced { .. } => {
                self.refresh();
                ControlFlow::Continue(())
            }
        }
    }

    /// Renders the clock's current frame and publishes image and progress.
    fn refresh(&mut self) {
        self.progress.set(self.clock.progress());
        match self.render_current() {
            Ok(image) => {
                self.failing = false;
                self.image.set(Some(Arc::new(image)));
            }
            Err(err) => {
                if !self.failing {
                    warn!("frame {} failed: {err}", self.clock.current_frame_index());
                    self.failing = true;
                }
                self.error.set(Some(err));
            }
        }
    }

    fn render_current(&mut self) -> std::result::Result<RgbaImage, PlaybackError> {
        self.renderer.render(
            self.clock.current_frame_index(),
            self.crop,
            self.config.rotation_degrees,
            &mut self.buffer,
        )?;
        self.buffer
            .to_rgba_image()
            .ok_or(PlaybackError::ImageConstructionFailed)
    }

    fn cancel_tick(&mut self) {
        if let Some(mut tick) = self.tick.take() {
            tick.cancel();
            self.generation += 1;
            debug!("tick cancelled");
        }
    }

    fn transition(&mut self, next: PlaybackState) {
        let previous = self.state.get();
        if self.state.set_if_changed(next) {
            debug!("playback {previous:?} -> {next:?}");
        }
    }
}
