// SPDX-License-Identifier: MPL-2.0
use lottie_lens::animation::AnimationSource;
use lottie_lens::config::{self, Config, ContentMode, LoopKind, PlaybackConfiguration};
use lottie_lens::domain::animation::{FrameRate, LoopMode, PlaybackSpeed, PlaybackState};
use lottie_lens::engine::{Backend, Engine, PixelBuffer, Rasterizer};
use lottie_lens::error::RenderError;
use lottie_lens::player::{LocalScheduler, ManualScheduler, PlaybackController};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;
use tiny_skia::Transform;
use tokio::sync::watch;
use tokio::task::LocalSet;
use tokio::time;

// =============================================================================
// Test Backend
// =============================================================================

/// Fills the buffer with a gray level derived from the frame number.
#[derive(Clone, Default)]
struct GrayBackend {
    draws: Arc<AtomicUsize>,
}

struct GrayRasterizer {
    draws: Arc<AtomicUsize>,
    frame: f64,
}

impl Backend for GrayBackend {
    fn init(&self, _threads: u32) -> Result<(), RenderError> {
        Ok(())
    }

    fn open(&self, source: &AnimationSource) -> Result<Box<dyn Rasterizer>, RenderError> {
        if source.document().is_some_and(|doc| doc.contains("\"broken\"")) {
            return Err(RenderError::Rendering("unsupported layer".into()));
        }
        Ok(Box::new(GrayRasterizer {
            draws: Arc::clone(&self.draws),
            frame: 0.0,
        }))
    }
}

impl Rasterizer for GrayRasterizer {
    fn set_frame(&mut self, frame: f64) -> Result<(), RenderError> {
        self.frame = frame;
        Ok(())
    }

    fn set_transform(&mut self, _transform: Transform) -> Result<(), RenderError> {
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw_into(&mut self, target: &mut PixelBuffer) -> Result<(), RenderError> {
        self.draws.fetch_add(1, Ordering::SeqCst);
        let level = self.frame as u8;
        target.fill([level, level, level, 255]);
        Ok(())
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn spinner() -> AnimationSource {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/spinner.json");
    AnimationSource::from_path(path).expect("failed to load spinner fixture")
}

fn engine(backend: &GrayBackend) -> Engine {
    Engine::new(backend.clone(), 1).expect("failed to initialize engine")
}

fn player(engine: &Engine, config: PlaybackConfiguration) -> PlaybackController {
    PlaybackController::new(engine, spinner(), (300, 150), config, LocalScheduler)
        .expect("failed to create controller")
}

async fn wait_for_state(
    receiver: &mut watch::Receiver<PlaybackState>,
    wanted: PlaybackState,
    limit: Duration,
) -> bool {
    matches!(
        time::timeout(limit, receiver.wait_for(|state| *state == wanted)).await,
        Ok(Ok(_))
    )
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn spinner_fixture_has_expected_metadata() {
    let source = spinner();
    assert_eq!(source.total_frames(), 180.0);
    assert_eq!(source.duration_secs(), 3.0);
    assert_eq!(source.name(), Some("spinner"));
    assert_eq!(source.intrinsic_size().width, 1024.0);
}

#[test]
fn engine_open_failure_is_returned_from_constructor() {
    init_logging();
    let engine = engine(&GrayBackend::default());
    let source = AnimationSource::from_json_str(
        r#"{"nm":"broken","fr":30,"ip":0,"op":30,"w":10,"h":10}"#,
    )
    .unwrap();
    let result = PlaybackController::new(
        &engine,
        source,
        (10, 10),
        PlaybackConfiguration::default(),
        ManualScheduler::new(),
    );
    assert!(result.is_err());
}

// =============================================================================
// Wall-clock Playback
// =============================================================================

#[tokio::test(flavor = "current_thread")]
async fn play_once_at_ten_times_speed_completes_quickly() {
    init_logging();
    LocalSet::new()
        .run_until(async {
            let engine = engine(&GrayBackend::default());
            let config = PlaybackConfiguration::default()
                .with_loop_mode(LoopMode::PlayOnce)
                .with_speed(PlaybackSpeed::new(10.0).unwrap());
            let mut player = player(&engine, config);
            let mut state = player.subscribe().state;

            player.play();
            assert!(
                wait_for_state(&mut state, PlaybackState::Completed, Duration::from_millis(1500))
                    .await,
                "playback did not complete in time"
            );

            assert_eq!(player.state(), PlaybackState::Completed);
            assert_eq!(player.progress(), 1.0);
            assert!(player.snapshot().is_some());
            assert!(!player.is_tick_registered());

            time::sleep(Duration::from_millis(100)).await;
            assert_eq!(player.state(), PlaybackState::Completed);
        })
        .await;
}

#[tokio::test(flavor = "current_thread")]
async fn frame_rate_does_not_change_playback_speed() {
    init_logging();
    LocalSet::new()
        .run_until(async {
            let engine = engine(&GrayBackend::default());
            let base = PlaybackConfiguration::default();
            let mut slow = player(&engine, base.with_frame_rate(FrameRate::new(15.0).unwrap()));
            let mut fast = player(&engine, base.with_frame_rate(FrameRate::new(60.0).unwrap()));

            slow.play();
            fast.play();
            time::sleep(Duration::from_millis(600)).await;
            slow.pause();
            fast.pause();

            let (slow, fast) = (slow.progress(), fast.progress());
            assert!(slow > 0.0 && fast > 0.0);
            assert!((slow - fast).abs() < 0.1, "15 Hz at {slow}, 60 Hz at {fast}");
        })
        .await;
}

#[tokio::test(flavor = "current_thread")]
async fn double_speed_gets_further() {
    init_logging();
    LocalSet::new()
        .run_until(async {
            let engine = engine(&GrayBackend::default());
            let base = PlaybackConfiguration::default();
            let mut normal = player(&engine, base);
            let mut double = player(&engine, base.with_speed(PlaybackSpeed::new(2.0).unwrap()));

            normal.play();
            double.play();
            time::sleep(Duration::from_millis(400)).await;
            normal.pause();
            double.pause();

            assert!(double.progress() > normal.progress());
        })
        .await;
}

#[tokio::test(flavor = "current_thread")]
async fn pause_and_stop_halt_ticks() {
    init_logging();
    LocalSet::new()
        .run_until(async {
            let engine = engine(&GrayBackend::default());
            let mut player = player(&engine, PlaybackConfiguration::default());

            player.play();
            time::sleep(Duration::from_millis(200)).await;
            player.pause();
            let paused_at = player.progress();
            assert!(paused_at > 0.0);

            time::sleep(Duration::from_millis(150)).await;
            assert_eq!(player.progress(), paused_at);
            assert_eq!(player.state(), PlaybackState::Paused);

            player.play();
            time::sleep(Duration::from_millis(150)).await;
            assert!(player.progress() > paused_at);

            player.stop();
            assert_eq!(player.progress(), 0.0);
            time::sleep(Duration::from_millis(100)).await;
            assert_eq!(player.progress(), 0.0);
            assert_eq!(player.state(), PlaybackState::Stopped);
        })
        .await;
}

#[tokio::test(flavor = "current_thread")]
async fn dropped_controller_receives_no_more_ticks() {
    init_logging();
    LocalSet::new()
        .run_until(async {
            let backend = GrayBackend::default();
            let engine = engine(&backend);
            let mut player = player(&engine, PlaybackConfiguration::default());
            let mut progress = player.subscribe().progress;

            player.play();
            time::sleep(Duration::from_millis(150)).await;
            drop(player);

            let draws = backend.draws.load(Ordering::SeqCst);
            assert!(draws > 1);
            time::sleep(Duration::from_millis(150)).await;
            assert_eq!(backend.draws.load(Ordering::SeqCst), draws);

            // The last value stays readable after the sender is gone.
            assert!(*progress.borrow_and_update() > 0.0);
            assert!(progress.changed().await.is_err());
        })
        .await;
}

#[tokio::test(flavor = "current_thread")]
async fn image_stream_follows_playback() {
    init_logging();
    LocalSet::new()
        .run_until(async {
            let engine = engine(&GrayBackend::default());
            let mut player = player(&engine, PlaybackConfiguration::default());
            let mut images = player.subscribe().image;
            let first = images.borrow_and_update().clone().expect("no initial frame");
            assert_eq!(first.dimensions(), (300, 150));

            player.play();
            time::timeout(Duration::from_millis(500), images.changed())
                .await
                .expect("no frame within 500ms")
                .expect("controller gone");
            let next = images.borrow_and_update().clone().expect("frame missing");
            assert!(next.get_pixel(0, 0).0[0] > 0);
        })
        .await;
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn playback_settings_from_config_file_drive_the_controller() {
    init_logging();
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("playback.toml");
    std::fs::write(
        &path,
        r#"
[engine]
threads = 2

[playback]
loop_mode = "repeat"
repeat_count = 2
speed = 10.0
frame_rate_hz = 60.0
content_mode = "aspect-fill"
"#,
    )
    .expect("failed to write config");

    let config: Config = config::load_from_path(&path).expect("failed to load config");
    assert_eq!(config.playback.loop_mode, Some(LoopKind::Repeat));
    let playback = config.playback.resolve().expect("invalid playback section");

    let backend = GrayBackend::default();
    let engine = Engine::from_config(backend, &config.engine).unwrap();
    assert_eq!(engine.threads(), 2);

    let scheduler = ManualScheduler::new();
    let mut player =
        PlaybackController::new(&engine, spinner(), (300, 150), playback, scheduler.clone())
            .unwrap();
    assert_eq!(player.configuration().content_mode, ContentMode::AspectFill);

    player.play();
    assert_eq!(
        scheduler.intervals(),
        vec![FrameRate::new(60.0).unwrap().interval()]
    );
    // 3 s at 10x and 60 Hz: 18 ticks per pass, two passes, then the stop tick.
    scheduler.fire_n(60);
    assert_eq!(player.state(), PlaybackState::Completed);
}
