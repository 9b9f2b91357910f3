//=========================================================================
// Game Loop Controller
//=========================================================================
//
// `GameLoopService` adapter that owns the logic thread.
//
//   stopped ──start()──> running ──stop()──> stopped
//      │                    │
//      │ Runtime            │ Runtime moved into worker thread,
//      │ (owned here)       │ returned via JoinHandle on stop()
//
// A window close ends the worker on its own; `stop()` still collects it.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use super::context::FrameHandler;
use super::runtime::Runtime;
use super::{GameLoopService, LoopConfig, LoopError};
use crate::core::debug::DebugOverlay;
use crate::core::platform_bridge::{EventCollector, PlatformEvent};
use crate::core::render::{Canvas, CanvasHandle};
use crate::core::screen::ScreenType;

//=== Worker ==============================================================

struct Worker<H: FrameHandler> {
    handle: JoinHandle<Runtime<H>>,
    shutdown: Sender<()>,
}

//=== GameLoop ============================================================

/// Fixed-rate game loop running a [`FrameHandler`] on its own thread.
///
/// # Examples
///
/// ```no_run
/// use lumen_engine::core::game_loop::{FrameContext, FrameHandler, GameLoop, GameLoopService, LoopConfig};
/// use lumen_engine::core::render::Canvas;
///
/// struct Idle;
///
/// impl FrameHandler for Idle {
///     fn update(&mut self, _ctx: &mut FrameContext<'_>) {}
///     fn render(&mut self, _canvas: &mut Canvas) {}
/// }
///
/// let mut game_loop = GameLoop::new(Idle, LoopConfig::default());
/// game_loop.start().unwrap();
/// // ...
/// game_loop.stop().unwrap();
/// ```
pub struct GameLoop<H: FrameHandler> {
    config: LoopConfig,
    canvas: CanvasHandle,
    platform_tx: Sender<PlatformEvent>,
    runtime: Option<Runtime<H>>,
    worker: Option<Worker<H>>,
}

impl<H: FrameHandler> GameLoop<H> {
    /// Creates a stopped loop.
    ///
    /// # Panics
    ///
    /// Panics if `config.tps <= 0.0` or `config.channel_capacity == 0`.
    pub fn new(handler: H, config: LoopConfig) -> Self {
        assert!(config.tps > 0.0, "TPS must be positive, got {}", config.tps);
        assert!(config.channel_capacity > 0, "Channel capacity must be positive");

        let (width, height) = config.surface_size;
        let canvas = CanvasHandle::new(Canvas::new(width, height));
        let (platform_tx, platform_rx) = bounded(config.channel_capacity);

        let overlay = config.debug_overlay.then(|| DebugOverlay::new(canvas.clone()));
        let runtime = Runtime::new(
            handler,
            EventCollector::new(platform_rx),
            canvas.clone(),
            overlay,
            config.frame_duration(),
        );

        Self {
            config,
            canvas,
            platform_tx,
            runtime: Some(runtime),
            worker: None,
        }
    }

    /// Sender the platform layer feeds events into.
    pub(crate) fn platform_sender(&self) -> Sender<PlatformEvent> {
        self.platform_tx.clone()
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    //--- Stopped-State Access ---------------------------------------------

    /// The handler, while the loop is stopped.
    pub fn handler(&self) -> Option<&H> {
        self.runtime.as_ref().map(|rt| &rt.handler)
    }

    /// Mutable handler access, while the loop is stopped.
    pub fn handler_mut(&mut self) -> Option<&mut H> {
        self.runtime.as_mut().map(|rt| &mut rt.handler)
    }

    /// Current screen, while the loop is stopped.
    pub fn screen(&self) -> Option<ScreenType> {
        self.runtime.as_ref().map(|rt| rt.screen)
    }

    /// Ticks run so far across all starts, while the loop is stopped.
    pub fn tick_count(&self) -> Option<u64> {
        self.runtime.as_ref().map(Runtime::tick_count)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Joins a worker and takes its runtime back.
    fn join(&mut self, worker: Worker<H>) -> Result<(), LoopError> {
        match worker.handle.join() {
            Ok(runtime) => {
                self.runtime = Some(runtime);
                Ok(())
            }
            Err(_) => {
                error!(target: "game_loop", "Logic thread panicked; loop state is lost");
                Err(LoopError::WorkerPanicked)
            }
        }
    }

    /// Collects a worker that exited on its own.
    fn reap(&mut self) -> Result<(), LoopError> {
        match self.worker.take() {
            Some(worker) if worker.handle.is_finished() => self.join(worker),
            other => {
                self.worker = other;
                Ok(())
            }
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl<H: FrameHandler> GameLoopService for GameLoop<H> {
    fn canvas(&self) -> CanvasHandle {
        self.canvas.clone()
    }

    fn start(&mut self) -> Result<(), LoopError> {
        self.reap()?;
        if self.worker.is_some() {
            return Err(LoopError::AlreadyRunning);
        }
        let runtime = self.runtime.take().ok_or(LoopError::RuntimeLost)?;

        let (shutdown, shutdown_rx) = bounded(1);
        let handle = thread::Builder::new()
            .name("game-loop".into())
            .spawn(move || runtime.run(shutdown_rx))
            .map_err(|e| LoopError::Spawn(e.to_string()))?;

        info!(target: "game_loop", "Logic thread spawned (TPS: {})", self.config.tps);
        self.worker = Some(Worker { handle, shutdown });
        Ok(())
    }

    fn stop(&mut self) -> Result<(), LoopError> {
        let worker = self.worker.take().ok_or(LoopError::NotRunning)?;

        // Fails only if the worker already exited; joining covers that case
        let _ = worker.shutdown.send(());
        self.join(worker)?;

        info!(target: "game_loop", "Logic thread joined");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }
}

impl<H: FrameHandler> Drop for GameLoop<H> {
    fn drop(&mut self) {
        if self.worker.is_some() {
            if let Err(e) = self.stop() {
                error!(target: "game_loop", "Error stopping loop on drop: {}", e);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::{EventType, GameEvent};
    use crate::core::game_loop::FrameContext;
    use crate::core::input::{InputEvent, KeyCode, Modifiers};
    use crate::core::render::{Color, LayerType};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    //--- Test Helpers -----------------------------------------------------

    #[derive(Default)]
    struct Counter {
        updates: u64,
        starts: u32,
        stops: u32,
        keys: Arc<Mutex<Vec<KeyCode>>>,
        stopped_events: Vec<GameEvent>,
        panic_at: Option<u64>,
    }

    impl FrameHandler for Counter {
        fn update(&mut self, ctx: &mut FrameContext<'_>) {
            self.updates += 1;
            if self.panic_at == Some(ctx.tick()) {
                panic!("handler failure at tick {}", ctx.tick());
            }
            let mut keys = self.keys.lock().unwrap();
            keys.extend(ctx.events().read(EventType::KeyDown).iter().filter_map(GameEvent::key));
            if ctx.keyboard().is_key_pressed(KeyCode::Enter) {
                ctx.set_screen(ScreenType::World);
            }
        }

        fn render(&mut self, canvas: &mut Canvas) {
            canvas.fill_rect(LayerType::Scene, 1.0, 2.0, 3.0, 4.0, Color::RED);
        }

        fn on_start(&mut self, _ctx: &mut FrameContext<'_>) {
            self.starts += 1;
        }

        fn on_stop(&mut self, ctx: &mut FrameContext<'_>) {
            self.stops += 1;
            self.stopped_events = ctx.events().iter().copied().collect();
        }
    }

    fn fast_config() -> LoopConfig {
        LoopConfig {
            tps: 500.0,
            debug_overlay: false,
            ..LoopConfig::default()
        }
    }

    fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if condition() {
                return true;
            }
            thread::sleep(Duration::from_millis(2));
        }
        condition()
    }

    fn key_down(key: KeyCode) -> PlatformEvent {
        PlatformEvent::Inputs(vec![InputEvent::KeyDown { key, modifiers: Modifiers::NONE }])
    }

    //=====================================================================
    // State Transition Tests
    //=====================================================================

    #[test]
    fn new_loop_is_stopped() {
        let game_loop = GameLoop::new(Counter::default(), fast_config());
        assert!(!game_loop.is_running());
        assert_eq!(game_loop.tick_count(), Some(0));
        assert_eq!(game_loop.screen(), Some(ScreenType::Unknown));
    }

    #[test]
    fn start_then_stop() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());

        game_loop.start().unwrap();
        assert!(game_loop.is_running());
        assert!(game_loop.handler().is_none());

        thread::sleep(Duration::from_millis(30));
        game_loop.stop().unwrap();

        assert!(!game_loop.is_running());
        let handler = game_loop.handler().unwrap();
        assert!(handler.updates > 0);
        assert_eq!(handler.starts, 1);
        assert_eq!(handler.stops, 1);
        assert_eq!(handler.stopped_events, [GameEvent::LoopStopped]);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());

        game_loop.start().unwrap();
        assert_eq!(game_loop.start(), Err(LoopError::AlreadyRunning));
        assert!(game_loop.is_running());

        game_loop.stop().unwrap();
    }

    #[test]
    fn stop_when_stopped_is_rejected() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());
        assert_eq!(game_loop.stop(), Err(LoopError::NotRunning));

        game_loop.start().unwrap();
        game_loop.stop().unwrap();
        assert_eq!(game_loop.stop(), Err(LoopError::NotRunning));
    }

    #[test]
    fn restart_keeps_game_state() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());

        game_loop.start().unwrap();
        thread::sleep(Duration::from_millis(20));
        game_loop.stop().unwrap();
        let first_run = game_loop.handler().unwrap().updates;
        let first_ticks = game_loop.tick_count().unwrap();

        game_loop.start().unwrap();
        thread::sleep(Duration::from_millis(20));
        game_loop.stop().unwrap();

        let handler = game_loop.handler().unwrap();
        assert!(handler.updates > first_run);
        assert!(game_loop.tick_count().unwrap() > first_ticks);
        assert_eq!(handler.starts, 2);
        assert_eq!(handler.stops, 2);
    }

    #[test]
    fn handler_can_be_configured_while_stopped() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());
        game_loop.handler_mut().unwrap().updates = 100;

        game_loop.start().unwrap();
        assert!(game_loop.handler_mut().is_none());
        game_loop.stop().unwrap();

        assert!(game_loop.handler().unwrap().updates >= 100);
    }

    //=====================================================================
    // Event Flow Tests
    //=====================================================================

    #[test]
    fn platform_keys_reach_handler() {
        let keys = Arc::new(Mutex::new(Vec::new()));
        let handler = Counter { keys: Arc::clone(&keys), ..Counter::default() };
        let mut game_loop = GameLoop::new(handler, fast_config());
        let tx = game_loop.platform_sender();

        game_loop.start().unwrap();
        tx.send(key_down(KeyCode::KeyW)).unwrap();
        tx.send(key_down(KeyCode::Enter)).unwrap();

        assert!(wait_until(Duration::from_secs(2), || keys.lock().unwrap().len() == 2));
        game_loop.stop().unwrap();

        assert_eq!(*keys.lock().unwrap(), [KeyCode::KeyW, KeyCode::Enter]);
        assert_eq!(game_loop.screen(), Some(ScreenType::World));
    }

    #[test]
    fn canvas_holds_latest_frame() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());
        let canvas = game_loop.canvas();

        game_loop.start().unwrap();
        assert!(wait_until(Duration::from_secs(2), || {
            canvas.lock().commands(LayerType::Scene).len() == 1
        }));
        game_loop.stop().unwrap();

        assert!(canvas.ptr_eq(&game_loop.canvas()));
        assert_eq!(canvas.lock().commands(LayerType::Scene).len(), 1);
    }

    #[test]
    fn window_close_ends_worker() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());
        let tx = game_loop.platform_sender();

        game_loop.start().unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();

        assert!(wait_until(Duration::from_secs(2), || !game_loop.is_running()));
        assert_eq!(game_loop.stop(), Ok(()));
        assert_eq!(game_loop.handler().unwrap().stops, 1);
    }

    #[test]
    fn start_after_window_close_reaps_worker() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());
        let tx = game_loop.platform_sender();

        game_loop.start().unwrap();
        tx.send(PlatformEvent::WindowClosed).unwrap();
        assert!(wait_until(Duration::from_secs(2), || !game_loop.is_running()));

        game_loop.start().unwrap();
        assert!(game_loop.is_running());
        game_loop.stop().unwrap();
    }

    #[test]
    fn debug_overlay_draws_on_ui_layer() {
        let config = LoopConfig { debug_overlay: true, ..fast_config() };
        let mut game_loop = GameLoop::new(Counter::default(), config);
        let canvas = game_loop.canvas();

        game_loop.start().unwrap();
        assert!(wait_until(Duration::from_secs(2), || {
            !canvas.lock().commands(LayerType::Ui).is_empty()
        }));
        game_loop.stop().unwrap();
    }

    //=====================================================================
    // Failure Tests
    //=====================================================================

    #[test]
    fn worker_panic_is_reported_and_state_lost() {
        let handler = Counter { panic_at: Some(3), ..Counter::default() };
        let mut game_loop = GameLoop::new(handler, fast_config());

        game_loop.start().unwrap();
        assert!(wait_until(Duration::from_secs(2), || !game_loop.is_running()));

        assert_eq!(game_loop.stop(), Err(LoopError::WorkerPanicked));
        assert_eq!(game_loop.start(), Err(LoopError::RuntimeLost));
        assert!(game_loop.handler().is_none());
    }

    #[test]
    #[should_panic(expected = "TPS must be positive")]
    fn zero_tps_panics() {
        GameLoop::new(Counter::default(), LoopConfig { tps: 0.0, ..LoopConfig::default() });
    }

    #[test]
    fn drop_stops_running_loop() {
        let mut game_loop = GameLoop::new(Counter::default(), fast_config());
        game_loop.start().unwrap();
        drop(game_loop);
    }
}
