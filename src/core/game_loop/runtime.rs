//=========================================================================
// Loop Runtime
//=========================================================================
//
// Everything the logic thread owns while the loop runs.
//
// Each tick at fixed TPS:
//   1. Clear event bus, begin keyboard frame
//   2. Collect platform events → keyboard → GameEvent::KeyDown / KeyUp
//                             → resize → canvas + overlay
//   3. F3 toggles the debug overlay
//   4. handler.update(ctx)
//   5. Clear canvas, handler.render(canvas)
//   6. Overlay observes stats and renders (once initialized)
//   7. Sleep until the next tick (woken early by shutdown)
//
// The runtime is moved into the worker by `start()` and returned from
// the worker's join handle by `stop()`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::context::{FrameContext, FrameHandler};
use crate::core::debug::{DebugOverlay, DebugService, FrameStats};
use crate::core::events::{EventBus, GameEvent};
use crate::core::input::{KeyCode, Keyboard};
use crate::core::platform_bridge::{EventCollector, TickControl};
use crate::core::render::CanvasHandle;
use crate::core::screen::ScreenType;

//=== Runtime =============================================================

/// Logic-thread state of a game loop.
pub(crate) struct Runtime<H: FrameHandler> {
    pub(crate) handler: H,
    pub(crate) keyboard: Keyboard,
    pub(crate) events: EventBus,
    pub(crate) overlay: Option<DebugOverlay>,
    pub(crate) screen: ScreenType,
    collector: EventCollector,
    canvas: CanvasHandle,
    frame_duration: Duration,
    tick: u64,
}

impl<H: FrameHandler> Runtime<H> {
    /// Key that flips overlay visibility.
    const OVERLAY_TOGGLE_KEY: KeyCode = KeyCode::F3;

    pub(crate) fn new(
        handler: H,
        collector: EventCollector,
        canvas: CanvasHandle,
        overlay: Option<DebugOverlay>,
        frame_duration: Duration,
    ) -> Self {
        Self {
            handler,
            keyboard: Keyboard::new(),
            events: EventBus::new(),
            overlay,
            screen: ScreenType::default(),
            collector,
            canvas,
            frame_duration,
            tick: 0,
        }
    }

    pub(crate) fn tick_count(&self) -> u64 {
        self.tick
    }

    //--- Thread Body ------------------------------------------------------

    /// Runs ticks until shutdown is signalled, the window closes or the
    /// platform disconnects, then returns the runtime for reuse.
    pub(crate) fn run(mut self, shutdown: Receiver<()>) -> Self {
        info!(target: "game_loop", "Loop started at tick {}", self.tick);

        if let Some(overlay) = self.overlay.as_mut() {
            if !overlay.is_initialized() {
                overlay.init();
            }
        }

        self.events.clear_all();
        self.with_context(|handler, ctx| handler.on_start(ctx));

        let mut first = true;
        loop {
            let frame_start = Instant::now();

            if self.tick_once(first) == TickControl::Exit {
                info!(target: "game_loop", "Platform requested exit");
                break;
            }
            first = false;

            //--- Maintain fixed pacing ---------------------------------
            let remaining = self.frame_duration.saturating_sub(frame_start.elapsed());
            match shutdown.recv_timeout(remaining) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        self.events.clear_all();
        self.events.push(GameEvent::LoopStopped);
        self.with_context(|handler, ctx| handler.on_stop(ctx));

        info!(target: "game_loop", "Loop stopped at tick {}", self.tick);
        self
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one tick. `first` marks the first tick after a start.
    pub(crate) fn tick_once(&mut self, first: bool) -> TickControl {
        let tick_start = Instant::now();
        self.tick += 1;

        //--- Step 1: Reset per-tick state ------------------------------
        self.events.clear_all();
        self.keyboard.begin_frame();
        if first {
            self.events.push(GameEvent::LoopStarted);
        }

        //--- Step 2: Gather platform events ----------------------------
        if self.collector.collect_frame() == TickControl::Exit {
            return TickControl::Exit;
        }
        for event in self.keyboard.process_events(self.collector.inputs()) {
            self.events.push(event);
        }
        if let Some((width, height)) = self.collector.resize() {
            self.apply_resize(width, height);
        }

        //--- Step 3: Overlay toggle ------------------------------------
        if self.keyboard.is_key_pressed(Self::OVERLAY_TOGGLE_KEY) {
            if let Some(overlay) = self.overlay.as_mut() {
                let visible = overlay.toggle();
                self.events.push(GameEvent::DebugToggled { visible });
            }
        }

        //--- Step 4: Game update ---------------------------------------
        self.with_context(|handler, ctx| handler.update(ctx));

        //--- Step 5: Game render ---------------------------------------
        {
            let mut canvas = self.canvas.lock();
            canvas.clear();
            self.handler.render(&mut canvas);
        }

        //--- Step 6: Debug overlay -------------------------------------
        if let Some(overlay) = self.overlay.as_mut() {
            let mut held_keys: Vec<KeyCode> = self.keyboard.keys_down().copied().collect();
            held_keys.sort();

            overlay.observe(FrameStats {
                tick: self.tick,
                frame_time: tick_start.elapsed(),
                budget: self.frame_duration,
                held_keys,
                screen: self.screen,
                event_count: self.events.len(),
            });

            if overlay.is_initialized() {
                if let Err(e) = overlay.render() {
                    warn!(target: "game_loop", "Debug overlay render failed: {}", e);
                }
            }
        }

        TickControl::Continue
    }

    //--- Internal Helpers -------------------------------------------------

    fn apply_resize(&mut self, width: u32, height: u32) {
        debug!(target: "game_loop", "Surface resized to {}x{}", width, height);
        self.canvas.lock().resize(width, height);

        if let Some(overlay) = self.overlay.as_mut() {
            if overlay.is_initialized() {
                overlay.on_resize(width, height);
            } else {
                // Retries a failed init now that the surface may be usable.
                // An init still measuring is left alone; render() re-measures.
                overlay.init();
            }
        }

        self.events.push(GameEvent::SurfaceResized { width, height });
    }

    fn with_context<R>(&mut self, f: impl FnOnce(&mut H, &mut FrameContext<'_>) -> R) -> R {
        let mut ctx = FrameContext::new(
            self.tick,
            self.frame_duration,
            &mut self.keyboard,
            &mut self.events,
            &mut self.screen,
        );
        f(&mut self.handler, &mut ctx)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
