//=========================================================================
// Lumen Engine
//=========================================================================
//
// Main entry point and coordinator for the engine.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(handler)──>  Engine  ──run()──>  [Runtime]
//         │                                 │
//         ├─ with_tps()                     ├─ starts the game loop thread
//         ├─ with_channel_capacity()        ├─ runs the platform (blocks)
//         ├─ with_window_title()            └─ stops the loop on exit
//         ├─ with_window_size()
//         └─ with_debug_overlay()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{error, info};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::game_loop::{FrameHandler, GameLoop, GameLoopService, LoopConfig, LoopError};
use crate::core::platform_bridge::PlatformError;
use crate::platform::{Platform, WindowConfig};

//=== EngineError =========================================================

/// Fatal engine failures returned by [`Engine::run`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Loop(#[from] LoopError),
}

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 events
/// - **Window**: "Lumen Engine", 800×600
/// - **Debug overlay**: on (F3 toggles visibility)
///
/// # Examples
///
/// ```no_run
/// use lumen_engine::EngineBuilder;
/// use lumen_engine::core::game_loop::{FrameContext, FrameHandler};
/// use lumen_engine::core::render::Canvas;
///
/// struct Game;
///
/// impl FrameHandler for Game {
///     fn update(&mut self, _ctx: &mut FrameContext<'_>) {}
///     fn render(&mut self, _canvas: &mut Canvas) {}
/// }
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_window_title("My Game")
///     .build(Game)
///     .run()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct EngineBuilder {
    loop_config: LoopConfig,
    window: WindowConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        let window = WindowConfig::default();
        Self {
            loop_config: LoopConfig {
                surface_size: (window.width, window.height),
                ..LoopConfig::default()
            },
            window,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// Default: 60.0
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.loop_config.tps = tps;
        self
    }

    /// Sets the channel capacity for platform → loop communication.
    ///
    /// Larger values absorb frame spikes; when the channel is full the
    /// platform holds events back and retries on the next frame rather
    /// than blocking the window.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.loop_config.channel_capacity = capacity;
        self
    }

    /// Default: "Lumen Engine"
    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Sets the initial window size in logical pixels.
    ///
    /// Default: 800×600
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.window.width = width;
        self.window.height = height;
        self.loop_config.surface_size = (width, height);
        self
    }

    /// Enables or disables the debug overlay.
    ///
    /// Default: enabled
    pub fn with_debug_overlay(mut self, enabled: bool) -> Self {
        self.loop_config.debug_overlay = enabled;
        self
    }

    /// Builds the engine around the game's frame handler.
    pub fn build<H: FrameHandler>(self, handler: H) -> Engine<H> {
        info!(
            "Building engine (TPS: {}, channel: {}, overlay: {})",
            self.loop_config.tps, self.loop_config.channel_capacity, self.loop_config.debug_overlay
        );

        Engine {
            game_loop: GameLoop::new(handler, self.loop_config),
            window: self.window,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Lumen Engine runtime.
///
/// # Architecture
///
/// ```text
/// Engine (Main Thread)
///   ├─► GameLoop (Logic Thread @ TPS)
///   │     └─► Keyboard, EventBus, FrameHandler, DebugOverlay
///   │
///   └─► Platform (winit event loop)
///         └─► Window, keyboard polling
///
/// Communication: crossbeam channel (PlatformEvent)
/// ```
pub struct Engine<H: FrameHandler> {
    game_loop: GameLoop<H>,
    window: WindowConfig,
}

impl<H: FrameHandler> Engine<H> {
    /// The game loop driven by this engine.
    pub fn game_loop(&self) -> &GameLoop<H> {
        &self.game_loop
    }

    /// Starts the engine and blocks until the window is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Starts the game loop thread at the configured TPS
    /// 2. Runs the platform event loop (blocks here)
    /// 3. On window close: platform sends `WindowClosed` and exits
    /// 4. Stops the game loop and joins its thread
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Platform`] if the event loop fails, or
    /// [`EngineError::Loop`] if the logic thread could not be started or
    /// panicked. The loop is always stopped before returning.
    pub fn run(mut self) -> Result<(), EngineError> {
        info!("Starting engine runtime (TPS: {})", self.game_loop.config().tps);

        //--- 1. Spawn the logic thread --------------------------------------
        let sender = self.game_loop.platform_sender();
        self.game_loop.start()?;

        //--- 2. Launch the platform subsystem ------------------------------
        let platform = Platform::new(sender, self.window);
        info!("Platform initialized, entering event loop");

        let platform_result = platform.run();
        if let Err(e) = &platform_result {
            error!("Platform error: {}", e);
        }
        info!("Platform event loop exited");

        //--- 3. Cleanup: stop the logic thread -----------------------------
        let loop_result = match self.game_loop.stop() {
            Ok(()) | Err(LoopError::NotRunning) => {
                info!("Game loop terminated cleanly");
                Ok(())
            }
            Err(e) => {
                error!("Game loop failed: {}", e);
                Err(e)
            }
        };

        platform_result?;
        loop_result?;

        info!("Engine shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
