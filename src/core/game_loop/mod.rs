//=========================================================================
// Game Loop
//=========================================================================
//
// Fixed-rate logic loop running game code on a dedicated thread.
//
// Architecture:
//   Platform ──PlatformEvent──> GameLoop (logic thread @ TPS)
//                                  ├─► Keyboard → EventBus
//                                  ├─► FrameHandler::update / render
//                                  └─► DebugOverlay
//                                         ↓
//                                    CanvasHandle
//
// Components:
// - `context`: `FrameHandler` trait and the per-tick `FrameContext`
// - `runtime`: Logic-thread state and the tick pipeline
// - `controller`: `GameLoop`, the start/stop owner of the thread
//
//=========================================================================

//=== Module Declarations =================================================

mod context;
mod controller;
mod runtime;

//=== External Dependencies ===============================================

use std::time::Duration;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::render::CanvasHandle;

//=== Public API ==========================================================

pub use context::{FrameContext, FrameHandler};
pub use controller::GameLoop;

//=== GameLoopService =====================================================

/// Start/stop control over a game loop and access to its render target.
///
/// The loop is either stopped or running; there is no paused state.
pub trait GameLoopService {
    /// Render target the loop draws into.
    fn canvas(&self) -> CanvasHandle;

    /// Starts a stopped loop.
    ///
    /// # Errors
    /// [`LoopError::AlreadyRunning`] if the loop is running.
    fn start(&mut self) -> Result<(), LoopError>;

    /// Stops a running loop, blocking until the current tick has finished.
    ///
    /// # Errors
    /// [`LoopError::NotRunning`] if the loop is stopped.
    fn stop(&mut self) -> Result<(), LoopError>;

    /// Returns `true` while ticks are being run.
    fn is_running(&self) -> bool;
}

//=== LoopError ===========================================================

/// Game loop control failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoopError {
    #[error("game loop is already running")]
    AlreadyRunning,

    #[error("game loop is not running")]
    NotRunning,

    /// The logic thread panicked; its state could not be recovered.
    #[error("game loop thread panicked")]
    WorkerPanicked,

    /// A previous failure lost the loop state, so it cannot start again.
    #[error("game loop state was lost by an earlier failure")]
    RuntimeLost,

    #[error("failed to spawn game loop thread: {0}")]
    Spawn(String),
}

//=== LoopConfig ==========================================================

/// Game loop settings.
///
/// # Default Values
///
/// - **TPS**: 60.0
/// - **Channel capacity**: 128 platform events
/// - **Surface size**: 800×600
/// - **Debug overlay**: on
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Target ticks per second.
    pub tps: f64,

    /// Capacity of the platform → loop channel.
    pub channel_capacity: usize,

    /// Initial canvas size, until the platform reports the real one.
    pub surface_size: (u32, u32),

    /// Whether the debug overlay is created (toggled with F3).
    pub debug_overlay: bool,
}

impl LoopConfig {
    /// Duration of one tick.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tps)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            surface_size: (800, 600),
            debug_overlay: true,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
