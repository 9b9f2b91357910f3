//=========================================================================
// Debug Services
//=========================================================================
//
// Debug surfaces that initialize asynchronously and render per tick.
//
// Components:
// - `lifecycle`: Shared init state machine and completion handle
// - `overlay`: Stats panel drawn on the UI layer
//
//=========================================================================

//=== Module Declarations =================================================

mod lifecycle;
mod overlay;

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Public API ==========================================================

pub use lifecycle::InitHandle;
pub use overlay::{DebugOverlay, FrameStats, OverlayLayout};

//=== DebugError ==========================================================

/// Debug service failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebugError {
    /// `render()` was called before initialization completed.
    #[error("debug service is not initialized")]
    NotInitialized,

    /// The drawing surface has no area.
    #[error("drawing surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// The initialization worker exited without reporting a result.
    #[error("initialization worker exited without completing")]
    WorkerLost,

    /// The initialization worker could not be started.
    #[error("failed to spawn initialization worker: {0}")]
    Spawn(String),
}

//=== DebugService ========================================================

/// A debug surface with asynchronous initialization.
///
/// `init()` starts initialization in the background and returns a handle
/// that completes when it has finished. Calling `init()` again while an
/// attempt is running, or after it succeeded, starts nothing new and
/// returns a handle to the same outcome. A failed attempt may be retried.
pub trait DebugService {
    /// Returns `true` once initialization has completed successfully.
    fn is_initialized(&self) -> bool;

    /// Begins initialization and returns its completion handle.
    fn init(&mut self) -> InitHandle;

    /// Draws the current frame.
    ///
    /// # Errors
    /// [`DebugError::NotInitialized`] until `init()` has completed successfully.
    fn render(&mut self) -> Result<(), DebugError>;
}

//=========================================================================
// Unit Tests
//=========================================================================
