//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use lumen_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine entry point
pub use crate::engine::{Engine, EngineBuilder, EngineError};

// Game loop
pub use crate::core::game_loop::{FrameContext, FrameHandler, GameLoop, GameLoopService, LoopConfig, LoopError};

// Input
pub use crate::core::input::{GameKeyboard, KeyCode, Keyboard, Modifiers};

// Events
pub use crate::core::events::{EventBus, EventType, GameEvent};

// Rendering and screens
pub use crate::core::render::{Canvas, CanvasHandle, Color, LayerType};
pub use crate::core::screen::ScreenType;

// Debug
pub use crate::core::debug::{DebugError, DebugOverlay, DebugService, InitHandle};

// Math
pub use crate::core::math::{lerp, Lerp};
