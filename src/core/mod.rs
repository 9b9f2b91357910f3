//=========================================================================
// Core Systems
//=========================================================================
//
// Platform-independent engine systems running on the logic thread.
//
// Architecture:
//   platform_bridge ──> game_loop ──> input (Keyboard)
//                           │    ├──> events (EventBus)
//                           │    ├──> FrameHandler (game code)
//                           │    └──> debug (DebugOverlay)
//                           ↓
//                   render (CanvasHandle)
//
// Components:
// - `math`: Linear interpolation
// - `render`: Layered canvas, colors and `LayerType`
// - `screen`: `ScreenType` classification tags
// - `input`: Keyboard state provider
// - `events`: Typed game events and the per-tick bus
// - `game_loop`: Fixed-rate loop service
// - `debug`: Asynchronously initialized debug overlay
// - `platform_bridge`: Contract with the platform layer (crate-private)
//
//=========================================================================

//=== Module Declarations =================================================

pub mod debug;
pub mod events;
pub mod game_loop;
pub mod input;
pub mod math;
pub mod render;
pub mod screen;

pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use platform_bridge::PlatformError;
