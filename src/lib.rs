//=========================================================================
// Lumen Engine - Library Root
//=========================================================================
//
// Public API surface of the Lumen Engine: a small game-client runtime
// with keyboard state, a fixed-rate game loop, typed game events, a
// layered canvas and an asynchronously initialized debug overlay.
//
// Typical usage:
// ```no_run
// use lumen_engine::prelude::*;
//
// struct Game;
//
// impl FrameHandler for Game {
//     fn update(&mut self, _ctx: &mut FrameContext<'_>) {}
//     fn render(&mut self, _canvas: &mut Canvas) {}
// }
//
// fn main() -> Result<(), EngineError> {
//     EngineBuilder::new().build(Game).run()
// }
// ```
//
//=========================================================================

//=== Module Declarations =================================================

/// Engine systems (input, events, game loop, rendering, debug).
pub mod core;
pub mod prelude;

mod engine;
mod platform;

//=== Public API ==========================================================

pub use engine::{Engine, EngineBuilder, EngineError};
pub use platform::WindowConfig;
