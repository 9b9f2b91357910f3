//=========================================================================
// Render Surface
//=========================================================================
//
// Layered display list the game loop draws into each tick.
//
// Components:
// - `layer`: `LayerType` tags (Scene, UI) and their draw order
// - `color`: RGBA color with interpolation
// - `canvas`: `Canvas` display list and the shared `CanvasHandle`
//
//=========================================================================

//=== Module Declarations =================================================

mod canvas;
mod color;
mod layer;

//=== Public API ==========================================================

pub use canvas::{Canvas, CanvasHandle, DrawCommand};
pub use color::Color;
pub use layer::{LayerParseError, LayerType};
