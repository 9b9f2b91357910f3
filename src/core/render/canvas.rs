//=========================================================================
// Canvas
//=========================================================================
//
// Rendering surface exposed by the game loop.
//
// The canvas is a retained display list: one `Vec<DrawCommand>` per
// `LayerType`. The logic thread rebuilds it every tick; a presenter on
// another thread locks the shared handle and consumes the lists in
// `LayerType::ALL` order.
//
// Architecture:
//   GameLoop ──render()──> Canvas { layers[Scene], layers[Ui] }
//                             ↑
//   Presenter ──lock()── CanvasHandle (Arc<Mutex<Canvas>>)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

//=== Internal Dependencies ===============================================

use super::{Color, LayerType};

//=== DrawCommand =========================================================

/// A single primitive in a layer's display list.
///
/// Coordinates are in surface pixels, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled axis-aligned rectangle.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },

    /// Single line of text; `(x, y)` is the top-left of the line box.
    Text {
        x: f32,
        y: f32,
        size: f32,
        text: String,
        color: Color,
    },
}

//=== Canvas ==============================================================

/// Layered display list with a pixel size.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    layers: [Vec<DrawCommand>; 2],
}

impl Canvas {
    //--- Construction -----------------------------------------------------

    /// Creates an empty canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        const LAYER_BASE: usize = 64;
        Self {
            width,
            height,
            layers: [
                Vec::with_capacity(LAYER_BASE),
                Vec::with_capacity(LAYER_BASE),
            ],
        }
    }

    //--- Size -------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Updates the surface size. Existing commands are kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    //--- Drawing ----------------------------------------------------------

    /// Appends a command to the given layer.
    pub fn draw(&mut self, layer: LayerType, command: DrawCommand) {
        self.layers[layer.index()].push(command);
    }

    /// Shorthand for a filled rectangle.
    pub fn fill_rect(&mut self, layer: LayerType, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.draw(layer, DrawCommand::Rect { x, y, width, height, color });
    }

    /// Shorthand for a line of text.
    pub fn draw_text(&mut self, layer: LayerType, x: f32, y: f32, size: f32, text: impl Into<String>, color: Color) {
        self.draw(
            layer,
            DrawCommand::Text {
                x,
                y,
                size,
                text: text.into(),
                color,
            },
        );
    }

    //--- Queries ----------------------------------------------------------

    /// Returns the display list of one layer, in submission order.
    pub fn commands(&self, layer: LayerType) -> &[DrawCommand] {
        &self.layers[layer.index()]
    }

    /// Total number of commands across all layers.
    pub fn command_count(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    //--- Clearing ---------------------------------------------------------

    /// Empties one layer, keeping its allocation.
    pub fn clear_layer(&mut self, layer: LayerType) {
        self.layers[layer.index()].clear();
    }

    /// Empties every layer, keeping allocations.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear();
        }
    }
}

//=== CanvasHandle ========================================================

/// Shared, cloneable handle to a [`Canvas`].
///
/// This is the render-target handle returned by
/// [`GameLoopService::canvas`](crate::core::game_loop::GameLoopService::canvas).
/// A panic on another thread while the canvas is locked does not poison
/// it for everyone else: [`lock`](Self::lock) recovers the guard.
#[derive(Debug, Clone)]
pub struct CanvasHandle {
    inner: Arc<Mutex<Canvas>>,
}

impl CanvasHandle {
    /// Wraps a canvas in a new shared handle.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            inner: Arc::new(Mutex::new(canvas)),
        }
    }

    /// Locks the canvas for reading or drawing.
    pub fn lock(&self) -> MutexGuard<'_, Canvas> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current surface size.
    pub fn size(&self) -> (u32, u32) {
        self.lock().size()
    }

    /// Returns `true` if both handles point at the same canvas.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    //=====================================================================
    // Canvas Tests
    //=====================================================================

    #[test]
    fn new_canvas_is_empty() {
        let canvas = Canvas::new(800, 600);
        assert_eq!(canvas.size(), (800, 600));
        assert_eq!(canvas.command_count(), 0);
        for layer in LayerType::ALL {
            assert!(canvas.commands(layer).is_empty());
        }
    }

    #[test]
    fn layers_are_independent() {
        let mut canvas = Canvas::new(100, 100);
        canvas.fill_rect(LayerType::Scene, 0.0, 0.0, 10.0, 10.0, Color::RED);
        canvas.draw_text(LayerType::Ui, 4.0, 4.0, 12.0, "hp 100", Color::WHITE);
        canvas.draw_text(LayerType::Ui, 4.0, 20.0, 12.0, "ammo 7", Color::WHITE);

        assert_eq!(canvas.commands(LayerType::Scene).len(), 1);
        assert_eq!(canvas.commands(LayerType::Ui).len(), 2);
        assert_eq!(canvas.command_count(), 3);
    }

    #[test]
    fn commands_keep_submission_order() {
        let mut canvas = Canvas::new(100, 100);
        canvas.draw_text(LayerType::Ui, 0.0, 0.0, 10.0, "first", Color::WHITE);
        canvas.draw_text(LayerType::Ui, 0.0, 10.0, 10.0, "second", Color::WHITE);

        let texts: Vec<_> = canvas
            .commands(LayerType::Ui)
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, ["first", "second"]);
    }

    #[test]
    fn clear_layer_leaves_other_layer() {
        let mut canvas = Canvas::new(100, 100);
        canvas.fill_rect(LayerType::Scene, 0.0, 0.0, 1.0, 1.0, Color::RED);
        canvas.fill_rect(LayerType::Ui, 0.0, 0.0, 1.0, 1.0, Color::RED);

        canvas.clear_layer(LayerType::Ui);

        assert_eq!(canvas.commands(LayerType::Scene).len(), 1);
        assert!(canvas.commands(LayerType::Ui).is_empty());
    }

    #[test]
    fn clear_preserves_capacity() {
        let mut canvas = Canvas::new(100, 100);
        for i in 0..200 {
            canvas.fill_rect(LayerType::Scene, i as f32, 0.0, 1.0, 1.0, Color::BLUE);
        }
        let cap_before = canvas.layers[LayerType::Scene.index()].capacity();

        canvas.clear();

        assert_eq!(canvas.command_count(), 0);
        assert_eq!(canvas.layers[LayerType::Scene.index()].capacity(), cap_before);
    }

    #[test]
    fn resize_keeps_commands() {
        let mut canvas = Canvas::new(100, 100);
        canvas.fill_rect(LayerType::Scene, 0.0, 0.0, 1.0, 1.0, Color::RED);
        canvas.resize(1920, 1080);
        assert_eq!(canvas.size(), (1920, 1080));
        assert_eq!(canvas.command_count(), 1);
    }

    //=====================================================================
    // CanvasHandle Tests
    //=====================================================================

    #[test]
    fn handle_clones_share_canvas() {
        let a = CanvasHandle::new(Canvas::new(10, 10));
        let b = a.clone();
        a.lock().fill_rect(LayerType::Ui, 0.0, 0.0, 1.0, 1.0, Color::GREEN);

        assert!(a.ptr_eq(&b));
        assert_eq!(b.lock().command_count(), 1);
    }

    #[test]
    fn handle_usable_across_threads() {
        let handle = CanvasHandle::new(Canvas::new(10, 10));
        let remote = handle.clone();

        thread::spawn(move || remote.lock().resize(640, 480))
            .join()
            .unwrap();

        assert_eq!(handle.size(), (640, 480));
    }

    #[test]
    fn handle_recovers_from_poisoned_lock() {
        let handle = CanvasHandle::new(Canvas::new(10, 10));
        let remote = handle.clone();

        let result = thread::spawn(move || {
            let _guard = remote.lock();
            panic!("drawing failed");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(handle.size(), (10, 10));
    }
}
