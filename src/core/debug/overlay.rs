//=========================================================================
// Debug Overlay
//=========================================================================
//
// Stats panel drawn on the UI layer, implementing `DebugService`.
//
// Lifecycle:
//   new(canvas) → init() ──(worker thread: compute layout)──> Initialized
//                   │
//                   └─> InitHandle (wait / try_result)
//
// Per tick (driven by the game loop):
//   observe(FrameStats) → render() → Canvas[LayerType::Ui]
//
// `render()` refuses to draw until initialization has completed. It
// re-measures the canvas every call, so a resize that landed while the
// worker was still measuring never leaves a stale panel behind.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::lifecycle::{FinishGuard, InitHandle, Lifecycle, Phase};
use super::{DebugError, DebugService};
use crate::core::input::KeyCode;
use crate::core::math::{lerp, Lerp};
use crate::core::render::{CanvasHandle, Color, LayerType};
use crate::core::screen::ScreenType;

//=== FrameStats ==========================================================

/// Per-tick measurements fed to the overlay by the game loop.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    /// Tick number since the loop was first started.
    pub tick: u64,

    /// Wall time the tick took, excluding the pacing sleep.
    pub frame_time: Duration,

    /// Target tick duration (1 / TPS).
    pub budget: Duration,

    /// Keys held at the end of the tick, sorted.
    pub held_keys: Vec<KeyCode>,

    /// Current screen classification.
    pub screen: ScreenType,

    /// Events published on the bus this tick.
    pub event_count: usize,
}

//=== OverlayLayout =======================================================

/// Panel geometry derived from the surface size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub max_lines: usize,

    /// Surface size this layout was computed for.
    pub surface: (u32, u32),
}

impl OverlayLayout {
    const PADDING: f32 = 8.0;

    /// Computes the panel for a `width` × `height` surface.
    ///
    /// Fails on a zero-sized surface, where nothing can be drawn.
    pub fn for_surface(width: u32, height: u32) -> Result<Self, DebugError> {
        if width == 0 || height == 0 {
            return Err(DebugError::SurfaceUnavailable { width, height });
        }

        let (w, h) = (width as f32, height as f32);
        let font_size = (h / 48.0).clamp(10.0, 18.0);
        let line_height = font_size * 1.4;
        let usable_height = (h - 2.0 * Self::PADDING).max(line_height);
        let max_lines = ((usable_height - Self::PADDING) / line_height).floor().max(1.0) as usize;

        Ok(Self {
            x: Self::PADDING,
            y: Self::PADDING,
            width: (w * 0.35).clamp(160.0, 360.0).min(w - Self::PADDING).max(1.0),
            font_size,
            line_height,
            max_lines,
            surface: (width, height),
        })
    }
}

//=== DebugOverlay ========================================================

/// Debug stats panel.
pub struct DebugOverlay {
    canvas: CanvasHandle,
    lifecycle: Arc<Lifecycle>,
    layout: Arc<Mutex<Option<OverlayLayout>>>,
    visible: bool,
    stats: FrameStats,
    smoothed_fps: Option<f64>,
}

impl DebugOverlay {
    /// Weight of the newest sample in the FPS moving average.
    const FPS_SMOOTHING: f64 = 0.1;

    /// Creates an uninitialized, visible overlay drawing into `canvas`.
    pub fn new(canvas: CanvasHandle) -> Self {
        Self {
            canvas,
            lifecycle: Lifecycle::new(),
            layout: Arc::new(Mutex::new(None)),
            visible: true,
            stats: FrameStats::default(),
            smoothed_fps: None,
        }
    }

    //--- Visibility -------------------------------------------------------

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flips visibility and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        debug!(target: "debug", "Overlay {}", if self.visible { "shown" } else { "hidden" });
        self.visible
    }

    //--- Stats ------------------------------------------------------------

    /// Records the latest tick measurements.
    pub fn observe(&mut self, stats: FrameStats) {
        let secs = stats.frame_time.max(stats.budget).as_secs_f64();
        if secs > 0.0 {
            let sample = 1.0 / secs;
            self.smoothed_fps = Some(match self.smoothed_fps {
                Some(fps) => lerp(fps, sample, Self::FPS_SMOOTHING),
                None => sample,
            });
        }
        self.stats = stats;
    }

    /// Smoothed ticks-per-second estimate, once at least one tick was observed.
    pub fn fps(&self) -> Option<f64> {
        self.smoothed_fps
    }

    /// Most recently observed stats.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Current panel layout, once initialized.
    pub fn layout(&self) -> Option<OverlayLayout> {
        *self.layout.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Recomputes the layout after the surface changed size.
    ///
    /// Ignored until initialization has completed.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        if !self.is_initialized() {
            return;
        }
        let mut layout = self.layout.lock().unwrap_or_else(PoisonError::into_inner);
        match OverlayLayout::for_surface(width, height) {
            Ok(new_layout) => *layout = Some(new_layout),
            Err(e) => warn!(target: "debug", "Keeping previous overlay layout: {}", e),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    /// Current layout, recomputed first if the surface is no longer the
    /// size it was measured at. An unusable surface keeps the old layout.
    fn layout_for(&self, surface: (u32, u32)) -> Result<OverlayLayout, DebugError> {
        let mut slot = self.layout.lock().unwrap_or_else(PoisonError::into_inner);
        let current = slot.ok_or(DebugError::NotInitialized)?;
        if current.surface == surface {
            return Ok(current);
        }

        match OverlayLayout::for_surface(surface.0, surface.1) {
            Ok(fresh) => {
                debug!(target: "debug", "Overlay layout refreshed for {}x{} surface", surface.0, surface.1);
                *slot = Some(fresh);
                Ok(fresh)
            }
            Err(_) => Ok(current),
        }
    }

    /// Text lines for the current stats.
    fn lines(&self) -> Vec<String> {
        let stats = &self.stats;
        let keys = if stats.held_keys.is_empty() {
            "-".to_owned()
        } else {
            stats
                .held_keys
                .iter()
                .map(|k| k.code())
                .collect::<Vec<_>>()
                .join(" ")
        };

        vec![
            format!("tick {}", stats.tick),
            format!("tps {:.1}", self.smoothed_fps.unwrap_or(0.0)),
            format!(
                "frame {:.2} / {:.2} ms",
                stats.frame_time.as_secs_f64() * 1000.0,
                stats.budget.as_secs_f64() * 1000.0
            ),
            format!("screen {}", stats.screen),
            format!("events {}", stats.event_count),
            format!("keys {}", keys),
        ]
    }

    /// Green at idle, red at or over the tick budget.
    fn load_color(&self) -> Color {
        let budget = self.stats.budget.as_secs_f32();
        let load = if budget > 0.0 {
            (self.stats.frame_time.as_secs_f32() / budget).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Color::GREEN.lerp(&Color::RED, load)
    }
}

//--- Trait Implementations -----------------------------------------------

impl DebugService for DebugOverlay {
    fn is_initialized(&self) -> bool {
        self.lifecycle.phase() == Phase::Initialized
    }

    fn init(&mut self) -> InitHandle {
        let handle = self.lifecycle.handle();
        if !self.lifecycle.begin() {
            debug!(target: "debug", "Overlay init already requested");
            return handle;
        }

        let spawned = thread::Builder::new()
            .name("debug-overlay-init".into())
            .spawn(init_job(self.canvas.clone(), Arc::clone(&self.layout), Arc::clone(&self.lifecycle)));

        if let Err(e) = spawned {
            self.lifecycle.finish(Err(DebugError::Spawn(e.to_string())));
        }

        handle
    }

    fn render(&mut self) -> Result<(), DebugError> {
        if !self.is_initialized() {
            return Err(DebugError::NotInitialized);
        }
        if !self.visible {
            return Ok(());
        }
        let mut canvas = self.canvas.lock();
        let layout = self.layout_for(canvas.size())?;

        let lines = self.lines();
        let shown = lines.len().min(layout.max_lines);
        let accent = self.load_color();

        canvas.fill_rect(
            LayerType::Ui,
            layout.x,
            layout.y,
            layout.width,
            shown as f32 * layout.line_height + OverlayLayout::PADDING,
            Color::BLACK.with_alpha(0.6),
        );

        for (i, line) in lines.into_iter().take(shown).enumerate() {
            // The frame-time line carries the load color
            let color = if i == 2 { accent } else { Color::WHITE };
            canvas.draw_text(
                LayerType::Ui,
                layout.x + OverlayLayout::PADDING / 2.0,
                layout.y + OverlayLayout::PADDING / 2.0 + i as f32 * layout.line_height,
                layout.font_size,
                line,
                color,
            );
        }

        Ok(())
    }
}

//--- Init Worker ---------------------------------------------------------

/// Body of the init thread: measures the canvas and installs the layout.
///
/// The completion guard is created only once the job runs, so a job that
/// never starts leaves the outcome to the caller.
fn init_job(
    canvas: CanvasHandle,
    layout: Arc<Mutex<Option<OverlayLayout>>>,
    lifecycle: Arc<Lifecycle>,
) -> impl FnOnce() + Send + 'static {
    move || {
        let guard = FinishGuard::new(lifecycle);
        let (width, height) = canvas.size();
        let result = OverlayLayout::for_surface(width, height).map(|computed| {
            *layout.lock().unwrap_or_else(PoisonError::into_inner) = Some(computed);
        });
        match &result {
            Ok(()) => info!(target: "debug", "Overlay initialized for {}x{} surface", width, height),
            Err(e) => warn!(target: "debug", "Overlay initialization failed: {}", e),
        }
        guard.complete(result);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
