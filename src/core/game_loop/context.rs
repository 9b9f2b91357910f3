//=========================================================================
// Frame Context
//=========================================================================
//
// What game code sees during one tick.
//
//   Runtime ──borrows──> FrameContext ──> FrameHandler::update()
//      │                                      │
//      └──locks canvas──────────────────────> FrameHandler::render()
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::events::{EventBus, GameEvent};
use crate::core::input::Keyboard;
use crate::core::render::Canvas;
use crate::core::screen::ScreenType;

//=== FrameHandler ========================================================

/// Game code driven by the loop.
///
/// The handler moves onto the logic thread while the loop runs and is
/// handed back when it stops, so its state survives a restart.
pub trait FrameHandler: Send + 'static {
    /// Advances game state by one tick.
    fn update(&mut self, ctx: &mut FrameContext<'_>);

    /// Draws the current state. Both layers are cleared before this call.
    fn render(&mut self, canvas: &mut Canvas);

    /// Called on the logic thread before the first tick after `start()`.
    fn on_start(&mut self, _ctx: &mut FrameContext<'_>) {}

    /// Called on the logic thread after the last tick before `stop()`
    /// returns. The event bus holds a single `LoopStopped`.
    fn on_stop(&mut self, _ctx: &mut FrameContext<'_>) {}
}

//=== FrameContext ========================================================

/// Per-tick view of loop state.
pub struct FrameContext<'a> {
    tick: u64,
    delta: Duration,
    keyboard: &'a mut Keyboard,
    events: &'a mut EventBus,
    screen: &'a mut ScreenType,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(
        tick: u64,
        delta: Duration,
        keyboard: &'a mut Keyboard,
        events: &'a mut EventBus,
        screen: &'a mut ScreenType,
    ) -> Self {
        Self {
            tick,
            delta,
            keyboard,
            events,
            screen,
        }
    }

    //--- Timing -----------------------------------------------------------

    /// Tick number, counted from 1 across restarts.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Fixed timestep (1 / TPS).
    pub fn delta(&self) -> Duration {
        self.delta
    }

    //--- Input ------------------------------------------------------------

    pub fn keyboard(&self) -> &Keyboard {
        self.keyboard
    }

    /// Mutable keyboard access, e.g. to disable input during a cutscene.
    pub fn keyboard_mut(&mut self) -> &mut Keyboard {
        self.keyboard
    }

    //--- Events -----------------------------------------------------------

    /// Events published so far this tick.
    pub fn events(&self) -> &EventBus {
        self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        self.events
    }

    //--- Screen -----------------------------------------------------------

    pub fn screen(&self) -> ScreenType {
        *self.screen
    }

    /// Switches the current screen classification.
    ///
    /// Publishes `ScreenChanged` and returns `true` if the screen actually
    /// changed; setting the current screen again does nothing.
    pub fn set_screen(&mut self, to: ScreenType) -> bool {
        let from = *self.screen;
        if from == to {
            return false;
        }
        *self.screen = to;
        self.events.push(GameEvent::ScreenChanged { from, to });
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
