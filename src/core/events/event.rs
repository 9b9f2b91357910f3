//=========================================================================
// Game Events
//=========================================================================
//
// Typed envelope for everything the loop reports to game code.
//
// Each `GameEvent` variant carries exactly the payload its kind needs, so
// consumers match on the variant instead of casting an untyped payload.
// `EventType` is the bare tag, used to key the event bus queues.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::screen::ScreenType;

//=== EventType ===========================================================

/// Event kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    KeyDown,
    KeyUp,
    ScreenChanged,
    LoopStarted,
    LoopStopped,
    SurfaceResized,
    DebugToggled,
}

impl EventType {
    /// Every event kind.
    pub const ALL: [EventType; 7] = [
        EventType::KeyDown,
        EventType::KeyUp,
        EventType::ScreenChanged,
        EventType::LoopStarted,
        EventType::LoopStopped,
        EventType::SurfaceResized,
        EventType::DebugToggled,
    ];
}

//=== GameEvent ===========================================================

/// Event published on the [`EventBus`](super::EventBus) during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Key went from released to held this tick.
    KeyDown(KeyCode),

    /// Key went from held to released this tick.
    KeyUp(KeyCode),

    /// Current screen classification changed.
    ScreenChanged { from: ScreenType, to: ScreenType },

    /// First tick after the loop was started.
    LoopStarted,

    /// Published to the handler's `on_stop` hook when the loop stops.
    LoopStopped,

    /// Render surface changed size.
    SurfaceResized { width: u32, height: u32 },

    /// Debug overlay visibility changed.
    DebugToggled { visible: bool },
}

impl GameEvent {
    /// Returns the kind tag of this event.
    pub fn event_type(&self) -> EventType {
        match self {
            GameEvent::KeyDown(_) => EventType::KeyDown,
            GameEvent::KeyUp(_) => EventType::KeyUp,
            GameEvent::ScreenChanged { .. } => EventType::ScreenChanged,
            GameEvent::LoopStarted => EventType::LoopStarted,
            GameEvent::LoopStopped => EventType::LoopStopped,
            GameEvent::SurfaceResized { .. } => EventType::SurfaceResized,
            GameEvent::DebugToggled { .. } => EventType::DebugToggled,
        }
    }

    /// Returns the key for `KeyDown`/`KeyUp` events.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            GameEvent::KeyDown(key) | GameEvent::KeyUp(key) => Some(*key),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
