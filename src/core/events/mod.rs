//=========================================================================
// Game Events
//=========================================================================
//
// Typed event envelope and the frame-scoped bus that carries it.
//
// Components:
// - `event`: `EventType` tags and the `GameEvent` sum type
// - `event_bus`: per-kind queues cleared at every tick boundary
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
mod event_bus;

//=== Public API ==========================================================

pub use event::{EventType, GameEvent};
pub use event_bus::EventBus;
