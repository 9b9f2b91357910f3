//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the game loop.
//
// This module defines the contract between platform implementations and
// core logic, so the platform backend can be swapped without changing
// the loop.
//
// Components:
// - `interface`: Event types and error definitions (the contract)
// - `event_collector`: Loop-side event collection per tick
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_collector::{EventCollector, TickControl};
pub(crate) use interface::PlatformEvent;
pub use interface::PlatformError;
