//=========================================================================
// Input System
//=========================================================================
//
// Keyboard input from platform events to queryable state.
//
// Architecture:
//   Platform → InputEvent → Keyboard → GameEvent::KeyDown / KeyUp
//                              ↓
//                      GameKeyboard queries
//
// Components:
// - `event`: Portable key identifiers, modifiers and raw input events
// - `keyboard`: Held-key tracking and per-frame deltas
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;
mod keyboard;

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Public API ==========================================================

pub use event::{InputEvent, KeyCode, KeyCodeParseError, Modifiers};
pub use keyboard::Keyboard;

//=== GameKeyboard Trait ==================================================

/// Keyboard-state provider.
///
/// Game code depends on this trait rather than on a concrete keyboard, so
/// tests and alternative input backends can stand in for [`Keyboard`].
pub trait GameKeyboard {
    /// Returns the keys held at the time of the call.
    ///
    /// The set is a copy: later input does not change it.
    fn pressed_keys(&self) -> HashSet<KeyCode>;

    /// Turns key reporting on or off.
    ///
    /// Disabling forgets every held key; input is ignored until the
    /// provider is enabled again.
    fn set_enabled(&mut self, enabled: bool);

    /// Returns whether the provider currently reports input.
    fn is_enabled(&self) -> bool;
}
