//=========================================================================
// Keyboard
//=========================================================================
//
// Keyboard state provider with per-frame delta tracking.
//
// Architecture:
//   InputEvent → process_event() → HashSet (keys held) → query
//                      ↓
//               Option<GameEvent> (only on real transitions)
//
// Frame lifecycle: begin_frame() → process_event()* → query
//
// While disabled, the keyboard reports nothing: held keys are dropped on
// disable and incoming events are ignored until re-enabled.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode, Modifiers};
use super::GameKeyboard;
use crate::core::events::GameEvent;

//=== Keyboard ============================================================

/// Tracks held keys (persistent) and pressed/released keys (per frame).
pub struct Keyboard {
    //--- Persistent State (survives frame boundary) ----------------------
    keys_down: HashSet<KeyCode>,
    modifiers: Modifiers,
    enabled: bool,

    //--- Frame Deltas (reset each frame via begin_frame()) ----------------
    keys_pressed_this_frame: HashSet<KeyCode>,
    keys_released_this_frame: HashSet<KeyCode>,
}

impl Keyboard {
    /// Creates an enabled keyboard with no keys held.
    pub fn new() -> Self {
        Self {
            keys_down: HashSet::new(),
            modifiers: Modifiers::NONE,
            enabled: true,
            keys_pressed_this_frame: HashSet::new(),
            keys_released_this_frame: HashSet::new(),
        }
    }

    //--- Frame Processing -------------------------------------------------

    /// Clears frame-specific deltas (pressed/released sets).
    pub fn begin_frame(&mut self) {
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
    }

    /// Applies one input event.
    ///
    /// Returns the game event for an actual transition: `KeyDown` only on
    /// released → held, `KeyUp` only on held → released. Auto-repeat and
    /// stray releases return `None`, as does everything while disabled.
    pub fn process_event(&mut self, event: &InputEvent) -> Option<GameEvent> {
        if !self.enabled {
            return None;
        }

        match *event {
            InputEvent::KeyDown { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.insert(key) {
                    self.keys_pressed_this_frame.insert(key);
                    Some(GameEvent::KeyDown(key))
                } else {
                    None
                }
            }

            InputEvent::KeyUp { key, modifiers } => {
                self.modifiers = modifiers;
                if self.keys_down.remove(&key) {
                    self.keys_released_this_frame.insert(key);
                    Some(GameEvent::KeyUp(key))
                } else {
                    None
                }
            }

            InputEvent::Unidentified => None,
        }
    }

    /// Applies a batch of events, returning the resulting transitions in order.
    pub fn process_events(&mut self, events: &[InputEvent]) -> Vec<GameEvent> {
        events.iter().filter_map(|e| self.process_event(e)).collect()
    }

    //=====================================================================
    // Query API - Keys
    //=====================================================================

    /// Returns `true` if key transitioned UP → DOWN this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed_this_frame.contains(&key)
    }

    /// Returns `true` while key is held.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Returns `true` if key transitioned DOWN → UP this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released_this_frame.contains(&key)
    }

    /// Iterates over keys currently held, without copying.
    pub fn keys_down(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys_down.iter()
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.keys_down.len()
    }

    //=====================================================================
    // Query API - Modifiers
    //=====================================================================

    /// Modifier state reported with the most recent key event.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn shift_held(&self) -> bool {
        self.modifiers.shift
    }

    pub fn ctrl_held(&self) -> bool {
        self.modifiers.ctrl
    }

    pub fn alt_held(&self) -> bool {
        self.modifiers.alt
    }

    //--- Internal Helpers -------------------------------------------------

    fn reset(&mut self) {
        self.keys_down.clear();
        self.keys_pressed_this_frame.clear();
        self.keys_released_this_frame.clear();
        self.modifiers = Modifiers::NONE;
    }
}

//--- Trait Implementations -----------------------------------------------

impl GameKeyboard for Keyboard {
    fn pressed_keys(&self) -> HashSet<KeyCode> {
        self.keys_down.clone()
    }

    fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        if !enabled {
            self.reset();
        }
        self.enabled = enabled;
        debug!(target: "input", "Keyboard {}", if enabled { "enabled" } else { "disabled" });
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
