//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit keyboard events into engine `InputEvent`s.
//
// Architecture:
//   WindowEvent::KeyboardInput → InputProcessor → InputEvent → InputBuffer
//
// Stateful modifier tracking: caches modifier state from ModifiersChanged
// and stamps it on every subsequent key event. OS auto-repeat and keys
// without an engine code (F13-F24, numpad, media keys) are filtered.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode, Modifiers};

//=== InputProcessor ======================================================

/// Converts winit key events with stateful modifier tracking.
pub(crate) struct InputProcessor {
    current_modifiers: Modifiers,
}

impl InputProcessor {
    pub(crate) fn new() -> Self {
        Self {
            current_modifiers: Modifiers::NONE,
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a winit `KeyEvent`.
    ///
    /// Returns `None` for auto-repeat and for keys with no engine code.
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }
        self.process_physical_key(key_event.physical_key, key_event.state)
    }

    /// Converts a physical key transition.
    pub(crate) fn process_physical_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
    ) -> Option<InputEvent> {
        let key = match physical_key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => return None,
        };

        if key == KeyCode::Unidentified {
            return None;
        }

        Some(self.create_key_input_event(key, state))
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyDown {
                key,
                modifiers: self.current_modifiers,
            },
            ElementState::Released => InputEvent::KeyUp {
                key,
                modifiers: self.current_modifiers,
            },
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

/// Maps physical key positions to engine codes.
///
/// Both sides use DOM `code` names, so every engine key maps to the winit
/// variant of the same name. Anything else is `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------
            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------
            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------
            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Function Row -------------------------------------------------
            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,

            //--- Special ------------------------------------------------------
            Space => KeyCode::Space,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,
            Backquote => KeyCode::Backquote,

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift {
            state.insert(ModifiersState::SHIFT);
        }
        if ctrl {
            state.insert(ModifiersState::CONTROL);
        }
        if alt {
            state.insert(ModifiersState::ALT);
        }
        state
    }

    //=====================================================================
    // Modifier Tests
    //=====================================================================

    #[test]
    fn starts_with_no_modifiers() {
        let processor = InputProcessor::new();
        assert!(processor.current_modifiers().is_empty());
    }

    #[test]
    fn update_modifiers_works() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, true));

        let mods = processor.current_modifiers();
        assert!(mods.shift && !mods.ctrl && mods.alt);
    }

    #[test]
    fn modifiers_persist_across_events() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(true, false, false));

        let first = processor.create_key_input_event(KeyCode::KeyA, ElementState::Pressed);
        let second = processor.create_key_input_event(KeyCode::Space, ElementState::Released);

        assert_eq!(first, InputEvent::KeyDown { key: KeyCode::KeyA, modifiers: Modifiers::SHIFT });
        assert_eq!(second, InputEvent::KeyUp { key: KeyCode::Space, modifiers: Modifiers::SHIFT });
    }

    //=====================================================================
    // Key Event Tests
    //=====================================================================

    #[test]
    fn physical_key_press_and_release() {
        let mut processor = InputProcessor::new();
        processor.update_modifiers(make_modifiers(false, true, false));

        let down = processor.process_physical_key(
            PhysicalKey::Code(WinitKeyCode::KeyS),
            ElementState::Pressed,
        );
        let up = processor.process_physical_key(
            PhysicalKey::Code(WinitKeyCode::KeyS),
            ElementState::Released,
        );

        assert_eq!(down, Some(InputEvent::KeyDown { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }));
        assert_eq!(up, Some(InputEvent::KeyUp { key: KeyCode::KeyS, modifiers: Modifiers::CTRL }));
    }

    #[test]
    fn unmapped_keys_are_filtered() {
        let processor = InputProcessor::new();

        let f13 = processor.process_physical_key(
            PhysicalKey::Code(WinitKeyCode::F13),
            ElementState::Pressed,
        );
        let native = processor.process_physical_key(
            PhysicalKey::Unidentified(NativeKeyCode::Unidentified),
            ElementState::Pressed,
        );

        assert_eq!(f13, None);
        assert_eq!(native, None);
    }

    //=====================================================================
    // Conversion Tests
    //=====================================================================

    #[test]
    fn keycode_conversion_alphabetic() {
        assert_eq!(KeyCode::from(WinitKeyCode::KeyA), KeyCode::KeyA);
        assert_eq!(KeyCode::from(WinitKeyCode::KeyZ), KeyCode::KeyZ);
    }

    #[test]
    fn keycode_conversion_function_row_and_backquote() {
        assert_eq!(KeyCode::from(WinitKeyCode::F1), KeyCode::F1);
        assert_eq!(KeyCode::from(WinitKeyCode::F3), KeyCode::F3);
        assert_eq!(KeyCode::from(WinitKeyCode::F12), KeyCode::F12);
        assert_eq!(KeyCode::from(WinitKeyCode::Backquote), KeyCode::Backquote);
    }

    #[test]
    fn keycode_conversion_filters_unidentified() {
        assert_eq!(KeyCode::from(WinitKeyCode::F13), KeyCode::Unidentified);
        assert_eq!(KeyCode::from(WinitKeyCode::Numpad0), KeyCode::Unidentified);
    }

    #[test]
    fn every_engine_key_has_a_winit_source() {
        // Engine codes share DOM names with winit's Debug output
        for key in KeyCode::ALL {
            let mapped = WINIT_KEYS
                .iter()
                .any(|&w| KeyCode::from(w) == *key && format!("{:?}", w) == key.code());
            assert!(mapped, "{} has no winit mapping", key);
        }
    }

    const WINIT_KEYS: &[WinitKeyCode] = {
        use WinitKeyCode::*;
        &[
            Digit0, Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9,
            KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
            KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
            ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
            F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
            Space, Enter, Escape, Tab, Backspace, Delete, Backquote,
        ]
    };

    #[test]
    fn modifiers_from_winit_state() {
        assert_eq!(Modifiers::from(ModifiersState::empty()), Modifiers::NONE);
        assert_eq!(Modifiers::from(make_modifiers(true, true, true)), Modifiers::ALL);
    }
}
