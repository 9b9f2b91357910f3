//=========================================================================
// Input Event Types
//
// Defines the engine's representation of low-level keyboard input.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// portable format consumed by the keyboard state provider.
//
// Responsibilities:
// - Identify physical keys in a stable, portable way (`KeyCode`)
// - Give every key a string identifier for logging and configuration
// - Carry modifier state (Shift, Ctrl, Alt) with each key transition
// - Provide equality and hashing semantics for deduplication
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    InputEvent (this module)
//         ↓
//    Keyboard (tracks held keys)
//         ↓
//    GameEvent::KeyDown / KeyUp
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//=== KeyCode =============================================================

macro_rules! key_codes {
    ($( $(#[$doc:meta])* $variant:ident ),+ $(,)?) => {
        /// Physical keyboard key identifier.
        ///
        /// Represents the physical key location, not the character produced.
        /// `KeyA` is always the same physical key regardless of keyboard
        /// layout (QWERTY vs AZERTY).
        ///
        /// Each key has a string identifier ([`KeyCode::code`]) matching the
        /// variant name, which follows the DOM `KeyboardEvent.code`
        /// convention (`"KeyA"`, `"Digit1"`, `"ArrowUp"`, `"F3"`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum KeyCode {
            $( $(#[$doc])* $variant, )+

            /// Fallback for keys not explicitly mapped by the input layer.
            ///
            /// The platform layer filters these before they reach the
            /// keyboard, so they never appear in a pressed-key set.
            Unidentified,
        }

        impl KeyCode {
            /// Every mapped key, in declaration order (excludes `Unidentified`).
            pub const ALL: &'static [KeyCode] = &[ $( KeyCode::$variant, )+ ];

            /// Returns the string identifier for this key.
            pub const fn code(self) -> &'static str {
                match self {
                    $( KeyCode::$variant => stringify!($variant), )+
                    KeyCode::Unidentified => "Unidentified",
                }
            }
        }

        impl FromStr for KeyCode {
            type Err = KeyCodeParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( stringify!($variant) => Ok(KeyCode::$variant), )+
                    other => Err(KeyCodeParseError(other.to_owned())),
                }
            }
        }
    };
}

key_codes! {
    //--- Numeric Keys -----------------------------------------------------
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------
    ArrowDown, ArrowLeft, ArrowRight, ArrowUp,

    //--- Function Keys ----------------------------------------------------
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    //--- Special Keys -----------------------------------------------------
    /// Spacebar
    Space,
    /// Return/Enter key
    Enter,
    /// Escape key
    Escape,
    Tab,
    Backspace,
    Delete,
    /// Backtick / tilde key, commonly bound to consoles
    Backquote,
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string is not a known key identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown key identifier {0:?}")]
pub struct KeyCodeParseError(pub String);

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// # Platform Mapping
///
/// - **Shift**: Left Shift OR Right Shift
/// - **Ctrl**: Left Ctrl OR Right Ctrl (Command on macOS)
/// - **Alt**: Left Alt OR Right Alt (Option on macOS)
///
/// The system does not distinguish between left/right variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Shift key held (either left or right).
    pub shift: bool,

    /// Ctrl key held (either left or right, Command on macOS).
    pub ctrl: bool,

    /// Alt key held (either left or right, Option on macOS).
    pub alt: bool,
}

//--- Modifier Constants --------------------------------------------------

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };

    /// Shift + Ctrl + Alt.
    pub const ALL: Self = Self { shift: true, ctrl: true, alt: true };

    /// Returns `true` if no modifier is held.
    pub const fn is_empty(self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

//=== InputEvent ==========================================================

/// Low-level keyboard event from the platform layer.
///
/// # Equality & Hashing Semantics
///
/// Derived: events compare by type + key + modifier state.
///
/// ```text
/// KeyDown{A, CTRL} == KeyDown{A, CTRL}       ✓
/// KeyDown{A, CTRL} == KeyDown{A, SHIFT}      ✗ (different mods)
/// KeyDown{A}       == KeyUp{A}               ✗ (different type)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputEvent {
    /// Key pressed down (OS auto-repeat included).
    KeyDown {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Unrecognized or unsupported event. Ignored by the keyboard.
    Unidentified,
}

impl InputEvent {
    /// Returns the key this event refers to, if any.
    pub fn key(&self) -> Option<KeyCode> {
        match self {
            Self::KeyDown { key, .. } | Self::KeyUp { key, .. } => Some(*key),
            Self::Unidentified => None,
        }
    }

    /// Returns a new event with updated modifiers.
    ///
    /// Has no effect on `Unidentified`.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        match &mut self {
            Self::KeyDown { modifiers: m, .. } | Self::KeyUp { modifiers: m, .. } => {
                *m = modifiers;
            }
            Self::Unidentified => {}
        }
        self
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
