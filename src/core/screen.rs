//=========================================================================
// Screen Types
//=========================================================================
//
// Numeric tags classifying what the client is currently showing.
//
// `Unknown` (0) is the sentinel for "not classified yet"; every screen
// state starts there until game code sets a real screen.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

use thiserror::Error;

//=== ScreenType ==========================================================

/// Screen classification tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ScreenType {
    /// No screen classified yet.
    #[default]
    Unknown = 0,

    /// In-world gameplay screen.
    World = 1,
}

impl ScreenType {
    /// Returns the numeric tag.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns `true` for any screen other than the `Unknown` sentinel.
    pub const fn is_classified(self) -> bool {
        !matches!(self, ScreenType::Unknown)
    }
}

//--- Trait Implementations -----------------------------------------------

impl From<ScreenType> for u8 {
    fn from(screen: ScreenType) -> Self {
        screen.as_u8()
    }
}

impl TryFrom<u8> for ScreenType {
    type Error = ScreenTypeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScreenType::Unknown),
            1 => Ok(ScreenType::World),
            other => Err(ScreenTypeError(other)),
        }
    }
}

impl fmt::Display for ScreenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenType::Unknown => f.write_str("Unknown"),
            ScreenType::World => f.write_str("World"),
        }
    }
}

//=== ScreenTypeError =====================================================

/// Returned when a number is not a screen tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown screen tag {0} (expected 0 or 1)")]
pub struct ScreenTypeError(pub u8);

//=========================================================================
// Unit Tests
//=========================================================================
