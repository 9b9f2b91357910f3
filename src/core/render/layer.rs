//=========================================================================
// Layer Types
//=========================================================================
//
// Closed set of render layers. Each layer owns one display list on the
// canvas; layers are composited in `LayerType::ALL` order.
//
//   Scene  (bottom)  world geometry, sprites
//   UI     (top)     HUD, menus, debug overlay
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

//=== LayerType ===========================================================

/// Render layer tag.
///
/// The string forms are fixed: `"UI"` and `"Scene"`. No other tag exists
/// and none can be registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// Interface layer, drawn above the scene.
    Ui,

    /// World layer, drawn first.
    Scene,
}

impl LayerType {
    /// Every layer, in draw order (bottom first).
    pub const ALL: [LayerType; 2] = [LayerType::Scene, LayerType::Ui];

    /// Returns the literal tag for this layer.
    pub const fn as_str(self) -> &'static str {
        match self {
            LayerType::Ui => "UI",
            LayerType::Scene => "Scene",
        }
    }

    /// Position in draw order, used to index per-layer storage.
    pub(crate) const fn index(self) -> usize {
        match self {
            LayerType::Scene => 0,
            LayerType::Ui => 1,
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the exact tag. Matching is case-sensitive.
impl FromStr for LayerType {
    type Err = LayerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UI" => Ok(LayerType::Ui),
            "Scene" => Ok(LayerType::Scene),
            other => Err(LayerParseError(other.to_owned())),
        }
    }
}

//=== LayerParseError =====================================================

/// Returned when a string is not one of the layer tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown layer tag {0:?} (expected \"UI\" or \"Scene\")")]
pub struct LayerParseError(pub String);

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_have_fixed_literals() {
        assert_eq!(LayerType::Ui.as_str(), "UI");
        assert_eq!(LayerType::Scene.as_str(), "Scene");
    }

    #[test]
    fn exactly_two_layers_in_draw_order() {
        assert_eq!(LayerType::ALL.len(), 2);
        assert_eq!(LayerType::ALL, [LayerType::Scene, LayerType::Ui]);
        for (i, layer) in LayerType::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
        }
    }

    #[test]
    fn parse_round_trips_display() {
        for layer in LayerType::ALL {
            assert_eq!(layer.to_string().parse::<LayerType>(), Ok(layer));
        }
    }

    #[test]
    fn parse_rejects_other_strings() {
        for bad in ["ui", "scene", "Hud", "", "UI "] {
            let err = bad.parse::<LayerType>().unwrap_err();
            assert_eq!(err, LayerParseError(bad.to_owned()));
        }
    }

    #[test]
    fn parse_error_names_the_tag() {
        let err = "Overlay".parse::<LayerType>().unwrap_err();
        assert!(err.to_string().contains("\"Overlay\""));
    }
}
