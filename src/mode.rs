//! Tangent modes of spline anchors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Policy governing how the two handles flanking an anchor move together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlPointMode {
    /// Handles move independently.
    #[default]
    Free,
    /// Handles stay collinear through the anchor, each keeps its own length.
    Aligned,
    /// Handles stay collinear through the anchor and equidistant from it.
    Mirrored,
}

impl ControlPointMode {
    pub const ALL: [ControlPointMode; 3] = [
        ControlPointMode::Free,
        ControlPointMode::Aligned,
        ControlPointMode::Mirrored,
    ];

    /// True if the mode constrains the opposite handle.
    pub fn is_constrained(self) -> bool {
        !matches!(self, ControlPointMode::Free)
    }
}

impl core::fmt::Display for ControlPointMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ControlPointMode::Free => "free",
            ControlPointMode::Aligned => "aligned",
            ControlPointMode::Mirrored => "mirrored",
        };
        f.write_str(name)
    }
}
