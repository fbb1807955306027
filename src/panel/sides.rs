//! Resize side masks

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Panel edges that can be grabbed for resizing.
    ///
    /// Corners are derived by combining two adjacent sides.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ResizeSides: u8 {
        const TOP    = 0b0001;
        const LEFT   = 0b0010;
        const RIGHT  = 0b0100;
        const BOTTOM = 0b1000;

        const TOP_LEFT     = Self::TOP.bits() | Self::LEFT.bits();
        const TOP_RIGHT    = Self::TOP.bits() | Self::RIGHT.bits();
        const BOTTOM_LEFT  = Self::BOTTOM.bits() | Self::LEFT.bits();
        const BOTTOM_RIGHT = Self::BOTTOM.bits() | Self::RIGHT.bits();
        const ALL          = Self::TOP.bits() | Self::LEFT.bits() | Self::RIGHT.bits() | Self::BOTTOM.bits();
    }
}

impl ResizeSides {
    /// Horizontal sign of a pointer delta for this combination:
    /// `1` grows with the pointer moving right, `-1` grows moving left.
    pub fn horizontal_sign(self) -> f32 {
        if self.contains(ResizeSides::RIGHT) {
            1.0
        } else if self.contains(ResizeSides::LEFT) {
            -1.0
        } else {
            0.0
        }
    }

    /// Vertical sign (y-down): `1` grows moving down, `-1` grows moving up
    pub fn vertical_sign(self) -> f32 {
        if self.contains(ResizeSides::BOTTOM) {
            1.0
        } else if self.contains(ResizeSides::TOP) {
            -1.0
        } else {
            0.0
        }
    }

    /// Short human name, used in logs and the simulator output
    pub fn describe(self) -> &'static str {
        match self {
            s if s == ResizeSides::TOP => "top",
            s if s == ResizeSides::LEFT => "left",
            s if s == ResizeSides::RIGHT => "right",
            s if s == ResizeSides::BOTTOM => "bottom",
            s if s == ResizeSides::TOP_LEFT => "top-left",
            s if s == ResizeSides::TOP_RIGHT => "top-right",
            s if s == ResizeSides::BOTTOM_LEFT => "bottom-left",
            s if s == ResizeSides::BOTTOM_RIGHT => "bottom-right",
            s if s.is_empty() => "none",
            _ => "mixed",
        }
    }
}
