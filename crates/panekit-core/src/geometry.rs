#![forbid(unsafe_code)]

//! Axis primitives.

use serde::{Deserialize, Serialize};

/// The axis along which panels are laid out.
///
/// Horizontal splitters place panels left to right and are resized by
/// horizontal pointer motion; vertical splitters stack panels top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Left to right; widths are authoritative.
    #[default]
    Horizontal,
    /// Top to bottom; heights are authoritative.
    Vertical,
}

impl Orientation {
    /// Whether this is the horizontal axis.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Pick the component of a `(width, height)` pair that lies on this axis.
    #[inline]
    #[must_use]
    pub const fn pick(self, width: f64, height: f64) -> f64 {
        match self {
            Self::Horizontal => width,
            Self::Vertical => height,
        }
    }
}

/// Pointer coordinate in host (client) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along the given axis.
    #[inline]
    #[must_use]
    pub const fn along(self, orientation: Orientation) -> f64 {
        orientation.pick(self.x, self.y)
    }
}
