#![forbid(unsafe_code)]

//! Declarative panel configuration and bound resolution.
//!
//! Panels carry no identity beyond their position in the sequence. A panel
//! set is supplied by the host on every render and may be replaced wholesale.

use panekit_core::{SizeUnit, SizeValue};
use serde::{Deserialize, Serialize};

/// Which sides of a panel may be collapsed from an adjacent resizer.
///
/// `start` is the side facing the previous panel (the resizer before this
/// panel); `end` faces the next panel. In configuration files a bare `true`
/// means both sides and `false` means neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawCollapsible")]
pub struct Collapsible {
    pub start: bool,
    pub end: bool,
}

impl Collapsible {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            start: false,
            end: false,
        }
    }

    #[must_use]
    pub const fn both() -> Self {
        Self {
            start: true,
            end: true,
        }
    }

    #[must_use]
    pub const fn start_only() -> Self {
        Self {
            start: true,
            end: false,
        }
    }

    #[must_use]
    pub const fn end_only() -> Self {
        Self {
            start: false,
            end: true,
        }
    }

    /// Whether any side is collapsible.
    #[must_use]
    pub const fn any(self) -> bool {
        self.start || self.end
    }
}

impl From<bool> for Collapsible {
    fn from(flag: bool) -> Self {
        if flag { Self::both() } else { Self::none() }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCollapsible {
    Flag(bool),
    Sides {
        #[serde(default)]
        start: bool,
        #[serde(default)]
        end: bool,
    },
}

impl From<RawCollapsible> for Collapsible {
    fn from(raw: RawCollapsible) -> Self {
        match raw {
            RawCollapsible::Flag(flag) => flag.into(),
            RawCollapsible::Sides { start, end } => Self { start, end },
        }
    }
}

/// One panel of a splitter.
///
/// `size` is the controlled value: when the host changes it between renders
/// the engine adopts it. `default_size` only seeds the initial layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Panel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_size: Option<SizeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<SizeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<SizeValue>,
    pub resizable: bool,
    pub collapsible: Collapsible,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            size: None,
            default_size: None,
            min: None,
            max: None,
            resizable: true,
            collapsible: Collapsible::none(),
        }
    }
}

impl Panel {
    /// A resizable, non-collapsible panel with no declared sizes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the controlled size.
    #[must_use]
    pub fn size(mut self, size: impl Into<SizeValue>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// Set the initial (uncontrolled) size.
    #[must_use]
    pub fn default_size(mut self, size: impl Into<SizeValue>) -> Self {
        self.default_size = Some(size.into());
        self
    }

    #[must_use]
    pub fn min(mut self, min: impl Into<SizeValue>) -> Self {
        self.min = Some(min.into());
        self
    }

    #[must_use]
    pub fn max(mut self, max: impl Into<SizeValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    #[must_use]
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    #[must_use]
    pub fn collapsible(mut self, collapsible: impl Into<Collapsible>) -> Self {
        self.collapsible = collapsible.into();
        self
    }

    /// The size the panel was declared with, controlled first.
    #[must_use]
    pub fn declared_size(&self) -> Option<SizeValue> {
        self.size.or(self.default_size)
    }

    /// Unit used when reporting this panel's size to the host.
    ///
    /// Panels declared in percent report percentages; everything else,
    /// including undeclared panels, reports pixels.
    #[must_use]
    pub fn reporting_unit(&self) -> SizeUnit {
        self.declared_size()
            .map_or(SizeUnit::Pixels, |size| size.unit)
    }

    /// Resolve `min`/`max` against the container extent.
    ///
    /// An absent `min` is `0`; an absent `max` is the whole container extent.
    #[must_use]
    pub fn bounds(&self, extent: f64) -> PanelBounds {
        let min = self.min.map_or(0.0, |min| min.to_pixels(extent));
        let max = self.max.map_or(extent.max(0.0), |max| max.to_pixels(extent));
        PanelBounds { min, max }
    }
}

/// Resolved pixel bounds for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelBounds {
    pub min: f64,
    pub max: f64,
}

impl PanelBounds {
    /// Bounds of a collapsed panel: it cannot move off zero.
    pub const PINNED: Self = Self { min: 0.0, max: 0.0 };

    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// No limit other than staying non-negative.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    /// Clamp a candidate size. When `min > max`, `min` wins.
    #[inline]
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        self.min.max(self.max.min(value))
    }

    /// Whether `value` lies within the bounds (with float slack).
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min - 1e-9 && value <= self.max + 1e-9
    }
}
