#![forbid(unsafe_code)]

//! Live geometry measurement.
//!
//! The engine never reads a rendering surface directly. Hosts implement
//! [`Measurer`] over whatever they render into (DOM nodes, a retained scene,
//! a test fixture) and hand it to operations that need live sizes, such as
//! drag start and collapse.

use crate::geometry::Orientation;

/// Reads the live pixel extent of the container and of rendered panels.
///
/// `None` means "not measurable right now" (for example, not yet mounted).
/// Operations that receive `None` are skipped rather than propagating
/// garbage into the layout.
pub trait Measurer {
    /// Extent of the whole splitter container along `orientation`.
    fn container_extent(&self, orientation: Orientation) -> Option<f64>;

    /// Extent of panel `index` along `orientation`.
    fn panel_extent(&self, index: usize, orientation: Orientation) -> Option<f64>;
}

impl<M: Measurer + ?Sized> Measurer for &M {
    fn container_extent(&self, orientation: Orientation) -> Option<f64> {
        (**self).container_extent(orientation)
    }

    fn panel_extent(&self, index: usize, orientation: Orientation) -> Option<f64> {
        (**self).panel_extent(index, orientation)
    }
}

/// Filter a raw measurement down to a usable extent.
///
/// Rejects non-finite and negative readings.
#[inline]
#[must_use]
pub fn usable_extent(raw: Option<f64>) -> Option<f64> {
    raw.filter(|value| value.is_finite() && *value >= 0.0)
}

/// Fixed measurements, independent of orientation.
///
/// Useful for headless hosts and tests where the "rendered" geometry is
/// exactly what the layout engine last produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticMeasurer {
    container: Option<f64>,
    panels: Vec<f64>,
}

impl StaticMeasurer {
    /// A mounted container with the given panel extents.
    #[must_use]
    pub fn new(container: f64, panels: impl Into<Vec<f64>>) -> Self {
        Self {
            container: Some(container),
            panels: panels.into(),
        }
    }

    /// Nothing is mounted; every measurement is unavailable.
    #[must_use]
    pub fn unmounted() -> Self {
        Self::default()
    }
}

impl Measurer for StaticMeasurer {
    fn container_extent(&self, _orientation: Orientation) -> Option<f64> {
        usable_extent(self.container)
    }

    fn panel_extent(&self, index: usize, _orientation: Orientation) -> Option<f64> {
        self.container?;
        usable_extent(self.panels.get(index).copied())
    }
}
