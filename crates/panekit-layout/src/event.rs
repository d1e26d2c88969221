#![forbid(unsafe_code)]

//! Notifications emitted to the host.

use std::fmt;

use panekit_core::{SizeUnit, format_magnitude};
use serde::{Serialize, Serializer};

/// One panel size as reported to the host, in the panel's declared unit.
///
/// Pixel panels serialize as bare numbers, percentage panels as strings such
/// as `"35%"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportedSize {
    Pixels(f64),
    Percent(f64),
}

impl ReportedSize {
    /// Convert a canonical pixel size to the reporting unit.
    ///
    /// Percentages are rounded to two decimals. A zero or unmeasured extent
    /// reports `0%`.
    #[must_use]
    pub fn from_pixels(px: f64, extent: f64, unit: SizeUnit) -> Self {
        match unit {
            SizeUnit::Pixels => Self::Pixels(px),
            SizeUnit::Percent if extent > 0.0 && extent.is_finite() => {
                Self::Percent((px * 100.0 / extent * 100.0).round() / 100.0)
            }
            SizeUnit::Percent => Self::Percent(0.0),
        }
    }

    /// Pixel value, if this is a pixel report.
    #[must_use]
    pub const fn as_pixels(self) -> Option<f64> {
        match self {
            Self::Pixels(px) => Some(px),
            Self::Percent(_) => None,
        }
    }
}

impl fmt::Display for ReportedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pixels(px) => f.write_str(&format_magnitude(*px)),
            Self::Percent(pct) => write!(f, "{}%", format_magnitude(*pct)),
        }
    }
}

impl Serialize for ReportedSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Pixels(px) => serializer.serialize_f64(*px),
            Self::Percent(_) => serializer.serialize_str(&self.to_string()),
        }
    }
}

/// A notification for external observers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SplitterEvent {
    ResizeStart { sizes: Vec<ReportedSize> },
    Resize { sizes: Vec<ReportedSize> },
    ResizeEnd { sizes: Vec<ReportedSize> },
    Collapse { panel: usize, collapsed: bool },
}

impl SplitterEvent {
    /// Forward this event to the matching observer callback.
    pub fn dispatch_to<O: SplitterObserver + ?Sized>(&self, observer: &mut O) {
        match self {
            Self::ResizeStart { sizes } => observer.on_resize_start(sizes),
            Self::Resize { sizes } => observer.on_resize(sizes),
            Self::ResizeEnd { sizes } => observer.on_resize_end(sizes),
            Self::Collapse { panel, collapsed } => observer.on_collapse(*panel, *collapsed),
        }
    }

    /// Sizes carried by a resize notification.
    #[must_use]
    pub fn sizes(&self) -> Option<&[ReportedSize]> {
        match self {
            Self::ResizeStart { sizes } | Self::Resize { sizes } | Self::ResizeEnd { sizes } => {
                Some(sizes)
            }
            Self::Collapse { .. } => None,
        }
    }
}

/// Host callbacks. Every method defaults to a no-op.
pub trait SplitterObserver {
    fn on_resize_start(&mut self, _sizes: &[ReportedSize]) {}
    fn on_resize(&mut self, _sizes: &[ReportedSize]) {}
    fn on_resize_end(&mut self, _sizes: &[ReportedSize]) {}
    fn on_collapse(&mut self, _panel: usize, _collapsed: bool) {}
}

/// Recording observer.
impl SplitterObserver for Vec<SplitterEvent> {
    fn on_resize_start(&mut self, sizes: &[ReportedSize]) {
        self.push(SplitterEvent::ResizeStart {
            sizes: sizes.to_vec(),
        });
    }

    fn on_resize(&mut self, sizes: &[ReportedSize]) {
        self.push(SplitterEvent::Resize {
            sizes: sizes.to_vec(),
        });
    }

    fn on_resize_end(&mut self, sizes: &[ReportedSize]) {
        self.push(SplitterEvent::ResizeEnd {
            sizes: sizes.to_vec(),
        });
    }

    fn on_collapse(&mut self, panel: usize, collapsed: bool) {
        self.push(SplitterEvent::Collapse { panel, collapsed });
    }
}

/// Why an operation was absorbed as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitterIgnoredReason {
    /// The container has not been measured yet.
    NoLayout,
    IndexOutOfRange,
    ResizerNotResizable,
    /// Both panels flanking the resizer are collapsed.
    ResizerSuppressed,
    DragAlreadyActive,
    NoActiveDrag,
    /// A live measurement was unavailable or unusable.
    MeasurementUnavailable,
    /// The pointer moved but the rounded sizes did not change.
    Unchanged,
    /// The panel is not in a state (or side) that allows this toggle.
    CollapseNotAllowed,
    /// The drag has not outlived the safety unlock window.
    NotExpired,
}

impl fmt::Display for SplitterIgnoredReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NoLayout => "layout not resolved yet",
            Self::IndexOutOfRange => "index outside the current panel set",
            Self::ResizerNotResizable => "resizer is not resizable",
            Self::ResizerSuppressed => "resizer is suppressed",
            Self::DragAlreadyActive => "a drag is already in progress",
            Self::NoActiveDrag => "no drag in progress",
            Self::MeasurementUnavailable => "live measurement unavailable",
            Self::Unchanged => "sizes unchanged",
            Self::CollapseNotAllowed => "collapse toggle not allowed",
            Self::NotExpired => "drag has not expired",
        };
        f.write_str(text)
    }
}

/// Result of one engine operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitterDispatch {
    pub events: Vec<SplitterEvent>,
    pub ignored: Option<SplitterIgnoredReason>,
}

impl SplitterDispatch {
    pub(crate) fn emitted(events: Vec<SplitterEvent>) -> Self {
        Self {
            events,
            ignored: None,
        }
    }

    pub(crate) fn ignored(reason: SplitterIgnoredReason) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(reason = %reason, "splitter operation ignored");
        Self {
            events: Vec::new(),
            ignored: Some(reason),
        }
    }

    /// Whether the operation was absorbed as a no-op.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.ignored.is_some()
    }

    /// Whether any resize (live or committed) was emitted.
    #[must_use]
    pub fn resized(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, SplitterEvent::Resize { .. }))
    }

    /// Count of events matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&SplitterEvent) -> bool) -> usize {
        self.events.iter().filter(|event| predicate(event)).count()
    }
}
