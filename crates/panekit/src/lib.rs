#![forbid(unsafe_code)]

//! panekit public facade crate.
//!
//! Re-exports the splitter engine, its size vocabulary and (with the default
//! `web` feature) the browser pointer adapter, plus a prelude for day-to-day
//! usage.
//!
//! ```
//! use panekit::prelude::*;
//!
//! let mut engine = PanelLayoutEngine::default();
//! let panels = vec![Panel::new().default_size("30%").min(100.0), Panel::new()];
//! engine.sync(panels, &StaticMeasurer::new(1000.0, Vec::new()));
//! assert_eq!(engine.sizes(), Some(&[300.0, 700.0][..]));
//! ```

// --- Core re-exports -------------------------------------------------------

pub use panekit_core::{
    Measurer, Orientation, PointerPosition, SizeUnit, SizeValue, StaticMeasurer,
};

#[cfg(feature = "tracing-json")]
pub use panekit_core::logging::init_json_subscriber;

// --- Layout re-exports -----------------------------------------------------

pub use panekit_layout::{
    CollapseAction, CollapseAffordance, CollapseSide, Collapsible, Panel, PanelLayoutEngine,
    PanelVisual, ReportedSize, ResizerView, SplitterConfig, SplitterConfigError,
    SplitterDispatch, SplitterEvent, SplitterIgnoredReason, SplitterObserver,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use panekit_web::{
    CaptureCommand, PointerButton, PointerDispatch, SplitterPointerAdapter,
    SplitterPointerConfig,
};

/// Prelude for panekit hosts.
pub mod prelude {
    pub use crate::{
        Collapsible, Measurer, Orientation, Panel, PanelLayoutEngine, PointerPosition,
        SplitterConfig, SplitterDispatch, SplitterEvent, SplitterObserver, StaticMeasurer,
    };

    #[cfg(feature = "web")]
    pub use crate::{CaptureCommand, PointerButton, SplitterPointerAdapter, SplitterPointerConfig};

    pub use crate::{core, layout};
    #[cfg(feature = "web")]
    pub use crate::web;
}

pub use panekit_core as core;
pub use panekit_layout as layout;
#[cfg(feature = "web")]
pub use panekit_web as web;
