#![forbid(unsafe_code)]

//! Core: size values, orientation, and measurement for panekit.
//!
//! # Role in panekit
//! `panekit-core` is the leaf layer. It owns the vocabulary every other crate
//! speaks: which axis a splitter runs along, how a declared dimension such as
//! `"30%"` or `200` resolves to pixels, and how a host reports the live size of
//! the container and of each rendered panel.
//!
//! # Primary responsibilities
//! - **SizeValue**: lenient parsing of pixel/percentage dimensions.
//! - **Orientation**: horizontal vs vertical axis selection.
//! - **Measurer**: the injected capability that reads live geometry.
//! - **Logging**: feature-gated `tracing` re-exports.

pub mod geometry;
pub mod logging;
pub mod measure;
pub mod size;

pub use geometry::{Orientation, PointerPosition};
pub use measure::{Measurer, StaticMeasurer, usable_extent};
pub use size::{SizeUnit, SizeValue, format_magnitude, to_pixels};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
