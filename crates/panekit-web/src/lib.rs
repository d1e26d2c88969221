#![forbid(unsafe_code)]

//! `panekit-web` connects a browser host to the splitter engine.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment pushes pointer lifecycle
//!   signals and the live geometry it measured.
//! - **Explicit capture**: the adapter never touches the DOM; it answers with
//!   acquire/release commands the host performs.
//! - **No stuck drags**: every interruption path commits the drag, and
//!   [`SplitterPointerAdapter::tick`] force-ends a drag whose release was lost.

pub mod pointer_capture;

pub use pointer_capture::{
    CaptureCommand, PointerButton, PointerDispatch, PointerIgnoredReason, PointerLifecyclePhase,
    PointerLogEntry, PointerLogOutcome, SplitterPointerAdapter, SplitterPointerConfig,
};
