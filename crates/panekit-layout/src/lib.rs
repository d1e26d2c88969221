#![forbid(unsafe_code)]

//! Resizable, collapsible multi-panel layout.
//!
//! # Role in panekit
//! `panekit-layout` is the engine. It keeps N adjacent panels whose sizes are
//! mutually constrained, redistributes space between neighbours during a
//! pointer drag, and collapses or restores panels with size memory.
//!
//! # Data flow
//! ```text
//! pointer ─▶ DragSession ─▶ solve_pair ─▶ LayoutState sizes ─▶ SplitterEvent
//! button  ─▶ CollapseController ────────▶ LayoutState sizes ─▶ SplitterEvent
//! ```
//!
//! # Primary responsibilities
//! - **Panel**: declarative size, bounds, resizability and collapsible sides.
//! - **solve_pair**: clamp-then-propagate redistribution between two panels.
//! - **DragSession**: one pointer drag, live or lazy (ghost bar).
//! - **CollapseController**: collapse/expand and the per-resizer affordances.
//! - **PanelLayoutEngine**: owns the sizes and dispatches notifications.
//! - **SplitterConfig**: TOML/JSON-loadable configuration.

pub mod collapse;
pub mod config;
pub mod drag;
pub mod engine;
pub mod event;
pub mod panel;
pub mod solver;

pub use collapse::{
    CollapseAction, CollapseAffordance, CollapseController, CollapseSide,
    DEFAULT_RESTORE_FALLBACK_PX,
};
pub use config::{SplitterConfig, SplitterConfigError};
pub use drag::{
    DEFAULT_MAX_DRAG_DURATION, DragAlreadyActive, DragSession, DragStart, DragState, DragUpdate,
};
pub use engine::{LayoutState, PanelLayoutEngine, PanelVisual, ResizerView};
pub use event::{
    ReportedSize, SplitterDispatch, SplitterEvent, SplitterIgnoredReason, SplitterObserver,
};
pub use panel::{Collapsible, Panel, PanelBounds};
pub use solver::{PairSolution, solve_pair};

pub use panekit_core::{Measurer, Orientation, SizeUnit, SizeValue, StaticMeasurer};
