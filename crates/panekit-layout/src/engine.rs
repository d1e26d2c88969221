#![forbid(unsafe_code)]

//! Splitter orchestration.
//!
//! [`PanelLayoutEngine`] owns the authoritative pixel sizes of every panel,
//! the collapse bookkeeping and the (at most one) active drag. Hosts feed it
//! the declarative panel list on every render through [`PanelLayoutEngine::sync`]
//! and forward pointer and button input to the drag and collapse operations.
//!
//! # Invariants
//!
//! 1. Sizes are stored in pixels. Declared units only matter when sizes are
//!    first resolved and when they are reported back to the host.
//! 2. A collapsed panel stores size `0` and is pinned there for the solver.
//! 3. At most one drag is active. A second pointer-down is absorbed.
//! 4. Operations never fail. Each returns a [`SplitterDispatch`] with the
//!    emitted notifications, or the reason it was a no-op.
//!
//! # Failure modes
//!
//! | Condition | Outcome |
//! |---|---|
//! | Container not measured yet | [`SplitterIgnoredReason::NoLayout`] |
//! | Resizer or panel index beyond the panel set | [`SplitterIgnoredReason::IndexOutOfRange`] |
//! | Panel node unmeasurable at drag start | [`SplitterIgnoredReason::MeasurementUnavailable`] |
//! | Pointer sample rounds to the previous frame | [`SplitterIgnoredReason::Unchanged`] |

use core::fmt;
use core::time::Duration;

use panekit_core::{Measurer, Orientation, StaticMeasurer, usable_extent};
use web_time::Instant;

use crate::collapse::{
    CollapseAction, CollapseAffordance, CollapseController, CollapseSide,
    DEFAULT_RESTORE_FALLBACK_PX,
};
use crate::config::SplitterConfig;
use crate::drag::{DEFAULT_MAX_DRAG_DURATION, DragStart, DragState, DragUpdate};
use crate::event::{
    ReportedSize, SplitterDispatch, SplitterEvent, SplitterIgnoredReason, SplitterObserver,
};
use crate::panel::{Panel, PanelBounds};

/// Controlled sizes closer than this to the tracked size are not re-adopted.
const CONTROLLED_EPSILON: f64 = 0.5;

/// Resolved sizes for one layout epoch.
///
/// An epoch starts whenever the panel count or orientation changes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    sizes: Vec<f64>,
    extent: f64,
    collapse: CollapseController,
}

impl LayoutState {
    /// Pixel size of every panel (collapsed panels are `0`).
    #[must_use]
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// Container extent the sizes were last resolved against.
    #[must_use]
    pub const fn extent(&self) -> f64 {
        self.extent
    }

    #[must_use]
    pub const fn collapse(&self) -> &CollapseController {
        &self.collapse
    }

    /// Sum of all panel sizes.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.sizes.iter().sum()
    }
}

/// Flex-equivalent rendering descriptor for one panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelVisual {
    /// Fixed main-axis size, or `None` to grow into free space.
    pub basis: Option<f64>,
    pub grow: bool,
    pub collapsed: bool,
    /// Size transitions are suppressed while a drag is active.
    pub animate: bool,
}

/// Rendering descriptor for one resizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizerView {
    /// Whether pointer-down starts a drag.
    pub resizable: bool,
    /// Whether this resizer is being dragged.
    pub active: bool,
    /// Both flanking panels are collapsed; render no handle and no buttons.
    pub suppressed: bool,
    pub prev: Option<CollapseAffordance>,
    pub next: Option<CollapseAffordance>,
}

/// Resizable, collapsible multi-panel layout.
pub struct PanelLayoutEngine {
    panels: Vec<Panel>,
    orientation: Orientation,
    lazy: bool,
    max_drag_duration: Duration,
    restore_fallback_px: f64,
    layout: Option<LayoutState>,
    drag: DragState,
    observer: Option<Box<dyn SplitterObserver>>,
}

impl fmt::Debug for PanelLayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelLayoutEngine")
            .field("panels", &self.panels)
            .field("orientation", &self.orientation)
            .field("lazy", &self.lazy)
            .field("max_drag_duration", &self.max_drag_duration)
            .field("restore_fallback_px", &self.restore_fallback_px)
            .field("layout", &self.layout)
            .field("drag", &self.drag)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Default for PanelLayoutEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PanelLayoutEngine {
    /// Horizontal, live-drag engine over `panels`. Nothing is resolved until
    /// the container can be measured.
    #[must_use]
    pub fn new(panels: Vec<Panel>) -> Self {
        Self {
            panels,
            orientation: Orientation::Horizontal,
            lazy: false,
            max_drag_duration: DEFAULT_MAX_DRAG_DURATION,
            restore_fallback_px: DEFAULT_RESTORE_FALLBACK_PX,
            layout: None,
            drag: DragState::Idle,
            observer: None,
        }
    }

    /// Build an engine from a declarative configuration.
    #[must_use]
    pub fn from_config(config: &SplitterConfig) -> Self {
        Self {
            orientation: config.orientation,
            lazy: config.lazy,
            max_drag_duration: Duration::from_millis(config.max_drag_duration_ms.max(1)),
            restore_fallback_px: config.restore_fallback_px,
            ..Self::new(config.panels.clone())
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    #[must_use]
    pub fn with_max_drag_duration(mut self, max: Duration) -> Self {
        self.max_drag_duration = max;
        self
    }

    #[must_use]
    pub fn with_restore_fallback(mut self, px: f64) -> Self {
        self.restore_fallback_px = px;
        self
    }

    /// Register the observer that receives every emitted notification.
    pub fn set_observer(&mut self, observer: impl SplitterObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Remove and return the observer.
    pub fn take_observer(&mut self) -> Option<Box<dyn SplitterObserver>> {
        self.observer.take()
    }

    /// Switch drag mode. Takes effect on the next drag.
    pub fn set_lazy(&mut self, lazy: bool) {
        self.lazy = lazy;
    }

    pub fn set_max_drag_duration(&mut self, max: Duration) {
        self.max_drag_duration = max;
    }

    // --- Accessors ---

    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        self.lazy
    }

    #[must_use]
    pub const fn max_drag_duration(&self) -> Duration {
        self.max_drag_duration
    }

    #[must_use]
    pub const fn layout(&self) -> Option<&LayoutState> {
        self.layout.as_ref()
    }

    /// Pixel sizes, once resolved.
    #[must_use]
    pub fn sizes(&self) -> Option<&[f64]> {
        self.layout.as_ref().map(LayoutState::sizes)
    }

    /// Sizes in each panel's declared unit. Empty before the first layout.
    #[must_use]
    pub fn reported_sizes(&self) -> Vec<ReportedSize> {
        self.layout
            .as_ref()
            .map(|layout| self.report(&layout.sizes))
            .unwrap_or_default()
    }

    /// Size to render for `index`: `0` while collapsed.
    #[must_use]
    pub fn visual_size(&self, index: usize) -> Option<f64> {
        let layout = self.layout.as_ref()?;
        let size = *layout.sizes.get(index)?;
        Some(if layout.collapse.is_collapsed(index) {
            0.0
        } else {
            size
        })
    }

    #[must_use]
    pub fn is_collapsed(&self, index: usize) -> bool {
        self.layout
            .as_ref()
            .is_some_and(|layout| layout.collapse.is_collapsed(index))
    }

    /// Collapsed panel indices in ascending order.
    #[must_use]
    pub fn collapsed_indices(&self) -> Vec<usize> {
        self.layout
            .as_ref()
            .map(|layout| layout.collapse.collapsed().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    #[must_use]
    pub fn active_resizer(&self) -> Option<usize> {
        self.drag.session().map(|session| session.resizer())
    }

    /// Ghost bar offset from the container start during a lazy drag.
    #[must_use]
    pub fn ghost_position(&self) -> Option<f64> {
        self.drag.session().and_then(|session| session.ghost_offset())
    }

    /// Whether both panels next to `resizer` accept resizing.
    #[must_use]
    pub fn resizer_resizable(&self, resizer: usize) -> bool {
        let next = resizer.checked_add(1).and_then(|next| self.panels.get(next));
        match (self.panels.get(resizer), next) {
            (Some(prev), Some(next)) => prev.resizable && next.resizable,
            _ => false,
        }
    }

    /// Rendering descriptor for panel `index`.
    #[must_use]
    pub fn panel_visual(&self, index: usize) -> Option<PanelVisual> {
        if index >= self.panels.len() {
            return None;
        }
        let basis = self.visual_size(index);
        Some(PanelVisual {
            basis,
            grow: basis.is_none(),
            collapsed: self.is_collapsed(index),
            animate: !self.drag.is_active(),
        })
    }

    /// Rendering descriptor for resizer `index` (between panels `index` and
    /// `index + 1`).
    #[must_use]
    pub fn resizer_view(&self, index: usize) -> Option<ResizerView> {
        if index >= self.panels.len().saturating_sub(1) {
            return None;
        }
        let suppressed = self
            .layout
            .as_ref()
            .is_some_and(|layout| layout.collapse.is_suppressed(index));
        let affordance = |side: CollapseSide| {
            self.layout.as_ref().and_then(|layout| {
                layout
                    .collapse
                    .affordance(index, side, &self.panels, self.orientation)
            })
        };
        Some(ResizerView {
            resizable: !suppressed && self.resizer_resizable(index),
            active: self.active_resizer() == Some(index),
            suppressed,
            prev: affordance(CollapseSide::Prev),
            next: affordance(CollapseSide::Next),
        })
    }

    /// Stored sizes as a [`Measurer`], for hosts without a live surface.
    #[must_use]
    pub fn layout_measurer(&self) -> Option<StaticMeasurer> {
        self.layout
            .as_ref()
            .map(|layout| StaticMeasurer::new(layout.extent, layout.sizes.clone()))
    }

    // --- Panel set synchronization ---

    /// Reconcile with the panel list supplied by the host on this render.
    ///
    /// A changed panel count starts a new layout epoch: any drag is finished
    /// (emitting its end notification) and sizes are re-resolved from the
    /// declarations. Otherwise only controlled sizes that moved away from
    /// the tracked value are adopted.
    pub fn sync<M: Measurer + ?Sized>(
        &mut self,
        panels: Vec<Panel>,
        measurer: &M,
    ) -> SplitterDispatch {
        let count_changed = panels.len() != self.panels.len();
        let reset = count_changed || self.layout.is_none();
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("splitter.sync", panel_count = panels.len(), reset).entered();

        let mut events = Vec::new();
        if count_changed {
            events.extend(self.finish_drag("replace"));
        }
        self.panels = panels;

        if reset {
            self.layout = None;
            if self.ensure_layout(measurer).is_err() && events.is_empty() {
                return SplitterDispatch::ignored(SplitterIgnoredReason::NoLayout);
            }
        } else if !self.drag.is_active() {
            self.adopt_controlled_sizes(measurer);
        }
        self.publish(events)
    }

    /// Change orientation. Like a panel-count change, this starts a new epoch.
    pub fn set_orientation<M: Measurer + ?Sized>(
        &mut self,
        orientation: Orientation,
        measurer: &M,
    ) -> SplitterDispatch {
        if orientation == self.orientation {
            return SplitterDispatch::ignored(SplitterIgnoredReason::Unchanged);
        }
        #[cfg(feature = "tracing")]
        let _span =
            tracing::debug_span!("splitter.sync", panel_count = self.panels.len(), reset = true)
                .entered();

        let events = self.finish_drag("replace");
        self.orientation = orientation;
        self.layout = None;
        if self.ensure_layout(measurer).is_err() && events.is_empty() {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NoLayout);
        }
        self.publish(events)
    }

    // --- Drag ---

    /// Pointer-down on `resizer` at `pointer` (coordinate along the axis).
    ///
    /// Reads the live sizes of every panel from `measurer` and adopts them,
    /// so a container resized between drags starts from what is on screen.
    /// Only the two neighbours of `resizer` must be measurable.
    pub fn begin_drag<M: Measurer + ?Sized>(
        &mut self,
        resizer: usize,
        pointer: f64,
        measurer: &M,
    ) -> SplitterDispatch {
        if let Err(reason) = self.ensure_layout(measurer) {
            return SplitterDispatch::ignored(reason);
        }
        let (start, sizes, extent) = match self.prepare_drag(resizer, pointer, measurer) {
            Ok(prepared) => prepared,
            Err(reason) => return SplitterDispatch::ignored(reason),
        };
        if self.drag.begin(start, Instant::now()).is_err() {
            return SplitterDispatch::ignored(SplitterIgnoredReason::DragAlreadyActive);
        }
        if let Some(layout) = self.layout.as_mut() {
            layout.extent = extent;
            layout.sizes.clone_from(&sizes);
        }
        #[cfg(feature = "tracing")]
        trace_drag("begin", resizer, start.prev_px, start.next_px, start.lazy);

        let event = SplitterEvent::ResizeStart {
            sizes: self.report(&sizes),
        };
        self.publish(vec![event])
    }

    /// Pointer-move during a drag.
    pub fn drag_to(&mut self, pointer: f64) -> SplitterDispatch {
        let Some(session) = self.drag.session_mut() else {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NoActiveDrag);
        };
        if !pointer.is_finite() {
            return SplitterDispatch::ignored(SplitterIgnoredReason::MeasurementUnavailable);
        }
        let resizer = session.resizer();
        match session.move_to(pointer) {
            DragUpdate::Unchanged => SplitterDispatch::ignored(SplitterIgnoredReason::Unchanged),
            DragUpdate::Ghost { .. } => {
                #[cfg(feature = "tracing")]
                {
                    let (prev, next) = session.frame();
                    trace_drag("ghost", resizer, prev, next, true);
                }
                SplitterDispatch::emitted(Vec::new())
            }
            DragUpdate::Live { prev, next } => {
                #[cfg(feature = "tracing")]
                trace_drag("move", resizer, prev, next, false);
                let Some(layout) = self.layout.as_mut() else {
                    return SplitterDispatch::ignored(SplitterIgnoredReason::NoLayout);
                };
                layout.sizes[resizer] = prev;
                layout.sizes[resizer + 1] = next;
                let event = SplitterEvent::Resize {
                    sizes: self.reported_sizes(),
                };
                self.publish(vec![event])
            }
        }
    }

    /// Pointer-up: commit the drag.
    pub fn end_drag(&mut self) -> SplitterDispatch {
        if !self.drag.is_active() {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NoActiveDrag);
        }
        let events = self.finish_drag("end");
        self.publish(events)
    }

    /// Pointer-cancel. There is no rollback, so this commits exactly like
    /// [`PanelLayoutEngine::end_drag`].
    pub fn cancel_drag(&mut self) -> SplitterDispatch {
        if !self.drag.is_active() {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NoActiveDrag);
        }
        let events = self.finish_drag("cancel");
        self.publish(events)
    }

    /// Safety unlock: commit a drag that has outlived the configured
    /// maximum duration at `now`.
    pub fn expire_stale_drag(&mut self, now: Instant) -> SplitterDispatch {
        let Some(session) = self.drag.session() else {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NoActiveDrag);
        };
        if !session.is_expired(now, self.max_drag_duration) {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NotExpired);
        }
        let events = self.finish_drag("expire");
        self.publish(events)
    }

    // --- Collapse ---

    /// Click on one of the collapse/expand buttons of `resizer`.
    pub fn toggle_collapse<M: Measurer + ?Sized>(
        &mut self,
        resizer: usize,
        side: CollapseSide,
        measurer: &M,
    ) -> SplitterDispatch {
        if let Err(reason) = self.ensure_layout(measurer) {
            return SplitterDispatch::ignored(reason);
        }
        if resizer >= self.panels.len().saturating_sub(1) {
            return SplitterDispatch::ignored(SplitterIgnoredReason::IndexOutOfRange);
        }
        let Some(layout) = self.layout.as_ref() else {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NoLayout);
        };
        if layout.collapse.is_suppressed(resizer) {
            return SplitterDispatch::ignored(SplitterIgnoredReason::ResizerSuppressed);
        }
        let Some(affordance) =
            layout
                .collapse
                .affordance(resizer, side, &self.panels, self.orientation)
        else {
            return SplitterDispatch::ignored(SplitterIgnoredReason::CollapseNotAllowed);
        };
        self.apply_collapse(affordance.action)
    }

    /// Collapse `panel` into its adjacent `neighbor`.
    ///
    /// Programmatic collapse is not gated by the panel's collapsible sides;
    /// those only control which buttons are shown.
    pub fn collapse<M: Measurer + ?Sized>(
        &mut self,
        panel: usize,
        neighbor: usize,
        measurer: &M,
    ) -> SplitterDispatch {
        if let Err(reason) = self.ensure_layout(measurer) {
            return SplitterDispatch::ignored(reason);
        }
        self.apply_collapse(CollapseAction::Collapse { panel, neighbor })
    }

    /// Expand a collapsed `panel`, taking its size back from `neighbor`.
    pub fn expand<M: Measurer + ?Sized>(
        &mut self,
        panel: usize,
        neighbor: usize,
        measurer: &M,
    ) -> SplitterDispatch {
        if let Err(reason) = self.ensure_layout(measurer) {
            return SplitterDispatch::ignored(reason);
        }
        self.apply_collapse(CollapseAction::Expand { panel, neighbor })
    }

    // --- Internals ---

    fn apply_collapse(&mut self, action: CollapseAction) -> SplitterDispatch {
        if self.drag.is_active() {
            return SplitterDispatch::ignored(SplitterIgnoredReason::DragAlreadyActive);
        }
        let Some(layout) = self.layout.as_mut() else {
            return SplitterDispatch::ignored(SplitterIgnoredReason::NoLayout);
        };
        if let Err(reason) = layout.collapse.apply(action, &mut layout.sizes) {
            return SplitterDispatch::ignored(reason);
        }
        let panel = action.panel();
        let collapsed = action.collapses();
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "splitter.collapse",
            panel,
            neighbor = action.neighbor(),
            collapsed
        )
        .entered();

        self.publish(vec![SplitterEvent::Collapse { panel, collapsed }])
    }

    /// Resolve the layout if the container can be measured now.
    fn ensure_layout<M: Measurer + ?Sized>(
        &mut self,
        measurer: &M,
    ) -> Result<(), SplitterIgnoredReason> {
        if self.layout.is_some() {
            return Ok(());
        }
        let extent = usable_extent(measurer.container_extent(self.orientation))
            .ok_or(SplitterIgnoredReason::NoLayout)?;
        self.layout = Some(LayoutState {
            sizes: resolve_sizes(&self.panels, extent),
            extent,
            collapse: CollapseController::new(self.restore_fallback_px),
        });
        Ok(())
    }

    fn adopt_controlled_sizes<M: Measurer + ?Sized>(&mut self, measurer: &M) {
        let Some(layout) = self.layout.as_mut() else {
            return;
        };
        if let Some(extent) = usable_extent(measurer.container_extent(self.orientation)) {
            layout.extent = extent;
        }
        for (index, panel) in self.panels.iter().enumerate() {
            let Some(size) = panel.size else {
                continue;
            };
            let px = panel
                .bounds(layout.extent)
                .clamp(size.to_pixels(layout.extent));
            if layout.collapse.is_collapsed(index) {
                layout.collapse.remember(index, px);
            } else if (layout.sizes[index] - px).abs() > CONTROLLED_EPSILON {
                layout.sizes[index] = px;
            }
        }
    }

    /// Validate a pointer-down and capture the drag baseline.
    fn prepare_drag<M: Measurer + ?Sized>(
        &self,
        resizer: usize,
        pointer: f64,
        measurer: &M,
    ) -> Result<(DragStart, Vec<f64>, f64), SplitterIgnoredReason> {
        let layout = self
            .layout
            .as_ref()
            .ok_or(SplitterIgnoredReason::NoLayout)?;
        if resizer >= self.panels.len().saturating_sub(1) {
            return Err(SplitterIgnoredReason::IndexOutOfRange);
        }
        if self.drag.is_active() {
            return Err(SplitterIgnoredReason::DragAlreadyActive);
        }
        if layout.collapse.is_suppressed(resizer) {
            return Err(SplitterIgnoredReason::ResizerSuppressed);
        }
        if !self.resizer_resizable(resizer) {
            return Err(SplitterIgnoredReason::ResizerNotResizable);
        }
        if !pointer.is_finite() {
            return Err(SplitterIgnoredReason::MeasurementUnavailable);
        }
        let extent = usable_extent(measurer.container_extent(self.orientation))
            .ok_or(SplitterIgnoredReason::MeasurementUnavailable)?;

        let mut sizes = layout.sizes.clone();
        for index in [resizer, resizer + 1] {
            if layout.collapse.is_collapsed(index) {
                continue;
            }
            sizes[index] = usable_extent(measurer.panel_extent(index, self.orientation))
                .ok_or(SplitterIgnoredReason::MeasurementUnavailable)?;
        }
        // Panels outside the pair keep their stored size only when unmeasurable.
        for (index, size) in sizes.iter_mut().enumerate() {
            if index == resizer || index == resizer + 1 || layout.collapse.is_collapsed(index) {
                continue;
            }
            if let Some(measured) = usable_extent(measurer.panel_extent(index, self.orientation)) {
                *size = measured;
            }
        }

        let bounds = |index: usize| {
            if layout.collapse.is_collapsed(index) {
                PanelBounds::PINNED
            } else {
                self.panels[index].bounds(extent)
            }
        };
        let start = DragStart {
            resizer,
            anchor: pointer,
            prev_px: sizes[resizer],
            next_px: sizes[resizer + 1],
            prev_bounds: bounds(resizer),
            next_bounds: bounds(resizer + 1),
            resizer_offset: sizes[..=resizer].iter().sum(),
            lazy: self.lazy,
        };
        Ok((start, sizes, extent))
    }

    /// End the active drag, committing a lazy frame. Returns the events to
    /// publish (empty when no drag was active).
    fn finish_drag(&mut self, phase: &'static str) -> Vec<SplitterEvent> {
        let Some(session) = self.drag.finish() else {
            return Vec::new();
        };
        let resizer = session.resizer();
        let (prev, next) = session.frame();
        #[cfg(feature = "tracing")]
        trace_drag(phase, resizer, prev, next, session.is_lazy());
        #[cfg(not(feature = "tracing"))]
        let _ = phase;

        let mut events = Vec::with_capacity(2);
        if session.is_lazy()
            && let Some(layout) = self.layout.as_mut()
        {
            layout.sizes[resizer] = prev;
            layout.sizes[resizer + 1] = next;
            events.push(SplitterEvent::Resize {
                sizes: self.reported_sizes(),
            });
        }
        events.push(SplitterEvent::ResizeEnd {
            sizes: self.reported_sizes(),
        });
        events
    }

    fn report(&self, sizes: &[f64]) -> Vec<ReportedSize> {
        let extent = self.layout.as_ref().map_or(0.0, LayoutState::extent);
        self.panels
            .iter()
            .zip(sizes)
            .map(|(panel, &px)| ReportedSize::from_pixels(px, extent, panel.reporting_unit()))
            .collect()
    }

    fn publish(&mut self, events: Vec<SplitterEvent>) -> SplitterDispatch {
        if let Some(observer) = self.observer.as_deref_mut() {
            for event in &events {
                event.dispatch_to(observer);
            }
        }
        SplitterDispatch::emitted(events)
    }
}

/// Initial pixel sizes: declared sizes resolve against `extent`, undeclared
/// panels share what is left equally, and everything is clamped to bounds.
fn resolve_sizes(panels: &[Panel], extent: f64) -> Vec<f64> {
    let declared: Vec<Option<f64>> = panels
        .iter()
        .map(|panel| panel.declared_size().map(|size| size.to_pixels(extent)))
        .collect();
    let claimed: f64 = declared.iter().flatten().sum();
    let undeclared = declared.iter().filter(|size| size.is_none()).count();
    let share = if undeclared == 0 {
        0.0
    } else {
        (extent - claimed).max(0.0) / undeclared as f64
    };
    panels
        .iter()
        .zip(declared)
        .map(|(panel, size)| panel.bounds(extent).clamp(size.unwrap_or(share)))
        .collect()
}

#[cfg(feature = "tracing")]
fn trace_drag(phase: &'static str, resizer: usize, prev_px: f64, next_px: f64, lazy: bool) {
    let _span = tracing::debug_span!(
        "splitter.drag",
        resizer,
        phase,
        prev_px,
        next_px,
        lazy
    )
    .entered();
}
