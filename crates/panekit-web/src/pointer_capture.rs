#![forbid(unsafe_code)]

//! Deterministic pointer-capture adapter for splitter drags.
//!
//! This module turns browser pointer lifecycle signals into
//! [`PanelLayoutEngine`] drag operations while enforcing:
//! - one active pointer at a time,
//! - explicit capture acquire/release commands for JS hosts, and
//! - commit on every interruption path (blur/visibility/lost-capture),
//!   plus a time-based safety unlock for releases the platform never sent.
//!
//! There is no rollback: cancel paths commit the last frame exactly like a
//! pointer-up does.

use panekit_core::{Measurer, PointerPosition};
use panekit_layout::{PanelLayoutEngine, SplitterDispatch, SplitterIgnoredReason};
use web_time::Instant;

/// Mouse/pen button reported with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Map a DOM `PointerEvent.button` code.
    #[must_use]
    pub const fn from_dom(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Primary),
            1 => Some(Self::Middle),
            2 => Some(Self::Secondary),
            _ => None,
        }
    }
}

/// Adapter configuration for splitter pointer-capture handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitterPointerConfig {
    /// Button required to begin a drag.
    pub activation_button: PointerButton,
    /// If true, pointer leave ends the drag when capture was requested but
    /// never acknowledged.
    pub cancel_on_leave_without_capture: bool,
}

impl Default for SplitterPointerConfig {
    fn default() -> Self {
        Self {
            activation_button: PointerButton::Primary,
            cancel_on_leave_without_capture: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Requested,
    Acquired,
}

impl CaptureState {
    const fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActivePointer {
    pointer_id: u32,
    resizer: usize,
    button: PointerButton,
    last_position: PointerPosition,
    capture_state: CaptureState,
    started_at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct DispatchContext {
    phase: PointerLifecyclePhase,
    pointer_id: Option<u32>,
    resizer: Option<usize>,
    position: Option<PointerPosition>,
}

/// Capture command the JS host should perform on the resizer element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureCommand {
    Acquire { pointer_id: u32 },
    Release { pointer_id: u32 },
}

impl CaptureCommand {
    #[must_use]
    pub const fn pointer_id(self) -> u32 {
        match self {
            Self::Acquire { pointer_id } | Self::Release { pointer_id } => pointer_id,
        }
    }
}

/// Lifecycle phase seen by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerLifecyclePhase {
    PointerDown,
    PointerMove,
    PointerUp,
    PointerCancel,
    PointerLeave,
    Blur,
    VisibilityHidden,
    LostPointerCapture,
    CaptureAcquired,
    /// Periodic safety-unlock check.
    Tick,
}

/// Why a lifecycle signal produced no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerIgnoredReason {
    InvalidPointerId,
    ButtonNotAllowed,
    ButtonMismatch,
    ActivePointerAlreadyInProgress,
    NoActivePointer,
    PointerMismatch,
    LeaveWhileCaptured,
    /// The signal reached the engine, which absorbed it as a no-op.
    EngineRejected(SplitterIgnoredReason),
}

/// Outcome recorded in a [`PointerLogEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerLogOutcome {
    Forwarded,
    CaptureStateUpdated,
    Ignored(PointerIgnoredReason),
}

/// Structured record of one dispatch, suitable for replay diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerLogEntry {
    pub phase: PointerLifecyclePhase,
    /// Engine sequence number; `None` when the signal never reached the engine.
    pub sequence: Option<u64>,
    pub pointer_id: Option<u32>,
    pub resizer: Option<usize>,
    pub position: Option<PointerPosition>,
    pub capture_command: Option<CaptureCommand>,
    pub outcome: PointerLogOutcome,
}

/// Result of one lifecycle signal.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerDispatch {
    /// Engine notifications (empty when the engine was not involved).
    pub splitter: SplitterDispatch,
    pub capture_command: Option<CaptureCommand>,
    pub log: PointerLogEntry,
}

impl PointerDispatch {
    fn ignored(context: DispatchContext, reason: PointerIgnoredReason) -> Self {
        let log = PointerLogEntry {
            phase: context.phase,
            sequence: None,
            pointer_id: context.pointer_id,
            resizer: context.resizer,
            position: context.position,
            capture_command: None,
            outcome: PointerLogOutcome::Ignored(reason),
        };
        #[cfg(feature = "tracing")]
        trace_log(&log);
        Self {
            splitter: SplitterDispatch::default(),
            capture_command: None,
            log,
        }
    }

    fn capture_state_updated(
        phase: PointerLifecyclePhase,
        pointer_id: u32,
        resizer: usize,
    ) -> Self {
        let log = PointerLogEntry {
            phase,
            sequence: None,
            pointer_id: Some(pointer_id),
            resizer: Some(resizer),
            position: None,
            capture_command: None,
            outcome: PointerLogOutcome::CaptureStateUpdated,
        };
        #[cfg(feature = "tracing")]
        trace_log(&log);
        Self {
            splitter: SplitterDispatch::default(),
            capture_command: None,
            log,
        }
    }

    /// Whether the signal had no effect at all.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, PointerLogOutcome::Ignored(_))
    }
}

/// Pointer lifecycle adapter owning a [`PanelLayoutEngine`].
#[derive(Debug)]
pub struct SplitterPointerAdapter {
    engine: PanelLayoutEngine,
    config: SplitterPointerConfig,
    active: Option<ActivePointer>,
    next_sequence: u64,
}

impl SplitterPointerAdapter {
    #[must_use]
    pub fn new(engine: PanelLayoutEngine, config: SplitterPointerConfig) -> Self {
        Self {
            engine,
            config,
            active: None,
            next_sequence: 1,
        }
    }

    /// Adapter configuration.
    #[must_use]
    pub const fn config(&self) -> SplitterPointerConfig {
        self.config
    }

    #[must_use]
    pub const fn engine(&self) -> &PanelLayoutEngine {
        &self.engine
    }

    /// Mutable engine access for `sync`, collapse toggles and observers.
    pub fn engine_mut(&mut self) -> &mut PanelLayoutEngine {
        &mut self.engine
    }

    #[must_use]
    pub fn into_engine(self) -> PanelLayoutEngine {
        self.engine
    }

    /// Active pointer ID, if any.
    #[must_use]
    pub fn active_pointer_id(&self) -> Option<u32> {
        self.active.map(|active| active.pointer_id)
    }

    /// Resizer the active pointer is dragging.
    #[must_use]
    pub fn active_resizer(&self) -> Option<usize> {
        self.active.map(|active| active.resizer)
    }

    /// When the active pointer went down.
    #[must_use]
    pub fn active_since(&self) -> Option<Instant> {
        self.active.map(|active| active.started_at)
    }

    /// Whether the host has acknowledged capture for the active pointer.
    #[must_use]
    pub fn capture_held(&self) -> bool {
        self.active
            .is_some_and(|active| active.capture_state.is_acquired())
    }

    /// Handle pointer-down on the resizer at `resizer`.
    ///
    /// `measurer` reads the live geometry the drag starts from.
    pub fn pointer_down<M: Measurer + ?Sized>(
        &mut self,
        resizer: usize,
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
        measurer: &M,
    ) -> PointerDispatch {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::PointerDown,
            pointer_id: Some(pointer_id),
            resizer: Some(resizer),
            position: Some(position),
        };
        if pointer_id == 0 {
            return PointerDispatch::ignored(context, PointerIgnoredReason::InvalidPointerId);
        }
        if button != self.config.activation_button {
            return PointerDispatch::ignored(context, PointerIgnoredReason::ButtonNotAllowed);
        }
        if self.active.is_some() {
            return PointerDispatch::ignored(
                context,
                PointerIgnoredReason::ActivePointerAlreadyInProgress,
            );
        }

        let along = position.along(self.engine.orientation());
        let splitter = self.engine.begin_drag(resizer, along, measurer);
        if splitter.is_ignored() {
            return self.forward(context, splitter, None);
        }
        self.active = Some(ActivePointer {
            pointer_id,
            resizer,
            button,
            last_position: position,
            capture_state: CaptureState::Requested,
            started_at: Instant::now(),
        });
        self.forward(context, splitter, Some(CaptureCommand::Acquire { pointer_id }))
    }

    /// Mark browser pointer capture as successfully acquired.
    pub fn capture_acquired(&mut self, pointer_id: u32) -> PointerDispatch {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::CaptureAcquired,
            pointer_id: Some(pointer_id),
            resizer: None,
            position: None,
        };
        let Some(mut active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(
                DispatchContext {
                    resizer: Some(active.resizer),
                    ..context
                },
                PointerIgnoredReason::PointerMismatch,
            );
        }
        active.capture_state = CaptureState::Acquired;
        self.active = Some(active);
        PointerDispatch::capture_state_updated(context.phase, pointer_id, active.resizer)
    }

    /// Handle pointer-move during an active drag.
    pub fn pointer_move(&mut self, pointer_id: u32, position: PointerPosition) -> PointerDispatch {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::PointerMove,
            pointer_id: Some(pointer_id),
            resizer: None,
            position: Some(position),
        };
        let Some(mut active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        let context = DispatchContext {
            resizer: Some(active.resizer),
            ..context
        };
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }

        let splitter = self
            .engine
            .drag_to(position.along(self.engine.orientation()));
        active.last_position = position;
        self.active = Some(active);
        self.forward(context, splitter, None)
    }

    /// Handle pointer-up: commit the drag and release capture.
    pub fn pointer_up(
        &mut self,
        pointer_id: u32,
        button: PointerButton,
        position: PointerPosition,
    ) -> PointerDispatch {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::PointerUp,
            pointer_id: Some(pointer_id),
            resizer: self.active_resizer(),
            position: Some(position),
        };
        let Some(active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }
        if active.button != button {
            return PointerDispatch::ignored(context, PointerIgnoredReason::ButtonMismatch);
        }
        self.finish_active(context, active, true, false)
    }

    /// Handle browser pointer-cancel. Commits exactly like pointer-up.
    pub fn pointer_cancel(&mut self, pointer_id: Option<u32>) -> PointerDispatch {
        self.cancel_active(PointerLifecyclePhase::PointerCancel, pointer_id, true)
    }

    /// Handle pointer-leave.
    ///
    /// Once capture is held the browser keeps delivering moves, so leave is
    /// only meaningful while capture is still pending.
    pub fn pointer_leave(&mut self, pointer_id: u32) -> PointerDispatch {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::PointerLeave,
            pointer_id: Some(pointer_id),
            resizer: self.active_resizer(),
            position: None,
        };
        let Some(active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if active.pointer_id != pointer_id {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }

        if matches!(active.capture_state, CaptureState::Requested)
            && self.config.cancel_on_leave_without_capture
        {
            self.finish_active(context, active, true, true)
        } else {
            PointerDispatch::ignored(context, PointerIgnoredReason::LeaveWhileCaptured)
        }
    }

    /// Handle window blur.
    pub fn blur(&mut self) -> PointerDispatch {
        self.cancel_active(PointerLifecyclePhase::Blur, None, true)
    }

    /// Handle the document becoming hidden.
    pub fn visibility_hidden(&mut self) -> PointerDispatch {
        self.cancel_active(PointerLifecyclePhase::VisibilityHidden, None, true)
    }

    /// Handle `lostpointercapture`: the browser already dropped capture, so
    /// the drag commits without a release command.
    pub fn lost_pointer_capture(&mut self, pointer_id: u32) -> PointerDispatch {
        self.cancel_active(
            PointerLifecyclePhase::LostPointerCapture,
            Some(pointer_id),
            false,
        )
    }

    /// Safety unlock. Call periodically (e.g. from `requestAnimationFrame`);
    /// a drag older than the engine's maximum duration is committed and
    /// capture released.
    pub fn tick(&mut self, now: Instant) -> PointerDispatch {
        let context = DispatchContext {
            phase: PointerLifecyclePhase::Tick,
            pointer_id: self.active_pointer_id(),
            resizer: self.active_resizer(),
            position: self.active.map(|active| active.last_position),
        };
        if self.active.is_none() && !self.engine.is_dragging() {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        }
        let splitter = self.engine.expire_stale_drag(now);
        let Some(active) = self.active else {
            return self.forward(context, splitter, None);
        };
        if splitter.ignored == Some(SplitterIgnoredReason::NotExpired) {
            return self.forward(context, splitter, None);
        }
        // Expired, or the drag already ended behind the adapter's back.
        self.active = None;
        let release = active
            .capture_state
            .is_acquired()
            .then_some(CaptureCommand::Release {
                pointer_id: active.pointer_id,
            });
        self.forward(context, splitter, release)
    }

    fn cancel_active(
        &mut self,
        phase: PointerLifecyclePhase,
        pointer_id: Option<u32>,
        release_capture: bool,
    ) -> PointerDispatch {
        let context = DispatchContext {
            phase,
            pointer_id,
            resizer: self.active_resizer(),
            position: None,
        };
        let Some(active) = self.active else {
            return PointerDispatch::ignored(context, PointerIgnoredReason::NoActivePointer);
        };
        if let Some(id) = pointer_id
            && id != active.pointer_id
        {
            return PointerDispatch::ignored(context, PointerIgnoredReason::PointerMismatch);
        }
        let context = DispatchContext {
            pointer_id: Some(active.pointer_id),
            ..context
        };
        self.finish_active(context, active, release_capture, true)
    }

    /// Commit the engine drag and clear the active pointer. The pointer is
    /// cleared even when the engine had nothing to end, so capture never
    /// leaks.
    fn finish_active(
        &mut self,
        context: DispatchContext,
        active: ActivePointer,
        release_capture: bool,
        cancelled: bool,
    ) -> PointerDispatch {
        let splitter = if cancelled {
            self.engine.cancel_drag()
        } else {
            self.engine.end_drag()
        };
        self.active = None;
        let command = (release_capture && active.capture_state.is_acquired()).then_some(
            CaptureCommand::Release {
                pointer_id: active.pointer_id,
            },
        );
        self.forward(context, splitter, command)
    }

    fn forward(
        &mut self,
        context: DispatchContext,
        splitter: SplitterDispatch,
        capture_command: Option<CaptureCommand>,
    ) -> PointerDispatch {
        let outcome = match splitter.ignored {
            Some(reason) => {
                PointerLogOutcome::Ignored(PointerIgnoredReason::EngineRejected(reason))
            }
            None => PointerLogOutcome::Forwarded,
        };
        let log = PointerLogEntry {
            phase: context.phase,
            sequence: Some(self.next_sequence()),
            pointer_id: context.pointer_id,
            resizer: context.resizer,
            position: context.position,
            capture_command,
            outcome,
        };
        #[cfg(feature = "tracing")]
        trace_log(&log);
        PointerDispatch {
            splitter,
            capture_command,
            log,
        }
    }

    fn next_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        sequence
    }
}

#[cfg(feature = "tracing")]
fn trace_log(log: &PointerLogEntry) {
    tracing::debug!(
        phase = ?log.phase,
        sequence = ?log.sequence,
        pointer_id = ?log.pointer_id,
        resizer = ?log.resizer,
        capture = ?log.capture_command,
        outcome = ?log.outcome,
        "splitter pointer dispatch"
    );
}
