#![forbid(unsafe_code)]

//! Single-resizer drag sessions.
//!
//! ```text
//! Idle -> Dragging -> Idle   (end or cancel; both commit)
//! ```
//!
//! A session captures the two neighbouring panel sizes when the pointer goes
//! down and computes every later frame from that baseline plus the total
//! pointer offset. Frames never chain off each other, so there is no
//! rounding drift over long drags.
//!
//! In lazy mode the session only moves a ghost bar; the engine commits the
//! last frame once on release.

use core::time::Duration;

use web_time::Instant;

use crate::panel::PanelBounds;
use crate::solver::solve_pair;

/// Default safety unlock for drags whose release event never arrives.
pub const DEFAULT_MAX_DRAG_DURATION: Duration = Duration::from_secs(30);

/// Inputs captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragStart {
    /// Resizer index; the pair is `(resizer, resizer + 1)`.
    pub resizer: usize,
    /// Pointer coordinate along the splitter axis.
    pub anchor: f64,
    pub prev_px: f64,
    pub next_px: f64,
    pub prev_bounds: PanelBounds,
    pub next_bounds: PanelBounds,
    /// Offset of the resizer from the container start.
    pub resizer_offset: f64,
    pub lazy: bool,
}

/// What a pointer sample produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Same whole-pixel sizes as the previous frame.
    Unchanged,
    /// Live mode: write these sizes now.
    Live { prev: f64, next: f64 },
    /// Lazy mode: only the ghost bar moves.
    Ghost { offset: f64 },
}

/// An in-progress drag of one resizer.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    start: DragStart,
    frame: (f64, f64),
    ghost_offset: Option<f64>,
    started_at: Instant,
    samples: u64,
}

impl DragSession {
    /// Begin a session at `now`.
    #[must_use]
    pub fn begin(start: DragStart, now: Instant) -> Self {
        Self {
            start,
            frame: (start.prev_px, start.next_px),
            ghost_offset: start.lazy.then_some(start.resizer_offset.round()),
            started_at: now,
            samples: 0,
        }
    }

    /// Resizer being dragged.
    #[must_use]
    pub const fn resizer(&self) -> usize {
        self.start.resizer
    }

    #[must_use]
    pub const fn is_lazy(&self) -> bool {
        self.start.lazy
    }

    /// Baseline captured at pointer-down.
    #[must_use]
    pub const fn start(&self) -> &DragStart {
        &self.start
    }

    /// Last computed `(prev, next)` pair.
    #[must_use]
    pub const fn frame(&self) -> (f64, f64) {
        self.frame
    }

    /// Ghost bar offset (lazy sessions only).
    #[must_use]
    pub const fn ghost_offset(&self) -> Option<f64> {
        self.ghost_offset
    }

    /// Pointer samples that produced a new frame.
    #[must_use]
    pub const fn frames_emitted(&self) -> u64 {
        self.samples
    }

    /// Whether the frame differs from the baseline.
    #[must_use]
    pub fn has_moved(&self) -> bool {
        self.frame != (self.start.prev_px, self.start.next_px)
    }

    /// Process a pointer move to `pointer` along the splitter axis.
    ///
    /// Repeated samples that round to the same sizes report
    /// [`DragUpdate::Unchanged`] so callers can skip re-rendering.
    pub fn move_to(&mut self, pointer: f64) -> DragUpdate {
        let delta = pointer - self.start.anchor;
        let solution = solve_pair(
            self.start.prev_px,
            self.start.next_px,
            delta,
            self.start.prev_bounds,
            self.start.next_bounds,
        )
        .rounded();

        if (solution.prev, solution.next) == self.frame {
            return DragUpdate::Unchanged;
        }
        self.frame = (solution.prev, solution.next);
        self.samples = self.samples.saturating_add(1);

        if self.start.lazy {
            let offset = (self.start.resizer_offset + solution.realized_delta).round();
            self.ghost_offset = Some(offset);
            DragUpdate::Ghost { offset }
        } else {
            DragUpdate::Live {
                prev: solution.prev,
                next: solution.next,
            }
        }
    }

    /// Whether this session has outlived `max_duration` at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant, max_duration: Duration) -> bool {
        now.saturating_duration_since(self.started_at) >= max_duration
    }
}

/// Drag lifecycle owned by the layout engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Rejection of a second concurrent drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragAlreadyActive {
    pub active_resizer: usize,
}

impl DragState {
    /// Whether a session is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    #[must_use]
    pub const fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut DragSession> {
        match self {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }

    /// Start a session. Only one session may be active at a time; a
    /// pointer-down while dragging (on any resizer) is rejected.
    pub fn begin(&mut self, start: DragStart, now: Instant) -> Result<(), DragAlreadyActive> {
        if let Some(session) = self.session() {
            return Err(DragAlreadyActive {
                active_resizer: session.resizer(),
            });
        }
        *self = Self::Dragging(DragSession::begin(start, now));
        Ok(())
    }

    /// End the session, returning it if one was active.
    pub fn finish(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            Self::Idle => None,
            Self::Dragging(session) => Some(session),
        }
    }
}
