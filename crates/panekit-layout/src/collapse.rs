#![forbid(unsafe_code)]

//! Collapse and expand with size memory.
//!
//! Collapsing a panel moves its whole size into an adjacent neighbour and
//! remembers the size it had. Expanding gives it back. The pair sum is
//! conserved in both directions.
//!
//! Every resizer has two affordance slots. The "prev" slot collapses the
//! panel before the resizer and the "next" slot collapses the panel after it.
//! Once one of the pair is collapsed, the opposite slot turns into the
//! "expand it again" action, so each side always has at most one button.

use std::collections::{BTreeMap, BTreeSet};

use panekit_core::Orientation;

use crate::event::SplitterIgnoredReason;
use crate::panel::Panel;

/// Size restored when a panel expands without a remembered size.
pub const DEFAULT_RESTORE_FALLBACK_PX: f64 = 50.0;

/// Affordance slot on a resizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollapseSide {
    /// Toward the panel before the resizer.
    Prev,
    /// Toward the panel after the resizer.
    Next,
}

impl CollapseSide {
    /// Arrow drawn on the button: it points the way the resizer moves.
    #[must_use]
    pub const fn default_glyph(self, orientation: Orientation) -> char {
        match (self, orientation) {
            (Self::Prev, Orientation::Horizontal) => '<',
            (Self::Next, Orientation::Horizontal) => '>',
            (Self::Prev, Orientation::Vertical) => '∧',
            (Self::Next, Orientation::Vertical) => '∨',
        }
    }
}

/// What clicking an affordance does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollapseAction {
    Collapse { panel: usize, neighbor: usize },
    Expand { panel: usize, neighbor: usize },
}

impl CollapseAction {
    #[must_use]
    pub const fn panel(self) -> usize {
        match self {
            Self::Collapse { panel, .. } | Self::Expand { panel, .. } => panel,
        }
    }

    #[must_use]
    pub const fn neighbor(self) -> usize {
        match self {
            Self::Collapse { neighbor, .. } | Self::Expand { neighbor, .. } => neighbor,
        }
    }

    /// `true` for a collapse, `false` for an expand.
    #[must_use]
    pub const fn collapses(self) -> bool {
        matches!(self, Self::Collapse { .. })
    }
}

/// A visible collapse/expand button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollapseAffordance {
    pub side: CollapseSide,
    pub action: CollapseAction,
    pub glyph: char,
}

/// Collapse bookkeeping for one layout epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct CollapseController {
    collapsed: BTreeSet<usize>,
    remembered: BTreeMap<usize, f64>,
    fallback_px: f64,
}

impl Default for CollapseController {
    fn default() -> Self {
        Self::new(DEFAULT_RESTORE_FALLBACK_PX)
    }
}

impl CollapseController {
    #[must_use]
    pub fn new(fallback_px: f64) -> Self {
        let fallback_px = if fallback_px.is_finite() {
            fallback_px.max(0.0)
        } else {
            DEFAULT_RESTORE_FALLBACK_PX
        };
        Self {
            collapsed: BTreeSet::new(),
            remembered: BTreeMap::new(),
            fallback_px,
        }
    }

    #[must_use]
    pub const fn fallback_px(&self) -> f64 {
        self.fallback_px
    }

    #[must_use]
    pub fn is_collapsed(&self, panel: usize) -> bool {
        self.collapsed.contains(&panel)
    }

    /// Collapsed panel indices in ascending order.
    pub fn collapsed(&self) -> impl Iterator<Item = usize> + '_ {
        self.collapsed.iter().copied()
    }

    /// Size a collapsed panel will try to restore.
    #[must_use]
    pub fn remembered(&self, panel: usize) -> Option<f64> {
        self.remembered.get(&panel).copied()
    }

    /// Replace the remembered size of a collapsed panel.
    ///
    /// Used when the host supplies a new controlled size while the panel is
    /// hidden: it takes effect on the next expand.
    pub fn remember(&mut self, panel: usize, size: f64) {
        if self.is_collapsed(panel) && size.is_finite() {
            self.remembered.insert(panel, size.max(0.0));
        }
    }

    /// Whether both panels flanking `resizer` are collapsed.
    #[must_use]
    pub fn is_suppressed(&self, resizer: usize) -> bool {
        resizer
            .checked_add(1)
            .is_some_and(|next| self.is_collapsed(resizer) && self.is_collapsed(next))
    }

    /// Visible affordance for one slot of `resizer`, if any.
    #[must_use]
    pub fn affordance(
        &self,
        resizer: usize,
        side: CollapseSide,
        panels: &[Panel],
        orientation: Orientation,
    ) -> Option<CollapseAffordance> {
        let (prev, next) = (resizer, resizer.checked_add(1)?);
        let prev_panel = panels.get(prev)?;
        let next_panel = panels.get(next)?;
        if self.is_suppressed(resizer) {
            return None;
        }
        let prev_collapsed = self.is_collapsed(prev);
        let next_collapsed = self.is_collapsed(next);
        // The side of each panel that faces this resizer.
        let prev_can = prev_panel.collapsible.end;
        let next_can = next_panel.collapsible.start;

        let (shown, action) = match side {
            CollapseSide::Prev => (
                (prev_can && !prev_collapsed) || (next_can && next_collapsed),
                if next_collapsed {
                    CollapseAction::Expand {
                        panel: next,
                        neighbor: prev,
                    }
                } else {
                    CollapseAction::Collapse {
                        panel: prev,
                        neighbor: next,
                    }
                },
            ),
            CollapseSide::Next => (
                (next_can && !next_collapsed) || (prev_can && prev_collapsed),
                if prev_collapsed {
                    CollapseAction::Expand {
                        panel: prev,
                        neighbor: next,
                    }
                } else {
                    CollapseAction::Collapse {
                        panel: next,
                        neighbor: prev,
                    }
                },
            ),
        };
        if !shown {
            return None;
        }
        Some(CollapseAffordance {
            side,
            action,
            glyph: side.default_glyph(orientation),
        })
    }

    /// Apply `action` to `sizes`.
    pub fn apply(
        &mut self,
        action: CollapseAction,
        sizes: &mut [f64],
    ) -> Result<(), SplitterIgnoredReason> {
        match action {
            CollapseAction::Collapse { panel, neighbor } => self.collapse(panel, neighbor, sizes),
            CollapseAction::Expand { panel, neighbor } => self.expand(panel, neighbor, sizes),
        }
    }

    /// Hide `panel`, giving its size to `neighbor`.
    pub fn collapse(
        &mut self,
        panel: usize,
        neighbor: usize,
        sizes: &mut [f64],
    ) -> Result<(), SplitterIgnoredReason> {
        self.check_pair(panel, neighbor, sizes.len())?;
        if self.is_collapsed(panel) {
            return Err(SplitterIgnoredReason::CollapseNotAllowed);
        }
        let freed = sizes[panel];
        self.remembered.insert(panel, freed);
        self.collapsed.insert(panel);
        sizes[neighbor] += freed;
        sizes[panel] = 0.0;
        Ok(())
    }

    /// Show `panel` again, taking its remembered size back from `neighbor`.
    ///
    /// The restored size is capped at what the neighbour currently holds, so
    /// the pair sum stays put and the neighbour never goes negative. If the
    /// neighbour was dragged smaller than the remembered size while this
    /// panel was hidden, the panel comes back smaller than it left, and the
    /// neighbour may end up below its own `min`.
    pub fn expand(
        &mut self,
        panel: usize,
        neighbor: usize,
        sizes: &mut [f64],
    ) -> Result<(), SplitterIgnoredReason> {
        self.check_pair(panel, neighbor, sizes.len())?;
        if !self.is_collapsed(panel) {
            return Err(SplitterIgnoredReason::CollapseNotAllowed);
        }
        let wanted = self
            .remembered
            .remove(&panel)
            .unwrap_or(self.fallback_px);
        let restored = wanted.min(sizes[neighbor]).max(0.0);
        self.collapsed.remove(&panel);
        sizes[panel] = restored;
        sizes[neighbor] = (sizes[neighbor] - restored).max(0.0);
        Ok(())
    }

    /// Forget everything (new layout epoch).
    pub fn reset(&mut self) {
        self.collapsed.clear();
        self.remembered.clear();
    }

    fn check_pair(
        &self,
        panel: usize,
        neighbor: usize,
        len: usize,
    ) -> Result<(), SplitterIgnoredReason> {
        if panel >= len || neighbor >= len {
            return Err(SplitterIgnoredReason::IndexOutOfRange);
        }
        // Space only moves between adjacent panels, and never into a hidden one.
        if panel.abs_diff(neighbor) != 1 || self.is_collapsed(neighbor) {
            return Err(SplitterIgnoredReason::CollapseNotAllowed);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::Collapsible;

    fn pair(prev: Collapsible, next: Collapsible) -> Vec<Panel> {
        vec![
            Panel::new().collapsible(prev),
            Panel::new().collapsible(next),
        ]
    }

    #[test]
    fn collapse_then_expand_round_trips() {
        let mut controller = CollapseController::default();
        let mut sizes = [200.0, 200.0];
        assert_eq!(controller.collapse(0, 1, &mut sizes), Ok(()));
        assert_eq!(sizes, [0.0, 400.0]);
        assert!(controller.is_collapsed(0));
        assert_eq!(controller.remembered(0), Some(200.0));

        assert_eq!(controller.expand(0, 1, &mut sizes), Ok(()));
        assert_eq!(sizes, [200.0, 200.0]);
        assert!(!controller.is_collapsed(0));
    }

    #[test]
    fn expand_without_memory_uses_fallback() {
        let mut controller = CollapseController::new(80.0);
        let mut sizes = [0.0, 400.0];
        controller.collapsed.insert(0);
        assert_eq!(controller.expand(0, 1, &mut sizes), Ok(()));
        assert_eq!(sizes, [80.0, 320.0]);
    }

    #[test]
    fn expand_never_drives_neighbour_negative() {
        let mut controller = CollapseController::default();
        let mut sizes = [0.0, 30.0];
        controller.collapsed.insert(0);
        controller.remembered.insert(0, 200.0);
        assert_eq!(controller.expand(0, 1, &mut sizes), Ok(()));
        assert_eq!(sizes, [30.0, 0.0]);
    }

    #[test]
    fn double_collapse_is_rejected() {
        let mut controller = CollapseController::default();
        let mut sizes = [200.0, 200.0];
        assert_eq!(controller.collapse(0, 1, &mut sizes), Ok(()));
        assert_eq!(
            controller.collapse(0, 1, &mut sizes),
            Err(SplitterIgnoredReason::CollapseNotAllowed)
        );
        assert_eq!(sizes, [0.0, 400.0]);
    }

    #[test]
    fn out_of_range_and_non_adjacent_are_rejected() {
        let mut controller = CollapseController::default();
        let mut sizes = [100.0, 100.0, 100.0];
        assert_eq!(
            controller.collapse(3, 2, &mut sizes),
            Err(SplitterIgnoredReason::IndexOutOfRange)
        );
        assert_eq!(
            controller.collapse(0, 2, &mut sizes),
            Err(SplitterIgnoredReason::CollapseNotAllowed)
        );
        assert_eq!(sizes, [100.0, 100.0, 100.0]);
    }

    #[test]
    fn affordances_follow_collapsible_sides() {
        let controller = CollapseController::default();
        let panels = pair(Collapsible::end_only(), Collapsible::none());
        let prev = controller.affordance(0, CollapseSide::Prev, &panels, Orientation::Horizontal);
        assert_eq!(
            prev.map(|a| a.action),
            Some(CollapseAction::Collapse {
                panel: 0,
                neighbor: 1
            })
        );
        assert_eq!(prev.map(|a| a.glyph), Some('<'));
        assert!(
            controller
                .affordance(0, CollapseSide::Next, &panels, Orientation::Horizontal)
                .is_none()
        );
    }

    #[test]
    fn start_side_does_not_face_previous_resizer() {
        let controller = CollapseController::default();
        let panels = pair(Collapsible::start_only(), Collapsible::end_only());
        for side in [CollapseSide::Prev, CollapseSide::Next] {
            assert!(
                controller
                    .affordance(0, side, &panels, Orientation::Horizontal)
                    .is_none()
            );
        }
    }

    #[test]
    fn collapsed_panel_turns_opposite_slot_into_expand() {
        let mut controller = CollapseController::default();
        let panels = pair(Collapsible::both(), Collapsible::both());
        let mut sizes = [200.0, 200.0];
        assert_eq!(controller.collapse(0, 1, &mut sizes), Ok(()));

        assert!(
            controller
                .affordance(0, CollapseSide::Prev, &panels, Orientation::Vertical)
                .is_none()
        );
        let next = controller.affordance(0, CollapseSide::Next, &panels, Orientation::Vertical);
        assert_eq!(
            next.map(|a| a.action),
            Some(CollapseAction::Expand {
                panel: 0,
                neighbor: 1
            })
        );
        assert_eq!(next.map(|a| a.glyph), Some('∨'));
    }

    #[test]
    fn both_collapsed_suppresses_resizer() {
        let mut controller = CollapseController::default();
        let panels = vec![
            Panel::new().collapsible(true),
            Panel::new().collapsible(true),
            Panel::new(),
        ];
        let mut sizes = [100.0, 100.0, 100.0];
        assert_eq!(controller.collapse(0, 1, &mut sizes), Ok(()));
        assert_eq!(controller.collapse(1, 2, &mut sizes), Ok(()));
        assert!(controller.is_suppressed(0));
        for side in [CollapseSide::Prev, CollapseSide::Next] {
            assert!(
                controller
                    .affordance(0, side, &panels, Orientation::Horizontal)
                    .is_none()
            );
        }
        assert_eq!(sizes, [0.0, 0.0, 300.0]);
    }

    #[test]
    fn last_resizer_index_has_no_affordance() {
        let mut controller = CollapseController::default();
        let panels = vec![Panel::new().collapsible(true), Panel::new().collapsible(true)];
        let mut sizes = [200.0, 200.0];
        assert_eq!(controller.collapse(0, 1, &mut sizes), Ok(()));
        assert!(!controller.is_suppressed(usize::MAX));
        assert!(
            controller
                .affordance(usize::MAX, CollapseSide::Prev, &panels, Orientation::Horizontal)
                .is_none()
        );
    }

    #[test]
    fn expand_is_capped_by_shrunken_neighbour() {
        let mut controller = CollapseController::default();
        let mut sizes = [100.0, 100.0, 100.0];
        assert_eq!(controller.collapse(0, 1, &mut sizes), Ok(()));
        assert_eq!(sizes, [0.0, 200.0, 100.0]);
        // Neighbour dragged down while panel 0 is hidden.
        sizes = [0.0, 50.0, 250.0];
        assert_eq!(controller.expand(0, 1, &mut sizes), Ok(()));
        assert_eq!(sizes, [50.0, 0.0, 250.0]);
    }

    #[test]
    fn collapsing_into_hidden_neighbour_is_rejected() {
        let mut controller = CollapseController::default();
        let mut sizes = [200.0, 200.0];
        assert_eq!(controller.collapse(1, 0, &mut sizes), Ok(()));
        assert_eq!(
            controller.collapse(0, 1, &mut sizes),
            Err(SplitterIgnoredReason::CollapseNotAllowed)
        );
    }

    #[test]
    fn remember_only_updates_collapsed_panels() {
        let mut controller = CollapseController::default();
        controller.remember(0, 120.0);
        assert_eq!(controller.remembered(0), None);
        let mut sizes = [200.0, 200.0];
        assert_eq!(controller.collapse(0, 1, &mut sizes), Ok(()));
        controller.remember(0, 120.0);
        assert_eq!(controller.expand(0, 1, &mut sizes), Ok(()));
        assert_eq!(sizes, [120.0, 280.0]);
    }
}
