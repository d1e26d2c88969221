#![forbid(unsafe_code)]

//! Pairwise size redistribution.
//!
//! A resizer only ever moves space between its two neighbours. The solver
//! applies the requested delta to the previous panel, clamps it, and hands
//! only the *realized* movement to the next panel:
//!
//! ```text
//! prev' = clamp_prev(prev + delta)
//! next' = clamp_next(next - (prev' - prev))
//! prev' = clamp_prev(prev + next - next')   // give back what next refused
//! ```
//!
//! Clamp-then-propagate keeps both panels inside their bounds and the pair sum
//! constant. When both sides are already pinned in the direction of motion the
//! realized delta is zero and nothing moves.

use crate::panel::PanelBounds;

/// Outcome of one pairwise solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSolution {
    pub prev: f64,
    pub next: f64,
    /// Movement of the shared edge after clamping (`prev - prev_start`).
    pub realized_delta: f64,
}

impl PairSolution {
    /// Snap the pair to whole pixels while keeping the pair sum.
    ///
    /// `next` is rounded and `prev` absorbs the remainder, so an integral
    /// starting sum stays integral on both sides.
    #[must_use]
    pub fn rounded(self) -> Self {
        let sum = self.prev + self.next;
        let next = self.next.round();
        let prev = snap(sum - next);
        Self {
            prev,
            next,
            realized_delta: self.realized_delta + (prev - self.prev),
        }
    }
}

/// Drop float noise left over from subtracting whole numbers.
fn snap(value: f64) -> f64 {
    let whole = value.round();
    if (value - whole).abs() < 1e-6 { whole } else { value }
}

/// Redistribute `delta` pixels between two adjacent panels.
///
/// Positive `delta` grows `prev` and shrinks `next`. A non-finite delta is
/// treated as no movement.
#[must_use]
pub fn solve_pair(
    prev_start: f64,
    next_start: f64,
    delta: f64,
    prev_bounds: PanelBounds,
    next_bounds: PanelBounds,
) -> PairSolution {
    let delta = if delta.is_finite() { delta } else { 0.0 };

    let prev_clamped = prev_bounds.clamp(prev_start + delta);
    let realized = prev_clamped - prev_start;

    let next = next_bounds.clamp(next_start - realized);
    let prev = prev_bounds.clamp(prev_start + (next_start - next));

    PairSolution {
        prev,
        next,
        realized_delta: prev - prev_start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn open(extent: f64) -> PanelBounds {
        PanelBounds::new(0.0, extent)
    }

    #[test]
    fn free_pair_transfers_full_delta() {
        let solution = solve_pair(200.0, 200.0, 50.0, open(400.0), open(400.0));
        assert_eq!(solution.prev, 250.0);
        assert_eq!(solution.next, 150.0);
        assert_eq!(solution.realized_delta, 50.0);
    }

    #[test]
    fn prev_min_clamps_and_next_takes_only_realized() {
        let solution = solve_pair(
            200.0,
            200.0,
            -150.0,
            PanelBounds::new(100.0, 400.0),
            open(400.0),
        );
        assert_eq!(solution.prev, 100.0);
        assert_eq!(solution.next, 300.0);
        assert_eq!(solution.realized_delta, -100.0);
    }

    #[test]
    fn next_min_gives_movement_back_to_prev() {
        let solution = solve_pair(
            200.0,
            200.0,
            150.0,
            open(400.0),
            PanelBounds::new(120.0, 400.0),
        );
        assert_eq!(solution.next, 120.0);
        assert_eq!(solution.prev, 280.0);
        assert_eq!(solution.prev + solution.next, 400.0);
    }

    #[test]
    fn both_pinned_is_a_no_op() {
        let solution = solve_pair(
            200.0,
            200.0,
            60.0,
            PanelBounds::new(0.0, 200.0),
            PanelBounds::new(200.0, 400.0),
        );
        assert_eq!(solution.prev, 200.0);
        assert_eq!(solution.next, 200.0);
        assert_eq!(solution.realized_delta, 0.0);
    }

    #[test]
    fn pinned_neighbour_blocks_motion() {
        let solution = solve_pair(0.0, 400.0, 80.0, PanelBounds::PINNED, open(400.0));
        assert_eq!(solution.prev, 0.0);
        assert_eq!(solution.next, 400.0);
    }

    #[test]
    fn nan_delta_is_ignored() {
        let solution = solve_pair(150.0, 250.0, f64::NAN, open(400.0), open(400.0));
        assert_eq!(solution.prev, 150.0);
        assert_eq!(solution.next, 250.0);
    }

    #[test]
    fn rounding_preserves_integral_sum() {
        let solution = solve_pair(200.0, 200.0, 33.4, open(400.0), open(400.0)).rounded();
        assert_eq!(solution.next, 167.0);
        assert_eq!(solution.prev, 233.0);
    }

    fn bounds_strategy() -> impl Strategy<Value = (f64, f64)> {
        (0.0f64..300.0, 0.0f64..300.0).prop_map(|(a, b)| (a, a + b))
    }

    proptest! {
        #[test]
        fn results_stay_within_bounds(
            (prev_min, prev_max) in bounds_strategy(),
            (next_min, next_max) in bounds_strategy(),
            prev_t in 0.0f64..=1.0,
            next_t in 0.0f64..=1.0,
            delta in -1000.0f64..1000.0,
        ) {
            let prev_bounds = PanelBounds::new(prev_min, prev_max);
            let next_bounds = PanelBounds::new(next_min, next_max);
            let prev_start = prev_min + (prev_max - prev_min) * prev_t;
            let next_start = next_min + (next_max - next_min) * next_t;

            let solution = solve_pair(prev_start, next_start, delta, prev_bounds, next_bounds);
            prop_assert!(prev_bounds.contains(solution.prev), "prev {} outside {:?}", solution.prev, prev_bounds);
            prop_assert!(next_bounds.contains(solution.next), "next {} outside {:?}", solution.next, next_bounds);
        }

        #[test]
        fn pair_sum_is_conserved(
            (prev_min, prev_max) in bounds_strategy(),
            (next_min, next_max) in bounds_strategy(),
            prev_t in 0.0f64..=1.0,
            next_t in 0.0f64..=1.0,
            delta in -1000.0f64..1000.0,
        ) {
            let prev_bounds = PanelBounds::new(prev_min, prev_max);
            let next_bounds = PanelBounds::new(next_min, next_max);
            let prev_start = prev_min + (prev_max - prev_min) * prev_t;
            let next_start = next_min + (next_max - next_min) * next_t;

            let solution = solve_pair(prev_start, next_start, delta, prev_bounds, next_bounds);
            let before = prev_start + next_start;
            let after = solution.prev + solution.next;
            prop_assert!((before - after).abs() < 1e-6, "sum drifted {before} -> {after}");
        }
    }
}
