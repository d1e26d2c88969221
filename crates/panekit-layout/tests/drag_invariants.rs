//! Property tests for drag and collapse invariants.
//!
//! Random pointer streams run against a two-panel splitter with random
//! whole-pixel bounds; after every frame both panels must sit inside their
//! bounds and the pair sum must be unchanged.

use panekit_layout::{
    Panel, PanelLayoutEngine, SplitterEvent, SplitterIgnoredReason, StaticMeasurer,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct PairCase {
    prev: u32,
    next: u32,
    prev_min: u32,
    prev_max: u32,
    next_min: u32,
    next_max: u32,
}

impl PairCase {
    fn extent(&self) -> f64 {
        f64::from(self.prev + self.next)
    }

    fn panels(&self) -> Vec<Panel> {
        vec![
            Panel::new()
                .default_size(self.prev)
                .min(self.prev_min)
                .max(self.prev_max),
            Panel::new()
                .default_size(self.next)
                .min(self.next_min)
                .max(self.next_max),
        ]
    }
}

fn pair_case() -> impl Strategy<Value = PairCase> {
    (1u32..=500, 1u32..=500).prop_flat_map(|(prev, next)| {
        (0..=prev, prev..=1000, 0..=next, next..=1000).prop_map(
            move |(prev_min, prev_max, next_min, next_max)| PairCase {
                prev,
                next,
                prev_min,
                prev_max,
                next_min,
                next_max,
            },
        )
    })
}

fn mount(case: &PairCase, lazy: bool) -> PanelLayoutEngine {
    let mut engine = PanelLayoutEngine::default().with_lazy(lazy);
    engine.sync(case.panels(), &StaticMeasurer::new(case.extent(), Vec::new()));
    engine
}

proptest! {
    #[test]
    fn live_frames_respect_bounds_and_conserve_sum(
        case in pair_case(),
        offsets in prop::collection::vec(-800.0f64..800.0, 1..24),
    ) {
        let mut engine = mount(&case, false);
        prop_assert_eq!(engine.sizes(), Some(&[f64::from(case.prev), f64::from(case.next)][..]));

        let anchor = f64::from(case.prev);
        let measurer = engine.layout_measurer().expect("mounted");
        let begin = engine.begin_drag(0, anchor, &measurer);
        prop_assert!(!begin.is_ignored());

        for offset in offsets {
            engine.drag_to(anchor + offset);
            let sizes = engine.sizes().expect("mounted").to_vec();
            prop_assert!(sizes[0] >= f64::from(case.prev_min) && sizes[0] <= f64::from(case.prev_max),
                "prev {} outside [{}, {}]", sizes[0], case.prev_min, case.prev_max);
            prop_assert!(sizes[1] >= f64::from(case.next_min) && sizes[1] <= f64::from(case.next_max),
                "next {} outside [{}, {}]", sizes[1], case.next_min, case.next_max);
            prop_assert_eq!(sizes[0] + sizes[1], case.extent());
            prop_assert_eq!(sizes[0].fract(), 0.0);

            // Same position again: no second notification.
            let repeat = engine.drag_to(anchor + offset);
            prop_assert_eq!(repeat.ignored, Some(SplitterIgnoredReason::Unchanged));
            prop_assert!(repeat.events.is_empty());
        }

        let end = engine.end_drag();
        prop_assert_eq!(end.events.len(), 1);
    }

    #[test]
    fn lazy_release_matches_live_result(
        case in pair_case(),
        offset in -800.0f64..800.0,
    ) {
        let anchor = f64::from(case.prev);

        let mut live = mount(&case, false);
        let measurer = live.layout_measurer().expect("mounted");
        live.begin_drag(0, anchor, &measurer);
        live.drag_to(anchor + offset);
        live.end_drag();

        let mut lazy = mount(&case, true);
        lazy.begin_drag(0, anchor, &measurer);
        let preview = lazy.drag_to(anchor + offset);
        prop_assert!(
            !preview.events.iter().any(|e| matches!(e, SplitterEvent::Resize { .. })),
            "lazy preview must not emit Resize events"
        );
        let release = lazy.end_drag();

        prop_assert_eq!(lazy.sizes(), live.sizes());
        let resizes = release
            .events
            .iter()
            .filter(|e| matches!(e, SplitterEvent::Resize { .. }))
            .count();
        prop_assert_eq!(resizes, 1);
        prop_assert!(
            matches!(release.events.last(), Some(SplitterEvent::ResizeEnd { .. })),
            "release must end with ResizeEnd"
        );
    }

    #[test]
    fn collapse_expand_round_trips(
        sizes in prop::collection::vec(1u32..400, 2..6),
        pick in any::<prop::sample::Index>(),
        toward_next in any::<bool>(),
    ) {
        let extent: u32 = sizes.iter().sum();
        let panels: Vec<Panel> = sizes.iter().map(|&size| Panel::new().default_size(size)).collect();
        let mut engine = PanelLayoutEngine::default();
        let measurer = StaticMeasurer::new(f64::from(extent), Vec::new());
        engine.sync(panels, &measurer);
        let before = engine.sizes().expect("mounted").to_vec();

        let resizer = pick.index(sizes.len() - 1);
        let (panel, neighbor) = if toward_next {
            (resizer, resizer + 1)
        } else {
            (resizer + 1, resizer)
        };

        let collapsed = engine.collapse(panel, neighbor, &measurer);
        prop_assert!(!collapsed.is_ignored());
        prop_assert_eq!(engine.visual_size(panel), Some(0.0));
        let total: f64 = engine.sizes().expect("mounted").iter().sum();
        prop_assert_eq!(total, f64::from(extent));

        let expanded = engine.expand(panel, neighbor, &measurer);
        prop_assert!(!expanded.is_ignored());
        let after = engine.sizes().expect("mounted").to_vec();
        for (a, b) in before.iter().zip(&after) {
            prop_assert!((a - b).abs() <= 1.0, "{before:?} -> {after:?}");
        }
    }
}
