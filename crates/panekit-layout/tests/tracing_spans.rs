#![cfg(feature = "tracing")]

//! Span capture for the engine's structured logging.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use panekit_layout::{Panel, PanelLayoutEngine, StaticMeasurer};
use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Debug, Clone, Default)]
struct CapturedSpan {
    name: &'static str,
    fields: BTreeMap<String, String>,
}

#[derive(Default)]
struct FieldVisitor {
    fields: BTreeMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_owned(), format!("{value:?}"));
    }
}

struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
}

impl<S> Layer<S> for SpanCapture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        let name = attrs.metadata().name();
        if !name.starts_with("splitter.") {
            return;
        }
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);
        self.spans.lock().expect("span capture lock").push(CapturedSpan {
            name,
            fields: visitor.fields,
        });
    }
}

fn capture(run: impl FnOnce()) -> Vec<CapturedSpan> {
    let spans = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(SpanCapture {
        spans: Arc::clone(&spans),
    });
    {
        let _guard = tracing::subscriber::set_default(subscriber);
        tracing::callsite::rebuild_interest_cache();
        run();
    }
    let captured = spans.lock().expect("span capture lock").clone();
    captured
}

fn phases(spans: &[CapturedSpan]) -> Vec<String> {
    spans
        .iter()
        .filter(|span| span.name == "splitter.drag")
        .filter_map(|span| span.fields.get("phase").cloned())
        .collect()
}

#[test]
fn drag_lifecycle_emits_drag_spans() {
    let spans = capture(|| {
        let mut engine = PanelLayoutEngine::default();
        let mount = StaticMeasurer::new(400.0, Vec::new());
        engine.sync(vec![Panel::new(), Panel::new()], &mount);
        let measurer = engine.layout_measurer().expect("mounted");
        engine.begin_drag(0, 200.0, &measurer);
        engine.drag_to(260.0);
        engine.end_drag();
    });

    assert_eq!(phases(&spans), vec!["begin", "move", "end"]);
    let moved = spans
        .iter()
        .find(|span| span.fields.get("phase").map(String::as_str) == Some("move"))
        .expect("move span");
    assert_eq!(moved.fields.get("prev_px").map(String::as_str), Some("260.0"));
    assert_eq!(moved.fields.get("next_px").map(String::as_str), Some("140.0"));
    assert_eq!(moved.fields.get("lazy").map(String::as_str), Some("false"));
}

#[test]
fn lazy_drag_logs_ghost_frames() {
    let spans = capture(|| {
        let mut engine = PanelLayoutEngine::default().with_lazy(true);
        let mount = StaticMeasurer::new(400.0, Vec::new());
        engine.sync(vec![Panel::new(), Panel::new()], &mount);
        let measurer = engine.layout_measurer().expect("mounted");
        engine.begin_drag(0, 200.0, &measurer);
        engine.drag_to(280.0);
        engine.cancel_drag();
    });
    assert_eq!(phases(&spans), vec!["begin", "ghost", "cancel"]);
}

#[test]
fn sync_and_collapse_emit_spans() {
    let spans = capture(|| {
        let mut engine = PanelLayoutEngine::default();
        let mount = StaticMeasurer::new(400.0, Vec::new());
        engine.sync(vec![Panel::new(), Panel::new()], &mount);
        let measurer = engine.layout_measurer().expect("mounted");
        engine.collapse(1, 0, &measurer);
    });

    let sync = spans
        .iter()
        .find(|span| span.name == "splitter.sync")
        .expect("sync span");
    assert_eq!(sync.fields.get("panel_count").map(String::as_str), Some("2"));
    assert_eq!(sync.fields.get("reset").map(String::as_str), Some("true"));

    let collapse = spans
        .iter()
        .find(|span| span.name == "splitter.collapse")
        .expect("collapse span");
    assert_eq!(collapse.fields.get("panel").map(String::as_str), Some("1"));
    assert_eq!(collapse.fields.get("neighbor").map(String::as_str), Some("0"));
    assert_eq!(collapse.fields.get("collapsed").map(String::as_str), Some("true"));
}
