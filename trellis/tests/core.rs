mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::{handlers, Calls};
use trellis::controlled::Controlled;
use trellis::timer::DelayedTask;
use trellis::toggle_set::ToggleSet;
use trellis::{emit, handler, EventData, HandlerRegistry, State};
use webdom::{Event, Key, Modifiers, WINDOW_TARGET};

// =============================================================================
// HandlerRegistry
// =============================================================================

#[test]
fn test_register_and_dispatch() {
    let registry = HandlerRegistry::new();
    let calls = Calls::new();
    registry.register("save", "on_click", calls.handler());

    assert!(registry.contains("save", "on_click"));
    assert!(registry.dispatch("save", "on_click", EventData::None));
    assert!(!registry.dispatch("save", "on_focus", EventData::None));
    assert_eq!(calls.len(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_register_replaces_previous_handler() {
    let registry = HandlerRegistry::new();
    let first = Calls::new();
    let second = Calls::new();
    registry.register("save", "on_click", first.handler());
    registry.register("save", "on_click", second.handler());

    registry.dispatch("save", "on_click", EventData::None);
    assert!(first.is_empty());
    assert_eq!(second.len(), 1);
}

#[test]
fn test_unregister_and_clear() {
    let registry = HandlerRegistry::new();
    registry.register("a", "on_click", Calls::new().handler());
    registry.register("b", "on_click", Calls::new().handler());

    assert!(registry.unregister("a", "on_click"));
    assert!(!registry.unregister("a", "on_click"));
    assert_eq!(registry.len(), 1);

    registry.add_listener(WINDOW_TARGET, "on_scroll", "tip", Calls::new().handler());
    registry.clear();
    assert!(registry.is_empty());
    assert_eq!(registry.listener_count(WINDOW_TARGET, "on_scroll"), 0);
}

#[test]
fn test_scope_replaces_previous_build() {
    let registry = HandlerRegistry::new();
    registry.register("loose", "on_click", Calls::new().handler());

    let first = registry.scope("pager");
    first.register("pager-prev", "on_click", Calls::new().handler());
    first.register("pager-next", "on_click", Calls::new().handler());
    registry
        .scope("other")
        .register("other-go", "on_click", Calls::new().handler());
    assert_eq!(registry.len(), 4);

    let second = registry.scope("pager");
    assert_eq!(second.owner(), "pager");
    second.register("pager-next", "on_click", Calls::new().handler());

    assert!(!registry.contains("pager-prev", "on_click"));
    assert!(registry.contains("pager-next", "on_click"));
    assert!(registry.contains("other-go", "on_click"));
    assert!(registry.contains("loose", "on_click"));

    assert_eq!(registry.release("pager"), 1);
    assert_eq!(registry.release("pager"), 0);
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_release_keeps_ids_taken_over_by_another_owner() {
    let registry = HandlerRegistry::new();
    let taken = Calls::new();
    registry
        .scope("a")
        .register("shared", "on_click", Calls::new().handler());
    registry.scope("b").register("shared", "on_click", taken.handler());

    registry.release("a");
    assert!(registry.dispatch("shared", "on_click", EventData::None));
    assert_eq!(taken.len(), 1);
}

#[test]
fn test_same_as_compares_identity() {
    let registry = HandlerRegistry::new();
    assert!(registry.same_as(&registry.clone()));
    assert!(!registry.same_as(&HandlerRegistry::new()));
    assert!(registry.scope("x").registry().same_as(&registry));
}

#[test]
fn test_listeners_are_keyed_by_owner() {
    let registry = HandlerRegistry::new();
    let a = Calls::new();
    let b = Calls::new();
    registry.add_listener(WINDOW_TARGET, "on_resize", "a", a.handler());
    registry.add_listener(WINDOW_TARGET, "on_resize", "a", a.handler());
    registry.add_listener(WINDOW_TARGET, "on_resize", "b", b.handler());
    assert_eq!(registry.listener_count(WINDOW_TARGET, "on_resize"), 2);

    let resize = EventData::Viewport {
        width: 1024.0,
        height: 768.0,
    };
    assert!(registry.dispatch(WINDOW_TARGET, "on_resize", resize.clone()));
    assert_eq!(a.events(), vec![resize.clone()]);
    assert_eq!(b.events(), vec![resize]);

    assert!(registry.remove_listener(WINDOW_TARGET, "on_resize", "a"));
    assert!(!registry.has_listener(WINDOW_TARGET, "on_resize", "a"));
    assert!(registry.has_listener(WINDOW_TARGET, "on_resize", "b"));
    assert!(!registry.remove_listener(WINDOW_TARGET, "on_resize", "a"));
}

#[test]
fn test_handlers_may_register_during_dispatch() {
    let registry = HandlerRegistry::new();
    let inner = registry.clone();
    registry.register(
        "open",
        "on_click",
        handler(move |_| inner.register("close", "on_click", handler(|_| {}))),
    );
    registry.dispatch("open", "on_click", EventData::None);
    assert!(registry.contains("close", "on_click"));
}

#[test]
fn test_dispatch_event_maps_host_events() {
    let registry = HandlerRegistry::new();
    let input = Calls::new();
    let key = Calls::new();
    let scroll = Calls::new();
    registry.register("q", "on_input", input.handler());
    registry.register("q", "on_key", key.handler());
    registry.add_listener(WINDOW_TARGET, "on_scroll", "page", scroll.handler());

    registry.dispatch_event(&Event::Input {
        target: "q".into(),
        value: "rust".into(),
    });
    registry.dispatch_event(&Event::Key {
        target: "q".into(),
        key: Key::Enter,
        modifiers: Modifiers::new(),
    });
    registry.dispatch_event(&Event::Scroll { x: 0.0, y: 40.0 });
    assert!(!registry.dispatch_event(&Event::PointerMove {
        target: None,
        x: 1.0,
        y: 1.0
    }));

    assert_eq!(
        input.events(),
        vec![EventData::Change {
            text: "rust".into()
        }]
    );
    assert_eq!(key.last(), Some(EventData::Key(Key::Enter)));
    assert_eq!(scroll.last(), Some(EventData::Scroll { x: 0.0, y: 40.0 }));
}

#[test]
fn test_handler_context_reports_element() {
    let registry = HandlerRegistry::new();
    let seen = State::new(String::new());
    let sink = seen.clone();
    registry.register(
        "row-7",
        "on_click",
        handler(move |cx| sink.set(cx.element_id().to_string())),
    );
    registry.dispatch("row-7", "on_click", EventData::None);
    assert_eq!(seen.get(), "row-7");
}

#[test]
fn test_emit_only_calls_supplied_callbacks() {
    let on_select = Calls::new();
    let map = handlers(&[("on_select", &on_select)]);
    assert!(emit(&map, "on_select", "x", EventData::Page(2)));
    assert!(!emit(&map, "on_clear", "x", EventData::None));
    assert_eq!(on_select.events(), vec![EventData::Page(2)]);
}

#[test]
fn test_event_data_accessors() {
    assert_eq!(EventData::Change { text: "a".into() }.text(), Some("a"));
    assert_eq!(EventData::Page(3).page(), Some(3));
    assert_eq!(EventData::Query("q".into()).query(), Some("q"));
    assert_eq!(EventData::Pointer { x: 1.0, y: 2.0 }.pointer(), Some((1.0, 2.0)));
    assert_eq!(EventData::Key(Key::Up).key(), Some(Key::Up));
    assert_eq!(EventData::None.text(), None);
}

// =============================================================================
// State, Controlled, ToggleSet
// =============================================================================

#[test]
fn test_state_clones_share_value() {
    let state = State::new(1);
    let other = state.clone();
    other.update(|v| *v += 1);
    assert_eq!(state.get(), 2);
    assert!(state.is_dirty());
    state.clear_dirty();
    assert!(!other.is_dirty());
    assert_eq!(state.modify(|v| std::mem::replace(v, 10)), 2);
    assert_eq!(other.with(|v| *v), 10);
}

#[test]
fn test_controlled_uncontrolled_keeps_local_value() {
    let open = Controlled::new(false);
    assert!(!open.resolve(None));
    assert!(open.request(None, true));
    assert!(open.resolve(None));
}

#[test]
fn test_controlled_external_value_wins() {
    let open = Controlled::new(false);
    assert!(open.resolve(Some(&true)));
    // Requests while controlled are reported back but not stored.
    assert!(!open.request(Some(&true), false));
    assert!(!open.resolve(None));
    assert!(Controlled::is_controlled(Some(&true)));
    assert!(!Controlled::<bool>::is_controlled(None));
}

#[test]
fn test_controlled_request_with() {
    let selected = Controlled::new(ToggleSet::new());
    let external = ToggleSet::with_ids(["a"]);

    let next = selected.request_with(Some(&external), |set| {
        set.toggle("b");
    });
    assert_eq!(next.to_vec(), vec!["a", "b"]);
    assert!(selected.resolve(None).is_empty());

    let next = selected.request_with(None, |set| {
        set.toggle("c");
    });
    assert_eq!(next.to_vec(), vec!["c"]);
    assert!(selected.resolve(None).contains("c"));
}

#[test]
fn test_toggle_set() {
    let mut set: ToggleSet = ["b", "a"].into_iter().collect();
    assert_eq!(set.to_vec(), vec!["a", "b"]);
    assert!(!set.toggle("a"));
    assert!(set.toggle("c"));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec!["b", "c"]);
    assert_eq!(set.len(), 2);
}

// =============================================================================
// DelayedTask
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_delayed_task_runs_after_delay() {
    let task = DelayedTask::new();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();
    task.schedule(Duration::from_millis(100), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert!(task.is_pending());

    tokio::time::sleep(Duration::from_millis(60)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 1);
    assert!(!task.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_rescheduling_replaces_pending_action() {
    let task = DelayedTask::new();
    let last = State::new(0);
    for n in 1..=3 {
        let last = last.clone();
        task.schedule(Duration::from_millis(100), move || last.set(n));
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(last.get(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_and_drop_stop_pending_action() {
    let runs = Arc::new(AtomicUsize::new(0));

    let task = DelayedTask::new();
    let counter = runs.clone();
    task.schedule(Duration::from_millis(100), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    task.cancel();

    let dropped = DelayedTask::new();
    let counter = runs.clone();
    dropped.schedule(Duration::from_millis(100), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    drop(dropped);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(runs.load(Ordering::SeqCst), 0);
}

#[test]
fn test_delayed_task_without_runtime_runs_immediately() {
    let task = DelayedTask::new();
    let ran = State::new(false);
    let flag = ran.clone();
    task.schedule(Duration::from_secs(5), move || flag.set(true));
    assert!(ran.get());
    assert!(!task.is_pending());
}
