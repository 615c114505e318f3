use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use fullsnap_core::snap::{
    Direction, EventBus, EventKind, InputEvent, Key, ListenerOptions, TransitionOutcome,
    TransitionRequest,
};
use fullsnap_core::{
    AnimateOptions, Error, PageSnap, ScrollAnimator, SnapConfig, SnapHooks, TweenAnimator,
    Viewport, WindowViewport,
};

const HEIGHT: f64 = 100.0;

type Log = Arc<Mutex<Vec<String>>>;

/// Animator whose non-instant animations resolve with values fed by the test
struct ScriptedAnimator {
    log: Log,
    calls: Mutex<Vec<(f64, AnimateOptions)>>,
    results: tokio::sync::Mutex<mpsc::UnboundedReceiver<bool>>,
    auto_resolve: Option<bool>,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

#[async_trait]
impl ScrollAnimator for ScriptedAnimator {
    async fn animate(&self, viewport: &dyn Viewport, target: f64, options: AnimateOptions) -> bool {
        if options.is_instant() {
            viewport.set_scroll_y(target);
            return true;
        }

        self.calls.lock().unwrap().push((target, options));
        self.log.lock().unwrap().push(format!("animate({target})"));
        let active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(active, Ordering::SeqCst);

        let ok = match self.auto_resolve {
            Some(ok) => ok,
            None => self.results.lock().await.recv().await.unwrap_or(false),
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        if ok {
            viewport.set_scroll_y(target);
        }
        self.log.lock().unwrap().push(format!("resolved({ok})"));
        ok
    }
}

struct Harness {
    snap: PageSnap,
    viewport: Arc<WindowViewport>,
    animator: Arc<ScriptedAnimator>,
    results: mpsc::UnboundedSender<bool>,
    log: Log,
    bus: Arc<EventBus>,
}

fn build(pages: usize, scroll_y: f64, auto_resolve: Option<bool>) -> Harness {
    let log: Log = Arc::default();
    let (results, rx) = mpsc::unbounded_channel();
    let viewport = Arc::new(WindowViewport::with_scroll(HEIGHT, scroll_y));
    let animator = Arc::new(ScriptedAnimator {
        log: log.clone(),
        calls: Mutex::default(),
        results: tokio::sync::Mutex::new(rx),
        auto_resolve,
        active: AtomicUsize::new(0),
        max_active: AtomicUsize::new(0),
    });

    let hooks = {
        let (initial, before, after) = (log.clone(), log.clone(), log.clone());
        SnapHooks::new()
            .on_initial_page(move |page| initial.lock().unwrap().push(format!("initial({page})")))
            .on_before_page_change(move |current, next| {
                before.lock().unwrap().push(format!("before({current},{next})"))
            })
            .on_after_page_change(move |previous, current| {
                after.lock().unwrap().push(format!("after({previous},{current})"))
            })
    };

    let snap = PageSnap::builder(SnapConfig::new(500.0, 1000.0))
        .with_hooks(hooks)
        .with_page_count(pages)
        .build(viewport.clone(), animator.clone());

    Harness {
        snap,
        viewport,
        animator,
        results,
        log,
        bus: Arc::new(EventBus::new()),
    }
}

/// Mounted harness with the mount's log entries cleared
async fn mounted(pages: usize, scroll_y: f64) -> Harness {
    let h = build(pages, scroll_y, None);
    h.snap.mount(h.bus.clone()).await.unwrap();
    h.log.lock().unwrap().clear();
    h
}

impl Harness {
    fn log(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn targets(&self) -> Vec<f64> {
        self.animator.calls.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }

    fn last_speed(&self) -> f64 {
        self.animator.calls.lock().unwrap().last().unwrap().1.speed
    }

    fn resolve(&self, ok: bool) {
        self.results.send(ok).unwrap();
    }
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..1000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}

#[tokio::test]
async fn go_to_page_backward_end_to_end() {
    let h = mounted(5, 200.0).await;
    assert_eq!(h.snap.current_page(), 2);

    h.snap.go_to_page(0, None);
    assert_eq!(h.log(), vec!["before(2,0)"]);

    wait_until(|| h.targets().len() == 1).await;
    assert_eq!(h.targets(), vec![0.0]);
    assert_eq!(h.last_speed(), 500.0);

    h.resolve(true);
    wait_until(|| !h.snap.is_animating()).await;
    wait_until(|| h.log().len() == 4).await;

    assert_eq!(h.snap.current_page(), 0);
    assert_eq!(h.viewport.scroll_y(), 0.0);
    assert_eq!(
        h.log(),
        vec!["before(2,0)", "animate(0)", "resolved(true)", "after(2,0)"]
    );
}

#[tokio::test]
async fn failed_transition_keeps_page_and_skips_after_hook() {
    let h = mounted(5, 0.0).await;

    h.snap.go_to_page(1, None);
    wait_until(|| h.targets().len() == 1).await;
    h.resolve(false);
    wait_until(|| !h.snap.is_animating()).await;
    wait_until(|| h.log().len() == 3).await;

    assert_eq!(h.snap.current_page(), 0);
    assert_eq!(h.log(), vec!["before(0,1)", "animate(100)", "resolved(false)"]);

    // the gate is free again
    h.snap.go_to_page(1, None);
    assert!(h.snap.is_animating());
    wait_until(|| h.targets().len() == 2).await;
    h.resolve(true);
    wait_until(|| h.snap.current_page() == 1).await;
}

#[tokio::test]
async fn overlapping_requests_are_dropped() {
    let h = mounted(5, 0.0).await;

    h.snap.go_to_page(3, None);
    h.snap.go_to_page(4, None);
    assert!(h.bus.dispatch(InputEvent::Wheel { delta_y: 1.0 }));
    assert!(h.bus.dispatch(InputEvent::KeyDown { key: Key::ArrowDown }));
    h.snap.handle().go_to_page(0, None);

    wait_until(|| h.targets().len() == 1).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
    assert_eq!(h.targets(), vec![300.0]);
    assert_eq!(h.log(), vec!["before(0,3)", "animate(300)"]);

    h.resolve(true);
    wait_until(|| !h.snap.is_animating()).await;
    assert_eq!(h.snap.current_page(), 3);
    assert_eq!(h.animator.max_active.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn awaited_transition_reports_dropped_while_busy() {
    let h = mounted(5, 0.0).await;

    h.snap.request(TransitionRequest::step(Direction::Forward));
    let outcome = h
        .snap
        .transition(TransitionRequest::step(Direction::Forward))
        .await;
    assert_eq!(outcome, TransitionOutcome::Dropped);

    wait_until(|| h.targets().len() == 1).await;
    h.resolve(true);
    wait_until(|| h.snap.current_page() == 1).await;
}

#[tokio::test]
async fn go_to_page_clamps_to_valid_range() {
    for pages in 1..=4usize {
        for requested in -3i64..=6 {
            let h = build(pages, 0.0, Some(true));
            h.snap.go_to_page(requested, None);
            wait_until(|| !h.snap.is_animating()).await;

            let expected = requested.clamp(0, pages as i64 - 1) as usize;
            assert_eq!(
                h.snap.current_page(),
                expected,
                "pages={pages} requested={requested}"
            );
        }
    }
}

#[tokio::test]
async fn go_to_current_page_still_fires_hooks() {
    let h = mounted(5, 200.0).await;

    h.snap.go_to_page(2, None);
    wait_until(|| h.targets().len() == 1).await;
    h.resolve(true);
    wait_until(|| h.log().len() == 4).await;

    assert_eq!(h.targets(), vec![200.0]);
    assert_eq!(
        h.log(),
        vec!["before(2,2)", "animate(200)", "resolved(true)", "after(2,2)"]
    );
}

#[tokio::test]
async fn mount_rounds_to_nearest_page() {
    let h = build(5, 240.0, None);

    let page = h.snap.mount(h.bus.clone()).await.unwrap();

    assert_eq!(page, 2);
    assert_eq!(h.snap.current_page(), 2);
    assert_eq!(h.viewport.scroll_y(), 200.0);
    assert_eq!(h.log(), vec!["initial(2)"]);
    assert!(h.targets().is_empty());
}

#[tokio::test]
async fn mount_attaches_cancelable_listeners() {
    let h = mounted(5, 0.0).await;

    assert!(h.snap.is_mounted());
    assert_eq!(h.bus.listener_count(), 4);
    for kind in [EventKind::Wheel, EventKind::TouchMove, EventKind::KeyDown] {
        assert_eq!(h.bus.listener_count_for(kind), 1);
        assert_eq!(h.bus.options_for(kind), Some(ListenerOptions::ACTIVE));
    }
    assert_eq!(h.bus.listener_count_for(EventKind::Resize), 1);
}

#[tokio::test]
async fn mount_twice_is_an_error() {
    let h = mounted(5, 0.0).await;

    let err = h.snap.mount(h.bus.clone()).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyMounted));
    assert_eq!(h.bus.listener_count(), 4);
    assert!(!h.log().iter().any(|entry| entry.starts_with("initial")));
}

#[tokio::test]
async fn unmount_detaches_everything() {
    let h = mounted(5, 0.0).await;

    h.snap.unmount().unwrap();
    assert_eq!(h.bus.listener_count(), 0);
    assert!(!h.bus.dispatch(InputEvent::Wheel { delta_y: 1.0 }));
    assert!(!h.snap.is_animating());
    assert!(h.targets().is_empty());

    assert!(matches!(h.snap.unmount(), Err(Error::NotMounted)));
}

#[tokio::test]
async fn wheel_direction_follows_delta_sign() {
    let h = mounted(5, 100.0).await;

    assert!(h.bus.dispatch(InputEvent::Wheel { delta_y: 0.0 }));
    wait_until(|| h.targets().len() == 1).await;
    assert_eq!(h.targets(), vec![200.0]);
    assert_eq!(h.last_speed(), 1000.0);
    h.resolve(true);
    wait_until(|| !h.snap.is_animating()).await;

    assert!(h.bus.dispatch(InputEvent::Wheel { delta_y: -3.0 }));
    wait_until(|| h.targets().len() == 2).await;
    assert_eq!(h.targets()[1], 100.0);
    assert_eq!(h.last_speed(), 500.0);
    h.resolve(true);
    wait_until(|| h.snap.current_page() == 1).await;
}

#[tokio::test]
async fn arrow_keys_page_and_other_keys_pass_through() {
    let h = mounted(5, 100.0).await;

    assert!(!h.bus.dispatch(InputEvent::KeyDown {
        key: Key::Other("Enter".into())
    }));
    assert!(!h.snap.is_animating());

    assert!(h.bus.dispatch(InputEvent::KeyDown { key: Key::ArrowUp }));
    wait_until(|| h.targets().len() == 1).await;
    assert_eq!(h.targets(), vec![0.0]);
    h.resolve(true);
    wait_until(|| !h.snap.is_animating()).await;

    assert!(h.bus.dispatch(InputEvent::KeyDown { key: Key::ArrowDown }));
    wait_until(|| h.targets().len() == 2).await;
    assert_eq!(h.targets()[1], 100.0);
    h.resolve(true);
    wait_until(|| h.snap.current_page() == 1).await;
}

#[tokio::test]
async fn touch_gesture_needs_two_moves() {
    let h = mounted(5, 100.0).await;

    assert!(h.bus.dispatch(InputEvent::TouchMove { client_y: 400.0 }));
    assert!(!h.snap.is_animating());

    // finger moved up: content follows, next page
    assert!(h.bus.dispatch(InputEvent::TouchMove { client_y: 350.0 }));
    wait_until(|| h.targets().len() == 1).await;
    assert_eq!(h.targets(), vec![200.0]);
    h.resolve(true);
    wait_until(|| !h.snap.is_animating()).await;

    assert!(h.bus.dispatch(InputEvent::TouchMove { client_y: 100.0 }));
    assert!(h.bus.dispatch(InputEvent::TouchMove { client_y: 180.0 }));
    wait_until(|| h.targets().len() == 2).await;
    assert_eq!(h.targets()[1], 100.0);
    h.resolve(true);
    wait_until(|| h.snap.current_page() == 1).await;
}

#[tokio::test]
async fn touch_during_transition_is_consumed_without_recording() {
    let h = mounted(5, 0.0).await;

    h.snap.go_to_page(1, None);
    assert!(h.bus.dispatch(InputEvent::TouchMove { client_y: 400.0 }));
    wait_until(|| h.targets().len() == 1).await;
    h.resolve(true);
    wait_until(|| !h.snap.is_animating()).await;

    // the move seen while animating did not start a gesture
    assert!(h.bus.dispatch(InputEvent::TouchMove { client_y: 100.0 }));
    assert!(!h.snap.is_animating());
    assert_eq!(h.targets().len(), 1);
}

#[tokio::test]
async fn resize_resnaps_without_hooks() {
    let h = mounted(5, 200.0).await;

    h.viewport.set_height(60.0);
    assert!(!h.bus.dispatch(InputEvent::Resize));
    wait_until(|| h.viewport.scroll_y() == 120.0).await;

    assert_eq!(h.snap.current_page(), 2);
    assert!(h.log().is_empty());
    assert!(h.targets().is_empty());
}

#[tokio::test]
async fn page_count_changes_do_not_reclamp_eagerly() {
    let h = mounted(10, 800.0).await;
    assert_eq!(h.snap.current_page(), 8);

    h.snap.sync_panels(&["a", "b", "c"]);
    assert_eq!(h.snap.page_count(), 3);
    assert_eq!(h.snap.current_page(), 8);

    h.snap.go_to_page(9, None);
    wait_until(|| h.targets().len() == 1).await;
    assert_eq!(h.targets(), vec![200.0]);
    h.resolve(true);
    wait_until(|| !h.snap.is_animating()).await;
    assert_eq!(h.snap.current_page(), 2);
}

#[tokio::test]
async fn no_pages_is_inert() {
    let h = mounted(0, 0.0).await;

    h.snap.go_to_page(3, None);
    assert!(h.bus.dispatch(InputEvent::Wheel { delta_y: 1.0 }));
    assert_eq!(
        h.snap
            .transition(TransitionRequest::step(Direction::Forward))
            .await,
        TransitionOutcome::Skipped
    );

    assert!(!h.snap.is_animating());
    assert!(h.targets().is_empty());
    assert!(h.log().is_empty());
}

#[tokio::test]
async fn speed_override_applies() {
    let h = mounted(5, 0.0).await;

    h.snap.go_to_page(2, Some(42.0));
    wait_until(|| h.targets().len() == 1).await;
    assert_eq!(h.last_speed(), 42.0);

    let options = h.animator.calls.lock().unwrap()[0].1.clone();
    assert!(!options.cancel_on_user_action);
    assert_eq!(options.vertical_offset, 0.0);
    h.resolve(true);
}

#[tokio::test]
async fn dropping_controller_detaches_and_disarms_handle() {
    let Harness { snap, bus, .. } = mounted(5, 0.0).await;
    let handle = snap.handle();
    assert!(handle.is_live());

    drop(snap);

    assert!(!handle.is_live());
    assert_eq!(bus.listener_count(), 0);
    handle.go_to_page(2, None);
}

#[tokio::test(start_paused = true)]
async fn hooks_are_optional() {
    let viewport = Arc::new(WindowViewport::new(HEIGHT));
    let snap = PageSnap::builder(SnapConfig::default())
        .with_panels(&[(), (), ()])
        .build(viewport.clone(), Arc::new(TweenAnimator::new(1000)));
    let bus = Arc::new(EventBus::new());

    assert_eq!(snap.mount(bus).await.unwrap(), 0);
    let outcome = snap
        .transition(TransitionRequest {
            direction: Direction::Forward,
            steps: 2,
            speed: Some(0.0),
        })
        .await;

    assert_eq!(outcome, TransitionOutcome::Completed { from: 0, to: 2 });
    assert_eq!(viewport.scroll_y(), 200.0);
}

#[tokio::test(start_paused = true)]
async fn resize_during_tween_interrupts_and_keeps_page() {
    let viewport = Arc::new(WindowViewport::new(HEIGHT));
    let log: Log = Arc::default();
    let hooks = {
        let after = log.clone();
        SnapHooks::new().on_after_page_change(move |previous, current| {
            after.lock().unwrap().push(format!("after({previous},{current})"))
        })
    };
    let snap = PageSnap::builder(SnapConfig::default())
        .with_hooks(hooks)
        .with_page_count(5)
        .build(viewport.clone(), Arc::new(TweenAnimator::default()));
    let bus = Arc::new(EventBus::new());
    snap.mount(bus.clone()).await.unwrap();

    snap.go_to_page(3, None);
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(snap.is_animating());
    let mid = viewport.scroll_y();
    assert!(mid > 0.0 && mid < 300.0, "tween should be midway, at {mid}");

    viewport.set_height(200.0);
    bus.dispatch(InputEvent::Resize);
    for _ in 0..100 {
        if !snap.is_animating() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(16)).await;
    }

    assert!(!snap.is_animating());
    assert_eq!(snap.current_page(), 0);
    assert_eq!(viewport.scroll_y(), 0.0);
    assert!(log.lock().unwrap().is_empty());
}

/// Arrives after yielding once, so completions land on whichever worker
/// picks the task up
struct YieldingAnimator;

#[async_trait]
impl ScrollAnimator for YieldingAnimator {
    async fn animate(
        &self,
        viewport: &dyn Viewport,
        target: f64,
        _options: AnimateOptions,
    ) -> bool {
        tokio::task::yield_now().await;
        viewport.set_scroll_y(target);
        true
    }
}

type Pairs = Arc<Mutex<Vec<(usize, usize)>>>;

/// Controller on a yielding animator recording (from, to) for both hooks
fn contended(pages: usize) -> (PageSnap, Pairs, Pairs) {
    let befores: Pairs = Arc::default();
    let afters: Pairs = Arc::default();
    let hooks = {
        let (before, after) = (befores.clone(), afters.clone());
        SnapHooks::new()
            .on_before_page_change(move |from, to| before.lock().unwrap().push((from, to)))
            .on_after_page_change(move |from, to| after.lock().unwrap().push((from, to)))
    };
    let snap = PageSnap::builder(SnapConfig::default())
        .with_hooks(hooks)
        .with_page_count(pages)
        .build(Arc::new(WindowViewport::new(HEIGHT)), Arc::new(YieldingAnimator));
    (snap, befores, afters)
}

fn len(pairs: &Pairs) -> usize {
    pairs.lock().unwrap().len()
}

async fn settle(snap: &PageSnap, befores: &Pairs, afters: &Pairs) {
    for _ in 0..2_000 {
        if !snap.is_animating() && len(befores) == len(afters) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("transitions never settled");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn back_to_back_steps_start_from_the_settled_page() {
    let (snap, befores, afters) = contended(1_000_000);

    let deadline = std::time::Instant::now() + Duration::from_secs(2);
    while len(&befores) < 2_000 && std::time::Instant::now() < deadline {
        snap.request(TransitionRequest::step(Direction::Forward));
        tokio::task::yield_now().await;
    }
    settle(&snap, &befores, &afters).await;

    let befores = befores.lock().unwrap().clone();
    assert!(!befores.is_empty());
    for (i, &(from, to)) in befores.iter().enumerate() {
        assert_eq!((from, to), (i, i + 1), "transition {i} started from a stale page");
    }
    assert_eq!(snap.current_page(), befores.len());

    let mut afters = afters.lock().unwrap().clone();
    afters.sort_unstable();
    assert_eq!(afters, befores);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn absolute_targets_resolve_against_the_settled_page() {
    let (snap, befores, afters) = contended(5);

    let spam = |page: i64| {
        let handle = snap.handle();
        tokio::spawn(async move {
            for _ in 0..5_000 {
                handle.go_to_page(page, None);
                tokio::task::yield_now().await;
            }
        })
    };
    let (low, high) = (spam(0), spam(4));
    low.await.unwrap();
    high.await.unwrap();
    settle(&snap, &befores, &afters).await;

    assert!(len(&befores) > 0);
    for &(from, to) in befores.lock().unwrap().iter() {
        assert!(to == 0 || to == 4, "go_to_page landed on {to} from {from}");
    }
    for &(_, to) in afters.lock().unwrap().iter() {
        assert!(to == 0 || to == 4);
    }
    let page = snap.current_page();
    assert!(page == 0 || page == 4);
}
