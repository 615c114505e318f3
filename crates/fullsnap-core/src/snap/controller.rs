//! Page transition controller
//!
//! Turns wheel, touch, keyboard and programmatic requests into single page
//! transitions. At most one transition is in flight; requests arriving
//! meanwhile are dropped, not queued.
//!
//! Transitions are fire-and-forget: the gate is taken and the before-hook
//! runs synchronously in the caller, the animation runs on a spawned Tokio
//! task. Every entry point that starts a transition must therefore be
//! called from within a Tokio runtime.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::handle::PageHandle;
use super::hooks::SnapHooks;
use super::input::{key_direction, wheel_direction, DomEvent, EventKind, InputEvent};
use super::listeners::{Attachment, EventTarget, ListenerOptions};
use super::state::{Direction, PageState, TransitionRequest};
use crate::animate::{AnimateOptions, ScrollAnimator};
use crate::config::SnapConfig;
use crate::viewport::Viewport;
use crate::{Error, Result};

/// What became of a transition request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// The animation arrived and the current page moved
    Completed { from: usize, to: usize },
    /// The animation was interrupted; the current page is unchanged
    Interrupted { from: usize, to: usize },
    /// Another transition was in flight
    Dropped,
    /// There are no pages
    Skipped,
}

/// Builder for [`PageSnap`]
#[derive(Debug)]
pub struct PageSnapBuilder {
    config: SnapConfig,
    hooks: SnapHooks,
    page_count: usize,
}

impl PageSnapBuilder {
    pub fn with_hooks(mut self, hooks: SnapHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_page_count(mut self, page_count: usize) -> Self {
        self.page_count = page_count;
        self
    }

    /// Page count from the initial panel sequence
    pub fn with_panels<T>(self, panels: &[T]) -> Self {
        self.with_page_count(panels.len())
    }

    pub fn build(self, viewport: Arc<dyn Viewport>, animator: Arc<dyn ScrollAnimator>) -> PageSnap {
        PageSnap {
            inner: Arc::new(Inner {
                config: self.config,
                hooks: self.hooks,
                viewport,
                animator,
                state: Mutex::new(PageState::new(self.page_count)),
                animating: AtomicBool::new(false),
                attachment: Mutex::new(None),
            }),
        }
    }
}

/// Full-viewport page snapping controller
///
/// Cloning is cheap; clones share one controller.
#[derive(Clone)]
pub struct PageSnap {
    inner: Arc<Inner>,
}

pub(crate) struct Inner {
    config: SnapConfig,
    hooks: SnapHooks,
    viewport: Arc<dyn Viewport>,
    animator: Arc<dyn ScrollAnimator>,
    state: Mutex<PageState>,
    animating: AtomicBool,
    attachment: Mutex<Option<Attachment>>,
}

/// Holds the in-flight gate; releases it when dropped
struct InFlight {
    inner: Arc<Inner>,
}

impl InFlight {
    fn acquire(inner: &Arc<Inner>) -> Option<Self> {
        inner
            .animating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self {
            inner: inner.clone(),
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.inner.animating.store(false, Ordering::Release);
    }
}

/// A transition that passed the gate and is ready to animate
struct Transition {
    gate: InFlight,
    from: usize,
    to: usize,
    speed: f64,
}

impl Transition {
    async fn run(self) -> TransitionOutcome {
        let Transition {
            gate,
            from,
            to,
            speed,
        } = self;
        let inner = gate.inner.clone();
        let viewport = inner.viewport.clone();

        let target = to as f64 * viewport.height();
        let arrived = inner
            .animator
            .animate(&*viewport, target, inner.animate_options(speed))
            .await;

        if !arrived {
            drop(gate);
            debug!(from, to, "Page transition interrupted");
            return TransitionOutcome::Interrupted { from, to };
        }

        // The next request must see the settled index once it can pass the gate
        inner.state().current = to;
        drop(gate);
        info!(from, to, "Page transition completed");
        inner.hooks.after_page_change(from, to);
        TransitionOutcome::Completed { from, to }
    }
}

/// What a request aims at
#[derive(Debug, Clone, Copy)]
enum Goal {
    /// Relative to the settled page
    Step(TransitionRequest),
    /// An absolute page, clamped
    Page { page: i64, speed: Option<f64> },
}

/// Page nearest to a scroll offset, within [0, N-1]
fn nearest_page(scroll_y: f64, height: f64, page_count: usize) -> usize {
    if height.is_nan() || height <= 0.0 || !scroll_y.is_finite() {
        return 0;
    }
    let page = (scroll_y / height).round().max(0.0) as usize;
    page.min(page_count.saturating_sub(1))
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn attachment(&self) -> MutexGuard<'_, Option<Attachment>> {
        self.attachment.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_animating(&self) -> bool {
        self.animating.load(Ordering::Acquire)
    }

    /// Controller-owned fields always override the pass-through options
    fn animate_options(&self, speed: f64) -> AnimateOptions {
        AnimateOptions {
            speed,
            cancel_on_user_action: false,
            vertical_offset: 0.0,
            ..AnimateOptions::from(&self.config.scroll_options)
        }
    }

    fn begin(self: &Arc<Self>, goal: Goal) -> std::result::Result<Transition, TransitionOutcome> {
        let state = self.state();
        if state.page_count() == 0 {
            return Err(TransitionOutcome::Skipped);
        }
        let gate = InFlight::acquire(self).ok_or(TransitionOutcome::Dropped)?;
        let from = state.current();
        let request = match goal {
            Goal::Step(request) => request,
            Goal::Page { page, speed } => TransitionRequest::to_page(from, page, speed),
        };
        let to = state
            .target_for(request.direction, request.steps)
            .unwrap_or(from);
        drop(state);

        let speed = request.speed.unwrap_or(match request.direction {
            Direction::Forward => self.config.speed_down,
            Direction::Backward => self.config.speed_up,
        });

        self.hooks.before_page_change(from, to);
        Ok(Transition {
            gate,
            from,
            to,
            speed,
        })
    }

    fn spawn_transition(self: &Arc<Self>, goal: Goal) -> Option<JoinHandle<TransitionOutcome>> {
        match self.begin(goal) {
            Ok(transition) => Some(tokio::spawn(transition.run())),
            Err(outcome) => {
                debug!(?goal, ?outcome, "Transition request not started");
                None
            }
        }
    }

    pub(crate) fn go_to_page(self: &Arc<Self>, page: i64, speed: Option<f64>) {
        self.spawn_transition(Goal::Page { page, speed });
    }

    fn step(self: &Arc<Self>, direction: Direction) {
        self.spawn_transition(Goal::Step(TransitionRequest::step(direction)));
    }

    async fn resnap(&self) {
        let page = self.state().current();
        let height = self.viewport.height();
        debug!(page, height, "Re-snapping to current page");
        self.animator
            .animate(&*self.viewport, page as f64 * height, AnimateOptions::instant())
            .await;
    }

    fn handle_event(self: &Arc<Self>, event: &mut DomEvent) {
        match event.event().clone() {
            InputEvent::Wheel { delta_y } => {
                event.prevent_default();
                self.step(wheel_direction(delta_y));
            }
            InputEvent::TouchMove { client_y } => {
                event.prevent_default();
                if self.is_animating() {
                    return;
                }
                let direction = self.state().track_touch(client_y);
                if let Some(direction) = direction {
                    self.step(direction);
                }
            }
            InputEvent::KeyDown { key } => {
                if let Some(direction) = key_direction(&key) {
                    event.prevent_default();
                    self.step(direction);
                }
            }
            InputEvent::Resize => {
                let inner = self.clone();
                tokio::spawn(async move { inner.resnap().await });
            }
        }
    }
}

impl PageSnap {
    pub fn builder(config: SnapConfig) -> PageSnapBuilder {
        PageSnapBuilder {
            config,
            hooks: SnapHooks::default(),
            page_count: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.inner.state().current()
    }

    pub fn page_count(&self) -> usize {
        self.inner.state().page_count()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.attachment().is_some()
    }

    /// Re-derive the page count after the panel sequence changed
    pub fn sync_panels<T>(&self, panels: &[T]) {
        self.set_page_count(panels.len());
    }

    pub fn set_page_count(&self, page_count: usize) {
        self.inner.state().set_page_count(page_count);
    }

    /// Animate to `page` (clamped to the valid range); fire-and-forget
    pub fn go_to_page(&self, page: i64, speed: Option<f64>) {
        self.inner.go_to_page(page, speed);
    }

    /// Start a transition without waiting for it
    pub fn request(&self, request: TransitionRequest) {
        self.inner.spawn_transition(Goal::Step(request));
    }

    /// Start a transition and wait for it to settle
    pub async fn transition(&self, request: TransitionRequest) -> TransitionOutcome {
        match self.inner.begin(Goal::Step(request)) {
            Ok(transition) => transition.run().await,
            Err(outcome) => outcome,
        }
    }

    /// Snap to the current page's offset against the viewport's present
    /// height. Leaves the index and hooks alone.
    pub async fn resnap(&self) {
        self.inner.resnap().await;
    }

    /// Route one event through the input adapter
    pub fn handle_event(&self, event: &mut DomEvent) {
        self.inner.handle_event(event);
    }

    /// Narrow `go_to_page` handle that does not keep the controller alive
    pub fn handle(&self) -> PageHandle {
        PageHandle::new(Arc::downgrade(&self.inner))
    }

    /// Snap to the page nearest the viewport's offset, report it through the
    /// initial-page hook, then attach listeners to `target`.
    ///
    /// Returns the initial page.
    pub async fn mount(&self, target: Arc<dyn EventTarget>) -> Result<usize> {
        if self.is_mounted() {
            warn!("Page snapper mounted twice");
            return Err(Error::AlreadyMounted);
        }

        let inner = &self.inner;
        let height = inner.viewport.height();
        let page = {
            let mut state = inner.state();
            let page = nearest_page(inner.viewport.scroll_y(), height, state.page_count());
            state.current = page;
            page
        };

        inner
            .animator
            .animate(&*inner.viewport, page as f64 * height, AnimateOptions::instant())
            .await;
        inner.hooks.initial_page(page);

        let attachment = self.listen(target);
        let mut slot = inner.attachment();
        if slot.is_some() {
            warn!("Page snapper mounted concurrently; keeping the first mount");
            return Err(Error::AlreadyMounted);
        }
        *slot = Some(attachment);
        info!(page, pages = self.page_count(), "Page snapper mounted");
        Ok(page)
    }

    /// Detach every listener registered by `mount`
    pub fn unmount(&self) -> Result<()> {
        let attachment = self.inner.attachment().take().ok_or(Error::NotMounted)?;
        attachment.detach();
        self.inner.state().touch_origin = None;
        info!("Page snapper unmounted");
        Ok(())
    }

    fn listen(&self, target: Arc<dyn EventTarget>) -> Attachment {
        let mut attachment = Attachment::new(target);
        for (kind, options) in [
            (EventKind::Wheel, ListenerOptions::ACTIVE),
            (EventKind::TouchMove, ListenerOptions::ACTIVE),
            (EventKind::KeyDown, ListenerOptions::ACTIVE),
            (EventKind::Resize, ListenerOptions::PASSIVE),
        ] {
            let weak = Arc::downgrade(&self.inner);
            attachment.add(
                kind,
                options,
                Arc::new(move |event: &mut DomEvent| {
                    if let Some(inner) = weak.upgrade() {
                        inner.handle_event(event);
                    }
                }),
            );
        }
        attachment
    }
}

impl fmt::Debug for PageSnap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state();
        f.debug_struct("PageSnap")
            .field("page_count", &state.page_count())
            .field("current", &state.current())
            .field("animating", &self.inner.is_animating())
            .finish()
    }
}
