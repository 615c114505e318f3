//! Event listener registration against the viewport's event source

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::input::{DomEvent, EventKind, InputEvent};

/// Callback invoked for each dispatched event of its kind
pub type Listener = Arc<dyn Fn(&mut DomEvent) + Send + Sync>;

/// Registration options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// A passive listener cannot suppress the default action
    pub passive: bool,
}

impl ListenerOptions {
    pub const ACTIVE: Self = Self { passive: false };
    pub const PASSIVE: Self = Self { passive: true };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Something listeners can be attached to (the global viewport)
pub trait EventTarget: Send + Sync {
    fn add_listener(
        &self,
        kind: EventKind,
        options: ListenerOptions,
        listener: Listener,
    ) -> ListenerId;

    /// Returns false when the id was not registered
    fn remove_listener(&self, id: ListenerId) -> bool;
}

struct Registration {
    id: ListenerId,
    kind: EventKind,
    options: ListenerOptions,
    listener: Listener,
}

/// In-memory event target
///
/// Embedders translate their native events into `InputEvent`s and hand them
/// to `dispatch`.
#[derive(Default)]
pub struct EventBus {
    next_id: AtomicU64,
    registrations: Mutex<Vec<Registration>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn registrations(&self) -> MutexGuard<'_, Vec<Registration>> {
        self.registrations.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Deliver an event to every listener of its kind, in registration
    /// order. Returns whether the default action was prevented.
    pub fn dispatch(&self, event: InputEvent) -> bool {
        let kind = event.kind();
        // Listeners run outside the lock so they may register or remove listeners
        let targets: Vec<(ListenerOptions, Listener)> = self
            .registrations()
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| (r.options, r.listener.clone()))
            .collect();

        let mut prevented = false;
        for (options, listener) in targets {
            let mut dom_event = DomEvent::new(event.clone(), options.passive);
            listener(&mut dom_event);
            prevented |= dom_event.default_prevented();
        }
        prevented
    }

    pub fn listener_count(&self) -> usize {
        self.registrations().len()
    }

    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.registrations().iter().filter(|r| r.kind == kind).count()
    }

    /// Options a listener of `kind` was registered with (first match)
    pub fn options_for(&self, kind: EventKind) -> Option<ListenerOptions> {
        self.registrations()
            .iter()
            .find(|r| r.kind == kind)
            .map(|r| r.options)
    }
}

impl EventTarget for EventBus {
    fn add_listener(
        &self,
        kind: EventKind,
        options: ListenerOptions,
        listener: Listener,
    ) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.registrations().push(Registration {
            id,
            kind,
            options,
            listener,
        });
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut registrations = self.registrations();
        let before = registrations.len();
        registrations.retain(|r| r.id != id);
        registrations.len() != before
    }
}

/// A set of listeners attached together; `detach` removes them together
pub struct Attachment {
    target: Arc<dyn EventTarget>,
    ids: Vec<ListenerId>,
}

impl Attachment {
    pub fn new(target: Arc<dyn EventTarget>) -> Self {
        Self {
            target,
            ids: Vec::new(),
        }
    }

    pub fn add(&mut self, kind: EventKind, options: ListenerOptions, listener: Listener) {
        let id = self.target.add_listener(kind, options, listener);
        self.ids.push(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn detach(mut self) {
        self.remove_all();
    }

    fn remove_all(&mut self) {
        for id in self.ids.drain(..) {
            if !self.target.remove_listener(id) {
                tracing::warn!(?id, "Listener was already removed from its target");
            }
        }
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.remove_all();
    }
}
