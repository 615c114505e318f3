//! Input events and their translation into page steps

use super::state::Direction;

/// Keys the page snapper distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    /// Any other key, by name
    Other(String),
}

/// Events delivered to the viewport's listeners
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Wheel rotation; positive delta scrolls down
    Wheel { delta_y: f64 },
    /// Touch contact moved to a vertical position
    TouchMove { client_y: f64 },
    KeyDown { key: Key },
    /// Viewport size changed
    Resize,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Wheel { .. } => EventKind::Wheel,
            InputEvent::TouchMove { .. } => EventKind::TouchMove,
            InputEvent::KeyDown { .. } => EventKind::KeyDown,
            InputEvent::Resize => EventKind::Resize,
        }
    }
}

/// Event type a listener subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Wheel,
    TouchMove,
    KeyDown,
    Resize,
}

/// An event as seen by one listener
///
/// `prevent_default` suppresses the surface's native handling, unless the
/// listener was registered as passive.
#[derive(Debug)]
pub struct DomEvent {
    event: InputEvent,
    passive: bool,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new(event: InputEvent, passive: bool) -> Self {
        Self {
            event,
            passive,
            default_prevented: false,
        }
    }

    pub fn event(&self) -> &InputEvent {
        &self.event
    }

    pub fn prevent_default(&mut self) {
        if self.passive {
            tracing::trace!(event = ?self.event, "prevent_default ignored on passive listener");
            return;
        }
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Non-negative wheel delta pages forward
#[inline]
pub fn wheel_direction(delta_y: f64) -> Direction {
    if delta_y >= 0.0 {
        Direction::Forward
    } else {
        Direction::Backward
    }
}

/// ArrowDown pages forward, ArrowUp backward; other keys are ignored
#[inline]
pub fn key_direction(key: &Key) -> Option<Direction> {
    match key {
        Key::ArrowDown => Some(Direction::Forward),
        Key::ArrowUp => Some(Direction::Backward),
        Key::Other(_) => None,
    }
}
