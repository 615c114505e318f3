use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use fullsnap_core::snap::{InputEvent, Key};

/// Event handler for terminal events
pub struct EventHandler {
    tick_rate: Duration,
    animation_tick: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64, animation_fps: u32) -> Self {
        let animation_ms = if animation_fps == 0 {
            16
        } else {
            (1000 / animation_fps as u64).max(1)
        };
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
            animation_tick: Duration::from_millis(animation_ms),
        }
    }

    /// Poll for the next event
    ///
    /// `animating` shortens the wait so frames keep up with the transition.
    pub fn next(&self, animating: bool) -> Result<Option<AppEvent>> {
        let timeout = if animating {
            self.animation_tick
        } else {
            self.tick_rate
        };
        if event::poll(timeout)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }
}

/// Application events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Input for the page snapper
    Input(InputEvent),
    /// Terminal was resized
    Resize { width: u16, height: u16 },
    Quit,
    /// Tick event for periodic redraws
    Tick,
}

/// Map a terminal event onto the page snapper's inputs
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // Only handle key press events, ignore release events
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(translate_key(key)),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(width, height) => Some(AppEvent::Resize { width, height }),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> AppEvent {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => AppEvent::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => AppEvent::Quit,
        (KeyCode::Esc, _) => AppEvent::Quit,
        (KeyCode::Up, _) => AppEvent::Input(InputEvent::KeyDown { key: Key::ArrowUp }),
        (KeyCode::Down, _) => AppEvent::Input(InputEvent::KeyDown { key: Key::ArrowDown }),
        (code, _) => AppEvent::Input(InputEvent::KeyDown {
            key: Key::Other(format!("{:?}", code)),
        }),
    }
}

/// Wheel notches become unit deltas; a left-button drag stands in for touch
fn translate_mouse(mouse: MouseEvent) -> Option<AppEvent> {
    let input = match mouse.kind {
        MouseEventKind::ScrollDown => InputEvent::Wheel { delta_y: 1.0 },
        MouseEventKind::ScrollUp => InputEvent::Wheel { delta_y: -1.0 },
        MouseEventKind::Drag(MouseButton::Left) => InputEvent::TouchMove {
            client_y: mouse.row as f64,
        },
        _ => return None,
    };
    Some(AppEvent::Input(input))
}
