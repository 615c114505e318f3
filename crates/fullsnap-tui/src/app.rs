use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use fullsnap_core::SnapHooks;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tracing::info;

use crate::theme::Theme;

const HINT: &str = "Scroll the wheel, drag, or press \u{2191}/\u{2193} to move one page.";

/// One full-viewport page of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    /// Stable identity of the panel
    pub key: String,
    pub title: String,
    pub body: String,
}

impl Panel {
    pub fn new(key: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            body: body.into(),
        }
    }

    /// Numbered demo panels
    pub fn demo(count: usize) -> Vec<Panel> {
        (0..count)
            .map(|i| {
                Panel::new(
                    format!("page-{i}"),
                    format!("Page {}", i + 1),
                    format!("Panel {i}\n\n{HINT}"),
                )
            })
            .collect()
    }
}

/// Bounded log of page hook notifications, shared with the hooks
#[derive(Debug, Clone)]
pub struct HookLog {
    entries: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
}

impl Default for HookLog {
    fn default() -> Self {
        Self::with_capacity(32)
    }
}

impl HookLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::default(),
            capacity: capacity.max(1),
        }
    }

    fn entries(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, message: impl Into<String>) {
        let mut entries = self.entries();
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(message.into());
    }

    pub fn latest(&self) -> Option<String> {
        self.entries().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Terminal demo state
pub struct App {
    pub panels: Vec<Panel>,
    pub log: HookLog,
    pub theme: Theme,
    pub show_status_bar: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(panels: Vec<Panel>, show_status_bar: bool) -> Self {
        Self {
            panels,
            log: HookLog::default(),
            theme: Theme::default(),
            show_status_bar,
            should_quit: false,
        }
    }

    /// Hooks that record page notifications into the log
    pub fn hooks(&self) -> SnapHooks {
        let (initial, before, after) = (self.log.clone(), self.log.clone(), self.log.clone());
        SnapHooks::new()
            .on_initial_page(move |page| {
                info!(page, "Initial page");
                initial.push(format!("initial: {page}"));
            })
            .on_before_page_change(move |current, next| {
                before.push(format!("before: {current} -> {next}"));
            })
            .on_after_page_change(move |previous, current| {
                after.push(format!("after: {previous} -> {current}"));
            })
    }

    /// Split the screen into the page viewport and the optional status bar
    pub fn layout(&self, area: Rect) -> (Rect, Option<Rect>) {
        if !self.show_status_bar || area.height < 2 {
            return (area, None);
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    }

    /// Height of one page for a terminal of `rows` rows
    pub fn page_height(&self, rows: u16) -> u16 {
        self.layout(Rect::new(0, 0, 1, rows)).0.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_panels_have_unique_keys() {
        let panels = Panel::demo(5);
        assert_eq!(panels.len(), 5);
        let mut keys: Vec<_> = panels.iter().map(|p| p.key.clone()).collect();
        keys.dedup();
        assert_eq!(keys.len(), 5);
        assert_eq!(panels[2].title, "Page 3");
    }

    #[test]
    fn test_hook_log_bounded() {
        let log = HookLog::with_capacity(2);
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.len(), 2);
        assert_eq!(log.latest().as_deref(), Some("c"));
    }

    #[test]
    fn test_page_height_leaves_room_for_status_bar() {
        let app = App::new(Panel::demo(3), true);
        assert_eq!(app.page_height(24), 23);

        let app = App::new(Panel::demo(3), false);
        assert_eq!(app.page_height(24), 24);
    }
}
