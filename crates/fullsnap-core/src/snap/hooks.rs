//! Optional page notifications

use std::fmt;
use std::sync::Arc;

/// Called once per mount with the page the viewport settled on
pub type PageHook = Arc<dyn Fn(usize) + Send + Sync>;

/// Called with (from, to) around a transition
pub type PageChangeHook = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Page notifications; every hook is optional
#[derive(Clone, Default)]
pub struct SnapHooks {
    initial_page: Option<PageHook>,
    before_page_change: Option<PageChangeHook>,
    after_page_change: Option<PageChangeHook>,
}

impl SnapHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_initial_page(mut self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.initial_page = Some(Arc::new(hook));
        self
    }

    pub fn on_before_page_change(
        mut self,
        hook: impl Fn(usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.before_page_change = Some(Arc::new(hook));
        self
    }

    pub fn on_after_page_change(
        mut self,
        hook: impl Fn(usize, usize) + Send + Sync + 'static,
    ) -> Self {
        self.after_page_change = Some(Arc::new(hook));
        self
    }

    pub(crate) fn initial_page(&self, page: usize) {
        if let Some(hook) = &self.initial_page {
            hook(page);
        }
    }

    pub(crate) fn before_page_change(&self, current: usize, next: usize) {
        if let Some(hook) = &self.before_page_change {
            hook(current, next);
        }
    }

    pub(crate) fn after_page_change(&self, previous: usize, current: usize) {
        if let Some(hook) = &self.after_page_change {
            hook(previous, current);
        }
    }
}

impl fmt::Debug for SnapHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapHooks")
            .field("initial_page", &self.initial_page.is_some())
            .field("before_page_change", &self.before_page_change.is_some())
            .field("after_page_change", &self.after_page_change.is_some())
            .finish()
    }
}
