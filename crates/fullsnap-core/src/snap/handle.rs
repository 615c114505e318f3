//! Imperative navigation handle

use std::sync::Weak;

use tracing::debug;

use super::controller::Inner;

/// The controller's imperative surface: `go_to_page` and nothing else.
///
/// Does not keep the controller alive; calls after it is gone do nothing.
#[derive(Clone)]
pub struct PageHandle {
    inner: Weak<Inner>,
}

impl PageHandle {
    pub(crate) fn new(inner: Weak<Inner>) -> Self {
        Self { inner }
    }

    /// Animate to `page` (clamped); fire-and-forget, completion is only
    /// observable through the after-page-change hook
    pub fn go_to_page(&self, page: i64, speed: Option<f64>) {
        match self.inner.upgrade() {
            Some(inner) => Inner::go_to_page(&inner, page, speed),
            None => debug!(page, "go_to_page on a dropped page snapper"),
        }
    }

    /// Whether the controller behind this handle still exists
    pub fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl std::fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHandle")
            .field("live", &self.is_live())
            .finish()
    }
}
