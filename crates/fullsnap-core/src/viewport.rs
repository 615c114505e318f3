//! Scrollable display surface the controller pages through.

use std::sync::atomic::{AtomicU64, Ordering};

/// A window-like surface with a vertical scroll offset and a height.
///
/// Implementations use interior mutability: the controller, the animator
/// and the embedding layer all hold the same viewport.
pub trait Viewport: Send + Sync {
    /// Current vertical scroll offset
    fn scroll_y(&self) -> f64;

    /// Visible height, which is also the height of one page
    fn height(&self) -> f64;

    /// Move the vertical scroll offset
    fn set_scroll_y(&self, y: f64);
}

/// In-memory viewport
///
/// Stores both values as f64 bits so reads never block an animation tick.
#[derive(Debug)]
pub struct WindowViewport {
    scroll_y: AtomicU64,
    height: AtomicU64,
}

impl WindowViewport {
    pub fn new(height: f64) -> Self {
        Self::with_scroll(height, 0.0)
    }

    pub fn with_scroll(height: f64, scroll_y: f64) -> Self {
        Self {
            scroll_y: AtomicU64::new(scroll_y.max(0.0).to_bits()),
            height: AtomicU64::new(height.max(0.0).to_bits()),
        }
    }

    /// Update the visible height (call before dispatching a resize)
    pub fn set_height(&self, height: f64) {
        self.height.store(height.max(0.0).to_bits(), Ordering::Release);
    }
}

impl Viewport for WindowViewport {
    #[inline]
    fn scroll_y(&self) -> f64 {
        f64::from_bits(self.scroll_y.load(Ordering::Acquire))
    }

    #[inline]
    fn height(&self) -> f64 {
        f64::from_bits(self.height.load(Ordering::Acquire))
    }

    fn set_scroll_y(&self, y: f64) {
        self.scroll_y.store(y.max(0.0).to_bits(), Ordering::Release);
    }
}
