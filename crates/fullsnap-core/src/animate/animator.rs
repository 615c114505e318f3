//! Scroll animation driver
//!
//! `TweenAnimator` walks the viewport's offset toward a target on a fixed
//! tick, applying the configured easing. Only one animation per animator is
//! live: starting another one (or calling `interrupt`) makes the running one
//! resolve `false` on its next tick.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::debug;

use super::easing::EasingTypeExt;
use super::options::AnimateOptions;
use super::timing::{lerp, progress, tick_duration};
use crate::viewport::Viewport;

/// Offsets closer than this are treated as equal when checking for
/// external scrolling
const EXTERNAL_SCROLL_TOLERANCE: f64 = 0.5;

/// Asynchronously moves a viewport's scroll offset to a target
#[async_trait]
pub trait ScrollAnimator: Send + Sync {
    /// Resolves `true` on reaching `target`, `false` if interrupted
    async fn animate(&self, viewport: &dyn Viewport, target: f64, options: AnimateOptions) -> bool;
}

/// Tick-driven animator
#[derive(Debug)]
pub struct TweenAnimator {
    tick: Duration,
    generation: AtomicU64,
}

impl Default for TweenAnimator {
    fn default() -> Self {
        Self::new(60)
    }
}

impl TweenAnimator {
    pub fn new(fps: u32) -> Self {
        Self {
            tick: tick_duration(fps),
            generation: AtomicU64::new(0),
        }
    }

    /// Abort the running animation, if any
    pub fn interrupt(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }
}

#[async_trait]
impl ScrollAnimator for TweenAnimator {
    async fn animate(&self, viewport: &dyn Viewport, target: f64, options: AnimateOptions) -> bool {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let target = (target + options.vertical_offset).max(0.0);
        let from = viewport.scroll_y();

        if options.is_instant() || (target - from).abs() < f64::EPSILON {
            viewport.set_scroll_y(target);
            return true;
        }

        let duration = options.duration_for(target - from);
        let start = Instant::now();
        let mut ticker = tokio::time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut written = from;

        loop {
            ticker.tick().await;

            if !self.is_current(generation) {
                debug!(target_offset = target, "Scroll animation superseded");
                return false;
            }
            if options.cancel_on_user_action
                && (viewport.scroll_y() - written).abs() > EXTERNAL_SCROLL_TOLERANCE
            {
                debug!(target_offset = target, "Scroll animation cancelled by external scroll");
                return false;
            }

            let t = progress(start, duration);
            written = if t >= 1.0 {
                target
            } else {
                lerp(from, target, options.easing.apply(t))
            };
            viewport.set_scroll_y(written);

            if t >= 1.0 {
                return true;
            }
        }
    }
}
