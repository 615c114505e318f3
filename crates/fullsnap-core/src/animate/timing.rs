//! Time calculation utilities for scroll animations
//!
//! Uses tokio's clock so paused-time tests drive animations deterministically.

use std::time::Duration;

use tokio::time::Instant;

/// Animation progress (0.0 to 1.0) from start time and duration
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = start.elapsed().as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Tick period for a frame rate (0 falls back to ~60fps)
#[inline]
pub fn tick_duration(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16)
    } else {
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}
