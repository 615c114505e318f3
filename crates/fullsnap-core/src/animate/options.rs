//! Per-animation options and the duration policy

use std::time::Duration;

use super::easing::EasingType;
use crate::config::ScrollOptions;

const DEFAULT_SPEED: f64 = 500.0;
const DEFAULT_MIN_DURATION: Duration = Duration::from_millis(250);
const DEFAULT_MAX_DURATION: Duration = Duration::from_millis(3000);

/// Options for one animated scroll
#[derive(Debug, Clone, PartialEq)]
pub struct AnimateOptions {
    /// Milliseconds per 1000 units of distance
    pub speed: f64,
    pub min_duration: Duration,
    /// Zero requests an instantaneous jump
    pub max_duration: Duration,
    pub easing: EasingType,
    /// Abort when the offset is moved by someone else mid-animation
    pub cancel_on_user_action: bool,
    /// Added to the target offset
    pub vertical_offset: f64,
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            min_duration: DEFAULT_MIN_DURATION,
            max_duration: DEFAULT_MAX_DURATION,
            easing: EasingType::default(),
            cancel_on_user_action: true,
            vertical_offset: 0.0,
        }
    }
}

impl AnimateOptions {
    /// Zero-duration jump that cannot be cancelled
    pub fn instant() -> Self {
        Self {
            max_duration: Duration::ZERO,
            cancel_on_user_action: false,
            ..Self::default()
        }
    }

    /// Defaults overlaid with caller-supplied pass-through options
    pub fn from_scroll_options(options: &ScrollOptions) -> Self {
        let defaults = Self::default();
        Self {
            min_duration: options
                .min_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.min_duration),
            max_duration: options
                .max_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_duration),
            easing: options.easing.unwrap_or(defaults.easing),
            ..defaults
        }
    }

    #[inline]
    pub fn is_instant(&self) -> bool {
        self.max_duration.is_zero()
    }

    /// Duration for travelling `distance`: distance / 1000 * speed,
    /// clamped to [min_duration, max_duration]
    pub fn duration_for(&self, distance: f64) -> Duration {
        if self.is_instant() {
            return Duration::ZERO;
        }
        let ms = (distance.abs() / 1000.0 * self.speed.max(0.0)).max(0.0);
        if !ms.is_finite() {
            return self.max_duration;
        }
        let raw = Duration::from_secs_f64(ms / 1000.0);
        // min wins when configured above max
        raw.max(self.min_duration).min(self.max_duration.max(self.min_duration))
    }
}

impl From<&ScrollOptions> for AnimateOptions {
    fn from(options: &ScrollOptions) -> Self {
        Self::from_scroll_options(options)
    }
}
