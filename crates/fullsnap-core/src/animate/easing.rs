//! Easing curves for page transitions

pub use crate::config::EasingType;

/// Evaluates an easing curve
pub trait EasingTypeExt {
    /// Eased progress for `t`, with `t` clamped to [0, 1]
    fn apply(&self, t: f64) -> f64;
}

impl EasingTypeExt for EasingType {
    #[inline]
    fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingType::Linear => t,
            EasingType::EaseOutCubic => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            EasingType::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t = 2.0 * t - 2.0;
                    0.5 * t * t * t + 1.0
                }
            }
        }
    }
}
