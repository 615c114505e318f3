//! Animated-scroll primitive
//!
//! Moves a viewport's scroll offset to a target over a duration and
//! reports whether it arrived.
//!
//! ## Atoms
//! - `easing` - Easing curves (linear, cubic ease-out, cubic ease-in-out)
//! - `timing` - Time calculation utilities (progress, interpolation)
//! - `options` - Per-animation options and duration policy
//!
//! ## Animator
//! - `animator` - `ScrollAnimator` trait and the tick-driven `TweenAnimator`

pub mod easing;
pub mod options;
pub mod timing;

pub mod animator;

pub use animator::{ScrollAnimator, TweenAnimator};
pub use easing::{EasingType, EasingTypeExt};
pub use options::AnimateOptions;
