pub mod animate;
pub mod config;
pub mod error;
pub mod snap;
pub mod viewport;

pub use animate::{AnimateOptions, EasingType, ScrollAnimator, TweenAnimator};
pub use config::{AppConfig, ScrollOptions, SnapConfig};
pub use error::{Error, Result};
pub use snap::{PageHandle, PageSnap, SnapHooks};
pub use viewport::{Viewport, WindowViewport};
