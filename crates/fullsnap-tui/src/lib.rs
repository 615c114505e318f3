pub mod app;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::{App, HookLog, Panel};
pub use theme::Theme;
