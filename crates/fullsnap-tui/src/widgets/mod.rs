mod pages;
mod status_bar;

pub use pages::SnapPagesWidget;
pub use status_bar::{status_text, StatusBarWidget};
