//! Full-viewport page snapping
//!
//! - `state` - page count, current page, pending touch origin
//! - `controller` - the transition gate and the input adapter
//! - `input` / `listeners` - events and their registration on the viewport
//! - `hooks` / `handle` - what the embedding layer sees

pub mod controller;
pub mod handle;
pub mod hooks;
pub mod input;
pub mod listeners;
pub mod state;

pub use controller::{PageSnap, PageSnapBuilder, TransitionOutcome};
pub use handle::PageHandle;
pub use hooks::SnapHooks;
pub use input::{DomEvent, EventKind, InputEvent, Key};
pub use listeners::{Attachment, EventBus, EventTarget, Listener, ListenerId, ListenerOptions};
pub use state::{Direction, PageState, TransitionRequest};
