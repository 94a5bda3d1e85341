//! MedSketch Application
//!
//! The application shell providing windowing, input handling,
//! and the toolbar around the sketch surface.

mod app;
mod event_handler;
mod shortcuts;
mod ui;

pub use app::{App, AppConfig};
pub use event_handler::EventHandler;
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{render_ui, UiAction, UiState};
