//! Toolbar widgets for the MedSketch shell, styled after Tailwind's neutrals.
//!
//! - **Buttons**: labelled action buttons and pen width buttons
//! - **Frame**: the floating toolbar panel and its separators

pub mod buttons;
pub mod frame;

pub use buttons::{ActionButton, WidthButton};
pub use frame::{toolbar_frame, vertical_separator};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Toolbar button height
    pub const BUTTON_HEIGHT: f32 = 28.0;
    /// Width button size (line sample plus label)
    pub const WIDTH_BUTTON: f32 = 56.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
