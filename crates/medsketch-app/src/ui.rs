//! Toolbar UI built with egui.

use egui::{Align2, Context, Vec2};
use medsketch_core::{SketchSurface, WidthPreset};
use medsketch_widgets::{toolbar_frame, vertical_separator, ActionButton, WidthButton};

/// Actions triggered from the toolbar or keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Remove committed strokes (a drag in progress continues).
    Clear,
    /// Remove committed strokes and the stroke being drawn.
    ClearAll,
    /// Drop the stroke being drawn.
    DiscardStroke,
    /// Select the pen width for the next stroke.
    SetWidth(WidthPreset),
}

impl UiAction {
    /// Apply the action to the surface.
    pub fn apply(self, surface: &mut SketchSurface) {
        log::debug!("UI action: {:?}", self);
        match self {
            UiAction::Clear => surface.clear(),
            UiAction::ClearAll => surface.clear_all(),
            UiAction::DiscardStroke => {
                surface.discard_active();
            }
            UiAction::SetWidth(preset) => surface.set_width(preset),
        }
    }
}

/// Toolbar display state.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Highlighted width button, `None` if the store width is not a preset.
    pub width: Option<WidthPreset>,
    /// Number of committed strokes, shown as a status hint.
    pub stroke_count: usize,
}

impl UiState {
    /// Refresh from the surface after a mutation.
    pub fn sync(&mut self, surface: &SketchSurface) {
        self.width = WidthPreset::from_width(surface.store().current_width());
        self.stroke_count = surface.store().len();
    }
}

/// Render the toolbar and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("toolbar"))
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 12.0))
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);

                    if ActionButton::new("Clear")
                        .tooltip("Clear all strokes")
                        .shortcut("C")
                        .show(ui)
                    {
                        action = Some(UiAction::Clear);
                    }

                    vertical_separator(ui);

                    for preset in WidthPreset::ALL {
                        let selected = ui_state.width == Some(preset);
                        if WidthButton::new(preset.width().get() as f32, preset.name(), selected)
                            .shortcut(preset.shortcut())
                            .show(ui)
                        {
                            action = Some(UiAction::SetWidth(preset));
                        }
                    }

                    vertical_separator(ui);

                    ui.label(
                        egui::RichText::new(format!("{} strokes", ui_state.stroke_count))
                            .size(11.0)
                            .color(medsketch_widgets::theme::TEXT_MUTED),
                    );
                });
            });
        });

    action
}
