//! Button components: labelled action buttons and pen width buttons.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Pos2, Sense, Stroke, StrokeKind, Ui,
};

use crate::{sizing, theme};

/// Horizontal padding around an action button label.
const LABEL_PADDING: f32 = 10.0;

/// Format a tooltip with its shortcut hint, e.g. "Clear (C)".
fn tooltip_text(tooltip: &str, shortcut: Option<&str>) -> String {
    match shortcut {
        Some(key) => format!("{} ({})", tooltip, key),
        None => tooltip.to_string(),
    }
}

/// A text button sized to its label, e.g. "Clear".
pub struct ActionButton<'a> {
    label: &'a str,
    tooltip: Option<&'a str>,
    shortcut: Option<&'a str>,
}

impl<'a> ActionButton<'a> {
    /// Create a new action button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            tooltip: None,
            shortcut: None,
        }
    }

    /// Set hover text.
    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    /// Add a shortcut hint to the hover text.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let galley = ui.painter().layout_no_wrap(
            self.label.to_string(),
            FontId::proportional(13.0),
            theme::TEXT,
        );
        let size = vec2(galley.size().x + LABEL_PADDING * 2.0, sizing::BUTTON_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if response.is_pointer_button_down_on() {
                Color32::from_gray(230)
            } else if response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

            let text_pos = Pos2::new(
                rect.center().x - galley.size().x / 2.0,
                rect.center().y - galley.size().y / 2.0,
            );
            ui.painter().galley(text_pos, galley, theme::TEXT);
        }

        let clicked = response.clicked();
        let hover = tooltip_text(self.tooltip.unwrap_or(self.label), self.shortcut);
        response.on_hover_text(hover).on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A pen width button: a line sample drawn at the preset width over its name.
pub struct WidthButton<'a> {
    width: f32,
    label: &'a str,
    shortcut: Option<&'a str>,
    selected: bool,
}

impl<'a> WidthButton<'a> {
    /// Create a new width button.
    pub fn new(width: f32, label: &'a str, selected: bool) -> Self {
        Self {
            width,
            label,
            shortcut: None,
            selected,
        }
    }

    /// Add a shortcut hint to the hover text.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let size = vec2(sizing::WIDTH_BUTTON, sizing::BUTTON_HEIGHT + 8.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                theme::ACCENT
            } else if response.hovered() {
                Color32::from_gray(235)
            } else {
                Color32::from_gray(250)
            };

            let fg_color = if self.selected {
                Color32::WHITE
            } else {
                Color32::from_gray(60)
            };

            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

            if !self.selected {
                ui.painter().rect_stroke(
                    rect,
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    Stroke::new(1.0, Color32::from_gray(200)),
                    StrokeKind::Inside,
                );
            }

            // Line sample at the actual pen width
            let line_y = rect.top() + 10.0;
            ui.painter().line_segment(
                [
                    Pos2::new(rect.left() + 10.0, line_y),
                    Pos2::new(rect.right() - 10.0, line_y),
                ],
                Stroke::new(self.width, fg_color),
            );

            ui.painter().text(
                Pos2::new(rect.center().x, rect.bottom() - 4.0),
                Align2::CENTER_BOTTOM,
                self.label,
                FontId::proportional(11.0),
                if self.selected { Color32::WHITE } else { theme::TEXT_MUTED },
            );
        }

        let clicked = response.clicked();
        let hover = tooltip_text(self.label, self.shortcut);
        response.on_hover_text(hover).on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}
