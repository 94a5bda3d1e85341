//! Toolbar panel frame and separators.

use egui::{Color32, CornerRadius, Frame, Margin, Pos2, Stroke, Ui};

use crate::{sizing, theme};

/// Create the floating toolbar frame.
pub fn toolbar_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::symmetric(12, 6))
}

/// Draw a short vertical line between toolbar groups.
pub fn vertical_separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let height = 18.0;
    let x = rect.left() + 4.0;
    let top = rect.center().y - height / 2.0;
    ui.painter().line_segment(
        [Pos2::new(x, top), Pos2::new(x, top + height)],
        Stroke::new(1.0, Color32::from_gray(210)),
    );
    ui.add_space(9.0);
}
