use eframe::egui;

use crate::panels::toolbar::ToolbarAction;

/// One labeled item in the toolbar
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub selected: bool,
}

impl ToolbarButton {
    pub fn new(action: ToolbarAction, selected: bool) -> Self {
        Self { action, selected }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        let text = format!("{} {}", self.action.icon(), self.action.label());
        let font_id = egui::FontId::proportional(16.0);
        let galley = ui.painter().layout_no_wrap(text, font_id, egui::Color32::WHITE);

        let button_size = galley.size() + egui::vec2(24.0, 16.0);
        let (rect, response) = ui.allocate_exact_size(button_size, egui::Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                egui::Color32::from_gray(60)
            } else if response.hovered() {
                egui::Color32::from_gray(40) // Lighter gray on hover
            } else {
                egui::Color32::BLACK
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_pos = rect.center() - galley.size() / 2.0;
            ui.painter().galley(text_pos, galley, egui::Color32::WHITE);

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
                );
            }
        }

        response.on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}
