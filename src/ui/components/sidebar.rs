use eframe::egui::{self, CornerRadius, RichText, Stroke};

use crate::ui::navigation::{ROUTES, Route, is_active};
use crate::ui::palette;

/// Draws the navigation list and returns the route the user clicked.
pub fn render(ui: &mut egui::Ui, current: Route) -> Option<Route> {
    let mut clicked = None;

    ui.add_space(16.0);
    ui.label(
        RichText::new("Knowledge Base")
            .size(20.0)
            .strong()
            .color(palette::TEXT_PRIMARY),
    );
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);

    for entry in &ROUTES {
        let active = is_active(entry, current.path());
        let (fill, text_color) = if active {
            (palette::ACCENT, egui::Color32::WHITE)
        } else {
            (egui::Color32::TRANSPARENT, palette::TEXT_SECONDARY)
        };

        let button = egui::Button::new(
            RichText::new(format!("{}  {}", entry.icon, entry.title))
                .size(14.0)
                .color(text_color),
        )
        .fill(fill)
        .stroke(Stroke::NONE)
        .corner_radius(CornerRadius::same(8))
        .min_size(egui::vec2(ui.available_width(), 40.0));

        if ui.add(button).clicked() && !active {
            clicked = Some(entry.route);
        }
        ui.add_space(4.0);
    }

    clicked
}
