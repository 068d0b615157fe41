use eframe::egui::{self, Color32, CornerRadius, Frame, Margin, RichText, Stroke};

use crate::ui::palette;

const METRICS: [(&str, Color32); 3] = [
    ("Total Documents", palette::ACCENT),
    ("AI Conversations", palette::SUCCESS),
    ("Knowledge Items", palette::HIGHLIGHT),
];

/// Placeholder metrics page. Nothing backs these numbers yet.
pub fn render(ui: &mut egui::Ui) {
    ui.add_space(8.0);
    ui.label(
        RichText::new("Dashboard")
            .size(28.0)
            .strong()
            .color(palette::TEXT_PRIMARY),
    );
    ui.add_space(24.0);

    ui.columns(METRICS.len(), |columns| {
        for (column, (title, color)) in columns.iter_mut().zip(METRICS) {
            Frame::new()
                .fill(palette::SURFACE)
                .stroke(Stroke::new(1.0, palette::BORDER))
                .corner_radius(CornerRadius::same(8))
                .inner_margin(Margin::same(24))
                .show(column, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(title)
                            .size(16.0)
                            .strong()
                            .color(palette::TEXT_PRIMARY),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new("0").size(30.0).strong().color(color));
                });
        }
    });
}
