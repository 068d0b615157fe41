use eframe::egui::{
    self, Align, Align2, CornerRadius, FontId, Frame, Layout, Margin, RichText, ScrollArea, Sense,
};

use crate::common::Role;
use crate::ui::conversation::{Alignment, ConversationView, alignment_for};
use crate::ui::palette;

const AVATAR_SIZE: f32 = 40.0;

/// Scrollable transcript. Sticks to the bottom and jumps there whenever the
/// caller flags new content.
pub fn render(
    ui: &mut egui::Ui,
    view: &ConversationView<'_>,
    streaming: Option<&str>,
    greeting: &str,
    scroll_to_bottom: bool,
    max_height: f32,
) {
    ScrollArea::vertical()
        .id_salt("conversation")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .max_height(max_height)
        .show(ui, |ui| {
            match view {
                ConversationView::Placeholder => render_placeholder(ui, greeting),
                ConversationView::Entries(entries) => {
                    ui.add_space(12.0);
                    for entry in entries {
                        ui.push_id(entry.id, |ui| {
                            render_bubble(ui, entry.role, entry.content, &entry.time);
                        });
                    }
                }
            }

            if let Some(partial) = streaming {
                render_bubble(ui, Role::Assistant, partial, "typing…");
            }

            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(Align::BOTTOM));
            }
        });
}

fn render_placeholder(ui: &mut egui::Ui, greeting: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.label(RichText::new("🤖").size(48.0).color(palette::TEXT_FAINT));
        ui.add_space(12.0);
        ui.label(
            RichText::new("No messages yet. Start a conversation!")
                .size(18.0)
                .color(palette::TEXT_FAINT),
        );
        ui.add_space(8.0);
        ui.label(RichText::new(greeting).size(14.0).color(palette::TEXT_MUTED));
    });
}

fn render_bubble(ui: &mut egui::Ui, role: Role, content: &str, time: &str) {
    let layout = match alignment_for(role) {
        Alignment::Right => Layout::right_to_left(Align::TOP),
        Alignment::Left => Layout::left_to_right(Align::TOP),
    };
    let (fill, text_color, time_color) = match role {
        Role::User => (palette::ACCENT, egui::Color32::WHITE, palette::ACCENT_SOFT),
        Role::Assistant => (
            palette::BUBBLE_ASSISTANT,
            palette::TEXT_PRIMARY,
            palette::TEXT_MUTED,
        ),
    };

    ui.with_layout(layout, |ui| {
        avatar(ui, role);
        let max_width = ui.available_width() * 0.7;
        Frame::new()
            .fill(fill)
            .corner_radius(CornerRadius::same(16))
            .inner_margin(Margin::symmetric(16, 12))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.vertical(|ui| {
                    ui.add(
                        egui::Label::new(RichText::new(content).size(14.0).color(text_color))
                            .wrap(),
                    );
                    ui.add_space(6.0);
                    ui.label(RichText::new(time).size(11.0).color(time_color));
                });
            });
    });
    ui.add_space(16.0);
}

fn avatar(ui: &mut egui::Ui, role: Role) {
    let (fill, glyph) = match role {
        Role::User => (palette::AVATAR_USER, "👤"),
        Role::Assistant => (palette::ACCENT, "🤖"),
    };
    let (rect, _) = ui.allocate_exact_size(egui::vec2(AVATAR_SIZE, AVATAR_SIZE), Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), AVATAR_SIZE / 2.0, fill);
    ui.painter().text(
        rect.center(),
        Align2::CENTER_CENTER,
        glyph,
        FontId::proportional(18.0),
        egui::Color32::WHITE,
    );
}
