use eframe::egui::{self, CornerRadius, RichText};

use crate::ui::channel::MessageChannel;
use crate::ui::palette;

const SEND_BUTTON_SIZE: f32 = 40.0;

/// Multi-line composer. Returns true when the user asked to send: Enter or
/// the send button. Shift+Enter keeps its newline.
pub fn render(ui: &mut egui::Ui, channel: &mut MessageChannel) -> bool {
    let enabled = channel.is_enabled();
    let input_id = ui.make_persistent_id("chat_input");
    let mut send = false;

    let focused = ui.memory(|memory| memory.has_focus(input_id));
    let shift_held = ui.input(|input| input.modifiers.shift);
    if focused
        && enabled
        && !shift_held
        && ui.input_mut(|input| input.consume_key(egui::Modifiers::NONE, egui::Key::Enter))
    {
        send = true;
    }

    ui.horizontal(|ui| {
        let text_width =
            (ui.available_width() - SEND_BUTTON_SIZE - ui.spacing().item_spacing.x).max(120.0);
        ui.add_enabled(
            enabled,
            egui::TextEdit::multiline(&mut channel.input)
                .id(input_id)
                .hint_text("Type your message here...")
                .desired_rows(2)
                .desired_width(text_width),
        );

        let send_button = egui::Button::new(RichText::new("➤").size(16.0).color(egui::Color32::WHITE))
            .fill(palette::ACCENT)
            .corner_radius(CornerRadius::same(20))
            .min_size(egui::vec2(SEND_BUTTON_SIZE, SEND_BUTTON_SIZE));
        if ui.add_enabled(channel.can_send_input(), send_button).clicked() {
            send = true;
        }
    });

    ui.label(
        RichText::new("Press Enter to send, Shift+Enter for new line")
            .size(11.0)
            .color(palette::TEXT_MUTED),
    );

    send
}
