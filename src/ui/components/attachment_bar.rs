use eframe::egui::{self, CornerRadius, Frame, Margin, RichText, Stroke};

use crate::ui::attachment::{AttachmentControl, AttachmentState};
use crate::ui::palette;

const MAX_NAME_CHARS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentAction {
    Pick,
    Remove,
    Upload,
}

pub fn render(ui: &mut egui::Ui, control: &AttachmentControl) -> Option<AttachmentAction> {
    let (file, uploading) = match control.state() {
        AttachmentState::Empty => {
            let button = egui::Button::new(
                RichText::new("📎 Attach File")
                    .size(13.0)
                    .color(palette::TEXT_SECONDARY),
            )
            .stroke(Stroke::new(1.0, palette::BORDER))
            .corner_radius(CornerRadius::same(8));
            return ui
                .add(button)
                .on_hover_text("Pick a file, or drop one onto the window")
                .clicked()
                .then_some(AttachmentAction::Pick);
        }
        AttachmentState::Selected(file) => (file, false),
        AttachmentState::Uploading(file) => (file, true),
    };

    let mut action = None;

    Frame::new()
        .fill(palette::BUBBLE_ASSISTANT)
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("📄").color(palette::TEXT_MUTED));
                ui.label(
                    RichText::new(display_name(&file.file_name, MAX_NAME_CHARS))
                        .size(13.0)
                        .color(palette::TEXT_SECONDARY),
                )
                .on_hover_text(file.file_name.as_str());

                let remove = egui::Button::new(RichText::new("✖").color(palette::TEXT_MUTED))
                    .frame(false);
                if ui.add_enabled(!uploading, remove).clicked() {
                    action = Some(AttachmentAction::Remove);
                }

                if uploading {
                    ui.add(egui::Spinner::new());
                    ui.label(RichText::new("Uploading...").size(13.0));
                } else {
                    let upload = egui::Button::new(
                        RichText::new("Upload").size(13.0).color(egui::Color32::WHITE),
                    )
                    .fill(palette::ACCENT);
                    if ui.add(upload).clicked() {
                        action = Some(AttachmentAction::Upload);
                    }
                }
            });
        });

    action
}

/// Shortens long file names to `max_chars`, keeping the start.
pub fn display_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{kept}…")
}
