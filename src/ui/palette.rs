use eframe::egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);
pub const ACCENT_SOFT: Color32 = Color32::from_rgb(219, 234, 254);
pub const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
pub const HIGHLIGHT: Color32 = Color32::from_rgb(147, 51, 234);
pub const DANGER: Color32 = Color32::from_rgb(220, 38, 38);

pub const SURFACE: Color32 = Color32::WHITE;
pub const SURFACE_MUTED: Color32 = Color32::from_rgb(249, 250, 251);
pub const BUBBLE_ASSISTANT: Color32 = Color32::from_rgb(243, 244, 246);
pub const BORDER: Color32 = Color32::from_rgb(229, 231, 235);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(17, 24, 39);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(55, 65, 81);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);
pub const TEXT_FAINT: Color32 = Color32::from_rgb(156, 163, 175);
pub const AVATAR_USER: Color32 = Color32::from_rgb(75, 85, 99);
