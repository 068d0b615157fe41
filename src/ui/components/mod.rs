pub mod attachment_bar;
pub mod chat_area;
pub mod dashboard;
pub mod input_bar;
pub mod sidebar;
