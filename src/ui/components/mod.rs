pub mod chat_area;
pub mod chat_bubble;
pub mod input_bar;
pub mod sidebar;
