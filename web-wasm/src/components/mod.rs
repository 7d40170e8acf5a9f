//! UIコンポーネント

pub mod caption_editor;
pub mod header;
pub mod hud;
pub mod image_list;
pub mod preview;
pub mod project_panel;
pub mod theme_select;
