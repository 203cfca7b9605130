pub mod config;
pub mod scroll_scene;
