pub mod binding;
pub mod video;
