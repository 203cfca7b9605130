pub mod hover;
pub mod lifecycle;
pub mod sink;
