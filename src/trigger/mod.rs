pub mod geometry;
pub mod policy;
pub mod threshold;
pub mod viewport;
