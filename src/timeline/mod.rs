pub mod narrative;
pub mod pinned;
pub mod region;
