pub mod ease;
pub mod segment;
pub mod value;
