pub mod line;
pub mod read;
pub mod section;
