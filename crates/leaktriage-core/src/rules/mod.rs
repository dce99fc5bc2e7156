pub mod catalog;
pub mod classify;
