pub mod conditional;
pub mod grid;
