pub mod error;
pub mod input;
pub mod render;
pub mod solver;
pub mod subset;
pub mod types;
