pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod input;
pub mod piece;
pub mod render;
pub mod runner;
pub mod shape;
pub mod term;

pub use error::{Error, Result};
