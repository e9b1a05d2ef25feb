#![no_std]

extern crate alloc;

pub use error::*;
pub use input::*;
pub use minesweeper::*;
pub use score::*;
pub use sim::*;
pub use snake::*;
pub use tetris::*;
pub use types::*;

mod error;
mod input;
mod minesweeper;
mod score;
mod sim;
mod snake;
mod tetris;
mod types;
