//! Terminal Snake on a walled board.
//!
//! The board has a one-cell border with a portal gap in the middle of each
//! edge, a handful of square obstacles, and a single apple at a time. Eating
//! apples grows the snake and speeds up the tick; eating enough of them wins.

pub mod app;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
