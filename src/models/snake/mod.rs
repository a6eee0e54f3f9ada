//! Game-state engine for single-player snake.

pub mod bots;
pub mod config;
pub mod food;
pub mod grid;
pub mod snake_bot;
pub mod snake_game;
pub mod snake_player;

pub use config::GameConfig;
pub use grid::{Cell, Direction, Grid};
pub use snake_game::{EndReason, GameSnapshot, GameStatus, SnakeError, SnakeGame};
