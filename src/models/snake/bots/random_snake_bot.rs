use rand::seq::SliceRandom;

use crate::models::snake::{
    grid::{Direction, Grid},
    snake_bot::SnakeBot,
    snake_game::GameSnapshot,
};

/// Turns at random, never straight back into its own neck.
#[derive(Debug, Default)]
pub struct RandomBot {}

impl RandomBot {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl SnakeBot for RandomBot {
    fn make_move(&self, snapshot: &GameSnapshot, _grid: Grid) -> Direction {
        let current = snapshot.direction;
        let choices: Vec<Direction> = Direction::VARIANTS
            .into_iter()
            .filter(|d| !current.is_opposite(*d))
            .collect();
        choices
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(current)
    }
}
