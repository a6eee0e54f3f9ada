use super::{
    bots::{move_to_closest_apple_bot::MoveToClosestAppleBot, random_snake_bot::RandomBot},
    grid::{Direction, Grid},
    snake_game::GameSnapshot,
};

/// An input source that steers the snake from the latest snapshot.
pub trait SnakeBot {
    fn make_move(&self, snapshot: &GameSnapshot, grid: Grid) -> Direction;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeBotType {
    RandomMoveBot,
    MoveToClosestAppleBot,
}

impl SnakeBotType {
    pub const VALUES: [Self; 2] = [Self::RandomMoveBot, Self::MoveToClosestAppleBot];

    #[must_use]
    pub fn make_new_bot(self) -> Box<dyn SnakeBot + Send> {
        match self {
            SnakeBotType::RandomMoveBot => Box::new(RandomBot::new()),
            SnakeBotType::MoveToClosestAppleBot => Box::new(MoveToClosestAppleBot::new()),
        }
    }
}

impl std::fmt::Display for SnakeBotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnakeBotType::RandomMoveBot => write!(f, "Randomly Moving Bot"),
            SnakeBotType::MoveToClosestAppleBot => write!(f, "Move To Closest Apple Bot"),
        }
    }
}
