use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::models::snake::{
    grid::{Cell, Direction, Grid},
    snake_bot::SnakeBot,
    snake_game::GameSnapshot,
};

/// Follows the shortest free path to the food, or any safe cell when none exists.
#[derive(Debug, Default)]
pub struct MoveToClosestAppleBot {}

impl MoveToClosestAppleBot {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Cells the head may not enter next tick. The tail moves away, so it is left out.
    fn blocked_cells(snapshot: &GameSnapshot) -> HashSet<Cell> {
        let keep = snapshot.snake.len().saturating_sub(1);
        snapshot.snake.iter().take(keep).copied().collect()
    }

    fn first_steps(snapshot: &GameSnapshot) -> impl Iterator<Item = Direction> {
        let current = snapshot.direction;
        let may_reverse = snapshot.snake.len() <= 1;
        Direction::VARIANTS
            .into_iter()
            .filter(move |d| may_reverse || !current.is_opposite(*d))
    }

    fn bfs_towards_goal(
        snapshot: &GameSnapshot,
        grid: Grid,
        head: Cell,
        goal: Cell,
    ) -> Option<Direction> {
        let blocked = Self::blocked_cells(snapshot);
        let is_free = |cell: Cell| grid.in_bounds(cell) && !blocked.contains(&cell) && cell != head;

        // every reached cell remembers the first move that led to it
        let mut first_move: HashMap<Cell, Direction> = HashMap::new();
        let mut queue = VecDeque::new();
        for direction in Self::first_steps(snapshot) {
            let next = head.step(direction);
            if is_free(next) && !first_move.contains_key(&next) {
                first_move.insert(next, direction);
                queue.push_back(next);
            }
        }

        while let Some(cell) = queue.pop_front() {
            let Some(&direction) = first_move.get(&cell) else {
                continue;
            };
            if cell == goal {
                return Some(direction);
            }
            for step in Direction::VARIANTS {
                let next = cell.step(step);
                if is_free(next) && !first_move.contains_key(&next) {
                    first_move.insert(next, direction);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

impl SnakeBot for MoveToClosestAppleBot {
    fn make_move(&self, snapshot: &GameSnapshot, grid: Grid) -> Direction {
        let Some(head) = snapshot.head() else {
            return snapshot.direction;
        };

        if let Some(food) = snapshot.food {
            if let Some(direction) = Self::bfs_towards_goal(snapshot, grid, head, food) {
                return direction;
            }
            debug!("No path to food at {:?}", food);
        }

        let blocked = Self::blocked_cells(snapshot);
        Self::first_steps(snapshot)
            .find(|d| {
                let next = head.step(*d);
                grid.in_bounds(next) && !blocked.contains(&next)
            })
            .unwrap_or(snapshot.direction)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::snake::{
        config::GameConfig, snake_game::SnakeGame, snake_player::SnakePlayer,
    };

    use super::*;

    fn game(body: Vec<Cell>, direction: Direction, food: Cell) -> SnakeGame {
        let snake = SnakePlayer::from_body(body, direction).unwrap();
        SnakeGame::with_layout(GameConfig::default(), snake, food, 0).unwrap()
    }

    #[test]
    fn test_heads_for_food() {
        let game = game(
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
            Cell::new(5, 2),
        );
        let bot = MoveToClosestAppleBot::new();
        assert_eq!(bot.make_move(&game.snapshot(), game.get_grid()), Direction::Up);
    }

    #[test]
    fn test_food_behind_does_not_reverse() {
        let game = game(
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
            Direction::Right,
            Cell::new(1, 5),
        );
        let bot = MoveToClosestAppleBot::new();
        let direction = bot.make_move(&game.snapshot(), game.get_grid());
        assert!(direction == Direction::Up || direction == Direction::Down);
    }

    #[test]
    fn test_avoids_the_wall() {
        let game = game(
            vec![Cell::new(29, 5), Cell::new(28, 5), Cell::new(27, 5)],
            Direction::Right,
            Cell::new(29, 0),
        );
        let bot = MoveToClosestAppleBot::new();
        assert_eq!(bot.make_move(&game.snapshot(), game.get_grid()), Direction::Up);
    }

    #[test]
    fn test_reaches_food_in_play() {
        let mut game = SnakeGame::with_seed(GameConfig::new(10, 10).unwrap(), 9).unwrap();
        let bot = MoveToClosestAppleBot::new();
        for _ in 0..50 {
            let snapshot = game.snapshot();
            if snapshot.is_game_over() {
                break;
            }
            game.set_pending_direction(bot.make_move(&snapshot, game.get_grid()));
            game.tick();
        }
        assert!(game.get_score() > 0);
    }
}
