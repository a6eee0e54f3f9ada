//! Module for containing the snake controlled by the player.
use std::collections::{HashSet, VecDeque};

use log::debug;

use super::{
    grid::{Cell, Direction, Grid},
    snake_game::{Result, SnakeError},
};

/// What happened to the snake during one [`SnakePlayer::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    CollidedWall,
    CollidedSelf,
}

/// The snake in the [`crate::models::snake::snake_game::SnakeGame`].
///
/// `squares_taken` holds the body with the head at the front; `occupied` mirrors it
/// so membership checks stay O(1) on long snakes.
#[derive(Clone, Debug)]
pub struct SnakePlayer {
    squares_taken: VecDeque<Cell>,
    occupied: HashSet<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    grow_pending: bool,
}

impl SnakePlayer {
    /// Creates a straight snake of `length` cells with the head at `head`,
    /// the body trailing away from `direction`.
    #[must_use]
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut squares_taken = VecDeque::with_capacity(length.max(1));
        let behind = direction.get_opposite();
        let mut cell = head;
        squares_taken.push_back(cell);
        for _ in 1..length {
            cell = cell.step(behind);
            squares_taken.push_back(cell);
        }
        let occupied = squares_taken.iter().copied().collect();
        Self {
            squares_taken,
            occupied,
            direction,
            pending_direction: None,
            grow_pending: false,
        }
    }

    /// Creates a snake from an explicit body, head first.
    ///
    /// # Errors
    ///
    /// [`SnakeError::InvalidLayout`] if the body is empty, repeats a cell, or has
    /// two consecutive segments that do not share an edge.
    pub fn from_body(body: Vec<Cell>, direction: Direction) -> Result<Self> {
        let occupied: HashSet<Cell> = body.iter().copied().collect();
        let connected = body.windows(2).all(|pair| pair[0].is_adjacent(pair[1]));
        if body.is_empty() || occupied.len() != body.len() || !connected {
            return Err(SnakeError::InvalidLayout);
        }
        Ok(Self {
            squares_taken: body.into(),
            occupied,
            direction,
            pending_direction: None,
            grow_pending: false,
        })
    }

    /// Queues the direction applied at the start of the next [`Self::advance`].
    /// Returns false if the turn was rejected as an instant reversal.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.len() > 1 && self.direction.is_opposite(direction) {
            debug!(
                "Ignoring reversal from {:?} to {:?}",
                self.direction, direction
            );
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Direction the next move will use once the pending turn commits.
    #[must_use]
    pub fn next_direction(&self) -> Direction {
        self.pending_direction.unwrap_or(self.direction)
    }

    /// Cell the head will enter on the next [`Self::advance`].
    #[must_use]
    pub fn next_head(&self) -> Cell {
        self.head().step(self.next_direction())
    }

    /// Moves the snake one cell. A collision leaves the body untouched.
    pub fn advance(&mut self, grid: Grid) -> MoveOutcome {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
        let new_head = self.head().step(self.direction);

        if !grid.in_bounds(new_head) {
            return MoveOutcome::CollidedWall;
        }

        // the tail vacates this tick unless we are growing, so the head may take its place
        let tail_vacates = !self.grow_pending && self.tail() == new_head;
        if grid.is_occupied(new_head, &self.occupied) && !tail_vacates {
            return MoveOutcome::CollidedSelf;
        }

        if self.grow_pending {
            self.grow_pending = false;
        } else if let Some(old_tail) = self.squares_taken.pop_back() {
            self.occupied.remove(&old_tail);
        }
        self.squares_taken.push_front(new_head);
        self.occupied.insert(new_head);
        MoveOutcome::Moved
    }

    /// Keeps the tail on the next move. Calling it twice before moving still grows by one.
    pub fn mark_growth(&mut self) {
        self.grow_pending = true;
    }

    #[must_use]
    pub fn is_growth_pending(&self) -> bool {
        self.grow_pending
    }

    #[must_use]
    pub fn occupied_cells(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    /// Body segments, head first.
    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.squares_taken.iter().copied()
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        self.squares_taken[0]
    }

    #[must_use]
    pub fn tail(&self) -> Cell {
        self.squares_taken[self.squares_taken.len() - 1]
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.squares_taken.len()
    }

    /// Always false for a constructed snake.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squares_taken.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(30, 20)
    }

    fn body(snake: &SnakePlayer) -> Vec<Cell> {
        snake.body().collect()
    }

    #[test]
    fn test_new_trails_behind_head() {
        let snake = SnakePlayer::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(
            body(&snake),
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
        assert_eq!(snake.tail(), Cell::new(3, 5));
        assert_eq!(snake.occupied_cells().len(), 3);
    }

    #[test]
    fn test_from_body_rejects_bad_layouts() {
        assert!(matches!(
            SnakePlayer::from_body(vec![], Direction::Up),
            Err(SnakeError::InvalidLayout)
        ));
        assert!(matches!(
            SnakePlayer::from_body(vec![Cell::new(1, 1), Cell::new(1, 1)], Direction::Up),
            Err(SnakeError::InvalidLayout)
        ));
        assert!(matches!(
            SnakePlayer::from_body(vec![Cell::new(1, 1), Cell::new(9, 9)], Direction::Up),
            Err(SnakeError::InvalidLayout)
        ));
        // diagonal neighbours are not connected either
        assert!(matches!(
            SnakePlayer::from_body(
                vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(2, 3)],
                Direction::Up
            ),
            Err(SnakeError::InvalidLayout)
        ));
        assert!(SnakePlayer::from_body(vec![Cell::new(1, 1)], Direction::Up).is_ok());
    }

    #[test]
    fn test_plain_move_drops_tail() {
        let mut snake = SnakePlayer::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.advance(grid()), MoveOutcome::Moved);
        assert_eq!(
            body(&snake),
            vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]
        );
        assert!(!snake.occupied_cells().contains(&Cell::new(3, 5)));
    }

    #[test]
    fn test_reversal_rejected_for_long_snake() {
        let mut snake = SnakePlayer::new(Cell::new(5, 5), Direction::Right, 2);
        assert!(!snake.set_pending_direction(Direction::Left));
        assert_eq!(snake.advance(grid()), MoveOutcome::Moved);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_keeps_previous_pending_turn() {
        let mut snake = SnakePlayer::new(Cell::new(5, 5), Direction::Right, 3);
        assert!(snake.set_pending_direction(Direction::Up));
        assert!(!snake.set_pending_direction(Direction::Left));
        assert_eq!(snake.next_direction(), Direction::Up);
        snake.advance(grid());
        assert_eq!(snake.head(), Cell::new(5, 4));
    }

    #[test]
    fn test_single_segment_may_reverse() {
        let mut snake = SnakePlayer::new(Cell::new(5, 5), Direction::Right, 1);
        assert!(snake.set_pending_direction(Direction::Left));
        assert_eq!(snake.advance(grid()), MoveOutcome::Moved);
        assert_eq!(snake.head(), Cell::new(4, 5));
    }

    #[test]
    fn test_last_pending_turn_wins() {
        let mut snake = SnakePlayer::new(Cell::new(5, 5), Direction::Right, 3);
        snake.set_pending_direction(Direction::Up);
        snake.set_pending_direction(Direction::Down);
        snake.advance(grid());
        assert_eq!(snake.head(), Cell::new(5, 6));
        // the turn commits once; the next move keeps going down
        snake.advance(grid());
        assert_eq!(snake.head(), Cell::new(5, 7));
    }

    #[test]
    fn test_growth_keeps_tail_once() {
        let mut snake = SnakePlayer::new(Cell::new(5, 5), Direction::Right, 3);
        snake.mark_growth();
        snake.mark_growth();
        snake.advance(grid());
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Cell::new(3, 5));
        assert!(!snake.is_growth_pending());
        snake.advance(grid());
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_wall_collision_leaves_body() {
        let mut snake = SnakePlayer::new(Cell::new(29, 5), Direction::Right, 3);
        let before = body(&snake);
        assert_eq!(snake.advance(grid()), MoveOutcome::CollidedWall);
        assert_eq!(body(&snake), before);
    }

    #[test]
    fn test_head_may_follow_vacating_tail() {
        // a 2x2 loop: head (5,5) -> (5,6) -> (6,6) -> tail (6,5), heading up then right
        let mut snake = SnakePlayer::from_body(
            vec![
                Cell::new(5, 5),
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
            ],
            Direction::Up,
        )
        .unwrap();
        snake.set_pending_direction(Direction::Right);
        assert_eq!(snake.advance(grid()), MoveOutcome::Moved);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.occupied_cells().len(), 4);
        assert!(snake.occupied_cells().contains(&Cell::new(6, 5)));
    }

    #[test]
    fn test_growing_snake_hits_its_tail() {
        let mut snake = SnakePlayer::from_body(
            vec![
                Cell::new(5, 5),
                Cell::new(5, 6),
                Cell::new(6, 6),
                Cell::new(6, 5),
            ],
            Direction::Up,
        )
        .unwrap();
        snake.set_pending_direction(Direction::Right);
        snake.mark_growth();
        let before = body(&snake);
        assert_eq!(snake.advance(grid()), MoveOutcome::CollidedSelf);
        assert_eq!(body(&snake), before);
    }

    #[test]
    fn test_self_collision_on_body() {
        // head (5,5) with the body wrapping below it; turning down hits (5,6)
        let mut snake = SnakePlayer::from_body(
            vec![
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(4, 6),
                Cell::new(5, 6),
                Cell::new(6, 6),
            ],
            Direction::Right,
        )
        .unwrap();
        snake.set_pending_direction(Direction::Down);
        let before = body(&snake);
        assert_eq!(snake.advance(grid()), MoveOutcome::CollidedSelf);
        assert_eq!(body(&snake), before);
    }
}
