use std::fmt;

use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    config::GameConfig,
    food::FoodPlacer,
    grid::{Cell, Direction, Grid},
    snake_player::{MoveOutcome, SnakePlayer},
};

pub type Result<T> = std::result::Result<T, SnakeError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnakeError {
    InvalidBoardSize,
    InvalidSnakeLength,
    InvalidFillRatio,
    InvalidTickRate,
    InvalidLayout,
    BoardFull,
    RestartWhileRunning,
}

impl fmt::Display for SnakeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnakeError::InvalidBoardSize => write!(f, "board size is out of range"),
            SnakeError::InvalidSnakeLength => write!(f, "initial snake does not fit the board"),
            SnakeError::InvalidFillRatio => write!(f, "crowded fill ratio must be in (0, 1]"),
            SnakeError::InvalidTickRate => write!(f, "tick period must be non-zero"),
            SnakeError::InvalidLayout => write!(f, "snake or food layout is inconsistent"),
            SnakeError::BoardFull => write!(f, "no free cell left for food"),
            SnakeError::RestartWhileRunning => write!(f, "restart requested while running"),
        }
    }
}

impl std::error::Error for SnakeError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why a session reached [`GameStatus::GameOver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers the whole board.
    BoardFull,
}

/// Read-only view of a session after a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub end_reason: Option<EndReason>,
    pub score: u32,
    /// Head first.
    pub snake: Vec<Cell>,
    /// `None` once the board is full.
    pub food: Option<Cell>,
    pub direction: Direction,
    pub ticks: u64,
}

impl GameSnapshot {
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }
}

/// Model of one snake game: the snake, the food, the score and the run state.
#[derive(Clone, Debug)]
pub struct SnakeGame {
    config: GameConfig,
    grid: Grid,
    snake: SnakePlayer,
    food: Option<Cell>,
    placer: FoodPlacer,
    score: u32,
    status: GameStatus,
    end_reason: Option<EndReason>,
    ticks: u64,
    rng: StdRng,
}

impl SnakeGame {
    /// Creates a new game with an entropy-seeded food generator.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid, a [`SnakeError`] is returned.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a new game whose food placement is reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// If the configuration is invalid, a [`SnakeError`] is returned.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a running game from an explicit snake and food cell.
    ///
    /// # Errors
    ///
    /// [`SnakeError::InvalidLayout`] if a snake cell or the food lies off the board,
    /// or the food lies on the snake. Other variants for an invalid configuration.
    pub fn with_layout(
        config: GameConfig,
        snake: SnakePlayer,
        food: Cell,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;
        if !snake.body().all(|cell| grid.in_bounds(cell))
            || !grid.in_bounds(food)
            || grid.is_occupied(food, snake.occupied_cells())
        {
            return Err(SnakeError::InvalidLayout);
        }
        Ok(Self {
            placer: FoodPlacer::new(config.crowded_fill_ratio),
            config,
            grid,
            snake,
            food: Some(food),
            score: 0,
            status: GameStatus::Running,
            end_reason: None,
            ticks: 0,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;
        let placer = FoodPlacer::new(config.crowded_fill_ratio);
        let snake = Self::initial_snake(&config, grid);
        let food = placer.place(grid, snake.occupied_cells(), &mut rng)?;
        debug!("New snake game: {}x{}", grid.cols(), grid.rows());
        Ok(Self {
            config,
            grid,
            snake,
            food: Some(food),
            placer,
            score: 0,
            status: GameStatus::Running,
            end_reason: None,
            ticks: 0,
            rng,
        })
    }

    fn initial_snake(config: &GameConfig, grid: Grid) -> SnakePlayer {
        let head = Cell::new(grid.cols() / 2, grid.rows() / 2);
        SnakePlayer::new(head, Direction::Right, config.initial_length)
    }

    /// Forwards a turn to the snake. Ignored once the game is over.
    /// Returns true if the turn was queued.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.status == GameStatus::GameOver {
            debug!("Ignoring {:?} after game over", direction);
            return false;
        }
        self.snake.set_pending_direction(direction)
    }

    /// Runs one fixed tick and returns the resulting snapshot.
    ///
    /// Does nothing once the game is over.
    pub fn tick(&mut self) -> GameSnapshot {
        if self.status == GameStatus::GameOver {
            return self.snapshot();
        }
        self.debug_check_invariants();

        // the move that reaches the food keeps its tail in the same tick
        if self.food == Some(self.snake.next_head()) {
            self.snake.mark_growth();
        }

        match self.snake.advance(self.grid) {
            MoveOutcome::CollidedWall => self.end(EndReason::WallCollision),
            MoveOutcome::CollidedSelf => self.end(EndReason::SelfCollision),
            MoveOutcome::Moved => {
                self.ticks += 1;
                if self.food == Some(self.snake.head()) {
                    self.eat();
                }
            }
        }
        self.snapshot()
    }

    fn eat(&mut self) {
        self.score = self.score.saturating_add(self.config.score_per_food);
        debug!("Food eaten, score {}", self.score);
        match self
            .placer
            .place(self.grid, self.snake.occupied_cells(), &mut self.rng)
        {
            Ok(cell) => self.food = Some(cell),
            Err(_) => {
                self.food = None;
                self.end(EndReason::BoardFull);
            }
        }
    }

    fn end(&mut self, reason: EndReason) {
        info!("Game over ({:?}). Final score {}", reason, self.score);
        self.status = GameStatus::GameOver;
        self.end_reason = Some(reason);
    }

    /// Puts a finished game back to its initial state with fresh food.
    ///
    /// # Errors
    ///
    /// [`SnakeError::RestartWhileRunning`] if the game has not ended. The game is left as is.
    pub fn restart(&mut self) -> Result<GameSnapshot> {
        if self.status == GameStatus::Running {
            warn!("Restart requested while the game is running");
            return Err(SnakeError::RestartWhileRunning);
        }
        let snake = Self::initial_snake(&self.config, self.grid);
        let food = self
            .placer
            .place(self.grid, snake.occupied_cells(), &mut self.rng)?;
        self.snake = snake;
        self.food = Some(food);
        self.score = 0;
        self.ticks = 0;
        self.status = GameStatus::Running;
        self.end_reason = None;
        info!("Game restarted");
        Ok(self.snapshot())
    }

    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            status: self.status,
            end_reason: self.end_reason,
            score: self.score,
            snake: self.snake.body().collect(),
            food: self.food,
            direction: self.snake.direction(),
            ticks: self.ticks,
        }
    }

    fn debug_check_invariants(&self) {
        debug_assert!(
            self.snake.body().all(|cell| self.grid.in_bounds(cell)),
            "snake left the board"
        );
        debug_assert_eq!(
            self.snake.occupied_cells().len(),
            self.snake.len(),
            "snake overlaps itself"
        );
        debug_assert!(
            self.food.iter().all(|food| self.grid.in_bounds(*food)
                && !self.snake.occupied_cells().contains(food)),
            "food is off the board or on the snake"
        );
    }

    #[must_use]
    pub fn get_status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn get_end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn get_score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn get_food(&self) -> Option<Cell> {
        self.food
    }

    #[must_use]
    pub fn get_snake(&self) -> &SnakePlayer {
        &self.snake
    }

    #[must_use]
    pub fn get_grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn get_config(&self) -> &GameConfig {
        &self.config
    }
}
