//! Tunables of a snake session.
use super::{
    grid::Grid,
    snake_game::{Result, SnakeError},
};

/// Board width in cells.
pub const GRID_COLS: usize = 30;
/// Board height in cells.
pub const GRID_ROWS: usize = 20;
/// Snake length at start and after a restart.
pub const INITIAL_SNAKE_LENGTH: usize = 3;
/// Time between two logic ticks.
pub const MILLIS_BETWEEN_TICKS: u64 = 120;
/// Score granted per food item.
pub const SCORE_PER_FOOD: u32 = 1;
/// Fill ratio at or above which food placement switches to the filtered list.
pub const CROWDED_FILL_RATIO: f64 = 0.5;

/// Min cells per axis.
pub const MIN_BOARD_SIZE: usize = 2;
/// Max cells per axis.
pub const MAX_BOARD_SIZE: usize = 200;

/// Configuration of a [`super::snake_game::SnakeGame`].
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub cols: usize,
    pub rows: usize,
    pub initial_length: usize,
    pub tick_millis: u64,
    pub score_per_food: u32,
    pub crowded_fill_ratio: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: GRID_COLS,
            rows: GRID_ROWS,
            initial_length: INITIAL_SNAKE_LENGTH,
            tick_millis: MILLIS_BETWEEN_TICKS,
            score_per_food: SCORE_PER_FOOD,
            crowded_fill_ratio: CROWDED_FILL_RATIO,
        }
    }
}

impl GameConfig {
    /// Creates a configuration for a `cols` x `rows` board with default tunables.
    ///
    /// # Errors
    ///
    /// [`SnakeError::InvalidBoardSize`] if either axis is outside
    /// `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`, or [`SnakeError::InvalidSnakeLength`]
    /// if the default snake does not fit.
    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        let config = Self {
            cols,
            rows,
            initial_length: INITIAL_SNAKE_LENGTH.min(cols / 2 + 1),
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// [`SnakeError::InvalidSnakeLength`] if the snake does not fit behind the start cell.
    pub fn with_initial_length(mut self, initial_length: usize) -> Result<Self> {
        self.initial_length = initial_length;
        self.validate()?;
        Ok(self)
    }

    /// # Errors
    ///
    /// [`SnakeError::InvalidTickRate`] if `tick_millis` is zero.
    pub fn with_tick_millis(mut self, tick_millis: u64) -> Result<Self> {
        self.tick_millis = tick_millis;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_score_per_food(mut self, score_per_food: u32) -> Self {
        self.score_per_food = score_per_food;
        self
    }

    /// # Errors
    ///
    /// [`SnakeError::InvalidFillRatio`] unless `0 < ratio <= 1`.
    pub fn with_crowded_fill_ratio(mut self, crowded_fill_ratio: f64) -> Result<Self> {
        self.crowded_fill_ratio = crowded_fill_ratio;
        self.validate()?;
        Ok(self)
    }

    /// Checks every field against its allowed range.
    ///
    /// # Errors
    ///
    /// The [`SnakeError`] naming the first field out of range.
    pub fn validate(&self) -> Result<()> {
        let sizes = MIN_BOARD_SIZE..=MAX_BOARD_SIZE;
        if !sizes.contains(&self.cols) || !sizes.contains(&self.rows) {
            return Err(SnakeError::InvalidBoardSize);
        }
        // the snake starts in the middle column and trails back towards column 0
        if self.initial_length == 0 || self.initial_length > self.cols / 2 + 1 {
            return Err(SnakeError::InvalidSnakeLength);
        }
        if !(self.crowded_fill_ratio > 0.0 && self.crowded_fill_ratio <= 1.0) {
            return Err(SnakeError::InvalidFillRatio);
        }
        if self.tick_millis == 0 {
            return Err(SnakeError::InvalidTickRate);
        }
        Ok(())
    }

    /// The board described by this configuration.
    ///
    /// # Errors
    ///
    /// [`SnakeError::InvalidBoardSize`] if an axis does not fit the cell coordinate type.
    pub fn grid(&self) -> Result<Grid> {
        let cols = i32::try_from(self.cols).map_err(|_| SnakeError::InvalidBoardSize)?;
        let rows = i32::try_from(self.rows).map_err(|_| SnakeError::InvalidBoardSize)?;
        Ok(Grid::new(cols, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cols, 30);
        assert_eq!(config.rows, 20);
        assert_eq!(config.initial_length, 3);
        assert_eq!(config.tick_millis, 120);
        assert_eq!(config.score_per_food, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_board_size_limits() {
        assert!(GameConfig::new(2, 2).is_ok());
        assert!(matches!(
            GameConfig::new(1, 20),
            Err(SnakeError::InvalidBoardSize)
        ));
        assert!(matches!(
            GameConfig::new(30, MAX_BOARD_SIZE + 1),
            Err(SnakeError::InvalidBoardSize)
        ));
    }

    #[test]
    fn test_small_board_shrinks_default_snake() {
        let config = GameConfig::new(2, 2).unwrap();
        assert_eq!(config.initial_length, 2);
    }

    #[test]
    fn test_invalid_tunables() {
        let config = GameConfig::default();
        assert!(matches!(
            config.clone().with_initial_length(0),
            Err(SnakeError::InvalidSnakeLength)
        ));
        assert!(matches!(
            config.clone().with_initial_length(17),
            Err(SnakeError::InvalidSnakeLength)
        ));
        assert!(matches!(
            config.clone().with_tick_millis(0),
            Err(SnakeError::InvalidTickRate)
        ));
        assert!(matches!(
            config.clone().with_crowded_fill_ratio(0.0),
            Err(SnakeError::InvalidFillRatio)
        ));
        assert!(matches!(
            config.with_crowded_fill_ratio(1.5),
            Err(SnakeError::InvalidFillRatio)
        ));
    }

    #[test]
    fn test_grid_matches_extent() {
        let grid = GameConfig::default().grid().unwrap();
        assert_eq!(grid.cols(), 30);
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.total_cells(), 600);
    }
}
