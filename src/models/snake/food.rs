//! Placement of the single food item.
use std::collections::HashSet;

use log::{debug, warn};
use rand::{seq::SliceRandom, Rng};

use super::{
    config::CROWDED_FILL_RATIO,
    grid::{Cell, Grid},
    snake_game::{Result, SnakeError},
};

/// Picks a free cell for the food.
///
/// On a sparse board it samples random cells until one is free. Once the occupied
/// share reaches `crowded_fill_ratio` it lists the free cells in one pass and picks
/// among them, so the cost never exceeds one sweep of the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoodPlacer {
    crowded_fill_ratio: f64,
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new(CROWDED_FILL_RATIO)
    }
}

impl FoodPlacer {
    #[must_use]
    pub fn new(crowded_fill_ratio: f64) -> Self {
        Self { crowded_fill_ratio }
    }

    /// Returns a cell of `grid` that is not in `occupied`.
    ///
    /// # Errors
    ///
    /// [`SnakeError::BoardFull`] if every cell is occupied.
    pub fn place<R: Rng + ?Sized>(
        self,
        grid: Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Cell> {
        let total_cells = grid.total_cells();
        if occupied.len() >= total_cells {
            warn!("No where left to place food");
            return Err(SnakeError::BoardFull);
        }
        if self.is_crowded(occupied.len(), total_cells) {
            Self::place_from_free_list(grid, occupied, rng)
        } else {
            Ok(Self::place_by_sampling(grid, occupied, rng))
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn is_crowded(self, occupied: usize, total_cells: usize) -> bool {
        occupied as f64 / total_cells as f64 >= self.crowded_fill_ratio
    }

    // at least one free cell exists here, so the loop terminates
    fn place_by_sampling<R: Rng + ?Sized>(
        grid: Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Cell {
        let mut attempts = 1_u32;
        loop {
            let cell = Cell::new(rng.gen_range(0..grid.cols()), rng.gen_range(0..grid.rows()));
            if !grid.is_occupied(cell, occupied) {
                debug!("Placed food at {:?} after {} samples", cell, attempts);
                return cell;
            }
            attempts += 1;
        }
    }

    fn place_from_free_list<R: Rng + ?Sized>(
        grid: Grid,
        occupied: &HashSet<Cell>,
        rng: &mut R,
    ) -> Result<Cell> {
        let available: Vec<Cell> = grid
            .cells()
            .filter(|cell| !grid.is_occupied(*cell, occupied))
            .collect();
        debug!("Choosing food among {} free cells", available.len());
        available
            .choose(rng)
            .copied()
            .ok_or(SnakeError::BoardFull)
    }
}
