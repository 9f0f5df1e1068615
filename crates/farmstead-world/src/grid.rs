//! The fixed 5x5 farm grid.
//!
//! Plots are addressed either by linear index (`0..25`, row-major) or by
//! [`Coords`]. Index `i` maps to `row = i / 5`, `col = i % 5`, and the two
//! conversions round-trip exactly for every valid index.
//!
//! ```text
//!  0  1  2  3  4
//!  5  6  7  8  9
//! 10 11 12 13 14
//! 15 16 17 18 19
//! 20 21 22 23 24
//! ```

use serde::Serialize;
use tracing::debug;

use farmstead_types::{Coords, Tile, TileState};

use crate::error::FarmError;
use crate::tile_state::tile_state_for;

/// Width and height of the farm.
pub const GRID_SIZE: usize = 5;

/// Number of plots on the farm.
pub const TILE_COUNT: usize = 25;

/// Convert a linear plot index to grid coordinates.
///
/// # Errors
///
/// Returns [`FarmError::InvalidTileIndex`] for indices outside `0..25`.
pub const fn tile_index_to_coords(index: usize) -> Result<Coords, FarmError> {
    if index >= TILE_COUNT {
        return Err(FarmError::InvalidTileIndex(index));
    }
    match (index.checked_div(GRID_SIZE), index.checked_rem(GRID_SIZE)) {
        (Some(row), Some(col)) => Ok(Coords { row, col }),
        _ => Err(FarmError::InvalidTileIndex(index)),
    }
}

/// Convert grid coordinates to a linear plot index.
///
/// # Errors
///
/// Returns [`FarmError::InvalidCoords`] when either coordinate is outside `0..5`.
pub fn coords_to_tile_index(row: usize, col: usize) -> Result<usize, FarmError> {
    if row >= GRID_SIZE || col >= GRID_SIZE {
        return Err(FarmError::InvalidCoords { row, col });
    }
    row.checked_mul(GRID_SIZE)
        .and_then(|base| base.checked_add(col))
        .ok_or(FarmError::ArithmeticOverflow)
}

/// Whether a position lies on the outer ring of the grid.
pub const fn is_perimeter(coords: Coords) -> bool {
    let edge = GRID_SIZE.saturating_sub(1);
    coords.row == 0 || coords.col == 0 || coords.row == edge || coords.col == edge
}

/// Step from `coords` by a signed offset, returning the index of the
/// destination plot if it is on the grid.
pub fn offset_index(coords: Coords, d_row: isize, d_col: isize) -> Option<usize> {
    let row = coords.row.checked_add_signed(d_row)?;
    let col = coords.col.checked_add_signed(d_col)?;
    coords_to_tile_index(row, col).ok()
}

/// A stored tile together with its state at the grid's evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Plot {
    /// Linear index on the grid.
    pub index: usize,
    /// Grid position.
    pub coords: Coords,
    /// Stored plot data.
    pub tile: Tile,
    /// Derived readiness.
    pub state: TileState,
}

/// An immutable snapshot of all 25 plots, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmGrid {
    evaluated_at: i64,
    plots: Vec<Plot>,
}

impl FarmGrid {
    /// The timestamp the tile states were computed for.
    pub const fn evaluated_at(&self) -> i64 {
        self.evaluated_at
    }

    /// The plot at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::InvalidTileIndex`] for indices outside `0..25`.
    pub fn plot(&self, index: usize) -> Result<&Plot, FarmError> {
        self.plots
            .get(index)
            .ok_or(FarmError::InvalidTileIndex(index))
    }

    /// The derived state at `index`, or `None` when off the grid.
    pub fn state(&self, index: usize) -> Option<&TileState> {
        self.plots.get(index).map(|plot| &plot.state)
    }

    /// The plot at `(row, col)`, or `None` when off the grid.
    pub fn plot_at(&self, row: usize, col: usize) -> Option<&Plot> {
        coords_to_tile_index(row, col)
            .ok()
            .and_then(|index| self.plots.get(index))
    }

    /// All plots in index order.
    pub fn plots(&self) -> impl Iterator<Item = &Plot> {
        self.plots.iter()
    }

    /// One row of plots, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Plot> {
        self.plots.iter().filter(move |plot| plot.coords.row == row)
    }

    /// Number of plots holding a ready crop.
    pub fn ready_count(&self) -> usize {
        self.plots.iter().filter(|plot| plot.state.is_ready).count()
    }
}

/// Build the grid from the 25 stored tiles, evaluating every tile at
/// `current_time`.
///
/// # Errors
///
/// Returns [`FarmError::InvalidTileCount`] unless exactly 25 tiles are given.
pub fn create_farm_grid(tiles: &[Tile], current_time: i64) -> Result<FarmGrid, FarmError> {
    if tiles.len() != TILE_COUNT {
        return Err(FarmError::InvalidTileCount {
            expected: TILE_COUNT,
            actual: tiles.len(),
        });
    }

    let plots = tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            Ok(Plot {
                index,
                coords: tile_index_to_coords(index)?,
                tile: *tile,
                state: tile_state_for(tile.crop, tile.planted_at, current_time),
            })
        })
        .collect::<Result<Vec<_>, FarmError>>()?;

    let grid = FarmGrid {
        evaluated_at: current_time,
        plots,
    };
    debug!(
        evaluated_at = current_time,
        ready = grid.ready_count(),
        "farm grid built"
    );
    Ok(grid)
}
