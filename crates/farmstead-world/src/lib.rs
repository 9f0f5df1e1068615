//! Tile state, grid, pattern detection, and yield math for the Farmstead
//! farming client.
//!
//! Everything in this crate is a pure function of its inputs: the 25 stored
//! tiles and a timestamp. Nothing performs I/O or holds shared state, so a
//! [`FarmGrid`] can be queried from any number of places at once.
//!
//! # Modules
//!
//! - [`crops`] -- Static crop metadata table and raw crop decoding.
//! - [`error`] -- Error types for tile, grid, and yield operations.
//! - [`fertility`] -- Soil fertility after harvest and rotation bonuses.
//! - [`grid`] -- The 5x5 [`FarmGrid`], index and coordinate conversion.
//! - [`harvest`] -- Time-decay harvest outlook for mature crops.
//! - [`patterns`] -- The six planting patterns and their bonuses.
//! - [`season`] -- Seasonal planting rules and multipliers.
//! - [`tile_state`] -- Readiness, countdown, and growth stage per plot.
//! - [`water`] -- Soil moisture to yield multiplier.
//! - [`yield_projection`] -- The harvest yield formula with full breakdown.

pub mod crops;
pub mod error;
pub mod fertility;
pub mod grid;
pub mod harvest;
pub mod patterns;
pub mod season;
pub mod tile_state;
pub mod water;
pub mod yield_projection;

// Re-export primary types at crate root.
pub use crops::{CropMetadata, crop_metadata, decode_crop};
pub use error::FarmError;
pub use grid::{
    FarmGrid, GRID_SIZE, Plot, TILE_COUNT, coords_to_tile_index, create_farm_grid,
    tile_index_to_coords,
};
pub use harvest::{HarvestOutlook, harvest_outlook};
pub use patterns::{detect_patterns_for_plot, total_bonus_pct};
pub use tile_state::{calculate_tile_state, calculate_tile_state_now, format_time_remaining};
pub use yield_projection::{
    YieldBreakdown, YieldInputs, YieldModifiers, project_harvest, project_yield,
};
