//! Per-frame farm snapshot.
//!
//! A [`FarmSnapshot`] is everything the UI needs for one render: the grid,
//! and for every plot its countdown label, active patterns, yield
//! projection, harvest outlook, and soil forecast. It is built once per
//! poll from the decoded tiles and never mutated afterwards.

use serde::Serialize;
use tracing::debug;

use farmstead_types::{Coords, PatternInfo, Tile, TileState};
use farmstead_world::fertility::{fertility_after_harvest, rotation_bonus_applies};
use farmstead_world::{
    FarmError, FarmGrid, HarvestOutlook, YieldBreakdown, YieldModifiers, create_farm_grid,
    detect_patterns_for_plot, format_time_remaining, harvest_outlook, project_harvest,
};

/// Everything shown for one plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotReport {
    /// Linear index on the grid.
    pub index: usize,
    /// Grid position.
    pub coords: Coords,
    /// Stored plot data.
    pub tile: Tile,
    /// Readiness at the snapshot time.
    pub state: TileState,
    /// Countdown as displayed, e.g. `"1m 30s"` or `"Ready!"`; empty for an
    /// unplanted plot.
    pub time_label: String,
    /// Patterns the plot currently participates in.
    pub patterns: Vec<PatternInfo>,
    /// Yield if harvested now; `None` for empty plots.
    pub projection: Option<YieldBreakdown>,
    /// Position on the decay curve; `None` for empty plots.
    pub outlook: Option<HarvestOutlook>,
    /// Fertility after harvesting the current crop; `None` for empty plots.
    pub fertility_after_harvest: Option<u8>,
    /// Whether replanting here earns the rotation bonus.
    pub rotation_bonus: bool,
}

/// Aggregate numbers for one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SnapshotSummary {
    /// Snapshot time in Unix seconds.
    pub evaluated_at: i64,
    /// Plots holding a crop.
    pub planted: usize,
    /// Plots holding a ready crop.
    pub ready: usize,
    /// Pattern matches across all plots.
    pub patterns: usize,
    /// Sum of projected yields over ready plots.
    pub ready_yield: u32,
}

/// The grid and per-plot reports for one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmSnapshot {
    evaluated_at: i64,
    #[serde(skip)]
    grid: FarmGrid,
    plots: Vec<PlotReport>,
}

impl FarmSnapshot {
    /// Evaluate `tiles` at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::InvalidTileCount`] unless exactly 25 tiles are
    /// given, or [`FarmError::ArithmeticOverflow`] from the yield math.
    pub fn build(tiles: &[Tile], now: i64, modifiers: &YieldModifiers) -> Result<Self, FarmError> {
        let grid = create_farm_grid(tiles, now)?;

        let plots = grid
            .plots()
            .map(|plot| {
                let crop = plot.state.crop;
                Ok(PlotReport {
                    index: plot.index,
                    coords: plot.coords,
                    tile: plot.tile,
                    state: plot.state,
                    time_label: crop
                        .map(|_| format_time_remaining(plot.state.time_remaining))
                        .unwrap_or_default(),
                    patterns: detect_patterns_for_plot(&grid, plot.index)?,
                    projection: project_harvest(&grid, plot.index, modifiers)?,
                    outlook: crop.map(|crop| {
                        harvest_outlook(crop, plot.tile.planted_at, plot.tile.fertility, now)
                    }),
                    fertility_after_harvest: crop
                        .map(|crop| fertility_after_harvest(crop, plot.tile.fertility)),
                    rotation_bonus: rotation_bonus_applies(&plot.tile),
                })
            })
            .collect::<Result<Vec<_>, FarmError>>()?;

        let snapshot = Self {
            evaluated_at: now,
            grid,
            plots,
        };
        let summary = snapshot.summary();
        debug!(
            evaluated_at = now,
            planted = summary.planted,
            ready = summary.ready,
            patterns = summary.patterns,
            "snapshot built"
        );
        Ok(snapshot)
    }

    /// Snapshot time in Unix seconds.
    pub const fn evaluated_at(&self) -> i64 {
        self.evaluated_at
    }

    /// The underlying grid.
    pub const fn grid(&self) -> &FarmGrid {
        &self.grid
    }

    /// All plot reports in index order.
    pub fn plots(&self) -> &[PlotReport] {
        &self.plots
    }

    /// The report for one plot.
    ///
    /// # Errors
    ///
    /// Returns [`FarmError::InvalidTileIndex`] for indices outside `0..25`.
    pub fn plot(&self, index: usize) -> Result<&PlotReport, FarmError> {
        self.plots
            .get(index)
            .ok_or(FarmError::InvalidTileIndex(index))
    }

    /// Aggregate counts for logging and status lines.
    pub fn summary(&self) -> SnapshotSummary {
        let planted = self.plots.iter().filter(|p| p.state.crop.is_some()).count();
        let ready = self.grid.ready_count();
        let patterns = self.plots.iter().map(|p| p.patterns.len()).sum();
        let ready_yield = self
            .plots
            .iter()
            .filter(|p| p.state.is_ready)
            .filter_map(|p| p.projection.map(|y| y.final_yield))
            .fold(0_u32, u32::saturating_add);

        SnapshotSummary {
            evaluated_at: self.evaluated_at,
            planted,
            ready,
            patterns,
            ready_yield,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use farmstead_types::{CropType, HarvestStatus, PatternKind};
    use farmstead_world::TILE_COUNT;

    use super::*;

    fn tiles_with(planted: &[(usize, Tile)]) -> Vec<Tile> {
        let mut tiles = vec![Tile::empty(100); TILE_COUNT];
        for (index, tile) in planted {
            if let Some(slot) = tiles.get_mut(*index) {
                *slot = *tile;
            }
        }
        tiles
    }

    #[test]
    fn wrong_tile_count_fails() {
        let result = FarmSnapshot::build(&[Tile::empty(100)], 0, &YieldModifiers::default());
        assert_eq!(
            result.err(),
            Some(FarmError::InvalidTileCount {
                expected: 25,
                actual: 1
            })
        );
    }

    #[test]
    fn empty_farm_has_bare_reports() {
        let snapshot =
            FarmSnapshot::build(&tiles_with(&[]), 1_000, &YieldModifiers::default()).unwrap();
        assert_eq!(snapshot.plots().len(), TILE_COUNT);
        for plot in snapshot.plots() {
            assert!(plot.time_label.is_empty());
            assert!(plot.patterns.is_empty());
            assert!(plot.projection.is_none());
            assert!(plot.outlook.is_none());
            assert!(plot.fertility_after_harvest.is_none());
        }
        assert_eq!(snapshot.summary().planted, 0);
    }

    #[test]
    fn reports_combine_all_views() {
        let wheat = Tile::planted(CropType::Wheat, 0, 80).with_last_crop(Some(CropType::Corn));
        let tiles = tiles_with(&[
            (0, wheat),
            (1, wheat),
            (2, wheat),
            (12, Tile::planted(CropType::Corn, 35, 100)),
        ]);
        let snapshot = FarmSnapshot::build(&tiles, 40, &YieldModifiers::default()).unwrap();

        let middle = snapshot.plot(1).unwrap();
        assert!(middle.state.is_ready);
        assert_eq!(middle.time_label, "Ready!");
        assert_eq!(middle.patterns.first().map(|p| p.kind), Some(PatternKind::Row));
        // 100 * 0.8 * 1.15 = 92
        assert_eq!(middle.projection.map(|y| y.final_yield), Some(92));
        assert_eq!(middle.outlook.map(|o| o.status), Some(HarvestStatus::Optimal));
        assert_eq!(middle.fertility_after_harvest, Some(70));
        assert!(middle.rotation_bonus);

        let corn = snapshot.plot(12).unwrap();
        assert!(!corn.state.is_ready);
        assert_eq!(corn.time_label, "55s");
        assert!(corn.patterns.is_empty());
        // Early harvest: 500 * 0.8 = 400
        assert_eq!(corn.projection.map(|y| y.final_yield), Some(400));
        assert_eq!(corn.outlook.map(|o| o.status), Some(HarvestStatus::Growing));

        let summary = snapshot.summary();
        assert_eq!(summary.planted, 4);
        assert_eq!(summary.ready, 3);
        assert_eq!(summary.patterns, 3);
        assert_eq!(summary.ready_yield, 276);
        assert!(snapshot.plot(25).is_err());
    }

    #[test]
    fn serializes_without_duplicating_grid() {
        let snapshot =
            FarmSnapshot::build(&tiles_with(&[]), 7, &YieldModifiers::default()).unwrap();
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["evaluated_at"], 7);
        assert!(value.get("grid").is_none());
        assert_eq!(value["plots"].as_array().map(Vec::len), Some(TILE_COUNT));
    }
}
