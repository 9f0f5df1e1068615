//! Pattern detection around a single plot.
//!
//! Six independent predicates are evaluated on every query. A plot can
//! satisfy several at once and all of them are returned; the caller sums
//! the bonuses. Only ready plots participate in any pattern.
//!
//! | Pattern            | Bonus | Rule                                                   |
//! |--------------------|------:|--------------------------------------------------------|
//! | Row Pattern        |  +15% | 3+ contiguous ready same-crop plots through the target |
//! | Block Pattern      |  +20% | first 2x2 ready same-crop square containing the target |
//! | Companion Planting |  +10% | first ready neighbor of a different crop (U, D, L, R)  |
//! | Cross Pattern      |  +25% | target plus all 4 orthogonal neighbors, same crop      |
//! | Perimeter Defense  |  +15% | target on the edge, 8+ ready same-crop edge plots      |
//! | Biodiversity Bonus |  +20% | exactly 5 distinct crops ready anywhere on the board   |

use std::collections::BTreeSet;

use tracing::debug;

use farmstead_types::{Coords, CropType, PatternInfo, PatternKind};

use crate::error::FarmError;
use crate::grid::{FarmGrid, GRID_SIZE, coords_to_tile_index, is_perimeter, offset_index};

/// Shortest run that counts as a row pattern.
pub const MIN_ROW_LENGTH: usize = 3;

/// Fewest matching edge plots that count as a perimeter pattern.
pub const MIN_PERIMETER_PLOTS: usize = 8;

/// Distinct ready crops required for the biodiversity bonus.
pub const DIVERSITY_CROP_COUNT: usize = CropType::ALL.len();

/// Orthogonal neighbor offsets in scan order: up, down, left, right.
const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Top-left corner offsets of the 2x2 squares that can contain a plot, in
/// the order they are tried.
const BLOCK_ANCHORS: [(isize, isize); 4] = [(0, 0), (0, -1), (-1, 0), (-1, -1)];

/// Cells of a 2x2 square relative to its top-left corner.
const BLOCK_CELLS: [(isize, isize); 4] = [(0, 0), (0, 1), (1, 0), (1, 1)];

/// The plot a query is centred on.
#[derive(Debug, Clone, Copy)]
struct Target {
    index: usize,
    coords: Coords,
    crop: CropType,
}

/// Detect every pattern that currently holds for the plot at `plot_index`.
///
/// Empty or unripe plots have no patterns; that is an empty result, not an
/// error.
///
/// # Errors
///
/// Returns [`FarmError::InvalidTileIndex`] if `plot_index` is outside `0..25`.
pub fn detect_patterns_for_plot(
    grid: &FarmGrid,
    plot_index: usize,
) -> Result<Vec<PatternInfo>, FarmError> {
    let plot = grid.plot(plot_index)?;
    let (Some(crop), true) = (plot.state.crop, plot.state.is_ready) else {
        return Ok(Vec::new());
    };

    let target = Target {
        index: plot.index,
        coords: plot.coords,
        crop,
    };

    let patterns: Vec<PatternInfo> = [
        row_pattern(grid, target),
        block_pattern(grid, target),
        companion_pattern(grid, target),
        cross_pattern(grid, target),
        perimeter_pattern(grid, target),
        diversity_pattern(grid),
    ]
    .into_iter()
    .flatten()
    .collect();

    for pattern in &patterns {
        debug!(
            plot = plot_index,
            pattern = pattern.name,
            bonus = pattern.bonus,
            plots = pattern.participating_plots.len(),
            "pattern detected"
        );
    }

    Ok(patterns)
}

/// Sum of the bonuses of the given patterns, in whole percent.
pub fn total_bonus_pct(patterns: &[PatternInfo]) -> u32 {
    patterns
        .iter()
        .fold(0_u32, |total, pattern| total.saturating_add(pattern.bonus))
}

/// Whether `index` holds a ready crop of kind `crop`.
fn matches(grid: &FarmGrid, index: usize, crop: CropType) -> bool {
    grid.state(index)
        .is_some_and(|state| state.is_ready_crop(crop))
}

fn row_pattern(grid: &FarmGrid, target: Target) -> Option<PatternInfo> {
    let Coords { row, col } = target.coords;
    let on_row = |c: usize| coords_to_tile_index(row, c).ok();

    let left = (0..col)
        .rev()
        .filter_map(on_row)
        .take_while(|&index| matches(grid, index, target.crop));
    let right = (col.saturating_add(1)..GRID_SIZE)
        .filter_map(on_row)
        .take_while(|&index| matches(grid, index, target.crop));

    let mut plots: Vec<usize> = std::iter::once(target.index)
        .chain(left)
        .chain(right)
        .collect();

    if plots.len() < MIN_ROW_LENGTH {
        return None;
    }
    plots.sort_unstable();
    Some(PatternInfo::new(PatternKind::Row, plots))
}

fn block_pattern(grid: &FarmGrid, target: Target) -> Option<PatternInfo> {
    // A square's top-left corner must leave room for one more row and column.
    let last_anchor = GRID_SIZE.saturating_sub(2);

    BLOCK_ANCHORS.iter().find_map(|&(d_row, d_col)| {
        let row = target.coords.row.checked_add_signed(d_row)?;
        let col = target.coords.col.checked_add_signed(d_col)?;
        if row > last_anchor || col > last_anchor {
            return None;
        }

        let anchor = Coords { row, col };
        let plots = BLOCK_CELLS
            .iter()
            .map(|&(dr, dc)| offset_index(anchor, dr, dc))
            .collect::<Option<Vec<usize>>>()?;

        plots
            .iter()
            .all(|&index| matches(grid, index, target.crop))
            .then(|| PatternInfo::new(PatternKind::Block, plots))
    })
}

fn companion_pattern(grid: &FarmGrid, target: Target) -> Option<PatternInfo> {
    ORTHOGONAL.iter().find_map(|&(d_row, d_col)| {
        let index = offset_index(target.coords, d_row, d_col)?;
        let state = grid.state(index)?;
        let neighbor = state.crop?;
        (state.is_ready && neighbor != target.crop)
            .then(|| PatternInfo::new(PatternKind::Companion, vec![target.index, index]))
    })
}

fn cross_pattern(grid: &FarmGrid, target: Target) -> Option<PatternInfo> {
    let arms = ORTHOGONAL
        .iter()
        .map(|&(d_row, d_col)| offset_index(target.coords, d_row, d_col))
        .collect::<Option<Vec<usize>>>()?;

    if !arms.iter().all(|&index| matches(grid, index, target.crop)) {
        return None;
    }

    let plots = std::iter::once(target.index).chain(arms).collect();
    Some(PatternInfo::new(PatternKind::Cross, plots))
}

fn perimeter_pattern(grid: &FarmGrid, target: Target) -> Option<PatternInfo> {
    if !is_perimeter(target.coords) {
        return None;
    }

    let plots: Vec<usize> = grid
        .plots()
        .filter(|plot| is_perimeter(plot.coords) && plot.state.is_ready_crop(target.crop))
        .map(|plot| plot.index)
        .collect();

    (plots.len() >= MIN_PERIMETER_PLOTS).then(|| PatternInfo::new(PatternKind::Perimeter, plots))
}

fn diversity_pattern(grid: &FarmGrid) -> Option<PatternInfo> {
    let mut kinds = BTreeSet::new();
    let mut plots = Vec::new();

    for plot in grid.plots() {
        if let (Some(crop), true) = (plot.state.crop, plot.state.is_ready) {
            kinds.insert(crop);
            plots.push(plot.index);
        }
    }

    (kinds.len() == DIVERSITY_CROP_COUNT)
        .then(|| PatternInfo::new(PatternKind::Diversity, plots))
}
