//! Harvest yield projection.
//!
//! ```text
//! after_fertility = base_yield * fertility / 100
//! after_water     = after_fertility * water_multiplier
//! after_season    = after_water * seasonal_multiplier
//! after_timing    = after_season * timing_multiplier     (1.0 ready, 0.8 early)
//! final_yield     = floor(after_timing * (1 + pattern_bonus / 100))
//! ```
//!
//! Every step is exact [`Decimal`] arithmetic and the result is floored once,
//! at the end. Intermediate values are kept so the harvest screen can show
//! the full breakdown.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use farmstead_types::Season;

use crate::crops::crop_metadata;
use crate::error::FarmError;
use crate::grid::FarmGrid;
use crate::patterns::{detect_patterns_for_plot, total_bonus_pct};
use crate::season::seasonal_multiplier;
use crate::water::water_multiplier;

/// Timing multiplier for a crop harvested before it is ready.
pub fn early_harvest_multiplier() -> Decimal {
    Decimal::new(8, 1)
}

/// Everything the yield formula consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldInputs {
    /// The crop's base yield.
    pub base_yield: u32,
    /// Soil fertility in percent.
    pub fertility: u8,
    /// Soil moisture multiplier.
    pub water_multiplier: Decimal,
    /// Seasonal multiplier.
    pub seasonal_multiplier: Decimal,
    /// Whether the crop has matured.
    pub is_ready: bool,
    /// Sum of the detected pattern bonuses, in whole percent.
    pub pattern_bonus_pct: u32,
}

/// Every intermediate value of a yield projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YieldBreakdown {
    /// The crop's base yield.
    pub base_yield: u32,
    /// After scaling by fertility.
    pub after_fertility: Decimal,
    /// After the moisture multiplier.
    pub after_water: Decimal,
    /// After the seasonal multiplier.
    pub after_season: Decimal,
    /// The timing multiplier that was applied.
    pub timing_multiplier: Decimal,
    /// After the timing multiplier.
    pub after_timing: Decimal,
    /// Sum of pattern bonuses, in whole percent.
    pub pattern_bonus_pct: u32,
    /// Whole units the player receives.
    pub final_yield: u32,
}

/// Caller-supplied multipliers that do not come from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldModifiers {
    /// Soil moisture multiplier.
    pub water_multiplier: Decimal,
    /// Seasonal multiplier; `None` uses the crop's table value for
    /// [`Self::season`] when set, or `1.0` otherwise.
    pub seasonal_multiplier: Option<Decimal>,
    /// Current season, used to look up per-crop multipliers.
    pub season: Option<Season>,
}

impl Default for YieldModifiers {
    fn default() -> Self {
        Self {
            water_multiplier: Decimal::ONE,
            seasonal_multiplier: None,
            season: None,
        }
    }
}

impl YieldModifiers {
    /// Modifiers for a plot at `water_level` percent moisture in `season`.
    pub fn for_conditions(water_level: u8, season: Season) -> Self {
        Self {
            water_multiplier: water_multiplier(water_level),
            seasonal_multiplier: None,
            season: Some(season),
        }
    }
}

/// Run the yield formula.
///
/// # Errors
///
/// Returns [`FarmError::ArithmeticOverflow`] if any step overflows or the
/// result does not fit a `u32`.
pub fn project_yield(inputs: &YieldInputs) -> Result<YieldBreakdown, FarmError> {
    let hundred = Decimal::ONE_HUNDRED;

    let after_fertility = Decimal::from(inputs.base_yield)
        .checked_mul(Decimal::from(inputs.fertility))
        .and_then(|v| v.checked_div(hundred))
        .ok_or(FarmError::ArithmeticOverflow)?;
    let after_water = after_fertility
        .checked_mul(inputs.water_multiplier)
        .ok_or(FarmError::ArithmeticOverflow)?;
    let after_season = after_water
        .checked_mul(inputs.seasonal_multiplier)
        .ok_or(FarmError::ArithmeticOverflow)?;

    let timing_multiplier = if inputs.is_ready {
        Decimal::ONE
    } else {
        early_harvest_multiplier()
    };
    let after_timing = after_season
        .checked_mul(timing_multiplier)
        .ok_or(FarmError::ArithmeticOverflow)?;

    let pattern_multiplier = Decimal::from(inputs.pattern_bonus_pct)
        .checked_div(hundred)
        .and_then(|v| Decimal::ONE.checked_add(v))
        .ok_or(FarmError::ArithmeticOverflow)?;
    let final_yield = after_timing
        .checked_mul(pattern_multiplier)
        .ok_or(FarmError::ArithmeticOverflow)?
        .floor()
        .max(Decimal::ZERO)
        .to_u32()
        .ok_or(FarmError::ArithmeticOverflow)?;

    Ok(YieldBreakdown {
        base_yield: inputs.base_yield,
        after_fertility,
        after_water,
        after_season,
        timing_multiplier,
        after_timing,
        pattern_bonus_pct: inputs.pattern_bonus_pct,
        final_yield,
    })
}

/// Project the harvest of the plot at `plot_index`.
///
/// Returns `Ok(None)` for an empty plot.
///
/// # Errors
///
/// Returns [`FarmError::InvalidTileIndex`] for indices outside `0..25`, or
/// [`FarmError::ArithmeticOverflow`] from [`project_yield`].
pub fn project_harvest(
    grid: &FarmGrid,
    plot_index: usize,
    modifiers: &YieldModifiers,
) -> Result<Option<YieldBreakdown>, FarmError> {
    let plot = grid.plot(plot_index)?;
    let Some(crop) = plot.state.crop else {
        return Ok(None);
    };

    let seasonal = match (modifiers.seasonal_multiplier, modifiers.season) {
        (Some(multiplier), _) => multiplier,
        (None, Some(season)) => seasonal_multiplier(crop, season),
        (None, None) => Decimal::ONE,
    };
    let patterns = detect_patterns_for_plot(grid, plot_index)?;

    let inputs = YieldInputs {
        base_yield: crop_metadata(crop).base_yield,
        fertility: plot.tile.fertility,
        water_multiplier: modifiers.water_multiplier,
        seasonal_multiplier: seasonal,
        is_ready: plot.state.is_ready,
        pattern_bonus_pct: total_bonus_pct(&patterns),
    };
    project_yield(&inputs).map(Some)
}

#[cfg(test)]
mod tests {
    use farmstead_types::{CropType, Tile};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::grid::{TILE_COUNT, create_farm_grid};

    fn inputs(base_yield: u32, fertility: u8) -> YieldInputs {
        YieldInputs {
            base_yield,
            fertility,
            water_multiplier: Decimal::ONE,
            seasonal_multiplier: Decimal::ONE,
            is_ready: true,
            pattern_bonus_pct: 0,
        }
    }

    #[test]
    fn fertility_only() {
        let breakdown = project_yield(&inputs(10, 50));
        assert_eq!(breakdown.map(|b| b.final_yield), Ok(5));
    }

    #[test]
    fn pattern_bonus_applies_last() {
        let breakdown = project_yield(&YieldInputs {
            pattern_bonus_pct: 20,
            ..inputs(10, 50)
        });
        assert_eq!(breakdown.map(|b| b.final_yield), Ok(6));
    }

    #[test]
    fn early_harvest_penalty() {
        let breakdown = project_yield(&YieldInputs {
            is_ready: false,
            ..inputs(100, 100)
        });
        assert!(breakdown.is_ok());
        let Ok(breakdown) = breakdown else { return };
        assert_eq!(breakdown.timing_multiplier, dec!(0.8));
        assert_eq!(breakdown.after_timing, dec!(80));
        assert_eq!(breakdown.final_yield, 80);
    }

    #[test]
    fn floors_only_once() {
        // 7 * 0.5 = 3.5, * 0.85 = 2.975, * 1.45 = 4.31375 -> 4.
        // Flooring after each step would give floor(3 * 0.85) = 2, then 2.
        let breakdown = project_yield(&YieldInputs {
            water_multiplier: dec!(0.85),
            pattern_bonus_pct: 45,
            ..inputs(7, 50)
        });
        assert!(breakdown.is_ok());
        let Ok(breakdown) = breakdown else { return };
        assert_eq!(breakdown.after_fertility, dec!(3.5));
        assert_eq!(breakdown.after_water, dec!(2.975));
        assert_eq!(breakdown.final_yield, 4);
    }

    #[test]
    fn out_of_season_yields_nothing() {
        let breakdown = project_yield(&YieldInputs {
            seasonal_multiplier: Decimal::ZERO,
            pattern_bonus_pct: 100,
            ..inputs(500, 100)
        });
        assert_eq!(breakdown.map(|b| b.final_yield), Ok(0));
    }

    #[test]
    fn harvest_from_grid_uses_patterns_and_modifiers() {
        // A row of three ready wheat at 80% fertility, 45% moisture, spring.
        let mut tiles = vec![Tile::empty(100); TILE_COUNT];
        for index in [0, 1, 2] {
            if let Some(tile) = tiles.get_mut(index) {
                *tile = Tile::planted(CropType::Wheat, 0, 80);
            }
        }
        let grid = create_farm_grid(&tiles, 1_000);
        assert!(grid.is_ok());
        let Ok(grid) = grid else { return };

        let modifiers = YieldModifiers::for_conditions(45, Season::Spring);
        let breakdown = project_harvest(&grid, 1, &modifiers);
        assert!(matches!(breakdown, Ok(Some(_))));
        let Ok(Some(breakdown)) = breakdown else { return };

        // 100 * 0.8 * 0.85 * 1.1 * 1.0 = 74.8; * 1.15 = 86.02
        assert_eq!(breakdown.pattern_bonus_pct, 15);
        assert_eq!(breakdown.after_season, dec!(74.8));
        assert_eq!(breakdown.final_yield, 86);

        assert_eq!(project_harvest(&grid, 10, &modifiers), Ok(None));
        assert_eq!(
            project_harvest(&grid, 25, &modifiers),
            Err(FarmError::InvalidTileIndex(25))
        );
    }

    #[test]
    fn default_modifiers_are_neutral() {
        let modifiers = YieldModifiers::default();
        assert_eq!(modifiers.water_multiplier, Decimal::ONE);
        assert_eq!(modifiers.seasonal_multiplier, None);
        assert_eq!(modifiers.season, None);
    }
}
