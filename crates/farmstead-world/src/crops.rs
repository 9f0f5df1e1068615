//! Static crop metadata table.
//!
//! Every [`CropType`] has one fixed [`CropMetadata`] entry describing its
//! growth timer, yield curve, soil impact, and seasonal behavior. The table
//! is a `match`, so lookups cannot miss for a decoded crop; raw values are
//! checked once in [`decode_crop`].
//!
//! | Crop    | Growth | Optimal | Decay | Base | Min | Fert. cost | Restorative |
//! |---------|-------:|--------:|------:|-----:|----:|-----------:|:-----------:|
//! | Wheat   |   30 s |    20 s |  60 s |  100 |  20 |         10 |     no      |
//! | Tomato  |   45 s |    30 s |  90 s |  300 |  60 |         15 |     no      |
//! | Corn    |   60 s |    40 s | 120 s |  500 | 100 |         20 |     no      |
//! | Carrot  |   25 s |    15 s |  50 s |  150 |  30 |          5 |     yes     |
//! | Lettuce |   20 s |    10 s |  40 s |   80 |  16 |          5 |     yes     |

use rust_decimal::Decimal;
use serde::Serialize;

use farmstead_types::{CropType, Season};

use crate::error::FarmError;

/// Per-season harvest yield multipliers for a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonalYield {
    /// Multiplier for crops harvested from a spring planting.
    pub spring: Decimal,
    /// Multiplier for summer.
    pub summer: Decimal,
    /// Multiplier for fall.
    pub fall: Decimal,
    /// Multiplier for winter.
    pub winter: Decimal,
}

impl SeasonalYield {
    /// The multiplier for `season`.
    pub const fn for_season(&self, season: Season) -> Decimal {
        match season {
            Season::Spring => self.spring,
            Season::Summer => self.summer,
            Season::Fall => self.fall,
            Season::Winter => self.winter,
        }
    }
}

/// Static configuration for one crop kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropMetadata {
    /// The crop this entry describes.
    pub crop: CropType,
    /// Display name.
    pub name: &'static str,
    /// Seconds from planting to maturity.
    pub growth_time: i64,
    /// Yield when harvested inside the optimal window.
    pub base_yield: u32,
    /// Floor the decay curve never goes below.
    pub min_yield: u32,
    /// Fertility points consumed by a harvest.
    pub fertility_cost: u8,
    /// Seconds after maturity during which the full base yield holds.
    pub optimal_harvest_window: i64,
    /// Seconds after maturity at which yield reaches `min_yield`.
    pub max_decay_time: i64,
    /// Harvesting restores soil instead of depleting it.
    pub is_restorative: bool,
    /// Number of visual growth stages.
    pub growth_stages: u8,
    /// Seasons in which the crop may be planted.
    pub valid_seasons: &'static [Season],
    /// Seasonal harvest multipliers.
    pub seasonal_yield: SeasonalYield,
}

impl CropMetadata {
    /// Whether the crop may be planted in `season`.
    pub fn is_valid_season(&self, season: Season) -> bool {
        self.valid_seasons.contains(&season)
    }
}

/// Look up the metadata entry for a crop.
pub fn crop_metadata(crop: CropType) -> CropMetadata {
    match crop {
        CropType::Wheat => CropMetadata {
            crop,
            name: "Wheat",
            growth_time: 30,
            base_yield: 100,
            min_yield: 20,
            fertility_cost: 10,
            optimal_harvest_window: 20,
            max_decay_time: 60,
            is_restorative: false,
            growth_stages: 4,
            valid_seasons: &[Season::Spring, Season::Summer, Season::Winter],
            seasonal_yield: SeasonalYield {
                spring: Decimal::new(11, 1),
                summer: Decimal::new(9, 1),
                fall: Decimal::ZERO,
                winter: Decimal::ONE,
            },
        },
        CropType::Tomato => CropMetadata {
            crop,
            name: "Tomato",
            growth_time: 45,
            base_yield: 300,
            min_yield: 60,
            fertility_cost: 15,
            optimal_harvest_window: 30,
            max_decay_time: 90,
            is_restorative: false,
            growth_stages: 4,
            valid_seasons: &[Season::Summer],
            seasonal_yield: summer_only(),
        },
        CropType::Corn => CropMetadata {
            crop,
            name: "Corn",
            growth_time: 60,
            base_yield: 500,
            min_yield: 100,
            fertility_cost: 20,
            optimal_harvest_window: 40,
            max_decay_time: 120,
            is_restorative: false,
            growth_stages: 4,
            valid_seasons: &[Season::Summer],
            seasonal_yield: summer_only(),
        },
        CropType::Carrot => CropMetadata {
            crop,
            name: "Carrot",
            growth_time: 25,
            base_yield: 150,
            min_yield: 30,
            fertility_cost: 5,
            optimal_harvest_window: 15,
            max_decay_time: 50,
            is_restorative: true,
            growth_stages: 3,
            valid_seasons: &[Season::Spring, Season::Summer, Season::Fall, Season::Winter],
            seasonal_yield: SeasonalYield {
                spring: Decimal::ONE,
                summer: Decimal::ONE,
                fall: Decimal::ONE,
                winter: Decimal::ONE,
            },
        },
        CropType::Lettuce => CropMetadata {
            crop,
            name: "Lettuce",
            growth_time: 20,
            base_yield: 80,
            min_yield: 16,
            fertility_cost: 5,
            optimal_harvest_window: 10,
            max_decay_time: 40,
            is_restorative: true,
            growth_stages: 3,
            valid_seasons: &[Season::Spring, Season::Summer, Season::Fall],
            seasonal_yield: SeasonalYield {
                spring: Decimal::ONE,
                summer: Decimal::new(9, 1),
                fall: Decimal::ONE,
                winter: Decimal::ZERO,
            },
        },
    }
}

const fn summer_only() -> SeasonalYield {
    SeasonalYield {
        spring: Decimal::ZERO,
        summer: Decimal::ONE,
        fall: Decimal::ZERO,
        winter: Decimal::ZERO,
    }
}

/// Decode a raw crop value from the player account.
///
/// `0` is an empty plot (`Ok(None)`).
///
/// # Errors
///
/// Returns [`FarmError::UnknownCropType`] for values with no table entry.
pub const fn decode_crop(raw: u8) -> Result<Option<CropType>, FarmError> {
    if raw == 0 {
        return Ok(None);
    }
    match CropType::from_u8(raw) {
        Some(crop) => Ok(Some(crop)),
        None => Err(FarmError::UnknownCropType(raw)),
    }
}
