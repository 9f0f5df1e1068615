//! Seasonal planting rules and yield multipliers.

use rust_decimal::Decimal;

use farmstead_types::{CropType, Season};

use crate::crops::crop_metadata;

/// Harvest multiplier for `crop` in `season`.
///
/// Out-of-season crops carry a zero multiplier.
pub fn seasonal_multiplier(crop: CropType, season: Season) -> Decimal {
    crop_metadata(crop).seasonal_yield.for_season(season)
}

/// Whether `crop` may be planted during `season`.
pub fn can_plant(crop: CropType, season: Season) -> bool {
    crop_metadata(crop).is_valid_season(season)
}

/// Crops that may be planted during `season`, in table order.
pub fn plantable_crops(season: Season) -> Vec<CropType> {
    CropType::ALL
        .into_iter()
        .filter(|crop| can_plant(*crop, season))
        .collect()
}
