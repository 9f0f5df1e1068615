//! Soil fertility bookkeeping around harvest and replanting.

use farmstead_types::{CropType, Tile};

use crate::crops::crop_metadata;

/// Highest fertility a plot can reach.
pub const MAX_FERTILITY: u8 = 100;

/// Harvesting never depletes a plot below this.
pub const MIN_FERTILITY: u8 = 20;

/// Fertility a restorative crop returns to the soil on harvest.
pub const RESTORATIVE_BONUS: u8 = 10;

/// Fertility granted when a plot is replanted with a different crop.
pub const ROTATION_BONUS: u8 = 10;

/// Fertility a plot will have after `crop` is harvested from soil at
/// `fertility`.
pub fn fertility_after_harvest(crop: CropType, fertility: u8) -> u8 {
    let meta = crop_metadata(crop);
    if meta.is_restorative {
        fertility
            .saturating_add(RESTORATIVE_BONUS)
            .saturating_sub(meta.fertility_cost)
            .clamp(MIN_FERTILITY, MAX_FERTILITY)
    } else {
        fertility
            .saturating_sub(meta.fertility_cost)
            .max(MIN_FERTILITY)
    }
}

/// Fertility after planting `crop` on soil that last grew `last_crop`.
pub fn fertility_after_planting(fertility: u8, last_crop: Option<CropType>, crop: CropType) -> u8 {
    match last_crop {
        Some(last) if last != crop => fertility.saturating_add(ROTATION_BONUS).min(MAX_FERTILITY),
        _ => fertility,
    }
}

/// Whether the plot is on track for a rotation bonus: it follows a
/// different crop and is not itself a restorative crop.
pub fn rotation_bonus_applies(tile: &Tile) -> bool {
    match (tile.crop, tile.last_crop) {
        (Some(crop), Some(last)) => last != crop && !crop_metadata(crop).is_restorative,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depleting_crops_floor_at_minimum() {
        assert_eq!(fertility_after_harvest(CropType::Wheat, 100), 90);
        assert_eq!(fertility_after_harvest(CropType::Corn, 35), 20);
        assert_eq!(fertility_after_harvest(CropType::Tomato, 5), 20);
    }

    #[test]
    fn restorative_crops_net_positive_and_capped() {
        assert_eq!(fertility_after_harvest(CropType::Carrot, 50), 55);
        assert_eq!(fertility_after_harvest(CropType::Lettuce, 98), 100);
        assert_eq!(fertility_after_harvest(CropType::Carrot, 0), 20);
    }

    #[test]
    fn rotation_bonus_on_replant() {
        assert_eq!(fertility_after_planting(60, Some(CropType::Wheat), CropType::Corn), 70);
        assert_eq!(fertility_after_planting(95, Some(CropType::Wheat), CropType::Corn), 100);
        assert_eq!(fertility_after_planting(60, Some(CropType::Corn), CropType::Corn), 60);
        assert_eq!(fertility_after_planting(60, None, CropType::Corn), 60);
    }

    #[test]
    fn rotation_indicator() {
        let rotated = Tile::planted(CropType::Corn, 0, 80).with_last_crop(Some(CropType::Carrot));
        assert!(rotation_bonus_applies(&rotated));

        let repeated = Tile::planted(CropType::Corn, 0, 80).with_last_crop(Some(CropType::Corn));
        assert!(!rotation_bonus_applies(&repeated));

        let restorative =
            Tile::planted(CropType::Lettuce, 0, 80).with_last_crop(Some(CropType::Corn));
        assert!(!rotation_bonus_applies(&restorative));

        assert!(!rotation_bonus_applies(&Tile::empty(80)));
    }
}
