//! Core data structs for the Farmstead client.
//!
//! [`Tile`] is the stored form of a plot as decoded from the player account.
//! [`TileState`] is derived from it for a given instant and never stored.
//! [`PatternInfo`] is produced fresh on every pattern query.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{CropType, PatternKind};

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One of the 25 fixed farm plots, as stored in the player account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Tile {
    /// The crop currently growing, or `None` for an empty plot.
    pub crop: Option<CropType>,
    /// Unix timestamp (seconds) of planting; 0 when empty.
    pub planted_at: i64,
    /// Soil quality in percent (0 to 100).
    pub fertility: u8,
    /// The crop harvested from this plot last, used for rotation bonuses.
    pub last_crop: Option<CropType>,
}

impl Tile {
    /// An unplanted plot with the given fertility and no history.
    pub const fn empty(fertility: u8) -> Self {
        Self {
            crop: None,
            planted_at: 0,
            fertility,
            last_crop: None,
        }
    }

    /// A plot planted with `crop` at `planted_at`.
    pub const fn planted(crop: CropType, planted_at: i64, fertility: u8) -> Self {
        Self {
            crop: Some(crop),
            planted_at,
            fertility,
            last_crop: None,
        }
    }

    /// Return a copy with the previous crop set.
    #[must_use]
    pub const fn with_last_crop(mut self, last_crop: Option<CropType>) -> Self {
        self.last_crop = last_crop;
        self
    }
}

// ---------------------------------------------------------------------------
// TileState
// ---------------------------------------------------------------------------

/// Readiness of a single plot at a specific instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TileState {
    /// The crop growing on the plot, or `None` for an empty plot.
    pub crop: Option<CropType>,
    /// Unix timestamp (seconds) of planting; 0 when empty.
    pub planted_at: i64,
    /// Whether the crop has reached maturity.
    pub is_ready: bool,
    /// Seconds until maturity, never negative.
    pub time_remaining: u64,
    /// Visual growth stage, `0` at planting up to the crop's last stage.
    pub growth_stage: u8,
}

impl TileState {
    /// State of an empty plot: never ready, nothing remaining.
    pub const EMPTY: Self = Self {
        crop: None,
        planted_at: 0,
        is_ready: false,
        time_remaining: 0,
        growth_stage: 0,
    };

    /// Whether this plot holds a ready crop of kind `crop`.
    pub fn is_ready_crop(&self, crop: CropType) -> bool {
        self.is_ready && self.crop == Some(crop)
    }
}

// ---------------------------------------------------------------------------
// Coords
// ---------------------------------------------------------------------------

/// A `(row, col)` position on the 5x5 farm grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Coords {
    /// Zero-based row, top to bottom.
    pub row: usize,
    /// Zero-based column, left to right.
    pub col: usize,
}

// ---------------------------------------------------------------------------
// PatternInfo
// ---------------------------------------------------------------------------

/// A pattern currently satisfied around a plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PatternInfo {
    /// Which pattern matched.
    pub kind: PatternKind,
    /// Display name.
    pub name: String,
    /// Yield bonus in whole percent.
    pub bonus: u32,
    /// Highlight color for the participating plots.
    pub color: String,
    /// Indices (0 to 24) of the plots forming the pattern.
    pub participating_plots: Vec<usize>,
}

impl PatternInfo {
    /// Build the result for `kind` over the given plots.
    pub fn new(kind: PatternKind, participating_plots: Vec<usize>) -> Self {
        Self {
            kind,
            name: kind.name().to_owned(),
            bonus: kind.bonus_pct(),
            color: kind.color().to_owned(),
            participating_plots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_info_takes_table_values() {
        let info = PatternInfo::new(PatternKind::Block, vec![0, 1, 5, 6]);
        assert_eq!(info.name, "Block Pattern");
        assert_eq!(info.bonus, 20);
        assert_eq!(info.participating_plots.len(), 4);
    }

    #[test]
    fn ready_crop_check() {
        let state = TileState {
            crop: Some(CropType::Corn),
            planted_at: 10,
            is_ready: true,
            time_remaining: 0,
            growth_stage: 3,
        };
        assert!(state.is_ready_crop(CropType::Corn));
        assert!(!state.is_ready_crop(CropType::Wheat));
        assert!(!TileState::EMPTY.is_ready_crop(CropType::Corn));
    }

    #[test]
    fn tile_json_shape() {
        let tile = Tile::planted(CropType::Wheat, 1_700_000_000, 80)
            .with_last_crop(Some(CropType::Carrot));
        let value = serde_json::to_value(tile).unwrap_or_default();
        assert_eq!(value["crop"], "Wheat");
        assert_eq!(value["last_crop"], "Carrot");
        assert_eq!(value["fertility"], 80);
    }
}
