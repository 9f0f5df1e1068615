//! Enumeration types for the Farmstead client.
//!
//! Crop kinds mirror the on-chain program's `#[repr(u8)]` encoding, where a
//! raw value of `0` marks an empty plot and is represented here as
//! `Option::<CropType>::None` rather than a variant.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Crops
// ---------------------------------------------------------------------------

/// A crop that can be planted on a farm plot.
///
/// Discriminants match the on-chain encoding. There are exactly five crop
/// kinds, which is what the biodiversity pattern counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[repr(u8)]
pub enum CropType {
    /// Quick grower, plantable in three seasons.
    Wheat = 1,
    /// Summer-only, high value.
    Tomato = 2,
    /// Summer-only, slowest and most valuable.
    Corn = 3,
    /// Restorative root crop, grows all year.
    Carrot = 4,
    /// Restorative leafy crop, fastest to mature and to decay.
    Lettuce = 5,
}

impl CropType {
    /// Every crop kind in discriminant order.
    pub const ALL: [Self; 5] = [
        Self::Wheat,
        Self::Tomato,
        Self::Corn,
        Self::Carrot,
        Self::Lettuce,
    ];

    /// Decode a raw on-chain crop value.
    ///
    /// Returns `None` for `0` (empty plot) and for unknown values; callers
    /// that need to tell the two apart check for `0` first.
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Wheat),
            2 => Some(Self::Tomato),
            3 => Some(Self::Corn),
            4 => Some(Self::Carrot),
            5 => Some(Self::Lettuce),
            _ => None,
        }
    }

    /// The raw on-chain value of this crop.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

// ---------------------------------------------------------------------------
// Seasons
// ---------------------------------------------------------------------------

/// The four seasons of the game calendar.
///
/// Seasons restrict planting and scale harvest yields per crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Season {
    /// Season index 0.
    Spring,
    /// Season index 1.
    Summer,
    /// Season index 2.
    Fall,
    /// Season index 3.
    Winter,
}

impl Season {
    /// Decode the on-chain season index. Out-of-range values fall back to
    /// [`Season::Spring`], as the program does.
    pub const fn from_index(value: u8) -> Self {
        match value {
            1 => Self::Summer,
            2 => Self::Fall,
            3 => Self::Winter,
            _ => Self::Spring,
        }
    }

    /// Parse a case-insensitive season name (`"autumn"` is accepted for fall).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "spring" => Some(Self::Spring),
            "summer" => Some(Self::Summer),
            "fall" | "autumn" => Some(Self::Fall),
            "winter" => Some(Self::Winter),
            _ => None,
        }
    }

    /// Human-readable season name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// A geometric or adjacency pattern that grants a harvest yield bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PatternKind {
    /// Three or more ready, same-crop plots contiguous in a row.
    Row,
    /// A 2x2 square of ready, same-crop plots.
    Block,
    /// A ready neighbor of a different crop.
    Companion,
    /// A plus shape of five ready, same-crop plots.
    Cross,
    /// Eight or more ready, same-crop plots on the outer ring.
    Perimeter,
    /// All five crop kinds ready somewhere on the board.
    Diversity,
}

impl PatternKind {
    /// Every pattern kind, in detection order.
    pub const ALL: [Self; 6] = [
        Self::Row,
        Self::Block,
        Self::Companion,
        Self::Cross,
        Self::Perimeter,
        Self::Diversity,
    ];

    /// Display name shown next to the bonus.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Row => "Row Pattern",
            Self::Block => "Block Pattern",
            Self::Companion => "Companion Planting",
            Self::Cross => "Cross Pattern",
            Self::Perimeter => "Perimeter Defense",
            Self::Diversity => "Biodiversity Bonus",
        }
    }

    /// Yield bonus in whole percent.
    pub const fn bonus_pct(self) -> u32 {
        match self {
            Self::Row | Self::Perimeter => 15,
            Self::Block | Self::Diversity => 20,
            Self::Companion => 10,
            Self::Cross => 25,
        }
    }

    /// CSS color used to highlight participating plots.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Row => "rgb(59, 130, 246)",
            Self::Block => "rgb(34, 197, 94)",
            Self::Companion => "rgb(251, 191, 36)",
            Self::Cross => "rgb(168, 85, 247)",
            Self::Perimeter => "rgb(239, 68, 68)",
            Self::Diversity => "rgb(236, 72, 153)",
        }
    }
}

// ---------------------------------------------------------------------------
// Harvest status
// ---------------------------------------------------------------------------

/// Where a planted crop sits on its growth and decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum HarvestStatus {
    /// Not yet mature.
    Growing,
    /// Mature and inside the optimal harvest window (full yield).
    Optimal,
    /// Past the optimal window, less than half-way to minimum yield.
    Decaying,
    /// Half-way or more toward minimum yield.
    HeavilyDecayed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_raw_values_round_trip() {
        for crop in CropType::ALL {
            assert_eq!(CropType::from_u8(crop.as_u8()), Some(crop));
        }
        assert_eq!(CropType::from_u8(0), None);
        assert_eq!(CropType::from_u8(6), None);
    }

    #[test]
    fn season_names_parse() {
        assert_eq!(Season::from_name("Spring"), Some(Season::Spring));
        assert_eq!(Season::from_name(" autumn "), Some(Season::Fall));
        assert_eq!(Season::from_name("monsoon"), None);
        assert_eq!(Season::from_index(3), Season::Winter);
        assert_eq!(Season::from_index(9), Season::Spring);
    }

    #[test]
    fn pattern_bonuses_match_table() {
        let total: u32 = PatternKind::ALL.iter().map(|k| k.bonus_pct()).sum();
        assert_eq!(total, 15 + 20 + 10 + 25 + 15 + 20);
        assert_eq!(PatternKind::Cross.name(), "Cross Pattern");
    }

    #[test]
    fn crop_serializes_by_name() {
        let json = serde_json::to_string(&CropType::Carrot).unwrap_or_default();
        assert_eq!(json, "\"Carrot\"");
    }
}
