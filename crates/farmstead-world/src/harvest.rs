//! Harvest outlook: how a mature crop's yield decays while it waits.
//!
//! Once a crop matures it holds its full base yield for the optimal window,
//! then loses yield linearly until it bottoms out at the crop's minimum at
//! `max_decay_time` seconds past maturity. Soil fertility scales the result
//! between 40% and 100%, and the outcome never falls below half the
//! minimum yield.
//!
//! All arithmetic is integer and truncating, so the numbers shown to the
//! player are the numbers the harvest instruction settles.

use serde::Serialize;

use farmstead_types::{CropType, HarvestStatus};

use crate::crops::{CropMetadata, crop_metadata};

/// Fertility modifier applied to an exhausted plot.
pub const MIN_FERTILITY_MODIFIER_PCT: u32 = 40;

/// Fertility modifier applied to a fully fertile plot.
pub const MAX_FERTILITY_MODIFIER_PCT: u32 = 100;

/// Decay progress below which a crop is merely decaying.
const HEAVY_DECAY_PCT: u32 = 50;

/// Yield projection for a planted plot at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HarvestOutlook {
    /// Where the crop sits on its growth and decay curve.
    pub status: HarvestStatus,
    /// Seconds since maturity; negative while still growing.
    pub time_since_mature: i64,
    /// Progress from base yield toward minimum yield, 0 to 100.
    pub decay_progress_pct: u32,
    /// Yield after time decay, before fertility.
    pub decayed_yield: u32,
    /// Fertility scaling in percent (40 to 100).
    pub fertility_modifier_pct: u32,
    /// Yield the player can expect if they harvest now.
    pub expected_yield: u32,
}

/// Yield after time decay alone.
pub fn decayed_yield(meta: &CropMetadata, time_since_mature: i64) -> u32 {
    if time_since_mature <= meta.optimal_harvest_window {
        return meta.base_yield;
    }
    if time_since_mature >= meta.max_decay_time {
        return meta.min_yield;
    }

    let loss_range = u64::from(meta.base_yield.saturating_sub(meta.min_yield));
    let loss = loss_range
        .checked_mul(decay_elapsed(meta, time_since_mature))
        .and_then(|v| v.checked_div(decay_window(meta)))
        .unwrap_or(loss_range);
    let loss = u32::try_from(loss).unwrap_or(u32::MAX);

    meta.base_yield.saturating_sub(loss).max(meta.min_yield)
}

/// Fertility scaling in percent: 40 at zero fertility, 100 at full.
pub fn fertility_modifier_pct(fertility: u8) -> u32 {
    let span = MAX_FERTILITY_MODIFIER_PCT.saturating_sub(MIN_FERTILITY_MODIFIER_PCT);
    let scaled = u32::from(fertility)
        .saturating_mul(span)
        .checked_div(100)
        .unwrap_or(0);
    MIN_FERTILITY_MODIFIER_PCT
        .saturating_add(scaled)
        .min(MAX_FERTILITY_MODIFIER_PCT)
}

/// Project the harvest of `crop` planted at `planted_at` on soil of
/// `fertility`, evaluated at `current_time`.
pub fn harvest_outlook(
    crop: CropType,
    planted_at: i64,
    fertility: u8,
    current_time: i64,
) -> HarvestOutlook {
    let meta = crop_metadata(crop);
    let mature_at = planted_at.saturating_add(meta.growth_time);
    let time_since_mature = current_time.saturating_sub(mature_at);

    let decay_progress_pct = decay_progress_pct(&meta, time_since_mature);
    let status = if time_since_mature < 0 {
        HarvestStatus::Growing
    } else if time_since_mature <= meta.optimal_harvest_window {
        HarvestStatus::Optimal
    } else if decay_progress_pct < HEAVY_DECAY_PCT {
        HarvestStatus::Decaying
    } else {
        HarvestStatus::HeavilyDecayed
    };

    let decayed_yield = decayed_yield(&meta, time_since_mature.max(0));
    let fertility_modifier_pct = fertility_modifier_pct(fertility);
    let expected_yield = u64::from(decayed_yield)
        .saturating_mul(u64::from(fertility_modifier_pct))
        .checked_div(100)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(decayed_yield)
        .max(meta.min_yield.checked_div(2).unwrap_or(0));

    HarvestOutlook {
        status,
        time_since_mature,
        decay_progress_pct,
        decayed_yield,
        fertility_modifier_pct,
        expected_yield,
    }
}

fn decay_window(meta: &CropMetadata) -> u64 {
    u64::try_from(meta.max_decay_time.saturating_sub(meta.optimal_harvest_window))
        .unwrap_or(0)
        .max(1)
}

fn decay_elapsed(meta: &CropMetadata, time_since_mature: i64) -> u64 {
    u64::try_from(time_since_mature.saturating_sub(meta.optimal_harvest_window)).unwrap_or(0)
}

fn decay_progress_pct(meta: &CropMetadata, time_since_mature: i64) -> u32 {
    let pct = decay_elapsed(meta, time_since_mature)
        .saturating_mul(100)
        .checked_div(decay_window(meta))
        .unwrap_or(0)
        .min(100);
    u32::try_from(pct).unwrap_or(100)
}
