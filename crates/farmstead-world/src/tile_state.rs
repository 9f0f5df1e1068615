//! Tile state calculator: readiness, time remaining, and growth stage.
//!
//! A tile's state is a pure function of its crop, its planting timestamp,
//! and the current time. Nothing here reads or mutates shared state; the
//! only impure entry point is [`calculate_tile_state_now`], which reads the
//! wall clock and delegates.

use chrono::Utc;

use farmstead_types::{CropType, TileState};

use crate::crops::{CropMetadata, crop_metadata, decode_crop};
use crate::error::FarmError;

/// Compute the state of a plot from its raw crop value.
///
/// An empty plot (`crop_type == 0`) yields [`TileState::EMPTY`] whatever
/// `planted_at` says.
///
/// # Errors
///
/// Returns [`FarmError::UnknownCropType`] when `crop_type` is not in the
/// crop table.
pub fn calculate_tile_state(
    crop_type: u8,
    planted_at: i64,
    current_time: i64,
) -> Result<TileState, FarmError> {
    let crop = decode_crop(crop_type)?;
    Ok(tile_state_for(crop, planted_at, current_time))
}

/// [`calculate_tile_state`] evaluated at the current wall-clock time.
///
/// # Errors
///
/// Returns [`FarmError::UnknownCropType`] when `crop_type` is not in the
/// crop table.
pub fn calculate_tile_state_now(crop_type: u8, planted_at: i64) -> Result<TileState, FarmError> {
    calculate_tile_state(crop_type, planted_at, Utc::now().timestamp())
}

/// Compute the state of a plot holding an already-decoded crop.
pub fn tile_state_for(crop: Option<CropType>, planted_at: i64, current_time: i64) -> TileState {
    let Some(crop) = crop else {
        return TileState::EMPTY;
    };

    let meta = crop_metadata(crop);
    let elapsed = current_time.saturating_sub(planted_at);
    let remaining = meta.growth_time.saturating_sub(elapsed).max(0);
    // remaining is clamped to >= 0 above, so the conversion cannot fail.
    let time_remaining = u64::try_from(remaining).unwrap_or(0);

    TileState {
        crop: Some(crop),
        planted_at,
        is_ready: time_remaining == 0,
        time_remaining,
        growth_stage: growth_stage(&meta, elapsed),
    }
}

/// Visual growth stage after `elapsed` seconds.
///
/// Stages run from `0` at planting to `growth_stages - 1` at maturity and
/// advance linearly in between.
pub fn growth_stage(meta: &CropMetadata, elapsed: i64) -> u8 {
    let last = meta.growth_stages.saturating_sub(1);
    if elapsed >= meta.growth_time {
        return last;
    }
    if elapsed <= 0 {
        return 0;
    }

    let stage = elapsed
        .checked_mul(i64::from(last))
        .and_then(|v| v.checked_div(meta.growth_time))
        .unwrap_or(0);
    u8::try_from(stage).unwrap_or(last).min(last)
}

/// Render a countdown the way the farm grid shows it.
///
/// `0` is `"Ready!"`, anything under a minute is `"45s"`, longer waits are
/// `"1m 30s"`.
pub fn format_time_remaining(seconds: u64) -> String {
    if seconds == 0 {
        return "Ready!".to_owned();
    }

    let minutes = seconds.checked_div(60).unwrap_or(0);
    let rest = seconds.checked_rem(60).unwrap_or(0);
    if minutes > 0 {
        format!("{minutes}m {rest}s")
    } else {
        format!("{rest}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHEAT: u8 = 1;

    #[test]
    fn empty_plot_ignores_planted_at() {
        for planted_at in [0, 5, 1_700_000_000] {
            let state = calculate_tile_state(0, planted_at, 1_700_000_100);
            assert_eq!(state, Ok(TileState::EMPTY));
        }
    }

    #[test]
    fn ready_exactly_at_growth_time() {
        // Wheat grows in 30 seconds.
        let before = calculate_tile_state(WHEAT, 0, 29).unwrap_or(TileState::EMPTY);
        assert!(!before.is_ready);
        assert_eq!(before.time_remaining, 1);

        let at = calculate_tile_state(WHEAT, 0, 30).unwrap_or(TileState::EMPTY);
        assert!(at.is_ready);
        assert_eq!(at.time_remaining, 0);
    }

    #[test]
    fn time_remaining_never_negative() {
        let state = calculate_tile_state(WHEAT, 0, 10_000).unwrap_or(TileState::EMPTY);
        assert!(state.is_ready);
        assert_eq!(state.time_remaining, 0);
    }

    #[test]
    fn planted_in_the_future_is_not_ready() {
        let state = calculate_tile_state(WHEAT, 100, 90).unwrap_or(TileState::EMPTY);
        assert!(!state.is_ready);
        assert_eq!(state.time_remaining, 40);
        assert_eq!(state.growth_stage, 0);
    }

    #[test]
    fn unknown_crop_is_an_error() {
        assert_eq!(
            calculate_tile_state(42, 0, 0),
            Err(FarmError::UnknownCropType(42))
        );
    }

    #[test]
    fn growth_stages_advance_linearly() {
        // Corn: 60 seconds, 4 stages (0..=3).
        let corn = crop_metadata(CropType::Corn);
        assert_eq!(growth_stage(&corn, 0), 0);
        assert_eq!(growth_stage(&corn, 19), 0);
        assert_eq!(growth_stage(&corn, 20), 1);
        assert_eq!(growth_stage(&corn, 40), 2);
        assert_eq!(growth_stage(&corn, 59), 2);
        assert_eq!(growth_stage(&corn, 60), 3);
        assert_eq!(growth_stage(&corn, 600), 3);
    }

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_time_remaining(0), "Ready!");
        assert_eq!(format_time_remaining(45), "45s");
        assert_eq!(format_time_remaining(60), "1m 0s");
        assert_eq!(format_time_remaining(90), "1m 30s");
    }
}
