//! Soil moisture to yield multiplier.

use rust_decimal::Decimal;

/// Moisture level (percent) at or above which a plot yields in full.
pub const WELL_WATERED: u8 = 60;

/// Yield multiplier for a plot at `water_level` percent soil moisture.
///
/// | Moisture | Multiplier |
/// |----------|-----------:|
/// | 60-100   |       1.00 |
/// | 40-59    |       0.85 |
/// | 20-39    |       0.70 |
/// | other    |       0.50 |
///
/// Levels above 100 are not valid moisture readings and fall into the last
/// band.
pub fn water_multiplier(water_level: u8) -> Decimal {
    match water_level {
        WELL_WATERED..=100 => Decimal::ONE,
        40..=59 => Decimal::new(85, 2),
        20..=39 => Decimal::new(7, 1),
        _ => Decimal::new(5, 1),
    }
}
