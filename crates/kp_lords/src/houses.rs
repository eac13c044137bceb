//! House assignment from 12 cusp longitudes.
//!
//! Cusps are house-start longitudes in zodiacal order. House `i` spans
//! `[cusps[i], cusps[i+1])` with wraparound across 0/360.

use crate::sign::normalize_360;

/// Assign a house number (1-12) to an ecliptic longitude.
///
/// If `cusps[i+1] < cusps[i]` the span wraps: 360 is added to the end
/// cusp, and to the longitude when it sits below the start cusp.
///
/// Degenerate cusp sets that match no span fall back to whole-sign
/// counting from the first cusp, normalized into 1-12 and reported via
/// a warning. This is a boundary/rounding correction, not an error.
pub fn assign_house(lon_deg: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_360(lon_deg);

    for i in 0..12 {
        let start = normalize_360(cusps[i]);
        let mut end = normalize_360(cusps[(i + 1) % 12]);
        if end < start {
            end += 360.0;
        }
        let mut probe = lon;
        if probe < start {
            probe += 360.0;
        }
        if probe >= start && probe < end {
            return (i + 1) as u8;
        }
    }

    // Defensive path: whole-sign from the first cusp, clamped into range.
    let offset = (lon - normalize_360(cusps[0])).rem_euclid(360.0);
    let raw = (offset / 30.0).floor() as i32 + 1;
    let corrected = (((raw - 1).rem_euclid(12)) + 1) as u8;
    tracing::warn!(
        longitude = lon,
        corrected_house = corrected,
        "house assignment fell through cusp spans; corrected by normalization"
    );
    corrected
}
