//! Vimshottari dasha: the 120-year planetary period cycle.
//!
//! The 9-lord sequence and its year durations recur at every subdivision
//! level of the KP system (maha dasha, bhukti, and the sub/sub-sub
//! zodiac partition in [`crate::sublord`]).
//!
//! Period computation follows the classical rule: the first maha dasha
//! is the lord of the Moon's natal mansion, with its balance
//! proportional to the arc remaining in that mansion; bhuktis divide
//! each maha dasha in sequence proportion.

use kp_time::Moment;

use crate::mansion::{MANSION_SPAN, mansion_from_longitude};
use crate::planet::Planet;

/// Vimshottari lord sequence: Ketu, Venus, Sun, Moon, Mars, Rahu,
/// Jupiter, Saturn, Mercury.
pub const VIMSHOTTARI_LORDS: [Planet; 9] = [
    Planet::Ketu,
    Planet::Venus,
    Planet::Sun,
    Planet::Moon,
    Planet::Mars,
    Planet::Rahu,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Mercury,
];

/// Period length in years for each lord, positionally paired with
/// [`VIMSHOTTARI_LORDS`]. Sums to 120.
pub const VIMSHOTTARI_YEARS: [f64; 9] = [7.0, 20.0, 6.0, 10.0, 7.0, 18.0, 16.0, 19.0, 17.0];

/// Full cycle length in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

/// Mean year length in days used for period date arithmetic.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// One bhukti (sub-period) within a maha dasha.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bhukti {
    pub lord: Planet,
    pub start: Moment,
    pub end: Moment,
    pub years: f64,
}

/// One maha dasha period with its 9 bhuktis.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MahaDasha {
    pub lord: Planet,
    pub start: Moment,
    pub end: Moment,
    pub years: f64,
    pub bhuktis: Vec<Bhukti>,
}

/// Full Vimshottari result for one birth moment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DashaPeriods {
    /// The 9 maha dashas starting from the natal mansion lord.
    pub mahas: Vec<MahaDasha>,
    /// Years of the first maha dasha already elapsed at birth.
    pub elapsed_years_at_birth: f64,
}

fn add_years(moment: &Moment, years: f64) -> Moment {
    moment.add_seconds(years * DAYS_PER_YEAR * 86_400.0)
}

/// Compute the Vimshottari maha-dasha and bhukti periods from the
/// Moon's ecliptic longitude at birth.
///
/// The sequence starts with the lord of the Moon's mansion; the elapsed
/// fraction of that mansion's arc is the elapsed fraction of its period.
pub fn vimshottari_periods(moon_longitude_deg: f64, birth: &Moment) -> DashaPeriods {
    let mansion = mansion_from_longitude(moon_longitude_deg);
    let start_idx = (mansion.mansion_index % 9) as usize;

    let elapsed_frac = mansion.degrees_in_mansion / MANSION_SPAN;
    let first_years = VIMSHOTTARI_YEARS[start_idx];
    let elapsed_years_at_birth = first_years * elapsed_frac;

    // The first maha dasha began before birth by the elapsed portion.
    let mut maha_start = add_years(birth, -elapsed_years_at_birth);
    let mut mahas = Vec::with_capacity(9);

    for n in 0..9 {
        let idx = (start_idx + n) % 9;
        let lord = VIMSHOTTARI_LORDS[idx];
        let years = VIMSHOTTARI_YEARS[idx];
        let maha_end = add_years(&maha_start, years);

        let mut bhuktis = Vec::with_capacity(9);
        let mut bhukti_start = maha_start;
        for b in 0..9 {
            let b_idx = (idx + b) % 9;
            let b_years = years * VIMSHOTTARI_YEARS[b_idx] / VIMSHOTTARI_TOTAL_YEARS;
            let b_end = add_years(&bhukti_start, b_years);
            bhuktis.push(Bhukti {
                lord: VIMSHOTTARI_LORDS[b_idx],
                start: bhukti_start,
                end: b_end,
                years: b_years,
            });
            bhukti_start = b_end;
        }

        mahas.push(MahaDasha {
            lord,
            start: maha_start,
            end: maha_end,
            years,
            bhuktis,
        });
        maha_start = maha_end;
    }

    DashaPeriods {
        mahas,
        elapsed_years_at_birth,
    }
}
