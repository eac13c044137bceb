//! Adaptive target-matching search (Mode B).
//!
//! Steps monotonically forward through a one-day window looking for the
//! instant a sampled scalar (typically the ascendant longitude) lands
//! inside an acceptance band around the target, then gates the match on
//! a verification predicate (typically the required sub lord).
//!
//! The step length adapts to the distance from the target in four
//! bands, each roughly two orders of magnitude finer than the previous.
//! No bisection: the scalar is non-monotonic near retrograde stations,
//! and the legacy forward-stepping order decides which of several
//! nearby candidates is found first.

use kp_chart::{ChartConfig, ChartError, GeoLocation, PositionProvider, snapshot_at};
use kp_lords::horary_target;
use kp_time::{Moment, SECONDS_PER_DAY};

use crate::error::ScanError;

/// Step factors per distance band. The step in days is
/// `1 / (86400 * factor)`: the coarsest band advances ~200 s per
/// evaluation, the finest ~10 ms.
const STEP_FACTOR_COARSE: f64 = 0.005;
const STEP_FACTOR_MEDIUM: f64 = 1.0;
const STEP_FACTOR_FINE: f64 = 10.0;
const STEP_FACTOR_FINEST: f64 = 100.0;

/// Search parameters for Mode B.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSearchConfig {
    /// Desired scalar value in degrees [0, 360).
    pub target_deg: f64,
    /// Lower edge of the acceptance band, exclusive. Negative disables
    /// the lower bound (then an exact hit is accepted).
    pub band_floor_deg: f64,
    /// Upper edge of the acceptance band, inclusive.
    pub band_ceil_deg: f64,
    /// Iteration safety cap.
    pub max_iterations: u32,
}

impl TargetSearchConfig {
    /// Legacy acceptance band (0.0001, 0.001] with a 5000-step cap.
    pub fn for_target(target_deg: f64) -> Self {
        Self {
            target_deg,
            band_floor_deg: 1e-4,
            band_ceil_deg: 1e-3,
            max_iterations: 5_000,
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !(0.0..360.0).contains(&self.target_deg) {
            return Err("target must be in [0, 360)");
        }
        if !(self.band_ceil_deg > 0.0) {
            return Err("acceptance band ceiling must be positive");
        }
        if self.band_floor_deg >= self.band_ceil_deg {
            return Err("acceptance band floor must sit below the ceiling");
        }
        if self.max_iterations == 0 {
            return Err("iteration cap must be positive");
        }
        Ok(())
    }
}

/// A successful Mode B match.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetMatch {
    pub moment: Moment,
    /// The sampled scalar at the matched instant.
    pub scalar_deg: f64,
    /// Iterations consumed before the match.
    pub iterations: u32,
}

fn step_factor(diff: f64, scalar: f64, target: f64) -> f64 {
    let factor = if diff > 10.0 {
        STEP_FACTOR_COARSE
    } else if diff >= 1.0 {
        STEP_FACTOR_MEDIUM
    } else if diff >= 0.1 {
        STEP_FACTOR_FINE
    } else {
        STEP_FACTOR_FINEST
    };
    // Seam case: target at exactly 0 deg approached from below 360.
    if scalar > 355.0 && target == 0.0 {
        return STEP_FACTOR_FINEST;
    }
    factor
}

/// Search without cancellation.
pub fn search_target<S, V>(
    scalar: S,
    verify: V,
    start: &Moment,
    end: &Moment,
    config: &TargetSearchConfig,
) -> Result<Option<TargetMatch>, ScanError>
where
    S: FnMut(&Moment) -> Result<f64, ChartError>,
    V: FnMut(&Moment) -> Result<bool, ChartError>,
{
    search_target_with(scalar, verify, start, end, config, || false)
}

/// Full Mode B search.
///
/// Returns `Ok(None)` when the window or iteration cap is exhausted
/// without a verified match: an expected outcome, distinct from every
/// error. `cancel` is checked once per sample.
pub fn search_target_with<S, V, C>(
    mut scalar: S,
    mut verify: V,
    start: &Moment,
    end: &Moment,
    config: &TargetSearchConfig,
    cancel: C,
) -> Result<Option<TargetMatch>, ScanError>
where
    S: FnMut(&Moment) -> Result<f64, ChartError>,
    V: FnMut(&Moment) -> Result<bool, ChartError>,
    C: Fn() -> bool,
{
    config.validate().map_err(ScanError::InvalidConfig)?;
    start.validate()?;
    end.validate()?;

    let start_jd = start.to_jd_utc();
    let end_jd = end.to_jd_utc();
    if end_jd <= start_jd {
        return Err(ScanError::InvalidConfig("end must be after start"));
    }
    if (end_jd - start_jd) * SECONDS_PER_DAY > SECONDS_PER_DAY + 1.0 {
        return Err(ScanError::InvalidConfig("search window wider than one day"));
    }

    let mut jd = start_jd;
    let mut iterations = 0u32;

    while jd <= end_jd && iterations < config.max_iterations {
        if cancel() {
            return Ok(None);
        }

        let moment = Moment::from_jd_utc(jd, start.utc_offset_hours);
        let value = scalar(&moment)?;
        let diff = (value - config.target_deg).abs();

        if diff > config.band_floor_deg && diff <= config.band_ceil_deg {
            // Primary scalar matched; gate on the exact-match predicate.
            if verify(&moment)? {
                tracing::debug!(
                    iterations,
                    scalar = value,
                    target = config.target_deg,
                    "target search matched"
                );
                return Ok(Some(TargetMatch {
                    moment,
                    scalar_deg: value,
                    iterations,
                }));
            }
        }

        let factor = step_factor(diff, value, config.target_deg);
        jd += 1.0 / (SECONDS_PER_DAY * factor);
        iterations += 1;
    }

    tracing::debug!(iterations, "target search exhausted without a match");
    Ok(None)
}

/// Locate the instant the ascendant reaches a horary number's degree
/// with its required sub lord, within one day of `day_start`.
///
/// `Ok(None)`, meaning no horary match found for this day, is an
/// expected outcome the caller must handle, not a defect.
pub fn find_horary_ascendant<P: PositionProvider + ?Sized>(
    provider: &P,
    horary_number: u16,
    day_start: &Moment,
    location: &GeoLocation,
    chart_config: &ChartConfig,
) -> Result<Option<TargetMatch>, ScanError> {
    let division = horary_target(horary_number)?;
    let config = TargetSearchConfig::for_target(division.start_deg);
    let day_end = day_start.add_seconds(SECONDS_PER_DAY);

    let scalar = |moment: &Moment| -> Result<f64, ChartError> {
        let snap = snapshot_at(provider, moment, location, chart_config)?;
        let asc = snap.ascendant().ok_or(ChartError::MissingBody(kp_chart::BodyId::Ascendant))?;
        Ok(asc.longitude_deg)
    };
    let verify = |moment: &Moment| -> Result<bool, ChartError> {
        let snap = snapshot_at(provider, moment, location, chart_config)?;
        let asc = snap.ascendant().ok_or(ChartError::MissingBody(kp_chart::BodyId::Ascendant))?;
        Ok(asc.lordship.sub_lord == division.sub_lord)
    };

    search_target(scalar, verify, day_start, &day_end, &config)
}
