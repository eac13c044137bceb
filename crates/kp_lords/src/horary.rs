//! The 249 horary divisions of the zodiac.
//!
//! KP horary practice numbers the sub-lord divisions of the zodiac from
//! 1 (0 deg Aries) to 249 (end of Pisces): 243 sub segments across the
//! 27 mansions, plus 6 extra divisions where a sign boundary falls
//! strictly inside a sub segment and splits it.
//!
//! The table is derived from the same cumulative partition the resolver
//! uses, so horary targets and resolved sub lords agree by construction.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

use crate::mansion::{Mansion, mansion_from_longitude};
use crate::planet::{Planet, sign_lord};
use crate::sign::{ALL_SIGNS, Sign};
use crate::sublord::{SEGMENTS, SUB_CYCLE_DEG};
use crate::vimshottari::VIMSHOTTARI_LORDS;

/// Tolerance for treating a sign boundary as coincident with a sub
/// boundary (no split). Three of the nine mid-mansion sign boundaries
/// land exactly on a sub edge.
const BOUNDARY_EPS: f64 = 1e-6;

/// One horary division.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoraryDivision {
    /// Horary number, 1-249.
    pub number: u16,
    /// Sign containing the division (divisions never straddle signs).
    pub sign: Sign,
    /// Absolute zodiacal start, inclusive.
    pub start_deg: f64,
    /// Absolute zodiacal end, exclusive.
    pub end_deg: f64,
    pub sign_lord: Planet,
    /// Mansion containing the division.
    pub mansion: Mansion,
    pub mansion_lord: Planet,
    pub sub_lord: Planet,
}

/// Errors from horary lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HoraryError {
    /// Horary number outside 1-249.
    OutOfRange(u16),
}

impl Display for HoraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange(n) => write!(f, "horary number must be 1-249, got {n}"),
        }
    }
}

impl Error for HoraryError {}

static DIVISIONS: LazyLock<Vec<HoraryDivision>> = LazyLock::new(build_divisions);

fn push_division(out: &mut Vec<HoraryDivision>, start: f64, end: f64, sub: Planet) {
    let mansion = mansion_from_longitude(start + BOUNDARY_EPS);
    let sign_idx = ((start + BOUNDARY_EPS) / 30.0).floor() as usize % 12;
    let sign = ALL_SIGNS[sign_idx];
    out.push(HoraryDivision {
        number: (out.len() + 1) as u16,
        sign,
        start_deg: start,
        end_deg: end,
        sign_lord: sign_lord(sign),
        mansion: mansion.mansion,
        mansion_lord: mansion.lord,
        sub_lord: sub,
    });
}

fn build_divisions() -> Vec<HoraryDivision> {
    let mut out = Vec::with_capacity(249);

    // Sub boundaries: every 9th entry of the sub-sub partition closes a sub.
    for cycle in 0..3 {
        let base = cycle as f64 * SUB_CYCLE_DEG;
        let mut sub_start = 0.0_f64;
        for group in 0..81 {
            let sub_end = SEGMENTS[group * 9 + 8].upper_bound_deg;
            let sub = VIMSHOTTARI_LORDS[SEGMENTS[group * 9].sub as usize];

            let abs_start = base + sub_start;
            let abs_end = base + sub_end;

            // Split at a sign boundary strictly inside the sub.
            let next_sign_edge = ((abs_start / 30.0).floor() + 1.0) * 30.0;
            if next_sign_edge > abs_start + BOUNDARY_EPS && next_sign_edge < abs_end - BOUNDARY_EPS
            {
                push_division(&mut out, abs_start, next_sign_edge, sub);
                push_division(&mut out, next_sign_edge, abs_end, sub);
            } else {
                push_division(&mut out, abs_start, abs_end, sub);
            }

            sub_start = sub_end;
        }
    }

    out
}

/// The full table of 249 horary divisions.
pub fn horary_divisions() -> &'static [HoraryDivision] {
    &DIVISIONS
}

/// Resolve a horary number (1-249) to its division.
///
/// The division's `start_deg` is the target ascendant degree for the
/// adaptive search, and its `sub_lord` the required verification lord.
pub fn horary_target(number: u16) -> Result<HoraryDivision, HoraryError> {
    if !(1..=249).contains(&number) {
        return Err(HoraryError::OutOfRange(number));
    }
    Ok(DIVISIONS[(number - 1) as usize])
}
