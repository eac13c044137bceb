//! Full lordship resolution for a single ecliptic longitude.
//!
//! Combines sign, mansion and sub-lord lookups into the one record the
//! chart layer attaches to every body.

use crate::mansion::{Mansion, mansion_from_longitude};
use crate::planet::{Planet, sign_lord};
use crate::sign::{Sign, sign_from_longitude};
use crate::sublord::sub_lords_from_longitude;

/// The complete lordship hierarchy of one longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lordship {
    pub sign: Sign,
    pub sign_lord: Planet,
    pub mansion: Mansion,
    pub mansion_lord: Planet,
    /// Quarter of the mansion, 1-4.
    pub pada: u8,
    pub sub_lord: Planet,
    pub sub_sub_lord: Planet,
}

/// Resolve an ecliptic longitude into its lordship hierarchy.
///
/// Pure and total: no side effects, and every finite longitude is
/// normalized and mapped.
pub fn lordship_from_longitude(lon_deg: f64) -> Lordship {
    let sign = sign_from_longitude(lon_deg);
    let mansion = mansion_from_longitude(lon_deg);
    let subs = sub_lords_from_longitude(lon_deg);

    Lordship {
        sign: sign.sign,
        sign_lord: sign_lord(sign.sign),
        mansion: mansion.mansion,
        mansion_lord: mansion.lord,
        pada: mansion.pada,
        sub_lord: subs.sub_lord,
        sub_sub_lord: subs.sub_sub_lord,
    }
}
