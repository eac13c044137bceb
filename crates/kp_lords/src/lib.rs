//! KP lordship resolution: signs, lunar mansions, sub lords, houses,
//! horary divisions, and Vimshottari dasha periods.
//!
//! This crate provides:
//! - Pure longitude -> lordship resolution (sign / mansion / pada /
//!   sub lord / sub-sub lord) via the Vimshottari subdivision scheme
//! - House assignment from 12 cusp longitudes with zodiac wraparound
//! - The 249 horary divisions of the zodiac and their target degrees
//! - Vimshottari maha-dasha / bhukti period computation

pub mod houses;
pub mod horary;
pub mod mansion;
pub mod planet;
pub mod resolve;
pub mod sign;
pub mod sublord;
pub mod vimshottari;

pub use houses::assign_house;
pub use horary::{HoraryDivision, HoraryError, horary_divisions, horary_target};
pub use mansion::{MANSION_SPAN, Mansion, MansionInfo, PADA_SPAN, mansion_from_longitude};
pub use planet::{ALL_PLANETS, Planet, SEVEN_CLASSICAL, sign_lord};
pub use resolve::{Lordship, lordship_from_longitude};
pub use sign::{ALL_SIGNS, Dms, Sign, SignInfo, deg_to_dms, dms_to_deg, sign_from_longitude};
pub use sublord::{SUB_CYCLE_DEG, SubLords, sub_lords_from_longitude};
pub use vimshottari::{
    Bhukti, DashaPeriods, MahaDasha, VIMSHOTTARI_LORDS, VIMSHOTTARI_TOTAL_YEARS,
    VIMSHOTTARI_YEARS, vimshottari_periods,
};
