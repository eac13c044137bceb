//! Lunar mansion (nakshatra) computation.
//!
//! The ecliptic circle is divided into 27 equal mansions of 13 deg 20'
//! (13.3333... deg) each. Each mansion has 4 padas (quarters) of
//! 3 deg 20' and a ruling planet drawn from the 9-lord Vimshottari
//! sequence, which repeats three times around the zodiac.

use crate::planet::Planet;
use crate::sign::normalize_360;
use crate::vimshottari::VIMSHOTTARI_LORDS;

/// Span of one mansion: 360/27 = 13.3333... degrees.
pub const MANSION_SPAN: f64 = 360.0 / 27.0;

/// Span of one pada: 13.3333.../4 = 3.3333... degrees.
pub const PADA_SPAN: f64 = MANSION_SPAN / 4.0;

/// The 27 lunar mansions from Ashwini to Revati.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mansion {
    Ashwini,
    Bharani,
    Krittika,
    Rohini,
    Mrigashira,
    Ardra,
    Punarvasu,
    Pushya,
    Ashlesha,
    Magha,
    PurvaPhalguni,
    UttaraPhalguni,
    Hasta,
    Chitra,
    Swati,
    Vishakha,
    Anuradha,
    Jyeshtha,
    Mula,
    PurvaAshadha,
    UttaraAshadha,
    Shravana,
    Dhanishtha,
    Shatabhisha,
    PurvaBhadrapada,
    UttaraBhadrapada,
    Revati,
}

/// All 27 mansions in order (0 = Ashwini, 26 = Revati).
pub const ALL_MANSIONS: [Mansion; 27] = [
    Mansion::Ashwini,
    Mansion::Bharani,
    Mansion::Krittika,
    Mansion::Rohini,
    Mansion::Mrigashira,
    Mansion::Ardra,
    Mansion::Punarvasu,
    Mansion::Pushya,
    Mansion::Ashlesha,
    Mansion::Magha,
    Mansion::PurvaPhalguni,
    Mansion::UttaraPhalguni,
    Mansion::Hasta,
    Mansion::Chitra,
    Mansion::Swati,
    Mansion::Vishakha,
    Mansion::Anuradha,
    Mansion::Jyeshtha,
    Mansion::Mula,
    Mansion::PurvaAshadha,
    Mansion::UttaraAshadha,
    Mansion::Shravana,
    Mansion::Dhanishtha,
    Mansion::Shatabhisha,
    Mansion::PurvaBhadrapada,
    Mansion::UttaraBhadrapada,
    Mansion::Revati,
];

impl Mansion {
    /// Name of the mansion.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ashwini => "Ashwini",
            Self::Bharani => "Bharani",
            Self::Krittika => "Krittika",
            Self::Rohini => "Rohini",
            Self::Mrigashira => "Mrigashira",
            Self::Ardra => "Ardra",
            Self::Punarvasu => "Punarvasu",
            Self::Pushya => "Pushya",
            Self::Ashlesha => "Ashlesha",
            Self::Magha => "Magha",
            Self::PurvaPhalguni => "Purva Phalguni",
            Self::UttaraPhalguni => "Uttara Phalguni",
            Self::Hasta => "Hasta",
            Self::Chitra => "Chitra",
            Self::Swati => "Swati",
            Self::Vishakha => "Vishakha",
            Self::Anuradha => "Anuradha",
            Self::Jyeshtha => "Jyeshtha",
            Self::Mula => "Mula",
            Self::PurvaAshadha => "Purva Ashadha",
            Self::UttaraAshadha => "Uttara Ashadha",
            Self::Shravana => "Shravana",
            Self::Dhanishtha => "Dhanishtha",
            Self::Shatabhisha => "Shatabhisha",
            Self::PurvaBhadrapada => "Purva Bhadrapada",
            Self::UttaraBhadrapada => "Uttara Bhadrapada",
            Self::Revati => "Revati",
        }
    }

    /// 0-based index (Ashwini=0 .. Revati=26).
    pub const fn index(self) -> u8 {
        match self {
            Self::Ashwini => 0,
            Self::Bharani => 1,
            Self::Krittika => 2,
            Self::Rohini => 3,
            Self::Mrigashira => 4,
            Self::Ardra => 5,
            Self::Punarvasu => 6,
            Self::Pushya => 7,
            Self::Ashlesha => 8,
            Self::Magha => 9,
            Self::PurvaPhalguni => 10,
            Self::UttaraPhalguni => 11,
            Self::Hasta => 12,
            Self::Chitra => 13,
            Self::Swati => 14,
            Self::Vishakha => 15,
            Self::Anuradha => 16,
            Self::Jyeshtha => 17,
            Self::Mula => 18,
            Self::PurvaAshadha => 19,
            Self::UttaraAshadha => 20,
            Self::Shravana => 21,
            Self::Dhanishtha => 22,
            Self::Shatabhisha => 23,
            Self::PurvaBhadrapada => 24,
            Self::UttaraBhadrapada => 25,
            Self::Revati => 26,
        }
    }

    /// Ruling planet: the Vimshottari lord at `index % 9`.
    pub const fn lord(self) -> Planet {
        VIMSHOTTARI_LORDS[(self.index() % 9) as usize]
    }

    /// All 27 mansions in order.
    pub const fn all() -> &'static [Mansion; 27] {
        &ALL_MANSIONS
    }
}

/// Result of mansion lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MansionInfo {
    /// The mansion.
    pub mansion: Mansion,
    /// 0-based index (0 = Ashwini).
    pub mansion_index: u8,
    /// Ruling planet of the mansion.
    pub lord: Planet,
    /// Pada (quarter) within the mansion, 1-4.
    pub pada: u8,
    /// Decimal degrees within the mansion [0.0, 13.333...).
    pub degrees_in_mansion: f64,
}

/// Determine mansion, lord and pada from an ecliptic longitude.
pub fn mansion_from_longitude(lon_deg: f64) -> MansionInfo {
    let lon = normalize_360(lon_deg);
    let idx = ((lon / MANSION_SPAN).floor() as u8).min(26);
    let degrees_in_mansion = lon - (idx as f64) * MANSION_SPAN;
    let pada_idx = ((degrees_in_mansion / PADA_SPAN).floor() as u8).min(3);

    MansionInfo {
        mansion: ALL_MANSIONS[idx as usize],
        mansion_index: idx,
        lord: ALL_MANSIONS[idx as usize].lord(),
        pada: pada_idx + 1,
        degrees_in_mansion,
    }
}
