//! Chart configuration: ayanamsa system, house system, location.

use crate::error::ChartError;

/// Supported ayanamsa (sidereal correction) systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ayanamsa {
    Krishnamurti,
    KrishnamurtiNew,
    Lahiri,
    Lahiri1940,
    LahiriVP285,
    LahiriIcrc,
    Raman,
    Yukteshwar,
}

/// All supported ayanamsa systems.
pub const ALL_AYANAMSAS: [Ayanamsa; 8] = [
    Ayanamsa::Krishnamurti,
    Ayanamsa::KrishnamurtiNew,
    Ayanamsa::Lahiri,
    Ayanamsa::Lahiri1940,
    Ayanamsa::LahiriVP285,
    Ayanamsa::LahiriIcrc,
    Ayanamsa::Raman,
    Ayanamsa::Yukteshwar,
];

impl Ayanamsa {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Krishnamurti => "Krishnamurti",
            Self::KrishnamurtiNew => "Krishnamurti (New)",
            Self::Lahiri => "Lahiri",
            Self::Lahiri1940 => "Lahiri 1940",
            Self::LahiriVP285 => "Lahiri VP285",
            Self::LahiriIcrc => "Lahiri ICRC",
            Self::Raman => "Raman",
            Self::Yukteshwar => "Yukteshwar",
        }
    }
}

/// Supported house division systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HouseSystem {
    /// Placidus: the KP standard.
    Placidus,
    /// Equal houses from the ascendant.
    Equal,
    /// Equal houses from the start of the rising sign.
    EqualFromSignStart,
    /// Whole-sign houses.
    WholeSign,
}

impl HouseSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "Placidus",
            Self::Equal => "Equal",
            Self::EqualFromSignStart => "Equal 2",
            Self::WholeSign => "Whole Sign",
        }
    }
}

/// Chart computation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartConfig {
    pub ayanamsa: Ayanamsa,
    pub house_system: HouseSystem,
}

impl Default for ChartConfig {
    /// The KP standard: Krishnamurti ayanamsa with Placidus houses.
    fn default() -> Self {
        Self {
            ayanamsa: Ayanamsa::Krishnamurti,
            house_system: HouseSystem::Placidus,
        }
    }
}

/// Geographic observer location.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoLocation {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl GeoLocation {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(ChartError::InvalidLocation("latitude must be within +-90 deg"));
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(ChartError::InvalidLocation("longitude must be within +-180 deg"));
        }
        Ok(())
    }
}
