//! The position provider seam.
//!
//! Raw ephemeris computation (planet longitudes, retrograde state,
//! house cusps for an instant and location) lives behind
//! [`PositionProvider`]. Implementations must be deterministic for a
//! given input tuple and support arbitrary sub-second moments; the
//! adaptive search steps well below one second in its finest band.

use kp_lords::Planet;
use kp_time::Moment;

use crate::config::{ChartConfig, GeoLocation};
use crate::error::ChartError;
use crate::snapshot::ChartSnapshot;

/// Identity of a charted body: one of the 9 planets or the Ascendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyId {
    Planet(Planet),
    Ascendant,
}

impl BodyId {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Planet(p) => p.name(),
            Self::Ascendant => "Ascendant",
        }
    }
}

/// One body as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawBody {
    pub id: BodyId,
    /// Sidereal ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    pub retrograde: bool,
}

/// Raw provider output for one instant: bodies plus the 12 house cusps
/// (house-start longitudes in zodiacal order).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawPositions {
    pub bodies: Vec<RawBody>,
    pub cusps: [f64; 12],
}

/// External capability: raw positions at an instant and location.
///
/// Must return [`ChartError::UnsupportedConfig`] for an unsupported
/// ayanamsa/house-system pair: a fatal configuration error, never
/// retried by the engine.
pub trait PositionProvider {
    fn positions_at(
        &self,
        moment: &Moment,
        location: &GeoLocation,
        config: &ChartConfig,
    ) -> Result<RawPositions, ChartError>;
}

/// Query the provider and assemble a full snapshot in one step.
pub fn snapshot_at<P: PositionProvider + ?Sized>(
    provider: &P,
    moment: &Moment,
    location: &GeoLocation,
    config: &ChartConfig,
) -> Result<ChartSnapshot, ChartError> {
    moment.validate()?;
    location.validate()?;
    let raw = provider.positions_at(moment, location, config)?;
    Ok(ChartSnapshot::assemble(raw, *moment, *config))
}
