//! Immutable chart snapshots.
//!
//! A snapshot is assembled fresh for every sampled instant and never
//! mutated or shared across samples; the scanners compare successive
//! snapshots by value.

use kp_lords::{Lordship, Planet, assign_house, lordship_from_longitude};
use kp_time::Moment;

use crate::config::ChartConfig;
use crate::provider::{BodyId, RawPositions};

/// One body's full state at a sampled instant.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CelestialBody {
    pub id: BodyId,
    /// Sidereal ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    pub retrograde: bool,
    /// House number 1-12. The Ascendant is house 1 by definition.
    pub house: Option<u8>,
    pub lordship: Lordship,
}

/// Chart state at one instant: all bodies plus the 12 house cusps,
/// tagged with the moment and configuration that produced it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartSnapshot {
    pub moment: Moment,
    pub config: ChartConfig,
    pub cusps: [f64; 12],
    pub bodies: Vec<CelestialBody>,
}

impl ChartSnapshot {
    /// Assemble a snapshot from raw provider output: attach lordship
    /// and house placement to every body.
    pub fn assemble(raw: RawPositions, moment: Moment, config: ChartConfig) -> Self {
        let cusps = raw.cusps;
        let bodies = raw
            .bodies
            .into_iter()
            .map(|b| {
                let house = match b.id {
                    BodyId::Ascendant => Some(1),
                    BodyId::Planet(_) => Some(assign_house(b.longitude_deg, &cusps)),
                };
                CelestialBody {
                    id: b.id,
                    longitude_deg: b.longitude_deg,
                    retrograde: b.retrograde,
                    house,
                    lordship: lordship_from_longitude(b.longitude_deg),
                }
            })
            .collect();

        Self {
            moment,
            config,
            cusps,
            bodies,
        }
    }

    /// Look up a body by identity.
    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Look up a planet.
    pub fn planet(&self, planet: Planet) -> Option<&CelestialBody> {
        self.body(BodyId::Planet(planet))
    }

    /// The Ascendant, if charted.
    pub fn ascendant(&self) -> Option<&CelestialBody> {
        self.body(BodyId::Ascendant)
    }
}
