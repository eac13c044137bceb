//! Planetary aspect detection.
//!
//! The seven major aspects with their traditional orbs. Angular
//! distance between two bodies is folded into [0, 180] before
//! comparison, so a 350-degree separation reads as a 10-degree one.

use kp_lords::{ALL_PLANETS, Planet};

use crate::provider::BodyId;
use crate::snapshot::ChartSnapshot;

/// The seven major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AspectKind {
    Conjunction,
    SemiSextile,
    Sextile,
    Square,
    Trine,
    Quincunx,
    Opposition,
}

/// All seven aspects in angle order.
pub const ALL_ASPECTS: [AspectKind; 7] = [
    AspectKind::Conjunction,
    AspectKind::SemiSextile,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Quincunx,
    AspectKind::Opposition,
];

impl AspectKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunction => "Conjunction",
            Self::SemiSextile => "Semi-Sextile",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Quincunx => "Quincunx",
            Self::Opposition => "Opposition",
        }
    }

    /// Exact aspect angle in degrees.
    pub const fn angle_deg(self) -> f64 {
        match self {
            Self::Conjunction => 0.0,
            Self::SemiSextile => 30.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Quincunx => 150.0,
            Self::Opposition => 180.0,
        }
    }

    /// Traditional orb in degrees.
    pub const fn orb_deg(self) -> f64 {
        match self {
            Self::Conjunction => 8.0,
            Self::SemiSextile => 2.0,
            Self::Sextile => 6.0,
            Self::Square => 8.0,
            Self::Trine => 8.0,
            Self::Quincunx => 4.0,
            Self::Opposition => 10.0,
        }
    }
}

/// Which aspects and bodies to consider.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectConfig {
    pub kinds: Vec<AspectKind>,
    pub bodies: Vec<BodyId>,
}

impl Default for AspectConfig {
    /// Conjunction/Square/Opposition over the 9 planets and Ascendant.
    fn default() -> Self {
        let mut bodies: Vec<BodyId> = ALL_PLANETS.iter().map(|&p| BodyId::Planet(p)).collect();
        bodies.push(BodyId::Ascendant);
        Self {
            kinds: vec![
                AspectKind::Conjunction,
                AspectKind::Square,
                AspectKind::Opposition,
            ],
            bodies,
        }
    }
}

/// One detected aspect.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AspectHit {
    pub body1: BodyId,
    pub body2: BodyId,
    pub kind: AspectKind,
    /// Deviation from the exact angle, in degrees.
    pub orb_deg: f64,
}

impl AspectHit {
    /// Stable event label, e.g. `"Sun Conjunction Mercury"`. Used as
    /// the dedup key for side events during a transit scan.
    pub fn label(&self) -> String {
        format!("{} {} {}", self.body1.name(), self.kind.name(), self.body2.name())
    }
}

/// Folded angular distance between two longitudes, in [0, 180].
fn angular_distance(lon1: f64, lon2: f64) -> f64 {
    let mut diff = (lon1 - lon2).abs() % 360.0;
    if diff > 180.0 {
        diff = 360.0 - diff;
    }
    diff
}

/// Detect all configured aspects present in a snapshot.
///
/// Pairs are enumerated in configured body order; each pair reports at
/// most one aspect (the first configured kind within orb).
pub fn detect_aspects(snapshot: &ChartSnapshot, config: &AspectConfig) -> Vec<AspectHit> {
    let mut hits = Vec::new();

    let present: Vec<(BodyId, f64)> = config
        .bodies
        .iter()
        .filter_map(|&id| snapshot.body(id).map(|b| (id, b.longitude_deg)))
        .collect();

    for i in 0..present.len() {
        for j in (i + 1)..present.len() {
            let (id1, lon1) = present[i];
            let (id2, lon2) = present[j];
            let dist = angular_distance(lon1, lon2);
            for &kind in &config.kinds {
                let orb = (dist - kind.angle_deg()).abs();
                if orb <= kind.orb_deg() {
                    hits.push(AspectHit {
                        body1: id1,
                        body2: id2,
                        kind,
                        orb_deg: orb,
                    });
                    break;
                }
            }
        }
    }

    hits
}

/// Labels of all configured aspects in a snapshot, for side-event
/// dedup during scans.
pub fn aspect_labels(snapshot: &ChartSnapshot, config: &AspectConfig) -> Vec<String> {
    detect_aspects(snapshot, config).iter().map(AspectHit::label).collect()
}

/// Check whether two specific planets share any configured aspect.
pub fn planets_in_aspect(
    snapshot: &ChartSnapshot,
    p1: Planet,
    p2: Planet,
    config: &AspectConfig,
) -> bool {
    let (Some(b1), Some(b2)) = (snapshot.planet(p1), snapshot.planet(p2)) else {
        return false;
    };
    let dist = angular_distance(b1.longitude_deg, b2.longitude_deg);
    config
        .kinds
        .iter()
        .any(|k| (dist - k.angle_deg()).abs() <= k.orb_deg())
}
