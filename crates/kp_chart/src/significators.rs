//! KP significator tables (the ABCD scheme).
//!
//! For a planet: A = house occupied by its star lord, B = its own
//! house, C = houses whose sign lord is its star lord, D = houses whose
//! sign lord is the planet itself.
//!
//! For a house: A = planets in the stars of its occupants, B = its
//! occupants, C = planets in the stars of its sign lord, D = its sign
//! lord.

use kp_lords::{Planet, sign_from_longitude, sign_lord};

use crate::provider::BodyId;
use crate::snapshot::ChartSnapshot;

/// ABCD significators of one planet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanetSignificators {
    pub planet: Planet,
    /// House occupied by the planet's star lord.
    pub a: Option<u8>,
    /// House occupied by the planet itself.
    pub b: Option<u8>,
    /// Houses whose sign lord is the planet's star lord.
    pub c: Vec<u8>,
    /// Houses whose sign lord is the planet itself.
    pub d: Vec<u8>,
}

/// ABCD significators of one house.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HouseSignificators {
    pub house: u8,
    /// Planets in the stars of this house's occupants.
    pub a: Vec<Planet>,
    /// Planets occupying this house.
    pub b: Vec<Planet>,
    /// Planets in the stars of this house's sign lord.
    pub c: Vec<Planet>,
    /// Sign lord of this house.
    pub d: Planet,
}

/// Sign lord of each house cusp.
fn cusp_sign_lords(snapshot: &ChartSnapshot) -> [Planet; 12] {
    let mut lords = [Planet::Sun; 12];
    for (i, &cusp) in snapshot.cusps.iter().enumerate() {
        lords[i] = sign_lord(sign_from_longitude(cusp).sign);
    }
    lords
}

/// Charted planets with their houses and star lords.
fn charted_planets(snapshot: &ChartSnapshot) -> Vec<(Planet, Option<u8>, Planet)> {
    snapshot
        .bodies
        .iter()
        .filter_map(|b| match b.id {
            BodyId::Planet(p) => Some((p, b.house, b.lordship.mansion_lord)),
            BodyId::Ascendant => None,
        })
        .collect()
}

/// Compute the ABCD significator table for every charted planet.
pub fn planet_significators(snapshot: &ChartSnapshot) -> Vec<PlanetSignificators> {
    let planets = charted_planets(snapshot);
    let house_lords = cusp_sign_lords(snapshot);

    planets
        .iter()
        .map(|&(planet, house, star_lord)| {
            let a = planets
                .iter()
                .find(|&&(p, _, _)| p == star_lord)
                .and_then(|&(_, h, _)| h);
            let c = (1..=12u8)
                .filter(|&h| house_lords[(h - 1) as usize] == star_lord)
                .collect();
            let d = (1..=12u8)
                .filter(|&h| house_lords[(h - 1) as usize] == planet)
                .collect();
            PlanetSignificators {
                planet,
                a,
                b: house,
                c,
                d,
            }
        })
        .collect()
}

/// Compute the ABCD significator table for every house.
pub fn house_significators(snapshot: &ChartSnapshot) -> Vec<HouseSignificators> {
    let planets = charted_planets(snapshot);
    let house_lords = cusp_sign_lords(snapshot);

    (1..=12u8)
        .map(|house| {
            let occupants: Vec<Planet> = planets
                .iter()
                .filter(|&&(_, h, _)| h == Some(house))
                .map(|&(p, _, _)| p)
                .collect();
            let a = planets
                .iter()
                .filter(|&&(_, _, star)| occupants.contains(&star))
                .map(|&(p, _, _)| p)
                .collect();
            let lord = house_lords[(house - 1) as usize];
            let c = planets
                .iter()
                .filter(|&&(_, _, star)| star == lord)
                .map(|&(p, _, _)| p)
                .collect();
            HouseSignificators {
                house,
                a,
                b: occupants,
                c,
                d: lord,
            }
        })
        .collect()
}
