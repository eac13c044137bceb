//! Beneficial yogas.

use kp_chart::ChartSnapshot;
use kp_lords::Planet;

use crate::condition::{Condition, ConditionCategory, EvalError};
use crate::yogas::{KENDRA_HOUSES, angle_between, nth_house_from, planet_house, planet_lon};

/// All positive yogas in canonical order.
pub fn all() -> Vec<Box<dyn Condition>> {
    vec![
        Box::new(BudhaAditya),
        Box::new(GajaKesari),
        Box::new(Mahapurusha::RUCHAKA),
        Box::new(Mahapurusha::BHADRA),
        Box::new(Mahapurusha::HAMSA),
        Box::new(Mahapurusha::MALAVYA),
        Box::new(Mahapurusha::SASA),
        Box::new(Amala),
        Box::new(Chamunda),
    ]
}

/// Mercury and Sun in the same sign.
pub struct BudhaAditya;

impl Condition for BudhaAditya {
    fn name(&self) -> &'static str {
        "Budha-Aditya Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Positive
    }
    fn description(&self) -> &'static str {
        "Mercury and Sun in same sign. Grants intelligence, education, communication skills."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Sun, Planet::Mercury]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let (Some(sun), Some(mercury)) =
            (snapshot.planet(Planet::Sun), snapshot.planet(Planet::Mercury))
        else {
            return Ok(false);
        };
        Ok(sun.lordship.sign == mercury.lordship.sign)
    }
}

/// Jupiter and Moon in quadrant from each other (10-degree orb).
pub struct GajaKesari;

impl Condition for GajaKesari {
    fn name(&self) -> &'static str {
        "Gaja-Kesari Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Positive
    }
    fn description(&self) -> &'static str {
        "Jupiter and Moon in quadrant from each other. Grants success, fame, and prosperity."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Moon, Planet::Jupiter]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let (Some(moon), Some(jupiter)) = (
            planet_lon(snapshot, Planet::Moon),
            planet_lon(snapshot, Planet::Jupiter),
        ) else {
            return Ok(false);
        };
        let angle = angle_between(moon, jupiter);
        Ok([0.0, 90.0, 180.0].iter().any(|q| (angle - q).abs() <= 10.0))
    }
}

/// One of the five Pancha Mahapurusha yogas: the planet in its own or
/// exaltation sign, placed in a kendra.
pub struct Mahapurusha {
    planet: Planet,
    name: &'static str,
    description: &'static str,
}

impl Mahapurusha {
    pub const RUCHAKA: Self = Self {
        planet: Planet::Mars,
        name: "Ruchaka Yoga",
        description: "Mars in own sign or exaltation in a kendra. Grants courage, strength, leadership.",
    };
    pub const BHADRA: Self = Self {
        planet: Planet::Mercury,
        name: "Bhadra Yoga",
        description: "Mercury in own sign or exaltation in a kendra. Grants intelligence, communication skills.",
    };
    pub const HAMSA: Self = Self {
        planet: Planet::Jupiter,
        name: "Hamsa Yoga",
        description: "Jupiter in own sign or exaltation in a kendra. Grants wisdom, knowledge, spirituality.",
    };
    pub const MALAVYA: Self = Self {
        planet: Planet::Venus,
        name: "Malavya Yoga",
        description: "Venus in own sign or exaltation in a kendra. Grants luxury, artistic talents, comfort.",
    };
    pub const SASA: Self = Self {
        planet: Planet::Saturn,
        name: "Sasa Yoga",
        description: "Saturn in own sign or exaltation in a kendra. Grants discipline, endurance, practical wisdom.",
    };
}

impl Condition for Mahapurusha {
    fn name(&self) -> &'static str {
        self.name
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Positive
    }
    fn description(&self) -> &'static str {
        self.description
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let Some(body) = snapshot.planet(self.planet) else {
            return Ok(false);
        };
        let Some(house) = body.house else {
            return Ok(false);
        };
        if !KENDRA_HOUSES.contains(&house) {
            return Ok(false);
        }
        let sign = body.lordship.sign;
        Ok(self.planet.owns(sign) || self.planet.exaltation_sign() == Some(sign))
    }
    fn participants(&self, snapshot: &ChartSnapshot) -> Vec<crate::condition::Participant> {
        snapshot
            .planet(self.planet)
            .and_then(crate::condition::Participant::from_body)
            .into_iter()
            .collect()
    }
}

/// No malefics in the 10th house from the Moon.
pub struct Amala;

impl Condition for Amala {
    fn name(&self) -> &'static str {
        "Amala Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Positive
    }
    fn description(&self) -> &'static str {
        "10th house from Moon has no malefic planets. Grants pure reputation and success."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Moon]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let Some(moon_house) = planet_house(snapshot, Planet::Moon) else {
            return Ok(false);
        };
        let tenth = nth_house_from(moon_house, 10);
        let clear = snapshot.bodies.iter().all(|b| match b.id {
            kp_chart::BodyId::Planet(p) => !(p.is_natural_malefic() && b.house == Some(tenth)),
            kp_chart::BodyId::Ascendant => true,
        });
        Ok(clear)
    }
}

/// Jupiter, Venus and Mercury all in kendras.
pub struct Chamunda;

impl Condition for Chamunda {
    fn name(&self) -> &'static str {
        "Chamunda Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Positive
    }
    fn description(&self) -> &'static str {
        "Jupiter, Venus and Mercury in kendras. Grants divine grace, prosperity, and success."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Jupiter, Planet::Venus, Planet::Mercury]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        Ok(self.required_planets().iter().all(|&p| {
            planet_house(snapshot, p).is_some_and(|h| KENDRA_HOUSES.contains(&h))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_chart::{BodyId, ChartConfig, RawBody, RawPositions};
    use kp_time::Moment;

    fn snap(bodies: Vec<(Planet, f64)>) -> ChartSnapshot {
        let raw = RawPositions {
            bodies: bodies
                .into_iter()
                .map(|(p, lon)| RawBody {
                    id: BodyId::Planet(p),
                    longitude_deg: lon,
                    retrograde: false,
                })
                .collect(),
            cusps: [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0],
        };
        ChartSnapshot::assemble(raw, Moment::utc(2024, 1, 15, 9, 0, 0.0), ChartConfig::default())
    }

    #[test]
    fn budha_aditya_same_sign() {
        let c = BudhaAditya;
        assert!(c.is_active(&snap(vec![(Planet::Sun, 10.0), (Planet::Mercury, 25.0)])).unwrap());
        assert!(!c.is_active(&snap(vec![(Planet::Sun, 10.0), (Planet::Mercury, 35.0)])).unwrap());
    }

    #[test]
    fn budha_aditya_missing_planet_inactive() {
        let c = BudhaAditya;
        assert!(!c.is_active(&snap(vec![(Planet::Sun, 10.0)])).unwrap());
    }

    #[test]
    fn gaja_kesari_quadrants() {
        let c = GajaKesari;
        // Square within orb
        assert!(c.is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Jupiter, 95.0)])).unwrap());
        // Opposition within orb
        assert!(c.is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Jupiter, 185.0)])).unwrap());
        // 45 degrees: no quadrant
        assert!(!c.is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Jupiter, 55.0)])).unwrap());
    }

    #[test]
    fn ruchaka_mars_own_sign_kendra() {
        // Mars at 10 deg Aries: own sign, house 1 (Aries-rising chart)
        let c = Mahapurusha::RUCHAKA;
        assert!(c.is_active(&snap(vec![(Planet::Mars, 10.0)])).unwrap());
        // Mars in Taurus house 2: neither own sign nor kendra
        assert!(!c.is_active(&snap(vec![(Planet::Mars, 40.0)])).unwrap());
    }

    #[test]
    fn sasa_saturn_exalted_kendra() {
        // Saturn at 185 deg: Libra (exaltation), house 7
        let c = Mahapurusha::SASA;
        assert!(c.is_active(&snap(vec![(Planet::Saturn, 185.0)])).unwrap());
    }

    #[test]
    fn hamsa_jupiter_cancer_kendra() {
        // Jupiter at 95 deg: Cancer (exaltation), house 4
        let c = Mahapurusha::HAMSA;
        assert!(c.is_active(&snap(vec![(Planet::Jupiter, 95.0)])).unwrap());
        // Jupiter in Cancer but house 5 requires different cusps; out
        // of kendra case via Leo house 5
        assert!(!c.is_active(&snap(vec![(Planet::Jupiter, 125.0)])).unwrap());
    }

    #[test]
    fn amala_clear_tenth_from_moon() {
        let c = Amala;
        // Moon house 1; 10th from Moon = house 10 (270-300) empty
        assert!(c.is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Saturn, 200.0)])).unwrap());
        // Saturn (malefic) in house 10
        assert!(!c.is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Saturn, 280.0)])).unwrap());
        // Jupiter (benefic) in house 10 keeps it active
        assert!(c.is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Jupiter, 280.0)])).unwrap());
    }

    #[test]
    fn chamunda_three_benefics_in_kendras() {
        let c = Chamunda;
        // Houses 1, 4, 7
        assert!(c
            .is_active(&snap(vec![
                (Planet::Jupiter, 5.0),
                (Planet::Venus, 95.0),
                (Planet::Mercury, 185.0),
            ]))
            .unwrap());
        // Mercury slips to house 2
        assert!(!c
            .is_active(&snap(vec![
                (Planet::Jupiter, 5.0),
                (Planet::Venus, 95.0),
                (Planet::Mercury, 35.0),
            ]))
            .unwrap());
    }

    #[test]
    fn mahapurusha_participants_single() {
        let c = Mahapurusha::RUCHAKA;
        let parts = c.participants(&snap(vec![(Planet::Mars, 10.0), (Planet::Moon, 50.0)]));
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].planet, Planet::Mars);
    }
}
