//! Challenging yogas.

use kp_chart::{BodyId, ChartSnapshot};
use kp_lords::{Planet, SEVEN_CLASSICAL};

use crate::condition::{Condition, ConditionCategory, EvalError, Participant};
use crate::yogas::{angle_between, nth_house_from, planet_house, planet_lon};

/// All negative yogas in canonical order.
pub fn all() -> Vec<Box<dyn Condition>> {
    vec![
        Box::new(KalaSarpa),
        Box::new(Vish),
        Box::new(Angarak),
        Box::new(GuruChandala),
        Box::new(GrahaYuddha),
        Box::new(Kemadruma),
    ]
}

/// All seven classical planets inside the Rahu-to-Ketu arc.
pub struct KalaSarpa;

impl Condition for KalaSarpa {
    fn name(&self) -> &'static str {
        "Kala Sarpa Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Negative
    }
    fn description(&self) -> &'static str {
        "All planets between Rahu and Ketu. Creates obstacles, delays, and karmic challenges."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Rahu, Planet::Ketu]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let (Some(rahu), Some(ketu)) = (
            planet_lon(snapshot, Planet::Rahu),
            planet_lon(snapshot, Planet::Ketu),
        ) else {
            return Ok(false);
        };
        // Arc runs zodiacally forward from Rahu to Ketu.
        let arc = (ketu - rahu).rem_euclid(360.0);
        let mut any_planet = false;
        for &p in &SEVEN_CLASSICAL {
            let Some(lon) = planet_lon(snapshot, p) else {
                continue;
            };
            any_planet = true;
            if (lon - rahu).rem_euclid(360.0) > arc {
                return Ok(false);
            }
        }
        Ok(any_planet)
    }
}

/// A malefic in the 6th, 8th or 12th house from the Moon.
pub struct Vish;

impl Condition for Vish {
    fn name(&self) -> &'static str {
        "Vish Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Negative
    }
    fn description(&self) -> &'static str {
        "Malefics in 6th, 8th, 12th houses from Moon. Creates stress and negative life events."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Moon]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let Some(moon_house) = planet_house(snapshot, Planet::Moon) else {
            return Ok(false);
        };
        let dusthanas = [
            nth_house_from(moon_house, 6),
            nth_house_from(moon_house, 8),
            nth_house_from(moon_house, 12),
        ];
        Ok(snapshot.bodies.iter().any(|b| match b.id {
            BodyId::Planet(p) => {
                p != Planet::Moon
                    && p.is_natural_malefic()
                    && b.house.is_some_and(|h| dusthanas.contains(&h))
            }
            BodyId::Ascendant => false,
        }))
    }
    fn participants(&self, snapshot: &ChartSnapshot) -> Vec<Participant> {
        let Some(moon_house) = planet_house(snapshot, Planet::Moon) else {
            return Vec::new();
        };
        let dusthanas = [
            nth_house_from(moon_house, 6),
            nth_house_from(moon_house, 8),
            nth_house_from(moon_house, 12),
        ];
        snapshot
            .bodies
            .iter()
            .filter(|b| match b.id {
                BodyId::Planet(p) => {
                    p == Planet::Moon
                        || (p.is_natural_malefic() && b.house.is_some_and(|h| dusthanas.contains(&h)))
                }
                BodyId::Ascendant => false,
            })
            .filter_map(Participant::from_body)
            .collect()
    }
}

/// Mars in the 1st, 4th, 7th, 8th or 12th house.
pub struct Angarak;

impl Condition for Angarak {
    fn name(&self) -> &'static str {
        "Angarak Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Negative
    }
    fn description(&self) -> &'static str {
        "Mars in 1st, 4th, 7th, 8th, or 12th house. Creates aggression and conflicts."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Mars]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        Ok(planet_house(snapshot, Planet::Mars)
            .is_some_and(|h| [1, 4, 7, 8, 12].contains(&h)))
    }
}

/// Jupiter and Rahu in the same sign.
pub struct GuruChandala;

impl Condition for GuruChandala {
    fn name(&self) -> &'static str {
        "Guru Chandala Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Negative
    }
    fn description(&self) -> &'static str {
        "Jupiter and Rahu in conjunction. Creates false knowledge and confusion."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Jupiter, Planet::Rahu]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let (Some(jupiter), Some(rahu)) =
            (snapshot.planet(Planet::Jupiter), snapshot.planet(Planet::Rahu))
        else {
            return Ok(false);
        };
        Ok(jupiter.lordship.sign == rahu.lordship.sign)
    }
}

/// Two classical planets within one degree of each other.
pub struct GrahaYuddha;

impl GrahaYuddha {
    /// The warring pair, if any.
    fn war_pair(snapshot: &ChartSnapshot) -> Option<(Planet, Planet)> {
        for (i, &p1) in SEVEN_CLASSICAL.iter().enumerate() {
            let Some(l1) = planet_lon(snapshot, p1) else {
                continue;
            };
            for &p2 in &SEVEN_CLASSICAL[i + 1..] {
                let Some(l2) = planet_lon(snapshot, p2) else {
                    continue;
                };
                if angle_between(l1, l2) < 1.0 {
                    return Some((p1, p2));
                }
            }
        }
        None
    }
}

impl Condition for GrahaYuddha {
    fn name(&self) -> &'static str {
        "Graha Yuddha"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Negative
    }
    fn description(&self) -> &'static str {
        "Two planets in close conjunction within 1 degree. Creates conflict and struggle."
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        Ok(Self::war_pair(snapshot).is_some())
    }
    fn participants(&self, snapshot: &ChartSnapshot) -> Vec<Participant> {
        match Self::war_pair(snapshot) {
            Some((p1, p2)) => [p1, p2]
                .iter()
                .filter_map(|&p| snapshot.planet(p).and_then(Participant::from_body))
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Moon with no classical companion in its own or adjacent houses.
///
/// Simplified from the full canonical rule: the Sun and the nodes are
/// not counted as company.
pub struct Kemadruma;

impl Condition for Kemadruma {
    fn name(&self) -> &'static str {
        "Kemadruma Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Negative
    }
    fn description(&self) -> &'static str {
        "Moon with no planets in adjacent houses. Creates lack of support and mental stress."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Moon]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let Some(moon_house) = planet_house(snapshot, Planet::Moon) else {
            return Ok(false);
        };
        let company_houses = [
            moon_house,
            nth_house_from(moon_house, 2),
            nth_house_from(moon_house, 12),
        ];
        let companions = [
            Planet::Mars,
            Planet::Mercury,
            Planet::Jupiter,
            Planet::Venus,
            Planet::Saturn,
        ];
        Ok(!companions.iter().any(|&p| {
            planet_house(snapshot, p).is_some_and(|h| company_houses.contains(&h))
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kp_chart::{ChartConfig, RawBody, RawPositions};
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
        ChartSnapshot::assemble(raw, Moment::utc(2024, 1, 15, 21, 0, 0.0), ChartConfig::default())
    }

    #[test]
    fn kala_sarpa_hemmed() {
        // Rahu 10, Ketu 190: arc [10, 190]; all classical inside
        let c = KalaSarpa;
        assert!(c
            .is_active(&snap(vec![
                (Planet::Rahu, 10.0),
                (Planet::Ketu, 190.0),
                (Planet::Sun, 50.0),
                (Planet::Moon, 100.0),
                (Planet::Mars, 150.0),
                (Planet::Mercury, 60.0),
                (Planet::Jupiter, 120.0),
                (Planet::Venus, 80.0),
                (Planet::Saturn, 185.0),
            ]))
            .unwrap());
    }

    #[test]
    fn kala_sarpa_broken_by_outlier() {
        let c = KalaSarpa;
        assert!(!c
            .is_active(&snap(vec![
                (Planet::Rahu, 10.0),
                (Planet::Ketu, 190.0),
                (Planet::Sun, 50.0),
                (Planet::Moon, 300.0),
            ]))
            .unwrap());
    }

    #[test]
    fn kala_sarpa_needs_nodes() {
        let c = KalaSarpa;
        assert!(!c.is_active(&snap(vec![(Planet::Sun, 50.0)])).unwrap());
    }

    #[test]
    fn vish_malefic_in_dusthana_from_moon() {
        let c = Vish;
        // Moon house 1; 6th from Moon = house 6 (150-180)
        assert!(c
            .is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Saturn, 160.0)]))
            .unwrap());
        // Benefic in the same place does not trigger
        assert!(!c
            .is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Jupiter, 160.0)]))
            .unwrap());
        // Malefic elsewhere does not trigger
        assert!(!c
            .is_active(&snap(vec![(Planet::Moon, 10.0), (Planet::Saturn, 100.0)]))
            .unwrap());
    }

    #[test]
    fn vish_participants_include_moon_and_malefic() {
        let c = Vish;
        let parts = c.participants(&snap(vec![(Planet::Moon, 10.0), (Planet::Saturn, 160.0)]));
        let names: Vec<Planet> = parts.iter().map(|p| p.planet).collect();
        assert!(names.contains(&Planet::Moon));
        assert!(names.contains(&Planet::Saturn));
    }

    #[test]
    fn angarak_critical_houses() {
        let c = Angarak;
        assert!(c.is_active(&snap(vec![(Planet::Mars, 5.0)])).unwrap()); // house 1
        assert!(c.is_active(&snap(vec![(Planet::Mars, 215.0)])).unwrap()); // house 8
        assert!(!c.is_active(&snap(vec![(Planet::Mars, 35.0)])).unwrap()); // house 2
    }

    #[test]
    fn guru_chandala_same_sign() {
        let c = GuruChandala;
        assert!(c
            .is_active(&snap(vec![(Planet::Jupiter, 40.0), (Planet::Rahu, 55.0)]))
            .unwrap());
        assert!(!c
            .is_active(&snap(vec![(Planet::Jupiter, 40.0), (Planet::Rahu, 65.0)]))
            .unwrap());
    }

    #[test]
    fn graha_yuddha_close_pair() {
        let c = GrahaYuddha;
        assert!(c
            .is_active(&snap(vec![(Planet::Venus, 100.0), (Planet::Saturn, 100.6)]))
            .unwrap());
        assert!(!c
            .is_active(&snap(vec![(Planet::Venus, 100.0), (Planet::Saturn, 101.6)]))
            .unwrap());
    }

    #[test]
    fn graha_yuddha_participants_are_the_pair() {
        let c = GrahaYuddha;
        let parts = c.participants(&snap(vec![
            (Planet::Venus, 100.0),
            (Planet::Saturn, 100.6),
            (Planet::Moon, 10.0),
        ]));
        assert_eq!(parts.len(), 2);
        let names: Vec<Planet> = parts.iter().map(|p| p.planet).collect();
        assert!(names.contains(&Planet::Venus));
        assert!(names.contains(&Planet::Saturn));
    }

    #[test]
    fn kemadruma_lonely_moon() {
        let c = Kemadruma;
        // Moon house 4, everything else far away
        assert!(c
            .is_active(&snap(vec![(Planet::Moon, 100.0), (Planet::Jupiter, 280.0)]))
            .unwrap());
        // Jupiter moves into the 2nd from Moon (house 5): company
        assert!(!c
            .is_active(&snap(vec![(Planet::Moon, 100.0), (Planet::Jupiter, 130.0)]))
            .unwrap());
        // Sun in the adjacent house is not company
        assert!(c
            .is_active(&snap(vec![(Planet::Moon, 100.0), (Planet::Sun, 130.0)]))
            .unwrap());
    }
}
