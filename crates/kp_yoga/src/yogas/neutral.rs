//! Mixed-influence yogas.

use kp_chart::ChartSnapshot;
use kp_lords::Planet;

use crate::condition::{Condition, ConditionCategory, EvalError};
use crate::yogas::planet_lon;

/// All neutral yogas in canonical order.
pub fn all() -> Vec<Box<dyn Condition>> {
    vec![Box::new(ChandraMangala), Box::new(Ubhayachari)]
}

/// Moon and Mars in the same sign.
pub struct ChandraMangala;

impl Condition for ChandraMangala {
    fn name(&self) -> &'static str {
        "Chandra-Mangala Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Neutral
    }
    fn description(&self) -> &'static str {
        "Conjunction of Moon and Mars. Creates emotional intensity, drive, and volatility."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Moon, Planet::Mars]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let (Some(moon), Some(mars)) =
            (snapshot.planet(Planet::Moon), snapshot.planet(Planet::Mars))
        else {
            return Ok(false);
        };
        Ok(moon.lordship.sign == mars.lordship.sign)
    }
}

/// Planets flanking both the Sun and the Moon within 60 degrees.
pub struct Ubhayachari;

impl Ubhayachari {
    const FLANKERS: [Planet; 7] = [
        Planet::Mars,
        Planet::Mercury,
        Planet::Jupiter,
        Planet::Venus,
        Planet::Saturn,
        Planet::Rahu,
        Planet::Ketu,
    ];

    fn has_flankers(snapshot: &ChartSnapshot, center: f64) -> bool {
        let mut before = false;
        let mut after = false;
        for &p in &Self::FLANKERS {
            let Some(lon) = planet_lon(snapshot, p) else {
                continue;
            };
            let angle = (lon - center).rem_euclid(360.0);
            if angle > 0.0 && angle < 60.0 {
                after = true;
            } else if angle > 300.0 {
                before = true;
            }
        }
        before && after
    }
}

impl Condition for Ubhayachari {
    fn name(&self) -> &'static str {
        "Ubhayachari Yoga"
    }
    fn category(&self) -> ConditionCategory {
        ConditionCategory::Neutral
    }
    fn description(&self) -> &'static str {
        "Planets on both sides of Sun and Moon. Balances solar and lunar energies."
    }
    fn required_planets(&self) -> &[Planet] {
        &[Planet::Sun, Planet::Moon]
    }
    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
        let (Some(sun), Some(moon)) = (
            planet_lon(snapshot, Planet::Sun),
            planet_lon(snapshot, Planet::Moon),
        ) else {
            return Ok(false);
        };
        Ok(Self::has_flankers(snapshot, sun) && Self::has_flankers(snapshot, moon))
    }
}
