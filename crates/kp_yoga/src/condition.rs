//! The condition capability.
//!
//! A condition is a named boolean predicate over chart state with a
//! static positive/negative/neutral classification, a participant list
//! and a strength score. Implementations are registered at startup in a
//! [`crate::ConditionRegistry`]; the tracker places no constraint on
//! their internal logic beyond this contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kp_chart::{BodyId, CelestialBody, ChartSnapshot};
use kp_lords::{Planet, Sign};

/// Static classification of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConditionCategory {
    Positive,
    Negative,
    Neutral,
}

impl ConditionCategory {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

/// A planet taking part in an active condition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub planet: Planet,
    pub house: Option<u8>,
    pub sign: Sign,
}

impl Participant {
    pub fn from_body(body: &CelestialBody) -> Option<Self> {
        match body.id {
            BodyId::Planet(planet) => Some(Self {
                planet,
                house: body.house,
                sign: body.lordship.sign,
            }),
            BodyId::Ascendant => None,
        }
    }
}

/// Failure while evaluating one condition at one sample.
///
/// Isolated per condition per sample: the tracker records it as a
/// diagnostic and treats the condition as inactive for that step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalError {
    pub message: String,
}

impl EvalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for EvalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "condition evaluation failed: {}", self.message)
    }
}

impl Error for EvalError {}

/// A named astrological condition evaluated against snapshots.
pub trait Condition {
    fn name(&self) -> &'static str;

    fn category(&self) -> ConditionCategory;

    fn description(&self) -> &'static str;

    /// Planets this condition is defined over. Drives the default
    /// participant list.
    fn required_planets(&self) -> &[Planet] {
        &[]
    }

    fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError>;

    /// Planets participating while active. The default collects the
    /// required planets present in the snapshot.
    fn participants(&self, snapshot: &ChartSnapshot) -> Vec<Participant> {
        self.required_planets()
            .iter()
            .filter_map(|&p| snapshot.planet(p).and_then(Participant::from_body))
            .collect()
    }

    /// Strength in [0, 1] while active.
    fn strength(&self, _snapshot: &ChartSnapshot) -> f64 {
        1.0
    }
}
