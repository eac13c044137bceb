//! Condition registry.
//!
//! Conditions are registered once at startup; the tracker iterates
//! them in registration order, which keeps re-scans deterministic.

use crate::condition::{Condition, ConditionCategory};
use crate::yogas;

/// An ordered, name-addressable set of conditions.
pub struct ConditionRegistry {
    conditions: Vec<Box<dyn Condition>>,
}

impl ConditionRegistry {
    pub fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    /// Register a condition. Later registrations with a duplicate name
    /// are rejected to preserve the one-open-interval-per-name
    /// invariant.
    pub fn register(&mut self, condition: Box<dyn Condition>) -> &mut Self {
        if self.get(condition.name()).is_none() {
            self.conditions.push(condition);
        }
        self
    }

    pub fn conditions(&self) -> &[Box<dyn Condition>] {
        &self.conditions
    }

    pub fn get(&self, name: &str) -> Option<&dyn Condition> {
        self.conditions
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.as_ref())
    }

    pub fn by_category(&self, category: ConditionCategory) -> Vec<&dyn Condition> {
        self.conditions
            .iter()
            .filter(|c| c.category() == category)
            .map(|c| c.as_ref())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in yoga set, in canonical order.
pub fn standard_registry() -> ConditionRegistry {
    let mut registry = ConditionRegistry::new();
    for condition in yogas::all_yogas() {
        registry.register(condition);
    }
    registry
}
