//! Condition tracking over chart snapshots.
//!
//! A pluggable registry of named boolean conditions ("yogas") is
//! evaluated against repeatedly recomputed snapshots, producing
//! time-bounded intervals with participants and a strength score.
//!
//! This crate provides:
//! - The [`Condition`] capability and a registry of implementations
//! - The interval tracker: a fold over the sampled snapshot stream with
//!   an explicit per-condition state map
//! - The built-in yoga set (positive / negative / neutral)
//! - Downstream aggregations: category counts, time-of-day grouping,
//!   significance ranking

pub mod condition;
pub mod registry;
pub mod report;
pub mod tracker;
pub mod yogas;

pub use condition::{Condition, ConditionCategory, EvalError, Participant};
pub use registry::{ConditionRegistry, standard_registry};
pub use report::{CategoryCounts, TimeBand, counts_by_category, group_by_time_band, top_by_significance};
pub use tracker::{ConditionInterval, ConditionTrack, EvalDiagnostic, track_conditions};
