//! Temporal boundary scanning over chart snapshots.
//!
//! Two operating modes over an abstract time axis with a caller-supplied
//! sampler:
//! - Fixed-cadence attribute tracking ([`transit`]): walk snapshots
//!   forward detecting lordship/retrograde changes and side events,
//!   emitting bounded transition intervals.
//! - Adaptive target-matching search ([`target`]): locate the instant a
//!   computed angle equals a desired value, gated by an exact-match
//!   verification predicate. Used for horary ascendant timing.
//!
//! Both modes are synchronous, own all their state for the duration of
//! one call, and accept a cooperative cancellation check invoked once
//! per sample.

pub mod error;
pub mod target;
pub mod transit;

pub use error::ScanError;
pub use target::{
    TargetMatch, TargetSearchConfig, find_horary_ascendant, search_target, search_target_with,
};
pub use transit::{
    ChangedField, TrackedFields, TransitConfig, TransitionEvent, scan_transits,
    scan_transits_with,
};
