//! Chart snapshot assembly for the KP temporal engine.
//!
//! This crate turns raw ephemeris output (longitudes, retrograde flags,
//! house cusps) into immutable [`ChartSnapshot`] values carrying the
//! full lordship hierarchy per body, and provides chart-level analysis
//! shared by the scanners: aspect detection and KP significator tables.
//!
//! Raw positions come from a caller-supplied [`PositionProvider`]; this
//! crate performs no ephemeris math of its own.

pub mod aspect;
pub mod config;
pub mod error;
pub mod provider;
pub mod significators;
pub mod snapshot;

pub use aspect::{
    ALL_ASPECTS, AspectConfig, AspectHit, AspectKind, aspect_labels, detect_aspects,
    planets_in_aspect,
};
pub use config::{Ayanamsa, ChartConfig, GeoLocation, HouseSystem};
pub use error::ChartError;
pub use provider::{BodyId, PositionProvider, RawBody, RawPositions, snapshot_at};
pub use significators::{
    HouseSignificators, PlanetSignificators, house_significators, planet_significators,
};
pub use snapshot::{CelestialBody, ChartSnapshot};
