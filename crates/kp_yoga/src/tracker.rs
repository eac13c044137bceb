//! The condition interval tracker.
//!
//! Walks snapshots at a fixed cadence and folds each sample through an
//! explicit per-condition state map: `Inactive -> Active` opens an
//! interval capturing participants and strength at that instant;
//! `Active -> Inactive` closes it retroactively at the moment the
//! predicate was last observed true. Re-activation always opens a
//! brand-new interval; adjacent intervals of the same name are never
//! merged. At the scan end (or on cancellation, at the last completed
//! sample) still-active intervals are closed unconditionally.
//!
//! At most one open interval exists per condition name at any time.
//!
//! A predicate error never aborts the scan: the condition reads as
//! inactive for that step and the error is surfaced as a diagnostic
//! keyed by name and moment.

use std::collections::HashMap;

use kp_chart::{ChartError, ChartSnapshot};
use kp_scan::ScanError;
use kp_time::Moment;

use crate::condition::{ConditionCategory, Participant};
use crate::registry::ConditionRegistry;

/// One bounded activation of a condition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionInterval {
    pub name: String,
    pub category: ConditionCategory,
    pub start: Moment,
    /// None only while the interval is open inside a running scan; the
    /// returned list is fully closed.
    pub end: Option<Moment>,
    pub participants: Vec<Participant>,
    /// Strength in [0, 1] captured at activation.
    pub strength: f64,
}

impl ConditionInterval {
    /// Duration in hours, None while open.
    pub fn duration_hours(&self) -> Option<f64> {
        self.end.map(|end| self.start.seconds_until(&end) / 3600.0)
    }
}

/// Non-fatal predicate failure, keyed by condition and moment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalDiagnostic {
    pub condition: String,
    pub moment: Moment,
    pub message: String,
}

/// Finished tracking result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionTrack {
    /// Closed intervals in close order.
    pub intervals: Vec<ConditionInterval>,
    pub diagnostics: Vec<EvalDiagnostic>,
}

struct OpenState {
    interval: ConditionInterval,
    last_true: Moment,
}

fn close(mut state: OpenState, end: Moment) -> ConditionInterval {
    state.interval.end = Some(end);
    state.interval
}

/// Track every registered condition across a time window.
///
/// `cancel` is checked once per sample; on cancellation all open
/// intervals are closed at the last completed sample and the partial
/// result is returned rather than discarded.
pub fn track_conditions<S, C>(
    registry: &ConditionRegistry,
    mut sampler: S,
    start: &Moment,
    end: &Moment,
    cadence_minutes: f64,
    cancel: C,
) -> Result<ConditionTrack, ScanError>
where
    S: FnMut(&Moment) -> Result<ChartSnapshot, ChartError>,
    C: Fn() -> bool,
{
    if !(cadence_minutes > 0.0) {
        return Err(ScanError::InvalidConfig("cadence must be positive"));
    }
    start.validate()?;
    end.validate()?;
    let end_jd = end.to_jd_utc();
    if end_jd <= start.to_jd_utc() {
        return Err(ScanError::InvalidConfig("end must be after start"));
    }

    let mut open: HashMap<usize, OpenState> = HashMap::new();
    let mut intervals = Vec::new();
    let mut diagnostics = Vec::new();
    let mut last_completed = *start;

    let mut step = 0u64;
    loop {
        let current = if step == 0 {
            *start
        } else {
            start.add_minutes(step as f64 * cadence_minutes)
        };
        if current.to_jd_utc() > end_jd + 1e-9 {
            break;
        }
        if cancel() {
            return Ok(finalize(open, intervals, diagnostics, last_completed));
        }

        let snapshot = sampler(&current)?;
        apply_sample(
            registry,
            &snapshot,
            current,
            &mut open,
            &mut intervals,
            &mut diagnostics,
        );

        last_completed = current;
        step += 1;
    }

    Ok(finalize(open, intervals, diagnostics, *end))
}

/// Fold one snapshot through the state map.
fn apply_sample(
    registry: &ConditionRegistry,
    snapshot: &ChartSnapshot,
    moment: Moment,
    open: &mut HashMap<usize, OpenState>,
    intervals: &mut Vec<ConditionInterval>,
    diagnostics: &mut Vec<EvalDiagnostic>,
) {
    for (idx, condition) in registry.conditions().iter().enumerate() {
        let active = match condition.is_active(snapshot) {
            Ok(active) => active,
            Err(e) => {
                tracing::warn!(
                    condition = condition.name(),
                    moment = %moment,
                    error = %e,
                    "predicate evaluation failed; treated as inactive"
                );
                diagnostics.push(EvalDiagnostic {
                    condition: condition.name().to_string(),
                    moment,
                    message: e.message,
                });
                false
            }
        };

        match (open.remove(&idx), active) {
            (None, true) => {
                open.insert(
                    idx,
                    OpenState {
                        interval: ConditionInterval {
                            name: condition.name().to_string(),
                            category: condition.category(),
                            start: moment,
                            end: None,
                            participants: condition.participants(snapshot),
                            strength: condition.strength(snapshot).clamp(0.0, 1.0),
                        },
                        last_true: moment,
                    },
                );
            }
            (Some(mut state), true) => {
                state.last_true = moment;
                open.insert(idx, state);
            }
            (Some(state), false) => {
                // Retroactive close at the last observed-true sample; a
                // single-sample activation closes at the failing sample
                // so the interval keeps positive width.
                let close_at = if state.last_true.to_jd_utc() > state.interval.start.to_jd_utc() {
                    state.last_true
                } else {
                    moment
                };
                intervals.push(close(state, close_at));
            }
            (None, false) => {}
        }
    }
}

fn finalize(
    open: HashMap<usize, OpenState>,
    mut intervals: Vec<ConditionInterval>,
    diagnostics: Vec<EvalDiagnostic>,
    end: Moment,
) -> ConditionTrack {
    // Close remaining opens in registration order for determinism.
    let mut remaining: Vec<(usize, OpenState)> = open.into_iter().collect();
    remaining.sort_by_key(|(idx, _)| *idx);
    for (_, state) in remaining {
        intervals.push(close(state, end));
    }
    ConditionTrack {
        intervals,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, EvalError};
    use kp_chart::{BodyId, ChartConfig, RawBody, RawPositions};
    use kp_lords::Planet;

    /// Active while the Moon sits inside [lo, hi) degrees.
    struct MoonInRange {
        name: &'static str,
        lo: f64,
        hi: f64,
    }

    impl Condition for MoonInRange {
        fn name(&self) -> &'static str {
            self.name
        }
        fn category(&self) -> ConditionCategory {
            ConditionCategory::Neutral
        }
        fn description(&self) -> &'static str {
            "Moon inside a longitude range."
        }
        fn required_planets(&self) -> &[Planet] {
            &[Planet::Moon]
        }
        fn is_active(&self, snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
            let moon = snapshot.planet(Planet::Moon).ok_or(EvalError::new("no Moon"))?;
            Ok(moon.longitude_deg >= self.lo && moon.longitude_deg < self.hi)
        }
    }

    /// Fails at every evaluation.
    struct Broken;

    impl Condition for Broken {
        fn name(&self) -> &'static str {
            "Broken"
        }
        fn category(&self) -> ConditionCategory {
            ConditionCategory::Negative
        }
        fn description(&self) -> &'static str {
            "Always errors."
        }
        fn is_active(&self, _snapshot: &ChartSnapshot) -> Result<bool, EvalError> {
            Err(EvalError::new("deliberate failure"))
        }
    }

    fn moon_sampler(
        start: Moment,
        base_deg: f64,
        deg_per_minute: f64,
    ) -> impl FnMut(&Moment) -> Result<ChartSnapshot, ChartError> {
        move |moment: &Moment| {
            let minutes = start.seconds_until(moment) / 60.0;
            let raw = RawPositions {
                bodies: vec![RawBody {
                    id: BodyId::Planet(Planet::Moon),
                    longitude_deg: (base_deg + minutes * deg_per_minute).rem_euclid(360.0),
                    retrograde: false,
                }],
                cusps: [
                    0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0,
                ],
            };
            Ok(ChartSnapshot::assemble(raw, *moment, ChartConfig::default()))
        }
    }

    fn range_registry(lo: f64, hi: f64) -> ConditionRegistry {
        let mut r = ConditionRegistry::new();
        r.register(Box::new(MoonInRange {
            name: "Moon In Range",
            lo,
            hi,
        }));
        r
    }

    fn window() -> (Moment, Moment) {
        let start = Moment::utc(2024, 1, 15, 0, 0, 0.0);
        (start, start.add_minutes(60.0))
    }

    #[test]
    fn rejects_bad_cadence() {
        let (start, end) = window();
        let r = track_conditions(
            &range_registry(0.0, 10.0),
            moon_sampler(start, 0.0, 1.0),
            &start,
            &end,
            0.0,
            || false,
        );
        assert!(matches!(r, Err(ScanError::InvalidConfig(_))));
    }

    #[test]
    fn bounded_activation() {
        // Moon 0 -> 60 over the hour; active while in [9.5, 19.5):
        // samples at minutes 10..19 observe it true.
        let (start, end) = window();
        let track = track_conditions(
            &range_registry(9.5, 19.5),
            moon_sampler(start, 0.0, 1.0),
            &start,
            &end,
            1.0,
            || false,
        )
        .unwrap();
        assert_eq!(track.intervals.len(), 1);
        let iv = &track.intervals[0];
        assert_eq!(iv.name, "Moon In Range");
        let open_min = start.seconds_until(&iv.start) / 60.0;
        let close_min = start.seconds_until(&iv.end.unwrap()) / 60.0;
        assert!((open_min - 10.0).abs() < 1e-5);
        // Retroactive close: last observed-true sample, not the one
        // that saw it inactive.
        assert!((close_min - 19.0).abs() < 1e-5);
    }

    #[test]
    fn still_active_closed_at_end() {
        let (start, end) = window();
        let track = track_conditions(
            &range_registry(0.0, 360.0),
            moon_sampler(start, 5.0, 0.0),
            &start,
            &end,
            1.0,
            || false,
        )
        .unwrap();
        assert_eq!(track.intervals.len(), 1);
        assert_eq!(track.intervals[0].end, Some(end));
        assert_eq!(track.intervals[0].start, start);
    }

    #[test]
    fn no_open_intervals_in_result() {
        let (start, end) = window();
        let track = track_conditions(
            &range_registry(0.0, 360.0),
            moon_sampler(start, 5.0, 0.0),
            &start,
            &end,
            1.0,
            || false,
        )
        .unwrap();
        assert!(track.intervals.iter().all(|iv| iv.end.is_some()));
    }

    #[test]
    fn reactivation_creates_new_interval() {
        // Active in [10, 20) each 60-degree lap; Moon makes two laps.
        let (start, _) = window();
        let end = start.add_minutes(120.0);
        let mut registry = ConditionRegistry::new();
        registry.register(Box::new(MoonInRange {
            name: "Lap Window",
            lo: 10.0,
            hi: 20.0,
        }));
        // 6 deg/min: one full circle per hour, the range is hit once
        // per lap (samples at minutes 2-3 and 62-63).
        let track = track_conditions(
            &registry,
            moon_sampler(start, 0.0, 6.0),
            &start,
            &end,
            1.0,
            || false,
        )
        .unwrap();
        assert_eq!(track.intervals.len(), 2);
        assert_eq!(track.intervals[0].name, track.intervals[1].name);
        // Never merged even though same name
        let first_end = track.intervals[0].end.unwrap();
        assert!(first_end.to_jd_utc() < track.intervals[1].start.to_jd_utc());
    }

    #[test]
    fn intervals_never_overlap_per_name() {
        let (start, _) = window();
        let end = start.add_minutes(180.0);
        let track = track_conditions(
            &range_registry(100.0, 160.0),
            moon_sampler(start, 0.0, 2.0),
            &start,
            &end,
            1.0,
            || false,
        )
        .unwrap();
        let mut sorted = track.intervals.clone();
        sorted.sort_by(|a, b| a.start.to_jd_utc().total_cmp(&b.start.to_jd_utc()));
        for pair in sorted.windows(2) {
            assert!(
                pair[0].end.unwrap().to_jd_utc() < pair[1].start.to_jd_utc(),
                "overlapping intervals"
            );
        }
    }

    #[test]
    fn rescan_is_idempotent() {
        let (start, end) = window();
        let run = || {
            track_conditions(
                &range_registry(10.0, 20.0),
                moon_sampler(start, 0.0, 1.0),
                &start,
                &end,
                1.0,
                || false,
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn predicate_errors_are_isolated() {
        let (start, end) = window();
        let mut registry = ConditionRegistry::new();
        registry.register(Box::new(Broken));
        registry.register(Box::new(MoonInRange {
            name: "Moon In Range",
            lo: 0.0,
            hi: 360.0,
        }));
        let track = track_conditions(
            &registry,
            moon_sampler(start, 5.0, 0.0),
            &start,
            &end,
            10.0,
            || false,
        )
        .unwrap();
        // The healthy condition still tracked
        assert_eq!(track.intervals.len(), 1);
        assert_eq!(track.intervals[0].name, "Moon In Range");
        // One diagnostic per sample for the broken one
        assert_eq!(track.diagnostics.len(), 7);
        assert!(track.diagnostics.iter().all(|d| d.condition == "Broken"));
        assert_eq!(track.diagnostics[0].message, "deliberate failure");
    }

    #[test]
    fn cancellation_closes_at_last_sample() {
        use std::cell::Cell;
        let (start, _) = window();
        let end = start.add_minutes(600.0);
        let samples = Cell::new(0u32);
        let track = track_conditions(
            &range_registry(0.0, 360.0),
            moon_sampler(start, 5.0, 0.0),
            &start,
            &end,
            1.0,
            || {
                samples.set(samples.get() + 1);
                samples.get() > 10
            },
        )
        .unwrap();
        assert_eq!(track.intervals.len(), 1);
        let closed_at = track.intervals[0].end.unwrap();
        assert!(closed_at.to_jd_utc() < end.to_jd_utc());
        // Closed at the last completed sample (minute 9)
        let minutes = start.seconds_until(&closed_at) / 60.0;
        assert!((minutes - 9.0).abs() < 1e-5, "closed at {minutes}");
    }

    #[test]
    fn interval_duration_hours() {
        let start = Moment::utc(2024, 1, 15, 6, 0, 0.0);
        let iv = ConditionInterval {
            name: "X".to_string(),
            category: ConditionCategory::Positive,
            start,
            end: Some(start.add_minutes(90.0)),
            participants: Vec::new(),
            strength: 1.0,
        };
        assert!((iv.duration_hours().unwrap() - 1.5).abs() < 1e-9);
    }
}
