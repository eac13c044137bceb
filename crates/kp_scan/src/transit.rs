//! Fixed-cadence transit scanning (Mode A).
//!
//! Samples the chart at a regular cadence and emits one interval per
//! run of unchanged tracked state for the subject body. An interval
//! closes retroactively at the last sample where its state was
//! observed; the sample that detects the change opens the next one.
//! The final interval is closed at the scan end unconditionally and is
//! the only one allowed an empty change set.
//!
//! Durable side conditions (aspects holding across many samples) are
//! reported once, at first detection: a set of already-reported labels
//! is retained for the whole scan.

use std::collections::HashSet;

use kp_chart::{BodyId, CelestialBody, ChartError, ChartSnapshot};
use kp_time::Moment;

use crate::error::ScanError;

/// Which attributes of the subject to compare between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackedFields {
    pub sign: bool,
    pub mansion: bool,
    pub sign_lord: bool,
    pub mansion_lord: bool,
    pub sub_lord: bool,
    pub sub_sub_lord: bool,
    pub retrograde: bool,
}

impl Default for TrackedFields {
    /// Track everything.
    fn default() -> Self {
        Self {
            sign: true,
            mansion: true,
            sign_lord: true,
            mansion_lord: true,
            sub_lord: true,
            sub_sub_lord: true,
            retrograde: true,
        }
    }
}

impl TrackedFields {
    pub fn any(&self) -> bool {
        self.sign
            || self.mansion
            || self.sign_lord
            || self.mansion_lord
            || self.sub_lord
            || self.sub_sub_lord
            || self.retrograde
    }
}

/// One attribute that differed between consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChangedField {
    Sign,
    Mansion,
    SignLord,
    MansionLord,
    SubLord,
    SubSubLord,
    Retrograde,
    /// A side event (e.g. a newly detected aspect) triggered the close.
    SideEvent,
}

/// Scan parameters for Mode A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitConfig {
    /// Sampling cadence in minutes.
    pub cadence_minutes: f64,
    pub tracked: TrackedFields,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            cadence_minutes: 1.0,
            tracked: TrackedFields::default(),
        }
    }
}

impl TransitConfig {
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.cadence_minutes > 0.0) {
            return Err("cadence must be positive");
        }
        if !self.tracked.any() {
            return Err("at least one tracked field is required");
        }
        Ok(())
    }
}

/// One emitted transition interval.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionEvent {
    pub start: Moment,
    pub end: Moment,
    pub subject: BodyId,
    /// Attributes that changed at `end`. Empty only for the final
    /// interval closed at the scan end.
    pub changed: Vec<ChangedField>,
    /// Side-event labels newly detected when this interval closed.
    pub side_events: Vec<String>,
    /// The subject's state throughout the interval.
    pub state_at_start: CelestialBody,
    /// The full chart at the interval start.
    pub snapshot_at_start: ChartSnapshot,
}

fn diff_fields(
    tracked: &TrackedFields,
    prev: &CelestialBody,
    curr: &CelestialBody,
) -> Vec<ChangedField> {
    let mut changed = Vec::new();
    let (a, b) = (&prev.lordship, &curr.lordship);
    if tracked.sign && a.sign != b.sign {
        changed.push(ChangedField::Sign);
    }
    if tracked.mansion && a.mansion != b.mansion {
        changed.push(ChangedField::Mansion);
    }
    if tracked.sign_lord && a.sign_lord != b.sign_lord {
        changed.push(ChangedField::SignLord);
    }
    if tracked.mansion_lord && a.mansion_lord != b.mansion_lord {
        changed.push(ChangedField::MansionLord);
    }
    if tracked.sub_lord && a.sub_lord != b.sub_lord {
        changed.push(ChangedField::SubLord);
    }
    if tracked.sub_sub_lord && a.sub_sub_lord != b.sub_sub_lord {
        changed.push(ChangedField::SubSubLord);
    }
    if tracked.retrograde && prev.retrograde != curr.retrograde {
        changed.push(ChangedField::Retrograde);
    }
    changed
}

fn subject_state(
    snapshot: &ChartSnapshot,
    subject: BodyId,
) -> Result<CelestialBody, ChartError> {
    snapshot
        .body(subject)
        .copied()
        .ok_or(ChartError::MissingBody(subject))
}

/// Scan with no side events and no cancellation.
pub fn scan_transits<S>(
    sampler: S,
    subject: BodyId,
    start: &Moment,
    end: &Moment,
    config: &TransitConfig,
) -> Result<Vec<TransitionEvent>, ScanError>
where
    S: FnMut(&Moment) -> Result<ChartSnapshot, ChartError>,
{
    scan_transits_with(sampler, subject, start, end, config, |_, _| Vec::new(), || false)
}

/// Full Mode A scan.
///
/// `side_events` is invoked with the previous and current snapshot and
/// returns labels of discrete conditions currently present; labels seen
/// earlier in the scan are ignored. `cancel` is checked once per
/// sample; on cancellation the open interval is closed at the last
/// completed sample and the partial result returned.
pub fn scan_transits_with<S, E, C>(
    mut sampler: S,
    subject: BodyId,
    start: &Moment,
    end: &Moment,
    config: &TransitConfig,
    mut side_events: E,
    cancel: C,
) -> Result<Vec<TransitionEvent>, ScanError>
where
    S: FnMut(&Moment) -> Result<ChartSnapshot, ChartError>,
    E: FnMut(&ChartSnapshot, &ChartSnapshot) -> Vec<String>,
    C: Fn() -> bool,
{
    config.validate().map_err(ScanError::InvalidConfig)?;
    start.validate()?;
    end.validate()?;
    if end.to_jd_utc() <= start.to_jd_utc() {
        return Err(ScanError::InvalidConfig("end must be after start"));
    }

    let mut events = Vec::new();
    let mut recorded: HashSet<String> = HashSet::new();

    let first = sampler(start)?;
    let mut prev_state = subject_state(&first, subject)?;
    let mut open_start = *start;
    let mut open_state = prev_state;
    let mut open_snapshot = first.clone();
    let mut prev_snapshot = first;
    let mut prev_moment = *start;

    let end_jd = end.to_jd_utc();
    let mut step = 1u64;

    loop {
        let current = start.add_minutes(step as f64 * config.cadence_minutes);
        // Sample strictly inside the window; the end itself only closes.
        if current.to_jd_utc() > end_jd + 1e-9 {
            break;
        }
        if cancel() {
            // Close at the last completed sample; a run with no
            // observed span yet is dropped rather than emitted empty.
            if prev_moment.to_jd_utc() > open_start.to_jd_utc() {
                events.push(close_interval(
                    open_start,
                    prev_moment,
                    subject,
                    Vec::new(),
                    Vec::new(),
                    open_state,
                    open_snapshot,
                ));
            }
            return Ok(events);
        }

        let snapshot = sampler(&current)?;
        let state = subject_state(&snapshot, subject)?;

        let mut changed = diff_fields(&config.tracked, &prev_state, &state);

        let new_labels: Vec<String> = side_events(&prev_snapshot, &snapshot)
            .into_iter()
            .filter(|l| recorded.insert(l.clone()))
            .collect();
        if !new_labels.is_empty() {
            changed.push(ChangedField::SideEvent);
        }

        if !changed.is_empty() {
            // Close retroactively at the last sample of the old state;
            // a run observed at a single sample closes at detection
            // instead so the interval keeps positive width.
            let close_at = if prev_moment.to_jd_utc() > open_start.to_jd_utc() {
                prev_moment
            } else {
                current
            };
            events.push(close_interval(
                open_start,
                close_at,
                subject,
                changed,
                new_labels,
                open_state,
                open_snapshot,
            ));
            open_start = current;
            open_state = state;
            open_snapshot = snapshot.clone();
        }

        prev_state = state;
        prev_snapshot = snapshot;
        prev_moment = current;
        step += 1;
    }

    // Final half-open interval, closed at the scan end unconditionally.
    if open_start.to_jd_utc() < end_jd {
        events.push(close_interval(
            open_start,
            *end,
            subject,
            Vec::new(),
            Vec::new(),
            open_state,
            open_snapshot,
        ));
    }

    Ok(events)
}

fn close_interval(
    start: Moment,
    end: Moment,
    subject: BodyId,
    changed: Vec<ChangedField>,
    side_events: Vec<String>,
    state_at_start: CelestialBody,
    snapshot_at_start: ChartSnapshot,
) -> TransitionEvent {
    TransitionEvent {
        start,
        end,
        subject,
        changed,
        side_events,
        state_at_start,
        snapshot_at_start,
    }
}
