//! Integration tests: transit scanning wired to aspect side events.

use kp_chart::{
    AspectConfig, BodyId, ChartConfig, ChartError, ChartSnapshot, GeoLocation, PositionProvider,
    RawBody, RawPositions, aspect_labels, snapshot_at,
};
use kp_lords::Planet;
use kp_scan::{ChangedField, TransitConfig, scan_transits_with};
use kp_time::Moment;

/// Moon approaching opposition with a parked Saturn.
struct MoonRun {
    origin: Moment,
    moon_base: f64,
    moon_deg_per_min: f64,
}

impl PositionProvider for MoonRun {
    fn positions_at(
        &self,
        moment: &Moment,
        _location: &GeoLocation,
        _config: &ChartConfig,
    ) -> Result<RawPositions, ChartError> {
        let minutes = self.origin.seconds_until(moment) / 60.0;
        let moon = (self.moon_base + minutes * self.moon_deg_per_min).rem_euclid(360.0);
        Ok(RawPositions {
            bodies: vec![
                RawBody {
                    id: BodyId::Planet(Planet::Moon),
                    longitude_deg: moon,
                    retrograde: false,
                },
                RawBody {
                    id: BodyId::Planet(Planet::Saturn),
                    longitude_deg: 200.0,
                    retrograde: false,
                },
            ],
            cusps: [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0],
        })
    }
}

fn location() -> GeoLocation {
    GeoLocation::new(28.6139, 77.209)
}

#[test]
fn aspect_side_event_reported_once_per_scan() {
    let start = Moment::utc(2024, 1, 15, 0, 0, 0.0);
    let end = start.add_minutes(120.0);
    // Moon 5 -> 17 over two hours: enters the 10-degree opposition orb
    // with Saturn (200) when it reaches 10 degrees, at minute 50.
    let provider = MoonRun {
        origin: start,
        moon_base: 5.0,
        moon_deg_per_min: 0.1,
    };
    let aspects = AspectConfig::default();

    let events = scan_transits_with(
        |m: &Moment| snapshot_at(&provider, m, &location(), &ChartConfig::default()),
        BodyId::Planet(Planet::Moon),
        &start,
        &end,
        &TransitConfig::default(),
        |_prev: &ChartSnapshot, curr: &ChartSnapshot| aspect_labels(curr, &aspects),
        || false,
    )
    .unwrap();

    // The opposition holds from minute 50 onward but is reported once
    let mentions: Vec<&String> = events.iter().flat_map(|e| e.side_events.iter()).collect();
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0], "Moon Opposition Saturn");

    let trigger = events
        .iter()
        .find(|e| !e.side_events.is_empty())
        .expect("one event carries the aspect");
    assert!(trigger.changed.contains(&ChangedField::SideEvent));
    let close_min = start.seconds_until(&trigger.end) / 60.0;
    assert!((49.0..=51.0).contains(&close_min), "aspect close at {close_min}");
}

#[test]
fn events_carry_full_snapshot_state() {
    let start = Moment::utc(2024, 1, 15, 0, 0, 0.0);
    let end = start.add_minutes(60.0);
    let provider = MoonRun {
        origin: start,
        moon_base: 5.0,
        moon_deg_per_min: 0.1,
    };
    let events = scan_transits_with(
        |m: &Moment| snapshot_at(&provider, m, &location(), &ChartConfig::default()),
        BodyId::Planet(Planet::Moon),
        &start,
        &end,
        &TransitConfig::default(),
        |_, _| Vec::new(),
        || false,
    )
    .unwrap();

    for e in &events {
        assert_eq!(e.subject, BodyId::Planet(Planet::Moon));
        // The embedded snapshot agrees with the embedded subject state
        let embedded = e.snapshot_at_start.planet(Planet::Moon).unwrap();
        assert_eq!(embedded.longitude_deg, e.state_at_start.longitude_deg);
        assert_eq!(embedded.lordship, e.state_at_start.lordship);
    }
}
