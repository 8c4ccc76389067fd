//! Fully keyed attribute mappings shared by unit tests

use geo::LineString;

use crate::attributes::AttributeMap;
use crate::geometry::{Location, SitePoint};
use crate::observation::{ObservationKind, SlipRateObservation};
use crate::parameter::UncertainValue;
use crate::schema::{self, RecordKind};

pub fn site_location() -> Location {
    Location::point(SitePoint::new(29.95, 40.72))
}

pub fn trace_location() -> Location {
    Location::line(trace_line())
}

pub fn trace_line() -> LineString<f64> {
    LineString::from(vec![(29.5, 40.70), (29.9, 40.72), (30.3, 40.74)])
}

fn envelope(preferred: f64) -> UncertainValue {
    UncertainValue::with_range("fixture", preferred, preferred * 0.5, preferred * 2.0)
        .unwrap_or_else(|_| UncertainValue::new(preferred))
}

/// Shared spatial-record keys
pub fn site_map() -> AttributeMap {
    AttributeMap::new()
        .with(schema::SCALE, 50000)
        .with_null(schema::ACCURACY)
        .with(schema::NOTES, "trench exposure")
        .with_null(schema::FAULT_SECTION)
        .with(schema::SITE_FEATURE, "offset stream")
}

/// A valid mapping for an observation of `kind`
pub fn observation_map(kind: ObservationKind) -> AttributeMap {
    let map = site_map();
    match kind {
        ObservationKind::Displacement => map
            .with(schema::TOTAL_DISPLACEMENT, envelope(4.0))
            .with(schema::CATEGORY, "A")
            .with(schema::HORIZONTAL, 3.8)
            .with(schema::VERTICAL, 1.1)
            .with_null(schema::NET),
        ObservationKind::Event => map
            .with(
                schema::RECURRENCE_INTERVAL,
                envelope(1200.0).with_completeness("B"),
            )
            .with(schema::RECURRENCE_CATEGORY, "paleoseismic")
            .with(schema::MOVEMENT, envelope(3.5))
            .with(schema::MOVEMENT_CATEGORY, "C")
            .with(schema::HISTORIC_EVENT, true)
            .with(schema::PREHISTORIC_EVENT, false)
            .with_null(schema::MARKER_AGE),
        ObservationKind::Geometry => map
            .with(schema::DIP_DIRECTION, "N")
            .with(schema::DOWNTHROWN_SIDE, "S")
            .with(schema::STRIKE, 90.0)
            .with(schema::DIP, 85.0),
        ObservationKind::SlipRate => map
            .with(schema::DIP_SLIP, envelope(0.5))
            .with(schema::STRIKE_SLIP_OBS, envelope(20.0))
            .with(schema::VERTICAL, envelope(0.4))
            .with(schema::NET_SLIP, envelope(20.0))
            .with(schema::HV_RATIO, envelope(40.0))
            .with(schema::RAKE, envelope(170.0))
            .with(schema::SLIP_CATEGORY, "A")
            .with(schema::SLIP_TYPE, UncertainValue::new("dextral"))
            .with(schema::ASEISMIC, envelope(0.1)),
    }
}

/// A valid fault-level attribute bundle mapping
pub fn fault_map() -> AttributeMap {
    let mut map = AttributeMap::new()
        .with(schema::EPISODIC, false)
        .with(schema::STRIKE, 270.0)
        .with(schema::SURFACE_DIP, 88.0)
        .with(schema::DOWNTHROWN_SIDE, "N")
        .with(schema::SLIP_CATEGORY, "A")
        .with_null(schema::DISPLACEMENT)
        .with(schema::HISTORICAL_EVENT, "1999 Izmit Mw 7.6")
        .with_null(schema::PRE_HISTORIC);
    for (key, _) in RecordKind::FaultAttributes.envelope_fields() {
        map.insert(*key, envelope(10.0));
    }
    map.insert(schema::SLIP_TYPE, UncertainValue::new("dextral"));
    map
}

/// A slip-rate observation at `site`, optionally assigned to a section
pub fn slip_observation(id: &str, section: Option<&str>) -> SlipRateObservation {
    let mut map = observation_map(ObservationKind::SlipRate);
    if let Some(section) = section {
        map.insert(schema::FAULT_SECTION, section);
    }
    SlipRateObservation::from_attributes(id, site_location(), &map)
        .unwrap_or_else(|e| panic!("fixture {} is invalid: {}", id, e))
}
