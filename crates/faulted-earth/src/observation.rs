//! # Site Observations
//!
//! Point records collected along a fault: displacement, events, orientation
//! and slip rate. Each shares a [`SpatialRecord`] (identity, location, map
//! scale and provenance) and adds its own attributes.
//!
//! Attribute mappings are validated once, at the boundary, into typed
//! attribute records (`SlipRateAttributes`, ...). The observation
//! constructors then only check the location kind.
//!
//! ## Table of Contents
//! 1. SiteAttributes + SpatialRecord — Shared identity / location fields
//! 2. Displacement observation
//! 3. Event observation
//! 4. Geometry observation
//! 5. Slip-rate observation
//! 6. Observation — Kind-tagged union

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeMap, AttributeValue};
use crate::error::{FaultError, Result};
use crate::geometry::{Location, SitePoint};
use crate::parameter::UncertainValue;
use crate::schema;

// ============================================================================
// 1. SiteAttributes + SpatialRecord — Shared identity / location fields
// ============================================================================

/// Validated shared attributes of a spatial record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SiteAttributes {
    /// Map scale the record was digitized at (number, text such as "unknown",
    /// or an envelope)
    pub scale: AttributeValue,
    /// Location accuracy
    pub accuracy: AttributeValue,
    /// Free-text notes
    pub notes: Option<String>,
    /// ID of the owning fault section, if assigned
    pub fault_section: Option<String>,
    /// Description of the site feature
    pub site_feature: Option<String>,
}

impl TryFrom<&AttributeMap> for SiteAttributes {
    type Error = FaultError;

    /// `Scale`, `Notes`, `Fault Section` and `Site Feature` must be keyed.
    /// A non-null `Accuracy` is kept as given; otherwise it defaults to twice
    /// a plain numeric scale.
    fn try_from(map: &AttributeMap) -> Result<Self> {
        let scale = map.value(schema::SCALE)?;
        let notes = map.label(schema::NOTES)?;
        let fault_section = map.label(schema::FAULT_SECTION)?;
        let site_feature = map.label(schema::SITE_FEATURE)?;

        let accuracy = match map.optional(schema::ACCURACY) {
            Some(given) => given.clone(),
            None => scale
                .as_f64()
                .map_or(AttributeValue::Null, |s| AttributeValue::from(2.0 * s)),
        };

        Ok(Self {
            scale,
            accuracy,
            notes,
            fault_section,
            site_feature,
        })
    }
}

/// Identity, location and map provenance shared by every observation and trace
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialRecord {
    /// Unique record ID
    pub id: String,
    /// Shared reference to the record's geometry
    pub location: Location,
    /// Map scale
    pub scale: AttributeValue,
    /// Location accuracy (explicit, or `2 × scale`)
    pub accuracy: AttributeValue,
    /// Free-text notes
    pub notes: Option<String>,
    /// Weak back-reference to the owning section, by ID
    pub fault_section: Option<String>,
    /// Description of the site feature
    pub site_feature: Option<String>,
}

impl SpatialRecord {
    /// Build a record from already validated attributes
    pub fn new(id: impl Into<String>, location: Location, site: SiteAttributes) -> Self {
        Self {
            id: id.into(),
            location,
            scale: site.scale,
            accuracy: site.accuracy,
            notes: site.notes,
            fault_section: site.fault_section,
            site_feature: site.site_feature,
        }
    }

    /// Build a record straight from an attribute mapping
    pub fn from_attributes(
        id: impl Into<String>,
        location: Location,
        map: &AttributeMap,
    ) -> Result<Self> {
        Ok(Self::new(id, location, SiteAttributes::try_from(map)?))
    }

    /// Numeric accuracy (plain, or the preferred value of an envelope), if known
    pub fn accuracy_value(&self) -> Option<f64> {
        self.accuracy.number()
    }

    /// The site point (observations are always point-located)
    pub fn site(&self) -> Option<&SitePoint> {
        self.location.as_point()
    }

    pub(crate) fn require_point(&self) -> Result<()> {
        self.location.require_point(&self.id)
    }

    pub(crate) fn require_line(&self) -> Result<()> {
        self.location.require_line(&self.id)
    }
}

// ============================================================================
// 2. Displacement observation
// ============================================================================

/// Validated displacement attributes
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementAttributes {
    pub total_displacement: UncertainValue,
    pub category: AttributeValue,
    pub horizontal: AttributeValue,
    pub vertical: AttributeValue,
    pub net: AttributeValue,
}

impl TryFrom<&AttributeMap> for DisplacementAttributes {
    type Error = FaultError;

    fn try_from(map: &AttributeMap) -> Result<Self> {
        Ok(Self {
            total_displacement: map.uncertain(schema::TOTAL_DISPLACEMENT)?,
            category: map.value(schema::CATEGORY)?,
            horizontal: map.value(schema::HORIZONTAL)?,
            vertical: map.value(schema::VERTICAL)?,
            net: map.value(schema::NET)?,
        })
    }
}

/// Displacement measured at a site
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementObservation {
    pub record: SpatialRecord,
    /// Total displacement (m)
    pub total_displacement: UncertainValue,
    pub category: AttributeValue,
    /// Horizontal component
    pub horizontal: AttributeValue,
    /// Vertical component
    pub vertical: AttributeValue,
    /// Net component
    pub net: AttributeValue,
}

impl DisplacementObservation {
    /// Attach validated attributes to a point-located record
    pub fn new(record: SpatialRecord, attrs: DisplacementAttributes) -> Result<Self> {
        record.require_point()?;
        Ok(Self {
            record,
            total_displacement: attrs.total_displacement,
            category: attrs.category,
            horizontal: attrs.horizontal,
            vertical: attrs.vertical,
            net: attrs.net,
        })
    }

    /// Build from an attribute mapping
    pub fn from_attributes(
        id: impl Into<String>,
        location: Location,
        map: &AttributeMap,
    ) -> Result<Self> {
        let id: String = id.into();
        location.require_point(&id)?;
        let record = SpatialRecord::from_attributes(id, location, map)?;
        Self::new(record, DisplacementAttributes::try_from(map)?)
    }
}

// ============================================================================
// 3. Event observation
// ============================================================================

/// Validated event / recurrence attributes
#[derive(Debug, Clone, PartialEq)]
pub struct EventAttributes {
    pub recurrence: UncertainValue,
    pub recurrence_category: AttributeValue,
    pub movement: UncertainValue,
    pub movement_category: AttributeValue,
    pub historic_event: AttributeValue,
    pub prehistoric_event: AttributeValue,
    pub marker_age: AttributeValue,
}

impl TryFrom<&AttributeMap> for EventAttributes {
    type Error = FaultError;

    fn try_from(map: &AttributeMap) -> Result<Self> {
        Ok(Self {
            recurrence: map.uncertain(schema::RECURRENCE_INTERVAL)?,
            recurrence_category: map.value(schema::RECURRENCE_CATEGORY)?,
            movement: map.uncertain(schema::MOVEMENT)?,
            movement_category: map.value(schema::MOVEMENT_CATEGORY)?,
            historic_event: map.value(schema::HISTORIC_EVENT)?,
            prehistoric_event: map.value(schema::PREHISTORIC_EVENT)?,
            marker_age: map.value(schema::MARKER_AGE)?,
        })
    }
}

/// Paleoseismic or historic event record at a site
#[derive(Debug, Clone, PartialEq)]
pub struct EventObservation {
    pub record: SpatialRecord,
    /// Recurrence interval (preferred, min, max, category)
    pub recurrence: UncertainValue,
    pub recurrence_category: AttributeValue,
    /// Movement per event (preferred, min, max, category)
    pub movement: UncertainValue,
    pub movement_category: AttributeValue,
    pub historic_event: AttributeValue,
    pub prehistoric_event: AttributeValue,
    pub marker_age: AttributeValue,
}

impl EventObservation {
    /// Attach validated attributes to a point-located record
    pub fn new(record: SpatialRecord, attrs: EventAttributes) -> Result<Self> {
        record.require_point()?;
        Ok(Self {
            record,
            recurrence: attrs.recurrence,
            recurrence_category: attrs.recurrence_category,
            movement: attrs.movement,
            movement_category: attrs.movement_category,
            historic_event: attrs.historic_event,
            prehistoric_event: attrs.prehistoric_event,
            marker_age: attrs.marker_age,
        })
    }

    /// Build from an attribute mapping
    pub fn from_attributes(
        id: impl Into<String>,
        location: Location,
        map: &AttributeMap,
    ) -> Result<Self> {
        let id: String = id.into();
        location.require_point(&id)?;
        let record = SpatialRecord::from_attributes(id, location, map)?;
        Self::new(record, EventAttributes::try_from(map)?)
    }
}

// ============================================================================
// 4. Geometry observation
// ============================================================================

/// Validated orientation attributes; any of them may carry an envelope
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryAttributes {
    pub dip_direction: AttributeValue,
    pub downthrown_side: AttributeValue,
    pub strike: AttributeValue,
    pub dip: AttributeValue,
}

impl TryFrom<&AttributeMap> for GeometryAttributes {
    type Error = FaultError;

    fn try_from(map: &AttributeMap) -> Result<Self> {
        Ok(Self {
            dip_direction: map.value(schema::DIP_DIRECTION)?,
            downthrown_side: map.value(schema::DOWNTHROWN_SIDE)?,
            strike: map.value(schema::STRIKE)?,
            dip: map.value(schema::DIP)?,
        })
    }
}

/// Fault orientation measured at a site
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryObservation {
    pub record: SpatialRecord,
    pub dip_direction: AttributeValue,
    pub downthrown_side: AttributeValue,
    pub strike: AttributeValue,
    pub dip: AttributeValue,
}

impl GeometryObservation {
    /// Attach validated attributes to a point-located record
    pub fn new(record: SpatialRecord, attrs: GeometryAttributes) -> Result<Self> {
        record.require_point()?;
        Ok(Self {
            record,
            dip_direction: attrs.dip_direction,
            downthrown_side: attrs.downthrown_side,
            strike: attrs.strike,
            dip: attrs.dip,
        })
    }

    /// Build from an attribute mapping
    pub fn from_attributes(
        id: impl Into<String>,
        location: Location,
        map: &AttributeMap,
    ) -> Result<Self> {
        let id: String = id.into();
        location.require_point(&id)?;
        let record = SpatialRecord::from_attributes(id, location, map)?;
        Self::new(record, GeometryAttributes::try_from(map)?)
    }
}

// ============================================================================
// 5. Slip-rate observation
// ============================================================================

/// Validated slip-rate attributes
#[derive(Debug, Clone, PartialEq)]
pub struct SlipRateAttributes {
    pub dip_slip: UncertainValue,
    pub strike_slip: UncertainValue,
    pub vertical_slip: UncertainValue,
    pub net_slip: UncertainValue,
    pub hv_ratio: UncertainValue,
    pub rake: UncertainValue,
    pub slip_category: AttributeValue,
    pub slip_type: UncertainValue,
    pub aseismic: UncertainValue,
}

impl TryFrom<&AttributeMap> for SlipRateAttributes {
    type Error = FaultError;

    fn try_from(map: &AttributeMap) -> Result<Self> {
        Ok(Self {
            dip_slip: map.uncertain(schema::DIP_SLIP)?,
            strike_slip: map.uncertain(schema::STRIKE_SLIP_OBS)?,
            vertical_slip: map.uncertain(schema::VERTICAL)?,
            net_slip: map.uncertain(schema::NET_SLIP)?,
            hv_ratio: map.uncertain(schema::HV_RATIO)?,
            rake: map.uncertain(schema::RAKE)?,
            slip_category: map.value(schema::SLIP_CATEGORY)?,
            slip_type: map.uncertain(schema::SLIP_TYPE)?,
            aseismic: map.uncertain(schema::ASEISMIC)?,
        })
    }
}

/// Slip rate measured at a site (mm/yr)
#[derive(Debug, Clone, PartialEq)]
pub struct SlipRateObservation {
    pub record: SpatialRecord,
    pub dip_slip: UncertainValue,
    pub strike_slip: UncertainValue,
    pub vertical_slip: UncertainValue,
    pub net_slip: UncertainValue,
    /// Horizontal / vertical ratio
    pub hv_ratio: UncertainValue,
    pub rake: UncertainValue,
    pub slip_category: AttributeValue,
    pub slip_type: UncertainValue,
    /// Fraction of slip released aseismically
    pub aseismic: UncertainValue,
}

impl SlipRateObservation {
    /// Attach validated attributes to a point-located record
    pub fn new(record: SpatialRecord, attrs: SlipRateAttributes) -> Result<Self> {
        record.require_point()?;
        Ok(Self {
            record,
            dip_slip: attrs.dip_slip,
            strike_slip: attrs.strike_slip,
            vertical_slip: attrs.vertical_slip,
            net_slip: attrs.net_slip,
            hv_ratio: attrs.hv_ratio,
            rake: attrs.rake,
            slip_category: attrs.slip_category,
            slip_type: attrs.slip_type,
            aseismic: attrs.aseismic,
        })
    }

    /// Build from an attribute mapping
    pub fn from_attributes(
        id: impl Into<String>,
        location: Location,
        map: &AttributeMap,
    ) -> Result<Self> {
        let id: String = id.into();
        location.require_point(&id)?;
        let record = SpatialRecord::from_attributes(id, location, map)?;
        Self::new(record, SlipRateAttributes::try_from(map)?)
    }
}

// ============================================================================
// 6. Observation — Kind-tagged union
// ============================================================================

/// Kind tag of a site observation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationKind {
    Displacement,
    Event,
    Geometry,
    SlipRate,
}

/// Any site observation
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    Displacement(DisplacementObservation),
    Event(EventObservation),
    Geometry(GeometryObservation),
    SlipRate(SlipRateObservation),
}

impl Observation {
    /// Build an observation of `kind` from an attribute mapping
    pub fn from_attributes(
        kind: ObservationKind,
        id: impl Into<String>,
        location: Location,
        map: &AttributeMap,
    ) -> Result<Self> {
        Ok(match kind {
            ObservationKind::Displacement => Observation::Displacement(
                DisplacementObservation::from_attributes(id, location, map)?,
            ),
            ObservationKind::Event => {
                Observation::Event(EventObservation::from_attributes(id, location, map)?)
            }
            ObservationKind::Geometry => {
                Observation::Geometry(GeometryObservation::from_attributes(id, location, map)?)
            }
            ObservationKind::SlipRate => {
                Observation::SlipRate(SlipRateObservation::from_attributes(id, location, map)?)
            }
        })
    }

    /// Kind tag
    pub fn kind(&self) -> ObservationKind {
        match self {
            Observation::Displacement(_) => ObservationKind::Displacement,
            Observation::Event(_) => ObservationKind::Event,
            Observation::Geometry(_) => ObservationKind::Geometry,
            Observation::SlipRate(_) => ObservationKind::SlipRate,
        }
    }

    /// Shared spatial record
    pub fn record(&self) -> &SpatialRecord {
        match self {
            Observation::Displacement(o) => &o.record,
            Observation::Event(o) => &o.record,
            Observation::Geometry(o) => &o.record,
            Observation::SlipRate(o) => &o.record,
        }
    }

    /// Record ID
    pub fn id(&self) -> &str {
        &self.record().id
    }
}

impl ObservationKind {
    /// Schema kind used to normalize this observation's attribute mapping
    pub fn record_kind(self) -> schema::RecordKind {
        match self {
            ObservationKind::Displacement => schema::RecordKind::Displacement,
            ObservationKind::Event => schema::RecordKind::Event,
            ObservationKind::Geometry => schema::RecordKind::Geometry,
            ObservationKind::SlipRate => schema::RecordKind::SlipRate,
        }
    }

    /// All observation kinds
    pub const ALL: [ObservationKind; 4] = [
        ObservationKind::Displacement,
        ObservationKind::Event,
        ObservationKind::Geometry,
        ObservationKind::SlipRate,
    ];
}
