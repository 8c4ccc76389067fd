//! # Fault-Level Attribute Bundle
//!
//! The attributes shared by neotectonic sections and whole faults: depths,
//! dip, slip components, rake, recurrence and movement (all uncertain), a
//! few plain descriptors, and curator provenance.
//!
//! A bundle is built standalone from one attribute mapping and then attached
//! to its section or fault. Every field derives from that mapping alone.
//!
//! ## Table of Contents
//! 1. Provenance — Curator metadata
//! 2. DisplacementSummary — Fault-level displacement record
//! 3. FaultAttributes — The bundle

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeMap, AttributeValue};
use crate::error::{FaultError, Result};
use crate::geometry::FaultGeometry;
use crate::parameter::UncertainValue;
use crate::schema;

// ============================================================================
// 1. Provenance — Curator metadata
// ============================================================================

/// Who compiled the record and when; empty until a curator fills it in
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Provenance {
    pub compiler: Option<String>,
    pub contributor: Option<String>,
    pub created: Option<NaiveDate>,
    pub comment: Option<String>,
}

// ============================================================================
// 2. DisplacementSummary — Fault-level displacement record
// ============================================================================

/// Displacement gathered for a section or fault as a whole
#[derive(Debug, Clone, PartialEq)]
pub struct DisplacementSummary {
    pub total: AttributeValue,
    pub category: AttributeValue,
    pub horizontal: AttributeValue,
    pub vertical: AttributeValue,
    pub net: AttributeValue,
    pub value: UncertainValue,
}

impl TryFrom<&AttributeMap> for DisplacementSummary {
    type Error = FaultError;

    fn try_from(map: &AttributeMap) -> Result<Self> {
        Ok(Self {
            total: map.value(schema::TOTAL)?,
            category: map.value(schema::CATEGORY)?,
            horizontal: map.value(schema::HORIZONTAL)?,
            vertical: map.value(schema::VERTICAL)?,
            net: map.value(schema::NET)?,
            value: map.uncertain(schema::VALUE)?,
        })
    }
}

// ============================================================================
// 3. FaultAttributes — The bundle
// ============================================================================

/// Fault-level attributes shared by sections and faults
#[derive(Debug, Clone, PartialEq)]
pub struct FaultAttributes {
    pub id: String,
    pub name: String,
    /// Trace or area geometry, attached after construction
    pub geometry: Option<FaultGeometry>,
    /// Length in km, computed outside this crate
    pub length: Option<f64>,

    pub is_episodic: AttributeValue,
    pub strike: AttributeValue,
    pub surface_dip: AttributeValue,
    pub downthrown_side: AttributeValue,

    pub upper_seismogenic_depth: UncertainValue,
    pub lower_seismogenic_depth: UncertainValue,
    pub dip: UncertainValue,
    pub dip_direction: UncertainValue,
    pub dip_slip: UncertainValue,
    pub strike_slip: UncertainValue,
    pub vertical_slip: UncertainValue,
    /// Horizontal / vertical aspect ratio
    pub aspect: UncertainValue,
    pub net_slip: UncertainValue,
    pub rake: UncertainValue,
    pub slip_type: UncertainValue,
    pub aseismic: UncertainValue,
    pub slip_category: AttributeValue,

    pub displacement: AttributeValue,
    pub displacement_summary: Option<DisplacementSummary>,

    /// Recurrence interval (preferred, min, max, category)
    pub recurrence: UncertainValue,
    /// Movement per event (preferred, min, max, category)
    pub movement: UncertainValue,
    pub historic: AttributeValue,
    pub prehistoric: AttributeValue,

    provenance: Provenance,
}

impl FaultAttributes {
    /// Build a bundle from a fully keyed attribute mapping.
    ///
    /// Envelope-required fields that hold plain values fail with
    /// [`FaultError::TypeConstraint`]; absent keys with
    /// [`FaultError::MissingField`].
    pub fn from_attributes(
        id: impl Into<String>,
        name: impl Into<String>,
        map: &AttributeMap,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            name: name.into(),
            geometry: None,
            length: None,
            is_episodic: map.value(schema::EPISODIC)?,
            strike: map.value(schema::STRIKE)?,
            surface_dip: map.value(schema::SURFACE_DIP)?,
            downthrown_side: map.value(schema::DOWNTHROWN_SIDE)?,
            upper_seismogenic_depth: map.uncertain(schema::UPPER_DEPTH)?,
            lower_seismogenic_depth: map.uncertain(schema::LOWER_DEPTH)?,
            dip: map.uncertain(schema::DIP)?,
            dip_direction: map.uncertain(schema::DIP_DIRECTION)?,
            dip_slip: map.uncertain(schema::DIP_SLIP)?,
            strike_slip: map.uncertain(schema::STRIKE_SLIP)?,
            vertical_slip: map.uncertain(schema::VERTICAL_SLIP)?,
            aspect: map.uncertain(schema::HV_RATIO)?,
            net_slip: map.uncertain(schema::NET_SLIP)?,
            slip_category: map.value(schema::SLIP_CATEGORY)?,
            rake: map.uncertain(schema::RAKE)?,
            slip_type: map.uncertain(schema::SLIP_TYPE)?,
            aseismic: map.uncertain(schema::ASEISMIC)?,
            displacement: map.value(schema::DISPLACEMENT)?,
            displacement_summary: None,
            recurrence: map.uncertain(schema::RECURRENCE)?,
            movement: map.uncertain(schema::MOVEMENT)?,
            historic: map.value(schema::HISTORICAL_EVENT)?,
            prehistoric: map.value(schema::PRE_HISTORIC)?,
            provenance: Provenance::default(),
        })
    }

    /// Attach geometry
    pub fn with_geometry(mut self, geometry: FaultGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Attach an externally computed length (km)
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Attach a displacement summary
    pub fn with_displacement_summary(mut self, summary: DisplacementSummary) -> Self {
        self.displacement_summary = Some(summary);
        self
    }

    /// Curator provenance
    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn set_compiler(&mut self, compiler: impl Into<String>) {
        self.provenance.compiler = Some(compiler.into());
    }

    pub fn set_contributor(&mut self, contributor: impl Into<String>) {
        self.provenance.contributor = Some(contributor.into());
    }

    pub fn set_created(&mut self, created: NaiveDate) {
        self.provenance.created = Some(created);
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.provenance.comment = Some(comment.into());
    }

    /// Uncertain fields by schema key, in schema order
    pub fn envelopes(&self) -> Vec<(&'static str, &UncertainValue)> {
        vec![
            (schema::UPPER_DEPTH, &self.upper_seismogenic_depth),
            (schema::LOWER_DEPTH, &self.lower_seismogenic_depth),
            (schema::DIP, &self.dip),
            (schema::DIP_DIRECTION, &self.dip_direction),
            (schema::DIP_SLIP, &self.dip_slip),
            (schema::STRIKE_SLIP, &self.strike_slip),
            (schema::VERTICAL_SLIP, &self.vertical_slip),
            (schema::HV_RATIO, &self.aspect),
            (schema::NET_SLIP, &self.net_slip),
            (schema::RAKE, &self.rake),
            (schema::SLIP_TYPE, &self.slip_type),
            (schema::ASEISMIC, &self.aseismic),
            (schema::RECURRENCE, &self.recurrence),
            (schema::MOVEMENT, &self.movement),
        ]
    }
}
