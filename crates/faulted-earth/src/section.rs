//! # Neotectonic Sections
//!
//! A section is a contiguous segment of a fault: a trace geometry, ordered
//! lists of site observations, and its own fault-level attribute bundle so
//! it can stand alone as a mini-fault record.
//!
//! ## Table of Contents
//! 1. SectionObservations — Observation lists handed to a section
//! 2. FaultSection — Section assembly and cross-reference integrity

use geo::LineString;
use std::sync::Arc;

use crate::attributes::AttributeMap;
use crate::bundle::FaultAttributes;
use crate::error::{FaultError, Result};
use crate::geometry::FaultGeometry;
use crate::observation::{
    DisplacementObservation, EventObservation, GeometryObservation, Observation,
    SlipRateObservation, SpatialRecord,
};
use crate::trace::FaultTrace;

// ============================================================================
// 1. SectionObservations — Observation lists handed to a section
// ============================================================================

/// Ordered observation lists of a section; any of them may be empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionObservations {
    pub slip: Vec<SlipRateObservation>,
    pub events: Vec<EventObservation>,
    pub traces: Vec<FaultTrace>,
    pub displacements: Vec<DisplacementObservation>,
    pub geometry: Vec<GeometryObservation>,
}

impl SectionObservations {
    /// Empty lists
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slip(mut self, slip: Vec<SlipRateObservation>) -> Self {
        self.slip = slip;
        self
    }

    pub fn with_events(mut self, events: Vec<EventObservation>) -> Self {
        self.events = events;
        self
    }

    pub fn with_traces(mut self, traces: Vec<FaultTrace>) -> Self {
        self.traces = traces;
        self
    }

    pub fn with_displacements(mut self, displacements: Vec<DisplacementObservation>) -> Self {
        self.displacements = displacements;
        self
    }

    pub fn with_geometry(mut self, geometry: Vec<GeometryObservation>) -> Self {
        self.geometry = geometry;
        self
    }

    /// Every spatial record across all lists
    fn records(&self) -> impl Iterator<Item = &SpatialRecord> {
        self.slip
            .iter()
            .map(|o| &o.record)
            .chain(self.events.iter().map(|o| &o.record))
            .chain(self.traces.iter().map(|o| &o.record))
            .chain(self.displacements.iter().map(|o| &o.record))
            .chain(self.geometry.iter().map(|o| &o.record))
    }

    /// Total number of records
    pub fn len(&self) -> usize {
        self.slip.len()
            + self.events.len()
            + self.traces.len()
            + self.displacements.len()
            + self.geometry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// 2. FaultSection — Section assembly and cross-reference integrity
// ============================================================================

/// A neotectonic fault section
#[derive(Debug, Clone, PartialEq)]
pub struct FaultSection {
    attributes: FaultAttributes,
    trace: Option<Arc<LineString<f64>>>,
    observations: SectionObservations,
}

impl FaultSection {
    /// Build a section, validating its attribute mapping into a bundle
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        attributes: &AttributeMap,
        trace: Option<Arc<LineString<f64>>>,
        observations: SectionObservations,
    ) -> Result<Self> {
        let bundle = FaultAttributes::from_attributes(id, name, attributes)?;
        Self::from_attributes(bundle, trace, observations)
    }

    /// Attach an already built bundle.
    ///
    /// Every record that carries a `fault_section` back-reference must name
    /// this section, or [`FaultError::CrossReference`] is returned. A bundle
    /// without geometry takes the section trace.
    pub fn from_attributes(
        mut attributes: FaultAttributes,
        trace: Option<Arc<LineString<f64>>>,
        observations: SectionObservations,
    ) -> Result<Self> {
        if let Some(stray) = observations
            .records()
            .find(|r| r.fault_section.as_deref().is_some_and(|s| s != attributes.id))
        {
            return Err(FaultError::CrossReference {
                section: attributes.id.clone(),
                observation: stray.id.clone(),
                referenced: stray.fault_section.clone().unwrap_or_default(),
            });
        }

        if attributes.geometry.is_none() {
            if let Some(line) = &trace {
                attributes.geometry = Some(FaultGeometry::Trace(Arc::clone(line)));
            }
        }

        Ok(Self {
            attributes,
            trace,
            observations,
        })
    }

    pub fn id(&self) -> &str {
        &self.attributes.id
    }

    pub fn name(&self) -> &str {
        &self.attributes.name
    }

    /// Section-level attribute bundle
    pub fn attributes(&self) -> &FaultAttributes {
        &self.attributes
    }

    /// Mutable access for curator provenance
    pub fn attributes_mut(&mut self) -> &mut FaultAttributes {
        &mut self.attributes
    }

    /// Trace geometry
    pub fn trace(&self) -> Option<&Arc<LineString<f64>>> {
        self.trace.as_ref()
    }

    pub fn slip_observations(&self) -> &[SlipRateObservation] {
        &self.observations.slip
    }

    pub fn event_observations(&self) -> &[EventObservation] {
        &self.observations.events
    }

    pub fn trace_observations(&self) -> &[FaultTrace] {
        &self.observations.traces
    }

    pub fn displacement_observations(&self) -> &[DisplacementObservation] {
        &self.observations.displacements
    }

    pub fn geometry_observations(&self) -> &[GeometryObservation] {
        &self.observations.geometry
    }

    /// All point observations as tagged values, list by list in insertion order
    pub fn observations(&self) -> impl Iterator<Item = Observation> + '_ {
        let o = &self.observations;
        o.slip
            .iter()
            .cloned()
            .map(Observation::SlipRate)
            .chain(o.events.iter().cloned().map(Observation::Event))
            .chain(o.displacements.iter().cloned().map(Observation::Displacement))
            .chain(o.geometry.iter().cloned().map(Observation::Geometry))
    }

    /// Whether a record's back-reference points at this section
    pub fn owns(&self, record: &SpatialRecord) -> bool {
        record.fault_section.as_deref() == Some(self.id())
    }
}
