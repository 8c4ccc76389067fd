//! # Neotectonic Faults
//!
//! A fault owns one or more sections and, optionally, its own attribute
//! bundle. The fault-level bundle is independent of its sections: nothing
//! is aggregated or cross-checked between the two.

use crate::attributes::AttributeMap;
use crate::bundle::FaultAttributes;
use crate::error::{FaultError, Result};
use crate::observation::SpatialRecord;
use crate::section::FaultSection;

/// A fault assembled from ordered sections
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    id: String,
    name: String,
    sections: Vec<FaultSection>,
    data: Option<FaultAttributes>,
}

impl Fault {
    /// Assemble a fault. A supplied attribute mapping is validated into the
    /// fault's own bundle; without one the fault summary stays unset.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        sections: Vec<FaultSection>,
        attributes: Option<&AttributeMap>,
    ) -> Result<Self> {
        let id: String = id.into();
        let name: String = name.into();
        let data = attributes
            .map(|map| FaultAttributes::from_attributes(id.clone(), name.clone(), map))
            .transpose()?;
        Self::with_data(id, name, sections, data)
    }

    /// Assemble a fault around an already built bundle
    pub fn with_data(
        id: impl Into<String>,
        name: impl Into<String>,
        sections: Vec<FaultSection>,
        data: Option<FaultAttributes>,
    ) -> Result<Self> {
        let id = id.into();
        if sections.is_empty() {
            return Err(FaultError::EmptyFault(id));
        }
        Ok(Self {
            id,
            name: name.into(),
            sections,
            data,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sections in assembly order (never empty)
    pub fn sections(&self) -> &[FaultSection] {
        &self.sections
    }

    /// Fault-level bundle, if one was supplied
    pub fn data(&self) -> Option<&FaultAttributes> {
        self.data.as_ref()
    }

    /// Mutable bundle access for curator provenance
    pub fn data_mut(&mut self) -> Option<&mut FaultAttributes> {
        self.data.as_mut()
    }

    /// Look up a section by ID
    pub fn section(&self, id: &str) -> Option<&FaultSection> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Resolve a record's weak back-reference to its section
    pub fn section_of(&self, record: &SpatialRecord) -> Option<&FaultSection> {
        record
            .fault_section
            .as_deref()
            .and_then(|id| self.section(id))
    }
}
