//! # Faulted Earth — Uncertain Fault Data for Seismic-Hazard Models
//!
//! Site observations (displacement, events, orientation, slip rate) along a
//! fault trace are assembled into neotectonic sections and whole faults.
//! Every measured quantity is an uncertain `(preferred, minimum, maximum)`
//! value that is validated when the record is built.
//!
//! ## Architecture
//! - Attribute mappings → `UncertainValue` → observations → sections → fault
//! - Geometry comes from the `geo` crate and is shared by `Arc`, never copied
//! - `fault.toml` + GeoJSON layers feed the optional loader
//!
//! ## Modules
//! - `parameter` — `Scalar`, `UncertainValue`, `build_pref_min_max`
//! - `attributes` — Fully keyed attribute mappings, `require_uncertain`
//! - `schema` — Attribute keys and envelope arity per record kind
//! - `geometry` — Point / line / polygon references
//! - `observation` — Spatial records and the four observation kinds
//! - `trace` — Mapped trace lines
//! - `bundle` — Fault-level attribute bundle and provenance
//! - `section` — Neotectonic sections
//! - `fault` — Neotectonic faults
//! - `source` — GeoJSON / JSON attribute source
//! - `config` — `fault.toml` manifest
//! - `loader` — Manifest → `Fault`
//! - `error` — Error types
//!
//! ## Table of Contents
//! 1. Module declarations
//! 2. Re-exports

pub mod attributes;
pub mod bundle;
pub mod config;
pub mod error;
pub mod fault;
pub mod geometry;
pub mod loader;
pub mod observation;
pub mod parameter;
pub mod schema;
pub mod section;
pub mod source;
pub mod trace;

#[cfg(test)]
mod test_support;

pub use attributes::{require_uncertain, AttributeMap, AttributeValue};
pub use bundle::{DisplacementSummary, FaultAttributes, Provenance};
pub use config::FaultManifest;
pub use error::{FaultError, ImportError, Result};
pub use fault::Fault;
pub use geometry::{FaultGeometry, Location, SitePoint};
pub use loader::load_fault;
pub use observation::{
    DisplacementObservation, EventObservation, GeometryObservation, Observation, ObservationKind,
    SlipRateObservation, SpatialRecord,
};
pub use parameter::{build_pref_min_max, Scalar, TupleInput, UncertainValue};
pub use schema::RecordKind;
pub use section::{FaultSection, SectionObservations};
pub use trace::FaultTrace;
