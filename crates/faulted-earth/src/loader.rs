//! # Fault Loader
//!
//! Builds a [`Fault`] from a `fault.toml` manifest: reads each section's
//! attribute file, trace and observation layers, validates every record,
//! then assembles sections and the fault. The first invalid record aborts
//! the load.
//!
//! ## Table of Contents
//! 1. load_fault — Main entry point
//! 2. Section assembly
//! 3. Observation layers

use std::path::Path;
use std::sync::Arc;

use crate::bundle::FaultAttributes;
use crate::config::{FaultManifest, SectionConfig};
use crate::error::{FaultError, ImportError};
use crate::fault::Fault;
use crate::geometry::FaultGeometry;
use crate::observation::{
    DisplacementObservation, EventObservation, GeometryObservation, SlipRateObservation,
};
use crate::schema::RecordKind;
use crate::section::{FaultSection, SectionObservations};
use crate::source::{import_attributes, import_line, import_polygon, import_records, FeatureRecord};
use crate::trace::FaultTrace;

// ============================================================================
// 1. load_fault — Main entry point
// ============================================================================

/// Load and assemble the fault described by a manifest file
pub fn load_fault(manifest_path: &Path) -> Result<Fault, ImportError> {
    let manifest = FaultManifest::load(manifest_path)?;
    let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));
    build_fault(&manifest, dir)
}

/// Assemble a fault from a parsed manifest, resolving paths against `dir`
pub fn build_fault(manifest: &FaultManifest, dir: &Path) -> Result<Fault, ImportError> {
    let sections = manifest
        .sections
        .iter()
        .map(|section| build_section(manifest, section, dir))
        .collect::<Result<Vec<_>, _>>()?;

    let fault_config = &manifest.fault;
    let data = match &fault_config.attributes {
        Some(file) => {
            let path = manifest.resolve_path(dir, file);
            let map = import_attributes(&path, RecordKind::FaultAttributes)?;
            let mut bundle =
                FaultAttributes::from_attributes(&fault_config.id, &fault_config.name, &map)?;
            if let Some(area) = &fault_config.area {
                let polygon = import_polygon(&manifest.resolve_path(dir, area))?;
                bundle = bundle.with_geometry(FaultGeometry::Area(Arc::new(polygon)));
            }
            if let Some(length) = fault_config.length_km {
                bundle = bundle.with_length(length);
            }
            Some(bundle)
        }
        None => None,
    };

    let fault = Fault::with_data(&fault_config.id, &fault_config.name, sections, data)?;
    tracing::info!(
        "Assembled fault `{}` ({}) from {} section(s)",
        fault.id(),
        fault.name(),
        fault.sections().len()
    );
    Ok(fault)
}

// ============================================================================
// 2. Section assembly
// ============================================================================

fn build_section(
    manifest: &FaultManifest,
    config: &SectionConfig,
    dir: &Path,
) -> Result<FaultSection, ImportError> {
    let map = import_attributes(
        &manifest.resolve_path(dir, &config.attributes),
        RecordKind::FaultAttributes,
    )?;
    let mut bundle = FaultAttributes::from_attributes(&config.id, &config.name, &map)?;

    let trace = match &config.trace {
        Some(file) => Some(Arc::new(import_line(&manifest.resolve_path(dir, file))?)),
        None => None,
    };
    if let Some(length) = config.length_km {
        bundle = bundle.with_length(length);
    }

    let layer = |file: &Option<String>| file.as_ref().map(|f| manifest.resolve_path(dir, f));
    let observations = SectionObservations::new()
        .with_slip(read_layer(layer(&config.slip_rates).as_deref(), RecordKind::SlipRate, |r, m| {
            SlipRateObservation::from_attributes(r.id.clone(), r.location.clone(), m)
        })?)
        .with_events(read_layer(layer(&config.events).as_deref(), RecordKind::Event, |r, m| {
            EventObservation::from_attributes(r.id.clone(), r.location.clone(), m)
        })?)
        .with_displacements(read_layer(
            layer(&config.displacements).as_deref(),
            RecordKind::Displacement,
            |r, m| DisplacementObservation::from_attributes(r.id.clone(), r.location.clone(), m),
        )?)
        .with_geometry(read_layer(layer(&config.geometry).as_deref(), RecordKind::Geometry, |r, m| {
            GeometryObservation::from_attributes(r.id.clone(), r.location.clone(), m)
        })?)
        .with_traces(read_layer(layer(&config.traces).as_deref(), RecordKind::Trace, |r, m| {
            FaultTrace::from_attributes(r.id.clone(), r.location.clone(), m)
        })?);

    if observations.is_empty() {
        tracing::warn!("Section `{}` has no observation records", config.id);
    }
    let count = observations.len();
    let section = FaultSection::from_attributes(bundle, trace, observations)?;
    tracing::info!(
        "Assembled section `{}` ({}) with {} record(s)",
        section.id(),
        section.name(),
        count
    );
    Ok(section)
}

// ============================================================================
// 3. Observation layers
// ============================================================================

/// Read one optional GeoJSON layer into records of a single kind
fn read_layer<T>(
    path: Option<&Path>,
    kind: RecordKind,
    build: impl Fn(&FeatureRecord, &crate::attributes::AttributeMap) -> Result<T, FaultError>,
) -> Result<Vec<T>, ImportError> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    import_records(path)?
        .iter()
        .map(|record| {
            record
                .attributes(kind)
                .and_then(|map| build(record, &map))
                .map_err(|source| ImportError::Feature {
                    path: path.to_path_buf(),
                    index: record.index,
                    source,
                })
        })
        .collect()
}
