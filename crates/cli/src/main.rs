//! # Faulted Earth CLI
//!
//! Loads a fault manifest, validates every record and prints a JSON summary.
//!
//! ## Usage
//!
//! ```bash
//! # Validate a fault and print its summary
//! faulted-earth data/naf/fault.toml
//!
//! # Per-record logging, pretty-printed output
//! faulted-earth data/naf/fault.toml --verbose --pretty
//! ```

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use faulted_earth::{load_fault, Fault, FaultAttributes, FaultSection, UncertainValue};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "faulted-earth")]
#[command(about = "Validate and summarize a Faulted Earth fault manifest")]
#[command(version)]
struct Args {
    /// Path to fault.toml
    manifest: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Pretty-print the JSON summary
    #[arg(long)]
    pretty: bool,
}

// ============================================================================
// Summary report
// ============================================================================

#[derive(Serialize)]
struct FaultReport<'a> {
    id: &'a str,
    name: &'a str,
    attributes: Option<AttributeReport<'a>>,
    sections: Vec<SectionReport<'a>>,
}

#[derive(Serialize)]
struct SectionReport<'a> {
    id: &'a str,
    name: &'a str,
    has_trace: bool,
    slip_rates: usize,
    events: usize,
    displacements: usize,
    geometry: usize,
    traces: usize,
    attributes: AttributeReport<'a>,
}

#[derive(Serialize)]
struct AttributeReport<'a> {
    length_km: Option<f64>,
    net_slip: &'a UncertainValue,
    rake: &'a UncertainValue,
    recurrence: &'a UncertainValue,
    upper_depth: &'a UncertainValue,
    lower_depth: &'a UncertainValue,
}

impl<'a> From<&'a FaultAttributes> for AttributeReport<'a> {
    fn from(bundle: &'a FaultAttributes) -> Self {
        Self {
            length_km: bundle.length,
            net_slip: &bundle.net_slip,
            rake: &bundle.rake,
            recurrence: &bundle.recurrence,
            upper_depth: &bundle.upper_seismogenic_depth,
            lower_depth: &bundle.lower_seismogenic_depth,
        }
    }
}

impl<'a> From<&'a FaultSection> for SectionReport<'a> {
    fn from(section: &'a FaultSection) -> Self {
        Self {
            id: section.id(),
            name: section.name(),
            has_trace: section.trace().is_some(),
            slip_rates: section.slip_observations().len(),
            events: section.event_observations().len(),
            displacements: section.displacement_observations().len(),
            geometry: section.geometry_observations().len(),
            traces: section.trace_observations().len(),
            attributes: section.attributes().into(),
        }
    }
}

impl<'a> From<&'a Fault> for FaultReport<'a> {
    fn from(fault: &'a Fault) -> Self {
        Self {
            id: fault.id(),
            name: fault.name(),
            attributes: fault.data().map(AttributeReport::from),
            sections: fault.sections().iter().map(SectionReport::from).collect(),
        }
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG takes precedence over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "info" })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Loading fault manifest {}", args.manifest.display());

    let fault = load_fault(&args.manifest)
        .with_context(|| format!("failed to load {}", args.manifest.display()))?;

    let report = FaultReport::from(&fault);
    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
