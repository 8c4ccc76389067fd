//! # Fault Manifest Configuration
//!
//! Parses `fault.toml`, the declarative description of one fault: its
//! optional fault-level attributes and, per section, the attribute file,
//! trace and observation layers. Paths are relative to the manifest.
//!
//! ## Table of Contents
//! 1. FaultManifest — Top-level manifest
//! 2. SectionConfig — Per-section layers
//! 3. Parsing

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ImportError;

// ============================================================================
// 1. FaultManifest — Top-level manifest
// ============================================================================

/// Top-level fault manifest, parsed from `fault.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultManifest {
    /// Fault identity and optional attribute files
    pub fault: FaultConfig,
    /// Sections in assembly order
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

/// Fault identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaultConfig {
    /// Unique fault ID
    pub id: String,
    /// Human-readable fault name
    pub name: String,
    /// JSON object of fault-level attributes (omit to leave the summary unset)
    #[serde(default)]
    pub attributes: Option<String>,
    /// GeoJSON file with the fault zone polygon
    #[serde(default)]
    pub area: Option<String>,
    /// Externally computed fault length (km)
    #[serde(default)]
    pub length_km: Option<f64>,
}

// ============================================================================
// 2. SectionConfig — Per-section layers
// ============================================================================

/// A single section and its data files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Unique section ID
    pub id: String,
    /// Human-readable section name
    pub name: String,
    /// JSON object of section-level attributes
    pub attributes: String,
    /// GeoJSON file whose first LineString is the section trace
    #[serde(default)]
    pub trace: Option<String>,
    /// Slip-rate observation layer
    #[serde(default)]
    pub slip_rates: Option<String>,
    /// Event observation layer
    #[serde(default)]
    pub events: Option<String>,
    /// Displacement observation layer
    #[serde(default)]
    pub displacements: Option<String>,
    /// Orientation observation layer
    #[serde(default)]
    pub geometry: Option<String>,
    /// Mapped trace layer
    #[serde(default)]
    pub traces: Option<String>,
    /// Externally computed section length (km)
    #[serde(default)]
    pub length_km: Option<f64>,
}

// ============================================================================
// 3. Parsing
// ============================================================================

impl FaultManifest {
    /// Load a manifest from a `fault.toml` file path
    pub fn load(path: &Path) -> Result<Self, ImportError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ImportError::Io(path.to_path_buf(), e))?;
        Self::parse(path, &content)
    }

    /// Parse manifest text; `path` is only used in error messages
    pub fn parse(path: &Path, content: &str) -> Result<Self, ImportError> {
        toml::from_str(content).map_err(|e| ImportError::Config(path.to_path_buf(), e))
    }

    /// Resolve a relative path from the manifest directory
    pub fn resolve_path(&self, manifest_dir: &Path, relative: &str) -> PathBuf {
        manifest_dir.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        [fault]
        id = "NAF"
        name = "North Anatolian Fault"
        attributes = "naf.json"

        [[sections]]
        id = "NAF-01"
        name = "Izmit"
        attributes = "izmit.json"
        trace = "izmit_trace.geojson"
        slip_rates = "izmit_slip.geojson"
        length_km = 145.0

        [[sections]]
        id = "NAF-02"
        name = "Duzce"
        attributes = "duzce.json"
    "#;

    #[test]
    fn test_parse_manifest() {
        let manifest = FaultManifest::parse(Path::new("fault.toml"), MANIFEST).unwrap();
        assert_eq!(manifest.fault.id, "NAF");
        assert_eq!(manifest.fault.attributes.as_deref(), Some("naf.json"));
        assert!(manifest.fault.area.is_none());
        assert_eq!(manifest.sections.len(), 2);
        assert_eq!(manifest.sections[0].length_km, Some(145.0));
        assert!(manifest.sections[1].trace.is_none());
        assert_eq!(
            manifest.resolve_path(Path::new("/data/naf"), "izmit.json"),
            PathBuf::from("/data/naf/izmit.json")
        );
    }

    #[test]
    fn test_section_requires_attributes() {
        let err = FaultManifest::parse(
            Path::new("fault.toml"),
            "[fault]\nid = \"F\"\nname = \"F\"\n[[sections]]\nid = \"S\"\nname = \"S\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ImportError::Config(..)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = FaultManifest::load(Path::new("/nonexistent/fault.toml")).unwrap_err();
        assert!(matches!(err, ImportError::Io(..)));
    }
}
