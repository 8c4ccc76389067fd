//! # Geometry Collaborator
//!
//! Points, traces and areas come from the `geo` crate. Records hold them
//! behind `Arc` so the same geometry can be shared by many records without
//! copying; nothing here computes on them.
//!
//! ## Table of Contents
//! 1. SitePoint — Point with optional depth
//! 2. Location — Point or line location of a spatial record
//! 3. FaultGeometry — Trace or area geometry of a fault bundle

use geo::{LineString, Point, Polygon};
use std::sync::Arc;

use crate::error::{FaultError, Result};

// ============================================================================
// 1. SitePoint — Point with optional depth
// ============================================================================

/// A WGS84 point (x = longitude, y = latitude) with an optional depth in km
#[derive(Debug, Clone, PartialEq)]
pub struct SitePoint {
    /// Horizontal position
    pub point: Point<f64>,
    /// Depth below surface (km), if known
    pub depth: Option<f64>,
}

impl SitePoint {
    /// Create a surface point
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            point: Point::new(longitude, latitude),
            depth: None,
        }
    }

    /// Set the depth
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Longitude (WGS84 degrees)
    pub fn longitude(&self) -> f64 {
        self.point.x()
    }

    /// Latitude (WGS84 degrees)
    pub fn latitude(&self) -> f64 {
        self.point.y()
    }

    /// Depth (km), if known
    pub fn depth(&self) -> Option<f64> {
        self.depth
    }
}

// ============================================================================
// 2. Location — Point or line location of a spatial record
// ============================================================================

/// Shared reference to the location of a spatial record
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Site observation location
    Point(Arc<SitePoint>),
    /// Mapped line (traces)
    Line(Arc<LineString<f64>>),
}

impl Location {
    /// Wrap a point
    pub fn point(point: SitePoint) -> Self {
        Location::Point(Arc::new(point))
    }

    /// Wrap a line
    pub fn line(line: LineString<f64>) -> Self {
        Location::Line(Arc::new(line))
    }

    /// Geometry kind name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Location::Point(_) => "point",
            Location::Line(_) => "line",
        }
    }

    /// The point, if this is a point location
    pub fn as_point(&self) -> Option<&SitePoint> {
        match self {
            Location::Point(p) => Some(p),
            Location::Line(_) => None,
        }
    }

    /// The line, if this is a line location
    pub fn as_line(&self) -> Option<&Arc<LineString<f64>>> {
        match self {
            Location::Line(l) => Some(l),
            Location::Point(_) => None,
        }
    }
    /// Fail with [`FaultError::Geometry`] unless this is a point location
    pub fn require_point(&self, id: &str) -> Result<()> {
        self.require("point", matches!(self, Location::Point(_)), id)
    }

    /// Fail with [`FaultError::Geometry`] unless this is a line location
    pub fn require_line(&self, id: &str) -> Result<()> {
        self.require("line", matches!(self, Location::Line(_)), id)
    }

    fn require(&self, expected: &'static str, ok: bool, id: &str) -> Result<()> {
        if ok {
            return Ok(());
        }
        Err(FaultError::Geometry {
            id: id.to_string(),
            expected,
            found: self.kind(),
        })
    }
}

// ============================================================================
// 3. FaultGeometry — Trace or area geometry of a fault bundle
// ============================================================================

/// Geometry attached to a fault-level attribute bundle
#[derive(Debug, Clone, PartialEq)]
pub enum FaultGeometry {
    /// Surface trace
    Trace(Arc<LineString<f64>>),
    /// Fault zone polygon
    Area(Arc<Polygon<f64>>),
}
