//! # Mapped Fault Traces
//!
//! A trace is a line-located [`SpatialRecord`] describing how a piece of the
//! fault was mapped.

use geo::LineString;
use std::sync::Arc;

use crate::attributes::{AttributeMap, AttributeValue};
use crate::error::{FaultError, Result};
use crate::geometry::Location;
use crate::observation::SpatialRecord;
use crate::schema;

/// Validated trace attributes
#[derive(Debug, Clone, PartialEq)]
pub struct TraceAttributes {
    pub name: Option<String>,
    /// How the trace was located (e.g. "LiDAR", "air photo")
    pub location_method: AttributeValue,
    /// Geomorphic expression of the trace (e.g. "sharp", "inferred")
    pub expression: AttributeValue,
}

impl TryFrom<&AttributeMap> for TraceAttributes {
    type Error = FaultError;

    fn try_from(map: &AttributeMap) -> Result<Self> {
        Ok(Self {
            name: map.label(schema::NAME)?,
            location_method: map.value(schema::LOCATION_METHOD)?,
            expression: map.value(schema::GEOMORPHIC_EXPRESSION)?,
        })
    }
}

/// A mapped trace line
#[derive(Debug, Clone, PartialEq)]
pub struct FaultTrace {
    pub record: SpatialRecord,
    pub name: Option<String>,
    pub location_method: AttributeValue,
    pub expression: AttributeValue,
}

impl FaultTrace {
    /// Attach validated attributes to a line-located record
    pub fn new(record: SpatialRecord, attrs: TraceAttributes) -> Result<Self> {
        record.require_line()?;
        Ok(Self {
            record,
            name: attrs.name,
            location_method: attrs.location_method,
            expression: attrs.expression,
        })
    }

    /// Build from an attribute mapping
    pub fn from_attributes(
        id: impl Into<String>,
        location: Location,
        map: &AttributeMap,
    ) -> Result<Self> {
        let id: String = id.into();
        location.require_line(&id)?;
        let record = SpatialRecord::from_attributes(id, location, map)?;
        Self::new(record, TraceAttributes::try_from(map)?)
    }

    /// The trace line
    pub fn line(&self) -> Option<&Arc<LineString<f64>>> {
        self.record.location.as_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{site_location, site_map, trace_location};

    fn trace_map() -> AttributeMap {
        site_map()
            .with(schema::NAME, "Izmit strand")
            .with(schema::LOCATION_METHOD, "LiDAR")
            .with(schema::GEOMORPHIC_EXPRESSION, "sharp")
    }

    #[test]
    fn test_trace_from_attributes() {
        let trace = FaultTrace::from_attributes("T1", trace_location(), &trace_map()).unwrap();
        assert_eq!(trace.name.as_deref(), Some("Izmit strand"));
        assert_eq!(trace.line().unwrap().0.len(), 3);
        // Shares the accuracy rule with point observations
        assert_eq!(trace.record.accuracy_value(), Some(100000.0));
    }

    #[test]
    fn test_trace_requires_line() {
        let err = FaultTrace::from_attributes("T1", site_location(), &trace_map()).unwrap_err();
        assert!(matches!(err, FaultError::Geometry { expected: "line", .. }));
    }

    #[test]
    fn test_trace_location_is_checked_first() {
        let mut map = trace_map();
        map.remove(schema::NOTES);
        let err = FaultTrace::from_attributes("T1", site_location(), &map).unwrap_err();
        assert!(matches!(err, FaultError::Geometry { expected: "line", found: "point", .. }));
    }

    #[test]
    fn test_trace_missing_method() {
        let mut map = trace_map();
        map.remove(schema::LOCATION_METHOD);
        let err = FaultTrace::from_attributes("T1", trace_location(), &map).unwrap_err();
        assert_eq!(err, FaultError::missing(schema::LOCATION_METHOD));
    }
}
