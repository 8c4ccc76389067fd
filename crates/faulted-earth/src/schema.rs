//! # Attribute Schema
//!
//! Fixed attribute keys for every record kind, and which of them must carry
//! an uncertainty envelope (with the envelope's tuple arity).
//!
//! ## Table of Contents
//! 1. Key constants
//! 2. RecordKind — What an attribute mapping describes
//! 3. Envelope fields per kind

use serde::{Deserialize, Serialize};

// ============================================================================
// 1. Key constants
// ============================================================================

// Shared spatial record
pub const SCALE: &str = "Scale";
pub const ACCURACY: &str = "Accuracy";
pub const NOTES: &str = "Notes";
pub const FAULT_SECTION: &str = "Fault Section";
pub const SITE_FEATURE: &str = "Site Feature";

// Displacement observation
pub const TOTAL_DISPLACEMENT: &str = "Total Displacement";
pub const CATEGORY: &str = "Category";
pub const HORIZONTAL: &str = "Horizontal";
pub const VERTICAL: &str = "Vertical";
pub const NET: &str = "Net";

// Event observation
pub const RECURRENCE_INTERVAL: &str = "Recurrence Interval";
pub const RECURRENCE_CATEGORY: &str = "Recurrence Category";
pub const MOVEMENT: &str = "Movement";
pub const MOVEMENT_CATEGORY: &str = "Movement Category";
pub const HISTORIC_EVENT: &str = "Historic Event";
pub const PREHISTORIC_EVENT: &str = "Prehistoric Event";
pub const MARKER_AGE: &str = "Marker Age";

// Geometry observation (also used by the fault bundle)
pub const DIP_DIRECTION: &str = "Dip Direction";
pub const DOWNTHROWN_SIDE: &str = "Downthrown Side";
pub const STRIKE: &str = "Strike";
pub const DIP: &str = "Dip";

// Slip-rate observation
pub const DIP_SLIP: &str = "Dip Slip";
pub const STRIKE_SLIP_OBS: &str = "Strike-Slip";
pub const NET_SLIP: &str = "Net Slip";
pub const HV_RATIO: &str = "HV Ratio";
pub const RAKE: &str = "Rake";
pub const SLIP_CATEGORY: &str = "Slip Category";
pub const SLIP_TYPE: &str = "Slip Type";
pub const ASEISMIC: &str = "Aseismic";

// Mapped trace
pub const NAME: &str = "Name";
pub const LOCATION_METHOD: &str = "Location Method";
pub const GEOMORPHIC_EXPRESSION: &str = "Geomorphic Expression";

// Fault-level bundle
pub const EPISODIC: &str = "Episodic";
pub const SURFACE_DIP: &str = "Surface Dip";
pub const UPPER_DEPTH: &str = "Upper Depth";
pub const LOWER_DEPTH: &str = "Lower Depth";
pub const STRIKE_SLIP: &str = "Strike Slip";
pub const VERTICAL_SLIP: &str = "Vertical Slip";
pub const DISPLACEMENT: &str = "Displacement";
pub const RECURRENCE: &str = "Recurrence";
pub const HISTORICAL_EVENT: &str = "Historical Event";
pub const PRE_HISTORIC: &str = "Pre-historic";

// Displacement summary
pub const TOTAL: &str = "Total";
pub const VALUE: &str = "Value";

/// Default arity of a `(preferred, minimum, maximum)` envelope
pub const TRIPLE: usize = 3;

/// Arity of a `(preferred, minimum, maximum, category)` envelope
pub const QUADRUPLE: usize = 4;

// ============================================================================
// 2. RecordKind — What an attribute mapping describes
// ============================================================================

/// The kind of record an attribute mapping is read into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Displacement observation
    Displacement,
    /// Event / recurrence observation
    Event,
    /// Orientation observation
    Geometry,
    /// Slip-rate observation
    SlipRate,
    /// Mapped trace line
    Trace,
    /// Fault-level attribute bundle (sections and faults)
    FaultAttributes,
    /// Displacement summary attached to a bundle
    DisplacementSummary,
}

// ============================================================================
// 3. Envelope fields per kind
// ============================================================================

const DISPLACEMENT_ENVELOPES: &[(&str, usize)] = &[(TOTAL_DISPLACEMENT, TRIPLE)];

const EVENT_ENVELOPES: &[(&str, usize)] =
    &[(RECURRENCE_INTERVAL, QUADRUPLE), (MOVEMENT, QUADRUPLE)];

const SLIP_RATE_ENVELOPES: &[(&str, usize)] = &[
    (DIP_SLIP, TRIPLE),
    (STRIKE_SLIP_OBS, TRIPLE),
    (VERTICAL, TRIPLE),
    (NET_SLIP, TRIPLE),
    (HV_RATIO, TRIPLE),
    (RAKE, TRIPLE),
    (SLIP_TYPE, TRIPLE),
    (ASEISMIC, TRIPLE),
];

const FAULT_ENVELOPES: &[(&str, usize)] = &[
    (UPPER_DEPTH, TRIPLE),
    (LOWER_DEPTH, TRIPLE),
    (DIP, TRIPLE),
    (DIP_DIRECTION, TRIPLE),
    (DIP_SLIP, TRIPLE),
    (STRIKE_SLIP, TRIPLE),
    (VERTICAL_SLIP, TRIPLE),
    (HV_RATIO, TRIPLE),
    (NET_SLIP, TRIPLE),
    (RAKE, TRIPLE),
    (SLIP_TYPE, TRIPLE),
    (ASEISMIC, TRIPLE),
    (RECURRENCE, QUADRUPLE),
    (MOVEMENT, QUADRUPLE),
];

const SUMMARY_ENVELOPES: &[(&str, usize)] = &[(VALUE, TRIPLE)];

impl RecordKind {
    /// Keys that must hold an uncertainty envelope, with their tuple arity
    pub fn envelope_fields(self) -> &'static [(&'static str, usize)] {
        match self {
            RecordKind::Displacement => DISPLACEMENT_ENVELOPES,
            RecordKind::Event => EVENT_ENVELOPES,
            RecordKind::Geometry | RecordKind::Trace => &[],
            RecordKind::SlipRate => SLIP_RATE_ENVELOPES,
            RecordKind::FaultAttributes => FAULT_ENVELOPES,
            RecordKind::DisplacementSummary => SUMMARY_ENVELOPES,
        }
    }

    /// Arity of `key` if it is an envelope field of this kind
    pub fn envelope_arity(self, key: &str) -> Option<usize> {
        self.envelope_fields()
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, arity)| *arity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recurrence_carries_a_category_slot() {
        assert_eq!(RecordKind::Event.envelope_arity(RECURRENCE_INTERVAL), Some(4));
        assert_eq!(RecordKind::FaultAttributes.envelope_arity(MOVEMENT), Some(4));
        assert_eq!(RecordKind::SlipRate.envelope_arity(RAKE), Some(3));
    }

    #[test]
    fn test_plain_fields_are_not_envelopes() {
        assert_eq!(RecordKind::SlipRate.envelope_arity(SLIP_CATEGORY), None);
        assert_eq!(RecordKind::FaultAttributes.envelope_arity(DOWNTHROWN_SIDE), None);
        assert!(RecordKind::Geometry.envelope_fields().is_empty());
    }
}
