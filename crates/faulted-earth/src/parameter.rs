//! # Uncertain Parameters
//!
//! Quantities in fault databases arrive either as a single best estimate or
//! as a `(preferred, minimum, maximum[, category])` record. Both shapes are
//! normalized to one fixed-length tuple and then lifted into an
//! [`UncertainValue`].
//!
//! ## Table of Contents
//! 1. Scalar — Plain numeric / categorical / boolean value
//! 2. TupleInput + build_pref_min_max — Shape normalization
//! 3. UncertainValue — Value with bounds, completeness and distribution tag

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::{FaultError, Result};

// ============================================================================
// 1. Scalar — Plain numeric / categorical / boolean value
// ============================================================================

/// A single plain value as delivered by the attribute source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean flag (e.g. "Episodic")
    Flag(bool),
    /// Numeric measurement
    Number(f64),
    /// Categorical or free-text value
    Text(String),
}

impl Scalar {
    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text value, if this is text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Flag(_) => "flag",
            Scalar::Number(_) => "number",
            Scalar::Text(_) => "text",
        }
    }
}

/// Values of different kinds have no ordering.
impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Flag(a), Scalar::Flag(b)) => a.partial_cmp(b),
            (Scalar::Number(a), Scalar::Number(b)) => a.partial_cmp(b),
            (Scalar::Text(a), Scalar::Text(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Flag(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Flag(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

// ============================================================================
// 2. TupleInput + build_pref_min_max — Shape normalization
// ============================================================================

/// Raw shape of an uncertain quantity before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum TupleInput {
    /// A single best estimate (possibly null)
    Bare(Option<Scalar>),
    /// An explicit `(preferred, minimum, maximum[, category])` record
    Tuple(Vec<Option<Scalar>>),
}

impl From<Scalar> for TupleInput {
    fn from(value: Scalar) -> Self {
        TupleInput::Bare(Some(value))
    }
}

impl From<Vec<Option<Scalar>>> for TupleInput {
    fn from(values: Vec<Option<Scalar>>) -> Self {
        TupleInput::Tuple(values)
    }
}

/// Normalize an uncertain quantity into a tuple of exactly `arity` slots.
///
/// A tuple is returned unchanged after two checks: its length must equal
/// `arity` ([`FaultError::Shape`]), and when `arity > 2` and both bounds are
/// present the minimum must not exceed the maximum ([`FaultError::Range`]).
/// A bare value never fails and becomes `(value, None, ...)`.
pub fn build_pref_min_max(
    field: &str,
    input: TupleInput,
    arity: usize,
) -> Result<Vec<Option<Scalar>>> {
    match input {
        TupleInput::Tuple(values) => {
            if values.len() != arity {
                return Err(FaultError::Shape {
                    field: field.to_string(),
                    expected: arity,
                    found: values.len(),
                });
            }
            if arity > 2 {
                if let (Some(minimum), Some(maximum)) = (&values[1], &values[2]) {
                    check_bounds(field, minimum, maximum)?;
                }
            }
            Ok(values)
        }
        TupleInput::Bare(value) => {
            let mut values = Vec::with_capacity(arity.max(1));
            values.push(value);
            values.resize(arity.max(1), None);
            Ok(values)
        }
    }
}

/// Fail with [`FaultError::Range`] unless `minimum <= maximum`
fn check_bounds(field: &str, minimum: &Scalar, maximum: &Scalar) -> Result<()> {
    let relation = match minimum.partial_cmp(maximum) {
        Some(Ordering::Less) | Some(Ordering::Equal) => return Ok(()),
        Some(Ordering::Greater) => "is greater than",
        // Mixed kinds and NaN
        None => "cannot be ordered against",
    };
    Err(FaultError::Range {
        field: field.to_string(),
        minimum: minimum.to_string(),
        maximum: maximum.to_string(),
        relation,
    })
}

// ============================================================================
// 3. UncertainValue — Value with bounds, completeness and distribution tag
// ============================================================================

/// A preferred value with optional bounds, completeness category and
/// distribution tag.
///
/// The preferred value is not required to lie inside `[minimum, maximum]`;
/// use [`UncertainValue::is_bracketed`] to detect inconsistent source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertainValue {
    /// Central / expected value
    pub preferred: Scalar,
    /// Lower bound
    #[serde(default)]
    pub minimum: Option<Scalar>,
    /// Upper bound
    #[serde(default)]
    pub maximum: Option<Scalar>,
    /// Completeness category
    #[serde(default)]
    pub completeness: Option<Scalar>,
    /// Distribution type (e.g. "uniform", "lognormal")
    #[serde(default)]
    pub distribution: Option<String>,
    /// Curator annotation, the only field editable after construction
    #[serde(default)]
    comment: Option<String>,
}

impl UncertainValue {
    /// Create an uncertain value with only a preferred value
    pub fn new(preferred: impl Into<Scalar>) -> Self {
        Self {
            preferred: preferred.into(),
            minimum: None,
            maximum: None,
            completeness: None,
            distribution: None,
            comment: None,
        }
    }

    /// Create a `(preferred, minimum, maximum)` value, rejecting inverted bounds
    pub fn with_range(
        field: &str,
        preferred: impl Into<Scalar>,
        minimum: impl Into<Scalar>,
        maximum: impl Into<Scalar>,
    ) -> Result<Self> {
        let tuple = vec![
            Some(preferred.into()),
            Some(minimum.into()),
            Some(maximum.into()),
        ];
        Self::from_tuple(field, build_pref_min_max(field, tuple.into(), 3)?)
    }

    /// Normalize raw input with the field's arity and lift it into a value
    pub fn parse(field: &str, input: TupleInput, arity: usize) -> Result<Self> {
        Self::from_tuple(field, build_pref_min_max(field, input, arity)?)
    }

    /// Lift a normalized tuple: slot 0 is preferred, 1 minimum, 2 maximum,
    /// 3 completeness. A null preferred value is not an envelope.
    pub fn from_tuple(field: &str, tuple: Vec<Option<Scalar>>) -> Result<Self> {
        let mut slots = tuple.into_iter();
        let preferred = slots
            .next()
            .flatten()
            .ok_or_else(|| FaultError::type_constraint(field, "null preferred value"))?;
        Ok(Self {
            preferred,
            minimum: slots.next().flatten(),
            maximum: slots.next().flatten(),
            completeness: slots.next().flatten(),
            distribution: None,
            comment: None,
        })
    }

    /// Set the completeness category
    pub fn with_completeness(mut self, completeness: impl Into<Scalar>) -> Self {
        self.completeness = Some(completeness.into());
        self
    }

    /// Set the distribution tag
    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        self.distribution = Some(distribution.into());
        self
    }

    /// Check the bound ordering of a value built outside `build_pref_min_max`
    /// (e.g. deserialized from a JSON object)
    pub fn validate(&self, field: &str) -> Result<()> {
        match (&self.minimum, &self.maximum) {
            (Some(minimum), Some(maximum)) => check_bounds(field, minimum, maximum),
            _ => Ok(()),
        }
    }

    /// Whether the preferred value lies within whichever bounds are present
    pub fn is_bracketed(&self) -> bool {
        let ordered = |a: &Scalar, b: &Scalar| {
            matches!(a.partial_cmp(b), Some(Ordering::Less | Ordering::Equal))
        };
        let above_min = self
            .minimum
            .as_ref()
            .map_or(true, |min| ordered(min, &self.preferred));
        let below_max = self
            .maximum
            .as_ref()
            .map_or(true, |max| ordered(&self.preferred, max));
        above_min && below_max
    }

    /// Curator comment
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Annotate the value after construction
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = Some(comment.into());
    }
}

impl fmt::Display for UncertainValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.preferred)?;
        match (&self.minimum, &self.maximum) {
            (Some(min), Some(max)) => write!(f, " [{}, {}]", min, max),
            (Some(min), None) => write!(f, " [{}, -]", min),
            (None, Some(max)) => write!(f, " [-, {}]", max),
            (None, None) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(v: f64) -> Option<Scalar> {
        Some(Scalar::Number(v))
    }

    #[test]
    fn test_bare_value_pads_to_arity() {
        for arity in [1, 3, 4] {
            let tuple = build_pref_min_max("Rake", Scalar::from(90.0).into(), arity).unwrap();
            assert_eq!(tuple.len(), arity);
            assert_eq!(tuple[0], num(90.0));
            assert!(tuple[1..].iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_bare_null_is_accepted() {
        let tuple = build_pref_min_max("Dip", TupleInput::Bare(None), 3).unwrap();
        assert_eq!(tuple, vec![None, None, None]);
    }

    #[test]
    fn test_valid_tuple_passes_through_unchanged() {
        let input = vec![num(1.5), num(0.5), num(3.0)];
        let tuple = build_pref_min_max("Net Slip", input.clone().into(), 3).unwrap();
        assert_eq!(tuple, input);

        // Equal bounds are ordered
        let input = vec![num(2.0), num(2.0), num(2.0)];
        assert!(build_pref_min_max("Net Slip", input.into(), 3).is_ok());
    }

    #[test]
    fn test_inverted_bounds_fail_with_range_error() {
        let input = vec![num(1.0), num(5.0), num(2.0)];
        let err = build_pref_min_max("Dip Slip", input.into(), 3).unwrap_err();
        assert_eq!(
            err,
            FaultError::Range {
                field: "Dip Slip".into(),
                minimum: "5".into(),
                maximum: "2".into(),
                relation: "is greater than",
            }
        );
        assert_eq!(
            err.to_string(),
            "range error: `Dip Slip` minimum 5 is greater than maximum 2"
        );
    }

    #[test]
    fn test_missing_bound_skips_range_check() {
        let input = vec![num(1.0), None, num(-4.0)];
        assert!(build_pref_min_max("Rake", input.into(), 3).is_ok());
    }

    #[test]
    fn test_mixed_kind_bounds_are_rejected() {
        let input = vec![num(1.0), Some("low".into()), num(3.0)];
        let err = build_pref_min_max("Rake", input.into(), 3).unwrap_err();
        assert!(matches!(err, FaultError::Range { relation: "cannot be ordered against", .. }));
        assert_eq!(
            err.to_string(),
            "range error: `Rake` minimum \"low\" cannot be ordered against maximum 3"
        );

        let input = vec![num(1.0), num(f64::NAN), num(3.0)];
        let err = build_pref_min_max("Rake", input.into(), 3).unwrap_err();
        assert!(err.to_string().contains("cannot be ordered against"));
    }

    #[test]
    fn test_wrong_length_fails_with_shape_error() {
        let cases = [
            vec![num(1.0), num(0.0)],
            vec![num(1.0), num(0.0), num(2.0), None],
            vec![],
        ];
        for input in cases {
            let found = input.len();
            let err = build_pref_min_max("Movement", input.into(), 3).unwrap_err();
            assert_eq!(
                err,
                FaultError::Shape {
                    field: "Movement".into(),
                    expected: 3,
                    found,
                }
            );
        }
    }

    #[test]
    fn test_arity_two_skips_range_check() {
        let input = vec![num(9.0), num(1.0)];
        assert!(build_pref_min_max("Pair", input.into(), 2).is_ok());
    }

    #[test]
    fn test_from_tuple_maps_slots() {
        let value = UncertainValue::parse(
            "Recurrence Interval",
            vec![num(1000.0), num(500.0), num(2500.0), Some("B".into())].into(),
            4,
        )
        .unwrap();
        assert_eq!(value.preferred, Scalar::Number(1000.0));
        assert_eq!(value.minimum, num(500.0));
        assert_eq!(value.maximum, num(2500.0));
        assert_eq!(value.completeness, Some(Scalar::Text("B".into())));
        assert!(value.distribution.is_none());
    }

    #[test]
    fn test_null_preferred_is_not_an_envelope() {
        let err = UncertainValue::parse("Rake", TupleInput::Bare(None), 3).unwrap_err();
        assert!(matches!(err, FaultError::TypeConstraint { ref field, .. } if field == "Rake"));
    }

    #[test]
    fn test_preferred_outside_bounds_is_kept_but_flagged() {
        let value = UncertainValue::with_range("Dip", 80.0, 30.0, 60.0).unwrap();
        assert!(!value.is_bracketed());
        assert!(UncertainValue::with_range("Dip", 45.0, 30.0, 60.0)
            .unwrap()
            .is_bracketed());
        assert!(UncertainValue::new(45.0).is_bracketed());
    }

    #[test]
    fn test_comment_is_annotated_post_hoc() {
        let mut value = UncertainValue::new(0.5);
        assert!(value.comment().is_none());
        value.set_comment("revised after trenching");
        assert_eq!(value.comment(), Some("revised after trenching"));
    }

    #[test]
    fn test_deserialized_object_is_validated() {
        let value: UncertainValue = serde_json::from_value(serde_json::json!({
            "preferred": 2.0,
            "minimum": 3.0,
            "maximum": 1.0,
            "distribution": "uniform"
        }))
        .unwrap();
        assert_eq!(value.distribution.as_deref(), Some("uniform"));
        assert!(matches!(value.validate("Net Slip"), Err(FaultError::Range { .. })));
    }
}
