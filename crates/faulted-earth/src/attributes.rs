//! # Attribute Mappings
//!
//! The attribute source hands every constructor a mapping from fixed schema
//! keys to values. The mapping must be fully keyed: an absent key is a caller
//! error, a present `Null` is legitimate data.
//!
//! ## Table of Contents
//! 1. AttributeValue — Null, plain scalar, or uncertain value
//! 2. AttributeMap — Fully keyed attribute mapping
//! 3. require_uncertain — Envelope-required field assignment

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FaultError, Result};
use crate::parameter::{Scalar, UncertainValue};

// ============================================================================
// 1. AttributeValue — Null, plain scalar, or uncertain value
// ============================================================================

/// A single attribute as delivered by the attribute source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Present but unknown
    #[default]
    Null,
    /// Plain scalar or categorical value
    Scalar(Scalar),
    /// Value carrying an uncertainty envelope
    Uncertain(UncertainValue),
}

impl AttributeValue {
    /// Whether the value is `Null`
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// The plain scalar, if this is one
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            AttributeValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The uncertain value, if this is one
    pub fn as_uncertain(&self) -> Option<&UncertainValue> {
        match self {
            AttributeValue::Uncertain(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric value of a plain number
    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar().and_then(Scalar::as_f64)
    }

    /// Numeric value of a plain number, or the numeric preferred value of an envelope
    pub fn number(&self) -> Option<f64> {
        match self {
            AttributeValue::Scalar(s) => s.as_f64(),
            AttributeValue::Uncertain(v) => v.preferred.as_f64(),
            AttributeValue::Null => None,
        }
    }

    /// Text or numeric value rendered as an identifier (e.g. a section id)
    pub fn as_label(&self) -> Option<String> {
        match self {
            AttributeValue::Scalar(Scalar::Text(s)) => Some(s.clone()),
            AttributeValue::Scalar(Scalar::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Free text, if this is text
    pub fn as_text(&self) -> Option<String> {
        self.as_scalar().and_then(Scalar::as_str).map(str::to_string)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Scalar(s) => write!(f, "plain {} {}", s.kind(), s),
            AttributeValue::Uncertain(v) => write!(f, "uncertain {}", v),
        }
    }
}

impl From<Scalar> for AttributeValue {
    fn from(value: Scalar) -> Self {
        AttributeValue::Scalar(value)
    }
}

macro_rules! impl_from_plain {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    AttributeValue::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_from_plain!(f64, i32, bool, &str, String);

impl From<UncertainValue> for AttributeValue {
    fn from(value: UncertainValue) -> Self {
        AttributeValue::Uncertain(value)
    }
}

impl From<Option<Scalar>> for AttributeValue {
    fn from(value: Option<Scalar>) -> Self {
        value.map_or(AttributeValue::Null, AttributeValue::Scalar)
    }
}

// ============================================================================
// 2. AttributeMap — Fully keyed attribute mapping
// ============================================================================

/// Ordered mapping from schema keys to attribute values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap(BTreeMap<String, AttributeValue>);

impl AttributeMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a `Null` key (builder style)
    pub fn with_null(mut self, key: impl Into<String>) -> Self {
        self.insert(key, AttributeValue::Null);
        self
    }

    /// Insert or replace a key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove a key, returning its value
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.0.remove(key)
    }

    /// Look up a required key
    pub fn get(&self, key: &str) -> Result<&AttributeValue> {
        self.0.get(key).ok_or_else(|| FaultError::missing(key))
    }

    /// Look up a required key and clone its value
    pub fn value(&self, key: &str) -> Result<AttributeValue> {
        self.get(key).cloned()
    }

    /// Look up an optional key; absent and `Null` both read as `None`
    pub fn optional(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Look up a required key that must carry an uncertainty envelope
    pub fn uncertain(&self, key: &str) -> Result<UncertainValue> {
        require_uncertain(key, self.get(key)?)
    }

    /// Look up a required key holding text or an identifier; `Null` reads as
    /// `None`, any other non-label value fails with a type constraint
    pub fn label(&self, key: &str) -> Result<Option<String>> {
        match self.get(key)? {
            AttributeValue::Null => Ok(None),
            other => other
                .as_label()
                .map(Some)
                .ok_or_else(|| FaultError::expected(key, "text or a number", other)),
        }
    }
}

impl<K: Into<String>, V: Into<AttributeValue>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ============================================================================
// 3. require_uncertain — Envelope-required field assignment
// ============================================================================

/// Return the uncertain value unchanged, or fail with
/// [`FaultError::TypeConstraint`] naming `field` and the offending value.
pub fn require_uncertain(field: &str, value: &AttributeValue) -> Result<UncertainValue> {
    match value {
        AttributeValue::Uncertain(v) => Ok(v.clone()),
        other => Err(FaultError::type_constraint(field, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_uncertain_is_identity() {
        let value = UncertainValue::with_range("Rake", 90.0, 60.0, 120.0).unwrap();
        let out = require_uncertain("Rake", &value.clone().into()).unwrap();
        assert_eq!(out, value);
    }

    #[test]
    fn test_require_uncertain_rejects_plain_values() {
        for plain in [
            AttributeValue::Null,
            AttributeValue::from(90.0),
            AttributeValue::from("reverse"),
        ] {
            let err = require_uncertain("Rake", &plain).unwrap_err();
            assert!(matches!(err, FaultError::TypeConstraint { ref field, .. } if field == "Rake"));
        }
    }

    #[test]
    fn test_type_constraint_message_names_value() {
        let err = require_uncertain("Dip", &AttributeValue::from(45.0)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "type constraint: `Dip` requires an uncertain value, got plain number 45"
        );
    }

    #[test]
    fn test_absent_key_differs_from_null() {
        let map = AttributeMap::new().with_null("Notes");
        assert_eq!(map.get("Notes").unwrap(), &AttributeValue::Null);
        assert!(map.optional("Notes").is_none());
        assert_eq!(map.get("Scale").unwrap_err(), FaultError::missing("Scale"));
    }

    #[test]
    fn test_label_rejects_flags_and_envelopes() {
        let map = AttributeMap::new()
            .with("Notes", true)
            .with("Site Feature", UncertainValue::new(3.0))
            .with("Fault Section", 12)
            .with_null("Name");
        assert_eq!(
            map.label("Notes").unwrap_err(),
            FaultError::expected("Notes", "text or a number", "plain flag true")
        );
        assert!(matches!(
            map.label("Site Feature"),
            Err(FaultError::TypeConstraint { expected: "text or a number", .. })
        ));
        assert_eq!(map.label("Fault Section").unwrap().as_deref(), Some("12"));
        assert_eq!(map.label("Name").unwrap(), None);
    }

    #[test]
    fn test_number_reads_plain_or_preferred() {
        assert_eq!(AttributeValue::from(4.0).number(), Some(4.0));
        assert_eq!(AttributeValue::from(UncertainValue::new(7.5)).number(), Some(7.5));
        assert_eq!(AttributeValue::from("x").number(), None);
        assert_eq!(AttributeValue::Null.number(), None);
    }

    #[test]
    fn test_deserializes_mixed_values() {
        let map: AttributeMap = serde_json::from_value(serde_json::json!({
            "Scale": 25000,
            "Notes": null,
            "Rake": { "preferred": 90.0, "minimum": 80.0, "maximum": 100.0 },
            "Slip Category": "B"
        }))
        .unwrap();
        assert_eq!(map.get("Scale").unwrap().as_f64(), Some(25000.0));
        assert!(map.get("Notes").unwrap().is_null());
        assert!(map.uncertain("Rake").is_ok());
        assert_eq!(map.get("Slip Category").unwrap().as_text().as_deref(), Some("B"));
    }
}
