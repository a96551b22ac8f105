//! Payload shape contracts
//!
//! There is no runtime reflection to inspect a handler's parameter type, so
//! every event payload type declares its shape up front. The bridge's mapper
//! registry selects a conversion strategy from the shape alone: raw payloads
//! pass through untouched, structured payloads get generic field assignment,
//! and opaque payloads require a per-type builder registered in the bridge.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Primitive kind of a declared payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    /// 32-bit integer; integral JSON numbers are range-checked.
    Int,
    /// 64-bit integer; accepts any integral JSON number.
    Long,
    Double,
    Text,
    /// Any JSON value, passed through unchanged.
    Any,
}

/// One writable field of a structured payload type.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Declared shape of a handler's event parameter.
#[derive(Debug, Clone, Copy)]
pub enum PayloadShape {
    /// A generic JSON value/map; the event passes through unmapped.
    Raw,
    /// A flat value type with enumerable writable fields, keyed by a stable
    /// type identity.
    Structured {
        key: &'static str,
        fields: &'static [FieldSpec],
    },
    /// A type with no structural contract; only a builder registered under
    /// `key` in the bridge's mapper table can produce it.
    Opaque { key: &'static str },
}

impl PayloadShape {
    /// Stable type identity, if the shape carries one.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::Raw => None,
            Self::Structured { key, .. } | Self::Opaque { key } => Some(key),
        }
    }
}

/// Types usable as a handler's event parameter.
pub trait EventPayload: DeserializeOwned {
    fn shape() -> PayloadShape;
}

impl EventPayload for Value {
    fn shape() -> PayloadShape {
        PayloadShape::Raw
    }
}

impl EventPayload for Map<String, Value> {
    fn shape() -> PayloadShape {
        PayloadShape::Raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_shape_has_no_key() {
        assert!(<Value as EventPayload>::shape().key().is_none());
        assert!(<Map<String, Value> as EventPayload>::shape().key().is_none());
    }

    #[test]
    fn test_structured_shape_key() {
        static FIELDS: &[FieldSpec] = &[FieldSpec::new("count", FieldKind::Int)];
        let shape = PayloadShape::Structured {
            key: "demo.Count",
            fields: FIELDS,
        };
        assert_eq!(shape.key(), Some("demo.Count"));
    }
}
