//! Payload mapping strategies
//!
//! A closed set of strategies converts the untyped event payload into the
//! shape the resolved handler declares:
//!
//! - **Passthrough** for raw payloads (the event value is already the
//!   parameter).
//! - **Reflective** generic field assignment for structured payloads: each
//!   declared field present in the event map is coerced and copied; absent
//!   fields are left to the target's defaults.
//! - **Specific** per-type builders for shapes whose wire JSON diverges from
//!   the formal model. Builders live in a lookup table keyed by target-type
//!   identity, built once at process start and immutable afterwards. A
//!   structured shape falls back to reflective mapping when no builder is
//!   registered; an opaque shape without a builder has no strategy at all.

use std::collections::HashMap;

use invoke_bridge_abi::events::S3_EVENT_KEY;
use invoke_bridge_abi::{FieldKind, FieldSpec, PayloadShape};
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::BridgeError;

/// A per-type builder: loose wire JSON in, normalized formal model out.
pub type SpecificBuilder = fn(&Value) -> Result<Value, BridgeError>;

/// Immutable strategy table, keyed by target-type identity.
pub struct MapperRegistry {
    builders: HashMap<&'static str, SpecificBuilder>,
}

impl MapperRegistry {
    /// The table with all built-in per-type builders registered.
    pub fn with_builtin_builders() -> Self {
        let mut builders: HashMap<&'static str, SpecificBuilder> = HashMap::new();
        builders.insert(S3_EVENT_KEY, build_s3_event);
        Self { builders }
    }

    /// Select the mapping strategy for a declared payload shape.
    pub fn mapper_for(&self, shape: PayloadShape) -> Result<Mapper, BridgeError> {
        match shape {
            PayloadShape::Raw => Ok(Mapper::Passthrough),
            PayloadShape::Structured { key, fields } => Ok(self
                .builders
                .get(key)
                .map(|b| Mapper::Specific(key, *b))
                .unwrap_or(Mapper::Reflective(key, fields))),
            PayloadShape::Opaque { key } => self
                .builders
                .get(key)
                .map(|b| Mapper::Specific(key, *b))
                .ok_or_else(|| BridgeError::NoMapperApplicable(key.to_string())),
        }
    }
}

/// A chosen conversion strategy.
#[derive(Debug)]
pub enum Mapper {
    Passthrough,
    Reflective(&'static str, &'static [FieldSpec]),
    Specific(&'static str, SpecificBuilder),
}

impl Mapper {
    /// Convert the event payload into the target parameter value.
    pub fn map(&self, event: &Value) -> Result<Value, BridgeError> {
        match self {
            Self::Passthrough => Ok(event.clone()),
            Self::Reflective(key, fields) => {
                debug!(target_type = key, "mapping event via field assignment");
                map_reflective(fields, event)
            }
            Self::Specific(key, builder) => {
                debug!(target_type = key, "mapping event via per-type builder");
                builder(event)
            }
        }
    }
}

/// Generic field assignment: exact case-sensitive key match against the
/// declared field list, primitive coercion per field kind. Keys in the event
/// with no matching field are ignored; declared fields absent from the event
/// are omitted so the target's defaults apply.
fn map_reflective(fields: &[FieldSpec], event: &Value) -> Result<Value, BridgeError> {
    let empty = Map::new();
    let source = event.as_object().unwrap_or(&empty);

    let mut target = Map::new();
    for spec in fields {
        if let Some(value) = source.get(spec.name) {
            target.insert(spec.name.to_string(), coerce(spec, value)?);
        }
    }
    Ok(Value::Object(target))
}

fn coerce(spec: &FieldSpec, value: &Value) -> Result<Value, BridgeError> {
    let fail = |expected: &str| BridgeError::FieldAssignmentFailure {
        field: spec.name.to_string(),
        cause: format!("expected {expected}, got {value}"),
    };

    match spec.kind {
        FieldKind::Any => Ok(value.clone()),
        FieldKind::Bool => value
            .as_bool()
            .map(Value::from)
            .ok_or_else(|| fail("boolean")),
        FieldKind::Text => value
            .as_str()
            .map(Value::from)
            .ok_or_else(|| fail("string")),
        FieldKind::Double => value
            .as_f64()
            .map(Value::from)
            .ok_or_else(|| fail("number")),
        // Integral values are accepted for both fixed-width and wide fields.
        FieldKind::Long => value
            .as_i64()
            .map(Value::from)
            .ok_or_else(|| fail("integer")),
        FieldKind::Int => match value.as_i64() {
            Some(n) if i32::try_from(n).is_ok() => Ok(Value::from(n)),
            Some(_) => Err(fail("32-bit integer in range")),
            None => Err(fail("integer")),
        },
    }
}

/// Builder for the S3 notification event. The wire form nests records under
/// `Records` with field names that diverge from the formal model
/// (`s3SchemaVersion`, `eTag`, `x-amz-request-id`, ...), so each nested
/// record is constructed explicitly by literal key rather than generically.
fn build_s3_event(event: &Value) -> Result<Value, BridgeError> {
    let records: Vec<Value> = event
        .get("Records")
        .and_then(Value::as_array)
        .map(|records| records.iter().map(build_s3_record).collect())
        .unwrap_or_default();

    Ok(json!({ "records": records }))
}

fn build_s3_record(record: &Value) -> Value {
    let s3 = &record["s3"];
    let bucket = &s3["bucket"];
    let object = &s3["object"];

    json!({
        "awsRegion": str_at(record, "awsRegion"),
        "eventName": str_at(record, "eventName"),
        "eventSource": str_at(record, "eventSource"),
        "eventTime": str_at(record, "eventTime"),
        "eventVersion": str_at(record, "eventVersion"),
        "requestParameters": {
            "sourceIpAddress": str_at(&record["requestParameters"], "sourceIPAddress"),
        },
        "responseElements": {
            "requestId": str_at(&record["responseElements"], "x-amz-request-id"),
            "id2": str_at(&record["responseElements"], "x-amz-id-2"),
        },
        "userIdentity": {
            "principalId": str_at(&record["userIdentity"], "principalId"),
        },
        "s3": {
            "configurationId": str_at(s3, "configurationId"),
            "schemaVersion": str_at(s3, "s3SchemaVersion"),
            "bucket": {
                "name": str_at(bucket, "name"),
                "arn": str_at(bucket, "arn"),
                "ownerIdentity": {
                    "principalId": str_at(&bucket["ownerIdentity"], "principalId"),
                },
            },
            "object": {
                "key": str_at(object, "key"),
                "size": object.get("size").and_then(Value::as_i64).unwrap_or(0),
                "eTag": str_at(object, "eTag"),
                "versionId": object.get("versionId").and_then(Value::as_str),
                "sequencer": str_at(object, "sequencer"),
            },
        },
    })
}

fn str_at<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}
