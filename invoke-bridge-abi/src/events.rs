//! Platform-defined event models
//!
//! Formal models for event shapes whose wire JSON diverges from the field
//! names below (e.g. `Records`, `s3SchemaVersion`, `x-amz-request-id`). The
//! bridge registers a per-type builder for each of these; handlers receive
//! the normalized form and deserialize it here.

use serde::{Deserialize, Serialize};

use crate::shape::{EventPayload, PayloadShape};

/// Mapper-table key for [`S3Event`].
pub const S3_EVENT_KEY: &str = "aws.s3.S3Event";

/// S3 bucket notification event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Event {
    #[serde(default)]
    pub records: Vec<S3EventRecord>,
}

impl EventPayload for S3Event {
    fn shape() -> PayloadShape {
        PayloadShape::Opaque { key: S3_EVENT_KEY }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3EventRecord {
    #[serde(default)]
    pub aws_region: String,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_source: String,
    #[serde(default)]
    pub event_time: String,
    #[serde(default)]
    pub event_version: String,
    #[serde(default)]
    pub request_parameters: S3RequestParameters,
    #[serde(default)]
    pub response_elements: S3ResponseElements,
    #[serde(default)]
    pub user_identity: S3UserIdentity,
    #[serde(default)]
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3RequestParameters {
    #[serde(default)]
    pub source_ip_address: String,
}

/// Wire form uses `x-amz-request-id` / `x-amz-id-2`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3ResponseElements {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub id2: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3UserIdentity {
    #[serde(default)]
    pub principal_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Entity {
    #[serde(default)]
    pub configuration_id: String,
    /// Wire form uses `s3SchemaVersion`.
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub bucket: S3Bucket,
    #[serde(default)]
    pub object: S3Object,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Bucket {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arn: String,
    #[serde(default)]
    pub owner_identity: S3UserIdentity,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Object {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default, rename = "eTag")]
    pub e_tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,
    #[serde(default)]
    pub sequencer: String,
}
