//! Invocation request envelope

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::BridgeError;

/// The top-level input document: event payload plus invocation metadata.
/// Parsed once from the fully-read input stream; immutable afterwards.
#[derive(Debug, Deserialize)]
pub struct InvocationRequest {
    #[serde(default)]
    pub event: Value,

    #[serde(default)]
    pub context: Map<String, Value>,
}

impl InvocationRequest {
    pub fn from_json(input: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(input).map_err(BridgeError::InvalidEnvelope)
    }
}
