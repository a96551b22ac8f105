//! Execution context construction
//!
//! Builds the context object handed to the handler from the envelope's
//! context map. Identity, ARN and log-stream fields are synthesized
//! deterministically from the function name; only the request id is fresh
//! per invocation. These are harness fabrications, not platform values.

use chrono::Utc;
use invoke_bridge_abi::Context;
use serde_json::{Map, Value};
use uuid::Uuid;

pub const DEFAULT_FUNCTION_NAME: &str = "functionName";
pub const DEFAULT_FUNCTION_VERSION: &str = "LATEST";
pub const DEFAULT_LOG_GROUP: &str = "logGroup";
pub const DEFAULT_TIMEOUT_SECONDS: f64 = 5.0;
pub const DEFAULT_MEMORY_LIMIT_MB: i32 = 128;

/// Build the execution context from the envelope's context map, applying
/// defaults for absent fields. The deadline is absolute epoch millis fixed
/// here; remaining time is recomputed on every read by the context itself.
pub fn build_context(map: &Map<String, Value>) -> Context {
    let name = map
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_FUNCTION_NAME);
    let version = map
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_FUNCTION_VERSION);
    let log_group_name = map
        .get("logGroupName")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LOG_GROUP);
    let timeout_seconds = map
        .get("timeout")
        .and_then(Value::as_f64)
        .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

    let deadline_ms = Utc::now().timestamp_millis() + (timeout_seconds * 1000.0) as i64;

    Context {
        function_name: name.to_string(),
        function_version: version.to_string(),
        log_group_name: log_group_name.to_string(),
        log_stream_name: format!("[{version}]{name}"),
        memory_limit_in_mb: DEFAULT_MEMORY_LIMIT_MB,
        aws_request_id: Uuid::new_v4().to_string(),
        invoked_function_arn: format!(
            "arn:aws:lambda:us-east-1:000000000000:function:{name}"
        ),
        deadline_ms,
    }
}
