//! Execution context passed to the handler

/// Invocation context exposed to the handler, mirroring the Lambda
/// `Context` contract: identity, naming, logging and timing fields.
///
/// The deadline is fixed when the context is built; the remaining time is
/// recomputed on every read and never goes negative.
#[derive(Debug, Clone)]
pub struct Context {
    pub function_name: String,
    pub function_version: String,
    pub log_group_name: String,
    pub log_stream_name: String,
    pub memory_limit_in_mb: i32,
    pub aws_request_id: String,
    pub invoked_function_arn: String,
    pub deadline_ms: i64,
}

impl Context {
    /// Milliseconds left until the configured deadline, clamped at zero.
    pub fn get_remaining_time_in_millis(&self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        (self.deadline_ms - now).max(0)
    }
}
