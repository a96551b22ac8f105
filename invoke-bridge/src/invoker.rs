//! Handler dispatch and result capture

use std::io::Cursor;

use bytes::Bytes;
use invoke_bridge_abi::{Context, HandlerEntry, HandlerError, HandlerFn};
use serde_json::Value;
use tracing::debug;

use crate::error::BridgeError;

/// The outcome of one invocation: a returned value or the bytes the handler
/// wrote to the output sink. Mutually exclusive, selected by the entry's
/// calling convention.
#[derive(Debug)]
pub enum InvocationOutput {
    Value(Value),
    Captured(Bytes),
}

/// Dispatch the call according to the resolved calling convention.
///
/// Stream-shaped entries read the serialized mapped payload and write to a
/// fresh sink; whatever they return is ignored and the sink's final bytes
/// are the result.
pub fn invoke(
    entry: &HandlerEntry,
    payload: Value,
    context: &Context,
) -> Result<InvocationOutput, BridgeError> {
    debug!(
        handler = entry.name(),
        arity = entry.arity(),
        request_id = %context.aws_request_id,
        "invoking handler"
    );

    match entry.call() {
        HandlerFn::Event(f) => f(payload)
            .map(InvocationOutput::Value)
            .map_err(runtime_error),
        HandlerFn::EventContext(f) => f(payload, context)
            .map(InvocationOutput::Value)
            .map_err(runtime_error),
        HandlerFn::Stream(f) => {
            let mut input = Cursor::new(payload.to_string().into_bytes());
            let mut sink: Vec<u8> = Vec::new();
            f(&mut input, &mut sink, context).map_err(runtime_error)?;
            Ok(InvocationOutput::Captured(Bytes::from(sink)))
        }
    }
}

/// Serialize the outcome for the output stream. `None` means the handler
/// produced no output at all.
pub fn render(output: &InvocationOutput) -> Option<String> {
    match output {
        InvocationOutput::Value(Value::Null) => None,
        // A string result is emitted in its natural form, unquoted.
        InvocationOutput::Value(Value::String(s)) => Some(s.clone()),
        InvocationOutput::Value(value) => Some(value.to_string()),
        InvocationOutput::Captured(bytes) if bytes.is_empty() => None,
        InvocationOutput::Captured(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn runtime_error(err: HandlerError) -> BridgeError {
    // Flatten the cause chain into the diagnostic.
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    BridgeError::HandlerRuntimeError(message)
}
