//! Single-shot local function-invocation bridge
//!
//! Loads a compiled handler artifact, resolves the requested entry point,
//! maps the JSON event payload into the entry point's declared parameter
//! shape, builds an execution context, invokes the handler synchronously,
//! and renders the result. One invocation per process; every failure is
//! terminal.

pub mod context;
pub mod envelope;
pub mod error;
pub mod invoker;
pub mod loader;
pub mod mapper;
pub mod resolver;

use std::path::PathBuf;

use tracing::debug;

pub use crate::error::BridgeError;
use crate::mapper::MapperRegistry;

/// What to load and which member to call; supplied by the outer harness.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub artifact_path: PathBuf,
    pub class_name: String,
    pub handler_name: String,
}

/// Run one invocation end to end: parse the envelope, load the artifact,
/// resolve and map, invoke, render. Returns the rendered output, or `None`
/// when the handler produced no output.
pub fn run(
    config: &BridgeConfig,
    mappers: &MapperRegistry,
    input: &str,
) -> Result<Option<String>, BridgeError> {
    let request = envelope::InvocationRequest::from_json(input)?;
    let context = context::build_context(&request.context);
    debug!(
        function = %context.function_name,
        request_id = %context.aws_request_id,
        "built execution context"
    );

    let artifact = loader::Artifact::load(&config.artifact_path)?;
    let handler_type = artifact.resolve_type(&config.class_name)?;
    let entry = resolver::resolve(handler_type, &config.handler_name)?;

    let mapped = mappers.mapper_for(entry.payload())?.map(&request.event)?;
    let output = invoker::invoke(entry, mapped, &context)?;

    Ok(invoker::render(&output))
}
