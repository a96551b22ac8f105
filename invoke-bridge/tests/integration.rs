//! End-to-end tests driving the bridge against the real demo artifact
//!
//! The `hello-handler` workspace member is built as a shared library next to
//! this test binary; each test runs the full pipeline: envelope parse,
//! artifact load, resolution, mapping, invocation, rendering.

use std::path::PathBuf;

use invoke_bridge::mapper::MapperRegistry;
use invoke_bridge::{run, BridgeConfig, BridgeError};

// The dev-dependency on the demo crate is what forces cargo to build its
// shared library alongside this suite; the tests load it via dlopen only.
use hello_handler as _;

/// Locate the demo artifact relative to the test executable
/// (`target/<profile>/deps/..` -> `target/<profile>/`).
fn artifact_path() -> PathBuf {
    let exe = std::env::current_exe().expect("test executable path");
    let profile_dir = exe
        .parent()
        .and_then(|deps| deps.parent())
        .expect("target profile directory");

    let file = format!(
        "{}hello_handler{}",
        std::env::consts::DLL_PREFIX,
        std::env::consts::DLL_SUFFIX
    );
    let path = profile_dir.join(file);
    assert!(
        path.exists(),
        "demo artifact not found at {} (is the hello-handler member built?)",
        path.display()
    );
    path
}

fn config(class_name: &str, handler_name: &str) -> BridgeConfig {
    BridgeConfig {
        artifact_path: artifact_path(),
        class_name: class_name.to_string(),
        handler_name: handler_name.to_string(),
    }
}

fn invoke(class_name: &str, handler_name: &str, input: &str) -> Result<Option<String>, BridgeError> {
    let mappers = MapperRegistry::with_builtin_builders();
    run(&config(class_name, handler_name), &mappers, input)
}

#[test]
fn test_hi_world_scenario() {
    let output = invoke(
        "demo.Hello",
        "handleRequest",
        r#"{"event":{"name":"world"},"context":{}}"#,
    )
    .unwrap();
    // The arity-2 overload wins resolution over the arity-1 one.
    assert_eq!(output.as_deref(), Some("hi world"));
}

#[test]
fn test_context_defaults_apply_when_absent() {
    let output = invoke("demo.Hello", "handleRequest", r#"{"event":{}}"#).unwrap();
    assert_eq!(output.as_deref(), Some("hi there"));
}

#[test]
fn test_negative_timeout_reads_zero_remaining() {
    let output = invoke(
        "demo.Hello",
        "remainingTime",
        r#"{"event":{},"context":{"timeout":-1}}"#,
    )
    .unwrap();
    assert_eq!(output.as_deref(), Some("0"));
}

#[test]
fn test_typed_handler_maps_structured_payload() {
    let output = invoke("demo.Counter", "tally", r#"{"event":{"count":4},"context":{}}"#).unwrap();
    assert_eq!(output.as_deref(), Some("8"));
}

#[test]
fn test_stream_handler_captures_written_bytes() {
    let output = invoke(
        "demo.Hello",
        "echo",
        r#"{"event":{"msg":"abc"},"context":{}}"#,
    )
    .unwrap();
    assert_eq!(output.as_deref(), Some(r#"{"msg":"abc"}"#));
}

#[test]
fn test_unknown_handler_is_handler_not_found() {
    let err = invoke("demo.Hello", "nope", r#"{"event":{},"context":{}}"#).unwrap_err();
    assert!(matches!(err, BridgeError::HandlerNotFound { .. }));
    assert!(err.to_string().contains("HandlerNotFound"));
}

#[test]
fn test_unknown_type_is_type_not_found() {
    let err = invoke("demo.Missing", "handleRequest", r#"{"event":{}}"#).unwrap_err();
    assert!(matches!(err, BridgeError::TypeNotFound(_)));
}

#[test]
fn test_bad_field_value_names_the_field() {
    let err = invoke(
        "demo.Counter",
        "tally",
        r#"{"event":{"count":"three"},"context":{}}"#,
    )
    .unwrap_err();
    match err {
        BridgeError::FieldAssignmentFailure { field, .. } => assert_eq!(field, "count"),
        other => panic!("expected FieldAssignmentFailure, got {other}"),
    }
}

#[test]
fn test_missing_artifact_is_artifact_not_found() {
    let mappers = MapperRegistry::with_builtin_builders();
    let config = BridgeConfig {
        artifact_path: PathBuf::from("/nonexistent/handler.so"),
        class_name: "demo.Hello".to_string(),
        handler_name: "handleRequest".to_string(),
    };
    let err = run(&config, &mappers, r#"{"event":{}}"#).unwrap_err();
    assert!(matches!(err, BridgeError::ArtifactNotFound { .. }));
}

#[test]
fn test_malformed_envelope_fails_before_loading() {
    let err = invoke("demo.Hello", "handleRequest", "not json").unwrap_err();
    assert!(matches!(err, BridgeError::InvalidEnvelope(_)));
}
