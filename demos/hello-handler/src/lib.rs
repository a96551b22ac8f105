//! Sample handler artifact
//!
//! Registers a few handler types covering the three calling conventions.
//! The bridge loads this library and calls [`invoke_bridge_register`].

use invoke_bridge_abi::{
    Context, EventPayload, FieldKind, FieldSpec, HandlerEntry, HandlerError, HandlerManifest,
    HandlerType, PayloadShape,
};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CountRequest {
    count: i32,
}

static COUNT_FIELDS: &[FieldSpec] = &[FieldSpec::new("count", FieldKind::Int)];

impl EventPayload for CountRequest {
    fn shape() -> PayloadShape {
        PayloadShape::Structured {
            key: "demo.CountRequest",
            fields: COUNT_FIELDS,
        }
    }
}

#[no_mangle]
pub fn invoke_bridge_register() -> HandlerManifest {
    let mut manifest = HandlerManifest::new();

    manifest.register(
        HandlerType::new("demo.Hello")
            // Arity-1 overload; resolution should prefer the arity-2 entry.
            .entry(HandlerEntry::event("handleRequest", |event: Value| {
                let name = event
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or("there")
                    .to_string();
                Ok::<_, HandlerError>(format!("hello {name}"))
            }))
            .entry(HandlerEntry::event_with_context(
                "handleRequest",
                |event: Map<String, Value>, _ctx: &Context| {
                    let name = event
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("there")
                        .to_string();
                    Ok::<_, HandlerError>(format!("hi {name}"))
                },
            ))
            .entry(HandlerEntry::event_with_context(
                "remainingTime",
                |_: Value, ctx: &Context| {
                    Ok::<_, HandlerError>(ctx.get_remaining_time_in_millis())
                },
            ))
            .entry(HandlerEntry::stream("echo", |input, output, _ctx| {
                let mut body = Vec::new();
                input.read_to_end(&mut body)?;
                output.write_all(&body)?;
                Ok(())
            })),
    );

    manifest.register(
        HandlerType::new("demo.Counter").entry(HandlerEntry::event(
            "tally",
            |request: CountRequest| Ok::<_, HandlerError>(request.count * 2),
        )),
    );

    manifest
}
