//! Handler manifest and typed registration adapters
//!
//! An artifact exports [`REGISTER_SYMBOL`] with the [`RegisterFn`] signature
//! and returns a [`HandlerManifest`]: the set of handler types it contains,
//! each with one or more named entry points. The typed adapter constructors
//! on [`HandlerEntry`] capture the entry's calling convention (arity,
//! trailing context, stream shape) and payload shape as data, so the bridge
//! can resolve and dispatch without inspecting the function itself.

use std::io::{Read, Write};

use serde::Serialize;
use serde_json::Value;

use crate::context::Context;
use crate::shape::{EventPayload, PayloadShape};

/// Symbol every handler artifact must export.
pub const REGISTER_SYMBOL: &[u8] = b"invoke_bridge_register";

/// Signature of the registration symbol.
pub type RegisterFn = fn() -> HandlerManifest;

/// Error type handler bodies return; the bridge reports the full cause chain.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A bound entry point, erased to one of the three calling conventions.
pub enum HandlerFn {
    /// Arity 1: `(event)`.
    Event(Box<dyn Fn(Value) -> Result<Value, HandlerError> + Send + Sync>),
    /// Arity 2: `(event, context)`.
    EventContext(Box<dyn Fn(Value, &Context) -> Result<Value, HandlerError> + Send + Sync>),
    /// Arity 3, stream-shaped: `(input, output, context)`.
    Stream(
        Box<
            dyn Fn(&mut dyn Read, &mut dyn Write, &Context) -> Result<(), HandlerError>
                + Send
                + Sync,
        >,
    ),
}

/// A named entry point with its declared payload shape.
pub struct HandlerEntry {
    name: String,
    payload: PayloadShape,
    call: HandlerFn,
}

impl HandlerEntry {
    /// Register an arity-1 handler: event only.
    pub fn event<T, R, F>(name: impl Into<String>, f: F) -> Self
    where
        T: EventPayload,
        R: Serialize,
        F: Fn(T) -> Result<R, HandlerError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            payload: T::shape(),
            call: HandlerFn::Event(Box::new(move |value| {
                let payload: T = serde_json::from_value(value)?;
                Ok(serde_json::to_value(f(payload)?)?)
            })),
        }
    }

    /// Register an arity-2 handler: event plus trailing context.
    pub fn event_with_context<T, R, F>(name: impl Into<String>, f: F) -> Self
    where
        T: EventPayload,
        R: Serialize,
        F: Fn(T, &Context) -> Result<R, HandlerError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            payload: T::shape(),
            call: HandlerFn::EventContext(Box::new(move |value, ctx| {
                let payload: T = serde_json::from_value(value)?;
                Ok(serde_json::to_value(f(payload, ctx)?)?)
            })),
        }
    }

    /// Register an arity-3 stream-shaped handler: the event arrives as
    /// serialized bytes and the result is whatever the handler writes to the
    /// output sink. Stream handlers always take the raw payload.
    pub fn stream<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&mut dyn Read, &mut dyn Write, &Context) -> Result<(), HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            payload: PayloadShape::Raw,
            call: HandlerFn::Stream(Box::new(f)),
        }
    }

    /// Override the declared payload shape, e.g. to request a registered
    /// per-type normalization for an entry that takes the payload as a raw
    /// `Value`. Stream-shaped entries must keep the raw shape.
    pub fn with_payload(mut self, payload: PayloadShape) -> Self {
        self.payload = payload;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> PayloadShape {
        self.payload
    }

    pub fn call(&self) -> &HandlerFn {
        &self.call
    }

    /// Parameter count of the underlying calling convention.
    pub fn arity(&self) -> usize {
        match self.call {
            HandlerFn::Event(_) => 1,
            HandlerFn::EventContext(_) => 2,
            HandlerFn::Stream(_) => 3,
        }
    }

    pub fn has_trailing_context(&self) -> bool {
        matches!(self.call, HandlerFn::EventContext(_) | HandlerFn::Stream(_))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self.call, HandlerFn::Stream(_))
    }
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .field("has_trailing_context", &self.has_trailing_context())
            .field("is_stream", &self.is_stream())
            .field("payload", &self.payload)
            .finish()
    }
}

/// A handler type: the named unit the harness addresses via `className`.
#[derive(Debug)]
pub struct HandlerType {
    name: String,
    entries: Vec<HandlerEntry>,
}

impl HandlerType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add an entry point. Registration order is significant: it is the
    /// documented tie-break when resolution is otherwise ambiguous.
    pub fn entry(mut self, entry: HandlerEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[HandlerEntry] {
        &self.entries
    }
}

/// Everything an artifact registers at load time.
#[derive(Debug, Default)]
pub struct HandlerManifest {
    types: Vec<HandlerType>,
}

impl HandlerManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler_type: HandlerType) {
        self.types.push(handler_type);
    }

    pub fn get(&self, type_name: &str) -> Option<&HandlerType> {
        self.types.iter().find(|t| t.name() == type_name)
    }

    pub fn types(&self) -> &[HandlerType] {
        &self.types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_adapter_arity_and_shape() {
        let entry = HandlerEntry::event("handleRequest", |event: Value| {
            Ok::<_, HandlerError>(event)
        });
        assert_eq!(entry.arity(), 1);
        assert!(!entry.has_trailing_context());
        assert!(!entry.is_stream());
        assert!(matches!(entry.payload(), PayloadShape::Raw));
    }

    #[test]
    fn test_event_with_context_adapter_arity() {
        let entry = HandlerEntry::event_with_context("handleRequest", |_: Value, ctx: &Context| {
            Ok::<_, HandlerError>(ctx.function_name.clone())
        });
        assert_eq!(entry.arity(), 2);
        assert!(entry.has_trailing_context());
    }

    #[test]
    fn test_stream_adapter_is_stream_shaped() {
        let entry = HandlerEntry::stream("echo", |input, output, _ctx| {
            std::io::copy(input, output)?;
            Ok(())
        });
        assert_eq!(entry.arity(), 3);
        assert!(entry.is_stream());
        assert!(entry.has_trailing_context());
    }

    #[test]
    fn test_event_adapter_deserializes_payload() {
        #[derive(serde::Deserialize)]
        struct Greeting {
            name: String,
        }
        impl EventPayload for Greeting {
            fn shape() -> PayloadShape {
                PayloadShape::Raw
            }
        }

        let entry = HandlerEntry::event("greet", |g: Greeting| {
            Ok::<_, HandlerError>(format!("hi {}", g.name))
        });
        let HandlerFn::Event(f) = entry.call() else {
            panic!("expected event convention");
        };
        let out = f(json!({"name": "world"})).unwrap();
        assert_eq!(out, json!("hi world"));
    }

    #[test]
    fn test_manifest_lookup_by_type_name() {
        let mut manifest = HandlerManifest::new();
        manifest.register(HandlerType::new("demo.Hello").entry(HandlerEntry::event(
            "handleRequest",
            |event: Value| Ok::<_, HandlerError>(event),
        )));

        assert!(manifest.get("demo.Hello").is_some());
        assert!(manifest.get("demo.Missing").is_none());
    }
}
