//! Handler registration contract for the invoke bridge
//!
//! Handler artifacts are shared libraries that link against this crate and
//! export a single registration symbol returning a [`HandlerManifest`]. The
//! bridge loads the artifact, calls the symbol, and dispatches into the
//! registered entries. Both sides must be built with the same toolchain; the
//! manifest crosses the library boundary as plain Rust data.

pub mod context;
pub mod events;
pub mod registry;
pub mod shape;

pub use context::Context;
pub use registry::{
    HandlerEntry, HandlerError, HandlerFn, HandlerManifest, HandlerType, RegisterFn,
    REGISTER_SYMBOL,
};
pub use shape::{EventPayload, FieldKind, FieldSpec, PayloadShape};
