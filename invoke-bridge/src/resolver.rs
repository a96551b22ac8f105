//! Handler resolution
//!
//! Selects one entry point among everything a type registered under the
//! requested name. Selection order: largest arity first, then presence of a
//! trailing context parameter. Remaining ties resolve to the earliest
//! registered entry, which keeps resolution deterministic where overload
//! resolution in the source platform was ambiguous.

use invoke_bridge_abi::{HandlerEntry, HandlerType, PayloadShape};
use tracing::debug;

use crate::error::BridgeError;

pub fn resolve<'a>(
    handler_type: &'a HandlerType,
    handler_name: &str,
) -> Result<&'a HandlerEntry, BridgeError> {
    let candidates: Vec<&HandlerEntry> = handler_type
        .entries()
        .iter()
        .filter(|e| e.name() == handler_name)
        .collect();

    if candidates.is_empty() {
        return Err(BridgeError::HandlerNotFound {
            type_name: handler_type.name().to_string(),
            name: handler_name.to_string(),
        });
    }

    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        let better = (candidate.arity(), candidate.has_trailing_context())
            > (best.arity(), best.has_trailing_context());
        if better {
            best = candidate;
        }
    }

    // Stream-shaped entries consume the serialized raw payload; a non-raw
    // payload shape is a registration error. Only the selected entry is
    // validated, so a malformed sibling cannot block a well-formed winner.
    if best.is_stream() && !matches!(best.payload(), PayloadShape::Raw) {
        return Err(BridgeError::UnsupportedSignature(format!(
            "stream-shaped handler '{handler_name}' declares a non-raw payload shape"
        )));
    }

    debug!(
        handler = handler_name,
        arity = best.arity(),
        trailing_context = best.has_trailing_context(),
        stream = best.is_stream(),
        candidates = candidates.len(),
        "resolved handler"
    );

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoke_bridge_abi::{Context, HandlerError, HandlerEntry, HandlerType};
    use serde_json::Value;

    fn event_entry(name: &str, tag: &'static str) -> HandlerEntry {
        HandlerEntry::event(name, move |_: Value| Ok::<_, HandlerError>(tag))
    }

    fn context_entry(name: &str, tag: &'static str) -> HandlerEntry {
        HandlerEntry::event_with_context(name, move |_: Value, _: &Context| {
            Ok::<_, HandlerError>(tag)
        })
    }

    fn tag_of(entry: &HandlerEntry) -> Value {
        match entry.call() {
            invoke_bridge_abi::HandlerFn::Event(f) => f(Value::Null).unwrap(),
            invoke_bridge_abi::HandlerFn::EventContext(f) => {
                let ctx = Context {
                    function_name: String::new(),
                    function_version: String::new(),
                    log_group_name: String::new(),
                    log_stream_name: String::new(),
                    memory_limit_in_mb: 0,
                    aws_request_id: String::new(),
                    invoked_function_arn: String::new(),
                    deadline_ms: 0,
                };
                f(Value::Null, &ctx).unwrap()
            }
            invoke_bridge_abi::HandlerFn::Stream(_) => panic!("stream entry has no tag"),
        }
    }

    #[test]
    fn test_single_candidate_resolves() {
        let ty = HandlerType::new("demo.Hello").entry(event_entry("handleRequest", "only"));
        let entry = resolve(&ty, "handleRequest").unwrap();
        assert_eq!(entry.arity(), 1);
    }

    #[test]
    fn test_missing_name_is_handler_not_found() {
        let ty = HandlerType::new("demo.Hello").entry(event_entry("handleRequest", "only"));
        let err = resolve(&ty, "nope").unwrap_err();
        assert!(matches!(err, BridgeError::HandlerNotFound { .. }));
    }

    #[test]
    fn test_prefers_larger_arity() {
        let ty = HandlerType::new("demo.Hello")
            .entry(event_entry("handleRequest", "arity1"))
            .entry(context_entry("handleRequest", "arity2"));
        let entry = resolve(&ty, "handleRequest").unwrap();
        assert_eq!(entry.arity(), 2);
        assert_eq!(tag_of(entry), "arity2");
    }

    #[test]
    fn test_registration_order_breaks_remaining_ties() {
        let ty = HandlerType::new("demo.Hello")
            .entry(event_entry("handleRequest", "first"))
            .entry(event_entry("handleRequest", "second"));
        let entry = resolve(&ty, "handleRequest").unwrap();
        assert_eq!(tag_of(entry), "first");
    }

    #[test]
    fn test_stream_with_non_raw_shape_is_unsupported() {
        let entry = HandlerEntry::stream("pipe", |input, output, _ctx| {
            std::io::copy(input, output)?;
            Ok(())
        })
        .with_payload(PayloadShape::Opaque { key: "demo.Opaque" });
        let ty = HandlerType::new("demo.Hello").entry(entry);

        let err = resolve(&ty, "pipe").unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedSignature(_)));
    }

    #[test]
    fn test_malformed_sibling_does_not_block_well_formed_winner() {
        let ty = HandlerType::new("demo.Hello")
            .entry(HandlerEntry::stream("pipe", |input, output, _ctx| {
                std::io::copy(input, output)?;
                Ok(())
            }))
            .entry(
                HandlerEntry::stream("pipe", |input, output, _ctx| {
                    std::io::copy(input, output)?;
                    Ok(())
                })
                .with_payload(PayloadShape::Opaque { key: "demo.Opaque" }),
            );

        // Same arity and trailing-context status: the earlier, well-formed
        // registration wins and the malformed sibling is never consulted.
        let entry = resolve(&ty, "pipe").unwrap();
        assert!(matches!(entry.payload(), PayloadShape::Raw));
    }

    #[test]
    fn test_ignores_entries_with_other_names() {
        let ty = HandlerType::new("demo.Hello")
            .entry(context_entry("other", "other"))
            .entry(event_entry("handleRequest", "target"));
        let entry = resolve(&ty, "handleRequest").unwrap();
        assert_eq!(tag_of(entry), "target");
    }
}
