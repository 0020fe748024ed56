//! Proto ↔ Engine conversion bridge.
//!
//! Converts between protobuf wire types (proto_types.rs) and the
//! engine's EventEnvelope (which uses serde_json::Value payloads).
//!
//! CRITICAL: The JSON payload structure must exactly match what
//! the engine's transitions.rs expects to read.

use rotator_engine::events::{EventEnvelope, SCHEMA_VERSION};
use serde_json::json;

use crate::proto_types::{
    Configure, EventKind, PageHidden, PageVisible, ProtoEvent, ProtoEventEnvelope, Tick,
};

/// Convert a protobuf EventEnvelope to the engine's EventEnvelope.
///
/// The engine dispatches on the `event_type` string and reads fields
/// from the `payload` JSON Value. The wire format does not carry a
/// timestamp; the engine's canonical hash excludes it anyway.
pub fn proto_to_engine(proto: &ProtoEventEnvelope) -> EventEnvelope {
    let event = proto
        .event
        .as_ref()
        .expect("ProtoEventEnvelope has no event");
    let kind = event.kind.as_ref().expect("ProtoEvent has no kind");

    let (event_type, payload) = match kind {
        EventKind::Configure(c) => (
            "configure",
            json!({
                "images_attr": c.images_attr,
                "interval_attr": c.interval_attr,
                "reduced_motion": c.reduced_motion,
            }),
        ),
        EventKind::Tick(_) => ("tick", json!({})),
        EventKind::PageHidden(_) => ("page_hidden", json!({})),
        EventKind::PageVisible(_) => ("page_visible", json!({})),
    };

    EventEnvelope {
        event_type: event_type.to_string(),
        sequence: proto.sequence,
        timestamp: String::new(),
        logical_time: proto.logical_time,
        payload,
        schema_version: SCHEMA_VERSION,
    }
}

/// Convert an engine EventEnvelope to the protobuf wire type.
///
/// Panics on unknown event types — the engine would have rejected
/// them before they ever reach the store.
pub fn engine_to_proto(event: &EventEnvelope) -> ProtoEventEnvelope {
    let p = &event.payload;

    let kind = match event.event_type.as_str() {
        "configure" => EventKind::Configure(Configure {
            images_attr: p
                .get("images_attr")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            interval_attr: p
                .get("interval_attr")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            reduced_motion: p
                .get("reduced_motion")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        }),
        "tick" => EventKind::Tick(Tick {}),
        "page_hidden" => EventKind::PageHidden(PageHidden {}),
        "page_visible" => EventKind::PageVisible(PageVisible {}),
        other => panic!("Unknown event type for wire encoding: {}", other),
    };

    ProtoEventEnvelope {
        sequence: event.sequence,
        logical_time: event.logical_time,
        event: Some(ProtoEvent { kind: Some(kind) }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_round_trip() {
        let evt = EventEnvelope::configure(1, 0, "a.jpg, b.jpg", Some("3000"), true);
        let back = proto_to_engine(&engine_to_proto(&evt));
        assert_eq!(back.event_type, "configure");
        assert_eq!(back.sequence, 1);
        assert_eq!(back.payload["images_attr"], "a.jpg, b.jpg");
        assert_eq!(back.payload["interval_attr"], "3000");
        assert_eq!(back.payload["reduced_motion"], true);
    }

    #[test]
    fn test_empty_interval_means_absent() {
        let evt = EventEnvelope::configure(1, 0, "a.jpg", None, false);
        let back = proto_to_engine(&engine_to_proto(&evt));
        assert_eq!(back.payload["interval_attr"], "");
    }

    #[test]
    fn test_marker_events_round_trip() {
        for evt in [
            EventEnvelope::tick(5, 1200),
            EventEnvelope::page_hidden(6, 1300),
            EventEnvelope::page_visible(7, 1400),
        ] {
            let back = proto_to_engine(&engine_to_proto(&evt));
            assert_eq!(back.event_type, evt.event_type);
            assert_eq!(back.sequence, evt.sequence);
            assert_eq!(back.logical_time, evt.logical_time);
        }
    }
}
