/// Rotator v1 — Event Definitions
///
/// Events are pure data. They carry intent and payload only.
/// They contain ZERO transition logic.
///
/// Schema version is locked at 1. Events with schema_version != 1
/// are rejected by the engine.
///
/// Event types:
///   configure    — mandatory first event; carries the raw attributes
///   tick         — rotation timer fired
///   page_hidden  — tab switched away / minimized
///   page_visible — tab visible again

use serde_json::Value;

/// Schema version for v1 engine events. Hardcoded, never changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Event envelope wrapping a typed payload.
#[derive(Debug, Clone)]
pub struct EventEnvelope {
    pub event_type: String,
    pub sequence: u64,
    pub timestamp: String,
    pub logical_time: u64,
    pub payload: Value,
    pub schema_version: u32,
}

impl EventEnvelope {
    fn new(event_type: &str, sequence: u64, logical_time: u64, payload: Value) -> Self {
        Self {
            event_type: event_type.to_string(),
            sequence,
            timestamp: String::new(),
            logical_time,
            payload,
            schema_version: SCHEMA_VERSION,
        }
    }

    /// The mandatory first event. `interval_attr = None` is encoded as
    /// an empty string; parsing treats both as absent.
    pub fn configure(
        sequence: u64,
        logical_time: u64,
        images_attr: &str,
        interval_attr: Option<&str>,
        reduced_motion: bool,
    ) -> Self {
        Self::new(
            "configure",
            sequence,
            logical_time,
            serde_json::json!({
                "images_attr": images_attr,
                "interval_attr": interval_attr.unwrap_or(""),
                "reduced_motion": reduced_motion,
            }),
        )
    }

    pub fn tick(sequence: u64, logical_time: u64) -> Self {
        Self::new("tick", sequence, logical_time, serde_json::json!({}))
    }

    pub fn page_hidden(sequence: u64, logical_time: u64) -> Self {
        Self::new("page_hidden", sequence, logical_time, serde_json::json!({}))
    }

    pub fn page_visible(sequence: u64, logical_time: u64) -> Self {
        Self::new("page_visible", sequence, logical_time, serde_json::json!({}))
    }

    /// Convert to a serde_json::Value for the state's event history.
    pub fn to_dict(&self) -> Value {
        serde_json::json!({
            "event_type": self.event_type,
            "timestamp": self.timestamp,
            "sequence": self.sequence,
            "logical_time": self.logical_time,
            "payload": self.payload,
        })
    }

    /// Parse an EventEnvelope from a serde_json::Value (for loading test fixtures).
    pub fn from_value(v: &Value) -> Self {
        Self {
            event_type: v["event_type"].as_str().unwrap_or("").to_string(),
            sequence: v["sequence"].as_u64().unwrap_or(0),
            timestamp: v["timestamp"].as_str().unwrap_or("").to_string(),
            logical_time: v["logical_time"].as_u64().unwrap_or(0),
            payload: v["payload"].clone(),
            schema_version: v
                .get("schema_version")
                .and_then(|v| v.as_u64())
                .unwrap_or(SCHEMA_VERSION as u64) as u32,
        }
    }
}
