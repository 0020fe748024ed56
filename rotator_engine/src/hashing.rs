/// Rotator v1 — Canonical Hashing
///
/// Deterministic canonical serialization + SHA-256 hashing.
/// Produces byte-identical output across platforms.
///
/// Rules:
///   - engine_version first (identity binding)
///   - fixed field order, layers in slot order
///   - event_history excluded (timestamps are not state)
///   - UTF-8 JSON, no whitespace, no float, no platform newline

use sha2::{Digest, Sha256};
use serde_json::{Map, Value};

use crate::domain::{LayerSlot, Phase, RotatorState};
use crate::ENGINE_VERSION;

/// Canonical serialization of RotatorState to UTF-8 JSON bytes.
/// No whitespace. Deterministic field order.
pub fn canonical_serialize(state: &RotatorState) -> Vec<u8> {
    let obj = build_canonical_value(state);
    serde_json::to_string(&obj)
        .expect("canonical_serialize: JSON serialization failed")
        .into_bytes()
}

/// SHA-256 of canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &RotatorState) -> String {
    let bytes = canonical_serialize(state);
    let digest = Sha256::digest(&bytes);
    digest
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}

fn phase_str(phase: Phase) -> &'static str {
    match phase {
        Phase::Configuring => "configuring",
        Phase::Static => "static",
        Phase::Rotating => "rotating",
    }
}

fn slot_str(slot: LayerSlot) -> &'static str {
    match slot {
        LayerSlot::Zero => "zero",
        LayerSlot::One => "one",
    }
}

/// Build the canonical serde_json::Value in strict field order.
///
/// Uses serde_json::Map which preserves insertion order.
///
/// Field order: engine_version, images, interval_ms, reduced_motion,
///              phase, current_index, visible_layer, timer_active,
///              layers, swaps_applied
fn build_canonical_value(state: &RotatorState) -> Value {
    // -- layers (slot order) ---
    let mut layers_list: Vec<Value> = Vec::new();
    for layer in &state.layers {
        let mut layer_map = Map::new();
        layer_map.insert(
            "image_url".to_string(),
            Value::String(layer.image_url.clone()),
        );
        layer_map.insert("visible".to_string(), Value::Bool(layer.visible));
        layers_list.push(Value::Object(layer_map));
    }

    // -- top-level (strict field order) ---
    // engine_version MUST be first — it is part of the engine identity.
    let mut root = Map::new();
    root.insert(
        "engine_version".to_string(),
        Value::Number((ENGINE_VERSION as i64).into()),
    );
    root.insert(
        "images".to_string(),
        Value::Array(
            state
                .images
                .iter()
                .map(|s| Value::String(s.clone()))
                .collect(),
        ),
    );
    root.insert(
        "interval_ms".to_string(),
        Value::Number(state.interval_ms.into()),
    );
    root.insert(
        "reduced_motion".to_string(),
        Value::Bool(state.reduced_motion),
    );
    root.insert(
        "phase".to_string(),
        Value::String(phase_str(state.phase).to_string()),
    );
    root.insert(
        "current_index".to_string(),
        Value::Number((state.current_index as u64).into()),
    );
    root.insert(
        "visible_layer".to_string(),
        Value::String(slot_str(state.visible_layer).to_string()),
    );
    root.insert("timer_active".to_string(), Value::Bool(state.timer_active));
    root.insert("layers".to_string(), Value::Array(layers_list));
    root.insert(
        "swaps_applied".to_string(),
        Value::Number(state.swaps_applied.into()),
    );

    Value::Object(root)
}
