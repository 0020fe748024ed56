//! Snapshot Codec — deterministic RotatorState encoder/decoder.
//!
//! Pure codec layer. No side-effects, no timestamps, no envelope.
//!
//! - `encode_snapshot`:  RotatorState → JSON string
//! - `decode_snapshot`:  JSON string → RotatorState (strict, no defaults)
//! - `restore_snapshot`: decode + invariant validation
//! - `export_snapshot_to_file` / `import_snapshot_from_file`: file I/O
//! - `snapshot_hash`:    SHA-256 of the encoding (lowercase hex)

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use rotator_engine::domain::RotatorState;
use rotator_engine::invariants::try_validate_invariants;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// All possible snapshot codec failures.
#[derive(Debug)]
pub enum SnapshotError {
    /// JSON serialization failed.
    SerializationError(String),
    /// JSON deserialization failed (malformed, missing fields, unknown fields).
    DeserializationError(String),
    /// Loaded state violates engine invariants.
    InvariantViolation(String),
    /// File I/O error.
    IoError(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::SerializationError(msg) => {
                write!(f, "SerializationError: {}", msg)
            }
            SnapshotError::DeserializationError(msg) => {
                write!(f, "DeserializationError: {}", msg)
            }
            SnapshotError::InvariantViolation(msg) => {
                write!(f, "InvariantViolation: {}", msg)
            }
            SnapshotError::IoError(msg) => {
                write!(f, "IoError: {}", msg)
            }
        }
    }
}

impl From<io::Error> for SnapshotError {
    fn from(err: io::Error) -> Self {
        SnapshotError::IoError(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Encode a RotatorState to a JSON string.
///
/// Uses serde serialization. Fixed struct field order, no whitespace,
/// no timestamps — deterministic output for identical states.
pub fn encode_snapshot(state: &RotatorState) -> Result<String, SnapshotError> {
    serde_json::to_string(state).map_err(|e| {
        SnapshotError::SerializationError(e.to_string())
    })
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Decode a JSON string into a RotatorState.
///
/// Strict deserialization: `deny_unknown_fields` on all types rejects
/// unexpected fields. Missing required fields cause failure.
/// No silent defaults. No invariant validation — use `restore_snapshot`
/// for validated loading.
pub fn decode_snapshot(json: &str) -> Result<RotatorState, SnapshotError> {
    serde_json::from_str::<RotatorState>(json).map_err(|e| {
        SnapshotError::DeserializationError(e.to_string())
    })
}

// ---------------------------------------------------------------------------
// Restore (decode + validate)
// ---------------------------------------------------------------------------

/// Decode a JSON string and validate invariants immediately.
///
/// This is the safe entry point for loading state from untrusted sources.
/// Returns `Err(InvariantViolation)` if any invariant check fails.
pub fn restore_snapshot(json: &str) -> Result<RotatorState, SnapshotError> {
    let state = decode_snapshot(json)?;
    try_validate_invariants(&state).map_err(SnapshotError::InvariantViolation)?;
    Ok(state)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Export a RotatorState to a file as JSON.
///
/// Creates parent directories if needed. Byte-for-byte identical across
/// identical states. No timestamps in output.
pub fn export_snapshot_to_file(
    state: &RotatorState,
    path: &Path,
) -> Result<(), SnapshotError> {
    let json = encode_snapshot(state)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, json.as_bytes())?;
    Ok(())
}

/// Import a RotatorState from a JSON file.
///
/// Reads the file, deserializes, and validates invariants.
/// Fails on malformed JSON, missing fields, or invariant violations.
pub fn import_snapshot_from_file(
    path: &Path,
) -> Result<RotatorState, SnapshotError> {
    let content = fs::read_to_string(path)?;
    restore_snapshot(&content)
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// SHA-256 of the serde JSON encoding. Lowercase hex string.
///
/// NOTE: This hashes the *serde-derived* JSON, NOT the canonical hash
/// from the engine's hashing module (which binds engine_version and
/// excludes event_history). This hash is for snapshot integrity —
/// verifying that a snapshot file has not been tampered with.
pub fn snapshot_hash(state: &RotatorState) -> Result<String, SnapshotError> {
    let json = encode_snapshot(state)?;
    let digest = Sha256::digest(json.as_bytes());
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rotator_engine::engine::RotatorEngine;
    use rotator_engine::events::EventEnvelope;

    /// Build a configured, mid-rotation state for testing.
    fn make_test_state() -> RotatorState {
        let mut engine = RotatorEngine::new();
        engine.initialize_state();
        engine.apply_event(&EventEnvelope::configure(
            1, 0, "a.jpg,b.jpg", Some("3000"), false,
        ));
        engine.apply_event(&EventEnvelope::tick(2, 3000));
        engine.state().clone()
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let state = make_test_state();
        let json = encode_snapshot(&state).expect("encode");
        let back = decode_snapshot(&json).expect("decode");
        assert_eq!(back.images, state.images);
        assert_eq!(back.current_index, state.current_index);
        assert_eq!(back.visible_layer, state.visible_layer);
        assert_eq!(back.swaps_applied, state.swaps_applied);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let a = encode_snapshot(&make_test_state()).expect("encode a");
        let b = encode_snapshot(&make_test_state()).expect("encode b");
        assert_eq!(a, b);
    }

    #[test]
    fn test_decode_rejects_unknown_fields() {
        let state = make_test_state();
        let json = encode_snapshot(&state).expect("encode");
        let tampered = json.replacen('{', "{\"extra_field\":1,", 1);
        assert!(matches!(
            decode_snapshot(&tampered),
            Err(SnapshotError::DeserializationError(_))
        ));
    }

    #[test]
    fn test_restore_rejects_invariant_violations() {
        let mut state = make_test_state();
        // Two visible layers can never occur in a valid state
        state.layers[0].visible = true;
        state.layers[1].visible = true;
        let json = encode_snapshot(&state).expect("encode");
        match restore_snapshot(&json) {
            Err(SnapshotError::InvariantViolation(msg)) => {
                assert!(msg.contains("visible_marker"));
            }
            other => panic!("expected InvariantViolation, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_restore_rejects_broken_fallback() {
        let mut state = make_test_state();
        state.images[0] = "not-the-fallback.png".to_string();
        let json = encode_snapshot(&state).expect("encode");
        assert!(matches!(
            restore_snapshot(&json),
            Err(SnapshotError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_snapshot_hash_tracks_content() {
        let state = make_test_state();
        let h1 = snapshot_hash(&state).expect("hash");
        let mut changed = state.clone();
        changed.swaps_applied += 1;
        let h2 = snapshot_hash(&changed).expect("hash");
        assert_ne!(h1, h2);
    }
}
