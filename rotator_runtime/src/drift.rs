//! Drift detection — determinism verification and state comparison.
//!
//! All comparisons are integer/boolean; the rotator state carries no
//! float anywhere.

use std::collections::BTreeSet;

use rotator_engine::domain::RotatorState;
use rotator_engine::events::EventEnvelope;

use crate::replay;

/// Verify determinism by replaying the same events twice and
/// asserting identical hashes. Panics on failure.
pub fn verify_determinism(events: &[EventEnvelope]) {
    let (_, hash1) = replay::rebuild_state(events);
    let (_, hash2) = replay::rebuild_state(events);

    if hash1 != hash2 {
        panic!(
            "DETERMINISM FAILURE: two replays produced different hashes.\n\
             Run 1: {}\n\
             Run 2: {}",
            hash1, hash2
        );
    }
}

/// Structured state comparison.
///
/// Returns a DriftReport with deltas and image list changes.
pub fn compare_states(state_a: &RotatorState, state_b: &RotatorState) -> DriftReport {
    let images_a: BTreeSet<&str> = state_a.images.iter().map(|s| s.as_str()).collect();
    let images_b: BTreeSet<&str> = state_b.images.iter().map(|s| s.as_str()).collect();

    let added_images: Vec<String> = images_b
        .difference(&images_a)
        .map(|s| s.to_string())
        .collect();
    let removed_images: Vec<String> = images_a
        .difference(&images_b)
        .map(|s| s.to_string())
        .collect();

    DriftReport {
        current_index_a: state_a.current_index as i64,
        current_index_b: state_b.current_index as i64,
        current_index_delta: state_b.current_index as i64 - state_a.current_index as i64,
        swaps_a: state_a.swaps_applied as i64,
        swaps_b: state_b.swaps_applied as i64,
        swaps_delta: state_b.swaps_applied as i64 - state_a.swaps_applied as i64,
        interval_delta_ms: state_b.interval_ms as i64 - state_a.interval_ms as i64,
        phase_changed: state_a.phase != state_b.phase,
        visible_layer_changed: state_a.visible_layer != state_b.visible_layer,
        timer_active_a: state_a.timer_active,
        timer_active_b: state_b.timer_active,
        added_images,
        removed_images,
    }
}

/// Structured drift report — all numeric fields are i64.
#[derive(Debug, Clone)]
pub struct DriftReport {
    pub current_index_a: i64,
    pub current_index_b: i64,
    pub current_index_delta: i64,
    pub swaps_a: i64,
    pub swaps_b: i64,
    pub swaps_delta: i64,
    pub interval_delta_ms: i64,
    pub phase_changed: bool,
    pub visible_layer_changed: bool,
    pub timer_active_a: bool,
    pub timer_active_b: bool,
    pub added_images: Vec<String>,
    pub removed_images: Vec<String>,
}
