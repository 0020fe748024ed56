//! Replay orchestrator — rebuild state from an event log.
//!
//! Delegates all domain logic to the frozen engine.
//! No shortcuts, no cached state logic.

use rotator_engine::domain::RotatorState;
use rotator_engine::engine::RotatorEngine;
use rotator_engine::events::EventEnvelope;
use rotator_engine::hashing::canonical_hash;

/// Rebuild the rotator state from a sequence of events.
///
/// 1. Create fresh engine + state
/// 2. Pass each event sequentially to the engine
/// 3. Return (final_state, canonical_hash)
///
/// Logs are self-contained: the first event is always `configure`, so
/// the stream alone determines the state. Pure function of the stream.
pub fn rebuild_state(events: &[EventEnvelope]) -> (RotatorState, String) {
    let mut engine = RotatorEngine::new();
    engine.initialize_state();

    for evt in events {
        engine.apply_event(evt);
    }

    let state = engine.state().clone();
    let hash = canonical_hash(&state);
    (state, hash)
}

/// Rebuild state and return only the canonical hash.
pub fn rebuild_hash(events: &[EventEnvelope]) -> String {
    let (_, hash) = rebuild_state(events);
    hash
}
