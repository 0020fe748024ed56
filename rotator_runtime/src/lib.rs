#![forbid(unsafe_code)]

//! Rotator v1 — Runtime
//!
//! Wraps the frozen engine with persistence, replay, snapshots,
//! session management, tick scheduling, and drift detection.
//!
//! No domain logic lives here — all transitions and invariants
//! are delegated to the engine.

pub mod proto_types;
pub mod proto_bridge;
pub mod event_store;
pub mod replay;
pub mod snapshot;
pub mod snapshot_codec;
pub mod scheduler;
pub mod session;
pub mod drift;
