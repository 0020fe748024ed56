#![forbid(unsafe_code)]

/// Engine v1 — Immutable. Behavioral changes require engine_v2.
pub const ENGINE_VERSION: u32 = 1;

pub mod config;
pub mod domain;
pub mod events;
pub mod state;
pub mod transitions;
pub mod invariants;
pub mod hashing;
pub mod engine;
