//! Hand-written protobuf types for the rotator event log.
//!
//! Uses prost derive macros for encode/decode without prost-build.
//! Field numbers are frozen: the log format is append-only and old
//! logs must stay readable.

use prost::Message;

// ── Event Envelope ─────────────────────────────────────────────

#[derive(Clone, PartialEq, Message)]
pub struct ProtoEventEnvelope {
    #[prost(uint64, tag = "1")]
    pub sequence: u64,
    #[prost(uint64, tag = "2")]
    pub logical_time: u64,
    #[prost(message, optional, tag = "3")]
    pub event: Option<ProtoEvent>,
}

#[derive(Clone, PartialEq, Message)]
pub struct ProtoEvent {
    #[prost(oneof = "EventKind", tags = "1, 2, 3, 4")]
    pub kind: Option<EventKind>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum EventKind {
    #[prost(message, tag = "1")]
    Configure(Configure),
    #[prost(message, tag = "2")]
    Tick(Tick),
    #[prost(message, tag = "3")]
    PageHidden(PageHidden),
    #[prost(message, tag = "4")]
    PageVisible(PageVisible),
}

// ── Event Types ────────────────────────────────────────────────

/// Raw container attributes, passed through uninterpreted.
/// An empty interval_attr means "absent".
#[derive(Clone, PartialEq, Message)]
pub struct Configure {
    #[prost(string, tag = "1")]
    pub images_attr: String,
    #[prost(string, tag = "2")]
    pub interval_attr: String,
    #[prost(bool, tag = "3")]
    pub reduced_motion: bool,
}

#[derive(Clone, PartialEq, Message)]
pub struct Tick {}

#[derive(Clone, PartialEq, Message)]
pub struct PageHidden {}

#[derive(Clone, PartialEq, Message)]
pub struct PageVisible {}
