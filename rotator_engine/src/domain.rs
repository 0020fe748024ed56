/// Rotator v1 — Core Domain Types
///
/// Pure data. No behaviour, no transition logic.

use serde::{Serialize, Deserialize};

// ── Core Domain Types ──────────────────────────────────────────────

/// One of the two crossfade layer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerSlot {
    Zero,
    One,
}

impl LayerSlot {
    /// The opposite slot — the layer currently hidden behind this one.
    pub fn other(self) -> Self {
        match self {
            LayerSlot::Zero => LayerSlot::One,
            LayerSlot::One => LayerSlot::Zero,
        }
    }

    pub fn index(self) -> usize {
        match self {
            LayerSlot::Zero => 0,
            LayerSlot::One => 1,
        }
    }
}

/// A visual layer: one painted background image plus a visibility marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer {
    /// Raw image URL painted on this layer. The tint is composed at
    /// paint time, not stored.
    pub image_url: String,
    pub visible: bool,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            visible: false,
        }
    }
}

impl Layer {
    /// CSS background value a paint backend would set for this layer.
    pub fn background_css(&self) -> String {
        crate::config::composite_background(&self.image_url)
    }
}

/// Rotator lifecycle phase.
///
/// `Configuring` exists only before the mandatory configure event.
/// `Static` is terminal: reduced motion or a single image disables
/// rotation permanently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Configuring,
    Static,
    Rotating,
}

/// An ordered side effect the paint backend must perform.
///
/// Order matters within a result: on a swap, the incoming layer is
/// painted and shown BEFORE the outgoing layer is hidden, so both are
/// visible in the same tick and the CSS opacity transitions overlap
/// into a crossfade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerOp {
    Paint { slot: LayerSlot, image_url: String },
    Show { slot: LayerSlot },
    Hide { slot: LayerSlot },
}

/// Structured, immutable outcome of a state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionResult {
    pub event_type: String,
    pub success: bool,
    pub swapped: bool,
    pub swap_skipped: bool,
    pub timer_started: bool,
    pub timer_cancelled: bool,
    pub rotation_disabled: bool,
    pub reason: String,
    pub new_index: usize,
    pub painted_url: String,
    /// Ordered paint/visibility operations for the side-effecting step.
    pub ops: Vec<LayerOp>,
    /// URLs to preload, fire-and-forget. Emitted only by configure.
    pub preload: Vec<String>,
}

impl Default for TransitionResult {
    fn default() -> Self {
        Self {
            event_type: String::new(),
            success: true,
            swapped: false,
            swap_skipped: false,
            timer_started: false,
            timer_cancelled: false,
            rotation_disabled: false,
            reason: String::new(),
            new_index: 0,
            painted_url: String::new(),
            ops: Vec::new(),
            preload: Vec::new(),
        }
    }
}

/// Complete rotator state snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotatorState {
    /// Effective image list. Post-configure: fallback first, length ≥ 1.
    pub images: Vec<String>,
    pub interval_ms: u64,
    /// Reduced-motion preference, read once at configure time.
    pub reduced_motion: bool,
    pub phase: Phase,
    /// Index into `images` of the image on the visible layer.
    pub current_index: usize,
    pub visible_layer: LayerSlot,
    /// Whether the rotation timer is producing ticks. Always false
    /// outside `Rotating`.
    pub timer_active: bool,
    pub layers: [Layer; 2],
    pub swaps_applied: u64,
    pub event_history: Vec<serde_json::Value>,
}

impl Default for RotatorState {
    fn default() -> Self {
        Self {
            images: vec![crate::config::FALLBACK_IMAGE.to_string()],
            interval_ms: crate::config::DEFAULT_INTERVAL_MS,
            reduced_motion: false,
            phase: Phase::Configuring,
            current_index: 0,
            visible_layer: LayerSlot::Zero,
            timer_active: false,
            layers: [Layer::default(), Layer::default()],
            swaps_applied: 0,
            event_history: Vec::new(),
        }
    }
}

impl RotatorState {
    /// The layer struct for a slot.
    pub fn layer(&self, slot: LayerSlot) -> &Layer {
        &self.layers[slot.index()]
    }

    pub fn layer_mut(&mut self, slot: LayerSlot) -> &mut Layer {
        &mut self.layers[slot.index()]
    }

    /// Count of layers currently carrying the visible marker.
    pub fn visible_layer_count(&self) -> usize {
        self.layers.iter().filter(|l| l.visible).count()
    }
}
