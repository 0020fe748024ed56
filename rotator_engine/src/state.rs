/// Rotator v1 — State Construction
///
/// The fresh state is unconfigured: fallback image only, no visible
/// layer, phase `Configuring`. The mandatory configure event performs
/// the initial paint.

use crate::domain::RotatorState;

/// Create a fresh, unconfigured RotatorState.
pub fn create_initial_state() -> RotatorState {
    RotatorState::default()
}
