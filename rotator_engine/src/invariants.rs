/// Rotator v1 — Invariant Checks
///
/// Hard-fail validation. Every check panics on failure.
/// Run against the new state after every transition.

use crate::config::FALLBACK_IMAGE;
use crate::domain::{Phase, RotatorState};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run all invariant checks. Panics on the first failure.
pub fn validate_invariants(state: &RotatorState) {
    check_fallback_first(state);
    check_no_empty_urls(state);
    check_index_in_range(state);
    check_interval_positive(state);
    check_visible_layer_marker(state);
    check_layers_painted(state);
    check_frozen_when_degenerate(state);
}

/// Non-panicking variant of `validate_invariants`.
/// Returns `Err(message)` on the first failure, `Ok(())` if all pass.
/// Used by snapshot restore to validate without aborting the process.
pub fn try_validate_invariants(state: &RotatorState) -> Result<(), String> {
    try_check_fallback_first(state)?;
    try_check_no_empty_urls(state)?;
    try_check_index_in_range(state)?;
    try_check_interval_positive(state)?;
    try_check_visible_layer_marker(state)?;
    try_check_layers_painted(state)?;
    try_check_frozen_when_degenerate(state)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

/// INV-1: The image list is never empty and always leads with the
/// guaranteed fallback — the hero can never be blank.
fn check_fallback_first(state: &RotatorState) {
    if let Err(msg) = try_check_fallback_first(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// INV-2: No empty URL ever enters the list.
fn check_no_empty_urls(state: &RotatorState) {
    if let Err(msg) = try_check_no_empty_urls(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// INV-3: current_index always addresses a real image.
fn check_index_in_range(state: &RotatorState) {
    if let Err(msg) = try_check_index_in_range(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// INV-4: The rotation period is a positive number of milliseconds.
fn check_interval_positive(state: &RotatorState) {
    if let Err(msg) = try_check_interval_positive(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// INV-5: Exactly one layer carries the visible marker once configured
/// — never zero, never two. Before configure, zero is required.
fn check_visible_layer_marker(state: &RotatorState) {
    if let Err(msg) = try_check_visible_layer_marker(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// INV-6: Both layers are painted once configured.
fn check_layers_painted(state: &RotatorState) {
    if let Err(msg) = try_check_layers_painted(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// INV-7: Reduced motion or a single image freezes the rotator: phase
/// Static, timer off, zero swaps — forever.
fn check_frozen_when_degenerate(state: &RotatorState) {
    if let Err(msg) = try_check_frozen_when_degenerate(state) {
        panic!("Invariant violation: {}", msg);
    }
}

// ---------------------------------------------------------------------------
// Non-panicking variants (for snapshot restore)
// ---------------------------------------------------------------------------

fn try_check_fallback_first(state: &RotatorState) -> Result<(), String> {
    if state.images.is_empty() {
        return Err("[INVARIANT:fallback_first] Image list is empty".to_string());
    }
    if state.images[0] != FALLBACK_IMAGE {
        return Err(format!(
            "[INVARIANT:fallback_first] Image list must lead with the fallback, got {:?}",
            state.images[0]
        ));
    }
    Ok(())
}

fn try_check_no_empty_urls(state: &RotatorState) -> Result<(), String> {
    for (i, url) in state.images.iter().enumerate() {
        if url.trim().is_empty() {
            return Err(format!(
                "[INVARIANT:empty_url] Image list entry {} is empty",
                i
            ));
        }
    }
    Ok(())
}

fn try_check_index_in_range(state: &RotatorState) -> Result<(), String> {
    if state.current_index >= state.images.len() {
        return Err(format!(
            "[INVARIANT:index_range] current_index={} out of range for {} image(s)",
            state.current_index,
            state.images.len()
        ));
    }
    Ok(())
}

fn try_check_interval_positive(state: &RotatorState) -> Result<(), String> {
    if state.interval_ms == 0 {
        return Err("[INVARIANT:interval_positive] interval_ms is zero".to_string());
    }
    Ok(())
}

fn try_check_visible_layer_marker(state: &RotatorState) -> Result<(), String> {
    let visible = state.visible_layer_count();
    match state.phase {
        Phase::Configuring => {
            if visible != 0 {
                return Err(format!(
                    "[INVARIANT:visible_marker] {} layer(s) visible before configure",
                    visible
                ));
            }
        }
        Phase::Static | Phase::Rotating => {
            if visible != 1 {
                return Err(format!(
                    "[INVARIANT:visible_marker] expected exactly one visible layer, found {}",
                    visible
                ));
            }
            if !state.layer(state.visible_layer).visible {
                return Err(format!(
                    "[INVARIANT:visible_marker] visible_layer={:?} but that slot is hidden",
                    state.visible_layer
                ));
            }
        }
    }
    Ok(())
}

fn try_check_layers_painted(state: &RotatorState) -> Result<(), String> {
    if state.phase == Phase::Configuring {
        return Ok(());
    }
    for (i, layer) in state.layers.iter().enumerate() {
        if layer.image_url.is_empty() {
            return Err(format!(
                "[INVARIANT:layers_painted] layer {} has no painted image",
                i
            ));
        }
    }
    Ok(())
}

fn try_check_frozen_when_degenerate(state: &RotatorState) -> Result<(), String> {
    if state.phase == Phase::Configuring {
        return Ok(());
    }
    let degenerate = state.reduced_motion || state.images.len() < 2;
    if degenerate && state.phase != Phase::Static {
        return Err(
            "[INVARIANT:frozen_state] degenerate configuration must stay Static".to_string(),
        );
    }
    if !degenerate && state.phase != Phase::Rotating {
        return Err(
            "[INVARIANT:frozen_state] rotating configuration ended up Static".to_string(),
        );
    }
    if state.phase == Phase::Static {
        if state.timer_active {
            return Err(
                "[INVARIANT:frozen_state] timer active in Static phase".to_string(),
            );
        }
        if state.swaps_applied != 0 {
            return Err(format!(
                "[INVARIANT:frozen_state] {} swap(s) recorded in Static phase",
                state.swaps_applied
            ));
        }
    }
    Ok(())
}
