/// Rotator v1 — Centralized Transition Logic
///
/// ALL state-mutation logic lives here. Transitions are pure: they
/// clone the state, mutate the clone, and return it together with a
/// structured result. Side effects (painting, preloading) are carried
/// as data in the result — the engine never touches a real surface.

use crate::config::{effective_image_list, parse_interval_ms};
use crate::domain::{LayerOp, LayerSlot, Phase, RotatorState, TransitionResult};
use crate::events::EventEnvelope;

// ---------------------------------------------------------------------------
// Public dispatcher
// ---------------------------------------------------------------------------

/// Apply *event* to *state* and return `(new_state, result)`.
/// The original state is never mutated — a deep clone is made first.
pub fn apply_event(
    state: &RotatorState,
    event: &EventEnvelope,
) -> (RotatorState, TransitionResult) {
    let mut new_state = state.clone();

    let etype = event.event_type.as_str();

    let result = match etype {
        "configure" => apply_configure(&mut new_state, event),
        "tick" => apply_tick(&mut new_state),
        "page_hidden" => apply_page_hidden(&mut new_state),
        "page_visible" => apply_page_visible(&mut new_state),
        _ => panic!("Unknown event type: {}", etype),
    };

    // Record event in history
    new_state.event_history.push(event.to_dict());

    (new_state, result)
}

// ---------------------------------------------------------------------------
// Individual transition handlers (private)
// ---------------------------------------------------------------------------

fn apply_configure(state: &mut RotatorState, event: &EventEnvelope) -> TransitionResult {
    let p = &event.payload;

    let images_attr = p.get("images_attr").and_then(|v| v.as_str()).unwrap_or("");
    let interval_attr = p
        .get("interval_attr")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());
    let reduced_motion = p
        .get("reduced_motion")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    let images = effective_image_list(images_attr);
    let interval_ms = parse_interval_ms(interval_attr);

    state.images = images.clone();
    state.interval_ms = interval_ms;
    state.reduced_motion = reduced_motion;
    state.current_index = 0;
    state.swaps_applied = 0;

    // Initial paint: layer 0 gets the first image and the visible
    // marker; layer 1 is pre-painted with the second image so the
    // first swap only has to toggle visibility markers.
    let second = if images.len() > 1 { &images[1] } else { &images[0] };
    state.layers[0].image_url = images[0].clone();
    state.layers[0].visible = true;
    state.layers[1].image_url = second.clone();
    state.layers[1].visible = false;

    let ops = vec![
        LayerOp::Paint {
            slot: LayerSlot::Zero,
            image_url: images[0].clone(),
        },
        LayerOp::Paint {
            slot: LayerSlot::One,
            image_url: second.clone(),
        },
        LayerOp::Show {
            slot: LayerSlot::Zero,
        },
    ];

    // Reduced motion or a single image disables rotation for good.
    let rotation_disabled = reduced_motion || images.len() < 2;
    if rotation_disabled {
        state.phase = Phase::Static;
        state.timer_active = false;
    } else {
        state.phase = Phase::Rotating;
        state.timer_active = true;
    }

    TransitionResult {
        event_type: "configure".to_string(),
        rotation_disabled,
        timer_started: !rotation_disabled,
        reason: if reduced_motion {
            "reduced motion preference active".to_string()
        } else if images.len() < 2 {
            format!("only {} image(s) available", images.len())
        } else {
            String::new()
        },
        painted_url: images[0].clone(),
        ops,
        preload: images,
        ..Default::default()
    }
}

fn apply_tick(state: &mut RotatorState) -> TransitionResult {
    if state.phase != Phase::Rotating {
        return TransitionResult {
            event_type: "tick".to_string(),
            swap_skipped: true,
            reason: format!("no rotation in phase {:?}", state.phase),
            new_index: state.current_index,
            ..Default::default()
        };
    }
    if !state.timer_active {
        return TransitionResult {
            event_type: "tick".to_string(),
            swap_skipped: true,
            reason: "timer inactive while page hidden".to_string(),
            new_index: state.current_index,
            ..Default::default()
        };
    }

    let next = (state.current_index + 1) % state.images.len();
    let hidden = state.visible_layer.other();
    let url = state.images[next].clone();

    // Paint the hidden layer, show it, then hide the old one — in that
    // order, so the crossfade overlaps.
    state.layer_mut(hidden).image_url = url.clone();
    state.layer_mut(hidden).visible = true;
    let outgoing = state.visible_layer;
    state.layer_mut(outgoing).visible = false;

    state.visible_layer = hidden;
    state.current_index = next;
    state.swaps_applied += 1;

    TransitionResult {
        event_type: "tick".to_string(),
        swapped: true,
        new_index: next,
        painted_url: url.clone(),
        ops: vec![
            LayerOp::Paint {
                slot: hidden,
                image_url: url,
            },
            LayerOp::Show { slot: hidden },
            LayerOp::Hide { slot: outgoing },
        ],
        ..Default::default()
    }
}

fn apply_page_hidden(state: &mut RotatorState) -> TransitionResult {
    if state.phase == Phase::Rotating && state.timer_active {
        state.timer_active = false;
        return TransitionResult {
            event_type: "page_hidden".to_string(),
            timer_cancelled: true,
            new_index: state.current_index,
            ..Default::default()
        };
    }

    TransitionResult {
        event_type: "page_hidden".to_string(),
        reason: "no active timer to cancel".to_string(),
        new_index: state.current_index,
        ..Default::default()
    }
}

fn apply_page_visible(state: &mut RotatorState) -> TransitionResult {
    if state.phase == Phase::Rotating && !state.timer_active {
        // Resume from the current image; no catch-up swap. The next
        // swap waits a full interval from here.
        state.timer_active = true;
        return TransitionResult {
            event_type: "page_visible".to_string(),
            timer_started: true,
            new_index: state.current_index,
            ..Default::default()
        };
    }

    TransitionResult {
        event_type: "page_visible".to_string(),
        reason: "rotation not suspended".to_string(),
        new_index: state.current_index,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FALLBACK_IMAGE;
    use crate::domain::LayerSlot;
    use crate::invariants::validate_invariants;
    use crate::state::create_initial_state;

    fn configured(
        images_attr: &str,
        interval_attr: Option<&str>,
        reduced_motion: bool,
    ) -> RotatorState {
        let state = create_initial_state();
        let evt = EventEnvelope::configure(1, 0, images_attr, interval_attr, reduced_motion);
        let (state, _) = apply_event(&state, &evt);
        validate_invariants(&state);
        state
    }

    fn tick(state: &RotatorState, sequence: u64) -> (RotatorState, TransitionResult) {
        let (state, result) = apply_event(state, &EventEnvelope::tick(sequence, 0));
        validate_invariants(&state);
        (state, result)
    }

    #[test]
    fn test_configure_builds_effective_list() {
        let state = configured("a.jpg, b.jpg;c.jpg", Some("3000"), false);
        assert_eq!(state.images, vec![FALLBACK_IMAGE, "a.jpg", "b.jpg", "c.jpg"]);
        assert_eq!(state.interval_ms, 3000);
        assert_eq!(state.phase, Phase::Rotating);
        assert!(state.timer_active);
        assert_eq!(state.layers[0].image_url, FALLBACK_IMAGE);
        assert_eq!(state.layers[1].image_url, "a.jpg");
        assert!(state.layers[0].visible);
        assert!(!state.layers[1].visible);
    }

    #[test]
    fn test_configure_preloads_every_image() {
        let state = create_initial_state();
        let evt = EventEnvelope::configure(1, 0, "a.jpg;b.jpg", None, false);
        let (_, result) = apply_event(&state, &evt);
        assert_eq!(result.preload, vec![FALLBACK_IMAGE, "a.jpg", "b.jpg"]);
        assert!(result.timer_started);
        assert!(!result.rotation_disabled);
    }

    #[test]
    fn test_configure_empty_list_is_static() {
        let state = configured("", None, false);
        assert_eq!(state.images, vec![FALLBACK_IMAGE]);
        assert_eq!(state.phase, Phase::Static);
        assert!(!state.timer_active);
        // Both layers reuse the only image
        assert_eq!(state.layers[1].image_url, FALLBACK_IMAGE);
        assert!(state.layers[0].visible);
    }

    #[test]
    fn test_configure_reduced_motion_is_static() {
        let state = configured("a.jpg,b.jpg", Some("3000"), true);
        assert_eq!(state.phase, Phase::Static);
        assert!(!state.timer_active);
        assert!(state.layers[0].visible);
    }

    #[test]
    fn test_first_swap_moves_to_index_one() {
        let state = configured("a.jpg, b.jpg;c.jpg", Some("3000"), false);
        let (state, result) = tick(&state, 2);
        assert!(result.swapped);
        assert_eq!(result.new_index, 1);
        assert_eq!(result.painted_url, "a.jpg");
        assert_eq!(state.current_index, 1);
        assert_eq!(state.visible_layer, LayerSlot::One);
        assert_eq!(state.swaps_applied, 1);
    }

    #[test]
    fn test_swap_ops_order_show_before_hide() {
        let state = configured("a.jpg,b.jpg", None, false);
        let (_, result) = tick(&state, 2);
        assert_eq!(
            result.ops,
            vec![
                LayerOp::Paint {
                    slot: LayerSlot::One,
                    image_url: "a.jpg".to_string()
                },
                LayerOp::Show { slot: LayerSlot::One },
                LayerOp::Hide { slot: LayerSlot::Zero },
            ]
        );
    }

    #[test]
    fn test_index_wraps_modulo_list_length() {
        let mut state = configured("a.jpg,b.jpg", None, false);
        // images = [fallback, a, b]; three swaps wrap back to 0
        let expected = [1usize, 2, 0, 1];
        for (i, want) in expected.iter().enumerate() {
            let (next, result) = tick(&state, (i + 2) as u64);
            assert_eq!(result.new_index, *want);
            state = next;
        }
        assert_eq!(state.swaps_applied, 4);
    }

    #[test]
    fn test_exactly_one_visible_layer_after_many_swaps() {
        let mut state = configured("a.jpg,b.jpg,c.jpg", None, false);
        for seq in 2..50u64 {
            let (next, _) = tick(&state, seq);
            assert_eq!(next.visible_layer_count(), 1);
            state = next;
        }
    }

    #[test]
    fn test_tick_is_noop_while_static() {
        let state = configured("a.jpg,b.jpg", None, true);
        let (state, result) = tick(&state, 2);
        assert!(result.swap_skipped);
        assert!(!result.swapped);
        assert_eq!(state.swaps_applied, 0);
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn test_hidden_cancels_and_visible_resumes_without_swap() {
        let state = configured("a.jpg,b.jpg", None, false);
        let (state, result) =
            apply_event(&state, &EventEnvelope::page_hidden(2, 0));
        assert!(result.timer_cancelled);
        assert!(!state.timer_active);

        // Ticks while hidden do nothing
        let (state, result) = tick(&state, 3);
        assert!(result.swap_skipped);
        assert_eq!(state.swaps_applied, 0);

        // Resuming starts the timer but performs no catch-up swap
        let (state, result) =
            apply_event(&state, &EventEnvelope::page_visible(4, 0));
        assert!(result.timer_started);
        assert!(!result.swapped);
        assert!(state.timer_active);
        assert_eq!(state.swaps_applied, 0);
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn test_visibility_events_are_noops_while_static() {
        let state = configured("", None, false);
        let (state, result) =
            apply_event(&state, &EventEnvelope::page_hidden(2, 0));
        assert!(!result.timer_cancelled);
        assert!(!state.timer_active);
        let (state, result) =
            apply_event(&state, &EventEnvelope::page_visible(3, 0));
        assert!(!result.timer_started);
        assert!(!state.timer_active);
        assert_eq!(state.phase, Phase::Static);
    }

    #[test]
    fn test_history_records_every_event() {
        let state = configured("a.jpg,b.jpg", None, false);
        let (state, _) = tick(&state, 2);
        let (state, _) = apply_event(&state, &EventEnvelope::page_hidden(3, 0));
        assert_eq!(state.event_history.len(), 3);
        assert_eq!(state.event_history[0]["event_type"], "configure");
        assert_eq!(state.event_history[2]["event_type"], "page_hidden");
    }

    #[test]
    #[should_panic(expected = "Unknown event type")]
    fn test_unknown_event_type_panics() {
        let state = configured("a.jpg", None, false);
        let mut evt = EventEnvelope::tick(2, 0);
        evt.event_type = "resize".to_string();
        apply_event(&state, &evt);
    }
}
