/// Rotator v1 — Fixture Harness
///
/// Loads rotation scenario fixtures, replays each through the engine
/// twice, and checks determinism plus the expected structural outcome
/// (final index, visible layer, swap count, phase).

use std::fs;
use std::path::Path;

use rotator_engine::domain::{LayerSlot, Phase};
use rotator_engine::engine::RotatorEngine;
use rotator_engine::events::EventEnvelope;
use rotator_engine::hashing::canonical_hash;

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Configuring => "configuring",
        Phase::Static => "static",
        Phase::Rotating => "rotating",
    }
}

fn slot_name(slot: LayerSlot) -> &'static str {
    match slot {
        LayerSlot::Zero => "zero",
        LayerSlot::One => "one",
    }
}

fn main() {
    // Find the fixture file relative to the crate root or the workspace root
    let fixture_paths = [
        "tests/golden/rotation_fixtures.json",
        "rotator_engine/tests/golden/rotation_fixtures.json",
        "../rotator_engine/tests/golden/rotation_fixtures.json",
    ];

    let mut fixture_data = None;
    for p in &fixture_paths {
        if Path::new(p).exists() {
            fixture_data = Some(fs::read_to_string(p).expect("Failed to read fixture file"));
            println!("Loaded fixtures from: {}", p);
            break;
        }
    }

    let data = fixture_data.expect("Could not find rotation_fixtures.json");

    let fixtures: Vec<serde_json::Value> =
        serde_json::from_str(&data).expect("Failed to parse fixtures JSON");

    let mut all_passed = true;
    let mut total = 0;
    let mut passed = 0;

    for fixture in &fixtures {
        let name = fixture["name"].as_str().unwrap_or("(unnamed)");
        let expected_index = fixture["expected_index"].as_u64().unwrap() as usize;
        let expected_layer = fixture["expected_visible_layer"].as_str().unwrap();
        let expected_swaps = fixture["expected_swaps"].as_u64().unwrap();
        let expected_phase = fixture["expected_phase"].as_str().unwrap();

        let events_json = fixture["events"].as_array().unwrap();
        let events: Vec<EventEnvelope> = events_json
            .iter()
            .map(EventEnvelope::from_value)
            .collect();

        // Run 1
        let mut engine = RotatorEngine::new();
        engine.initialize_state();
        for evt in &events {
            engine.apply_event(evt);
        }
        let state = engine.state();
        let h1 = canonical_hash(state);

        let index = state.current_index;
        let layer = slot_name(state.visible_layer);
        let swaps = state.swaps_applied;
        let phase = phase_name(state.phase);
        let visible_count = state.visible_layer_count();

        // Run 2 (determinism check)
        let mut engine2 = RotatorEngine::new();
        engine2.initialize_state();
        for evt in &events {
            engine2.apply_event(evt);
        }
        let h2 = canonical_hash(engine2.state());

        total += 1;
        let determ_match = h1 == h2;
        let index_match = index == expected_index;
        let layer_match = layer == expected_layer;
        let swaps_match = swaps == expected_swaps;
        let phase_match = phase == expected_phase;
        let marker_ok = visible_count == 1;

        let ok = determ_match
            && index_match
            && layer_match
            && swaps_match
            && phase_match
            && marker_ok;

        if ok {
            passed += 1;
            println!(
                "[PASS] {}: index={}, layer={}, swaps={}, phase={}, hash={}",
                name, index, layer, swaps, phase, h1
            );
        } else {
            all_passed = false;
            println!("[FAIL] {}:", name);
            if !determ_match {
                println!("  Determinism fail: run1={} run2={}", h1, h2);
            }
            if !index_match {
                println!("  Index: got={} expected={}", index, expected_index);
            }
            if !layer_match {
                println!("  Visible layer: got={} expected={}", layer, expected_layer);
            }
            if !swaps_match {
                println!("  Swaps: got={} expected={}", swaps, expected_swaps);
            }
            if !phase_match {
                println!("  Phase: got={} expected={}", phase, expected_phase);
            }
            if !marker_ok {
                println!("  Visible markers: got={} expected=1", visible_count);
            }
        }
    }

    println!("\n===========================================");
    println!("Results: {}/{} passed", passed, total);
    if all_passed {
        println!("[OK] All rotation fixture checks PASSED.");
    } else {
        println!("[FAIL] Some checks failed.");
        std::process::exit(1);
    }
}
