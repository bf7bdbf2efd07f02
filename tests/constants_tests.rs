// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core_constants {
    include!("../src/core/constants.rs");
}

use constants::*;
use core_constants::*;

fn scale(z: f32) -> f32 {
    PERSPECTIVE_K / (PERSPECTIVE_K + z)
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn depth_ranges_fit_inside_the_scene() {
    assert!(Z_MIN < Z_MAX);
    for (lo, hi) in [Z_RANGE_COMPLEX, Z_RANGE_SIMPLE] {
        assert!(lo >= Z_MIN && hi <= Z_MAX && lo < hi);
    }
    // Complex chords start in front of the simple ones.
    assert!(Z_RANGE_COMPLEX.0 < Z_RANGE_SIMPLE.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn level_of_detail_thresholds_are_ordered() {
    assert!(MIN_RENDER_SCALE < CONNECTION_MIN_SCALE);
    assert!(CONNECTION_MIN_SCALE < LABEL_MIN_SCALE);
    // Nearest molecules are always drawn and labelled.
    assert!(scale(Z_MIN) > LABEL_MIN_SCALE);
    // The back of the scene is culled.
    assert!(scale(Z_MAX) < MIN_RENDER_SCALE);
    // A simple chord at its deepest start position is still visible.
    assert!(scale(Z_RANGE_SIMPLE.1) >= MIN_RENDER_SCALE);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn motion_constants_are_stable() {
    assert!(DAMPING > 0.0 && DAMPING < 1.0);
    assert!(SOFT_CLAMP_BLEND > 0.0 && SOFT_CLAMP_BLEND <= 1.0);
    assert!(BOUNCE_LOSS > 0.0 && BOUNCE_LOSS < 1.0);
    assert!(SPRING_STRENGTH > 0.0 && SPRING_PROGRESSION >= 0.0);
    assert!(ANIMATION_SPEED < MAX_VELOCITY);
    assert!(MAX_WANDER > MAX_VELOCITY);
    assert!(MAX_FRAME_DT_MS > FRAME_MS);
    // Per-tick z drift stays well inside the shortest depth range.
    assert!(Z_OSC_AMPLITUDE < (Z_RANGE_COMPLEX.1 - Z_RANGE_COMPLEX.0));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn collision_constants_are_sane() {
    assert!(DEPTH_GATE > 0.0 && DEPTH_GATE < Z_MAX - Z_MIN);
    assert!(COLLISION_PADDING >= 0.0);
    assert!(COLLISION_STRENGTH > 0.0 && COLLISION_STRENGTH < 1.0);
    assert!(MIN_COLLISION_DISTANCE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn glow_and_decay_windows() {
    assert!(COLLISION_DECAY_MS < PLAY_DECAY_MS);
    assert!(PLAY_DECAY_MS <= VOICE_RELEASE_MS);
    assert!(HALO_BASE_INTENSITY + HALO_PLAY_INTENSITY + HALO_COLLIDE_INTENSITY <= 1.0);
    assert!(HALO_SCALE > 1.0);
    assert!(GLOW_LEVELS >= 2.0);
    assert!(CONNECTION_ALPHA > 0.0 && CONNECTION_ALPHA <= 1.0);
    assert!(MAX_CONNECTION_EDGES > 0 && MAX_CONNECTION_NODES > 1);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn note_atoms_fit_inside_molecules() {
    let smallest = BASE_RADIUS * MIN_RENDER_SCALE;
    assert!(NOTE_ORBIT_FRAC > 0.0 && NOTE_ORBIT_FRAC < 1.0);
    assert!(NOTE_RADIUS * (1.0 + NOTE_PULSE_DEPTH) < smallest * (1.0 - NOTE_ORBIT_FRAC) * 2.0);
    assert!(MIN_NOTE_RADIUS < NOTE_RADIUS);
    assert!(HOVER_MULTIPLIER >= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn synth_envelope_fits_voice_slot() {
    let envelope_ms = (ATTACK_SEC + HOLD_SEC + RELEASE_SEC) * 1000.0;
    assert!(envelope_ms <= VOICE_RELEASE_MS);
    assert!((0.0..=1.0).contains(&REVERB_WET));
    assert!(NOTE_PEAK_GAIN > 0.0 && NOTE_PEAK_GAIN <= 1.0);
    assert!(VOLUME_GAIN > 0.0 && VOLUME_GAIN <= 1.0);
    assert!(LOWPASS_HZ > 20.0 && LOWPASS_Q > 0.0);
    assert!(MAX_CONCURRENT_VOICES >= 1);
    assert!(ROOT_OCTAVE < UPPER_OCTAVE);
}
