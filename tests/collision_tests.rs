// Host-side tests for pairwise collision response.
mod common;

use common::chords::CHORDS;
use common::collision::resolve;
use common::params::SimParams;
use common::scene::{Particle, SceneState};
use glam::Vec2;

fn particle(x: f32, y: f32, z: f32, radius: Option<f32>) -> Particle<u32> {
    let mut p = Particle::new(&CHORDS[0], Vec2::new(x, y), z, 0.0);
    p.display_radius = radius;
    p.display_scale = radius.map(|_| 0.9);
    p
}

fn scene(particles: Vec<Particle<u32>>) -> SceneState<u32> {
    SceneState {
        particles,
        width: 800.0,
        height: 600.0,
        sim_time_ms: 0.0,
    }
}

#[test]
fn overlapping_pair_is_pushed_apart() {
    let params = SimParams::default();
    let mut s = scene(vec![
        particle(100.0, 100.0, 50.0, Some(40.0)),
        particle(150.0, 100.0, 60.0, Some(40.0)),
    ]);
    let hit = resolve(&mut s, &params, 1234.0);
    assert_eq!(hit, 2);

    let overlap = 40.0 + 40.0 + params.collision_padding - 50.0;
    let expected = overlap * params.collision_strength;
    let (a, b) = (&s.particles[0], &s.particles[1]);
    assert!((a.velocity.x + expected).abs() < 1e-6, "a.vx={}", a.velocity.x);
    assert!((b.velocity.x - expected).abs() < 1e-6, "b.vx={}", b.velocity.x);
    assert_eq!(a.velocity.y, 0.0);
    assert_eq!(a.collision_time, Some(1234.0));
    assert_eq!(b.collision_time, Some(1234.0));
}

#[test]
fn depth_gate_skips_far_apart_layers() {
    let params = SimParams::default();
    let mut s = scene(vec![
        particle(100.0, 100.0, 20.0, Some(40.0)),
        particle(110.0, 100.0, 20.0 + params.depth_gate + 1.0, Some(40.0)),
    ]);
    assert_eq!(resolve(&mut s, &params, 0.0), 0);
    for p in &s.particles {
        assert_eq!(p.velocity, Vec2::ZERO);
        assert!(p.collision_time.is_none());
    }
}

#[test]
fn depth_gate_is_tunable() {
    let params = SimParams {
        depth_gate: 200.0,
        ..SimParams::default()
    };
    let mut s = scene(vec![
        particle(100.0, 100.0, 20.0, Some(40.0)),
        particle(110.0, 100.0, 150.0, Some(40.0)),
    ]);
    assert_eq!(resolve(&mut s, &params, 0.0), 2);
}

#[test]
fn larger_neighbour_pushes_harder() {
    let params = SimParams::default();
    let mut s = scene(vec![
        particle(100.0, 100.0, 50.0, Some(30.0)),
        particle(100.0, 160.0, 50.0, Some(60.0)),
    ]);
    resolve(&mut s, &params, 0.0);
    let small = s.particles[0].velocity;
    let large = s.particles[1].velocity;
    assert!(small.y < 0.0 && large.y > 0.0);
    let ratio = small.length() / large.length();
    assert!((ratio - 4.0).abs() < 1e-4, "ratio {ratio}");
}

#[test]
fn coincident_centres_repel_without_nan() {
    let params = SimParams::default();
    let mut s = scene(vec![
        particle(300.0, 300.0, 50.0, Some(40.0)),
        particle(300.0, 300.0, 50.0, Some(40.0)),
    ]);
    resolve(&mut s, &params, 0.0);
    let (a, b) = (s.particles[0].velocity, s.particles[1].velocity);
    assert!(a.is_finite() && b.is_finite());
    assert!(a.x < 0.0 && b.x > 0.0, "a={a:?} b={b:?}");
    assert!((a + b).length() < 1e-6);
    // bounded by the full overlap, not blown up by the tiny distance
    let max = (80.0 + params.collision_padding) * params.collision_strength;
    assert!(a.length() <= max);
}

#[test]
fn touching_at_reach_is_not_a_collision() {
    let params = SimParams::default();
    let reach = 40.0 + 40.0 + params.collision_padding;
    let mut s = scene(vec![
        particle(0.0, 0.0, 50.0, Some(40.0)),
        particle(reach, 0.0, 50.0, Some(40.0)),
    ]);
    assert_eq!(resolve(&mut s, &params, 0.0), 0);
}

#[test]
fn culled_particles_do_not_collide() {
    let params = SimParams::default();
    let mut s = scene(vec![
        particle(100.0, 100.0, 50.0, Some(40.0)),
        particle(110.0, 100.0, 50.0, None),
    ]);
    assert_eq!(resolve(&mut s, &params, 0.0), 0);
    assert_eq!(s.particles[0].velocity, Vec2::ZERO);
}

#[test]
fn resolution_is_deterministic() {
    let params = SimParams::default();
    let build = || {
        scene(vec![
            particle(100.0, 100.0, 50.0, Some(40.0)),
            particle(130.0, 120.0, 70.0, Some(45.0)),
            particle(90.0, 140.0, 40.0, Some(35.0)),
            particle(400.0, 400.0, 40.0, Some(35.0)),
        ])
    };
    let mut a = build();
    let mut b = build();
    assert_eq!(resolve(&mut a, &params, 5.0), 3);
    resolve(&mut b, &params, 5.0);
    for (pa, pb) in a.particles.iter().zip(&b.particles) {
        assert_eq!(pa.velocity, pb.velocity);
    }
    assert!(a.particles[3].collision_time.is_none());
}
