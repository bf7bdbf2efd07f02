use super::constants::{
    FRAME_MS, MAX_FRAME_DT_MS, Z_MAX, Z_MIN, Z_OSC_AMPLITUDE, Z_OSC_RATE, Z_OSC_SPATIAL,
};
use super::params::SimParams;
use super::scene::SceneState;
use glam::Vec2;
use rand::Rng;

/// Blend an over-limit component toward the limit instead of snapping to it.
#[inline]
pub fn soft_clamp(v: f32, max: f32, blend: f32) -> f32 {
    if v.abs() <= max {
        v
    } else {
        v + (max.copysign(v) - v) * blend
    }
}

/// Advance every particle by one tick. `dt_ms` is wall time since the last
/// tick and only drives the depth oscillation clock; it is clamped so a
/// resumed tab does not jump.
pub fn step<G, R: Rng + ?Sized>(
    scene: &mut SceneState<G>,
    params: &SimParams,
    dt_ms: f64,
    rng: &mut R,
) {
    let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);
    scene.sim_time_ms += dt_ms;
    let t = scene.sim_time_ms;
    let z_step = Z_OSC_AMPLITUDE * (dt_ms / FRAME_MS) as f32;

    for p in scene.particles.iter_mut() {
        p.velocity.x += (rng.gen::<f32>() - 0.5) * params.animation_speed;
        p.velocity.y += (rng.gen::<f32>() - 0.5) * params.animation_speed;

        p.velocity *= params.damping;

        p.position.x += p.velocity.x;
        p.position.y += p.velocity.y;

        let phase = (t * Z_OSC_RATE) as f32 + p.position.x * Z_OSC_SPATIAL;
        p.position.z = (p.position.z + phase.sin() * z_step).clamp(Z_MIN, Z_MAX);

        p.velocity.x = soft_clamp(p.velocity.x, params.max_velocity, params.soft_clamp_blend);
        p.velocity.y = soft_clamp(p.velocity.y, params.max_velocity, params.soft_clamp_blend);

        // Progressive spring: pull grows faster than linear with distance.
        let offset = p.origin - p.planar();
        let dist = offset.length();
        let ratio = dist / params.max_wander;
        let progression = 1.0 + ratio * ratio * params.spring_progression;
        p.velocity += offset * params.spring_strength * progression;

        if dist > params.max_wander {
            let outward = -offset / dist;
            let clamped = p.origin + outward * params.max_wander;
            p.position.x = clamped.x;
            p.position.y = clamped.y;
            p.velocity = -p.velocity * params.bounce_loss;
        }

        if !p.velocity.is_finite() {
            p.velocity = Vec2::ZERO;
        }
    }
}
