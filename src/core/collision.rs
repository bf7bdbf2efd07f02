use super::constants::MIN_COLLISION_DISTANCE;
use super::params::SimParams;
use super::scene::SceneState;
use glam::Vec2;

/// Single-pass overlap response. Each particle is pushed away from every
/// overlapping neighbour within the depth gate; neighbours with a larger drawn
/// radius push harder. Only velocities change, so the result does not depend
/// on visiting order. Returns how many particles were hit this frame.
pub fn resolve<G>(scene: &mut SceneState<G>, params: &SimParams, now_ms: f64) -> usize {
    let n = scene.particles.len();
    let mut hit = 0;
    for i in 0..n {
        let impulse = {
            let me = &scene.particles[i];
            let Some(r_i) = me.display_radius else {
                continue;
            };
            let mut impulse = Vec2::ZERO;
            let mut touched = false;
            for (j, other) in scene.particles.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Some(r_j) = other.display_radius else {
                    continue;
                };
                if (me.position.z - other.position.z).abs() > params.depth_gate {
                    continue;
                }
                let delta = me.planar() - other.planar();
                let dist = delta.length();
                let reach = r_i + r_j + params.collision_padding;
                if dist >= reach {
                    continue;
                }
                // Coincident centres: fall back to a fixed axis, opposite for each side.
                let (normal, dist) = if dist < MIN_COLLISION_DISTANCE {
                    let side = if i < j { -1.0 } else { 1.0 };
                    (Vec2::new(side, 0.0), MIN_COLLISION_DISTANCE)
                } else {
                    (delta / dist, dist)
                };
                let overlap = reach - dist;
                let mass_ratio = r_j / r_i.max(MIN_COLLISION_DISTANCE);
                impulse += normal * overlap * params.collision_strength * mass_ratio;
                touched = true;
            }
            touched.then_some(impulse)
        };
        if let Some(impulse) = impulse {
            let p = &mut scene.particles[i];
            p.velocity += impulse;
            p.collision_time = Some(now_ms);
            hit += 1;
        }
    }
    hit
}
