use super::constants::{HIT_TOLERANCE, MIN_RENDER_SCALE};
use super::params::SimParams;
use super::scene::SceneState;
use glam::Vec2;

/// Index of the molecule under `point`, nearest (lowest z) first. The hitbox
/// is the last drawn radius enlarged by `params.hover_multiplier`, inclusive of
/// the boundary; molecules culled by the last render pass are never hit.
pub fn hit_test<G>(scene: &SceneState<G>, point: Vec2, params: &SimParams) -> Option<usize> {
    let mut order: Vec<usize> = (0..scene.particles.len()).collect();
    order.sort_by(|&a, &b| {
        scene.particles[a]
            .position
            .z
            .total_cmp(&scene.particles[b].position.z)
    });
    order.into_iter().find(|&i| {
        let p = &scene.particles[i];
        if p.display_scale.map_or(true, |s| s < MIN_RENDER_SCALE) {
            return false;
        }
        let Some(radius) = p.display_radius else {
            return false;
        };
        let reach = radius * params.hover_multiplier;
        (point - p.planar()).length_squared() <= reach * reach * (1.0 + HIT_TOLERANCE)
    })
}

/// Tracks whether the pointer is over any molecule so the cursor style is
/// only written when that actually flips.
#[derive(Default, Clone, Copy, Debug)]
pub struct HoverTracker {
    over: bool,
}

impl HoverTracker {
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Returns `Some(new_state)` on change, `None` otherwise.
    pub fn update(&mut self, over: bool) -> Option<bool> {
        if over == self.over {
            return None;
        }
        self.over = over;
        Some(over)
    }
}
