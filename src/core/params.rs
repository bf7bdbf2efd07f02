use super::constants::*;

/// Tunable simulation parameters. `Default` reproduces the shipped feel; the
/// edge cap and depth gate were picked by eye and are meant to be tweaked.
#[derive(Clone, Debug)]
pub struct SimParams {
    pub animation_speed: f32,
    pub damping: f32,
    pub max_velocity: f32,
    pub soft_clamp_blend: f32,
    pub spring_strength: f32,
    pub spring_progression: f32,
    pub max_wander: f32,
    pub bounce_loss: f32,
    pub depth_gate: f32,
    pub collision_padding: f32,
    pub collision_strength: f32,
    pub max_connection_nodes: usize,
    pub max_connection_edges: usize,
    pub connection_distance: f32,
    pub hover_multiplier: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            animation_speed: ANIMATION_SPEED,
            damping: DAMPING,
            max_velocity: MAX_VELOCITY,
            soft_clamp_blend: SOFT_CLAMP_BLEND,
            spring_strength: SPRING_STRENGTH,
            spring_progression: SPRING_PROGRESSION,
            max_wander: MAX_WANDER,
            bounce_loss: BOUNCE_LOSS,
            depth_gate: DEPTH_GATE,
            collision_padding: COLLISION_PADDING,
            collision_strength: COLLISION_STRENGTH,
            max_connection_nodes: MAX_CONNECTION_NODES,
            max_connection_edges: MAX_CONNECTION_EDGES,
            connection_distance: CONNECTION_DISTANCE,
            hover_multiplier: HOVER_MULTIPLIER,
        }
    }
}
