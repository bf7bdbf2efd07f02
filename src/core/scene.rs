use super::chords::ChordDefinition;
use super::constants::*;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Memo key for a halo gradient: rounded centre and radius plus glow level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradientKey {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub glow: u8,
}

impl GradientKey {
    pub fn new(center: Vec2, radius: f32, glow: f32) -> Self {
        Self {
            x: center.x.round() as i32,
            y: center.y.round() as i32,
            radius: radius.round() as i32,
            glow: (glow.clamp(0.0, 1.0) * GLOW_LEVELS).round() as u8,
        }
    }
}

/// One chord molecule. `G` is the host surface's gradient handle.
#[derive(Clone, Debug)]
pub struct Particle<G = ()> {
    pub chord: &'static ChordDefinition,
    /// `z` is synthetic depth, kept within `[Z_MIN, Z_MAX]`.
    pub position: Vec3,
    pub velocity: Vec2,
    pub origin: Vec2,
    pub rotation_offset: f32,
    pub playing_time: Option<f64>,
    pub collision_time: Option<f64>,
    // Last render pass; read by collision and hit testing.
    pub display_radius: Option<f32>,
    pub display_scale: Option<f32>,
    pub cached_gradient: Option<(GradientKey, G)>,
}

impl<G> Particle<G> {
    pub fn new(
        chord: &'static ChordDefinition,
        origin: Vec2,
        z: f32,
        rotation_offset: f32,
    ) -> Self {
        Self {
            chord,
            position: origin.extend(z.clamp(Z_MIN, Z_MAX)),
            velocity: Vec2::ZERO,
            origin,
            rotation_offset,
            playing_time: None,
            collision_time: None,
            display_radius: None,
            display_scale: None,
            cached_gradient: None,
        }
    }

    #[inline]
    pub fn planar(&self) -> Vec2 {
        self.position.truncate()
    }

    #[inline]
    pub fn wander(&self) -> f32 {
        self.planar().distance(self.origin)
    }

    /// True when the last render pass drew this particle.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.display_radius.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct SceneState<G = ()> {
    pub particles: Vec<Particle<G>>,
    pub width: f32,
    pub height: f32,
    pub sim_time_ms: f64,
}

impl<G> Default for SceneState<G> {
    fn default() -> Self {
        Self {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
            sim_time_ms: 0.0,
        }
    }
}

impl<G> SceneState<G> {
    /// Place one particle per chord on an ellipse around the surface centre.
    pub fn layout<R: Rng + ?Sized>(
        chords: &'static [ChordDefinition],
        width: f32,
        height: f32,
        rng: &mut R,
    ) -> Self {
        let center = Vec2::new(width, height) * 0.5;
        let n = chords.len().max(1) as f32;
        let particles = chords
            .iter()
            .enumerate()
            .map(|(i, chord)| {
                let angle = i as f32 * (TAU / n)
                    + rng.gen_range(-LAYOUT_ANGLE_JITTER..=LAYOUT_ANGLE_JITTER);
                let jitter = rng.gen_range(-LAYOUT_RADIUS_JITTER_FRAC..=LAYOUT_RADIUS_JITTER_FRAC);
                let rx = width * (LAYOUT_RADIUS_FRAC + jitter);
                let ry = height * (LAYOUT_RADIUS_FRAC + jitter);
                let origin = center + Vec2::new(angle.cos() * rx, angle.sin() * ry);
                let (z_lo, z_hi) = if chord.note_count() >= COMPLEX_CHORD_NOTES {
                    Z_RANGE_COMPLEX
                } else {
                    Z_RANGE_SIMPLE
                };
                let z = rng.gen_range(z_lo..=z_hi);
                Particle::new(chord, origin, z, rng.gen_range(0.0..TAU))
            })
            .collect();
        Self {
            particles,
            width,
            height,
            sim_time_ms: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Record that `index` started sounding at `now_ms`.
    pub fn mark_playing(&mut self, index: usize, now_ms: f64) {
        if let Some(p) = self.particles.get_mut(index) {
            p.playing_time = Some(now_ms);
        }
    }
}
