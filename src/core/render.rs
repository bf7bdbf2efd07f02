use super::chords::Rgba;
use super::constants::*;
use super::params::SimParams;
use super::scene::{GradientKey, Particle, SceneState};
use glam::Vec2;
use smallvec::SmallVec;
use std::f32::consts::TAU;

/// Minimal 2D drawing API the chord web needs from its host.
pub trait Surface {
    /// Host handle for a prepared radial gradient.
    type Gradient: Clone;

    fn clear(&mut self);
    /// Build a radial halo fading from `color` at `intensity` alpha to
    /// transparent. `None` if the host cannot create one.
    fn create_halo(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Rgba,
        intensity: f32,
    ) -> Option<Self::Gradient>;
    fn fill_halo(&mut self, center: Vec2, radius: f32, gradient: &Self::Gradient);
    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
    fn polygon(&mut self, points: &[Vec2], color: Rgba, width: f32);
    fn circle(&mut self, center: Vec2, radius: f32, fill: Rgba, outline: Rgba, outline_width: f32);
    fn text(&mut self, text: &str, at: Vec2, size_px: f32, color: Rgba);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    pub edges: usize,
}

/// Perspective factor for synthetic depth `z`; strictly decreasing in `z`.
#[inline]
pub fn perspective_scale(z: f32) -> f32 {
    PERSPECTIVE_K / (PERSPECTIVE_K + z)
}

/// Drawn radius of a molecule with `note_count` notes at `scale`.
#[inline]
pub fn display_radius(note_count: usize, scale: f32) -> f32 {
    let extra = (note_count as f32 - 3.0).max(0.0).sqrt();
    (BASE_RADIUS + extra * RADIUS_PER_EXTRA_NOTE) * scale
}

/// Remaining fraction (1 → 0) of a decay window that started at `stamp`;
/// clears the stamp once the window has passed.
fn decay(stamp: &mut Option<f64>, now_ms: f64, window_ms: f64) -> f32 {
    match *stamp {
        Some(t0) if now_ms - t0 < window_ms => (1.0 - (now_ms - t0).max(0.0) / window_ms) as f32,
        Some(_) => {
            *stamp = None;
            0.0
        }
        None => 0.0,
    }
}

/// Draw one frame back-to-front and refresh each particle's display cache.
pub fn render_frame<S: Surface>(
    scene: &mut SceneState<S::Gradient>,
    surface: &mut S,
    params: &SimParams,
    now_ms: f64,
) -> FrameStats {
    surface.clear();
    let mut stats = FrameStats::default();

    let mut order: Vec<usize> = (0..scene.particles.len()).collect();
    order.sort_by(|&a, &b| {
        scene.particles[b]
            .position
            .z
            .total_cmp(&scene.particles[a].position.z)
    });

    for &i in &order {
        let p = &mut scene.particles[i];
        let scale = perspective_scale(p.position.z);
        p.display_scale = Some(scale);
        if scale < MIN_RENDER_SCALE {
            p.display_radius = None;
            stats.culled += 1;
            continue;
        }
        let radius = display_radius(p.chord.note_count(), scale);
        p.display_radius = Some(radius);
        draw_molecule(p, i, surface, radius, scale, now_ms);
        stats.drawn += 1;
    }

    stats.edges = draw_connections(scene, surface, params);
    stats
}

fn draw_molecule<S: Surface>(
    p: &mut Particle<S::Gradient>,
    index: usize,
    surface: &mut S,
    radius: f32,
    scale: f32,
    now_ms: f64,
) {
    let center = p.planar();
    let color = p.chord.color;
    let play = decay(&mut p.playing_time, now_ms, PLAY_DECAY_MS);
    let collide = decay(&mut p.collision_time, now_ms, COLLISION_DECAY_MS);

    // (a) halo
    let pulse = 0.8 + 0.2 * ((now_ms * HALO_PULSE_RATE) as f32).sin();
    let halo_radius =
        radius * (HALO_SCALE + play * HALO_PLAY_BOOST * pulse + collide * HALO_COLLIDE_BOOST);
    let glow = (HALO_BASE_INTENSITY + play * HALO_PLAY_INTENSITY + collide * HALO_COLLIDE_INTENSITY)
        .min(1.0);
    let key = GradientKey::new(center, halo_radius, glow);
    let reuse = matches!(&p.cached_gradient, Some((k, _)) if *k == key);
    if !reuse {
        p.cached_gradient = surface
            .create_halo(center, halo_radius, color, glow)
            .map(|g| (key, g));
    }
    if let Some((_, g)) = &p.cached_gradient {
        surface.fill_halo(center, halo_radius, g);
    }

    // (b) chord name
    if scale >= LABEL_MIN_SCALE {
        let at = center + Vec2::new(0.0, radius + 14.0 * scale);
        surface.text(p.chord.name, at, 14.0 * scale, Rgba::WHITE.fade(0.6 + 0.4 * play));
    }

    // (c) intra-chord polygon
    let n = p.chord.note_count();
    if n == 0 {
        return;
    }
    let orbit = radius * NOTE_ORBIT_FRAC;
    let spin = p.rotation_offset + (now_ms * NOTE_ORBIT_RATE) as f32;
    let points: SmallVec<[Vec2; 8]> = (0..n)
        .map(|k| {
            let a = spin + k as f32 * TAU / n as f32;
            center + Vec2::new(a.cos(), a.sin()) * orbit
        })
        .collect();
    let edge_alpha = 0.25 + 0.5 * play + 0.25 * collide;
    let edge_width = (1.0 + 1.5 * play) * scale;
    surface.polygon(&points, color.with_alpha(edge_alpha), edge_width);

    // (d) note atoms
    for (k, (&at, note)) in points.iter().zip(p.chord.notes.iter()).enumerate() {
        let phase = now_ms * NOTE_PULSE_RATE + (index + k) as f64;
        let r = NOTE_RADIUS * scale * (1.0 + NOTE_PULSE_DEPTH * (phase as f32).sin());
        if r < MIN_NOTE_RADIUS {
            continue;
        }
        surface.circle(
            at,
            r,
            color.with_alpha(0.85),
            color.with_alpha(0.4 + 0.6 * play),
            2.0 * scale,
        );
        surface.text(note, at, r * 1.1, Rgba::WHITE);
    }
}

/// Faint lines between the nearest visible molecules. Never draws more than
/// `params.max_connection_edges` lines. Returns the number drawn.
fn draw_connections<S: Surface>(
    scene: &SceneState<S::Gradient>,
    surface: &mut S,
    params: &SimParams,
) -> usize {
    let mut nodes: SmallVec<[(usize, f32); 16]> = scene
        .particles
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_visible())
        .filter_map(|(i, p)| {
            p.display_scale
                .filter(|s| *s >= CONNECTION_MIN_SCALE)
                .map(|s| (i, s))
        })
        .collect();
    nodes.sort_by(|a, b| {
        scene.particles[a.0]
            .position
            .z
            .total_cmp(&scene.particles[b.0].position.z)
    });
    nodes.truncate(params.max_connection_nodes);

    let mut edges = 0;
    for (a, &(ia, sa)) in nodes.iter().enumerate() {
        for &(ib, sb) in &nodes[a + 1..] {
            if edges >= params.max_connection_edges {
                return edges;
            }
            let pa = &scene.particles[ia];
            let pb = &scene.particles[ib];
            let dist = pa.position.distance(pb.position);
            if dist >= params.connection_distance {
                continue;
            }
            let falloff = 1.0 - dist / params.connection_distance;
            let alpha = CONNECTION_ALPHA * falloff * sa * sb;
            surface.line(
                pa.planar(),
                pb.planar(),
                Rgba::WHITE.with_alpha(alpha),
                0.5 + sa.min(sb),
            );
            edges += 1;
        }
    }
    edges
}
