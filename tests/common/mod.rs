// The main crate is wasm-only, so host tests include the pure-Rust core
// modules directly. Sibling `super::` paths inside them resolve here.
#![allow(dead_code)]

pub mod constants {
    include!("../../src/core/constants.rs");
}
pub mod chords {
    include!("../../src/core/chords.rs");
}
pub mod params {
    include!("../../src/core/params.rs");
}
pub mod scene {
    include!("../../src/core/scene.rs");
}
pub mod physics {
    include!("../../src/core/physics.rs");
}
pub mod collision {
    include!("../../src/core/collision.rs");
}
pub mod render {
    include!("../../src/core/render.rs");
}
pub mod input {
    include!("../../src/core/input.rs");
}
pub mod resize {
    include!("../../src/core/resize.rs");
}
pub mod voices {
    include!("../../src/core/voices.rs");
}

use chords::{Rgba, CHORDS};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use render::Surface;
use scene::SceneState;

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// The full chord set laid out on an 1280x800 surface.
pub fn scene_14(seed: u64) -> SceneState<u32> {
    SceneState::layout(CHORDS, 1280.0, 800.0, &mut seeded(seed))
}

/// Surface that only counts what it is asked to draw. Gradients are numbered
/// in creation order.
#[derive(Default)]
pub struct RecordingSurface {
    pub clears: usize,
    pub halos_created: u32,
    pub halos_filled: usize,
    pub lines: Vec<(Vec2, Vec2, Rgba)>,
    pub polygons: usize,
    pub circles: usize,
    pub texts: Vec<String>,
}

impl Surface for RecordingSurface {
    type Gradient = u32;

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn create_halo(&mut self, _c: Vec2, _r: f32, _color: Rgba, _i: f32) -> Option<u32> {
        self.halos_created += 1;
        Some(self.halos_created)
    }

    fn fill_halo(&mut self, _c: Vec2, _r: f32, _g: &u32) {
        self.halos_filled += 1;
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, _w: f32) {
        self.lines.push((from, to, color));
    }

    fn polygon(&mut self, _points: &[Vec2], _color: Rgba, _w: f32) {
        self.polygons += 1;
    }

    fn circle(&mut self, _c: Vec2, _r: f32, _fill: Rgba, _outline: Rgba, _w: f32) {
        self.circles += 1;
    }

    fn text(&mut self, text: &str, _at: Vec2, _size: f32, _color: Rgba) {
        self.texts.push(text.to_string());
    }
}
