pub mod chords;
pub mod collision;
pub mod constants;
pub mod input;
pub mod params;
pub mod physics;
pub mod render;
pub mod resize;
pub mod scene;
pub mod voices;

pub use chords::*;
pub use params::SimParams;
pub use render::{render_frame, FrameStats, Surface};
pub use scene::{Particle, SceneState};
pub use voices::{Clock, InstantClock, TriggerOutcome, VoiceScheduler};
