// Shared simulation/render/voice tuning constants for the chord web.
// Units: positions and radii are CSS pixels, times are milliseconds.

// Depth
pub const Z_MIN: f32 = 10.0;
pub const Z_MAX: f32 = 200.0;
pub const PERSPECTIVE_K: f32 = 400.0; // scale = K / (K + z)
pub const Z_RANGE_COMPLEX: (f32, f32) = (20.0, 80.0); // chords with >= 5 notes sit in front
pub const Z_RANGE_SIMPLE: (f32, f32) = (50.0, 180.0);
pub const COMPLEX_CHORD_NOTES: usize = 5;

// Layout
pub const LAYOUT_RADIUS_FRAC: f32 = 0.45; // ellipse radius as a fraction of width/height
pub const LAYOUT_RADIUS_JITTER_FRAC: f32 = 0.03;
pub const LAYOUT_ANGLE_JITTER: f32 = 0.2; // radians

// Physics
pub const FRAME_MS: f64 = 1000.0 / 60.0;
pub const MAX_FRAME_DT_MS: f64 = 100.0; // clamp after tab suspension
pub const ANIMATION_SPEED: f32 = 0.04; // random acceleration amplitude per tick
pub const DAMPING: f32 = 0.98;
pub const MAX_VELOCITY: f32 = 1.5;
pub const SOFT_CLAMP_BLEND: f32 = 0.2; // fraction of the overshoot removed per tick
pub const SPRING_STRENGTH: f32 = 0.0008;
pub const SPRING_PROGRESSION: f32 = 3.0; // extra pull at the wander cap
pub const MAX_WANDER: f32 = 150.0;
pub const BOUNCE_LOSS: f32 = 0.5;
pub const Z_OSC_RATE: f64 = 0.0005; // rad per ms of simulated time
pub const Z_OSC_SPATIAL: f32 = 0.01; // rad per px of x
pub const Z_OSC_AMPLITUDE: f32 = 0.3; // z units per 60 Hz tick

// Collision
pub const DEPTH_GATE: f32 = 80.0;
pub const COLLISION_PADDING: f32 = 6.0;
pub const COLLISION_STRENGTH: f32 = 0.02;
pub const MIN_COLLISION_DISTANCE: f32 = 0.5;

// Molecule geometry
pub const BASE_RADIUS: f32 = 38.0;
pub const RADIUS_PER_EXTRA_NOTE: f32 = 10.0; // multiplied by sqrt(notes - 3)
pub const MIN_RENDER_SCALE: f32 = 0.68; // LOD cull below this
pub const LABEL_MIN_SCALE: f32 = 0.78;
pub const NOTE_ORBIT_FRAC: f32 = 0.58;
pub const NOTE_ORBIT_RATE: f64 = 0.0003; // rad per ms
pub const NOTE_RADIUS: f32 = 9.0;
pub const MIN_NOTE_RADIUS: f32 = 5.0;
pub const NOTE_PULSE_RATE: f64 = 0.004;
pub const NOTE_PULSE_DEPTH: f32 = 0.1;

// Glow
pub const HALO_SCALE: f32 = 1.6;
pub const HALO_PLAY_BOOST: f32 = 0.7;
pub const HALO_COLLIDE_BOOST: f32 = 0.25;
pub const HALO_PULSE_RATE: f64 = 0.006;
pub const HALO_BASE_INTENSITY: f32 = 0.22;
pub const HALO_PLAY_INTENSITY: f32 = 0.5;
pub const HALO_COLLIDE_INTENSITY: f32 = 0.2;
pub const GLOW_LEVELS: f32 = 16.0; // quantization of glow in gradient cache keys
pub const PLAY_DECAY_MS: f64 = 3000.0;
pub const COLLISION_DECAY_MS: f64 = 300.0;

// Connection graph
pub const CONNECTION_MIN_SCALE: f32 = 0.72;
pub const MAX_CONNECTION_NODES: usize = 7;
pub const MAX_CONNECTION_EDGES: usize = 8;
pub const CONNECTION_DISTANCE: f32 = 340.0;
pub const CONNECTION_ALPHA: f32 = 0.18;

// Input
pub const HOVER_MULTIPLIER: f32 = 1.5;
pub const HIT_TOLERANCE: f32 = 1e-4; // relative slack on squared reach for f32 rounding
pub const RESIZE_DEBOUNCE_MS: f64 = 200.0;

// Voices
pub const MAX_CONCURRENT_VOICES: usize = 4;
pub const VOICE_RELEASE_MS: f64 = 5000.0; // matches the reverb tail
pub const ROOT_OCTAVE: i32 = 3;
pub const UPPER_OCTAVE: i32 = 4;
