/// Browser-side tuning: canvas text, cursor styles and the synth chain.
///
/// Simulation constants live in `core::constants`; these only matter to the
/// DOM and WebAudio glue.
// Canvas text
pub const FONT_FAMILY: &str = "system-ui, -apple-system, sans-serif";
pub const FONT_WEIGHT: &str = "600";

// Cursor
pub const CURSOR_POINTER: &str = "pointer";
pub const CURSOR_DEFAULT: &str = "default";

// Synth voice envelope (seconds)
pub const ATTACK_SEC: f64 = 0.08;
pub const HOLD_SEC: f64 = 1.4;
pub const RELEASE_SEC: f64 = 2.2;
pub const NOTE_PEAK_GAIN: f32 = 0.22;

// Vibrato
pub const VIBRATO_RATE_HZ: f32 = 4.5;
pub const VIBRATO_DEPTH_CENTS: f32 = 9.0;

// Tone
pub const LOWPASS_HZ: f32 = 1800.0;
pub const LOWPASS_Q: f32 = 0.7;
pub const VOLUME_GAIN: f32 = 0.25; // about -12 dB

// Reverb
pub const REVERB_DECAY_SEC: f32 = 5.0; // voice slots are released on the same tail
pub const REVERB_WET: f32 = 0.45;
