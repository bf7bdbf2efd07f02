use super::constants::{ROOT_OCTAVE, UPPER_OCTAVE};
use smallvec::SmallVec;
use std::fmt;

/// Straight (non-premultiplied) RGBA colour; `a` is 0..=1 like CSS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with its alpha multiplied by `factor` (clamped to 0..=1).
    pub fn fade(self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, self.a)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ChordDefinition {
    pub name: &'static str,
    pub notes: &'static [&'static str],
    pub color: Rgba,
}

impl ChordDefinition {
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }
}

pub const CHORDS: &[ChordDefinition] = &[
    ChordDefinition {
        name: "C",
        notes: &["C", "E", "G"],
        color: Rgba::new(255, 99, 132, 0.8),
    },
    ChordDefinition {
        name: "Am",
        notes: &["A", "C", "E"],
        color: Rgba::new(54, 162, 235, 0.8),
    },
    ChordDefinition {
        name: "F",
        notes: &["F", "A", "C"],
        color: Rgba::new(255, 206, 86, 0.8),
    },
    ChordDefinition {
        name: "G",
        notes: &["G", "B", "D"],
        color: Rgba::new(75, 192, 192, 0.8),
    },
    ChordDefinition {
        name: "Dm7",
        notes: &["D", "F", "A", "C"],
        color: Rgba::new(153, 102, 255, 0.8),
    },
    ChordDefinition {
        name: "Em7",
        notes: &["E", "G", "B", "D"],
        color: Rgba::new(255, 159, 64, 0.8),
    },
    ChordDefinition {
        name: "Cmaj7",
        notes: &["C", "E", "G", "B"],
        color: Rgba::new(108, 99, 255, 0.8),
    },
    ChordDefinition {
        name: "G7",
        notes: &["G", "B", "D", "F"],
        color: Rgba::new(78, 205, 196, 0.8),
    },
    ChordDefinition {
        name: "Fmaj9",
        notes: &["F", "A", "C", "E", "G"],
        color: Rgba::new(199, 125, 255, 0.8),
    },
    ChordDefinition {
        name: "Am9",
        notes: &["A", "C", "E", "G", "B"],
        color: Rgba::new(255, 107, 107, 0.8),
    },
    ChordDefinition {
        name: "Dm9",
        notes: &["D", "F", "A", "C", "E"],
        color: Rgba::new(72, 219, 251, 0.8),
    },
    ChordDefinition {
        name: "G13",
        notes: &["G", "B", "D", "F", "A", "E"],
        color: Rgba::new(254, 202, 87, 0.8),
    },
    ChordDefinition {
        name: "Cadd9",
        notes: &["C", "E", "G", "D"],
        color: Rgba::new(29, 209, 161, 0.8),
    },
    ChordDefinition {
        name: "Bm7b5",
        notes: &["B", "D", "F", "A"],
        color: Rgba::new(243, 104, 224, 0.8),
    },
];

/// Semitone offset from the natural C of the same octave, before wrapping:
/// `"Cb"` is -1 and `"B#"` is 12.
pub fn pitch_class_offset(name: &str) -> Option<i32> {
    let mut chars = name.chars();
    let base: i32 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let mut offset: i32 = 0;
    for c in chars {
        match c {
            '#' | '♯' => offset += 1,
            'b' | '♭' => offset -= 1,
            _ => return None,
        }
    }
    Some(base + offset)
}

/// Pitch class (0..12) for a name such as `"F#"` or `"Bb"`.
pub fn pitch_class_semitone(name: &str) -> Option<i32> {
    pitch_class_offset(name).map(|s| s.rem_euclid(12))
}

pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * (2.0_f32).powf((midi - 69.0) / 12.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoicedNote {
    pub pitch_class: &'static str,
    pub octave: i32,
    pub midi: i32,
}

impl VoicedNote {
    pub fn frequency_hz(&self) -> f32 {
        midi_to_hz(self.midi as f32)
    }
}

pub type Voicing = SmallVec<[VoicedNote; 8]>;

/// Spread a chord over octaves: root one octave below the rest, and for
/// chords with more than three notes the upper notes split over two bands.
pub fn voice_chord(chord: &ChordDefinition) -> Voicing {
    let mut out = Voicing::new();
    let mut notes = chord
        .notes
        .iter()
        .filter_map(|n| pitch_class_offset(n).map(|s| (*n, s)));
    let Some((root, root_offset)) = notes.next() else {
        return out;
    };
    out.push(VoicedNote {
        pitch_class: root,
        octave: ROOT_OCTAVE,
        midi: midi_for(ROOT_OCTAVE, root_offset),
    });

    let upper: SmallVec<[(&'static str, i32); 8]> = notes.collect();
    let split = if chord.note_count() > 3 {
        (upper.len() + 1) / 2
    } else {
        upper.len()
    };
    for (i, (name, offset)) in upper.into_iter().enumerate() {
        let octave = if i < split {
            UPPER_OCTAVE
        } else {
            UPPER_OCTAVE + 1
        };
        out.push(VoicedNote {
            pitch_class: name,
            octave,
            midi: midi_for(octave, offset),
        });
    }
    out
}

#[inline]
fn midi_for(octave: i32, offset: i32) -> i32 {
    (octave + 1) * 12 + offset
}
