use super::constants::{MAX_CONCURRENT_VOICES, VOICE_RELEASE_MS};
use fnv::FnvHashMap;
use instant::Instant;
use smallvec::SmallVec;

/// Millisecond time source, injectable so voice lifetimes can be tested
/// without waiting on the wall clock.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    Accepted,
    AlreadyPlaying,
    AtCapacity,
}

impl TriggerOutcome {
    pub fn accepted(self) -> bool {
        self == TriggerOutcome::Accepted
    }
}

/// Per-chord `Idle -> Playing -> Idle` machine with a polyphony cap. A chord
/// is playing exactly while it has a release deadline in `active`.
#[derive(Clone, Debug)]
pub struct VoiceScheduler {
    max_voices: usize,
    release_ms: f64,
    active: FnvHashMap<usize, f64>,
}

impl Default for VoiceScheduler {
    fn default() -> Self {
        Self::new(MAX_CONCURRENT_VOICES, VOICE_RELEASE_MS)
    }
}

impl VoiceScheduler {
    pub fn new(max_voices: usize, release_ms: f64) -> Self {
        Self {
            max_voices,
            release_ms,
            active: FnvHashMap::default(),
        }
    }

    pub fn release_ms(&self) -> f64 {
        self.release_ms
    }

    pub fn try_trigger(&mut self, index: usize, now_ms: f64) -> TriggerOutcome {
        if self.active.contains_key(&index) {
            return TriggerOutcome::AlreadyPlaying;
        }
        if self.active.len() >= self.max_voices {
            return TriggerOutcome::AtCapacity;
        }
        self.active.insert(index, now_ms + self.release_ms);
        TriggerOutcome::Accepted
    }

    pub fn is_playing(&self, index: usize) -> bool {
        self.active.contains_key(&index)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn deadline(&self, index: usize) -> Option<f64> {
        self.active.get(&index).copied()
    }

    /// Free one slot. Returns whether `index` was playing.
    pub fn release(&mut self, index: usize) -> bool {
        self.active.remove(&index).is_some()
    }

    /// Free every slot whose deadline has passed, in index order.
    pub fn release_due(&mut self, now_ms: f64) -> SmallVec<[usize; 4]> {
        let mut due: SmallVec<[usize; 4]> = self
            .active
            .iter()
            .filter(|(_, &deadline)| deadline <= now_ms)
            .map(|(&i, _)| i)
            .collect();
        due.sort_unstable();
        for i in &due {
            self.active.remove(i);
        }
        due
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
