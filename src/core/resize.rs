use super::constants::RESIZE_DEBOUNCE_MS;

/// Trailing-edge debounce for resize storms: only the last notification is
/// honoured, once `quiet_ms` has passed without another.
#[derive(Clone, Copy, Debug)]
pub struct ResizeDebouncer {
    quiet_ms: f64,
    deadline: Option<f64>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE_MS)
    }
}

impl ResizeDebouncer {
    pub fn new(quiet_ms: f64) -> Self {
        Self {
            quiet_ms,
            deadline: None,
        }
    }

    pub fn notify(&mut self, now_ms: f64) {
        self.deadline = Some(now_ms + self.quiet_ms);
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per burst, on the first poll after the quiet window.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        match self.deadline {
            Some(d) if now_ms >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
