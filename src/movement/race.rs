//! Movement domain: start-to-finish run timer.

/// Clock readings for one run, from touching the start line to touching the
/// finish line. Times are in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaceTimer {
    started_at: Option<f64>,
    finished_at: Option<f64>,
}

impl RaceTimer {
    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.finished_at.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Starts the run. A timer only ever starts once.
    pub fn start(&mut self, now: f64) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Stops a running timer and returns the run time.
    pub fn finish(&mut self, now: f64) -> Option<f64> {
        if !self.is_running() {
            return None;
        }
        self.finished_at = Some(now);
        self.elapsed(now)
    }

    /// Time since the start, held at the run time once finished.
    pub fn elapsed(&self, now: f64) -> Option<f64> {
        let started = self.started_at?;
        Some(self.finished_at.unwrap_or(now) - started)
    }
}
