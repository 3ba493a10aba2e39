//! Survival timer. The one-second schedule itself belongs to the host; this
//! only keeps the count and decides whether a delivered tick counts.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameClock {
    elapsed_secs: u32,
    running: bool,
    paused: bool,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.elapsed_secs = 0;
        self.running = true;
        self.paused = false;
    }

    pub fn pause(&mut self) {
        if self.running {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        if self.running {
            self.paused = false;
        }
    }

    /// Stop counting until the next `start()`. The count is kept for the
    /// game-over display.
    pub fn stop(&mut self) {
        self.running = false;
        self.paused = false;
    }

    /// One real second has passed. Returns the new count, or `None` if the
    /// clock is stopped or paused (a late interval callback is harmless).
    pub fn tick(&mut self) -> Option<u32> {
        if !self.running || self.paused {
            return None;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Some(self.elapsed_secs)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}
