/// Placeholder shown in the remaining-time label while idle.
pub const IDLE_PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running, nothing changed.
    Idle,
    /// Countdown advanced by one second.
    Counting,
    /// Countdown crossed zero and was reset; an alert must fire.
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    pub interval_secs: u32,
    pub remaining_secs: u32,
    pub is_running: bool,
    pub is_pinned: bool,
}

impl TimerState {
    pub fn new(interval_secs: u32, is_pinned: bool) -> Self {
        Self {
            interval_secs,
            remaining_secs: 0,
            is_running: false,
            is_pinned,
        }
    }

    pub fn begin(&mut self, interval_secs: u32) {
        self.interval_secs = interval_secs;
        self.remaining_secs = interval_secs;
        self.is_running = true;
    }

    pub fn halt(&mut self) {
        self.is_running = false;
    }

    pub fn advance(&mut self) -> TickOutcome {
        if !self.is_running {
            return TickOutcome::Idle;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.remaining_secs = self.interval_secs;
            TickOutcome::Expired
        } else {
            TickOutcome::Counting
        }
    }

    pub fn toggle_pinned(&mut self) -> bool {
        self.is_pinned = !self.is_pinned;
        self.is_pinned
    }

    /// Remaining seconds, or `None` while idle.
    pub fn remaining(&self) -> Option<u32> {
        self.is_running.then_some(self.remaining_secs)
    }

    pub fn remaining_label(&self) -> String {
        match self.remaining() {
            Some(secs) => format!("Remaining: {} s", secs),
            None => format!("Remaining: {}", IDLE_PLACEHOLDER),
        }
    }

    pub fn can_start(&self) -> bool {
        !self.is_running
    }

    pub fn can_stop(&self) -> bool {
        self.is_running
    }

    pub fn pin_button_label(&self) -> &'static str {
        if self.is_pinned {
            "Unpin window"
        } else {
            "Pin window"
        }
    }

    /// Fraction of the current interval already elapsed, in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if !self.is_running || self.interval_secs == 0 {
            return 0.0;
        }
        let elapsed = self.interval_secs.saturating_sub(self.remaining_secs);
        elapsed as f32 / self.interval_secs as f32
    }
}
