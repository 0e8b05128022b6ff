use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::alert::{AlertError, AlertJob, AlertPlayer};
use crate::notifications::Notice;
use crate::state::{TickOutcome, TimerState};
use crate::topmost::PinTarget;

/// Countdown controller. Owns the timer state and the cancel flag of the
/// alarm currently playing, if any.
pub struct Timer {
    state: TimerState,
    player: Arc<dyn AlertPlayer>,
    active_alert: Option<Arc<AtomicBool>>,
    // Set once a playback failure has been shown, until a clean play or restart
    alert_failure_reported: bool,
}

impl Timer {
    pub fn new(state: TimerState, player: Arc<dyn AlertPlayer>) -> Self {
        Self {
            state,
            player,
            active_alert: None,
            alert_failure_reported: false,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Start counting down from `interval` seconds.
    ///
    /// `interval` is the raw value from the input field; `None` means it
    /// could not be parsed.
    pub fn start(&mut self, interval: Option<i64>) -> Result<(), Notice> {
        if self.state.is_running {
            return Err(Notice::AlreadyRunning);
        }

        let interval = interval
            .filter(|secs| *secs > 0)
            .and_then(|secs| u32::try_from(secs).ok())
            .ok_or(Notice::InvalidInterval)?;

        self.state.begin(interval);
        self.alert_failure_reported = false;
        info!("Timer started with {}s interval", interval);
        Ok(())
    }

    pub fn stop(&mut self) {
        if self.state.is_running {
            info!("Timer stopped");
        }
        self.state.halt();
        self.cancel_alert();
    }

    /// Advance the countdown by one second.
    ///
    /// Returns the alarm to play when the countdown crossed zero. Any alarm
    /// still playing from the previous crossing is cancelled first.
    pub fn tick(&mut self) -> Option<AlertJob> {
        match self.state.advance() {
            TickOutcome::Idle => None,
            TickOutcome::Counting => {
                debug!("{}s remaining", self.state.remaining_secs);
                None
            }
            TickOutcome::Expired => {
                info!("Countdown expired, restarting at {}s", self.state.interval_secs);
                self.cancel_alert();
                let job = AlertJob::new(self.player.clone());
                self.active_alert = Some(job.cancel_flag());
                Some(job)
            }
        }
    }

    /// Flip the pinned flag, applying the new value to `target` first.
    ///
    /// When the window refuses the change the flag stays as it was.
    pub fn toggle_pinned(&mut self, target: &mut dyn PinTarget) -> Result<bool, Notice> {
        let pinned = !self.state.is_pinned;
        target.set_pinned(pinned).map_err(Notice::PinUnavailable)?;
        self.state.toggle_pinned();
        info!("Window pinned: {}", pinned);
        Ok(pinned)
    }

    /// Record how an alarm playback ended. Returns the notice to show, which
    /// happens only for the first failure of a run of failures.
    pub fn alert_finished(&mut self, result: Result<(), AlertError>) -> Option<Notice> {
        match result {
            Ok(()) => {
                self.alert_failure_reported = false;
                None
            }
            Err(e) if self.alert_failure_reported => {
                debug!("Suppressing repeated alarm failure: {}", e);
                None
            }
            Err(e) => {
                self.alert_failure_reported = true;
                Some(Notice::AlertFailed(e))
            }
        }
    }

    fn cancel_alert(&mut self) {
        if let Some(flag) = self.active_alert.take() {
            flag.store(true, Ordering::SeqCst);
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel_alert();
    }
}
