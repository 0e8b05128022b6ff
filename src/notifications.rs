use notify_rust::Notification;
use tracing::warn;

use crate::alert::AlertError;
use crate::topmost::TopmostError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A recoverable problem shown to the user as a modal prompt.
#[derive(Debug)]
pub enum Notice {
    AlreadyRunning,
    InvalidInterval,
    AlertFailed(AlertError),
    PinUnavailable(TopmostError),
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::AlreadyRunning => Severity::Info,
            Notice::InvalidInterval | Notice::AlertFailed(_) | Notice::PinUnavailable(_) => {
                Severity::Error
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self.severity() {
            Severity::Info => "Notice",
            Severity::Error => "Error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::AlreadyRunning => "The timer is already running!".to_string(),
            Notice::InvalidInterval => "The interval must be greater than 0!".to_string(),
            Notice::AlertFailed(AlertError::SoundNotFound(path)) => {
                format!("Alarm sound file not found!\n{}", path.display())
            }
            Notice::AlertFailed(e) => format!("Unexpected error: {}", e),
            Notice::PinUnavailable(e) => format!("Could not pin the window: {}", e),
        }
    }
}

impl From<AlertError> for Notice {
    fn from(e: AlertError) -> Self {
        Notice::AlertFailed(e)
    }
}

pub fn notify_alert_fired(interval_secs: u32) {
    let result = Notification::new()
        .summary("Smoke Alert")
        .body(&format!("{} seconds are up. Countdown restarted.", interval_secs))
        .timeout(5000)
        .show();

    if let Err(e) = result {
        warn!("Failed to show desktop notification: {}", e);
    }
}
