//! Alarm playback.
//!
//! Each expiry of the countdown produces one [`AlertJob`]. The job runs on a
//! background thread and blocks until the clip finishes or its cancel flag is
//! raised, polling the sink every [`POLL_INTERVAL`].

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink};
use thiserror::Error;
use tracing::{debug, info};

/// How often a playing alert checks whether it should stop early.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("Alarm sound file not found: {}", .0.display())]
    SoundNotFound(PathBuf),

    #[error("No audio output device available: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),

    #[error("Failed to decode alarm sound: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),

    #[error("Playback failed: {0}")]
    Playback(#[from] rodio::PlayError),

    #[error("Failed to read alarm sound: {0}")]
    Io(#[from] io::Error),
}

/// Something that can play the alarm once.
pub trait AlertPlayer: Send + Sync {
    /// Play the alarm, blocking until it ends or `cancel` is set.
    fn play(&self, cancel: &AtomicBool) -> Result<(), AlertError>;
}

pub struct RodioPlayer {
    sound_path: PathBuf,
    volume: f32,
}

impl RodioPlayer {
    pub fn new(sound_path: PathBuf, volume: f32) -> Self {
        Self { sound_path, volume }
    }

    fn open(&self) -> Result<BufReader<File>, AlertError> {
        match File::open(&self.sound_path) {
            Ok(file) => Ok(BufReader::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AlertError::SoundNotFound(self.sound_path.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl AlertPlayer for RodioPlayer {
    fn play(&self, cancel: &AtomicBool) -> Result<(), AlertError> {
        let source = Decoder::new(self.open()?)?;

        // The stream must outlive the sink, keep it bound until the end.
        let (_stream, stream_handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&stream_handle)?;
        sink.set_volume(self.volume);
        sink.append(source);

        while !sink.empty() {
            if cancel.load(Ordering::SeqCst) {
                debug!("Alarm playback cancelled");
                sink.stop();
                return Ok(());
            }
            thread::sleep(POLL_INTERVAL);
        }

        debug!("Alarm playback finished");
        Ok(())
    }
}

/// One alarm firing, ready to run off the UI thread.
pub struct AlertJob {
    player: Arc<dyn AlertPlayer>,
    cancel: Arc<AtomicBool>,
}

impl AlertJob {
    pub fn new(player: Arc<dyn AlertPlayer>) -> Self {
        Self {
            player,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops this job when set.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    pub fn run(self) -> Result<(), AlertError> {
        if self.cancel.load(Ordering::SeqCst) {
            return Ok(());
        }
        info!("Playing alarm");
        self.player.play(&self.cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct CountingPlayer {
        plays: AtomicUsize,
    }

    impl AlertPlayer for CountingPlayer {
        fn play(&self, _cancel: &AtomicBool) -> Result<(), AlertError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn missing_sound_file_is_reported_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarm.wav");
        let player = RodioPlayer::new(path.clone(), 1.0);

        let err = player.play(&AtomicBool::new(false)).unwrap_err();
        match err {
            AlertError::SoundNotFound(p) => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn undecodable_sound_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alarm.wav");
        std::fs::write(&path, b"definitely not a wave file").unwrap();
        let player = RodioPlayer::new(path, 1.0);

        let err = player.play(&AtomicBool::new(false)).unwrap_err();
        assert!(matches!(err, AlertError::Decode(_)), "got {err}");
    }

    #[test]
    fn cancelled_job_never_reaches_player() {
        let player = Arc::new(CountingPlayer {
            plays: AtomicUsize::new(0),
        });
        let job = AlertJob::new(player.clone());
        job.cancel_flag().store(true, Ordering::SeqCst);

        job.run().unwrap();
        assert_eq!(player.plays.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn job_plays_once() {
        let player = Arc::new(CountingPlayer {
            plays: AtomicUsize::new(0),
        });
        AlertJob::new(player.clone()).run().unwrap();
        assert_eq!(player.plays.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn not_found_message_names_the_file() {
        let err = AlertError::SoundNotFound(PathBuf::from("/tmp/alarm.wav"));
        assert_eq!(err.to_string(), "Alarm sound file not found: /tmp/alarm.wav");
    }
}
