//! Sound playback for the completion alert.
//!
//! This module provides audio notification capabilities, including:
//!
//! - Resolution of the alarm sound asset
//! - A generated chime when the asset is not installed
//! - Non-blocking audio playback
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   SoundPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────────────┐
//! │   SoundSource    │────▶│ <data_dir>/easy-timer/   │
//! │                  │     │   sounds/AlarmSound1.wav │
//! │                  │     ├──────────────────────────┤
//! │                  │────▶│ Built-in chime (fallback)│
//! └──────────────────┘     └──────────────────────────┘
//! ```

mod error;
mod player;
mod source;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{
    is_supported_audio_file, resolve_alarm_sound, sound_asset_dir, SoundSource,
    ALARM_SOUND_NAME, BUILTIN_CHIME_NAME, SUPPORTED_EXTENSIONS,
};

/// Trait for sound playback implementations.
///
/// This trait abstracts the sound playback functionality, allowing for
/// different implementations (e.g., rodio-based, mock for testing).
pub trait SoundPlayer {
    /// Plays a sound from the given source without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_disabled(&self) -> bool {
        RodioSoundPlayer::is_disabled(self)
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for Box<T> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
}

impl<T: SoundPlayer + ?Sized> SoundPlayer for std::sync::Arc<T> {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        (**self).play(source)
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }
}

/// Player used when audio is unavailable or turned off.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&self, _source: &SoundSource) -> Result<(), SoundError> {
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        true
    }
}

/// Mock sound player for testing.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    play_calls: std::sync::Mutex<Vec<SoundSource>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.lock().unwrap().len()
    }

    #[must_use]
    pub fn get_play_calls(&self) -> Vec<SoundSource> {
        self.play_calls.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        self.play_calls.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_player_records_calls() {
        let player = MockSoundPlayer::new();
        player.play(&SoundSource::builtin("chime")).unwrap();

        assert_eq!(player.play_count(), 1);
        assert_eq!(player.get_play_calls()[0].name(), "chime");
    }

    #[test]
    fn test_mock_player_failure() {
        let player = MockSoundPlayer::new();
        player.set_should_fail(true);

        assert!(player.play(&SoundSource::builtin("chime")).is_err());
        assert_eq!(player.play_count(), 0);
    }

    #[test]
    fn test_silent_player() {
        let player = SilentPlayer;
        assert!(player.is_disabled());
        assert!(player.play(&SoundSource::builtin("chime")).is_ok());
    }

    #[test]
    fn test_alarm_sound_name_is_supported() {
        assert!(is_supported_audio_file(std::path::Path::new(
            ALARM_SOUND_NAME
        )));
    }
}
