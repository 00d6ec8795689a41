//! Sound system error types.
//!
//! Audio is optional for the timer: every error here is logged and the
//! countdown carries on without sound.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// The sound file has an extension we cannot play.
    #[error("unsupported sound file: {0}")]
    UnsupportedFormat(String),

    /// Generic sound playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if this error is related to the audio file.
    #[must_use]
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::DecodeError(_) | Self::UnsupportedFormat(_)
        )
    }

    /// Returns true if playback should fall back to the built-in chime.
    #[must_use]
    pub fn should_fallback_to_builtin(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio output device or pass --no-sound",
            Self::FileNotFound(_) => "the built-in chime will be played instead",
            Self::DecodeError(_) => "the sound file may be damaged",
            Self::StreamError(_) => "check the system audio settings",
            Self::UnsupportedFormat(_) => "use a wav, aiff, mp3, m4a or flac file",
            Self::PlaybackError(_) => "restart the timer",
        }
    }
}
