//! Sound source management.
//!
//! The completion alert names a fixed sound asset. It is looked up in the
//! timer's data directory; when it is missing a chime generated in-process is
//! used instead.

use std::path::{Path, PathBuf};

use super::error::SoundError;

/// Asset name of the alarm sound attached to the completion alert.
pub const ALARM_SOUND_NAME: &str = "AlarmSound1.wav";

/// Name of the generated fallback chime.
pub const BUILTIN_CHIME_NAME: &str = "chime";

/// Supported audio file extensions.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["aiff", "wav", "mp3", "m4a", "flac"];

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// The name of the sound (file stem).
        name: String,
        /// The full path to the sound file.
        path: PathBuf,
    },
    /// A chime synthesized at playback time.
    Builtin {
        /// The name of the built-in sound.
        name: String,
    },
}

impl SoundSource {
    /// Creates a file sound source without checking the path.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a file sound source, checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::UnsupportedFormat` or `SoundError::FileNotFound`.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        if !is_supported_audio_file(&path) {
            return Err(SoundError::UnsupportedFormat(path.display().to_string()));
        }
        if !path.is_file() {
            return Err(SoundError::FileNotFound(path.display().to_string()));
        }
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::File { name, path })
    }

    /// Creates a built-in sound source.
    #[must_use]
    pub fn builtin(name: impl Into<String>) -> Self {
        Self::Builtin { name: name.into() }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Builtin { name } => name,
        }
    }

    /// Returns true if this sound comes from a file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Returns true if this is the built-in chime.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin { .. })
    }

    /// Returns the file path if this is a file sound.
    #[must_use]
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::File { path, .. } => Some(path),
            Self::Builtin { .. } => None,
        }
    }
}

/// Returns true if the path has an extension we can decode.
#[must_use]
pub fn is_supported_audio_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Directory searched for the alarm sound asset.
#[must_use]
pub fn sound_asset_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("easy-timer").join("sounds"))
}

/// Resolves the sound played when the completion alert fires.
///
/// An explicit file wins; otherwise [`ALARM_SOUND_NAME`] is looked up in
/// [`sound_asset_dir`]; otherwise the built-in chime is used.
#[must_use]
pub fn resolve_alarm_sound(explicit: Option<&Path>) -> SoundSource {
    if let Some(path) = explicit {
        match SoundSource::file_validated(path) {
            Ok(source) => return source,
            Err(e) => tracing::warn!("Ignoring sound file: {}", e),
        }
    }

    if let Some(dir) = sound_asset_dir() {
        if let Ok(source) = SoundSource::file_validated(dir.join(ALARM_SOUND_NAME)) {
            return source;
        }
    }

    SoundSource::builtin(BUILTIN_CHIME_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_source_file() {
        let source = SoundSource::file("AlarmSound1", "/sounds/AlarmSound1.wav");
        assert!(source.is_file());
        assert!(!source.is_builtin());
        assert_eq!(source.name(), "AlarmSound1");
        assert!(source.path().is_some());
    }

    #[test]
    fn test_sound_source_builtin() {
        let source = SoundSource::builtin("chime");
        assert!(source.is_builtin());
        assert_eq!(source.name(), "chime");
        assert!(source.path().is_none());
    }

    #[test]
    fn test_is_supported_audio_file() {
        assert!(is_supported_audio_file(Path::new("AlarmSound1.wav")));
        assert!(is_supported_audio_file(Path::new("/a/b/Glass.AIFF")));
        assert!(!is_supported_audio_file(Path::new("notes.txt")));
        assert!(!is_supported_audio_file(Path::new("no_extension")));
    }

    #[test]
    fn test_file_validated_accepts_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("AlarmSound1.wav");
        std::fs::write(&path, b"RIFF").unwrap();

        let source = SoundSource::file_validated(&path).unwrap();
        assert_eq!(source.name(), "AlarmSound1");
        assert_eq!(source.path(), Some(&path));
    }

    #[test]
    fn test_file_validated_rejects_missing_file() {
        let result = SoundSource::file_validated("/nonexistent/AlarmSound1.wav");
        assert!(matches!(result, Err(SoundError::FileNotFound(_))));
    }

    #[test]
    fn test_file_validated_rejects_unsupported_extension() {
        let result = SoundSource::file_validated("/etc/passwd");
        assert!(matches!(result, Err(SoundError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_resolve_alarm_sound_prefers_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bell.flac");
        std::fs::write(&path, b"fLaC").unwrap();

        let source = resolve_alarm_sound(Some(&path));
        assert_eq!(source.name(), "bell");
    }

    #[test]
    fn test_resolve_alarm_sound_falls_back() {
        let source = resolve_alarm_sound(Some(Path::new("/nonexistent/bell.wav")));
        // Either the installed asset or the chime, never the missing file
        assert_ne!(source.name(), "bell");
        assert!(!source.name().is_empty());
    }
}
