//! Core data types for the countdown timer.
//!
//! This module defines the data structures used for:
//! - Countdown session state and its derived phase
//! - Application configuration with validation
//! - Serializable snapshots for status output

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of units (seconds) in one countdown.
pub const TOTAL_UNITS: u32 = 60;

/// Store key holding the instant the app last went to the background.
pub const SAVE_TIME_KEY: &str = "saveTime";

// ============================================================================
// CountdownPhase
// ============================================================================

/// Represents the observable phase of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownPhase {
    /// Nothing counted yet and not ticking
    #[default]
    Idle,
    /// Ticking
    Running,
    /// Not ticking, progress retained
    Paused,
    /// All units counted
    Completed,
}

impl CountdownPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            CountdownPhase::Idle => "idle",
            CountdownPhase::Running => "running",
            CountdownPhase::Paused => "paused",
            CountdownPhase::Completed => "completed",
        }
    }
}

// ============================================================================
// CountdownSession
// ============================================================================

/// Result of advancing the session by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is not running; nothing changed.
    Idle,
    /// One unit was counted.
    Advanced,
    /// The session was already full and has now stopped.
    Completed,
}

/// The single countdown session.
///
/// `elapsed` never leaves `0..=TOTAL_UNITS`. The progress fraction is
/// derived from it on every read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSession {
    elapsed: u32,
    running: bool,
}

impl CountdownSession {
    /// Creates a session in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Units counted so far.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Units left until completion.
    pub fn remaining(&self) -> u32 {
        TOTAL_UNITS - self.elapsed
    }

    /// Returns true if the per-tick advance is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns true once every unit has been counted.
    pub fn is_full(&self) -> bool {
        self.elapsed == TOTAL_UNITS
    }

    /// Fraction of the countdown completed, in `0.0..=1.0`.
    pub fn progress_fraction(&self) -> f64 {
        f64::from(self.elapsed) / f64::from(TOTAL_UNITS)
    }

    /// Returns the observable phase.
    pub fn phase(&self) -> CountdownPhase {
        match (self.running, self.elapsed) {
            (true, _) => CountdownPhase::Running,
            (false, 0) => CountdownPhase::Idle,
            (false, e) if e == TOTAL_UNITS => CountdownPhase::Completed,
            (false, _) => CountdownPhase::Paused,
        }
    }

    /// Sets the running flag.
    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Zeroes the counted units without touching the running flag.
    pub fn zero(&mut self) {
        self.elapsed = 0;
    }

    /// Returns the session to its initial state.
    pub fn clear(&mut self) {
        self.elapsed = 0;
        self.running = false;
    }

    /// Advances the session by one tick.
    ///
    /// A full session that is still running stops on this tick instead of
    /// counting further.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.elapsed < TOTAL_UNITS {
            self.elapsed += 1;
            TickOutcome::Advanced
        } else {
            self.running = false;
            TickOutcome::Completed
        }
    }

    /// Adds whole seconds spent suspended.
    ///
    /// Returns the unclamped total; `elapsed` itself is only updated when the
    /// total still fits in the countdown.
    pub fn fold_seconds(&mut self, seconds: u32) -> u32 {
        let folded = self.elapsed.saturating_add(seconds);
        if folded <= TOTAL_UNITS {
            self.elapsed = folded;
        }
        folded
    }

    /// Creates a snapshot for display or serialization.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            elapsed: self.elapsed,
            total: TOTAL_UNITS,
            remaining: self.remaining(),
            running: self.running,
            phase: self.phase(),
            progress: self.progress_fraction(),
        }
    }

    /// Builds a session directly from its fields (for testing).
    #[cfg(test)]
    pub(crate) fn with_elapsed(elapsed: u32, running: bool) -> Self {
        assert!(elapsed <= TOTAL_UNITS);
        Self { elapsed, running }
    }
}

/// Read-only view of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub elapsed: u32,
    pub total: u32,
    pub remaining: u32,
    pub running: bool,
    pub phase: CountdownPhase,
    pub progress: f64,
}

// ============================================================================
// Configuration
// ============================================================================

/// How far in the future the completion alert is armed on play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDelay {
    /// The units still left in the countdown
    #[default]
    Remaining,
    /// Always a full countdown, regardless of progress
    FullPeriod,
}

impl AlertDelay {
    /// Delay in seconds for a session with `elapsed` units counted.
    pub fn seconds_for(&self, elapsed: u32) -> u32 {
        match self {
            AlertDelay::Remaining => TOTAL_UNITS.saturating_sub(elapsed),
            AlertDelay::FullPeriod => TOTAL_UNITS,
        }
    }
}

/// Which alert backend delivers the completion alert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertBackend {
    /// In-process timer that prints the alert and plays the alarm sound
    #[default]
    Local,
    /// The operating system notification center (macOS only)
    System,
}

/// Where the suspension timestamp is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreLocation {
    /// In memory; lost when the process exits
    Memory,
    /// A JSON file on disk
    File(PathBuf),
}

/// Runtime configuration for the timer screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Timestamp store location
    pub store: StoreLocation,
    /// Whether the alarm sound is played when the alert fires
    pub sound_enabled: bool,
    /// Sound file used instead of the built-in chime
    pub sound_file: Option<PathBuf>,
    /// Alert delivery backend
    pub backend: AlertBackend,
    /// Alert delay policy
    pub alert_delay: AlertDelay,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreLocation::Memory,
            sound_enabled: true,
            sound_file: None,
            backend: AlertBackend::Local,
            alert_delay: AlertDelay::Remaining,
        }
    }
}

impl AppConfig {
    /// Sets the store location.
    pub fn with_store(mut self, store: StoreLocation) -> Self {
        self.store = store;
        self
    }

    /// Sets the alarm sound file.
    pub fn with_sound_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sound_file = Some(path.into());
        self
    }

    /// Sets the alert delay policy.
    pub fn with_alert_delay(mut self, alert_delay: AlertDelay) -> Self {
        self.alert_delay = alert_delay;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.sound_file {
            if !self.sound_enabled {
                return Err("a sound file was given but sound is disabled".to_string());
            }
            if !crate::sound::is_supported_audio_file(path) {
                return Err(format!(
                    "unsupported sound file '{}' (expected one of: {})",
                    path.display(),
                    crate::sound::SUPPORTED_EXTENSIONS.join(", ")
                ));
            }
        }
        if let StoreLocation::File(path) = &self.store {
            if path.as_os_str().is_empty() {
                return Err("the store path must not be empty".to_string());
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
