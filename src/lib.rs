//! easy-timer library
//!
//! This library provides the core functionality for the easy-timer CLI.
//! It includes:
//! - Countdown engine with play/pause/reset and completion
//! - Suspension reconciliation for time spent in the background
//! - A restartable one-second tick source
//! - Completion alert scheduling (in-process, or the macOS notification center)
//! - Timestamp store for the suspension time
//! - Sound playback for the alarm
//! - The interactive timer screen and CLI utilities

pub mod cli;
pub mod engine;
pub mod notification;
pub mod screen;
pub mod sound;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    AlertBackend, AlertDelay, AppConfig, CountdownPhase, CountdownSession, SessionSnapshot,
    StoreLocation, TickOutcome, SAVE_TIME_KEY, TOTAL_UNITS,
};

// Re-export engine types
pub use engine::{
    reconcile, CountdownEngine, CountdownEvent, ReconcileOutcome, ResetReason, Ticker, TICK_PERIOD,
};

// Re-export notification types
pub use notification::{
    AlertDelegate, AlertEvent, AlertRequest, AlertScheduler, LocalAlertScheduler,
    MockAlertScheduler, NotificationError,
};

// Re-export store types
pub use store::{AnyStore, JsonFileStore, MemoryStore, StoreError, TimestampStore};

// Re-export sound types
pub use sound::{
    resolve_alarm_sound, MockSoundPlayer, RodioSoundPlayer, SilentPlayer, SoundError, SoundPlayer,
    SoundSource,
};

pub use screen::{Screen, ScreenCommand};
