//! Countdown engine.
//!
//! This module provides the countdown state machine:
//! - Play / pause / reset transitions with alert side effects
//! - One-unit advance per tick and completion
//! - Background / foreground reconciliation through the timestamp store
//! - Event firing for the screen

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::reconcile::{reconcile, ReconcileOutcome};
use crate::notification::{countdown_finished_request, AlertScheduler};
use crate::store::TimestampStore;
use crate::types::{AlertDelay, CountdownSession, TickOutcome, SAVE_TIME_KEY};

// ============================================================================
// CountdownEvent
// ============================================================================

/// Countdown events for the screen and other observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownEvent {
    /// The countdown started or resumed
    Started {
        /// Units already counted
        elapsed: u32,
        /// Seconds until the completion alert fires
        alert_delay: u32,
    },
    /// The countdown was paused
    Paused {
        /// Units counted so far
        elapsed: u32,
    },
    /// The countdown was reset to zero
    Reset,
    /// One unit was counted
    Tick {
        /// Units counted so far
        elapsed: u32,
    },
    /// The countdown finished and stopped
    Completed,
    /// The app went to the background
    Suspended {
        /// When the suspension was recorded
        at: DateTime<Utc>,
    },
    /// The app returned to the foreground
    Resumed(ReconcileOutcome),
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Countdown state machine wired to an alert scheduler and a timestamp store.
pub struct CountdownEngine<S, K> {
    /// Current session
    session: CountdownSession,
    /// Completion alert backend
    scheduler: S,
    /// Holds the suspension timestamp between background and foreground
    store: K,
    /// How far ahead the alert is armed on play
    alert_delay: AlertDelay,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<CountdownEvent>,
}

impl<S: AlertScheduler, K: TimestampStore> CountdownEngine<S, K> {
    /// Creates an engine with an idle session.
    pub fn new(
        scheduler: S,
        store: K,
        alert_delay: AlertDelay,
        event_tx: mpsc::UnboundedSender<CountdownEvent>,
    ) -> Self {
        Self {
            session: CountdownSession::new(),
            scheduler,
            store,
            alert_delay,
            event_tx,
        }
    }

    /// Play/pause button: pauses a running countdown, plays otherwise.
    pub fn toggle(&mut self) -> Result<()> {
        if self.session.is_running() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Starts or resumes the countdown and arms the completion alert.
    ///
    /// A completed countdown is reset first, so play never continues past
    /// completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown is already running.
    pub fn play(&mut self) -> Result<()> {
        if self.session.is_running() {
            bail!("the countdown is already running");
        }

        if self.session.is_full() {
            debug!("Countdown already complete, restarting from zero");
            self.session.zero();
            self.scheduler.cancel_all();
        }

        self.session.set_running(true);

        let delay = self.alert_delay.seconds_for(self.session.elapsed());
        if let Err(e) = self.scheduler.schedule(&countdown_finished_request(delay)) {
            warn!("Failed to arm the completion alert: {}", e);
        }

        self.emit(CountdownEvent::Started {
            elapsed: self.session.elapsed(),
            alert_delay: delay,
        })
    }

    /// Pauses the countdown. The armed alert is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the countdown is not running.
    pub fn pause(&mut self) -> Result<()> {
        if !self.session.is_running() {
            bail!("the countdown is not running");
        }

        self.session.set_running(false);

        self.emit(CountdownEvent::Paused {
            elapsed: self.session.elapsed(),
        })
    }

    /// Restart button: zeroes the count, cancels alerts and forgets any saved
    /// suspension time. The running flag is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved suspension time could not be removed.
    pub fn reset(&mut self) -> Result<()> {
        self.session.zero();
        self.scheduler.cancel_all();
        self.emit(CountdownEvent::Reset)?;

        self.store
            .remove(SAVE_TIME_KEY)
            .context("Failed to clear the saved suspension time")
    }

    /// Advances the countdown by one unit.
    pub fn tick(&mut self) -> Result<TickOutcome> {
        let outcome = self.session.tick();

        match outcome {
            TickOutcome::Advanced => self.emit(CountdownEvent::Tick {
                elapsed: self.session.elapsed(),
            })?,
            TickOutcome::Completed => {
                info!("Countdown completed");
                self.scheduler.cancel_all();
                self.emit(CountdownEvent::Completed)?;
            }
            TickOutcome::Idle => {}
        }

        Ok(outcome)
    }

    /// Records the suspension time, overwriting any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn enter_background(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.store
            .set(SAVE_TIME_KEY, now)
            .context("Failed to save the suspension time")?;

        info!("App going to the background at {}", now);
        self.emit(CountdownEvent::Suspended { at: now })
    }

    /// Folds the time spent in the background into the countdown.
    ///
    /// The saved suspension time is always cleared. The caller is
    /// responsible for recreating the tick source.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or cleared.
    pub fn enter_foreground(&mut self, now: DateTime<Utc>) -> Result<ReconcileOutcome> {
        let suspended_at = match self.store.get(SAVE_TIME_KEY) {
            Ok(at) => at,
            Err(e) => {
                // The saved time never outlives a foreground, even when unreadable.
                if let Err(remove_err) = self.store.remove(SAVE_TIME_KEY) {
                    warn!("Failed to clear the saved suspension time: {}", remove_err);
                }
                return Err(e).context("Failed to read the saved suspension time");
            }
        };

        let outcome = reconcile(&mut self.session, suspended_at, now);

        match outcome {
            ReconcileOutcome::NothingSaved => {
                debug!("App returning to the foreground, nothing to reconcile");
            }
            ReconcileOutcome::CaughtUp {
                delta_seconds,
                elapsed,
            } => {
                info!(
                    "App returning to the foreground after {}s, caught up to {}",
                    delta_seconds, elapsed
                );
            }
            ReconcileOutcome::ForcedReset {
                delta_seconds,
                reason,
            } => {
                info!(
                    "App returning to the foreground after {}s, resetting ({})",
                    delta_seconds,
                    reason.as_str()
                );
                self.scheduler.cancel_all();
            }
        }

        if suspended_at.is_some() {
            self.store
                .remove(SAVE_TIME_KEY)
                .context("Failed to clear the saved suspension time")?;
        }

        self.emit(CountdownEvent::Resumed(outcome))?;
        Ok(outcome)
    }

    /// Returns a reference to the current session.
    pub fn session(&self) -> &CountdownSession {
        &self.session
    }

    /// Returns the alert scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Returns the timestamp store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Returns the alert delay policy.
    pub fn alert_delay(&self) -> AlertDelay {
        self.alert_delay
    }

    /// Returns a mutable reference to the session (for testing).
    #[cfg(test)]
    pub fn session_mut(&mut self) -> &mut CountdownSession {
        &mut self.session
    }

    fn emit(&self, event: CountdownEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Failed to send countdown event")
    }
}

// ============================================================================
// Tests
// ============================================================================
