//! Suspension reconciliation.
//!
//! Ticks do not fire while the app is in the background, so the time spent
//! there is reconstructed from the wall clock when it returns. One unit of
//! `elapsed` is taken to be exactly one second.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{CountdownSession, TOTAL_UNITS};

/// Why a foreground transition reset the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    /// The countdown was not running when the app was suspended.
    NotRunning,
    /// The app stayed in the background for a full countdown or longer.
    LongAbsence,
    /// The folded-in time filled the countdown.
    Overrun,
}

impl ResetReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResetReason::NotRunning => "not running when suspended",
            ResetReason::LongAbsence => "suspended for a full countdown",
            ResetReason::Overrun => "countdown finished while suspended",
        }
    }
}

/// Result of reconciling a foreground transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcileOutcome {
    /// No suspension timestamp was stored.
    NothingSaved,
    /// The suspended time was folded into the running countdown.
    CaughtUp { delta_seconds: u32, elapsed: u32 },
    /// The countdown was returned to its initial state.
    ForcedReset { delta_seconds: u32, reason: ResetReason },
}

impl ReconcileOutcome {
    /// Returns true if the caller must cancel pending alerts.
    pub fn is_forced_reset(&self) -> bool {
        matches!(self, ReconcileOutcome::ForcedReset { .. })
    }
}

/// Whole seconds from `from` to `to`, truncated.
///
/// A clock that moved backwards yields zero.
pub fn whole_seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    let seconds = (to - from).num_seconds();
    u32::try_from(seconds.max(0)).unwrap_or(u32::MAX)
}

/// Folds the time since `suspended_at` into `session`.
///
/// `suspended_at` is consumed: whatever the outcome, the caller must not
/// reconcile the same timestamp again.
pub fn reconcile(
    session: &mut CountdownSession,
    suspended_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> ReconcileOutcome {
    let Some(suspended_at) = suspended_at else {
        return ReconcileOutcome::NothingSaved;
    };

    let delta_seconds = whole_seconds_between(suspended_at, now);
    let was_running = session.is_running();
    let folded = session.fold_seconds(delta_seconds);

    let reason = if !was_running {
        Some(ResetReason::NotRunning)
    } else if delta_seconds >= TOTAL_UNITS {
        Some(ResetReason::LongAbsence)
    } else if folded >= TOTAL_UNITS {
        Some(ResetReason::Overrun)
    } else {
        None
    };

    match reason {
        Some(reason) => {
            session.clear();
            ReconcileOutcome::ForcedReset {
                delta_seconds,
                reason,
            }
        }
        None => ReconcileOutcome::CaughtUp {
            delta_seconds,
            elapsed: session.elapsed(),
        },
    }
}
