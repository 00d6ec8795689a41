//! Countdown engine, tick source and suspension reconciliation.

pub mod countdown;
pub mod reconcile;
pub mod ticker;

pub use countdown::{CountdownEngine, CountdownEvent};
pub use reconcile::{reconcile, whole_seconds_between, ReconcileOutcome, ResetReason};
pub use ticker::{Ticker, TICK_PERIOD};
