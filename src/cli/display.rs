//! Display utilities for the easy-timer CLI.
//!
//! This module provides formatted output for:
//! - The countdown readout and progress bar
//! - Countdown and alert events on the timer screen
//! - The saved suspension timestamp
//! - Error messages

use chrono::{DateTime, Utc};

use crate::engine::{CountdownEvent, ReconcileOutcome};
use crate::notification::AlertContent;
use crate::types::{CountdownPhase, SessionSnapshot, TOTAL_UNITS};

/// Width of the text progress bar, in cells.
const PROGRESS_BAR_WIDTH: usize = 30;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the screen header.
    pub fn show_banner() {
        println!("easy-timer: {}-second countdown", TOTAL_UNITS);
        println!("Type p to play or pause, r to restart, h for help.");
    }

    /// Shows the command list.
    pub fn show_help() {
        println!("Commands:");
        for (_, names, description) in crate::screen::ScreenCommand::ALL {
            println!("  {:<24} {}", names.join(", "), description);
        }
    }

    /// Shows the readout, the progress bar and the button labels.
    pub fn show_session(snapshot: &SessionSnapshot) {
        println!("{}", Self::format_session(snapshot));
    }

    /// Shows a countdown event.
    pub fn show_countdown_event(event: &CountdownEvent, snapshot: &SessionSnapshot) {
        match event {
            CountdownEvent::Started {
                elapsed,
                alert_delay,
            } => {
                println!(
                    "> Started at {} (alert in {}s)",
                    Self::format_readout(*elapsed),
                    alert_delay
                );
            }
            CountdownEvent::Paused { elapsed } => {
                println!("|| Paused at {}", Self::format_readout(*elapsed));
            }
            CountdownEvent::Reset => {
                println!("<< Restarted");
                Self::show_session(snapshot);
            }
            CountdownEvent::Tick { .. } => {
                Self::show_session(snapshot);
            }
            CountdownEvent::Completed => {
                println!("* Countdown complete");
                Self::show_session(snapshot);
            }
            CountdownEvent::Suspended { at } => {
                println!("-- In the background since {}", Self::format_timestamp(at));
            }
            CountdownEvent::Resumed(outcome) => {
                println!("-- {}", Self::format_outcome(outcome));
                Self::show_session(snapshot);
            }
        }
    }

    /// Shows a delivered alert.
    pub fn show_alert(content: &AlertContent) {
        println!();
        println!("[!] {}", content.title);
        if !content.subtitle.is_empty() {
            println!("    {}", content.subtitle);
        }
        println!("    {}", content.body);
        println!();
    }

    /// Shows the saved suspension timestamp.
    pub fn show_saved_time(saved: Option<&DateTime<Utc>>, now: DateTime<Utc>) {
        match saved {
            Some(at) => {
                let seconds = crate::engine::whole_seconds_between(*at, now);
                println!("Suspended at {} ({}s ago)", Self::format_timestamp(at), seconds);
            }
            None => println!("No suspension time saved"),
        }
    }

    /// Shows the result of clearing the store.
    pub fn show_cleared(had_value: bool) {
        if had_value {
            println!("* Cleared the saved suspension time");
        } else {
            println!("Nothing to clear");
        }
    }

    /// Shows a non-fatal notice on the timer screen.
    pub fn show_notice(message: &str) {
        println!("! {}", message);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Formats the readout, e.g. `15 / 60`.
    pub fn format_readout(elapsed: u32) -> String {
        format!("{} / {}", elapsed, TOTAL_UNITS)
    }

    /// Formats `fraction` (0.0 to 1.0) as a fixed-width bar.
    pub fn format_progress_bar(fraction: f64, width: usize) -> String {
        let fraction = fraction.clamp(0.0, 1.0);
        let filled = (fraction * width as f64).round() as usize;
        format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
    }

    /// Label of the play/pause toggle for a phase.
    pub fn toggle_label(phase: CountdownPhase) -> &'static str {
        match phase {
            CountdownPhase::Running => "Pause",
            _ => "Play",
        }
    }

    fn format_session(snapshot: &SessionSnapshot) -> String {
        format!(
            "{} {:>7} {:>3.0}%  [{}] [Restart]",
            Self::format_progress_bar(snapshot.progress, PROGRESS_BAR_WIDTH),
            Self::format_readout(snapshot.elapsed),
            snapshot.progress * 100.0,
            Self::toggle_label(snapshot.phase),
        )
    }

    fn format_outcome(outcome: &ReconcileOutcome) -> String {
        match outcome {
            ReconcileOutcome::NothingSaved => "Back in the foreground".to_string(),
            ReconcileOutcome::CaughtUp { delta_seconds, .. } => {
                format!("Back after {}s, caught up", delta_seconds)
            }
            ReconcileOutcome::ForcedReset {
                delta_seconds,
                reason,
            } => format!(
                "Back after {}s, countdown reset ({})",
                delta_seconds,
                reason.as_str()
            ),
        }
    }

    fn format_timestamp(at: &DateTime<Utc>) -> String {
        at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ResetReason;
    use crate::types::CountdownSession;
    use chrono::TimeZone;

    // ------------------------------------------------------------------------
    // Readout / Progress Tests
    // ------------------------------------------------------------------------

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_readout() {
            assert_eq!(Display::format_readout(0), "0 / 60");
            assert_eq!(Display::format_readout(15), "15 / 60");
            assert_eq!(Display::format_readout(60), "60 / 60");
        }

        #[test]
        fn test_progress_bar_empty() {
            assert_eq!(Display::format_progress_bar(0.0, 4), "[....]");
        }

        #[test]
        fn test_progress_bar_half() {
            assert_eq!(Display::format_progress_bar(0.5, 4), "[##..]");
        }

        #[test]
        fn test_progress_bar_full() {
            assert_eq!(Display::format_progress_bar(1.0, 4), "[####]");
        }

        #[test]
        fn test_progress_bar_clamps() {
            assert_eq!(Display::format_progress_bar(1.5, 4), "[####]");
            assert_eq!(Display::format_progress_bar(-0.5, 4), "[....]");
        }

        #[test]
        fn test_toggle_label() {
            assert_eq!(Display::toggle_label(CountdownPhase::Idle), "Play");
            assert_eq!(Display::toggle_label(CountdownPhase::Running), "Pause");
            assert_eq!(Display::toggle_label(CountdownPhase::Paused), "Play");
            assert_eq!(Display::toggle_label(CountdownPhase::Completed), "Play");
        }

        #[test]
        fn test_format_session() {
            let snapshot = CountdownSession::with_elapsed(15, true).snapshot();
            let line = Display::format_session(&snapshot);

            assert!(line.contains("15 / 60"));
            assert!(line.contains("25%"));
            assert!(line.contains("[Pause]"));
            assert!(line.contains("[Restart]"));
        }
    }

    // ------------------------------------------------------------------------
    // Outcome Tests
    // ------------------------------------------------------------------------

    mod outcome_tests {
        use super::*;

        #[test]
        fn test_format_caught_up() {
            let text = Display::format_outcome(&ReconcileOutcome::CaughtUp {
                delta_seconds: 5,
                elapsed: 15,
            });
            assert!(text.contains("5s"));
            assert!(text.contains("caught up"));
        }

        #[test]
        fn test_format_forced_reset() {
            let text = Display::format_outcome(&ReconcileOutcome::ForcedReset {
                delta_seconds: 70,
                reason: ResetReason::LongAbsence,
            });
            assert!(text.contains("70s"));
            assert!(text.contains("reset"));
        }

        #[test]
        fn test_format_timestamp() {
            let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
            assert_eq!(Display::format_timestamp(&at), "2023-11-14 22:13:20 UTC");
        }
    }
}
