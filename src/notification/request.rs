//! Alert request creation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::content::{countdown_finished_content, AlertContent};
use super::error::NotificationError;

/// Identifier of the countdown-finished alert.
///
/// Constant so that re-arming replaces the pending alert instead of adding a
/// second one.
pub const COUNTDOWN_ALERT_ID: &str = "easy-timer.countdown-finished";

/// A fire-once alert to be delivered after `delay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRequest {
    pub identifier: String,
    pub content: AlertContent,
    pub delay: Duration,
}

impl AlertRequest {
    /// Creates a request with the given identifier.
    #[must_use]
    pub fn new(identifier: impl Into<String>, content: AlertContent, delay: Duration) -> Self {
        Self {
            identifier: identifier.into(),
            content,
            delay,
        }
    }

    /// Checks the request can be handed to a backend.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::InvalidInput` for an empty identifier or a
    /// zero delay (system triggers require a positive interval).
    pub fn validate(&self) -> Result<(), NotificationError> {
        if self.identifier.is_empty() {
            return Err(NotificationError::InvalidInput(
                "identifier must not be empty".to_string(),
            ));
        }
        if self.delay.is_zero() {
            return Err(NotificationError::InvalidInput(
                "delay must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Creates the countdown-finished alert armed `delay_seconds` from now.
#[must_use]
pub fn countdown_finished_request(delay_seconds: u32) -> AlertRequest {
    AlertRequest::new(
        COUNTDOWN_ALERT_ID,
        countdown_finished_content(),
        Duration::from_secs(u64::from(delay_seconds)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_finished_request() {
        let request = countdown_finished_request(45);
        assert_eq!(request.identifier, COUNTDOWN_ALERT_ID);
        assert_eq!(request.delay, Duration::from_secs(45));
        assert_eq!(request.content.title, "Important Message");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_delay() {
        let request = countdown_finished_request(0);
        assert!(matches!(
            request.validate(),
            Err(NotificationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_rejects_empty_identifier() {
        let request = AlertRequest::new("", AlertContent::default(), Duration::from_secs(1));
        assert!(request.validate().is_err());
    }
}
