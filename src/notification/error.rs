//! Notification system error types.
//!
//! None of these are fatal to the countdown: a failed schedule is logged and
//! the timer keeps running without an armed alert.

use thiserror::Error;

/// Errors that can occur in the notification system.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to request notification authorization from the system.
    #[error("failed to request notification authorization: {0}")]
    AuthorizationFailed(String),

    /// Failed to schedule an alert.
    #[error("failed to schedule alert: {0}")]
    SendFailed(String),

    /// Notification permission was denied by the user.
    #[error("notification permission denied")]
    PermissionDenied,

    /// Failed to initialize the notification system.
    #[error("failed to initialize notifications: {0}")]
    InitializationFailed(String),

    /// Invalid input provided to the notification system.
    #[error("invalid alert: {0}")]
    InvalidInput(String),

    /// The backend cannot be used here (no runtime, unsupported platform).
    #[error("notification backend not available: {0}")]
    NotAvailable(String),
}

impl NotificationError {
    /// Returns true if this error is related to permissions.
    #[must_use]
    pub fn is_permission_error(&self) -> bool {
        matches!(self, Self::PermissionDenied | Self::AuthorizationFailed(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::AuthorizationFailed(_) | Self::PermissionDenied => {
                "allow notifications for the app in the system settings"
            }
            Self::SendFailed(_) => "check the notification center",
            Self::InitializationFailed(_) => "restart the timer",
            Self::InvalidInput(_) => "check the alert content",
            Self::NotAvailable(_) => "use --backend local",
        }
    }
}
