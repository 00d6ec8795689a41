//! macOS notification center backend.
//!
//! Arms alerts with `UNTimeIntervalNotificationTrigger` so they fire even if
//! the timer process is suspended.
//!
//! # Requirements
//!
//! - macOS 10.14+
//! - The binary must be code-signed for notifications to work properly:
//!
//! ```bash
//! codesign --force --deep --sign - target/release/easy-timer
//! ```

mod center;
mod content;
mod delegate;

use objc2::rc::Retained;
use objc2::MainThreadMarker;
use tracing::warn;

use self::center::NotificationCenter;
use self::content::create_notification_request;
use self::delegate::NotificationDelegate;
use super::delegate::AlertDelegate;
use super::error::NotificationError;
use super::request::AlertRequest;
use super::AlertScheduler;

/// Alert scheduler backed by `UNUserNotificationCenter`.
pub struct MacAlertScheduler {
    /// Retained delegate to keep it alive.
    _delegate: Retained<NotificationDelegate>,
}

impl MacAlertScheduler {
    /// Requests authorization and installs the delegate.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Not running on the main thread
    /// - Authorization is denied or fails
    pub async fn new(delegate: AlertDelegate) -> Result<Self, NotificationError> {
        let mtm = MainThreadMarker::new().ok_or_else(|| {
            NotificationError::InitializationFailed(
                "notifications must be initialized on the main thread".to_string(),
            )
        })?;

        let granted = NotificationCenter::request_authorization().await?;
        if !granted {
            return Err(NotificationError::PermissionDenied);
        }

        let native = NotificationDelegate::new(mtm, delegate);
        NotificationCenter::set_delegate(&NotificationDelegate::as_protocol(&native));

        Ok(Self { _delegate: native })
    }

    /// Creates the scheduler, returning `None` (with a warning) on failure.
    pub async fn new_with_fallback(delegate: AlertDelegate) -> Option<Self> {
        match Self::new(delegate).await {
            Ok(scheduler) => Some(scheduler),
            Err(e) => {
                warn!("System notifications unavailable: {} ({})", e, e.suggestion());
                None
            }
        }
    }
}

impl AlertScheduler for MacAlertScheduler {
    fn schedule(&self, request: &AlertRequest) -> Result<(), NotificationError> {
        request.validate()?;
        let native = create_notification_request(request);
        NotificationCenter::add_notification_request(&request.identifier, &native);
        Ok(())
    }

    fn cancel_all(&self) {
        NotificationCenter::remove_all_pending_notifications();
    }
}
