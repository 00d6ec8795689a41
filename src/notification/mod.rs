//! Completion alert scheduling.
//!
//! The countdown arms one fire-once alert when it starts playing and cancels
//! every pending alert on reset or completion. Delivery is behind the
//! [`AlertScheduler`] trait:
//!
//! - [`LocalAlertScheduler`]: tokio timer per alert, presented on the screen
//! - `MacAlertScheduler` (macOS only): `UNUserNotificationCenter` with a
//!   time-interval trigger
//! - [`MockAlertScheduler`]: records requests for tests
//!
//! Scheduling is fire-and-forget. Failures are returned to the caller, which
//! logs them and carries on.
//!
//! # Example
//!
//! ```rust,no_run
//! use easy_timer::notification::{
//!     countdown_finished_request, AlertDelegate, AlertScheduler, LocalAlertScheduler,
//! };
//!
//! # async fn run() {
//! let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
//! let scheduler = LocalAlertScheduler::new(AlertDelegate::new(tx));
//!
//! if let Err(e) = scheduler.schedule(&countdown_finished_request(60)) {
//!     tracing::warn!("Could not arm alert: {}", e);
//! }
//!
//! while let Some(event) = rx.recv().await {
//!     println!("{:?}", event);
//! }
//! # }
//! ```

mod content;
mod delegate;
pub mod error;
mod local;
#[cfg(target_os = "macos")]
mod macos;
mod request;

use std::sync::Arc;

pub use self::content::{
    countdown_finished_content, sanitize_text, AlertContent, AlertContentBuilder, ALERT_BODY,
    ALERT_TITLE,
};
pub use self::delegate::{AlertDelegate, AlertEvent, AlertResponse, PresentationOptions};
pub use self::error::NotificationError;
pub use self::local::LocalAlertScheduler;
#[cfg(target_os = "macos")]
pub use self::macos::MacAlertScheduler;
pub use self::request::{countdown_finished_request, AlertRequest, COUNTDOWN_ALERT_ID};

/// Arms and cancels fire-once alerts.
pub trait AlertScheduler {
    /// Arms `request`, replacing any pending alert with the same identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request was rejected before it could be armed.
    /// Failures reported later by the backend are only logged.
    fn schedule(&self, request: &AlertRequest) -> Result<(), NotificationError>;

    /// Removes every pending alert.
    fn cancel_all(&self);
}

impl<T: AlertScheduler + ?Sized> AlertScheduler for Box<T> {
    fn schedule(&self, request: &AlertRequest) -> Result<(), NotificationError> {
        (**self).schedule(request)
    }

    fn cancel_all(&self) {
        (**self).cancel_all()
    }
}

impl<T: AlertScheduler + ?Sized> AlertScheduler for Arc<T> {
    fn schedule(&self, request: &AlertRequest) -> Result<(), NotificationError> {
        (**self).schedule(request)
    }

    fn cancel_all(&self) {
        (**self).cancel_all()
    }
}

/// Scheduler that records every call.
#[derive(Debug, Default)]
pub struct MockAlertScheduler {
    scheduled: std::sync::Mutex<Vec<AlertRequest>>,
    cancel_count: std::sync::atomic::AtomicUsize,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockAlertScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    /// Every request passed to `schedule`, in order.
    #[must_use]
    pub fn get_scheduled(&self) -> Vec<AlertRequest> {
        self.scheduled.lock().unwrap().clone()
    }

    #[must_use]
    pub fn schedule_count(&self) -> usize {
        self.scheduled.lock().unwrap().len()
    }

    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.cancel_count.load(std::sync::atomic::Ordering::SeqCst)
    }

    /// The most recently armed request.
    #[must_use]
    pub fn last_scheduled(&self) -> Option<AlertRequest> {
        self.scheduled.lock().unwrap().last().cloned()
    }

    pub fn clear_recorded(&self) {
        self.scheduled.lock().unwrap().clear();
        self.cancel_count
            .store(0, std::sync::atomic::Ordering::SeqCst);
    }
}

impl AlertScheduler for MockAlertScheduler {
    fn schedule(&self, request: &AlertRequest) -> Result<(), NotificationError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.scheduled.lock().unwrap().push(request.clone());
        Ok(())
    }

    fn cancel_all(&self) {
        self.cancel_count
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_mock_records_requests() {
        let mock = MockAlertScheduler::new();

        mock.schedule(&countdown_finished_request(60)).unwrap();
        mock.schedule(&countdown_finished_request(15)).unwrap();

        assert_eq!(mock.schedule_count(), 2);
        assert_eq!(
            mock.last_scheduled().unwrap().delay,
            Duration::from_secs(15)
        );
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockAlertScheduler::new();
        mock.set_should_fail(true);

        assert!(mock.schedule(&countdown_finished_request(60)).is_err());
        assert_eq!(mock.schedule_count(), 0);
    }

    #[test]
    fn test_mock_counts_cancellations() {
        let mock = MockAlertScheduler::new();
        mock.cancel_all();
        mock.cancel_all();
        assert_eq!(mock.cancel_count(), 2);

        mock.clear_recorded();
        assert_eq!(mock.cancel_count(), 0);
    }

    #[test]
    fn test_boxed_scheduler_delegates() {
        let mock = Arc::new(MockAlertScheduler::new());
        let boxed: Box<dyn AlertScheduler> = Box::new(Arc::clone(&mock));

        boxed.schedule(&countdown_finished_request(60)).unwrap();
        boxed.cancel_all();

        assert_eq!(mock.schedule_count(), 1);
        assert_eq!(mock.cancel_count(), 1);
    }
}
