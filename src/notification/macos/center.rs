//! UNUserNotificationCenter wrapper.

use std::cell::RefCell;

use block2::RcBlock;
use objc2::rc::Retained;
use objc2::runtime::{Bool, ProtocolObject};
use objc2_foundation::NSError;
use objc2_user_notifications::{
    UNAuthorizationOptions, UNNotificationRequest, UNUserNotificationCenter,
    UNUserNotificationCenterDelegate,
};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::notification::error::NotificationError;

pub struct NotificationCenter;

impl NotificationCenter {
    #[must_use]
    pub fn current() -> Retained<UNUserNotificationCenter> {
        UNUserNotificationCenter::currentNotificationCenter()
    }

    pub async fn request_authorization() -> Result<bool, NotificationError> {
        let (tx, rx) = oneshot::channel::<Result<bool, NotificationError>>();

        let options = UNAuthorizationOptions::Alert
            | UNAuthorizationOptions::Sound
            | UNAuthorizationOptions::Badge;

        let cb = RefCell::new(Some(tx));
        let block = RcBlock::new(move |granted: Bool, error: *mut NSError| {
            if let Some(sender) = cb.borrow_mut().take() {
                let result = match unsafe { error.as_ref() } {
                    Some(err) => Err(NotificationError::AuthorizationFailed(
                        err.localizedDescription().to_string(),
                    )),
                    None => Ok(granted.as_bool()),
                };
                let _ = sender.send(result);
            }
        });

        Self::current().requestAuthorizationWithOptions_completionHandler(options, &block);

        rx.await
            .map_err(|_| NotificationError::InitializationFailed("Channel closed".to_string()))?
    }

    pub fn set_delegate(delegate: &ProtocolObject<dyn UNUserNotificationCenterDelegate>) {
        Self::current().setDelegate(Some(delegate));
    }

    /// Adds a request without waiting for the result; failures are logged.
    pub fn add_notification_request(identifier: &str, request: &UNNotificationRequest) {
        let identifier = identifier.to_string();
        let block = RcBlock::new(move |error: *mut NSError| {
            match unsafe { error.as_ref() } {
                Some(err) => warn!(
                    "Failed to schedule alert '{}': {}",
                    identifier,
                    err.localizedDescription()
                ),
                None => debug!("Alert '{}' armed", identifier),
            }
        });

        Self::current().addNotificationRequest_withCompletionHandler(request, Some(&block));
    }

    pub fn remove_all_pending_notifications() {
        Self::current().removeAllPendingNotificationRequests();
    }
}
