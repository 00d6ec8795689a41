//! Conversion of alert requests into UserNotifications objects.

use objc2::rc::Retained;
use objc2_foundation::NSString;
use objc2_user_notifications::{
    UNMutableNotificationContent, UNNotificationRequest, UNNotificationSound,
    UNNotificationTrigger, UNTimeIntervalNotificationTrigger,
};

use crate::notification::content::AlertContent;
use crate::notification::request::AlertRequest;

/// Builds the system content for `content`.
#[must_use]
pub fn create_notification_content(content: &AlertContent) -> Retained<UNMutableNotificationContent> {
    let native = unsafe { UNMutableNotificationContent::new() };
    unsafe {
        native.setTitle(&NSString::from_str(&content.title));
        native.setSubtitle(&NSString::from_str(&content.subtitle));
        native.setBody(&NSString::from_str(&content.body));
    }

    if let Some(name) = &content.sound {
        let sound = unsafe { UNNotificationSound::soundNamed(&NSString::from_str(name)) };
        unsafe {
            native.setSound(Some(&sound));
        }
    }

    native
}

/// Builds a fire-once request triggered after the request's delay.
#[must_use]
pub fn create_notification_request(request: &AlertRequest) -> Retained<UNNotificationRequest> {
    let content = create_notification_content(&request.content);
    let identifier = NSString::from_str(&request.identifier);
    let trigger = unsafe {
        UNTimeIntervalNotificationTrigger::triggerWithTimeInterval_repeats(
            request.delay.as_secs_f64(),
            false,
        )
    };
    let trigger_ref: &UNNotificationTrigger = &trigger;

    UNNotificationRequest::requestWithIdentifier_content_trigger(
        &identifier,
        &content,
        Some(trigger_ref),
    )
}
