//! `UNUserNotificationCenterDelegate` bridging to [`AlertDelegate`].

use block2::Block;
use objc2::rc::Retained;
use objc2::runtime::ProtocolObject;
use objc2::{define_class, msg_send, DefinedClass, MainThreadMarker, MainThreadOnly};
use objc2_foundation::{NSObject, NSObjectProtocol};
use objc2_user_notifications::{
    UNNotification, UNNotificationPresentationOptions, UNNotificationResponse,
    UNUserNotificationCenter, UNUserNotificationCenterDelegate,
};

use crate::notification::content::AlertContent;
use crate::notification::delegate::{AlertDelegate, AlertResponse};

const DEFAULT_ACTION_ID: &str = "com.apple.UNNotificationDefaultActionIdentifier";
const DISMISS_ACTION_ID: &str = "com.apple.UNNotificationDismissActionIdentifier";

/// Instance variables for the notification delegate.
#[derive(Clone)]
pub struct NotificationDelegateIvars {
    pub delegate: AlertDelegate,
}

define_class!(
    // SAFETY:
    // - The superclass NSObject does not have any subclassing requirements.
    // - `NotificationDelegate` does not implement `Drop`.
    #[unsafe(super(NSObject))]
    #[ivars = NotificationDelegateIvars]
    #[name = "EasyTimerNotificationDelegate"]
    #[thread_kind = MainThreadOnly]
    pub struct NotificationDelegate;

    impl NotificationDelegate {}

    unsafe impl NSObjectProtocol for NotificationDelegate {}

    unsafe impl UNUserNotificationCenterDelegate for NotificationDelegate {
        #[unsafe(method(userNotificationCenter:willPresentNotification:withCompletionHandler:))]
        fn will_present_notification(
            &self,
            _center: &UNUserNotificationCenter,
            notification: &UNNotification,
            completion_handler: &Block<dyn Fn(UNNotificationPresentationOptions)>,
        ) {
            let (identifier, content) = unsafe {
                let request = notification.request();
                let native = request.content();
                (
                    request.identifier().to_string(),
                    AlertContent {
                        title: native.title().to_string(),
                        subtitle: native.subtitle().to_string(),
                        body: native.body().to_string(),
                        // The system plays the attached sound itself.
                        sound: None,
                    },
                )
            };

            let requested = self.ivars().delegate.will_present(&identifier, &content);

            let mut options = UNNotificationPresentationOptions::empty();
            if requested.banner {
                options |= UNNotificationPresentationOptions::Banner;
            }
            if requested.sound {
                options |= UNNotificationPresentationOptions::Sound;
            }
            if requested.badge {
                options |= UNNotificationPresentationOptions::Badge;
            }

            completion_handler.call((options,));
        }

        #[unsafe(method(userNotificationCenter:didReceiveNotificationResponse:withCompletionHandler:))]
        fn did_receive_notification_response(
            &self,
            _center: &UNUserNotificationCenter,
            response: &UNNotificationResponse,
            completion_handler: &Block<dyn Fn()>,
        ) {
            let action = response.actionIdentifier().to_string();
            let response = match action.as_str() {
                DEFAULT_ACTION_ID => AlertResponse::Opened,
                DISMISS_ACTION_ID => AlertResponse::Dismissed,
                _ => AlertResponse::Other(action),
            };

            self.ivars().delegate.did_receive(response);

            // Must call completion handler
            completion_handler.call(());
        }
    }
);

impl NotificationDelegate {
    #[must_use]
    pub fn new(mtm: MainThreadMarker, delegate: AlertDelegate) -> Retained<Self> {
        let this = Self::alloc(mtm).set_ivars(NotificationDelegateIvars { delegate });
        unsafe { msg_send![super(this), init] }
    }

    #[must_use]
    pub fn as_protocol(
        delegate: &Retained<Self>,
    ) -> Retained<ProtocolObject<dyn UNUserNotificationCenterDelegate>> {
        ProtocolObject::from_retained(delegate.clone())
    }
}
