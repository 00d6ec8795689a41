//! Alert delegate.
//!
//! Receives the "about to present" and "user responded" callbacks from a
//! backend. Both are informational: they are logged and forwarded to the
//! screen as [`AlertEvent`]s, and nothing in the countdown depends on them.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::content::AlertContent;

/// How an alert is presented while the app is in the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationOptions {
    pub banner: bool,
    pub sound: bool,
    pub badge: bool,
}

impl PresentationOptions {
    /// Banner, sound and badge.
    pub const ALL: Self = Self {
        banner: true,
        sound: true,
        badge: true,
    };
}

/// The user's response to a delivered alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertResponse {
    /// The user opened the app from the alert.
    Opened,
    /// The user dismissed the alert.
    Dismissed,
    /// Any other action identifier.
    Other(String),
}

/// Events forwarded from the delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertEvent {
    /// An alert is being presented.
    Presented {
        identifier: String,
        content: AlertContent,
        options: PresentationOptions,
    },
    /// The user responded to an alert.
    Responded(AlertResponse),
}

/// Delegate shared by every alert backend.
#[derive(Debug, Clone, Default)]
pub struct AlertDelegate {
    events: Option<UnboundedSender<AlertEvent>>,
}

impl AlertDelegate {
    /// Creates a delegate that forwards events to `events`.
    #[must_use]
    pub fn new(events: UnboundedSender<AlertEvent>) -> Self {
        Self {
            events: Some(events),
        }
    }

    /// Creates a delegate that only logs.
    #[must_use]
    pub fn detached() -> Self {
        Self { events: None }
    }

    /// Called when an alert is about to be presented.
    ///
    /// Always presents with banner, sound and badge.
    pub fn will_present(&self, identifier: &str, content: &AlertContent) -> PresentationOptions {
        info!("The alert '{}' is about to be presented", identifier);
        let options = PresentationOptions::ALL;
        self.forward(AlertEvent::Presented {
            identifier: identifier.to_string(),
            content: content.clone(),
            options,
        });
        options
    }

    /// Called when the user interacts with a delivered alert.
    pub fn did_receive(&self, response: AlertResponse) {
        match &response {
            AlertResponse::Dismissed => info!("The alert was dismissed"),
            AlertResponse::Opened => info!("User opened the app from the alert"),
            AlertResponse::Other(action) => info!("Unhandled alert action: {}", action),
        }
        self.forward(AlertEvent::Responded(response));
    }

    fn forward(&self, event: AlertEvent) {
        if let Some(sender) = &self.events {
            if sender.send(event).is_err() {
                debug!("Alert event receiver dropped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::content::countdown_finished_content;
    use tokio::sync::mpsc;

    #[test]
    fn test_will_present_forwards_event() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let delegate = AlertDelegate::new(tx);
        let content = countdown_finished_content();

        let options = delegate.will_present("id", &content);

        assert_eq!(options, PresentationOptions::ALL);
        assert_eq!(
            rx.try_recv().unwrap(),
            AlertEvent::Presented {
                identifier: "id".to_string(),
                content,
                options,
            }
        );
    }

    #[test]
    fn test_did_receive_forwards_response() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let delegate = AlertDelegate::new(tx);

        delegate.did_receive(AlertResponse::Dismissed);

        assert_eq!(
            rx.try_recv().unwrap(),
            AlertEvent::Responded(AlertResponse::Dismissed)
        );
    }

    #[test]
    fn test_detached_delegate_still_presents() {
        let delegate = AlertDelegate::detached();
        let options = delegate.will_present("id", &AlertContent::default());
        assert!(options.banner);
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let delegate = AlertDelegate::new(tx);
        delegate.did_receive(AlertResponse::Opened);
    }
}
