//! Alert content construction.
//!
//! This module provides a builder for creating alert content with a fluent
//! API, and the fixed content of the countdown-finished alert.

use serde::{Deserialize, Serialize};

use crate::sound::ALARM_SOUND_NAME;

/// Title of the countdown-finished alert.
pub const ALERT_TITLE: &str = "Important Message";

/// Body of the countdown-finished alert.
pub const ALERT_BODY: &str = "Time is up! The countdown has finished.";

/// Maximum length for any text field in an alert.
const MAX_TEXT_LENGTH: usize = 200;

/// Platform-independent alert content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertContent {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    /// Sound asset name; `None` for a silent alert.
    pub sound: Option<String>,
}

/// Builder for constructing alert content.
#[derive(Debug, Default)]
pub struct AlertContentBuilder {
    content: AlertContent,
}

impl AlertContentBuilder {
    /// Creates a new alert content builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the alert title.
    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.content.title = sanitize_text(title);
        self
    }

    /// Sets the alert subtitle.
    #[must_use]
    pub fn subtitle(mut self, subtitle: &str) -> Self {
        self.content.subtitle = sanitize_text(subtitle);
        self
    }

    /// Sets the alert body text.
    #[must_use]
    pub fn body(mut self, body: &str) -> Self {
        self.content.body = sanitize_text(body);
        self
    }

    /// Sets the sound asset played with the alert.
    #[must_use]
    pub fn sound(mut self, name: &str) -> Self {
        self.content.sound = Some(name.to_string());
        self
    }

    /// Builds and returns the alert content.
    #[must_use]
    pub fn build(self) -> AlertContent {
        self.content
    }
}

/// Truncates text to the maximum length and strips control characters.
#[must_use]
pub fn sanitize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control())
        .take(MAX_TEXT_LENGTH)
        .collect()
}

/// Creates the content of the countdown-finished alert.
#[must_use]
pub fn countdown_finished_content() -> AlertContent {
    AlertContentBuilder::new()
        .title(ALERT_TITLE)
        .subtitle("")
        .body(ALERT_BODY)
        .sound(ALARM_SOUND_NAME)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_finished_content() {
        let content = countdown_finished_content();
        assert_eq!(content.title, "Important Message");
        assert_eq!(content.subtitle, "");
        assert_eq!(content.body, ALERT_BODY);
        assert_eq!(content.sound.as_deref(), Some("AlarmSound1.wav"));
    }

    #[test]
    fn test_builder_defaults_to_silent() {
        let content = AlertContentBuilder::new().title("t").body("b").build();
        assert!(content.sound.is_none());
        assert!(content.subtitle.is_empty());
    }

    #[test]
    fn test_sanitize_text_removes_control_chars() {
        assert_eq!(sanitize_text("time\n\r\tup"), "timeup");
    }

    #[test]
    fn test_sanitize_text_truncates_long() {
        let long = "a".repeat(500);
        assert_eq!(sanitize_text(&long).chars().count(), MAX_TEXT_LENGTH);
    }

    #[test]
    fn test_sanitize_text_keeps_unicode() {
        assert_eq!(sanitize_text("終わり ☺️"), "終わり ☺️");
    }
}
