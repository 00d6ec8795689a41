//! Line commands typed into the timer screen.

use std::str::FromStr;

/// A command entered on the timer screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Play/Pause button
    Toggle,
    /// Restart button
    Restart,
    /// The app is about to leave the foreground
    Background,
    /// The app is returning to the foreground
    Foreground,
    /// Print the current session
    Status,
    /// Print the command list
    Help,
    /// Leave the screen
    Quit,
}

impl ScreenCommand {
    /// Every command with its accepted spellings and a description.
    pub const ALL: &'static [(ScreenCommand, &'static [&'static str], &'static str)] = &[
        (ScreenCommand::Toggle, &["p", "play", "pause"], "play / pause"),
        (ScreenCommand::Restart, &["r", "restart", "reset"], "restart from zero"),
        (ScreenCommand::Background, &["bg", "background"], "send the app to the background"),
        (ScreenCommand::Foreground, &["fg", "foreground"], "bring the app back"),
        (ScreenCommand::Status, &["s", "status"], "show the countdown"),
        (ScreenCommand::Help, &["h", "help", "?"], "show this help"),
        (ScreenCommand::Quit, &["q", "quit", "exit"], "quit"),
    ];

    /// Returns true if the command drives the countdown itself.
    pub fn is_control(&self) -> bool {
        matches!(self, ScreenCommand::Toggle | ScreenCommand::Restart)
    }
}

impl FromStr for ScreenCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|(_, names, _)| names.contains(&input.as_str()))
            .map(|(command, _, _)| *command)
            .ok_or_else(|| format!("unknown command '{}' (type h for help)", s.trim()))
    }
}
