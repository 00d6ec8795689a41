//! Command definitions for the easy-timer CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::store::{default_store_path, StoreError};
use crate::types::{AlertBackend, AlertDelay, AppConfig, StoreLocation};

// ============================================================================
// CLI Structure
// ============================================================================

/// easy-timer - a one-minute countdown with a completion alert
#[derive(Parser, Debug)]
#[command(
    name = "easy-timer",
    version,
    about = "A one-minute countdown timer with a completion alert",
    long_about = "A 60-second countdown with play/pause and restart controls.\n\
                  An alert fires when the countdown finishes, and time spent in \
                  the background is caught up when the app returns.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the timer screen
    Run(RunArgs),

    /// Show the saved suspension time
    Status(StatusArgs),

    /// Remove the saved suspension time
    Clear(StoreArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Arguments
// ============================================================================

/// Location of the timestamp store file
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Store file (defaults to <data dir>/easy-timer/store.json)
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

impl StoreArgs {
    /// Resolves the store file path.
    pub fn resolve(&self) -> Result<PathBuf, StoreError> {
        match &self.store {
            Some(path) => Ok(path.clone()),
            None => default_store_path(),
        }
    }
}

/// Arguments for the status command
#[derive(Args, Debug, Clone, Default)]
pub struct StatusArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Keep the suspension time in memory only
    #[arg(long, conflicts_with = "store")]
    pub ephemeral: bool,

    /// Do not play the alarm sound
    #[arg(long)]
    pub no_sound: bool,

    /// Sound file played when the alert fires
    #[arg(long, value_name = "FILE", conflicts_with = "no_sound")]
    pub sound: Option<PathBuf>,

    /// Alert delivery backend
    #[arg(long, value_enum, default_value_t = AlertBackend::Local)]
    pub backend: AlertBackend,

    /// Always arm the alert a full countdown ahead, even when resuming
    #[arg(long)]
    pub full_period_alert: bool,
}

impl RunArgs {
    /// Converts the arguments into a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no store path was given and the default location
    /// cannot be determined.
    pub fn to_config(&self) -> Result<AppConfig, StoreError> {
        let store = if self.ephemeral {
            StoreLocation::Memory
        } else {
            StoreLocation::File(self.store.resolve()?)
        };

        let alert_delay = if self.full_period_alert {
            AlertDelay::FullPeriod
        } else {
            AlertDelay::Remaining
        };

        let mut config = AppConfig {
            sound_enabled: !self.no_sound,
            backend: self.backend,
            ..AppConfig::default()
        }
        .with_store(store)
        .with_alert_delay(alert_delay);

        if let Some(path) = &self.sound {
            config = config.with_sound_file(path);
        }

        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_run(args: &[&str]) -> RunArgs {
        let cli = Cli::parse_from(std::iter::once("easy-timer").chain(args.iter().copied()));
        match cli.command {
            Some(Commands::Run(args)) => args,
            _ => panic!("Expected Run command"),
        }
    }

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["easy-timer"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["easy-timer", "--verbose"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_short_verbose_after_subcommand() {
            let cli = Cli::parse_from(["easy-timer", "status", "-v"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_status_command() {
            let cli = Cli::parse_from(["easy-timer", "status", "--json"]);
            match cli.command {
                Some(Commands::Status(args)) => {
                    assert!(args.json);
                    assert!(args.store.store.is_none());
                }
                _ => panic!("Expected Status command"),
            }
        }

        #[test]
        fn test_parse_clear_with_store() {
            let cli = Cli::parse_from(["easy-timer", "clear", "--store", "/tmp/s.json"]);
            match cli.command {
                Some(Commands::Clear(args)) => {
                    assert_eq!(args.store, Some(PathBuf::from("/tmp/s.json")));
                }
                _ => panic!("Expected Clear command"),
            }
        }

        #[test]
        fn test_parse_completions_zsh() {
            let cli = Cli::parse_from(["easy-timer", "completions", "zsh"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Zsh);
                }
                _ => panic!("Expected Completions command"),
            }
        }

        #[test]
        fn test_unknown_subcommand_rejected() {
            assert!(Cli::try_parse_from(["easy-timer", "start"]).is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Run Command Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_parse_run_defaults() {
            let args = parse_run(&["run"]);
            assert!(args.store.store.is_none());
            assert!(!args.ephemeral);
            assert!(!args.no_sound);
            assert!(args.sound.is_none());
            assert_eq!(args.backend, AlertBackend::Local);
            assert!(!args.full_period_alert);
        }

        #[test]
        fn test_parse_run_backend_system() {
            let args = parse_run(&["run", "--backend", "system"]);
            assert_eq!(args.backend, AlertBackend::System);
        }

        #[test]
        fn test_parse_run_invalid_backend() {
            assert!(Cli::try_parse_from(["easy-timer", "run", "--backend", "pager"]).is_err());
        }

        #[test]
        fn test_ephemeral_conflicts_with_store() {
            let result =
                Cli::try_parse_from(["easy-timer", "run", "--ephemeral", "--store", "x.json"]);
            assert!(result.is_err());
        }

        #[test]
        fn test_sound_conflicts_with_no_sound() {
            let result =
                Cli::try_parse_from(["easy-timer", "run", "--no-sound", "--sound", "a.wav"]);
            assert!(result.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Config Conversion Tests
    // ------------------------------------------------------------------------

    mod to_config_tests {
        use super::*;

        #[test]
        fn test_ephemeral_uses_memory_store() {
            let config = parse_run(&["run", "--ephemeral"]).to_config().unwrap();
            assert_eq!(config.store, StoreLocation::Memory);
            assert!(config.sound_enabled);
            assert_eq!(config.alert_delay, AlertDelay::Remaining);
        }

        #[test]
        fn test_explicit_store_path() {
            let config = parse_run(&["run", "--store", "/tmp/easy.json"])
                .to_config()
                .unwrap();
            assert_eq!(
                config.store,
                StoreLocation::File(PathBuf::from("/tmp/easy.json"))
            );
        }

        #[test]
        fn test_full_period_and_no_sound() {
            let config = parse_run(&["run", "--ephemeral", "--full-period-alert", "--no-sound"])
                .to_config()
                .unwrap();
            assert_eq!(config.alert_delay, AlertDelay::FullPeriod);
            assert!(!config.sound_enabled);
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_sound_file_is_validated() {
            let config = parse_run(&["run", "--ephemeral", "--sound", "alarm.txt"])
                .to_config()
                .unwrap();
            assert_eq!(config.sound_file, Some(PathBuf::from("alarm.txt")));
            assert!(config.validate().is_err());
        }
    }
}
