//! easy-timer CLI - a one-minute countdown with a completion alert
//!
//! `easy-timer run` opens the timer screen. Time spent in the background
//! (`bg` / `fg` on the screen) is caught up from the wall clock.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use easy_timer::cli::{Cli, Commands, Display, RunArgs, StatusArgs, StoreArgs};
use easy_timer::notification::{AlertDelegate, AlertScheduler, LocalAlertScheduler};
use easy_timer::sound::{resolve_alarm_sound, try_create_player, SilentPlayer, SoundPlayer};
use easy_timer::store::{AnyStore, JsonFileStore, MemoryStore, TimestampStore};
use easy_timer::types::{AlertBackend, StoreLocation, SAVE_TIME_KEY};
use easy_timer::{CountdownEngine, Screen};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run_screen(args).await?,
        Some(Commands::Status(args)) => show_status(&args)?,
        Some(Commands::Clear(args)) => clear_store(&args)?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Opens the timer screen on stdin/stdout.
async fn run_screen(args: RunArgs) -> Result<()> {
    let config = args
        .to_config()
        .context("Failed to determine the store location")?;
    config.validate().map_err(|e| anyhow!(e))?;
    debug!("Configuration: {:?}", config);

    let store = match &config.store {
        StoreLocation::Memory => AnyStore::Memory(MemoryStore::new()),
        StoreLocation::File(path) => AnyStore::File(JsonFileStore::new(path)),
    };

    let (alert_tx, alert_rx) = mpsc::unbounded_channel();
    let scheduler = create_scheduler(config.backend, AlertDelegate::new(alert_tx)).await;

    let player: Box<dyn SoundPlayer> = match config
        .sound_enabled
        .then(|| try_create_player(false))
        .flatten()
    {
        Some(player) => Box::new(player),
        None => Box::new(SilentPlayer),
    };
    let alarm = resolve_alarm_sound(config.sound_file.as_deref());
    debug!("Alarm sound: {}", alarm.name());

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = CountdownEngine::new(scheduler, store, config.alert_delay, event_tx);

    let mut screen = Screen::new(engine, event_rx, alert_rx, player, alarm);
    screen.run(BufReader::new(tokio::io::stdin())).await
}

/// Creates the alert scheduler for `backend`.
async fn create_scheduler(
    backend: AlertBackend,
    delegate: AlertDelegate,
) -> Box<dyn AlertScheduler> {
    match backend {
        AlertBackend::Local => Box::new(LocalAlertScheduler::new(delegate)),
        AlertBackend::System => create_system_scheduler(delegate).await,
    }
}

#[cfg(target_os = "macos")]
async fn create_system_scheduler(delegate: AlertDelegate) -> Box<dyn AlertScheduler> {
    use easy_timer::notification::MacAlertScheduler;

    match MacAlertScheduler::new_with_fallback(delegate.clone()).await {
        Some(scheduler) => Box::new(scheduler),
        None => {
            warn!("Falling back to in-process alerts");
            Box::new(LocalAlertScheduler::new(delegate))
        }
    }
}

#[cfg(not(target_os = "macos"))]
async fn create_system_scheduler(delegate: AlertDelegate) -> Box<dyn AlertScheduler> {
    let e = easy_timer::NotificationError::NotAvailable(
        "system notifications require macOS".to_string(),
    );
    warn!("{} ({})", e, e.suggestion());
    Box::new(LocalAlertScheduler::new(delegate))
}

/// Prints the saved suspension time.
fn show_status(args: &StatusArgs) -> Result<()> {
    let path = args.store.resolve()?;
    let store = JsonFileStore::new(&path);
    let saved = store
        .get(SAVE_TIME_KEY)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let now = Utc::now();

    if args.json {
        let report = serde_json::json!({
            "store": path,
            "saved_at": saved,
            "seconds_ago": saved.map(|at| easy_timer::engine::whole_seconds_between(at, now)),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        Display::show_saved_time(saved.as_ref(), now);
    }

    Ok(())
}

/// Removes the saved suspension time.
fn clear_store(args: &StoreArgs) -> Result<()> {
    let path = args.resolve()?;
    let mut store = JsonFileStore::new(&path);
    let cleared = match store.take(SAVE_TIME_KEY) {
        Ok(removed) => removed.is_some(),
        Err(e) if e.is_corrupt() => {
            warn!("{}", e);
            store
                .discard()
                .with_context(|| format!("Failed to remove {}", path.display()))?
        }
        Err(e) => return Err(e).with_context(|| format!("Failed to clear {}", path.display())),
    };

    Display::show_cleared(cleared);
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
