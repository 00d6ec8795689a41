//! Interactive timer screen.
//!
//! The screen owns the countdown engine and the tick source, and multiplexes
//! them with typed commands, alert callbacks and Ctrl-C on one task. App
//! lifecycle transitions arrive as the `bg` / `fg` commands.

mod command;

pub use command::ScreenCommand;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::cli::Display;
use crate::engine::{CountdownEngine, CountdownEvent, Ticker, TICK_PERIOD};
use crate::notification::{AlertEvent, AlertScheduler};
use crate::sound::{SoundPlayer, SoundSource};
use crate::store::TimestampStore;

/// Whether the screen keeps running after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The single timer screen.
pub struct Screen<S, K, P> {
    engine: CountdownEngine<S, K>,
    events: mpsc::UnboundedReceiver<CountdownEvent>,
    alerts: mpsc::UnboundedReceiver<AlertEvent>,
    ticker: Ticker,
    player: P,
    alarm: SoundSource,
    backgrounded: bool,
}

impl<S: AlertScheduler, K: TimestampStore, P: SoundPlayer> Screen<S, K, P> {
    /// Creates the screen and starts the tick source.
    ///
    /// `events` must be the receiver paired with the engine's event sender,
    /// and `alerts` the receiver paired with the scheduler's delegate.
    pub fn new(
        engine: CountdownEngine<S, K>,
        events: mpsc::UnboundedReceiver<CountdownEvent>,
        alerts: mpsc::UnboundedReceiver<AlertEvent>,
        player: P,
        alarm: SoundSource,
    ) -> Self {
        Self {
            engine,
            events,
            alerts,
            ticker: Ticker::start(TICK_PERIOD),
            player,
            alarm,
            backgrounded: false,
        }
    }

    /// Runs the screen until `q`, end of input or Ctrl-C.
    pub async fn run<R>(&mut self, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        Display::show_banner();
        Display::show_session(&self.engine.session().snapshot());

        loop {
            let flow = tokio::select! {
                _ = self.ticker.tick() => {
                    self.on_tick();
                    Flow::Continue
                }
                line = lines.next_line() => {
                    match line.context("Failed to read from stdin")? {
                        Some(line) => self.handle_line(&line, Utc::now()),
                        None => {
                            debug!("Input closed");
                            Flow::Quit
                        }
                    }
                }
                Some(event) = self.alerts.recv() => {
                    self.on_alert(event);
                    Flow::Continue
                }
                _ = tokio::signal::ctrl_c() => {
                    debug!("Interrupted");
                    Flow::Quit
                }
            };

            self.render_events();

            if flow == Flow::Quit {
                break;
            }
        }

        self.engine.scheduler().cancel_all();
        Ok(())
    }

    /// Parses and applies one input line.
    pub fn handle_line(&mut self, line: &str, now: DateTime<Utc>) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }

        match line.parse::<ScreenCommand>() {
            Ok(command) => self.handle_command(command, now),
            Err(message) => {
                Display::show_notice(&message);
                Flow::Continue
            }
        }
    }

    /// Applies a command. Errors are reported and never end the screen.
    pub fn handle_command(&mut self, command: ScreenCommand, now: DateTime<Utc>) -> Flow {
        if command.is_control() && self.backgrounded {
            Display::show_notice("the app is in the background, type fg first");
            return Flow::Continue;
        }

        let result = match command {
            ScreenCommand::Toggle => self.engine.toggle(),
            ScreenCommand::Restart => self.engine.reset(),
            ScreenCommand::Background => self.enter_background(now),
            ScreenCommand::Foreground => self.enter_foreground(now),
            ScreenCommand::Status => {
                Display::show_session(&self.engine.session().snapshot());
                Ok(())
            }
            ScreenCommand::Help => {
                Display::show_help();
                Ok(())
            }
            ScreenCommand::Quit => return Flow::Quit,
        };

        if let Err(e) = result {
            warn!("{:?}: {:#}", command, e);
            Display::show_notice(&format!("{:#}", e));
        }

        Flow::Continue
    }

    /// Advances the countdown by one unit.
    pub fn on_tick(&mut self) {
        if let Err(e) = self.engine.tick() {
            warn!("Tick failed: {:#}", e);
        }
    }

    /// Presents an alert and plays the alarm sound if asked to.
    pub fn on_alert(&mut self, event: AlertEvent) {
        match event {
            AlertEvent::Presented {
                identifier,
                content,
                options,
            } => {
                debug!("Presenting alert '{}'", identifier);
                Display::show_alert(&content);

                if options.sound && content.sound.is_some() && !self.player.is_disabled() {
                    if let Err(e) = self.player.play(&self.alarm) {
                        warn!("Failed to play the alarm sound: {} ({})", e, e.suggestion());
                    }
                }
            }
            AlertEvent::Responded(response) => {
                debug!("Alert response: {:?}", response);
            }
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &CountdownEngine<S, K> {
        &self.engine
    }

    /// Returns the tick source.
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Returns true between `bg` and `fg`.
    pub fn is_backgrounded(&self) -> bool {
        self.backgrounded
    }

    fn enter_background(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.ticker.stop();
        self.backgrounded = true;
        self.engine.enter_background(now)
    }

    fn enter_foreground(&mut self, now: DateTime<Utc>) -> Result<()> {
        // A saved time only counts when this screen went to the background.
        if !self.backgrounded {
            debug!("Already in the foreground");
            self.ticker.restart();
            return Ok(());
        }

        self.backgrounded = false;
        let result = self.engine.enter_foreground(now);
        self.ticker.restart();
        result.map(|_| ())
    }

    fn render_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            Display::show_countdown_event(&event, &self.engine.session().snapshot());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
