//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! All side effects happen here. The reducer stays pure and produces effects;
//! this module executes them. Async handlers send their result events to an
//! unbounded inbox channel that is drained once per loop iteration.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use taskdeck_core::api::ApiClient;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll interval while a request is in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Poll interval when nothing is pending.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(250);

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    api: ApiClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    /// Requests spawned but not yet reported back.
    in_flight: usize,
    last_tick: Instant,
}

impl TuiRuntime {
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(api: ApiClient) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state: AppState::new(),
            api,
            inbox_tx,
            inbox_rx,
            in_flight: 0,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        let authenticated = self.api.session().is_authenticated();
        tracing::info!(authenticated, base_url = %self.api.base_url(), "starting tui");
        let effects = update::start(&mut self.state, authenticated);
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if !matches!(event, UiEvent::Frame { .. }) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                if self.state.should_quit {
                    break;
                }
            }

            if dirty && !self.state.should_quit {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        tracing::info!("tui exited");
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.in_flight > 0 {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        // Only animate while something is pending; idle ticks would just redraw.
        if self.last_tick.elapsed() >= tick_interval {
            if self.in_flight > 0 {
                events.push(UiEvent::Tick);
            }
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler and routes its result event to the inbox.
    fn spawn_effect<F, Fut>(&mut self, f: F)
    where
        F: FnOnce(ApiClient) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let api = self.api.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let _ = tx.send(f(api).await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::ClearSession => {
                if let Err(err) = self.api.session().clear_token() {
                    tracing::warn!(error = %format!("{err:#}"), "failed to clear session");
                }
            }
            UiEffect::Login { credentials } => {
                self.spawn_effect(move |api| handlers::login(api, credentials));
            }
            UiEffect::Register { registration } => {
                self.spawn_effect(move |api| handlers::register(api, registration));
            }
            UiEffect::FetchTasks { req } => {
                self.spawn_effect(move |api| handlers::fetch_tasks(api, req));
            }
            UiEffect::CreateTask { task } => {
                self.spawn_effect(move |api| handlers::create_task(api, task));
            }
            UiEffect::ToggleTask { id, completed } => {
                self.spawn_effect(move |api| handlers::toggle_task(api, id, completed));
            }
            UiEffect::DeleteTask { id } => {
                self.spawn_effect(move |api| handlers::delete_task(api, id));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
