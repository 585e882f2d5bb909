//! App: component-based event loop around the footer.
//!
//! Architecture:
//! - `App` owns the components and `AppState` (shared read-only data for components).
//! - One `tokio::mpsc` channel carries `AppMessage`s: terminal events from a
//!   blocking reader task and store notifications from the footer's
//!   subscription.  Messages are handled one at a time, in arrival order,
//!   with a draw after each.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Commands reach the store through `send_command` only.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use footer_proto::catalog::Catalog;
use footer_proto::config::Config;
use footer_proto::protocol::{MediaItem, StoreAction, Stream};
use footer_proto::store::Store;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{
        browse_view::{BrowseView, Page},
        player_box::PlayerBoxFactory,
    },
    footer::{subscription::StoreNotification, FooterPanel},
    widgets::status_bar,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Store(StoreNotification),
}

const INPUT_POLL: Duration = Duration::from_millis(250);

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    footer: FooterPanel,
    browse: BrowseView,

    store: Arc<dyn Store>,

    /// Last-drawn footer rect, handed to the footer for mouse events.
    footer_area: Rect,

    /// Whether to quit on next iteration.
    should_quit: bool,
}

impl App {
    pub fn new(store: Arc<dyn Store>, catalog: Catalog, config: &Config) -> Self {
        Self {
            state: AppState::new(catalog, config.panel.wide_min_width),
            footer: FooterPanel::new(config.panel.start_folded, Box::new(PlayerBoxFactory)),
            browse: BrowseView::new(),
            store,
            footer_area: Rect::default(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls so it notices the receiver going away once the loop ends.
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || {
            while !event_tx.is_closed() {
                match event::poll(INPUT_POLL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(_) => break,
                }
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        });

        // ── Footer subscription (store → AppMessage) ──────────────────────────
        let store_tx = tx.clone();
        self.footer
            .mount(self.store.as_ref(), move |n: StoreNotification| {
                let _ = store_tx.send(AppMessage::Store(n));
            });
        drop(tx);

        self.publish_catalog();

        let result = self.event_loop(&mut terminal, &mut rx).await;

        // ── Teardown ──────────────────────────────────────────────────────────
        // The footer lets go of the store before the terminal is handed back.
        self.footer.unmount();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        rx: &mut mpsc::UnboundedReceiver<AppMessage>,
    ) -> anyhow::Result<()> {
        loop {
            self.refresh_state();
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                return Ok(());
            }

            match rx.recv().await {
                Some(msg) => self.handle_message(msg),
                None => return Ok(()),
            }
        }
    }

    /// The store's stream and player lists come from the catalog.
    fn publish_catalog(&mut self) {
        info!(
            "catalog: {} streams, {} players",
            self.state.catalog.streams.len(),
            self.state.catalog.players.len()
        );
        self.send_command(StoreAction::SetStreamList {
            stream_list: self.state.catalog.stream_list(),
        });
        self.send_command(StoreAction::SetExternalPlayerList {
            external_player_list: self.state.catalog.players.clone(),
        });
    }

    fn refresh_state(&mut self) {
        self.state.store = self.store.snapshot();
        self.state.footer_subscribed = self.footer.is_subscribed();
    }

    // ── Message handling ──────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Store(notification) => {
                self.footer.on_notification(notification);
            }
            AppMessage::Event(Event::Key(key)) => {
                for action in self.handle_key(key) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                for action in self.handle_mouse(mouse) {
                    self.dispatch(action);
                }
            }
            AppMessage::Event(Event::Resize(w, h)) => self.dispatch(Action::Resize(w, h)),
            AppMessage::Event(_) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }
        match key.code {
            KeyCode::Char('q') => vec![Action::Quit],
            KeyCode::Esc => match Page::of(&self.state) {
                Page::Dashboard => vec![Action::Quit],
                _ => self.browse.handle_key(key, &self.state),
            },
            _ => self.footer.handle_key(key, &self.state),
        }
    }

    /// The footer hit-tests its own controls, including an open menu drawn
    /// over the body.
    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        self.footer.handle_mouse(event, self.footer_area, &self.state)
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.footer.on_action(&action, s));
            out.extend(self.browse.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
            Action::SendCommand(command) => self.send_command(command),
            Action::Resize(w, h) => debug!("resize {}x{}", w, h),
            _ => {}
        }
    }

    fn send_command(&mut self, command: StoreAction) {
        let follow_up = self.media_announcements(&command);
        match serde_json::to_string(&command) {
            Ok(json) => {
                info!("store <- {}", json);
                self.state.last_command = Some(json);
            }
            Err(e) => warn!("cannot encode {:?}: {}", command.tag(), e),
        }
        self.store.dispatch(command);
        for announcement in follow_up {
            debug!("store <- {:?} (catalog)", announcement.tag());
            self.store.dispatch(announcement);
        }
    }

    /// Media the catalog knows for whatever `command` is about to load.
    fn media_announcements(&self, command: &StoreAction) -> Vec<StoreAction> {
        let catalog = &self.state.catalog;
        let jukebox_now = |stream: &Stream, index: usize| StoreAction::SetMediaNow {
            media: catalog.media_at(stream, index),
        };
        let live = |stream: &Stream| -> Vec<StoreAction> {
            let entry = stream.name.as_deref().and_then(|n| catalog.find(n));
            let (now, next) = entry
                .map(|e| (e.now.clone(), e.next.clone()))
                .unwrap_or((MediaItem::Unknown, MediaItem::Unknown));
            vec![
                StoreAction::SetMediaNow { media: now },
                StoreAction::SetMediaNext { media: next },
            ]
        };

        match command {
            StoreAction::LoadStream { stream } if stream.webradio => live(stream),
            StoreAction::LoadStreamAndPlay { stream, .. } if stream.webradio => live(stream),
            StoreAction::LoadStream { stream } => {
                vec![jukebox_now(stream, self.state.store.profile.jukebox_index)]
            }
            StoreAction::LoadStreamAndPlay { stream, index } => vec![jukebox_now(stream, *index)],
            StoreAction::SetJukeboxIndex { index } => match self.state.loaded_stream() {
                Some(stream) if !stream.webradio => vec![jukebox_now(stream, *index)],
                _ => vec![],
            },
            _ => vec![],
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let footer_h = self
            .footer
            .height(area.width, self.state.wide_min_width)
            .min(area.height);
        let [body, command_bar, keys_bar, footer] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(footer_h),
        ])
        .areas(area);

        self.browse.draw(frame, body, &self.state);
        status_bar::draw_command_bar(
            frame,
            command_bar,
            self.state.last_command.as_deref(),
            self.state.footer_subscribed,
        );
        status_bar::draw_keys_bar(frame, keys_bar, self.state.loaded_stream().is_some());
        // Last, so an open control menu overlays the body.
        self.footer.draw(frame, footer, &self.state);
        self.footer_area = footer;
    }
}
