//! FooterPanel: the media footer pinned to the bottom of the terminal.
//!
//! Data flow:
//! - `mount` subscribes to the store and builds a [`ViewState`] from the
//!   store's current snapshot.
//! - Each [`StoreNotification`] is classified into at most one patch and
//!   applied, then the render cycle is committed: the controller slot is
//!   reconciled and the play intent is consumed.
//! - `draw` recomputes every branch from the committed view state.
//! - Control actions return store commands as `Action::SendCommand`, which
//!   the App dispatches after the footer has committed its own state.

pub mod branch;
pub mod classifier;
pub mod controller;
pub mod slots;
pub mod subscription;
pub mod view_state;


use footer_proto::protocol::{Browse, StoreAction};
use footer_proto::store::Store;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{layout::Rect, widgets::Borders, Frame};
use tracing::{debug, info};

use crate::action::Action;
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::controls::{
    draw_button_group, draw_menu, draw_menu_toggle, hit_at, ControlHit, ControlTarget,
};
use crate::components::media_now::{draw_jukebox_now, draw_webradio_next, draw_webradio_now};
use crate::components::selector::draw_selector;
use crate::theme::C_SECONDARY;
use crate::widgets::pane_chrome::{pane_chrome_borders, Badge};

use branch::{select, select_controller, select_controls, ControlAction, ControllerKind, NowNextBranch};
use classifier::classify;
use controller::{ControllerFactory, ControllerSlot};
use slots::{body_height, compose, layout, split_pair, Density, SlotContent};
use subscription::{StoreLink, StoreNotification};
use view_state::ViewState;

pub struct FooterPanel {
    start_folded: bool,
    /// Present only while mounted.
    view: Option<ViewState>,
    link: StoreLink,
    controller: ControllerSlot,
    /// Highlighted row of the stream picker.
    cursor: usize,
    menu_open: bool,
    hovered: Option<ControlAction>,
    /// Clickable control rects from the last draw.
    hits: Vec<ControlHit>,
}

impl FooterPanel {
    pub fn new(start_folded: bool, factory: Box<dyn ControllerFactory>) -> Self {
        Self {
            start_folded,
            view: None,
            link: StoreLink::new(),
            controller: ControllerSlot::new(factory),
            cursor: 0,
            menu_open: false,
            hovered: None,
            hits: Vec::new(),
        }
    }

    /// Subscribe to `store`; notifications are handed to `forward`, which
    /// must route them back into [`FooterPanel::on_notification`].
    pub fn mount<F>(&mut self, store: &dyn Store, forward: F)
    where
        F: Fn(StoreNotification) + Send + Sync + 'static,
    {
        let snapshot = self.link.connect(store, forward);
        let view = ViewState::from_snapshot(&snapshot, self.start_folded);
        self.cursor = view
            .stream_list
            .iter()
            .position(|s| s.is_loaded() && s.name == view.stream.name)
            .unwrap_or(0);
        self.view = Some(view);
        self.commit();
        info!("footer: mounted at store rev {}", snapshot.rev);
    }

    /// Release the subscription and the controller.  Safe to call any
    /// number of times; returns false when nothing was mounted.
    pub fn unmount(&mut self) -> bool {
        let released = self.link.release();
        self.controller.clear();
        let was_mounted = self.view.take().is_some();
        self.hits.clear();
        self.menu_open = false;
        self.hovered = None;
        if was_mounted {
            info!("footer: unmounted");
        }
        released || was_mounted
    }

    pub fn is_mounted(&self) -> bool {
        self.view.is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.link.is_subscribed()
    }

    #[cfg(test)]
    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    #[cfg(test)]
    pub fn mounted_controller(&self) -> Option<ControllerKind> {
        self.controller.mounted_kind()
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Apply one store notification.  Returns true when the view changed.
    pub fn on_notification(&mut self, notification: StoreNotification) -> bool {
        if !self.link.accepts(&notification) {
            debug!(
                "footer: dropping notification from generation {}",
                notification.generation
            );
            return false;
        }
        let Some(view) = self.view.as_mut() else {
            return false;
        };
        let Some(patch) = classify(&notification.snapshot) else {
            debug!(
                "footer: {:?} needs no patch",
                notification.snapshot.last_action
            );
            return false;
        };
        view.apply(patch);
        self.cursor = self
            .cursor
            .min(view.stream_list.len().saturating_sub(1));
        self.commit();
        true
    }

    /// Run the render cycle on committed state: bring the controller slot in
    /// line with the controller branch, then consume the play intent so the
    /// next cycle sees `play = false`.
    fn commit(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let branch = select_controller(view);
        self.controller.reconcile(&branch);
        if view.play_intent.take() {
            debug!("footer: play intent handed to controller");
        }
    }

    /// One of the three footer controls.  Controls only exist while a
    /// stream is loaded; otherwise this is a no-op.
    pub fn control(&mut self, action: ControlAction) -> Vec<Action> {
        let Some(view) = self.view.as_mut() else {
            return vec![];
        };
        if select_controls(view).is_none() {
            return vec![];
        }
        self.menu_open = false;

        let command = match action {
            ControlAction::FullScreen => {
                view.fold_for_handoff();
                debug!("footer: full-screen requested (local flag {})", view.full_screen);
                Some(StoreAction::ShowFullScreen { show: true })
            }
            ControlAction::ToggleFold => {
                view.toggle_fold();
                None
            }
            ControlAction::ListMedia => {
                view.fold_for_handoff();
                Some(StoreAction::SetCurrentBrowse {
                    browse: Browse::ShowStreamMediaList,
                })
            }
        };
        self.commit();
        command.map(Action::SendCommand).into_iter().collect()
    }

    fn load_selected(&mut self, play: bool) -> Vec<Action> {
        let Some(stream) = self
            .view
            .as_ref()
            .and_then(|v| v.stream_list.get(self.cursor))
            .cloned()
        else {
            return vec![];
        };
        let command = if play {
            StoreAction::LoadStreamAndPlay { stream, index: 0 }
        } else {
            StoreAction::LoadStream { stream }
        };
        vec![Action::SendCommand(command)]
    }

    /// None -> first player -> ... -> last player -> None.
    fn cycle_player(&mut self) -> Vec<Action> {
        let Some(view) = self.view.as_ref() else {
            return vec![];
        };
        let players = &view.player_list;
        let next = match &view.current_player {
            None => players.first().cloned(),
            Some(current) => players
                .iter()
                .position(|p| p == current)
                .and_then(|i| players.get(i + 1))
                .cloned(),
        };
        if next.is_none() && view.current_player.is_none() {
            return vec![];
        }
        vec![Action::SendCommand(StoreAction::SetCurrentPlayer {
            current_player: next,
        })]
    }

    fn step_track(&mut self, forward: bool, state: &AppState) -> Vec<Action> {
        let Some(view) = self.view.as_ref() else {
            return vec![];
        };
        if !view.stream.is_loaded() || view.stream.webradio {
            return vec![];
        }
        let count = state.catalog.track_count(&view.stream);
        let next = if forward {
            view.jukebox_index.checked_add(1)
        } else {
            view.jukebox_index.checked_sub(1)
        };
        let Some(index) = next else {
            return vec![];
        };
        if index >= count {
            return vec![];
        }
        vec![Action::SendCommand(StoreAction::SetJukeboxIndex { index })]
    }

    /// Rows the footer wants at `width`, chrome included.
    pub fn height(&self, width: u16, wide_min_width: u16) -> u16 {
        let Some(view) = self.view.as_ref() else {
            return 0;
        };
        let density = Density::for_width(width, wide_min_width);
        let has_now_next = !matches!(branch::select_now_next(view), NowNextBranch::Empty);
        body_height(density, view.folded, has_now_next) + 1
    }

    fn tooltip(&self) -> Option<&'static str> {
        let view = self.view.as_ref()?;
        let hovered = self.hovered?;
        let controls = select_controls(view)?;
        controls
            .wide
            .iter()
            .find(|e| e.action == hovered)
            .map(|e| e.label)
    }
}

fn control_action(action: ControlAction) -> Action {
    match action {
        ControlAction::FullScreen => Action::ShowFullScreen,
        ControlAction::ToggleFold => Action::ToggleFold,
        ControlAction::ListMedia => Action::ListMedia,
    }
}

impl Component for FooterPanel {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.is_mounted() {
            return vec![];
        }
        let action = match key.code {
            KeyCode::Char('f') => Action::ShowFullScreen,
            KeyCode::Char('e') => Action::ToggleFold,
            KeyCode::Char('l') => Action::ListMedia,
            KeyCode::Up | KeyCode::Char('k') => Action::SelectUp,
            KeyCode::Down | KeyCode::Char('j') => Action::SelectDown,
            KeyCode::Enter => Action::LoadSelected(true),
            KeyCode::Char('s') => Action::LoadSelected(false),
            KeyCode::Char('p') => Action::CyclePlayer,
            KeyCode::Char('>') | KeyCode::Char('.') => Action::NextTrack,
            KeyCode::Char('<') | KeyCode::Char(',') => Action::PrevTrack,
            _ => return vec![],
        };
        vec![action]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        let target = hit_at(&self.hits, event.column, event.row);
        match event.kind {
            MouseEventKind::Moved => {
                self.hovered = match target {
                    Some(ControlTarget::Entry(action)) => Some(action),
                    _ => None,
                };
                vec![]
            }
            MouseEventKind::Down(MouseButton::Left) => match target {
                Some(ControlTarget::Entry(action)) => vec![control_action(action)],
                Some(ControlTarget::MenuToggle) => {
                    self.menu_open = !self.menu_open;
                    vec![]
                }
                None => {
                    self.menu_open = false;
                    vec![]
                }
            },
            _ => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        match action {
            Action::ShowFullScreen => self.control(ControlAction::FullScreen),
            Action::ToggleFold => self.control(ControlAction::ToggleFold),
            Action::ListMedia => self.control(ControlAction::ListMedia),
            Action::SelectUp => {
                self.cursor = self.cursor.saturating_sub(1);
                vec![]
            }
            Action::SelectDown => {
                let len = self.view.as_ref().map_or(0, |v| v.stream_list.len());
                self.cursor = (self.cursor + 1).min(len.saturating_sub(1));
                vec![]
            }
            Action::LoadSelected(play) => self.load_selected(*play),
            Action::CyclePlayer => self.cycle_player(),
            Action::NextTrack => self.step_track(true, state),
            Action::PrevTrack => self.step_track(false, state),
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let tooltip = self.tooltip();
        let Some(view) = self.view.as_ref() else {
            self.hits.clear();
            return;
        };
        let branches = select(view);
        let density = Density::for_width(area.width, state.wide_min_width);

        let badge = tooltip.map(|text| Badge {
            text,
            color: C_SECONDARY,
        });
        let block = pane_chrome_borders("media", None, false, badge, Borders::TOP);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let areas = layout(inner, density, view.folded);
        let mut hits = Vec::new();
        for (slot, content) in compose(&branches) {
            let rect = areas.get(slot);
            let Some(content) = content else {
                continue;
            };
            match content {
                SlotContent::Selector(region) => {
                    draw_selector(frame, rect, &region, self.cursor, view.folded)
                }
                SlotContent::Controller => self.controller.draw(frame, rect, view.folded),
                SlotContent::Controls(controls) => match density {
                    Density::Wide => {
                        hits.extend(draw_button_group(frame, rect, &controls.wide, self.hovered))
                    }
                    Density::Narrow => {
                        // Open menu entries first so they win over anything beneath.
                        if self.menu_open {
                            let anchor = Rect::new(rect.x, area.y, rect.width, 1);
                            hits.extend(draw_menu(frame, anchor, &controls.narrow));
                        }
                        hits.extend(draw_menu_toggle(frame, rect, self.menu_open));
                    }
                },
                SlotContent::Webradio { now, next, folded } => {
                    let (left, right) = split_pair(rect);
                    draw_webradio_now(frame, left, now, folded);
                    draw_webradio_next(frame, right, next, folded);
                }
                SlotContent::Jukebox { now, index, folded } => {
                    draw_jukebox_now(frame, rect, now, index, folded)
                }
            }
        }
        self.hits = hits;
    }
}
