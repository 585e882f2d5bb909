//! BrowseView: the body above the footer.
//!
//! Shows whatever the store says the page is: the dashboard, the
//! full-screen player, or the media list of the loaded stream.  The footer's
//! commands land here through the store.

use footer_proto::protocol::{Browse, MediaItem, StoreAction};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_accent, style_default, style_muted, style_secondary, style_selected_focused, C_BADGE_LIVE, C_BADGE_PENDING},
    widgets::pane_chrome::{pane_chrome, Badge},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    FullScreen,
    MediaList,
}

impl Page {
    pub fn of(state: &AppState) -> Self {
        if state.store.show_full_screen {
            Page::FullScreen
        } else if state.showing_media_list() {
            Page::MediaList
        } else {
            Page::Dashboard
        }
    }
}

pub struct BrowseView {
    list_state: ListState,
}

impl BrowseView {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = pane_chrome("dashboard", None, false, None);
        let streams = state.catalog.streams.len();
        let players = state.catalog.players.len();
        let lines = vec![
            Line::from(Span::styled(
                format!("{} streams, {} external players", streams, players),
                style_secondary(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Pick a stream in the footer and press Enter to play it.",
                style_muted(),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }

    fn draw_full_screen(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let profile = &state.store.profile;
        let badge = state.loaded_stream().map(|s| {
            if s.webradio {
                Badge {
                    text: "LIVE",
                    color: C_BADGE_LIVE,
                }
            } else {
                Badge {
                    text: "JUKEBOX",
                    color: C_BADGE_PENDING,
                }
            }
        });
        let block = pane_chrome("full-screen", Some("Esc"), true, badge);

        let mut lines = vec![Line::from("")];
        match state.loaded_stream() {
            Some(stream) => {
                lines.push(Line::from(Span::styled(
                    stream.label().to_string(),
                    style_accent().add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                lines.extend(media_block(&profile.media_now));
                if stream.webradio {
                    if let Some(next) = profile.media_next.info() {
                        lines.push(Line::from(""));
                        lines.push(Line::from(Span::styled(
                            format!("next: {}", next.title.as_deref().unwrap_or("untitled")),
                            style_muted(),
                        )));
                    }
                } else {
                    lines.push(Line::from(Span::styled(
                        format!("track #{}", profile.jukebox_index.saturating_add(1)),
                        style_muted(),
                    )));
                }
            }
            None => lines.push(Line::from(Span::styled("nothing loaded", style_muted()))),
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(Alignment::Center),
            area,
        );
    }

    fn draw_media_list(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = pane_chrome("media list", Some("Esc"), true, None);
        let Some(entry) = state
            .loaded_stream()
            .and_then(|s| s.name.as_deref())
            .and_then(|name| state.catalog.find(name))
        else {
            frame.render_widget(
                Paragraph::new(Span::styled("no media for this stream", style_muted())).block(block),
                area,
            );
            return;
        };

        let current = state.store.profile.jukebox_index;
        let items: Vec<ListItem> = entry
            .media
            .iter()
            .enumerate()
            .map(|(i, media)| {
                let title = media.title.as_deref().unwrap_or("untitled");
                let artist = media.artist.as_deref().unwrap_or("");
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>3} ", i + 1), style_muted()),
                    Span::styled(title.to_string(), style_default()),
                    Span::raw("  "),
                    Span::styled(artist.to_string(), style_secondary()),
                ]))
            })
            .collect();

        self.list_state
            .select((!entry.media.is_empty()).then_some(current.min(entry.media.len() - 1)));
        let list = List::new(items)
            .block(block)
            .highlight_style(style_selected_focused())
            .highlight_symbol("▶ ");
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn media_block(media: &MediaItem) -> Vec<Line<'static>> {
    let Some(info) = media.info() else {
        return vec![Line::from(Span::styled("…", style_muted()))];
    };
    let mut lines = vec![Line::from(Span::styled(
        info.title.clone().unwrap_or_else(|| "untitled".to_string()),
        style_default().add_modifier(Modifier::BOLD),
    ))];
    for extra in [&info.artist, &info.album].into_iter().flatten() {
        lines.push(Line::from(Span::styled(extra.clone(), style_secondary())));
    }
    lines
}

impl Component for BrowseView {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match (key.code, Page::of(state)) {
            (KeyCode::Esc, Page::FullScreen | Page::MediaList) => vec![Action::BackToDashboard],
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn on_action(&mut self, action: &Action, state: &AppState) -> Vec<Action> {
        if *action != Action::BackToDashboard {
            return vec![];
        }
        match Page::of(state) {
            Page::FullScreen => vec![Action::SendCommand(StoreAction::ShowFullScreen { show: false })],
            Page::MediaList => vec![Action::SendCommand(StoreAction::SetCurrentBrowse {
                browse: Browse::Dashboard,
            })],
            Page::Dashboard => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        match Page::of(state) {
            Page::Dashboard => self.draw_dashboard(frame, area, state),
            Page::FullScreen => self.draw_full_screen(frame, area, state),
            Page::MediaList => self.draw_media_list(frame, area, state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footer_proto::catalog::Catalog;

    #[test]
    fn test_page_follows_store() {
        let mut state = AppState::new(Catalog::default(), 100);
        assert_eq!(Page::of(&state), Page::Dashboard);

        state.store.apply(StoreAction::SetCurrentBrowse {
            browse: Browse::ShowStreamMediaList,
        });
        assert_eq!(Page::of(&state), Page::MediaList);

        state.store.apply(StoreAction::ShowFullScreen { show: true });
        assert_eq!(Page::of(&state), Page::FullScreen);
    }

    #[test]
    fn test_back_undoes_the_current_page() {
        let mut view = BrowseView::new();
        let mut state = AppState::new(Catalog::default(), 100);
        assert!(view.on_action(&Action::BackToDashboard, &state).is_empty());

        state.store.apply(StoreAction::ShowFullScreen { show: true });
        assert_eq!(
            view.on_action(&Action::BackToDashboard, &state),
            vec![Action::SendCommand(StoreAction::ShowFullScreen { show: false })]
        );
    }
}
