//! Now/next widgets: webradio now, webradio next and jukebox now.
//!
//! Folded they take one line; extended they add artist and album lines.

use footer_proto::protocol::MediaItem;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{style_default, style_muted, style_secondary, C_BADGE_LIVE, C_TAG};
use crate::widgets::label::truncate;

fn media_lines(heading: Span<'static>, media: &MediaItem, width: usize, folded: bool) -> Vec<Line<'static>> {
    let room = width.saturating_sub(heading.width() + 1);
    let info = match media.info() {
        Some(info) => info,
        None => {
            return vec![Line::from(vec![
                heading,
                Span::raw(" "),
                Span::styled("…", style_muted()),
            ])]
        }
    };

    let title = info.title.as_deref().unwrap_or("untitled");
    if folded {
        let text = match info.artist.as_deref() {
            Some(artist) => format!("{} · {}", title, artist),
            None => title.to_string(),
        };
        return vec![Line::from(vec![
            heading,
            Span::raw(" "),
            Span::styled(truncate(&text, room), style_default()),
        ])];
    }

    let mut lines = vec![Line::from(vec![
        heading,
        Span::raw(" "),
        Span::styled(
            truncate(title, room),
            style_default().add_modifier(Modifier::BOLD),
        ),
    ])];
    for extra in [info.artist.as_deref(), info.album.as_deref()] {
        lines.push(Line::from(Span::styled(
            truncate(extra.unwrap_or(""), width),
            style_secondary(),
        )));
    }
    lines
}

pub fn draw_webradio_now(frame: &mut Frame, area: Rect, media: &MediaItem, folded: bool) {
    let heading = Span::styled("Now", Style::default().fg(C_BADGE_LIVE));
    let lines = media_lines(heading, media, area.width as usize, folded);
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn draw_webradio_next(frame: &mut Frame, area: Rect, media: &MediaItem, folded: bool) {
    let heading = Span::styled("Next", style_muted());
    let lines = media_lines(heading, media, area.width as usize, folded);
    frame.render_widget(Paragraph::new(lines), area);
}

/// `index` is zero-based; it is shown one-based.
pub fn draw_jukebox_now(frame: &mut Frame, area: Rect, media: &MediaItem, index: usize, folded: bool) {
    let heading = Span::styled(
        format!("#{}", index.saturating_add(1)),
        Style::default().fg(C_TAG),
    );
    let lines = media_lines(heading, media, area.width as usize, folded);
    frame.render_widget(Paragraph::new(lines), area);
}
