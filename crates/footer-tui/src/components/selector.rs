//! Stream picker grouped with the player picker.

use footer_proto::protocol::Stream;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::footer::branch::SelectorRegion;
use crate::theme::{style_accent, style_muted, style_secondary, style_selected_focused, C_NETWORK};
use crate::widgets::label::truncate;
use unicode_width::UnicodeWidthStr;

fn same_stream(a: &Stream, b: &Stream) -> bool {
    a.is_loaded() && a.name == b.name
}

fn stream_line(region: &SelectorRegion<'_>, cursor: usize, width: usize) -> Line<'static> {
    let Some(highlighted) = region.streams.get(cursor) else {
        return Line::from(vec![
            Span::styled("♪ ", style_muted()),
            Span::styled("no streams", style_muted()),
        ]);
    };
    let marker = if same_stream(highlighted, region.current) {
        Span::styled("● ", style_accent())
    } else {
        Span::styled("♪ ", style_muted())
    };
    let count = format!(" {}/{}", cursor + 1, region.streams.len());
    let room = width.saturating_sub(2 + count.len());
    Line::from(vec![
        marker,
        Span::styled(truncate(highlighted.label(), room), style_selected_focused()),
        Span::styled(count, style_muted()),
    ])
}

fn player_text(region: &SelectorRegion<'_>) -> String {
    match region.current_player {
        Some(player) => player.name.clone(),
        None => "local".to_string(),
    }
}

pub fn draw_selector(
    frame: &mut Frame,
    area: Rect,
    region: &SelectorRegion<'_>,
    cursor: usize,
    folded: bool,
) {
    let width = area.width as usize;
    let lines = if folded {
        let player = format!(" ⇄ {}", player_text(region));
        let player_w = UnicodeWidthStr::width(player.as_str());
        let mut line = stream_line(region, cursor, width.saturating_sub(player_w));
        line.spans
            .push(Span::styled(player, Style::default().fg(C_NETWORK)));
        vec![line]
    } else {
        let players = if region.players.is_empty() {
            "no external players".to_string()
        } else {
            format!("{} external players", region.players.len())
        };
        vec![
            stream_line(region, cursor, width),
            Line::from(vec![
                Span::styled("⇄ ", Style::default().fg(C_NETWORK)),
                Span::styled(
                    truncate(&player_text(region), width.saturating_sub(2)),
                    style_secondary(),
                ),
            ]),
            Line::from(Span::styled(truncate(&players, width), style_muted())),
        ]
    };
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use footer_proto::protocol::Player;

    fn flat(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_picker() {
        let current = Stream::default();
        let region = SelectorRegion {
            streams: &[],
            current: &current,
            players: &[],
            current_player: None,
        };
        assert_eq!(flat(&stream_line(&region, 0, 30)), "♪ no streams");
        assert_eq!(player_text(&region), "local");
    }

    #[test]
    fn test_current_stream_is_marked() {
        let streams = vec![Stream::webradio("BBC"), Stream::jukebox("mix")];
        let den = Player::new("den", "mpd");
        let region = SelectorRegion {
            streams: &streams,
            current: &streams[1],
            players: std::slice::from_ref(&den),
            current_player: Some(&den),
        };
        assert_eq!(flat(&stream_line(&region, 1, 30)), "● mix 2/2");
        assert_eq!(flat(&stream_line(&region, 0, 30)), "♪ BBC 1/2");
        assert_eq!(player_text(&region), "den");
    }
}
