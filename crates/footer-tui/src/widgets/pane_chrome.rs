//! PaneChrome: bordered pane with focus styling and an optional badge.

use crate::theme::{style_focused_border, style_unfocused_border, C_MUTED, C_NUMBER_HINT, C_PRIMARY};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// A badge shown in the top-right of the pane header (e.g., "LIVE", "#3").
pub struct Badge<'a> {
    pub text: &'a str,
    pub color: Color,
}

/// `hint` is a short key reminder shown before the title, e.g. `[f]`.
pub fn pane_chrome<'a>(
    title: &'a str,
    hint: Option<&'a str>,
    focused: bool,
    badge: Option<Badge<'a>>,
) -> Block<'a> {
    pane_chrome_borders(title, hint, focused, badge, Borders::ALL)
}

/// Like `pane_chrome` but with explicit border selection.  The footer uses
/// `Borders::TOP` so it stays flush with the terminal bottom.
pub fn pane_chrome_borders<'a>(
    title: &'a str,
    hint: Option<&'a str>,
    focused: bool,
    badge: Option<Badge<'a>>,
    borders: Borders,
) -> Block<'a> {
    let border_style = if focused {
        style_focused_border()
    } else {
        style_unfocused_border()
    };

    let title_style = if focused {
        Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(C_MUTED)
    };

    let mut title_spans = Vec::new();
    if let Some(h) = hint {
        title_spans.push(Span::styled(
            format!("[{}] ", h),
            Style::default().fg(C_NUMBER_HINT),
        ));
    }
    title_spans.push(Span::styled(title, title_style));

    let block = Block::default()
        .borders(borders)
        .border_style(border_style)
        .title(Line::from(title_spans));

    match badge {
        Some(b) => block.title_top(
            Line::from(Span::styled(
                format!(" {} ", b.text),
                Style::default().fg(b.color).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        None => block,
    }
}
