//! Status bar: last store command and the keybindings line.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_ACCENT, C_MODE_NORMAL, C_MUTED, C_PLAYING, C_SECONDARY};

/// Draw the command bar: subscription dot plus the last command sent to the
/// store.
pub fn draw_command_bar(frame: &mut Frame, area: Rect, last_command: Option<&str>, subscribed: bool) {
    let conn_span = if subscribed {
        Span::styled("●", Style::default().fg(C_PLAYING))
    } else {
        Span::styled("○", Style::default().fg(C_ACCENT))
    };

    let cmd_span = Span::styled(last_command.unwrap_or(""), Style::default().fg(C_SECONDARY));

    let line = Line::from(vec![conn_span, Span::raw(" "), cmd_span]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Draw the keybindings bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, stream_loaded: bool) {
    let label = Span::styled(
        " FOOTER ",
        Style::default()
            .fg(C_MODE_NORMAL)
            .add_modifier(Modifier::BOLD),
    );

    let keys = if stream_loaded {
        " ↑↓ pick  Enter play  s load  p player  </> track  f full-screen  e fold  l list  q quit"
    } else {
        " ↑↓ pick  Enter play  s load  p player  q quit"
    };

    let line = Line::from(vec![
        label,
        Span::raw(" "),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
