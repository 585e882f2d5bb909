//! Footer controls: the wide button group and the narrow drop-down menu.
//!
//! Draw functions return the clickable rects they produced so the footer
//! can hit-test mouse clicks against the last frame.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::footer::branch::{ControlAction, ControlEntry};
use crate::theme::{style_default, style_muted, style_unfocused_border, C_PRIMARY, C_SELECTION_BG};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlTarget {
    Entry(ControlAction),
    MenuToggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlHit {
    pub target: ControlTarget,
    pub area: Rect,
}

const BUTTON_WIDTH: u16 = 3;

/// `[⤢][▲][≡]`, centred in `area`.  The hovered button is highlighted.
pub fn draw_button_group(
    frame: &mut Frame,
    area: Rect,
    entries: &[ControlEntry; 3],
    hovered: Option<ControlAction>,
) -> Vec<ControlHit> {
    if area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let total = BUTTON_WIDTH * entries.len() as u16;
    let mut x = area.x + area.width.saturating_sub(total) / 2;
    let mut hits = Vec::with_capacity(entries.len());
    for entry in entries {
        let rect = Rect::new(x, area.y, BUTTON_WIDTH.min(area.right().saturating_sub(x)), 1);
        if rect.width == 0 {
            break;
        }
        let style = if hovered == Some(entry.action) {
            Style::default()
                .bg(C_SELECTION_BG)
                .fg(C_PRIMARY)
                .add_modifier(Modifier::BOLD)
        } else {
            style_default()
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("[{}]", entry.icon.glyph()),
                style,
            ))),
            rect,
        );
        hits.push(ControlHit {
            target: ControlTarget::Entry(entry.action),
            area: rect,
        });
        x += BUTTON_WIDTH;
    }
    hits
}

/// The collapsed drop-down button.
pub fn draw_menu_toggle(frame: &mut Frame, area: Rect, open: bool) -> Option<ControlHit> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let glyph = if open { "[▴]" } else { "[▾]" };
    let width = BUTTON_WIDTH.min(area.width);
    let rect = Rect::new(area.x + (area.width - width) / 2, area.y, width, 1);
    frame.render_widget(Paragraph::new(Span::styled(glyph, style_default())), rect);
    Some(ControlHit {
        target: ControlTarget::MenuToggle,
        area: rect,
    })
}

/// The open menu, right-aligned to `anchor` and stacked on top of it.
pub fn draw_menu(frame: &mut Frame, anchor: Rect, entries: &[ControlEntry; 3]) -> Vec<ControlHit> {
    let bounds = frame.area();
    let popup = menu_rect(anchor, bounds, entries);
    if popup.height < 3 {
        return Vec::new();
    }

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style_unfocused_border());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let mut hits = Vec::with_capacity(entries.len());
    for (row, entry) in entries.iter().enumerate() {
        let rect = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
        if rect.y >= inner.bottom() {
            break;
        }
        let line = Line::from(vec![
            Span::styled(format!("{} ", entry.icon.glyph()), style_muted()),
            Span::styled(entry.label, style_default()),
        ]);
        frame.render_widget(Paragraph::new(line), rect);
        hits.push(ControlHit {
            target: ControlTarget::Entry(entry.action),
            area: rect,
        });
    }
    hits
}

fn menu_rect(anchor: Rect, bounds: Rect, entries: &[ControlEntry; 3]) -> Rect {
    let label_w = entries
        .iter()
        .map(|e| UnicodeWidthStr::width(e.label) as u16 + 2)
        .max()
        .unwrap_or(0);
    let width = (label_w + 2).min(bounds.width);
    let height = (entries.len() as u16 + 2).min(anchor.y.saturating_sub(bounds.y));
    let x = anchor.right().saturating_sub(width).max(bounds.x);
    Rect::new(x, anchor.y.saturating_sub(height), width, height)
}

/// Hit-test `hits` at a terminal cell.
pub fn hit_at(hits: &[ControlHit], col: u16, row: u16) -> Option<ControlTarget> {
    hits.iter()
        .find(|h| {
            col >= h.area.x && col < h.area.right() && row >= h.area.y && row < h.area.bottom()
        })
        .map(|h| h.target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footer::branch::Icon;

    fn entries() -> [ControlEntry; 3] {
        [
            ControlEntry {
                action: ControlAction::FullScreen,
                icon: Icon::ArrowsAlt,
                label: "Full-screen",
            },
            ControlEntry {
                action: ControlAction::ToggleFold,
                icon: Icon::ChevronCircleUp,
                label: "Extend",
            },
            ControlEntry {
                action: ControlAction::ListMedia,
                icon: Icon::List,
                label: "List media",
            },
        ]
    }

    #[test]
    fn test_menu_sits_above_anchor() {
        let bounds = Rect::new(0, 0, 80, 24);
        let anchor = Rect::new(60, 20, 10, 1);
        let popup = menu_rect(anchor, bounds, &entries());
        assert_eq!(popup.height, 5);
        assert_eq!(popup.bottom(), anchor.y);
        assert_eq!(popup.right(), anchor.right());
    }

    #[test]
    fn test_menu_width_counts_display_columns() {
        let mut wide = entries();
        wide[0].label = "全画面表示";
        let popup = menu_rect(Rect::new(60, 20, 10, 1), Rect::new(0, 0, 80, 24), &wide);
        // Ten columns of label, two of padding, two of border.
        assert_eq!(popup.width, 14);
    }

    #[test]
    fn test_hit_at() {
        let hits = vec![
            ControlHit {
                target: ControlTarget::Entry(ControlAction::FullScreen),
                area: Rect::new(10, 5, 3, 1),
            },
            ControlHit {
                target: ControlTarget::MenuToggle,
                area: Rect::new(13, 5, 3, 1),
            },
        ];
        assert_eq!(
            hit_at(&hits, 12, 5),
            Some(ControlTarget::Entry(ControlAction::FullScreen))
        );
        assert_eq!(hit_at(&hits, 13, 5), Some(ControlTarget::MenuToggle));
        assert_eq!(hit_at(&hits, 16, 5), None);
        assert_eq!(hit_at(&hits, 12, 6), None);
    }
}
