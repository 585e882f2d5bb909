//! Composition slotting: selected branches go into four fixed regions.
//!
//! Regions sit on a 12-column grid.  Wide terminals get a single row
//! (selector 2, controller 3, controls 2, now/next 4); narrow ones get two
//! rows (selector 4, controller 6, controls 2, then now/next across all 12).

use footer_proto::protocol::MediaItem;
use ratatui::layout::{Constraint, Layout, Rect};

use super::branch::{Branches, ControlDensity, NowNextBranch, SelectorRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    Selector,
    Controller,
    Controls,
    NowNext,
}

pub const SLOT_ORDER: [SlotId; 4] = [
    SlotId::Selector,
    SlotId::Controller,
    SlotId::Controls,
    SlotId::NowNext,
];

/// Which control rendition is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Wide,
    Narrow,
}

impl Density {
    pub fn for_width(width: u16, wide_min_width: u16) -> Self {
        if width >= wide_min_width {
            Density::Wide
        } else {
            Density::Narrow
        }
    }
}

/// The single child a slot holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotContent<'a> {
    Selector(SelectorRegion<'a>),
    /// Drawn by the controller slot's mounted controller.
    Controller,
    Controls(ControlDensity),
    Webradio {
        now: &'a MediaItem,
        next: &'a MediaItem,
        folded: bool,
    },
    Jukebox {
        now: &'a MediaItem,
        index: usize,
        folded: bool,
    },
}

/// Fill the slots in display order.  A `None` slot renders nothing.
pub fn compose<'a>(branches: &Branches<'a>) -> [(SlotId, Option<SlotContent<'a>>); 4] {
    SLOT_ORDER.map(|slot| {
        let content = match slot {
            SlotId::Selector => Some(SlotContent::Selector(branches.selector)),
            SlotId::Controller => Some(SlotContent::Controller),
            SlotId::Controls => branches.controls.map(SlotContent::Controls),
            SlotId::NowNext => match branches.now_next {
                NowNextBranch::Empty => None,
                NowNextBranch::Webradio { now, next, folded } => {
                    Some(SlotContent::Webradio { now, next, folded })
                }
                NowNextBranch::Jukebox { now, index, folded } => {
                    Some(SlotContent::Jukebox { now, index, folded })
                }
            },
        };
        (slot, content)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotAreas {
    pub selector: Rect,
    pub controller: Rect,
    pub controls: Rect,
    pub now_next: Rect,
}

impl SlotAreas {
    pub fn get(&self, slot: SlotId) -> Rect {
        match slot {
            SlotId::Selector => self.selector,
            SlotId::Controller => self.controller,
            SlotId::Controls => self.controls,
            SlotId::NowNext => self.now_next,
        }
    }
}

/// Rows a widget takes: one folded, three extended.
pub fn content_height(folded: bool) -> u16 {
    if folded {
        1
    } else {
        3
    }
}

/// Inner height of the footer, without chrome.  The narrow second row is
/// only reserved when there is something to show in it.
pub fn body_height(density: Density, folded: bool, has_now_next: bool) -> u16 {
    let rows = match density {
        Density::Wide => 1,
        Density::Narrow if has_now_next => 2,
        Density::Narrow => 1,
    };
    rows * content_height(folded)
}

fn cols(spec: &[u32]) -> Vec<Constraint> {
    spec.iter().map(|&n| Constraint::Ratio(n, 12)).collect()
}

pub fn layout(inner: Rect, density: Density, folded: bool) -> SlotAreas {
    let row_h = content_height(folded);
    match density {
        Density::Wide => {
            let row = Rect { height: row_h.min(inner.height), ..inner };
            let c = Layout::horizontal(cols(&[2, 3, 2, 4, 1])).split(row);
            SlotAreas {
                selector: c[0],
                controller: c[1],
                controls: c[2],
                now_next: c[3],
            }
        }
        Density::Narrow => {
            let [top, bottom] = Layout::vertical([Constraint::Length(row_h), Constraint::Length(row_h)])
                .areas(inner);
            let c = Layout::horizontal(cols(&[4, 6, 2])).split(top);
            SlotAreas {
                selector: c[0],
                controller: c[1],
                controls: c[2],
                now_next: bottom,
            }
        }
    }
}

/// Webradio now and next share the now/next region half and half.
pub fn split_pair(area: Rect) -> (Rect, Rect) {
    let [left, right] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(area);
    (left, right)
}
