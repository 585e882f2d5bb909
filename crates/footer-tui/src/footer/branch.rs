//! Branch selector: pure function from [`ViewState`] to render decisions.
//!
//! Every region gets exactly one value of its own enum, so two branches of
//! the same region can never be selected together.

use footer_proto::protocol::{MediaItem, Player, Stream};

use super::view_state::ViewState;

/// Now/next region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NowNextBranch<'a> {
    /// No stream loaded.
    Empty,
    /// Live stream: "now" and "next" side by side.
    Webradio {
        now: &'a MediaItem,
        next: &'a MediaItem,
        folded: bool,
    },
    /// Jukebox stream: one "now" widget spanning both columns.
    Jukebox {
        now: &'a MediaItem,
        index: usize,
        folded: bool,
    },
}

/// What every playback controller is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerProps<'a> {
    pub stream: &'a Stream,
    pub play: bool,
    pub index: usize,
}

/// Controller region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerBranch<'a> {
    Remote {
        player: &'a Player,
        props: ControllerProps<'a>,
    },
    Local {
        props: ControllerProps<'a>,
    },
}

impl<'a> ControllerBranch<'a> {
    pub fn props(&self) -> &ControllerProps<'a> {
        match self {
            ControllerBranch::Remote { props, .. } | ControllerBranch::Local { props } => props,
        }
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            ControllerBranch::Remote { .. } => ControllerKind::Remote,
            ControllerBranch::Local { .. } => ControllerKind::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Remote,
    Local,
}

/// The three footer controls, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    FullScreen,
    ToggleFold,
    ListMedia,
}

pub const CONTROL_ORDER: [ControlAction; 3] = [
    ControlAction::FullScreen,
    ControlAction::ToggleFold,
    ControlAction::ListMedia,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ArrowsAlt,
    ChevronCircleUp,
    ChevronCircleDown,
    List,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::ArrowsAlt => "⤢",
            Icon::ChevronCircleUp => "▲",
            Icon::ChevronCircleDown => "▼",
            Icon::List => "≡",
        }
    }
}

/// One control as shown in either density.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlEntry {
    pub action: ControlAction,
    pub icon: Icon,
    /// Tooltip on the wide button, label in the narrow menu.
    pub label: &'static str,
}

/// Wide button group and narrow menu.  Both carry the same actions in the
/// same order; only labels differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlDensity {
    pub wide: [ControlEntry; 3],
    pub narrow: [ControlEntry; 3],
}

/// Stream picker grouped with the player picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorRegion<'a> {
    pub streams: &'a [Stream],
    pub current: &'a Stream,
    pub players: &'a [Player],
    pub current_player: Option<&'a Player>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Branches<'a> {
    pub selector: SelectorRegion<'a>,
    pub controller: ControllerBranch<'a>,
    /// Only present while a stream is loaded.
    pub controls: Option<ControlDensity>,
    pub now_next: NowNextBranch<'a>,
}

pub fn select(state: &ViewState) -> Branches<'_> {
    Branches {
        selector: select_selector(state),
        controller: select_controller(state),
        controls: select_controls(state),
        now_next: select_now_next(state),
    }
}

pub fn select_now_next(state: &ViewState) -> NowNextBranch<'_> {
    if !state.stream.is_loaded() {
        NowNextBranch::Empty
    } else if state.stream.webradio {
        NowNextBranch::Webradio {
            now: &state.media_now,
            next: &state.media_next,
            folded: state.folded,
        }
    } else {
        NowNextBranch::Jukebox {
            now: &state.media_now,
            index: state.jukebox_index,
            folded: state.folded,
        }
    }
}

pub fn select_controller(state: &ViewState) -> ControllerBranch<'_> {
    let props = ControllerProps {
        stream: &state.stream,
        play: state.play_intent.is_armed(),
        index: state.jukebox_index,
    };
    match &state.current_player {
        Some(player) => ControllerBranch::Remote { player, props },
        None => ControllerBranch::Local { props },
    }
}

pub fn select_controls(state: &ViewState) -> Option<ControlDensity> {
    if !state.stream.is_loaded() {
        return None;
    }
    let fold_icon = if state.folded {
        Icon::ChevronCircleUp
    } else {
        Icon::ChevronCircleDown
    };
    let fold_label = if state.folded { "Extend" } else { "Fold" };

    let entry = |action: ControlAction, wide: bool| -> ControlEntry {
        match action {
            ControlAction::FullScreen => ControlEntry {
                action,
                icon: Icon::ArrowsAlt,
                label: "Full-screen",
            },
            ControlAction::ToggleFold => ControlEntry {
                action,
                icon: fold_icon,
                label: if wide { "Extend" } else { fold_label },
            },
            ControlAction::ListMedia => ControlEntry {
                action,
                icon: Icon::List,
                label: "List media",
            },
        }
    };

    Some(ControlDensity {
        wide: CONTROL_ORDER.map(|a| entry(a, true)),
        narrow: CONTROL_ORDER.map(|a| entry(a, false)),
    })
}

pub fn select_selector(state: &ViewState) -> SelectorRegion<'_> {
    SelectorRegion {
        streams: &state.stream_list,
        current: &state.stream,
        players: &state.player_list,
        current_player: state.current_player.as_ref(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::footer::classifier::Patch;
    use footer_proto::protocol::StoreSnapshot;

    fn state_with(stream: Stream, player: Option<Player>) -> ViewState {
        let mut state = ViewState::from_snapshot(&StoreSnapshot::default(), true);
        state.stream = stream;
        state.current_player = player;
        state
    }

    fn streams() -> Vec<Stream> {
        vec![
            Stream::default(),
            Stream {
                name: Some(String::new()),
                ..Stream::default()
            },
            Stream::webradio("BBC"),
            Stream::jukebox("mix"),
        ]
    }

    #[test]
    fn test_now_next_is_exclusive_and_exhaustive() {
        for stream in streams() {
            for folded in [true, false] {
                let mut state = state_with(stream.clone(), None);
                state.folded = folded;
                match select_now_next(&state) {
                    NowNextBranch::Empty => assert!(!stream.is_loaded()),
                    NowNextBranch::Webradio { folded: f, .. } => {
                        assert!(stream.is_loaded() && stream.webradio);
                        assert_eq!(f, folded);
                    }
                    NowNextBranch::Jukebox { folded: f, .. } => {
                        assert!(stream.is_loaded() && !stream.webradio);
                        assert_eq!(f, folded);
                    }
                }
            }
        }
    }

    #[test]
    fn test_jukebox_branch_carries_index() {
        let mut state = state_with(Stream::jukebox("mix"), None);
        state.jukebox_index = 5;
        assert!(matches!(
            select_now_next(&state),
            NowNextBranch::Jukebox { index: 5, .. }
        ));
    }

    #[test]
    fn test_controller_follows_current_player() {
        let player = Player::new("den", "mpd");
        let state = state_with(Stream::webradio("BBC"), Some(player.clone()));
        match select_controller(&state) {
            ControllerBranch::Remote { player: p, props } => {
                assert_eq!(p, &player);
                assert_eq!(props.stream, &Stream::webradio("BBC"));
            }
            other => panic!("expected remote, got {:?}", other),
        }

        let state = state_with(Stream::webradio("BBC"), None);
        assert_eq!(select_controller(&state).kind(), ControllerKind::Local);
    }

    #[test]
    fn test_controller_props_carry_play_and_index() {
        let mut state = state_with(Stream::default(), None);
        state.apply(Patch::StreamLoadedAndPlay {
            stream: Stream::jukebox("mix"),
            jukebox_index: 2,
        });
        let branch = select_controller(&state);
        assert!(branch.props().play);
        assert_eq!(branch.props().index, 2);
    }

    #[test]
    fn test_controls_hidden_without_stream() {
        assert_eq!(select_controls(&state_with(Stream::default(), None)), None);
    }

    #[test]
    fn test_control_densities_have_parity() {
        for folded in [true, false] {
            let mut state = state_with(Stream::jukebox("mix"), None);
            state.folded = folded;
            let controls = select_controls(&state).unwrap();
            let wide: Vec<_> = controls.wide.iter().map(|e| (e.action, e.icon)).collect();
            let narrow: Vec<_> = controls.narrow.iter().map(|e| (e.action, e.icon)).collect();
            assert_eq!(wide, narrow);
            assert_eq!(
                controls.wide.map(|e| e.action),
                CONTROL_ORDER,
            );
        }
    }

    #[test]
    fn test_fold_label_and_icon_follow_state() {
        let mut state = state_with(Stream::jukebox("mix"), None);
        let controls = select_controls(&state).unwrap();
        assert_eq!(controls.narrow[1].label, "Extend");
        assert_eq!(controls.narrow[1].icon, Icon::ChevronCircleUp);

        state.folded = false;
        let controls = select_controls(&state).unwrap();
        assert_eq!(controls.narrow[1].label, "Fold");
        assert_eq!(controls.narrow[1].icon, Icon::ChevronCircleDown);
        assert_eq!(controls.wide[1].label, "Extend");
    }

    #[test]
    fn test_selector_always_present() {
        let state = state_with(Stream::default(), None);
        let selector = select(&state).selector;
        assert!(selector.streams.is_empty());
        assert!(selector.players.is_empty());
        assert_eq!(selector.current_player, None);
    }
}
