//! Player boxes: the two controllers that can sit in the footer's
//! controller slot.
//!
//! `LocalPlayerBox` plays through this machine's output; `RemotePlayerBox`
//! drives one of the store's external players.  Both only start playback
//! when handed `play = true`, which happens once per load-and-play.

use footer_proto::protocol::{Player, Stream};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info};

use crate::footer::branch::{ControllerBranch, ControllerKind, ControllerProps};
use crate::footer::controller::{ControllerFactory, PlaybackController};
use crate::theme::{style_muted, style_playing, style_secondary, C_CONNECTING, C_NETWORK};
use crate::widgets::label::truncate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transport {
    /// No stream loaded.
    #[default]
    Idle,
    /// Stream loaded, waiting for a play request.
    Ready,
    Playing,
}

impl Transport {
    fn glyph(self) -> &'static str {
        match self {
            Transport::Idle => "·",
            Transport::Ready => "■",
            Transport::Playing => "▶",
        }
    }

    fn style(self) -> Style {
        match self {
            Transport::Idle => style_muted(),
            Transport::Ready => Style::default().fg(C_CONNECTING),
            Transport::Playing => style_playing(),
        }
    }
}

/// What both boxes track from their props.
#[derive(Debug, Clone, Default)]
struct Deck {
    stream: Stream,
    index: usize,
    transport: Transport,
    /// Number of times playback was started.
    starts: usize,
}

impl Deck {
    fn update(&mut self, props: &ControllerProps<'_>) {
        if !props.stream.is_loaded() {
            self.transport = Transport::Idle;
        } else if props.play {
            self.transport = Transport::Playing;
            self.starts += 1;
        } else if *props.stream != self.stream {
            self.transport = Transport::Ready;
        } else if self.transport == Transport::Idle {
            self.transport = Transport::Ready;
        }
        self.stream = props.stream.clone();
        self.index = props.index;
    }

    fn lines(&self, target: Line<'static>, width: usize, folded: bool) -> Vec<Line<'static>> {
        let label = if self.stream.is_loaded() {
            self.stream.label().to_string()
        } else {
            "no stream".to_string()
        };
        let head = Line::from(vec![
            Span::styled(format!("{} ", self.transport.glyph()), self.transport.style()),
            Span::styled(truncate(&label, width.saturating_sub(2)), style_secondary()),
        ]);
        if folded {
            return vec![head];
        }

        let position = if self.stream.is_loaded() && !self.stream.webradio {
            format!("track #{}", self.index.saturating_add(1))
        } else if self.stream.is_loaded() {
            "live".to_string()
        } else {
            String::new()
        };
        vec![head, target, Line::from(Span::styled(position, style_muted()))]
    }
}

pub struct LocalPlayerBox {
    deck: Deck,
}

impl LocalPlayerBox {
    pub fn new() -> Self {
        Self {
            deck: Deck::default(),
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> Transport {
        self.deck.transport
    }
}

impl PlaybackController for LocalPlayerBox {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Local
    }

    fn update(&mut self, branch: &ControllerBranch<'_>) {
        let props = branch.props();
        self.deck.update(props);
        if props.play {
            info!("local player: start {:?} at #{}", props.stream.name, props.index);
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, folded: bool) {
        let target = Line::from(Span::styled("local output", style_muted()));
        let lines = self.deck.lines(target, area.width as usize, folded);
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn unmount(&mut self) {
        debug!("local player: stopped");
        self.deck.transport = Transport::Idle;
    }
}

pub struct RemotePlayerBox {
    player: Player,
    deck: Deck,
}

impl RemotePlayerBox {
    pub fn new() -> Self {
        Self {
            player: Player::default(),
            deck: Deck::default(),
        }
    }
}

impl PlaybackController for RemotePlayerBox {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Remote
    }

    fn update(&mut self, branch: &ControllerBranch<'_>) {
        if let ControllerBranch::Remote { player, .. } = branch {
            if **player != self.player {
                debug!("remote player: now driving {}", player.name);
                self.player = (*player).clone();
            }
        }
        let props = branch.props();
        self.deck.update(props);
        if props.play {
            info!(
                "remote player {}: play {:?} at #{}",
                self.player.name, props.stream.name, props.index
            );
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, folded: bool) {
        let target_text = if self.player.kind.is_empty() {
            self.player.name.clone()
        } else {
            format!("{} ({})", self.player.name, self.player.kind)
        };
        let target = Line::from(vec![
            Span::styled("⇄ ", Style::default().fg(C_NETWORK)),
            Span::styled(
                truncate(&target_text, (area.width as usize).saturating_sub(2)),
                style_secondary(),
            ),
        ]);
        let lines = self.deck.lines(target, area.width as usize, folded);
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn unmount(&mut self) {
        debug!("remote player {}: released", self.player.name);
        self.deck.transport = Transport::Idle;
    }
}

/// Builds the real player boxes.
#[derive(Debug, Default)]
pub struct PlayerBoxFactory;

impl ControllerFactory for PlayerBoxFactory {
    fn mount(&mut self, kind: ControllerKind) -> Box<dyn PlaybackController> {
        match kind {
            ControllerKind::Local => Box::new(LocalPlayerBox::new()),
            ControllerKind::Remote => Box::new(RemotePlayerBox::new()),
        }
    }
}
