//! ViewState: the footer's private, renderable snapshot.
//!
//! Store-sourced fields are written only by [`ViewState::apply`]; `folded`
//! is written only by the local toggles.  No field is written by both.

use footer_proto::protocol::{MediaItem, Player, StoreSnapshot, Stream};

use super::classifier::Patch;

/// One-shot "begin playback now" signal.
///
/// Armed by a load-and-play patch, cleared by every other patch or toggle,
/// and consumed by the render that hands it to the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayIntent(bool);

impl PlayIntent {
    pub fn is_armed(self) -> bool {
        self.0
    }

    fn arm(&mut self) {
        self.0 = true;
    }

    fn clear(&mut self) {
        self.0 = false;
    }

    /// Read and disarm.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub stream_list: Vec<Stream>,
    pub player_list: Vec<Player>,
    pub stream: Stream,
    pub jukebox_index: usize,
    pub media_now: MediaItem,
    pub media_next: MediaItem,
    pub current_player: Option<Player>,
    pub folded: bool,
    /// Local full-screen toggle.  Requests go to the store as
    /// `showFullScreen`; the footer never switches this on itself, so it
    /// stays false for the footer's lifetime.
    pub full_screen: bool,
    pub play_intent: PlayIntent,
}

impl ViewState {
    /// Initial state at mount.  The jukebox index starts at 0; the store's
    /// value is only picked up from index-carrying notifications.
    pub fn from_snapshot(snapshot: &StoreSnapshot, folded: bool) -> Self {
        let profile = &snapshot.profile;
        Self {
            stream_list: snapshot.stream_list.clone(),
            player_list: snapshot.external_player_list.clone(),
            stream: profile.stream.clone(),
            jukebox_index: 0,
            media_now: profile.media_now.clone(),
            media_next: profile.media_next.clone(),
            current_player: profile.current_player.clone(),
            folded,
            full_screen: false,
            play_intent: PlayIntent::default(),
        }
    }

    pub fn apply(&mut self, patch: Patch) {
        let play = patch.requests_play();
        match patch {
            Patch::StreamList(list) => self.stream_list = list,
            Patch::PlayerList(list) => self.player_list = list,
            Patch::CurrentPlayer(player) => self.current_player = player,
            Patch::StreamLoaded(stream) => {
                self.stream = stream;
                self.media_now = MediaItem::Unknown;
            }
            Patch::StreamLoadedAndPlay {
                stream,
                jukebox_index,
            } => {
                self.stream = stream;
                self.media_now = MediaItem::Unknown;
                self.jukebox_index = jukebox_index;
            }
            Patch::JukeboxIndex(index) => self.jukebox_index = index,
            Patch::MediaNow(media) => self.media_now = media,
            Patch::MediaNext(media) => self.media_next = media,
        }
        if play {
            self.play_intent.arm();
        } else {
            self.play_intent.clear();
        }
    }

    /// Flip between folded and extended.  Purely local.
    pub fn toggle_fold(&mut self) {
        self.folded = !self.folded;
        self.play_intent.clear();
    }

    /// Collapse before handing the screen to a store-side view
    /// (full-screen player, media list).
    pub fn fold_for_handoff(&mut self) {
        self.folded = true;
        self.play_intent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footer_proto::protocol::MediaInfo;

    fn loaded() -> ViewState {
        let mut state = ViewState::from_snapshot(&StoreSnapshot::default(), true);
        state.apply(Patch::StreamLoadedAndPlay {
            stream: Stream::webradio("BBC"),
            jukebox_index: 3,
        });
        state
    }

    fn all_non_play_patches() -> Vec<Patch> {
        vec![
            Patch::StreamList(vec![Stream::webradio("a")]),
            Patch::PlayerList(vec![Player::new("p", "mpd")]),
            Patch::CurrentPlayer(None),
            Patch::StreamLoaded(Stream::jukebox("b")),
            Patch::JukeboxIndex(2),
            Patch::MediaNow(MediaItem::Known(MediaInfo::titled("now"))),
            Patch::MediaNext(MediaItem::Unknown),
        ]
    }

    #[test]
    fn test_mount_starts_at_index_zero() {
        let mut snap = StoreSnapshot::default();
        snap.profile.jukebox_index = 9;
        snap.profile.stream = Stream::jukebox("mix");
        let state = ViewState::from_snapshot(&snap, true);
        assert_eq!(state.jukebox_index, 0);
        assert_eq!(state.stream, Stream::jukebox("mix"));
        assert!(state.folded);
        assert!(!state.full_screen);
        assert!(!state.play_intent.is_armed());
    }

    #[test]
    fn test_load_and_play_is_one_patch() {
        let mut state = ViewState::from_snapshot(&StoreSnapshot::default(), true);
        state.media_now = MediaItem::Known(MediaInfo::titled("stale"));
        state.apply(Patch::StreamLoadedAndPlay {
            stream: Stream::webradio("BBC"),
            jukebox_index: 3,
        });
        assert_eq!(state.stream, Stream::webradio("BBC"));
        assert_eq!(state.media_now, MediaItem::Unknown);
        assert_eq!(state.jukebox_index, 3);
        assert!(state.play_intent.is_armed());
    }

    #[test]
    fn test_every_other_patch_clears_play_intent() {
        for patch in all_non_play_patches() {
            let mut state = loaded();
            assert!(state.play_intent.is_armed());
            state.apply(patch.clone());
            assert!(!state.play_intent.is_armed(), "{:?} kept play armed", patch);
        }
    }

    #[test]
    fn test_stream_loaded_resets_media_now_only() {
        let mut state = loaded();
        state.media_now = MediaItem::Known(MediaInfo::titled("x"));
        state.media_next = MediaItem::Known(MediaInfo::titled("y"));
        state.apply(Patch::StreamLoaded(Stream::jukebox("other")));
        assert_eq!(state.media_now, MediaItem::Unknown);
        assert_eq!(state.media_next, MediaItem::Known(MediaInfo::titled("y")));
        assert_eq!(state.jukebox_index, 3);
    }

    #[test]
    fn test_toggle_fold_flips_and_clears_play() {
        let mut state = loaded();
        state.media_now = MediaItem::Known(MediaInfo::titled("x"));
        let before = state.clone();

        state.toggle_fold();
        assert_eq!(state.folded, !before.folded);
        assert!(!state.play_intent.is_armed());
        assert_eq!(state.stream, before.stream);
        assert_eq!(state.media_now, before.media_now);

        state.toggle_fold();
        assert_eq!(state.folded, before.folded);
    }

    #[test]
    fn test_take_consumes_intent_once() {
        let mut state = loaded();
        assert!(state.play_intent.take());
        assert!(!state.play_intent.take());
    }
}
