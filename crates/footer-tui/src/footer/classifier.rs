//! Action classifier: maps the store's last action tag to one view-state patch.

use footer_proto::protocol::{ActionTag, MediaItem, Player, StoreSnapshot, Stream};

/// A change to apply to [`ViewState`](super::view_state::ViewState).
/// Each variant carries the fields read from the snapshot that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    StreamList(Vec<Stream>),
    PlayerList(Vec<Player>),
    CurrentPlayer(Option<Player>),
    StreamLoaded(Stream),
    StreamLoadedAndPlay { stream: Stream, jukebox_index: usize },
    JukeboxIndex(usize),
    MediaNow(MediaItem),
    MediaNext(MediaItem),
}

impl Patch {
    /// True for the one patch that asks the controller to start playing.
    pub fn requests_play(&self) -> bool {
        matches!(self, Patch::StreamLoadedAndPlay { .. })
    }
}

/// Classify the snapshot's last action.  Tags the footer does not react to
/// yield `None`.
pub fn classify(snapshot: &StoreSnapshot) -> Option<Patch> {
    let tag = snapshot.last_action?;
    let profile = &snapshot.profile;
    match tag {
        ActionTag::SetStreamList => Some(Patch::StreamList(snapshot.stream_list.clone())),
        ActionTag::SetExternalPlayerList => {
            Some(Patch::PlayerList(snapshot.external_player_list.clone()))
        }
        ActionTag::SetCurrentPlayer => Some(Patch::CurrentPlayer(profile.current_player.clone())),
        ActionTag::LoadStream => Some(Patch::StreamLoaded(profile.stream.clone())),
        ActionTag::LoadStreamAndPlay => Some(Patch::StreamLoadedAndPlay {
            stream: profile.stream.clone(),
            jukebox_index: profile.jukebox_index,
        }),
        ActionTag::SetJukeboxIndex => Some(Patch::JukeboxIndex(profile.jukebox_index)),
        ActionTag::SetMediaNow => Some(Patch::MediaNow(profile.media_now.clone())),
        ActionTag::SetMediaNext => Some(Patch::MediaNext(profile.media_next.clone())),
        ActionTag::ShowFullScreen | ActionTag::SetCurrentBrowse | ActionTag::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use footer_proto::protocol::{Browse, MediaInfo, StoreAction};

    fn after(actions: Vec<StoreAction>) -> StoreSnapshot {
        let mut snap = StoreSnapshot::default();
        for a in actions {
            snap.apply(a);
        }
        snap
    }

    #[test]
    fn test_no_last_action_is_ignored() {
        assert_eq!(classify(&StoreSnapshot::default()), None);
    }

    #[test]
    fn test_commands_and_unknown_tags_are_ignored() {
        let snap = after(vec![StoreAction::ShowFullScreen { show: true }]);
        assert_eq!(classify(&snap), None);
        let snap = after(vec![StoreAction::SetCurrentBrowse {
            browse: Browse::ShowStreamMediaList,
        }]);
        assert_eq!(classify(&snap), None);

        let mut snap = StoreSnapshot::default();
        snap.last_action = Some(ActionTag::Unknown);
        assert_eq!(classify(&snap), None);
    }

    #[test]
    fn test_load_and_play_reads_stream_and_index() {
        let snap = after(vec![StoreAction::LoadStreamAndPlay {
            stream: Stream::jukebox("mix"),
            index: 4,
        }]);
        let patch = classify(&snap).unwrap();
        assert!(patch.requests_play());
        assert_eq!(
            patch,
            Patch::StreamLoadedAndPlay {
                stream: Stream::jukebox("mix"),
                jukebox_index: 4
            }
        );
    }

    #[test]
    fn test_each_tag_reads_its_own_field() {
        let snap = after(vec![
            StoreAction::SetJukeboxIndex { index: 7 },
            StoreAction::SetMediaNext {
                media: MediaItem::Known(MediaInfo::titled("next")),
            },
        ]);
        assert_eq!(
            classify(&snap),
            Some(Patch::MediaNext(MediaItem::Known(MediaInfo::titled("next"))))
        );

        let snap = after(vec![StoreAction::SetJukeboxIndex { index: 7 }]);
        assert_eq!(classify(&snap), Some(Patch::JukeboxIndex(7)));

        let snap = after(vec![StoreAction::SetCurrentPlayer {
            current_player: Some(Player::new("den", "mpd")),
        }]);
        assert_eq!(
            classify(&snap),
            Some(Patch::CurrentPlayer(Some(Player::new("den", "mpd"))))
        );
    }
}
