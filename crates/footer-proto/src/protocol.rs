use serde::{Deserialize, Serialize};

/// A selectable stream.  `name` is the identity; a stream without a name is
/// "not loaded" and everything that depends on a stream is suppressed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    #[serde(default)]
    pub name: Option<String>,
    /// Human-readable label shown in pickers; falls back to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Live stream (true) or indexable jukebox sequence (false).
    #[serde(default)]
    pub webradio: bool,
}

impl Stream {
    pub fn webradio(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            display_name: None,
            webradio: true,
        }
    }

    pub fn jukebox(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            display_name: None,
            webradio: false,
        }
    }

    /// True when the stream has a non-empty name.
    pub fn is_loaded(&self) -> bool {
        self.name.as_deref().map_or(false, |n| !n.is_empty())
    }

    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

/// Track metadata for a known media item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_secs: Option<f64>,
}

impl MediaInfo {
    pub fn titled(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }
}

/// Current or next media item.  `Unknown` travels as `false` (or `null`) on
/// the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "MediaRepr", into = "MediaRepr")]
pub enum MediaItem {
    #[default]
    Unknown,
    Known(MediaInfo),
}

impl MediaItem {
    pub fn info(&self) -> Option<&MediaInfo> {
        match self {
            MediaItem::Unknown => None,
            MediaItem::Known(info) => Some(info),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, MediaItem::Known(_))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MediaRepr {
    Info(MediaInfo),
    Absent(Option<bool>),
}

impl From<MediaRepr> for MediaItem {
    fn from(repr: MediaRepr) -> Self {
        match repr {
            MediaRepr::Info(info) => MediaItem::Known(info),
            MediaRepr::Absent(_) => MediaItem::Unknown,
        }
    }
}

impl From<MediaItem> for MediaRepr {
    fn from(item: MediaItem) -> Self {
        match item {
            MediaItem::Unknown => MediaRepr::Absent(Some(false)),
            MediaItem::Known(info) => MediaRepr::Info(info),
        }
    }
}

/// An external (remote) player known to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Backend kind, e.g. "mpd".
    #[serde(default)]
    pub kind: String,
}

impl Player {
    pub fn new(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
        }
    }
}

/// Targets of the `setCurrentBrowse` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Browse {
    #[default]
    Dashboard,
    ShowStreamMediaList,
}

/// Every action the store accepts.  Each variant carries its own payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum StoreAction {
    SetStreamList { stream_list: Vec<Stream> },
    SetExternalPlayerList { external_player_list: Vec<Player> },
    SetCurrentPlayer { current_player: Option<Player> },
    LoadStream { stream: Stream },
    LoadStreamAndPlay { stream: Stream, index: usize },
    SetJukeboxIndex { index: usize },
    SetMediaNow { media: MediaItem },
    SetMediaNext { media: MediaItem },
    ShowFullScreen { show: bool },
    SetCurrentBrowse { browse: Browse },
}

impl StoreAction {
    pub fn tag(&self) -> ActionTag {
        match self {
            Self::SetStreamList { .. } => ActionTag::SetStreamList,
            Self::SetExternalPlayerList { .. } => ActionTag::SetExternalPlayerList,
            Self::SetCurrentPlayer { .. } => ActionTag::SetCurrentPlayer,
            Self::LoadStream { .. } => ActionTag::LoadStream,
            Self::LoadStreamAndPlay { .. } => ActionTag::LoadStreamAndPlay,
            Self::SetJukeboxIndex { .. } => ActionTag::SetJukeboxIndex,
            Self::SetMediaNow { .. } => ActionTag::SetMediaNow,
            Self::SetMediaNext { .. } => ActionTag::SetMediaNext,
            Self::ShowFullScreen { .. } => ActionTag::ShowFullScreen,
            Self::SetCurrentBrowse { .. } => ActionTag::SetCurrentBrowse,
        }
    }
}

/// The tag of the last action applied to the store.  Tags that this build
/// does not know decode as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionTag {
    SetStreamList,
    SetExternalPlayerList,
    SetCurrentPlayer,
    LoadStream,
    LoadStreamAndPlay,
    SetJukeboxIndex,
    SetMediaNow,
    SetMediaNext,
    ShowFullScreen,
    SetCurrentBrowse,
    #[serde(other)]
    Unknown,
}

/// Per-listener profile: what is loaded and playing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub stream: Stream,
    pub media_now: MediaItem,
    pub media_next: MediaItem,
    pub current_player: Option<Player>,
    pub jukebox_index: usize,
}

/// Full store contents.  Missing fields decode as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    /// Incremented on every applied action.
    pub rev: u64,
    pub last_action: Option<ActionTag>,
    pub stream_list: Vec<Stream>,
    pub external_player_list: Vec<Player>,
    pub profile: Profile,
    pub show_full_screen: bool,
    pub current_browse: Browse,
}

impl StoreSnapshot {
    /// Reduce one action into the snapshot.
    pub fn apply(&mut self, action: StoreAction) {
        self.last_action = Some(action.tag());
        match action {
            StoreAction::SetStreamList { stream_list } => self.stream_list = stream_list,
            StoreAction::SetExternalPlayerList {
                external_player_list,
            } => self.external_player_list = external_player_list,
            StoreAction::SetCurrentPlayer { current_player } => {
                self.profile.current_player = current_player
            }
            StoreAction::LoadStream { stream } => {
                self.profile.stream = stream;
                self.profile.media_now = MediaItem::Unknown;
            }
            StoreAction::LoadStreamAndPlay { stream, index } => {
                self.profile.stream = stream;
                self.profile.media_now = MediaItem::Unknown;
                self.profile.jukebox_index = index;
            }
            StoreAction::SetJukeboxIndex { index } => self.profile.jukebox_index = index,
            StoreAction::SetMediaNow { media } => self.profile.media_now = media,
            StoreAction::SetMediaNext { media } => self.profile.media_next = media,
            StoreAction::ShowFullScreen { show } => self.show_full_screen = show,
            StoreAction::SetCurrentBrowse { browse } => self.current_browse = browse,
        }
        self.rev += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_without_name_is_not_loaded() {
        assert!(!Stream::default().is_loaded());
        let empty = Stream {
            name: Some(String::new()),
            ..Stream::default()
        };
        assert!(!empty.is_loaded());
        assert!(Stream::webradio("BBC").is_loaded());
    }

    #[test]
    fn test_media_item_accepts_false_and_null() {
        let a: MediaItem = serde_json::from_str("false").unwrap();
        let b: MediaItem = serde_json::from_str("null").unwrap();
        let c: MediaItem = serde_json::from_str(r#"{"title":"Song 2"}"#).unwrap();
        assert_eq!(a, MediaItem::Unknown);
        assert_eq!(b, MediaItem::Unknown);
        assert_eq!(c, MediaItem::Known(MediaInfo::titled("Song 2")));
        assert_eq!(serde_json::to_string(&MediaItem::Unknown).unwrap(), "false");
    }

    #[test]
    fn test_unknown_tag_decodes_as_unknown() {
        let tag: ActionTag = serde_json::from_str(r#""setVolume""#).unwrap();
        assert_eq!(tag, ActionTag::Unknown);
        let tag: ActionTag = serde_json::from_str(r#""loadStreamAndPlay""#).unwrap();
        assert_eq!(tag, ActionTag::LoadStreamAndPlay);
    }

    #[test]
    fn test_snapshot_missing_fields_are_empty() {
        let snap: StoreSnapshot =
            serde_json::from_str(r#"{"profile":{"stream":{"name":null}}}"#).unwrap();
        assert!(snap.stream_list.is_empty());
        assert!(snap.external_player_list.is_empty());
        assert!(!snap.profile.stream.is_loaded());
        assert_eq!(snap.profile.current_player, None);
        assert_eq!(snap.last_action, None);
    }

    #[test]
    fn test_apply_load_and_play() {
        let mut snap = StoreSnapshot::default();
        snap.profile.media_now = MediaItem::Known(MediaInfo::titled("old"));
        snap.apply(StoreAction::LoadStreamAndPlay {
            stream: Stream::webradio("BBC"),
            index: 3,
        });
        assert_eq!(snap.rev, 1);
        assert_eq!(snap.last_action, Some(ActionTag::LoadStreamAndPlay));
        assert_eq!(snap.profile.stream.name.as_deref(), Some("BBC"));
        assert_eq!(snap.profile.jukebox_index, 3);
        assert_eq!(snap.profile.media_now, MediaItem::Unknown);
    }
}
