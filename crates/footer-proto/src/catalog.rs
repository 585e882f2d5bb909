//! Stream catalog: the streams and external players offered to the footer.
//!
//! Loaded from a TOML file (`[[stream]]` / `[[player]]` tables) or, for a
//! plain list of live streams, from an m3u playlist.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::protocol::{MediaInfo, MediaItem, Player, Stream};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// One catalog entry.  Jukebox streams list their tracks in `media`; live
/// streams may carry the current/next item announced by the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogStream {
    pub stream: Stream,
    pub media: Vec<MediaInfo>,
    pub now: MediaItem,
    pub next: MediaItem,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub streams: Vec<CatalogStream>,
    pub players: Vec<Player>,
}

impl Catalog {
    /// Streams in catalog order, as the store's stream list.
    pub fn stream_list(&self) -> Vec<Stream> {
        self.streams.iter().map(|s| s.stream.clone()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&CatalogStream> {
        self.streams
            .iter()
            .find(|s| s.stream.name.as_deref() == Some(name))
    }

    /// Number of tracks in a jukebox stream (0 for live or unknown streams).
    pub fn track_count(&self, stream: &Stream) -> usize {
        stream
            .name
            .as_deref()
            .and_then(|n| self.find(n))
            .map_or(0, |s| s.media.len())
    }

    /// The media item at `index` of a jukebox stream.
    pub fn media_at(&self, stream: &Stream, index: usize) -> MediaItem {
        stream
            .name
            .as_deref()
            .and_then(|n| self.find(n))
            .and_then(|s| s.media.get(index))
            .cloned()
            .map_or(MediaItem::Unknown, MediaItem::Known)
    }
}

// ── TOML loader ───────────────────────────────────────────────────────────────

/// Intermediate structs matching the TOML tables, kept apart from the store
/// types so the file schema can evolve on its own.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    #[serde(default)]
    stream: Vec<TomlStream>,
    #[serde(default)]
    player: Vec<TomlPlayer>,
}

#[derive(Debug, Deserialize)]
struct TomlStream {
    name: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    webradio: bool,
    #[serde(default)]
    media: Vec<TomlMedia>,
    #[serde(default)]
    now: Option<TomlMedia>,
    #[serde(default)]
    next: Option<TomlMedia>,
}

#[derive(Debug, Deserialize)]
struct TomlMedia {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    artist: Option<String>,
    #[serde(default)]
    album: Option<String>,
    #[serde(default)]
    duration_secs: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlPlayer {
    name: String,
    #[serde(default = "default_player_kind")]
    kind: String,
}

fn default_player_kind() -> String {
    "mpd".to_string()
}

impl From<TomlMedia> for MediaInfo {
    fn from(m: TomlMedia) -> Self {
        MediaInfo {
            title: m.title,
            artist: m.artist,
            album: m.album,
            duration_secs: m.duration_secs,
        }
    }
}

fn known(m: Option<TomlMedia>) -> MediaItem {
    m.map_or(MediaItem::Unknown, |m| MediaItem::Known(m.into()))
}

pub fn parse_catalog_str(content: &str) -> Result<Catalog, toml::de::Error> {
    let file: TomlCatalogFile = toml::from_str(content)?;
    let streams = file
        .stream
        .into_iter()
        .map(|s| CatalogStream {
            stream: Stream {
                name: Some(s.name),
                display_name: s.display_name,
                webradio: s.webradio,
            },
            media: s.media.into_iter().map(MediaInfo::from).collect(),
            now: known(s.now),
            next: known(s.next),
        })
        .collect();
    let players = file
        .player
        .into_iter()
        .map(|p| Player {
            name: p.name,
            kind: p.kind,
        })
        .collect();
    Ok(Catalog { streams, players })
}

// ── m3u loader ────────────────────────────────────────────────────────────────

/// Every m3u entry becomes a live stream named after its `#EXTINF` title
/// (or its URL when untitled).
pub fn parse_m3u_streams(content: &str) -> Catalog {
    let mut streams = Vec::new();
    let mut pending_name: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("#EXTINF:") {
            if let Some(comma_idx) = rest.find(',') {
                pending_name = Some(rest[comma_idx + 1..].trim().to_string());
            }
            continue;
        }

        if line.starts_with('#') {
            continue;
        }

        let name = pending_name.take().unwrap_or_else(|| line.to_string());
        streams.push(CatalogStream {
            stream: Stream::webradio(&name),
            ..CatalogStream::default()
        });
    }

    Catalog {
        streams,
        players: Vec::new(),
    }
}

/// Load a catalog file; `.m3u`/`.m3u8` files are read as playlists, anything
/// else as TOML.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_m3u = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("m3u") || e.eq_ignore_ascii_case("m3u8"))
        .unwrap_or(false);
    if is_m3u {
        return Ok(parse_m3u_streams(&content));
    }

    parse_catalog_str(&content).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[stream]]
name = "bbc6"
display_name = "BBC Radio 6"
webradio = true
now = { title = "Teardrop", artist = "Massive Attack" }

[[stream]]
name = "jazz"

[[stream.media]]
title = "So What"
artist = "Miles Davis"

[[stream.media]]
title = "Blue in Green"

[[player]]
name = "living-room"
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog_str(SAMPLE).unwrap();
        assert_eq!(catalog.streams.len(), 2);
        assert_eq!(catalog.streams[0].stream.label(), "BBC Radio 6");
        assert!(catalog.streams[0].stream.webradio);
        assert!(catalog.streams[0].now.is_known());
        assert_eq!(catalog.streams[0].next, MediaItem::Unknown);
        assert!(!catalog.streams[1].stream.webradio);
        assert_eq!(catalog.streams[1].media.len(), 2);
        assert_eq!(catalog.players, vec![Player::new("living-room", "mpd")]);
    }

    #[test]
    fn test_media_at_and_track_count() {
        let catalog = parse_catalog_str(SAMPLE).unwrap();
        let jazz = Stream::jukebox("jazz");
        assert_eq!(catalog.track_count(&jazz), 2);
        assert_eq!(
            catalog.media_at(&jazz, 1),
            MediaItem::Known(MediaInfo::titled("Blue in Green"))
        );
        assert_eq!(catalog.media_at(&jazz, 5), MediaItem::Unknown);
        assert_eq!(catalog.track_count(&Stream::default()), 0);
    }

    #[test]
    fn test_parse_m3u_streams() {
        let catalog = parse_m3u_streams(
            "#EXTM3U\n#EXTINF:-1,FIP\nhttps://icecast.radiofrance.fr/fip.mp3\nhttps://example.org/raw\n",
        );
        let names: Vec<&str> = catalog.streams.iter().map(|s| s.stream.label()).collect();
        assert_eq!(names, vec!["FIP", "https://example.org/raw"]);
        assert!(catalog.streams.iter().all(|s| s.stream.webradio));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_catalog(Path::new("/nonexistent/streams.toml")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
