//! Provider-agnostic result shapes.
//!
//! Everything leaving the adapter is projected into these records with a
//! fixed field set, so tool handlers never branch on Spotify's JSON keys.
//! Projection is lookup-by-name on the parsed value, which makes it
//! insensitive to field ordering in the provider payload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A track, projected to the fields the tools expose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrackRecord {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub duration_ms: Option<u64>,
}

/// An album summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AlbumRecord {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub artists: Vec<String>,
    pub release_date: Option<String>,
    pub total_tracks: Option<u64>,
}

/// An artist summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArtistRecord {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub genres: Vec<String>,
    pub followers: Option<u64>,
}

/// A playlist summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlaylistRecord {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: Option<String>,
    pub track_count: Option<u64>,
}

/// Snapshot of the user's current playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlaybackState {
    pub track: Option<TrackRecord>,
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub device: Option<String>,
}

/// Snapshot of the playback queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QueueSnapshot {
    pub currently_playing: Option<TrackRecord>,
    pub queue: Vec<TrackRecord>,
}

/// One page of a paginated listing.
///
/// `cursor` is the provider's opaque continuation token, passed through
/// untouched; the adapter never decodes or re-derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<String>,
    pub total: Option<u64>,
}

/// Combined search results, one section per requested kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchResults {
    pub tracks: Vec<TrackRecord>,
    pub albums: Vec<AlbumRecord>,
    pub artists: Vec<ArtistRecord>,
    pub playlists: Vec<PlaylistRecord>,
}

/// Detailed item lookup result, shaped by the item kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemInfo {
    Track {
        track: TrackRecord,
    },
    Album {
        album: AlbumRecord,
        tracks: Vec<TrackRecord>,
    },
    Artist {
        artist: ArtistRecord,
        top_tracks: Vec<TrackRecord>,
        albums: Vec<AlbumRecord>,
    },
    Playlist {
        playlist: PlaylistRecord,
        tracks: Vec<TrackRecord>,
    },
}

/// The kinds of catalog items tools can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
            Self::Artist => "artist",
            Self::Playlist => "playlist",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "track" => Some(Self::Track),
            "album" => Some(Self::Album),
            "artist" => Some(Self::Artist),
            "playlist" => Some(Self::Playlist),
            _ => None,
        }
    }
}

/// A parsed reference to a catalog item.
///
/// Accepts `spotify:<kind>:<id>` URIs and `open.spotify.com/<kind>/<id>`
/// links.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRef {
    pub kind: ItemKind,
    pub id: String,
}

impl ItemRef {
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();

        if let Some(rest) = input.strip_prefix("spotify:") {
            let (kind, id) = rest.split_once(':')?;
            return Some(Self {
                kind: ItemKind::parse(kind)?,
                id: non_empty(id)?,
            });
        }

        if let Some(idx) = input.find("open.spotify.com/") {
            let path = &input[idx + "open.spotify.com/".len()..];
            let mut parts = path.split('/');
            let kind = ItemKind::parse(parts.next()?)?;
            let id = parts.next()?.split(['?', '#']).next()?;
            return Some(Self {
                kind,
                id: non_empty(id)?.to_string(),
            });
        }

        None
    }

    pub fn uri(&self) -> String {
        format!("spotify:{}:{}", self.kind.as_str(), self.id)
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ============================================================================
// Projections from provider JSON
// ============================================================================

fn str_field(v: &Value, key: &str) -> Option<String> {
    v.get(key).and_then(Value::as_str).map(str::to_string)
}

fn u64_field(v: &Value, key: &str) -> Option<u64> {
    v.get(key).and_then(Value::as_u64)
}

fn artist_names(v: &Value) -> Vec<String> {
    v.get("artists")
        .and_then(Value::as_array)
        .map(|artists| {
            artists
                .iter()
                .filter_map(|a| str_field(a, "name"))
                .collect()
        })
        .unwrap_or_default()
}

fn uri_or_derived(v: &Value, kind: ItemKind, id: &str) -> String {
    str_field(v, "uri").unwrap_or_else(|| format!("spotify:{}:{}", kind.as_str(), id))
}

/// Project a provider track object. Returns `None` when the required
/// identity fields are missing (search results may contain nulls).
pub fn project_track(v: &Value) -> Option<TrackRecord> {
    let id = str_field(v, "id")?;
    Some(TrackRecord {
        uri: uri_or_derived(v, ItemKind::Track, &id),
        name: str_field(v, "name")?,
        artists: artist_names(v),
        album: v.get("album").and_then(|a| str_field(a, "name")),
        duration_ms: u64_field(v, "duration_ms"),
        id,
    })
}

pub fn project_album(v: &Value) -> Option<AlbumRecord> {
    let id = str_field(v, "id")?;
    Some(AlbumRecord {
        uri: uri_or_derived(v, ItemKind::Album, &id),
        name: str_field(v, "name")?,
        artists: artist_names(v),
        release_date: str_field(v, "release_date"),
        total_tracks: u64_field(v, "total_tracks"),
        id,
    })
}

pub fn project_artist(v: &Value) -> Option<ArtistRecord> {
    let id = str_field(v, "id")?;
    Some(ArtistRecord {
        uri: uri_or_derived(v, ItemKind::Artist, &id),
        name: str_field(v, "name")?,
        genres: v
            .get("genres")
            .and_then(Value::as_array)
            .map(|g| g.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default(),
        followers: v.get("followers").and_then(|f| u64_field(f, "total")),
        id,
    })
}

pub fn project_playlist(v: &Value) -> Option<PlaylistRecord> {
    let id = str_field(v, "id")?;
    Some(PlaylistRecord {
        uri: uri_or_derived(v, ItemKind::Playlist, &id),
        name: str_field(v, "name")?,
        description: str_field(v, "description").filter(|d| !d.is_empty()),
        owner: v.get("owner").and_then(|o| {
            str_field(o, "display_name").or_else(|| str_field(o, "id"))
        }),
        track_count: v.get("tracks").and_then(|t| u64_field(t, "total")),
        id,
    })
}

/// Playlist track listings wrap each track in an `{"track": ...}` item.
pub fn project_playlist_item(v: &Value) -> Option<TrackRecord> {
    v.get("track").and_then(project_track)
}

pub fn project_playback_state(v: &Value) -> PlaybackState {
    PlaybackState {
        track: v.get("item").and_then(project_track),
        is_playing: v
            .get("is_playing")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        progress_ms: u64_field(v, "progress_ms"),
        device: v.get("device").and_then(|d| str_field(d, "name")),
    }
}

pub fn project_queue(v: &Value) -> QueueSnapshot {
    QueueSnapshot {
        currently_playing: v.get("currently_playing").and_then(project_track),
        queue: v
            .get("queue")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(project_track).collect())
            .unwrap_or_default(),
    }
}

/// Project one page of a paginated listing. The provider's `next` value is
/// the opaque cursor.
pub fn project_page<T>(v: &Value, project: impl Fn(&Value) -> Option<T>) -> Page<T> {
    Page {
        items: v
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(&project).collect())
            .unwrap_or_default(),
        cursor: str_field(v, "next"),
        total: u64_field(v, "total"),
    }
}

/// Project a combined search response body.
pub fn project_search(v: &Value) -> SearchResults {
    fn section<T>(v: &Value, key: &str, project: impl Fn(&Value) -> Option<T>) -> Vec<T> {
        v.get(key)
            .and_then(|s| s.get("items"))
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(&project).collect())
            .unwrap_or_default()
    }

    SearchResults {
        tracks: section(v, "tracks", project_track),
        albums: section(v, "albums", project_album),
        artists: section(v, "artists", project_artist),
        playlists: section(v, "playlists", project_playlist),
    }
}
