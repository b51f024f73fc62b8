//! The Spotify provider adapter.
//!
//! Maps each logical music operation to Web API calls. Every operation
//! follows the same pipeline: obtain a valid session, acquire a rate-limit
//! permit for the endpoint class, issue the call, recover locally where
//! policy allows (single forced refresh on 401, bounded backoff on
//! 429/5xx), then project the response into the normalized shapes.

use std::sync::Arc;

use reqwest::Method;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::domains::auth::CredentialStore;

use super::error::AdapterError;
use super::http::{HttpTransport, ProviderRequest, ProviderResponse};
use super::model::{
    self, ItemInfo, ItemKind, ItemRef, Page, PlaybackState, PlaylistRecord, QueueSnapshot,
    SearchResults, TrackRecord,
};
use super::rate_limit::{EndpointClass, RateLimiter};

/// Default page size for listings.
const DEFAULT_PAGE_LIMIT: usize = 50;
/// Ceiling on skip counts per call.
const MAX_SKIPS: u32 = 10;

/// Bridges logical music operations onto the Spotify Web API.
pub struct SpotifyAdapter {
    transport: Arc<dyn HttpTransport>,
    store: Arc<CredentialStore>,
    limiter: Arc<RateLimiter>,
    api_base: String,
    max_attempts: u32,
}

impl SpotifyAdapter {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<CredentialStore>,
        limiter: Arc<RateLimiter>,
        api_base: impl Into<String>,
        max_attempts: u32,
    ) -> Self {
        Self {
            transport,
            store,
            limiter,
            api_base: api_base.into(),
            max_attempts: max_attempts.max(1),
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Search the catalog for the requested item kinds.
    pub async fn search(
        &self,
        query: &str,
        kinds: &[ItemKind],
        limit: usize,
    ) -> Result<SearchResults, AdapterError> {
        let kinds = if kinds.is_empty() {
            vec![ItemKind::Track]
        } else {
            kinds.to_vec()
        };
        let type_param = kinds
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let limit = limit.clamp(1, 50).to_string();

        let url = self.url_with_query(
            "/search",
            &[("q", query), ("type", &type_param), ("limit", &limit)],
        )?;

        info!("Searching for {:?} matching '{}'", type_param, query);
        let response = self
            .call(EndpointClass::Search, Method::GET, url, None)
            .await?;
        Ok(model::project_search(&required_body(&response)?))
    }

    // ========================================================================
    // Playback
    // ========================================================================

    /// Current playback state; `None` when nothing is playing.
    pub async fn currently_playing(&self) -> Result<Option<PlaybackState>, AdapterError> {
        let url = self.url("/me/player/currently-playing");
        let response = self
            .call(EndpointClass::Playback, Method::GET, url, None)
            .await?;

        match &response.body {
            Some(body) => Ok(Some(model::project_playback_state(body))),
            // 204: no active playback
            None => Ok(None),
        }
    }

    /// Start playing a URI, or resume current playback when `uri` is
    /// `None`.
    pub async fn play(
        &self,
        device_id: Option<&str>,
        uri: Option<&str>,
    ) -> Result<(), AdapterError> {
        let body = match uri {
            None => None,
            Some(raw) => {
                let item = ItemRef::parse(raw).ok_or_else(|| {
                    AdapterError::InvalidArgument(format!("not a playable Spotify URI: {raw}"))
                })?;
                let body = match item.kind {
                    ItemKind::Track => json!({ "uris": [item.uri()] }),
                    _ => json!({ "context_uri": item.uri() }),
                };
                Some(body)
            }
        };

        let url = self.player_url("/me/player/play", device_id)?;
        info!("Starting playback (uri: {:?})", uri);
        self.call(EndpointClass::Playback, Method::PUT, url, body)
            .await?;
        Ok(())
    }

    /// Pause playback on the given device (or the active one).
    pub async fn pause(&self, device_id: Option<&str>) -> Result<(), AdapterError> {
        let url = self.player_url("/me/player/pause", device_id)?;
        info!("Pausing playback");
        self.call(EndpointClass::Playback, Method::PUT, url, None)
            .await?;
        Ok(())
    }

    /// Skip forward `count` tracks.
    pub async fn skip_next(&self, count: u32) -> Result<(), AdapterError> {
        let count = count.clamp(1, MAX_SKIPS);
        info!("Skipping {} track(s)", count);
        for _ in 0..count {
            let url = self.url("/me/player/next");
            self.call(EndpointClass::Playback, Method::POST, url, None)
                .await?;
        }
        Ok(())
    }

    // ========================================================================
    // Queue
    // ========================================================================

    /// Append a track to the playback queue.
    pub async fn queue_add(&self, track: &str) -> Result<(), AdapterError> {
        let uri = ensure_uri(track, ItemKind::Track)?;
        let url = self.url_with_query("/me/player/queue", &[("uri", uri.as_str())])?;
        info!("Queueing {}", uri);
        self.call(EndpointClass::Playback, Method::POST, url, None)
            .await?;
        Ok(())
    }

    /// The currently playing track plus the upcoming queue.
    pub async fn queue_list(&self) -> Result<QueueSnapshot, AdapterError> {
        let url = self.url("/me/player/queue");
        let response = self
            .call(EndpointClass::Playback, Method::GET, url, None)
            .await?;
        Ok(model::project_queue(&required_body(&response)?))
    }

    // ========================================================================
    // Library / playlists
    // ========================================================================

    /// List the user's playlists. `cursor` continues a previous page and
    /// is used exactly as the provider handed it out.
    pub async fn list_playlists(
        &self,
        cursor: Option<&str>,
    ) -> Result<Page<PlaylistRecord>, AdapterError> {
        let url = match cursor {
            Some(next) => next.to_string(),
            None => self.url_with_query(
                "/me/playlists",
                &[("limit", DEFAULT_PAGE_LIMIT.to_string().as_str())],
            )?,
        };
        let response = self
            .call(EndpointClass::Library, Method::GET, url, None)
            .await?;
        Ok(model::project_page(
            &required_body(&response)?,
            model::project_playlist,
        ))
    }

    /// List tracks of one playlist, paginated like `list_playlists`.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
        cursor: Option<&str>,
    ) -> Result<Page<TrackRecord>, AdapterError> {
        let url = match cursor {
            Some(next) => next.to_string(),
            None => self.url(&format!("/playlists/{playlist_id}/tracks")),
        };
        let response = self
            .call(EndpointClass::Library, Method::GET, url, None)
            .await?;
        Ok(model::project_page(
            &required_body(&response)?,
            model::project_playlist_item,
        ))
    }

    /// Add tracks to a playlist.
    pub async fn playlist_add_tracks(
        &self,
        playlist_id: &str,
        tracks: &[String],
    ) -> Result<(), AdapterError> {
        let uris = track_uris(tracks)?;
        let url = self.url(&format!("/playlists/{playlist_id}/tracks"));
        info!("Adding {} track(s) to playlist {}", uris.len(), playlist_id);
        self.call(
            EndpointClass::Library,
            Method::POST,
            url,
            Some(json!({ "uris": uris })),
        )
        .await?;
        Ok(())
    }

    /// Remove tracks from a playlist.
    pub async fn playlist_remove_tracks(
        &self,
        playlist_id: &str,
        tracks: &[String],
    ) -> Result<(), AdapterError> {
        let uris = track_uris(tracks)?;
        let body = json!({
            "tracks": uris.iter().map(|uri| json!({ "uri": uri })).collect::<Vec<_>>()
        });
        let url = self.url(&format!("/playlists/{playlist_id}/tracks"));
        info!(
            "Removing {} track(s) from playlist {}",
            uris.len(),
            playlist_id
        );
        self.call(EndpointClass::Library, Method::DELETE, url, Some(body))
            .await?;
        Ok(())
    }

    /// Rename a playlist and/or replace its description.
    pub async fn playlist_change_details(
        &self,
        playlist_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), AdapterError> {
        if name.is_none() && description.is_none() {
            return Err(AdapterError::InvalidArgument(
                "at least one of name or description is required".to_string(),
            ));
        }

        let mut body = serde_json::Map::new();
        if let Some(name) = name {
            body.insert("name".to_string(), Value::String(name.to_string()));
        }
        if let Some(description) = description {
            body.insert(
                "description".to_string(),
                Value::String(description.to_string()),
            );
        }

        let url = self.url(&format!("/playlists/{playlist_id}"));
        info!("Changing details of playlist {}", playlist_id);
        self.call(
            EndpointClass::Library,
            Method::PUT,
            url,
            Some(Value::Object(body)),
        )
        .await?;
        Ok(())
    }

    /// Detailed lookup of a track, album, artist or playlist by URI.
    pub async fn item_info(&self, item_uri: &str) -> Result<ItemInfo, AdapterError> {
        let item = ItemRef::parse(item_uri).ok_or_else(|| {
            AdapterError::InvalidArgument(format!("not a Spotify item URI: {item_uri}"))
        })?;
        debug!("Looking up {:?} {}", item.kind, item.id);

        match item.kind {
            ItemKind::Track => {
                let body = self.get_library(&format!("/tracks/{}", item.id)).await?;
                let track = model::project_track(&body)
                    .ok_or_else(|| AdapterError::internal("track body missing identity"))?;
                Ok(ItemInfo::Track { track })
            }
            ItemKind::Album => {
                let body = self.get_library(&format!("/albums/{}", item.id)).await?;
                let album = model::project_album(&body)
                    .ok_or_else(|| AdapterError::internal("album body missing identity"))?;
                let tracks = body
                    .get("tracks")
                    .map(|t| model::project_page(t, model::project_track).items)
                    .unwrap_or_default();
                Ok(ItemInfo::Album { album, tracks })
            }
            ItemKind::Artist => {
                let body = self.get_library(&format!("/artists/{}", item.id)).await?;
                let artist = model::project_artist(&body)
                    .ok_or_else(|| AdapterError::internal("artist body missing identity"))?;

                let top = self
                    .get_library(&format!("/artists/{}/top-tracks", item.id))
                    .await?;
                let top_tracks = top
                    .get("tracks")
                    .and_then(Value::as_array)
                    .map(|tracks| tracks.iter().filter_map(model::project_track).collect())
                    .unwrap_or_default();

                let albums_body = self
                    .get_library(&format!("/artists/{}/albums", item.id))
                    .await?;
                let albums = model::project_page(&albums_body, model::project_album).items;

                Ok(ItemInfo::Artist {
                    artist,
                    top_tracks,
                    albums,
                })
            }
            ItemKind::Playlist => {
                let body = self.get_library(&format!("/playlists/{}", item.id)).await?;
                let playlist = model::project_playlist(&body)
                    .ok_or_else(|| AdapterError::internal("playlist body missing identity"))?;
                let tracks = body
                    .get("tracks")
                    .map(|t| model::project_page(t, model::project_playlist_item).items)
                    .unwrap_or_default();
                Ok(ItemInfo::Playlist { playlist, tracks })
            }
        }
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    /// Issue one logical provider call with the standard recovery policy:
    /// transparent session refresh, a single forced refresh on 401, and
    /// bounded backoff retries on 429/5xx/transport failure.
    async fn call(
        &self,
        class: EndpointClass,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<ProviderResponse, AdapterError> {
        let mut session = self.store.get_valid_session().await?;
        let mut refreshed = false;
        let mut attempt: u32 = 0;

        loop {
            self.limiter.acquire(class).await;

            let mut request =
                ProviderRequest::new(method.clone(), &url, &session.access_token, class);
            if let Some(body) = &body {
                request = request.with_body(body.clone());
            }

            let response = match self.transport.execute(request).await {
                Ok(response) => response,
                Err(e) if e.is_retryable() && attempt + 1 < self.max_attempts => {
                    warn!("Transport failure, retrying: {}", e);
                    let delay = self.limiter.backoff_delay(attempt, None);
                    attempt += 1;
                    tokio::time::sleep(delay).await;
                    continue;
                }
                Err(e) => return Err(e),
            };

            self.limiter.record(class, response.status, &response.meta);

            match response.status {
                s if (200..300).contains(&s) => return Ok(response),

                // One forced refresh per logical call; a second 401 means
                // the refreshed token is also rejected.
                401 if !refreshed => {
                    refreshed = true;
                    debug!("Provider rejected the bearer, forcing one refresh");
                    session = self.store.force_refresh(&session.access_token).await?;
                }
                401 => {
                    return Err(AdapterError::Unauthenticated(
                        "provider rejected the refreshed access token".to_string(),
                    ));
                }

                429 | 500..=599 if attempt + 1 < self.max_attempts => {
                    let delay = self
                        .limiter
                        .backoff_delay(attempt, response.meta.retry_after);
                    warn!(
                        "Provider returned {}, retrying in {:?} (attempt {}/{})",
                        response.status,
                        delay,
                        attempt + 1,
                        self.max_attempts
                    );
                    attempt += 1;
                    tokio::time::sleep(delay).await;
                }
                429 => return Err(AdapterError::RateLimited),
                s if s >= 500 => {
                    return Err(AdapterError::unavailable(format!("provider returned {s}")));
                }

                s => return Err(client_error(s, response.body.as_ref())),
            }
        }
    }

    async fn get_library(&self, path: &str) -> Result<Value, AdapterError> {
        let url = self.url(path);
        let response = self
            .call(EndpointClass::Library, Method::GET, url, None)
            .await?;
        required_body(&response)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    fn url_with_query(&self, path: &str, params: &[(&str, &str)]) -> Result<String, AdapterError> {
        let query =
            serde_urlencoded::to_string(params).map_err(|e| AdapterError::internal(e.to_string()))?;
        Ok(format!("{}{}?{}", self.api_base, path, query))
    }

    fn player_url(&self, path: &str, device_id: Option<&str>) -> Result<String, AdapterError> {
        match device_id {
            Some(device_id) => self.url_with_query(path, &[("device_id", device_id)]),
            None => Ok(self.url(path)),
        }
    }
}

/// Map a non-retryable 4xx into the closed taxonomy. Only the provider's
/// short error message is carried over, never the raw body.
fn client_error(status: u16, body: Option<&Value>) -> AdapterError {
    let message = body
        .and_then(|b| b.get("error"))
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .unwrap_or("provider rejected the request")
        .to_string();

    match status {
        403 => AdapterError::Forbidden(message),
        404 => AdapterError::NotFound(message),
        _ => AdapterError::InvalidArgument(message),
    }
}

fn required_body(response: &ProviderResponse) -> Result<Value, AdapterError> {
    response
        .body
        .clone()
        .ok_or_else(|| AdapterError::internal("provider response had no body"))
}

/// Accept a bare id or a full URI/link and normalize to a URI.
fn ensure_uri(input: &str, kind: ItemKind) -> Result<String, AdapterError> {
    if let Some(item) = ItemRef::parse(input) {
        if item.kind != kind {
            return Err(AdapterError::InvalidArgument(format!(
                "expected a {} reference, got a {}",
                kind.as_str(),
                item.kind.as_str()
            )));
        }
        return Ok(item.uri());
    }
    if input.is_empty() || input.contains([':', '/', ' ']) {
        return Err(AdapterError::InvalidArgument(format!(
            "not a {} id or URI: {input}",
            kind.as_str()
        )));
    }
    Ok(format!("spotify:{}:{}", kind.as_str(), input))
}

fn track_uris(tracks: &[String]) -> Result<Vec<String>, AdapterError> {
    if tracks.is_empty() {
        return Err(AdapterError::InvalidArgument(
            "track list is empty".to_string(),
        ));
    }
    tracks
        .iter()
        .map(|t| ensure_uri(t, ItemKind::Track))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::testing::{ScriptedExchanger, fresh_session};
    use crate::domains::provider::testing::RecordingTransport;
    use serde_json::json;
    use std::time::Duration;
    use tokio::time::Instant;

    struct Fixture {
        transport: Arc<RecordingTransport>,
        adapter: SpotifyAdapter,
        exchanges: crate::domains::auth::testing::ExchangeCounter,
    }

    fn fixture() -> Fixture {
        let exchanger = ScriptedExchanger::succeeding("at-refreshed");
        let exchanges = exchanger.counter();
        let store = Arc::new(CredentialStore::in_memory(
            Box::new(exchanger),
            Some(fresh_session("at-1")),
        ));
        let transport = Arc::new(RecordingTransport::new());
        let adapter = SpotifyAdapter::new(
            transport.clone(),
            store,
            Arc::new(RateLimiter::new()),
            "https://api.spotify.test/v1",
            3,
        );
        Fixture {
            transport,
            adapter,
            exchanges,
        }
    }

    #[tokio::test]
    async fn test_search_projects_results() {
        let f = fixture();
        f.transport.respond_json(
            200,
            json!({
                "tracks": {"items": [
                    {"id": "t1", "name": "Karma Police", "artists": [{"name": "Radiohead"}]}
                ]}
            }),
        );

        let results = f
            .adapter
            .search("karma police", &[ItemKind::Track], 10)
            .await
            .unwrap();
        assert_eq!(results.tracks.len(), 1);
        assert_eq!(results.tracks[0].artists, vec!["Radiohead"]);

        let requests = f.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].bearer, "at-1");
        assert!(requests[0].url.contains("type=track"));
        assert!(requests[0].url.contains("q=karma+police"));
    }

    #[tokio::test]
    async fn test_play_with_track_uri_sends_uris_body() {
        let f = fixture();
        f.transport.respond(204);

        f.adapter
            .play(Some("device-1"), Some("spotify:track:t1"))
            .await
            .unwrap();

        let requests = f.transport.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert!(requests[0].url.contains("device_id=device-1"));
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &json!({"uris": ["spotify:track:t1"]})
        );
    }

    #[tokio::test]
    async fn test_play_with_album_uri_sends_context() {
        let f = fixture();
        f.transport.respond(204);

        f.adapter
            .play(None, Some("spotify:album:al1"))
            .await
            .unwrap();

        let requests = f.transport.requests();
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &json!({"context_uri": "spotify:album:al1"})
        );
    }

    #[tokio::test]
    async fn test_play_resume_sends_no_body() {
        let f = fixture();
        f.transport.respond(204);
        f.adapter.play(None, None).await.unwrap();
        assert!(f.transport.requests()[0].body.is_none());
    }

    #[tokio::test]
    async fn test_play_rejects_garbage_uri_without_http() {
        let f = fixture();
        let err = f.adapter.play(None, Some("not a uri")).await.unwrap_err();
        assert!(matches!(err, AdapterError::InvalidArgument(_)));
        assert_eq!(f.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_device_maps_to_not_found() {
        let f = fixture();
        f.transport.respond_json(
            404,
            json!({"error": {"status": 404, "message": "Device not found"}}),
        );

        let err = f
            .adapter
            .play(Some("no-such-device"), None)
            .await
            .unwrap_err();
        match err {
            AdapterError::NotFound(msg) => assert_eq!(msg, "Device not found"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_retries_then_surfaces_rate_limited() {
        let f = fixture();
        f.transport
            .respond_throttled(2)
            .respond_throttled(2)
            .respond_throttled(2);

        let start = Instant::now();
        let err = f.adapter.pause(None).await.unwrap_err();

        assert!(matches!(err, AdapterError::RateLimited));
        // 3 attempts total, honoring Retry-After between them.
        assert_eq!(f.transport.call_count(), 3);
        assert!(start.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttled_then_success() {
        let f = fixture();
        f.transport.respond_throttled(1).respond(204);

        f.adapter.pause(None).await.unwrap();
        assert_eq!(f.transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_single_401_refreshes_once_and_retries() {
        let f = fixture();
        f.transport.respond(401).respond(204);

        f.adapter.pause(None).await.unwrap();

        let requests = f.transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].bearer, "at-1");
        assert_eq!(requests[1].bearer, "at-refreshed");
        assert_eq!(f.exchanges.count(), 1);
    }

    #[tokio::test]
    async fn test_second_401_is_terminal() {
        let f = fixture();
        f.transport.respond(401).respond(401);

        let err = f.adapter.pause(None).await.unwrap_err();
        assert!(matches!(err, AdapterError::Unauthenticated(_)));
        // Exactly one refresh, no loop.
        assert_eq!(f.exchanges.count(), 1);
        assert_eq!(f.transport.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_failures_retried_up_to_ceiling() {
        let f = fixture();
        f.transport
            .respond_unavailable()
            .respond_unavailable()
            .respond_unavailable();

        let err = f.adapter.queue_list().await.unwrap_err();
        assert!(matches!(err, AdapterError::ProviderUnavailable(_)));
        assert_eq!(f.transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_other_4xx_not_retried() {
        let f = fixture();
        f.transport.respond_json(
            400,
            json!({"error": {"status": 400, "message": "Invalid limit"}}),
        );

        let err = f
            .adapter
            .search("x", &[ItemKind::Track], 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidArgument(_)));
        assert_eq!(f.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_currently_playing_none_on_empty_body() {
        let f = fixture();
        f.transport.respond(204);
        assert!(f.adapter.currently_playing().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_currently_playing_projects_state() {
        let f = fixture();
        f.transport.respond_json(
            200,
            json!({
                "is_playing": true,
                "progress_ms": 1000,
                "item": {"id": "t1", "name": "Now Playing"}
            }),
        );
        let state = f.adapter.currently_playing().await.unwrap().unwrap();
        assert!(state.is_playing);
        assert_eq!(state.track.unwrap().name, "Now Playing");
    }

    #[tokio::test]
    async fn test_list_playlists_cursor_used_verbatim() {
        let f = fixture();
        f.transport
            .respond_json(200, json!({"items": [], "next": null}));

        let cursor = "https://api.spotify.test/v1/me/playlists?offset=50&limit=50";
        f.adapter.list_playlists(Some(cursor)).await.unwrap();

        assert_eq!(f.transport.requests()[0].url, cursor);
    }

    #[tokio::test]
    async fn test_queue_add_accepts_bare_id() {
        let f = fixture();
        f.transport.respond(204);
        f.adapter.queue_add("t123").await.unwrap();
        assert!(
            f.transport.requests()[0]
                .url
                .contains("uri=spotify%3Atrack%3At123")
        );
    }

    #[tokio::test]
    async fn test_skip_next_issues_n_calls() {
        let f = fixture();
        f.transport.respond(204).respond(204).respond(204);
        f.adapter.skip_next(3).await.unwrap();
        assert_eq!(f.transport.call_count(), 3);
    }

    #[tokio::test]
    async fn test_change_details_requires_a_field() {
        let f = fixture();
        let err = f
            .adapter
            .playlist_change_details("p1", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::InvalidArgument(_)));
        assert_eq!(f.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_tracks_body_shape() {
        let f = fixture();
        f.transport.respond(200);
        f.adapter
            .playlist_remove_tracks("p1", &["t1".to_string(), "spotify:track:t2".to_string()])
            .await
            .unwrap();

        let requests = f.transport.requests();
        assert_eq!(requests[0].method, Method::DELETE);
        assert_eq!(
            requests[0].body.as_ref().unwrap(),
            &json!({"tracks": [
                {"uri": "spotify:track:t1"},
                {"uri": "spotify:track:t2"}
            ]})
        );
    }

    #[tokio::test]
    async fn test_item_info_album_includes_tracks() {
        let f = fixture();
        f.transport.respond_json(
            200,
            json!({
                "id": "al1",
                "name": "OK Computer",
                "artists": [{"name": "Radiohead"}],
                "release_date": "1997-06-16",
                "total_tracks": 12,
                "tracks": {"items": [{"id": "t1", "name": "Airbag"}]}
            }),
        );

        let info = f.adapter.item_info("spotify:album:al1").await.unwrap();
        match info {
            ItemInfo::Album { album, tracks } => {
                assert_eq!(album.name, "OK Computer");
                assert_eq!(tracks.len(), 1);
            }
            other => panic!("expected album info, got {other:?}"),
        }
    }

    #[test]
    fn test_ensure_uri_rejects_kind_mismatch() {
        let err = ensure_uri("spotify:album:al1", ItemKind::Track).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidArgument(_)));
    }
}
