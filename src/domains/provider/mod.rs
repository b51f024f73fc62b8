//! Provider domain: the bridge onto the Spotify Web API.
//!
//! `SpotifyAdapter` maps logical music operations to provider HTTP calls,
//! consulting the credential store and the rate limiter on every call and
//! projecting responses into provider-agnostic shapes. Actual HTTP goes
//! through the `HttpTransport` seam.

mod adapter;
mod error;
mod http;
mod model;
mod rate_limit;

#[cfg(test)]
pub mod testing;

pub use adapter::SpotifyAdapter;
pub use error::AdapterError;
pub use http::{HttpTransport, ProviderRequest, ProviderResponse, ReqwestTransport, ResponseMeta};
pub use model::{
    AlbumRecord, ArtistRecord, ItemInfo, ItemKind, ItemRef, Page, PlaybackState, PlaylistRecord,
    QueueSnapshot, SearchResults, TrackRecord,
};
pub use rate_limit::{EndpointClass, RateLimiter};
