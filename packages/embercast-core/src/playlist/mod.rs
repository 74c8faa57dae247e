//! Internet-radio playlist fetching and parsing (M3U, PLS).
//!
//! Station URLs usually point at a playlist rather than at the stream
//! itself. The entry points here download the playlist (bounded and timed,
//! see [`fetch`]) and parse it into ordered [`PlaylistItem`]s. The text
//! parsers are exposed separately so callers holding playlist data can skip
//! the fetch.
//!
//! # Module Structure
//!
//! - `fetch` - Bounded, timed playlist download
//! - `m3u` - Line-oriented M3U parsing
//! - `pls` - INI-structured PLS parsing

mod fetch;
mod m3u;
mod pls;

pub use fetch::{FETCH_TIMEOUT, MAX_PLAYLIST_BYTES};
pub use m3u::parse_m3u_text;
pub use pls::parse_pls_text;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

/// A single playable playlist entry.
///
/// Items keep file order; duplicate URLs are permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistItem {
    /// Duration string from playlist metadata, when present.
    pub length: Option<String>,
    /// Title from playlist metadata, when present.
    pub title: Option<String>,
    /// Media URL.
    pub url: String,
}

/// Errors from fetching or parsing a playlist.
///
/// Every variant names the offending URL. A format error is terminal for
/// the parse call; no partial item list is returned alongside it.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Download failed. Timeouts and other network failures share this
    /// kind; the reason text tells them apart.
    #[error("error while fetching playlist {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Playlist had no lines at all.
    #[error("empty playlist {url}")]
    Empty { url: String },

    /// PLS data was not valid INI syntax.
    #[error("can't parse playlist {url}")]
    Parse { url: String },

    /// PLS data lacked a `[playlist]` section with `Version=2`.
    #[error("invalid playlist {url}")]
    Invalid { url: String },

    /// PLS `NumberOfEntries` was missing or not an integer.
    #[error("invalid NumberOfEntries in playlist {url}")]
    InvalidEntryCount { url: String },
}

/// Convenient Result alias for playlist operations.
pub type PlaylistResult<T> = Result<T, PlaylistError>;

/// Fetches and parses an M3U playlist.
///
/// Suspends only for the download; parsing is synchronous. Once the fetch
/// succeeds and the data has any lines, parsing cannot fail - entries with
/// broken metadata come back with `length`/`title` unset.
pub async fn parse_m3u(client: &Client, url: &str) -> PlaylistResult<Vec<PlaylistItem>> {
    let data = fetch::fetch_playlist(client, url).await?;
    m3u::parse_m3u_text(&data, url)
}

/// Fetches and parses a PLS playlist.
///
/// Requires a `[playlist]` section with `Version=2` and an integer
/// `NumberOfEntries`. Entries whose `File{n}` key is missing are skipped
/// with a warning rather than failing the parse.
pub async fn parse_pls(client: &Client, url: &str) -> PlaylistResult<Vec<PlaylistItem>> {
    let data = fetch::fetch_playlist(client, url).await?;
    pls::parse_pls_text(&data, url)
}
