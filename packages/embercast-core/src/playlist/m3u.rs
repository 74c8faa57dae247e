//! Line-oriented M3U parsing.
//!
//! `#EXTINF:` lines carry metadata for the next URL line; any other `#`
//! line is an extension we ignore. Broken metadata is dropped, never fatal.

use super::{PlaylistError, PlaylistItem, PlaylistResult};

const EXTINF_MARKER: &str = "#EXTINF:";

/// Parses M3U text into ordered playlist items.
///
/// Fails only on input with no lines at all. Metadata applies to the first
/// URL line after it and is consumed exactly once.
pub fn parse_m3u_text(data: &str, url: &str) -> PlaylistResult<Vec<PlaylistItem>> {
    if data.lines().next().is_none() {
        return Err(PlaylistError::Empty {
            url: url.to_string(),
        });
    }

    let mut playlist = Vec::new();
    let mut length: Option<String> = None;
    let mut title: Option<String> = None;

    for line in data.lines() {
        let line = line.trim();
        if let Some(extinf) = line.strip_prefix(EXTINF_MARKER) {
            // "<length>[ extra],<title>"
            let Some((meta, entry_title)) = extinf.split_once(',') else {
                log::debug!("[Playlist] Ignoring invalid extinf {:?} in playlist {}", line, url);
                continue;
            };
            // Keep the duration; anything after the first space is an extra
            // token we do not interpret.
            let duration = meta.split_once(' ').map_or(meta, |(d, _)| d);
            length = Some(duration.to_string());
            title = Some(entry_title.trim().to_string());
        } else if line.starts_with('#') {
            // Comment or other extension.
        } else if !line.is_empty() {
            playlist.push(PlaylistItem {
                length: length.take(),
                title: title.take(),
                url: line.to_string(),
            });
        }
    }

    Ok(playlist)
}
