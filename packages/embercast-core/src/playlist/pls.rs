//! INI-structured PLS parsing.
//!
//! A PLS file is a `[playlist]` section with numbered `File{n}`, `Title{n}`
//! and `Length{n}` keys plus `Version` and `NumberOfEntries`. Keys are
//! matched case-insensitively, as the format is commonly written both ways.

use std::collections::HashMap;

use super::{PlaylistError, PlaylistItem, PlaylistResult};

const PLAYLIST_SECTION: &str = "playlist";

/// Parses PLS text into ordered playlist items.
///
/// Entry order follows ascending index `1..=NumberOfEntries`; indices whose
/// `File{n}` key is absent are skipped with a warning, not an error.
pub fn parse_pls_text(data: &str, url: &str) -> PlaylistResult<Vec<PlaylistItem>> {
    let sections = parse_ini(data, url)?;

    let Some(section) = sections.get(PLAYLIST_SECTION) else {
        return Err(PlaylistError::Invalid {
            url: url.to_string(),
        });
    };
    let version = section.get("version").and_then(|v| v.parse::<i64>().ok());
    if version != Some(2) {
        return Err(PlaylistError::Invalid {
            url: url.to_string(),
        });
    }

    let Some(num_entries) = section
        .get("numberofentries")
        .and_then(|v| v.parse::<i64>().ok())
    else {
        return Err(PlaylistError::InvalidEntryCount {
            url: url.to_string(),
        });
    };

    let mut playlist = Vec::new();
    for entry in 1..=num_entries {
        let Some(file) = section.get(&format!("file{entry}")) else {
            log::warn!("[Playlist] Missing File{} in pls from {}", entry, url);
            continue;
        };
        playlist.push(PlaylistItem {
            length: section.get(&format!("length{entry}")).cloned(),
            title: section.get(&format!("title{entry}")).cloned(),
            url: file.clone(),
        });
    }
    Ok(playlist)
}

/// Minimal INI scan: `[section]` headers, `key=value` pairs, `;`/`#`
/// comment lines. Keys are lowercased on insert so lookups are
/// case-insensitive; section names are kept as written.
fn parse_ini(data: &str, url: &str) -> PlaylistResult<HashMap<String, HashMap<String, String>>> {
    let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for raw in data.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix('[') {
            let Some(name) = rest.strip_suffix(']') else {
                return Err(PlaylistError::Parse {
                    url: url.to_string(),
                });
            };
            let name = name.trim().to_string();
            sections.entry(name.clone()).or_default();
            current = Some(name);
            continue;
        }
        let (Some((key, value)), Some(section)) = (line.split_once('='), &current) else {
            // A pair outside any section, or a line that is neither header
            // nor pair.
            return Err(PlaylistError::Parse {
                url: url.to_string(),
            });
        };
        sections
            .entry(section.clone())
            .or_default()
            .insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }
    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://radio.example/stations.pls";

    #[test]
    fn entries_come_back_in_index_order() {
        let data = "[playlist]\nVersion=2\nNumberOfEntries=2\n\
                    File1=http://x\nTitle1=Song\nFile2=http://y";
        let items = parse_pls_text(data, URL).unwrap();
        assert_eq!(
            items,
            vec![
                PlaylistItem {
                    length: None,
                    title: Some("Song".into()),
                    url: "http://x".into(),
                },
                PlaylistItem {
                    length: None,
                    title: None,
                    url: "http://y".into(),
                },
            ]
        );
    }

    #[test]
    fn length_and_title_are_optional_per_entry() {
        let data = "[playlist]\nVersion=2\nNumberOfEntries=1\n\
                    File1=http://x\nTitle1=Morning Show\nLength1=-1";
        let items = parse_pls_text(data, URL).unwrap();
        assert_eq!(items[0].length.as_deref(), Some("-1"));
        assert_eq!(items[0].title.as_deref(), Some("Morning Show"));
    }

    #[test]
    fn wrong_version_is_invalid_regardless_of_entries() {
        let data = "[playlist]\nVersion=1\nNumberOfEntries=1\nFile1=http://x";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_version_is_invalid() {
        let data = "[playlist]\nNumberOfEntries=1\nFile1=http://x";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_playlist_section_is_invalid() {
        let data = "[other]\nVersion=2";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::Invalid { .. })
        ));
    }

    #[test]
    fn missing_number_of_entries_is_rejected() {
        let data = "[playlist]\nVersion=2\nFile1=http://x";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::InvalidEntryCount { .. })
        ));
    }

    #[test]
    fn non_integer_number_of_entries_is_rejected() {
        let data = "[playlist]\nVersion=2\nNumberOfEntries=two";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::InvalidEntryCount { .. })
        ));
    }

    #[test]
    fn missing_file_entry_is_skipped_not_fatal() {
        let data = "[playlist]\nVersion=2\nNumberOfEntries=2\nFile1=http://x";
        let items = parse_pls_text(data, URL).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "http://x");
    }

    #[test]
    fn negative_entry_count_yields_no_items() {
        let data = "[playlist]\nVersion=2\nNumberOfEntries=-1\nFile1=http://x";
        assert_eq!(parse_pls_text(data, URL).unwrap(), vec![]);
    }

    #[test]
    fn keys_match_case_insensitively() {
        let data = "[playlist]\nversion=2\nnumberofentries=1\nFILE1=http://x\ntitle1=Low";
        let items = parse_pls_text(data, URL).unwrap();
        assert_eq!(items[0].url, "http://x");
        assert_eq!(items[0].title.as_deref(), Some("Low"));
    }

    #[test]
    fn comments_and_blank_lines_are_allowed() {
        let data = "; SHOUTcast export\n\n[playlist]\nVersion=2\nNumberOfEntries=1\nFile1=http://x";
        assert_eq!(parse_pls_text(data, URL).unwrap().len(), 1);
    }

    #[test]
    fn pair_before_any_section_fails_parse() {
        let data = "Version=2\n[playlist]\nNumberOfEntries=0";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::Parse { .. })
        ));
    }

    #[test]
    fn line_without_separator_fails_parse() {
        let data = "[playlist]\nVersion 2";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::Parse { .. })
        ));
    }

    #[test]
    fn unterminated_section_header_fails_parse() {
        let data = "[playlist\nVersion=2";
        assert!(matches!(
            parse_pls_text(data, URL),
            Err(PlaylistError::Parse { .. })
        ));
    }
}
