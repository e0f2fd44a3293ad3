use serde::Serialize;
use url::Url;

use crate::core::services::SourceKind;
use crate::error::{LyricsError, Result};

/// One user submission: a song title plus an optional artist filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub title: String,
    pub artist: Option<String>,
}

impl SongQuery {
    pub fn new(title: &str, artist: Option<&str>) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(LyricsError::EmptyTitle.into());
        }

        let artist = artist
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);

        Ok(Self {
            title: title.to_string(),
            artist,
        })
    }

    /// Free-text search string: title followed by the artist, if any.
    pub fn search_text(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} {}", self.title, artist),
            None => self.title.clone(),
        }
    }
}

/// Raw lyrics as returned by a source, before normalization.
#[derive(Debug, Clone, Serialize)]
pub struct Lyrics {
    pub text: String,
    pub title: String,
    pub artist: Option<String>,
    pub source_url: Option<Url>,
    pub provider: SourceKind,
}

/// Outcome of a lookup that did not fail.
#[derive(Debug, Clone)]
pub enum LyricsLookup {
    Found(Lyrics),
    NotFound,
}

impl LyricsLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, LyricsLookup::Found(_))
    }
}

/// Pick the first hit whose credited artist contains `artist`
/// (case-insensitive), falling back to the first hit overall.
pub fn select_by_artist<'a, T, F>(hits: &'a [T], artist: Option<&str>, artist_of: F) -> Option<&'a T>
where
    F: Fn(&T) -> Option<&str>,
{
    let target = artist.map(str::to_lowercase).filter(|a| !a.is_empty());

    if let Some(target) = target {
        let matched = hits.iter().find(|hit| {
            artist_of(hit)
                .map(|name| name.to_lowercase().contains(&target))
                .unwrap_or(false)
        });
        if matched.is_some() {
            return matched;
        }
    }

    hits.first()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Hit {
        artist: Option<&'static str>,
        id: u32,
    }

    fn artist_of(hit: &Hit) -> Option<&str> {
        hit.artist
    }

    #[test]
    fn test_selects_matching_artist() {
        let hits = vec![
            Hit { artist: Some("Other"), id: 1 },
            Hit { artist: Some("Taylor Swift"), id: 2 },
        ];
        let chosen = select_by_artist(&hits, Some("Taylor Swift"), artist_of).unwrap();
        assert_eq!(chosen.id, 2);
    }

    #[test]
    fn test_match_is_case_insensitive_substring() {
        let hits = vec![
            Hit { artist: Some("Other"), id: 1 },
            Hit { artist: Some("TAYLOR SWIFT (Ft. Bon Iver)"), id: 2 },
            Hit { artist: Some("Taylor Swift"), id: 3 },
        ];
        let chosen = select_by_artist(&hits, Some("taylor swift"), artist_of).unwrap();
        assert_eq!(chosen.id, 2);
    }

    #[test]
    fn test_falls_back_to_first_hit() {
        let hits = vec![
            Hit { artist: Some("Other"), id: 1 },
            Hit { artist: None, id: 2 },
        ];
        let chosen = select_by_artist(&hits, Some("Taylor Swift"), artist_of).unwrap();
        assert_eq!(chosen.id, 1);
    }

    #[test]
    fn test_no_filter_and_empty_list() {
        let hits = vec![Hit { artist: Some("Other"), id: 7 }];
        assert_eq!(select_by_artist(&hits, None, artist_of).unwrap().id, 7);

        let empty: Vec<Hit> = Vec::new();
        assert!(select_by_artist(&empty, Some("Taylor Swift"), artist_of).is_none());
    }

    #[test]
    fn test_song_query_trims_and_rejects_empty() {
        let query = SongQuery::new("  Love Story ", Some(" Taylor Swift ")).unwrap();
        assert_eq!(query.title, "Love Story");
        assert_eq!(query.artist.as_deref(), Some("Taylor Swift"));
        assert_eq!(query.search_text(), "Love Story Taylor Swift");

        let no_artist = SongQuery::new("Shake It Off", Some("   ")).unwrap();
        assert!(no_artist.artist.is_none());
        assert_eq!(no_artist.search_text(), "Shake It Off");

        assert!(SongQuery::new("   ", None).is_err());
    }
}
