use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use super::{http_client, LyricsSource, SourceKind};
use crate::config::Config;
use crate::core::lyrics::{select_by_artist, Lyrics, LyricsLookup, SongQuery};
use crate::error::{NetworkError, Result};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    pub duration: Option<f64>,
    pub plain_lyrics: Option<String>,
    pub synced_lyrics: Option<String>,
    #[serde(default)]
    pub instrumental: bool,
}

impl SearchResult {
    pub fn artist(&self) -> Option<&str> {
        self.artist_name.as_deref()
    }

    /// Plain lyrics when present, otherwise the synced (LRC) text. The LRC
    /// timestamps are bracketed and disappear during normalization.
    pub fn lyric_text(&self) -> Option<&str> {
        self.plain_lyrics
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.synced_lyrics.as_deref().filter(|t| !t.trim().is_empty()))
    }
}

/// LRCLIB search API; one call returns the lyric text directly.
pub struct LrclibSource {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibSource {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            base_url: config.lrclib_instance.trim_end_matches('/').to_string(),
        })
    }

    pub async fn search(&self, title: &str, artist: &str) -> Result<Vec<SearchResult>> {
        let url = format!("{}/api/search", self.base_url);

        let mut params = vec![("track_name", title)];
        if !artist.is_empty() {
            params.push(("artist_name", artist));
        }

        info!("Searching LRCLIB API with params: {:?}", params);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(NetworkError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::from_status(status, &url).into());
        }

        let results: Vec<SearchResult> = response.json().await.map_err(NetworkError::from)?;
        debug!("LRCLIB returned {} result(s)", results.len());
        Ok(results)
    }

    fn track_url(&self, id: Option<i64>) -> Option<Url> {
        id.and_then(|id| Url::parse(&format!("{}/api/get/{}", self.base_url, id)).ok())
    }
}

#[async_trait]
impl LyricsSource for LrclibSource {
    async fn fetch(&self, query: &SongQuery) -> Result<LyricsLookup> {
        let results = self
            .search(&query.title, query.artist.as_deref().unwrap_or(""))
            .await?;

        let best = match select_by_artist(&results, query.artist.as_deref(), SearchResult::artist) {
            Some(best) => best,
            None => {
                info!("No lyrics found for: {}", query.title);
                return Ok(LyricsLookup::NotFound);
            }
        };

        if best.instrumental {
            info!("Track is marked as instrumental: {}", query.title);
            return Ok(LyricsLookup::NotFound);
        }

        let text = match best.lyric_text() {
            Some(text) => text.to_string(),
            None => {
                info!("Match has no lyric text: {}", query.title);
                return Ok(LyricsLookup::NotFound);
            }
        };

        Ok(LyricsLookup::Found(Lyrics {
            text,
            title: best.name.clone().unwrap_or_else(|| query.title.clone()),
            artist: best.artist_name.clone(),
            source_url: self.track_url(best.id),
            provider: SourceKind::Lrclib,
        }))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Lrclib
    }
}
