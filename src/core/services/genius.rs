use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::scrape::extract_lyrics;
use super::{http_client, LyricsSource, SourceKind};
use crate::config::Config;
use crate::core::lyrics::{select_by_artist, Lyrics, LyricsLookup, SongQuery};
use crate::error::{LyricsError, NetworkError, Result};

#[derive(Deserialize, Debug)]
struct SearchResponse {
    response: SearchBody,
}

#[derive(Deserialize, Debug)]
struct SearchBody {
    #[serde(default)]
    hits: Vec<SearchHit>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SearchHit {
    #[serde(rename = "type")]
    pub kind: String,
    pub result: SongResult,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SongResult {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub full_title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub primary_artist: Option<ArtistRef>,
}

impl SongResult {
    pub fn artist_name(&self) -> Option<&str> {
        self.primary_artist.as_ref().map(|a| a.name.as_str())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ArtistRef {
    pub name: String,
}

/// Genius search API + song page scrape.
pub struct GeniusSource {
    client: reqwest::Client,
    api_base: String,
    token: String,
    excluded_terms: Vec<String>,
}

impl GeniusSource {
    pub fn new(config: &Config, token: String) -> Result<Self> {
        Ok(Self {
            client: http_client(config)?,
            api_base: config.genius_api_url.trim_end_matches('/').to_string(),
            token,
            excluded_terms: config.excluded_terms.clone(),
        })
    }

    /// Run a search and return the raw hits in API order.
    pub async fn search(&self, query: &SongQuery) -> Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.api_base);
        let q = query.search_text();
        info!("Searching Genius for: {}", q);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .query(&[("q", q.as_str())])
            .send()
            .await
            .map_err(NetworkError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::from_status(status, &url).into());
        }

        let body: SearchResponse = response.json().await.map_err(NetworkError::from)?;
        debug!("Genius returned {} hit(s)", body.response.hits.len());
        Ok(body.response.hits)
    }

    async fn fetch_page(&self, page_url: &str) -> Result<String> {
        debug!("Fetching lyrics page: {}", page_url);
        let response = self
            .client
            .get(page_url)
            .send()
            .await
            .map_err(NetworkError::from)?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::from_status(status, page_url).into());
        }

        Ok(response.text().await.map_err(NetworkError::from)?)
    }
}

/// Keep song hits whose titles contain none of the excluded terms.
pub fn candidate_songs(hits: &[SearchHit], excluded_terms: &[String]) -> Vec<SongResult> {
    let excluded: Vec<String> = excluded_terms.iter().map(|t| t.to_lowercase()).collect();

    hits.iter()
        .filter(|hit| hit.kind == "song")
        .filter(|hit| {
            let title = hit.result.title.to_lowercase();
            !excluded.iter().any(|term| title.contains(term.as_str()))
        })
        .map(|hit| hit.result.clone())
        .collect()
}

#[async_trait]
impl LyricsSource for GeniusSource {
    async fn fetch(&self, query: &SongQuery) -> Result<LyricsLookup> {
        let hits = self.search(query).await?;
        let candidates = candidate_songs(&hits, &self.excluded_terms);

        let song = match select_by_artist(&candidates, query.artist.as_deref(), SongResult::artist_name) {
            Some(song) => song,
            None => {
                info!("No matching song on Genius for: {}", query.title);
                return Ok(LyricsLookup::NotFound);
            }
        };

        info!(
            "Selected: {}",
            song.full_title.as_deref().unwrap_or(song.title.as_str())
        );

        let page_url = Url::parse(&song.url).map_err(|e| LyricsError::Scrape {
            reason: format!("invalid song page URL '{}': {}", song.url, e),
        })?;
        let html = self.fetch_page(page_url.as_str()).await?;
        let text = match extract_lyrics(&html) {
            Some(text) => text,
            None => {
                info!("No lyrics markup found on {}", song.url);
                return Ok(LyricsLookup::NotFound);
            }
        };

        Ok(LyricsLookup::Found(Lyrics {
            text,
            title: song.title.clone(),
            artist: song.artist_name().map(str::to_string),
            source_url: Some(page_url),
            provider: SourceKind::Genius,
        }))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Genius
    }
}
