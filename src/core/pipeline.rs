use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

use crate::core::lyrics::{LyricsLookup, SongQuery};
use crate::core::normalize::{clean_lyrics, line_count};
use crate::core::services::{LyricsSource, SourceKind};
use crate::core::wordcloud::{CloudRenderer, RenderedCloud};
use crate::error::Result;

/// What a submission produced, for display.
#[derive(Debug, Clone, Serialize)]
pub struct LyricsReport {
    pub query: String,
    pub title: String,
    pub artist: Option<String>,
    pub provider: SourceKind,
    pub source_url: Option<Url>,
    pub lyrics: String,
    pub line_count: usize,
    pub cloud: Option<RenderedCloud>,
    /// Why the word cloud could not be rendered; the lyrics are still reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Lyrics cleaned; `cloud` or `cloud_error` says how rendering went
    Rendered(LyricsReport),
    /// Lyrics were found but nothing was left after cleaning
    EmptyLyrics(LyricsReport),
    /// The source has no lyrics for this song
    NotFound { query: String },
}

/// fetch → clean → render, one submission at a time.
pub struct Pipeline {
    source: Box<dyn LyricsSource>,
    renderer: Option<CloudRenderer>,
    output_dir: PathBuf,
}

impl Pipeline {
    /// `renderer: None` skips the word cloud entirely.
    pub fn new(source: Box<dyn LyricsSource>, renderer: Option<CloudRenderer>, output_dir: PathBuf) -> Self {
        Self {
            source,
            renderer,
            output_dir,
        }
    }

    pub fn source_kind(&self) -> SourceKind {
        self.source.kind()
    }

    /// Run one submission. `output` overrides the generated image path.
    pub async fn run(&self, query: &SongQuery, output: Option<&Path>) -> Result<Outcome> {
        let lookup = self.source.fetch(query).await?;
        debug!("{} lookup for '{}': found={}", self.source.kind(), query.title, lookup.is_found());

        let lyrics = match lookup {
            LyricsLookup::Found(lyrics) => lyrics,
            LyricsLookup::NotFound => {
                return Ok(Outcome::NotFound {
                    query: query.title.clone(),
                })
            }
        };

        let cleaned = clean_lyrics(&lyrics.text);
        let mut report = LyricsReport {
            query: query.title.clone(),
            title: lyrics.title,
            artist: lyrics.artist,
            provider: lyrics.provider,
            source_url: lyrics.source_url,
            line_count: line_count(&cleaned),
            lyrics: cleaned,
            cloud: None,
            cloud_error: None,
        };

        if report.lyrics.is_empty() {
            warn!("Lyrics for '{}' are empty after cleaning", report.title);
            return Ok(Outcome::EmptyLyrics(report));
        }

        if let Some(renderer) = &self.renderer {
            let path = match output {
                Some(path) => path.to_path_buf(),
                None => self.output_dir.join(cloud_file_name(&report.title)),
            };
            match renderer.render_to_file(&report.lyrics, &path) {
                Ok(cloud) => report.cloud = Some(cloud),
                Err(e) => {
                    warn!("Word cloud for '{}' not rendered: {}", report.title, e);
                    report.cloud_error = Some(e.to_string());
                }
            }
        } else {
            info!("Word cloud disabled, skipping render");
        }

        Ok(Outcome::Rendered(report))
    }
}

/// `Love Story (Taylor's Version)` → `love-story-taylor-s-version.png`
pub fn cloud_file_name(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "wordcloud.png".to_string()
    } else {
        format!("{}.png", slug)
    }
}
