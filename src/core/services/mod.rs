//! Lyrics sources
//!
//! Every source implements [`LyricsSource`]. Exactly one is built per session
//! by [`build_source`], from the configuration and command-line choice:
//! - `genius`: Genius search API plus a scrape of the song page
//! - `lrclib`: LRCLIB search API, which returns lyric text directly
//! - `static`: a built-in keyword table, no network at all

pub mod fallback;
pub mod genius;
pub mod lrclib;
pub mod scrape;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::config::env::EnvVars;
use crate::config::Config;
use crate::core::lyrics::{LyricsLookup, SongQuery};
use crate::error::{ConfigError, LyricloudError, Result};

pub use fallback::StaticSource;
pub use genius::GeniusSource;
pub use lrclib::LrclibSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Genius,
    Lrclib,
    Static,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Genius => "genius",
            SourceKind::Lrclib => "lrclib",
            SourceKind::Static => "static",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = LyricloudError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "genius" => Ok(SourceKind::Genius),
            "lrclib" => Ok(SourceKind::Lrclib),
            "static" => Ok(SourceKind::Static),
            other => Err(ConfigError::InvalidValue {
                field: "source".to_string(),
                value: other.to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
pub trait LyricsSource: Send + Sync {
    /// Look up lyrics for one query. A song without lyrics is
    /// `Ok(LyricsLookup::NotFound)`; `Err` means the lookup itself failed.
    async fn fetch(&self, query: &SongQuery) -> Result<LyricsLookup>;

    fn kind(&self) -> SourceKind;
}

/// Build the single lyrics source used for this session.
pub fn build_source(config: &Config, kind: SourceKind) -> Result<Box<dyn LyricsSource>> {
    let source: Box<dyn LyricsSource> = match kind {
        SourceKind::Genius => {
            let token = config.genius_token.clone().ok_or_else(|| ConfigError::MissingCredential {
                name: EnvVars::GENIUS_API_TOKEN.to_string(),
            })?;
            Box::new(GeniusSource::new(config, token)?)
        }
        SourceKind::Lrclib => Box::new(LrclibSource::new(config)?),
        SourceKind::Static => Box::new(StaticSource::new()),
    };

    tracing::debug!("Using lyrics source: {}", source.kind());
    Ok(source)
}

/// Shared HTTP client setup for network-backed sources.
pub(crate) fn http_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_parsing() {
        assert_eq!("genius".parse::<SourceKind>().unwrap(), SourceKind::Genius);
        assert_eq!(" LRCLIB ".parse::<SourceKind>().unwrap(), SourceKind::Lrclib);
        assert_eq!("static".parse::<SourceKind>().unwrap(), SourceKind::Static);
        assert!("musixmatch".parse::<SourceKind>().is_err());
        assert_eq!(SourceKind::Lrclib.to_string(), "lrclib");
    }

    #[test]
    fn test_genius_requires_token() {
        let config = Config {
            genius_token: None,
            ..Config::default()
        };
        let err = match build_source(&config, SourceKind::Genius) {
            Ok(_) => panic!("genius source built without a token"),
            Err(e) => e,
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("GENIUS_API_TOKEN"));
    }

    #[test]
    fn test_builds_each_kind() {
        let config = Config {
            genius_token: Some("token-value-1234".to_string()),
            ..Config::default()
        };
        for kind in [SourceKind::Genius, SourceKind::Lrclib, SourceKind::Static] {
            let source = build_source(&config, kind).unwrap();
            assert_eq!(source.kind(), kind);
        }
    }
}
