//! Error handling for the lyricloud application
//!
//! This module provides a hierarchical error system with user-friendly
//! messages. A song that simply has no lyrics is not an error: sources report
//! it as `LyricsLookup::NotFound`. Everything here is a hard failure.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LyricloudError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),

    #[error("Word cloud error: {0}")]
    Render(#[from] RenderError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl LyricloudError {
    /// Configuration errors stop the whole session; everything else only
    /// aborts the current submission.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LyricloudError::Config(_))
    }
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("API rate limit exceeded")]
    RateLimit,

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Authentication failed (check GENIUS_API_TOKEN)")]
    Authentication,

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Timeout exceeded")]
    Timeout,
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_decode() {
            NetworkError::InvalidResponse {
                reason: err.to_string(),
            }
        } else {
            NetworkError::Http(err)
        }
    }
}

impl NetworkError {
    /// Map a non-success status to the matching error variant.
    pub fn from_status(status: reqwest::StatusCode, url: &str) -> Self {
        match status {
            reqwest::StatusCode::TOO_MANY_REQUESTS => NetworkError::RateLimit,
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                NetworkError::Authentication
            }
            _ => NetworkError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Missing credential {name}. Add it to the environment or a .env file")]
    MissingCredential { name: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Failed to determine project directories")]
    ProjectDirs,
}

#[derive(Error, Debug)]
pub enum LyricsError {
    #[error("Song title must not be empty")]
    EmptyTitle,

    #[error("Failed to scrape lyrics page: {reason}")]
    Scrape { reason: String },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No text to build a word cloud from")]
    EmptyText,

    #[error("No words left after stop-word removal")]
    NoWords,

    #[error("Invalid font file {path}: {reason}")]
    InvalidFont { path: PathBuf, reason: String },

    #[error("Invalid colour '{0}'. Use a name (white, black, ...) or #rrggbb")]
    InvalidColor(String),

    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LyricloudError>;

impl From<reqwest::Error> for LyricloudError {
    fn from(err: reqwest::Error) -> Self {
        LyricloudError::Network(err.into())
    }
}

impl From<std::io::Error> for LyricloudError {
    fn from(err: std::io::Error) -> Self {
        LyricloudError::FileSystem(FileSystemError::Io(err))
    }
}

impl From<toml::de::Error> for LyricloudError {
    fn from(err: toml::de::Error) -> Self {
        LyricloudError::Config(ConfigError::InvalidFormat(err))
    }
}

impl From<toml::ser::Error> for LyricloudError {
    fn from(err: toml::ser::Error) -> Self {
        LyricloudError::Config(ConfigError::Serialize(err))
    }
}

impl From<serde_json::Error> for LyricloudError {
    fn from(err: serde_json::Error) -> Self {
        LyricloudError::Internal(err.into())
    }
}
