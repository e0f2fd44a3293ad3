//! Application configuration
//!
//! Precedence, lowest to highest: built-in defaults, the TOML config file,
//! `.env` / process environment. The configuration is built once at startup
//! and passed by reference afterwards; nothing mutates it later.

pub mod env;
pub mod validation;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::services::SourceKind;
use crate::core::wordcloud::CloudOptions;
use crate::error::{ConfigError, Result};
use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

pub const DEFAULT_ARTIST: &str = "Taylor Swift";

fn default_excluded_terms() -> Vec<String> {
    vec!["(Remix)".to_string(), "(Live)".to_string()]
}

fn default_request_timeout_seconds() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!(
        "Mozilla/5.0 (compatible; lyricloud/{}; +https://github.com/lyricloud/lyricloud)",
        env!("CARGO_PKG_VERSION")
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which lyrics source to use for this session
    pub source: SourceKind,

    /// Artist filter applied to every query; `None` or empty disables filtering
    pub artist: Option<String>,

    /// Genius API base URL
    pub genius_api_url: String,

    /// Genius API token. Read from the environment, never written back
    #[serde(skip_serializing)]
    pub genius_token: Option<String>,

    /// LRCLIB instance URL
    pub lrclib_instance: String,

    /// User agent sent when fetching lyrics pages
    pub user_agent: String,

    /// Per-request timeout
    pub request_timeout_seconds: u64,

    /// Search hits whose title contains one of these terms are skipped
    pub excluded_terms: Vec<String>,

    /// Directory where rendered word clouds are written
    pub output_dir: PathBuf,

    /// Word cloud rendering options
    pub cloud: CloudOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Genius,
            artist: Some(DEFAULT_ARTIST.to_string()),
            genius_api_url: "https://api.genius.com".to_string(),
            genius_token: None,
            lrclib_instance: "https://lrclib.net".to_string(),
            user_agent: default_user_agent(),
            request_timeout_seconds: default_request_timeout_seconds(),
            excluded_terms: default_excluded_terms(),
            output_dir: PathBuf::from("."),
            cloud: CloudOptions::default(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Pick up GENIUS_API_TOKEN and friends from a local .env file
        dotenvy::dotenv().ok();

        let config_file = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.exists() {
                    return Err(ConfigError::FileNotFound { path }.into());
                }
                path
            }
            None => Self::default_config_path()?,
        };

        Self::load_file(&config_file)
    }

    /// Read `config_file`, writing the built-in defaults there first if it
    /// does not exist, then apply environment overrides.
    fn load_file(config_file: &Path) -> Result<Self> {
        let mut config = if config_file.exists() {
            debug!("Loading config from {}", config_file.display());
            let content = fs::read_to_string(config_file)?;
            toml::from_str(&content)?
        } else {
            let defaults = Self::default();
            match defaults.write_new(config_file) {
                Ok(()) => debug!("Wrote default config to {}", config_file.display()),
                Err(e) => warn!("Could not write default config file: {}", e),
            }
            defaults
        };

        // Environment variables have the highest priority
        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    fn write_new(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.save(path)
    }

    /// Apply overrides from environment variables
    fn load_from_env(&mut self) -> Result<()> {
        if let Some(token) = EnvParser::parse_string(EnvVars::GENIUS_API_TOKEN, None)? {
            self.genius_token = Some(token);
        }

        if let Some(source) = EnvParser::parse_string(EnvVars::SOURCE, None)? {
            self.source = source.parse()?;
        }

        if EnvParser::is_present(EnvVars::ARTIST) {
            // An empty value turns the artist filter off
            self.artist = EnvParser::parse_string(EnvVars::ARTIST, None)?;
        }

        if let Some(url) =
            EnvParser::parse_string(EnvVars::GENIUS_API_URL, Some(validate_genius_url))?
        {
            self.genius_api_url = url;
        }

        if let Some(url) =
            EnvParser::parse_string(EnvVars::LRCLIB_INSTANCE, Some(validate_lrclib_url))?
        {
            self.lrclib_instance = url;
        }

        if let Some(agent) = EnvParser::parse_string(EnvVars::USER_AGENT, None)? {
            self.user_agent = agent;
        }

        if let Some(timeout) = EnvParser::parse_u64(EnvVars::REQUEST_TIMEOUT_SECONDS, 1, 300)? {
            self.request_timeout_seconds = timeout;
        }

        if let Some(dir) = EnvParser::parse_path(EnvVars::OUTPUT_DIR, false)? {
            self.output_dir = dir;
        }

        if let Some(font) = EnvParser::parse_path(EnvVars::FONT_PATH, true)? {
            self.cloud.font_path = Some(font);
        }

        if let Some(width) = EnvParser::parse_u64(EnvVars::CLOUD_WIDTH, 50, 8000)? {
            self.cloud.width = width as u32;
        }

        if let Some(height) = EnvParser::parse_u64(EnvVars::CLOUD_HEIGHT, 50, 8000)? {
            self.cloud.height = height as u32;
        }

        if let Some(background) = EnvParser::parse_string(EnvVars::BACKGROUND, None)? {
            self.cloud.background = background;
        }

        if let Some(max_words) = EnvParser::parse_usize(EnvVars::MAX_WORDS, 1, 2000)? {
            self.cloud.max_words = max_words;
        }

        Ok(())
    }

    /// Check the fully merged configuration
    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.genius_api_url, "Genius API")?;
        ConfigValidator::validate_url(&self.lrclib_instance, "LRCLIB instance")?;
        ConfigValidator::validate_range(self.request_timeout_seconds, 1, 300, "request timeout")?;
        ConfigValidator::validate_range(self.cloud.width, 50, 8000, "cloud width")?;
        ConfigValidator::validate_range(self.cloud.height, 50, 8000, "cloud height")?;
        ConfigValidator::validate_range(self.cloud.relative_scaling, 0.0, 1.0, "relative scaling")?;
        ConfigValidator::validate_range(self.cloud.max_words, 1, 2000, "max words")?;
        ConfigValidator::validate_range(self.cloud.min_font_size, 1, 1000, "min font size")?;
        if let Some(max) = self.cloud.max_font_size {
            ConfigValidator::validate_range(max, self.cloud.min_font_size, 2000, "max font size")?;
        }
        ConfigValidator::validate_range(self.cloud.font_step, 1, 100, "font step")?;
        ConfigValidator::validate_range(self.cloud.margin, 0, 200, "margin")?;
        ConfigValidator::validate_color(&self.cloud.background)?;
        if let Some(ref token) = self.genius_token {
            ConfigValidator::validate_token(token)?;
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs =
            ProjectDirs::from("net", "lyricloud", "lyricloud").ok_or(ConfigError::ProjectDirs)?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::default_config_path()
    }

    /// Token for display: first and last four characters only
    pub fn masked_token(&self) -> Option<String> {
        self.genius_token.as_deref().map(mask_secret)
    }
}

fn validate_genius_url(url: &str) -> Result<()> {
    ConfigValidator::validate_url(url, "Genius API")
}

fn validate_lrclib_url(url: &str) -> Result<()> {
    ConfigValidator::validate_url(url, "LRCLIB instance")
}

pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
