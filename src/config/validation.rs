use url::Url;
use crate::core::wordcloud::render::parse_color;
use crate::error::{Result, LyricloudError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate an http(s) URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            LyricloudError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(LyricloudError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(LyricloudError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Validate an API token: non-empty, no embedded whitespace
    pub fn validate_token(token: &str) -> Result<()> {
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(LyricloudError::Validation(
                "GENIUS_API_TOKEN must be a single non-empty value without whitespace".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate a colour accepted by the word cloud renderer
    pub fn validate_color(color: &str) -> Result<()> {
        parse_color(color)?;
        Ok(())
    }
}
