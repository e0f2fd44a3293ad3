use std::env;
use std::path::PathBuf;
use crate::error::{Result, LyricloudError};

/// Environment variable configuration constants
pub struct EnvVars;

impl EnvVars {
    /// The one secret the tool needs; name shared with other Genius tooling
    pub const GENIUS_API_TOKEN: &'static str = "GENIUS_API_TOKEN";

    pub const SOURCE: &'static str = "LYRICLOUD_SOURCE";
    pub const ARTIST: &'static str = "LYRICLOUD_ARTIST";
    pub const GENIUS_API_URL: &'static str = "LYRICLOUD_GENIUS_API_URL";
    pub const LRCLIB_INSTANCE: &'static str = "LYRICLOUD_LRCLIB_INSTANCE";
    pub const USER_AGENT: &'static str = "LYRICLOUD_USER_AGENT";
    pub const REQUEST_TIMEOUT_SECONDS: &'static str = "LYRICLOUD_REQUEST_TIMEOUT_SECONDS";
    pub const OUTPUT_DIR: &'static str = "LYRICLOUD_OUTPUT_DIR";
    pub const FONT_PATH: &'static str = "LYRICLOUD_FONT_PATH";
    pub const CLOUD_WIDTH: &'static str = "LYRICLOUD_CLOUD_WIDTH";
    pub const CLOUD_HEIGHT: &'static str = "LYRICLOUD_CLOUD_HEIGHT";
    pub const BACKGROUND: &'static str = "LYRICLOUD_BACKGROUND";
    pub const MAX_WORDS: &'static str = "LYRICLOUD_MAX_WORDS";
}

/// Environment variable parsing utilities with validation
pub struct EnvParser;

impl EnvParser {
    /// Parse environment variable as string with validation
    pub fn parse_string(var_name: &str, validator: Option<fn(&str) -> Result<()>>) -> Result<Option<String>> {
        match env::var(var_name) {
            Ok(value) => {
                let trimmed = value.trim().to_string();
                if trimmed.is_empty() {
                    return Ok(None);
                }

                if let Some(validate_fn) = validator {
                    validate_fn(&trimmed)?;
                }

                Ok(Some(trimmed))
            }
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => {
                Err(LyricloudError::Validation(format!(
                    "Environment variable {} contains invalid UTF-8",
                    var_name
                )))
            }
        }
    }

    /// Parse environment variable as PathBuf with validation
    pub fn parse_path(var_name: &str, should_exist: bool) -> Result<Option<PathBuf>> {
        if let Some(path_str) = Self::parse_string(var_name, None)? {
            let path = PathBuf::from(path_str);

            if should_exist && !path.exists() {
                return Err(LyricloudError::Validation(format!(
                    "Path specified in {} does not exist: {}",
                    var_name,
                    path.display()
                )));
            }

            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as u64 with range validation
    pub fn parse_u64(var_name: &str, min: u64, max: u64) -> Result<Option<u64>> {
        if let Some(value_str) = Self::parse_string(var_name, None)? {
            let value = value_str.parse::<u64>().map_err(|_| {
                LyricloudError::Validation(format!(
                    "Invalid number in {}: '{}'. Must be a positive integer",
                    var_name, value_str
                ))
            })?;

            if value < min || value > max {
                return Err(LyricloudError::Validation(format!(
                    "Value in {} must be between {} and {}, got {}",
                    var_name, min, max, value
                )));
            }

            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    /// Parse environment variable as usize with range validation
    pub fn parse_usize(var_name: &str, min: usize, max: usize) -> Result<Option<usize>> {
        Ok(Self::parse_u64(var_name, min as u64, max as u64)?.map(|v| v as usize))
    }

    /// Check if environment variable is present, even when empty
    pub fn is_present(var_name: &str) -> bool {
        env::var_os(var_name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_parse_string_trims_and_validates() {
        env::set_var("TEST_LYRICLOUD_STR", "  hello  ");
        env::set_var("TEST_LYRICLOUD_STR_EMPTY", "   ");

        assert_eq!(EnvParser::parse_string("TEST_LYRICLOUD_STR", None).unwrap(), Some("hello".to_string()));
        assert_eq!(EnvParser::parse_string("TEST_LYRICLOUD_STR_EMPTY", None).unwrap(), None);
        assert_eq!(EnvParser::parse_string("TEST_LYRICLOUD_STR_NOT_SET", None).unwrap(), None);

        fn reject(_: &str) -> Result<()> {
            Err(LyricloudError::Validation("rejected".into()))
        }
        assert!(EnvParser::parse_string("TEST_LYRICLOUD_STR", Some(reject)).is_err());

        env::remove_var("TEST_LYRICLOUD_STR");
        env::remove_var("TEST_LYRICLOUD_STR_EMPTY");
    }

    #[test]
    fn test_parse_u64() {
        env::set_var("TEST_LYRICLOUD_U64_VALID", "42");
        env::set_var("TEST_LYRICLOUD_U64_OUT_OF_RANGE", "150");
        env::set_var("TEST_LYRICLOUD_U64_INVALID", "not_a_number");

        assert_eq!(EnvParser::parse_u64("TEST_LYRICLOUD_U64_VALID", 1, 100).unwrap(), Some(42));
        assert!(EnvParser::parse_u64("TEST_LYRICLOUD_U64_OUT_OF_RANGE", 1, 100).is_err());
        assert!(EnvParser::parse_u64("TEST_LYRICLOUD_U64_INVALID", 1, 100).is_err());
        assert_eq!(EnvParser::parse_u64("TEST_LYRICLOUD_U64_NOT_SET", 1, 100).unwrap(), None);
        assert_eq!(EnvParser::parse_usize("TEST_LYRICLOUD_U64_VALID", 1, 100).unwrap(), Some(42));

        env::remove_var("TEST_LYRICLOUD_U64_VALID");
        env::remove_var("TEST_LYRICLOUD_U64_OUT_OF_RANGE");
        env::remove_var("TEST_LYRICLOUD_U64_INVALID");
    }

    #[test]
    fn test_parse_path_must_exist() {
        env::set_var("TEST_LYRICLOUD_PATH_MISSING", "/definitely/not/here.ttf");
        assert!(EnvParser::parse_path("TEST_LYRICLOUD_PATH_MISSING", true).is_err());
        assert!(EnvParser::parse_path("TEST_LYRICLOUD_PATH_MISSING", false).unwrap().is_some());
        env::remove_var("TEST_LYRICLOUD_PATH_MISSING");
    }
}
