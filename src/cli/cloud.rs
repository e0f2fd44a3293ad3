use clap::Args;
use std::path::PathBuf;
use tracing::{debug, info};

use super::output::{print_outcome, ReportFormat};
use crate::config::Config;
use crate::core::lyrics::SongQuery;
use crate::core::pipeline::{Outcome, Pipeline};
use crate::core::services::{build_source, SourceKind};
use crate::core::wordcloud::CloudRenderer;
use crate::error::Result;
use crate::utils::progress::{ProgressMessages, ProgressUtils};

#[derive(Args)]
pub struct CloudArgs {
    /// Song title to look up
    #[arg(value_name = "TITLE")]
    title: String,

    /// Artist used to pick between search hits (defaults to the configured artist)
    #[arg(short, long)]
    artist: Option<String>,

    /// Lyrics source for this run
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Image path; `.svg` writes SVG, anything else PNG
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only fetch and clean the lyrics
    #[arg(long)]
    no_image: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,
}

pub async fn execute(args: CloudArgs, config: &Config) -> Result<()> {
    let pipeline = build_pipeline(config, args.source, args.no_image)?;
    let artist = args.artist.as_deref().or(config.artist.as_deref());
    let query = SongQuery::new(&args.title, artist)?;

    let outcome = run_with_spinner(&pipeline, &query, args.output.as_deref()).await?;
    print_outcome(&outcome, args.format)
}

/// Compose the session's pipeline. The source is fixed from here on.
pub fn build_pipeline(config: &Config, source: Option<SourceKind>, no_image: bool) -> Result<Pipeline> {
    let kind = source.unwrap_or(config.source);
    info!("Using {} lyrics source", kind);

    let source = build_source(config, kind)?;
    let renderer = if no_image {
        None
    } else {
        Some(CloudRenderer::new(config.cloud.clone()))
    };
    Ok(Pipeline::new(source, renderer, config.output_dir.clone()))
}

pub async fn run_with_spinner(
    pipeline: &Pipeline,
    query: &SongQuery,
    output: Option<&std::path::Path>,
) -> Result<Outcome> {
    let spinner = ProgressUtils::create_fetch_spinner();
    spinner.set_message(ProgressMessages::fetching_for(&query.title, query.artist.as_deref()));
    debug!("Searching {} for '{}'", pipeline.source_kind(), query.search_text());

    let result = pipeline.run(query, output).await;
    let message = match &result {
        Ok(Outcome::NotFound { .. }) => ProgressMessages::NOT_FOUND,
        Ok(_) => ProgressMessages::COMPLETED,
        Err(_) => ProgressMessages::FAILED,
    };
    spinner.finish_with_message(message);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, LyricloudError};

    #[test]
    fn test_genius_without_token_fails_at_composition() {
        let config = Config {
            genius_token: None,
            ..Config::default()
        };
        let err = build_pipeline(&config, Some(SourceKind::Genius), false).err().unwrap();
        assert!(matches!(err, LyricloudError::Config(ConfigError::MissingCredential { .. })));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_source_flag_overrides_config() {
        let config = Config::default();
        let pipeline = build_pipeline(&config, Some(SourceKind::Static), true).unwrap();
        assert_eq!(pipeline.source_kind(), SourceKind::Static);
    }

    #[tokio::test]
    async fn test_static_run_without_image() {
        let config = Config::default();
        let pipeline = build_pipeline(&config, Some(SourceKind::Static), true).unwrap();
        let query = SongQuery::new("Shake It Off", None).unwrap();

        match run_with_spinner(&pipeline, &query, None).await.unwrap() {
            Outcome::Rendered(report) => {
                assert!(!report.lyrics.is_empty());
                assert!(report.cloud.is_none());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
