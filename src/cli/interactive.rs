use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use super::cloud::{build_pipeline, run_with_spinner};
use super::output::{print_outcome, ReportFormat};
use crate::config::Config;
use crate::core::lyrics::SongQuery;
use crate::core::pipeline::Pipeline;
use crate::core::services::SourceKind;
use crate::error::Result;

#[derive(Args)]
pub struct InteractiveArgs {
    /// Artist used to pick between search hits (defaults to the configured artist)
    #[arg(short, long)]
    artist: Option<String>,

    /// Lyrics source for the whole session
    #[arg(short, long, value_enum)]
    source: Option<SourceKind>,

    /// Only fetch and clean the lyrics
    #[arg(long)]
    no_image: bool,
}

pub async fn execute(args: InteractiveArgs, config: &Config) -> Result<()> {
    let pipeline = build_pipeline(config, args.source, args.no_image)?;
    let artist = args.artist.or_else(|| config.artist.clone());

    println!("🎤 Enter a song title (empty line or `quit` to exit)");
    let stdin = BufReader::new(tokio::io::stdin());
    let handled = prompt_loop(stdin, &pipeline, artist.as_deref()).await?;
    info!("Session ended after {} submission(s)", handled);
    Ok(())
}

/// Read titles line by line until EOF, an empty line or `quit`. A failed
/// submission is reported and the loop continues unless the error is fatal.
async fn prompt_loop<R>(input: R, pipeline: &Pipeline, artist: Option<&str>) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut handled = 0;

    loop {
        print!("🎵 Title: ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let title = line.trim();
        if title.is_empty() || title.eq_ignore_ascii_case("quit") {
            break;
        }

        let query = match SongQuery::new(title, artist) {
            Ok(query) => query,
            Err(e) => {
                println!("⚠️  {}", e);
                continue;
            }
        };

        handled += 1;
        match run_with_spinner(pipeline, &query, None).await {
            Ok(outcome) => print_outcome(&outcome, ReportFormat::Text)?,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Submission '{}' failed: {}", query.title, e);
                println!("⚠️  {}", e);
            }
        }
        println!();
    }

    Ok(handled)
}
