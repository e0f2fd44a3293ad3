//! Console rendering of pipeline outcomes

use clap::ValueEnum;

use crate::core::pipeline::{LyricsReport, Outcome};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

pub fn print_outcome(outcome: &Outcome, format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
        ReportFormat::Text => print!("{}", format_outcome(outcome)),
    }
    Ok(())
}

pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::NotFound { query } => format!("🔍 No lyrics found for \"{}\"\n", query),
        Outcome::EmptyLyrics(report) => {
            let mut out = header(report);
            out.push_str("⚠️  Lyrics are empty after cleaning, no word cloud generated\n");
            out
        }
        Outcome::Rendered(report) => {
            let mut out = header(report);
            out.push_str(&format!("\n📝 Lyrics ({} lines):\n", report.line_count));
            for line in report.lyrics.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
            match (&report.cloud, &report.cloud_error) {
                (Some(cloud), _) => out.push_str(&format!(
                    "\n🖼️  Word cloud ({} words): {}\n",
                    cloud.words_placed,
                    cloud.path.display()
                )),
                (None, Some(error)) => out.push_str(&format!("\n⚠️  Word cloud not rendered: {}\n", error)),
                (None, None) => out.push_str("\n🖼️  Word cloud skipped\n"),
            }
            out
        }
    }
}

fn header(report: &LyricsReport) -> String {
    let mut out = match &report.artist {
        Some(artist) => format!("🎵 {} by {} [{}]\n", report.title, artist, report.provider),
        None => format!("🎵 {} [{}]\n", report.title, report.provider),
    };
    if let Some(url) = &report.source_url {
        out.push_str(&format!("🔗 {}\n", url));
    }
    out
}
