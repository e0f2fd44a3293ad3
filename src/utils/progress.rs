use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress spinner setup shared by the CLI commands
pub struct ProgressUtils;

impl ProgressUtils {
    /// Spinner shown while a submission is in flight. Hidden when stdout is
    /// not a terminal so piped output stays clean.
    pub fn create_fetch_spinner() -> ProgressBar {
        if !atty::is(atty::Stream::Stdout) {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("valid spinner template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(ProgressMessages::FETCHING);
        pb
    }
}

/// Common progress messages
pub struct ProgressMessages;

impl ProgressMessages {
    pub const FETCHING: &'static str = "Fetching lyrics...";
    pub const COMPLETED: &'static str = "✅ Completed";
    pub const NOT_FOUND: &'static str = "🔍 No lyrics found";
    pub const FAILED: &'static str = "❌ Failed";

    pub fn fetching_for(title: &str, artist: Option<&str>) -> String {
        match artist {
            Some(artist) => format!("🎵 Fetching lyrics for {} by {}...", title, artist),
            None => format!("🎵 Fetching lyrics for {}...", title),
        }
    }
}
