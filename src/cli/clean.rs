use clap::Args;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::core::normalize::{clean_lyrics, line_count};
use crate::error::{FileSystemError, Result};

#[derive(Args)]
pub struct CleanArgs {
    /// Lyrics file to clean; reads stdin when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

pub async fn execute(args: CleanArgs) -> Result<()> {
    let raw = match &args.file {
        Some(path) => read_file(path).await?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin().read_to_string(&mut raw).await?;
            raw
        }
    };

    let cleaned = clean_lyrics(&raw);
    debug!("Cleaned {} line(s) down to {}", raw.lines().count(), line_count(&cleaned));
    if !cleaned.is_empty() {
        println!("{}", cleaned);
    }
    Ok(())
}

async fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(FileSystemError::PathNotFound { path: path.to_path_buf() }.into());
    }
    Ok(tokio::fs::read_to_string(path).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LyricloudError;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_is_reported() {
        let err = read_file(Path::new("/no/such/lyrics.txt")).await.unwrap_err();
        assert!(matches!(err, LyricloudError::FileSystem(FileSystemError::PathNotFound { .. })));
    }

    #[tokio::test]
    async fn test_reads_and_cleans_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lyrics.txt");
        std::fs::write(&path, "[Intro]\n  Hey  \n\n[Verse 1]\nThere\n").unwrap();

        let raw = read_file(&path).await.unwrap();
        assert_eq!(clean_lyrics(&raw), "Hey\nThere");
    }
}
