use clap::Args;

use crate::config::env::EnvVars;
use crate::config::Config;
use crate::error::Result;

#[derive(Args)]
pub struct ConfigArgs {
    /// Only print the configuration file path
    #[arg(long)]
    path: bool,
}

pub async fn execute(args: ConfigArgs, config: &Config) -> Result<()> {
    if args.path {
        println!("{}", Config::config_path()?.display());
        return Ok(());
    }

    println!("{}", describe(config));
    Ok(())
}

fn describe(config: &Config) -> String {
    let token = config
        .masked_token()
        .unwrap_or_else(|| format!("(not set, export {})", EnvVars::GENIUS_API_TOKEN));
    let cloud = &config.cloud;

    let mut lines = vec![
        "🔧 Current configuration:".to_string(),
        format!("  🎚️  source: {}", config.source),
        format!("  🎤 artist: {}", config.artist.as_deref().unwrap_or("(any)")),
        format!("  🌐 genius_api_url: {}", config.genius_api_url),
        format!("  🔑 genius_token: {}", token),
        format!("  🌐 lrclib_instance: {}", config.lrclib_instance),
        format!("  🕵️  user_agent: {}", config.user_agent),
        format!("  ⏱️  request_timeout_seconds: {}", config.request_timeout_seconds),
        format!("  🚫 excluded_terms: {}", config.excluded_terms.join(", ")),
        format!("  📁 output_dir: {}", config.output_dir.display()),
        "  🖼️  cloud:".to_string(),
        format!("     size: {}x{}", cloud.width, cloud.height),
        format!("     background: {}", cloud.background),
        format!("     max_words: {}", cloud.max_words),
        format!(
            "     font_size: {}..{} (step {})",
            cloud.min_font_size,
            cloud.effective_max_font_size(),
            cloud.font_step
        ),
        format!("     relative_scaling: {}", cloud.relative_scaling),
    ];
    match &cloud.font_path {
        Some(path) => lines.push(format!("     font_path: {}", path.display())),
        None => lines.push("     font_path: (system font)".to_string()),
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_masked() {
        let config = Config {
            genius_token: Some("abcd1234efgh5678".to_string()),
            ..Config::default()
        };
        let text = describe(&config);
        assert!(text.contains("genius_token: abcd...5678"));
        assert!(!text.contains("abcd1234efgh5678"));
    }

    #[test]
    fn test_missing_token_names_the_variable() {
        let config = Config {
            genius_token: None,
            ..Config::default()
        };
        assert!(describe(&config).contains("GENIUS_API_TOKEN"));
    }
}
