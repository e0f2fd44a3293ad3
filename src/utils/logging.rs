use anyhow::Result;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Noisy dependencies kept at `warn` regardless of verbosity.
const QUIET_TARGETS: &[&str] = &["reqwest=warn", "hyper=warn", "html5ever=warn"];

pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = build_filter(verbose)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    Ok(())
}

fn build_filter(verbose: bool) -> Result<EnvFilter> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    for directive in QUIET_TARGETS {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_parse() {
        let filter = build_filter(true).unwrap();
        let rendered = filter.to_string();
        assert!(rendered.contains("reqwest=warn"));
        assert!(rendered.contains("html5ever=warn"));
    }
}
