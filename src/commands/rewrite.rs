use std::path::Path;

use anyhow::{Context, Result};
use coursecal_core::{HttpFetcher, RewriteConfig, rewrite_url};

pub async fn run(config: &RewriteConfig, url: &str, output: Option<&Path>) -> Result<()> {
    let fetcher = HttpFetcher::new()?;

    let feed = rewrite_url(&fetcher, config, url)
        .await
        .with_context(|| format!("Failed to rewrite {url}"))?;
    let ics = feed.to_ics();

    match output {
        Some(path) => {
            std::fs::write(path, ics)
                .with_context(|| format!("Failed to write feed to {}", path.display()))?;
            tracing::info!(
                "Wrote {} events to {}",
                feed.summary.included,
                path.display()
            );
        }
        None => print!("{ics}"),
    }

    Ok(())
}
