//! Render the portfolio pages to a static directory.
//!
//! Usage: `cargo run --bin freeze [destination]`
//!
//! Defaults to `freeze.destination` from `config.yml` (`frozen/`).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::config::Config;
use folio::theme::{freeze_site, PageRenderer};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load_with_env(Path::new("config.yml"))?;
    let destination = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or(config.freeze.destination);

    let renderer = PageRenderer::embedded()?;
    let written = freeze_site(&renderer, &destination)
        .with_context(|| format!("Failed to freeze site into {}", destination.display()))?;

    println!("Froze {} files into {}", written.len(), destination.display());
    Ok(())
}
