//! Static snapshot of the site
//!
//! Renders every page to `<page>/index.html` with relative links so the
//! output can be browsed from disk or served by any static host. The export
//! endpoint needs a live server and is not part of the snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use super::{PageRenderer, PageVars, SiteAssets, SitePage, ThemeError};

/// File a page is written to, relative to the destination directory
pub fn output_path(page: SitePage) -> PathBuf {
    let trimmed = page.path().trim_matches('/');
    if trimmed.is_empty() {
        PathBuf::from("index.html")
    } else {
        PathBuf::from(trimmed).join("index.html")
    }
}

/// Write all pages and static assets under `destination`.
///
/// Returns the written files, pages first.
pub fn freeze_site(renderer: &PageRenderer, destination: &Path) -> Result<Vec<PathBuf>, ThemeError> {
    let mut written = Vec::new();

    for page in SitePage::ALL {
        let html = renderer.render_page(page, &PageVars::new(page, page.relative_root()))?;
        let target = destination.join(output_path(page));
        write_file(&target, html.as_bytes())?;
        tracing::debug!("Froze {} -> {}", page.path(), target.display());
        written.push(target);
    }

    for name in SiteAssets::iter() {
        let asset = SiteAssets::get(&name).ok_or_else(|| ThemeError::NotFound(name.to_string()))?;
        let target = destination.join("static").join(name.as_ref());
        write_file(&target, &asset.data)?;
        written.push(target);
    }

    tracing::info!("Froze {} files into {}", written.len(), destination.display());
    Ok(written)
}

fn write_file(target: &Path, contents: &[u8]) -> Result<(), ThemeError> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, contents)?;
    Ok(())
}
