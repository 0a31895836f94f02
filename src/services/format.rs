//! Field transformations applied to exported articles

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::services::export::ExportError;

/// Article ID segment of a Help Center URL
static ARTICLE_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/articles/(\d+)").expect("valid article id pattern"));

/// Scheme and host of an absolute URL
static HOST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://([^/?#]+)").expect("valid host pattern"));

/// Exact timestamp shape accepted by [`format_created_date`]
static TIMESTAMP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").expect("valid timestamp pattern")
});

/// Rewrite an article URL to its short canonical form.
///
/// `https://acme.zendesk.com/hc/en-us/articles/123-Title` becomes
/// `https://support.acme.zendesk.com/hc/articles/123`. URLs without an
/// `/articles/<digits>` segment or without a host are returned unchanged.
pub fn trim_article_url(url: &str) -> String {
    let Some(id) = ARTICLE_ID_PATTERN.captures(url).map(|c| c[1].to_string()) else {
        return url.to_string();
    };
    let Some(host) = HOST_PATTERN.captures(url).map(|c| c[1].to_string()) else {
        return url.to_string();
    };

    let host = host.strip_prefix("support.").unwrap_or(&host);
    format!("https://support.{}/hc/articles/{}", host, id)
}

/// Render a `YYYY-MM-DDTHH:MM:SSZ` timestamp as `Month DD, YYYY`.
///
/// Fractional seconds and numeric offsets are rejected.
pub fn format_created_date(timestamp: &str) -> Result<String, ExportError> {
    if !TIMESTAMP_PATTERN.is_match(timestamp) {
        return Err(ExportError::MalformedDate(timestamp.to_string()));
    }

    let parsed = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%SZ")
        .map_err(|_| ExportError::MalformedDate(timestamp.to_string()))?;

    Ok(parsed.format("%B %d, %Y").to_string())
}

/// Join labels with `", "`; no labels yields an empty string
pub fn join_labels(labels: &[String]) -> String {
    labels.join(", ")
}
