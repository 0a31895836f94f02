//! Paginated Help Center fetcher
//!
//! Walks a list endpoint page by page, following the `next_page` cursor
//! until the API stops returning one.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::ResourceKind;
use crate::services::export::ExportError;

/// Thin wrapper over a shared `reqwest::Client` for Help Center list endpoints
#[derive(Debug, Clone, Default)]
pub struct HelpCenterClient {
    http: reqwest::Client,
}

impl HelpCenterClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch every record of `kind` starting at `first_page`.
    ///
    /// Pages are requested one after another. Any non-200 response aborts
    /// the whole walk; nothing already collected is returned.
    pub async fn fetch_all<T>(&self, first_page: &str, kind: ResourceKind) -> Result<Vec<T>, ExportError>
    where
        T: DeserializeOwned,
    {
        let mut records = Vec::new();
        let mut next_url = Some(first_page.to_string());
        let mut pages = 0usize;

        while let Some(url) = next_url.take() {
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(ExportError::Transport)?;

            match response.status() {
                StatusCode::OK => {}
                StatusCode::UNAUTHORIZED => return Err(ExportError::AuthRequired),
                StatusCode::NOT_FOUND => return Err(ExportError::NotFound),
                status => {
                    return Err(ExportError::Upstream {
                        status: status.as_u16(),
                        resource: kind,
                    })
                }
            }

            let bytes = response.bytes().await.map_err(ExportError::Transport)?;
            let body: Value = serde_json::from_slice(&bytes).map_err(|source| ExportError::Decode {
                resource: kind,
                source,
            })?;
            let page = parse_page::<T>(body, kind)?;

            pages += 1;
            tracing::debug!(
                "Fetched {} page {} ({} records)",
                kind,
                pages,
                page.records.len()
            );

            records.extend(page.records);
            next_url = page.next_page;
        }

        tracing::info!("Fetched {} {} across {} page(s)", records.len(), kind, pages);
        Ok(records)
    }
}

/// One decoded page of a list endpoint
#[derive(Debug)]
struct Page<T> {
    records: Vec<T>,
    next_page: Option<String>,
}

/// Decode the records under `kind.key()` and the pagination cursor.
///
/// Other resource arrays on the same page are ignored. A missing, null or
/// empty `next_page` ends pagination.
fn parse_page<T>(mut body: Value, kind: ResourceKind) -> Result<Page<T>, ExportError>
where
    T: DeserializeOwned,
{
    let records = match body.get_mut(kind.key()).map(Value::take) {
        Some(Value::Null) | None => Vec::new(),
        Some(items) => serde_json::from_value(items).map_err(|source| ExportError::Decode {
            resource: kind,
            source,
        })?,
    };

    let next_page = body
        .get("next_page")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
        .map(str::to_string);

    Ok(Page { records, next_page })
}
