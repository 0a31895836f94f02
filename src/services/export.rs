//! Help Center article export
//!
//! Fetches articles, sections and categories for one tenant, joins them
//! by ID and renders the result as a CSV download.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

use crate::config::SUBDOMAIN_PLACEHOLDER;
use crate::models::{Article, Category, ExportRow, ResourceId, ResourceKind, Section, EXPORT_HEADERS};
use crate::services::fetcher::HelpCenterClient;
use crate::services::format::{format_created_date, join_labels, trim_article_url};

/// Download filename of the export
pub const EXPORT_FILENAME: &str = "zendesk_articles.csv";

/// Content type of the export
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Alphanumeric with internal hyphens, at least two characters
static SUBDOMAIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9]$").expect("valid subdomain pattern")
});

/// Export pipeline errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// No subdomain supplied
    #[error("Subdomain is required")]
    MissingSubdomain,

    /// Subdomain does not match the allowed format
    #[error("Invalid subdomain format: {0}")]
    InvalidSubdomain(String),

    /// Upstream answered 401
    #[error("Help center requires authentication")]
    AuthRequired,

    /// Upstream answered 404
    #[error("Help center not found")]
    NotFound,

    /// Upstream answered any other non-200 status
    #[error("Upstream returned HTTP {status} for {resource}")]
    Upstream { status: u16, resource: ResourceKind },

    /// Request never produced a response
    #[error("Request to help center failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Response body was not the expected JSON shape
    #[error("Failed to decode {resource} response: {source}")]
    Decode {
        resource: ResourceKind,
        source: serde_json::Error,
    },

    /// The tenant has no articles
    #[error("No articles found")]
    NoArticles,

    /// Article timestamp is not `YYYY-MM-DDTHH:MM:SSZ`
    #[error("Malformed timestamp: {0:?}")]
    MalformedDate(String),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Finished export ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub rows: usize,
}

/// Check a tenant subdomain and return it without surrounding whitespace
pub fn validate_subdomain(subdomain: &str) -> Result<&str, ExportError> {
    let subdomain = subdomain.trim();
    if subdomain.is_empty() {
        return Err(ExportError::MissingSubdomain);
    }
    if !SUBDOMAIN_PATTERN.is_match(subdomain) {
        return Err(ExportError::InvalidSubdomain(subdomain.to_string()));
    }
    Ok(subdomain)
}

/// Export service, built once at startup and shared between requests
#[derive(Debug, Clone)]
pub struct ArticleExporter {
    client: HelpCenterClient,
    api_base: String,
}

impl ArticleExporter {
    /// `api_base` must contain the `{subdomain}` placeholder
    pub fn new(client: HelpCenterClient, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    /// First-page URL of `kind` for a tenant
    pub fn endpoint_url(&self, subdomain: &str, kind: ResourceKind) -> String {
        let base = self.api_base.replace(SUBDOMAIN_PLACEHOLDER, subdomain);
        format!("{}/{}", base.trim_end_matches('/'), kind.endpoint())
    }

    /// Run the full export for one tenant.
    ///
    /// All three resources must be fetched successfully before any row is
    /// produced; the result is all-or-nothing.
    pub async fn export(&self, subdomain: &str) -> Result<CsvExport, ExportError> {
        let subdomain = validate_subdomain(subdomain)?;
        tracing::info!("Starting article export for '{}'", subdomain);

        let articles: Vec<Article> = self
            .client
            .fetch_all(&self.endpoint_url(subdomain, ResourceKind::Articles), ResourceKind::Articles)
            .await?;
        let sections: Vec<Section> = self
            .client
            .fetch_all(&self.endpoint_url(subdomain, ResourceKind::Sections), ResourceKind::Sections)
            .await?;
        let categories: Vec<Category> = self
            .client
            .fetch_all(
                &self.endpoint_url(subdomain, ResourceKind::Categories),
                ResourceKind::Categories,
            )
            .await?;

        if articles.is_empty() {
            return Err(ExportError::NoArticles);
        }

        let rows = build_rows(articles, &sections, &categories)?;
        let body = write_csv(&rows)?;

        tracing::info!("Exported {} articles for '{}'", rows.len(), subdomain);

        Ok(CsvExport {
            filename: EXPORT_FILENAME,
            content_type: EXPORT_CONTENT_TYPE,
            body,
            rows: rows.len(),
        })
    }
}

/// Join articles to their section and category names.
///
/// Articles sharing an ID collapse to the last one seen, kept at the
/// position of the first. Unknown section or category references resolve
/// to empty strings.
pub fn build_rows(
    articles: Vec<Article>,
    sections: &[Section],
    categories: &[Category],
) -> Result<Vec<ExportRow>, ExportError> {
    let category_names: HashMap<&ResourceId, &str> = categories
        .iter()
        .map(|c| (&c.id, c.name.as_str()))
        .collect();
    let sections_by_id: HashMap<&ResourceId, &Section> =
        sections.iter().map(|s| (&s.id, s)).collect();
    let section_categories: HashMap<&ResourceId, &ResourceId> = sections
        .iter()
        .filter_map(|s| s.category_id.as_ref().map(|cid| (&s.id, cid)))
        .collect();

    let articles = dedup_by_id(articles);
    let mut rows = Vec::with_capacity(articles.len());

    for article in articles {
        let section = article
            .section_id
            .as_ref()
            .and_then(|sid| sections_by_id.get(sid))
            .map(|s| s.name.clone())
            .unwrap_or_default();

        let category = article
            .section_id
            .as_ref()
            .and_then(|sid| section_categories.get(sid))
            .and_then(|cid| category_names.get(*cid))
            .map(|name| name.to_string())
            .unwrap_or_default();

        rows.push(ExportRow {
            id: article.id.to_string(),
            created: format_created_date(&article.created_at)?,
            url: trim_article_url(&article.html_url),
            labels: join_labels(&article.label_names),
            title: article.title,
            section,
            category,
        });
    }

    Ok(rows)
}

fn dedup_by_id(articles: Vec<Article>) -> Vec<Article> {
    let mut positions: HashMap<ResourceId, usize> = HashMap::new();
    let mut unique: Vec<Article> = Vec::with_capacity(articles.len());

    for article in articles {
        match positions.get(&article.id) {
            Some(&index) => unique[index] = article,
            None => {
                positions.insert(article.id.clone(), unique.len());
                unique.push(article);
            }
        }
    }

    unique
}

/// Serialize rows with the fixed header line
pub fn write_csv(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn article(id: &str, section_id: Option<&str>, labels: &[&str]) -> Article {
        Article {
            id: ResourceId::new(id),
            title: format!("Article {}", id),
            html_url: format!("https://acme.zendesk.com/hc/en-us/articles/{}-Slug", id),
            created_at: "2024-01-05T10:00:00Z".to_string(),
            section_id: section_id.map(ResourceId::new),
            label_names: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn section(id: &str, name: &str, category_id: Option<&str>) -> Section {
        Section {
            id: ResourceId::new(id),
            name: name.to_string(),
            category_id: category_id.map(ResourceId::new),
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: ResourceId::new(id),
            name: name.to_string(),
        }
    }

    fn exporter_for(server: &MockServer) -> ArticleExporter {
        ArticleExporter::new(
            HelpCenterClient::default(),
            format!("{}/{{subdomain}}/api/v2/help_center", server.uri()),
        )
    }

    async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_validate_subdomain() {
        assert_eq!(validate_subdomain("acme").unwrap(), "acme");
        assert_eq!(validate_subdomain("  my-help-center ").unwrap(), "my-help-center");
        assert_eq!(validate_subdomain("a1").unwrap(), "a1");

        assert!(matches!(validate_subdomain(""), Err(ExportError::MissingSubdomain)));
        assert!(matches!(validate_subdomain("   "), Err(ExportError::MissingSubdomain)));
        for bad in ["-bad-", "a", "-acme", "acme-", "ac_me", "acme.com", "ac me"] {
            assert!(
                matches!(validate_subdomain(bad), Err(ExportError::InvalidSubdomain(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_endpoint_url() {
        let exporter = ArticleExporter::new(
            HelpCenterClient::default(),
            "https://{subdomain}.zendesk.com/api/v2/help_center/",
        );

        assert_eq!(
            exporter.endpoint_url("acme", ResourceKind::Articles),
            "https://acme.zendesk.com/api/v2/help_center/articles.json"
        );
        assert_eq!(
            exporter.endpoint_url("acme", ResourceKind::Categories),
            "https://acme.zendesk.com/api/v2/help_center/categories.json"
        );
    }

    #[test]
    fn test_build_rows_joins_section_and_category() {
        let rows = build_rows(
            vec![article("1", Some("10"), &["billing", "faq"])],
            &[section("10", "Payments", Some("100"))],
            &[category("100", "Account")],
        )
        .unwrap();

        assert_eq!(
            rows,
            vec![ExportRow {
                id: "1".to_string(),
                title: "Article 1".to_string(),
                url: "https://support.acme.zendesk.com/hc/articles/1".to_string(),
                created: "January 05, 2024".to_string(),
                section: "Payments".to_string(),
                category: "Account".to_string(),
                labels: "billing, faq".to_string(),
            }]
        );
    }

    #[test]
    fn test_build_rows_missing_references_are_empty() {
        let rows = build_rows(
            vec![
                article("1", None, &[]),
                article("2", Some("99"), &[]),
                article("3", Some("10"), &[]),
            ],
            &[section("10", "Orphaned", Some("404")), section("11", "Loose", None)],
            &[],
        )
        .unwrap();

        assert_eq!((rows[0].section.as_str(), rows[0].category.as_str()), ("", ""));
        assert_eq!((rows[1].section.as_str(), rows[1].category.as_str()), ("", ""));
        assert_eq!((rows[2].section.as_str(), rows[2].category.as_str()), ("Orphaned", ""));
        assert_eq!(rows[0].labels, "");
    }

    #[test]
    fn test_build_rows_collapses_duplicate_ids() {
        let mut updated = article("1", None, &[]);
        updated.title = "Updated".to_string();

        let rows = build_rows(
            vec![article("1", None, &[]), article("2", None, &[]), updated],
            &[],
            &[],
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].title, "Updated");
        assert_eq!(rows[1].id, "2");
    }

    #[test]
    fn test_build_rows_malformed_date_aborts() {
        let mut bad = article("1", None, &[]);
        bad.created_at = "2024-01-05T10:00:00.000Z".to_string();

        let result = build_rows(vec![article("2", None, &[]), bad], &[], &[]);
        assert!(matches!(result, Err(ExportError::MalformedDate(_))));
    }

    #[test]
    fn test_write_csv_header_comes_from_export_headers() {
        let csv = String::from_utf8(write_csv(&[]).unwrap()).unwrap();
        assert_eq!(csv, "ID,Article title,URL,Created,Section,Category,Labels\n");
    }

    #[test]
    fn test_write_csv_quotes_fields() {
        let rows = vec![ExportRow {
            id: "7".to_string(),
            title: "Refunds, returns and \"exchanges\"".to_string(),
            url: "https://support.acme.zendesk.com/hc/articles/7".to_string(),
            created: "March 02, 2023".to_string(),
            section: "Orders".to_string(),
            category: "Shop".to_string(),
            labels: "refund, policy".to_string(),
        }];

        let csv = String::from_utf8(write_csv(&rows).unwrap()).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("ID,Article title,URL,Created,Section,Category,Labels"));
        assert_eq!(
            lines.next(),
            Some("7,\"Refunds, returns and \"\"exchanges\"\"\",https://support.acme.zendesk.com/hc/articles/7,\"March 02, 2023\",Orders,Shop,\"refund, policy\"")
        );
        assert_eq!(lines.next(), None);
    }

    #[tokio::test]
    async fn test_export_end_to_end() {
        let server = MockServer::start().await;

        mount_json(&server, "/acme/api/v2/help_center/articles.json", json!({
            "articles": [
                {"id": 1, "title": "Reset password", "html_url": "https://acme.zendesk.com/hc/en-us/articles/1-Reset",
                 "created_at": "2024-01-05T10:00:00Z", "section_id": 10, "label_names": ["login"]},
                {"id": 2, "title": "Unfiled", "html_url": "https://acme.zendesk.com/hc/en-us/articles/2-Unfiled",
                 "created_at": "2023-06-30T08:15:00Z", "section_id": null, "label_names": []}
            ],
            "next_page": null
        })).await;
        mount_json(&server, "/acme/api/v2/help_center/sections.json", json!({
            "sections": [{"id": 10, "name": "Account", "category_id": 100}],
            "next_page": null
        })).await;
        mount_json(&server, "/acme/api/v2/help_center/categories.json", json!({
            "categories": [{"id": "100", "name": "General"}]
        })).await;

        let export = exporter_for(&server).export("acme").await.unwrap();

        assert_eq!(export.filename, "zendesk_articles.csv");
        assert_eq!(export.rows, 2);

        let mut reader = csv::Reader::from_reader(export.body.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        assert_eq!(
            records[0].iter().collect::<Vec<_>>(),
            vec!["1", "Reset password", "https://support.acme.zendesk.com/hc/articles/1", "January 05, 2024", "Account", "General", "login"]
        );
        assert_eq!(
            records[1].iter().collect::<Vec<_>>(),
            vec!["2", "Unfiled", "https://support.acme.zendesk.com/hc/articles/2", "June 30, 2023", "", "", ""]
        );
    }

    #[tokio::test]
    async fn test_export_no_articles() {
        let server = MockServer::start().await;

        mount_json(&server, "/acme/api/v2/help_center/articles.json", json!({"articles": [], "next_page": null})).await;
        mount_json(&server, "/acme/api/v2/help_center/sections.json", json!({"sections": []})).await;
        mount_json(&server, "/acme/api/v2/help_center/categories.json", json!({"categories": []})).await;

        let result = exporter_for(&server).export("acme").await;
        assert!(matches!(result, Err(ExportError::NoArticles)));
    }

    #[tokio::test]
    async fn test_export_unauthorized_articles() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/private/api/v2/help_center/articles.json"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/private/api/v2/help_center/sections.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sections": []})))
            .expect(0)
            .mount(&server)
            .await;

        let result = exporter_for(&server).export("private").await;
        assert!(matches!(result, Err(ExportError::AuthRequired)));
    }

    #[tokio::test]
    async fn test_export_invalid_subdomain_makes_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = exporter_for(&server).export("-bad-").await;
        assert!(matches!(result, Err(ExportError::InvalidSubdomain(_))));
    }
}
