//! Services layer - Business logic
//!
//! - Paginated Help Center fetching
//! - Article field formatting
//! - Article export orchestration and CSV rendering

pub mod export;
pub mod fetcher;
pub mod format;

pub use export::{validate_subdomain, ArticleExporter, CsvExport, ExportError};
pub use fetcher::HelpCenterClient;
pub use format::{format_created_date, join_labels, trim_article_url};
