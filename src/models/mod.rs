//! Data models
//!
//! Help Center records as returned by the upstream API and the CSV row
//! derived from them. All values are transient: built per export request
//! and dropped once the CSV has been sent.

mod article;
mod category;
mod export_row;
mod resource;
mod section;

pub use article::Article;
pub use category::Category;
pub use export_row::{ExportRow, EXPORT_HEADERS};
pub use resource::{ResourceId, ResourceKind};
pub use section::Section;
