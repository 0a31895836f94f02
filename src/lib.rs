//! Folio - personal portfolio site
//!
//! Serves the portfolio pages and a utility endpoint that exports a
//! Zendesk Help Center's articles to CSV.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod theme;
