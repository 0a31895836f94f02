//! Page rendering
//!
//! Site pages are Tera templates embedded into the binary together with
//! their static assets, so the server and the freezer need no files on
//! disk at runtime.

use chrono::Datelike;
use rust_embed::RustEmbed;
use serde::Serialize;
use std::error::Error as StdError;
use tera::{Context as TeraContext, Tera};

mod error;
pub mod freeze;

pub use error::ThemeError;
pub use freeze::freeze_site;

/// Embedded page templates
#[derive(RustEmbed)]
#[folder = "templates/"]
#[include = "*.html"]
struct SiteTemplates;

/// Embedded static assets (scripts, stylesheets)
#[derive(RustEmbed)]
#[folder = "static/"]
pub struct SiteAssets;

/// The static pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitePage {
    Home,
    Writing,
    Design,
    Process,
}

impl SitePage {
    pub const ALL: [SitePage; 4] = [
        SitePage::Home,
        SitePage::Writing,
        SitePage::Design,
        SitePage::Process,
    ];

    /// Template file rendered for this page
    pub fn template(&self) -> &'static str {
        match self {
            SitePage::Home => "index.html",
            SitePage::Writing => "writing.html",
            SitePage::Design => "design.html",
            SitePage::Process => "process.html",
        }
    }

    /// Canonical URL path, with trailing slash for nested pages
    pub fn path(&self) -> &'static str {
        match self {
            SitePage::Home => "/",
            SitePage::Writing => "/writing/",
            SitePage::Design => "/design/",
            SitePage::Process => "/process_page/",
        }
    }

    /// Link prefix that reaches the site root from this page when the
    /// site is browsed as plain files
    pub fn relative_root(&self) -> &'static str {
        match self {
            SitePage::Home => "./",
            _ => "../",
        }
    }
}

/// Variables available to every page template
#[derive(Debug, Clone, Serialize)]
pub struct PageVars {
    /// Prefix for internal links and assets (`/` when served)
    pub root: String,
    /// Canonical path of the page being rendered
    pub current_path: String,
    /// Current year (for copyright)
    pub year: i32,
}

impl PageVars {
    pub fn new(page: SitePage, root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            current_path: page.path().to_string(),
            year: chrono::Utc::now().year(),
        }
    }
}

/// Tera wrapper holding the site templates
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Load the templates compiled into the binary
    pub fn embedded() -> Result<Self, ThemeError> {
        let mut templates = Vec::new();
        for name in SiteTemplates::iter() {
            let file = SiteTemplates::get(&name)
                .ok_or_else(|| ThemeError::NotFound(name.to_string()))?;
            let content = String::from_utf8(file.data.into_owned())
                .map_err(|_| ThemeError::InvalidEncoding(name.to_string()))?;
            templates.push((name.to_string(), content));
        }
        Self::from_templates(templates)
    }

    /// Build a renderer from `(name, source)` pairs
    pub fn from_templates(mut templates: Vec<(String, String)>) -> Result<Self, ThemeError> {
        // Base templates first so children can resolve `extends`
        templates.sort_by(|a, b| {
            let a_is_base = a.0 == "base.html" || a.0.ends_with("/base.html");
            let b_is_base = b.0 == "base.html" || b.0.ends_with("/base.html");
            b_is_base.cmp(&a_is_base)
        });

        let mut tera = Tera::default();
        for (name, content) in templates {
            tera.add_raw_template(&name, &content)
                .map_err(|e| ThemeError::TemplateError(format!("Failed to add template {}: {}", name, e)))?;
        }
        tera.build_inheritance_chains()
            .map_err(|e| ThemeError::TemplateError(format!("Failed to build template inheritance: {}", e)))?;

        tracing::debug!("Loaded {} templates", tera.get_template_names().count());
        Ok(Self { tera })
    }

    /// Render a page with the standard variables
    pub fn render_page(&self, page: SitePage, vars: &PageVars) -> Result<String, ThemeError> {
        let mut context = TeraContext::new();
        context.insert("root", &vars.root);
        context.insert("current_path", &vars.current_path);
        context.insert("year", &vars.year);
        self.render(page.template(), &context)
    }

    /// Render a template by name
    pub fn render(&self, template: &str, context: &TeraContext) -> Result<String, ThemeError> {
        if !self.tera.get_template_names().any(|name| name == template) {
            return Err(ThemeError::NotFound(template.to_string()));
        }

        self.tera.render(template, context).map_err(|e| {
            let mut error_msg = format!("Failed to render '{}': {}", template, e);
            let mut source = e.source();
            while let Some(s) = source {
                error_msg.push_str(&format!("\n  Caused by: {}", s));
                source = s.source();
            }
            ThemeError::TemplateError(error_msg)
        })
    }
}
