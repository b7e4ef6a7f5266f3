//! Built-in page layouts using the Tera template engine
//!
//! Every layout is embedded in the binary: one shared page template plus a
//! stylesheet per layout. `Layout::None` uses a bare template without any
//! styling.

use serde::Serialize;
use std::fmt;
use tera::{Context, Tera};

/// A named layout applied uniformly to all rendered documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Minimal HTML document around the raw fragment
    None,
    /// GitHub-style rendered Markdown
    Github,
    /// Light gray book-like page
    MixuGray,
    /// Solarized light palette
    SolarizedLight,
    /// Solarized dark palette
    SolarizedDark,
}

impl Layout {
    /// All supported layouts
    pub const ALL: [Layout; 5] = [
        Layout::None,
        Layout::Github,
        Layout::MixuGray,
        Layout::SolarizedLight,
        Layout::SolarizedDark,
    ];

    /// Stable layout name
    pub fn name(self) -> &'static str {
        match self {
            Layout::None => "none",
            Layout::Github => "github",
            Layout::MixuGray => "mixu-gray",
            Layout::SolarizedLight => "thomasf-solarizedcsslight",
            Layout::SolarizedDark => "thomasf-solarizedcssdark",
        }
    }

    /// Embedded stylesheet, if the layout has one
    pub fn stylesheet(self) -> Option<&'static str> {
        match self {
            Layout::None => None,
            Layout::Github => Some(include_str!("layouts/github.css")),
            Layout::MixuGray => Some(include_str!("layouts/mixu-gray.css")),
            Layout::SolarizedLight => Some(include_str!("layouts/solarized-light.css")),
            Layout::SolarizedDark => Some(include_str!("layouts/solarized-dark.css")),
        }
    }

    /// Syntect theme matching the layout's palette
    pub fn highlight_theme(self) -> &'static str {
        match self {
            Layout::None | Layout::Github => "InspiredGitHub",
            Layout::MixuGray => "base16-ocean.light",
            Layout::SolarizedLight => "Solarized (light)",
            Layout::SolarizedDark => "Solarized (dark)",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Layout::None => "bare.html",
            _ => "page.html",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data passed to the page templates
#[derive(Debug, Clone, Serialize)]
pub struct PageData {
    /// Page title (plain text, escaped by the template)
    pub title: String,
    /// Optional meta description
    pub description: Option<String>,
    /// Document language
    pub lang: String,
    /// Rendered HTML fragment
    pub content: String,
    /// Rendered table of contents, if enabled
    pub toc: Option<String>,
}

/// Applies layouts to rendered fragments
pub struct LayoutEngine {
    tera: Tera,
}

impl LayoutEngine {
    /// Create an engine with all built-in layouts loaded
    pub fn new() -> tera::Result<Self> {
        let mut tera = Tera::default();

        // Content is already HTML; the templates escape text fields explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("page.html", include_str!("layouts/page.html")),
            ("bare.html", include_str!("layouts/bare.html")),
        ])?;

        Ok(Self { tera })
    }

    /// Wrap a page's content in the named layout
    pub fn apply(&self, page: &PageData, layout: Layout) -> tera::Result<String> {
        let mut context = Context::from_serialize(page)?;
        context.insert("layout", layout.name());
        context.insert("stylesheet", layout.stylesheet().unwrap_or_default());

        self.tera.render(layout.template(), &context)
    }
}
