//! Generator module - renders every source document into its output page

use std::fs;
use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::content::{FrontMatter, MarkdownRenderer, SourceDocument};
use crate::error::{BuildError, Result};
use crate::helpers::toc;
use crate::templates::{LayoutEngine, PageData};

/// Deepest heading level listed in a table of contents
const TOC_MAX_DEPTH: u8 = 3;

/// Language used when a document does not declare one
const DEFAULT_LANG: &str = "en";

/// Renders Markdown sources through the configured layout
pub struct Generator {
    config: BuildConfig,
    renderer: MarkdownRenderer,
    layouts: LayoutEngine,
}

impl Generator {
    /// Create a new generator
    pub fn new(config: &BuildConfig) -> Result<Self> {
        let renderer = MarkdownRenderer::with_options(
            config.layout.highlight_theme(),
            config.highlight.enable,
            config.highlight.line_number,
        );
        let layouts = LayoutEngine::new().map_err(|e| {
            BuildError::config(format!("Failed to load layouts: {:#}", anyhow::Error::from(e)))
        })?;

        Ok(Self {
            config: config.clone(),
            renderer,
            layouts,
        })
    }

    /// Render and write every source, stopping at the first failure.
    /// Returns the number of pages written.
    pub fn generate(&self, sources: &[SourceDocument]) -> Result<usize> {
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::io(&self.config.output_dir, e))?;

        for source in sources {
            self.generate_page(source)?;
        }

        Ok(sources.len())
    }

    /// Render one source and write it to its mirrored output path
    fn generate_page(&self, source: &SourceDocument) -> Result<PathBuf> {
        let bytes = fs::read(&source.path).map_err(|e| BuildError::io(&source.path, e))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| BuildError::render(&source.path, "content is not valid UTF-8"))?;

        let html = self.render_page(source, &text)?;

        let dest = self.config.output_dir.join(source.output_relative());
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::write(&dest, html).map_err(|e| BuildError::io(&dest, e))?;

        tracing::debug!("Generated: {:?}", dest);
        Ok(dest)
    }

    /// Render a document's Markdown and wrap it in the layout
    pub fn render_page(&self, source: &SourceDocument, text: &str) -> Result<String> {
        let (front_matter, body) =
            FrontMatter::parse(text).map_err(|e| BuildError::render(&source.path, e))?;

        let fragment = self.renderer.render(body);

        let toc = if self.config.toc {
            Some(toc(&fragment.headings, TOC_MAX_DEPTH)).filter(|t| !t.is_empty())
        } else {
            None
        };

        let page = PageData {
            title: front_matter
                .title
                .or(fragment.title)
                .unwrap_or_else(|| source.fallback_title()),
            description: front_matter.description,
            lang: front_matter
                .lang
                .unwrap_or_else(|| DEFAULT_LANG.to_string()),
            content: fragment.html,
            toc,
        };

        self.layouts.apply(&page, self.config.layout).map_err(|e| {
            BuildError::render(&source.path, format!("{:#}", anyhow::Error::from(e)))
        })
    }
}
