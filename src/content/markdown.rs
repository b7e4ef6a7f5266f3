//! Markdown rendering with syntax highlighting

use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd,
};
use regex::Regex;
use std::collections::HashMap;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::helpers::html_escape;

lazy_static! {
    /// Relative link to a Markdown file, with optional query or fragment
    static ref MARKDOWN_LINK: Regex =
        Regex::new(r"^(?P<path>[^:?#]*[^/:?#])\.(?i:md|markdown)(?P<suffix>[?#].*)?$").unwrap();
}

/// A heading found while rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: u8,
    /// Anchor id, unique within the document
    pub id: String,
    /// Plain text of the heading
    pub text: String,
}

/// HTML produced from one Markdown document, before any layout
#[derive(Debug, Clone)]
pub struct Fragment {
    pub html: String,
    /// Text of the first level-1 heading
    pub title: Option<String>,
    pub headings: Vec<Heading>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

/// Heading whose inline events are buffered until its id is known
struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    events: Vec<Event<'a>>,
    text: String,
}

struct PendingCodeBlock {
    lang: Option<String>,
    content: String,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("InspiredGitHub", true, false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, highlight: bool, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight,
            line_numbers,
        }
    }

    /// Render markdown to an HTML fragment
    pub fn render(&self, markdown: &str) -> Fragment {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut headings = Vec::new();
        let mut ids = HeadingIds::default();
        let mut heading: Option<PendingHeading> = None;
        let mut code_block: Option<PendingCodeBlock> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => code_language(&info),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(PendingCodeBlock {
                        lang,
                        content: String::new(),
                    });
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some(block) = code_block.as_mut() {
                        block.content.push_str(&text);
                    }
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(block) = code_block.take() {
                        let html = self.render_code_block(&block.content, block.lang.as_deref());
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    heading = Some(PendingHeading {
                        level,
                        id,
                        classes,
                        attrs,
                        events: Vec::new(),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(pending) = heading.take() {
                        let text = pending.text.trim().to_string();
                        let id = match pending.id {
                            Some(explicit) => ids.claim(&explicit),
                            None => ids.claim(&slug::slugify(&text)),
                        };

                        events.push(Event::Start(Tag::Heading {
                            level: pending.level,
                            id: Some(CowStr::from(id.clone())),
                            classes: pending.classes,
                            attrs: pending.attrs,
                        }));
                        events.extend(pending.events);
                        events.push(Event::End(TagEnd::Heading(pending.level)));

                        headings.push(Heading {
                            level: pending.level as u8,
                            id,
                            text,
                        });
                    }
                }
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    // Autolinks carry the bare address; the scheme is added on output
                    let dest_url = match link_type {
                        LinkType::Email | LinkType::Autolink => dest_url,
                        _ => rewrite_markdown_link(dest_url),
                    };
                    emit(
                        &mut heading,
                        &mut events,
                        Event::Start(Tag::Link {
                            link_type,
                            dest_url,
                            title,
                            id,
                        }),
                    );
                }
                other => {
                    if let Some(pending) = heading.as_mut() {
                        if let Event::Text(text) | Event::Code(text) = &other {
                            pending.text.push_str(text);
                        }
                    }
                    emit(&mut heading, &mut events, other);
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        let title = headings
            .iter()
            .find(|h| h.level == 1)
            .map(|h| h.text.clone())
            .filter(|t| !t.is_empty());

        Fragment {
            html: html_output,
            title,
            headings,
        }
    }

    fn render_code_block(&self, code: &str, lang: Option<&str>) -> String {
        let highlighted = match lang {
            Some(lang) if self.highlight => self.highlight_code(code, lang),
            _ => None,
        };

        match (highlighted, lang) {
            (Some(html), _) => html,
            (None, Some(lang)) => format!(
                "<pre><code class=\"language-{}\">{}</code></pre>\n",
                html_escape(lang),
                html_escape(code)
            ),
            (None, None) => format!("<pre><code>{}</code></pre>\n", html_escape(code)),
        }
    }

    /// Highlight a code block, or `None` when the language is unknown
    fn highlight_code(&self, code: &str, lang: &str) -> Option<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))?;
        let theme = self.theme()?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let regions = highlighter.highlight_line(line, &self.syntax_set).ok()?;
            lines.push(styled_line_to_highlighted_html(&regions[..], IncludeBackground::No).ok()?);
        }

        let lang = html_escape(lang);
        let background = theme
            .settings
            .background
            .map(|c| format!(" style=\"background-color:#{:02x}{:02x}{:02x};\"", c.r, c.g, c.b))
            .unwrap_or_default();

        if self.line_numbers {
            Some(self.add_line_numbers(&lines, &lang, &background))
        } else {
            Some(format!(
                "<pre class=\"highlight language-{}\"{}><code>{}</code></pre>\n",
                lang,
                background,
                lines.concat()
            ))
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, lines: &[String], lang: &str, background: &str) -> String {
        let gutter = (1..=lines.len())
            .map(|n| format!("<span class=\"line-number\">{}</span>", n))
            .collect::<Vec<_>>()
            .join("\n");
        let code = lines.concat();

        format!(
            "<figure class=\"highlight {}\"{}><table><tr><td class=\"gutter\"><pre>{}</pre></td><td class=\"code\"><pre>{}</pre></td></tr></table></figure>\n",
            lang,
            background,
            gutter,
            code.trim_end_matches('\n')
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Route an event into the open heading, if any
fn emit<'a>(heading: &mut Option<PendingHeading<'a>>, events: &mut Vec<Event<'a>>, event: Event<'a>) {
    match heading.as_mut() {
        Some(pending) => pending.events.push(event),
        None => events.push(event),
    }
}

/// Language token of a fence info string (`rust,ignore` -> `rust`)
fn code_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

/// Point relative links at the rendered `.html` page
fn rewrite_markdown_link(dest: CowStr<'_>) -> CowStr<'_> {
    if dest.starts_with("//") {
        return dest;
    }
    let rewritten = MARKDOWN_LINK.captures(&dest).map(|caps| {
        let suffix = caps.name("suffix").map_or("", |m| m.as_str());
        format!("{}.html{}", &caps["path"], suffix)
    });
    match rewritten {
        Some(url) => CowStr::from(url),
        None => dest,
    }
}

/// Unique heading ids within one document
#[derive(Default)]
struct HeadingIds {
    /// Ids handed out, mapped to the last suffix tried for that base
    seen: HashMap<String, usize>,
}

impl HeadingIds {
    fn claim(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "section" } else { base };

        let mut suffix = self.seen.get(base).copied().unwrap_or(0);
        let mut id = base.to_string();
        while self.seen.contains_key(&id) {
            suffix += 1;
            id = format!("{}-{}", base, suffix);
        }

        self.seen.insert(base.to_string(), suffix);
        self.seen.entry(id.clone()).or_insert(0);
        id
    }
}
