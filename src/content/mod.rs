//! Content module - handles source discovery and Markdown processing

mod frontmatter;
mod markdown;
mod source;

pub use frontmatter::FrontMatter;
pub use markdown::{Fragment, Heading, MarkdownRenderer};
pub use source::{discover, SourceDocument};
