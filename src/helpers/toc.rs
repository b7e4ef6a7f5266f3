//! Table of contents generator

use super::html::html_escape;
use crate::content::Heading;

/// Render nested ordered lists linking to each heading up to `max_depth`.
/// Nesting starts at the shallowest heading level present and deepens by
/// at most one list per heading, so skipped levels do not add empty lists.
pub fn toc(headings: &[Heading], max_depth: u8) -> String {
    let headings: Vec<_> = headings.iter().filter(|h| h.level <= max_depth).collect();
    let Some(base) = headings.iter().map(|h| h.level).min() else {
        return String::new();
    };

    let mut html = r#"<ol class="toc">"#.to_string();
    let mut depth = base;
    let mut item_open = false;

    for heading in headings {
        let level = if item_open {
            heading.level.min(depth + 1)
        } else {
            base
        };

        if level > depth {
            html.push_str("<ol>");
            depth = level;
        } else {
            if item_open {
                html.push_str("</li>");
            }
            while depth > level {
                html.push_str("</ol></li>");
                depth -= 1;
            }
        }

        html.push_str(&format!(
            r##"<li class="toc-item toc-level-{}"><a class="toc-link" href="#{}"><span class="toc-text">{}</span></a>"##,
            heading.level,
            html_escape(&heading.id),
            html_escape(&heading.text)
        ));
        item_open = true;
    }

    html.push_str("</li>");
    while depth > base {
        html.push_str("</ol></li>");
        depth -= 1;
    }
    html.push_str("</ol>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, id: &str) -> Heading {
        Heading {
            level,
            id: id.to_string(),
            text: id.to_uppercase(),
        }
    }

    #[test]
    fn test_toc_empty() {
        assert_eq!(toc(&[], 3), "");
        assert_eq!(toc(&[heading(4, "deep")], 3), "");
    }

    #[test]
    fn test_toc_nesting() {
        let headings = vec![heading(2, "a"), heading(3, "b"), heading(2, "c")];
        let html = toc(&headings, 3);
        assert_eq!(
            html,
            concat!(
                r#"<ol class="toc">"#,
                r##"<li class="toc-item toc-level-2"><a class="toc-link" href="#a"><span class="toc-text">A</span></a>"##,
                r#"<ol>"#,
                r##"<li class="toc-item toc-level-3"><a class="toc-link" href="#b"><span class="toc-text">B</span></a></li>"##,
                r#"</ol></li>"#,
                r##"<li class="toc-item toc-level-2"><a class="toc-link" href="#c"><span class="toc-text">C</span></a></li>"##,
                r#"</ol>"#
            )
        );
    }

    #[test]
    fn test_toc_closes_open_levels() {
        let headings = vec![heading(1, "title"), heading(2, "x"), heading(3, "y")];
        let html = toc(&headings, 6);
        assert_eq!(html.matches("<ol").count(), html.matches("</ol>").count());
        assert_eq!(html.matches("<li").count(), html.matches("</li>").count());
        assert!(html.ends_with("</li></ol></li></ol></li></ol>"));
    }

    #[test]
    fn test_toc_skipped_levels() {
        let headings = vec![heading(2, "a"), heading(4, "b"), heading(2, "c")];
        let html = toc(&headings, 6);
        assert_eq!(html.matches("<li").count(), html.matches("</li>").count());
        assert_eq!(html.matches("<ol").count(), html.matches("</ol>").count());
        assert!(!html.contains("<ol><ol>"));
        assert!(html.contains(r#"<ol><li class="toc-item toc-level-4">"#));
        assert!(html.contains(r#"</ol></li><li class="toc-item toc-level-2">"#));

        let headings = vec![heading(3, "x"), heading(1, "y"), heading(3, "z")];
        let html = toc(&headings, 6);
        assert_eq!(html.matches("<li").count(), html.matches("</li>").count());
        assert_eq!(html.matches("<ol").count(), html.matches("</ol>").count());
    }

    #[test]
    fn test_toc_escapes_text() {
        let headings = vec![Heading {
            level: 2,
            id: "a-b".to_string(),
            text: "A <b> & B".to_string(),
        }];
        assert!(toc(&headings, 3).contains("A &lt;b&gt; &amp; B"));
    }
}
