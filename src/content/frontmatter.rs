//! Front-matter parsing

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Optional metadata block at the top of a document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub lang: Option<String>,

    /// Fields the layouts do not use
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    ///
    /// A block that looks like front-matter but fails to parse is an error;
    /// a leading `---` that is not followed by `key: value` lines is a
    /// thematic break and left in the content.
    pub fn parse(content: &str) -> Result<(Self, &str), String> {
        let trimmed = content.trim_start();

        if trimmed.starts_with("---") {
            return Self::parse_yaml(content, trimmed);
        }

        if let Some(rest) = trimmed.strip_prefix(";;;") {
            return Self::parse_json(rest);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml<'a>(original: &'a str, content: &'a str) -> Result<(Self, &'a str), String> {
        let rest = content[3..].trim_start_matches([' ', '\t']);
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            // `---` followed by text on the same line is not a delimiter
            return Ok((FrontMatter::default(), original));
        };

        let Some(end_pos) = find_closing_delimiter(rest) else {
            return Ok((FrontMatter::default(), original));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos..]
            .trim_start_matches('\n')
            .strip_prefix("---")
            .unwrap_or_default()
            .trim_start_matches([' ', '\t', '\r', '\n']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        if !has_yaml_structure(yaml_content) {
            return Ok((FrontMatter::default(), original));
        }

        serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map(|fm| (fm, remaining))
            .map_err(|e| format!("Failed to parse YAML front-matter: {}", e))
    }

    fn parse_json(rest: &str) -> Result<(Self, &str), String> {
        let Some(end_pos) = rest.find(";;;") else {
            return Err("Unterminated JSON front-matter".to_string());
        };

        let json_content = rest[..end_pos].trim();
        let remaining = rest[end_pos + 3..].trim_start_matches(['\r', '\n']);

        // `;;; ... ;;;` wraps the members of an object without braces
        let json_content = if json_content.starts_with('{') {
            json_content.to_string()
        } else {
            format!("{{{}}}", json_content)
        };

        serde_json::from_str::<FrontMatter>(&json_content)
            .map(|fm| (fm, remaining))
            .map_err(|e| format!("Failed to parse JSON front-matter: {}", e))
    }
}

/// Byte offset of the line break preceding the closing `---` (0 when the
/// block is empty)
fn find_closing_delimiter(rest: &str) -> Option<usize> {
    let mut offset: usize = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some(offset.saturating_sub(1));
        }
        offset += line.len();
    }
    None
}

/// Whether a block holds `key: value` lines rather than prose
fn has_yaml_structure(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }

        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");

        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}
