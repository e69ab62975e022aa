//! Front-matter splitting and field extraction.
//!
//! A front-matter block is recognised only when the very first line of a file
//! is `---` and a later line closes it with another `---`. Anything else,
//! including an unterminated block, leaves the whole input as the body.

use std::{io, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;

use crate::domain::FrontMatter;

/// The result of splitting raw file text at its front-matter delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split<'a> {
    /// The text between the delimiter lines, if a complete block was found.
    pub front_matter: Option<&'a str>,
    /// Everything after the closing delimiter line, or the whole input.
    pub body: &'a str,
}

/// Splits raw file text into its front-matter text and body.
///
/// This never fails. A leading UTF-8 byte-order mark is dropped. Without a
/// leading delimiter, or without a closing one, the front matter is `None` and
/// the body is the entire input.
#[must_use]
pub fn split(input: &str) -> Split<'_> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let no_block = Split {
        front_matter: None,
        body: input,
    };

    let mut lines = input.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return no_block;
    };
    if !is_delimiter(first) {
        return no_block;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let end = offset + line.len();
        if is_delimiter(line) {
            return Split {
                front_matter: Some(&input[start..offset]),
                body: &input[end..],
            };
        }
        offset = end;
    }

    tracing::debug!("unterminated front-matter block, treating the whole file as body");
    no_block
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Extracts `title`, `category` and `description` from front-matter text.
///
/// The text is read as a YAML mapping first. When that fails (stray colons in
/// an unquoted value, an unclosed flow collection, and so on) each top-level
/// `key: value` line is scanned instead, with one pair of matching quotes
/// removed from the value. Keys other than the three recognised ones are
/// ignored.
#[must_use]
pub fn parse_fields(text: &str) -> FrontMatter {
    if text.trim().is_empty() {
        return FrontMatter::default();
    }

    match serde_yaml::from_str::<RawFrontMatter>(text) {
        Ok(raw) => raw.into(),
        Err(e) => {
            tracing::debug!("front matter is not a plain YAML mapping ({e}), scanning lines");
            scan_lines(text)
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFrontMatter {
    title: Option<String>,
    category: Option<String>,
    description: Option<String>,
}

impl From<RawFrontMatter> for FrontMatter {
    fn from(raw: RawFrontMatter) -> Self {
        let RawFrontMatter {
            title,
            category,
            description,
        } = raw;
        Self {
            title,
            category,
            description,
        }
    }
}

static FIELD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w+)\s*:\s*(.+)$").expect("field pattern is valid"));

fn scan_lines(text: &str) -> FrontMatter {
    let mut front_matter = FrontMatter::default();

    for line in text.lines() {
        let Some(captures) = FIELD_LINE.captures(line.trim_end()) else {
            continue;
        };
        let value = unquote(captures[2].trim()).to_string();
        match &captures[1] {
            "title" => front_matter.title = Some(value),
            "category" => front_matter.category = Some(value),
            "description" => front_matter.description = Some(value),
            _ => {}
        }
    }

    front_matter
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
                .filter(|inner| !inner.is_empty())
        })
        .map_or(value, str::trim)
}

/// Errors that can occur when loading a document from disk.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The document file was not found.
    #[error("document not found")]
    NotFound,
    /// The file could not be read, or is not valid UTF-8.
    #[error("failed to read document: {0}")]
    Io(#[from] io::Error),
}
