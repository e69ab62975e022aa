//! ATX heading extraction.
//!
//! Headings are collected from a Markdown body line by line and folded into a
//! tree: each heading becomes a child of the nearest preceding heading with a
//! smaller level, or a root when there is none. Lines inside fenced code
//! blocks are never headings.

use serde::Serialize;

/// A node in a document's heading tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// The heading level, from 1 (`#`) to 6 (`######`).
    pub level: u8,
    /// The heading text, trimmed and without any closing `#` sequence.
    pub text: String,
    /// Headings nested under this one, in document order.
    pub children: Vec<Heading>,
}

impl Heading {
    /// Creates a heading with no children.
    #[must_use]
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            children: Vec::new(),
        }
    }
}

/// Extracts the heading tree from a Markdown body.
///
/// Malformed or missing headings yield an empty tree. Level skips (for
/// example `#` followed directly by `###`) are not errors; the deeper heading
/// is nested under the nearest shallower one.
#[must_use]
pub fn extract(body: &str) -> Vec<Heading> {
    let mut builder = TreeBuilder::default();
    let mut fence: Option<Fence> = None;

    for line in body.lines() {
        if let Some(open) = &fence {
            if open.is_closed_by(line) {
                fence = None;
            }
            continue;
        }

        if let Some(open) = Fence::open(line) {
            fence = Some(open);
            continue;
        }

        if let Some((level, text)) = parse_atx(line) {
            builder.push(Heading::new(level, text));
        }
    }

    builder.finish()
}

/// Iterates over a heading forest in document order (pre-order).
///
/// The sequence of `text` values produced is exactly the sequence of heading
/// lines in the source body.
#[must_use]
pub fn flatten(headings: &[Heading]) -> Iter<'_> {
    Iter {
        stack: headings.iter().rev().collect(),
    }
}

/// Pre-order iterator over a heading tree.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Heading>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Heading;

    fn next(&mut self) -> Option<Self::Item> {
        let heading = self.stack.pop()?;
        self.stack.extend(heading.children.iter().rev());
        Some(heading)
    }
}

/// A heading nested more than one level deeper than its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSkip {
    /// The level of the enclosing heading.
    pub parent_level: u8,
    /// The level of the offending heading.
    pub level: u8,
    /// The text of the offending heading.
    pub text: String,
}

/// Finds headings that jump more than one level below their parent.
///
/// Skipping levels is an authoring convention violation, never a parse
/// error.
#[must_use]
pub fn level_skips(headings: &[Heading]) -> Vec<LevelSkip> {
    let mut skips = Vec::new();
    for parent in flatten(headings) {
        skips.extend(
            parent
                .children
                .iter()
                .filter(|child| child.level > parent.level + 1)
                .map(|child| LevelSkip {
                    parent_level: parent.level,
                    level: child.level,
                    text: child.text.clone(),
                }),
        );
    }
    skips
}

#[derive(Debug, Default)]
struct TreeBuilder {
    roots: Vec<Heading>,
    open: Vec<Heading>,
}

impl TreeBuilder {
    fn push(&mut self, heading: Heading) {
        while self
            .open
            .last()
            .is_some_and(|last| last.level >= heading.level)
        {
            self.close_last();
        }
        self.open.push(heading);
    }

    fn close_last(&mut self) {
        if let Some(done) = self.open.pop() {
            match self.open.last_mut() {
                Some(parent) => parent.children.push(done),
                None => self.roots.push(done),
            }
        }
    }

    fn finish(mut self) -> Vec<Heading> {
        while !self.open.is_empty() {
            self.close_last();
        }
        self.roots
    }
}

/// Splits off up to three spaces of indentation.
fn strip_indent(line: &str) -> Option<&str> {
    let rest = line.trim_start_matches(' ');
    (line.len() - rest.len() <= 3).then_some(rest)
}

/// Parses an ATX heading line into its level and text.
fn parse_atx(line: &str) -> Option<(u8, &str)> {
    let rest = strip_indent(line)?;
    let after_hashes = rest.trim_start_matches('#');
    let hashes = rest.len() - after_hashes.len();

    if !(1..=6).contains(&hashes) {
        return None;
    }
    if !(after_hashes.is_empty() || after_hashes.starts_with([' ', '\t'])) {
        return None;
    }

    let level = u8::try_from(hashes).ok()?;
    Some((level, strip_closing_sequence(after_hashes.trim())))
}

/// Removes an optional closing `#` sequence, which must be preceded by
/// whitespace unless it makes up the whole text.
fn strip_closing_sequence(text: &str) -> &str {
    let without = text.trim_end_matches('#');
    if without.is_empty() {
        without
    } else if without.ends_with([' ', '\t']) {
        without.trim_end()
    } else {
        text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

impl Fence {
    fn open(line: &str) -> Option<Self> {
        let rest = strip_indent(line)?;
        let marker = rest.chars().next().filter(|&c| matches!(c, '`' | '~'))?;
        let info = rest.trim_start_matches(marker);
        let len = rest.len() - info.len();

        // Backtick fences cannot carry backticks in their info string.
        if len < 3 || (marker == '`' && info.contains('`')) {
            return None;
        }
        Some(Self { marker, len })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let Some(rest) = strip_indent(line) else {
            return false;
        };
        let trailing = rest.trim_start_matches(self.marker);
        rest.len() - trailing.len() >= self.len && trailing.trim().is_empty()
    }
}
