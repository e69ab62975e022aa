use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{
    domain::heading::{self, Heading},
    storage::markdown::{self, LoadError, Split},
};

/// The metadata fields a document may declare in its front matter.
///
/// Every field is optional. A field that is present is a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    /// The document title.
    pub title: Option<String>,
    /// The catalog category the document belongs to.
    pub category: Option<String>,
    /// A one-line summary of the document.
    pub description: Option<String>,
}

impl FrontMatter {
    /// Returns `true` if none of the fields are set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.description.is_none()
    }
}

/// A Markdown document with optional front matter.
///
/// A document is read once and never modified. The heading tree is
/// extracted from the body at parse time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    front_matter: Option<FrontMatter>,
    body: String,
    headings: Vec<Heading>,
}

impl Document {
    /// Parses a document from its raw text.
    ///
    /// This never fails. Text without a complete front-matter block is all
    /// body.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Self {
        let Split { front_matter, body } = markdown::split(content);

        Self {
            path: path.into(),
            front_matter: front_matter.map(markdown::parse_fields),
            body: body.to_string(),
            headings: heading::extract(body),
        }
    }

    /// Reads and parses the document at `root/path`.
    ///
    /// The document keeps `path` as its identifier, so passing a path relative
    /// to `root` yields a root-relative document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NotFound`] if the file does not exist, and
    /// [`LoadError::Io`] if it cannot be read or is not valid UTF-8.
    pub fn load(root: &Path, path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(root.join(path)).map_err(|io_error| {
            match io_error.kind() {
                io::ErrorKind::NotFound => LoadError::NotFound,
                _ => LoadError::Io(io_error),
            }
        })?;

        tracing::trace!("read {} bytes from {}", content.len(), path.display());
        Ok(Self::parse(path, &content))
    }

    /// The path identifying this document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path with components joined by `/`, regardless of platform.
    #[must_use]
    pub fn link_path(&self) -> String {
        self.path
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// The parsed front matter, or `None` if the document has no front-matter
    /// block.
    #[must_use]
    pub const fn front_matter(&self) -> Option<&FrontMatter> {
        self.front_matter.as_ref()
    }

    /// The `title` front-matter field.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.front_matter.as_ref()?.title.as_deref()
    }

    /// The `category` front-matter field.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.front_matter.as_ref()?.category.as_deref()
    }

    /// The `description` front-matter field.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.front_matter.as_ref()?.description.as_deref()
    }

    /// Everything after the front-matter block.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The top-level headings of the body.
    #[must_use]
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// A serializable index record for this document.
    #[must_use]
    pub fn record(&self) -> Record<'_> {
        Record {
            path: self.link_path(),
            title: self.title(),
            category: self.category(),
            description: self.description(),
            headings: &self.headings,
        }
    }
}

/// The structured index record emitted for each document.
///
/// Absent front-matter fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record<'a> {
    /// The document path, `/`-separated.
    pub path: String,
    /// The `title` field.
    pub title: Option<&'a str>,
    /// The `category` field.
    pub category: Option<&'a str>,
    /// The `description` field.
    pub description: Option<&'a str>,
    /// The heading tree.
    pub headings: &'a [Heading],
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn front_matter_and_outline() {
        let document = Document::parse("plan.md", "---\ntitle: X\n---\n# A\n## B\n");

        assert_eq!(document.title(), Some("X"));
        assert_eq!(document.category(), None);
        assert_eq!(document.body(), "# A\n## B\n");
        assert_eq!(
            document.headings(),
            &[Heading {
                level: 1,
                text: "A".to_string(),
                children: vec![Heading::new(2, "B")],
            }]
        );
    }

    #[test]
    fn plain_text_is_all_body() {
        let input = "Some notes.\n\nNo headings here.\n";
        let document = Document::parse("notes.md", input);

        assert!(document.front_matter().is_none());
        assert!(document.headings().is_empty());
        assert_eq!(document.body(), input);
    }

    #[test]
    fn empty_file() {
        let document = Document::parse("empty.md", "");

        assert!(document.front_matter().is_none());
        assert_eq!(document.body(), "");
        assert!(document.headings().is_empty());
    }

    #[test]
    fn empty_block_is_present_but_empty() {
        let document = Document::parse("empty-block.md", "---\n---\n# Only\n");

        assert!(document.front_matter().is_some_and(FrontMatter::is_empty));
        assert_eq!(document.title(), None);
        assert_eq!(document.headings().len(), 1);
    }

    #[test]
    fn parsing_is_deterministic() {
        let input = "---\ntitle: Redis Mastery\ncategory: Data & Messaging\n---\n# Redis\n## Week 1\n";

        assert_eq!(
            Document::parse("redis.md", input),
            Document::parse("redis.md", input)
        );
    }

    #[test]
    fn record_shape() {
        let document = Document::parse(
            Path::new("plans").join("graphql.md"),
            "---\ntitle: GraphQL mastery plan\ncategory: APIs & Protocols\n---\n# GraphQL\n",
        );

        let json = serde_json::to_value(document.record()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "path": "plans/graphql.md",
                "title": "GraphQL mastery plan",
                "category": "APIs & Protocols",
                "description": null,
                "headings": [{"level": 1, "text": "GraphQL", "children": []}],
            })
        );
    }

    #[test]
    fn load_keeps_relative_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("datadog.md"),
            "---\ntitle: Datadog curriculum\n---\n# Datadog\n",
        )
        .unwrap();

        let document = Document::load(tmp.path(), Path::new("datadog.md")).unwrap();

        assert_eq!(document.path(), Path::new("datadog.md"));
        assert_eq!(document.title(), Some("Datadog curriculum"));
    }

    #[test]
    fn load_missing_file() {
        let tmp = TempDir::new().unwrap();

        let result = Document::load(tmp.path(), Path::new("missing.md"));

        assert!(matches!(result, Err(LoadError::NotFound)));
    }

    #[test]
    fn load_non_utf8_is_io_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let result = Document::load(tmp.path(), Path::new("binary.md"));

        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
