//! Category catalog of plan documents.
//!
//! Only documents declaring a non-empty `title`, `category` and
//! `description` make it into the catalog. Everything else is reported as
//! [`Skipped`].

use std::{collections::BTreeMap, fmt};

use non_empty_string::NonEmptyString;
use nonempty::NonEmpty;

use crate::domain::Document;

/// A single catalog line: one document with all required fields present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    title: NonEmptyString,
    description: NonEmptyString,
    path: String,
}

impl Entry {
    /// The document title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// The document description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// The document path, `/`-separated.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// A named group of catalog entries. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    entries: NonEmpty<Entry>,
}

impl Category {
    /// The category name, as written in front matter.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in case-insensitive title order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// The number of entries in this category.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a category has at least one entry.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// A front-matter field the catalog requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    /// `title`
    Title,
    /// `category`
    Category,
    /// `description`
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Description => "description",
        };
        f.write_str(name)
    }
}

/// A document left out of the catalog, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// The document has no front-matter block. Holds the `/`-separated path.
    NoFrontMatter(String),
    /// The document's front matter lacks required fields, or has them empty.
    MissingFields {
        /// The document path, `/`-separated.
        path: String,
        /// The absent or empty fields, in declaration order.
        fields: Vec<Field>,
    },
}

impl Skipped {
    /// The path of the skipped document, `/`-separated.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NoFrontMatter(path) | Self::MissingFields { path, .. } => path,
        }
    }
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFrontMatter(path) => {
                write!(f, "{path} has no front matter")
            }
            Self::MissingFields { path, fields } => {
                let fields: Vec<_> = fields.iter().map(ToString::to_string).collect();
                write!(
                    f,
                    "{path} missing required front matter fields: {}",
                    fields.join(", ")
                )
            }
        }
    }
}

/// Documents grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: Vec<Category>,
    skipped: Vec<Skipped>,
}

impl Catalog {
    /// Groups documents into categories.
    ///
    /// Entries within a category are sorted by case-insensitive title; ties
    /// keep input order. Categories named in `category_order` come first in
    /// that order, followed by the rest alphabetically.
    pub fn build<'a>(
        documents: impl IntoIterator<Item = &'a Document>,
        category_order: &[String],
    ) -> Self {
        let mut groups: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
        let mut skipped = Vec::new();

        for document in documents {
            match classify(document) {
                Ok((category, entry)) => groups.entry(category).or_default().push(entry),
                Err(skip) => {
                    tracing::debug!("{skip}");
                    skipped.push(skip);
                }
            }
        }

        for entries in groups.values_mut() {
            entries.sort_by_cached_key(|entry| entry.title().to_lowercase());
        }

        let mut categories = Vec::with_capacity(groups.len());
        for name in category_order {
            if let Some(entries) = groups.remove(name) {
                categories.extend(Category::new(name.clone(), entries));
            }
        }
        categories.extend(
            groups
                .into_iter()
                .filter_map(|(name, entries)| Category::new(name, entries)),
        );

        Self {
            categories,
            skipped,
        }
    }

    /// Categories in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Documents left out of the catalog.
    #[must_use]
    pub fn skipped(&self) -> &[Skipped] {
        &self.skipped
    }

    /// The total number of catalog entries across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }
}

impl Category {
    fn new(name: String, entries: Vec<Entry>) -> Option<Self> {
        NonEmpty::from_vec(entries).map(|entries| Self { name, entries })
    }
}

fn required(value: Option<&str>) -> Option<NonEmptyString> {
    NonEmptyString::new(value?.trim().to_string()).ok()
}

fn classify(document: &Document) -> Result<(String, Entry), Skipped> {
    let path = document.link_path();
    if document.front_matter().is_none() {
        return Err(Skipped::NoFrontMatter(path));
    }

    let title = required(document.title());
    let category = required(document.category());
    let description = required(document.description());

    match (title, category, description) {
        (Some(title), Some(category), Some(description)) => Ok((
            category.as_str().to_string(),
            Entry {
                title,
                description,
                path,
            },
        )),
        (title, category, description) => {
            let fields = [
                (Field::Title, title.is_none()),
                (Field::Category, category.is_none()),
                (Field::Description, description.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect();
            Err(Skipped::MissingFields { path, fields })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn plan(path: &str, title: &str, category: &str) -> Document {
        Document::parse(
            path,
            &format!(
                "---\ntitle: \"{title}\"\ncategory: \"{category}\"\ndescription: About {title}\n---\n# {title}\n"
            ),
        )
    }

    fn names(catalog: &Catalog) -> Vec<&str> {
        catalog.categories().iter().map(Category::name).collect()
    }

    fn titles(category: &Category) -> Vec<&str> {
        category.entries().map(Entry::title).collect()
    }

    #[test]
    fn configured_order_then_alphabetical() {
        let documents = [
            plan("zig.md", "Zig", "Languages & Paradigms"),
            plan("k8s.md", "Kubernetes", "Infrastructure"),
            plan("misc.md", "Misc", "Zeta Topics"),
            plan("other.md", "Other", "Alpha Topics"),
            plan("boot.md", "Spring Boot", "Spring & Spring Boot"),
        ];

        let catalog = Catalog::build(&documents, Config::default().category_order());

        assert_eq!(
            names(&catalog),
            vec![
                "Spring & Spring Boot",
                "Infrastructure",
                "Languages & Paradigms",
                "Alpha Topics",
                "Zeta Topics",
            ]
        );
        assert_eq!(catalog.total(), 5);
        assert!(catalog.skipped().is_empty());
    }

    #[test]
    fn titles_sort_case_insensitively() {
        let documents = [
            plan("c.md", "redis Mastery", "Data & Messaging"),
            plan("a.md", "Apache Kafka", "Data & Messaging"),
            plan("b.md", "kafka streams", "Data & Messaging"),
        ];

        let catalog = Catalog::build(&documents, &[]);

        assert_eq!(
            titles(&catalog.categories()[0]),
            vec!["Apache Kafka", "kafka streams", "redis Mastery"]
        );
    }

    #[test]
    fn equal_titles_keep_input_order() {
        let documents = [
            plan("first.md", "Same", "Build Tools"),
            plan("second.md", "same", "Build Tools"),
        ];

        let catalog = Catalog::build(&documents, &[]);
        let paths: Vec<_> = catalog.categories()[0].entries().map(Entry::path).collect();

        assert_eq!(paths, vec!["first.md", "second.md"]);
    }

    #[test]
    fn documents_without_front_matter_are_skipped() {
        let documents = [Document::parse("notes.md", "# Just notes\n")];

        let catalog = Catalog::build(&documents, &[]);

        assert!(catalog.categories().is_empty());
        assert_eq!(
            catalog.skipped(),
            &[Skipped::NoFrontMatter("notes.md".to_string())]
        );
    }

    #[test]
    fn missing_and_empty_fields_are_reported() {
        let documents = [Document::parse(
            "linear.md",
            "---\ntitle: Linear assessment\ndescription: \"  \"\n---\n",
        )];

        let catalog = Catalog::build(&documents, &[]);

        assert_eq!(catalog.total(), 0);
        assert_eq!(
            catalog.skipped(),
            &[Skipped::MissingFields {
                path: "linear.md".to_string(),
                fields: vec![Field::Category, Field::Description],
            }]
        );
        assert_eq!(
            catalog.skipped()[0].to_string(),
            "linear.md missing required front matter fields: category, description"
        );
        assert_eq!(catalog.skipped()[0].path(), "linear.md");
    }

    #[test]
    fn skipped_paths_use_forward_slashes() {
        let documents = [Document::parse(
            std::path::Path::new("drafts").join("notes.md"),
            "# Just notes\n",
        )];

        let catalog = Catalog::build(&documents, &[]);

        assert_eq!(catalog.skipped()[0].path(), "drafts/notes.md");
        assert_eq!(
            catalog.skipped()[0].to_string(),
            "drafts/notes.md has no front matter"
        );
    }

    #[test]
    fn values_are_trimmed() {
        let documents = [Document::parse(
            "jj.md",
            "---\ntitle: \"  Jujutsu guide \"\ncategory: Build Tools\ndescription: VCS\n---\n",
        )];

        let catalog = Catalog::build(&documents, &[]);
        let entry = catalog.categories()[0].entries().next().unwrap();

        assert_eq!(entry.title(), "Jujutsu guide");
        assert_eq!(entry.description(), "VCS");
        assert_eq!(entry.path(), "jj.md");
    }

    #[test]
    fn empty_input_gives_empty_catalog() {
        let documents: [Document; 0] = [];
        let catalog = Catalog::build(&documents, Config::default().category_order());

        assert_eq!(catalog, Catalog::default());
        assert_eq!(catalog.total(), 0);
    }
}
