//! A filesystem backed collection of plan documents
//!
//! The [`Corpus`] loads every markdown file under a root directory into a
//! flat, path-sorted list of [`Document`]s.

use std::{
    ffi::OsStr,
    fmt,
    path::{Component, Path, PathBuf},
};

use nonempty::NonEmpty;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use walkdir::{DirEntry, WalkDir};

use crate::{
    domain::{Catalog, Config, Document},
    storage::markdown::LoadError,
};

/// A filesystem backed collection of documents.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// The directory the documents were loaded from.
    root: PathBuf,
    config: Config,
    documents: Vec<Document>,
}

impl Corpus {
    /// Loads every document under `root`, using the configuration stored in
    /// the root (or defaults).
    ///
    /// # Errors
    ///
    /// See [`Corpus::load_with_config`].
    pub fn load(root: PathBuf) -> Result<Self, CorpusLoadError> {
        let config = Config::load_or_default(&root);
        Self::load_with_config(root, config)
    }

    /// Loads every document under `root` using the given configuration.
    ///
    /// Files are read in parallel. Document paths are relative to `root`, and
    /// the documents are sorted by path.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusLoadError::NotADirectory`] if `root` is not a
    /// directory. If `allow_unreadable` is `false` (the default), any markdown
    /// file or subdirectory that cannot be read returns
    /// [`CorpusLoadError::UnreadableFiles`]; otherwise such entries are logged
    /// and skipped.
    pub fn load_with_config(root: PathBuf, config: Config) -> Result<Self, CorpusLoadError> {
        if !root.is_dir() {
            return Err(CorpusLoadError::NotADirectory(root));
        }

        let (md_paths, mut failures) = collect_markdown_paths(&root, &config);
        tracing::debug!("found {} markdown files under {}", md_paths.len(), root.display());

        let (documents, read_failures): (Vec<_>, Vec<_>) = md_paths
            .par_iter()
            .map(|path| Document::load(&root, path).map_err(|e| (path.clone(), e)))
            .partition(Result::is_ok);

        let mut documents: Vec<_> = documents.into_iter().filter_map(Result::ok).collect();
        failures.extend(read_failures.into_iter().filter_map(Result::err));

        if let Some(failures) = NonEmpty::from_vec(failures) {
            if !config.allow_unreadable {
                return Err(CorpusLoadError::UnreadableFiles(failures));
            }
            for (path, e) in failures.iter() {
                tracing::warn!("skipping unreadable file {}: {e}", path.display());
            }
        }

        documents.sort_by(|a, b| a.path().cmp(b.path()));

        Ok(Self {
            root,
            config,
            documents,
        })
    }

    /// The corpus root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The configuration the corpus was loaded with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// All documents, sorted by path.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Finds a document by its root-relative path.
    ///
    /// Files the walk did not pick up (excluded names, hidden directories,
    /// nested files outside recursive mode) are never found.
    #[must_use]
    pub fn find(&self, path: &Path) -> Option<&Document> {
        let path: PathBuf = path
            .components()
            .filter(|component| !matches!(component, Component::CurDir))
            .collect();
        self.documents
            .binary_search_by(|document| document.path().cmp(path.as_path()))
            .ok()
            .map(|index| &self.documents[index])
    }

    /// Groups the documents into a category catalog using the configured
    /// category order.
    #[must_use]
    pub fn catalog(&self) -> Catalog {
        Catalog::build(&self.documents, self.config.category_order())
    }
}

/// Errors that can occur when loading a corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusLoadError {
    /// The corpus root does not exist or is not a directory.
    NotADirectory(PathBuf),
    /// Some markdown files could not be read.
    UnreadableFiles(NonEmpty<(PathBuf, LoadError)>),
}

impl fmt::Display for CorpusLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MAX_DISPLAY: usize = 5;

        match self {
            Self::NotADirectory(root) => write!(f, "{} is not a directory", root.display()),
            Self::UnreadableFiles(failures) => {
                write!(f, "Unreadable files: ")?;

                let total = failures.len();

                let displayed_paths: Vec<String> = failures
                    .iter()
                    .take(MAX_DISPLAY)
                    .map(|(p, _e)| p.display().to_string())
                    .collect();

                let msg = displayed_paths.join(", ");

                if total <= MAX_DISPLAY {
                    write!(f, "{msg}")
                } else {
                    write!(f, "{msg}... (and {} more)", total - MAX_DISPLAY)
                }
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn collect_markdown_paths(
    root: &Path,
    config: &Config,
) -> (Vec<PathBuf>, Vec<(PathBuf, LoadError)>) {
    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let relative = |path: &Path| path.strip_prefix(root).unwrap_or(path).to_path_buf();

    let mut paths = Vec::new();
    let mut failures = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        // Skip hidden directories such as `.git` and the config directory
        .filter_entry(|entry| !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map_or_else(|| root.to_path_buf(), relative);
                failures.push((path, LoadError::Io(e.into())));
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.path().extension() != Some(OsStr::new("md")) {
            continue;
        }

        let excluded = entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_excluded(name));
        if excluded {
            tracing::trace!("excluding {}", entry.path().display());
            continue;
        }

        paths.push(relative(entry.path()));
    }

    (paths, failures)
}
