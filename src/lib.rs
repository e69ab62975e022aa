//! Front-matter and outline index for Markdown learning plans
//!
//! Plans are markdown documents stored in a directory, each optionally
//! starting with a YAML front-matter block.

pub mod domain;
pub use domain::{Catalog, Config, Document, FrontMatter, Heading};

/// Filesystem loading and README generation.
pub mod storage;
pub use storage::{Corpus, CorpusLoadError, LoadError};
