/// Filesystem loading of a directory of plan documents.
pub mod corpus;
/// Front-matter splitting and parsing.
pub mod markdown;
/// README generation.
pub mod readme;

pub use corpus::{Corpus, CorpusLoadError};
pub use markdown::{LoadError, Split};
