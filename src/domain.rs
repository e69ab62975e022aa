//! Domain models for the plan index.
//!
//! This module contains the document model, the heading tree, the category
//! catalog and configuration.

/// Category catalog built from document front matter.
pub mod catalog;
pub use catalog::{Catalog, Category, Entry, Field, Skipped};

mod config;
pub use config::{Config, ConfigError, CONFIG_DIR, CONFIG_FILE};

mod document;
pub use document::{Document, FrontMatter, Record};

/// Heading tree extraction.
pub mod heading;
pub use heading::Heading;
