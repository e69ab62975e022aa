use std::{
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

/// Configuration for a plan corpus.
///
/// This controls which files are indexed, how catalog categories are
/// ordered, and where the generated README is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Categories listed in this order first in the catalog.
    ///
    /// Categories not listed here follow, sorted alphabetically.
    category_order: Vec<String>,

    /// File names that are never indexed, wherever they appear.
    excluded_files: Vec<String>,

    /// Whether to descend into subdirectories of the corpus root.
    pub recursive: bool,

    /// Whether markdown files that cannot be read are skipped instead of
    /// failing the whole load.
    pub allow_unreadable: bool,

    /// The top-level heading of the generated README.
    readme_title: String,

    /// The README file name, relative to the corpus root.
    readme_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            category_order: default_category_order(),
            excluded_files: default_excluded_files(),
            recursive: false,
            allow_unreadable: false,
            readme_title: default_readme_title(),
            readme_file: default_readme_file(),
        }
    }
}

/// The directory, relative to the corpus root, holding tool metadata.
pub const CONFIG_DIR: &str = ".plans";

/// The configuration file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// The configuration file location for a corpus rooted at `root`.
    #[must_use]
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration for a corpus, falling back to defaults if it
    /// is missing or invalid.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = Self::path_in(root);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Write)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// The preferred category order.
    #[must_use]
    pub fn category_order(&self) -> &[String] {
        &self.category_order
    }

    /// Checks whether a file name is excluded from indexing.
    ///
    /// The README file is always excluded.
    #[must_use]
    pub fn is_excluded(&self, file_name: &str) -> bool {
        self.excluded_files.iter().any(|f| f == file_name)
            || self.readme_file.file_name().is_some_and(|f| f == file_name)
    }

    /// The top-level heading of the generated README.
    #[must_use]
    pub fn readme_title(&self) -> &str {
        &self.readme_title
    }

    /// The README file name, relative to the corpus root.
    #[must_use]
    pub fn readme_file(&self) -> &Path {
        &self.readme_file
    }
}

/// Errors that can occur when loading or saving the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file: {0}")]
    Read(#[source] io::Error),
    /// The configuration file is not valid TOML for this schema.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The configuration file could not be written.
    #[error("Failed to write config file: {0}")]
    Write(#[source] io::Error),
}

fn default_category_order() -> Vec<String> {
    [
        "Spring & Spring Boot",
        "JVM Internals",
        "Build Tools",
        "Data & Messaging",
        "APIs & Protocols",
        "Observability",
        "Infrastructure",
        "Languages & Paradigms",
        "NewSQL",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_excluded_files() -> Vec<String> {
    vec!["README.md".to_string(), "CLAUDE.md".to_string()]
}

fn default_readme_title() -> String {
    "Claude Learning Plans".to_string()
}

fn default_readme_file() -> PathBuf {
    PathBuf::from("README.md")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_category_order")]
        category_order: Vec<String>,

        #[serde(default = "default_excluded_files")]
        excluded_files: Vec<String>,

        #[serde(default)]
        recursive: bool,

        #[serde(default)]
        allow_unreadable: bool,

        #[serde(default = "default_readme_title")]
        readme_title: String,

        #[serde(default = "default_readme_file")]
        readme_file: PathBuf,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                category_order,
                excluded_files,
                recursive,
                allow_unreadable,
                readme_title,
                readme_file,
            } => Self {
                category_order,
                excluded_files,
                recursive,
                allow_unreadable,
                readme_title,
                readme_file,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            category_order: config.category_order,
            excluded_files: config.excluded_files,
            recursive: config.recursive,
            allow_unreadable: config.allow_unreadable,
            readme_title: config.readme_title,
            readme_file: config.readme_file,
        }
    }
}
