//! README generation from a [`Catalog`].

use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use crate::domain::{Catalog, Config};

const TAGLINE: &str = "Structured, multi-week learning curricula for senior engineers who want \
                       deep mastery of backend, infrastructure, and systems topics.";

const HOW_TO_USE: &str = "## How to Use These Plans

Each plan is a standalone Markdown file structured around:

1. **Phases** — Progressive stages from foundations to advanced topics, typically spanning 12–16 weeks.
2. **Milestones** — Concrete projects and exercises at each phase to validate understanding.
3. **Curated Resources** — Books, documentation, talks, and blog posts selected for each topic.

Pick a plan that matches your current learning goal, work through the phases at your own pace, and use the milestones to gauge progress.
";

/// Renders the README for a catalog.
///
/// The output is a complete Markdown document ending in a single newline.
#[must_use]
pub fn render(catalog: &Catalog, title: &str) -> String {
    let mut out = String::new();

    // Writing to a `String` cannot fail.
    let _ = write!(
        out,
        "# {title}\n\n{TAGLINE}\n\n## Overview\n\nThis repository contains {total} self-paced \
         learning plans generated with Claude. Each plan follows a phased, project-based format \
         designed for working engineers — typically 12–16 weeks of focused study with curated \
         resources, hands-on milestones, and progressive complexity. Topics range from Spring \
         Boot internals to Kubernetes, Go, and distributed data systems.\n\n## Plans by Category\n",
        total = catalog.total(),
    );

    for category in catalog.categories() {
        let _ = write!(out, "\n### {}\n\n", category.name());
        for entry in category.entries() {
            let _ = writeln!(
                out,
                "- [{}]({}) — {}",
                entry.title(),
                entry.path(),
                entry.description()
            );
        }
    }

    out.push('\n');
    out.push_str(HOW_TO_USE);
    out
}

/// Where the README for a corpus lives.
#[must_use]
pub fn path(root: &Path, config: &Config) -> PathBuf {
    root.join(config.readme_file())
}

/// Checks whether the README on disk matches `content`.
///
/// A missing README is stale.
///
/// # Errors
///
/// Returns an error if the README exists but cannot be read.
pub fn is_current(root: &Path, config: &Config, content: &str) -> io::Result<bool> {
    match fs::read_to_string(path(root, config)) {
        Ok(existing) => Ok(existing == content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Writes the README for a corpus, returning its path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write(root: &Path, config: &Config, content: &str) -> io::Result<PathBuf> {
    let path = path(root, config);
    fs::write(&path, content)?;
    tracing::info!("Wrote {}", path.display());
    Ok(path)
}
