use std::{fmt::Write as _, path::PathBuf, process};

use clap::Parser;
use plandex::{Corpus, Document, Heading};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Display the front matter and outline of a document")]
pub struct Show {
    /// Path of the document, relative to the root
    path: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,

    /// Include the markdown body in output
    #[arg(long)]
    with_body: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl Show {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;
        let Some(document) = corpus.find(&self.path) else {
            eprintln!("Document {} not found", self.path.display());
            process::exit(1);
        };

        match self.output {
            OutputFormat::Pretty => print!("{}", self.render_pretty(document)),
            OutputFormat::Json => self.output_json(document)?,
        }

        Ok(())
    }

    fn output_json(&self, document: &Document) -> anyhow::Result<()> {
        let mut value = serde_json::to_value(document.record())?;
        if self.with_body {
            value["body"] = document.body().into();
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        Ok(())
    }

    fn render_pretty(&self, document: &Document) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "{}", document.link_path().heading());
        match document.front_matter() {
            None => {
                let _ = writeln!(out, "  {}", "no front matter".warning());
            }
            Some(front_matter) if front_matter.is_empty() => {
                let _ = writeln!(out, "  {}", "empty front matter".warning());
            }
            Some(front_matter) => {
                let fields = [
                    ("Title", &front_matter.title),
                    ("Category", &front_matter.category),
                    ("Description", &front_matter.description),
                ];
                for (label, value) in fields {
                    let value = value.as_deref().map_or_else(|| "-".dim(), str::to_string);
                    let _ = writeln!(out, "  {:<12} {value}", format!("{label}:"));
                }
            }
        }

        let _ = writeln!(out, "\n{}", "Outline".dim());
        if document.headings().is_empty() {
            let _ = writeln!(out, "  (no headings)");
        }
        for heading in document.headings() {
            write_outline(&mut out, heading, 1);
        }

        if self.with_body {
            let _ = write!(out, "\n{}\n{}", "Body".dim(), document.body());
        }

        out
    }
}

fn write_outline(out: &mut String, heading: &Heading, depth: usize) {
    let indent = "  ".repeat(depth);
    let marker = "#".repeat(usize::from(heading.level));
    let _ = writeln!(out, "{indent}{} {}", marker.dim(), heading.text);
    for child in &heading.children {
        write_outline(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn show(path: &str) -> Show {
        Show {
            path: PathBuf::from(path),
            output: OutputFormat::Pretty,
            with_body: false,
        }
    }

    #[test]
    fn looks_up_documents_through_the_corpus() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("README.md"), "# Generated\n").unwrap();
        fs::create_dir_all(tmp.path().join("spring")).unwrap();
        fs::write(tmp.path().join("spring/batch.md"), "# Batch\n").unwrap();
        fs::write(
            tmp.path().join("redis.md"),
            "---\ntitle: Redis Mastery\n---\n# Redis\n",
        )
        .unwrap();

        let corpus = Corpus::load(tmp.path().to_path_buf()).unwrap();

        let found = corpus.find(&show("./redis.md").path).unwrap();
        assert_eq!(found.title(), Some("Redis Mastery"));
        assert!(corpus.find(&show("README.md").path).is_none());
        assert!(corpus.find(&show("spring/batch.md").path).is_none());
    }

    #[test]
    fn empty_front_matter_is_flagged() {
        let document = Document::parse("plan.md", "---\n---\n# A\n");

        let out = show("plan.md").render_pretty(&document);

        assert!(out.contains("empty front matter"));
        assert!(!out.contains("Title:"));
    }

    #[test]
    fn outline_indents_by_nesting_depth() {
        let document = Document::parse("plan.md", "# A\n### C\n## B\n");
        let mut out = String::new();

        for heading in document.headings() {
            write_outline(&mut out, heading, 0);
        }

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" A"));
        assert!(lines[1].starts_with("  ") && lines[1].ends_with(" C"));
        assert!(lines[2].starts_with("  ") && lines[2].ends_with(" B"));
    }
}
