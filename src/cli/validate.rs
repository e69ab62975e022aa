use std::{path::PathBuf, process};

use clap::Parser;
use plandex::{
    Catalog, Corpus, Document,
    domain::{Skipped, heading},
};
use serde::Serialize;
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Validate document front matter and heading structure")]
pub struct Validate {
    /// Types of checks to run (can be specified multiple times)
    #[arg(long, value_name = "TYPE")]
    check: Vec<CheckType>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress all output except errors
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, PartialEq, Eq)]
enum CheckType {
    /// Check front matter is present with title, category and description
    FrontMatter,
    /// Check headings never skip a level below their parent
    Headings,
    /// Run all checks
    All,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Issue {
    FrontMatter { path: String, message: String },
    HeadingSkip {
        path: String,
        heading: String,
        parent_level: u8,
        level: u8,
    },
}

impl Issue {
    fn describe(&self) -> String {
        match self {
            Self::FrontMatter { message, .. } => message.clone(),
            Self::HeadingSkip {
                path,
                heading,
                parent_level,
                level,
            } => format!(
                "{path}: heading '{heading}' jumps from level {parent_level} to {level}"
            ),
        }
    }
}

impl Validate {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;
        let issues = self.collect_issues(corpus.documents());

        if !self.quiet {
            match self.output {
                OutputFormat::Table => Self::output_table(corpus.documents().len(), &issues),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
                OutputFormat::Summary => println!("{} issue(s)", issues.len()),
            }
        }

        if !issues.is_empty() {
            process::exit(1);
        }
        Ok(())
    }

    fn checks(&self) -> Vec<CheckType> {
        if self.check.is_empty() || self.check.contains(&CheckType::All) {
            vec![CheckType::FrontMatter, CheckType::Headings]
        } else {
            self.check.clone()
        }
    }

    fn collect_issues(&self, documents: &[Document]) -> Vec<Issue> {
        let mut issues = Vec::new();

        for check in self.checks() {
            match check {
                CheckType::FrontMatter => issues.extend(check_front_matter(documents)),
                CheckType::Headings => issues.extend(check_headings(documents)),
                CheckType::All => unreachable!("All should have been expanded"),
            }
        }

        issues
    }

    fn output_table(documents: usize, issues: &[Issue]) {
        if issues.is_empty() {
            println!(
                "{} {documents} document(s) checked, no issues found",
                "✓".success()
            );
            return;
        }

        for issue in issues {
            println!("  {} {}", "⚠".warning(), issue.describe());
        }
        println!();
        println!(
            "{}",
            format!("{} issue(s) in {documents} document(s)", issues.len()).warning()
        );
    }
}

fn check_front_matter(documents: &[Document]) -> Vec<Issue> {
    Catalog::build(documents, &[])
        .skipped()
        .iter()
        .map(|skipped: &Skipped| Issue::FrontMatter {
            path: skipped.path().to_string(),
            message: skipped.to_string(),
        })
        .collect()
}

fn check_headings(documents: &[Document]) -> Vec<Issue> {
    documents
        .iter()
        .flat_map(|document| {
            heading::level_skips(document.headings())
                .into_iter()
                .map(|skip| Issue::HeadingSkip {
                    path: document.link_path(),
                    heading: skip.text,
                    parent_level: skip.parent_level,
                    level: skip.level,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate(check: Vec<CheckType>) -> Validate {
        Validate {
            check,
            output: OutputFormat::Table,
            quiet: true,
        }
    }

    fn documents() -> Vec<Document> {
        vec![
            Document::parse(
                "good.md",
                "---\ntitle: Good\ncategory: NewSQL\ndescription: Fine\n---\n# A\n## B\n",
            ),
            Document::parse("bare.md", "# A\n### Skipped\n"),
        ]
    }

    #[test]
    fn all_checks_by_default() {
        let issues = validate(vec![]).collect_issues(&documents());

        assert_eq!(
            issues,
            vec![
                Issue::FrontMatter {
                    path: "bare.md".to_string(),
                    message: "bare.md has no front matter".to_string(),
                },
                Issue::HeadingSkip {
                    path: "bare.md".to_string(),
                    heading: "Skipped".to_string(),
                    parent_level: 1,
                    level: 3,
                },
            ]
        );
    }

    #[test]
    fn selected_checks_only() {
        let issues = validate(vec![CheckType::Headings]).collect_issues(&documents());

        assert_eq!(issues.len(), 1);
        assert!(matches!(issues[0], Issue::HeadingSkip { .. }));
        assert_eq!(
            issues[0].describe(),
            "bare.md: heading 'Skipped' jumps from level 1 to 3"
        );
    }

    #[test]
    fn clean_documents_have_no_issues() {
        let documents = documents();

        assert!(
            validate(vec![CheckType::All])
                .collect_issues(&documents[..1])
                .is_empty()
        );
    }

    #[test]
    fn nested_paths_are_reported_the_same_way() {
        let path = std::path::Path::new("drafts").join("bare.md");
        let documents = [Document::parse(path, "# A\n### Skipped\n")];

        let issues = validate(vec![]).collect_issues(&documents);

        let paths: Vec<_> = issues
            .iter()
            .map(|issue| match issue {
                Issue::FrontMatter { path, .. } | Issue::HeadingSkip { path, .. } => path.as_str(),
            })
            .collect();
        assert_eq!(paths, vec!["drafts/bare.md", "drafts/bare.md"]);
    }

    #[test]
    fn issues_serialize_with_kind_tag() {
        let issue = Issue::FrontMatter {
            path: "x.md".to_string(),
            message: "x.md has no front matter".to_string(),
        };

        let json = serde_json::to_value(&issue).unwrap();

        assert_eq!(json["kind"], "front_matter");
        assert_eq!(json["path"], "x.md");
    }
}
