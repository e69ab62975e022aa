use std::{
    io::{self, Write},
    path::PathBuf,
    process,
};

use clap::Parser;
use plandex::{Catalog, Corpus};
use serde::Serialize;
use tracing::instrument;

use super::terminal::{Colorize, is_narrow, truncate};

#[derive(Debug, Parser, Default)]
#[command(about = "Show plan counts per category and skipped files")]
pub struct Status {
    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    documents: usize,
    plans: usize,
    categories: Vec<CategoryCount<'a>>,
    skipped: Vec<String>,
}

#[derive(Debug, Serialize)]
struct CategoryCount<'a> {
    name: &'a str,
    plans: usize,
}

impl<'a> Summary<'a> {
    fn new(corpus: &Corpus, catalog: &'a Catalog) -> Self {
        Self {
            documents: corpus.documents().len(),
            plans: catalog.total(),
            categories: catalog
                .categories()
                .iter()
                .map(|category| CategoryCount {
                    name: category.name(),
                    plans: category.len(),
                })
                .collect(),
            skipped: catalog
                .skipped()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Status {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;
        let catalog = corpus.catalog();
        let summary = Summary::new(&corpus, &catalog);

        let mut out = io::stdout().lock();
        self.write(&summary, &mut out)?;
        out.flush()?;

        // Exit with a non-zero code when some documents need attention.
        if !summary.skipped.is_empty() {
            process::exit(2);
        }

        Ok(())
    }

    fn write<W: Write>(&self, summary: &Summary<'_>, out: &mut W) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(summary)?)?,
            OutputFormat::Table if self.quiet => Self::write_quiet(summary, out)?,
            OutputFormat::Table if summary.documents == 0 => writeln!(
                out,
                "No plans found yet. Add a markdown file with title, category and description front matter."
            )?,
            OutputFormat::Table => Self::write_table(summary, out)?,
        }
        Ok(())
    }

    fn write_quiet<W: Write>(summary: &Summary<'_>, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{}\t{}\t{}",
            summary.plans,
            summary.categories.len(),
            summary.skipped.len()
        )
    }

    fn write_table<W: Write>(summary: &Summary<'_>, out: &mut W) -> io::Result<()> {
        let name_width = if is_narrow() { 24 } else { 36 };

        writeln!(out, "{}", "Plans by category".heading())?;
        for category in &summary.categories {
            writeln!(
                out,
                "  {:<name_width$} {:>4}",
                truncate(category.name, name_width),
                category.plans
            )?;
        }
        writeln!(
            out,
            "  {:<name_width$} {:>4}",
            "Total".dim(),
            summary.plans.to_string().success()
        )?;

        if !summary.skipped.is_empty() {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                format!("Skipped {} document(s)", summary.skipped.len()).warning()
            )?;
            for reason in &summary.skipped {
                writeln!(out, "  • {reason}")?;
            }
        }
        Ok(())
    }
}
