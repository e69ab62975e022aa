use std::{path::PathBuf, process};

use clap::Parser;
use plandex::{Corpus, storage::readme};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Generate the README catalog from document front matter")]
pub struct Readme {
    /// Exit with status 1 if the README is out of date, without writing it
    #[arg(long, conflicts_with = "stdout")]
    check: bool,

    /// Print the README instead of writing it
    #[arg(long)]
    stdout: bool,
}

impl Readme {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;
        let catalog = corpus.catalog();
        for skipped in catalog.skipped() {
            tracing::warn!("{skipped}, skipping");
        }
        let content = readme::render(&catalog, corpus.config().readme_title());

        if self.stdout {
            print!("{content}");
            return Ok(());
        }

        let path = readme::path(corpus.root(), corpus.config());

        if self.check {
            if readme::is_current(corpus.root(), corpus.config(), &content)? {
                println!("{} is up to date", path.display());
                return Ok(());
            }
            eprintln!(
                "{}",
                format!("{} is out of date; run 'plandex readme'", path.display()).warning()
            );
            process::exit(1);
        }

        readme::write(corpus.root(), corpus.config(), &content)?;
        println!(
            "{} {} ({} plans in {} categories)",
            "Generated".success(),
            path.display(),
            catalog.total(),
            catalog.categories().len()
        );

        Ok(())
    }
}
