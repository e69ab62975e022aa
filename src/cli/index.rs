use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use plandex::{Corpus, Document, domain::Record};
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Emit a JSON record per document with front matter and heading tree")]
pub struct Index {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    output: OutputFormat,

    /// Pretty-print JSON (ignored for json-lines)
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// A single JSON array
    #[default]
    Json,
    /// One JSON object per line
    JsonLines,
}

impl Index {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, root: PathBuf) -> anyhow::Result<()> {
        let corpus = Corpus::load(root)?;
        let records: Vec<Record<'_>> = corpus.documents().iter().map(Document::record).collect();
        tracing::info!("indexed {} documents", records.len());

        let mut out = BufWriter::new(io::stdout().lock());
        self.write(&records, &mut out)?;
        out.flush()?;
        Ok(())
    }

    fn write<W: Write>(&self, records: &[Record<'_>], out: &mut W) -> anyhow::Result<()> {
        match self.output {
            OutputFormat::Json if self.pretty => serde_json::to_writer_pretty(&mut *out, records)?,
            OutputFormat::Json => serde_json::to_writer(&mut *out, records)?,
            OutputFormat::JsonLines => {
                for record in records {
                    serde_json::to_writer(&mut *out, record)?;
                    writeln!(out)?;
                }
                return Ok(());
            }
        }
        writeln!(out)?;
        Ok(())
    }
}
