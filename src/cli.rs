use std::path::PathBuf;

mod index;
mod readme;
mod show;
mod status;
mod terminal;
mod validate;

use clap::ArgAction;
use index::Index;
use plandex::Config;
use readme::Readme;
use show::Show;
use status::Status;
use tracing::instrument;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the root of the plans directory
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Status(Status::default()))
            .run(self.root)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show plan counts per category (default)
    Status(Status),

    /// Initialize a configuration file in the plans directory
    Init,

    /// Emit a structured record for every document
    ///
    /// Each record holds the document path, its front-matter fields, and its
    /// heading tree.
    Index(Index),

    /// Show the front matter and outline of a single document
    Show(Show),

    /// Generate the README from document front matter
    Readme(Readme),

    /// Report missing front matter and heading level skips
    Validate(Validate),
}

impl Command {
    fn run(self, root: PathBuf) -> anyhow::Result<()> {
        match self {
            Self::Status(command) => command.run(root)?,
            Self::Init => Init::run(&root)?,
            Self::Index(command) => command.run(root)?,
            Self::Show(command) => command.run(root)?,
            Self::Readme(command) => command.run(root)?,
            Self::Validate(command) => command.run(root)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(root: &PathBuf) -> anyhow::Result<()> {
        let config_path = Config::path_in(root);
        if config_path.exists() {
            anyhow::bail!(
                "Plans directory already initialized (found existing {})",
                config_path.display()
            );
        }

        Config::default()
            .save(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!("Initialized plans directory in {}", root.display());
        println!(
            "  Created: {}/{}",
            plandex::domain::CONFIG_DIR,
            plandex::domain::CONFIG_FILE
        );
        println!();
        println!("Next steps:");
        println!("  plandex validate");
        println!("  plandex readme");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn defaults_to_status() {
        let cli = Cli::try_parse_from(["plandex"]).unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["plandex", "validate", "-vv", "--root", "plans"]).unwrap();

        assert!(matches!(cli.command, Some(Command::Validate(_))));
        assert_eq!(cli.root, PathBuf::from("plans"));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn show_requires_a_path() {
        assert!(Cli::try_parse_from(["plandex", "show"]).is_err());
        assert!(Cli::try_parse_from(["plandex", "show", "redis.md"]).is_ok());
    }

    #[test]
    fn init_writes_default_config() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();

        Init::run(&root).unwrap();

        let config = Config::load(&Config::path_in(&root)).unwrap();
        assert_eq!(config, Config::default());
        assert!(Init::run(&root).is_err());
    }
}
