//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fontmap_core::{PipelineContext, config::DEFAULT_RESOURCES_DIR};

use crate::commands::{build, check, coverage, lookup, verify};

#[derive(Parser)]
#[command(name = "fontmap")]
#[command(about = "Pick one font for every printable Unicode character")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where fonts come from and how they are ranked.
#[derive(Debug, Clone, clap::Args)]
pub struct FontArgs {
    /// JSON font table mapping font names to file paths
    #[arg(long)]
    pub font_table: Option<PathBuf>,
    /// Directory searched for .ttf, .otf, .ttc and .otc files
    #[arg(long)]
    pub fonts_dir: Option<PathBuf>,
    /// Preferred font, highest priority first (repeatable)
    #[arg(short, long)]
    pub priority: Vec<String>,
    #[command(flatten)]
    pub resources: ResourcesArgs,
}

impl FontArgs {
    pub fn context(self) -> Result<PipelineContext> {
        PipelineContext::from_sources(
            self.font_table.as_deref(),
            self.fonts_dir.as_deref(),
            self.priority,
            self.resources.resources_dir,
        )
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ResourcesArgs {
    /// Directory the character tables are written to and read from
    #[arg(long, default_value = DEFAULT_RESOURCES_DIR)]
    pub resources_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every character and write both character tables
    Build {
        #[command(flatten)]
        fonts: FontArgs,
        /// Run every step without writing the tables
        #[arg(long)]
        dry_run: bool,
    },
    /// Check that the persisted tables are valid and agree
    Verify {
        #[command(flatten)]
        resources: ResourcesArgs,
    },
    /// Report per-block coverage of every font
    Coverage {
        #[command(flatten)]
        fonts: FontArgs,
    },
    /// Show candidates and the chosen font for each character of TEXT
    Check {
        text: String,
        #[command(flatten)]
        fonts: FontArgs,
    },
    /// Look up characters of TEXT in the persisted character table
    Lookup {
        text: String,
        #[command(flatten)]
        resources: ResourcesArgs,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { fonts, dry_run } => {
                build(&fonts.context()?.with_dry_run(dry_run))?;
            }
            Commands::Verify { resources } => {
                verify(&resources.resources_dir)?;
            }
            Commands::Coverage { fonts } => {
                coverage(&fonts.context()?);
            }
            Commands::Check { text, fonts } => {
                check(&fonts.context()?, &text)?;
            }
            Commands::Lookup { text, resources } => {
                lookup(&resources.resources_dir, &text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_args() {
        let cli = Cli::parse_from([
            "fontmap",
            "build",
            "--fonts-dir",
            "fonts",
            "-p",
            "Noto Sans",
            "--priority",
            "Noto Sans Math",
            "--dry-run",
        ]);
        let Commands::Build { fonts, dry_run } = cli.command else {
            panic!("expected build");
        };
        assert!(dry_run);
        assert_eq!(fonts.priority, ["Noto Sans", "Noto Sans Math"]);
        assert_eq!(fonts.fonts_dir, Some(PathBuf::from("fonts")));
        assert_eq!(fonts.resources.resources_dir, PathBuf::from(DEFAULT_RESOURCES_DIR));
    }

    #[test]
    fn test_lookup_args() {
        let cli = Cli::parse_from(["fontmap", "lookup", "あA", "--resources-dir", "out"]);
        let Commands::Lookup { text, resources } = cli.command else {
            panic!("expected lookup");
        };
        assert_eq!(text, "あA");
        assert_eq!(resources.resources_dir, PathBuf::from("out"));
    }
}
