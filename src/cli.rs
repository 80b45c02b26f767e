use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "iatemplate",
    about = "Build iA Writer template bundles from shared fragments and per-template overrides",
    version
)]
pub struct Cli {
    /// Project root (default: nearest ancestor containing iatemplate.toml)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Log more (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build template bundles
    Build {
        /// Template directory names to build (default: all)
        templates: Vec<String>,

        /// Base fragments directory
        #[arg(long)]
        fragments: Option<PathBuf>,

        /// Directory holding one subdirectory per template
        #[arg(long = "templates", value_name = "DIR")]
        templates_dir: Option<PathBuf>,

        /// Output directory for bundles
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep existing output instead of removing it first
        #[arg(long)]
        no_clean: bool,

        /// Show planned files without writing anything
        #[arg(long)]
        dry_run: bool,

        /// With --dry-run, print the content of every planned file
        #[arg(long)]
        show_content: bool,
    },

    /// Validate templates without building them
    Check {
        /// Template directory to check (default: every template)
        path: Option<PathBuf>,

        /// Base fragments directory
        #[arg(long)]
        fragments: Option<PathBuf>,

        /// Treat unrecognized {placeholders} as errors
        #[arg(long)]
        strict: bool,
    },

    /// Download the reference bundle into the fixtures directory
    FetchFixture {
        /// Fixtures directory
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Git repository holding the reference bundle
        #[arg(long)]
        repository: Option<String>,

        /// Bundle directory name inside the repository
        #[arg(long)]
        bundle: Option<String>,
    },

    /// Build the reference template and compare it with the reference bundle
    Verify {
        /// Template directory name to build
        #[arg(long)]
        template: Option<String>,

        /// Fixtures directory
        #[arg(long)]
        fixtures: Option<PathBuf>,

        /// Never clone; fail if the fixture is absent
        #[arg(long)]
        offline: bool,
    },
}
