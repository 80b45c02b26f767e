mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    iatemplate::logging::init(cli.verbose);
    let project = commands::load_project(cli.root.as_deref())?;

    match cli.command {
        Commands::Build {
            templates,
            fragments,
            templates_dir,
            output,
            no_clean,
            dry_run,
            show_content,
        } => commands::build::run(
            &project,
            templates,
            fragments,
            templates_dir,
            output,
            no_clean,
            dry_run,
            show_content,
        ),
        Commands::Check {
            path,
            fragments,
            strict,
        } => commands::check::run(&project, path, fragments, strict),
        Commands::FetchFixture {
            fixtures,
            repository,
            bundle,
        } => commands::fetch::run(&project, fixtures, repository, bundle),
        Commands::Verify {
            template,
            fixtures,
            offline,
        } => commands::verify::run(&project, template, fixtures, offline),
    }
}
