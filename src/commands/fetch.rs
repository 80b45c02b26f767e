use std::path::PathBuf;

use console::style;
use iatemplate::config::Project;
use iatemplate::reference::fetch_reference;
use miette::Result;

pub fn run(
    project: &Project,
    fixtures: Option<PathBuf>,
    repository: Option<String>,
    bundle: Option<String>,
) -> Result<()> {
    let reference = &project.config.reference;
    let fixtures_dir = fixtures.unwrap_or_else(|| project.fixtures_dir());
    let repository = repository.unwrap_or_else(|| reference.repository.clone());
    let bundle = bundle.unwrap_or_else(|| reference.bundle.clone());

    println!(
        "{} {} from {}",
        style("Fetching").bold(),
        style(&bundle).cyan(),
        style(&repository).cyan()
    );

    let contents = fetch_reference(&repository, &bundle, &fixtures_dir)?;

    println!(
        "{} Reference fixture at {}",
        style("✓").green().bold(),
        style(contents.display()).cyan()
    );
    Ok(())
}
