use std::path::PathBuf;

use console::style;
use iatemplate::config::Project;
use iatemplate::error::BundleError;
use iatemplate::reference::{compare_bundles, fetch_reference, reference_contents};
use miette::Result;

pub fn run(
    project: &Project,
    template: Option<String>,
    fixtures: Option<PathBuf>,
    offline: bool,
) -> Result<()> {
    let reference = &project.config.reference;
    let template = template.unwrap_or_else(|| reference.template.clone());
    let fixtures_dir = fixtures.unwrap_or_else(|| project.fixtures_dir());

    let expected = if offline {
        let contents = reference_contents(&fixtures_dir, &reference.bundle);
        if !contents.is_dir() {
            return Err(BundleError::ReferenceBundleMissing {
                bundle: reference.bundle.clone(),
                path: fixtures_dir,
            }
            .into());
        }
        contents
    } else {
        fetch_reference(&reference.repository, &reference.bundle, &fixtures_dir)?
    };

    let scratch = tempfile::tempdir().map_err(|e| BundleError::Io {
        context: "creating temporary output directory".into(),
        source: e,
    })?;

    let built = iatemplate::build_template(
        &project.templates_dir().join(&template),
        &project.fragments_dir(),
        scratch.path(),
    )?;

    let comparison = compare_bundles(&expected, &built.bundle_path.join("Contents"))?;

    println!(
        "{} {} against {}",
        style("Comparing").bold(),
        style(&template).cyan(),
        style(expected.display()).cyan()
    );

    if comparison.is_match() {
        println!("{} Generated bundle matches the reference", style("✓").green().bold());
        return Ok(());
    }

    for path in &comparison.missing {
        println!("  {} missing {}", style("✗").red(), path.display());
    }
    for path in &comparison.extra {
        println!("  {} extra   {}", style("✗").red(), path.display());
    }
    for difference in &comparison.differing {
        println!("  {} differs {}", style("✗").red(), difference.path.display());
        if let Some(diff) = &difference.diff {
            for line in diff.lines() {
                let styled = match line.chars().next() {
                    Some('+') => style(line).green(),
                    Some('-') => style(line).red(),
                    _ => style(line).dim(),
                };
                println!("      {styled}");
            }
        }
    }

    Err(BundleError::ReferenceMismatch {
        summary: comparison.summary(),
    }
    .into())
}
