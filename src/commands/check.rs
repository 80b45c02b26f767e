use std::path::{Path, PathBuf};

use console::style;
use iatemplate::check::{check_template, FragmentStatus};
use iatemplate::config::Project;
use iatemplate::template::discover_templates;
use miette::Result;

use super::error_chain;

pub fn run(
    project: &Project,
    path: Option<PathBuf>,
    fragments: Option<PathBuf>,
    strict: bool,
) -> Result<()> {
    let fragments_dir = fragments.unwrap_or_else(|| project.fragments_dir());
    let templates = match path {
        Some(p) => vec![p],
        None => discover_templates(&project.templates_dir())?,
    };

    let mut invalid = 0;
    for template_dir in &templates {
        if !check_one(template_dir, &fragments_dir, strict) {
            invalid += 1;
        }
    }

    if invalid > 0 {
        println!(
            "\n{} {} of {} template(s) have errors",
            style("✗").red().bold(),
            invalid,
            templates.len()
        );
        std::process::exit(1);
    }

    println!(
        "\n{} {} template(s) valid",
        style("✓").green().bold(),
        templates.len()
    );
    Ok(())
}

/// Print the report for one template; returns whether it is valid.
fn check_one(template_dir: &Path, fragments_dir: &Path, strict: bool) -> bool {
    println!(
        "{} {}",
        style("Checking template at").bold(),
        style(template_dir.display()).cyan()
    );

    let result = match check_template(template_dir, fragments_dir, strict) {
        Ok(result) => result,
        Err(e) => {
            println!("  {} {}", style("✗").red(), error_chain(&e));
            return false;
        }
    };

    println!("  Name: {}", result.bundle_name);
    println!("  Bundle: {}", result.bundle_dir);
    for (fragment, status) in &result.fragments {
        let status = match status {
            FragmentStatus::Resolved(origin) => style(origin.to_string()).green(),
            FragmentStatus::Skipped => style("skipped".to_string()).dim(),
            FragmentStatus::Missing => style("missing".to_string()).red(),
        };
        println!("  {fragment}: {status}");
    }
    println!("  Assets: {}", result.asset_count);

    if !result.warnings.is_empty() {
        println!("\n{}", style("Warnings:").yellow().bold());
        for w in &result.warnings {
            println!("  {} {}", style("⚠").yellow(), w);
        }
    }

    if !result.errors.is_empty() {
        println!("\n{}", style("Errors:").red().bold());
        for e in &result.errors {
            println!("  {} {}", style("✗").red(), e);
        }
        println!();
        return false;
    }

    println!("  {} Template is valid!\n", style("✓").green().bold());
    true
}
