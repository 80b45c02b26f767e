use std::path::PathBuf;

use console::style;
use iatemplate::config::Project;
use iatemplate::BuildOptions;
use miette::Result;

use super::error_chain;

#[allow(clippy::too_many_arguments)]
pub fn run(
    project: &Project,
    templates: Vec<String>,
    fragments: Option<PathBuf>,
    templates_dir: Option<PathBuf>,
    output: Option<PathBuf>,
    no_clean: bool,
    dry_run: bool,
    show_content: bool,
) -> Result<()> {
    let options = BuildOptions {
        fragments_dir: fragments.unwrap_or_else(|| project.fragments_dir()),
        templates_dir: templates_dir.unwrap_or_else(|| project.templates_dir()),
        output_dir: output.unwrap_or_else(|| project.output_dir()),
        only: templates,
        clean: !no_clean,
    };

    if dry_run {
        return dry_run_report(&options, show_content);
    }

    let report = iatemplate::build_all(&options)?;

    for built in report.built() {
        println!(
            "{} {} {}",
            style("✓").green().bold(),
            style(&built.template).bold(),
            style(built.bundle_path.display()).cyan()
        );
        println!(
            "    {} fragments rendered, {} assets copied",
            built.fragments_rendered.len(),
            built.assets_copied.len()
        );
    }

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!("\n{}", style("Errors:").red().bold());
        for (template, err) in &failures {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                style(template).bold(),
                error_chain(*err)
            );
        }
        println!(
            "\n{} {} of {} template(s) failed",
            style("✗").red().bold(),
            failures.len(),
            report.outcomes.len()
        );
        std::process::exit(1);
    }

    println!(
        "\n{} Templates generated in {}",
        style("✓").green().bold(),
        style(report.output_dir.display()).cyan()
    );
    println!("  To install, double-click the .iatemplate bundle");

    Ok(())
}

fn dry_run_report(options: &BuildOptions, show_content: bool) -> Result<()> {
    let outcomes = iatemplate::plan_all(options)?;
    let mut failed = 0;

    println!(
        "\n{} Dry run: bundles that would be generated in {}",
        style("==>").cyan().bold(),
        style(options.output_dir.display()).cyan()
    );

    for outcome in &outcomes {
        let plan = match &outcome.result {
            Ok(plan) => plan,
            Err(e) => {
                failed += 1;
                println!(
                    "\n  {} {}: {}",
                    style("✗").red(),
                    style(&outcome.template).bold(),
                    error_chain(e)
                );
                continue;
            }
        };

        println!("\n  {}", style(&plan.bundle_dir).bold());
        for (fragment, origin) in &plan.origins {
            println!("    {} {} ({})", style("render").green(), fragment, style(origin).dim());
        }
        for file in plan.files.iter().filter(|f| f.is_copy()) {
            println!("    {} {}", style("copy  ").green(), file.relative_path.display());
        }

        if show_content {
            for file in &plan.files {
                println!("    {}", style(format!("── {}", file.relative_path.display())).dim());
                if file.is_copy() {
                    println!(
                        "    {}",
                        style(format!("[verbatim, {} bytes]", file.content.len())).dim()
                    );
                } else {
                    for line in String::from_utf8_lossy(&file.content).lines() {
                        println!("    {line}");
                    }
                }
            }
        }
    }

    println!(
        "\nSummary: {} planned, {} failed",
        outcomes.len() - failed,
        failed
    );
    println!("\n{} Dry run: no files written.", style("ℹ").blue().bold());

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
