pub mod check;
pub mod config;
pub mod error;
pub mod fragment;
pub mod logging;
pub mod reference;
pub mod render;
pub mod template;

use std::path::{Path, PathBuf};

use crate::config::template_name;
use crate::error::{BundleError, Result};
use crate::render::{execute_plan, plan_template, BuiltBundle, BundlePlan};
use crate::template::discover_templates;

pub struct BuildOptions {
    pub fragments_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Template directory names to build; empty means all.
    pub only: Vec<String>,
    /// Remove the output directory first. Ignored when `only` is set, so
    /// other bundles survive a partial rebuild.
    pub clean: bool,
}

/// What happened to one template during a batch.
pub struct TemplateOutcome<T> {
    pub template: String,
    pub result: Result<T>,
}

pub struct BuildReport {
    pub output_dir: PathBuf,
    pub outcomes: Vec<TemplateOutcome<BuiltBundle>>,
}

impl BuildReport {
    pub fn built(&self) -> impl Iterator<Item = &BuiltBundle> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &BundleError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.template.as_str(), e)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }
}

/// Discover templates and narrow them to `options.only`, keeping discovery order.
pub fn select_templates(options: &BuildOptions) -> Result<Vec<PathBuf>> {
    let all = discover_templates(&options.templates_dir)?;
    if options.only.is_empty() {
        return Ok(all);
    }

    for name in &options.only {
        if !all.iter().any(|dir| template_name(dir) == *name) {
            return Err(BundleError::UnknownTemplate {
                name: name.clone(),
                path: options.templates_dir.clone(),
            });
        }
    }

    Ok(all
        .into_iter()
        .filter(|dir| options.only.contains(&template_name(dir)))
        .collect())
}

/// Plan every selected template in memory without writing anything.
pub fn plan_all(options: &BuildOptions) -> Result<Vec<TemplateOutcome<BundlePlan>>> {
    let templates = select_templates(options)?;
    Ok(templates
        .iter()
        .map(|dir| TemplateOutcome {
            template: template_name(dir),
            result: plan_template(dir, &options.fragments_dir),
        })
        .collect())
}

/// Plan and write one template's bundle under `output_dir`.
pub fn build_template(
    template_dir: &Path,
    fragments_dir: &Path,
    output_dir: &Path,
) -> Result<BuiltBundle> {
    let plan = plan_template(template_dir, fragments_dir)?;
    execute_plan(&plan, output_dir)
}

/// Build every selected template. A failing template is recorded in the
/// report and does not stop the others; only run-level problems are `Err`.
pub fn build_all(options: &BuildOptions) -> Result<BuildReport> {
    let templates = select_templates(options)?;

    if options.clean && options.only.is_empty() && options.output_dir.exists() {
        tracing::info!(dir = %options.output_dir.display(), "cleaning output directory");
        std::fs::remove_dir_all(&options.output_dir).map_err(|e| BundleError::Io {
            context: format!("removing {}", options.output_dir.display()),
            source: e,
        })?;
    }

    std::fs::create_dir_all(&options.output_dir).map_err(|e| BundleError::Io {
        context: format!("creating output directory {}", options.output_dir.display()),
        source: e,
    })?;

    let mut outcomes = Vec::with_capacity(templates.len());
    for template_dir in &templates {
        let template = template_name(template_dir);
        let _span = tracing::info_span!("template", name = %template).entered();

        let result = build_template(template_dir, &options.fragments_dir, &options.output_dir);
        match &result {
            Ok(built) => tracing::info!(bundle = %built.bundle_path.display(), "built"),
            Err(e) => tracing::warn!(error = %e, "build failed"),
        }

        outcomes.push(TemplateOutcome { template, result });
    }

    Ok(BuildReport {
        output_dir: options.output_dir.clone(),
        outcomes,
    })
}
