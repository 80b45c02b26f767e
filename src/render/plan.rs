use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::assets::plan_assets;
use super::context::{build_variables, Variables};
use super::file::substitute;
use crate::config::{load_config, template_name, TemplateConfig};
use crate::error::{BundleError, Result};
use crate::fragment::{Fragment, Layers, Origin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Rendered from a fragment with placeholders substituted.
    Fragment(Fragment),
    /// Copied verbatim from the template directory.
    Asset,
}

/// A file that will be written into the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the bundle directory, e.g. `Contents/Resources/document.html`.
    pub relative_path: PathBuf,
    pub content: Vec<u8>,
    pub kind: FileKind,
}

impl PlannedFile {
    pub fn is_copy(&self) -> bool {
        self.kind == FileKind::Asset
    }
}

/// Everything one template's bundle contains, computed without writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundlePlan {
    pub template: String,
    /// Directory name of the bundle, e.g. `GitHub.iatemplate`.
    pub bundle_dir: String,
    pub files: Vec<PlannedFile>,
    /// Source chosen for each rendered fragment.
    pub origins: Vec<(Fragment, Origin)>,
}

impl BundlePlan {
    pub fn fragment(&self, fragment: Fragment) -> Option<&PlannedFile> {
        self.files
            .iter()
            .find(|f| f.kind == FileKind::Fragment(fragment))
    }

    pub fn file(&self, relative_path: impl AsRef<Path>) -> Option<&PlannedFile> {
        let wanted = relative_path.as_ref();
        self.files
            .iter()
            .rev()
            .find(|f| f.relative_path == wanted)
    }
}

/// Outcome of writing a plan to disk.
#[derive(Debug, Clone)]
pub struct BuiltBundle {
    pub template: String,
    pub bundle_path: PathBuf,
    pub fragments_rendered: Vec<PathBuf>,
    pub assets_copied: Vec<PathBuf>,
}

/// Load a template's `bundle.json` and plan its bundle.
pub fn plan_template(template_dir: &Path, fragments_dir: &Path) -> Result<BundlePlan> {
    let config = load_config(template_dir)?;
    plan_bundle(template_dir, fragments_dir, &config)
}

/// Resolve and render every non-skipped fragment, then collect assets.
///
/// Reads only; the same inputs always give the same plan.
pub fn plan_bundle(
    template_dir: &Path,
    fragments_dir: &Path,
    config: &TemplateConfig,
) -> Result<BundlePlan> {
    let template = template_name(template_dir);
    let vars = build_variables(config);
    let layers = Layers {
        base_dir: fragments_dir,
        template_dir,
    };

    let mut files = Vec::new();
    let mut origins = Vec::new();

    for fragment in Fragment::ALL {
        if config.skips(fragment.file_name()) {
            tracing::debug!(template = %template, %fragment, "skipped");
            continue;
        }

        let Some(source) = layers.resolve(fragment) else {
            return Err(BundleError::MissingFragment {
                template,
                fragment: fragment.file_name().to_string(),
            });
        };

        tracing::debug!(
            template = %template,
            %fragment,
            origin = %source.origin,
            path = %source.path.display(),
            "resolved fragment"
        );

        let rendered = render_fragment(&template, &source.path, &vars)?;
        files.push(PlannedFile {
            relative_path: fragment.destination(),
            content: rendered.into_bytes(),
            kind: FileKind::Fragment(fragment),
        });
        origins.push((fragment, source.origin));
    }

    files.extend(plan_assets(&template, template_dir, config)?);

    let mut seen = BTreeSet::new();
    if let Some(dup) = files.iter().find(|f| !seen.insert(&f.relative_path)) {
        return Err(BundleError::DuplicateDestination {
            template,
            path: dup.relative_path.clone(),
        });
    }

    Ok(BundlePlan {
        template,
        bundle_dir: config.bundle_dir_name(),
        files,
        origins,
    })
}

fn render_fragment(template: &str, path: &Path, vars: &Variables) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| BundleError::Io {
        context: format!("[{template}] reading {}", path.display()),
        source: e,
    })?;
    Ok(substitute(&content, vars).into_owned())
}

/// Write a plan under `output_root/<bundle_dir>`, replacing any previous bundle.
pub fn execute_plan(plan: &BundlePlan, output_root: &Path) -> Result<BuiltBundle> {
    let bundle_path = output_root.join(&plan.bundle_dir);

    if bundle_path.exists() {
        std::fs::remove_dir_all(&bundle_path).map_err(|e| BundleError::Io {
            context: format!("[{}] removing {}", plan.template, bundle_path.display()),
            source: e,
        })?;
    }

    let mut fragments_rendered = Vec::new();
    let mut assets_copied = Vec::new();

    for file in &plan.files {
        let dest_path = bundle_path.join(&file.relative_path);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BundleError::Io {
                context: format!("[{}] creating directory {}", plan.template, parent.display()),
                source: e,
            })?;
        }
        std::fs::write(&dest_path, &file.content).map_err(|e| BundleError::Io {
            context: format!("[{}] writing {}", plan.template, dest_path.display()),
            source: e,
        })?;
        if file.is_copy() {
            assets_copied.push(file.relative_path.clone());
        } else {
            fragments_rendered.push(file.relative_path.clone());
        }
    }

    Ok(BuiltBundle {
        template: plan.template.clone(),
        bundle_path,
        fragments_rendered,
        assets_copied,
    })
}
