use std::path::Path;

use crate::config::{load_config, template_name};
use crate::error::{BundleError, Result};
use crate::fragment::{Fragment, Layers, Origin};
use crate::render::assets::plan_assets;
use crate::render::{build_variables, unknown_placeholders};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentStatus {
    Resolved(Origin),
    Skipped,
    Missing,
}

/// Result of validating a template.
pub struct CheckResult {
    pub template: String,
    pub bundle_name: String,
    pub bundle_dir: String,
    pub fragments: Vec<(Fragment, FragmentStatus)>,
    pub asset_count: usize,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a template directory against the base fragments without writing.
///
/// Unrecognized `{tokens}` are warnings, or errors when `strict` is set.
/// Fails outright only when `bundle.json` cannot be loaded.
pub fn check_template(template_dir: &Path, fragments_dir: &Path, strict: bool) -> Result<CheckResult> {
    let config = load_config(template_dir)?;
    let template = template_name(template_dir);
    let vars = build_variables(&config);
    let layers = Layers {
        base_dir: fragments_dir,
        template_dir,
    };

    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut fragments = Vec::new();

    for name in &config.skip_fragments {
        if Fragment::from_file_name(name).is_none() {
            warnings.push(format!("skip_fragments entry '{name}' is not a fragment name"));
        }
    }

    for fragment in Fragment::ALL {
        if config.skips(fragment.file_name()) {
            if matches!(fragment, Fragment::InfoPlist | Fragment::Document) {
                warnings.push(format!(
                    "{fragment} is skipped; iA Writer will not load a bundle without it"
                ));
            }
            fragments.push((fragment, FragmentStatus::Skipped));
            continue;
        }

        let Some(source) = layers.resolve(fragment) else {
            errors.push(format!("Fragment not found: {fragment}"));
            fragments.push((fragment, FragmentStatus::Missing));
            continue;
        };
        fragments.push((fragment, FragmentStatus::Resolved(source.origin)));

        match std::fs::read_to_string(&source.path) {
            Ok(content) => {
                for key in unknown_placeholders(&content, &vars) {
                    let msg = format!("{fragment}: unrecognized placeholder {{{key}}}");
                    if strict {
                        errors.push(msg);
                    } else {
                        warnings.push(msg);
                    }
                }
            }
            Err(e) => errors.push(format!("Could not read {}: {e}", source.path.display())),
        }
    }

    let asset_count = match plan_assets(&template, template_dir, &config) {
        Ok(files) => files.len(),
        Err(BundleError::MissingAsset { asset, .. }) => {
            errors.push(format!("Asset not found: {asset}"));
            0
        }
        Err(e) => {
            errors.push(e.to_string());
            0
        }
    };

    Ok(CheckResult {
        template,
        bundle_name: config.name.clone(),
        bundle_dir: config.bundle_dir_name(),
        fragments,
        asset_count,
        warnings,
        errors,
    })
}
