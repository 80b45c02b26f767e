use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::plan::{FileKind, PlannedFile};
use crate::config::TemplateConfig;
use crate::error::{BundleError, Result};

fn resources_dir() -> PathBuf {
    Path::new("Contents").join("Resources")
}

/// Collect every asset a template lists (`assets`, then `css.base`, then
/// `css.variants`) as verbatim copies.
pub fn plan_assets(
    template: &str,
    template_dir: &Path,
    config: &TemplateConfig,
) -> Result<Vec<PlannedFile>> {
    let mut files = Vec::new();

    for asset in &config.assets {
        copy_asset(template, template_dir, asset, None, &mut files)?;
    }

    if let Some(css) = &config.css {
        for asset in &css.base {
            copy_asset(template, template_dir, asset, None, &mut files)?;
        }

        for variant in css.variants.values() {
            let source = variant.source();
            copy_asset(template, template_dir, source, None, &mut files)?;
            for target in variant.targets() {
                copy_asset(template, template_dir, source, Some(target), &mut files)?;
            }
        }
    }

    Ok(files)
}

/// Queue one asset. Files land in `Resources/` under their file name (or
/// `target`); directories are copied recursively under their own name.
fn copy_asset(
    template: &str,
    template_dir: &Path,
    asset: &str,
    target: Option<&str>,
    files: &mut Vec<PlannedFile>,
) -> Result<()> {
    let source = template_dir.join(asset);
    if !source.exists() {
        return Err(BundleError::MissingAsset {
            template: template.to_string(),
            asset: asset.to_string(),
            path: source,
        });
    }

    let dest_name = match target {
        Some(t) => PathBuf::from(t),
        None => PathBuf::from(source.file_name().unwrap_or(source.as_os_str())),
    };
    let dest = resources_dir().join(dest_name);

    if source.is_file() {
        files.push(PlannedFile {
            relative_path: dest,
            content: read_bytes(template, &source)?,
            kind: FileKind::Asset,
        });
        return Ok(());
    }

    for entry in WalkDir::new(&source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| BundleError::Io {
            context: format!("[{template}] walking asset directory {}", source.display()),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(&source)
            .expect("entry must be under asset directory");
        files.push(PlannedFile {
            relative_path: dest.join(rel),
            content: read_bytes(template, entry.path())?,
            kind: FileKind::Asset,
        });
    }

    Ok(())
}

fn read_bytes(template: &str, path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| BundleError::Io {
        context: format!("[{template}] reading {}", path.display()),
        source: e,
    })
}
