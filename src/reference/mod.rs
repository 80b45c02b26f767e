//! Known-good bundles used to check generated output byte for byte.

pub mod clone;
pub mod compare;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{BundleError, Result};

pub use clone::shallow_clone;
pub use compare::{compare_bundles, Comparison, FileDifference};

/// `Contents` directory of `bundle` inside `fixtures_dir`.
pub fn reference_contents(fixtures_dir: &Path, bundle: &str) -> PathBuf {
    fixtures_dir.join(bundle).join("Contents")
}

/// Return the reference bundle's `Contents`, cloning `repository` and copying
/// `bundle` into `fixtures_dir` first when it is not there yet.
pub fn fetch_reference(repository: &str, bundle: &str, fixtures_dir: &Path) -> Result<PathBuf> {
    let contents = reference_contents(fixtures_dir, bundle);
    if contents.is_dir() {
        tracing::debug!(path = %contents.display(), "reference fixture present");
        return Ok(contents);
    }

    let checkout = shallow_clone(repository)?;
    let source = checkout.path().join(bundle);
    if !source.is_dir() {
        return Err(BundleError::ReferenceBundleMissing {
            bundle: bundle.to_string(),
            path: checkout.path().to_path_buf(),
        });
    }

    copy_tree(&source, &fixtures_dir.join(bundle))?;
    tracing::info!(bundle, dest = %fixtures_dir.display(), "reference fixture stored");

    Ok(contents)
}

fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source).into_iter().filter_map(|e| e.ok()) {
        let rel = entry
            .path()
            .strip_prefix(source)
            .expect("entry must be under source");
        if rel.components().any(|c| c.as_os_str() == ".git") {
            continue;
        }
        let target = dest.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|e| BundleError::Io {
                context: format!("creating directory {}", target.display()),
                source: e,
            })?;
        } else if entry.file_type().is_file() {
            std::fs::copy(entry.path(), &target).map_err(|e| BundleError::Io {
                context: format!("copying {} to {}", entry.path().display(), target.display()),
                source: e,
            })?;
        }
    }
    Ok(())
}
