use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{BundleError, Result};

/// Immediate subdirectories of `templates_dir`, sorted by name.
///
/// Directories without a `bundle.json` are still returned so that they fail
/// individually when built.
pub fn discover_templates(templates_dir: &Path) -> Result<Vec<PathBuf>> {
    if !templates_dir.is_dir() {
        return Err(BundleError::TemplatesDirMissing {
            path: templates_dir.to_path_buf(),
        });
    }

    let templates: Vec<PathBuf> = WalkDir::new(templates_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.into_path())
        .collect();

    if templates.is_empty() {
        return Err(BundleError::NoTemplates {
            path: templates_dir.to_path_buf(),
        });
    }

    tracing::debug!(count = templates.len(), dir = %templates_dir.display(), "discovered templates");

    Ok(templates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discovers_sorted_directories_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zeta")).unwrap();
        fs::create_dir(dir.path().join("alpha")).unwrap();
        fs::create_dir_all(dir.path().join("alpha/fragments")).unwrap();
        fs::write(dir.path().join("README.md"), "not a template").unwrap();

        let found = discover_templates(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("alpha"), dir.path().join("zeta")]
        );
    }

    #[test]
    fn missing_templates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_templates(&dir.path().join("templates"));
        assert!(matches!(result, Err(BundleError::TemplatesDirMissing { .. })));
    }

    #[test]
    fn empty_templates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = discover_templates(dir.path());
        assert!(matches!(result, Err(BundleError::NoTemplates { .. })));
    }
}
