pub mod css;
pub mod project;
pub mod schema;

use std::path::Path;

use crate::error::{BundleError, Result};

pub use css::{CssConfig, CssVariant};
pub use project::{load_project, Project, ProjectConfig};
pub use schema::{slugify, TemplateConfig};

pub const BUNDLE_CONFIG_FILE: &str = "bundle.json";

/// Name used to attribute errors to a template: its directory name.
pub fn template_name(template_dir: &Path) -> String {
    template_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| template_dir.display().to_string())
}

/// Load and validate the `bundle.json` of a template directory.
pub fn load_config(template_dir: &Path) -> Result<TemplateConfig> {
    let template = template_name(template_dir);
    let config_path = template_dir.join(BUNDLE_CONFIG_FILE);

    if !config_path.is_file() {
        return Err(BundleError::ConfigNotFound {
            template,
            path: config_path,
        });
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| BundleError::Io {
        context: format!("[{template}] reading {}", config_path.display()),
        source: e,
    })?;

    let raw: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| BundleError::ConfigParse {
            template: template.clone(),
            source: e,
        })?;

    TemplateConfig::from_json(&template, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let template_dir = dir.path().join("demo");
        std::fs::create_dir(&template_dir).unwrap();

        match load_config(&template_dir).unwrap_err() {
            BundleError::ConfigNotFound { template, .. } => assert_eq!(template, "demo"),
            other => panic!("expected ConfigNotFound, got: {other:?}"),
        }
    }

    #[test]
    fn load_config_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BUNDLE_CONFIG_FILE), "{ not json").unwrap();

        assert!(matches!(
            load_config(dir.path()),
            Err(BundleError::ConfigParse { .. })
        ));
    }

    #[test]
    fn load_config_valid() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(BUNDLE_CONFIG_FILE),
            r#"{"name": "Demo", "identifier": "com.example.demo"}"#,
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.name, "Demo");
        assert_eq!(config.identifier, "com.example.demo");
    }
}
