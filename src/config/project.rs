use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BundleError, Result};

pub const PROJECT_CONFIG_FILE: &str = "iatemplate.toml";

pub const DEFAULT_REFERENCE_REPOSITORY: &str = "https://github.com/iainc/iA-Writer-Templates.git";

/// Project-level settings read from `iatemplate.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub reference: ReferenceConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_fragments")]
    pub fragments: PathBuf,

    #[serde(default = "default_templates")]
    pub templates: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_fragments() -> PathBuf {
    PathBuf::from("src/fragments")
}

fn default_templates() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output() -> PathBuf {
    PathBuf::from("dist/templates")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            fragments: default_fragments(),
            templates: default_templates(),
            output: default_output(),
        }
    }
}

/// Where the known-good bundle used by `verify` comes from.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReferenceConfig {
    #[serde(default = "default_repository")]
    pub repository: String,

    #[serde(default = "default_bundle")]
    pub bundle: String,

    /// Template directory name whose output is compared against the bundle.
    #[serde(default = "default_reference_template")]
    pub template: String,

    #[serde(default = "default_fixtures")]
    pub fixtures: PathBuf,
}

fn default_repository() -> String {
    DEFAULT_REFERENCE_REPOSITORY.to_string()
}

fn default_bundle() -> String {
    "GitHub.iatemplate".to_string()
}

fn default_reference_template() -> String {
    "github".to_string()
}

fn default_fixtures() -> PathBuf {
    PathBuf::from("tests/fixtures")
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            bundle: default_bundle(),
            template: default_reference_template(),
            fixtures: default_fixtures(),
        }
    }
}

/// A loaded project: its root directory plus settings.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn fragments_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.fragments)
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.templates)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.config.paths.output)
    }

    pub fn fixtures_dir(&self) -> PathBuf {
        self.resolve(&self.config.reference.fixtures)
    }
}

/// Nearest ancestor of `start` (inclusive) holding `iatemplate.toml`, else `start`.
pub fn find_project_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_CONFIG_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}

/// Locate the project root from `start` and load its configuration.
///
/// A missing `iatemplate.toml` yields the defaults; a malformed one is an error.
pub fn load_project(start: &Path) -> Result<Project> {
    let root = find_project_root(start);
    let config_path = root.join(PROJECT_CONFIG_FILE);

    if !config_path.is_file() {
        tracing::debug!(root = %root.display(), "no project config, using defaults");
        return Ok(Project {
            root,
            config: ProjectConfig::default(),
        });
    }

    let content = std::fs::read_to_string(&config_path).map_err(|e| BundleError::Io {
        context: format!("reading {}", config_path.display()),
        source: e,
    })?;

    let config: ProjectConfig =
        toml::from_str(&content).map_err(|e| BundleError::ProjectConfigParse {
            path: config_path.clone(),
            source: e,
        })?;

    tracing::debug!(path = %config_path.display(), "loaded project config");

    Ok(Project { root, config })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_project_config() {
        let config: ProjectConfig = toml::from_str("").unwrap();
        assert_eq!(config.paths.fragments, PathBuf::from("src/fragments"));
        assert_eq!(config.paths.templates, PathBuf::from("templates"));
        assert_eq!(config.paths.output, PathBuf::from("dist/templates"));
        assert_eq!(config.reference.repository, DEFAULT_REFERENCE_REPOSITORY);
        assert_eq!(config.reference.bundle, "GitHub.iatemplate");
        assert_eq!(config.reference.template, "github");
    }

    #[test]
    fn parse_partial_project_config() {
        let config: ProjectConfig = toml::from_str(
            r#"
[paths]
output = "build"

[reference]
template = "gh"
"#,
        )
        .unwrap();
        assert_eq!(config.paths.output, PathBuf::from("build"));
        assert_eq!(config.paths.fragments, PathBuf::from("src/fragments"));
        assert_eq!(config.reference.template, "gh");
        assert_eq!(config.reference.bundle, "GitHub.iatemplate");
    }

    #[test]
    fn find_root_walks_up_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();
        let nested = dir.path().join("templates/demo");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), dir.path());
    }

    #[test]
    fn find_root_falls_back_to_start() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(find_project_root(dir.path()), dir.path());
    }

    #[test]
    fn load_project_resolves_paths_against_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "[paths]\nfragments = \"base\"\n",
        )
        .unwrap();

        let project = load_project(dir.path()).unwrap();
        assert_eq!(project.fragments_dir(), dir.path().join("base"));
        assert_eq!(project.templates_dir(), dir.path().join("templates"));
    }

    #[test]
    fn load_project_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "not valid [[ toml").unwrap();

        let result = load_project(dir.path());
        assert!(matches!(
            result,
            Err(BundleError::ProjectConfigParse { .. })
        ));
    }
}
