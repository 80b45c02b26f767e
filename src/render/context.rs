use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::TemplateConfig;

/// Keys every template defines, whatever its `bundle.json` says.
pub const BUILTIN_KEYS: &[&str] = &[
    "name",
    "identifier",
    "description",
    "title_name",
    "subtitle",
    "slug",
    "author",
    "author_url",
    "version",
    "bundle_version",
    "development_region",
    "header_height",
    "footer_height",
    "smart_tables",
    "math",
    "title_sizing",
];

/// Placeholder key to replacement text for one template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Build the namespace for a template: the built-in keys, then `placeholders`
/// entries layered on top.
pub fn build_variables(config: &TemplateConfig) -> Variables {
    let mut vars = Variables::default();

    vars.insert("name", config.name.as_str());
    vars.insert("identifier", config.identifier.as_str());
    vars.insert("description", config.description.as_str());
    vars.insert("title_name", config.title_name());
    vars.insert("subtitle", config.subtitle.as_str());
    vars.insert("slug", config.slug());
    vars.insert("author", config.author.as_str());
    vars.insert("author_url", config.author_url.as_str());
    vars.insert("version", config.version.as_str());
    vars.insert("bundle_version", config.bundle_version.as_str());
    vars.insert("development_region", config.development_region.as_str());
    vars.insert("header_height", config.header_height.to_string());
    vars.insert("footer_height", config.footer_height.to_string());
    vars.insert("smart_tables", config.smart_tables.to_string());
    vars.insert("math", config.math.to_string());
    vars.insert("title_sizing", config.title_sizing.as_str());

    for (key, value) in &config.placeholders {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        vars.insert(key.as_str(), text);
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(raw: Value) -> TemplateConfig {
        TemplateConfig::from_json("demo", raw).unwrap()
    }

    #[test]
    fn every_builtin_key_is_defined() {
        let vars = build_variables(&config(json!({"name": "Demo", "identifier": "x"})));
        for key in BUILTIN_KEYS {
            assert!(vars.contains(key), "missing builtin key {key}");
        }
        assert_eq!(vars.len(), BUILTIN_KEYS.len());
    }

    #[test]
    fn derived_defaults() {
        let vars = build_variables(&config(json!({"name": "Neon Flux", "identifier": "x"})));
        assert_eq!(vars.get("title_name"), Some("Neon Flux"));
        assert_eq!(vars.get("slug"), Some("neon_flux"));
        assert_eq!(vars.get("header_height"), Some("90"));
        assert_eq!(vars.get("smart_tables"), Some("false"));
        assert_eq!(vars.get("description"), Some(""));
    }

    #[test]
    fn placeholders_extend_and_override() {
        let vars = build_variables(&config(json!({
            "name": "Demo",
            "identifier": "x",
            "placeholders": {"accent": "#ff0066", "columns": 3, "author": "Someone"}
        })));
        assert_eq!(vars.get("accent"), Some("#ff0066"));
        assert_eq!(vars.get("columns"), Some("3"));
        assert_eq!(vars.get("author"), Some("Someone"));
    }
}
