use std::collections::BTreeMap;
use std::path::{Component, Path};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::css::CssConfig;
use crate::error::{BundleError, Result};

/// Per-template configuration read from `bundle.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub name: String,
    pub identifier: String,

    #[serde(default)]
    pub description: String,

    pub title_name: Option<String>,

    #[serde(default)]
    pub subtitle: String,

    pub slug: Option<String>,

    #[serde(default)]
    pub author: String,

    #[serde(default)]
    pub author_url: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(
        default = "default_bundle_version",
        deserialize_with = "scalar_to_string"
    )]
    pub bundle_version: String,

    #[serde(default = "default_development_region")]
    pub development_region: String,

    #[serde(default = "default_bar_height")]
    pub header_height: u32,

    #[serde(default = "default_bar_height")]
    pub footer_height: u32,

    /// Output directory name; defaults to `<name>.iatemplate`.
    pub bundle_dir: Option<String>,

    #[serde(default)]
    pub assets: Vec<String>,

    #[serde(default)]
    pub skip_fragments: Vec<String>,

    #[serde(default)]
    pub smart_tables: bool,

    #[serde(default)]
    pub math: bool,

    #[serde(default = "default_title_sizing")]
    pub title_sizing: String,

    /// Extra `{key}` substitutions. Scalars only.
    #[serde(default)]
    pub placeholders: BTreeMap<String, Value>,

    pub css: Option<CssConfig>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_bundle_version() -> String {
    "1".to_string()
}

fn default_development_region() -> String {
    "en".to_string()
}

fn default_bar_height() -> u32 {
    90
}

fn default_title_sizing() -> String {
    "auto".to_string()
}

fn scalar_to_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or integer, got {other}"
        ))),
    }
}

/// Convert display names into filesystem-friendly slugs.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace([' ', '-'], "_")
}

impl TemplateConfig {
    pub fn bundle_dir_name(&self) -> String {
        self.bundle_dir
            .clone()
            .unwrap_or_else(|| format!("{}.iatemplate", self.name))
    }

    pub fn title_name(&self) -> &str {
        self.title_name.as_deref().unwrap_or(&self.name)
    }

    pub fn slug(&self) -> String {
        self.slug.clone().unwrap_or_else(|| slugify(&self.name))
    }

    pub fn skips(&self, file_name: &str) -> bool {
        self.skip_fragments.iter().any(|s| s == file_name)
    }

    /// Parse a raw `bundle.json` document, naming the offending field on failure.
    pub fn from_json(template: &str, raw: Value) -> Result<Self> {
        let Value::Object(map) = raw else {
            return Err(field_error(template, "(root)", "expected a JSON object"));
        };

        validate_shape(template, &map)?;

        let config: Self =
            serde_json::from_value(Value::Object(map)).map_err(|e| BundleError::ConfigParse {
                template: template.to_string(),
                source: e,
            })?;

        if !is_single_dir_name(&config.bundle_dir_name()) {
            let field = if config.bundle_dir.is_some() {
                "bundle_dir"
            } else {
                "name"
            };
            return Err(field_error(
                template,
                field,
                &format!(
                    "bundle directory '{}' must be a single directory name",
                    config.bundle_dir_name()
                ),
            ));
        }

        Ok(config)
    }
}

/// Exactly one normal path component: no `.`, `..`, root or separators.
fn is_single_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// Placeholder keys must be substitutable by the `{key}` token pattern.
fn is_token_key(key: &str) -> bool {
    !key.is_empty() && !key.contains(|c: char| c == '{' || c == '}' || c.is_whitespace())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    String,
    Integer,
    StringOrInteger,
    Bool,
    StringList,
    ScalarMap,
    Css,
}

impl Shape {
    fn describe(self) -> &'static str {
        match self {
            Shape::String => "a string",
            Shape::Integer => "a non-negative integer",
            Shape::StringOrInteger => "a string or integer",
            Shape::Bool => "a boolean",
            Shape::StringList => "a list of strings",
            Shape::ScalarMap => "an object of string, number or boolean values",
            Shape::Css => "an object with 'base' and 'variants'",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Shape::String => value.is_string(),
            Shape::Integer => value.as_u64().is_some_and(|n| n <= u64::from(u32::MAX)),
            Shape::StringOrInteger => value.is_string() || value.is_u64(),
            Shape::Bool => value.is_boolean(),
            Shape::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Shape::ScalarMap => value.as_object().is_some_and(|m| {
                m.values()
                    .all(|v| v.is_string() || v.is_number() || v.is_boolean())
            }),
            Shape::Css => serde_json::from_value::<CssConfig>(value.clone()).is_ok(),
        }
    }
}

const FIELDS: &[(&str, Shape, bool)] = &[
    ("name", Shape::String, true),
    ("identifier", Shape::String, true),
    ("description", Shape::String, false),
    ("title_name", Shape::String, false),
    ("subtitle", Shape::String, false),
    ("slug", Shape::String, false),
    ("author", Shape::String, false),
    ("author_url", Shape::String, false),
    ("version", Shape::String, false),
    ("bundle_version", Shape::StringOrInteger, false),
    ("development_region", Shape::String, false),
    ("header_height", Shape::Integer, false),
    ("footer_height", Shape::Integer, false),
    ("bundle_dir", Shape::String, false),
    ("assets", Shape::StringList, false),
    ("skip_fragments", Shape::StringList, false),
    ("smart_tables", Shape::Bool, false),
    ("math", Shape::Bool, false),
    ("title_sizing", Shape::String, false),
    ("placeholders", Shape::ScalarMap, false),
    ("css", Shape::Css, false),
];

fn validate_shape(template: &str, map: &Map<String, Value>) -> Result<()> {
    for &(field, shape, required) in FIELDS {
        match map.get(field) {
            None if required => return Err(field_error(template, field, "required field is missing")),
            None => {}
            Some(value) if !shape.accepts(value) => {
                return Err(field_error(
                    template,
                    field,
                    &format!("expected {}", shape.describe()),
                ));
            }
            Some(_) => {}
        }
    }

    if let Some(placeholders) = map.get("placeholders").and_then(Value::as_object) {
        if let Some(key) = placeholders.keys().find(|k| !is_token_key(k)) {
            return Err(field_error(
                template,
                "placeholders",
                &format!("key '{key}' cannot appear in a {{key}} token (no braces or whitespace)"),
            ));
        }
    }

    Ok(())
}

fn field_error(template: &str, field: &str, reason: &str) -> BundleError {
    BundleError::ConfigField {
        template: template.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
