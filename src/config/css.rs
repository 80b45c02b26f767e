use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Legacy stylesheet section of `bundle.json`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CssConfig {
    #[serde(default)]
    pub base: Vec<String>,

    #[serde(default)]
    pub variants: BTreeMap<String, CssVariant>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CssVariant {
    Path(String),
    Targeted {
        source: String,
        #[serde(default)]
        targets: Targets,
    },
}

/// Extra destination names for a variant; a bare string means one target.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Targets {
    One(String),
    Many(Vec<String>),
}

impl Default for Targets {
    fn default() -> Self {
        Targets::Many(Vec::new())
    }
}

impl Targets {
    pub fn as_slice(&self) -> &[String] {
        match self {
            Targets::One(t) => std::slice::from_ref(t),
            Targets::Many(ts) => ts,
        }
    }
}

impl CssVariant {
    pub fn source(&self) -> &str {
        match self {
            CssVariant::Path(p) => p,
            CssVariant::Targeted { source, .. } => source,
        }
    }

    pub fn targets(&self) -> &[String] {
        match self {
            CssVariant::Path(_) => &[],
            CssVariant::Targeted { targets, .. } => targets.as_slice(),
        }
    }
}
