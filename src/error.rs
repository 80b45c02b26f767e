#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum BundleError {
    #[error("[{template}] bundle.json not found at {path}")]
    #[diagnostic(help("Every template directory needs a bundle.json file"))]
    ConfigNotFound { template: String, path: PathBuf },

    #[error("[{template}] failed to parse bundle.json")]
    #[diagnostic(help("Check the JSON syntax in bundle.json"))]
    ConfigParse {
        template: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("[{template}] invalid field '{field}' in bundle.json: {reason}")]
    ConfigField {
        template: String,
        field: String,
        reason: String,
    },

    #[error("[{template}] fragment '{fragment}' not found")]
    #[diagnostic(help(
        "Provide an override in the template directory, add it to the base fragments, or list it in skip_fragments"
    ))]
    MissingFragment { template: String, fragment: String },

    #[error("[{template}] asset '{asset}' missing at {path}")]
    #[diagnostic(help("Every entry in 'assets' must exist relative to the template directory"))]
    MissingAsset {
        template: String,
        asset: String,
        path: PathBuf,
    },

    #[error("[{template}] more than one file would be written to {path}")]
    #[diagnostic(help("Rename one of the assets or give the CSS variant a different target"))]
    DuplicateDestination { template: String, path: PathBuf },

    #[error("Templates directory not found: {path}")]
    #[diagnostic(help("Add at least one template under templates/ before building"))]
    TemplatesDirMissing { path: PathBuf },

    #[error("No templates found under {path}")]
    NoTemplates { path: PathBuf },

    #[error("Template '{name}' not found under {path}")]
    #[diagnostic(help("Template names are directory names under the templates directory"))]
    UnknownTemplate { name: String, path: PathBuf },

    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the TOML syntax in iatemplate.toml"))]
    ProjectConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsafe URL scheme in '{url}': {reason}")]
    #[diagnostic(help("Use an https:// URL for the reference repository"))]
    UnsafeUrl { url: String, reason: String },

    #[error("git executable not found on PATH")]
    #[diagnostic(help("Install git, or place the reference bundle in the fixtures directory by hand"))]
    GitNotFound,

    #[error("Git clone failed for {url}")]
    #[diagnostic(help("Check the URL and your network connection"))]
    GitClone { url: String, reason: String },

    #[error("Reference bundle '{bundle}' not found in {path}")]
    ReferenceBundleMissing { bundle: String, path: PathBuf },

    #[error("Generated bundle does not match the reference: {summary}")]
    ReferenceMismatch { summary: String },
}

pub type Result<T> = std::result::Result<T, BundleError>;
