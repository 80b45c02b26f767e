pub mod build;
pub mod check;
pub mod fetch;
pub mod verify;

use std::path::Path;

use iatemplate::config::Project;
use iatemplate::error::BundleError;
use miette::Result;

pub fn load_project(root: Option<&Path>) -> Result<Project> {
    let start = match root {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir().map_err(|e| BundleError::Io {
            context: "getting current directory".into(),
            source: e,
        })?,
    };
    Ok(iatemplate::config::load_project(&start)?)
}

/// An error followed by its `source()` chain, one cause per line.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        out.push_str(&format!("\n      caused by: {c}"));
        cause = c.source();
    }
    out
}
