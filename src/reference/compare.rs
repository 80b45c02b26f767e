use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use similar::TextDiff;
use walkdir::WalkDir;

use crate::error::{BundleError, Result};
use crate::render::file::is_binary_file;

/// Extensions compared byte for byte; everything else textual is compared
/// modulo trailing whitespace.
const EXACT_EXTENSIONS: &[&str] = &["css", "txt", "pdf", "jpg", "png"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDifference {
    pub path: PathBuf,
    /// Unified diff, for text files only.
    pub diff: Option<String>,
}

/// Result of comparing a generated `Contents` tree against a reference one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comparison {
    /// In the reference but not generated.
    pub missing: Vec<PathBuf>,
    /// Generated but not in the reference.
    pub extra: Vec<PathBuf>,
    pub differing: Vec<FileDifference>,
}

impl Comparison {
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.differing.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_match() {
            return "all files match".to_string();
        }
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!("missing: {}", join_paths(self.missing.iter())));
        }
        if !self.extra.is_empty() {
            parts.push(format!("extra: {}", join_paths(self.extra.iter())));
        }
        if !self.differing.is_empty() {
            parts.push(format!(
                "differ: {}",
                join_paths(self.differing.iter().map(|d| &d.path))
            ));
        }
        parts.join("; ")
    }
}

fn join_paths<'a>(paths: impl Iterator<Item = &'a PathBuf>) -> String {
    paths
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Relative paths of every file under `dir`, sorted.
pub fn collect_files(dir: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut files = BTreeSet::new();
    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(dir)
                .expect("entry must be under dir");
            files.insert(rel.to_path_buf());
        }
    }

    Ok(files)
}

/// Compare two bundle `Contents` directories.
pub fn compare_bundles(expected: &Path, actual: &Path) -> Result<Comparison> {
    let expected_files = collect_files(expected)?;
    let actual_files = collect_files(actual)?;

    let mut comparison = Comparison {
        missing: expected_files.difference(&actual_files).cloned().collect(),
        extra: actual_files.difference(&expected_files).cloned().collect(),
        differing: Vec::new(),
    };

    for rel in expected_files.intersection(&actual_files) {
        let expected_path = expected.join(rel);
        let actual_path = actual.join(rel);

        let expected_bytes = read_file(&expected_path)?;
        let actual_bytes = read_file(&actual_path)?;

        if requires_exact_match(&expected_path) {
            if expected_bytes != actual_bytes {
                comparison.differing.push(FileDifference {
                    path: rel.clone(),
                    diff: None,
                });
            }
            continue;
        }

        match (
            String::from_utf8(expected_bytes),
            String::from_utf8(actual_bytes),
        ) {
            (Ok(old), Ok(new)) => {
                if normalize_text(&old) != normalize_text(&new) {
                    comparison.differing.push(FileDifference {
                        path: rel.clone(),
                        diff: Some(unified_diff(&old, &new, rel)),
                    });
                }
            }
            (old, new) => {
                let old = old.map(String::into_bytes).unwrap_or_else(|e| e.into_bytes());
                let new = new.map(String::into_bytes).unwrap_or_else(|e| e.into_bytes());
                if old != new {
                    comparison.differing.push(FileDifference {
                        path: rel.clone(),
                        diff: None,
                    });
                }
            }
        }
    }

    Ok(comparison)
}

fn requires_exact_match(path: &Path) -> bool {
    let by_extension = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| EXACT_EXTENSIONS.contains(&ext));
    by_extension || is_binary_file(path)
}

/// Strip trailing whitespace from every line, then from the whole text.
fn normalize_text(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| BundleError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })
}

pub fn unified_diff(old: &str, new: &str, path: &Path) -> String {
    let diff = TextDiff::from_lines(old, new);
    let mut output = String::new();

    let _ = writeln!(output, "--- reference/{}", path.display());
    let _ = writeln!(output, "+++ generated/{}", path.display());

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        let _ = write!(output, "{hunk}");
    }

    output
}
