use std::process::Command;

use crate::error::{BundleError, Result};

/// Turn git's stderr into a message with a hint for the usual failures.
fn classify_clone_error(stderr: &str) -> String {
    let hint = if stderr.contains("Authentication failed")
        || stderr.contains("could not read Username")
    {
        Some("authentication failed; the reference repository should be public, check the URL")
    } else if stderr.contains("Repository not found")
        || (stderr.contains("not found") && stderr.contains("repository"))
    {
        Some("repository not found; check [reference].repository in iatemplate.toml")
    } else if stderr.contains("Host key verification failed") {
        Some("SSH host key verification failed; use an https:// URL instead")
    } else if stderr.contains("Could not resolve host") || stderr.contains("Connection refused") {
        Some("network error; check your connection, or run with --offline and a local fixture")
    } else {
        None
    };

    match hint {
        Some(hint) => format!("{hint}\n\ngit output:\n{stderr}"),
        None => stderr.to_string(),
    }
}

/// Shallow-clone `url` into a temporary directory that is removed on drop.
///
/// Uses the system `git` binary. `file://` URLs are rejected.
pub fn shallow_clone(url: &str) -> Result<tempfile::TempDir> {
    if url.starts_with("file://") {
        return Err(BundleError::UnsafeUrl {
            url: url.to_string(),
            reason: "file:// URLs are not allowed for the reference repository".into(),
        });
    }

    if url.starts_with("http://") {
        tracing::warn!(url, "using insecure http:// URL; consider https://");
    }

    Command::new("git")
        .arg("--version")
        .output()
        .map_err(|_| BundleError::GitNotFound)?;

    let tmp_dir = tempfile::tempdir().map_err(|e| BundleError::Io {
        context: "creating temporary directory for git clone".into(),
        source: e,
    })?;

    tracing::info!(url, dest = %tmp_dir.path().display(), "cloning reference repository");

    let output = Command::new("git")
        .env("GIT_TERMINAL_PROMPT", "0")
        .args(["clone", "--depth", "1"])
        .arg(url)
        .arg(tmp_dir.path())
        .output()
        .map_err(|e| BundleError::Io {
            context: "running git clone".into(),
            source: e,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(BundleError::GitClone {
            url: url.to_string(),
            reason: classify_clone_error(stderr.trim()),
        });
    }

    Ok(tmp_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_rejects_file_url() {
        match shallow_clone("file:///tmp/repo").unwrap_err() {
            BundleError::UnsafeUrl { url, .. } => assert_eq!(url, "file:///tmp/repo"),
            other => panic!("expected UnsafeUrl error, got: {other:?}"),
        }
    }

    #[test]
    fn classify_auth_failure() {
        let msg = classify_clone_error(
            "fatal: Authentication failed for 'https://github.com/org/repo.git'",
        );
        assert!(msg.starts_with("authentication failed"));
    }

    #[test]
    fn classify_repo_not_found() {
        let msg =
            classify_clone_error("fatal: repository 'https://github.com/org/repo.git/' not found");
        assert!(msg.contains("repository not found"));
    }

    #[test]
    fn classify_host_key_failure() {
        let msg = classify_clone_error("Host key verification failed.");
        assert!(msg.contains("https://"));
    }

    #[test]
    fn classify_network_error() {
        let msg =
            classify_clone_error("fatal: unable to access: Could not resolve host: github.com");
        assert!(msg.contains("--offline"));
    }

    #[test]
    fn classify_unknown_error() {
        let msg = classify_clone_error("fatal: something unexpected happened");
        assert_eq!(msg, "fatal: something unexpected happened");
    }
}
