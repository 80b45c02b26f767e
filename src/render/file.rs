use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use regex_lite::{Captures, Regex};

use super::context::Variables;

/// `{key}` where key has no braces or whitespace, so CSS blocks like
/// `{ color: red; }` never look like placeholders.
fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([^{}\s]+)\}").expect("placeholder pattern is valid"))
}

/// Replace every `{key}` whose key is in `vars`, in a single pass.
///
/// Unknown tokens are copied unchanged and replacement text is not rescanned.
pub fn substitute<'a>(content: &'a str, vars: &Variables) -> Cow<'a, str> {
    placeholder_regex().replace_all(content, |caps: &Captures<'_>| match vars.get(&caps[1]) {
        Some(value) => value.to_string(),
        None => caps[0].to_string(),
    })
}

/// Keys of `{token}`s in `content` that `vars` does not define, in order of
/// first appearance.
pub fn unknown_placeholders(content: &str, vars: &Variables) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();
    for caps in placeholder_regex().captures_iter(content) {
        let key = &caps[1];
        if !vars.contains(key) && !unknown.iter().any(|k| k == key) {
            unknown.push(key.to_string());
        }
    }
    unknown
}

/// Detect binary files using content_inspector (BOM-aware, null-byte scanning).
///
/// Reads only the first 8KB to avoid unnecessary allocation for large files.
pub fn is_binary_file(path: &Path) -> bool {
    use std::io::Read;

    let Ok(file) = std::fs::File::open(path) else {
        return false;
    };

    let mut buf = [0u8; 8192];
    let Ok(n) = file.take(8192).read(&mut buf) else {
        return false;
    };

    !content_inspector::inspect(&buf[..n]).is_text()
}
