use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, MAIN_SEPARATOR};

static INVALID_FILENAME_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\x00-\x1f\x7f"*/:<>?\\|]"#).expect("invalid filename regex")
});

/// Make `input` safe to use as a single file or directory name.
///
/// Characters that are illegal on common filesystems (including both
/// directory separators) become `_`. Surrounding whitespace and trailing
/// dots are removed and a leading dot becomes `_`, so the result is never
/// hidden and never `.` or `..`. Escaping an escaped name changes nothing.
pub fn escape_filename(input: &str) -> String {
    let replaced = INVALID_FILENAME_CHARS.replace_all(input, "_");
    let trimmed = replaced
        .trim_end_matches(|c: char| c == '.' || c.is_whitespace())
        .trim_start();
    match trimmed.strip_prefix('.') {
        Some(rest) => format!("_{}", rest),
        None => trimmed.to_string(),
    }
}

/// Escape every component of a relative path while keeping its structure.
///
/// The input is split on `/` and on the platform separator, each piece goes
/// through [`escape_filename`], pieces that escape to nothing are dropped and
/// the rest are joined with the platform separator. A rooted input comes out
/// relative.
pub fn escape_path(input: &str) -> String {
    let sep = MAIN_SEPARATOR.to_string();
    input
        .split(|c: char| c == '/' || c == MAIN_SEPARATOR)
        .map(escape_filename)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(&sep)
}

/// Extension (without the dot) of the file a URI or plain path points at.
/// Returns None when the last path segment has no extension.
pub fn extension_from_uri(uri: &str) -> Option<String> {
    let path = match url::Url::parse(uri) {
        Ok(u) => u.path().to_string(),
        Err(_) => uri.to_string(),
    };
    Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_string())
}
