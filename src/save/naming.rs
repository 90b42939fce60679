//! Suggested save destinations.
//!
//! Only used when the destination is derived from preferences or offered at
//! a prompt. Explicit destinations bypass this module entirely.

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::SaveDestination;

// ============================================================================
// Constants
// ============================================================================

/// Base name used when neither the title nor the URL yields one.
pub const FALLBACK_BASE_NAME: &str = "download";

/// Extension of the main file of a page save.
const PAGE_EXTENSION: &str = "html";

/// Suffix appended to the base name for the resource directory.
const RESOURCE_DIR_SUFFIX: &str = "_files";

/// Longest base name kept, in bytes. Leaves room for the extension and the
/// resource directory suffix under a 255-byte component limit.
const MAX_BASE_NAME_BYTES: usize = 200;

/// MIME types the save engine can serialize.
const SAVABLE_MIME_TYPES: &[&str] = &[
    "text/html",
    "application/xhtml+xml",
    "text/plain",
    "text/css",
    "text/xml",
    "application/xml",
    "text/javascript",
    "application/javascript",
];

static ILLEGAL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|\x00-\x1f\x7f]"#).expect("valid illegal-char regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

// ============================================================================
// Public Helpers
// ============================================================================

/// Returns `true` if a document of this MIME type can be saved as a page.
///
/// Parameters such as `; charset=utf-8` are ignored.
#[must_use]
pub fn is_savable_mime_type(mime_type: &str) -> bool {
    let essence = mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    SAVABLE_MIME_TYPES.contains(&essence.as_str())
}

/// Makes `name` safe to use as a single path component.
///
/// Replaces path separators, reserved and control characters with `_`,
/// collapses whitespace runs, trims surrounding dots and spaces, and caps
/// the length. Returns an empty string if nothing usable remains.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(name, " ");
    let replaced = ILLEGAL_CHARS.replace_all(&collapsed, "_");
    let trimmed = replaced.trim_matches(|c: char| c == ' ' || c == '.');
    truncate_to_boundary(trimmed, MAX_BASE_NAME_BYTES)
        .trim_end_matches([' ', '.'])
        .to_string()
}

/// Derives a base name for a page save.
///
/// Preference order: tab title, last path segment of the URL (percent
/// decoded, extension stripped), URL host, [`FALLBACK_BASE_NAME`].
#[must_use]
pub fn suggested_base_name(title: &str, url: Option<&Url>) -> String {
    let from_title = sanitize_file_name(title);
    if !from_title.is_empty() {
        return from_title;
    }

    if let Some(url) = url {
        if let Some(segment) = last_path_segment(url) {
            let stem = Path::new(&segment)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or(segment);
            let name = sanitize_file_name(&stem);
            if !name.is_empty() {
                return name;
            }
        }
        if let Some(host) = url.host_str() {
            let name = sanitize_file_name(host);
            if !name.is_empty() {
                return name;
            }
        }
    }

    FALLBACK_BASE_NAME.to_string()
}

/// Builds the default destination for a page save inside `dir`.
///
/// The main file is `<base>.html` and sub-resources go to `<base>_files`.
/// HTML-only saves receive the same pair and leave the directory unused.
#[must_use]
pub fn page_destination(dir: &Path, base_name: &str) -> SaveDestination {
    SaveDestination {
        main_file: dir.join(format!("{base_name}.{PAGE_EXTENSION}")),
        resource_dir: dir.join(format!("{base_name}{RESOURCE_DIR_SUFFIX}")),
    }
}

/// Builds the default destination for saving the single resource at `url`.
///
/// The file keeps the URL's own file name (with extension) when it has one.
#[must_use]
pub fn resource_destination(dir: &Path, url: &Url) -> SaveDestination {
    let file_name = last_path_segment(url)
        .map(|segment| sanitize_file_name(&segment))
        .filter(|name| !name.is_empty())
        .or_else(|| {
            url.host_str()
                .map(sanitize_file_name)
                .filter(|name| !name.is_empty())
        })
        .unwrap_or_else(|| FALLBACK_BASE_NAME.to_string());

    let stem = Path::new(&file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.clone());

    SaveDestination {
        main_file: dir.join(&file_name),
        resource_dir: dir.join(format!("{stem}{RESOURCE_DIR_SUFFIX}")),
    }
}

/// Re-derives a destination after a prompt returned a path whose file name
/// needs cleaning. Keeps the directory the user picked; the resource
/// directory follows the cleaned name.
#[must_use]
pub fn sanitize_destination(destination: &SaveDestination) -> SaveDestination {
    let dir = destination
        .main_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let Some(file_name) = destination.main_file.file_name() else {
        return destination.clone();
    };
    let file_name = file_name.to_string_lossy();
    let clean = sanitize_file_name(&file_name);
    if clean == file_name {
        return destination.clone();
    }

    let clean = if clean.is_empty() {
        format!("{FALLBACK_BASE_NAME}.{PAGE_EXTENSION}")
    } else {
        clean
    };
    let stem = Path::new(&clean)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| clean.clone());

    SaveDestination {
        main_file: dir.join(&clean),
        resource_dir: dir.join(format!("{stem}{RESOURCE_DIR_SUFFIX}")),
    }
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Last non-empty path segment of `url`, percent-decoded.
fn last_path_segment(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    Some(decoded)
}

/// Cuts `s` to at most `max` bytes on a char boundary.
fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Tests
// ============================================================================
