//! Writing API responses to disk and trimming them for the terminal.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Marker appended to output cut short by [`truncate_chars`].
pub const TRUNCATION_MARKER: &str = "\n[truncated]";

/// Pretty-print `value` to `dest`, never replacing an existing file.
///
/// The content is written to a temp file and hard-linked into place, so `dest`
/// either appears complete or not at all. Returns `Ok(false)` when `dest`
/// already exists.
pub fn write_json<T: Serialize + ?Sized>(dest: &Path, value: &T) -> Result<bool> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;

    let tmp_path = dest.with_extension(format!("json.{}.tmp", std::process::id()));
    std::fs::write(&tmp_path, json)
        .with_context(|| format!("failed to write temp file: {}", tmp_path.display()))?;
    let linked = std::fs::hard_link(&tmp_path, dest);
    if let Err(e) = std::fs::remove_file(&tmp_path) {
        tracing::warn!(path = %tmp_path.display(), error = %e, "failed to remove temp file");
    }

    match linked {
        Ok(()) => {
            tracing::info!(path = %dest.display(), "response saved");
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to create {}", dest.display())),
    }
}

/// Cut `text` to at most `max_chars` characters, appending [`TRUNCATION_MARKER`].
///
/// `max_chars == 0` disables truncation.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.to_string();
    }
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
