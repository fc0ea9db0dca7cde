//! Slug normalization for note filenames.

use super::NoteError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 80;

/// Normalize free text into a filename slug (e.g. "Cost Attribution!!" -> "cost-attribution").
///
/// Lower-cases the input, collapses every run of characters outside `[a-z0-9]`
/// into one hyphen, trims hyphens from both ends, and truncates to
/// [`MAX_SLUG_LEN`]. Fails with [`NoteError::EmptySlug`] when nothing survives.
pub fn normalize_slug(raw: &str) -> Result<String, NoteError> {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_hyphen = false;

    for c in raw.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    // All surviving characters are ASCII, so byte truncation is char-safe.
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        return Err(NoteError::EmptySlug {
            input: raw.to_string(),
        });
    }
    Ok(slug.to_string())
}
