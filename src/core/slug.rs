//! Slug generation for posts, challenges and causes.
//!
//! A slug is the normalized title followed by the first eight characters of a fresh
//! unique id. Collisions are only improbable; the unique index on each `slug` column
//! is what actually enforces uniqueness.

/// Number of id characters appended to every slug.
const SUFFIX_LEN: usize = 8;

/// Lowercases `title`, keeps ASCII letters and digits, and collapses every other run
/// of characters into a single `-`. Leading and trailing separators are dropped.
#[must_use]
pub fn normalize(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Builds a slug from `title` and an explicit unique id.
#[must_use]
pub fn slug_with_id(title: &str, unique_id: &str) -> String {
    let suffix: String = unique_id.chars().take(SUFFIX_LEN).collect();
    let base = normalize(title);
    if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    }
}

/// Builds a slug from `title` with a freshly generated id.
#[must_use]
pub fn generate(title: &str) -> String {
    slug_with_id(title, &super::new_id())
}
