use crate::error::{ForgeError, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_SLUG_LEN: usize = 64;

/// Highest numeric suffix `unique_slug` will try before giving up.
pub const MAX_SLUG_SUFFIX: u32 = 10_000;

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN || !slug_re().is_match(slug) {
        return Err(ForgeError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Slug generation
// ---------------------------------------------------------------------------

/// Turn a title into a URL-safe slug.
///
/// ASCII letters and digits are kept (lowercased); any run of other
/// characters collapses into a single hyphen. The result may be empty when
/// the input has nothing slug-worthy in it.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    truncate(slug, MAX_SLUG_LEN)
}

fn truncate(mut slug: String, max: usize) -> String {
    if slug.len() > max {
        slug.truncate(max);
        while slug.ends_with('-') {
            slug.pop();
        }
    }
    slug
}

/// Slugify `text`, then append `-2`, `-3`, ... until `taken` rejects it.
///
/// Fails with `InvalidSlug` when every suffix up to [`MAX_SLUG_SUFFIX`] is
/// taken.
pub fn unique_slug(text: &str, taken: impl Fn(&str) -> bool) -> Result<String> {
    let base = slugify(text);
    if base.is_empty() {
        return Err(ForgeError::InvalidSlug(text.to_string()));
    }
    if !taken(&base) {
        return Ok(base);
    }
    (2..=MAX_SLUG_SUFFIX)
        .map(|n| {
            let suffix = format!("-{n}");
            let stem = truncate(base.clone(), MAX_SLUG_LEN - suffix.len());
            format!("{stem}{suffix}")
        })
        .find(|candidate| !taken(candidate))
        .ok_or_else(|| ForgeError::InvalidSlug(text.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
