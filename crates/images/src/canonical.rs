// ABOUTME: URL canonicalization used only to detect same-photo variants.
// ABOUTME: Strips queries, size/label/numeric suffixes and CDN resize segments, then dedupes on the key.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

// Rewrite rules, applied in this order. The WxH rule must run before the bare
// numeric rule or "-300x300." would be left as "-300x.".
static SIZE_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]\d+x\d+\.").unwrap());
static LABEL_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[-_](thumb|small|medium|large|xlarge|xxl|thumbnail)\.").unwrap()
});
static UNIT_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[-_]\d+(w|h|x)\.").unwrap());
static NUMERIC_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]\d+\.").unwrap());
static CDN_WIDTH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/w_\d+[^/]*/").unwrap());
static CDN_HEIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/h_\d+[^/]*/").unwrap());
static CDN_CROP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/c_\w+[^/]*/").unwrap());

/// Drops the query string, everything from the first `?`.
fn strip_query(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Removes `_800x600.` / `-800x600.` size tokens before the extension.
fn strip_size_suffix(url: &str) -> String {
    SIZE_SUFFIX_RE.replace_all(url, ".").into_owned()
}

/// Removes `-thumb.`, `_LARGE.` and similar label suffixes.
fn strip_label_suffix(url: &str) -> String {
    LABEL_SUFFIX_RE.replace_all(url, ".").into_owned()
}

/// Removes `-640w.` / `-480h.` / `-2x.` unit suffixes, then bare `-123.` / `_123.`.
fn strip_numeric_suffix(url: &str) -> String {
    let without_units = UNIT_SUFFIX_RE.replace_all(url, ".");
    NUMERIC_SUFFIX_RE.replace_all(&without_units, ".").into_owned()
}

/// Removes CDN transform path segments such as `/w_800,q_auto/` or `/c_fill/`.
fn strip_cdn_segments(url: &str) -> String {
    let url = CDN_WIDTH_RE.replace_all(url, "/");
    let url = CDN_HEIGHT_RE.replace_all(&url, "/");
    CDN_CROP_RE.replace_all(&url, "/").into_owned()
}

/// Computes the comparison key for an image URL. Two URLs are the same photo
/// iff their keys are byte-equal. The key is never used as an output URL.
pub fn canonical_key(url: &str) -> String {
    let key = strip_query(url);
    let key = strip_size_suffix(key);
    let key = strip_label_suffix(&key);
    let key = strip_numeric_suffix(&key);
    strip_cdn_segments(&key)
}

/// Keeps the first item per canonical key, preserving input order.
///
/// Callers pass an already-ranked sequence, so "first" means "best".
pub fn dedupe_by_canonical<T, F>(items: Vec<T>, url_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::with_capacity(items.len());

    for item in items {
        let key = canonical_key(url_of(&item));
        if seen.insert(key) {
            unique.push(item);
        } else {
            tracing::debug!(url = url_of(&item), "dropping duplicate image variant");
        }
    }

    unique
}
