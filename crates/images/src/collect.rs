// ABOUTME: Candidate collection from structured data, share meta tags, and product-image selectors.
// ABOUTME: Resolves each element's best source URL (zoom, srcset, lazy-load attributes) against the page URL.

use std::collections::HashSet;

use url::Url;

use crate::candidate::RawCandidate;
use crate::document::{ImageElement, ProductDocument};
use crate::options::Options;
use crate::selectors::{SelectorRule, PICTURE_ANCESTOR_BONUS, ZOOM_ATTRIBUTE_BONUS};

/// Share-image tags, checked in order. The first matching element per tag is used.
pub const META_IMAGE_SELECTORS: &[&str] = &[
    r#"meta[property="og:image"]"#,
    r#"meta[property="og:image:url"]"#,
    r#"meta[name="twitter:image"]"#,
    r#"link[rel="image_src"]"#,
];

const META_IMAGE_ATTRS: &[&str] = &["content", "href"];

/// Attributes that point straight at a full-size image. Any of them wins outright.
const ZOOM_ATTRS: &[&str] = &["data-zoom-image", "data-large-image", "data-zoom"];

const SRCSET_ATTRS: &[&str] = &["srcset", "data-srcset"];

/// Plain and lazy-load source attributes, in precedence order.
const SRC_ATTRS: &[&str] = &["src", "data-src", "data-lazy-src", "data-original", "data-image"];

/// Insertion-ordered set of raw candidates keyed by URL. The first insert
/// for a URL wins; later inserts for the same URL are ignored.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    items: Vec<RawCandidate>,
    seen: HashSet<String>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `candidate` unless its URL is already present. Returns true if inserted.
    pub fn insert(&mut self, candidate: RawCandidate) -> bool {
        if self.seen.contains(&candidate.url) {
            return false;
        }
        self.seen.insert(candidate.url.clone());
        self.items.push(candidate);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawCandidate> {
        self.items.iter()
    }

    pub fn get(&self, url: &str) -> Option<&RawCandidate> {
        self.items.iter().find(|c| c.url == url)
    }

    /// Consumes the set, yielding candidates in insertion order.
    pub fn into_vec(self) -> Vec<RawCandidate> {
        self.items
    }
}

/// Gathers raw candidates from every source, in precedence order:
/// structured data, then share meta tags, then the selector table.
pub fn collect_candidates<D: ProductDocument + ?Sized>(doc: &D, opts: &Options) -> CandidateSet {
    let base = doc.base_url();
    let mut set = CandidateSet::new();

    if let Some(record) = doc.product_record() {
        for raw in &record.images {
            if let Some(url) = resolve_image_url(raw, base) {
                set.insert(RawCandidate::new(url, opts.structured_priority, 0, 0));
            }
        }
    }
    let structured = set.len();

    for selector in META_IMAGE_SELECTORS {
        if let Some(value) = doc.first_attr(selector, META_IMAGE_ATTRS) {
            if let Some(url) = resolve_image_url(&value, base) {
                set.insert(RawCandidate::new(url, opts.meta_priority, 0, 0));
            }
        }
    }
    let meta = set.len() - structured;

    for rule in &opts.selectors {
        for element in doc.select_all(rule.selector) {
            let element = element.as_ref();
            let url = match extract_image_source(element, base) {
                Some(url) => url,
                None => continue,
            };
            if set.contains(&url) {
                continue;
            }
            let (width, height) = element.natural_size();
            let priority = element_priority(element, rule, opts);
            set.insert(RawCandidate::new(url, priority, width, height));
        }
    }

    tracing::debug!(
        page = %base,
        structured,
        meta,
        selector = set.len() - structured - meta,
        "collected image candidates"
    );

    set
}

/// Score for an element found via `rule`: base + selector bonus, plus
/// per-element bonuses for a zoom attribute and a `<picture>` ancestor.
pub fn element_priority(element: &dyn ImageElement, rule: &SelectorRule, opts: &Options) -> i32 {
    let mut priority = opts.selector_base_priority + rule.bonus;

    if non_empty_attr(element, "data-zoom-image").is_some() {
        priority += ZOOM_ATTRIBUTE_BONUS;
    }
    if element.has_ancestor("picture") {
        priority += PICTURE_ANCESTOR_BONUS;
    }

    priority
}

/// Picks the single best source URL for an image element.
///
/// A zoom attribute wins outright; otherwise the last srcset entry; otherwise
/// the first non-empty src-like attribute. Whichever attribute is chosen is
/// final: if it fails to resolve, no later attribute is tried.
pub fn extract_image_source(element: &dyn ImageElement, base: &Url) -> Option<String> {
    if let Some(zoom) = first_non_empty_attr(element, ZOOM_ATTRS) {
        return resolve_image_url(zoom, base);
    }

    if let Some(srcset) = first_non_empty_attr(element, SRCSET_ATTRS) {
        if let Some(largest) = parse_srcset(srcset).last() {
            return resolve_image_url(largest, base);
        }
    }

    first_non_empty_attr(element, SRC_ATTRS).and_then(|src| resolve_image_url(src, base))
}

fn non_empty_attr<'a>(element: &'a dyn ImageElement, name: &str) -> Option<&'a str> {
    element.attr(name).filter(|v| !v.trim().is_empty())
}

fn first_non_empty_attr<'a>(element: &'a dyn ImageElement, names: &[&str]) -> Option<&'a str> {
    names.iter().find_map(|name| non_empty_attr(element, name))
}

/// Returns the URL part of each srcset entry, in the order written.
pub fn parse_srcset(srcset: &str) -> Vec<&str> {
    srcset
        .split(',')
        .filter_map(|entry| entry.split_whitespace().next())
        .collect()
}

/// Resolves a raw image reference to an absolute http(s) URL.
///
/// Data URIs and anything that does not end up http(s) yield `None`.
/// Protocol-relative URLs take the page's scheme.
pub fn resolve_image_url(raw: &str, base: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() || raw.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("data:")) {
        return None;
    }

    let resolved = if raw.starts_with("//") {
        Url::parse(&format!("{}:{}", base.scheme(), raw)).ok()?
    } else {
        base.join(raw).ok()?
    };

    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        other => {
            tracing::debug!(url = raw, scheme = other, "dropping non-http image URL");
            None
        }
    }
}
