// ABOUTME: Product-image discovery and ranking engine for outdoor-gear posts.
// ABOUTME: Re-exports the document traits, the HTML snapshot, and the collect/rank pipeline.

//! gearpost-images finds the images on a retailer page that plausibly show
//! the product, scores them, folds CDN/size variants of the same photo into
//! one entry and returns them best-first.
//!
//! # Example
//!
//! ```
//! use gearpost_images::{extract_images, HtmlDocument, Options};
//!
//! let html = r#"<html><head>
//!   <meta property="og:image" content="/img/tent.jpg">
//! </head><body></body></html>"#;
//! let doc = HtmlDocument::parse(html, "https://shop.example.com/p/tent").unwrap();
//! let images = extract_images(&doc, &Options::default());
//! assert_eq!(images[0].url(), "https://shop.example.com/img/tent.jpg");
//! assert_eq!(images[0].priority(), 9);
//! ```

pub mod candidate;
pub mod canonical;
pub mod collect;
pub mod document;
pub mod error;
pub mod html;
pub mod options;
pub mod page;
pub mod quality;
pub mod rank;
pub mod selectors;
pub mod structured;

pub use crate::candidate::{Candidate, RawCandidate};
pub use crate::canonical::{canonical_key, dedupe_by_canonical};
pub use crate::collect::{
    collect_candidates, extract_image_source, parse_srcset, resolve_image_url, CandidateSet,
};
pub use crate::document::{ImageElement, ProductDocument};
pub use crate::error::ImageError;
pub use crate::html::HtmlDocument;
pub use crate::options::{Options, OptionsBuilder};
pub use crate::page::{extract_page_content, scrape_product, PageContent, ProductScrape};
pub use crate::quality::{quality, Quality};
pub use crate::rank::rank_candidates;
pub use crate::selectors::{SelectorRule, DEFAULT_IMAGE_SELECTORS};
pub use crate::structured::{parse_product_json_ld, ProductRecord};

/// Collects every image candidate on `doc` and returns them ranked,
/// filtered and deduplicated. An empty vec means no usable image was found.
pub fn extract_images<D: ProductDocument + ?Sized>(doc: &D, opts: &Options) -> Vec<Candidate> {
    let collected = collect_candidates(doc, opts);
    rank_candidates(collected.into_vec(), opts)
}
