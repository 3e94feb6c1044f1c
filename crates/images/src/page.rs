// ABOUTME: Page-level extraction: title, headline, description, visible text, and product record.
// ABOUTME: Bundles the page content with the ranked images into the payload handed downstream.

use scraper::node::Node;
use serde::Serialize;

use crate::candidate::Candidate;
use crate::document::ProductDocument;
use crate::html::HtmlDocument;
use crate::options::Options;
use crate::structured::ProductRecord;

/// Cap on collected body text, in characters.
pub const MAX_TEXT_CHARS: usize = 3000;

/// Text runs this short (in characters) are treated as chrome and skipped.
const MIN_TEXT_RUN_CHARS: usize = 10;

const SKIPPED_TEXT_PARENTS: &[&str] = &["script", "style", "noscript"];

/// Human-readable context about the page, used to draft the post text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContent {
    pub title: String,
    pub h1: String,
    pub meta_description: String,
    pub text_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRecord>,
}

/// Everything extracted from one page snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductScrape {
    pub url: String,
    pub images: Vec<Candidate>,
    pub page_content: PageContent,
}

/// Runs image ranking and page-content extraction over one snapshot.
pub fn scrape_product(doc: &HtmlDocument, opts: &Options) -> ProductScrape {
    ProductScrape {
        url: doc.page_url().to_string(),
        images: crate::extract_images(doc, opts),
        page_content: extract_page_content(doc),
    }
}

/// Reads the title, first `<h1>`, meta description and visible text of the page.
pub fn extract_page_content(doc: &HtmlDocument) -> PageContent {
    let text_of = |css: &str| {
        doc.select_first(css)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default()
    };

    let meta_description = doc
        .first_attr(r#"meta[name="description"]"#, &["content"])
        .or_else(|| doc.first_attr(r#"meta[property="og:description"]"#, &["content"]))
        .unwrap_or_default();

    PageContent {
        title: text_of("title"),
        h1: text_of("h1"),
        meta_description,
        text_content: visible_text(doc),
        product: doc.product_record(),
    }
}

/// Joins the text runs under `<main>` (or `<body>`) that are long enough to be
/// content, stopping once the cap is passed.
fn visible_text(doc: &HtmlDocument) -> String {
    let root = match doc.select_first("main").or_else(|| doc.select_first("body")) {
        Some(root) => root,
        None => return String::new(),
    };

    let mut runs: Vec<&str> = Vec::new();
    let mut char_count = 0;

    for node in root.descendants() {
        let text = match node.value() {
            Node::Text(text) => text.trim(),
            _ => continue,
        };
        let skipped = node
            .parent()
            .and_then(|parent| parent.value().as_element())
            .map_or(true, |el| SKIPPED_TEXT_PARENTS.contains(&el.name()));
        if skipped {
            continue;
        }

        let len = text.chars().count();
        if len <= MIN_TEXT_RUN_CHARS {
            continue;
        }
        runs.push(text);
        char_count += len;
        if char_count > MAX_TEXT_CHARS {
            break;
        }
    }

    runs.join(" ").chars().take(MAX_TEXT_CHARS).collect()
}
