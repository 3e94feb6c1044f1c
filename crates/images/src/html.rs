// ABOUTME: scraper-backed document snapshot implementing the engine's query interface.
// ABOUTME: Parses HTML once, caches compiled selectors, and reads sizes from width/height attributes.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::document::{ImageElement, ProductDocument};
use crate::error::ImageError;
use crate::structured::{parse_product_json_ld, ProductRecord};

/// Compiled selectors keyed by their source text. Invalid selectors are cached as `None`.
static SELECTOR_CACHE: Lazy<RwLock<HashMap<String, Option<Selector>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Gets or compiles a CSS selector, caching the result.
pub(crate) fn get_or_compile(css: &str) -> Option<Selector> {
    if let Ok(cache) = SELECTOR_CACHE.read() {
        if let Some(cached) = cache.get(css) {
            return cached.clone();
        }
    }

    let compiled = Selector::parse(css).ok();
    if compiled.is_none() {
        tracing::debug!(selector = css, "ignoring invalid selector");
    }
    if let Ok(mut cache) = SELECTOR_CACHE.write() {
        cache
            .entry(css.to_string())
            .or_insert_with(|| compiled.clone());
    }
    compiled
}

/// A parsed HTML page plus the URL it came from.
#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
    page_url: Url,
    base_url: Url,
}

impl HtmlDocument {
    /// Parses `html` as a full document loaded from `page_url`.
    ///
    /// A `<base href>` in the document, if present and valid, becomes the
    /// base for relative image references.
    pub fn parse(html: &str, page_url: &str) -> Result<Self, ImageError> {
        let page_url =
            Url::parse(page_url).map_err(|e| ImageError::invalid_page_url(page_url, e))?;
        if !matches!(page_url.scheme(), "http" | "https") {
            return Err(ImageError::UnsupportedScheme(page_url.scheme().to_string()));
        }

        let html = Html::parse_document(html);
        let base_url = document_base(&html, &page_url);

        Ok(Self {
            html,
            page_url,
            base_url,
        })
    }

    /// The first element matching `css`, if the selector is valid.
    pub(crate) fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = get_or_compile(css)?;
        self.html.select(&selector).next()
    }
}

fn document_base(html: &Html, page_url: &Url) -> Url {
    let href = get_or_compile("base[href]")
        .and_then(|sel| html.select(&sel).next())
        .and_then(|el| el.value().attr("href"));

    match href.and_then(|h| page_url.join(h.trim()).ok()) {
        Some(base) if matches!(base.scheme(), "http" | "https") => base,
        _ => page_url.clone(),
    }
}

impl ProductDocument for HtmlDocument {
    fn page_url(&self) -> &Url {
        &self.page_url
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn product_record(&self) -> Option<ProductRecord> {
        let selector = get_or_compile(r#"script[type="application/ld+json"]"#)?;
        let scripts: Vec<String> = self
            .html
            .select(&selector)
            .map(|el| el.text().collect::<String>())
            .collect();
        parse_product_json_ld(scripts.iter().map(String::as_str))
    }

    fn first_attr(&self, selector: &str, attrs: &[&str]) -> Option<String> {
        let element = self.select_first(selector)?;
        attrs
            .iter()
            .filter_map(|name| element.value().attr(name))
            .map(str::trim)
            .find(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn select_all(&self, selector: &str) -> Vec<Box<dyn ImageElement + '_>> {
        let selector = match get_or_compile(selector) {
            Some(sel) => sel,
            None => return Vec::new(),
        };
        self.html
            .select(&selector)
            .map(|el| Box::new(HtmlElement(el)) as Box<dyn ImageElement + '_>)
            .collect()
    }
}

/// An element of an [`HtmlDocument`].
pub struct HtmlElement<'a>(ElementRef<'a>);

impl ImageElement for HtmlElement<'_> {
    fn attr(&self, name: &str) -> Option<&str> {
        self.0.value().attr(name)
    }

    fn has_ancestor(&self, selector: &str) -> bool {
        let selector = match get_or_compile(selector) {
            Some(sel) => sel,
            None => return false,
        };
        self.0
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|ancestor| selector.matches(&ancestor))
    }

    /// Without layout the only size evidence is the markup's width/height.
    fn natural_size(&self) -> (u32, u32) {
        (
            parse_dimension(self.0.value().attr("width")),
            parse_dimension(self.0.value().attr("height")),
        )
    }
}

/// Parses `"600"` or `"600px"` into pixels. Percentages and junk are unknown (0).
fn parse_dimension(value: Option<&str>) -> u32 {
    let value = match value {
        Some(v) => v.trim(),
        None => return 0,
    };
    let digits_end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, rest) = value.split_at(digits_end);
    if !(rest.is_empty() || rest.eq_ignore_ascii_case("px")) {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta property="og:image" content="  ">
  <meta name="twitter:image" content="/img/share.jpg">
  <link rel="image_src" href="/img/link.jpg">
  <script type="application/ld+json">{"@type": "Product", "name": "Trail Runner", "image": "/img/ld.jpg"}</script>
</head>
<body>
  <picture><img id="pic" src="/img/pic.jpg" width="640px" height="50%"></picture>
  <div class="gallery"><img id="plain" src="/img/plain.jpg" width="900" height="700"></div>
</body>
</html>"#;

    fn doc() -> HtmlDocument {
        HtmlDocument::parse(PAGE, "https://shop.example.com/shoes/trail").unwrap()
    }

    #[test]
    fn test_parse_rejects_bad_page_urls() {
        assert!(HtmlDocument::parse(PAGE, "not a url").unwrap_err().is_invalid_url());
        assert!(matches!(
            HtmlDocument::parse(PAGE, "file:///tmp/page.html"),
            Err(ImageError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_first_attr_falls_through_attribute_list() {
        let doc = doc();
        assert_eq!(
            doc.first_attr(r#"link[rel="image_src"]"#, &["content", "href"]).as_deref(),
            Some("/img/link.jpg")
        );
        // Blank content on the first match is not a value.
        assert_eq!(doc.first_attr(r#"meta[property="og:image"]"#, &["content", "href"]), None);
        assert_eq!(doc.first_attr("meta[property=\"nope\"]", &["content"]), None);
    }

    #[test]
    fn test_product_record_from_json_ld() {
        let record = doc().product_record().unwrap();
        assert_eq!(record.name.as_deref(), Some("Trail Runner"));
        assert_eq!(record.images, vec!["/img/ld.jpg"]);
    }

    #[test]
    fn test_elements_expose_attrs_ancestors_and_size() {
        let doc = doc();
        let pics = doc.select_all("#pic");
        assert_eq!(pics.len(), 1);
        assert_eq!(pics[0].attr("src"), Some("/img/pic.jpg"));
        assert!(pics[0].has_ancestor("picture"));
        assert_eq!(pics[0].natural_size(), (640, 0));

        let plain = doc.select_all("#plain");
        assert!(!plain[0].has_ancestor("picture"));
        assert!(plain[0].has_ancestor(r#"[class*="gallery"]"#));
        assert_eq!(plain[0].natural_size(), (900, 700));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = doc();
        assert!(doc.select_all("[[[invalid").is_empty());
        assert!(!doc.select_all("#pic")[0].has_ancestor("[[[invalid"));
    }

    #[test]
    fn test_base_href_changes_resolution_base() {
        let html = r#"<html><head><base href="https://cdn.example.com/assets/"></head><body></body></html>"#;
        let doc = HtmlDocument::parse(html, "https://shop.example.com/p/1").unwrap();
        assert_eq!(doc.page_url().as_str(), "https://shop.example.com/p/1");
        assert_eq!(doc.base_url().as_str(), "https://cdn.example.com/assets/");
    }

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension(Some("600")), 600);
        assert_eq!(parse_dimension(Some(" 600PX ")), 600);
        assert_eq!(parse_dimension(Some("100%")), 0);
        assert_eq!(parse_dimension(Some("auto")), 0);
        assert_eq!(parse_dimension(Some("")), 0);
        assert_eq!(parse_dimension(None), 0);
    }
}
