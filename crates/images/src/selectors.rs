// ABOUTME: Ordered table of CSS selectors that target likely product-image containers.
// ABOUTME: Each rule carries its own priority bonus; earlier rules claim an image URL first.

/// A selector paired with the priority bonus its matches receive on top of
/// the selector base priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRule {
    pub selector: &'static str,
    pub bonus: i32,
}

impl SelectorRule {
    pub const fn new(selector: &'static str, bonus: i32) -> Self {
        Self { selector, bonus }
    }
}

/// Product-image selectors, evaluated in order.
///
/// Bonuses: +3 product-image named, +2 gallery named, +1 carousel/slider named.
/// Name matching is case-sensitive, so `productGallery` earns no gallery bonus.
pub const DEFAULT_IMAGE_SELECTORS: &[SelectorRule] = &[
    SelectorRule::new(r#"img[class*="product-image"]"#, 3),
    SelectorRule::new(r#"img[class*="productImage"]"#, 3),
    SelectorRule::new("img[data-zoom-image]", 0),
    SelectorRule::new("img[data-large-image]", 0),
    SelectorRule::new(r#"img[class*="gallery"]"#, 2),
    SelectorRule::new(r#"img[itemprop="image"]"#, 0),
    SelectorRule::new(r#"img[class*="product"]"#, 0),
    SelectorRule::new(r#"[class*="product-gallery"] img"#, 2),
    SelectorRule::new(r#"[class*="productGallery"] img"#, 0),
    SelectorRule::new(r#"[class*="product-media"] img"#, 0),
    SelectorRule::new(r#"[class*="image-gallery"] img"#, 2),
    SelectorRule::new(r#"[class*="carousel"] img"#, 1),
    SelectorRule::new(r#"[class*="slider"] img"#, 1),
    SelectorRule::new("picture img", 0),
    SelectorRule::new(r#"[class*="product"] img"#, 0),
    SelectorRule::new("main img", 0),
];

/// Per-element bonus for an explicit zoom attribute.
pub const ZOOM_ATTRIBUTE_BONUS: i32 = 2;

/// Per-element bonus for sitting inside a `<picture>`.
pub const PICTURE_ANCESTOR_BONUS: i32 = 1;
