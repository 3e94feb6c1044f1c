// ABOUTME: Read-only document query interface the image engine runs against.
// ABOUTME: Lets the collector work over a parsed HTML page or over synthetic test fixtures.

use url::Url;

use crate::structured::ProductRecord;

/// One element returned by a selector query.
pub trait ImageElement {
    /// Returns the raw value of attribute `name`, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// True if some ancestor of this element matches `selector`.
    fn has_ancestor(&self, selector: &str) -> bool;

    /// Intrinsic `(width, height)` in pixels; 0 means unknown.
    fn natural_size(&self) -> (u32, u32);
}

/// A snapshot of a page, as handed over by the scraping shell.
pub trait ProductDocument {
    /// URL the page was loaded from.
    fn page_url(&self) -> &Url;

    /// URL relative image references resolve against. Defaults to the page URL.
    fn base_url(&self) -> &Url {
        self.page_url()
    }

    /// The first structured `Product` record embedded in the page, if any.
    fn product_record(&self) -> Option<ProductRecord>;

    /// For the first element matching `selector`, the first non-empty value
    /// among `attrs` (checked in order).
    fn first_attr(&self, selector: &str, attrs: &[&str]) -> Option<String>;

    /// All elements matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Vec<Box<dyn ImageElement + '_>>;
}
