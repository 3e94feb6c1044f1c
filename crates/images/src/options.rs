// ABOUTME: Tunable settings for image collection and ranking, with a fluent builder.
// ABOUTME: Defaults reproduce the stock priorities, size floor, reject patterns, and selector table.

use crate::selectors::{SelectorRule, DEFAULT_IMAGE_SELECTORS};

/// Substrings that mark a URL as a placeholder or layout spacer.
pub const DEFAULT_REJECT_PATTERNS: &[&str] = &["placeholder", "loading", "1x1", "spacer"];

/// Settings for one extraction run.
#[derive(Debug, Clone)]
pub struct Options {
    /// Smallest acceptable width or height when both are known.
    pub min_dimension: u32,
    /// URLs containing any of these substrings are dropped.
    pub reject_patterns: Vec<String>,
    pub structured_priority: i32,
    pub meta_priority: i32,
    pub selector_base_priority: i32,
    pub selectors: Vec<SelectorRule>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_dimension: 200,
            reject_patterns: DEFAULT_REJECT_PATTERNS.iter().map(|p| p.to_string()).collect(),
            structured_priority: 10,
            meta_priority: 9,
            selector_base_priority: 5,
            selectors: DEFAULT_IMAGE_SELECTORS.to_vec(),
        }
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }
}

/// Builder for [`Options`].
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    opts: Options,
}

impl OptionsBuilder {
    /// Create a new OptionsBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Set the minimum width/height for images with known dimensions.
    pub fn min_dimension(mut self, min_dimension: u32) -> Self {
        self.opts.min_dimension = min_dimension;
        self
    }

    /// Add a URL substring that disqualifies an image.
    pub fn reject_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.opts.reject_patterns.push(pattern.into());
        self
    }

    /// Replace the selector table.
    pub fn selectors(mut self, selectors: Vec<SelectorRule>) -> Self {
        self.opts.selectors = selectors;
        self
    }

    /// Append a selector rule after the existing ones.
    pub fn selector(mut self, rule: SelectorRule) -> Self {
        self.opts.selectors.push(rule);
        self
    }

    pub fn structured_priority(mut self, priority: i32) -> Self {
        self.opts.structured_priority = priority;
        self
    }

    pub fn meta_priority(mut self, priority: i32) -> Self {
        self.opts.meta_priority = priority;
        self
    }

    pub fn selector_base_priority(mut self, priority: i32) -> Self {
        self.opts.selector_base_priority = priority;
        self
    }

    pub fn build(self) -> Options {
        self.opts
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
