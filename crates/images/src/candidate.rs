// ABOUTME: Candidate records produced by collection and returned by ranking.
// ABOUTME: Quality is derived from width/height in the constructor and is never set directly.

use serde::Serialize;

use crate::quality::{quality, Quality};

/// An image reference as discovered, before filtering and ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    pub url: String,
    pub priority: i32,
    /// 0 when unknown.
    pub width: u32,
    /// 0 when unknown.
    pub height: u32,
}

impl RawCandidate {
    pub fn new(url: impl Into<String>, priority: i32, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            priority,
            width,
            height,
        }
    }

    /// Pixel area used as the ranking tie-break. Unknown dimensions give 0.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True when both dimensions are known.
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A ranked image, annotated with its quality tier.
///
/// Fields are read-only so the tier can never disagree with the dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    url: String,
    width: u32,
    height: u32,
    priority: i32,
    quality: Quality,
}

impl Candidate {
    pub fn new(url: impl Into<String>, width: u32, height: u32, priority: i32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
            priority,
            quality: quality(width, height),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl From<RawCandidate> for Candidate {
    fn from(raw: RawCandidate) -> Self {
        Candidate::new(raw.url, raw.width, raw.height, raw.priority)
    }
}
