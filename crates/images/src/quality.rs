// ABOUTME: Quality tier classification for image candidates.
// ABOUTME: Buckets a width/height pair into excellent..low, or unknown when a dimension is missing.

use std::fmt;

use serde::Serialize;

/// Coarse quality bucket derived from pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Excellent,
    High,
    Good,
    Fair,
    Low,
    Unknown,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quality::Excellent => "excellent",
            Quality::High => "high",
            Quality::Good => "good",
            Quality::Fair => "fair",
            Quality::Low => "low",
            Quality::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Classifies an image by its dimensions. Thresholds are checked top-down
/// and the first one that matches wins.
pub fn quality(width: u32, height: u32) -> Quality {
    if width == 0 || height == 0 {
        return Quality::Unknown;
    }

    let pixels = u64::from(width) * u64::from(height);
    let min_dimension = width.min(height);

    if min_dimension >= 1200 && pixels >= 1_000_000 {
        Quality::Excellent
    } else if min_dimension >= 800 && pixels >= 600_000 {
        Quality::High
    } else if min_dimension >= 500 && pixels >= 250_000 {
        Quality::Good
    } else if min_dimension >= 300 {
        Quality::Fair
    } else {
        Quality::Low
    }
}
