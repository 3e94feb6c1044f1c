// ABOUTME: Final filter, sort, and dedup stage turning raw candidates into the ranked output.
// ABOUTME: Drops placeholders and thumbnails, sorts by priority then area, keeps one entry per photo.

use aho_corasick::AhoCorasick;

use crate::candidate::{Candidate, RawCandidate};
use crate::canonical::dedupe_by_canonical;
use crate::options::Options;

/// Filters, orders and deduplicates `raw`, returning quality-annotated candidates.
///
/// Ordering is `priority` descending, then pixel area descending; the sort is
/// stable so exact ties keep their collection order. Dedup runs on the sorted
/// sequence, so the best-ranked variant of each photo survives.
pub fn rank_candidates(raw: Vec<RawCandidate>, opts: &Options) -> Vec<Candidate> {
    let rejects = RejectMatcher::new(&opts.reject_patterns);

    let mut kept: Vec<RawCandidate> = raw
        .into_iter()
        .filter(|c| {
            if rejects.is_match(&c.url) {
                tracing::debug!(url = %c.url, "dropping placeholder image");
                return false;
            }
            if is_too_small(c, opts.min_dimension) {
                tracing::debug!(url = %c.url, width = c.width, height = c.height, "dropping small image");
                return false;
            }
            true
        })
        .collect();

    kept.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.area().cmp(&a.area()))
    });

    dedupe_by_canonical(kept, |c| c.url.as_str())
        .into_iter()
        .map(Candidate::from)
        .collect()
}

/// Known dimensions with either side under `min_dimension`. Unknown sizes pass.
fn is_too_small(candidate: &RawCandidate, min_dimension: u32) -> bool {
    candidate.has_dimensions()
        && (candidate.width < min_dimension || candidate.height < min_dimension)
}

/// Substring matcher over the reject patterns.
struct RejectMatcher {
    automaton: Option<AhoCorasick>,
}

impl RejectMatcher {
    fn new(patterns: &[String]) -> Self {
        let patterns: Vec<&str> = patterns
            .iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        if patterns.is_empty() {
            return Self { automaton: None };
        }
        let automaton = match AhoCorasick::new(&patterns) {
            Ok(ac) => Some(ac),
            Err(err) => {
                tracing::warn!(error = %err, "reject patterns could not be compiled; skipping URL filter");
                None
            }
        };
        Self { automaton }
    }

    fn is_match(&self, url: &str) -> bool {
        self.automaton.as_ref().is_some_and(|ac| ac.is_match(url))
    }
}
