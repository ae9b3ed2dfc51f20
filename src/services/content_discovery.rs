//! Content Discovery — ranked-selector search for the main content and the
//! comment section.
//!
//! Results are memoized for a short window so one mode-activation workflow
//! does not rescan the page. The cache also remembers "no match". Node ids
//! from a swapped-out body are stale, so the controller clears the result
//! cache after every body mutation; settings changes clear everything.

use std::time::{Duration, Instant};

use ego_tree::NodeId;
use tracing::debug;

use crate::dom::PageDocument;
use crate::services::content_filter::ContentFilter;
use crate::services::selector_cache::SelectorCache;
use crate::types::settings::ReadingSettings;

/// How long a discovery result stays valid.
const DISCOVERY_CACHE_TTL: Duration = Duration::from_secs(5);

/// Candidates at least this long stop the comparison within one selector's
/// match set. Below this threshold the winner is unaffected.
const EARLY_EXIT_TEXT_LENGTH: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct CachedResult {
    value: Option<NodeId>,
    at: Instant,
}

pub struct ContentDiscovery {
    selectors: SelectorCache,
    filter: ContentFilter,
    main_cache: Option<CachedResult>,
    comment_cache: Option<CachedResult>,
    cache_ttl: Duration,
}

impl ContentDiscovery {
    pub fn new() -> Self {
        Self {
            selectors: SelectorCache::new(),
            filter: ContentFilter::new(),
            main_cache: None,
            comment_cache: None,
            cache_ttl: DISCOVERY_CACHE_TTL,
        }
    }

    /// Overrides the result-cache window. Mainly for tests; `Duration::ZERO`
    /// disables result caching.
    pub fn set_cache_ttl(&mut self, ttl: Duration) {
        self.cache_ttl = ttl;
    }

    /// Finds the best main-content element.
    ///
    /// Selector lists are tried in priority order; the first selector that
    /// yields any qualifying match wins, and later selectors are never
    /// evaluated. Within one selector's match set the candidate with the
    /// largest valid text length wins, first-in-document-order on ties.
    pub fn find_main_content(
        &mut self,
        page: &PageDocument,
        settings: &ReadingSettings,
    ) -> Option<NodeId> {
        if let Some(cached) = fresh(&self.main_cache, self.cache_ttl) {
            return cached;
        }

        self.selectors.ensure(settings);
        self.filter.clear_cache();

        let mut winner = None;
        for compiled in self.selectors.content() {
            let matches = page.select_ids(&compiled.selector);
            if matches.is_empty() {
                continue;
            }

            let mut best: Option<(NodeId, usize)> = None;
            for id in matches {
                if self.filter.should_exclude(page, id, self.selectors.exclude()) {
                    continue;
                }
                let length = self
                    .filter
                    .valid_text_length(page, id, self.selectors.exclude());
                if length <= settings.min_content_length {
                    continue;
                }
                if best.map_or(true, |(_, best_len)| length > best_len) {
                    best = Some((id, length));
                }
                if best.is_some_and(|(_, best_len)| best_len >= EARLY_EXIT_TEXT_LENGTH) {
                    break;
                }
            }

            if let Some((id, length)) = best {
                debug!(
                    "main content matched by '{}' with valid text length {}",
                    compiled.raw, length
                );
                winner = Some(id);
                break;
            }
        }

        self.main_cache = Some(CachedResult {
            value: winner,
            at: Instant::now(),
        });
        winner
    }

    /// Finds the comment section, or `None` when comment preservation is
    /// disabled. Comment widgets are typically wrapped twice, so this returns
    /// the grandparent of the first match, falling back to the match itself.
    pub fn find_comment_section(
        &mut self,
        page: &PageDocument,
        settings: &ReadingSettings,
    ) -> Option<NodeId> {
        if !settings.preserve_comments {
            return None;
        }
        if let Some(cached) = fresh(&self.comment_cache, self.cache_ttl) {
            return cached;
        }

        self.selectors.ensure(settings);

        let mut found = None;
        for compiled in self.selectors.comment() {
            if let Some(&first) = page.select_ids(&compiled.selector).first() {
                let grandparent = page
                    .parent_element(first)
                    .and_then(|parent| page.parent_element(parent));
                found = Some(grandparent.unwrap_or(first));
                debug!("comment section matched by '{}'", compiled.raw);
                break;
            }
        }

        self.comment_cache = Some(CachedResult {
            value: found,
            at: Instant::now(),
        });
        found
    }

    /// Strips excluded elements from a subtree (used on the copies placed
    /// into the reading wrapper).
    pub fn sanitize(
        &mut self,
        page: &mut PageDocument,
        root: NodeId,
        settings: &ReadingSettings,
    ) {
        self.selectors.ensure(settings);
        self.filter
            .remove_unwanted_elements(page, root, self.selectors.exclude());
    }

    /// Full invalidation for settings changes: compiled selectors, length
    /// cache, and cached results.
    pub fn invalidate(&mut self) {
        self.selectors.invalidate();
        self.filter.clear_cache();
        self.invalidate_results();
    }

    /// Drops only the cached results. Needed whenever the page body is
    /// swapped or restored, because cached node ids no longer point at live
    /// content.
    pub fn invalidate_results(&mut self) {
        self.main_cache = None;
        self.comment_cache = None;
    }
}

impl Default for ContentDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh(entry: &Option<CachedResult>, ttl: Duration) -> Option<Option<NodeId>> {
    entry
        .as_ref()
        .filter(|cached| cached.at.elapsed() < ttl)
        .map(|cached| cached.value)
}
