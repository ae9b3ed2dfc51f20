//! Content Filter — exclusion checks and valid-text-length scoring.
//!
//! "Valid text length" is the text length of an element after conceptually
//! removing every excluded descendant: a skip-during-walk traversal that sums
//! each surviving text node's trimmed character count. Results are cached per
//! element for the duration of one discovery pass.

use std::collections::HashMap;

use ego_tree::NodeId;

use crate::dom::PageDocument;
use crate::services::selector_cache::CompiledSelector;

pub struct ContentFilter {
    length_cache: HashMap<NodeId, usize>,
}

impl ContentFilter {
    pub fn new() -> Self {
        Self {
            length_cache: HashMap::new(),
        }
    }

    /// True iff the element matches any exclusion selector. Selectors that
    /// failed to compile never reach this point (the cache dropped them), so
    /// a malformed selector can only ever be non-matching.
    pub fn should_exclude(
        &self,
        page: &PageDocument,
        id: NodeId,
        exclude: &[CompiledSelector],
    ) -> bool {
        exclude.iter().any(|c| page.matches(id, &c.selector))
    }

    /// Detaches every excluded descendant of `root`. All matches for a
    /// selector are collected before any removal, so removing one match never
    /// skips evaluation of its siblings.
    pub fn remove_unwanted_elements(
        &mut self,
        page: &mut PageDocument,
        root: NodeId,
        exclude: &[CompiledSelector],
    ) {
        for compiled in exclude {
            let matches = page.select_ids_within(root, &compiled.selector);
            for id in matches {
                page.detach(id);
            }
        }
        // Detaching changes text lengths under root.
        self.length_cache.clear();
    }

    /// Text length of the element with excluded subtrees skipped. Each text
    /// node contributes its trimmed character count.
    pub fn valid_text_length(
        &mut self,
        page: &PageDocument,
        id: NodeId,
        exclude: &[CompiledSelector],
    ) -> usize {
        if let Some(&cached) = self.length_cache.get(&id) {
            return cached;
        }

        let mut total = 0;
        let mut pending = page.child_ids(id);
        while let Some(node) = pending.pop() {
            if page.is_element(node) {
                if self.should_exclude(page, node, exclude) {
                    continue;
                }
                pending.extend(page.child_ids(node));
            } else if let Some(text) = page.node_text(node) {
                total += text.trim().chars().count();
            }
        }

        self.length_cache.insert(id, total);
        total
    }

    /// Strictly greater than the configured minimum.
    pub fn has_valid_content(
        &mut self,
        page: &PageDocument,
        id: NodeId,
        exclude: &[CompiledSelector],
        min_content_length: usize,
    ) -> bool {
        self.valid_text_length(page, id, exclude) > min_content_length
    }

    /// Clears the per-pass length cache.
    pub fn clear_cache(&mut self) {
        self.length_cache.clear();
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new()
    }
}
