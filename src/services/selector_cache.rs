//! Selector Cache — memoized compiled copies of the three selector lists.
//!
//! Compilation happens lazily on first use after construction or
//! invalidation. A selector that fails to compile is logged and dropped from
//! the compiled list; it never aborts processing of the remaining selectors.

use scraper::Selector;
use tracing::warn;

use crate::types::settings::ReadingSettings;

/// A compiled selector paired with its source text, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct CompiledSelector {
    pub raw: String,
    pub selector: Selector,
}

/// Structural selectors that get first crack at the page regardless of where
/// they sit in the configured list.
const PRIORITY_CONTENT_SELECTORS: &[&str] = &["article", "[role=\"main\"]", "main"];

/// Memoized compiled selector lists, one per role.
#[derive(Debug, Default)]
pub struct SelectorCache {
    content: Option<Vec<CompiledSelector>>,
    comment: Option<Vec<CompiledSelector>>,
    exclude: Option<Vec<CompiledSelector>>,
}

impl SelectorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles any list that is currently absent. Call before the borrow-only
    /// accessors below.
    pub fn ensure(&mut self, settings: &ReadingSettings) {
        if self.content.is_none() {
            self.content = Some(compile_list(&reorder_by_priority(
                &settings.content_selectors,
            )));
        }
        if self.comment.is_none() {
            self.comment = Some(compile_list(&settings.comment_selectors));
        }
        if self.exclude.is_none() {
            self.exclude = Some(compile_list(&settings.exclude_selectors));
        }
    }

    /// Content selectors with higher-confidence structural selectors moved to
    /// the front. Empty until `ensure` has run.
    pub fn content(&self) -> &[CompiledSelector] {
        self.content.as_deref().unwrap_or(&[])
    }

    pub fn comment(&self) -> &[CompiledSelector] {
        self.comment.as_deref().unwrap_or(&[])
    }

    pub fn exclude(&self) -> &[CompiledSelector] {
        self.exclude.as_deref().unwrap_or(&[])
    }

    /// Drops all compiled lists. The next `ensure` recompiles from whatever
    /// settings it is handed.
    pub fn invalidate(&mut self) {
        self.content = None;
        self.comment = None;
        self.exclude = None;
    }
}

/// Moves the structural selectors to the front, keeping the remaining
/// selectors in their original relative order.
fn reorder_by_priority(selectors: &[String]) -> Vec<String> {
    let (priority, rest): (Vec<_>, Vec<_>) = selectors
        .iter()
        .cloned()
        .partition(|s| PRIORITY_CONTENT_SELECTORS.contains(&s.as_str()));
    priority.into_iter().chain(rest).collect()
}

fn compile_list(selectors: &[String]) -> Vec<CompiledSelector> {
    selectors
        .iter()
        .filter_map(|raw| match Selector::parse(raw) {
            Ok(selector) => Some(CompiledSelector {
                raw: raw.clone(),
                selector,
            }),
            Err(e) => {
                warn!("skipping invalid selector '{}': {}", raw, e);
                None
            }
        })
        .collect()
}
