use serde::{Deserialize, Serialize};

/// Default content selectors, ordered roughly by how often they hit.
pub const DEFAULT_CONTENT_SELECTORS: &[&str] = &[
    ".article-content",
    "article",
    "[role=\"main\"]",
    "main",
    ".content",
    ".post-content",
    ".entry-content",
    ".story-body",
    ".text-content",
    "#content",
    ".article-body",
    ".post-body",
    ".main-content",
    ".article-wrapper",
    ".content-wrapper",
    "#hnmain",
    ".page-content",
    ".page-content.spacer-md",
    ".page-content__content",
];

/// Default comment-section selectors.
pub const DEFAULT_COMMENT_SELECTORS: &[&str] = &[
    ".comments",
    ".comment-section",
    ".comments-section",
    "#comments",
    ".disqus-thread",
    ".fb-comments",
    ".comment-list",
    ".comments-area",
    ".comment-wrapper",
    ".discussion",
    ".comment-container",
    "#bigbox",
    ".comments__wrapper",
    ".comments__container",
];

/// Default exclusion selectors (advertisement elements).
pub const DEFAULT_EXCLUDE_SELECTORS: &[&str] = &[
    ".advertisement",
    ".ads",
    ".ad",
    ".sponsored",
    ".promo",
    ".banner-ad",
    ".ad-banner",
    ".google-ads",
    ".adsense",
    ".ad-container",
    ".ad-wrapper",
    ".ad-space",
    ".ad-block",
    "[class*=\"ad-\"]",
    "[class*=\"ads\"]",
    "[id*=\"ad-\"]",
    "[id*=\"ads\"]",
    "[class*=\"sponsored\"]",
    "[id*=\"sponsored\"]",
    "[class*=\"promo\"]",
    "[id*=\"promo\"]",
    "[data-ad]",
    "[data-ads]",
    "[data-google-ad]",
    "ins.adsbygoogle",
    ".adnxs",
    ".doubleclick",
    ".googlesyndication",
    ".amazon-ads",
];

/// Width bounds enforced by the options UI. The engine itself only clamps
/// defensively on load.
pub const MIN_MODE_WIDTH: u32 = 200;
pub const MAX_MODE_WIDTH: u32 = 1600;

/// Top-level reading settings container.
///
/// The wire shape (storage file and `settings-updated` messages) is camelCase
/// JSON. The struct-level `serde(default)` means a partial document merges
/// over the defaults field by field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingSettings {
    pub reading_modes: Vec<ReadingModeConfig>,
    pub preserve_comments: bool,
    pub min_content_length: usize,
    pub grayout_background: bool,
    pub grayout_amount: f64,
    pub content_selectors: Vec<String>,
    pub comment_selectors: Vec<String>,
    pub exclude_selectors: Vec<String>,
}

impl Default for ReadingSettings {
    fn default() -> Self {
        Self {
            reading_modes: vec![ReadingModeConfig {
                name: "Narrow".to_string(),
                width: 700,
                enabled: true,
            }],
            preserve_comments: true,
            min_content_length: 100,
            grayout_background: true,
            grayout_amount: 0.2,
            content_selectors: to_owned_list(DEFAULT_CONTENT_SELECTORS),
            comment_selectors: to_owned_list(DEFAULT_COMMENT_SELECTORS),
            exclude_selectors: to_owned_list(DEFAULT_EXCLUDE_SELECTORS),
        }
    }
}

impl ReadingSettings {
    /// Returns the enabled modes in configured order. Mode indices throughout
    /// the engine are indices into this view, not into `reading_modes`.
    pub fn enabled_modes(&self) -> Vec<&ReadingModeConfig> {
        self.reading_modes.iter().filter(|m| m.enabled).collect()
    }

    /// Clamps values the options UI normally validates. The engine does not
    /// reject out-of-range input; it pulls it back into range.
    pub fn sanitize(&mut self) {
        self.grayout_amount = self.grayout_amount.clamp(0.0, 1.0);
        for mode in &mut self.reading_modes {
            mode.width = mode.width.clamp(MIN_MODE_WIDTH, MAX_MODE_WIDTH);
        }
    }
}

/// A single width preset. Identity is positional within the enabled-modes
/// view; name uniqueness is the options UI's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadingModeConfig {
    pub name: String,
    pub width: u32,
    pub enabled: bool,
}

fn to_owned_list(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
