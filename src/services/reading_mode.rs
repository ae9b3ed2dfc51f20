//! Reading mode controller — the mode-cycling state machine.
//!
//! The mode index is an index into the *enabled* modes view of the settings.
//! Cycling walks Off -> mode 0 -> mode 1 -> ... -> last -> Off. Activation
//! snapshots the body markup before any mutation; deactivation restores that
//! snapshot byte for byte. A failed activation (no body, no qualifying
//! content) leaves the page untouched and the state Off.

use ego_tree::NodeId;
use tracing::{debug, info};

use crate::dom::PageDocument;
use crate::services::content_discovery::ContentDiscovery;
use crate::services::grayout::{BackgroundGrayout, BackgroundGrayoutTrait};
use crate::services::page_view::PageView;
use crate::types::reading::ModeStatus;
use crate::types::settings::ReadingSettings;

/// Activation bookkeeping. Either all fields are set (active) or none are
/// (off); the controller never leaves this half-set.
#[derive(Default)]
struct ReadingState {
    mode: Option<usize>,
    original_content: Option<String>,
    wrapper: Option<NodeId>,
}

impl ReadingState {
    fn is_active(&self) -> bool {
        self.mode.is_some()
    }

    fn set_active(&mut self, mode: usize, original: String, wrapper: NodeId) {
        self.mode = Some(mode);
        self.original_content = Some(original);
        self.wrapper = Some(wrapper);
    }

    fn set_off(&mut self) {
        self.mode = None;
        self.original_content = None;
        self.wrapper = None;
    }
}

/// Trait defining the reading mode operations.
pub trait ReadingModeTrait {
    fn initialize(&mut self, page: &mut PageDocument);
    fn cycle(&mut self, page: &mut PageDocument) -> ModeStatus;
    fn enable(&mut self, page: &mut PageDocument, mode_index: usize);
    fn disable(&mut self, page: &mut PageDocument);
    fn switch_to_mode(&mut self, page: &mut PageDocument, mode_index: usize);
    fn status(&self) -> ModeStatus;
    fn update_settings(&mut self, page: &mut PageDocument, settings: ReadingSettings);
    fn toggle_grayout(&mut self, page: &mut PageDocument) -> bool;
}

pub struct ReadingModeController {
    settings: ReadingSettings,
    discovery: ContentDiscovery,
    view: PageView,
    grayout: BackgroundGrayout,
    state: ReadingState,
}

impl ReadingModeController {
    pub fn new(mut settings: ReadingSettings) -> Self {
        settings.sanitize();
        Self {
            settings,
            discovery: ContentDiscovery::new(),
            view: PageView::new(),
            grayout: BackgroundGrayout::new(),
            state: ReadingState::default(),
        }
    }

    pub fn settings(&self) -> &ReadingSettings {
        &self.settings
    }

    /// Overrides the discovery result-cache window. `Duration::ZERO`
    /// disables result caching.
    pub fn set_discovery_cache_ttl(&mut self, ttl: std::time::Duration) {
        self.discovery.set_cache_ttl(ttl);
    }

    /// True when `node` is `ancestor` or sits somewhere below it.
    fn is_within(page: &PageDocument, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = page.parent_element(id);
        }
        false
    }
}

impl ReadingModeTrait for ReadingModeController {
    /// Pushes the per-mode CSS custom properties onto the page and lets the
    /// grayout capture the pristine background.
    fn initialize(&mut self, page: &mut PageDocument) {
        self.view.apply_css_settings(page, &self.settings);
        self.grayout.initialize(page, &self.settings);
    }

    /// The single toggle entry point: advances to the next enabled mode, or
    /// back to Off after the last one.
    fn cycle(&mut self, page: &mut PageDocument) -> ModeStatus {
        let enabled_count = self.settings.enabled_modes().len();
        if enabled_count == 0 {
            if self.state.is_active() {
                self.disable(page);
            }
            return self.status();
        }

        match self.state.mode {
            None => self.enable(page, 0),
            Some(current) if current + 1 < enabled_count => {
                self.switch_to_mode(page, current + 1)
            }
            Some(_) => self.disable(page),
        }
        self.status()
    }

    /// Activates `mode_index`. A no-op when already active, when the index is
    /// out of range, or when the page yields no qualifying content.
    fn enable(&mut self, page: &mut PageDocument, mode_index: usize) {
        if self.state.is_active() {
            return;
        }
        if mode_index >= self.settings.enabled_modes().len() {
            return;
        }
        let Some(body) = page.body_id() else {
            return;
        };
        let Some(main) = self.discovery.find_main_content(page, &self.settings) else {
            debug!("no qualifying main content; reading mode not activated");
            return;
        };
        let comments = self
            .discovery
            .find_comment_section(page, &self.settings)
            .filter(|&c| !Self::is_within(page, main, c) && !Self::is_within(page, c, main));

        // Capture everything before the body is touched.
        let Some(original) = page.inner_html(body) else {
            return;
        };
        let Some(main_copy) = page.snapshot_subtree(main) else {
            return;
        };
        let comment_copy = comments.and_then(|c| page.snapshot_subtree(c));

        let Some((wrapper, container)) = self.view.install_wrapper(page, body) else {
            return;
        };
        if let Some(copied) = page.append_subtree(container, &main_copy) {
            self.discovery.sanitize(page, copied, &self.settings);
        }
        if let Some(copy) = &comment_copy {
            if let Some(copied) = page.append_subtree(container, copy) {
                self.discovery.sanitize(page, copied, &self.settings);
            }
        }
        self.view
            .apply_mode_width(page, wrapper, mode_index, &self.settings);

        self.state.set_active(mode_index, original, wrapper);
        // Cached node ids point into the swapped-out markup now.
        self.discovery.invalidate_results();
        info!("reading mode enabled (mode {})", mode_index);
    }

    /// Restores the original body markup. A no-op when already off.
    fn disable(&mut self, page: &mut PageDocument) {
        let (Some(body), Some(original)) = (page.body_id(), self.state.original_content.take())
        else {
            self.state.set_off();
            return;
        };
        self.view.restore_original(page, body, &original);
        self.state.set_off();
        self.discovery.invalidate_results();
        info!("reading mode disabled");
    }

    /// Re-applies width for another mode without rebuilding the wrapper, so
    /// the original-content snapshot is preserved across the switch. Falls
    /// back to `enable` when currently off.
    fn switch_to_mode(&mut self, page: &mut PageDocument, mode_index: usize) {
        let Some(current) = self.state.mode else {
            self.enable(page, mode_index);
            return;
        };
        if mode_index == current || mode_index >= self.settings.enabled_modes().len() {
            return;
        }
        let Some(wrapper) = self.state.wrapper else {
            return;
        };
        self.view
            .apply_mode_width(page, wrapper, mode_index, &self.settings);
        self.state.mode = Some(mode_index);
        debug!("switched to mode {}", mode_index);
    }

    fn status(&self) -> ModeStatus {
        let Some(index) = self.state.mode else {
            return ModeStatus::off();
        };
        let enabled = self.settings.enabled_modes();
        let Some(mode) = enabled.get(index) else {
            return ModeStatus::off();
        };
        ModeStatus {
            active: true,
            mode_index: index as i64,
            mode_name: mode.name.clone(),
            mode_width: Some(mode.width),
        }
    }

    /// Swaps in new settings: invalidates every cache, refreshes the CSS
    /// custom properties, reconciles the active mode against the new mode
    /// list, and re-derives the grayout from the pristine background.
    fn update_settings(&mut self, page: &mut PageDocument, settings: ReadingSettings) {
        self.settings = settings;
        self.settings.sanitize();
        self.discovery.invalidate();
        self.view.apply_css_settings(page, &self.settings);

        if let Some(current) = self.state.mode {
            if current >= self.settings.enabled_modes().len() {
                self.disable(page);
            } else if let Some(wrapper) = self.state.wrapper {
                self.view
                    .apply_mode_width(page, wrapper, current, &self.settings);
            }
        }

        // Remove-then-apply so an amount change darkens the original
        // background, not the already-darkened one.
        self.grayout.remove(page);
        if self.settings.grayout_background {
            self.grayout.apply(page, self.settings.grayout_amount);
        }
    }

    /// Flips the grayout flag and applies the result, returning the new flag.
    /// Persisting the flipped flag is the caller's concern.
    fn toggle_grayout(&mut self, page: &mut PageDocument) -> bool {
        self.settings.grayout_background = !self.settings.grayout_background;
        self.grayout.toggle(
            page,
            self.settings.grayout_background,
            self.settings.grayout_amount,
        );
        self.settings.grayout_background
    }
}
