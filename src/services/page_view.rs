//! Page view — builds and tears down the reading-mode presentation.
//!
//! The replacement subtree is a wrapper div holding a single content
//! container; the body carries a marker class while reading mode is active.
//! Width is written inline on the container as the authoritative value, with
//! per-mode CSS custom properties exposed on the root element for any
//! accompanying stylesheet.

use ego_tree::NodeId;
use scraper::Selector;
use tracing::warn;

use crate::dom::PageDocument;
use crate::types::settings::ReadingSettings;

pub const ACTIVE_CLASS: &str = "reading-escape-mode-active";
pub const WRAPPER_CLASS: &str = "reading-escape-wrapper";
pub const CONTENT_CLASS: &str = "reading-escape-content";

pub struct PageView;

impl PageView {
    pub fn new() -> Self {
        Self
    }

    /// Empties the body and installs a fresh wrapper, returning the ids of
    /// the wrapper and its content container. Callers must have captured any
    /// content they still need before this runs.
    pub fn install_wrapper(
        &self,
        page: &mut PageDocument,
        body: NodeId,
    ) -> Option<(NodeId, NodeId)> {
        page.clear_children(body);
        let markup = format!(
            "<div class=\"{}\"><div class=\"{}\"></div></div>",
            WRAPPER_CLASS, CONTENT_CLASS
        );
        let wrapper = page.append_fragment(body, &markup).first().copied()?;
        let container = self.content_container(page, wrapper)?;
        page.add_class(body, ACTIVE_CLASS);
        Some((wrapper, container))
    }

    /// Puts the captured original markup back and drops the active marker.
    pub fn restore_original(&self, page: &mut PageDocument, body: NodeId, original: &str) {
        page.remove_class(body, ACTIVE_CLASS);
        page.set_inner_html(body, original);
    }

    /// Applies one mode's width to the content container: inline
    /// width/max-width plus a `reading-mode-{i}` class for stylesheet
    /// targeting. Previous mode classes are cleared first.
    pub fn apply_mode_width(
        &self,
        page: &mut PageDocument,
        wrapper: NodeId,
        mode_index: usize,
        settings: &ReadingSettings,
    ) {
        let Some(container) = self.content_container(page, wrapper) else {
            warn!("content container missing; width not applied");
            return;
        };
        let enabled = settings.enabled_modes();
        let Some(mode) = enabled.get(mode_index) else {
            return;
        };

        page.set_classes(container, CONTENT_CLASS);
        let width = format!("{}px", mode.width);
        page.set_style_property(container, "width", &width, false);
        page.set_style_property(container, "max-width", &width, false);
        page.add_class(container, &format!("reading-mode-{}", mode_index));
    }

    /// Writes `--reading-escape-mode-{i}-width` for every configured mode on
    /// the root element.
    pub fn apply_css_settings(&self, page: &mut PageDocument, settings: &ReadingSettings) {
        let root = page.root_element_id();
        for (index, mode) in settings.reading_modes.iter().enumerate() {
            page.set_style_property(
                root,
                &format!("--reading-escape-mode-{}-width", index),
                &format!("{}px", mode.width),
                false,
            );
        }
    }

    fn content_container(&self, page: &PageDocument, wrapper: NodeId) -> Option<NodeId> {
        let selector = Selector::parse(&format!(".{}", CONTENT_CLASS)).ok()?;
        page.select_ids_within(wrapper, &selector).first().copied()
    }
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}
