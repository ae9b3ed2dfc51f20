// ReadEscape services
// Services provide core functionality: selector caching, content filtering
// and discovery, grayout, page presentation, mode control, and settings.

pub mod content_discovery;
pub mod content_filter;
pub mod grayout;
pub mod page_view;
pub mod reading_mode;
pub mod selector_cache;
pub mod settings_engine;
