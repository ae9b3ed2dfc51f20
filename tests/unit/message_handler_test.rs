//! Integration-level unit tests for the message protocol.
//!
//! These tests drive the three supported actions end to end through `App`,
//! checking response shapes, persistence, and error folding.

use readescape::app::App;
use readescape::dom::PageDocument;
use readescape::message_handler::{dispatch, handle_message};
use readescape::services::settings_engine::SettingsEngineTrait;
use readescape::types::settings::ReadingSettings;
use serde_json::json;
use tempfile::TempDir;

const PAGE: &str = "<body>\
    <nav>chrome</nav>\
    <article>Enough article text here for the discovery pass to accept it \
    comfortably, well past the default minimum content length of one hundred \
    characters in total.</article>\
    </body>";

fn config_path(dir: &TempDir) -> String {
    dir.path()
        .join("settings.json")
        .to_string_lossy()
        .to_string()
}

fn app_in_temp(dir: &TempDir) -> App {
    App::new(Some(config_path(dir)))
}

/// The toggle response carries the full mode status in camelCase, with the
/// off state reported as index -1 / "Off".
#[test]
fn test_toggle_reading_mode_response_shape() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in_temp(&dir);
    let mut page = PageDocument::parse(PAGE);

    let on = handle_message(&mut app, &mut page, &json!({"action": "toggle-reading-mode"}));
    assert_eq!(on["active"], json!(true));
    assert_eq!(on["modeIndex"], json!(0));
    assert_eq!(on["modeName"], json!("Narrow"));
    assert_eq!(on["modeWidth"], json!(700));

    let off = handle_message(&mut app, &mut page, &json!({"action": "toggle-reading-mode"}));
    assert_eq!(off["active"], json!(false));
    assert_eq!(off["modeIndex"], json!(-1));
    assert_eq!(off["modeName"], json!("Off"));
    assert_eq!(off["modeWidth"], json!(null));
}

/// When the page yields no qualifying content the toggle still answers,
/// reporting the off state.
#[test]
fn test_toggle_on_empty_page_reports_off() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in_temp(&dir);
    let mut page = PageDocument::parse("<body><p>nothing much</p></body>");

    let response =
        handle_message(&mut app, &mut page, &json!({"action": "toggle-reading-mode"}));
    assert_eq!(response["active"], json!(false));
}

/// The grayout toggle flips the flag, reports it, and persists it so a new
/// App sees the flipped value.
#[test]
fn test_toggle_grayout_persists_across_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = app_in_temp(&dir);
        let mut page = PageDocument::parse(PAGE);
        let response = handle_message(
            &mut app,
            &mut page,
            &json!({"action": "toggle-grayout-background"}),
        );
        assert_eq!(response["enabled"], json!(false));
        assert_eq!(response["success"], json!(true));
    }

    let app = app_in_temp(&dir);
    assert!(!app.settings_engine.get_settings().grayout_background);
    assert!(!app.controller.settings().grayout_background);
}

/// `settings-updated` persists and takes effect immediately: discovery runs
/// against the new selector lists on the very next toggle.
#[test]
fn test_settings_updated_applies_immediately() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in_temp(&dir);
    let mut page = PageDocument::parse(
        "<body><section class=\"custom-main\">Custom body text that is long \
         enough once the minimum is lowered by the settings update.</section></body>",
    );

    // Default selectors find nothing here.
    let response =
        handle_message(&mut app, &mut page, &json!({"action": "toggle-reading-mode"}));
    assert_eq!(response["active"], json!(false));

    let mut settings = ReadingSettings::default();
    settings.content_selectors = vec![".custom-main".to_string()];
    settings.min_content_length = 20;
    let response = handle_message(
        &mut app,
        &mut page,
        &json!({"action": "settings-updated", "settings": settings}),
    );
    assert_eq!(response["success"], json!(true));

    // The negative discovery result must not linger in a cache.
    let response =
        handle_message(&mut app, &mut page, &json!({"action": "toggle-reading-mode"}));
    assert_eq!(response["active"], json!(true));
}

/// Unknown actions and malformed payloads fold into `{"error": ...}` at the
/// outer entry point, and surface as `Err` from `dispatch`.
#[test]
fn test_error_folding() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in_temp(&dir);
    let mut page = PageDocument::parse(PAGE);

    assert!(dispatch(&mut app, &mut page, &json!({"action": "nope"})).is_err());
    let response = handle_message(&mut app, &mut page, &json!({"action": "nope"}));
    assert!(response["error"].as_str().unwrap().contains("nope"));

    let response = handle_message(&mut app, &mut page, &json!({"no_action": true}));
    assert!(response.get("error").is_some());

    let response = handle_message(
        &mut app,
        &mut page,
        &json!({"action": "settings-updated", "settings": {"grayoutAmount": "not a number"}}),
    );
    assert!(response.get("error").is_some());
}
