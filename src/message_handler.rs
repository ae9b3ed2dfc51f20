//! Message handler for the ReadEscape JSON message protocol.
//!
//! `dispatch` routes incoming action messages to the controller and settings
//! engine via the `App` struct, returning the JSON payload the sender gets
//! back. `handle_message` is the outer entry point that folds errors into an
//! `{"error": ...}` payload instead of failing the channel.

use serde_json::{json, Value};
use tracing::debug;

use crate::app::App;
use crate::dom::PageDocument;
use crate::services::reading_mode::ReadingModeTrait;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::errors::MessageError;
use crate::types::settings::ReadingSettings;

/// Dispatches one action message.
///
/// Returns `Ok(Value)` with the action's response payload or a
/// `MessageError` for unknown actions and malformed payloads.
pub fn dispatch(
    app: &mut App,
    page: &mut PageDocument,
    message: &Value,
) -> Result<Value, MessageError> {
    let action = message
        .get("action")
        .and_then(|v| v.as_str())
        .ok_or_else(|| MessageError::InvalidPayload("missing action".to_string()))?;
    debug!("dispatching action '{}'", action);

    match action {
        // Cycle to the next enabled mode (or back to Off) and report the
        // resulting status.
        "toggle-reading-mode" => {
            let status = app.controller.cycle(page);
            serde_json::to_value(&status)
                .map_err(|e| MessageError::InvalidPayload(e.to_string()))
        }

        // Flip the grayout flag, apply it, and persist the flipped flag.
        // `success` reflects whether persistence worked; the visual toggle
        // happens either way.
        "toggle-grayout-background" => {
            let enabled = app.controller.toggle_grayout(page);
            let success = app
                .settings_engine
                .update(app.controller.settings().clone())
                .is_ok();
            Ok(json!({ "enabled": enabled, "success": success }))
        }

        // Replace the settings wholesale: persist, then push into the live
        // controller so caches drop and the page reflects the new values.
        "settings-updated" => {
            let payload = message
                .get("settings")
                .cloned()
                .ok_or_else(|| MessageError::InvalidPayload("missing settings".to_string()))?;
            let settings: ReadingSettings = serde_json::from_value(payload)
                .map_err(|e| MessageError::InvalidPayload(e.to_string()))?;
            let success = app.settings_engine.update(settings.clone()).is_ok();
            app.controller.update_settings(page, settings);
            Ok(json!({ "success": success }))
        }

        other => Err(MessageError::UnknownAction(other.to_string())),
    }
}

/// Handles one message end to end, always producing a response payload.
pub fn handle_message(app: &mut App, page: &mut PageDocument, message: &Value) -> Value {
    match dispatch(app, page, message) {
        Ok(response) => response,
        Err(e) => json!({ "error": e.to_string() }),
    }
}
