use serde::{Deserialize, Serialize};

/// Snapshot of the controller state reported back to message senders.
///
/// `mode_index` is -1 when reading mode is off, matching the wire protocol,
/// and `mode_name` falls back to "Off".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModeStatus {
    pub active: bool,
    pub mode_index: i64,
    pub mode_name: String,
    pub mode_width: Option<u32>,
}

impl ModeStatus {
    pub fn off() -> Self {
        Self {
            active: false,
            mode_index: -1,
            mode_name: "Off".to_string(),
            mode_width: None,
        }
    }
}
