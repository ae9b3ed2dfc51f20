// ReadEscape platform paths for Linux
// Config: ~/.config/readescape

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for ReadEscape on Linux.
/// Uses `$XDG_CONFIG_HOME/readescape` if set, otherwise `~/.config/readescape`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg).join("readescape")
    } else {
        let home = env::var("HOME").unwrap_or_else(|_| String::from("/tmp"));
        PathBuf::from(home).join(".config").join("readescape")
    }
}
