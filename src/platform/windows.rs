// ReadEscape platform paths for Windows
// Config: %APPDATA%/ReadEscape

use std::env;
use std::path::PathBuf;

/// Returns the configuration directory for ReadEscape on Windows.
/// Uses `%APPDATA%/ReadEscape`, falling back to `C:\Temp` when unset.
pub fn get_config_dir() -> PathBuf {
    let appdata = env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Temp"));
    PathBuf::from(appdata).join("ReadEscape")
}
