//! Platform-appropriate filesystem locations.
//!
//! All paths derive from the `dirs` crate so the layout follows each
//! platform's conventions (XDG on Linux, `Application Support` on macOS,
//! `AppData` on Windows).

use std::path::PathBuf;

/// Directory name under the platform config/data roots.
const APP_DIR: &str = "voice-capture";

/// Resolved locations for settings, models and recordings.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Root of the configuration directory.
    pub config_dir: PathBuf,
    /// `settings.toml` inside the configuration directory.
    pub settings_file: PathBuf,
    /// Directory holding GGML model files and the vocabulary JSON.
    pub models_dir: PathBuf,
    /// Directory where session WAV files are written.
    pub recordings_dir: PathBuf,
}

impl AppPaths {
    /// Resolve all paths; falls back to the current directory when the
    /// platform directories cannot be determined.
    pub fn new() -> Self {
        let config_root = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_root = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));

        let config_dir = config_root.join(APP_DIR);
        let data_dir = data_root.join(APP_DIR);

        Self {
            settings_file: config_dir.join("settings.toml"),
            models_dir: data_dir.join("models"),
            recordings_dir: data_dir.join("recordings"),
            config_dir,
        }
    }

    /// Create the config, models and recordings directories if missing.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.models_dir)?;
        std::fs::create_dir_all(&self.recordings_dir)?;
        Ok(())
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
