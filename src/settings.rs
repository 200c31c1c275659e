// src/settings.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Backend address used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, layered in order: built-in defaults, then the
/// optional settings file, then `POSTDECK_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)?
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)?;

        if let Some(path) = settings_file() {
            builder = builder.add_source(File::from(path).required(false));
        }

        builder
            .add_source(Environment::with_prefix("POSTDECK"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration values")
    }
}

/// `<config dir>/postdeck/settings.ron`, or `None` when the platform has no
/// config directory.
pub fn settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("postdeck").join("settings.ron"))
}

/// Writes a settings template on first run so the file is easy to find and
/// edit. An existing file is never touched.
pub fn write_template_if_missing() -> Result<()> {
    let Some(path) = settings_file() else {
        return Ok(());
    };
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let body = ron::ser::to_string_pretty(&Settings::default(), ron::ser::PrettyConfig::new())
        .context("Failed to render default settings")?;
    let content = format!(
        "// Postdeck settings. POSTDECK_SERVER_URL and\n// POSTDECK_REQUEST_TIMEOUT_SECS override this file.\n{body}\n"
    );
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_the_local_backend() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://localhost:5000");
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn template_round_trips_through_ron() {
        let body = ron::ser::to_string_pretty(&Settings::default(), ron::ser::PrettyConfig::new())
            .expect("template rendering should succeed");
        let parsed: Settings = ron::from_str(&body).expect("template should parse back");
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("temp file should be created");
        write!(
            file,
            "(server_url: \"http://studio.example:8080\", request_timeout_secs: 5)"
        )
        .expect("temp file should be writable");

        let settings: Settings = Config::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)
            .expect("default should set")
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)
            .expect("default should set")
            .add_source(File::from(file.path().to_path_buf()))
            .build()
            .expect("config should build")
            .try_deserialize()
            .expect("config should deserialize");

        assert_eq!(settings.server_url, "http://studio.example:8080");
        assert_eq!(settings.request_timeout_secs, 5);
    }

    #[test]
    fn missing_file_leaves_defaults_in_place() {
        let settings: Settings = Config::builder()
            .set_default("server_url", DEFAULT_SERVER_URL)
            .expect("default should set")
            .set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS)
            .expect("default should set")
            .add_source(File::from(PathBuf::from("/nonexistent/settings.ron")).required(false))
            .build()
            .expect("config should build")
            .try_deserialize()
            .expect("config should deserialize");

        assert_eq!(settings, Settings::default());
    }
}
