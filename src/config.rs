//! Runtime settings. Defaults cover everything except the API key; an
//! optional `config.toml` in the platform config directory and a handful of
//! environment variables override them, in that order.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use log::LevelFilter;
use serde::Deserialize;

const QUALIFIER: &str = "br";
const ORGANIZATION: &str = "musica-para-eventos";
const APPLICATION: &str = "event-proposal";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Credential for the drafting service. Drafting degrades to fallback
    /// content when this is missing.
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub request_timeout_secs: u64,
    /// Signature line printed under the proposal title.
    pub brand_line: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            request_timeout_secs: 30,
            brand_line: "Música ao vivo para eventos".into(),
            log_level: "info".into(),
        }
    }
}

impl Settings {
    /// Load settings from the config file (if any) and the environment. A
    /// broken config file is skipped; its error is handed back so the caller
    /// can report it once logging is up.
    pub fn load() -> (Self, Option<anyhow::Error>) {
        let path = config_file_path().ok();
        Self::load_from(path.as_deref(), |key| env::var(key).ok())
    }

    /// [`Settings::load`] with an explicit file path and environment lookup.
    pub fn load_from<F>(path: Option<&Path>, lookup: F) -> (Self, Option<anyhow::Error>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mut settings, error) = match path {
            Some(path) if path.exists() => match Self::from_file(path) {
                Ok(settings) => (settings, None),
                Err(err) => (Self::default(), Some(err)),
            },
            _ => (Self::default(), None),
        };
        settings.apply_env(lookup);
        (settings, error)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).context("failed to parse settings")
    }

    /// Apply environment overrides through `lookup` so tests can feed a
    /// fixed map instead of the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY"));
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
        if let Some(model) = lookup("PROPOSTA_MODEL").filter(|m| !m.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        if let Some(level) = lookup("PROPOSTA_LOG").filter(|l| !l.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
    }

    /// Parsed log level, falling back to `Info` for unknown names.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// The API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("could not locate home directory"))
}

pub fn config_file_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory for logs and exported proposals.
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let settings = Settings::from_toml("model = \"gemini-2.0-flash\"\n").unwrap();
        assert_eq!(settings.model, "gemini-2.0-flash");
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.api_key, None);
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut settings = Settings::from_toml("api_key = \"from-file\"").unwrap();
        let env: HashMap<&str, &str> =
            HashMap::from([("API_KEY", " from-env "), ("PROPOSTA_LOG", "debug")]);
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn blank_env_key_does_not_clear_configured_one() {
        let mut settings = Settings::from_toml("api_key = \"kept\"").unwrap();
        settings.apply_env(|key| (key == "GEMINI_API_KEY").then(|| "  ".to_string()));
        assert_eq!(settings.api_key.as_deref(), Some("kept"));
    }

    #[test]
    fn broken_file_falls_back_to_defaults_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "model = \"unterminated\n").unwrap();

        assert!(Settings::from_file(&path).is_err());
        let (settings, error) =
            Settings::load_from(Some(&path), |key| (key == "API_KEY").then(|| "k".into()));
        let error = error.expect("broken file should be reported");
        assert!(format!("{error:#}").contains("failed to parse settings"));
        assert_eq!(settings.model, Settings::default().model);
        assert_eq!(settings.api_key(), Some("k"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (settings, error) =
            Settings::load_from(Some(&dir.path().join("config.toml")), |_| None);
        assert!(error.is_none());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn blank_file_key_counts_as_missing() {
        let settings = Settings::from_toml("api_key = \"\"").unwrap();
        assert!(!settings.has_api_key());
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let settings = Settings {
            log_level: "chatty".into(),
            ..Settings::default()
        };
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }
}
