//! Settings loaded from `~/.config/pipex/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::downloader::http::{HttpConfig, DEFAULT_USER_AGENT};
use crate::localization::{ContentCountry, Localization};

/// User preferences for the CLI and any host that wants the same file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// ISO 639 language code sent to platforms.
    pub language: String,
    /// ISO 3166 country code; `GB` unless configured. An empty value falls
    /// back to the country derived from the localization.
    pub country: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Localization::DEFAULT_LANGUAGE.to_string(),
            country: Some(Localization::DEFAULT_COUNTRY.to_string()),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: None,
        }
    }
}

impl Settings {
    /// Load the settings file, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    pub fn localization(&self) -> Localization {
        let country = self.country.as_deref().map(|c| c.trim().to_uppercase());
        Localization::new(self.language.trim().to_lowercase(), country)
    }

    /// The configured country, else the one derived from the localization.
    pub fn content_country(&self) -> ContentCountry {
        match self.country.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => ContentCountry::new(code),
            _ => self.localization().derived_content_country(),
        }
    }

    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            user_agent: self
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
            ..HttpConfig::default()
        }
    }
}

/// Return the path to the settings file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pipex")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.country.as_deref(), Some("GB"));
        assert_eq!(settings.localization().localization_code(), "en-GB");
        assert_eq!(settings.content_country().country_code(), "GB");
    }

    #[test]
    fn empty_country_falls_back_to_derivation() {
        let settings: Settings = toml::from_str("language = \"de\"\ncountry = \"\"").unwrap();
        assert_eq!(settings.content_country().country_code(), "GB");
        assert_eq!(settings.localization().language_code(), "de");
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
language = "pt"
country = "br"
timeout_secs = 5
connect_timeout_secs = 2
user_agent = "pipex-test/1.0"
"#;
        let settings: Settings = toml::from_str(toml_str).unwrap();
        assert_eq!(settings.localization().localization_code(), "pt-BR");
        assert_eq!(settings.content_country().country_code(), "BR");

        let http = settings.http_config();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.connect_timeout, Duration::from_secs(2));
        assert_eq!(http.user_agent, "pipex-test/1.0");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Settings>("langauge = \"de\"").is_err());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("pipex-no-such-dir/config.toml");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = std::env::temp_dir().join(format!("pipex-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("config.toml"));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
