//! Language and country context attached to outgoing requests.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A language with an optional country, e.g. `en-GB` or `de`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Localization {
    language_code: String,
    country_code: Option<String>,
}

impl Localization {
    /// `en-GB`, used whenever nothing else was configured.
    pub const DEFAULT_LANGUAGE: &'static str = "en";
    pub const DEFAULT_COUNTRY: &'static str = "GB";

    pub fn new(language_code: impl Into<String>, country_code: Option<String>) -> Self {
        let country_code = country_code.filter(|c| !c.trim().is_empty());
        Self {
            language_code: language_code.into(),
            country_code,
        }
    }

    /// Language only, no country.
    pub fn language(language_code: impl Into<String>) -> Self {
        Self::new(language_code, None)
    }

    /// Parse `"pt-BR"`, `"pt_BR"` or `"pt"`.
    ///
    /// Returns `None` for an empty code.
    pub fn from_localization_code(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        let mut parts = code.splitn(2, ['-', '_']);
        let language = parts.next()?.to_lowercase();
        if language.is_empty() {
            return None;
        }
        let country = parts.next().map(str::to_uppercase);
        Some(Self::new(language, country))
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// Country code, or `""` when none was given.
    pub fn country_code(&self) -> &str {
        self.country_code.as_deref().unwrap_or("")
    }

    /// `"<lang>-<COUNTRY>"`, or just the language when no country is set.
    pub fn localization_code(&self) -> String {
        match &self.country_code {
            Some(country) => format!("{}-{}", self.language_code, country),
            None => self.language_code.clone(),
        }
    }

    /// Value for an `Accept-Language` header.
    pub fn accept_language(&self) -> String {
        match &self.country_code {
            Some(_) => format!(
                "{}, {};q=0.9",
                self.localization_code(),
                self.language_code
            ),
            None => self.language_code.clone(),
        }
    }

    /// The content country this localization implies.
    ///
    /// Falls back to [`ContentCountry::default`] when no country is set.
    pub fn derived_content_country(&self) -> ContentCountry {
        match &self.country_code {
            Some(country) => ContentCountry::new(country.clone()),
            None => ContentCountry::default(),
        }
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_LANGUAGE,
            Some(Self::DEFAULT_COUNTRY.to_string()),
        )
    }
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.localization_code())
    }
}

/// Two-letter country used to bias what a platform serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentCountry {
    country_code: String,
}

impl ContentCountry {
    pub const DEFAULT_CODE: &'static str = "GB";

    pub fn new(country_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into().to_uppercase(),
        }
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl Default for ContentCountry {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CODE)
    }
}

impl fmt::Display for ContentCountry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.country_code)
    }
}

/// A parsed upload date.
///
/// `approximation` is set when the platform only offered a relative or
/// truncated date ("3 weeks ago", "2019").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWrapper {
    pub date: DateTime<Utc>,
    pub approximation: bool,
}

impl DateWrapper {
    pub fn exact(date: DateTime<Utc>) -> Self {
        Self {
            date,
            approximation: false,
        }
    }

    pub fn approximate(date: DateTime<Utc>) -> Self {
        Self {
            date,
            approximation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_en_gb() {
        let loc = Localization::default();
        assert_eq!(loc.language_code(), "en");
        assert_eq!(loc.country_code(), "GB");
        assert_eq!(loc.localization_code(), "en-GB");
        assert_eq!(ContentCountry::default().country_code(), "GB");
    }

    #[test]
    fn parses_localization_codes() {
        let loc = Localization::from_localization_code("pt-br").unwrap();
        assert_eq!(loc.language_code(), "pt");
        assert_eq!(loc.country_code(), "BR");

        let loc = Localization::from_localization_code("de_AT").unwrap();
        assert_eq!(loc.localization_code(), "de-AT");

        let loc = Localization::from_localization_code("fr").unwrap();
        assert_eq!(loc.country_code(), "");
        assert_eq!(loc.localization_code(), "fr");

        assert!(Localization::from_localization_code("  ").is_none());
    }

    #[test]
    fn blank_country_is_treated_as_absent() {
        let loc = Localization::new("en", Some(String::new()));
        assert_eq!(loc.country_code(), "");
        assert_eq!(loc.derived_content_country(), ContentCountry::default());
    }

    #[test]
    fn derives_country_from_localization() {
        let loc = Localization::new("de", Some("DE".into()));
        assert_eq!(loc.derived_content_country().country_code(), "DE");
    }

    #[test]
    fn accept_language_header_value() {
        assert_eq!(
            Localization::new("de", Some("DE".into())).accept_language(),
            "de-DE, de;q=0.9"
        );
        assert_eq!(Localization::language("ja").accept_language(), "ja");
    }

    #[test]
    fn content_country_is_uppercased() {
        assert_eq!(ContentCountry::new("us").country_code(), "US");
    }
}
