//! Localized message catalog
//!
//! Templates are keyed by a format-string id and a culture code. A lookup
//! tries the exact culture ("de-DE"), then its two-letter locale ("de"),
//! then the catalog's default culture. Templates use positional `%s`
//! placeholders; `%%` is a literal percent sign.

use std::collections::HashMap;
use std::fmt::{self, Display, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocalizationError {
    #[error("The localization key {0:?} does not exist")]
    UnknownKey(String),

    #[error("Cannot determine the locale from {0:?}")]
    LocaleDerivation(String),

    #[error("The localization key {key:?} does not have a value for culture {culture:?} or {locale:?}")]
    NoTranslation {
        key: String,
        culture: String,
        locale: String,
    },
}

/// Templates of one message key, by culture
#[derive(Clone, Debug)]
pub struct Localization {
    key: String,
    values_by_culture: HashMap<String, String>,
}

impl Localization {
    pub fn new(key: impl Into<String>, culture: impl Into<String>, template: impl Into<String>) -> Self {
        let mut values_by_culture = HashMap::new();
        values_by_culture.insert(culture.into(), template.into());
        Self {
            key: key.into(),
            values_by_culture,
        }
    }

    /// Add or replace the template for `culture`
    pub fn with(mut self, culture: impl Into<String>, template: impl Into<String>) -> Self {
        self.values_by_culture.insert(culture.into(), template.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Cultures with a template, sorted
    pub fn cultures(&self) -> Vec<&str> {
        let mut cultures: Vec<&str> = self.values_by_culture.keys().map(String::as_str).collect();
        cultures.sort_unstable();
        cultures
    }

    pub fn value(&self, culture: &str) -> Option<&str> {
        self.values_by_culture.get(culture).map(String::as_str)
    }
}

/// Builder; the catalog is immutable once built
pub struct CatalogBuilder {
    default_culture: String,
    entries: HashMap<String, Localization>,
}

impl CatalogBuilder {
    pub fn entry(mut self, localization: Localization) -> Self {
        self.entries.insert(localization.key.clone(), localization);
        self
    }

    pub fn build(self) -> LocalizationCatalog {
        for entry in self.entries.values() {
            if entry.value(&self.default_culture).is_none() {
                warn!(
                    key = %entry.key,
                    default_culture = %self.default_culture,
                    cultures = ?entry.cultures(),
                    "Localization has no template for the default culture"
                );
            }
        }

        LocalizationCatalog {
            default_culture: self.default_culture,
            entries: self.entries,
        }
    }
}

/// Read-only message catalog
#[derive(Clone, Debug)]
pub struct LocalizationCatalog {
    default_culture: String,
    entries: HashMap<String, Localization>,
}

impl LocalizationCatalog {
    pub fn builder(default_culture: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder {
            default_culture: default_culture.into(),
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Localization> {
        self.entries.get(key)
    }

    /// Pick the template for `key` in `culture`
    pub fn template(&self, key: &str, culture: &str) -> Result<&str, LocalizationError> {
        let localization = self
            .entries
            .get(key)
            .ok_or_else(|| LocalizationError::UnknownKey(key.to_string()))?;

        // first try (by culture code)
        if let Some(value) = localization.value(culture) {
            return Ok(value);
        }

        // second try (by locale)
        let locale = locale_from_culture(culture)?;
        if let Some(value) = localization.value(locale) {
            return Ok(value);
        }

        // last try (default culture)
        localization
            .value(&self.default_culture)
            .ok_or_else(|| LocalizationError::NoTranslation {
                key: key.to_string(),
                culture: culture.to_string(),
                locale: locale.to_string(),
            })
    }

    /// Localize `key` for `culture` and substitute `args` positionally
    pub fn localize(
        &self,
        key: &str,
        culture: &str,
        args: &[&dyn Display],
    ) -> Result<String, LocalizationError> {
        let template = self.template(key, culture)?;
        Ok(format_positional(template, args))
    }
}

/// Two-letter locale of a culture code ("de-DE" -> "de")
pub fn locale_from_culture(culture: &str) -> Result<&str, LocalizationError> {
    if culture.chars().count() < 3 {
        return Err(LocalizationError::LocaleDerivation(culture.to_string()));
    }

    let end = culture
        .char_indices()
        .nth(2)
        .map(|(idx, _)| idx)
        .unwrap_or(culture.len());
    Ok(&culture[..end])
}

/// Substitute `%s` placeholders with `args` in order
///
/// Surplus placeholders are kept verbatim; surplus args are ignored.
pub fn format_positional(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    let mut missing = 0usize;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                match args.next() {
                    Some(arg) => {
                        let _ = write!(out, "{}", arg);
                    }
                    None => {
                        missing += 1;
                        out.push_str("%s");
                    }
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }

    let surplus = args.len();
    if missing > 0 || surplus > 0 {
        warn!(template = %template, missing, surplus, "Template and arguments do not line up");
    }

    out
}

impl fmt::Display for Localization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.key, self.cultures().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "deployment_of_%s_started";

    fn catalog() -> LocalizationCatalog {
        LocalizationCatalog::builder("en")
            .entry(
                Localization::new(KEY, "en", "The deployment of %s has been started")
                    .with("de", "Das Deployment von %s wurde gestartet")
                    .with("de-AT", "Das Deployment von %s is g'startet"),
            )
            .build()
    }

    #[test]
    fn test_exact_culture_wins() {
        let text = catalog().localize(KEY, "de-AT", &[&"ak7.io"]).unwrap();
        assert_eq!(text, "Das Deployment von ak7.io is g'startet");
    }

    #[test]
    fn test_falls_back_to_locale() {
        let text = catalog().localize(KEY, "de-DE", &[&"ak7.io"]).unwrap();
        assert_eq!(text, "Das Deployment von ak7.io wurde gestartet");
    }

    #[test]
    fn test_falls_back_to_default_culture() {
        let text = catalog().localize(KEY, "fr-FR", &[&"ak7.io"]).unwrap();
        assert_eq!(text, "The deployment of ak7.io has been started");
    }

    #[test]
    fn test_no_translation_names_culture_and_locale() {
        let catalog = LocalizationCatalog::builder("en")
            .entry(Localization::new("only_german_%s", "de", "Nur Deutsch: %s"))
            .build();

        assert_eq!(
            catalog.localize("only_german_%s", "de-DE", &[&"x"]).unwrap(),
            "Nur Deutsch: x"
        );

        let err = catalog.localize("only_german_%s", "fr-FR", &[&"x"]).unwrap_err();
        assert_eq!(
            err,
            LocalizationError::NoTranslation {
                key: "only_german_%s".to_string(),
                culture: "fr-FR".to_string(),
                locale: "fr".to_string(),
            }
        );
        let message = err.to_string();
        assert!(message.contains("\"fr-FR\""));
        assert!(message.contains("\"fr\""));
    }

    #[test]
    fn test_unknown_key() {
        let err = catalog().localize("missing", "en", &[]).unwrap_err();
        assert_eq!(err, LocalizationError::UnknownKey("missing".to_string()));
    }

    #[test]
    fn test_short_culture_cannot_derive_locale() {
        let err = catalog().localize(KEY, "fr", &[&"x"]).unwrap_err();
        assert_eq!(err, LocalizationError::LocaleDerivation("fr".to_string()));

        // an exact hit needs no derivation
        assert!(catalog().localize(KEY, "en", &[&"x"]).is_ok());
    }

    #[test]
    fn test_locale_from_culture() {
        assert_eq!(locale_from_culture("en-US").unwrap(), "en");
        assert_eq!(locale_from_culture("deu").unwrap(), "de");
        assert_eq!(locale_from_culture("ÄÖ-x").unwrap(), "ÄÖ");
        assert!(locale_from_culture("").is_err());
        assert!(locale_from_culture("de").is_err());
    }

    #[test]
    fn test_format_positional() {
        assert_eq!(format_positional("%s and %s", &[&"a", &2]), "a and 2");
        assert_eq!(format_positional("100%% of %s", &[&"x"]), "100% of x");
        assert_eq!(format_positional("%s and %s", &[&"a"]), "a and %s");
        assert_eq!(format_positional("%d stays", &[]), "%d stays");
        assert_eq!(format_positional("trailing %", &[]), "trailing %");
    }

    #[test]
    fn test_cultures_sorted() {
        let catalog = catalog();
        let entry = catalog.get(KEY).unwrap();
        assert_eq!(entry.cultures(), vec!["de", "de-AT", "en"]);
        assert_eq!(entry.to_string(), format!("{} [de, de-AT, en]", KEY));
    }
}
