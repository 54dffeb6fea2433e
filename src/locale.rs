//! Locale type: flexible, normalized language/region identifier.
//!
//! A locale selects which message sources are consulted during translation.
//! Two constructors exist on purpose: [`Locale::parse`] is the lenient
//! conversion the argument extractor applies to string arguments (it never
//! fails, matching how the template engine coerces any string into a locale),
//! while [`Locale::from_code`] is the strict variant for host configuration
//! code that wants malformed tags rejected.

use anyhow::{bail, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A language/region identifier used to select a translation.
///
/// The language subtag is stored lowercase and the region subtag uppercase,
/// so `pt_br`, `pt-BR` and `PT-br` all denote the same locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    /// Lowercase language subtag (e.g., "en", "pt"). Empty for the root locale.
    language: String,

    /// Uppercase region subtag (e.g., "BR"), if any.
    region: Option<String>,
}

impl Locale {
    /// Create a locale from a language subtag.
    pub fn new(language: &str) -> Locale {
        Locale {
            language: language.trim().to_ascii_lowercase(),
            region: None,
        }
    }

    /// Create a locale from language and region subtags.
    pub fn with_region(language: &str, region: &str) -> Locale {
        Locale {
            language: language.trim().to_ascii_lowercase(),
            region: Some(region.trim().to_ascii_uppercase()),
        }
    }

    /// The root locale: no language, no region.
    ///
    /// Used when an empty string is coerced into a locale.
    pub fn root() -> Locale {
        Locale {
            language: String::new(),
            region: None,
        }
    }

    /// English.
    pub fn english() -> Locale {
        Locale::new("en")
    }

    /// Italian.
    pub fn italian() -> Locale {
        Locale::new("it")
    }

    /// Portuguese.
    pub fn portuguese() -> Locale {
        Locale::new("pt")
    }

    /// Spanish.
    pub fn spanish() -> Locale {
        Locale::new("es")
    }

    /// Leniently convert a tag into a locale. Never fails.
    ///
    /// Splits on `-` or `_`, normalizes subtag case, and ignores anything
    /// after the region subtag. An empty or blank tag yields the root
    /// locale. This mirrors the engine-side coercion where every string
    /// argument is a locale.
    ///
    /// # Example
    /// ```
    /// use stencil_translate::locale::Locale;
    ///
    /// assert_eq!(Locale::parse("pt_br"), Locale::with_region("pt", "BR"));
    /// assert_eq!(Locale::parse("EN"), Locale::english());
    /// assert_eq!(Locale::parse(""), Locale::root());
    /// ```
    pub fn parse(tag: &str) -> Locale {
        let tag = tag.trim();
        if tag.is_empty() {
            return Locale::root();
        }

        let mut subtags = tag.split(['-', '_']);
        let language = subtags.next().unwrap_or("");
        match subtags.next() {
            Some(region) if !region.is_empty() => Locale::with_region(language, region),
            _ => Locale::new(language),
        }
    }

    /// Strictly parse a tag, rejecting malformed input.
    ///
    /// The language subtag must be 2-8 ASCII letters; the region subtag, if
    /// present, must be 2 ASCII letters or 3 ASCII digits. Extra subtags are
    /// not accepted.
    ///
    /// # Returns
    /// * `Ok(Locale)` for a well-formed tag
    /// * `Err` describing the offending tag otherwise
    pub fn from_code(tag: &str) -> Result<Locale> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            bail!("Empty locale code");
        }

        let mut subtags = trimmed.split(['-', '_']);
        let language = subtags.next().unwrap_or("");
        if language.len() < 2
            || language.len() > 8
            || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            bail!("Invalid language subtag in locale code: '{}'", tag);
        }

        let region = subtags.next();
        if let Some(region) = region {
            let alpha2 = region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic());
            let digit3 = region.len() == 3 && region.chars().all(|c| c.is_ascii_digit());
            if !alpha2 && !digit3 {
                bail!("Invalid region subtag in locale code: '{}'", tag);
            }
        }
        if subtags.next().is_some() {
            bail!("Unexpected extra subtags in locale code: '{}'", tag);
        }

        Ok(match region {
            Some(region) => Locale::with_region(language, region),
            None => Locale::new(language),
        })
    }

    /// The lowercase language subtag. Empty for the root locale.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The uppercase region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// The normalized tag form (e.g., `en`, `pt-BR`).
    pub fn tag(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// Whether both locales share the same language subtag.
    ///
    /// Used by the message resolver to let a `pt` source answer for `pt-BR`.
    pub fn same_language(&self, other: &Locale) -> bool {
        self.language == other.language
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(region) = &self.region {
            write!(f, "-{}", region)?;
        }
        Ok(())
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Locale::from_code(&tag).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Constructor Tests ====================

    #[test]
    fn test_new_normalizes_case() {
        assert_eq!(Locale::new("EN").language(), "en");
        assert_eq!(Locale::new("It").language(), "it");
    }

    #[test]
    fn test_with_region_normalizes_case() {
        let locale = Locale::with_region("PT", "br");
        assert_eq!(locale.language(), "pt");
        assert_eq!(locale.region(), Some("BR"));
    }

    #[test]
    fn test_root_locale_is_empty() {
        let root = Locale::root();
        assert_eq!(root.language(), "");
        assert_eq!(root.region(), None);
        assert_eq!(root.tag(), "");
    }

    #[test]
    fn test_constants() {
        assert_eq!(Locale::english().language(), "en");
        assert_eq!(Locale::italian().language(), "it");
        assert_eq!(Locale::portuguese().language(), "pt");
        assert_eq!(Locale::spanish().language(), "es");
    }

    // ==================== parse Tests ====================

    #[test]
    fn test_parse_language_only() {
        assert_eq!(Locale::parse("pt"), Locale::portuguese());
    }

    #[test]
    fn test_parse_hyphen_and_underscore() {
        assert_eq!(Locale::parse("pt-BR"), Locale::with_region("pt", "BR"));
        assert_eq!(Locale::parse("pt_br"), Locale::with_region("pt", "BR"));
    }

    #[test]
    fn test_parse_ignores_extra_subtags() {
        assert_eq!(
            Locale::parse("zh-Hans-CN"),
            Locale::with_region("zh", "HANS")
        );
    }

    #[test]
    fn test_parse_empty_yields_root() {
        assert_eq!(Locale::parse(""), Locale::root());
        assert_eq!(Locale::parse("   "), Locale::root());
    }

    #[test]
    fn test_parse_never_fails_on_odd_input() {
        // Lenient conversion: the engine treats any string as a locale.
        let locale = Locale::parse("not a locale");
        assert_eq!(locale.language(), "not a locale");
    }

    // ==================== from_code Tests ====================

    #[test]
    fn test_from_code_valid() {
        assert_eq!(Locale::from_code("en").unwrap(), Locale::english());
        assert_eq!(
            Locale::from_code("pt-BR").unwrap(),
            Locale::with_region("pt", "BR")
        );
        assert_eq!(
            Locale::from_code("es-419").unwrap(),
            Locale::with_region("es", "419")
        );
    }

    #[test]
    fn test_from_code_empty() {
        let result = Locale::from_code("");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Empty"));
    }

    #[test]
    fn test_from_code_bad_language() {
        assert!(Locale::from_code("e").is_err());
        assert!(Locale::from_code("e1").is_err());
        assert!(Locale::from_code("waytoolonglanguage").is_err());
    }

    #[test]
    fn test_from_code_bad_region() {
        assert!(Locale::from_code("pt-B").is_err());
        assert!(Locale::from_code("pt-BRAZIL").is_err());
        assert!(Locale::from_code("pt-1234").is_err());
    }

    #[test]
    fn test_from_code_extra_subtags_rejected() {
        assert!(Locale::from_code("zh-CN-Hans").is_err());
    }

    // ==================== Display and Tag Tests ====================

    #[test]
    fn test_display_matches_tag() {
        let locale = Locale::with_region("pt", "BR");
        assert_eq!(locale.to_string(), "pt-BR");
        assert_eq!(locale.tag(), "pt-BR");
        assert_eq!(Locale::english().to_string(), "en");
    }

    // ==================== Language Matching Tests ====================

    #[test]
    fn test_same_language() {
        let pt = Locale::portuguese();
        let pt_br = Locale::with_region("pt", "BR");
        assert!(pt.same_language(&pt_br));
        assert!(!pt.same_language(&Locale::english()));
    }

    // ==================== Serde Tests ====================

    #[test]
    fn test_serialize_as_tag() {
        let json = serde_json::to_string(&Locale::with_region("pt", "BR")).unwrap();
        assert_eq!(json, "\"pt-BR\"");
    }

    #[test]
    fn test_deserialize_from_tag() {
        let locale: Locale = serde_json::from_str("\"pt-BR\"").unwrap();
        assert_eq!(locale, Locale::with_region("pt", "BR"));
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        let result: std::result::Result<Locale, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
