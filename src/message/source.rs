//! Message sources: the lookup table from (locale, source text) to
//! translated text.
//!
//! Resolution is fail-open: a text nobody can translate comes back
//! unchanged. Translation never raises an error.

use crate::locale::Locale;
use std::collections::HashMap;
use tracing::debug;

/// Maps source text to translated text within a single locale.
pub trait MessageSource {
    /// The translation for `text`, if this source knows one.
    fn message(&self, text: &str) -> Option<&str>;
}

/// In-memory [`MessageSource`] backed by a map.
///
/// # Example
/// ```
/// use stencil_translate::message::{MapMessageSource, MessageSource};
///
/// let source = MapMessageSource::new().with("Hi", "Ciao");
/// assert_eq!(source.message("Hi"), Some("Ciao"));
/// assert_eq!(source.message("Bye"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapMessageSource {
    messages: HashMap<String, String>,
}

impl MapMessageSource {
    /// Create an empty source.
    pub fn new() -> MapMessageSource {
        MapMessageSource::default()
    }

    /// Add one entry, fluently.
    pub fn with(mut self, text: impl Into<String>, translation: impl Into<String>) -> Self {
        self.messages.insert(text.into(), translation.into());
        self
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the source has no entries.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl From<HashMap<String, String>> for MapMessageSource {
    fn from(messages: HashMap<String, String>) -> Self {
        MapMessageSource { messages }
    }
}

impl<T: Into<String>, U: Into<String>> FromIterator<(T, U)> for MapMessageSource {
    fn from_iter<I: IntoIterator<Item = (T, U)>>(iter: I) -> Self {
        MapMessageSource {
            messages: iter
                .into_iter()
                .map(|(text, translation)| (text.into(), translation.into()))
                .collect(),
        }
    }
}

impl MessageSource for MapMessageSource {
    fn message(&self, text: &str) -> Option<&str> {
        self.messages.get(text).map(String::as_str)
    }
}

/// Ordered collection of per-locale message sources.
///
/// `resolve` consults sources registered for the exact locale first, then
/// sources sharing the language subtag (so a `pt` source answers for
/// `pt-BR`), and finally falls back to the original text.
#[derive(Default)]
pub struct MessageResolver {
    sources: Vec<(Locale, Box<dyn MessageSource>)>,
}

impl MessageResolver {
    /// Create a resolver with no sources.
    pub fn new() -> MessageResolver {
        MessageResolver::default()
    }

    /// Register a source for a locale. Registration order is lookup order.
    pub fn add_source(&mut self, locale: Locale, source: impl MessageSource + 'static) {
        self.sources.push((locale, Box::new(source)));
    }

    /// Number of registered sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Translate `text` for `locale`, falling back to `text` itself.
    pub fn resolve<'a>(&'a self, locale: &Locale, text: &'a str) -> &'a str {
        for (source_locale, source) in &self.sources {
            if source_locale == locale {
                if let Some(translation) = source.message(text) {
                    return translation;
                }
            }
        }

        for (source_locale, source) in &self.sources {
            if source_locale != locale && source_locale.same_language(locale) {
                if let Some(translation) = source.message(text) {
                    return translation;
                }
            }
        }

        debug!(locale = %locale, "no translation found, returning original text");
        text
    }
}
