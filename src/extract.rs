//! Argument extraction for the translate functions.
//!
//! Both filters take a variable number of optional arguments after their
//! fixed ones, and each optional argument is disambiguated by type: a string
//! is a locale, a map is a set of replacements, anything else is an error.
//! Extraction resolves the call into [`TranslateParameters`]: a locale
//! (falling back to the current-locale supplier) plus a possibly-empty,
//! ordered replacement list.
//!
//! Error messages name argument positions with one-based ordinal words
//! ("second argument") even though the argument slice is indexed from zero;
//! the wording is observable behavior and must not drift.

use crate::engine::{display_value, FunctionRequest};
use crate::error::CalculationError;
use crate::locale::Locale;
use crate::message::Replacement;
use serde_json::Value;
use tracing::trace;

/// Resolved parameters of one translate call: locale plus replacements.
///
/// Immutable; created once per filter invocation and discarded when the
/// call returns. The locale is always present (supplier fallback), the
/// replacement list may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateParameters {
    locale: Locale,
    replacements: Vec<Replacement>,
}

impl TranslateParameters {
    /// Bundle a locale and replacements.
    pub fn new(locale: Locale, replacements: Vec<Replacement>) -> TranslateParameters {
        TranslateParameters {
            locale,
            replacements,
        }
    }

    /// The resolved locale.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The resolved replacements, in template order.
    pub fn replacements(&self) -> &[Replacement] {
        &self.replacements
    }
}

/// Classifies a value as a locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleExtractor;

impl LocaleExtractor {
    /// A string value is a locale (lenient parse); nothing else is.
    pub fn extract(&self, value: &Value) -> Option<Locale> {
        match value {
            Value::String(tag) => Some(Locale::parse(tag)),
            _ => None,
        }
    }
}

/// Classifies a value as a replacement map.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplacementsExtractor;

impl ReplacementsExtractor {
    /// A map value yields replacements in insertion order, with values
    /// coerced through the engine's string rendering; nothing else matches.
    pub fn extract(&self, value: &Value) -> Option<Vec<Replacement>> {
        match value {
            Value::Object(entries) => Some(
                entries
                    .iter()
                    .map(|(placeholder, value)| {
                        Replacement::new(placeholder.clone(), display_value(value))
                    })
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Either of the two shapes an ambiguous optional argument may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleOrReplacements {
    /// The argument was a locale.
    Locale(Locale),
    /// The argument was a replacement map.
    Replacements(Vec<Replacement>),
}

/// Classifies a value as a locale or a replacement map.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleOrReplacementsExtractor {
    locale: LocaleExtractor,
    replacements: ReplacementsExtractor,
}

impl LocaleOrReplacementsExtractor {
    /// Try the map shape first, then the locale shape.
    pub fn extract(&self, value: &Value) -> Option<LocaleOrReplacements> {
        if let Some(replacements) = self.replacements.extract(value) {
            return Some(LocaleOrReplacements::Replacements(replacements));
        }
        self.locale
            .extract(value)
            .map(LocaleOrReplacements::Locale)
    }
}

/// The arity-indexed decision procedure for both filter families.
///
/// `translate(text[, map_or_locale[, locale]])` uses the `extract_for_*`
/// methods; `translateChoice(text, count[, map_or_locale[, locale]])` uses
/// the `extract_choice_for_*` methods. The two families differ only in
/// which argument positions carry the optional values and in the ordinal
/// words their errors print.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateParameterExtractor {
    locale_extractor: LocaleExtractor,
    replacements_extractor: ReplacementsExtractor,
    locale_or_replacements_extractor: LocaleOrReplacementsExtractor,
}

impl TranslateParameterExtractor {
    /// Create an extractor.
    pub fn new() -> TranslateParameterExtractor {
        TranslateParameterExtractor::default()
    }

    // ==================== translate family ====================

    /// `translate('text')`: supplier locale, no replacements.
    pub fn extract_for_one_argument(
        &self,
        request: &FunctionRequest<'_>,
    ) -> Result<TranslateParameters, CalculationError> {
        Ok(TranslateParameters::new(current_locale(request), Vec::new()))
    }

    /// `translate('text', X)`: `X` is a locale or a replacement map.
    pub fn extract_for_two_arguments(
        &self,
        request: &FunctionRequest<'_>,
    ) -> Result<TranslateParameters, CalculationError> {
        self.extract_ambiguous_argument(request, 1, "second")
    }

    /// `translate('text', map, locale)`.
    pub fn extract_for_three_arguments(
        &self,
        request: &FunctionRequest<'_>,
    ) -> Result<TranslateParameters, CalculationError> {
        self.extract_map_then_locale(request, 1, "second", "third")
    }

    // ==================== translateChoice family ====================

    /// `translateChoice('text', count)`: supplier locale, no replacements.
    pub fn extract_choice_for_two_arguments(
        &self,
        request: &FunctionRequest<'_>,
    ) -> Result<TranslateParameters, CalculationError> {
        Ok(TranslateParameters::new(current_locale(request), Vec::new()))
    }

    /// `translateChoice('text', count, X)`: `X` is a locale or a map.
    pub fn extract_choice_for_three_arguments(
        &self,
        request: &FunctionRequest<'_>,
    ) -> Result<TranslateParameters, CalculationError> {
        self.extract_ambiguous_argument(request, 2, "third")
    }

    /// `translateChoice('text', count, map, locale)`.
    pub fn extract_choice_for_four_arguments(
        &self,
        request: &FunctionRequest<'_>,
    ) -> Result<TranslateParameters, CalculationError> {
        self.extract_map_then_locale(request, 2, "third", "fourth")
    }

    // ==================== shared branches ====================

    /// One optional argument that may be a locale or a replacement map.
    fn extract_ambiguous_argument(
        &self,
        request: &FunctionRequest<'_>,
        index: usize,
        ordinal: &str,
    ) -> Result<TranslateParameters, CalculationError> {
        let value = argument(request, index)?;
        match self.locale_or_replacements_extractor.extract(value) {
            Some(LocaleOrReplacements::Locale(locale)) => {
                trace!(ordinal, "optional argument classified as locale");
                Ok(TranslateParameters::new(locale, Vec::new()))
            }
            Some(LocaleOrReplacements::Replacements(replacements)) => {
                trace!(ordinal, "optional argument classified as replacement map");
                Ok(TranslateParameters::new(
                    current_locale(request),
                    replacements,
                ))
            }
            None => Err(CalculationError::calculation(
                request.position(),
                format!(
                    "Expecting map or locale as {} argument, but got '{}'",
                    ordinal,
                    display_value(value)
                ),
            )),
        }
    }

    /// A replacement map followed by a locale, each at a fixed position.
    fn extract_map_then_locale(
        &self,
        request: &FunctionRequest<'_>,
        map_index: usize,
        map_ordinal: &str,
        locale_ordinal: &str,
    ) -> Result<TranslateParameters, CalculationError> {
        let map_value = argument(request, map_index)?;
        let replacements = self
            .replacements_extractor
            .extract(map_value)
            .ok_or_else(|| {
                CalculationError::calculation(
                    request.position(),
                    format!(
                        "Expecting map as {} argument, but got '{}'",
                        map_ordinal,
                        display_value(map_value)
                    ),
                )
            })?;

        let locale_value = argument(request, map_index + 1)?;
        let locale = self
            .locale_extractor
            .extract(locale_value)
            .ok_or_else(|| {
                CalculationError::calculation(
                    request.position(),
                    format!(
                        "Expecting locale as {} argument, but got '{}'",
                        locale_ordinal,
                        display_value(locale_value)
                    ),
                )
            })?;

        Ok(TranslateParameters::new(locale, replacements))
    }
}

/// The locale supplied by the active configuration.
fn current_locale(request: &FunctionRequest<'_>) -> Locale {
    request
        .environment()
        .translate_configuration()
        .current_locale()
}

/// The argument at `index`; dispatch guarantees presence, but a missing
/// argument still fails cleanly rather than panicking.
fn argument<'a>(
    request: &'a FunctionRequest<'_>,
    index: usize,
) -> Result<&'a Value, CalculationError> {
    request.get(index).ok_or_else(|| {
        CalculationError::calculation(
            request.position(),
            format!("Missing argument at position {}", index + 1),
        )
    })
}
