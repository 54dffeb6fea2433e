//! Translate configuration: message sources and the current-locale supplier.
//!
//! The configuration is assembled once by the host application, handed to
//! the environment, and treated as read-only for the duration of every
//! render.

use crate::locale::Locale;
use crate::message::{MessageResolver, MessageSource};
use anyhow::{Context, Result};

/// Supplies the locale to use when a filter call names none.
pub trait LocaleSupplier {
    /// The current locale.
    fn current(&self) -> Locale;
}

/// A [`LocaleSupplier`] that always yields the same locale.
#[derive(Debug, Clone)]
pub struct StaticLocaleSupplier {
    locale: Locale,
}

impl StaticLocaleSupplier {
    /// Create a supplier pinned to `locale`.
    pub fn new(locale: Locale) -> StaticLocaleSupplier {
        StaticLocaleSupplier { locale }
    }
}

impl LocaleSupplier for StaticLocaleSupplier {
    fn current(&self) -> Locale {
        self.locale.clone()
    }
}

impl<F: Fn() -> Locale> LocaleSupplier for F {
    fn current(&self) -> Locale {
        self()
    }
}

/// Immutable bundle of message sources and the current-locale supplier.
///
/// The default configuration has no message sources (every text resolves to
/// itself) and supplies English, so behavior is deterministic on hosts that
/// configure nothing.
pub struct TranslateConfiguration {
    message_resolver: MessageResolver,
    current_locale_supplier: Box<dyn LocaleSupplier>,
}

impl TranslateConfiguration {
    /// Start building a configuration.
    pub fn builder() -> TranslateConfigurationBuilder {
        TranslateConfigurationBuilder::new()
    }

    /// The message resolver consulted during translation.
    pub fn message_resolver(&self) -> &MessageResolver {
        &self.message_resolver
    }

    /// The locale supplied for calls that name none.
    pub fn current_locale(&self) -> Locale {
        self.current_locale_supplier.current()
    }
}

impl Default for TranslateConfiguration {
    fn default() -> Self {
        TranslateConfigurationBuilder::new().build()
    }
}

/// Fluent builder for [`TranslateConfiguration`].
///
/// # Example
/// ```
/// use stencil_translate::config::TranslateConfiguration;
/// use stencil_translate::locale::Locale;
/// use stencil_translate::message::MapMessageSource;
///
/// let configuration = TranslateConfiguration::builder()
///     .with_message_source(Locale::italian(), MapMessageSource::new().with("Hi", "Ciao"))
///     .with_current_locale(Locale::italian())
///     .build();
///
/// assert_eq!(configuration.current_locale(), Locale::italian());
/// ```
pub struct TranslateConfigurationBuilder {
    message_resolver: MessageResolver,
    current_locale_supplier: Box<dyn LocaleSupplier>,
}

impl TranslateConfigurationBuilder {
    /// Start from the defaults: no sources, static English supplier.
    pub fn new() -> TranslateConfigurationBuilder {
        TranslateConfigurationBuilder {
            message_resolver: MessageResolver::new(),
            current_locale_supplier: Box::new(StaticLocaleSupplier::new(Locale::english())),
        }
    }

    /// Register a message source for a locale.
    pub fn with_message_source(
        mut self,
        locale: Locale,
        source: impl MessageSource + 'static,
    ) -> Self {
        self.message_resolver.add_source(locale, source);
        self
    }

    /// Register a message source for a locale given as a tag.
    ///
    /// The tag is parsed strictly; a malformed tag is a configuration error
    /// rather than a silently misfiled source.
    pub fn with_message_source_for_tag(
        self,
        tag: &str,
        source: impl MessageSource + 'static,
    ) -> Result<Self> {
        let locale = Locale::from_code(tag)
            .with_context(|| format!("Invalid locale tag for message source: '{}'", tag))?;
        Ok(self.with_message_source(locale, source))
    }

    /// Replace the current-locale supplier.
    pub fn with_current_locale_supplier(
        mut self,
        supplier: impl LocaleSupplier + 'static,
    ) -> Self {
        self.current_locale_supplier = Box::new(supplier);
        self
    }

    /// Pin the current locale to a fixed value.
    pub fn with_current_locale(self, locale: Locale) -> Self {
        self.with_current_locale_supplier(StaticLocaleSupplier::new(locale))
    }

    /// Finish building.
    pub fn build(self) -> TranslateConfiguration {
        TranslateConfiguration {
            message_resolver: self.message_resolver,
            current_locale_supplier: self.current_locale_supplier,
        }
    }
}

impl Default for TranslateConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MapMessageSource;

    // ==================== Default Tests ====================

    #[test]
    fn test_default_supplies_english() {
        let configuration = TranslateConfiguration::default();
        assert_eq!(configuration.current_locale(), Locale::english());
    }

    #[test]
    fn test_default_has_no_sources() {
        let configuration = TranslateConfiguration::default();
        assert!(configuration.message_resolver().is_empty());
    }

    // ==================== Builder Tests ====================

    #[test]
    fn test_builder_registers_sources() {
        let configuration = TranslateConfiguration::builder()
            .with_message_source(Locale::italian(), MapMessageSource::new().with("Hi", "Ciao"))
            .with_message_source(Locale::portuguese(), MapMessageSource::new().with("Hi", "Ola"))
            .build();

        assert_eq!(configuration.message_resolver().len(), 2);
        assert_eq!(
            configuration
                .message_resolver()
                .resolve(&Locale::italian(), "Hi"),
            "Ciao"
        );
    }

    #[test]
    fn test_builder_with_current_locale() {
        let configuration = TranslateConfiguration::builder()
            .with_current_locale(Locale::italian())
            .build();
        assert_eq!(configuration.current_locale(), Locale::italian());
    }

    #[test]
    fn test_builder_with_source_for_tag() {
        let configuration = TranslateConfiguration::builder()
            .with_message_source_for_tag("pt-BR", MapMessageSource::new().with("Hi", "Oi"))
            .unwrap()
            .build();

        assert_eq!(
            configuration
                .message_resolver()
                .resolve(&Locale::parse("pt-BR"), "Hi"),
            "Oi"
        );
    }

    #[test]
    fn test_builder_rejects_malformed_tag() {
        let result = TranslateConfiguration::builder()
            .with_message_source_for_tag("", MapMessageSource::new());
        assert!(result.is_err());
        assert!(result
            .err()
            .map(|error| error.to_string())
            .unwrap_or_default()
            .contains("Invalid locale tag"));
    }

    // ==================== Supplier Tests ====================

    #[test]
    fn test_static_supplier() {
        let supplier = StaticLocaleSupplier::new(Locale::portuguese());
        assert_eq!(supplier.current(), Locale::portuguese());
        assert_eq!(supplier.current(), Locale::portuguese());
    }

    #[test]
    fn test_closure_supplier() {
        let configuration = TranslateConfiguration::builder()
            .with_current_locale_supplier(|| Locale::spanish())
            .build();
        assert_eq!(configuration.current_locale(), Locale::spanish());
    }
}
