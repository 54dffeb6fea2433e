//! Internationalization (i18n) filters for stencil-style template engines.
//!
//! This crate contributes a `translate` filter (alias `trans`) and a
//! pluralized `translateChoice` filter (alias `transchoice`) to a host
//! template engine. The host is consumed only through a narrow surface (a
//! per-call argument accessor, the active environment, and error-position
//! metadata), so any engine able to construct those types can mount the
//! extension.
//!
//! # Architecture
//!
//! - `engine`: the narrow host-engine surface (environment, function
//!   requests, registry, positions)
//! - `locale`: normalized language/region identifiers
//! - `message`: message sources, resolution with language fallback,
//!   replacements, and choice-branch selection
//! - `config`: the translate configuration (message sources +
//!   current-locale supplier)
//! - `extract`: the variable-arity argument decision procedure
//! - `functions`: the filter entry points and the registering extension
//! - `error`: the render-time calculation error
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use stencil_translate::config::TranslateConfiguration;
//! use stencil_translate::engine::{Environment, Position};
//! use stencil_translate::functions::TranslateExtension;
//! use stencil_translate::locale::Locale;
//! use stencil_translate::message::MapMessageSource;
//!
//! let mut environment = Environment::new();
//! environment.add_extension(TranslateExtension::new(
//!     TranslateConfiguration::builder()
//!         .with_message_source(Locale::italian(), MapMessageSource::new().with("Hi", "Ciao"))
//!         .with_current_locale(Locale::italian())
//!         .build(),
//! ));
//!
//! let output = environment
//!     .call_function("translate", Position::start(), &[json!("Hi")])
//!     .unwrap();
//! assert_eq!(output, json!("Ciao"));
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod functions;
pub mod locale;
pub mod message;

pub use config::{LocaleSupplier, StaticLocaleSupplier, TranslateConfiguration};
pub use engine::{Environment, Extension, FunctionRequest, Position, TemplateFunction};
pub use error::CalculationError;
pub use extract::{TranslateParameterExtractor, TranslateParameters};
pub use functions::{TranslateChoiceFunction, TranslateExtension, TranslateFunction};
pub use locale::Locale;
pub use message::{MapMessageSource, MessageResolver, MessageSource, Replacement};
