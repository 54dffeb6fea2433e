//! The translate filter entry points and the extension that registers them.

use crate::config::TranslateConfiguration;
use crate::engine::{display_value, Environment, Extension, FunctionRequest, TemplateFunction};
use crate::error::CalculationError;
use crate::extract::{TranslateParameterExtractor, TranslateParameters};
use crate::message::{apply_replacements, select_branch, Replacement};
use serde_json::Value;
use tracing::trace;

/// The `translate` filter (alias `trans`).
///
/// `translate(text[, map_or_locale[, locale]])` resolves `text` through
/// the message store for the extracted locale and applies the extracted
/// replacements. Unknown texts come back unchanged.
#[derive(Debug, Default)]
pub struct TranslateFunction {
    extractor: TranslateParameterExtractor,
}

impl TemplateFunction for TranslateFunction {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["trans"]
    }

    fn minimum_arguments(&self) -> usize {
        1
    }

    fn maximum_arguments(&self) -> usize {
        3
    }

    fn execute(&self, request: &FunctionRequest<'_>) -> Result<Value, CalculationError> {
        let text = text_argument(request)?;
        let parameters = match request.number_of_arguments() {
            1 => self.extractor.extract_for_one_argument(request),
            2 => self.extractor.extract_for_two_arguments(request),
            _ => self.extractor.extract_for_three_arguments(request),
        }?;

        let message = resolve(request, &parameters, &text);
        Ok(Value::String(apply_replacements(
            &message,
            parameters.replacements(),
        )))
    }
}

/// The `translateChoice` filter (alias `transchoice`).
///
/// `translateChoice(text, count[, map_or_locale[, locale]])` behaves like
/// `translate`, except that `text` is a `|`-separated choice message and
/// `count` selects the branch. `%count%` is substituted implicitly, after
/// any explicit replacements.
#[derive(Debug, Default)]
pub struct TranslateChoiceFunction {
    extractor: TranslateParameterExtractor,
}

impl TemplateFunction for TranslateChoiceFunction {
    fn name(&self) -> &'static str {
        "translateChoice"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["transchoice"]
    }

    fn minimum_arguments(&self) -> usize {
        2
    }

    fn maximum_arguments(&self) -> usize {
        4
    }

    fn execute(&self, request: &FunctionRequest<'_>) -> Result<Value, CalculationError> {
        let text = text_argument(request)?;
        let count = count_argument(request)?;
        let parameters = match request.number_of_arguments() {
            2 => self.extractor.extract_choice_for_two_arguments(request),
            3 => self.extractor.extract_choice_for_three_arguments(request),
            _ => self.extractor.extract_choice_for_four_arguments(request),
        }?;

        let message = resolve(request, &parameters, &text);
        let branch = select_branch(&message, count);

        let mut replacements = parameters.replacements().to_vec();
        replacements.push(Replacement::new("%count%", format_count(count)));
        Ok(Value::String(apply_replacements(&branch, &replacements)))
    }
}

/// Installs the translate configuration and both filters into an
/// [`Environment`].
///
/// # Example
/// ```
/// use serde_json::json;
/// use stencil_translate::config::TranslateConfiguration;
/// use stencil_translate::engine::{Environment, Position};
/// use stencil_translate::functions::TranslateExtension;
///
/// let mut environment = Environment::new();
/// environment.add_extension(TranslateExtension::new(TranslateConfiguration::default()));
///
/// let output = environment
///     .call_function("translate", Position::start(), &[json!("Hi")])
///     .unwrap();
/// assert_eq!(output, json!("Hi"));
/// ```
pub struct TranslateExtension {
    configuration: TranslateConfiguration,
}

impl TranslateExtension {
    /// Create the extension around a configuration.
    pub fn new(configuration: TranslateConfiguration) -> TranslateExtension {
        TranslateExtension { configuration }
    }
}

impl Extension for TranslateExtension {
    fn configure(self, environment: &mut Environment) {
        environment.set_translate_configuration(self.configuration);
        let registry = environment.functions_mut();
        registry.register(Box::<TranslateFunction>::default());
        registry.register(Box::<TranslateChoiceFunction>::default());
    }
}

/// The text being translated: argument 0, engine string coercion.
fn text_argument(request: &FunctionRequest<'_>) -> Result<String, CalculationError> {
    let value = request.get(0).ok_or_else(|| {
        CalculationError::calculation(request.position(), "Missing argument at position 1")
    })?;
    Ok(display_value(value))
}

/// The choice count: argument 1, a JSON number or a numeric string.
fn count_argument(request: &FunctionRequest<'_>) -> Result<f64, CalculationError> {
    let value = request.get(1).ok_or_else(|| {
        CalculationError::calculation(request.position(), "Missing argument at position 2")
    })?;

    let count = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    count.ok_or_else(|| {
        CalculationError::calculation(
            request.position(),
            format!(
                "Expecting number as second argument, but got '{}'",
                display_value(value)
            ),
        )
    })
}

/// Resolve `text` through the environment's message store.
fn resolve(
    request: &FunctionRequest<'_>,
    parameters: &TranslateParameters,
    text: &str,
) -> String {
    let resolved = request
        .environment()
        .translate_configuration()
        .message_resolver()
        .resolve(parameters.locale(), text);
    trace!(locale = %parameters.locale(), "resolved message");
    resolved.to_string()
}

/// Render a count for `%count%`: whole numbers without a fraction part.
fn format_count(count: f64) -> String {
    if count.fract() == 0.0 && count.is_finite() {
        format!("{}", count as i64)
    } else {
        count.to_string()
    }
}
