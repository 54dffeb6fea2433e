//! Narrow host-engine surface.
//!
//! The extension does not parse or render templates; it consumes three
//! things from the host engine and exposes one thing back:
//!
//! - consumed: a per-call argument accessor ([`FunctionRequest`]), the active
//!   environment ([`Environment`]), and error-position metadata
//!   ([`Position`]);
//! - exposed: filter entry points implementing [`TemplateFunction`],
//!   registered through [`Extension::configure`].
//!
//! Any engine able to construct these types can mount the extension. The
//! value model is [`serde_json::Value`]; maps keep insertion order so
//! replacement maps apply in template order.

use crate::config::TranslateConfiguration;
use crate::error::CalculationError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Source position of a filter call, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number.
    pub column: u32,
}

impl Position {
    /// Create a position from a line and column.
    pub fn new(line: u32, column: u32) -> Position {
        Position { line, column }
    }

    /// The first position of a template.
    pub fn start() -> Position {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Coerce a template value into its rendered string form.
///
/// Strings render raw (unquoted), null renders empty, other scalars render
/// via their JSON form, and composites via compact JSON. Used both for
/// filter text inputs and for naming offending values in error messages.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Per-call argument accessor handed to a [`TemplateFunction`].
pub struct FunctionRequest<'a> {
    environment: &'a Environment,
    function_name: &'a str,
    position: Position,
    arguments: &'a [Value],
}

impl<'a> FunctionRequest<'a> {
    /// Build a request. Hosts normally go through
    /// [`Environment::call_function`] instead.
    pub fn new(
        environment: &'a Environment,
        function_name: &'a str,
        position: Position,
        arguments: &'a [Value],
    ) -> FunctionRequest<'a> {
        FunctionRequest {
            environment,
            function_name,
            position,
            arguments,
        }
    }

    /// The active environment.
    pub fn environment(&self) -> &Environment {
        self.environment
    }

    /// Name under which the function was invoked (may be an alias).
    pub fn function_name(&self) -> &str {
        self.function_name
    }

    /// Source position of the call.
    pub fn position(&self) -> Position {
        self.position
    }

    /// All positional arguments.
    pub fn arguments(&self) -> &[Value] {
        self.arguments
    }

    /// Number of positional arguments.
    pub fn number_of_arguments(&self) -> usize {
        self.arguments.len()
    }

    /// The argument at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.arguments.get(index)
    }
}

/// A filter function callable from templates.
pub trait TemplateFunction {
    /// Primary name the function is registered under.
    fn name(&self) -> &'static str;

    /// Additional names the function answers to.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Minimum number of accepted arguments.
    fn minimum_arguments(&self) -> usize;

    /// Maximum number of accepted arguments.
    fn maximum_arguments(&self) -> usize;

    /// Evaluate the function for one call.
    fn execute(&self, request: &FunctionRequest<'_>) -> Result<Value, CalculationError>;
}

/// A bundle of functions (and configuration) installable into an
/// [`Environment`].
pub trait Extension {
    /// Install this extension's configuration and functions.
    fn configure(self, environment: &mut Environment);
}

/// Name and alias lookup table of registered functions.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: Vec<Box<dyn TemplateFunction>>,
    by_name: HashMap<&'static str, usize>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> FunctionRegistry {
        FunctionRegistry::default()
    }

    /// Register a function under its name and all aliases.
    ///
    /// A later registration under the same name wins, matching engine
    /// override semantics.
    pub fn register(&mut self, function: Box<dyn TemplateFunction>) {
        debug!(name = function.name(), "registered template function");
        let index = self.functions.len();
        self.by_name.insert(function.name(), index);
        for &alias in function.aliases() {
            self.by_name.insert(alias, index);
        }
        self.functions.push(function);
    }

    /// Look up a function by name or alias.
    pub fn get(&self, name: &str) -> Option<&dyn TemplateFunction> {
        self.by_name
            .get(name)
            .and_then(|index| self.functions.get(*index))
            .map(Box::as_ref)
    }

    /// Number of registered functions (aliases not counted).
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// The active render environment: translate configuration plus the function
/// registry.
#[derive(Default)]
pub struct Environment {
    translate: TranslateConfiguration,
    functions: FunctionRegistry,
}

impl Environment {
    /// Create an environment with default configuration and no functions.
    pub fn new() -> Environment {
        Environment::default()
    }

    /// Install an extension.
    pub fn add_extension(&mut self, extension: impl Extension) {
        extension.configure(self);
    }

    /// The translate configuration in effect for this render.
    pub fn translate_configuration(&self) -> &TranslateConfiguration {
        &self.translate
    }

    /// Replace the translate configuration.
    pub fn set_translate_configuration(&mut self, configuration: TranslateConfiguration) {
        self.translate = configuration;
    }

    /// The registered functions.
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Mutable access to the registered functions.
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    /// Resolve, arity-check, and execute a function call.
    ///
    /// This is the invocation path a host engine drives for each filter
    /// call. Unknown names and arity violations fail before the function
    /// body runs.
    pub fn call_function(
        &self,
        name: &str,
        position: Position,
        arguments: &[Value],
    ) -> Result<Value, CalculationError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| CalculationError::FunctionResolution {
                position,
                name: name.to_string(),
            })?;

        let minimum = function.minimum_arguments();
        let maximum = function.maximum_arguments();
        if arguments.len() < minimum || arguments.len() > maximum {
            return Err(CalculationError::ArgumentCount {
                position,
                name: name.to_string(),
                minimum,
                maximum,
                actual: arguments.len(),
            });
        }

        function.execute(&FunctionRequest::new(self, name, position, arguments))
    }
}
