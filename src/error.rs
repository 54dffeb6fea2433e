//! Render-time error type raised by the translate functions.
//!
//! Every failure is a synchronous "calculation" error surfaced while the host
//! engine renders a template: a malformed argument, a bad argument count, or
//! an unresolvable function name. There are no retries and no partial
//! results; extraction either fully succeeds or the render fails with a
//! message naming the expected type, its position, and the offending value.

use crate::engine::Position;
use thiserror::Error;

/// Error raised when a translate function call cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// An argument did not have the expected type, or evaluation failed.
    #[error("{message} ({position})")]
    Calculation {
        /// Source position of the failing filter call.
        position: Position,
        /// Human-readable message naming the expected type and actual value.
        message: String,
    },

    /// A function call had fewer or more arguments than the function accepts.
    #[error(
        "Function '{name}' expects between {minimum} and {maximum} arguments, but got {actual} ({position})"
    )]
    ArgumentCount {
        /// Source position of the call.
        position: Position,
        /// Name under which the function was invoked.
        name: String,
        /// Minimum number of accepted arguments.
        minimum: usize,
        /// Maximum number of accepted arguments.
        maximum: usize,
        /// Number of arguments actually supplied.
        actual: usize,
    },

    /// No function with the requested name is registered.
    #[error("Unable to resolve function '{name}' ({position})")]
    FunctionResolution {
        /// Source position of the call.
        position: Position,
        /// The unknown function name.
        name: String,
    },
}

impl CalculationError {
    /// Build a calculation error from a position and a message.
    pub fn calculation(position: Position, message: impl Into<String>) -> Self {
        Self::Calculation {
            position,
            message: message.into(),
        }
    }

    /// Source position the error was raised at.
    pub fn position(&self) -> Position {
        match self {
            Self::Calculation { position, .. }
            | Self::ArgumentCount { position, .. }
            | Self::FunctionResolution { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Display Tests ====================

    #[test]
    fn test_calculation_error_display() {
        let error = CalculationError::calculation(
            Position::new(1, 5),
            "Expecting map or locale as third argument, but got '1'",
        );
        assert_eq!(
            error.to_string(),
            "Expecting map or locale as third argument, but got '1' (line 1, column 5)"
        );
    }

    #[test]
    fn test_argument_count_error_display() {
        let error = CalculationError::ArgumentCount {
            position: Position::new(2, 3),
            name: "translate".to_string(),
            minimum: 1,
            maximum: 3,
            actual: 4,
        };
        let message = error.to_string();
        assert!(message.contains("translate"));
        assert!(message.contains("between 1 and 3"));
        assert!(message.contains("got 4"));
    }

    #[test]
    fn test_function_resolution_error_display() {
        let error = CalculationError::FunctionResolution {
            position: Position::new(1, 1),
            name: "untranslate".to_string(),
        };
        assert!(error
            .to_string()
            .contains("Unable to resolve function 'untranslate'"));
    }

    // ==================== Accessor Tests ====================

    #[test]
    fn test_position_accessor() {
        let position = Position::new(7, 12);
        let error = CalculationError::calculation(position, "boom");
        assert_eq!(error.position(), position);
    }
}
