//! Placeholder replacements applied to resolved text.

/// A (placeholder, substitution) pair interpolated into translated text.
///
/// Placeholders are plain substrings (conventionally `%name%`); no pattern
/// syntax is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    placeholder: String,
    value: String,
}

impl Replacement {
    /// Create a replacement.
    pub fn new(placeholder: impl Into<String>, value: impl Into<String>) -> Replacement {
        Replacement {
            placeholder: placeholder.into(),
            value: value.into(),
        }
    }

    /// The placeholder token searched for in the text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The substitution value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Apply replacements sequentially, in collection order.
///
/// Each replacement substitutes every occurrence of its placeholder before
/// the next replacement runs, so earlier entries win when placeholders
/// overlap.
pub fn apply_replacements(text: &str, replacements: &[Replacement]) -> String {
    let mut output = text.to_string();
    for replacement in replacements {
        if replacement.placeholder.is_empty() {
            continue;
        }
        output = output.replace(&replacement.placeholder, &replacement.value);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Replacement Tests ====================

    #[test]
    fn test_replacement_accessors() {
        let replacement = Replacement::new("%name%", "Joao");
        assert_eq!(replacement.placeholder(), "%name%");
        assert_eq!(replacement.value(), "Joao");
    }

    // ==================== apply_replacements Tests ====================

    #[test]
    fn test_apply_single_replacement() {
        let result = apply_replacements("Ciao %name%", &[Replacement::new("%name%", "Joao")]);
        assert_eq!(result, "Ciao Joao");
    }

    #[test]
    fn test_apply_replaces_every_occurrence() {
        let result = apply_replacements("%x% and %x%", &[Replacement::new("%x%", "y")]);
        assert_eq!(result, "y and y");
    }

    #[test]
    fn test_apply_in_collection_order() {
        // The first entry rewrites the text before the second runs.
        let replacements = [
            Replacement::new("%a%", "%b%"),
            Replacement::new("%b%", "done"),
        ];
        assert_eq!(apply_replacements("%a%", &replacements), "done");
    }

    #[test]
    fn test_apply_empty_replacements_is_identity() {
        assert_eq!(apply_replacements("Ciao %name%", &[]), "Ciao %name%");
    }

    #[test]
    fn test_apply_missing_placeholder_is_noop() {
        let result = apply_replacements("Ciao", &[Replacement::new("%name%", "Joao")]);
        assert_eq!(result, "Ciao");
    }

    #[test]
    fn test_apply_empty_placeholder_is_skipped() {
        let result = apply_replacements("Ciao", &[Replacement::new("", "x")]);
        assert_eq!(result, "Ciao");
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_no_replacements_is_identity(text in ".*") {
            prop_assert_eq!(apply_replacements(&text, &[]), text);
        }

        #[test]
        fn prop_absent_placeholder_is_identity(
            text in "[a-z ]*",
            value in ".*",
        ) {
            // Placeholder alphabet is disjoint from the text alphabet.
            let replacements = [Replacement::new("%X%", value)];
            prop_assert_eq!(apply_replacements(&text, &replacements), text);
        }

        #[test]
        fn prop_replacement_removes_placeholder(
            prefix in "[a-z ]*",
            suffix in "[a-z ]*",
            value in "[a-z]*",
        ) {
            let text = format!("{}%name%{}", prefix, suffix);
            let replacements = [Replacement::new("%name%", value.clone())];
            let output = apply_replacements(&text, &replacements);
            prop_assert_eq!(output, format!("{}{}{}", prefix, value, suffix));
        }
    }
}
