use thiserror::Error;

/// Represents all errors caused by settings that would make the tokenizer
/// ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The decimal separator already has a lexical role of its own.
    #[error("Decimal separator '{separator}' cannot be used, it is already {role}.")]
    ReservedSeparator {
        /// The rejected separator.
        separator: char,
        /// What the character already means to the tokenizer.
        role:      &'static str,
    },
    /// An operator contains the decimal separator.
    #[error("Operator '{operator}' contains the decimal separator '{separator}'.")]
    SeparatorInOperator {
        /// The configured separator.
        separator: char,
        /// The rejected operator.
        operator:  String,
    },
}
