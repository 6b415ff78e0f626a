use thiserror::Error;

/// Represents all errors that can occur while splitting text into tokens.
///
/// Every variant carries the character index at which the offending input
/// starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A numeric literal was rejected by the number parser.
    #[error("Error at index {index}: Malformed number literal '{literal}'.")]
    MalformedNumber {
        /// The literal text passed to the number parser.
        literal: String,
        /// The character index where the literal starts.
        index:   usize,
    },
    /// A numeric literal was found, but no number parser is registered.
    #[error("Error at index {index}: Found a number literal, but no number parser is registered.")]
    MissingNumberParser {
        /// The character index where the literal starts.
        index: usize,
    },
    /// A string literal was opened but never closed.
    #[error("Error at index {index}: Unterminated string literal.")]
    UnterminatedString {
        /// The character index of the opening quote.
        index: usize,
    },
    /// A string literal was rejected by the string parser.
    #[error("Error at index {index}: Malformed string literal.")]
    MalformedString {
        /// The character index of the opening quote.
        index: usize,
    },
    /// A string literal was found, but no string parser is registered.
    #[error("Error at index {index}: Found a string literal, but no string parser is registered.")]
    MissingStringParser {
        /// The character index of the opening quote.
        index: usize,
    },
    /// An operator character or identifier is not registered.
    #[error("Error at index {index}: Unknown operator '{operator}'.")]
    UnknownOperator {
        /// The operator text that failed to resolve.
        operator: String,
        /// The character index where the operator starts.
        index:    usize,
    },
    /// A character that cannot start any token.
    #[error("Error at index {index}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The character index of the offending character.
        index:     usize,
    },
}

impl LexError {
    /// Returns the character index the error points at.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::MalformedNumber { index, .. }
            | Self::MissingNumberParser { index }
            | Self::UnterminatedString { index }
            | Self::MalformedString { index }
            | Self::MissingStringParser { index }
            | Self::UnknownOperator { index, .. }
            | Self::UnexpectedCharacter { index, .. } => *index,
        }
    }

    pub(crate) const fn index_mut(&mut self) -> &mut usize {
        match self {
            Self::MalformedNumber { index, .. }
            | Self::MissingNumberParser { index }
            | Self::UnterminatedString { index }
            | Self::MalformedString { index }
            | Self::MissingStringParser { index }
            | Self::UnknownOperator { index, .. }
            | Self::UnexpectedCharacter { index, .. } => index,
        }
    }
}
