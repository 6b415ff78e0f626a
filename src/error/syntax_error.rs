use thiserror::Error;

/// Represents all errors caused by a malformed arrangement of otherwise valid
/// tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// An opening bracket `(` was never closed.
    #[error("Error at index {index}: Opening bracket '(' has no matching closing bracket.")]
    UnmatchedOpeningBracket {
        /// The character index of the opening bracket.
        index: usize,
    },
    /// A closing bracket `)` was found without a matching opening bracket.
    #[error("Error at index {index}: Closing bracket ')' is missing a matching opening bracket.")]
    UnmatchedClosingBracket {
        /// The character index of the closing bracket.
        index: usize,
    },
    /// A `,` was found outside of any bracket.
    #[error("Error at index {index}: Comma found outside of brackets.")]
    CommaOutsideBrackets {
        /// The character index of the comma.
        index: usize,
    },
    /// A function name was not followed by `(`.
    #[error("Error at index {index}: Function '{name}' must be followed by '('.")]
    ExpectedCallBracket {
        /// The name of the function.
        name:  String,
        /// The character index where the function name starts.
        index: usize,
    },
    /// An empty identifier was supplied.
    #[error("Identifier must not be empty.")]
    EmptyIdentifier,
    /// An identifier contains characters that the tokenizer would never
    /// produce for one.
    #[error("'{name}' is not a valid identifier.")]
    InvalidIdentifier {
        /// The rejected identifier.
        name: String,
    },
    /// Two operands are adjacent, and no juxtaposition operator is configured.
    #[error("Error at index {index}: Missing operator between adjacent operands.")]
    MissingOperator {
        /// The character index of the second operand.
        index: usize,
    },
    /// A template placeholder `{` was never closed.
    #[error("Error at index {index}: Placeholder '{{' is never closed.")]
    UnclosedPlaceholder {
        /// The character index of the opening brace.
        index: usize,
    },
}

impl SyntaxError {
    /// Returns the character index the error points at, if it has one.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::UnmatchedOpeningBracket { index }
            | Self::UnmatchedClosingBracket { index }
            | Self::CommaOutsideBrackets { index }
            | Self::ExpectedCallBracket { index, .. }
            | Self::MissingOperator { index }
            | Self::UnclosedPlaceholder { index } => Some(*index),
            Self::EmptyIdentifier | Self::InvalidIdentifier { .. } => None,
        }
    }

    pub(crate) const fn index_mut(&mut self) -> Option<&mut usize> {
        match self {
            Self::UnmatchedOpeningBracket { index }
            | Self::UnmatchedClosingBracket { index }
            | Self::CommaOutsideBrackets { index }
            | Self::ExpectedCallBracket { index, .. }
            | Self::MissingOperator { index }
            | Self::UnclosedPlaceholder { index } => Some(index),
            Self::EmptyIdentifier | Self::InvalidIdentifier { .. } => None,
        }
    }
}
