use thiserror::Error;

/// Represents all errors that can occur while resolving identifiers and
/// executing a postfix sequence.
///
/// Operator and function callbacks report their failures through this type as
/// well. A callback does not know where in the source it was invoked from, so
/// the evaluator wraps its errors in [`SemanticError::At`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// An identifier is neither a function nor a variable, and no fallback is
    /// registered.
    #[error("Error at index {index}: Unknown identifier '{name}'.")]
    UnknownIdentifier {
        /// The unresolved identifier.
        name:  String,
        /// The character index where the identifier starts.
        index: usize,
    },
    /// The unknown-identifier callback declined to bind an identifier.
    #[error("Error at index {index}: Identifier '{name}' could not be bound.")]
    UnboundIdentifier {
        /// The unresolved identifier.
        name:  String,
        /// The character index where the identifier starts.
        index: usize,
    },
    /// A function was called with an argument count outside its bounds.
    #[error("Error at index {index}: Function '{name}' takes {min} to {max} arguments, but {found} were supplied.")]
    ArityMismatch {
        /// The function name.
        name:  String,
        /// The minimum number of arguments.
        min:   usize,
        /// The effective maximum number of arguments.
        max:   usize,
        /// The number of arguments supplied.
        found: usize,
        /// The character index of the function name.
        index: usize,
    },
    /// A function was declared with a minimum above its maximum.
    #[error("Function '{name}' declares at least {min} arguments but at most {max}.")]
    InvalidArity {
        /// The function name.
        name: String,
        /// The declared minimum.
        min:  usize,
        /// The declared maximum.
        max:  usize,
    },
    /// The evaluation stack did not hold enough operands.
    #[error("Error at index {index}: Insufficient arguments for '{operator}'.")]
    InsufficientOperands {
        /// The operator or function that ran short.
        operator: String,
        /// The character index of the operator or function.
        index:    usize,
    },
    /// The expression left zero or several values behind.
    #[error("Expression must produce exactly one value, but produced {found}.")]
    ResultCount {
        /// The number of values left on the stack.
        found: usize,
    },
    /// A token that only structures the input reached the evaluator.
    #[error("Error at index {index}: Unexpected token '{token}' during evaluation.")]
    UnexpectedToken {
        /// The token text.
        token: String,
        /// The character index of the token.
        index: usize,
    },
    /// The left side of an assignment is not a variable.
    #[error("Left operand of '{operator}' must be a variable.")]
    NotAVariable {
        /// The assignment operator.
        operator: String,
    },
    /// The right side of an assignment holds a value that cannot be stored.
    #[error("Cannot assign a value of kind {kind} to '{name}'.")]
    UnsupportedAssignment {
        /// The target variable.
        name: String,
        /// The kind of the rejected value.
        kind: &'static str,
    },
    /// The typed payload of an uninitialized value was read.
    #[error("Attempted to read an uninitialized value.")]
    Uninitialized,
    /// A value had a different kind than required.
    #[error("Type mismatch: expected {expected}, found {found}.")]
    TypeMismatch {
        /// The required kind.
        expected: &'static str,
        /// The actual kind.
        found:    &'static str,
    },
    /// An argument was invalid or out of range.
    #[error("Invalid argument: {details}.")]
    InvalidArgument {
        /// Details about why the argument is invalid.
        details: String,
    },
    /// A callback error, located at the operator or function that raised it.
    #[error("Error at index {index}: {source}")]
    At {
        /// The character index of the operator or function.
        index:  usize,
        /// The error the callback returned.
        source: Box<SemanticError>,
    },
}

impl SemanticError {
    /// Returns the character index the error points at, if it has one.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::UnknownIdentifier { index, .. }
            | Self::UnboundIdentifier { index, .. }
            | Self::ArityMismatch { index, .. }
            | Self::InsufficientOperands { index, .. }
            | Self::UnexpectedToken { index, .. }
            | Self::At { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub(crate) const fn index_mut(&mut self) -> Option<&mut usize> {
        match self {
            Self::UnknownIdentifier { index, .. }
            | Self::UnboundIdentifier { index, .. }
            | Self::ArityMismatch { index, .. }
            | Self::InsufficientOperands { index, .. }
            | Self::UnexpectedToken { index, .. }
            | Self::At { index, .. } => Some(index),
            _ => None,
        }
    }

    /// Locates an error raised by the operator or function at `index`.
    ///
    /// Errors that already carry an index are returned unchanged.
    #[must_use]
    pub fn at(self, index: usize) -> Self {
        if self.index().is_some() {
            return self;
        }
        Self::At { index,
                   source: Box::new(self) }
    }

    /// The underlying error, with any location wrapper removed.
    ///
    /// # Example
    /// ```
    /// use shunt::{Engine, Error, error::SemanticError};
    ///
    /// let Error::Semantic(err) = Engine::standard().evaluate("4 / 0").unwrap_err() else {
    ///     panic!("expected a semantic error");
    /// };
    /// assert_eq!(err.index(), Some(2));
    /// assert!(matches!(err.cause(), SemanticError::InvalidArgument { .. }));
    /// ```
    #[must_use]
    pub fn cause(&self) -> &Self {
        match self {
            Self::At { source, .. } => source.cause(),
            _ => self,
        }
    }

    /// Shorthand for [`SemanticError::InvalidArgument`].
    pub fn invalid_argument(details: impl Into<String>) -> Self {
        Self::InvalidArgument { details: details.into() }
    }
}
