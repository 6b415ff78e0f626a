/// Configuration errors.
///
/// Raised when an engine is built or extended with settings that would make
/// number literals ambiguous.
pub mod config_error;
/// Lexical errors.
///
/// Raised by the tokenizer when characters cannot be grouped into a token:
/// malformed numbers, unterminated strings, unknown operators and stray
/// characters.
pub mod lex_error;
/// Semantic errors.
///
/// Raised while resolving identifiers and while executing postfix code:
/// unknown identifiers, arity violations, operand shortages, bad
/// assignments and typed reads of the wrong or uninitialized kind.
pub mod semantic_error;
/// Syntax errors.
///
/// Raised when tokens are valid on their own but badly arranged, such as
/// unmatched brackets or a function name without a call bracket.
pub mod syntax_error;

pub use config_error::ConfigError;
pub use lex_error::LexError;
pub use semantic_error::SemanticError;
pub use syntax_error::SyntaxError;
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The single error surface of the engine and its front ends.
#[derive(Debug, Error)]
pub enum Error {
    /// A lexical error from the tokenizer.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// A syntax error from the tokenizer, converter or template expander.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// A semantic error from identifier resolution or evaluation.
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    /// An invalid engine configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A REPL command that the dispatcher does not know.
    #[error("Unknown command '{0}'. Type :help for a list of commands.")]
    UnknownCommand(String),
    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the character index of the originating input, where one is
    /// known.
    ///
    /// # Example
    /// ```
    /// use shunt::Engine;
    ///
    /// let engine = Engine::standard();
    /// let err = engine.evaluate("1 + $").unwrap_err();
    /// assert_eq!(err.index(), Some(4));
    /// ```
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Lex(e) => Some(e.index()),
            Self::Syntax(e) => e.index(),
            Self::Semantic(e) => e.index(),
            Self::Config(_) | Self::UnknownCommand(_) | Self::Io(_) => None,
        }
    }

    /// Moves the error's index `by` characters to the right.
    ///
    /// Used when the failing text is a slice of a larger input, so that the
    /// index points into that input.
    #[must_use]
    pub fn offset(mut self, by: usize) -> Self {
        let index = match &mut self {
            Self::Lex(e) => Some(e.index_mut()),
            Self::Syntax(e) => e.index_mut(),
            Self::Semantic(e) => e.index_mut(),
            Self::Config(_) | Self::UnknownCommand(_) | Self::Io(_) => None,
        };
        if let Some(index) = index {
            *index += by;
        }
        self
    }
}
