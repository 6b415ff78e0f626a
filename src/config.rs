use crate::{error::ConfigError, interpreter::token::Punctuation};

/// Characters that end an expression when found outside of a string literal.
pub const DEFAULT_TERMINATORS: &str = ";#";
/// Separator between the integral and fractional digits of a number literal.
pub const DEFAULT_DECIMAL_SEPARATOR: char = '.';
/// Upper bound on the number of arguments any function call may receive.
pub const DEFAULT_MAX_ARGUMENTS: usize = 255;
/// Number of results kept for history-dependent functions such as `ans`.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Engine configuration.
///
/// A `Config` is handed to the engine on construction and threaded through
/// the tokenizer and evaluator, so two engines with different settings never
/// influence each other.
///
/// # Example
/// ```
/// use shunt::Config;
///
/// let config = Config { terminators: "|".to_string(),
///                       ..Config::default() };
/// assert!(config.is_terminator('|'));
/// assert_eq!(config.max_arguments, 255);
///
/// // A comma separator would swallow argument separators.
/// let config = Config { decimal_separator: ',',
///                       ..Config::default() };
/// assert!(config.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Characters that stop tokenization outside of quotes.
    pub terminators:       String,
    /// Separator accepted inside number literals.
    pub decimal_separator: char,
    /// Global cap on a function's maximum argument count.
    pub max_arguments:     usize,
    /// How many evaluation results the history retains.
    pub history_limit:     usize,
}

impl Default for Config {
    fn default() -> Self {
        Self { terminators:       DEFAULT_TERMINATORS.to_string(),
               decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
               max_arguments:     DEFAULT_MAX_ARGUMENTS,
               history_limit:     DEFAULT_HISTORY_LIMIT, }
    }
}

impl Config {
    /// Returns `true` if `c` ends an expression.
    #[must_use]
    pub fn is_terminator(&self, c: char) -> bool {
        self.terminators.contains(c)
    }

    /// Checks that the decimal separator cannot be confused with any other
    /// lexical element.
    ///
    /// Operators are checked separately when they are registered.
    ///
    /// # Errors
    /// Returns [`ConfigError::ReservedSeparator`] if the separator is a digit,
    /// a letter, whitespace, a quote, a bracket or comma, or a terminator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let separator = self.decimal_separator;
        let role = if separator.is_alphanumeric() {
            Some("part of identifiers and numbers")
        } else if separator.is_whitespace() || separator == '\0' {
            Some("a token boundary")
        } else if matches!(separator, '"' | '\'') {
            Some("a string quote")
        } else if Punctuation::from_char(separator).is_some() {
            Some("a bracket or argument separator")
        } else if self.is_terminator(separator) {
            Some("a terminator")
        } else {
            None
        };
        match role {
            Some(role) => Err(ConfigError::ReservedSeparator { separator, role }),
            None => Ok(()),
        }
    }
}
