use std::{cmp::Ordering, fmt};

use ordered_float::OrderedFloat;

use crate::{error::SemanticError, interpreter::evaluator::EvalResult};

/// Represents a typed value flowing through the engine.
///
/// This enum is closed: every consumer matches it exhaustively. The
/// `Uninitialized` variant is the state of a freshly bound variable that was
/// never assigned. It can be inspected with [`Value::is_initialized`], but
/// every typed read of it fails with [`SemanticError::Uninitialized`].
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value has been stored yet.
    #[default]
    Uninitialized,
    /// The explicit absence of a value.
    Null,
    /// A text value.
    String(String),
    /// A numeric value (double precision floating-point).
    Number(f64),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Number(f64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Number(if v { 1.0 } else { 0.0 })
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl Value {
    /// Returns `false` only for [`Value::Uninitialized`]. Never fails.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    /// Returns `true` if the value is [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Value::String`].
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Value::Number`].
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Name of the active variant, for messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Number(_) => "number",
        }
    }

    /// Fails with [`SemanticError::Uninitialized`] unless the value was set.
    pub fn ensure_initialized(&self) -> EvalResult<&Self> {
        match self {
            Self::Uninitialized => Err(SemanticError::Uninitialized),
            _ => Ok(self),
        }
    }

    /// Reads the numeric payload.
    ///
    /// # Returns
    /// - `Ok(f64)`: If the value is a number.
    /// - `Err(SemanticError::Uninitialized)`: If the value was never set.
    /// - `Err(SemanticError::TypeMismatch)`: For any other kind.
    ///
    /// # Example
    /// ```
    /// use shunt::{Value, error::SemanticError};
    ///
    /// assert_eq!(Value::Number(2.5).as_number().unwrap(), 2.5);
    /// assert_eq!(Value::Uninitialized.as_number(), Err(SemanticError::Uninitialized));
    /// assert!(Value::from("2").as_number().is_err());
    /// ```
    pub fn as_number(&self) -> EvalResult<f64> {
        match self.ensure_initialized()? {
            Self::Number(n) => Ok(*n),
            other => Err(SemanticError::TypeMismatch { expected: "number",
                                                       found:    other.kind(), }),
        }
    }

    /// Reads the string payload.
    ///
    /// # Returns
    /// - `Ok(&str)`: If the value is a string.
    /// - `Err(SemanticError::Uninitialized)`: If the value was never set.
    /// - `Err(SemanticError::TypeMismatch)`: For any other kind.
    pub fn as_str(&self) -> EvalResult<&str> {
        match self.ensure_initialized()? {
            Self::String(s) => Ok(s),
            other => Err(SemanticError::TypeMismatch { expected: "string",
                                                       found:    other.kind(), }),
        }
    }

    /// Interprets the value as a condition: non-zero numbers and non-empty
    /// strings are true, `null` is false.
    pub fn is_truthy(&self) -> EvalResult<bool> {
        match self.ensure_initialized()? {
            Self::Number(n) => Ok(*n != 0.0),
            Self::String(s) => Ok(!s.is_empty()),
            _ => Ok(false),
        }
    }

    /// Orders two values of the same kind.
    ///
    /// Numbers compare with a total order in which `NaN` sorts above every
    /// other number; strings compare lexicographically; two nulls are equal.
    /// Mixing kinds is a [`SemanticError::TypeMismatch`].
    ///
    /// # Example
    /// ```
    /// use std::cmp::Ordering;
    ///
    /// use shunt::Value;
    ///
    /// let a = Value::Number(1.0);
    /// let b = Value::Number(2.0);
    /// assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
    /// assert!(a.compare(&Value::from("1")).is_err());
    /// ```
    pub fn compare(&self, other: &Self) -> EvalResult<Ordering> {
        match (self.ensure_initialized()?, other.ensure_initialized()?) {
            (Self::Number(a), Self::Number(b)) => Ok(OrderedFloat(*a).cmp(&OrderedFloat(*b))),
            (Self::String(a), Self::String(b)) => Ok(a.cmp(b)),
            (Self::Null, Self::Null) => Ok(Ordering::Equal),
            (left, right) => Err(SemanticError::TypeMismatch { expected: left.kind(),
                                                               found:    right.kind(), }),
        }
    }
}

/// Values are equal when their tags match and their payloads are equal.
/// Numbers use [`OrderedFloat`] semantics, so `NaN == NaN`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Uninitialized, Self::Uninitialized) | (Self::Null, Self::Null) => true,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => OrderedFloat(*a) == OrderedFloat(*b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "<uninitialized>"),
            Self::Null => write!(f, "null"),
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}
