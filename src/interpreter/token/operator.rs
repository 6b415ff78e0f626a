use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use crate::interpreter::{
    evaluator::EvalResult,
    token::{value::Value, variable::Operand},
};

/// Tie-break rule between operators of equal precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    Right,
    /// Grouping does not matter; treated as left-associative.
    Any,
}

impl Associativity {
    /// Returns `true` for [`Associativity::Left`] and [`Associativity::Any`].
    #[must_use]
    pub const fn is_left(self) -> bool {
        !matches!(self, Self::Right)
    }
}

/// Callback type of a unary operator.
pub type UnaryFn = Box<dyn Fn(Value) -> EvalResult<Value>>;
/// Callback type of a binary operator.
pub type BinaryFn = Box<dyn Fn(Operand, Operand) -> EvalResult<Operand>>;

/// A prefix operator identified by a single character, such as `-` in `-x`.
pub struct UnaryOperator {
    identifier:    char,
    precedence:    i32,
    associativity: Associativity,
    callback:      UnaryFn,
}

impl UnaryOperator {
    /// Creates a unary operator.
    ///
    /// # Example
    /// ```
    /// use shunt::interpreter::token::{operator::{Associativity, UnaryOperator}, value::Value};
    ///
    /// let neg = UnaryOperator::new('-', 5, Associativity::Right, |v| Ok(Value::Number(-v.as_number()?)));
    /// assert_eq!(neg.apply(Value::Number(2.0)).unwrap(), Value::Number(-2.0));
    /// ```
    pub fn new(identifier: char,
               precedence: i32,
               associativity: Associativity,
               callback: impl Fn(Value) -> EvalResult<Value> + 'static)
               -> Self {
        Self { identifier,
               precedence,
               associativity,
               callback: Box::new(callback) }
    }

    /// The operator character.
    #[must_use]
    pub const fn identifier(&self) -> char {
        self.identifier
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(&self) -> i32 {
        self.precedence
    }

    /// Tie-break rule for equal precedence.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        self.associativity
    }

    /// Runs the callback.
    pub fn apply(&self, value: Value) -> EvalResult<Value> {
        (self.callback)(value)
    }
}

impl fmt::Debug for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryOperator")
         .field("identifier", &self.identifier)
         .field("precedence", &self.precedence)
         .field("associativity", &self.associativity)
         .finish_non_exhaustive()
    }
}

/// An infix operator identified by a string, such as `+` or `<=`.
pub struct BinaryOperator {
    identifier:    String,
    precedence:    i32,
    associativity: Associativity,
    callback:      BinaryFn,
}

impl BinaryOperator {
    /// Creates a binary operator from a callback over plain values.
    ///
    /// Variables are read before the callback runs, so this is the right
    /// constructor for anything except assignment-like operators.
    ///
    /// # Example
    /// ```
    /// use shunt::interpreter::token::{
    ///     operator::{Associativity, BinaryOperator},
    ///     value::Value,
    ///     variable::Operand,
    /// };
    ///
    /// let add = BinaryOperator::new("+", 3, Associativity::Left, |l, r| {
    ///     Ok(Value::Number(l.as_number()? + r.as_number()?))
    /// });
    /// let sum = add.apply(Value::Number(1.0).into(), Value::Number(2.0).into()).unwrap();
    /// assert_eq!(sum.into_value(), Value::Number(3.0));
    /// ```
    pub fn new(identifier: impl Into<String>,
               precedence: i32,
               associativity: Associativity,
               callback: impl Fn(Value, Value) -> EvalResult<Value> + 'static)
               -> Self {
        Self::with_operands(identifier, precedence, associativity, move |lhs, rhs| {
            callback(lhs.into_value(), rhs.into_value()).map(Operand::Value)
        })
    }

    /// Creates a binary operator whose callback sees the raw operands,
    /// including variable handles, and may return a variable handle.
    pub fn with_operands(identifier: impl Into<String>,
                         precedence: i32,
                         associativity: Associativity,
                         callback: impl Fn(Operand, Operand) -> EvalResult<Operand> + 'static)
                         -> Self {
        Self { identifier: identifier.into(),
               precedence,
               associativity,
               callback: Box::new(callback) }
    }

    /// The operator text.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(&self) -> i32 {
        self.precedence
    }

    /// Tie-break rule for equal precedence.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        self.associativity
    }

    /// Runs the callback on `lhs` and `rhs`.
    pub fn apply(&self, lhs: Operand, rhs: Operand) -> EvalResult<Operand> {
        (self.callback)(lhs, rhs)
    }
}

impl fmt::Debug for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryOperator")
         .field("identifier", &self.identifier)
         .field("precedence", &self.precedence)
         .field("associativity", &self.associativity)
         .finish_non_exhaustive()
    }
}

/// All operators known to an engine.
///
/// Besides the two lookup maps, the table maintains the set of characters
/// that occur in binary identifiers; the tokenizer uses it to find the extent
/// of an operator run before matching.
#[derive(Debug, Default)]
pub struct OperatorTable {
    unary:         HashMap<char, UnaryOperator>,
    binary:        HashMap<String, BinaryOperator>,
    charset:       HashSet<char>,
    juxtaposition: Option<BinaryOperator>,
}

impl OperatorTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a unary operator, replacing one with the same character.
    pub fn add_unary(&mut self, operator: UnaryOperator) {
        self.unary.insert(operator.identifier(), operator);
    }

    /// Registers a binary operator, replacing one with the same identifier.
    pub fn add_binary(&mut self, operator: BinaryOperator) {
        self.charset.extend(operator.identifier().chars());
        self.binary.insert(operator.identifier().to_string(), operator);
    }

    /// Designates the operator inserted between adjacent operands, or removes
    /// it with `None`.
    pub fn set_juxtaposition(&mut self, operator: Option<BinaryOperator>) {
        self.juxtaposition = operator;
    }

    /// Looks up a unary operator.
    #[must_use]
    pub fn unary(&self, identifier: char) -> Option<&UnaryOperator> {
        self.unary.get(&identifier)
    }

    /// Looks up a binary operator.
    #[must_use]
    pub fn binary(&self, identifier: &str) -> Option<&BinaryOperator> {
        self.binary.get(identifier)
    }

    /// The juxtaposition operator, if one is configured.
    #[must_use]
    pub const fn juxtaposition(&self) -> Option<&BinaryOperator> {
        self.juxtaposition.as_ref()
    }

    /// Returns `true` if `c` is a registered unary operator.
    #[must_use]
    pub fn is_unary_char(&self, c: char) -> bool {
        self.unary.contains_key(&c)
    }

    /// Returns `true` if `c` occurs in any binary identifier.
    #[must_use]
    pub fn is_binary_char(&self, c: char) -> bool {
        self.charset.contains(&c)
    }

    /// Finds the longest binary identifier that is a prefix of `run`.
    ///
    /// Returns the operator and the length of the match in characters.
    ///
    /// # Example
    /// ```
    /// use shunt::interpreter::token::operator::{Associativity, BinaryOperator, OperatorTable};
    ///
    /// let mut table = OperatorTable::new();
    /// table.add_binary(BinaryOperator::new("<", 2, Associativity::Left, |l, _| Ok(l)));
    /// table.add_binary(BinaryOperator::new("<=", 2, Associativity::Left, |l, _| Ok(l)));
    ///
    /// let (op, len) = table.longest_match("<=-").unwrap();
    /// assert_eq!((op.identifier(), len), ("<=", 2));
    /// assert!(table.longest_match("=<").is_none());
    /// ```
    #[must_use]
    pub fn longest_match(&self, run: &str) -> Option<(&BinaryOperator, usize)> {
        let ends: Vec<usize> = run.char_indices()
                                  .skip(1)
                                  .map(|(i, _)| i)
                                  .chain(std::iter::once(run.len()))
                                  .collect();

        ends.iter()
            .enumerate()
            .rev()
            .find_map(|(n, &end)| self.binary.get(&run[..end]).map(|op| (op, n + 1)))
    }
}
