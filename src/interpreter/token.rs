/// Typed values.
///
/// Defines the closed `Value` union (uninitialized, null, string, number)
/// with checked typed access, ordering, and display.
pub mod value;

/// Variables and evaluation operands.
///
/// Defines named mutable `Variable`s, the engine's `VariableTable`, and the
/// `Operand` type that lets operators receive either values or variable
/// handles.
pub mod variable;

/// Unary and binary operators.
///
/// Operators carry an identifier, a precedence, an associativity and a
/// callback. The `OperatorTable` groups them and answers the character-level
/// questions the tokenizer asks.
pub mod operator;

/// Functions with bounded arity.
pub mod function;

use std::{fmt, rc::Rc};

use crate::interpreter::token::{
    function::Function,
    operator::{Associativity, BinaryOperator, UnaryOperator},
    value::Value,
    variable::Variable,
};

/// Structural characters. They shape the token stream but never reach the
/// evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Punctuation {
    /// `(`
    Open,
    /// `)`
    Close,
    /// `,`
    Comma,
}

impl Punctuation {
    /// Classifies a character, if it is punctuation.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '(' => Some(Self::Open),
            ')' => Some(Self::Close),
            ',' => Some(Self::Comma),
            _ => None,
        }
    }

    /// The character this punctuation stands for.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Open => '(',
            Self::Close => ')',
            Self::Comma => ',',
        }
    }
}

/// A function reference together with the number of arguments it is called
/// with.
///
/// The tokenizer emits calls with an `arg_count` of zero; the postfix
/// converter fills in the real count once the closing bracket is seen.
#[derive(Debug, Clone, Copy)]
pub struct Call<'t> {
    /// The called function.
    pub function:  &'t Function,
    /// Number of arguments at this call site.
    pub arg_count: usize,
}

/// The closed set of token kinds.
///
/// Operators and functions are borrowed from the engine's tables for `'t`;
/// variables are shared handles.
#[derive(Debug, Clone)]
pub enum TokenKind<'t> {
    /// A literal value.
    Value(Value),
    /// A variable reference.
    Variable(Rc<Variable>),
    /// A prefix operator.
    Unary(&'t UnaryOperator),
    /// An infix operator.
    Binary(&'t BinaryOperator),
    /// A function call.
    Function(Call<'t>),
    /// `(`, `)` or `,`.
    Punctuation(Punctuation),
}

impl TokenKind<'_> {
    /// Name of the kind, for messages and introspection.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Variable(_) => "variable",
            Self::Unary(_) => "unary operator",
            Self::Binary(_) => "binary operator",
            Self::Function(_) => "function",
            Self::Punctuation(_) => "punctuation",
        }
    }

    /// Returns `true` for values and variables.
    #[must_use]
    pub const fn is_operand(&self) -> bool {
        matches!(self, Self::Value(_) | Self::Variable(_))
    }

    /// Returns `true` for unary and binary operators.
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Unary(_) | Self::Binary(_))
    }

    /// Returns `true` if the token is the given punctuation.
    #[must_use]
    pub fn is_punctuation(&self, punctuation: Punctuation) -> bool {
        matches!(self, Self::Punctuation(p) if *p == punctuation)
    }

    /// Precedence and associativity, for operators.
    #[must_use]
    pub const fn binding(&self) -> Option<(i32, Associativity)> {
        match self {
            Self::Unary(op) => Some((op.precedence(), op.associativity())),
            Self::Binary(op) => Some((op.precedence(), op.associativity())),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(Value::String(s)) => write!(f, "{s:?}"),
            Self::Value(v) => write!(f, "{v}"),
            Self::Variable(var) => write!(f, "{var}"),
            Self::Unary(op) => write!(f, "{}", op.identifier()),
            Self::Binary(op) => write!(f, "{}", op.identifier()),
            Self::Function(call) => write!(f, "{}({})", call.function.identifier(), call.arg_count),
            Self::Punctuation(p) => write!(f, "{}", p.as_char()),
        }
    }
}

/// A classified piece of the input together with the character index it
/// starts at.
#[derive(Debug, Clone)]
pub struct Token<'t> {
    /// What the token is.
    pub kind:  TokenKind<'t>,
    /// Character index in the source text.
    pub index: usize,
}

impl<'t> Token<'t> {
    /// Creates a token.
    #[must_use]
    pub const fn new(kind: TokenKind<'t>, index: usize) -> Self {
        Self { kind, index }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
