use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::Rc,
};

use crate::interpreter::token::value::Value;

/// A named, mutable value.
///
/// The identifier is fixed at creation; the value changes only through
/// [`Variable::assign`]. Variables are shared as `Rc<Variable>` between the
/// table that owns them and the tokens that reference them.
#[derive(Debug)]
pub struct Variable {
    name:  String,
    value: RefCell<Value>,
}

impl Variable {
    /// Creates a variable holding `value`.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self { name:  name.into(),
               value: RefCell::new(value), }
    }

    /// The identifier of the variable.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A copy of the current value.
    #[must_use]
    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Returns `true` once the variable has been assigned a value.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.value.borrow().is_initialized()
    }

    /// Replaces the value and returns the previous one.
    pub fn assign(&self, value: Value) -> Value {
        self.value.replace(value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// An entry on the evaluation stack: either an owned value or a handle to a
/// variable.
///
/// Keeping variables as handles until an operator consumes them is what lets
/// assignment find its target, and lets `y = x = 5` chain through `x`.
#[derive(Debug, Clone)]
pub enum Operand {
    /// An owned intermediate value.
    Value(Value),
    /// A reference to a variable owned by the engine.
    Variable(Rc<Variable>),
}

impl Operand {
    /// The value this operand stands for, reading through variables.
    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            Self::Value(v) => v.clone(),
            Self::Variable(var) => var.value(),
        }
    }

    /// Consumes the operand and returns the value it stands for.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(v) => v,
            Self::Variable(var) => var.value(),
        }
    }

    /// The variable handle, if this operand is one.
    #[must_use]
    pub const fn as_variable(&self) -> Option<&Rc<Variable>> {
        match self {
            Self::Variable(var) => Some(var),
            Self::Value(_) => None,
        }
    }
}

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

/// The flat variable namespace of an engine.
///
/// The table is interior-mutable so that the tokenizer can bind unknown
/// identifiers while operator and function tables stay borrowed immutably.
#[derive(Debug, Default)]
pub struct VariableTable {
    entries: RefCell<HashMap<String, Rc<Variable>>>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<Variable>> {
        self.entries.borrow().get(name).cloned()
    }

    /// Binds `name` to a new variable holding `value`, replacing any previous
    /// binding, and returns the new handle.
    pub fn bind(&self, name: &str, value: Value) -> Rc<Variable> {
        let variable = Rc::new(Variable::new(name, value));
        self.entries
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&variable));
        variable
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// All variables, sorted by name.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Rc<Variable>> {
        let mut all: Vec<_> = self.entries.borrow().values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        all
    }
}
