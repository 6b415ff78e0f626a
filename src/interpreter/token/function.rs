use std::{collections::HashMap, fmt};

use crate::{
    error::SemanticError,
    interpreter::{evaluator::EvalResult, token::value::Value},
};

/// Callback type of a function.
pub type FunctionFn = Box<dyn Fn(&[Value]) -> EvalResult<Value>>;

/// A named function with bounded arity.
pub struct Function {
    identifier: String,
    min_args:   usize,
    max_args:   usize,
    callback:   FunctionFn,
}

impl Function {
    /// Creates a function accepting between `min_args` and `max_args`
    /// arguments. Pass `usize::MAX` as `max_args` for a variadic function; the
    /// engine's argument cap still applies.
    ///
    /// # Errors
    /// Returns [`SemanticError::InvalidArity`] if `min_args > max_args`.
    ///
    /// # Example
    /// ```
    /// use shunt::{Value, interpreter::token::function::Function};
    ///
    /// let twice = Function::new("twice", 1, 1, |args| Ok(Value::Number(args[0].as_number()? * 2.0))).unwrap();
    /// assert_eq!(twice.call(&[Value::Number(4.0)]).unwrap(), Value::Number(8.0));
    ///
    /// assert!(Function::new("broken", 2, 1, |_| Ok(Value::Null)).is_err());
    /// ```
    pub fn new(identifier: impl Into<String>,
               min_args: usize,
               max_args: usize,
               callback: impl Fn(&[Value]) -> EvalResult<Value> + 'static)
               -> EvalResult<Self> {
        let identifier = identifier.into();
        if min_args > max_args {
            return Err(SemanticError::InvalidArity { name: identifier,
                                                     min:  min_args,
                                                     max:  max_args, });
        }

        Ok(Self { identifier,
                  min_args,
                  max_args,
                  callback: Box::new(callback) })
    }

    /// The function name.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Minimum number of arguments.
    #[must_use]
    pub const fn min_args(&self) -> usize {
        self.min_args
    }

    /// Declared maximum number of arguments.
    #[must_use]
    pub const fn max_args(&self) -> usize {
        self.max_args
    }

    /// The maximum once the global cap is applied.
    #[must_use]
    pub fn effective_max(&self, cap: usize) -> usize {
        self.max_args.min(cap)
    }

    /// Returns `true` if a call with `count` arguments is allowed under `cap`.
    #[must_use]
    pub fn accepts(&self, count: usize, cap: usize) -> bool {
        (self.min_args..=self.effective_max(cap)).contains(&count)
    }

    /// Runs the callback. Arity is checked by the evaluator, not here.
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        (self.callback)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
         .field("identifier", &self.identifier)
         .field("min_args", &self.min_args)
         .field("max_args", &self.max_args)
         .finish_non_exhaustive()
    }
}

/// All functions known to an engine, keyed by name.
#[derive(Debug, Default)]
pub struct FunctionTable {
    entries: HashMap<String, Function>,
}

impl FunctionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a function, replacing one with the same name.
    pub fn insert(&mut self, function: Function) {
        self.entries.insert(function.identifier().to_string(), function);
    }

    /// Looks up a function.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.entries.get(name)
    }

    /// Returns `true` if `name` is a registered function.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
