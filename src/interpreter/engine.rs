use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{ConfigError, Result, SyntaxError},
    interpreter::{
        evaluator::Evaluator,
        postfix::{Postfix, PostfixConverter},
        stdlib,
        token::{
            Token,
            function::{Function, FunctionTable},
            operator::{BinaryOperator, OperatorTable, UnaryOperator},
            value::Value,
            variable::{Variable, VariableTable},
        },
        tokenizer::{Callbacks, Tables, Tokenizer, is_identifier_char, is_identifier_start},
    },
};

/// The most recent evaluation results, newest first.
///
/// A `History` is a cheap shared handle: clones observe the same entries.
/// This is how history-dependent functions such as `ans` see the results of
/// the engine they are registered in.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Rc<RefCell<VecDeque<Value>>>,
    limit:   usize,
}

impl History {
    /// Creates an empty history retaining at most `limit` results.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { entries: Rc::default(),
               limit }
    }

    /// Records a result, dropping the oldest one beyond the limit.
    pub fn record(&self, value: Value) {
        let mut entries = self.entries.borrow_mut();
        entries.push_front(value);
        entries.truncate(self.limit);
    }

    /// The result `back` evaluations ago; `0` is the latest.
    #[must_use]
    pub fn recent(&self, back: usize) -> Option<Value> {
        self.entries.borrow().get(back).cloned()
    }

    /// Number of retained results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

}

/// Owns the operator, function and variable tables and runs the
/// tokenize, convert, evaluate pipeline over them.
///
/// An engine starts out empty with [`Engine::new`]; [`Engine::standard`]
/// returns one preloaded with the calculator library.
///
/// The tables are only borrowed by each pipeline run. Operator and function
/// tables are read-only during a run; the variable table may gain entries
/// when the unknown-identifier callback binds a new name, and variables may
/// change through assignment.
///
/// # Example
/// ```
/// use shunt::{Config, Engine, Value, interpreter::token::{operator::Associativity, operator::BinaryOperator}};
///
/// let mut engine = Engine::new(Config::default()).unwrap();
/// engine.set_number_parser(|text| text.parse().ok().map(Value::Number));
/// engine.add_binary(BinaryOperator::new("+", 1, Associativity::Left, |l, r| {
///           Ok(Value::Number(l.as_number()? + r.as_number()?))
///       }))
///       .unwrap();
///
/// assert_eq!(engine.evaluate("10 + 3").unwrap(), Value::Number(13.0));
/// ```
#[derive(Debug)]
pub struct Engine {
    operators: OperatorTable,
    functions: FunctionTable,
    variables: VariableTable,
    callbacks: Callbacks,
    history:   History,
    config:    Config,
}

impl Engine {
    /// Creates an engine with empty tables and no callbacks.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configured decimal separator clashes
    /// with another lexical element.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    /// Creates an engine with the standard calculator library and the default
    /// configuration.
    #[must_use]
    pub fn standard() -> Self {
        let mut engine = Self::empty(Config::default());
        if let Err(err) = stdlib::install(&mut engine) {
            warn!(%err, "standard library incomplete");
        }
        engine
    }

    /// Creates an engine with the standard calculator library.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the configured decimal separator clashes
    /// with another lexical element, including the library's operators.
    ///
    /// # Example
    /// ```
    /// use shunt::{Config, Engine};
    ///
    /// let config = Config { decimal_separator: '-',
    ///                       ..Config::default() };
    /// assert!(Engine::standard_with(config).is_err());
    /// ```
    pub fn standard_with(config: Config) -> Result<Self, ConfigError> {
        let mut engine = Self::new(config)?;
        stdlib::install(&mut engine)?;
        Ok(engine)
    }

    fn empty(config: Config) -> Self {
        Self { operators: OperatorTable::new(),
               functions: FunctionTable::new(),
               variables: VariableTable::new(),
               callbacks: Callbacks::default(),
               history: History::new(config.history_limit),
               config }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The operator table.
    #[must_use]
    pub const fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// The function table.
    #[must_use]
    pub const fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// The variable table.
    #[must_use]
    pub const fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Results of previous evaluations.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Borrows every table the tokenizer needs.
    #[must_use]
    pub const fn tables(&self) -> Tables<'_> {
        Tables { operators: &self.operators,
                 functions: &self.functions,
                 variables: &self.variables,
                 callbacks: &self.callbacks,
                 config:    &self.config, }
    }

    /// Registers a unary operator.
    ///
    /// # Errors
    /// Returns [`ConfigError::SeparatorInOperator`] if the operator is the
    /// decimal separator.
    pub fn add_unary(&mut self, operator: UnaryOperator) -> Result<(), ConfigError> {
        let separator = self.config.decimal_separator;
        if operator.identifier() == separator {
            return Err(ConfigError::SeparatorInOperator { separator,
                                                          operator: separator.to_string() });
        }
        self.operators.add_unary(operator);
        Ok(())
    }

    /// Registers a binary operator.
    ///
    /// # Errors
    /// Returns [`ConfigError::SeparatorInOperator`] if the operator contains
    /// the decimal separator.
    pub fn add_binary(&mut self, operator: BinaryOperator) -> Result<(), ConfigError> {
        let separator = self.config.decimal_separator;
        if operator.identifier().contains(separator) {
            return Err(ConfigError::SeparatorInOperator { separator,
                                                          operator: operator.identifier().to_string() });
        }
        self.operators.add_binary(operator);
        Ok(())
    }

    /// Sets or clears the operator inserted between adjacent operands.
    pub fn set_juxtaposition(&mut self, operator: Option<BinaryOperator>) {
        self.operators.set_juxtaposition(operator);
    }

    /// Registers a function.
    ///
    /// # Errors
    /// Returns a [`SyntaxError`] if the name could never be tokenized as an
    /// identifier.
    pub fn add_function(&mut self, function: Function) -> Result<(), SyntaxError> {
        validate_identifier(function.identifier())?;
        self.functions.insert(function);
        Ok(())
    }

    /// Binds a variable, replacing any previous binding of the same name.
    ///
    /// # Errors
    /// Returns [`SyntaxError::EmptyIdentifier`] or
    /// [`SyntaxError::InvalidIdentifier`] for names the tokenizer could never
    /// produce.
    pub fn add_variable(&self, name: &str, value: Value) -> Result<Rc<Variable>, SyntaxError> {
        validate_identifier(name)?;
        Ok(self.variables.bind(name, value))
    }

    /// Looks up a variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<Rc<Variable>> {
        self.variables.get(name)
    }

    /// Sets the parser for number literals.
    pub fn set_number_parser(&mut self, parser: impl Fn(&str) -> Option<Value> + 'static) {
        self.callbacks.number = Some(Box::new(parser));
    }

    /// Sets the parser for string literals.
    pub fn set_string_parser(&mut self, parser: impl Fn(&str) -> Option<Value> + 'static) {
        self.callbacks.string = Some(Box::new(parser));
    }

    /// Sets the callback that binds unknown identifiers as new variables.
    pub fn set_unknown_identifier(&mut self, binder: impl Fn(&str) -> Option<Value> + 'static) {
        self.callbacks.unknown_identifier = Some(Box::new(binder));
    }

    /// Splits `text` into infix tokens.
    ///
    /// # Errors
    /// Returns any error raised by the tokenizer.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token<'_>>> {
        Tokenizer::new(self.tables()).execute(text)
    }

    /// Tokenizes `text` and converts it to postfix order without evaluating
    /// it.
    ///
    /// # Errors
    /// Returns any error raised by the tokenizer or the converter.
    pub fn parse(&self, text: &str) -> Result<Postfix<'_>> {
        let tokens = self.tokenize(text)?;
        Ok(PostfixConverter::new().execute(tokens)?)
    }

    /// Evaluates a previously parsed sequence and records the result in the
    /// history.
    ///
    /// # Errors
    /// Returns any error raised by the evaluator.
    pub fn evaluate_postfix(&self, postfix: &Postfix<'_>) -> Result<Value> {
        let value = Evaluator::new(&self.config).execute(postfix)?;
        self.history.record(value.clone());
        Ok(value)
    }

    /// Evaluates `text` and returns its value.
    ///
    /// # Errors
    /// Returns the first error raised by any pipeline stage. Variables bound
    /// by the unknown-identifier callback before the failure stay bound.
    ///
    /// # Example
    /// ```
    /// use shunt::{Engine, Value};
    ///
    /// let engine = Engine::standard();
    /// assert_eq!(engine.evaluate("y = x = 5").unwrap(), Value::Number(5.0));
    /// assert_eq!(engine.variable("x").unwrap().value(), Value::Number(5.0));
    /// assert_eq!(engine.variable("y").unwrap().value(), Value::Number(5.0));
    /// ```
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, text: &str) -> Result<Value> {
        let postfix = self.parse(text)?;
        debug!(postfix = %postfix, "parsed");
        self.evaluate_postfix(&postfix)
    }
}

/// Checks that `name` has the shape the tokenizer gives identifiers.
fn validate_identifier(name: &str) -> Result<(), SyntaxError> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(SyntaxError::EmptyIdentifier);
    };
    if !is_identifier_start(first) || !chars.all(is_identifier_char) {
        return Err(SyntaxError::InvalidIdentifier { name: name.to_string() });
    }
    Ok(())
}
