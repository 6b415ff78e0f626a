use tracing::{debug, trace};

use crate::{
    config::Config,
    error::SemanticError,
    interpreter::{
        postfix::Postfix,
        token::{
            Call,
            Token,
            TokenKind,
            value::Value,
            variable::Operand,
        },
    },
};

/// Result type used by the evaluator and by every operator and function
/// callback.
pub type EvalResult<T> = Result<T, SemanticError>;

/// Executes postfix token sequences on an operand stack.
///
/// The stack owns every intermediate result. When evaluation finishes, the
/// single survivor is moved out and everything else is dropped with the
/// evaluator. Variables stay on the stack as handles until an operator or
/// function consumes them.
///
/// # Example
/// ```
/// use shunt::{Engine, Value, interpreter::evaluator::Evaluator};
///
/// let engine = Engine::standard();
/// let postfix = engine.parse("10 - 3 - 2").unwrap();
/// let value = Evaluator::new(engine.config()).execute(&postfix).unwrap();
/// assert_eq!(value, Value::Number(5.0));
/// ```
#[derive(Debug)]
pub struct Evaluator<'c> {
    config: &'c Config,
    stack:  Vec<Operand>,
}

impl<'c> Evaluator<'c> {
    /// Creates an evaluator with an empty stack.
    #[must_use]
    pub const fn new(config: &'c Config) -> Self {
        Self { config,
               stack: Vec::new() }
    }

    /// Evaluates `postfix` and returns its single result.
    ///
    /// # Errors
    /// Returns a [`SemanticError`] when an operator or function finds too few
    /// operands, a call violates its arity, a callback fails, or the sequence
    /// does not leave exactly one value behind.
    pub fn execute(mut self, postfix: &Postfix<'_>) -> EvalResult<Value> {
        for token in postfix.tokens() {
            self.step(token)?;
        }

        if self.stack.len() != 1 {
            return Err(SemanticError::ResultCount { found: self.stack.len() });
        }

        let result = self.stack
                         .pop()
                         .map(Operand::into_value)
                         .ok_or(SemanticError::ResultCount { found: 0 })?;
        debug!(result = %result, "evaluated");
        Ok(result)
    }

    fn step(&mut self, token: &Token<'_>) -> EvalResult<()> {
        match &token.kind {
            TokenKind::Value(value) => self.stack.push(Operand::Value(value.clone())),
            TokenKind::Variable(variable) => self.stack.push(Operand::Variable(variable.clone())),
            TokenKind::Unary(op) => {
                let name = op.identifier().to_string();
                self.require(1, &name, token.index)?;
                let operand = self.pop(&name, token.index)?;
                let result = op.apply(operand.into_value()).map_err(|e| e.at(token.index))?;
                trace!(operator = %name, result = %result, "unary applied");
                self.stack.push(Operand::Value(result));
            },
            TokenKind::Binary(op) => {
                self.require(2, op.identifier(), token.index)?;
                let rhs = self.pop(op.identifier(), token.index)?;
                let lhs = self.pop(op.identifier(), token.index)?;
                let result = op.apply(lhs, rhs).map_err(|e| e.at(token.index))?;
                trace!(operator = op.identifier(), "binary applied");
                self.stack.push(result);
            },
            TokenKind::Function(call) => self.call(call, token.index)?,
            TokenKind::Punctuation(p) => {
                return Err(SemanticError::UnexpectedToken { token: p.as_char().to_string(),
                                                            index: token.index, });
            },
        }
        Ok(())
    }

    fn call(&mut self, call: &Call<'_>, index: usize) -> EvalResult<()> {
        let function = call.function;
        let cap = self.config.max_arguments;

        if !function.accepts(call.arg_count, cap) {
            return Err(SemanticError::ArityMismatch { name: function.identifier().to_string(),
                                                      min: function.min_args(),
                                                      max: function.effective_max(cap),
                                                      found: call.arg_count,
                                                      index });
        }

        let args: Vec<Value> = self.pop_operands(call.arg_count, function.identifier(), index)?
                                   .into_iter()
                                   .map(Operand::into_value)
                                   .collect();
        let result = function.call(&args).map_err(|e| e.at(index))?;
        trace!(function = function.identifier(), result = %result, "function called");
        self.stack.push(Operand::Value(result));
        Ok(())
    }

    /// Fails unless at least `count` operands are on the stack.
    fn require(&self, count: usize, operator: &str, index: usize) -> EvalResult<()> {
        if self.stack.len() < count {
            return Err(SemanticError::InsufficientOperands { operator: operator.to_string(),
                                                             index });
        }
        Ok(())
    }

    fn pop(&mut self, operator: &str, index: usize) -> EvalResult<Operand> {
        self.stack.pop().ok_or_else(|| SemanticError::InsufficientOperands { operator: operator.to_string(),
                                                                             index })
    }

    /// Removes the top `count` operands, oldest first.
    fn pop_operands(&mut self, count: usize, operator: &str, index: usize) -> EvalResult<Vec<Operand>> {
        self.require(count, operator, index)?;
        Ok(self.stack.split_off(self.stack.len() - count))
    }
}
