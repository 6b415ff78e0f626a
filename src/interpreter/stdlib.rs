/// Operator callbacks of the standard library.
///
/// Arithmetic, comparison and logical operators over [`Value`], plus the
/// assignment operator, which works on raw operands.
pub mod operators;

/// Builtin functions of the standard library.
///
/// Declared through a single table that records each function's name, arity
/// and handler.
pub mod functions;

use std::f64::consts;

use tracing::warn;

use crate::{
    error::{ConfigError, SemanticError},
    interpreter::{
        engine::{Engine, History},
        evaluator::EvalResult,
        stdlib::functions::BUILTIN_TABLE,
        token::{
            function::Function,
            operator::{Associativity, BinaryOperator, UnaryOperator},
            value::Value,
        },
    },
    util::num::f64_to_usize_checked,
};

/// Loads the calculator library into `engine`.
///
/// This registers the operators with their usual precedences, `*` as the
/// juxtaposition operator, every builtin function, `ans`, the constants `pi`
/// and `e`, and parsers for literals. Unknown identifiers become
/// uninitialized variables that assignment can fill in.
///
/// # Errors
/// Returns a [`ConfigError`] if an operator of the library contains the
/// engine's decimal separator.
///
/// # Example
/// ```
/// use shunt::{Config, Engine, Value, interpreter::stdlib};
///
/// let mut engine = Engine::new(Config::default()).unwrap();
/// stdlib::install(&mut engine).unwrap();
///
/// assert_eq!(engine.evaluate("2pi / pi").unwrap(), Value::Number(2.0));
/// assert_eq!(engine.evaluate("upper(\"ab\") + 1").unwrap(), Value::from("AB1"));
/// ```
pub fn install(engine: &mut Engine) -> Result<(), ConfigError> {
    install_operators(engine)?;
    install_functions(engine);
    install_constants(engine);
    install_parsers(engine);
    Ok(())
}

fn install_operators(engine: &mut Engine) -> Result<(), ConfigError> {
    use crate::interpreter::{
        stdlib::operators as op,
        token::operator::Associativity::{Left, Right},
    };

    engine.add_binary(BinaryOperator::with_operands("=", 0, Right, op::assign))?;

    let binary: [(&str, i32, Associativity, fn(Value, Value) -> EvalResult<Value>); 12] = [
        ("==", 1, Left, op::eq),
        ("!=", 1, Left, op::ne),
        ("<", 2, Left, op::lt),
        ("<=", 2, Left, op::le),
        (">", 2, Left, op::gt),
        (">=", 2, Left, op::ge),
        ("+", 3, Left, op::add),
        ("-", 3, Left, op::sub),
        ("*", 4, Left, op::mul),
        ("/", 4, Left, op::div),
        ("%", 4, Left, op::rem),
        ("^", 6, Right, op::pow),
    ];
    for (identifier, precedence, associativity, callback) in binary {
        engine.add_binary(BinaryOperator::new(identifier, precedence, associativity, callback))?;
    }

    engine.add_unary(UnaryOperator::new('+', 5, Right, op::plus))?;
    engine.add_unary(UnaryOperator::new('-', 5, Right, op::neg))?;
    engine.add_unary(UnaryOperator::new('!', 5, Right, op::not))?;

    engine.set_juxtaposition(Some(BinaryOperator::new("*", 4, Left, op::mul)));
    Ok(())
}

fn install_functions(engine: &mut Engine) {
    for def in BUILTIN_TABLE {
        let (min, max) = def.arity.bounds();
        register(engine, Function::new(def.name, min, max, def.func));
    }

    let history = engine.history().clone();
    register(engine, Function::new("ans", 0, 1, move |args| ans(&history, args)));
}

/// Registers a function, logging instead of failing on a bad definition.
fn register(engine: &mut Engine, function: EvalResult<Function>) {
    let result = function.map_err(crate::Error::from)
                         .and_then(|f| engine.add_function(f).map_err(crate::Error::from));
    if let Err(err) = result {
        warn!(%err, "builtin skipped");
    }
}

/// The result `n` evaluations back, `n` defaulting to the latest.
fn ans(history: &History, args: &[Value]) -> EvalResult<Value> {
    let back = match args.first() {
        Some(n) => f64_to_usize_checked(n.as_number()?)?,
        None => 0,
    };
    history.recent(back)
           .ok_or_else(|| SemanticError::invalid_argument(format!("no result {back} evaluations back")))
}

fn install_constants(engine: &Engine) {
    for (name, value) in [("pi", consts::PI), ("e", consts::E)] {
        if let Err(err) = engine.add_variable(name, Value::Number(value)) {
            warn!(%err, name, "constant skipped");
        }
    }
}

fn install_parsers(engine: &mut Engine) {
    let separator = engine.config().decimal_separator;
    engine.set_number_parser(move |text| {
        let normalized: String = text.chars().map(|c| if c == separator { '.' } else { c }).collect();
        normalized.parse::<f64>().ok().map(Value::Number)
    });
    engine.set_string_parser(|text| Some(Value::from(text)));
    engine.set_unknown_identifier(|_| Some(Value::Uninitialized));
}
