use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::{
    error::SemanticError,
    interpreter::{evaluator::EvalResult, token::value::Value},
    util::num::usize_to_f64_checked,
};

/// Type alias for builtin function handlers.
///
/// A builtin receives the evaluated arguments, already checked against its
/// arity, and returns a single value.
pub type BuiltinFn = fn(&[Value]) -> EvalResult<Value>;

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `Range(min, max)` accepts any count in `min..=max`.
/// - `AtLeast(n)` is variadic; the engine's argument cap bounds it.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
    AtLeast(usize),
}

impl Arity {
    /// The inclusive `(min, max)` pair a `Function` is declared with.
    #[must_use]
    pub const fn bounds(self) -> (usize, usize) {
        match self {
            Self::Exact(n) => (n, n),
            Self::Range(min, max) => (min, max),
            Self::AtLeast(n) => (n, usize::MAX),
        }
    }
}

/// A row of the builtin table.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinDef {
    pub name:  &'static str,
    pub arity: Arity,
    pub func:  BuiltinFn,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (every row, in declaration order),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

/// Defines a builtin that maps one number through an `f64` method.
macro_rules! numeric_builtin {
    ($fname:ident, $method:ident) => {
        pub fn $fname(args: &[Value]) -> EvalResult<Value> {
            Ok(Value::Number(number(args, 0)?.$method()))
        }
    };
}

builtin_functions! {
    "abs"    => { arity: Arity::Exact(1), func: abs },
    "sqrt"   => { arity: Arity::Exact(1), func: sqrt },
    "exp"    => { arity: Arity::Exact(1), func: exp },
    "ln"     => { arity: Arity::Exact(1), func: ln },
    "log"    => { arity: Arity::Range(1, 2), func: log },
    "sin"    => { arity: Arity::Exact(1), func: sin },
    "cos"    => { arity: Arity::Exact(1), func: cos },
    "tan"    => { arity: Arity::Exact(1), func: tan },
    "asin"   => { arity: Arity::Exact(1), func: asin },
    "acos"   => { arity: Arity::Exact(1), func: acos },
    "atan"   => { arity: Arity::Exact(1), func: atan },
    "atan2"  => { arity: Arity::Exact(2), func: atan2 },
    "floor"  => { arity: Arity::Exact(1), func: floor },
    "ceil"   => { arity: Arity::Exact(1), func: ceil },
    "round"  => { arity: Arity::Exact(1), func: round },
    "trunc"  => { arity: Arity::Exact(1), func: trunc },
    "sign"   => { arity: Arity::Exact(1), func: sign },
    "min"    => { arity: Arity::AtLeast(1), func: |args| extremum(args, Ordering::Less) },
    "max"    => { arity: Arity::AtLeast(1), func: |args| extremum(args, Ordering::Greater) },
    "sum"    => { arity: Arity::AtLeast(0), func: sum },
    "avg"    => { arity: Arity::AtLeast(1), func: avg },
    "median" => { arity: Arity::AtLeast(1), func: median },
    "clamp"  => { arity: Arity::Exact(3), func: clamp },
    "len"    => { arity: Arity::Exact(1), func: len },
    "upper"  => { arity: Arity::Exact(1), func: |args| map_str(args, str::to_uppercase) },
    "lower"  => { arity: Arity::Exact(1), func: |args| map_str(args, str::to_lowercase) },
    "trim"   => { arity: Arity::Exact(1), func: |args| map_str(args, |s| s.trim().to_string()) },
    "str"    => { arity: Arity::Exact(1), func: to_str },
    "num"    => { arity: Arity::Exact(1), func: to_num },
    "null"   => { arity: Arity::Exact(0), func: |_| Ok(Value::Null) },
}

/// Reads argument `i` as a number.
fn number(args: &[Value], i: usize) -> EvalResult<f64> {
    args.get(i)
        .ok_or_else(|| SemanticError::invalid_argument(format!("missing argument {}", i + 1)))?
        .as_number()
}

/// Reads every argument as a number.
fn numbers(args: &[Value]) -> EvalResult<Vec<f64>> {
    args.iter().map(Value::as_number).collect()
}

numeric_builtin!(abs, abs);
numeric_builtin!(exp, exp);
numeric_builtin!(sin, sin);
numeric_builtin!(cos, cos);
numeric_builtin!(tan, tan);
numeric_builtin!(atan, atan);
numeric_builtin!(floor, floor);
numeric_builtin!(ceil, ceil);
numeric_builtin!(round, round);
numeric_builtin!(trunc, trunc);

/// Square root; negative input is an invalid argument.
pub fn sqrt(args: &[Value]) -> EvalResult<Value> {
    let x = number(args, 0)?;
    if x < 0.0 {
        return Err(SemanticError::invalid_argument(format!("sqrt of negative number {x}")));
    }
    Ok(Value::Number(x.sqrt()))
}

/// Natural logarithm of a positive number.
pub fn ln(args: &[Value]) -> EvalResult<Value> {
    let x = number(args, 0)?;
    if x <= 0.0 {
        return Err(SemanticError::invalid_argument(format!("ln of non-positive number {x}")));
    }
    Ok(Value::Number(x.ln()))
}

/// Logarithm of `x` to `base`, which defaults to 10.
///
/// # Parameters
/// - `args`: `[x]` or `[x, base]`.
///
/// # Returns
/// `Value::Number` with the logarithm, or `InvalidArgument` when `x` is not
/// positive or the base is not a positive number other than 1.
///
/// # Example
/// ```
/// use shunt::{Value, interpreter::stdlib::functions::log};
///
/// assert_eq!(log(&[Value::Number(1000.0)]).unwrap(), Value::Number(3.0));
/// assert_eq!(log(&[Value::Number(8.0), Value::Number(2.0)]).unwrap(), Value::Number(3.0));
/// assert!(log(&[Value::Number(8.0), Value::Number(1.0)]).is_err());
/// ```
pub fn log(args: &[Value]) -> EvalResult<Value> {
    let x = number(args, 0)?;
    let base = if args.len() > 1 { number(args, 1)? } else { 10.0 };

    if x <= 0.0 {
        return Err(SemanticError::invalid_argument(format!("log of non-positive number {x}")));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(SemanticError::invalid_argument(format!("log base must be positive and not 1, got {base}")));
    }

    let result = if base == 10.0 { x.log10() } else if base == 2.0 { x.log2() } else { x.log(base) };
    Ok(Value::Number(result))
}

pub fn asin(args: &[Value]) -> EvalResult<Value> {
    let x = number(args, 0)?;
    if !(-1.0..=1.0).contains(&x) {
        return Err(SemanticError::invalid_argument(format!("asin argument {x} outside [-1, 1]")));
    }
    Ok(Value::Number(x.asin()))
}

pub fn acos(args: &[Value]) -> EvalResult<Value> {
    let x = number(args, 0)?;
    if !(-1.0..=1.0).contains(&x) {
        return Err(SemanticError::invalid_argument(format!("acos argument {x} outside [-1, 1]")));
    }
    Ok(Value::Number(x.acos()))
}

/// Four-quadrant arctangent of `y / x`, arguments in that order.
pub fn atan2(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(number(args, 0)?.atan2(number(args, 1)?)))
}

/// `-1`, `0` or `1` according to the sign of the argument.
pub fn sign(args: &[Value]) -> EvalResult<Value> {
    let x = number(args, 0)?;
    let s = if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    };
    Ok(Value::Number(s))
}

/// Finds the smallest (`Less`) or largest (`Greater`) argument.
///
/// All arguments must be of one comparable kind, so `min("a", "b")` works
/// as well as `min(1, 2)`.
fn extremum(args: &[Value], want: Ordering) -> EvalResult<Value> {
    let mut iter = args.iter();
    let mut best = iter.next()
                       .ok_or_else(|| SemanticError::invalid_argument("expected at least one argument"))?;
    best.ensure_initialized()?;

    for candidate in iter {
        if candidate.compare(best)? == want {
            best = candidate;
        }
    }
    Ok(best.clone())
}

pub fn sum(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(numbers(args)?.iter().sum()))
}

pub fn avg(args: &[Value]) -> EvalResult<Value> {
    let values = numbers(args)?;
    if values.is_empty() {
        return Err(SemanticError::invalid_argument("avg of no values"));
    }
    let count = usize_to_f64_checked(values.len())?;
    Ok(Value::Number(values.iter().sum::<f64>() / count))
}

/// Middle value of the arguments; the mean of the two middle values for an
/// even count.
///
/// # Example
/// ```
/// use shunt::{Value, interpreter::stdlib::functions::median};
///
/// let odd = [3.0, 1.0, 2.0].map(Value::Number);
/// assert_eq!(median(&odd).unwrap(), Value::Number(2.0));
///
/// let even = [4.0, 1.0, 3.0, 2.0].map(Value::Number);
/// assert_eq!(median(&even).unwrap(), Value::Number(2.5));
/// ```
pub fn median(args: &[Value]) -> EvalResult<Value> {
    let mut values = numbers(args)?;
    if values.is_empty() {
        return Err(SemanticError::invalid_argument("median of no values"));
    }
    values.sort_by_key(|v| OrderedFloat(*v));

    let mid = values.len() / 2;
    let result = if values.len() % 2 == 0 {
        f64::midpoint(values[mid - 1], values[mid])
    } else {
        values[mid]
    };
    Ok(Value::Number(result))
}

/// Clamps `x` into `[lo, hi]`.
///
/// If `lo > hi`, an `InvalidArgument` error is returned.
pub fn clamp(args: &[Value]) -> EvalResult<Value> {
    let (x, lo, hi) = (number(args, 0)?, number(args, 1)?, number(args, 2)?);
    if lo > hi {
        return Err(SemanticError::invalid_argument(format!("clamp: min ({lo}) > max ({hi})")));
    }
    Ok(Value::Number(x.clamp(lo, hi)))
}

/// Length of a string in characters.
pub fn len(args: &[Value]) -> EvalResult<Value> {
    let s = string(args)?;
    Ok(Value::Number(usize_to_f64_checked(s.chars().count())?))
}

fn string(args: &[Value]) -> EvalResult<&str> {
    args.first()
        .ok_or_else(|| SemanticError::invalid_argument("missing argument 1"))?
        .as_str()
}

fn map_str(args: &[Value], f: impl Fn(&str) -> String) -> EvalResult<Value> {
    Ok(Value::String(f(string(args)?)))
}

/// Display form of any initialized value.
pub fn to_str(args: &[Value]) -> EvalResult<Value> {
    let value = args.first()
                    .ok_or_else(|| SemanticError::invalid_argument("missing argument 1"))?
                    .ensure_initialized()?;
    Ok(Value::String(value.to_string()))
}

/// Parses a string as a number; numbers pass through unchanged.
///
/// # Example
/// ```
/// use shunt::{Value, interpreter::stdlib::functions::to_num};
///
/// assert_eq!(to_num(&[Value::from(" 2.5 ")]).unwrap(), Value::Number(2.5));
/// assert_eq!(to_num(&[Value::Number(4.0)]).unwrap(), Value::Number(4.0));
/// assert!(to_num(&[Value::from("four")]).is_err());
/// ```
pub fn to_num(args: &[Value]) -> EvalResult<Value> {
    let value = args.first()
                    .ok_or_else(|| SemanticError::invalid_argument("missing argument 1"))?;
    if let Value::Number(n) = value {
        return Ok(Value::Number(*n));
    }

    let text = value.as_str()?;
    text.trim()
        .parse::<f64>()
        .map(Value::Number)
        .map_err(|_| SemanticError::invalid_argument(format!("'{text}' is not a number")))
}
