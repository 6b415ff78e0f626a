use std::cmp::Ordering;

use crate::{
    error::SemanticError,
    interpreter::{
        evaluator::EvalResult,
        token::{value::Value, variable::Operand},
    },
};

/// Adds two numbers, or concatenates when either side is a string.
///
/// # Example
/// ```
/// use shunt::{Value, interpreter::stdlib::operators::add};
///
/// assert_eq!(add(Value::Number(1.0), Value::Number(2.0)).unwrap(), Value::Number(3.0));
/// assert_eq!(add(Value::from("n = "), Value::Number(2.0)).unwrap(), Value::from("n = 2"));
/// ```
pub fn add(lhs: Value, rhs: Value) -> EvalResult<Value> {
    if lhs.is_string() || rhs.is_string() {
        lhs.ensure_initialized()?;
        rhs.ensure_initialized()?;
        return Ok(Value::String(format!("{lhs}{rhs}")));
    }
    Ok(Value::Number(lhs.as_number()? + rhs.as_number()?))
}

pub fn sub(lhs: Value, rhs: Value) -> EvalResult<Value> {
    Ok(Value::Number(lhs.as_number()? - rhs.as_number()?))
}

pub fn mul(lhs: Value, rhs: Value) -> EvalResult<Value> {
    Ok(Value::Number(lhs.as_number()? * rhs.as_number()?))
}

/// Divides `lhs` by `rhs`. A zero divisor is an invalid argument rather than
/// an infinity.
pub fn div(lhs: Value, rhs: Value) -> EvalResult<Value> {
    let (a, b) = (lhs.as_number()?, rhs.as_number()?);
    if b == 0.0 {
        return Err(SemanticError::invalid_argument("division by zero"));
    }
    Ok(Value::Number(a / b))
}

/// Remainder with the sign of the dividend.
pub fn rem(lhs: Value, rhs: Value) -> EvalResult<Value> {
    let (a, b) = (lhs.as_number()?, rhs.as_number()?);
    if b == 0.0 {
        return Err(SemanticError::invalid_argument("modulo by zero"));
    }
    Ok(Value::Number(a % b))
}

pub fn pow(lhs: Value, rhs: Value) -> EvalResult<Value> {
    Ok(Value::Number(lhs.as_number()?.powf(rhs.as_number()?)))
}

/// Equality across kinds: values of different kinds are simply unequal.
pub fn eq(lhs: Value, rhs: Value) -> EvalResult<Value> {
    lhs.ensure_initialized()?;
    rhs.ensure_initialized()?;
    Ok(Value::from(lhs == rhs))
}

pub fn ne(lhs: Value, rhs: Value) -> EvalResult<Value> {
    let equal = eq(lhs, rhs)?;
    Ok(Value::from(!equal.is_truthy()?))
}

pub fn lt(lhs: Value, rhs: Value) -> EvalResult<Value> {
    Ok(Value::from(lhs.compare(&rhs)? == Ordering::Less))
}

pub fn le(lhs: Value, rhs: Value) -> EvalResult<Value> {
    Ok(Value::from(lhs.compare(&rhs)? != Ordering::Greater))
}

pub fn gt(lhs: Value, rhs: Value) -> EvalResult<Value> {
    Ok(Value::from(lhs.compare(&rhs)? == Ordering::Greater))
}

pub fn ge(lhs: Value, rhs: Value) -> EvalResult<Value> {
    Ok(Value::from(lhs.compare(&rhs)? != Ordering::Less))
}

pub fn plus(value: Value) -> EvalResult<Value> {
    Ok(Value::Number(value.as_number()?))
}

pub fn neg(value: Value) -> EvalResult<Value> {
    Ok(Value::Number(-value.as_number()?))
}

pub fn not(value: Value) -> EvalResult<Value> {
    Ok(Value::from(!value.is_truthy()?))
}

/// Stores the value of `rhs` in the variable `lhs` and yields the variable
/// itself, so assignments chain from the right.
///
/// # Errors
/// - `NotAVariable`: If `lhs` is a plain value.
/// - `UnsupportedAssignment`: If `rhs` holds no value yet.
///
/// # Example
/// ```
/// use std::rc::Rc;
///
/// use shunt::{Value, interpreter::{stdlib::operators::assign, token::variable::{Operand, Variable}}};
///
/// let x = Rc::new(Variable::new("x", Value::Uninitialized));
/// let result = assign(Operand::Variable(x.clone()), Value::Number(3.0).into()).unwrap();
///
/// assert_eq!(x.value(), Value::Number(3.0));
/// assert!(result.as_variable().is_some());
/// ```
pub fn assign(lhs: Operand, rhs: Operand) -> EvalResult<Operand> {
    let Operand::Variable(target) = lhs else {
        return Err(SemanticError::NotAVariable { operator: "=".to_string() });
    };

    let value = rhs.into_value();
    if !value.is_initialized() {
        return Err(SemanticError::UnsupportedAssignment { name: target.name().to_string(),
                                                          kind: value.kind() });
    }

    target.assign(value);
    Ok(Operand::Variable(target))
}
