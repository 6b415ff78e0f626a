use crate::error::SemanticError;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns [`SemanticError::InvalidArgument`] if the value exceeds
/// `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use shunt::util::num::usize_to_f64_checked;
///
/// assert_eq!(usize_to_f64_checked(100).unwrap(), 100.0);
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize) -> Result<f64, SemanticError> {
    let wide = value as u64;
    if wide > MAX_SAFE_U64_INT {
        return Err(SemanticError::invalid_argument(format!("{value} is too large to represent exactly")));
    }
    Ok(wide as f64)
}

/// Safely converts an `f64` to `usize` if the value is finite, non-negative,
/// within range, and not fractional.
///
/// ## Errors
/// Returns [`SemanticError::InvalidArgument`] for non-finite, negative,
/// out-of-range or fractional values.
///
/// ## Example
/// ```
/// use shunt::util::num::f64_to_usize_checked;
///
/// assert_eq!(f64_to_usize_checked(3.0).unwrap(), 3);
/// assert!(f64_to_usize_checked(-1.0).is_err());
/// assert!(f64_to_usize_checked(1.5).is_err());
/// assert!(f64_to_usize_checked(f64::NAN).is_err());
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn f64_to_usize_checked(value: f64) -> Result<usize, SemanticError> {
    if !value.is_finite() {
        return Err(SemanticError::invalid_argument(format!("{value} is not a finite number")));
    }
    if value.fract() != 0.0 {
        return Err(SemanticError::invalid_argument(format!("{value} is not a whole number")));
    }
    if value < 0.0 || value > MAX_SAFE_U64_INT as f64 {
        return Err(SemanticError::invalid_argument(format!("{value} is out of range")));
    }

    usize::try_from(value as u64).map_err(|_| SemanticError::invalid_argument(format!("{value} is out of range")))
}
