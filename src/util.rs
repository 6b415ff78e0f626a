/// Character cursor.
///
/// A stateful scan position over an immutable string with predicate-based
/// movement and substring extraction. The tokenizer and the template expander
/// are both built on it.
pub mod cursor;
/// Numeric conversion helpers.
///
/// Safe conversions between `usize` and `f64` that refuse to lose data
/// silently. Functions that take counts or indices as numbers use these to
/// validate their arguments.
pub mod num;
