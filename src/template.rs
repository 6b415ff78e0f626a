use tracing::trace;

use crate::{
    error::{Result, SyntaxError},
    interpreter::engine::Engine,
    util::cursor::Cursor,
};

/// Expands every `{expression}` placeholder in `text` with the displayed
/// value of the expression.
///
/// Placeholders are evaluated left to right on `engine`, so an assignment in
/// one placeholder is visible to the next. `{{` and `}}` stand for literal
/// braces, a lone `}` is copied as-is, and braces inside string literals of a
/// placeholder do not end it.
///
/// # Errors
/// Returns [`SyntaxError::UnclosedPlaceholder`] when a `{` is never closed,
/// and any error raised while evaluating a placeholder. Indexes of the latter
/// point into `text`, not into the placeholder.
///
/// # Example
/// ```
/// use shunt::{Engine, template::expand};
///
/// let engine = Engine::standard();
/// let text = expand(&engine, "{r = 2}: area {pi r ^ 2 > 12} {{ok}}").unwrap();
/// assert_eq!(text, "2: area 1 {ok}");
///
/// assert!(expand(&engine, "total {1 + ").is_err());
/// ```
pub fn expand(engine: &Engine, text: &str) -> Result<String> {
    let mut cursor = Cursor::new(text);
    let mut output = String::with_capacity(text.len());

    while cursor.has_more() {
        let start = cursor.position();
        match cursor.advance() {
            '{' if cursor.current() == '{' => {
                cursor.advance();
                output.push('{');
            },
            '}' if cursor.current() == '}' => {
                cursor.advance();
                output.push('}');
            },
            '{' => {
                let expression = placeholder(&mut cursor, start)?;
                let value = engine.evaluate(&expression)
                                  .map_err(|e| e.offset(start + 1))?;
                trace!(%expression, %value, "placeholder expanded");
                output.push_str(&value.to_string());
            },
            c => output.push(c),
        }
    }

    Ok(output)
}

/// Consumes a placeholder body up to and including its closing brace and
/// returns the body.
fn placeholder(cursor: &mut Cursor, start: usize) -> Result<String, SyntaxError> {
    let body_start = cursor.position();
    let mut quote = None;

    while cursor.has_more() {
        let c = cursor.advance();
        match quote {
            Some(q) if c == '\\' && cursor.current() == q => {
                cursor.advance();
            },
            Some(q) if c == q => quote = None,
            Some(_) => {},
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '}' => return Ok(cursor.slice(body_start, cursor.position() - 1)),
            None => {},
        }
    }

    Err(SyntaxError::UnclosedPlaceholder { index: start })
}
