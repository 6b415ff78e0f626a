use tracing::debug;

use crate::{
    error::{Error, Result},
    interpreter::{engine::Engine, token::value::Value},
    template,
};

/// Text printed by `:help`, ahead of the list of functions.
pub const HELP: &str = "\
Enter an expression to evaluate it, for example `x = 2(3 + 4)`.

Commands:
  :help               show this message and the available functions
  :vars               list every variable and its value
  :format <template>  expand {expression} placeholders in a line of text
  :quit               leave the session";

/// What the caller should do after a line has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// An expression was evaluated.
    Value(Value),
    /// A command produced text to show.
    Text(String),
    /// The session should end.
    Quit,
    /// The line was blank.
    Nothing,
}

/// Runs one line of REPL input against `engine`.
///
/// Lines starting with `:` are commands; everything else is evaluated as an
/// expression.
///
/// # Errors
/// Returns [`Error::UnknownCommand`] for unrecognized commands and any error
/// raised while evaluating.
///
/// # Example
/// ```
/// use shunt::{Engine, Value, command::{Reply, dispatch}};
///
/// let engine = Engine::standard();
/// assert_eq!(dispatch(&engine, "x = 4").unwrap(), Reply::Value(Value::Number(4.0)));
/// assert_eq!(dispatch(&engine, ":format x is {x}").unwrap(), Reply::Text("x is 4".into()));
/// assert_eq!(dispatch(&engine, ":quit").unwrap(), Reply::Quit);
/// assert!(dispatch(&engine, ":nope").is_err());
/// ```
pub fn dispatch(engine: &Engine, line: &str) -> Result<Reply> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Reply::Nothing);
    }

    let Some(command) = line.strip_prefix(':') else {
        return engine.evaluate(line).map(Reply::Value);
    };

    let (name, rest) = command.split_once(char::is_whitespace)
                              .map_or((command, ""), |(name, rest)| (name, rest.trim_start()));
    debug!(command = name, "dispatching");

    match name {
        "help" => Ok(Reply::Text(help(engine))),
        "vars" => Ok(Reply::Text(variables(engine))),
        "format" => template::expand(engine, rest).map(Reply::Text),
        "quit" => Ok(Reply::Quit),
        _ => Err(Error::UnknownCommand(name.to_string())),
    }
}

fn help(engine: &Engine) -> String {
    format!("{HELP}\n\nFunctions:\n  {}", engine.functions().names().join(", "))
}

/// One `name = value` line per variable, sorted by name.
fn variables(engine: &Engine) -> String {
    engine.variables()
          .snapshot()
          .iter()
          .map(|variable| format!("{} = {}", variable.name(), variable.value()))
          .collect::<Vec<_>>()
          .join("\n")
}
