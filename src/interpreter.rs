/// The token model shared by every pipeline stage.
///
/// Declares values, variables, operators, functions and punctuation, and the
/// `Token` type that pairs one of them with its position in the input. The
/// lookup tables the engine owns live next to the types they hold.
pub mod token;
/// The tokenizer splits expression text into infix tokens.
///
/// It decides between prefix and infix readings of operator characters,
/// matches the longest registered binary operator, resolves identifiers to
/// functions or variables, and inserts the juxtaposition operator between
/// adjacent operands.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with a character index.
/// - Delegates number and string literals to the engine's parsers.
/// - Reports lexical errors for invalid or malformed input.
pub mod tokenizer;
/// The postfix module reorders infix tokens for evaluation.
///
/// An implementation of the shunting-yard algorithm that honours precedence
/// and associativity and counts the arguments of every function call.
pub mod postfix;
/// The evaluator module executes postfix sequences.
///
/// A stack machine over operands. It checks operand counts and function
/// arities and leaves exactly one value as the result.
pub mod evaluator;
/// The engine ties the pipeline together.
///
/// It owns the operator, function and variable tables, the literal callbacks,
/// the configuration and the result history, and exposes registration and
/// evaluation entry points.
pub mod engine;
/// The standard calculator library.
///
/// # Responsibilities
/// - Registers arithmetic, comparison, logical and assignment operators.
/// - Registers numeric and string functions and the history function `ans`.
/// - Installs literal parsers and binds unknown identifiers on first use.
pub mod stdlib;
