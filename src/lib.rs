//! # shunt
//!
//! shunt is an embeddable expression engine written in Rust.
//! It tokenizes infix expressions over caller-defined operators and
//! functions, reorders them with the shunting-yard algorithm, and evaluates
//! the result on a stack. A standard calculator library, a template
//! formatter and a REPL command layer are built on top.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// REPL command dispatch.
///
/// Interprets lines that start with `:` as commands (`:help`, `:vars`,
/// `:format`, `:quit`) and evaluates every other line as an expression.
pub mod command;
/// Engine configuration.
///
/// Terminator characters, the decimal separator, the global argument cap and
/// the history size, with the defaults the standard engine uses.
pub mod config;
/// Provides unified error types for every pipeline stage.
///
/// This module defines all errors that can be raised during tokenizing,
/// conversion to postfix, or evaluation. Each family lives in its own type
/// and every error reports the character index it refers to where one is
/// known.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexical, syntax, semantic).
/// - Attaches character indexes and detailed messages for context.
/// - Wraps the families into one `Error` for callers that do not care which
///   stage failed.
pub mod error;
/// Orchestrates the expression pipeline.
///
/// This module ties together the token model, the tokenizer, the postfix
/// converter, the evaluator, the engine that owns all tables, and the
/// standard library.
///
/// # Responsibilities
/// - Coordinates the three pipeline stages.
/// - Provides entry points for registering operators, functions and
///   variables and for evaluating text.
/// - Manages the flow of data and errors between stages.
pub mod interpreter;
/// Placeholder expansion for text templates.
///
/// Replaces every `{expression}` in a piece of text with the value of the
/// expression, so results can be embedded in messages.
pub mod template;
/// General utilities.
///
/// A character cursor for hand-written scanners, and safe conversions between
/// `usize` and `f64`.
pub mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use interpreter::{engine::Engine, token::value::Value};

/// Evaluates `text` on a fresh standard engine.
///
/// Variables do not survive between calls; keep an [`Engine`] around for
/// that.
///
/// # Errors
/// Returns the first error raised by any pipeline stage.
///
/// # Examples
/// ```
/// use shunt::{Value, evaluate};
///
/// assert_eq!(evaluate("4 + 5 * (5 + 2)").unwrap(), Value::Number(39.0));
/// assert_eq!(evaluate("10 ^ 2 ^ 3").unwrap(), Value::Number(1e8));
///
/// // Unbalanced input is rejected with the position of the culprit.
/// let err = evaluate("(1 + 2").unwrap_err();
/// assert_eq!(err.index(), Some(0));
/// ```
pub fn evaluate(text: &str) -> Result<Value> {
    Engine::standard().evaluate(text)
}

static TRACING: Once = Once::new();

/// Installs a `tracing` subscriber writing to stderr, filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset or a global subscriber is already
/// in place.
pub fn init_tracing() {
    TRACING.call_once(|| {
               if std::env::var_os("RUST_LOG").is_none() {
                   return;
               }
               tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                               .with_level(true)
                                                               .with_writer(std::io::stderr))
                                             .with(EnvFilter::from_default_env())
                                             .try_init()
                                             .ok();
           });
}
