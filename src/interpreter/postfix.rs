use std::fmt;

use tracing::{debug, trace};

use crate::{
    error::SyntaxError,
    interpreter::token::{Call, Punctuation, Token, TokenKind},
};

/// A token sequence in postfix (reverse Polish) order.
///
/// Punctuation never appears in it, and every function token carries the
/// argument count of its call site. A `Postfix` borrows the operator and
/// function tables of the engine that parsed it, so it can be evaluated any
/// number of times while that engine is alive.
#[derive(Debug, Clone, Default)]
pub struct Postfix<'t> {
    tokens: Vec<Token<'t>>,
}

impl<'t> Postfix<'t> {
    /// The tokens in evaluation order.
    #[must_use]
    pub fn tokens(&self) -> &[Token<'t>] {
        &self.tokens
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

/// An entry of the converter's operator stack.
#[derive(Debug)]
enum Entry<'t> {
    Operator(Token<'t>),
    Open { index: usize },
    Function { call: Call<'t>, index: usize },
}

/// Bookkeeping for one open function call.
#[derive(Debug, Default)]
struct Frame {
    bracket_depth: usize,
    arg_count:     usize,
}

/// Converts infix tokens to postfix order with the shunting-yard algorithm.
///
/// Function calls are tracked with a stack of frames, one per call whose
/// closing bracket has not been seen yet. A frame counts the brackets opened
/// inside the call and the arguments separated so far.
///
/// # Example
/// ```
/// use shunt::Engine;
///
/// let engine = Engine::standard();
/// let postfix = engine.parse("4 + 5 * (5 + 2)").unwrap();
/// assert_eq!(postfix.to_string(), "4 5 5 2 + * +");
///
/// let postfix = engine.parse("max(1, 2 ^ 3, ans())").unwrap();
/// assert_eq!(postfix.to_string(), "1 2 3 ^ ans(0) max(3)");
/// ```
#[derive(Debug, Default)]
pub struct PostfixConverter<'t> {
    output: Vec<Token<'t>>,
    stack:  Vec<Entry<'t>>,
    frames: Vec<Frame>,
}

impl<'t> PostfixConverter<'t> {
    /// Creates an empty converter.
    #[must_use]
    pub fn new() -> Self {
        Self { output: Vec::new(),
               stack:  Vec::new(),
               frames: Vec::new(), }
    }

    /// Converts `tokens` to postfix order.
    ///
    /// # Errors
    /// Returns a [`SyntaxError`] for unmatched brackets and for commas outside
    /// of brackets.
    pub fn execute(mut self, tokens: Vec<Token<'t>>) -> Result<Postfix<'t>, SyntaxError> {
        let mut previous_was_open = false;

        for token in tokens {
            let is_open = token.kind.is_punctuation(Punctuation::Open);

            match token.kind {
                TokenKind::Value(_) | TokenKind::Variable(_) => self.output.push(token),
                TokenKind::Unary(_) => self.stack.push(Entry::Operator(token)),
                TokenKind::Binary(op) => {
                    self.pop_bound_operators(op.precedence(), op.associativity().is_left());
                    self.stack.push(Entry::Operator(token));
                },
                TokenKind::Function(call) => {
                    self.stack.push(Entry::Function { call,
                                                      index: token.index });
                    self.frames.push(Frame::default());
                },
                TokenKind::Punctuation(Punctuation::Open) => {
                    self.stack.push(Entry::Open { index: token.index });
                    if let Some(frame) = self.frames.last_mut() {
                        frame.bracket_depth += 1;
                    }
                },
                TokenKind::Punctuation(Punctuation::Close) => {
                    self.close_bracket(token.index, previous_was_open)?;
                },
                TokenKind::Punctuation(Punctuation::Comma) => {
                    if let Some(frame) = self.frames.last_mut() {
                        frame.arg_count += 1;
                    }
                    if !self.pop_until_open() {
                        return Err(SyntaxError::CommaOutsideBrackets { index: token.index });
                    }
                },
            }

            previous_was_open = is_open;
        }

        while let Some(entry) = self.stack.pop() {
            match entry {
                Entry::Operator(token) => self.output.push(token),
                Entry::Open { index } | Entry::Function { index, .. } => {
                    return Err(SyntaxError::UnmatchedOpeningBracket { index });
                },
            }
        }

        debug!(count = self.output.len(), "converted to postfix");
        Ok(Postfix { tokens: self.output })
    }

    /// Moves operators that bind at least as tightly as the incoming one from
    /// the stack to the output.
    fn pop_bound_operators(&mut self, precedence: i32, left_associative: bool) {
        while let Some(Entry::Operator(top)) = self.stack.last() {
            let Some((top_precedence, _)) = top.kind.binding() else {
                break;
            };
            let pops = (left_associative && precedence <= top_precedence) || precedence < top_precedence;
            if !pops {
                break;
            }
            if let Some(Entry::Operator(token)) = self.stack.pop() {
                trace!(token = %token, "operator popped");
                self.output.push(token);
            }
        }
    }

    /// Moves entries to the output until an opening bracket is on top, and
    /// returns whether one was found. The bracket itself stays on the stack.
    fn pop_until_open(&mut self) -> bool {
        loop {
            match self.stack.last() {
                None => return false,
                Some(Entry::Open { .. }) => return true,
                Some(_) => {},
            }
            match self.stack.pop() {
                Some(Entry::Operator(token)) => self.output.push(token),
                Some(Entry::Function { call, index }) => {
                    self.output.push(Token::new(TokenKind::Function(call), index));
                },
                Some(Entry::Open { .. }) | None => {},
            }
        }
    }

    fn close_bracket(&mut self, index: usize, previous_was_open: bool) -> Result<(), SyntaxError> {
        let mut closed_call = None;
        if let Some(frame) = self.frames.last_mut()
           && frame.bracket_depth > 0
        {
            frame.bracket_depth -= 1;
            if frame.bracket_depth == 0 {
                if !previous_was_open {
                    frame.arg_count += 1;
                }
                closed_call = self.frames.pop().map(|frame| frame.arg_count);
            }
        }

        if !self.pop_until_open() {
            return Err(SyntaxError::UnmatchedClosingBracket { index });
        }
        self.stack.pop();

        if let Some(Entry::Function { .. }) = self.stack.last()
           && let Some(Entry::Function { mut call, index }) = self.stack.pop()
        {
            call.arg_count = closed_call.unwrap_or(call.arg_count);
            trace!(function = call.function.identifier(), arg_count = call.arg_count, "call closed");
            self.output.push(Token::new(TokenKind::Function(call), index));
        }
        Ok(())
    }
}
