use std::fmt;

use tracing::{debug, trace};

use crate::{
    config::Config,
    error::{LexError, Result, SemanticError, SyntaxError},
    interpreter::token::{
        Call,
        Punctuation,
        Token,
        TokenKind,
        function::FunctionTable,
        operator::OperatorTable,
        value::Value,
        variable::VariableTable,
    },
    util::cursor::Cursor,
};

/// Callback turning literal text into a value. `None` rejects the text.
pub type LiteralFn = Box<dyn Fn(&str) -> Option<Value>>;

/// The text-to-value callbacks an engine supplies to the tokenizer.
///
/// The number and string parsers are required as soon as the input contains
/// such a literal. The unknown-identifier callback is optional; without it,
/// every identifier must already be registered.
#[derive(Default)]
pub struct Callbacks {
    /// Parses number literals, sign and decimal separator included.
    pub number:             Option<LiteralFn>,
    /// Parses the content of string literals, quotes removed.
    pub string:             Option<LiteralFn>,
    /// Supplies the initial value of a variable bound on first use.
    pub unknown_identifier: Option<LiteralFn>,
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
         .field("number", &self.number.is_some())
         .field("string", &self.string.is_some())
         .field("unknown_identifier", &self.unknown_identifier.is_some())
         .finish()
    }
}

/// Everything the tokenizer borrows from its engine for one run.
#[derive(Debug, Clone, Copy)]
pub struct Tables<'t> {
    /// Unary, binary and juxtaposition operators.
    pub operators: &'t OperatorTable,
    /// Registered functions.
    pub functions: &'t FunctionTable,
    /// The variable namespace; unknown identifiers may be bound into it.
    pub variables: &'t VariableTable,
    /// Literal and identifier callbacks.
    pub callbacks: &'t Callbacks,
    /// Terminators, decimal separator and limits.
    pub config:    &'t Config,
}

/// Returns `true` if `c` may start an identifier.
#[must_use]
pub fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns `true` if `c` may continue an identifier.
#[must_use]
pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Returns `true` if `c` opens a string literal.
const fn is_quote(c: char) -> bool {
    matches!(c, '"' | '\'')
}

/// Splits expression text into tokens.
///
/// The tokenizer resolves two ambiguities on the fly: whether an operator
/// character is a prefix or an infix operator, and whether two adjacent
/// operands need the juxtaposition operator between them.
///
/// # Example
/// ```
/// use shunt::{Engine, interpreter::tokenizer::Tokenizer};
///
/// let engine = Engine::standard();
/// let tokens = Tokenizer::new(engine.tables()).execute("-2(x + 1)").unwrap();
/// let text: Vec<String> = tokens.iter().map(ToString::to_string).collect();
/// assert_eq!(text, ["-", "2", "*", "(", "x", "+", "1", ")"]);
/// ```
pub struct Tokenizer<'t> {
    tables: Tables<'t>,
    tokens: Vec<Token<'t>>,
}

impl<'t> Tokenizer<'t> {
    /// Creates a tokenizer over the given tables.
    #[must_use]
    pub const fn new(tables: Tables<'t>) -> Self {
        Self { tables,
               tokens: Vec::new() }
    }

    /// Tokenizes `text` up to its end or the first terminator outside quotes.
    ///
    /// # Errors
    /// Returns a lexical error for malformed literals and unknown characters,
    /// a syntax error for misplaced function names or adjacent operands
    /// without a juxtaposition operator, and a semantic error for identifiers
    /// that cannot be resolved.
    pub fn execute(mut self, text: &str) -> Result<Vec<Token<'t>>> {
        let mut cursor = Cursor::new(text);

        loop {
            cursor.skip_whitespace();
            if !cursor.has_more() {
                break;
            }

            let c = cursor.current();
            let index = cursor.position();

            if self.tables.config.is_terminator(c) {
                trace!(index, "terminator reached");
                break;
            }

            let kind = if c.is_ascii_digit() || self.starts_signed_number(&cursor) {
                self.number(&mut cursor)?
            } else if is_quote(c) {
                self.string(&mut cursor)?
            } else if let Some(punctuation) = Punctuation::from_char(c) {
                cursor.advance();
                TokenKind::Punctuation(punctuation)
            } else if self.tables.operators.is_unary_char(c)
                      || self.tables.operators.is_binary_char(c)
            {
                self.operator(&mut cursor)?
            } else if is_identifier_start(c) {
                self.identifier(&mut cursor)?
            } else {
                return Err(LexError::UnexpectedCharacter { character: c,
                                                           index }.into());
            };

            self.push(kind, index)?;
        }

        debug!(count = self.tokens.len(), "tokenized");
        Ok(self.tokens)
    }

    /// Returns `true` if the next token must be an operand: at the start, or
    /// after an operator, `(` or `,`.
    fn expects_operand(&self) -> bool {
        self.tokens.last().is_none_or(|prev| {
                              prev.kind.is_operator()
                              || prev.kind.is_punctuation(Punctuation::Open)
                              || prev.kind.is_punctuation(Punctuation::Comma)
                          })
    }

    /// A sign belongs to a number literal only in operand position, only
    /// directly before a digit, and only if the sign is not itself a
    /// registered unary operator.
    fn starts_signed_number(&self, cursor: &Cursor) -> bool {
        let c = cursor.current();
        matches!(c, '+' | '-')
        && cursor.peek(1).is_ascii_digit()
        && !self.tables.operators.is_unary_char(c)
        && self.expects_operand()
    }

    fn number(&self, cursor: &mut Cursor) -> Result<TokenKind<'t>> {
        let index = cursor.position();
        let separator = self.tables.config.decimal_separator;

        if matches!(cursor.current(), '+' | '-') {
            cursor.advance();
        }
        // A separator belongs to the literal only when a digit follows it.
        loop {
            cursor.advance_while(|c| c.is_ascii_digit());
            if cursor.current() != separator || !cursor.peek(1).is_ascii_digit() {
                break;
            }
            cursor.advance();
        }
        let literal = cursor.slice(index, cursor.position());

        let parse = self.tables
                        .callbacks
                        .number
                        .as_ref()
                        .ok_or(LexError::MissingNumberParser { index })?;
        let value = parse(&literal).ok_or_else(|| LexError::MalformedNumber { literal: literal.clone(),
                                                                              index })?;
        Ok(TokenKind::Value(value))
    }

    fn string(&self, cursor: &mut Cursor) -> Result<TokenKind<'t>> {
        let index = cursor.position();
        let quote = cursor.advance();
        let mut content = String::new();

        loop {
            if !cursor.has_more() {
                return Err(LexError::UnterminatedString { index }.into());
            }
            match cursor.advance() {
                '\\' if cursor.current() == quote => {
                    content.push(quote);
                    cursor.advance();
                },
                c if c == quote => break,
                c => content.push(c),
            }
        }

        let parse = self.tables
                        .callbacks
                        .string
                        .as_ref()
                        .ok_or(LexError::MissingStringParser { index })?;
        let value = parse(&content).ok_or(LexError::MalformedString { index })?;
        Ok(TokenKind::Value(value))
    }

    fn operator(&self, cursor: &mut Cursor) -> Result<TokenKind<'t>> {
        let index = cursor.position();
        let c = cursor.current();
        let operators = self.tables.operators;

        if self.expects_operand() {
            let op = operators.unary(c)
                              .ok_or_else(|| LexError::UnknownOperator { operator: c.to_string(),
                                                                         index })?;
            cursor.advance();
            return Ok(TokenKind::Unary(op));
        }

        let run = cursor.take_while(|ch| operators.is_binary_char(ch));
        if run.is_empty() {
            return Err(LexError::UnknownOperator { operator: c.to_string(),
                                                   index }.into());
        }

        let (op, matched) =
            operators.longest_match(&run)
                     .ok_or_else(|| LexError::UnknownOperator { operator: run.clone(),
                                                                index })?;
        cursor.retreat_by(run.chars().count() - matched);
        Ok(TokenKind::Binary(op))
    }

    fn identifier(&self, cursor: &mut Cursor) -> Result<TokenKind<'t>> {
        let index = cursor.position();
        let name = cursor.take_while(is_identifier_char);
        if name.is_empty() {
            return Err(SyntaxError::EmptyIdentifier.into());
        }

        if let Some(function) = self.tables.functions.get(&name) {
            if cursor.peek_non_whitespace() != '(' {
                return Err(SyntaxError::ExpectedCallBracket { name, index }.into());
            }
            return Ok(TokenKind::Function(Call { function,
                                                 arg_count: 0 }));
        }

        if let Some(variable) = self.tables.variables.get(&name) {
            return Ok(TokenKind::Variable(variable));
        }

        let Some(bind) = self.tables.callbacks.unknown_identifier.as_ref() else {
            return Err(SemanticError::UnknownIdentifier { name, index }.into());
        };
        let Some(value) = bind(&name) else {
            return Err(SemanticError::UnboundIdentifier { name, index }.into());
        };

        debug!(%name, "bound unknown identifier");
        Ok(TokenKind::Variable(self.tables.variables.bind(&name, value)))
    }

    /// Appends a token, inserting the juxtaposition operator first when the
    /// previous token already completed an operand.
    fn push(&mut self, kind: TokenKind<'t>, index: usize) -> Result<()> {
        if let Some(prev) = self.tokens.last()
           && Self::needs_juxtaposition(&prev.kind, &kind)
        {
            let op = self.tables
                         .operators
                         .juxtaposition()
                         .ok_or(SyntaxError::MissingOperator { index })?;
            trace!(index, "juxtaposition inserted");
            self.tokens.push(Token::new(TokenKind::Binary(op), index));
        }

        trace!(index, token = %kind, kind = kind.name());
        self.tokens.push(Token::new(kind, index));
        Ok(())
    }

    fn needs_juxtaposition(prev: &TokenKind<'_>, current: &TokenKind<'_>) -> bool {
        let prev_completes = prev.is_operand() || prev.is_punctuation(Punctuation::Close);
        let current_starts = current.is_operand()
                             || matches!(current, TokenKind::Function(_))
                             || current.is_punctuation(Punctuation::Open);
        prev_completes && current_starts
    }
}
