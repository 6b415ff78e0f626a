use shunt::{
    Config,
    Engine,
    Error,
    Value,
    error::{ConfigError, LexError, SemanticError, SyntaxError},
    interpreter::token::{
        function::Function,
        operator::{Associativity, BinaryOperator},
    },
};

fn failure(src: &str) -> Error {
    match Engine::standard().evaluate(src) {
        Ok(value) => panic!("`{src}` gave {value} but was expected to fail"),
        Err(e) => e,
    }
}

/// An engine that knows numbers and `+` but nothing else.
fn bare_engine() -> Engine {
    let mut engine = Engine::new(Config::default()).unwrap();
    engine.set_number_parser(|text| text.parse().ok().map(Value::Number));
    engine.add_binary(BinaryOperator::new("+", 1, Associativity::Left, |l, r| {
              Ok(Value::Number(l.as_number()? + r.as_number()?))
          }))
          .unwrap();
    engine
}

#[test]
fn unmatched_opening_brackets_are_reported_at_any_depth() {
    for (src, index) in [("(1 + 2", 0), ("((((1)))", 0), ("2 * (3 + (4)", 4), ("max(1, (2)", 3), ("max(1, 2", 3)] {
        let err = failure(src);
        assert!(matches!(err, Error::Syntax(SyntaxError::UnmatchedOpeningBracket { .. })),
                "`{src}` gave {err:?}");
        assert_eq!(err.index(), Some(index), "`{src}`");
    }
}

#[test]
fn unmatched_closing_brackets_are_reported_at_any_depth() {
    for (src, index) in [("1 + 2)", 5), ("(1))", 3), ("max(1, 2))", 9), (")", 0)] {
        let err = failure(src);
        assert!(matches!(err, Error::Syntax(SyntaxError::UnmatchedClosingBracket { .. })),
                "`{src}` gave {err:?}");
        assert_eq!(err.index(), Some(index), "`{src}`");
    }
}

#[test]
fn comma_outside_a_call_is_rejected() {
    let err = failure("1, 2");
    assert!(matches!(err, Error::Syntax(SyntaxError::CommaOutsideBrackets { index: 1 })));
}

#[test]
fn function_name_needs_a_call_bracket() {
    let err = failure("sin 1");
    assert!(matches!(err, Error::Syntax(SyntaxError::ExpectedCallBracket { ref name, index: 0 }) if name == "sin"));

    // Whitespace before the bracket is allowed.
    assert_eq!(Engine::standard().evaluate("abs (-1)").unwrap(), Value::Number(1.0));
}

#[test]
fn lexical_errors_carry_their_index() {
    let err = failure("1 + $");
    assert!(matches!(err, Error::Lex(LexError::UnexpectedCharacter { character: '$', index: 4 })));

    let err = failure("2 + \"abc");
    assert!(matches!(err, Error::Lex(LexError::UnterminatedString { index: 4 })));

    let err = failure("1.2.3");
    assert!(matches!(err, Error::Lex(LexError::MalformedNumber { index: 0, .. })));

    // A separator without a digit after it is not part of the number.
    let err = failure("1..2");
    assert!(matches!(err, Error::Lex(LexError::UnexpectedCharacter { character: '.', index: 1 })));

    let err = failure("1 <> 2");
    assert!(matches!(err, Error::Lex(LexError::UnknownOperator { index: 3, .. })));
}

#[test]
fn callback_errors_point_at_their_operator() {
    for (src, index) in [("1 + 2 = 3", 6), ("4 / 0", 2), ("q + 1", 2), ("1 + \"a\" - 1", 8), ("2 * upper(1)", 4)] {
        let err = failure(src);
        assert!(matches!(err, Error::Semantic(SemanticError::At { .. })), "`{src}` gave {err:?}");
        assert_eq!(err.index(), Some(index), "`{src}`");
    }

    let Error::Semantic(err) = failure("1 + 2 = 3") else {
        panic!("expected a semantic error");
    };
    assert!(matches!(err.cause(), SemanticError::NotAVariable { .. }));
    assert_eq!(err.to_string(), "Error at index 6: Left operand of '=' must be a variable.");
}

#[test]
fn located_errors_are_not_wrapped_twice() {
    let err = SemanticError::invalid_argument("x").at(3).at(7);
    assert_eq!(err.index(), Some(3));
    assert_eq!(err.cause(), &SemanticError::invalid_argument("x"));
}

#[test]
fn missing_operands_are_reported() {
    let err = failure("1 +");
    assert!(matches!(err, Error::Semantic(SemanticError::InsufficientOperands { index: 2, .. })));

    let err = failure("-");
    assert!(matches!(err, Error::Semantic(SemanticError::InsufficientOperands { index: 0, .. })));
}

#[test]
fn empty_input_has_no_result() {
    for src in ["", "   ", "()", "; 1"] {
        let err = failure(src);
        assert!(matches!(err, Error::Semantic(SemanticError::ResultCount { found: 0 })),
                "`{src}` gave {err:?}");
    }
}

#[test]
fn adjacent_operands_need_a_juxtaposition_operator() {
    let err = bare_engine().evaluate("1 2").unwrap_err();
    assert!(matches!(err, Error::Syntax(SyntaxError::MissingOperator { index: 2 })));
}

#[test]
fn unknown_identifiers_without_a_binder_fail() {
    let err = bare_engine().evaluate("1 + foo").unwrap_err();
    assert!(matches!(err, Error::Semantic(SemanticError::UnknownIdentifier { ref name, index: 4 }) if name == "foo"));
}

#[test]
fn a_declining_binder_leaves_the_identifier_unbound() {
    let mut engine = bare_engine();
    engine.set_unknown_identifier(|name| name.starts_with('v').then_some(Value::Number(0.0)));

    assert_eq!(engine.evaluate("v1 + 1").unwrap(), Value::Number(1.0));
    let err = engine.evaluate("w1 + 1").unwrap_err();
    assert!(matches!(err, Error::Semantic(SemanticError::UnboundIdentifier { .. })));
    assert!(engine.variable("w1").is_none());
}

#[test]
fn literals_need_their_parsers() {
    let engine = Engine::new(Config::default()).unwrap();

    let err = engine.evaluate("1").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::MissingNumberParser { index: 0 })));

    let err = engine.evaluate("'a'").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::MissingStringParser { index: 0 })));
}

#[test]
fn a_rejected_string_is_malformed() {
    let mut engine = bare_engine();
    engine.set_string_parser(|text| (!text.is_empty()).then(|| Value::from(text)));

    let err = engine.evaluate("\"\"").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::MalformedString { index: 0 })));
}

#[test]
fn the_argument_cap_limits_variadic_functions() {
    let config = Config { max_arguments: 3,
                          ..Config::default() };
    let engine = Engine::standard_with(config).unwrap();

    assert_eq!(engine.evaluate("sum(1, 2, 3)").unwrap(), Value::Number(6.0));
    let err = engine.evaluate("sum(1, 2, 3, 4)").unwrap_err();
    assert!(matches!(err, Error::Semantic(SemanticError::ArityMismatch { max: 3, found: 4, .. })));
}

#[test]
fn invalid_declarations_are_rejected() {
    let err = Function::new("f", 2, 1, |_| Ok(Value::Null)).unwrap_err();
    assert!(matches!(err, SemanticError::InvalidArity { min: 2, max: 1, .. }));

    let mut engine = Engine::standard();
    let err = engine.add_function(Function::new("1f", 0, 0, |_| Ok(Value::Null)).unwrap())
                    .unwrap_err();
    assert!(matches!(err, SyntaxError::InvalidIdentifier { .. }));

    assert!(matches!(engine.add_variable("", Value::Null), Err(SyntaxError::EmptyIdentifier)));
    assert!(matches!(engine.add_variable("a b", Value::Null), Err(SyntaxError::InvalidIdentifier { .. })));
}

#[test]
fn clashing_decimal_separators_are_rejected() {
    for separator in [',', '(', ';', '"', 'x', ' ', '7'] {
        let config = Config { decimal_separator: separator,
                              ..Config::default() };
        let err = Engine::new(config).unwrap_err();
        assert!(matches!(err, ConfigError::ReservedSeparator { .. }), "'{separator}' gave {err:?}");
    }

    let config = Config { decimal_separator: '|',
                          terminators: "|".to_string(),
                          ..Config::default() };
    assert!(Engine::new(config).is_err());

    for separator in ['-', '^', '='] {
        let config = Config { decimal_separator: separator,
                              ..Config::default() };
        let err = Engine::standard_with(config).unwrap_err();
        assert!(matches!(err, ConfigError::SeparatorInOperator { .. }), "'{separator}' gave {err:?}");
    }

    let mut engine = bare_engine();
    let err = engine.add_binary(BinaryOperator::new("+.", 1, Associativity::Left, |l, _| Ok(l)))
                    .unwrap_err();
    assert!(matches!(err, ConfigError::SeparatorInOperator { separator: '.', ref operator } if operator == "+."));
}

#[test]
fn errors_display_their_position() {
    let err = failure("1 + $");
    assert_eq!(err.to_string(), "Error at index 4: Unexpected character '$'.");
}
