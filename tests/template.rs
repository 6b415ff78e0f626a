use shunt::{
    Engine,
    Error,
    Value,
    command::{HELP, Reply, dispatch},
    error::{LexError, SyntaxError},
    template::expand,
};

#[test]
fn placeholders_are_replaced_in_order() {
    let engine = Engine::standard();
    assert_eq!(expand(&engine, "{w = 3} x {h = 4} = {w h}").unwrap(), "3 x 4 = 12");
    assert_eq!(expand(&engine, "no placeholders").unwrap(), "no placeholders");
    assert_eq!(expand(&engine, "").unwrap(), "");
}

#[test]
fn doubled_braces_are_literal() {
    let engine = Engine::standard();
    assert_eq!(expand(&engine, "{{{1 + 1}}}").unwrap(), "{2}");
    assert_eq!(expand(&engine, "a } b").unwrap(), "a } b");
}

#[test]
fn braces_inside_strings_stay_in_the_placeholder() {
    let engine = Engine::standard();
    assert_eq!(expand(&engine, "[{\"}\" + 'x'}]").unwrap(), "[}x]");
}

#[test]
fn unclosed_placeholders_are_rejected() {
    let engine = Engine::standard();
    let err = expand(&engine, "ok {1 + 2").unwrap_err();
    assert!(matches!(err, Error::Syntax(SyntaxError::UnclosedPlaceholder { index: 3 })));
}

#[test]
fn placeholder_errors_propagate() {
    let engine = Engine::standard();
    assert!(expand(&engine, "{1 / 0}").is_err());
}

#[test]
fn placeholder_errors_point_into_the_template() {
    let engine = Engine::standard();

    let err = expand(&engine, "ab {1 + $}").unwrap_err();
    assert!(matches!(err, Error::Lex(LexError::UnexpectedCharacter { character: '$', index: 8 })));

    let err = expand(&engine, "{2} and {4 / 0}").unwrap_err();
    assert_eq!(err.index(), Some(11));

    let err = expand(&engine, "x {(1}").unwrap_err();
    assert!(matches!(err, Error::Syntax(SyntaxError::UnmatchedOpeningBracket { index: 3 })));
}

#[test]
fn dispatch_evaluates_plain_lines() {
    let engine = Engine::standard();
    assert_eq!(dispatch(&engine, "  2 + 2  ").unwrap(), Reply::Value(Value::Number(4.0)));
    assert_eq!(dispatch(&engine, "   ").unwrap(), Reply::Nothing);
}

#[test]
fn dispatch_runs_commands() {
    let engine = Engine::standard();
    dispatch(&engine, "n = 7").unwrap();

    let Reply::Text(help) = dispatch(&engine, ":help").unwrap() else {
        panic!(":help did not produce text");
    };
    assert!(help.starts_with(HELP));
    assert!(help.ends_with("Functions:\n  abs, acos, ans, asin, atan, atan2, avg, ceil, clamp, cos, exp, floor, len, ln, log, lower, max, median, min, null, num, round, sign, sin, sqrt, str, sum, tan, trim, trunc, upper"));
    assert_eq!(dispatch(&engine, ":format n^2 = {n ^ 2}").unwrap(),
               Reply::Text("n^2 = 49".to_string()));
    assert_eq!(dispatch(&engine, ":quit").unwrap(), Reply::Quit);

    let Reply::Text(listing) = dispatch(&engine, ":vars").unwrap() else {
        panic!(":vars did not produce text");
    };
    assert!(listing.contains("n = 7"));
    assert!(listing.contains("pi = 3.14159"));
}

#[test]
fn dispatch_rejects_unknown_commands() {
    let engine = Engine::standard();
    let err = dispatch(&engine, ":frobnicate now").unwrap_err();
    assert!(matches!(err, Error::UnknownCommand(ref name) if name == "frobnicate"));
}
