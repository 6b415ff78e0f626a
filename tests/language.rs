use std::fs;

use shunt::{Engine, Error, Value, error::SemanticError};
use walkdir::WalkDir;

/// Runs every `expression => expected` line of the `.calc` scripts, each
/// script on its own engine so variables carry over between its lines. An
/// expected value of `!` means the line must fail.
#[test]
fn scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let engine = Engine::standard();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (expression, expected) =
                line.rsplit_once(" => ")
                    .unwrap_or_else(|| panic!("{path:?}:{}: missing ' => '", line_no + 1));
            count += 1;

            match (engine.evaluate(expression), expected.trim()) {
                (Err(_), "!") => {},
                (Ok(value), "!") => {
                    panic!("{path:?}:{}: `{expression}` gave {value} but was expected to fail",
                           line_no + 1)
                },
                (Ok(value), expected) => {
                    assert_eq!(value.to_string(),
                               expected,
                               "{path:?}:{}: `{expression}`",
                               line_no + 1);
                },
                (Err(e), _) => panic!("{path:?}:{}: `{expression}` failed: {e}", line_no + 1),
            }
        }
    }

    assert!(count > 0, "No script lines found in tests/scripts");
}

fn assert_value(src: &str, expected: impl Into<Value>) {
    match Engine::standard().evaluate(src) {
        Ok(value) => assert_eq!(value, expected.into(), "`{src}`"),
        Err(e) => panic!("`{src}` failed: {e}"),
    }
}

/// The semantic error behind `err`, without its location.
fn semantic_cause(err: &Error) -> &SemanticError {
    match err {
        Error::Semantic(e) => e.cause(),
        other => panic!("expected a semantic error, got {other:?}"),
    }
}

fn assert_failure(src: &str) -> Error {
    match Engine::standard().evaluate(src) {
        Ok(value) => panic!("`{src}` gave {value} but was expected to fail"),
        Err(e) => e,
    }
}

#[test]
fn basic_arithmetic() {
    assert_value("10 + 3", 13);
    assert_value("4 + 5 * (5 + 2)", 39);
    assert_value("10 - 3 - 2", 5);
    assert_value("7 / 2", 3.5);
    assert_value("2 * -3", -6);
}

#[test]
fn power_is_right_associative() {
    assert_value("10 ^ 2 ^ 3", 1e8);
    assert_value("2 ^ 3 ^ 2", 512);
    assert_value("(2 ^ 3) ^ 2", 64);
}

#[test]
fn prefix_operators_bind_looser_than_power() {
    assert_value("-2 ^ 2", -4);
    assert_value("(-2) ^ 2", 4);
    assert_value("--3", 3);
    assert_value("!1 + 1", 1);
}

#[test]
fn juxtaposition_multiplies() {
    assert_value("6 / 2(1 + 2)", 9);
    assert_value("2(3)(4)", 24);
    assert_value("(1 + 1)(2 + 2)", 8);
    assert_value("2 sqrt(9)", 6);
}

#[test]
fn comparisons_yield_numbers() {
    assert_value("1 < 2", true);
    assert_value("2 <= 1", false);
    assert_value("3 >= 3", true);
    assert_value("1 + 2 == 3", true);
    assert_value("\"a\" != \"b\"", true);
    assert_value("\"a\" == 1", false);
}

#[test]
fn terminators_end_the_expression() {
    assert_value("1 + 2; 99", 3);
    assert_value("1 + 2 # comment (", 3);
    assert_value("\"a;b\"", "a;b");
}

#[test]
fn assignment_creates_and_chains() {
    let engine = Engine::standard();

    assert_eq!(engine.evaluate("x = 1").unwrap(), Value::Number(1.0));
    assert_eq!(engine.variable("x").unwrap().value(), Value::Number(1.0));

    assert_eq!(engine.evaluate("y = x = 5").unwrap(), Value::Number(5.0));
    assert_eq!(engine.variable("x").unwrap().value(), Value::Number(5.0));
    assert_eq!(engine.variable("y").unwrap().value(), Value::Number(5.0));

    assert_eq!(engine.evaluate("x = x + 1").unwrap(), Value::Number(6.0));
    assert_eq!(engine.evaluate("2x").unwrap(), Value::Number(12.0));
}

#[test]
fn assigning_to_a_value_fails() {
    let err = assert_failure("1 = 2");
    assert!(matches!(semantic_cause(&err), SemanticError::NotAVariable { .. }));
}

#[test]
fn assigning_an_uninitialized_value_fails() {
    let err = assert_failure("a = b");
    assert!(matches!(semantic_cause(&err), SemanticError::UnsupportedAssignment { .. }));
}

#[test]
fn uninitialized_variables_can_be_inspected() {
    let engine = Engine::standard();

    let err = engine.evaluate("q + 1").unwrap_err();
    assert!(matches!(semantic_cause(&err), SemanticError::Uninitialized));

    // The variable created on first use survives the failed evaluation.
    let q = engine.variable("q").unwrap();
    assert!(!q.is_initialized());
    assert_eq!(q.value().as_number(), Err(SemanticError::Uninitialized));

    engine.evaluate("q = 3").unwrap();
    assert!(q.is_initialized());
}

#[test]
fn bare_uninitialized_result_is_returned() {
    let value = Engine::standard().evaluate("fresh").unwrap();
    assert!(!value.is_initialized());
}

#[test]
fn functions_compute() {
    assert_value("max(1, 2 ^ 3, 5)", 8);
    assert_value("min(4, 2, 9)", 2);
    assert_value("sum()", 0);
    assert_value("avg(2, 4)", 3);
    assert_value("max(abs(-2), 1)", 2);
    assert_value("clamp(15, 0, 10)", 10);
    assert_value("log(8, 2)", 3);
    assert_value("max(\"pear\", \"apple\")", "pear");
    assert_value("null()", Value::Null);

    // A comma in a bare group still separates arguments of the enclosing call.
    assert_value("sum(1, (2, 3))", 6);
}

#[test]
fn functions_check_their_arity() {
    for src in ["sqrt()", "sqrt(1, 2)", "clamp(1, 2)", "null(1)", "log(1, 2, 3)"] {
        let err = assert_failure(src);
        assert!(matches!(err, Error::Semantic(SemanticError::ArityMismatch { .. })),
                "`{src}` gave {err:?}");
    }
}

#[test]
fn ans_reads_the_history() {
    let engine = Engine::standard();

    let err = engine.evaluate("ans()").unwrap_err();
    assert!(matches!(semantic_cause(&err), SemanticError::InvalidArgument { .. }));

    engine.evaluate("3 + 4").unwrap();
    assert_eq!(engine.evaluate("ans() * 2").unwrap(), Value::Number(14.0));
    assert_eq!(engine.evaluate("ans(1) + ans()").unwrap(), Value::Number(21.0));
    assert!(engine.evaluate("ans(100)").is_err());
    assert!(engine.evaluate("ans(0.5)").is_err());
}

#[test]
fn strings_concatenate() {
    assert_value("\"a\" + \"b\"", "ab");
    assert_value("\"n = \" + 2 * 3", "n = 6");
    assert_value("upper('mixed') + lower(\"CASE\")", "MIXEDcase");
    assert_value("len(\"héllo\")", 5);
    assert_value("\"say \\\"hi\\\"\"", "say \"hi\"");
}

#[test]
fn division_by_zero_fails() {
    for src in ["1 / 0", "1 % 0"] {
        let err = assert_failure(src);
        assert!(matches!(semantic_cause(&err), SemanticError::InvalidArgument { .. }));
    }
}

#[test]
fn type_errors_are_reported() {
    let err = assert_failure("1 + \"a\" - 1");
    assert!(matches!(semantic_cause(&err), SemanticError::TypeMismatch { .. }));

    let err = assert_failure("sqrt(\"4\")");
    assert!(matches!(semantic_cause(&err), SemanticError::TypeMismatch { .. }));
}

#[test]
fn evaluation_is_repeatable() {
    let engine = Engine::standard();
    let first = engine.evaluate("2 pi + 1").unwrap();
    let second = engine.evaluate("2 pi + 1").unwrap();
    assert_eq!(first, second);
}
