use shunt::{
    Config,
    Engine,
    Value,
    interpreter::{
        stdlib::{functions::BUILTIN_FUNCTIONS, operators},
        token::{
            function::Function,
            operator::{Associativity, BinaryOperator, UnaryOperator},
        },
        tokenizer::Tokenizer,
    },
};

fn postfix(src: &str) -> String {
    Engine::standard().parse(src)
                      .unwrap_or_else(|e| panic!("`{src}` failed to parse: {e}"))
                      .to_string()
}

fn tokens(engine: &Engine, src: &str) -> Vec<String> {
    Tokenizer::new(engine.tables()).execute(src)
                                   .unwrap_or_else(|e| panic!("`{src}` failed to tokenize: {e}"))
                                   .iter()
                                   .map(ToString::to_string)
                                   .collect()
}

#[test]
fn postfix_order_follows_precedence_and_associativity() {
    assert_eq!(postfix("4 + 5 * (5 + 2)"), "4 5 5 2 + * +");
    assert_eq!(postfix("10 - 3 - 2"), "10 3 - 2 -");
    assert_eq!(postfix("10 ^ 2 ^ 3"), "10 2 3 ^ ^");
    assert_eq!(postfix("-x ^ 2"), "x 2 ^ -");
    assert_eq!(postfix("a = b = 1 + 1"), "a b 1 1 + = =");
}

#[test]
fn postfix_calls_carry_their_argument_count() {
    assert_eq!(postfix("max(1, 2 ^ 3, ans())"), "1 2 3 ^ ans(0) max(3)");
    assert_eq!(postfix("max(abs(-2), (1 + 2))"), "2 - abs(1) 1 2 + max(2)");
    assert_eq!(postfix("max(1, (2, 3))"), "1 2 3 max(3)");
    assert_eq!(postfix("sin(x)cos(x)"), "x sin(1) x cos(1) *");
    assert_eq!(postfix("\"a\" + 1"), "\"a\" 1 +");
}

#[test]
fn tokenizer_disambiguates_operators() {
    let engine = Engine::standard();

    assert_eq!(tokens(&engine, "-2(x + 1)"), ["-", "2", "*", "(", "x", "+", "1", ")"]);
    assert_eq!(tokens(&engine, "a<=-b"), ["a", "<=", "-", "b"]);
    assert_eq!(tokens(&engine, "1 != !0"), ["1", "!=", "!", "0"]);
    assert_eq!(tokens(&engine, "2pi"), ["2", "*", "pi"]);
}

#[test]
fn juxtaposition_precedence_is_configurable() {
    let engine = Engine::standard();
    assert_eq!(engine.evaluate("6 / 2(1 + 2)").unwrap(), Value::Number(9.0));

    let mut tight = Engine::standard();
    tight.set_juxtaposition(Some(BinaryOperator::new("*", 5, Associativity::Left, operators::mul)));
    assert_eq!(tight.evaluate("6 / 2(1 + 2)").unwrap(), Value::Number(1.0));
    assert_eq!(tight.evaluate("6 / 2 * (1 + 2)").unwrap(), Value::Number(9.0));
}

#[test]
fn signed_numbers_without_unary_minus() {
    let mut engine = Engine::new(Config::default()).unwrap();
    engine.set_number_parser(|text| text.parse().ok().map(Value::Number));
    engine.add_binary(BinaryOperator::new("+", 1, Associativity::Left, operators::add)).unwrap();
    engine.add_binary(BinaryOperator::new("-", 1, Associativity::Left, operators::sub)).unwrap();

    assert_eq!(tokens(&engine, "-3 + 5"), ["-3", "+", "5"]);
    assert_eq!(engine.evaluate("-3 + 5").unwrap(), Value::Number(2.0));
    assert_eq!(engine.evaluate("5 -3").unwrap(), Value::Number(2.0));
    assert_eq!(engine.evaluate("5 - -3").unwrap(), Value::Number(8.0));
}

#[test]
fn custom_operators_and_functions() {
    let mut engine = Engine::new(Config::default()).unwrap();
    engine.set_number_parser(|text| text.parse().ok().map(Value::Number));
    engine.add_binary(BinaryOperator::new("**", 10, Associativity::Right, operators::pow)).unwrap();
    engine.add_binary(BinaryOperator::new("*", 5, Associativity::Left, operators::mul)).unwrap();
    engine.add_binary(BinaryOperator::new("<>", 0, Associativity::Any, |l, r| Ok(Value::from(l != r))))
          .unwrap();
    engine.add_unary(UnaryOperator::new('~', 20, Associativity::Right, operators::neg)).unwrap();
    engine.add_function(Function::new("count", 0, usize::MAX, |args| {
                            Ok(Value::Number(args.len() as f64))
                        }).unwrap())
          .unwrap();

    assert_eq!(engine.evaluate("2 ** 3 ** 2").unwrap(), Value::Number(512.0));
    assert_eq!(engine.evaluate("2 * 3 ** 2").unwrap(), Value::Number(18.0));
    assert_eq!(engine.evaluate("~2 ** 2").unwrap(), Value::Number(4.0));
    assert_eq!(engine.evaluate("1 <> 2").unwrap(), Value::Number(1.0));
    assert_eq!(engine.evaluate("count(1, 2, count())").unwrap(), Value::Number(3.0));
}

#[test]
fn parsed_expressions_can_be_reevaluated() {
    let engine = Engine::standard();
    engine.add_variable("x", Value::Number(1.0)).unwrap();

    let parsed = engine.parse("x * 2").unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(engine.evaluate_postfix(&parsed).unwrap(), Value::Number(2.0));

    engine.variable("x").unwrap().assign(Value::Number(3.0));
    assert_eq!(engine.evaluate_postfix(&parsed).unwrap(), Value::Number(6.0));
}

#[test]
fn config_changes_the_lexical_rules() {
    let config = Config { decimal_separator: ':',
                          terminators: "|".to_string(),
                          ..Config::default() };
    let engine = Engine::standard_with(config).unwrap();

    assert_eq!(engine.evaluate("1:5 * 2").unwrap(), Value::Number(3.0));
    assert_eq!(engine.evaluate("1 + 2 | 3").unwrap(), Value::Number(3.0));
    assert!(engine.evaluate("1 # 2").is_err());
    assert!(engine.evaluate("1.5").is_err());
}

#[test]
fn the_separator_never_swallows_a_comma() {
    let config = Config { decimal_separator: ',',
                          ..Config::default() };
    assert!(Engine::standard_with(config).is_err());

    let engine = Engine::standard();
    assert_eq!(engine.evaluate("min(5, 3)").unwrap(), Value::Number(3.0));
    assert_eq!(engine.evaluate("min(5,3)").unwrap(), Value::Number(3.0));
    assert_eq!(engine.evaluate("clamp(15, 0, 10)").unwrap(), Value::Number(10.0));
    assert_eq!(tokens(&engine, "(1.5,2)"), ["(", "1.5", ",", "2", ")"]);
}

#[test]
fn history_is_bounded() {
    let config = Config { history_limit: 2,
                          ..Config::default() };
    let engine = Engine::standard_with(config).unwrap();

    for src in ["1", "2", "3"] {
        engine.evaluate(src).unwrap();
    }
    assert_eq!(engine.history().len(), 2);
    assert_eq!(engine.evaluate("ans(1)").unwrap(), Value::Number(2.0));
    assert!(engine.evaluate("ans(2)").is_err());
}

#[test]
fn variables_are_listed_by_name() {
    let engine = Engine::standard();
    engine.evaluate("b = 2").unwrap();
    engine.evaluate("a = 1").unwrap();

    let names: Vec<String> = engine.variables()
                                   .snapshot()
                                   .iter()
                                   .map(|v| v.name().to_string())
                                   .collect();
    assert_eq!(names, ["a", "b", "e", "pi"]);
    assert_eq!(engine.variables().len(), 4);
}

#[test]
fn every_builtin_is_registered() {
    let engine = Engine::standard();
    for name in BUILTIN_FUNCTIONS {
        assert!(engine.functions().contains(name), "{name} is missing");
    }
    assert!(engine.functions().contains("ans"));
}
