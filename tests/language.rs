use simian::{
    RunError,
    interpreter::{environment::Environment, value::core::Value},
    run_program,
};

fn eval(source: &str) -> Option<Value> {
    run_program(source, &Environment::root())
        .unwrap_or_else(|e| panic!("Script failed: {e}\n{source}"))
}

fn eval_value(source: &str) -> Value {
    eval(source).unwrap_or_else(|| panic!("Script produced no value: {source}"))
}

fn eval_error(source: &str) -> String {
    match run_program(source, &Environment::root()) {
        Err(RunError::Runtime(error)) => error.to_string(),
        Ok(value) => panic!("Script succeeded with {value:?} but was expected to fail: {source}"),
        Err(error) => panic!("Script failed to parse: {error}\n{source}"),
    }
}

#[test]
fn integer_arithmetic() {
    assert_eq!(eval_value("5"), Value::Integer(5));
    assert_eq!(eval_value("1 + 2 * 3"), Value::Integer(7));
    assert_eq!(eval_value("(1 + 2) * 3"), Value::Integer(9));
    assert_eq!(eval_value("8 - 5"), Value::Integer(3));
    assert_eq!(eval_value("-5 + 10"), Value::Integer(5));
    assert_eq!(eval_value("7 % 3"), Value::Integer(1));
}

#[test]
fn integer_division_truncates_toward_zero() {
    assert_eq!(eval_value("7 / 2"), Value::Integer(3));
    assert_eq!(eval_value("-7 / 2"), Value::Integer(-3));
    assert_eq!(eval_value("-7 % 3"), Value::Integer(-1));
    assert_eq!(eval_value("7 % -3"), Value::Integer(1));
}

#[test]
fn division_by_zero_is_an_error() {
    assert_eq!(eval_error("1 / 0"), "division by zero");
    assert_eq!(eval_error("1 % 0"), "division by zero");
    assert_eq!(eval_error("1.5 / 0.0"), "division by zero");
}

#[test]
fn integer_overflow_is_an_error() {
    assert_eq!(eval_error("9223372036854775807 + 1"), "integer overflow");
    assert_eq!(eval_error("-(0 - 9223372036854775807 - 1)"), "integer overflow");
}

#[test]
fn mixed_arithmetic_promotes_to_float() {
    assert_eq!(eval_value("1 + 2.0"), Value::Float(3.0));
    assert_eq!(eval_value("2.5 * 2"), Value::Float(5.0));
    assert_eq!(eval_value("7 / 2.0"), Value::Float(3.5));
    assert_eq!(eval_value("7.5 % 2"), Value::Float(1.5));
}

#[test]
fn numeric_equality_crosses_integer_and_float() {
    assert_eq!(eval_value("1 == 1.0"), Value::Bool(true));
    assert_eq!(eval_value("1 != 1.5"), Value::Bool(true));
    assert_eq!(eval_value("2 < 2.5"), Value::Bool(true));
    assert_eq!(eval_value("3.0 > 4"), Value::Bool(false));
}

#[test]
fn float_display_keeps_a_fractional_digit() {
    assert_eq!(eval_value("1 + 2.0").to_string(), "3.0");
    assert_eq!(eval_value("0.1 + 0.2").to_string(), "0.30000000000000004");
    assert_eq!(eval_value("-2.5 * 2.0").to_string(), "-5.0");
}

#[test]
fn comparison_operators() {
    assert_eq!(eval_value("1 < 2"), Value::Bool(true));
    assert_eq!(eval_value("1 > 2"), Value::Bool(false));
    assert_eq!(eval_value("1 == 1"), Value::Bool(true));
    assert_eq!(eval_value("1 != 1"), Value::Bool(false));
    assert_eq!(eval_value("true == true"), Value::Bool(true));
    assert_eq!(eval_value("true != false"), Value::Bool(true));
}

#[test]
fn bang_follows_truthiness() {
    assert_eq!(eval_value("!true"), Value::Bool(false));
    assert_eq!(eval_value("!false"), Value::Bool(true));
    assert_eq!(eval_value("!!true"), Value::Bool(true));
    assert_eq!(eval_value("!\"\""), Value::Bool(false));
    assert_eq!(eval_value("!if (false) { 1 }"), Value::Bool(true));
}

#[test]
fn truthiness_in_conditionals() {
    assert_eq!(eval_value("if (0) { 1 } else { 2 }"), Value::Integer(1));
    assert_eq!(eval_value("if (0.0) { 1 } else { 2 }"), Value::Integer(1));
    assert_eq!(eval_value("if (\"\") { 1 } else { 2 }"), Value::Integer(1));
    assert_eq!(eval_value("if ([]) { 1 } else { 2 }"), Value::Integer(1));
    assert_eq!(eval_value("if (false) { 1 } else { 2 }"), Value::Integer(2));
    assert_eq!(eval_value("if (false) { 1 }"), Value::Null);
    assert_eq!(eval_value("!0"), Value::Bool(false));
}

#[test]
fn string_operations() {
    assert_eq!(eval_value("\"foo\" + \"bar\""), Value::from("foobar"));
    assert_eq!(eval_value("\"a\" == \"a\""), Value::Bool(true));
    assert_eq!(eval_value("\"a\" != \"b\""), Value::Bool(true));
    assert_eq!(eval_error("\"a\" - \"b\""), "unknown operator: STRING - STRING");
}

#[test]
fn operator_error_taxonomy() {
    assert_eq!(eval_error("1 + true"), "type mismatch: INTEGER + BOOLEAN");
    assert_eq!(eval_error("\"a\" + 1"), "type mismatch: STRING + INTEGER");
    assert_eq!(eval_error("true + false"), "unknown operator: BOOLEAN + BOOLEAN");
    assert_eq!(eval_error("-true"), "unknown operator: -BOOLEAN");
    assert_eq!(eval_error("-\"a\""), "unknown operator: -STRING");
    assert_eq!(eval_error("[1] + [2]"), "unknown operator: ARRAY + ARRAY");
}

#[test]
fn bindings_and_lookup() {
    assert_eq!(eval_value("let x = 5; x"), Value::Integer(5));
    assert_eq!(eval_value("let x = 5; let y = x + 1; y"), Value::Integer(6));
    assert_eq!(eval_error("x"), "identifier not found: x");
    assert_eq!(eval_error("let x = y"), "identifier not found: y");
}

#[test]
fn binding_statements_produce_no_value() {
    assert_eq!(eval("let x = 5"), None);
    assert_eq!(eval("const x = 5"), None);
}

#[test]
fn reassignment() {
    assert_eq!(eval_value("let x = 1; x = 2; x"), Value::Integer(2));
    assert_eq!(eval_value("let x = 1; x = x + 1; x = x * 10; x"), Value::Integer(20));
    // Reassignment is an expression statement yielding the new value.
    assert_eq!(eval_value("let x = 1; x = 5"), Value::Integer(5));
    assert_eq!(eval_error("x = 2"), "identifier not found: x");
}

#[test]
fn const_bindings_reject_reassignment() {
    assert_eq!(eval_error("const y = 1; y = 2"), "cannot reassign to const: y");
    assert_eq!(eval_value("const y = 1; y + 1"), Value::Integer(2));
    // A new binding may shadow a const.
    assert_eq!(eval_value("const y = 1; let y = 2; y"), Value::Integer(2));
}

#[test]
fn reassignment_walks_enclosing_scopes() {
    assert_eq!(eval_value("let x = 1; fn() { x = 2 }(); x"), Value::Integer(2));
    assert_eq!(eval_error("const k = 1; fn() { k = 2 }()"), "cannot reassign to const: k");
}

#[test]
fn if_expressions_produce_values() {
    assert_eq!(eval_value("if (1 < 2) { 10 } else { 20 }"), Value::Integer(10));
    assert_eq!(eval_value("if (1 > 2) { 10 } else { 20 }"), Value::Integer(20));
    assert_eq!(eval_value("if (1 > 2) { 10 }"), Value::Null);
    assert_eq!(eval_value("let x = if (true) { 1 }; x"), Value::Integer(1));
}

#[test]
fn while_loops() {
    assert_eq!(eval_value("let i = 0; let s = 0; while (i < 5) { s = s + i; i = i + 1 }; s"),
               Value::Integer(10));
    // A falsy condition on entry skips the body entirely.
    assert_eq!(eval_value("let i = 0; while (false) { i = 1 }; i"), Value::Integer(0));
    // The loop itself evaluates to null.
    assert_eq!(eval_value("while (false) { 0 }"), Value::Null);
}

#[test]
fn while_loops_propagate_returns() {
    assert_eq!(eval_value("fn() { while (true) { return 1; } }()"), Value::Integer(1));
    assert_eq!(eval_value("let f = fn(n) { while (true) { if (n > 3) { return n; } n = n + 1 } };
                           f(0)"),
               Value::Integer(4));
}

#[test]
fn functions_and_calls() {
    assert_eq!(eval_value("let identity = fn(x) { x }; identity(5)"), Value::Integer(5));
    assert_eq!(eval_value("let double = fn(x) { x * 2 }; double(5)"), Value::Integer(10));
    assert_eq!(eval_value("let add = fn(x, y) { x + y }; add(5, add(5, 5))"),
               Value::Integer(15));
    assert_eq!(eval_value("fn(x) { x; }(5)"), Value::Integer(5));
}

#[test]
fn call_errors() {
    assert_eq!(eval_error("5(1)"), "not a function: INTEGER");
    assert_eq!(eval_error("let f = fn(x) { x }; f(1, 2)"),
               "wrong number of arguments: expected=1, got=2");
    assert_eq!(eval_error("let f = fn(x, y) { x }; f(1)"),
               "wrong number of arguments: expected=2, got=1");
}

#[test]
fn return_statements_unwrap_at_call_boundaries() {
    assert_eq!(eval_value("fn() { return 10; 9 }()"), Value::Integer(10));
    assert_eq!(eval_value("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"),
               Value::Integer(10));
    // A top-level return stops the program.
    assert_eq!(eval_value("return 7; 8"), Value::Integer(7));
}

#[test]
fn closures_capture_their_definition_environment() {
    assert_eq!(eval_value("let newAdder = fn(x) { fn(y) { x + y } };
                           let addTwo = newAdder(2);
                           addTwo(3)"),
               Value::Integer(5));
}

#[test]
fn closures_share_mutable_state() {
    assert_eq!(eval_value("let counter = fn() { let c = 0; fn() { c = c + 1; c } }();
                           counter(); counter(); counter()"),
               Value::Integer(3));
}

#[test]
fn recursion() {
    assert_eq!(eval_value("let fact = fn(n) { if (n < 2) { 1 } else { n * fact(n - 1) } };
                           fact(5)"),
               Value::Integer(120));
    assert_eq!(eval_value("let fib = fn(n) { if (n < 2) { n } else { fib(n - 1) + fib(n - 2) } };
                           fib(10)"),
               Value::Integer(55));
}

#[test]
fn arrays_and_indexing() {
    assert_eq!(eval_value("[1, 2 * 2, 3 + 3]"),
               Value::from(vec![Value::Integer(1), Value::Integer(4), Value::Integer(6)]));
    assert_eq!(eval_value("[1, 2, 3][0]"), Value::Integer(1));
    assert_eq!(eval_value("let a = [1, 2, 3]; a[1] + a[2]"), Value::Integer(5));
    assert_eq!(eval_value("[1, 2, 3][5]"), Value::Null);
    assert_eq!(eval_value("[1, 2, 3][0 - 1]"), Value::Null);
}

#[test]
fn index_errors() {
    assert_eq!(eval_error("5[0]"), "index operator not supported: INTEGER");
    assert_eq!(eval_error("\"abc\"[0]"), "index operator not supported: STRING");
    assert_eq!(eval_error("[1, 2][\"a\"]"), "index operator not supported: ARRAY");
}

#[test]
fn hash_literals_and_lookup() {
    assert_eq!(eval_value("{ \"a\": 1, true: 2, 3: 4 }[true]"), Value::Integer(2));
    assert_eq!(eval_value("{ \"a\": 1, true: 2, 3: 4 }[\"a\"]"), Value::Integer(1));
    assert_eq!(eval_value("{ \"a\": 1, true: 2, 3: 4 }[3]"), Value::Integer(4));
    assert_eq!(eval_value("{}[\"missing\"]"), Value::Null);
    assert_eq!(eval_value("let key = \"k\"; { key: 5 }[\"k\"]"), Value::Integer(5));
    assert_eq!(eval_value("{ 2.5: \"half\" }[2.5]"), Value::from("half"));
}

#[test]
fn hash_keys_are_structural() {
    assert_eq!(eval_value("{ \"a\": 1 }[\"a\" + \"\"]"), Value::Integer(1));
    assert_eq!(eval_value("let h = { 1: \"one\" }; h[2 - 1]"), Value::from("one"));
}

#[test]
fn hash_display_preserves_insertion_order() {
    assert_eq!(eval_value("str({ \"b\": 1, \"a\": 2, 3: 4 })").to_string(), "{b: 1, a: 2, 3: 4}");
    // Overwriting keeps the original position.
    assert_eq!(eval_value("str({ \"a\": 1, \"b\": 2, \"a\": 3 })").to_string(), "{a: 3, b: 2}");
    assert_eq!(eval_value("{ \"a\": 1, \"a\": 3 }[\"a\"]"), Value::Integer(3));
}

#[test]
fn unusable_hash_keys_are_errors() {
    assert_eq!(eval_error("{ [1]: 2 }"), "unusable as hash key: ARRAY");
    assert_eq!(eval_error("{ \"a\": 1 }[[1]]"), "unusable as hash key: ARRAY");
    assert_eq!(eval_error("{ fn(x) { x }: 1 }"), "unusable as hash key: FUNCTION");
}

#[test]
fn len_builtin() {
    assert_eq!(eval_value("len(\"hello\")"), Value::Integer(5));
    assert_eq!(eval_value("len(\"\")"), Value::Integer(0));
    assert_eq!(eval_value("len([1, 2, 3])"), Value::Integer(3));
    assert_eq!(eval_value("len({ \"a\": 1, \"b\": 2 })"), Value::Integer(2));
    assert_eq!(eval_error("len(1)"), "argument to `len` not supported, got INTEGER");
    assert_eq!(eval_error("len(\"a\", \"b\")"),
               "wrong number of arguments: expected=1, got=2");
}

#[test]
fn array_builtins() {
    assert_eq!(eval_value("first([1, 2, 3])"), Value::Integer(1));
    assert_eq!(eval_value("first([])"), Value::Null);
    assert_eq!(eval_value("last([1, 2, 3])"), Value::Integer(3));
    assert_eq!(eval_value("last([])"), Value::Null);
    assert_eq!(eval_value("rest([1, 2, 3])"),
               Value::from(vec![Value::Integer(2), Value::Integer(3)]));
    assert_eq!(eval_value("rest([1])"), Value::from(Vec::new()));
    assert_eq!(eval_value("rest([])"), Value::Null);
    assert_eq!(eval_error("first(1)"), "argument to `first` not supported, got INTEGER");
}

#[test]
fn push_is_persistent() {
    assert_eq!(eval_value("push([1, 2], 3)"),
               Value::from(vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)]));
    assert_eq!(eval_value("let a = [1, 2]; push(a, 3); len(a)"), Value::Integer(2));
    assert_eq!(eval_value("push([], 1)"), Value::from(vec![Value::Integer(1)]));
}

#[test]
fn conversion_builtins() {
    assert_eq!(eval_value("type(1)"), Value::from("INTEGER"));
    assert_eq!(eval_value("type(1.5)"), Value::from("FLOAT"));
    assert_eq!(eval_value("type(\"s\")"), Value::from("STRING"));
    assert_eq!(eval_value("type([])"), Value::from("ARRAY"));
    assert_eq!(eval_value("type(len)"), Value::from("BUILTIN"));
    assert_eq!(eval_value("int(\"42\")"), Value::Integer(42));
    assert_eq!(eval_value("int(\"-7\")"), Value::Integer(-7));
    assert_eq!(eval_value("int(3.9)"), Value::Integer(3));
    assert_eq!(eval_value("int(5)"), Value::Integer(5));
    assert_eq!(eval_error("int(\"abc\")"), "cannot convert abc to INTEGER");
    assert_eq!(eval_error("int(true)"), "argument to `int` not supported, got BOOLEAN");
    assert_eq!(eval_value("str(42)"), Value::from("42"));
    assert_eq!(eval_value("str(2.0)"), Value::from("2.0"));
    assert_eq!(eval_value("str([1, \"two\"])"), Value::from("[1, two]"));
    assert_eq!(eval_value("abs(0 - 3)"), Value::Integer(3));
    assert_eq!(eval_value("abs(-2.5)"), Value::Float(2.5));
}

#[test]
fn aggregate_builtins() {
    assert_eq!(eval_value("sumarr([1, 2, 3])"), Value::Integer(6));
    assert_eq!(eval_value("sumarr([])"), Value::Integer(0));
    assert_eq!(eval_value("sumarr([1, 2.5])"), Value::Float(3.5));
    assert_eq!(eval_error("sumarr([1, \"x\"])"),
               "argument to `sumarr` not supported, got STRING");
    assert_eq!(eval_value("zip([1, 2, 3], [4, 5])"),
               Value::from(vec![Value::from(vec![Value::Integer(1), Value::Integer(4)]),
                                Value::from(vec![Value::Integer(2), Value::Integer(5)])]));
    assert_eq!(eval_value("zip([], [1])"), Value::from(Vec::new()));
}

#[test]
fn every_builtin_resolves_as_an_identifier() {
    use simian::interpreter::evaluator::builtins::BUILTIN_NAMES;

    for name in BUILTIN_NAMES {
        let value = eval_value(name);
        assert_eq!(value.type_name(), "BUILTIN", "for builtin {name}");
        assert_eq!(value.to_string(), format!("builtin function {name}"));
    }
}

#[test]
fn builtins_are_first_class() {
    assert_eq!(eval_value("let f = len; f(\"abc\")"), Value::Integer(3));
    assert_eq!(eval_value("let apply = fn(f, x) { f(x) }; apply(len, \"abcd\")"),
               Value::Integer(4));
    // A binding shadows the builtin of the same name.
    assert_eq!(eval_value("let len = 5; len"), Value::Integer(5));
}

#[test]
fn function_display_reconstructs_source() {
    assert_eq!(eval_value("fn(x, y) { x + y }").to_string(), "fn(x, y) { (x + y) }");
    assert_eq!(eval_value("fn() { 1 }").to_string(), "fn() { 1 }");
}

#[test]
fn pure_programs_are_deterministic() {
    let source = "let apply_twice = fn(f, x) { f(f(x)) };
                  let inc = fn(n) { n + 1 };
                  apply_twice(inc, { \"start\": 40 }[\"start\"])";

    let first = eval_value(source);
    let second = eval_value(source);

    assert_eq!(first, Value::Integer(42));
    assert_eq!(first, second);
}

#[test]
fn errors_short_circuit_containers_and_calls() {
    assert_eq!(eval_error("[1, 2 / 0, 3]"), "division by zero");
    assert_eq!(eval_error("{ \"a\": 1 / 0 }"), "division by zero");
    assert_eq!(eval_error("len(1 / 0)"), "division by zero");
    assert_eq!(eval_error("let f = fn(x) { x }; f(missing)"), "identifier not found: missing");
}

#[test]
fn line_comments_are_ignored() {
    assert_eq!(eval_value("1 + 2 // adds the numbers"), Value::Integer(3));
    assert_eq!(eval_value("// nothing but a comment\n5"), Value::Integer(5));
}
