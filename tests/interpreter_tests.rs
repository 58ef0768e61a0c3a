// Integration tests for the Wisp interpreter
//
// These tests run complete Wisp programs and check the resulting value
// and environment. Covered here:
// - Binding semantics (var/mut/assignment, overwrite on re-declare)
// - Control flow (if/else, for, while)
// - Function calls: fresh single-frame environments, arity checking,
//   restoration of the caller's environment
// - Early return semantics: `return` exits the enclosing function and
//   statements after it do not run
// - The runtime error taxonomy

use wisp::errors::RuntimeError;
use wisp::interpreter::{Interpreter, Value};
use wisp::lexer::tokenize;
use wisp::parser::Parser;

fn parse(code: &str) -> wisp::ast::Program {
    Parser::new(tokenize(code)).parse().expect("program should parse")
}

fn run(code: &str) -> (Interpreter, Value) {
    let program = parse(code);
    let mut interp = Interpreter::new();
    let value = interp.evaluate(&program).expect("program should evaluate");
    (interp, value)
}

fn run_err(code: &str) -> (Interpreter, RuntimeError) {
    let program = parse(code);
    let mut interp = Interpreter::new();
    let err = interp.evaluate(&program).expect_err("program should fail");
    (interp, err)
}

fn number(code: &str) -> f64 {
    match run(code).1 {
        Value::Number(n) => n,
        other => panic!("expected a number result, got {:?}", other),
    }
}

#[test]
fn test_var_declaration_binds_expression_result() {
    let (interp, value) = run("var x = 1 + 2;");
    assert_eq!(value, Value::Number(3.0));
    assert_eq!(interp.env.get("x"), Some(Value::Number(3.0)));
}

#[test]
fn test_redeclaring_a_variable_overwrites_the_single_binding() {
    let (interp, _) = run("var x = 1; var x = 2;");
    assert_eq!(interp.env.get("x"), Some(Value::Number(2.0)));
    assert_eq!(interp.env.len(), 1);
}

#[test]
fn test_mut_and_assignment_share_var_binding_semantics() {
    let (interp, _) = run("mut c = 0; c = c + 5; var c = c * 2;");
    assert_eq!(interp.env.get("c"), Some(Value::Number(10.0)));
}

#[test]
fn test_division_yields_quotient() {
    assert_eq!(number("10 / 2;"), 5.0);
}

#[test]
fn test_division_by_zero_fails() {
    let (_, err) = run_err("10 / 0;");
    assert_eq!(err, RuntimeError::DivisionByZero);
}

#[test]
fn test_modulo_by_zero_fails_like_division() {
    let (_, err) = run_err("10 % 0;");
    assert_eq!(err, RuntimeError::DivisionByZero);
}

#[test]
fn test_arithmetic_precedence_is_respected_at_runtime() {
    assert_eq!(number("2 + 3 * 4;"), 14.0);
    assert_eq!(number("(2 + 3) * 4;"), 20.0);
    assert_eq!(number("7 % 4 + 1;"), 4.0);
}

#[test]
fn test_unary_negation_and_not() {
    assert_eq!(number("-5 + 3;"), -2.0);
    assert_eq!(run("not 0;").1, Value::Bool(true));
    assert_eq!(run("not \"text\";").1, Value::Bool(false));
}

#[test]
fn test_string_concatenation_and_comparison() {
    assert_eq!(run("\"foo\" + \"bar\";").1, Value::Str("foobar".to_string().into()));
    assert_eq!(run("\"abc\" < \"abd\";").1, Value::Bool(true));
}

#[test]
fn test_mixed_operand_types_are_rejected() {
    let (_, err) = run_err("1 + \"a\";");
    assert_eq!(
        err,
        RuntimeError::InvalidOperands { operator: "+".into(), left: "number", right: "string" }
    );
}

#[test]
fn test_equality_across_types_is_false_not_an_error() {
    assert_eq!(run("1 == \"1\";").1, Value::Bool(false));
    assert_eq!(run("1 != \"1\";").1, Value::Bool(true));
}

#[test]
fn test_if_takes_then_branch_on_truthy_condition() {
    let (interp, _) = run("var r = 0; if 1 < 2 { r = 1; } else { r = 2; }");
    assert_eq!(interp.env.get("r"), Some(Value::Number(1.0)));
}

#[test]
fn test_if_takes_else_branch_on_falsy_condition() {
    let (interp, _) = run("var r = 0; if 0 { r = 1; } else { r = 2; }");
    assert_eq!(interp.env.get("r"), Some(Value::Number(2.0)));
}

#[test]
fn test_if_without_else_yields_null_when_falsy() {
    assert_eq!(run("if false { 1; }").1, Value::Null);
}

#[test]
fn test_logical_operators_do_not_short_circuit() {
    // The right operand is an undefined variable; if `and` short-
    // circuited on the falsy left operand this would succeed.
    let (_, err) = run_err("var t = false and oops;");
    assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "oops"));

    let (_, err) = run_err("var t = true or oops;");
    assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "oops"));
}

#[test]
fn test_logical_operators_combine_truthiness() {
    assert_eq!(run("1 and \"x\";").1, Value::Bool(true));
    assert_eq!(run("0 or \"\";").1, Value::Bool(false));
}

#[test]
fn test_for_loop_binds_each_element_in_order_and_leaks_the_last() {
    let (interp, _) = run("var seen = 0; for i in [0, 1, 2] { seen = seen * 10 + i; }");
    assert_eq!(interp.env.get("seen"), Some(Value::Number(12.0)));
    // The loop variable persists after the loop ends, still bound to
    // the final element.
    assert_eq!(interp.env.get("i"), Some(Value::Number(2.0)));
}

#[test]
fn test_for_loop_over_empty_list_yields_null() {
    let (interp, value) = run("for i in [] { 1; }");
    assert_eq!(value, Value::Null);
    assert_eq!(interp.env.get("i"), None);
}

#[test]
fn test_for_loop_over_range() {
    let (interp, _) = run("var sum = 0; for i in 2..5 { sum = sum + i; }");
    assert_eq!(interp.env.get("sum"), Some(Value::Number(9.0)));
}

#[test]
fn test_range_is_end_exclusive_and_empty_when_reversed() {
    let (_, value) = run("1..4;");
    assert_eq!(
        value,
        Value::List(vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)].into())
    );
    assert_eq!(run("4..1;").1, Value::List(Vec::new().into()));
}

#[test]
fn test_for_loop_over_non_sequence_fails() {
    let (_, err) = run_err("for i in 42 { i; }");
    assert_eq!(err, RuntimeError::NotIterable { type_name: "number" });
}

#[test]
fn test_while_loop_runs_until_condition_is_falsy() {
    let (interp, _) = run("mut n = 3; mut acc = 1; while n > 0 { acc = acc * n; n = n - 1; }");
    assert_eq!(interp.env.get("acc"), Some(Value::Number(6.0)));
}

#[test]
fn test_while_loop_with_initially_false_condition_yields_null() {
    assert_eq!(run("while false { 1; }").1, Value::Null);
}

#[test]
fn test_function_declaration_binds_itself_without_running_the_body() {
    let (interp, _) = run("func f(a, b) { oops; }");
    assert!(matches!(interp.env.get("f"), Some(Value::Function(_))));
}

#[test]
fn test_function_call_returns_body_result() {
    assert_eq!(number("func add(a, b) { return a + b; } add(2, 3);"), 5.0);
}

#[test]
fn test_function_without_return_yields_last_statement_value() {
    assert_eq!(number("func double(n) { n * 2; } double(4);"), 8.0);
}

#[test]
fn test_return_exits_the_function_early() {
    // Statements after a return must not run and must not replace the
    // returned value.
    assert_eq!(number("func f() { return 1; 2; } f();"), 1.0);
}

#[test]
fn test_return_unwinds_out_of_loops_inside_a_function() {
    let code = "func first_even(xs) { for x in xs { if x % 2 == 0 { return x; } } return -1; } \
                first_even([3, 5, 8, 9]);";
    assert_eq!(number(code), 8.0);
}

#[test]
fn test_top_level_return_ends_the_program() {
    assert_eq!(number("return 7; 99;"), 7.0);
}

#[test]
fn test_arity_mismatch_is_reported_exactly() {
    let (_, err) = run_err("func zero() { return 1; } zero(1);");
    assert_eq!(
        err,
        RuntimeError::ArityMismatch { function: "zero".into(), expected: 0, actual: 1 }
    );
}

#[test]
fn test_calling_a_non_function_fails() {
    let (_, err) = run_err("var x = 3; x();");
    assert_eq!(err, RuntimeError::InvalidCallTarget { name: "x".into() });
}

#[test]
fn test_calling_an_unbound_name_is_an_undefined_variable() {
    let (_, err) = run_err("ghost();");
    assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "ghost"));
}

#[test]
fn test_callee_cannot_see_caller_bindings() {
    // The call swaps in a brand-new environment holding only the
    // parameters, so there are no closures and no caller visibility.
    let (_, err) = run_err("var secret = 1; func peek() { return secret; } peek();");
    assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "secret"));
}

#[test]
fn test_function_names_are_not_visible_inside_call_bodies() {
    // Single-frame scoping also means a function cannot call itself:
    // its own name lives in the caller's environment.
    let (_, err) = run_err("func f(n) { return f(n - 1); } f(3);");
    assert!(matches!(err, RuntimeError::UndefinedVariable { ref name, .. } if name == "f"));
}

#[test]
fn test_caller_environment_is_restored_after_a_call() {
    let (interp, value) = run("var x = 1; func f(x) { return x + 10; } f(100); x;");
    assert_eq!(value, Value::Number(1.0));
    assert_eq!(interp.env.get("x"), Some(Value::Number(1.0)));
}

#[test]
fn test_caller_environment_is_restored_when_a_call_fails() {
    let (interp, err) = run_err("var x = 1; func f() { missing; } f();");
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
    assert_eq!(interp.env.get("x"), Some(Value::Number(1.0)));
    assert!(matches!(interp.env.get("f"), Some(Value::Function(_))));
}

#[test]
fn test_arguments_are_evaluated_in_the_callers_environment() {
    assert_eq!(
        number("var base = 40; func id(n) { return n; } id(base + 2);"),
        42.0
    );
}

#[test]
fn test_undefined_variable_reports_a_near_miss_suggestion() {
    let (_, err) = run_err("var counter = 1; countr;");
    assert_eq!(
        err,
        RuntimeError::UndefinedVariable {
            name: "countr".into(),
            suggestion: Some("counter".into()),
        }
    );
}

#[test]
fn test_undefined_variable_without_a_close_binding_has_no_suggestion() {
    let (_, err) = run_err("var alpha = 1; zzzzzzzz;");
    assert_eq!(
        err,
        RuntimeError::UndefinedVariable { name: "zzzzzzzz".into(), suggestion: None }
    );
}

#[test]
fn test_list_concatenation() {
    assert_eq!(
        run("[1] + [2, 3];").1,
        Value::List(
            vec![Value::Number(1.0), Value::Number(2.0), Value::Number(3.0)].into()
        )
    );
}

#[test]
fn test_environment_persists_across_evaluate_calls() {
    let mut interp = Interpreter::new();
    interp.evaluate(&parse("var x = 1;")).unwrap();
    let value = interp.evaluate(&parse("x + 1;")).unwrap();
    assert_eq!(value, Value::Number(2.0));
}

#[test]
fn test_empty_program_yields_null() {
    assert_eq!(run("").1, Value::Null);
}

#[test]
fn test_program_result_is_the_last_statement_value() {
    assert_eq!(number("1; 2; 3;"), 3.0);
}

#[test]
fn test_functions_are_first_class_and_can_be_rebound() {
    let (interp, _) = run("func f() { return 1; } var f = 2;");
    assert_eq!(interp.env.get("f"), Some(Value::Number(2.0)));
}
