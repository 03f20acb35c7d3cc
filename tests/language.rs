use std::fs;

use gust::{
    compile,
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        dispatch::core::{OverloadTable, Slot, scalar},
        value::{core::Value, tag::TypeTag},
    },
    run,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// Compiles and runs `src`, returning the result and everything written to
/// the output sink.
fn run_capturing(src: &str, args: &[Value]) -> (Vec<Value>, String) {
    let program = compile(src).unwrap_or_else(|e| panic!("Script failed to compile: {e}\n{src}"));
    let mut output = Vec::new();
    let result = program.call_with_output(args, &mut output)
                        .unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"));
    (result, String::from_utf8(output).expect("output is not UTF-8"))
}

fn display(values: &[Value]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn eval(src: &str) -> String {
    display(&run_capturing(src, &[]).0)
}

fn eval_with(src: &str, args: &[Value]) -> String {
    display(&run_capturing(src, args).0)
}

fn failure(src: &str) -> Error {
    let program = match compile(src) {
        Ok(program) => program,
        Err(e) => return Error::Parse(e),
    };
    let mut output = Vec::new();
    match program.call_with_output(&[], &mut output) {
        Ok(result) => panic!("Script succeeded with '{}' but was expected to fail", display(&result)),
        Err(e) => Error::Runtime(e),
    }
}

#[test]
fn script_fixtures_produce_expected_results() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "gust"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = content.lines()
                              .next()
                              .and_then(|line| line.strip_prefix("# expect:"))
                              .map(str::trim)
                              .unwrap_or_else(|| panic!("{path:?} has no '# expect:' line"));

        count += 1;
        assert_eq!(eval(&content), expected, "script {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(eval("1 + 2"), "3");
    assert_eq!(eval("1 + 2 * 3"), "7");
    assert_eq!(eval("(1 + 2) * 3"), "9");
    assert_eq!(eval("7 % 4"), "3");
    assert_eq!(eval("2 ↑ 3 ↑ 2"), "64");
    assert_eq!(eval("1 e 3"), "1000");
    assert_eq!(eval("1 + 2 = 3"), "true");
    assert_eq!(eval("2 < 3 = true"), "true");
}

#[test]
fn signs_split_after_operands() {
    assert_eq!(eval("5 -1"), "4");
    assert_eq!(eval("5 * -1"), "-5");
    assert_eq!(eval("-3 + 1"), "-2");
    assert_eq!(eval("null - 5"), "-5");
}

#[test]
fn null_is_an_identity() {
    assert_eq!(eval("null + 5"), "5");
    assert_eq!(eval("'x' + null"), "x");
    assert_eq!(eval("null * 4"), "0");
}

#[test]
fn operand_form_folds() {
    assert_eq!(eval("+(1, 2, 3)"), "6");
    assert_eq!(eval("-(10, 1, 2)"), "7");
    assert_eq!(eval("+(5)"), "5");
    assert_eq!(eval("+()"), "");
    assert_eq!(eval("(1, 2) | *(5)"), "10");
}

#[test]
fn value_vectors_broadcast() {
    assert_eq!(eval("(1, 2, 3) + 10"), "11 12 13");
    assert_eq!(eval("(1, 2) * (3, 4)"), "3 8");
    assert_eq!(eval("() + 1"), "");
}

#[test]
fn array_literals_splice_their_items() {
    assert_eq!(eval("[~(3)]"), "[0, 1, 2]");
    assert_eq!(eval("[(1, 2), 3]"), "[1, 2, 3]");
    assert_eq!(eval("[[1, 2], 3]"), "[[1, 2], 3]");
    assert_eq!(eval("[(), 1]"), "[1]");
}

#[test]
fn arrays_broadcast_cyclically() {
    assert_eq!(eval("[1, 2, 3] + [4, 8]"), "[5, 10, 7]");
    assert_eq!(eval("[1, [2, 3]] * 2"), "[2, [4, 6]]");
    assert_eq!(eval("[] + [1, 2]"), "[]");
}

#[test]
fn string_arithmetic() {
    assert_eq!(eval("'x' + 1"), "x1");
    assert_eq!(eval("1 + 'x'"), "1x");
    assert_eq!(eval("'ab' * 3"), "ababab");
    assert_eq!(eval("'hello' - 'l'"), "heo");
    assert_eq!(eval("'hello' - 2"), "hel");
    assert_eq!(eval("2 - 'hello'"), "llo");
    assert_eq!(eval("'hello world' / ' '"), "[hello, world]");
    assert_eq!(eval("'abcdefg' / 3"), "[abc, de, fg]");
    assert_eq!(eval("'abcdefg' % 3"), "[abc, def, g]");
    assert_eq!(eval("'banana' % 'an'"), "[1, 3]");
}

#[test]
fn pattern_operations() {
    assert_eq!(eval("'a1b22c' % {[0-9]+}"), "[1, 22]");
    assert_eq!(eval("'a1b22c' / {[0-9]+}"), "[a, b, c]");
    assert_eq!(eval("'a1b22c' - {[0-9]}"), "abc");
    assert_eq!(eval("'ABC' ≈ {[a-c]+}i"), "true");
    assert_eq!(eval("'abcd' ≈ {[a-c]+}"), "false");
}

#[test]
fn extended_patterns_allow_trailing_comments() {
    assert_eq!(eval("'ab' ≈ {ab # letters}x"), "true");
    assert_eq!(eval("'ab cd' % ({ab # letters}x + {cd})"), "[ab, cd]");
}

#[test]
fn string_literals_and_comments() {
    assert_eq!(eval(r"'a\tb'"), "a\tb");
    assert_eq!(eval(r#""it's""#), "it's");
    assert_eq!(eval("`x"), "x");
    assert_eq!(eval("1 + 2 # a comment"), "3");
    assert_eq!(eval("#[ a block\ncomment ]# 4"), "4");
    assert_eq!(eval("#[ a ]]# 4"), "4");
    assert_eq!(eval("#[ [x] ]# 4"), "4");
}

#[test]
fn comparisons_chain() {
    assert_eq!(eval("(1, 2, 3) | <"), "true");
    assert_eq!(eval("(1, 3, 2) | <"), "false");
    assert_eq!(eval("<(5)"), "5");
    assert_eq!(eval("'abc' < 'abd'"), "true");
    assert_eq!(eval("3 ≥ 3"), "true");
}

#[test]
fn equality_and_loose_equality() {
    assert_eq!(eval("0.1 + 0.2 = 0.3"), "false");
    assert_eq!(eval("0.1 + 0.2 ≈ 0.3"), "true");
    assert_eq!(eval("'listen' ≈ 'silent'"), "true");
    assert_eq!(eval("[1, 2] = [1, 2]"), "true");
    assert_eq!(eval("0 = null"), "false");
    assert_eq!(eval("null ≈ 0"), "true");
    assert_eq!(eval("1 ≉ 2"), "true");
}

#[test]
fn logic_returns_operands() {
    assert_eq!(eval("0 ∨ 'x'"), "x");
    assert_eq!(eval("1 ∧ 0"), "0");
    assert_eq!(eval("1 ⊻ 0"), "1");
    assert_eq!(eval("1 ⊻ 1"), "false");
}

#[test]
fn bitwise_and_shifts() {
    assert_eq!(eval("6 & 3"), "2");
    assert_eq!(eval("6 ‖ 3"), "7");
    assert_eq!(eval("6 ^ 3"), "5");
    assert_eq!(eval("1 « 4"), "16");
    assert_eq!(eval("16 » 2"), "4");
    assert_eq!(eval("'bcd' « 1"), "abc");
    assert_eq!(eval("'abc' » 1"), "bcd");
}

#[test]
fn set_operations() {
    assert_eq!(eval("[1, 2, 2, 3] ∪ [3, 4]"), "[1, 2, 3, 4]");
    assert_eq!(eval("[1, 2, 3] ∩ [2, 3, 4]"), "[2, 3]");
    assert_eq!(eval("[1, 2, 3] ∖ [2]"), "[1, 3]");
}

#[test]
fn sequence_builtins() {
    assert_eq!(eval("~(5)"), "0 1 2 3 4");
    assert_eq!(eval("~(2, 10, 3)"), "2 5 8");
    assert_eq!(eval("~(5, 0)"), "5 4 3 2 1");
    assert_eq!(eval("(1, 2, 3, 4) | ‹"), "2 3 4");
    assert_eq!(eval("(1, 2, 3, 4) | ‹(2)"), "3 4");
    assert_eq!(eval("(1, 2, 3, 4) | ›(3)"), "1");
    assert_eq!(eval("('ab', [1, 2, 3], 5) | ℓ"), "2 3 1");
}

#[test]
fn constants() {
    assert_eq!(eval("ε | ℓ"), "0");
    assert_eq!(eval("∅"), "[]");
    assert_eq!(eval("(true, false, null)"), "true false null");
}

#[test]
fn program_input() {
    let args = [Value::Number(7.0), Value::Number(8.0)];

    assert_eq!(eval_with("$", &args), "7 8");
    assert_eq!(eval_with("$(1)", &args), "8");
    assert_eq!(eval_with("$(5)", &args), "null");
    assert_eq!(eval_with("_ + 1", &args), "8 9");
}

#[test]
fn pipes_pass_flatten_and_expand() {
    assert_eq!(eval("([1, 2], 3) | _"), "[1, 2] 3");
    assert_eq!(eval("([1, 2], 3, [4]) ≻ _"), "1 2 3 4");
    assert_eq!(eval("[1, 2, 3] ≺ (_ * _)"), "[1, 4, 9]");
    assert_eq!(eval("(1, 2, 3) ≺ (_ + 1)"), "2 3 4");
    assert_eq!(eval("[[1, 2], [3, 4]] ≺ +"), "[3, 7]");
}

#[test]
fn loop_indices_follow_expansion() {
    assert_eq!(eval("[~(3)] ≺ (i * 10)"), "[0, 10, 20]");
    assert_eq!(eval("r ≔ [~(2)]; r ≺ (r ≺ (i(1), i))"), "[[[0, 0], [0, 1]], [[1, 0], [1, 1]]]");
    assert_eq!(eval("[10, 20, 30] ≺ (i)"), "[0, 1, 2]");
    assert_eq!(eval("r ≔ [~(2)]; r ≺ ((r ≺ i), i)"), "[[[0, 1], 0], [[0, 1], 1]]");
    assert_eq!(eval("i"), "null");
}

#[test]
fn loop_repeats_while_condition_holds() {
    assert_eq!(eval("1 | (_ < 100) ⮔ (_ * 2)"), "128");
    assert_eq!(eval("5 | (_ < 0) ⮔ (_ + 1)"), "5");
}

#[test]
fn portals_queue_values() {
    assert_eq!(eval("(1, 2) ⇥ q; 3 ⇥ q; ⟼ q"), "1 2 3");
    assert_eq!(eval("1 ⇥ q; ↦ q; ↦ q"), "1");
    assert_eq!(eval("1 ⇥ q; ⟼ q; ⟼ q"), "");
    assert_eq!(eval("⟼ never"), "");
    assert_eq!(eval("(4, 5) ⇥ q | _ * 2"), "8 10");
}

#[test]
fn dynamic_portal_keys() {
    assert_eq!(eval("[1, 2, 3, 4] ≺ (_ ⇥ (_ % 2)); (⟼ 1 | [_], ⟼ 0 | [_])"), "[1, 3] [2, 4]");
    assert_eq!(eval("'x' ⇥ ('a', 1); ⟼ ('a', 1)"), "x");
}

#[test]
fn portals_are_per_execution() {
    let program = compile("$ ⇥ seen; ↦ seen").expect("compiles");
    let mut output = Vec::new();

    let first = program.call_with_output(&[Value::Number(1.0)], &mut output).expect("runs");
    let second = program.call_with_output(&[Value::Number(2.0)], &mut output).expect("runs");

    assert_eq!(first, vec![Value::Number(1.0)]);
    assert_eq!(second, vec![Value::Number(2.0)]);
}

#[test]
fn conditionals() {
    assert_eq!(eval("1 ? 'yes' : 'no'"), "yes");
    assert_eq!(eval("0 ? 'yes' : 'no'"), "no");
    assert_eq!(eval("0 ? 'yes'"), "null");
    assert_eq!(eval("[] ? 'then' : 'else'"), "then");
    assert_eq!(eval("() ? 'then' : 'else'"), "else");

    for falsy in ["0", "''", "false", "null"] {
        assert_eq!(eval(&format!("{falsy} ? 'then' : 'else'")), "else", "{falsy}");
    }
    for truthy in ["[]", "'0'", "1", "{a}"] {
        assert_eq!(eval(&format!("{truthy} ? 'then' : 'else'")), "then", "{truthy}");
    }
}

#[test]
fn assignment_binds_vectors() {
    assert_eq!(eval("x ≔ 4; x * x"), "16");
    assert_eq!(eval("x = 4; x + 1"), "5");
    assert_eq!(eval("xs ≔ (1, 2, 3); xs | +"), "6");
    assert_eq!(eval("x ≔ 2; x ≔ x + 1; x"), "3");
}

#[test]
fn statements_share_the_input() {
    let args = [Value::Number(3.0)];
    assert_eq!(eval_with("_ + 1; _ * 10", &args), "30");
    assert_eq!(eval_with("", &args), "");
}

#[test]
fn definitions_and_recursion() {
    assert_eq!(eval("double ⇒ _ * 2; 21 | double"), "42");
    assert_eq!(eval("double ⇒ _ * 2; double(4)"), "8");
    assert_eq!(eval("double ⇒ _ * 2; (1, 2, 3) ≺ double"), "2 4 6");
    assert_eq!(eval("fact ⇒ _ > 1 ? _ * fact(_ - 1) : 1; fact(5)"), "120");
}

#[test]
fn user_functions_as_infix_operators() {
    assert_eq!(eval("plus ⇒ _ | +; 3 plus 4"), "7");
    assert_eq!(eval("plus ⇒ _ | +; 2 * 3 plus 4"), "14");
}

#[test]
fn lambdas_are_values() {
    assert_eq!(eval("λ 1"), "λ");
    assert_eq!(eval("f ≔ λ _ + 1; f(2)"), "3");
    assert_eq!(eval("f ≔ λ _ * 3; (1, 2) | f"), "3 6");
}

#[test]
fn output_builtins_write_to_the_sink() {
    let (result, output) = run_capturing("'hello' | …", &[]);
    assert!(result.is_empty());
    assert_eq!(output, "hello\n");

    let (_, output) = run_capturing("(1, 'a', [2, 3]) | …", &[]);
    assert_eq!(output, "1 a [2, 3]\n");

    let (_, output) = run_capturing("('a', 'b') | .; 'c' | .", &[]);
    assert_eq!(output, "abc");
}

#[test]
fn programs_can_be_called_repeatedly() {
    let program = compile("_ * 2").expect("compiles");
    let mut output = Vec::new();

    for n in [1.0, 2.5, -4.0] {
        let result = program.call_with_output(&[Value::Number(n)], &mut output).expect("runs");
        assert_eq!(result, vec![Value::Number(n * 2.0)]);
    }
}

#[test]
fn run_reports_both_phases() {
    assert_eq!(run("1 + 2", &[]).expect("runs"), vec![Value::Number(3.0)]);
    assert!(matches!(run("(1", &[]), Err(Error::Parse(_))));
    assert!(matches!(run("missing", &[]), Err(Error::Runtime(_))));
}

#[test]
fn wildcard_entries_are_tried_after_exact_ones() {
    let number = Slot::Tag(TypeTag::Number);
    let string = Slot::Tag(TypeTag::String);
    let table = OverloadTable::new("pick").entry(&[number], &[number], &scalar(|_, _| Ok(Value::from("exact"))))
                                          .entry(&[number], &[number, string], &scalar(|_, _| Ok(Value::from("union"))))
                                          .entry(&[Slot::Any], &[string], &scalar(|_, _| Ok(Value::from("right"))))
                                          .entry(&[Slot::Any], &[Slot::Any], &scalar(|_, _| Ok(Value::from("any"))));

    let pick = |a: &Value, b: &Value| table.apply(a, b).expect("dispatches").to_string();

    assert_eq!(pick(&Value::Number(1.0), &Value::Number(2.0)), "exact");
    assert_eq!(pick(&Value::Number(1.0), &Value::from("s")), "union");
    assert_eq!(pick(&Value::Null, &Value::from("s")), "right");
    assert_eq!(pick(&Value::Boolean(true), &Value::Null), "any");
    assert_eq!(pick(&Value::from(vec![Value::Number(1.0), Value::Null]), &Value::Number(2.0)),
               "[exact, any]");
}

#[test]
fn unrecognized_input_is_error() {
    assert!(matches!(failure("'abc"), Error::Parse(ParseError::UnrecognizedInput { .. })));
}

#[test]
fn unterminated_list_is_error() {
    assert!(matches!(failure("(1, 2"), Error::Parse(ParseError::UnexpectedEndOfInput { .. })));
}

#[test]
fn trailing_tokens_are_error() {
    assert!(matches!(failure("1 2"), Error::Parse(ParseError::TrailingInput { .. })));
}

#[test]
fn malformed_patterns_are_errors() {
    assert!(matches!(failure("{(}"), Error::Parse(ParseError::InvalidPattern { .. })));
    assert!(matches!(failure("{a}q"), Error::Parse(ParseError::UnknownPatternFlag { flag: 'q', .. })));
}

#[test]
fn unresolved_names_report_their_line() {
    let error = failure("1;\n\nmissing");
    assert!(matches!(&error, Error::Runtime(RuntimeError::UnresolvedName { line: 3, .. })));
    assert_eq!(error.to_string(), "Error on line 3: 'missing' is neither a variable nor a builtin.");
}

#[test]
fn missing_overloads_are_errors() {
    assert!(matches!(failure("1 < 'a'"),
                     Error::Runtime(RuntimeError::Dispatch { left: TypeTag::Number,
                                                             right: TypeTag::String,
                                                             .. })));
    assert!(matches!(failure("2 ↑ 'x'"), Error::Runtime(RuntimeError::Dispatch { .. })));
}

#[test]
fn mismatched_vectors_are_errors() {
    assert!(matches!(failure("(1, 2) + (1, 2, 3)"),
                     Error::Runtime(RuntimeError::BroadcastLength { left: 2, right: 3, .. })));
}

#[test]
fn invalid_builtin_arguments_are_errors() {
    assert!(matches!(failure("~(0, 5, 0)"), Error::Runtime(RuntimeError::InvalidArgument { builtin: "~", .. })));
    assert!(matches!(failure("'abc' * -1"), Error::Runtime(RuntimeError::InvalidArgument { .. })));
    assert!(matches!(failure("(1, 2) | ‹('x')"), Error::Runtime(RuntimeError::InvalidArgument { .. })));
}

#[test]
fn oversized_outputs_are_errors() {
    assert!(matches!(failure("'ab' * 1e15"), Error::Runtime(RuntimeError::InvalidArgument { builtin: "*", .. })));
    assert!(matches!(failure("1e15 * 'ab'"), Error::Runtime(RuntimeError::InvalidArgument { builtin: "*", .. })));
    assert!(matches!(failure("'ab' / 1e12"), Error::Runtime(RuntimeError::InvalidArgument { builtin: "/", .. })));
    assert!(matches!(failure("~(1e15)"), Error::Runtime(RuntimeError::InvalidArgument { builtin: "~", .. })));
}
