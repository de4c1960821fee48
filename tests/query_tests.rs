// tests/query_tests.rs

use pnq_lang::{Context, EvalError, Op, Query, Value};
use serde_json::json;

fn eval(source: &str) -> Result<Value, EvalError> {
    Query::new(source, serde_json::Value::Null)
        .unwrap()
        .exec()
}

fn eval_on(source: &str, target: serde_json::Value) -> Result<Value, EvalError> {
    Query::new(source, target).unwrap().exec()
}

// ============================================================================
// Equality and Ordering
// ============================================================================

#[test]
fn test_equal() {
    assert_eq!(eval("(== 1 1)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(== 1 2)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(== `a` `a`)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(== `a` `b`)").unwrap(), Value::Boolean(false));
}

#[test]
fn test_equal_chains_over_adjacent_pairs() {
    assert_eq!(eval("(== 1 1 1 1)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(== 1 1 2)").unwrap(), Value::Boolean(false));
}

#[test]
fn test_equal_across_types_is_false_not_an_error() {
    assert_eq!(eval("(== 1 `1`)").unwrap(), Value::Boolean(false));
}

#[test]
fn test_not_equal_checks_adjacent_pairs_only() {
    assert_eq!(eval("(<> 1 2)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(<> 1 1)").unwrap(), Value::Boolean(false));
    // 1 <> 2 and 2 <> 1; the outer pair is never compared.
    assert_eq!(eval("(<> 1 2 1)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(<> 1 1 2)").unwrap(), Value::Boolean(false));
}

#[test]
fn test_orderings() {
    assert_eq!(eval("(< 1 2 3)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(< 1 3 2)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(> 3 2 1)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(<= 1 1 2)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(>= 3 3 1)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(>= 3 4)").unwrap(), Value::Boolean(false));
}

#[test]
fn test_strings_order_lexicographically() {
    assert_eq!(eval("(< `apple` `banana`)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(> `apple` `banana`)").unwrap(), Value::Boolean(false));
}

#[test]
fn test_ordering_across_types_is_an_error() {
    assert!(matches!(
        eval("(< 1 `a`)").unwrap_err(),
        EvalError::TypeError(_)
    ));
}

#[test]
fn test_comparisons_need_two_operands() {
    assert_eq!(
        eval("(== 1)").unwrap_err(),
        EvalError::Arity {
            op: "==".to_string(),
            needs: 2,
            got: 1,
        }
    );
    assert_eq!(
        eval("(<)").unwrap_err(),
        EvalError::Arity {
            op: "<".to_string(),
            needs: 2,
            got: 0,
        }
    );
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_addition_folds_left() {
    assert_eq!(eval("(+ 1 2)").unwrap(), Value::Integer(3));
    assert_eq!(eval("(+ 1 2 3)").unwrap(), Value::Integer(6));
    assert_eq!(eval("(+ 1 2 3 4)").unwrap(), Value::Integer(10));
}

#[test]
fn test_subtraction_folds_left() {
    assert_eq!(eval("(- 10 3 2)").unwrap(), Value::Integer(5));
    assert_eq!(eval("(- 1 2)").unwrap(), Value::Integer(-1));
}

#[test]
fn test_multiplication_folds_left() {
    assert_eq!(eval("(* 2 3 4)").unwrap(), Value::Integer(24));
}

#[test]
fn test_division_truncates_toward_zero() {
    assert_eq!(eval("(/ 100 5 2)").unwrap(), Value::Integer(10));
    assert_eq!(eval("(/ 7 2)").unwrap(), Value::Integer(3));
    assert_eq!(eval("(/ -7 2)").unwrap(), Value::Integer(-3));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(eval("(/ 1 0)").unwrap_err(), EvalError::DivisionByZero);
    assert_eq!(eval("(/ 10 5 0)").unwrap_err(), EvalError::DivisionByZero);
}

#[test]
fn test_arithmetic_overflow() {
    assert_eq!(
        eval("(+ 9223372036854775807 1)").unwrap_err(),
        EvalError::Overflow
    );
    assert_eq!(
        eval("(- -9223372036854775808 1)").unwrap_err(),
        EvalError::Overflow
    );
    assert_eq!(
        eval("(* 9223372036854775807 2)").unwrap_err(),
        EvalError::Overflow
    );
    assert_eq!(
        eval("(/ -9223372036854775808 -1)").unwrap_err(),
        EvalError::Overflow
    );
}

#[test]
fn test_plus_concatenates_strings() {
    assert_eq!(
        eval("(+ `foo` `bar`)").unwrap(),
        Value::String("foobar".to_string())
    );
    assert_eq!(
        eval("(+ `a` `b` `c`)").unwrap(),
        Value::String("abc".to_string())
    );
}

#[test]
fn test_mixed_arithmetic_is_an_error() {
    assert!(matches!(
        eval("(+ 1 `a`)").unwrap_err(),
        EvalError::TypeError(_)
    ));
    assert!(matches!(
        eval("(- `a` `b`)").unwrap_err(),
        EvalError::TypeError(_)
    ));
    assert!(matches!(
        eval("(* `a` 2)").unwrap_err(),
        EvalError::TypeError(_)
    ));
}

#[test]
fn test_folds_need_two_operands() {
    assert_eq!(
        eval("(+ 1)").unwrap_err(),
        EvalError::Arity {
            op: "+".to_string(),
            needs: 2,
            got: 1,
        }
    );
}

// ============================================================================
// Logical Operators
// ============================================================================

#[test]
fn test_all() {
    assert_eq!(eval("(All 1 2)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(All 1 0)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(All (== 1 1) (< 1 2))").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(All (== 1 1) (> 1 2))").unwrap(), Value::Boolean(false));
}

#[test]
fn test_any() {
    assert_eq!(eval("(Any 0 0)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(Any 0 1)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(Any (== 1 2) (== 2 2))").unwrap(), Value::Boolean(true));
}

#[test]
fn test_truthiness_of_each_scalar_type() {
    // Integers: nonzero. Strings: nonempty. Booleans: themselves.
    assert_eq!(eval("(All -5 1)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(Any 0 ``)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(All `x` `y`)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(All (True) (True))").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(Any (False) (False))").unwrap(), Value::Boolean(false));
}

#[test]
fn test_not_is_true_when_no_operand_is_truthy() {
    assert_eq!(eval("(Not 0)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(Not 1)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(Not 0 `` 0)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(Not 0 1 0)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(Not (== 1 2))").unwrap(), Value::Boolean(true));
}

#[test]
fn test_not_needs_an_operand() {
    assert_eq!(
        eval("(Not)").unwrap_err(),
        EvalError::Arity {
            op: "Not".to_string(),
            needs: 1,
            got: 0,
        }
    );
}

#[test]
fn test_constants_ignore_their_operands() {
    assert_eq!(eval("(True)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(False)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(True 0 `` 0)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(False 1 2 3)").unwrap(), Value::Boolean(false));
}

#[test]
fn test_operands_evaluate_before_the_operator_applies() {
    // Even a constant sees its children fail first.
    assert_eq!(
        eval("(True (/ 1 0))").unwrap_err(),
        EvalError::DivisionByZero
    );
}

#[test]
fn test_is_string() {
    assert_eq!(eval("(IsString `a`)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(IsString 1)").unwrap(), Value::Boolean(false));
    assert_eq!(eval("(IsString 1 `a`)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(IsString (+ 1 2))").unwrap(), Value::Boolean(false));
    assert_eq!(
        eval("(IsString (+ `a` `b`))").unwrap(),
        Value::Boolean(true)
    );
}

// ============================================================================
// Target Navigation
// ============================================================================

#[test]
fn test_lookup_object_field() {
    let target = json!({"a": {"b": 5}});
    assert_eq!(eval_on("(. a b)", target).unwrap(), Value::Integer(5));
}

#[test]
fn test_comparing_navigated_values() {
    let target = json!({"a": {"b": 5}});
    assert_eq!(
        eval_on("(== (. a b) 5)", target.clone()).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval_on("(== (. a b) 6)", target).unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_lookup_array_index() {
    let target = json!({"items": [10, 20, 30]});
    assert_eq!(eval_on("(. items 1)", target).unwrap(), Value::Integer(20));
}

#[test]
fn test_lookup_mixes_fields_and_indexes() {
    let target = json!({"users": [{"name": "Ann"}, {"name": "Ben"}]});
    assert_eq!(
        eval_on("(. users 1 name)", target).unwrap(),
        Value::String("Ben".to_string())
    );
}

#[test]
fn test_lookup_integer_key_reads_object_field_by_decimal_name() {
    let target = json!({"1": "one"});
    assert_eq!(
        eval_on("(. 1)", target).unwrap(),
        Value::String("one".to_string())
    );
}

#[test]
fn test_lookup_scalar_endpoints() {
    assert_eq!(
        eval_on("(. flag)", json!({"flag": true})).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        eval_on("(. name)", json!({"name": "x"})).unwrap(),
        Value::String("x".to_string())
    );
    assert_eq!(
        eval_on("(. big)", json!({"big": 9007199254740993i64})).unwrap(),
        Value::Integer(9007199254740993)
    );
}

#[test]
fn test_lookup_missing_field() {
    let err = eval_on("(. nope)", json!({"a": 1})).unwrap_err();
    match err {
        EvalError::AccessError(msg) => assert!(msg.contains("nope")),
        other => panic!("Expected AccessError, got {:?}", other),
    }
}

#[test]
fn test_lookup_index_out_of_bounds() {
    assert!(matches!(
        eval_on("(. items 3)", json!({"items": [1, 2, 3]})).unwrap_err(),
        EvalError::AccessError(_)
    ));
}

#[test]
fn test_lookup_negative_index() {
    assert!(matches!(
        eval_on("(. items -1)", json!({"items": [1]})).unwrap_err(),
        EvalError::AccessError(_)
    ));
}

#[test]
fn test_lookup_string_key_on_array() {
    assert!(matches!(
        eval_on("(. items first)", json!({"items": [1]})).unwrap_err(),
        EvalError::TypeError(_)
    ));
}

#[test]
fn test_lookup_boolean_key() {
    assert!(matches!(
        eval_on("(. (True))", json!({"true": 1})).unwrap_err(),
        EvalError::TypeError(_)
    ));
}

#[test]
fn test_lookup_through_a_scalar() {
    assert!(matches!(
        eval_on("(. a b)", json!({"a": 5})).unwrap_err(),
        EvalError::AccessError(_)
    ));
}

#[test]
fn test_lookup_cannot_end_on_a_container() {
    assert!(matches!(
        eval_on("(. a)", json!({"a": {"b": 1}})).unwrap_err(),
        EvalError::TypeError(_)
    ));
    assert!(matches!(
        eval_on("(. a)", json!({"a": [1, 2]})).unwrap_err(),
        EvalError::TypeError(_)
    ));
}

#[test]
fn test_lookup_cannot_end_on_null_or_float() {
    assert!(matches!(
        eval_on("(. a)", json!({"a": null})).unwrap_err(),
        EvalError::TypeError(_)
    ));
    assert!(matches!(
        eval_on("(. a)", json!({"a": 1.5})).unwrap_err(),
        EvalError::TypeError(_)
    ));
}

#[test]
fn test_lookup_needs_a_key() {
    assert_eq!(
        eval_on("(.)", json!({})).unwrap_err(),
        EvalError::Arity {
            op: ".".to_string(),
            needs: 1,
            got: 0,
        }
    );
}

// ============================================================================
// Operator Resolution
// ============================================================================

#[test]
fn test_undefined_operator_names_itself_and_its_node() {
    let err = eval("(Frobnicate 1 2)").unwrap_err();
    assert_eq!(
        err,
        EvalError::UndefinedOperator {
            name: "Frobnicate".to_string(),
            node: "(Frobnicate 1 2)".to_string(),
        }
    );
}

#[test]
fn test_operator_names_are_case_sensitive() {
    assert!(matches!(
        eval("(all 1 2)").unwrap_err(),
        EvalError::UndefinedOperator { .. }
    ));
}

#[test]
fn test_integer_head_is_undefined() {
    let err = eval("(42 1)").unwrap_err();
    assert!(matches!(
        err,
        EvalError::UndefinedOperator { ref name, .. } if name == "42"
    ));
}

#[test]
fn test_undefined_operator_in_a_nested_position() {
    assert!(matches!(
        eval("(All (Frobnicate) (True))").unwrap_err(),
        EvalError::UndefinedOperator { .. }
    ));
}

#[test]
fn test_operator_names_in_operand_position_are_data() {
    assert_eq!(eval("(== `.` `.`)").unwrap(), Value::Boolean(true));
    assert_eq!(eval("(IsString All)").unwrap(), Value::Boolean(true));
}

#[test]
fn test_empty_expression() {
    assert_eq!(eval("()").unwrap_err(), EvalError::EmptyExpression);
    assert_eq!(eval("(())").unwrap_err(), EvalError::EmptyExpression);
    assert_eq!(
        eval("(All (True) ())").unwrap_err(),
        EvalError::EmptyExpression
    );
}

// ============================================================================
// Custom Operator Tables
// ============================================================================

#[test]
fn test_custom_context_renames_operators() {
    let mut context = Context::empty();
    context.define("Plus", Op::Add);

    let query =
        Query::with_context("(Plus 1 2)", serde_json::Value::Null, context).unwrap();
    assert_eq!(query.exec().unwrap(), Value::Integer(3));
}

#[test]
fn test_empty_context_defines_nothing() {
    let query =
        Query::with_context("(+ 1 2)", serde_json::Value::Null, Context::empty()).unwrap();
    assert!(matches!(
        query.exec().unwrap_err(),
        EvalError::UndefinedOperator { .. }
    ));
}

#[test]
fn test_redefining_a_standard_name() {
    let mut context = Context::standard();
    context.define("+", Op::Subtract);

    let query =
        Query::with_context("(+ 5 2)", serde_json::Value::Null, context).unwrap();
    assert_eq!(query.exec().unwrap(), Value::Integer(3));
}

#[test]
fn test_default_context_is_the_standard_table() {
    let context = Context::default();
    assert_eq!(context.get("All"), Some(Op::All));
    assert_eq!(context.get("."), Some(Op::Lookup));
    assert_eq!(context.get("Missing"), None);
}

// ============================================================================
// Whole Queries
// ============================================================================

#[test]
fn test_matching_a_record() {
    let target = json!({"stats": {"level": 12}, "role": "mercenary"});
    assert_eq!(
        eval_on(
            "(All (>= (. stats level) 10) (== (. role) `mercenary`))",
            target
        )
        .unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_rejecting_a_record() {
    let target = json!({"stats": {"level": 9}, "role": "mercenary"});
    assert_eq!(
        eval_on(
            "(All (>= (. stats level) 10) (== (. role) `mercenary`))",
            target
        )
        .unwrap(),
        Value::Boolean(false)
    );
}

#[test]
fn test_exec_is_repeatable() {
    let query = Query::new("(+ 1 2)", serde_json::Value::Null).unwrap();
    assert_eq!(query.exec().unwrap(), Value::Integer(3));
    assert_eq!(query.exec().unwrap(), Value::Integer(3));
}

#[test]
fn test_query_without_wrapping_parens() {
    assert_eq!(eval("+ 1 2").unwrap(), Value::Integer(3));
}

// ============================================================================
// Error Messages
// ============================================================================

#[test]
fn test_error_display_forms() {
    assert_eq!(
        eval("(Frobnicate 1)").unwrap_err().to_string(),
        "Undefined operator: \"Frobnicate\" in (Frobnicate 1)"
    );
    assert_eq!(
        eval("(+ 1)").unwrap_err().to_string(),
        "Operator \"+\" needs at least 2 operand(s), got 1"
    );
    assert_eq!(
        eval("(/ 1 0)").unwrap_err().to_string(),
        "Division by zero"
    );
    assert_eq!(
        eval("()").unwrap_err().to_string(),
        "Cannot evaluate an empty expression"
    );
}
